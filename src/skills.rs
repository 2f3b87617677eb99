//! Skill catalog consulted by the engine for each skill's level range.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GardenError, GardenResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub max_level: u32,
}

impl Skill {
    pub fn new(id: &str, name: &str, max_level: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            max_level,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: HashMap<String, Skill>,
}

impl SkillCatalog {
    pub fn new(skills: Vec<Skill>) -> GardenResult<Self> {
        let mut map = HashMap::with_capacity(skills.len());
        for skill in skills {
            if skill.id.trim().is_empty() {
                return Err(GardenError::Validation("skill id must not be empty".to_string()));
            }
            if skill.max_level == 0 {
                return Err(GardenError::Validation(format!(
                    "skill {} must have max_level >= 1",
                    skill.id
                )));
            }
            if map.contains_key(&skill.id) {
                return Err(GardenError::Validation(format!("duplicate skill id {}", skill.id)));
            }
            map.insert(skill.id.clone(), skill);
        }
        Ok(Self { skills: map })
    }

    /// Built-in arithmetic skills of the Number Garden.
    pub fn number_garden() -> Self {
        let skills = [
            Skill::new("counting", "Counting", 5),
            Skill::new("number-bonds", "Number Bonds", 4),
            Skill::new("addition", "Addition", 6),
            Skill::new("subtraction", "Subtraction", 6),
            Skill::new("multiplication", "Multiplication", 8),
            Skill::new("division", "Division", 6),
            Skill::new("place-value", "Place Value", 3),
        ];
        Self {
            skills: skills.into_iter().map(|s| (s.id.clone(), s)).collect(),
        }
    }

    pub fn from_json_str(raw: &str) -> GardenResult<Self> {
        let skills: Vec<Skill> = serde_json::from_str(raw)?;
        Self::new(skills)
    }

    pub fn load(path: impl AsRef<Path>) -> GardenResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.as_ref().display(),
            skills = catalog.len(),
            "skill catalog loaded"
        );
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn max_level(&self, id: &str) -> Option<u32> {
        self.skills.get(id).map(|s| s.max_level)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
