use std::path::Path;

use crate::adaptive::EngineSnapshot;
use crate::error::GardenResult;

/// Writes the snapshot next to its destination first and renames it into place,
/// so a crash never leaves a half-written file behind.
pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &EngineSnapshot) -> GardenResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let payload = serde_json::to_vec_pretty(snapshot)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, payload)?;
    std::fs::rename(&tmp_path, path)?;

    tracing::debug!(path = %path.display(), "snapshot saved");
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> GardenResult<EngineSnapshot> {
    let raw = std::fs::read(path.as_ref())?;
    let snapshot = serde_json::from_slice(&raw)?;
    Ok(snapshot)
}

/// `Ok(None)` when no snapshot has been written yet.
pub fn load_snapshot_if_exists(path: impl AsRef<Path>) -> GardenResult<Option<EngineSnapshot>> {
    if !path.as_ref().exists() {
        return Ok(None);
    }
    load_snapshot(path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::{AdaptiveConfig, AdaptiveDifficultyEngine};
    use crate::error::GardenError;
    use crate::skills::SkillCatalog;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut engine = AdaptiveDifficultyEngine::new_at(
            AdaptiveConfig::default(),
            SkillCatalog::number_garden(),
            1_700_000_000_000,
        );
        engine.set_skill("addition", None);
        engine.record_result_at(true, 4.0, 1_700_000_001_000);

        save_snapshot(&path, &engine.snapshot()).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.current_skill.as_deref(), Some("addition"));
        assert_eq!(loaded.current_level, engine.current_level());
        assert_eq!(loaded.recent_results.len(), 1);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_snapshot_if_exists(&path).unwrap().is_none());
        assert!(matches!(load_snapshot(&path), Err(GardenError::Io(_))));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"{ nope").unwrap();
        assert!(matches!(load_snapshot(&path), Err(GardenError::Json(_))));
    }
}
