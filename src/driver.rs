//! JSON-lines protocol that drives one engine from a host process.
//!
//! Each input line is a command object tagged by `cmd`; each produces exactly one
//! output line. Malformed lines produce `{"error": ...}` and do not stop the loop.

use std::io::{BufRead, Write};

use serde::Deserialize;
use serde_json::{json, Value};

use crate::adaptive::AdaptiveDifficultyEngine;
use crate::error::GardenResult;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    SetSkill {
        skill: String,
        #[serde(default, rename = "startLevel")]
        start_level: Option<u32>,
    },
    Answer {
        correct: bool,
        time: f64,
    },
    Detect,
    Summary,
    Reset,
    Snapshot,
}

pub fn handle(engine: &mut AdaptiveDifficultyEngine, command: Command) -> Value {
    match command {
        Command::SetSkill { skill, start_level } => {
            engine.set_skill(&skill, start_level);
            json!({
                "skill": skill,
                "level": engine.current_level(),
                "maxLevel": engine.max_level(),
                "calibrating": engine.is_calibrating(),
            })
        }
        Command::Answer { correct, time } => {
            let adjustment = engine.record_result(correct, time);
            json!({
                "adjustment": adjustment,
                "level": engine.current_level(),
                "scaffold": engine.scaffolding(),
            })
        }
        Command::Detect => {
            let state = engine.detect_state();
            json!({ "state": state, "prompt": state.prompt() })
        }
        Command::Summary => json!({ "summary": engine.session_summary() }),
        Command::Reset => {
            engine.reset();
            json!({ "reset": true, "level": engine.current_level() })
        }
        Command::Snapshot => json!({ "snapshot": engine.snapshot() }),
    }
}

pub fn handle_line(engine: &mut AdaptiveDifficultyEngine, line: &str) -> Value {
    match serde_json::from_str::<Command>(line) {
        Ok(command) => handle(engine, command),
        Err(err) => {
            tracing::warn!(error = %err, "rejected command line");
            json!({ "error": err.to_string() })
        }
    }
}

/// Runs until EOF. Returns the number of commands answered.
pub fn run<R: BufRead, W: Write>(
    engine: &mut AdaptiveDifficultyEngine,
    reader: R,
    mut writer: W,
) -> GardenResult<usize> {
    let mut handled = 0;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(engine, &line);
        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cmd: Command =
            serde_json::from_str(r#"{"cmd":"set_skill","skill":"addition","startLevel":2}"#).unwrap();
        assert_eq!(
            cmd,
            Command::SetSkill {
                skill: "addition".into(),
                start_level: Some(2)
            }
        );
        let cmd: Command = serde_json::from_str(r#"{"cmd":"summary"}"#).unwrap();
        assert_eq!(cmd, Command::Summary);
    }

    #[test]
    fn test_run_session() {
        let mut engine = AdaptiveDifficultyEngine::default();
        let input = concat!(
            r#"{"cmd":"set_skill","skill":"counting"}"#,
            "\n",
            r#"{"cmd":"answer","correct":true,"time":3}"#,
            "\n",
            "\n",
            "garbage\n",
            r#"{"cmd":"summary"}"#,
            "\n",
        );
        let mut out = Vec::new();
        let handled = run(&mut engine, input.as_bytes(), &mut out).unwrap();
        assert_eq!(handled, 4);

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["level"], 3);
        assert_eq!(lines[1]["adjustment"]["action"], "level_up");
        assert_eq!(lines[1]["level"], 5);
        assert!(lines[2]["error"].is_string());
        assert_eq!(lines[3]["summary"]["totalProblems"], 1);
    }

    #[test]
    fn test_every_command() {
        let mut engine = AdaptiveDifficultyEngine::default();
        let input = [
            r#"{"cmd":"set_skill","skill":"addition","startLevel":2}"#,
            r#"{"cmd":"answer","correct":false,"time":1}"#,
            r#"{"cmd":"answer","correct":false,"time":1}"#,
            r#"{"cmd":"detect"}"#,
            r#"{"cmd":"snapshot"}"#,
            r#"{"cmd":"summary"}"#,
            r#"{"cmd":"reset"}"#,
            r#"{"cmd":"summary"}"#,
        ]
        .join("\n");

        let mut out = Vec::new();
        let handled = run(&mut engine, input.as_bytes(), &mut out).unwrap();
        assert_eq!(handled, 8);

        let lines: Vec<Value> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines[0]["level"], 2);
        assert_eq!(lines[0]["maxLevel"], 6);
        assert_eq!(lines[0]["calibrating"], false);

        assert_eq!(lines[1]["adjustment"]["action"], "level_down");
        assert_eq!(lines[1]["level"], 1);
        assert_eq!(lines[2]["adjustment"]["scaffoldChange"], "increase");
        assert_eq!(lines[2]["scaffold"], "full");

        assert_eq!(lines[3]["state"], "frustrated");
        assert!(lines[3]["prompt"].is_string());

        assert_eq!(lines[4]["snapshot"]["currentSkill"], "addition");
        assert_eq!(lines[4]["snapshot"]["recentResults"].as_array().map(Vec::len), Some(2));

        assert_eq!(lines[5]["summary"]["totalProblems"], 2);
        assert_eq!(lines[5]["summary"]["accuracyPercent"], 0);

        assert_eq!(lines[6]["reset"], true);
        assert_eq!(lines[6]["level"], 1);
        assert_eq!(lines[7]["summary"]["totalProblems"], 0);
        assert_eq!(lines[7]["summary"]["currentSkill"], "addition");
    }

    #[test]
    fn test_detect_on_fresh_engine_has_no_prompt() {
        let mut engine = AdaptiveDifficultyEngine::default();
        let response = handle(&mut engine, Command::Detect);
        assert_eq!(response["state"], "normal");
        assert!(response["prompt"].is_null());
    }
}
