//! JSON-lines action scripts replayed by `roster run`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::core::types::FilterSpec;
use crate::forms::{LoginForm, RegisterForm};

/// One line of a script.
///
/// ```text
/// {"action":"register","firstName":"Ada",...,"confirmPassword":"password1"}
/// {"action":"login","email":"ada@example.com","password":"password1"}
/// {"action":"list","country":"UK"}
/// {"action":"session"}
/// {"action":"route","path":"/dashboard"}
/// {"action":"logout"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Register(RegisterForm),
    Login(LoginForm),
    Logout,
    List(FilterSpec),
    Session,
    Route { path: String },
}

/// Parse script text. Blank lines and `#` comments are skipped.
pub fn parse_script(contents: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step: ScriptStep =
            serde_json::from_str(trimmed).with_context(|| format!("parse line {}", index + 1))?;
        steps.push(step);
    }
    Ok(steps)
}

pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    debug!(path = %path.display(), "loading script");
    let contents =
        fs::read_to_string(path).with_context(|| format!("read script {}", path.display()))?;
    let steps = parse_script(&contents).with_context(|| format!("parse script {}", path.display()))?;
    debug!(steps = steps.len(), "script loaded");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_step_kind() {
        let script = r#"
# seed
{"action":"register","firstName":"Ada","email":"ada@example.com","confirmPassword":"pw"}
{"action":"login","email":"ada@example.com","password":"password1"}

{"action":"list","country":"UK","gender":""}
{"action":"session"}
{"action":"route","path":"/dashboard"}
{"action":"logout"}
"#;
        let steps = parse_script(script).expect("parse");
        assert_eq!(steps.len(), 6);
        let ScriptStep::Register(form) = &steps[0] else {
            panic!("expected register step");
        };
        assert_eq!(form.first_name, "Ada");
        assert_eq!(form.confirm_password, "pw");
        assert_eq!(form.last_name, "");
        assert_eq!(
            steps[2],
            ScriptStep::List(FilterSpec {
                date: None,
                country: Some("UK".to_string()),
                gender: Some(String::new()),
            })
        );
        assert_eq!(
            steps[4],
            ScriptStep::Route {
                path: "/dashboard".to_string()
            }
        );
        assert_eq!(steps[5], ScriptStep::Logout);
    }

    #[test]
    fn unknown_action_reports_line_number() {
        let err = parse_script("{\"action\":\"logout\"}\n{\"action\":\"delete\"}\n")
            .expect_err("unknown action");
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn load_reads_from_disk() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("script.jsonl");
        fs::write(&path, "{\"action\":\"session\"}\n").expect("write");
        assert_eq!(load_script(&path).expect("load"), vec![ScriptStep::Session]);
    }
}
