//! Replay of script steps against an [`AppState`] for `roster run`.
//!
//! Each step produces one JSON report. Form validation failures are reported
//! as `rejected` and do not stop the replay.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::app::{Action, ActionOutcome, AppState, INVALID_CREDENTIALS};
use crate::io::script::ScriptStep;

/// Apply one step and describe what happened.
pub fn replay_step(app: &mut AppState, step: ScriptStep) -> Result<Value> {
    let report = match step {
        ScriptStep::Register(form) => match form.validate() {
            Ok(input) => outcome_report(app.dispatch(Action::Register(input)))?,
            Err(errors) => json!({ "outcome": "rejected", "errors": errors }),
        },
        ScriptStep::Login(form) => match form.validate() {
            Ok((email, password)) => {
                outcome_report(app.dispatch(Action::LoginAttempt { email, password }))?
            }
            Err(errors) => json!({ "outcome": "rejected", "errors": errors }),
        },
        ScriptStep::Logout => outcome_report(app.dispatch(Action::Logout))?,
        ScriptStep::List(spec) => {
            serde_json::to_value(app.listing(&spec)).context("serialize listing")?
        }
        ScriptStep::Session => {
            serde_json::to_value(app.session_view()).context("serialize session")?
        }
        ScriptStep::Route { path } => {
            serde_json::to_value(app.route(&path)).context("serialize route decision")?
        }
    };
    Ok(report)
}

/// Apply steps in order, returning one report per step.
pub fn replay(app: &mut AppState, steps: Vec<ScriptStep>) -> Result<Vec<Value>> {
    steps
        .into_iter()
        .enumerate()
        .map(|(index, step)| {
            replay_step(app, step).with_context(|| format!("replay step {}", index + 1))
        })
        .collect()
}

fn outcome_report(outcome: ActionOutcome) -> Result<Value> {
    let failed = outcome == ActionOutcome::LoginFailed;
    let mut value = serde_json::to_value(outcome).context("serialize outcome")?;
    if failed {
        if let Some(object) = value.as_object_mut() {
            object.insert("message".to_string(), Value::from(INVALID_CREDENTIALS));
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Clock;
    use crate::forms::LoginForm;
    use crate::io::script::parse_script;
    use crate::test_support::{date, register_form};

    fn app() -> AppState {
        AppState::default().with_clock(Clock::Fixed(date(2024, 2, 29)))
    }

    fn login(email: &str, password: &str) -> ScriptStep {
        ScriptStep::Login(LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    #[test]
    fn register_then_login_reports_user() {
        let mut app = app();
        let registered = replay_step(
            &mut app,
            ScriptStep::Register(register_form("ada@example.com", "password1")),
        )
        .expect("replay");
        assert_eq!(registered["outcome"], "registered");
        assert_eq!(registered["user"]["registrationDate"], "2024-02-29");

        let report = replay_step(&mut app, login("ada@example.com", "password1")).expect("replay");
        assert_eq!(report["outcome"], "login_succeeded");
        assert_eq!(report["user"]["email"], "ada@example.com");
    }

    #[test]
    fn failed_login_carries_message() {
        let mut app = app();
        let report = replay_step(&mut app, login("ada@example.com", "password1")).expect("replay");
        assert_eq!(report["outcome"], "login_failed");
        assert_eq!(report["message"], INVALID_CREDENTIALS);
    }

    #[test]
    fn invalid_form_is_rejected_without_touching_state() {
        let mut app = app();
        let mut form = register_form("ada@example.com", "password1");
        form.phone_number = "12".to_string();
        let report = replay_step(&mut app, ScriptStep::Register(form)).expect("replay");
        assert_eq!(report["outcome"], "rejected");
        assert_eq!(report["errors"][0]["field"], "phoneNumber");
        assert!(app.users().is_empty());
    }

    #[test]
    fn whitespace_password_registers_and_logs_in() {
        let mut app = app();
        let spaces = "        ";
        let report = replay_step(
            &mut app,
            ScriptStep::Register(register_form("ada@example.com", spaces)),
        )
        .expect("replay");
        assert_eq!(report["outcome"], "registered");

        let report = replay_step(&mut app, login("ada@example.com", spaces)).expect("replay");
        assert_eq!(report["outcome"], "login_succeeded");
        assert!(app.is_authenticated());
    }

    #[test]
    fn full_script_replays_in_order() {
        let script = r#"
{"action":"register","firstName":"A","lastName":"One","email":"a@x.com","address":"1 St","country":"USA","gender":"male","phoneNumber":"0123456789","password":"password1","confirmPassword":"password1"}
{"action":"register","firstName":"B","lastName":"Two","email":"b@x.com","address":"2 St","country":"India","gender":"female","phoneNumber":"0123456789","password":"password2","confirmPassword":"password2"}
{"action":"route","path":"/dashboard"}
{"action":"login","email":"b@x.com","password":"password2"}
{"action":"session"}
{"action":"list","country":"India"}
{"action":"logout"}
{"action":"session"}
"#;
        let mut app = app();
        let reports = replay(&mut app, parse_script(script).expect("parse")).expect("replay");
        assert_eq!(reports.len(), 8);
        assert_eq!(reports[2]["decision"], "redirect");
        assert_eq!(reports[2]["to"], "/login");
        assert_eq!(reports[4]["greeting"], "Welcome, B (b@x.com)");
        assert_eq!(reports[5]["activeFilterCount"], 1);
        assert_eq!(reports[5]["users"].as_array().map(Vec::len), Some(1));
        assert_eq!(reports[6]["outcome"], "logged_out");
        assert_eq!(reports[7]["isAuthenticated"], false);
        assert!(reports[7]["currentUser"].is_null());
    }
}
