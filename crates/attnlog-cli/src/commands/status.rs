use crate::runtime::Runtime;
use anyhow::{Context, Result};
use attnlog_application::{ContextSnapshot, Phase};
use attnlog_core::log::Action;

pub fn run(runtime: &Runtime, json: bool) -> Result<()> {
    let snapshot = runtime.context.snapshot();
    if json {
        let out = serde_json::to_string_pretty(&snapshot).context("Failed to encode status")?;
        println!("{}", out);
    } else {
        print!("{}", render(&snapshot));
    }
    Ok(())
}

fn render(snapshot: &ContextSnapshot) -> String {
    let mut out = String::new();
    match snapshot.phase {
        Phase::NoIdentity => {
            out.push_str("No student ID set. Run `attnlog identity set <ID>`.\n");
            return out;
        }
        Phase::NoSession => {
            out.push_str(&format!(
                "Student: {}\nNo active session ({} saved). Run `attnlog session select <ID>`.\n",
                snapshot.student_id.as_deref().unwrap_or_default(),
                snapshot.sessions.len()
            ));
            return out;
        }
        Phase::ActiveSession => {}
    }

    out.push_str(&format!(
        "Student: {}\n",
        snapshot.student_id.as_deref().unwrap_or_default()
    ));
    if let Some(session) = &snapshot.session_id {
        out.push_str(&format!("Session: {}\n", session));
    }
    for (action, records) in [
        (Action::Attentive, &snapshot.attentive),
        (Action::Bored, &snapshot.bored),
    ] {
        out.push_str(&format!("{} ({})\n", action, snapshot.count(action)));
        for record in records {
            out.push_str(&format!("  {}\n", record.timestamp));
        }
    }
    out
}
