use crate::runtime::Runtime;
use anyhow::Result;
use attnlog_core::ids::SessionId;
use attnlog_core::session::Selection;

pub async fn select(runtime: &mut Runtime, id: &str) -> Result<()> {
    let selection = runtime.context.create_or_select_session(id).await?;
    runtime.flush_warnings();
    let session = runtime
        .context
        .active_session()
        .map(|s| s.to_string())
        .unwrap_or_default();
    match selection {
        Selection::Created => println!("Created session {}", session),
        Selection::Refreshed => println!("Selected session {}", session),
    }
    Ok(())
}

pub async fn open(runtime: &mut Runtime, id: &str) -> Result<()> {
    let session = SessionId::parse(id)?;
    runtime.context.open_session(&session).await?;
    runtime.flush_warnings();
    println!("Opened session {}", session);
    Ok(())
}

pub fn list(runtime: &Runtime) -> Result<()> {
    let snapshot = runtime.context.snapshot();
    if snapshot.student_id.is_none() {
        println!("No student ID set.");
        return Ok(());
    }
    if snapshot.sessions.is_empty() {
        println!("No sessions.");
        return Ok(());
    }
    for session in &snapshot.sessions {
        let marker = if snapshot.session_id.as_deref() == Some(session.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  created {}  last accessed {}",
            marker, session.id, session.created_at, session.last_accessed
        );
    }
    Ok(())
}

pub async fn delete(runtime: &mut Runtime, id: &str) -> Result<()> {
    let session = SessionId::parse(id)?;
    let token = runtime.context.request_delete_session(&session)?;
    if !runtime.ask(&token)? {
        runtime.context.cancel(&token);
        println!("Cancelled.");
        return Ok(());
    }
    runtime.context.confirm(token).await?;
    println!("Deleted session {}", session);
    Ok(())
}

pub async fn leave(runtime: &mut Runtime) -> Result<()> {
    runtime.context.change_session().await?;
    println!("Left the active session.");
    Ok(())
}
