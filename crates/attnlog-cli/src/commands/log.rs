use crate::runtime::Runtime;
use anyhow::Result;
use attnlog_application::{Confirmed, UndoRequest};
use attnlog_core::log::Action;

pub async fn record(runtime: &mut Runtime, action: Action) -> Result<()> {
    let record = runtime.context.record(action).await?;
    let count = runtime
        .context
        .logs()
        .map(|logs| logs.get(action).len())
        .unwrap_or_default();
    println!("{} {} ({} total)", record.action, record.timestamp, count);
    Ok(())
}

pub async fn undo(runtime: &mut Runtime) -> Result<()> {
    let token = match runtime.context.request_undo()? {
        UndoRequest::NothingToUndo => {
            println!("Nothing to undo.");
            return Ok(());
        }
        UndoRequest::NeedsConfirmation(token) => token,
    };
    if !runtime.ask(&token)? {
        runtime.context.cancel(&token);
        println!("Cancelled.");
        return Ok(());
    }
    if let Confirmed::Undone(removed) = runtime.context.confirm(token).await? {
        println!("Removed {} {}", removed.action, removed.timestamp);
    }
    Ok(())
}
