use crate::runtime::Runtime;
use anyhow::Result;

pub async fn set(runtime: &mut Runtime, id: &str) -> Result<()> {
    runtime.context.submit_identity(id).await?;
    runtime.flush_warnings();
    if let Some(student) = runtime.context.student() {
        println!("Student ID set: {}", student);
    }
    Ok(())
}

pub async fn reset(runtime: &mut Runtime) -> Result<()> {
    let token = runtime.context.request_reset_identity()?;
    if !runtime.ask(&token)? {
        runtime.context.cancel(&token);
        println!("Cancelled.");
        return Ok(());
    }
    runtime.context.confirm(token).await?;
    println!("Student ID and all data deleted.");
    Ok(())
}
