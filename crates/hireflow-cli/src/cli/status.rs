//! `hflow status`: session, backend and draft overview.

use anyhow::{Context, Result};
use console::style;

use hireflow_core::draft_store::DraftStore;

use crate::state::AppState;

pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let session = state.session.context();
    let drafts = state
        .draft_store
        .list_drafts()
        .await
        .context("Failed to list drafts")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "signed_in": session.is_authenticated(),
                "email": session.email(),
                "role": session.role().map(|r| r.to_string()),
                "profile_complete": session.profile_complete(),
                "api_base_url": state.config.api_base_url,
                "data_dir": state.data_dir.display().to_string(),
                "drafts": drafts.len(),
            }))?
        );
        return Ok(());
    }

    println!();
    println!("  {} Hireflow status", style("*").cyan().bold());
    println!();
    match session.email() {
        Some(email) if session.is_authenticated() => {
            let role = session
                .role()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "no role".to_string());
            println!(
                "  Account    {} ({})",
                style(email).cyan(),
                style(role).dim()
            );
            println!(
                "  Profile    {}",
                if session.profile_complete() {
                    style("complete").green()
                } else {
                    style("incomplete").yellow()
                }
            );
        }
        _ => println!("  Account    {}", style("signed out").yellow()),
    }
    println!("  Backend    {}", state.config.api_base_url);
    println!("  Data dir   {}", state.data_dir.display());
    println!("  Drafts     {}", drafts.len());
    println!();

    Ok(())
}
