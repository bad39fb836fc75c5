//! Draft commands: list, show, discard.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Confirm;

use hireflow_core::definition::definition_for;
use hireflow_core::draft_store::DraftStore;
use hireflow_types::draft::PersistedDraft;
use hireflow_types::wizard::WizardKind;

use super::wizard::format_value;
use crate::state::AppState;

/// List saved drafts in a table.
pub async fn list_drafts(state: &AppState, json: bool) -> Result<()> {
    let drafts = state
        .draft_store
        .list_drafts()
        .await
        .context("Failed to list drafts")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&drafts)?);
        return Ok(());
    }

    if drafts.is_empty() {
        println!();
        println!(
            "  {} No saved drafts. Start one with: {}",
            style("i").blue().bold(),
            style("hflow wizard job-posting").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Wizard").fg(Color::White),
        Cell::new("Step").fg(Color::White),
        Cell::new("Updated").fg(Color::White),
    ]);

    for draft in &drafts {
        let total = definition_for(draft.kind).total_steps();
        let step = match draft.current_step {
            Some(step) => format!("{step} / {total}"),
            None => "unreadable".to_string(),
        };
        table.add_row(vec![
            Cell::new(draft.kind.slug()).fg(Color::Cyan),
            Cell::new(step),
            Cell::new(draft.updated_at.format("%Y-%m-%d %H:%M").to_string()).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} draft{}",
        style(drafts.len()).bold(),
        if drafts.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

/// Print the saved fields of one draft, step by step.
pub async fn show_draft(state: &AppState, kind: WizardKind, json: bool) -> Result<()> {
    let Some(stored) = state
        .draft_store
        .load_draft(kind)
        .await
        .context("Failed to load draft")?
    else {
        anyhow::bail!("No saved draft for {kind}");
    };

    let persisted: PersistedDraft = serde_json::from_str(&stored.state_json)
        .context("Saved draft is unreadable; discard it with `hflow drafts discard`")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&persisted)?);
        return Ok(());
    }

    let definition = definition_for(kind);
    println!();
    println!(
        "  {} {} (step {} of {}, saved {})",
        style("*").cyan().bold(),
        style(definition.title).bold(),
        persisted.current_step,
        definition.total_steps(),
        stored.updated_at.format("%Y-%m-%d %H:%M")
    );

    for step in definition.steps {
        let mut fields = definition.fields_in_step(step.number).peekable();
        if fields.peek().is_none() {
            continue;
        }
        println!();
        println!("  {}", style(step.title).underlined());
        for field in fields {
            let Some(value) = persisted.fields.get(field.name) else {
                continue;
            };
            println!(
                "    {:<22} {}",
                style(field.label).dim(),
                format_value(field, value)
            );
        }
    }
    for (key, value) in &persisted.selections {
        println!("    {:<22} {}", style(key).dim(), value);
    }
    println!();

    Ok(())
}

pub async fn discard_draft(
    state: &AppState,
    kind: WizardKind,
    force: bool,
    json: bool,
) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Discard the saved {} draft?",
                style(kind.slug()).red().bold()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    state
        .draft_store
        .delete_draft(kind)
        .await
        .context("Failed to delete draft")?;

    if json {
        println!("{}", serde_json::json!({ "discarded": kind.slug() }));
    } else {
        println!(
            "  {} Discarded {} draft",
            style("✓").green().bold(),
            style(kind.slug()).cyan()
        );
    }
    Ok(())
}
