//! Interactive wizard runner (`hflow wizard <kind>`).
//!
//! Renders one step at a time with dialoguer prompts, feeding every edit to
//! the engine so the draft is saved as the user types. Leaving mid-way keeps
//! the draft; the next run resumes where it stopped.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};

use hireflow_core::array_field::compact;
use hireflow_core::definition::{FieldKind, FieldSpec, definition_for};
use hireflow_core::engine::{Phase, SubmitOutcome, SubmitStart, Transition};
use hireflow_core::sink::SubmissionSink;
use hireflow_infra::filesystem::file_ref_from_path;
use hireflow_types::draft::ErrorMap;
use hireflow_types::field::FieldValue;
use hireflow_types::wizard::WizardKind;

use crate::state::{AppState, ConcreteEngine};

/// What the user picked at the bottom of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepAction {
    Forward,
    Back,
    Edit,
    SaveAndQuit,
    Discard,
}

fn step_actions(step: u8, total: u8) -> Vec<(StepAction, &'static str)> {
    let mut actions = vec![(
        StepAction::Forward,
        if step == total { "Submit" } else { "Next" },
    )];
    if step > 1 {
        actions.push((StepAction::Back, "Back"));
    }
    actions.push((StepAction::Edit, "Edit this step again"));
    actions.push((StepAction::SaveAndQuit, "Save and quit"));
    actions.push((StepAction::Discard, "Discard draft"));
    actions
}

/// Run one wizard until it is submitted or the user leaves.
pub async fn run_wizard(state: &AppState, kind: WizardKind, fresh: bool, json: bool) -> Result<()> {
    let definition = definition_for(kind);
    if definition.requires_auth && !state.session.context().is_authenticated() {
        anyhow::bail!(
            "{} needs a signed-in account. Run `hflow login` first.",
            definition.title
        );
    }

    let mut engine = state.mount_wizard(kind).await;
    if fresh {
        engine.discard().await;
    } else if engine.current_step() > 1 {
        println!(
            "  {} Resuming saved draft at step {}",
            style("*").cyan().bold(),
            engine.current_step()
        );
    }

    println!();
    println!("  {}", style(definition.title).bold());

    let mut prompt_fields = true;
    loop {
        let step = match engine.phase() {
            Phase::Editing { step } => *step,
            Phase::Completed { data } => {
                let data = data.clone();
                return finish(state, &engine, data, json).await;
            }
            Phase::Submitting => anyhow::bail!("wizard left in submitting state"),
        };

        render_step_header(&engine, step);
        if let Some(banner) = engine.banner() {
            println!("  {} {}", style("!").red().bold(), style(banner).red());
            engine.dismiss_banner();
        }

        if prompt_fields {
            edit_step(&mut engine, step).await?;
        }
        prompt_fields = true;

        let actions = step_actions(step, engine.total_steps());
        let labels: Vec<&str> = actions.iter().map(|(_, label)| *label).collect();
        let picked = Select::new().items(&labels).default(0).interact()?;

        match actions[picked].0 {
            StepAction::Forward if step == engine.total_steps() => {
                match submit_with_spinner(state, &mut engine).await? {
                    SubmitOutcome::Invalid { step, errors } => {
                        println!(
                            "  {} Some answers need attention on step {step}",
                            style("!").yellow().bold()
                        );
                        print_errors(&engine, &errors);
                    }
                    SubmitOutcome::Completed { .. }
                    | SubmitOutcome::Failed { .. }
                    | SubmitOutcome::Stale => {}
                }
                prompt_fields = false;
            }
            StepAction::Forward => {
                if let Transition::Blocked { errors } = engine.next().await? {
                    print_errors(&engine, &errors);
                }
            }
            StepAction::Back => {
                engine.previous().await?;
            }
            StepAction::Edit => {}
            StepAction::SaveAndQuit => {
                println!(
                    "  {} Draft saved. Resume with: {}",
                    style("✓").green().bold(),
                    style(format!("hflow wizard {}", kind.slug())).yellow()
                );
                return Ok(());
            }
            StepAction::Discard => {
                let confirmed = Confirm::new()
                    .with_prompt("Throw away everything entered so far?")
                    .default(false)
                    .interact()?;
                if confirmed {
                    engine.discard().await;
                    println!("  {} Draft discarded", style("✓").green().bold());
                    return Ok(());
                }
                prompt_fields = false;
            }
        }
    }
}

fn render_step_header(engine: &ConcreteEngine, step: u8) {
    let title = engine
        .definition()
        .step(step)
        .map(|s| s.title)
        .unwrap_or_default();
    println!();
    println!(
        "  {} {}",
        style(format!("Step {step} of {}", engine.total_steps())).cyan().bold(),
        style(title).bold()
    );
    println!();
}

fn print_errors(engine: &ConcreteEngine, errors: &ErrorMap) {
    for (field, message) in errors {
        let label = engine
            .definition()
            .field(field)
            .map(|f| f.label)
            .unwrap_or(field.as_str());
        println!("    {} {}: {}", style("✗").red(), label, style(message).red());
    }
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

async fn edit_step(engine: &mut ConcreteEngine, step: u8) -> Result<()> {
    let definition = engine.definition();
    let is_review = definition.step(step).is_some_and(|s| s.review);

    if is_review {
        render_review(engine);
    }

    for field in definition.fields_in_step(step) {
        edit_field(engine, field).await?;
        if let Some(message) = engine.blur(field.name)? {
            println!("    {} {}", style("✗").red(), style(message).red());
        }
    }

    if step == engine.total_steps() {
        for selection in definition.selections {
            let current = engine
                .selection(selection.key)
                .unwrap_or(selection.default_option());
            let default = selection
                .options
                .iter()
                .position(|o| *o == current)
                .unwrap_or(0);
            let picked = Select::new()
                .with_prompt(selection.label)
                .items(selection.options)
                .default(default)
                .interact()?;
            engine
                .select(selection.key, selection.options[picked])
                .await?;
        }
    }

    Ok(())
}

async fn edit_field(engine: &mut ConcreteEngine, field: &'static FieldSpec) -> Result<()> {
    let current = engine.value(field.name).cloned();

    match field.kind {
        FieldKind::Text | FieldKind::LongText => {
            let initial = current
                .as_ref()
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_string();
            let value: String = Input::new()
                .with_prompt(field.label)
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text()?;
            engine.set_text(field.name, value).await?;
        }
        FieldKind::Secret => {
            let value = Password::new()
                .with_prompt(field.label)
                .allow_empty_password(true)
                .interact()?;
            engine.set_text(field.name, value).await?;
        }
        FieldKind::Flag => {
            let initial = current.and_then(|v| v.as_flag()).unwrap_or(false);
            let value = Confirm::new()
                .with_prompt(field.label)
                .default(initial)
                .interact()?;
            engine.set_flag(field.name, value).await?;
        }
        FieldKind::Choice { options } => {
            let current = current
                .as_ref()
                .and_then(FieldValue::as_text)
                .unwrap_or_default();
            let default = options.iter().position(|o| *o == current).unwrap_or(0);
            let picked = Select::new()
                .with_prompt(field.label)
                .items(options)
                .default(default)
                .interact()?;
            engine.set_text(field.name, options[picked]).await?;
        }
        FieldKind::File { .. } => edit_file(engine, field).await?,
        FieldKind::List => edit_list(engine, field).await?,
    }

    Ok(())
}

async fn edit_file(engine: &mut ConcreteEngine, field: &'static FieldSpec) -> Result<()> {
    loop {
        let initial = engine
            .value(field.name)
            .and_then(FieldValue::as_file)
            .map(|f| f.path.clone())
            .unwrap_or_default();
        let path: String = Input::new()
            .with_prompt(format!("{} (path, empty to clear)", field.label))
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;

        let path = path.trim();
        if path.is_empty() {
            engine.set_file(field.name, None).await?;
            return Ok(());
        }

        match file_ref_from_path(std::path::Path::new(path)).await {
            Ok(file) => {
                engine.set_file(field.name, Some(file)).await?;
                return Ok(());
            }
            Err(e) => println!("    {} {}: {e}", style("✗").red(), path),
        }
    }
}

async fn edit_list(engine: &mut ConcreteEngine, field: &'static FieldSpec) -> Result<()> {
    loop {
        let entries = engine
            .value(field.name)
            .and_then(FieldValue::as_list)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let mut items: Vec<String> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                if entry.trim().is_empty() {
                    format!("{}. {}", i + 1, style("(empty)").dim())
                } else {
                    format!("{}. {entry}", i + 1)
                }
            })
            .collect();
        let add = items.len();
        items.push("+ Add entry".to_string());
        let remove = (entries.len() > 1).then(|| {
            items.push("- Remove entry".to_string());
            items.len() - 1
        });
        let done = items.len();
        items.push("Done".to_string());

        let default = entries
            .iter()
            .position(|e| e.trim().is_empty())
            .unwrap_or(done);
        let picked = Select::new()
            .with_prompt(field.label)
            .items(&items)
            .default(default)
            .interact()?;

        if picked < entries.len() {
            let value: String = Input::new()
                .with_prompt(format!("{} #{}", field.label, picked + 1))
                .with_initial_text(entries[picked].clone())
                .allow_empty(true)
                .interact_text()?;
            engine.update_entry(field.name, picked, value).await?;
        } else if picked == add {
            engine.add_entry(field.name).await?;
        } else if Some(picked) == remove {
            let which = Select::new()
                .with_prompt("Remove which entry?")
                .items(&items[..entries.len()])
                .interact()?;
            engine.remove_entry(field.name, which).await?;
        } else {
            return Ok(());
        }
    }
}

// ---------------------------------------------------------------------------
// Review and submission
// ---------------------------------------------------------------------------

fn render_review(engine: &ConcreteEngine) {
    let definition = engine.definition();
    for step in definition.steps.iter().filter(|s| !s.review) {
        println!("  {}", style(step.title).underlined());
        for field in definition.fields_in_step(step.number) {
            if let Some(value) = engine.value(field.name) {
                println!(
                    "    {:<22} {}",
                    style(field.label).dim(),
                    format_value(field, value)
                );
            }
        }
        println!();
    }
}

async fn submit_with_spinner(state: &AppState, engine: &mut ConcreteEngine) -> Result<SubmitOutcome> {
    let ticket = match engine.begin_submit().await.context("Cannot submit yet")? {
        SubmitStart::Ready(ticket) => ticket,
        SubmitStart::Invalid { step, errors } => {
            return Ok(SubmitOutcome::Invalid { step, errors });
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Submitting...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.sink.submit(ticket.payload()).await;
    spinner.finish_and_clear();

    Ok(engine.finish_submit(ticket, result).await)
}

async fn finish(
    state: &AppState,
    engine: &ConcreteEngine,
    data: Option<serde_json::Value>,
    json: bool,
) -> Result<()> {
    match engine.kind() {
        WizardKind::ProfileCompletion => {
            state.session.mark_profile_complete();
            state.persist_session().await?;
        }
        WizardKind::Signup => {
            if let Some(role) = engine
                .value("role")
                .and_then(FieldValue::as_text)
                .and_then(|r| r.parse().ok())
                && state.session.context().is_authenticated()
            {
                state.session.set_role(role);
                state.persist_session().await?;
            }
        }
        _ => {}
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "wizard": engine.kind().slug(),
                "submitted": true,
                "data": data,
            }))?
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("✓").green().bold(),
        completion_message(engine.kind())
    );
    if let Some(text) = data.as_ref().and_then(generated_text) {
        println!();
        for line in text.lines() {
            println!("  {line}");
        }
    }
    println!();
    Ok(())
}

fn completion_message(kind: WizardKind) -> &'static str {
    match kind {
        WizardKind::JobPosting => "Job posted",
        WizardKind::ProfileCompletion => "Profile complete",
        WizardKind::ResumeBuilder => "Resume saved",
        WizardKind::Signup => "Account created. Sign in with `hflow login`.",
        WizardKind::CoverLetter => "Cover letter generated",
    }
}

/// Generated document text in a response body, if any.
fn generated_text(data: &serde_json::Value) -> Option<&str> {
    ["coverLetter", "content", "text"]
        .iter()
        .find_map(|key| data.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// One-line rendering of a field value for review screens.
pub fn format_value(field: &FieldSpec, value: &FieldValue) -> String {
    match value {
        FieldValue::Text(text) if field.is_secret() => {
            if text.is_empty() {
                "(not set)".to_string()
            } else {
                "•".repeat(text.chars().count().min(12))
            }
        }
        FieldValue::Text(text) | FieldValue::Choice(text) => {
            let text = text.trim();
            if text.is_empty() {
                "(empty)".to_string()
            } else if let Some((first, _)) = text.split_once('\n') {
                format!("{first} ...")
            } else {
                text.to_string()
            }
        }
        FieldValue::List(items) => {
            let items = compact(items);
            if items.is_empty() {
                "(none)".to_string()
            } else {
                items.join(", ")
            }
        }
        FieldValue::Flag(flag) => (if *flag { "yes" } else { "no" }).to_string(),
        FieldValue::File(Some(file)) => {
            format!("{} ({})", file.file_name, format_size(file.size_bytes))
        }
        FieldValue::File(None) => "(none)".to_string(),
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use hireflow_types::field::FileRef;
    use serde_json::json;

    use super::*;

    fn spec(kind: WizardKind, name: &str) -> &'static FieldSpec {
        definition_for(kind).field(name).unwrap()
    }

    #[test]
    fn test_format_value_masks_secrets() {
        let password = spec(WizardKind::Signup, "password");
        assert_eq!(
            format_value(password, &FieldValue::Text("Secret123".into())),
            "•••••••••"
        );
        assert_eq!(format_value(password, &FieldValue::Text(String::new())), "(not set)");
    }

    #[test]
    fn test_format_value_lists_and_text() {
        let skills = spec(WizardKind::JobPosting, "skills");
        assert_eq!(
            format_value(
                skills,
                &FieldValue::List(vec!["Rust".into(), " ".into(), "SQL".into()])
            ),
            "Rust, SQL"
        );
        assert_eq!(format_value(skills, &FieldValue::List(vec![String::new()])), "(none)");

        let description = spec(WizardKind::JobPosting, "description");
        assert_eq!(
            format_value(description, &FieldValue::Text("Line one\nLine two".into())),
            "Line one ..."
        );
    }

    #[test]
    fn test_format_value_files_and_flags() {
        let resume = spec(WizardKind::ProfileCompletion, "resume");
        let file = FileRef {
            path: "/tmp/cv.pdf".into(),
            file_name: "cv.pdf".into(),
            size_bytes: 2048,
            content_type: "application/pdf".into(),
        };
        assert_eq!(format_value(resume, &FieldValue::File(Some(file))), "cv.pdf (2.0 KB)");
        assert_eq!(format_value(resume, &FieldValue::File(None)), "(none)");

        let remote = spec(WizardKind::ProfileCompletion, "open_to_remote");
        assert_eq!(format_value(remote, &FieldValue::Flag(true)), "yes");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_step_actions_by_position() {
        let first: Vec<StepAction> = step_actions(1, 3).into_iter().map(|(a, _)| a).collect();
        assert!(!first.contains(&StepAction::Back));
        assert_eq!(step_actions(1, 3)[0].1, "Next");
        assert_eq!(step_actions(3, 3)[0].1, "Submit");
        assert!(step_actions(2, 3).iter().any(|(a, _)| *a == StepAction::Back));
    }

    #[test]
    fn test_generated_text_lookup() {
        assert_eq!(
            generated_text(&json!({ "coverLetter": "Dear team," })),
            Some("Dear team,")
        );
        assert_eq!(generated_text(&json!({ "id": 4 })), None);
        assert_eq!(generated_text(&json!({ "content": "  " })), None);
    }
}
