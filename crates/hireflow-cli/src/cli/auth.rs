//! Account commands: login, logout, role, password reset.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Password};
use secrecy::SecretString;

use hireflow_types::session::UserRole;

use crate::state::AppState;

fn prompt_email(email: Option<String>) -> Result<String> {
    match email {
        Some(email) => Ok(email),
        None => Ok(Input::<String>::new()
            .with_prompt("Email")
            .interact_text()?),
    }
}

/// Sign in and store the session for later runs.
pub async fn login(state: &AppState, email: Option<String>, json: bool) -> Result<()> {
    let email = prompt_email(email)?;
    let password = SecretString::from(Password::new().with_prompt("Password").interact()?);

    let session = state
        .auth
        .login(&email, &password)
        .await
        .context("Sign-in failed")?;
    let role = session.role;
    let profile_complete = session.profile_complete;

    state.session.sign_in(session);
    state.persist_session().await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "signed_in": true,
                "email": email.trim(),
                "role": role.map(|r| r.to_string()),
                "profile_complete": profile_complete,
            })
        );
        return Ok(());
    }

    println!();
    println!(
        "  {} Signed in as {}",
        style("✓").green().bold(),
        style(email.trim()).cyan()
    );
    if role.is_none() {
        println!(
            "  {} No role chosen yet. Pick one with: {}",
            style("i").blue().bold(),
            style("hflow role job_seeker").yellow()
        );
    } else if role == Some(UserRole::JobSeeker) && !profile_complete {
        println!(
            "  {} Your profile is incomplete. Finish it with: {}",
            style("i").blue().bold(),
            style("hflow wizard profile-completion").yellow()
        );
    }
    println!();

    Ok(())
}

pub async fn logout(state: &AppState, json: bool) -> Result<()> {
    let was_signed_in = state.session.context().is_authenticated();
    state.session.sign_out();
    state.persist_session().await?;

    if json {
        println!("{}", serde_json::json!({ "signed_out": was_signed_in }));
    } else if was_signed_in {
        println!("  {} Signed out", style("✓").green().bold());
    } else {
        println!("  {} Not signed in", style("i").blue().bold());
    }
    Ok(())
}

pub async fn set_role(state: &AppState, role: UserRole, json: bool) -> Result<()> {
    if !state.session.context().is_authenticated() {
        anyhow::bail!("Not signed in. Run `hflow login` first.");
    }

    state.session.set_role(role);
    state.persist_session().await?;

    if json {
        println!("{}", serde_json::json!({ "role": role.to_string() }));
    } else {
        println!(
            "  {} Role set to {}",
            style("✓").green().bold(),
            style(role).cyan()
        );
    }
    Ok(())
}

pub async fn forgot_password(state: &AppState, email: Option<String>, json: bool) -> Result<()> {
    let email = prompt_email(email)?;
    let message = state
        .auth
        .forgot_password(&email)
        .await
        .context("Password reset request failed")?;
    let message = message.unwrap_or_else(|| "If the account exists, a reset link is on its way.".into());

    if json {
        println!("{}", serde_json::json!({ "requested": true, "message": message }));
    } else {
        println!("  {} {}", style("✓").green().bold(), message);
    }
    Ok(())
}

pub async fn reset_password(state: &AppState, token: &str, json: bool) -> Result<()> {
    let password = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let message = state
        .auth
        .reset_password(token, &SecretString::from(password))
        .await
        .context("Password reset failed")?;
    let message = message.unwrap_or_else(|| "Password updated. Sign in with `hflow login`.".into());

    if json {
        println!("{}", serde_json::json!({ "reset": true, "message": message }));
    } else {
        println!("  {} {}", style("✓").green().bold(), message);
    }
    Ok(())
}
