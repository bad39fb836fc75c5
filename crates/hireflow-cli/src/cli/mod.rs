//! CLI command definitions for the `hflow` binary.
//!
//! Uses clap derive macros for argument parsing. Wizards run interactively;
//! everything else is a one-shot command.

pub mod auth;
pub mod drafts;
pub mod status;
pub mod wizard;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use hireflow_types::session::UserRole;
use hireflow_types::wizard::WizardKind;

/// Fill in job-board forms from the terminal.
#[derive(Parser)]
#[command(name = "hflow", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Keep drafts in memory only; nothing is saved between runs.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a wizard (job-posting, profile-completion, resume-builder, signup, cover-letter).
    #[command(alias = "run")]
    Wizard {
        /// Which wizard to run.
        kind: WizardKind,

        /// Ignore any saved draft and start on step 1.
        #[arg(long)]
        fresh: bool,
    },

    /// Inspect or discard saved drafts.
    Drafts {
        #[command(subcommand)]
        action: DraftsCommand,
    },

    /// Sign in to the job board.
    Login {
        /// Account email (prompted when omitted).
        email: Option<String>,
    },

    /// Forget the stored session.
    Logout,

    /// Choose whether you are hiring or looking for work.
    Role {
        /// job_seeker or employer.
        role: UserRole,
    },

    /// Request a password reset email.
    #[command(name = "forgot-password")]
    ForgotPassword {
        /// Account email (prompted when omitted).
        email: Option<String>,
    },

    /// Set a new password with the token from the reset email.
    #[command(name = "reset-password")]
    ResetPassword {
        /// Token from the reset link.
        token: String,
    },

    /// Show session, backend and draft status.
    Status,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum DraftsCommand {
    /// List saved drafts, most recent first.
    #[command(alias = "ls")]
    List,

    /// Show the saved fields of one draft.
    Show {
        kind: WizardKind,
    },

    /// Delete a saved draft.
    #[command(alias = "rm")]
    Discard {
        kind: WizardKind,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}
