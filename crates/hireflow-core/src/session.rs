//! Process-wide session state.
//!
//! One writer (login, logout and role selection) and any number of readers
//! (the wizard engine, the HTTP sink). Built on a `tokio::sync::watch`
//! channel so readers always see the latest value without locking.

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;

use hireflow_types::session::UserRole;

/// Current authentication state.
#[derive(Debug, Default)]
pub struct Session {
    /// Opaque bearer credential issued by the backend.
    pub token: Option<SecretString>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub profile_complete: bool,
}

impl Session {
    pub fn signed_in(
        token: SecretString,
        email: impl Into<String>,
        role: Option<UserRole>,
        profile_complete: bool,
    ) -> Self {
        Self {
            token: Some(token),
            email: Some(email.into()),
            role,
            profile_complete,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Create a session channel seeded with `initial`.
pub fn session_channel(initial: Session) -> (SessionWriter, SessionContext) {
    let (tx, rx) = watch::channel(initial);
    (SessionWriter { tx }, SessionContext { rx })
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// The single mutating handle.
#[derive(Debug)]
pub struct SessionWriter {
    tx: watch::Sender<Session>,
}

impl SessionWriter {
    pub fn sign_in(&self, session: Session) {
        self.tx.send_replace(session);
    }

    pub fn sign_out(&self) {
        self.tx.send_replace(Session::default());
    }

    pub fn set_role(&self, role: UserRole) {
        self.tx.send_modify(|s| s.role = Some(role));
    }

    pub fn mark_profile_complete(&self) {
        self.tx.send_modify(|s| s.profile_complete = true);
    }

    /// A new read handle.
    pub fn context(&self) -> SessionContext {
        SessionContext {
            rx: self.tx.subscribe(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Read-only view of the session, cheap to clone.
#[derive(Debug, Clone)]
pub struct SessionContext {
    rx: watch::Receiver<Session>,
}

impl SessionContext {
    /// A context that is never signed in.
    pub fn anonymous() -> Self {
        session_channel(Session::default()).1
    }

    /// A context frozen at `session`, with no writer.
    pub fn fixed(session: Session) -> Self {
        session_channel(session).1
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Copy of the bearer credential, if signed in.
    pub fn token(&self) -> Option<SecretString> {
        self.rx
            .borrow()
            .token
            .as_ref()
            .map(|t| SecretString::from(t.expose_secret()))
    }

    pub fn email(&self) -> Option<String> {
        self.rx.borrow().email.clone()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.rx.borrow().role
    }

    pub fn profile_complete(&self) -> bool {
        self.rx.borrow().profile_complete
    }

    /// An owned copy of the current session, for persisting it.
    pub fn snapshot(&self) -> Session {
        let current = self.rx.borrow();
        Session {
            token: current
                .token
                .as_ref()
                .map(|t| SecretString::from(t.expose_secret())),
            email: current.email.clone(),
            role: current.role,
            profile_complete: current.profile_complete,
        }
    }
}
