//! Per-client session state carried between requests.
//!
//! The session is a plain value: inbound adapters load it from the client's
//! signed cookie, pass it into every service call, and write it back before
//! responding. Nothing here touches shared mutable state.

use serde::{Deserialize, Serialize};

/// The single username holding elevated privilege.
pub const ADMIN_USERNAME: &str = "admin";

/// Who the caller is.
///
/// Modelled as an enum so a username exists exactly when the caller is
/// signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Identity {
    /// No one is signed in.
    #[default]
    Anonymous,
    /// A user authenticated against the registry.
    SignedIn {
        /// Registry key the user signed in with.
        username: String,
    },
}

/// Severity of a one-shot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    /// A failure or denial.
    Error,
    /// Confirmation of a completed change.
    Success,
}

/// A one-shot user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Severity.
    pub kind: FlashKind,
    /// Text shown to the user.
    pub text: String,
}

/// Queue of one-shot messages. Reading drains it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashQueue(Vec<FlashMessage>);

impl FlashQueue {
    /// Queue a message for the next render.
    pub fn push(&mut self, kind: FlashKind, text: impl Into<String>) {
        self.0.push(FlashMessage {
            kind,
            text: text.into(),
        });
    }

    /// Take every pending message, leaving the queue empty.
    pub fn consume(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.0)
    }

    /// Whether no message is pending.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Session snapshot for one client.
///
/// # Examples
/// ```
/// use cms::domain::Session;
///
/// let mut session = Session::default();
/// session.sign_in("admin");
/// assert!(session.is_admin());
/// session.sign_out();
/// assert!(!session.is_signed_in());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Current identity.
    #[serde(default)]
    pub identity: Identity,
    /// Pending one-shot messages.
    #[serde(default)]
    pub flash: FlashQueue,
}

impl Session {
    /// Whether anyone is signed in.
    pub fn is_signed_in(&self) -> bool {
        matches!(self.identity, Identity::SignedIn { .. })
    }

    /// Signed-in username, if any.
    pub fn username(&self) -> Option<&str> {
        match &self.identity {
            Identity::SignedIn { username } => Some(username.as_str()),
            Identity::Anonymous => None,
        }
    }

    /// Whether the signed-in user is the admin.
    pub fn is_admin(&self) -> bool {
        self.username() == Some(ADMIN_USERNAME)
    }

    /// Record a successful authentication.
    pub fn sign_in(&mut self, username: impl Into<String>) {
        self.identity = Identity::SignedIn {
            username: username.into(),
        };
    }

    /// Forget the signed-in user.
    pub fn sign_out(&mut self) {
        self.identity = Identity::Anonymous;
    }

    /// Queue an error message.
    pub fn flash_error(&mut self, text: impl Into<String>) {
        self.flash.push(FlashKind::Error, text);
    }

    /// Queue a success message.
    pub fn flash_success(&mut self, text: impl Into<String>) {
        self.flash.push(FlashKind::Success, text);
    }
}
