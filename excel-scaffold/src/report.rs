//! Run reporting
//!
//! Compilers record what they did per artifact instead of printing, so the
//! CLI decides presentation and tests can assert on outcomes.

use std::fmt;

/// What happened to one artifact or row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// A new file was written
    Created,
    /// An existing file was replaced
    Overwritten,
    /// An existing file was modified in place
    Patched,
    /// Nothing to do; the content is already there
    AlreadyExists,
    /// The row or step was intentionally not processed
    Skipped,
    /// A row-level problem; the run continued
    Warning,
}

impl ActionKind {
    /// Short label for terminal output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Overwritten => "overwritten",
            Self::Patched => "patched",
            Self::AlreadyExists => "exists",
            Self::Skipped => "skipped",
            Self::Warning => "warning",
        }
    }
}

/// One recorded action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Outcome
    pub kind: ActionKind,
    /// File path or model the action concerns
    pub subject: String,
    /// Human-readable detail
    pub message: String,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.label(), self.subject, self.message)
    }
}

/// Ordered record of a compiler run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    actions: Vec<Action>,
}

impl RunReport {
    /// Create an empty report
    #[must_use]
    pub const fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Record an action
    pub fn record(
        &mut self,
        kind: ActionKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        let action = Action {
            kind,
            subject: subject.into(),
            message: message.into(),
        };
        match kind {
            ActionKind::Warning => tracing::warn!(subject = %action.subject, "{}", action.message),
            _ => tracing::info!(subject = %action.subject, kind = kind.label(), "{}", action.message),
        }
        self.actions.push(action);
    }

    /// All actions in order
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions of `kind`
    #[must_use]
    pub fn count(&self, kind: ActionKind) -> usize {
        self.actions.iter().filter(|a| a.kind == kind).count()
    }

    /// Whether any warning was recorded
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.count(ActionKind::Warning) > 0
    }
}
