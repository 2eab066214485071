use anyhow::Error;
use crossterm::style::Stylize;

/// Holds a one-line message for the user plus its severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
}

/// Severity levels; only affects colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusMessage {
    pub(crate) fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub(crate) fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Success,
        }
    }

    pub(crate) fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    /// Render the message, coloured when `color` is set.
    pub(crate) fn paint(&self, color: bool) -> String {
        if !color {
            return self.text.clone();
        }
        match self.kind {
            StatusKind::Info => self.text.clone(),
            StatusKind::Success => self.text.as_str().green().to_string(),
            StatusKind::Error => self.text.as_str().red().to_string(),
        }
    }
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
