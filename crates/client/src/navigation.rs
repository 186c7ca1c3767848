//! Navigation requests issued by the gate to the UI shell.

use std::fmt;

use tokio::sync::mpsc;

/// How the shell should perform a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Full reload: all in-memory view state is discarded.
    Hard,
    /// In-app route change.
    Soft,
}

/// Why a navigation happened, when the user should be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SessionExpired,
    Forbidden { path: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SessionExpired => f.write_str("session expired, please sign in again"),
            Notice::Forbidden { path } => write!(f, "you do not have access to {path}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
    pub kind: NavigationKind,
    pub notice: Option<Notice>,
}

impl Navigation {
    pub fn hard(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            kind: NavigationKind::Hard,
            notice: None,
        }
    }

    pub fn soft(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            kind: NavigationKind::Soft,
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// Sink for navigations; implemented by the UI shell.
pub trait Navigator: Send + Sync {
    fn navigate(&self, navigation: Navigation);
}

/// Forwards navigations to an unbounded channel read by the shell.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Navigation>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Navigation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, navigation: Navigation) {
        if self.tx.send(navigation).is_err() {
            tracing::debug!("navigation dropped: receiver closed");
        }
    }
}
