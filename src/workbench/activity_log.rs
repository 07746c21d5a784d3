use crate::http_handler::http_request::request_common::HTTPRequestMethod;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// One line of dispatch history. Requests and responses are separate entries
/// so a hung request is visible as a request without a matching response.
#[derive(Debug)]
pub(crate) enum LogEntry {
    Request {
        method: HTTPRequestMethod,
        resource: String,
        at: DateTime<Utc>,
    },
    Response {
        /// `None` when the server never answered.
        status: Option<u16>,
        message: String,
        at: DateTime<Utc>,
    },
}

impl LogEntry {
    pub(crate) fn is_request(&self) -> bool { matches!(self, Self::Request { .. }) }

    /// Responses other than HTTP 200 count as errors, including the
    /// no-response case.
    pub(crate) fn is_error(&self) -> bool {
        matches!(self, Self::Response { status, .. } if *status != Some(200))
    }

    /// Console rendering of the entry, colored by outcome.
    pub(crate) fn display_line(&self) -> String {
        match self {
            Self::Request { method, resource, at } => {
                format!("[{}] --> {method} {resource}", at.format("%H:%M:%S"))
            }
            Self::Response { status: Some(status), message, at } => {
                format!("[{}] <-- {status} {message}", at.format("%H:%M:%S"))
            }
            Self::Response { status: None, message, at } => {
                format!("[{}] <-- --- {message}", at.format("%H:%M:%S"))
            }
        }
    }
}

/// Append-only dispatch history, newest entry first. Entries are never
/// removed or reordered; growth is unbounded for the process session.
#[derive(Debug, Default)]
pub(crate) struct ActivityLog {
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub(crate) fn new() -> Self { Self::default() }

    pub(crate) fn log_request(&mut self, method: HTTPRequestMethod, resource: &str) {
        self.entries.push_front(LogEntry::Request {
            method,
            resource: resource.to_string(),
            at: Utc::now(),
        });
    }

    pub(crate) fn log_response(&mut self, status: Option<u16>, message: &str) {
        self.entries.push_front(LogEntry::Response {
            status,
            message: message.to_string(),
            at: Utc::now(),
        });
    }

    pub(crate) fn len(&self) -> usize { self.entries.len() }
    pub(crate) fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entries newest-first, index 0 being the most recent.
    pub(crate) fn entries(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// The resource path of the request entry at `index`, for copying back
    /// into the resource-path field. Response entries yield `None`.
    pub(crate) fn replay(&self, index: usize) -> Option<&str> {
        match self.entries.get(index) {
            Some(LogEntry::Request { resource, .. }) => Some(resource.as_str()),
            _ => None,
        }
    }
}
