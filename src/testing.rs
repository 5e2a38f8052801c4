//! In-memory transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{LogoError, Result};
use crate::transport::Transport;

/// Replays canned replies in order and records every request it receives.
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<String>>,
    requests: RefCell<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub(crate) fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: RefCell::new(replies.into_iter().map(Into::into).collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Queues another reply.
    pub(crate) fn push_reply(&self, reply: impl Into<String>) {
        self.replies.borrow_mut().push_back(reply.into());
    }

    /// Requests seen so far as `(security_hint, body)` pairs.
    pub(crate) fn requests(&self) -> Vec<(String, String)> {
        self.requests.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn endpoint(&self) -> &str {
        "http://logo.test/AJAX"
    }

    fn post(&self, security_hint: &str, body: &str) -> Result<String> {
        self.requests
            .borrow_mut()
            .push((security_hint.to_string(), body.to_string()));
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| LogoError::transport("no scripted reply left"))
    }
}
