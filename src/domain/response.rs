//! Outcome classification for parsed processor responses.
//!
//! Every operation returns a differently shaped document. Only two signals
//! are shared across all of them: an exception/error root element and the
//! optional `ResponseCode` field. Classification starts out pending and ends
//! in exactly one of [`Outcome::Exception`], [`Outcome::Declined`] or
//! [`Outcome::Success`].

use super::transaction::Operation;
use super::tree::ResponseTree;
use serde::Serialize;

/// Authorization reported when an exception document carries no transaction id.
pub const ERROR_AUTHORIZATION: &str = "error";

const APPROVED_CODE: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Exception,
    Declined,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub outcome: Outcome,
    pub message: Option<String>,
    pub authorization: Option<String>,
}

impl Classification {
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// True when a root tag names an exception or error document.
pub fn is_exception_container(container: &str) -> bool {
    let lower = container.to_ascii_lowercase();
    lower.contains("exception") || lower.contains("error")
}

/// Decides the outcome of a parsed response.
pub fn classify(tree: &ResponseTree) -> Classification {
    if is_exception_container(&tree.container) {
        return classify_exception(tree);
    }

    let authorization = tree.child_text("TransactionId").map(str::to_string);
    let response_text = tree.child_text("ResponseText").map(str::to_string);

    // A schema without ResponseCode (e.g. registration) succeeds implicitly.
    match tree.get("ResponseCode") {
        Some(code) if code.text() != Some(APPROVED_CODE) => {
            let code = code.text().unwrap_or_default();
            Classification {
                outcome: Outcome::Declined,
                message: Some(
                    response_text
                        .unwrap_or_else(|| format!("Declined with response code {code:?}")),
                ),
                authorization,
            }
        }
        _ => Classification {
            outcome: Outcome::Success,
            message: response_text,
            authorization,
        },
    }
}

fn classify_exception(tree: &ResponseTree) -> Classification {
    let error = tree.get("Error");
    let message = error
        .and_then(|e| e.child_text("Message"))
        .map(str::to_string)
        .unwrap_or_else(|| tree.container.clone());
    let authorization = error
        .and_then(|e| e.get("Result"))
        .and_then(|r| r.child_text("TransactionId"))
        .unwrap_or(ERROR_AUTHORIZATION);

    Classification {
        outcome: Outcome::Exception,
        message: Some(message),
        authorization: Some(authorization.to_string()),
    }
}

/// The normalized result of one gateway call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    operation: Operation,
    success: bool,
    outcome: Outcome,
    message: Option<String>,
    authorization: Option<String>,
    terminal_url: Option<String>,
    test: bool,
    raw: ResponseTree,
}

impl GatewayResponse {
    pub fn new(operation: Operation, raw: ResponseTree, test: bool) -> Self {
        let Classification {
            outcome,
            message,
            authorization,
        } = classify(&raw);
        Self {
            operation,
            success: outcome == Outcome::Success,
            outcome,
            message,
            authorization,
            terminal_url: None,
            test,
            raw,
        }
    }

    pub(crate) fn with_terminal_url(mut self, terminal_url: String) -> Self {
        self.terminal_url = Some(terminal_url);
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Transaction id to use for follow-up operations.
    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// Hosted payment page URL; only set for registrations.
    pub fn terminal_url(&self) -> Option<&str> {
        self.terminal_url.as_deref()
    }

    pub fn is_test(&self) -> bool {
        self.test
    }

    pub fn raw(&self) -> &ResponseTree {
        &self.raw
    }
}
