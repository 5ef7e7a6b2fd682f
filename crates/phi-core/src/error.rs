use std::fmt;
use std::panic::Location;

use crate::json;
use crate::value::Value;

/// The source position of the consumer call that an error is reported
/// against. Captured through `#[track_caller]`, so every constructor and
/// public operation between the consumer and the raise site must carry the
/// attribute for the chain to resolve past library frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    #[track_caller]
    pub fn capture() -> Self {
        let loc = Location::caller();
        CallSite {
            file: loc.file(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Render only the last two path segments, keeping diagnostics short
        // without losing the crate-relative position.
        let mut tail: Vec<&str> = self.file.rsplit(['/', '\\']).take(2).collect();
        tail.reverse();
        write!(f, "{}:{}", tail.join("/"), self.line)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PhiError {
    /// An argument's type or shape failed the operation's precondition.
    #[error("{callee}() arg {position}: {message}. Given {rendered} in {site}.")]
    Contract {
        callee: String,
        position: usize,
        message: String,
        rendered: String,
        site: CallSite,
    },

    /// A well-shaped input still violated an operation's rule.
    #[error("{message}{} in {site}.", if reason.is_none() { String::new() } else { format!(". Reason {reason}") })]
    Domain {
        message: String,
        reason: Value,
        site: CallSite,
    },
}

impl PhiError {
    #[track_caller]
    pub fn contract(
        callee: &str,
        position: usize,
        message: impl Into<String>,
        offending: &Value,
    ) -> Self {
        Self::contract_at(CallSite::capture(), callee, position, message, offending)
    }

    pub fn contract_at(
        site: CallSite,
        callee: &str,
        position: usize,
        message: impl Into<String>,
        offending: &Value,
    ) -> Self {
        let err = PhiError::Contract {
            callee: callee.to_string(),
            position,
            message: message.into(),
            rendered: json::render(offending),
            site,
        };
        tracing::debug!(error = %err, "contract violation");
        err
    }

    #[track_caller]
    pub fn domain(message: impl Into<String>, reason: Value) -> Self {
        Self::domain_at(CallSite::capture(), message, reason)
    }

    pub fn domain_at(site: CallSite, message: impl Into<String>, reason: Value) -> Self {
        let err = PhiError::Domain {
            message: message.into(),
            reason,
            site,
        };
        tracing::debug!(error = %err, "domain violation");
        err
    }

    pub fn is_contract(&self) -> bool {
        matches!(self, PhiError::Contract { .. })
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, PhiError::Domain { .. })
    }

    pub fn site(&self) -> CallSite {
        match self {
            PhiError::Contract { site, .. } => *site,
            PhiError::Domain { site, .. } => *site,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PhiError::Contract { message, .. } => message,
            PhiError::Domain { message, .. } => message,
        }
    }
}
