//! Error types for client operations
//!
//! Every error here is recoverable: the reducer turns it into a notice and
//! hands input back to the user.

use thiserror::Error;

use crate::state::Screen;
use crate::types::{Stat, StatBlock};

/// Reasons a stat allocation is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationFault {
    #[error("{} cannot be negative (got {value})", .stat.as_str())]
    Negative { stat: Stat, value: i32 },

    #[error("cannot allocate more than {budget} points (used {total})")]
    OverBudget { budget: i32, total: i32 },

    #[error("must allocate exactly {budget} points (used {total})")]
    WrongTotal { budget: i32, total: i32 },

    #[error("server confirmed {confirmed:?}, expected {expected:?}")]
    ConfirmationMismatch {
        expected: StatBlock,
        confirmed: StatBlock,
    },
}

/// Client errors that can occur while driving a tournament run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Transport failure or non-2xx status; `detail` is the server's
    /// `detail` field when it sent one
    #[error("{}", describe_network(*.status, .detail))]
    NetworkFailure { status: Option<u16>, detail: String },

    /// Response body did not have the expected shape
    #[error("unexpected response from server: {message}")]
    Decode { message: String },

    /// Neither or both slot names match the player's creature
    #[error("match out of sync: expected '{profile_name}', server sent '{slot_a}' vs '{slot_b}'")]
    Desync {
        profile_name: String,
        slot_a: String,
        slot_b: String,
    },

    #[error("invalid stat allocation: {0}")]
    InvalidAllocation(#[from] AllocationFault),

    /// Intent does not apply to the current screen
    #[error("not available on the {} screen", .screen.as_str())]
    WrongScreen { screen: Screen },

    /// A request is outstanding or input is gated
    #[error("please wait for the current action to finish")]
    InputLocked,

    /// Intent is missing something the user still has to provide
    #[error("{0}")]
    Incomplete(String),
}

fn describe_network(status: Option<u16>, detail: &str) -> String {
    match status {
        Some(code) => format!("request failed ({}): {}", code, detail),
        None => format!("request failed: {}", detail),
    }
}

impl ClientError {
    pub fn network(detail: &str) -> Self {
        ClientError::NetworkFailure {
            status: None,
            detail: detail.to_string(),
        }
    }

    pub fn decode(message: &str) -> Self {
        ClientError::Decode {
            message: message.to_string(),
        }
    }

    /// Errors caused by the user rather than the server or the network
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidAllocation(_)
                | ClientError::WrongScreen { .. }
                | ClientError::InputLocked
                | ClientError::Incomplete(_)
        )
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
