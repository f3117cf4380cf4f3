use alloy::transports::{RpcError, TransportError};

// Fragments of the error messages nodes (geth, erigon, nethermind, reth)
// return when they refuse a transaction.
const INSUFFICIENT_FUNDS: &[&str] = &["insufficient funds", "InsufficientFunds"];
const NONCE_CONFLICT: &[&str] = &[
    "nonce too low",
    "nonce too high",
    "OldNonce",
    "nonce has already been used",
];
const UNDERPRICED: &[&str] = &[
    "transaction underpriced",
    "replacement transaction underpriced",
    "max fee per gas less than block base fee",
    "FeeTooLow",
];
const ALREADY_KNOWN: &[&str] = &[
    "already known",
    "Transaction with the same hash was already imported",
    "AlreadyKnown",
];

/// Coarse reason why a node refused to accept a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    InsufficientFunds,
    NonceConflict,
    Underpriced,
    AlreadyKnown,
    Other,
}

impl Rejection {
    pub fn from_message(message: &str) -> Self {
        let matches = |fragments: &[&str]| fragments.iter().any(|f| message.contains(f));
        if matches(INSUFFICIENT_FUNDS) {
            Self::InsufficientFunds
        } else if matches(NONCE_CONFLICT) {
            Self::NonceConflict
        } else if matches(UNDERPRICED) {
            Self::Underpriced
        } else if matches(ALREADY_KNOWN) {
            Self::AlreadyKnown
        } else {
            Self::Other
        }
    }
}

pub trait TransportErrorExt {
    /// Classifies a node error. Returns `None` when the request never reached
    /// the node or its response was unreadable.
    fn rejection(&self) -> Option<Rejection>;
}

impl TransportErrorExt for TransportError {
    fn rejection(&self) -> Option<Rejection> {
        match self {
            RpcError::ErrorResp(payload) => Some(Rejection::from_message(&payload.message)),
            _ => None,
        }
    }
}
