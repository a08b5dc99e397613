//! Ledger domain errors

use thiserror::Error;

use core_kernel::{GroupId, MemberId, Money, MoneyError, PortError};

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Group not found in the store
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    /// Member not found in the group
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// The named payer is not a member of the group
    #[error("Payer not found: {0}")]
    PayerNotFound(String),

    /// Debtor has a zero or positive balance
    #[error("Nothing to settle for member {member_id}: balance is {balance}")]
    NothingToSettle {
        member_id: MemberId,
        balance: Money,
    },

    /// Member still has a non-zero balance
    #[error("Member {member_id} must be settled before removal: balance is {balance}")]
    MemberNotSettled {
        member_id: MemberId,
        balance: Money,
    },

    /// Another member already uses this name (case-insensitive)
    #[error("Member name already in use: {0}")]
    DuplicateMemberName(String),

    /// Amount is zero, negative, or finer than the currency's minor unit
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// A split detail entry is out of range
    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    /// Percentage and dynamic splits need a details map
    #[error("Split type '{0}' requires split details")]
    MissingSplitDetails(String),

    /// Split details do not add up (only raised in strict mode)
    #[error("Split total mismatch: expected {expected}, got {actual}")]
    SplitTotalMismatch {
        expected: String,
        actual: String,
    },

    /// Settlement request exceeds the debt (only raised when overpayment is rejected)
    #[error("Settlement of {requested} exceeds amount owed {owed}")]
    Overpayment {
        requested: Money,
        owed: Money,
    },

    /// Request failed field validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Zero-sum invariant broken; indicates an engine bug or corrupted data
    #[error("Ledger invariant violated: {0}")]
    InvariantViolation(String),

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Store adapter failed
    #[error("Store error: {0}")]
    Port(#[from] PortError),
}

impl LedgerError {
    pub fn invariant(message: impl Into<String>) -> Self {
        LedgerError::InvariantViolation(message.into())
    }

    /// Returns true for structural failures that must never reach a user as a normal rejection
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::InvariantViolation(_))
    }

    /// Returns true for lookup failures (group, member, payer)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::GroupNotFound(_)
                | LedgerError::MemberNotFound(_)
                | LedgerError::PayerNotFound(_)
        )
    }
}

impl From<validator::ValidationErrors> for LedgerError {
    fn from(errors: validator::ValidationErrors) -> Self {
        LedgerError::Validation(errors.to_string())
    }
}
