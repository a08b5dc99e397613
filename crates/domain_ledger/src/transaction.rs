//! Recorded expenses
//!
//! A [`Transaction`] is the audit record of one expense. It is created once
//! when the expense is recorded and is never modified or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{GroupId, MemberId, Money, TransactionId};

/// How an expense is divided among members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// Everyone pays the same share, leftover cents spread by member id
    Equal,
    /// Each listed member pays a percentage of the total
    Percentage,
    /// Each listed member pays an exact amount
    Dynamic,
}

impl SplitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitType::Equal => "equal",
            SplitType::Percentage => "percentage",
            SplitType::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One member's portion of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub member_id: MemberId,
    pub amount: Money,
}

/// An immutable expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Owning group
    pub group_id: GroupId,
    /// What the expense was for
    pub title: String,
    /// Total amount paid
    pub amount: Money,
    /// Display name of the paying member, as given by the caller
    pub paid_by: String,
    /// Resolved payer
    pub payer_id: MemberId,
    /// Split policy tag
    pub split_type: SplitType,
    /// Amounts debited from each non-payer member
    pub shares: Vec<Share>,
    /// When the expense was recorded
    pub recorded_at: DateTime<Utc>,
}

impl Transaction {
    /// Returns the portion debited from `member_id`, if any
    pub fn share_of(&self, member_id: MemberId) -> Option<Money> {
        self.shares
            .iter()
            .find(|s| s.member_id == member_id)
            .map(|s| s.amount)
    }
}
