//! Group members and their running balances

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, MemberId, Money};

/// A participant in a group
///
/// A positive balance is the net amount the rest of the group owes this
/// member; a negative balance is what this member owes the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Identifier, unique within the owning group
    pub id: MemberId,
    /// Display name, unique within the group ignoring case
    pub name: String,
    /// Net balance
    pub balance: Money,
}

impl Member {
    /// Creates a member with a zero balance
    pub fn new(id: MemberId, name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id,
            name: name.into(),
            balance: Money::zero(currency),
        }
    }

    /// Sets the starting balance
    pub fn with_balance(mut self, balance: Money) -> Self {
        self.balance = balance;
        self
    }

    /// Returns true when nothing is owed in either direction
    pub fn is_settled(&self) -> bool {
        self.balance.is_zero()
    }

    /// Returns true if the rest of the group owes this member
    pub fn is_creditor(&self) -> bool {
        self.balance.is_positive()
    }

    /// Returns true if this member owes the group
    pub fn is_debtor(&self) -> bool {
        self.balance.is_negative()
    }

    /// Case-insensitive name comparison, ignoring surrounding whitespace
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

/// Permissive lookup: returns `None` for ids that are not in the set
pub fn find_member(members: &[Member], id: MemberId) -> Option<&Member> {
    members.iter().find(|m| m.id == id)
}

/// Mutable counterpart of [`find_member`]
pub fn find_member_mut(members: &mut [Member], id: MemberId) -> Option<&mut Member> {
    members.iter_mut().find(|m| m.id == id)
}
