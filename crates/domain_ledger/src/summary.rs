//! Read-only balance views
//!
//! The "current user" is passed in as a viewer name rather than looked up
//! from shared state, so the same group can be rendered for any member.

use serde::{Deserialize, Serialize};

use core_kernel::{GroupId, MemberId, Money};
use crate::error::LedgerError;
use crate::group::Group;

/// A member's position in the group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "amount", rename_all = "snake_case")]
pub enum Standing {
    /// The group owes this member
    Owed(Money),
    /// This member owes the group
    Owes(Money),
    Settled,
}

impl Standing {
    pub fn from_balance(balance: Money) -> Self {
        if balance.is_positive() {
            Standing::Owed(balance)
        } else if balance.is_negative() {
            Standing::Owes(balance.abs())
        } else {
            Standing::Settled
        }
    }
}

/// One row of a balance sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub member_id: MemberId,
    pub name: String,
    pub balance: Money,
    pub standing: Standing,
    /// True for the member the sheet is rendered for
    pub is_viewer: bool,
}

/// Balances of every member, optionally from one member's point of view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub group_id: GroupId,
    pub title: String,
    /// Rows in member insertion order
    pub entries: Vec<BalanceEntry>,
    /// Sum of all recorded expenses
    pub total_spent: Money,
    /// The viewer's own standing, if a known viewer was given
    pub viewer: Option<BalanceEntry>,
}

impl BalanceSheet {
    /// Builds a sheet for `group`, marking the member named `viewer`
    ///
    /// An unknown viewer name yields a sheet with no viewer.
    pub fn for_group(group: &Group, viewer: Option<&str>) -> Result<Self, LedgerError> {
        let viewer_id = viewer
            .and_then(|name| group.member_by_name(name))
            .map(|m| m.id);

        let entries: Vec<BalanceEntry> = group
            .members
            .iter()
            .map(|m| BalanceEntry {
                member_id: m.id,
                name: m.name.clone(),
                balance: m.balance,
                standing: Standing::from_balance(m.balance),
                is_viewer: Some(m.id) == viewer_id,
            })
            .collect();

        let viewer = entries.iter().find(|e| e.is_viewer).cloned();

        Ok(Self {
            group_id: group.id,
            title: group.title.clone(),
            total_spent: group.total_spent()?,
            entries,
            viewer,
        })
    }

    /// Members who are owed money, largest first
    pub fn creditors(&self) -> Vec<&BalanceEntry> {
        let mut creditors: Vec<&BalanceEntry> = self
            .entries
            .iter()
            .filter(|e| matches!(e.standing, Standing::Owed(_)))
            .collect();
        creditors.sort_by(|a, b| {
            b.balance
                .amount()
                .cmp(&a.balance.amount())
                .then_with(|| a.member_id.cmp(&b.member_id))
        });
        creditors
    }

    /// True when every member is settled
    pub fn is_settled(&self) -> bool {
        self.entries.iter().all(|e| e.standing == Standing::Settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standing_from_balance() {
        let usd = |d| Money::new(d, Currency::USD);
        assert_eq!(Standing::from_balance(usd(dec!(5))), Standing::Owed(usd(dec!(5))));
        assert_eq!(Standing::from_balance(usd(dec!(-5))), Standing::Owes(usd(dec!(5))));
        assert_eq!(Standing::from_balance(usd(dec!(0))), Standing::Settled);
    }

    #[test]
    fn test_unknown_viewer_is_ignored() {
        let mut group = Group::new(GroupId::new_v7(), "Trip", Currency::USD);
        group.add_member("Alice").unwrap();

        let sheet = BalanceSheet::for_group(&group, Some("Mallory")).unwrap();
        assert!(sheet.viewer.is_none());
        assert!(sheet.is_settled());
    }
}
