//! Groups own their members and their expense history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, GroupId, MemberId, Money};
use crate::balance;
use crate::error::LedgerError;
use crate::member::{find_member, find_member_mut, Member};
use crate::transaction::Transaction;

/// A set of people sharing expenses
///
/// # Invariants
///
/// - Member balances sum to exactly zero
/// - Member names are unique ignoring case
/// - Transactions are append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,
    /// Display title
    pub title: String,
    /// Currency every balance and expense is held in
    pub currency: Currency,
    /// Members in insertion order
    pub members: Vec<Member>,
    /// Recorded expenses in recording order
    pub transactions: Vec<Transaction>,
    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates an empty group
    pub fn new(id: GroupId, title: impl Into<String>, currency: Currency) -> Self {
        Self {
            id,
            title: title.into(),
            currency,
            members: Vec::new(),
            transactions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a new member with a zero balance and a fresh id
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMemberName` if the name is taken (ignoring case)
    pub fn add_member(&mut self, name: &str) -> Result<&Member, LedgerError> {
        let member = Member::new(MemberId::new_v7(), name.trim(), self.currency);
        self.insert_member(member)
    }

    /// Inserts a fully-formed member
    ///
    /// Used when rebuilding a group from storage or fixtures. The caller is
    /// responsible for keeping balances zero-sum.
    pub fn insert_member(&mut self, member: Member) -> Result<&Member, LedgerError> {
        if self.member_by_name(&member.name).is_some() {
            return Err(LedgerError::DuplicateMemberName(member.name));
        }
        if self.member(member.id).is_some() {
            return Err(LedgerError::Validation(format!("duplicate member id {}", member.id)));
        }
        if member.balance.currency() != self.currency {
            return Err(LedgerError::Validation(format!(
                "member balance in {} but group uses {}",
                member.balance.currency(),
                self.currency
            )));
        }

        self.members.push(member);
        let last = self.members.len() - 1;
        Ok(&self.members[last])
    }

    /// Looks up a member by id
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        find_member(&self.members, id)
    }

    /// Looks up a member by id for mutation
    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        find_member_mut(&mut self.members, id)
    }

    /// Looks up a member by display name, ignoring case
    pub fn member_by_name(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.has_name(name))
    }

    /// Removes a settled member
    ///
    /// # Errors
    ///
    /// - `MemberNotFound` if the id is unknown
    /// - `MemberNotSettled` if the balance is not exactly zero
    pub fn remove_member(&mut self, id: MemberId) -> Result<Member, LedgerError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or(LedgerError::MemberNotFound(id))?;

        let member = &self.members[index];
        if !member.is_settled() {
            return Err(LedgerError::MemberNotSettled {
                member_id: id,
                balance: member.balance,
            });
        }

        Ok(self.members.remove(index))
    }

    /// Appends an expense to the history
    pub fn record(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Sum of all member balances
    pub fn total_balance(&self) -> Result<Money, LedgerError> {
        balance::total(&self.members, self.currency)
    }

    /// Checks the zero-sum invariant
    pub fn verify_zero_sum(&self) -> Result<(), LedgerError> {
        balance::verify_zero_sum(&self.members, self.currency)
    }

    /// Total of every recorded expense
    pub fn total_spent(&self) -> Result<Money, LedgerError> {
        Ok(Money::try_sum(self.currency, self.transactions.iter().map(|t| &t.amount))?)
    }
}
