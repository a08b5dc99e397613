//! Ledger Domain - Shared Expense Tracking
//!
//! This crate keeps the books for a group of people sharing expenses. Every
//! member has a running balance: positive when the group owes them, negative
//! when they owe the group.
//!
//! # Zero-Sum Invariant
//!
//! The balances of a group's members always sum to exactly zero:
//! - Recording an expense debits the non-payers and credits the payer the same total
//! - Settling a debt moves value from creditors back to the debtor
//! - Removing a member is only allowed at a zero balance
//!
//! Every mutating operation checks the invariant before saving and writes
//! nothing if it fails.
//!
//! # Components
//!
//! - [`split`]: converts an expense into per-member debits
//! - [`balance`]: applies debits and credits to member balances
//! - [`settlement`]: pays creditors greedily from a debtor's payment
//! - [`service`]: the façade that ties them to a [`GroupStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{LedgerConfig, LedgerService, CreateGroupRequest, AddMemberRequest, RecordTransactionRequest};
//!
//! let ledger = LedgerService::in_memory(LedgerConfig::default());
//! let group = ledger.create_group(CreateGroupRequest::new("Ski trip"))?;
//! ledger.add_member(group.id, AddMemberRequest::new("Alice"))?;
//! ledger.add_member(group.id, AddMemberRequest::new("Bob"))?;
//!
//! // Alice pays 20.00; Bob now owes her 10.00
//! ledger.record_transaction(group.id, RecordTransactionRequest::equal("Lift passes", dec!(20), "Alice"))?;
//! ```

pub mod balance;
pub mod config;
pub mod error;
pub mod group;
pub mod member;
pub mod requests;
pub mod service;
pub mod settlement;
pub mod split;
pub mod store;
pub mod summary;
pub mod telemetry;
pub mod transaction;

pub use config::{LedgerConfig, LogFormat};
pub use error::LedgerError;
pub use group::Group;
pub use member::Member;
pub use requests::{AddMemberRequest, CreateGroupRequest, RecordTransactionRequest};
pub use service::{LedgerService, SettlementReceipt};
pub use settlement::{SettlementOptions, SettlementOutcome, Transfer};
pub use split::{compute_owed_deltas, OwedDeltas, SplitDetails, SplitOptions, SplitPolicy};
pub use store::{GroupStore, InMemoryGroupStore};
pub use summary::{BalanceEntry, BalanceSheet, Standing};
pub use telemetry::init_tracing;
pub use transaction::{Share, SplitType, Transaction};
