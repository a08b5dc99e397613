//! Core Kernel - Foundational types for the shared expense ledger
//!
//! This crate provides the building blocks used by the ledger domain:
//! - Money types with precise decimal arithmetic at minor-unit precision
//! - Strongly-typed identifiers for groups, members, and transactions
//! - Port abstractions for swappable persistence adapters

pub mod money;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate};
pub use identifiers::{GroupId, MemberId, TransactionId};
pub use error::CoreError;
pub use ports::{PortError, DomainPort};
