//! Ports and Adapters Infrastructure
//!
//! The ledger engine never touches storage directly. Each domain defines a
//! port trait extending [`DomainPort`], and adapters (in-memory, database,
//! remote) implement it.
//!
//! ```rust,ignore
//! pub trait GroupStore: DomainPort {
//!     fn load_group(&self, id: GroupId) -> Result<Option<Group>, PortError>;
//!     fn save_group(&self, group: &Group) -> Result<(), PortError>;
//! }
//! ```

use thiserror::Error;

/// Error type for port operations
///
/// All adapters report failures through this type so the domain can
/// handle storage errors the same way regardless of the backing system.
#[derive(Debug, Error)]
pub enum PortError {
    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared between threads serving different groups.
pub trait DomainPort: Send + Sync + 'static {}
