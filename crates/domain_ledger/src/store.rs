//! Group Store Port
//!
//! The ledger reads and writes whole groups through [`GroupStore`]. Each
//! call is synchronous and atomic from the ledger's point of view; how the
//! snapshot is persisted is up to the adapter.
//!
//! - [`InMemoryGroupStore`]: process-local map, used by default and in tests
//!
//! ```rust,ignore
//! let store: Arc<dyn GroupStore> = Arc::new(InMemoryGroupStore::new());
//! let service = LedgerService::new(store, LedgerConfig::default());
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use core_kernel::{DomainPort, GroupId, PortError};
use crate::group::Group;

/// Persistence port for groups and everything they own
pub trait GroupStore: DomainPort {
    /// Loads a group with its members and transactions
    ///
    /// Returns `Ok(None)` if no group has this id.
    fn load_group(&self, id: GroupId) -> Result<Option<Group>, PortError>;

    /// Writes a group snapshot, replacing any previous version
    fn save_group(&self, group: &Group) -> Result<(), PortError>;

    /// Loads every group, oldest first
    fn list_groups(&self) -> Result<Vec<Group>, PortError>;
}

/// Process-local [`GroupStore`] backed by a lock-protected map
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    groups: RwLock<HashMap<GroupId, Group>>,
}

impl InMemoryGroupStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store, for fixtures and tests
    pub fn with_groups(groups: impl IntoIterator<Item = Group>) -> Self {
        let map = groups.into_iter().map(|g| (g.id, g)).collect();
        Self {
            groups: RwLock::new(map),
        }
    }

    /// Number of stored groups
    pub fn len(&self) -> usize {
        self.groups.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomainPort for InMemoryGroupStore {}

impl GroupStore for InMemoryGroupStore {
    fn load_group(&self, id: GroupId) -> Result<Option<Group>, PortError> {
        let groups = self
            .groups
            .read()
            .map_err(|_| PortError::internal("group store lock poisoned"))?;
        Ok(groups.get(&id).cloned())
    }

    fn save_group(&self, group: &Group) -> Result<(), PortError> {
        let mut groups = self
            .groups
            .write()
            .map_err(|_| PortError::internal("group store lock poisoned"))?;
        groups.insert(group.id, group.clone());
        Ok(())
    }

    fn list_groups(&self) -> Result<Vec<Group>, PortError> {
        let groups = self
            .groups
            .read()
            .map_err(|_| PortError::internal("group store lock poisoned"))?;
        let mut all: Vec<Group> = groups.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }
}
