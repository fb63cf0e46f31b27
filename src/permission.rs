//! Permission nodes and the registry seam used to resolve command
//! permissions.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::command::CommandMeta;
use crate::error::{Error, Result};

/// Composite permission key with the canonical string form
/// `namespace:name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PermissionId {
    namespace: String,
    name: String,
}

impl PermissionId {
    /// Build an id from its components.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is empty or contains `:` or
    /// whitespace.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let name = name.into();
        for part in [&namespace, &name] {
            if part.is_empty() || part.chars().any(|c| c == ':' || c.is_whitespace()) {
                return Err(Error::InvalidPermissionId(format!("{namespace}:{name}")));
            }
        }
        Ok(Self { namespace, name })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)
    }
}

impl FromStr for PermissionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (namespace, name) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidPermissionId(s.to_string()))?;
        Self::new(namespace, name)
    }
}

impl From<PermissionId> for String {
    fn from(id: PermissionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for PermissionId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A node in the permission hierarchy.
///
/// The root node is its own parent; every other node names an existing
/// parent id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    pub description: String,
    pub parent: PermissionId,
}

/// Lookup and registration surface of an external permission registry.
///
/// Implementations must keep at most one node per id even under concurrent
/// registration; [`resolve_or_register`] leans on that guarantee instead
/// of locking around its own check-then-register sequence.
pub trait PermissionRegistry: Send + Sync {
    /// The node registered under `id`, if any.
    fn lookup(&self, id: &PermissionId) -> Option<Permission>;

    /// Register a new node under `parent` and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is already registered.
    fn register(
        &self,
        id: PermissionId,
        description: &str,
        parent: &Permission,
    ) -> Result<Permission>;
}

/// In-memory [`PermissionRegistry`], seeded with the root node `*:*`.
///
/// The default collaborator for embedders that do not persist permissions,
/// and the substitute registry in tests.
#[derive(Debug)]
pub struct MemoryPermissionRegistry {
    root: Permission,
    nodes: Mutex<HashMap<PermissionId, Permission>>,
}

impl MemoryPermissionRegistry {
    #[must_use]
    pub fn new() -> Self {
        let root = Permission {
            id: Self::root_id(),
            description: "The root permission".to_string(),
            parent: Self::root_id(),
        };
        let mut nodes = HashMap::new();
        nodes.insert(root.id.clone(), root.clone());
        Self {
            root,
            nodes: Mutex::new(nodes),
        }
    }

    /// Id of the seeded root node.
    #[must_use]
    pub fn root_id() -> PermissionId {
        PermissionId {
            namespace: "*".to_string(),
            name: "*".to_string(),
        }
    }

    /// The seeded root node, parent for permissions without a dedicated
    /// one.
    #[must_use]
    pub fn root(&self) -> Permission {
        self.root.clone()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PermissionId, Permission>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryPermissionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionRegistry for MemoryPermissionRegistry {
    fn lookup(&self, id: &PermissionId) -> Option<Permission> {
        self.lock().get(id).cloned()
    }

    fn register(
        &self,
        id: PermissionId,
        description: &str,
        parent: &Permission,
    ) -> Result<Permission> {
        let mut nodes = self.lock();
        if nodes.contains_key(&id) {
            return Err(Error::PermissionConflict(id));
        }
        let node = Permission {
            id: id.clone(),
            description: description.to_string(),
            parent: parent.id.clone(),
        };
        nodes.insert(id, node.clone());
        Ok(node)
    }
}

/// Fetch the permission node for `command`, registering it under `parent`
/// on first use.
///
/// Sequentially idempotent: the first call creates the node, later calls
/// return the stored one. Two callers racing on the same id are arbitrated
/// by the registry, and the loser of that race sees the registry's
/// conflict error.
///
/// # Errors
///
/// Returns an error if the command's permission id is invalid or if the
/// registry rejects the registration.
pub fn resolve_or_register(
    registry: &dyn PermissionRegistry,
    command: &CommandMeta,
    parent: &Permission,
) -> Result<Permission> {
    let id = command.owner.permission_id(&command.primary_name)?;
    if let Some(existing) = registry.lookup(&id) {
        debug!("Permission {id} already registered");
        return Ok(existing);
    }
    info!("Registering permission {id} under {}", parent.id);
    registry.register(id, &command.description, parent)
}
