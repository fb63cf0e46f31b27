//! Command descriptors for permission resolution and name-conflict checks.

use crate::error::Result;
use crate::matching::intersects_ignoring_case;
use crate::permission::PermissionId;

/// Where a command was registered from, which fixes its permission
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOwner {
    /// Built-in console commands.
    Console,
    /// Commands contributed by a named plugin.
    Plugin(String),
}

impl CommandOwner {
    /// Permission namespace for this owner's commands.
    #[must_use]
    pub fn namespace(&self) -> &str {
        match self {
            CommandOwner::Console => "console",
            CommandOwner::Plugin(name) => name,
        }
    }

    /// Permission id for one of this owner's commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace or `name` is not a valid
    /// permission id component.
    pub fn permission_id(&self, name: &str) -> Result<PermissionId> {
        PermissionId::new(self.namespace(), name)
    }
}

/// Static description of a command, as supplied at registration time.
#[derive(Debug, Clone)]
pub struct CommandMeta {
    pub owner: CommandOwner,
    pub primary_name: String,
    pub aliases: Vec<String>,
    pub description: String,
}

impl CommandMeta {
    /// Primary name followed by the aliases.
    #[must_use]
    pub fn all_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(1 + self.aliases.len());
        names.push(self.primary_name.as_str());
        names.extend(self.aliases.iter().map(String::as_str));
        names
    }

    /// Whether this command's names collide with another's.
    ///
    /// Built on [`intersects_ignoring_case`], so the check is positional: a
    /// shared name is only caught when it sits at the same index of both
    /// name lists.
    #[must_use]
    pub fn conflicts_with(&self, other: &CommandMeta) -> bool {
        intersects_ignoring_case(&self.all_names(), &other.all_names())
    }
}
