//! Interfaces of the collaborators folder virtualization relies on.
//!
//! The IMAP connection, the account database and the settings store all live outside of this
//! crate. They only need to be reachable through these traits, which take `&self` so that one
//! backend value can serve several accounts.

use crate::error::Result;
use crate::types::{AccountId, FolderRole, FolderTree, PrefixConfig, SystemFolderAssignment};

/// Lists an account's folders from the mail server.
pub trait FolderTreeSource {
    /// Fetch every folder of the account, with real paths. The returned tree flags whether it is
    /// a partial snapshot.
    fn fetch(&self, account_id: AccountId) -> Result<FolderTree>;
}

/// Persists the folder chosen for each system role.
pub trait SystemFolderStore {
    fn list(&self, account_id: AccountId) -> Result<Vec<SystemFolderAssignment>>;

    fn delete(&self, account_id: AccountId, role: FolderRole) -> Result<()>;

    /// Insert or replace the assignment of `assignment.role`.
    fn upsert(&self, assignment: &SystemFolderAssignment) -> Result<()>;
}

/// Creates folders on the mail server.
pub trait FolderCreator {
    /// Create the folder at `full_path`, a real path. Returns `false` when the server accepted
    /// the command but no folder was created.
    fn create_by_full_path(&self, account_id: AccountId, full_path: &str) -> Result<bool>;
}

/// Persists the per-account prefix setting.
pub trait PrefixConfigStore {
    fn get(&self, account_id: AccountId) -> Result<PrefixConfig>;

    /// Store `prefix` for the account. Returns `false` when the account does not exist.
    fn set(&self, account_id: AccountId, prefix: &str) -> Result<bool>;
}

impl<T: FolderTreeSource + ?Sized> FolderTreeSource for &T {
    fn fetch(&self, account_id: AccountId) -> Result<FolderTree> {
        (**self).fetch(account_id)
    }
}

impl<T: SystemFolderStore + ?Sized> SystemFolderStore for &T {
    fn list(&self, account_id: AccountId) -> Result<Vec<SystemFolderAssignment>> {
        (**self).list(account_id)
    }

    fn delete(&self, account_id: AccountId, role: FolderRole) -> Result<()> {
        (**self).delete(account_id, role)
    }

    fn upsert(&self, assignment: &SystemFolderAssignment) -> Result<()> {
        (**self).upsert(assignment)
    }
}

impl<T: FolderCreator + ?Sized> FolderCreator for &T {
    fn create_by_full_path(&self, account_id: AccountId, full_path: &str) -> Result<bool> {
        (**self).create_by_full_path(account_id, full_path)
    }
}

impl<T: PrefixConfigStore + ?Sized> PrefixConfigStore for &T {
    fn get(&self, account_id: AccountId) -> Result<PrefixConfig> {
        (**self).get(account_id)
    }

    fn set(&self, account_id: AccountId, prefix: &str) -> Result<bool> {
        (**self).set(account_id, prefix)
    }
}
