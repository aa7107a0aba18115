//! Enable the test_helpers feature to expose an in-memory backend and helpers to build folder
//! trees for testing code that uses this crate.
//!
//! To use add a dev-dependency on the crate with the feature "test_helpers"
//! e.g.
//!
//! ```toml
//! [dependencies]
//! imap-prefix = { version = "0.1" }
//!
//! [dev-dependencies]
//! # mirror the same configuration your dependencies and add test_helpers
//! imap-prefix = { version = "0.1", features = ["test_helpers"] }
//! ```
//!
use crate::backend::{FolderCreator, FolderTreeSource, PrefixConfigStore, SystemFolderStore};
use crate::error::{Error, Result};
use crate::types::{
    AccountId, FolderNode, FolderRole, FolderTree, PrefixConfig, SystemFolderAssignment,
    DEFAULT_DELIMITER,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Methods to build a [`FolderTree`] out of `LIST` responses
pub mod folders {
    use crate::types::FolderTree;

    /// Builds a complete [`FolderTree`] based on the provided input
    ///
    /// Example input.
    ///
    /// ```
    /// let input = "\
    /// * LIST (\\HasChildren) \"/\" Work\r\n\
    /// * LIST (\\HasNoChildren \\Sent) \"/\" Work/Sent\r\n\
    /// ";
    /// let tree = imap_prefix::testing::folders::parse(input);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn parse(input: impl AsRef<[u8]>) -> FolderTree {
        crate::parse::parse_folder_tree(input.as_ref(), false).unwrap()
    }

    /// Builds a partial [`FolderTree`] based on the provided input
    pub fn parse_partial(input: impl AsRef<[u8]>) -> FolderTree {
        crate::parse::parse_folder_tree(input.as_ref(), true).unwrap()
    }
}

#[derive(Default)]
struct State {
    trees: HashMap<AccountId, FolderTree>,
    prefixes: HashMap<AccountId, PrefixConfig>,
    assignments: HashMap<AccountId, Vec<SystemFolderAssignment>>,
    created: HashMap<AccountId, Vec<String>>,
    fetches: usize,
}

/// A backend implementing every collaborator trait in memory.
///
/// Created folders are added to the account's tree, so a following fetch lists them.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
    delimiter: Option<char>,
    fail_fetch: bool,
    fail_store: bool,
    fail_create: bool,
    rejected: Vec<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend {
            delimiter: Some(DEFAULT_DELIMITER),
            ..MemoryBackend::default()
        }
    }

    /// Make every fetch fail.
    pub fn with_failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Make every system folder store operation fail.
    pub fn with_failing_store(mut self) -> Self {
        self.fail_store = true;
        self
    }

    /// Make every folder creation fail.
    pub fn with_failing_creator(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make creating `path` fail, as a server does for a folder that already exists.
    pub fn with_rejected_folder(mut self, path: &str) -> Self {
        self.rejected.push(path.to_string());
        self
    }

    /// Set the real folder tree of an account.
    pub fn set_tree(&self, account_id: AccountId, tree: FolderTree) {
        self.state().trees.insert(account_id, tree);
    }

    /// Set the prefix of an account without validation.
    pub fn set_prefix(&self, account_id: AccountId, prefix: &str) {
        let config = PrefixConfig::new(prefix, self.delimiter.unwrap_or(DEFAULT_DELIMITER));
        self.state().prefixes.insert(account_id, config);
    }

    /// Persist an assignment directly.
    pub fn assign(&self, assignment: SystemFolderAssignment) {
        let mut state = self.state();
        let assignments = state.assignments.entry(assignment.account_id).or_default();
        assignments.retain(|existing| existing.role != assignment.role);
        assignments.push(assignment);
    }

    /// The persisted assignments of an account.
    pub fn assignments(&self, account_id: AccountId) -> Vec<SystemFolderAssignment> {
        self.state()
            .assignments
            .get(&account_id)
            .cloned()
            .unwrap_or_default()
    }

    /// The real paths of the folders created for an account, in creation order.
    pub fn created(&self, account_id: AccountId) -> Vec<String> {
        self.state()
            .created
            .get(&account_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of fetches served so far.
    pub fn fetches(&self) -> usize {
        self.state().fetches
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_store(&self) -> Result<()> {
        if self.fail_store {
            return Err(Error::Storage("system folder store unavailable".to_string()));
        }
        Ok(())
    }
}

impl FolderTreeSource for MemoryBackend {
    fn fetch(&self, account_id: AccountId) -> Result<FolderTree> {
        if self.fail_fetch {
            return Err(Error::Fetch("connection lost".to_string()));
        }
        let mut state = self.state();
        state.fetches += 1;
        Ok(state.trees.get(&account_id).cloned().unwrap_or_default())
    }
}

impl SystemFolderStore for MemoryBackend {
    fn list(&self, account_id: AccountId) -> Result<Vec<SystemFolderAssignment>> {
        self.check_store()?;
        Ok(self.assignments(account_id))
    }

    fn delete(&self, account_id: AccountId, role: FolderRole) -> Result<()> {
        self.check_store()?;
        if let Some(assignments) = self.state().assignments.get_mut(&account_id) {
            assignments.retain(|assignment| assignment.role != role);
        }
        Ok(())
    }

    fn upsert(&self, assignment: &SystemFolderAssignment) -> Result<()> {
        self.check_store()?;
        self.assign(assignment.clone());
        Ok(())
    }
}

impl FolderCreator for MemoryBackend {
    fn create_by_full_path(&self, account_id: AccountId, full_path: &str) -> Result<bool> {
        if self.fail_create {
            return Err(Error::Create {
                path: full_path.to_string(),
                reason: "permission denied".to_string(),
            });
        }
        if self.rejected.iter().any(|path| path == full_path) {
            return Err(Error::Create {
                path: full_path.to_string(),
                reason: "mailbox already exists".to_string(),
            });
        }
        let mut state = self.state();
        let tree = state.trees.entry(account_id).or_default();
        if tree.get(full_path).is_some() {
            return Ok(false);
        }
        tree.attach(FolderNode::new(full_path, self.delimiter));
        state
            .created
            .entry(account_id)
            .or_default()
            .push(full_path.to_string());
        Ok(true)
    }
}

impl PrefixConfigStore for MemoryBackend {
    fn get(&self, account_id: AccountId) -> Result<PrefixConfig> {
        let delimiter = self.delimiter.unwrap_or(DEFAULT_DELIMITER);
        Ok(self
            .state()
            .prefixes
            .get(&account_id)
            .cloned()
            .unwrap_or_else(|| PrefixConfig::disabled(delimiter)))
    }

    fn set(&self, account_id: AccountId, prefix: &str) -> Result<bool> {
        self.set_prefix(account_id, prefix);
        Ok(true)
    }
}
