//! The call-wrapping layer placed around mail operations.
//!
//! Every operation reads the account's prefix afresh, since it may change between calls, and
//! translates folder paths on the way in and on the way out.

use crate::backend::{FolderCreator, FolderTreeSource, PrefixConfigStore, SystemFolderStore};
use crate::error::Result;
use crate::resolver::{Resolution, SystemFolderResolver};
use crate::types::{
    AccountId, FolderArgs, FolderCountsMap, FolderLabel, FolderRole, FolderTree, MessageList,
    PrefixConfig, RoleCandidateMap, SystemFolderAssignment,
};
use crate::{rewrite, tree};
use tracing::{debug, info};

/// Namespace virtualization for the accounts served by one backend.
///
/// ```
/// # #[cfg(feature = "test_helpers")]
/// # fn main() -> imap_prefix::error::Result<()> {
/// use imap_prefix::testing::{folders, MemoryBackend};
/// use imap_prefix::{FolderRole, PrefixLayer};
///
/// let backend = MemoryBackend::new();
/// backend.set_tree(1, folders::parse("\
/// * LIST () \"/\" INBOX\r\n\
/// * LIST (\\HasChildren) \"/\" Work\r\n\
/// * LIST (\\HasNoChildren) \"/\" Work/Sent\r\n\
/// "));
///
/// let layer = PrefixLayer::new(backend);
/// layer.update_prefix(1, "Work")?;
///
/// let tree = layer.list_folders(1, false)?;
/// assert_eq!(tree.with_role(FolderRole::Sent).unwrap().raw_full_name(), "Sent");
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "test_helpers"))]
/// # fn main() {}
/// ```
pub struct PrefixLayer<B> {
    backend: B,
    candidates: RoleCandidateMap,
}

impl<B> PrefixLayer<B>
where
    B: FolderTreeSource + SystemFolderStore + FolderCreator + PrefixConfigStore,
{
    /// Wrap `backend`, using the default system folder names.
    pub fn new(backend: B) -> Self {
        PrefixLayer {
            backend,
            candidates: RoleCandidateMap::default(),
        }
    }

    /// Use other candidate names for system folders.
    pub fn with_candidates(mut self, candidates: RoleCandidateMap) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The account's current prefix setting.
    pub fn config(&self, account_id: AccountId) -> Result<PrefixConfig> {
        self.backend.get(account_id)
    }

    /// List the account's folders as the user sees them, with system roles assigned.
    ///
    /// With `create_missing`, system folders that could not be found are created below the
    /// prefix, and the folders are listed again so that they show up.
    pub fn list_folders(&self, account_id: AccountId, create_missing: bool) -> Result<FolderTree> {
        let config = self.config(account_id)?;
        let (tree, resolution) = self.list_once(account_id, &config, create_missing)?;
        if !resolution.created {
            return Ok(tree);
        }

        debug!(account = account_id, "system folders created, listing again");
        let (tree, resolution) = self.list_once(account_id, &config, false)?;
        if !resolution.unresolved.is_empty() {
            debug!(
                account = account_id,
                unresolved = ?resolution.unresolved,
                "system folders still missing"
            );
        }
        Ok(tree)
    }

    fn list_once(
        &self,
        account_id: AccountId,
        config: &PrefixConfig,
        create_missing: bool,
    ) -> Result<(FolderTree, Resolution)> {
        let real = self.backend.fetch(account_id)?;
        let mut tree = tree::virtualize(real, config);
        let partial = tree.is_partial();
        let resolution = SystemFolderResolver::new(account_id, config, &self.backend, &self.backend)
            .resolve(tree.roots_mut(), self.candidates.clone(), partial, create_missing);
        Ok((tree, resolution))
    }

    /// Translate the folder-valued arguments of an operation into real paths.
    pub fn prepare_arguments(&self, account_id: AccountId, args: &mut FolderArgs) -> Result<()> {
        let config = self.config(account_id)?;
        rewrite::prepare_arguments(args, &config);
        Ok(())
    }

    /// Re-key per-folder counts returned by the server by virtual path.
    pub fn virtualize_counts(
        &self,
        account_id: AccountId,
        counts: FolderCountsMap,
    ) -> Result<FolderCountsMap> {
        let config = self.config(account_id)?;
        Ok(rewrite::virtualize_counts(counts, &config))
    }

    /// Rewrite the folder labels of a message listing returned by the server.
    pub fn virtualize_messages<M: FolderLabel>(
        &self,
        account_id: AccountId,
        list: &mut MessageList<M>,
    ) -> Result<()> {
        let config = self.config(account_id)?;
        rewrite::virtualize_messages(list, &config);
        Ok(())
    }

    /// Translate the account's persisted folder ordering into real paths.
    pub fn realize_folder_order(
        &self,
        account_id: AccountId,
        order: Vec<String>,
    ) -> Result<Vec<String>> {
        let config = self.config(account_id)?;
        Ok(rewrite::realize_folder_order(order, &config))
    }

    /// Change the account's prefix. An empty prefix turns virtualization off.
    ///
    /// Returns `false` when the store did not accept the setting.
    pub fn update_prefix(&self, account_id: AccountId, prefix: &str) -> Result<bool> {
        let delimiter = self.config(account_id)?.delimiter();
        let config = PrefixConfig::new(prefix, delimiter);
        PrefixConfig::validate(config.prefix())?;
        let updated = self.backend.set(account_id, config.prefix())?;
        if updated {
            info!(account = account_id, prefix = config.prefix(), "folder prefix updated");
        }
        Ok(updated)
    }

    /// Persist the folder playing `role`, given by its virtual path. `None` records the role as
    /// explicitly unassigned, so that it is neither guessed nor created anymore.
    pub fn assign_system_folder(
        &self,
        account_id: AccountId,
        role: FolderRole,
        folder: Option<&str>,
    ) -> Result<()> {
        let assignment = match folder {
            Some(folder) => {
                let config = self.config(account_id)?;
                SystemFolderAssignment::new(account_id, role, config.to_real(folder))
            }
            None => SystemFolderAssignment::unassigned(account_id, role),
        };
        debug!(
            account = account_id,
            %role,
            folder = %assignment.folder_full_name,
            "assigning system folder"
        );
        self.backend.upsert(&assignment)
    }
}
