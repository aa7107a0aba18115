//! Deciding which folder plays each system role.
//!
//! Evidence is consulted in a fixed order, and each stage consumes the roles it resolves so
//! that later stages cannot decide them again:
//!
//! 1. `INBOX` is always the inbox.
//! 2. Assignments persisted in the [`SystemFolderStore`].
//! 3. Special-use hints reported by the server, anywhere in the tree.
//! 4. Candidate names, matched against top-level folders only.
//! 5. Optionally, creation of the folders still missing.
//!
//! A folder that received a role keeps it for the rest of the pass.

use crate::backend::{FolderCreator, SystemFolderStore};
use crate::error::Result;
use crate::types::{
    find_mut, walk_mut, AccountId, FolderNode, FolderRole, Iter, PrefixConfig, RoleCandidateMap,
};
use tracing::{debug, trace, warn};

/// Outcome of one resolution pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Whether at least one folder was created. The caller should list folders again.
    pub created: bool,
    /// Roles with candidate names that no folder plays and that were not created.
    pub unresolved: Vec<FolderRole>,
}

/// Assigns system roles within one account's virtual folder tree.
///
/// Resolution is best-effort. A failing store ends the pass early, keeping the roles assigned so
/// far, and is reported as "nothing created" rather than as an error. A rejected folder creation
/// only costs its own role.
pub struct SystemFolderResolver<'a, S: ?Sized, C: ?Sized> {
    account_id: AccountId,
    config: &'a PrefixConfig,
    store: &'a S,
    creator: &'a C,
}

impl<'a, S, C> SystemFolderResolver<'a, S, C>
where
    S: SystemFolderStore + ?Sized,
    C: FolderCreator + ?Sized,
{
    pub fn new(
        account_id: AccountId,
        config: &'a PrefixConfig,
        store: &'a S,
        creator: &'a C,
    ) -> Self {
        SystemFolderResolver {
            account_id,
            config,
            store,
            creator,
        }
    }

    /// Assign roles to `folders`, the top level of a virtualized tree.
    ///
    /// `partial` must be set when `folders` comes from a partial snapshot, in which case stale
    /// persisted assignments are kept. When `create_missing` is set, every role that is still
    /// unresolved and has candidate names gets a folder named after its first candidate, unless
    /// a folder of that name already exists with another role.
    pub fn resolve(
        &self,
        folders: &mut [FolderNode],
        candidates: RoleCandidateMap,
        partial: bool,
        create_missing: bool,
    ) -> Resolution {
        let mut candidates = candidates;
        assign_inbox(folders);

        let created = match self.try_resolve(folders, &mut candidates, partial, create_missing) {
            Ok(created) => created,
            Err(err) => {
                warn!(account = self.account_id, %err, "cannot resolve system folders");
                Vec::new()
            }
        };

        let unresolved = candidates
            .iter()
            .filter(|(role, names)| !names.is_empty() && !created.contains(*role))
            .map(|(role, _)| *role)
            .collect();

        Resolution {
            created: !created.is_empty(),
            unresolved,
        }
    }

    fn try_resolve(
        &self,
        folders: &mut [FolderNode],
        candidates: &mut RoleCandidateMap,
        partial: bool,
        create_missing: bool,
    ) -> Result<Vec<FolderRole>> {
        self.assign_from_store(folders, candidates, partial)?;
        assign_from_special_use(folders, candidates);
        assign_from_names(folders, candidates);

        if create_missing {
            Ok(self.create_missing(folders, candidates))
        } else {
            Ok(Vec::new())
        }
    }

    fn assign_from_store(
        &self,
        folders: &mut [FolderNode],
        candidates: &mut RoleCandidateMap,
        partial: bool,
    ) -> Result<()> {
        for assignment in self.store.list(self.account_id)? {
            let role = assignment.role;
            if !role.is_system() || role == FolderRole::Inbox {
                continue;
            }

            if assignment.is_unassigned() {
                trace!(account = self.account_id, %role, "role explicitly unassigned");
                candidates.remove(role);
                continue;
            }

            let name = self.config.to_virtual(&assignment.folder_full_name);
            match find_mut(folders, &name) {
                Some(folder) if folder.role() == FolderRole::Custom => {
                    debug!(account = self.account_id, %role, folder = %name, "role from store");
                    folder.set_role(role);
                    candidates.remove(role);
                }
                Some(folder) => {
                    debug!(
                        account = self.account_id,
                        %role,
                        folder = %name,
                        taken = %folder.role(),
                        "stored folder already has a role"
                    );
                }
                None if partial => {
                    trace!(
                        account = self.account_id,
                        %role,
                        folder = %name,
                        "stored folder not listed"
                    );
                }
                None => {
                    debug!(
                        account = self.account_id,
                        %role,
                        folder = %name,
                        "removing stale assignment"
                    );
                    self.store.delete(self.account_id, role)?;
                }
            }
        }
        Ok(())
    }

    /// A rejected creation only loses its own role.
    fn create_missing(
        &self,
        folders: &[FolderNode],
        candidates: &RoleCandidateMap,
    ) -> Vec<FolderRole> {
        let mut created = Vec::new();
        for (role, names) in candidates.iter() {
            let name = match names.first() {
                Some(name) => name,
                None => continue,
            };
            if Iter::new(folders).any(|folder| folder.raw_full_name() == name) {
                debug!(
                    account = self.account_id,
                    %role,
                    folder = %name,
                    "folder exists with another role"
                );
                continue;
            }
            let path = self.config.to_real(name);
            match self.creator.create_by_full_path(self.account_id, &path) {
                Ok(true) => {
                    debug!(account = self.account_id, %role, %path, "created system folder");
                    created.push(*role);
                }
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        account = self.account_id,
                        %role,
                        %path,
                        %err,
                        "cannot create system folder"
                    );
                }
            }
        }
        created
    }
}

fn assign_inbox(folders: &mut [FolderNode]) {
    walk_mut(folders, &mut |folder: &mut FolderNode| {
        if folder.is_inbox() {
            folder.set_role(FolderRole::Inbox);
        }
    });
}

fn assign_from_special_use(folders: &mut [FolderNode], candidates: &mut RoleCandidateMap) {
    walk_mut(folders, &mut |folder: &mut FolderNode| {
        let role = match folder.special_use() {
            Some(role) => role,
            None => return,
        };
        if folder.role() == FolderRole::Custom && candidates.remove(role).is_some() {
            trace!(%role, folder = folder.raw_full_name(), "role from special-use");
            folder.set_role(role);
        }
    });
}

fn assign_from_names(folders: &mut [FolderNode], candidates: &mut RoleCandidateMap) {
    for folder in folders.iter_mut() {
        if folder.role() != FolderRole::Custom {
            continue;
        }
        if let Some(role) = candidates.role_named(folder.raw_full_name()) {
            trace!(%role, folder = folder.raw_full_name(), "role from name");
            candidates.remove(role);
            folder.set_role(role);
        }
    }
}
