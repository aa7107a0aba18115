use super::{AccountId, FolderRole};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// A persisted choice of the folder playing a system role for an account.
///
/// `folder_full_name` is a real path. An empty `folder_full_name` records that the role was
/// explicitly left unassigned, which is different from having no record at all: such a role is
/// never assigned or created automatically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemFolderAssignment {
    pub account_id: AccountId,
    pub role: FolderRole,
    pub folder_full_name: String,
}

impl SystemFolderAssignment {
    pub fn new(
        account_id: AccountId,
        role: FolderRole,
        folder_full_name: impl Into<String>,
    ) -> Self {
        SystemFolderAssignment {
            account_id,
            role,
            folder_full_name: folder_full_name.into(),
        }
    }

    /// A marker recording that `role` is deliberately not assigned.
    pub fn unassigned(account_id: AccountId, role: FolderRole) -> Self {
        SystemFolderAssignment::new(account_id, role, String::new())
    }

    pub fn is_unassigned(&self) -> bool {
        self.folder_full_name.is_empty()
    }
}

/// Acceptable folder names per system role, consumed by one resolution pass.
///
/// Names are prefix-relative and matched case-sensitively. The first name of a list is the one
/// used when the folder has to be created. An empty list means the role is never assigned by
/// name nor created, although persisted assignments and server hints still apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleCandidateMap {
    roles: BTreeMap<FolderRole, Vec<String>>,
}

impl Default for RoleCandidateMap {
    fn default() -> Self {
        RoleCandidateMap::empty()
            .with(FolderRole::Drafts, &["Drafts", "Draft"])
            .with(FolderRole::Sent, &["Sent", "Sent Items", "Sent Mail"])
            .with(
                FolderRole::Spam,
                &["Spam", "Junk", "Junk Mail", "Junk E-mail", "Bulk Mail"],
            )
            .with(FolderRole::Trash, &["Trash", "Bin", "Deleted", "Deleted Items"])
            .with::<&str>(FolderRole::Template, &[])
            .with::<&str>(FolderRole::All, &[])
    }
}

impl RoleCandidateMap {
    /// A map with no roles at all.
    pub fn empty() -> Self {
        RoleCandidateMap {
            roles: BTreeMap::new(),
        }
    }

    /// Set the candidate names of `role`. [`FolderRole::Inbox`] and [`FolderRole::Custom`] are
    /// ignored: the inbox is always found by its reserved name.
    pub fn with<S: AsRef<str>>(mut self, role: FolderRole, names: &[S]) -> Self {
        self.insert(role, names.iter().map(|name| name.as_ref().to_string()).collect());
        self
    }

    pub fn insert(&mut self, role: FolderRole, names: Vec<String>) {
        if matches!(role, FolderRole::Inbox | FolderRole::Custom) {
            return;
        }
        self.roles.insert(role, names);
    }

    /// Remove `role`, returning its candidate names if it was still unresolved.
    pub fn remove(&mut self, role: FolderRole) -> Option<Vec<String>> {
        self.roles.remove(&role)
    }

    pub fn contains(&self, role: FolderRole) -> bool {
        self.roles.contains_key(&role)
    }

    pub fn candidates(&self, role: FolderRole) -> Option<&[String]> {
        self.roles.get(&role).map(Vec::as_slice)
    }

    /// The first role, in declaration order, whose candidates include `name`.
    pub fn role_named(&self, name: &str) -> Option<FolderRole> {
        self.roles
            .iter()
            .find(|(_, names)| names.iter().any(|candidate| candidate == name))
            .map(|(role, _)| *role)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FolderRole, Vec<String>> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
