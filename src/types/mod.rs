//! This module contains the types consumed and produced by folder virtualization.

/// Identifier of a mail account, as assigned by the account manager.
pub type AccountId = u64;

mod role;
pub use self::role::FolderRole;

mod name;
pub use self::name::NameAttribute;

mod folder;
pub(crate) use self::folder::{find_mut, take, walk_mut};
pub use self::folder::{FolderNode, FolderTree, Iter};

mod config;
pub use self::config::{PrefixConfig, DEFAULT_DELIMITER};

mod system;
pub use self::system::{RoleCandidateMap, SystemFolderAssignment};

mod results;
pub use self::results::{
    FolderArgs, FolderCounts, FolderCountsMap, FolderLabel, MessageInfo, MessageList,
};
