//! IMAP mailbox namespace virtualization.
//!
//! An account may keep all of its folders below a *prefix* folder on the mail server, say
//! `Work/`. This crate hides that prefix: users see `Sent` where the server stores `Work/Sent`,
//! and every path a user hands back is translated to its real counterpart before it reaches
//! the server. `INBOX` is never virtualized.
//!
//! It also decides which folders play the system roles (drafts, sent, spam, trash, ...) of the
//! virtualized tree, from persisted choices, server-reported special-use attributes and folder
//! names, and can create the ones that are missing.
//!
//! The building blocks are pure and can be used on their own:
//!
//! - [`path`] maps single paths in both directions,
//! - [`tree::virtualize`] rewrites a whole folder tree,
//! - [`rewrite`] rewrites operation arguments and results,
//! - [`resolver::SystemFolderResolver`] assigns system roles.
//!
//! [`PrefixLayer`] wraps them around the collaborators of [`backend`] for one operation at a
//! time.
//!
//! # Usage
//!
//! ```
//! use imap_prefix::{tree, FolderNode, FolderTree, PrefixConfig};
//!
//! let config = PrefixConfig::new("Work", '/');
//! let real = FolderTree::new(vec![
//!     FolderNode::new("INBOX", Some('/')),
//!     FolderNode::new("Work", Some('/'))
//!         .with_child(FolderNode::new("Work/Sent", Some('/'))),
//! ]);
//!
//! let tree = tree::virtualize(real, &config);
//! let names: Vec<_> = tree.roots().iter().map(|f| f.raw_full_name()).collect();
//! assert_eq!(names, ["INBOX", "Sent"]);
//! assert_eq!(config.to_real("Sent"), "Work/Sent");
//! ```

mod types;

pub mod backend;
pub mod error;
pub mod layer;
pub mod parse;
pub mod path;
pub mod resolver;
pub mod rewrite;
pub mod tree;

pub use crate::error::{Error, Result};
pub use crate::layer::PrefixLayer;
pub use crate::resolver::{Resolution, SystemFolderResolver};
pub use crate::types::*;

#[cfg(any(test, feature = "test_helpers"))]
pub mod testing;
