use serde::{Deserialize, Serialize};
use std::fmt;

/// The functional role a folder plays for an account.
///
/// Every folder starts out as [`FolderRole::Custom`]. The remaining variants are *system*
/// roles, and at most one folder per tree holds each of them. [`FolderRole::Template`] and
/// [`FolderRole::All`] are optional and are frequently absent altogether.
///
/// The declaration order is the order in which roles are considered by the name heuristics
/// and by folder creation.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FolderRole {
    /// The `INBOX` mailbox.
    Inbox,
    /// Messages that have not completed composition.
    Drafts,
    /// Copies of messages that were sent.
    Sent,
    /// Junk mail.
    Spam,
    /// Deleted messages.
    Trash,
    /// Message templates.
    Template,
    /// A virtual mailbox containing every message.
    All,
    /// Any folder without a system role.
    #[default]
    Custom,
}

impl FolderRole {
    /// Returns `true` for every role except [`FolderRole::Custom`].
    pub fn is_system(self) -> bool {
        self != FolderRole::Custom
    }

    /// Map the name of a `SPECIAL-USE` ([RFC 6154](https://tools.ietf.org/html/rfc6154)) or
    /// `XLIST` mailbox attribute, such as `\Junk`, to the role it hints at. Case-insensitive.
    pub fn from_special_use(attribute: &str) -> Option<Self> {
        let name = attribute.strip_prefix('\\').unwrap_or(attribute);
        match name.to_ascii_lowercase().as_str() {
            "all" | "allmail" => Some(FolderRole::All),
            "drafts" => Some(FolderRole::Drafts),
            "junk" | "spam" => Some(FolderRole::Spam),
            "sent" => Some(FolderRole::Sent),
            "trash" => Some(FolderRole::Trash),
            "templates" => Some(FolderRole::Template),
            _ => None,
        }
    }
}

impl fmt::Display for FolderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FolderRole::Inbox => "inbox",
            FolderRole::Drafts => "drafts",
            FolderRole::Sent => "sent",
            FolderRole::Spam => "spam",
            FolderRole::Trash => "trash",
            FolderRole::Template => "template",
            FolderRole::All => "all",
            FolderRole::Custom => "custom",
        };
        f.write_str(name)
    }
}
