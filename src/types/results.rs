use std::collections::HashMap;

/// Message counts of one folder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FolderCounts {
    pub total: u32,
    pub unread: u32,
}

/// Message counts keyed by folder path.
pub type FolderCountsMap = HashMap<String, FolderCounts>;

/// Something in a result set that carries the path of the folder it lives in.
pub trait FolderLabel {
    fn folder(&self) -> &str;
    fn set_folder(&mut self, folder: String);
}

/// A minimal message reference, as returned by message listing operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageInfo {
    pub uid: u32,
    pub folder: String,
    pub flags: Vec<String>,
}

impl FolderLabel for MessageInfo {
    fn folder(&self) -> &str {
        &self.folder
    }

    fn set_folder(&mut self, folder: String) {
        self.folder = folder;
    }
}

/// A batch of messages listed from `folder_name`.
///
/// Unified listings may return messages from several folders, so every message carries its own
/// folder label as well.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageList<M> {
    pub folder_name: String,
    pub messages: Vec<M>,
}

/// The folder-valued arguments of a mail operation.
///
/// Every field holds a virtual path when received from the user and a real path once prepared
/// for the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderArgs {
    /// The folder the operation acts on.
    pub folder: Option<String>,
    /// Destination of a move or copy.
    pub to_folder: Option<String>,
    /// Parent of a folder being created.
    pub parent: Option<String>,
    /// Folder of a single message.
    pub message_folder: Option<String>,
    /// Full name of a folder being subscribed, deleted or retyped.
    pub folder_full_name: Option<String>,
    /// Folders of a multi-folder listing.
    pub folders: Vec<String>,
    /// A complete folder ordering.
    pub folder_list: Vec<String>,
}
