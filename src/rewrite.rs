//! Rewriting folder identities in operation arguments and results.
//!
//! Arguments arrive with virtual paths and are turned into real paths before the mail server
//! sees them. Results come back with real paths and are turned into virtual paths before the
//! user sees them. Only path-shaped values are touched.

use crate::path;
use crate::types::{FolderArgs, FolderCountsMap, FolderLabel, MessageList, PrefixConfig};

/// Re-key per-folder counts by virtual path.
///
/// Folders outside the prefix keep their real path. Should a folder outside the prefix collide
/// with a virtualized one, the virtualized folder's counts win.
pub fn virtualize_counts(counts: FolderCountsMap, config: &PrefixConfig) -> FolderCountsMap {
    if config.is_disabled() {
        return counts;
    }

    let mut virtualized = FolderCountsMap::with_capacity(counts.len());
    let mut prefixed = Vec::new();
    for (folder, value) in counts {
        match path::strip(&folder, config.prefix(), config.delimiter()) {
            Some(virtual_path) => prefixed.push((virtual_path.to_string(), value)),
            None => {
                virtualized.insert(folder, value);
            }
        }
    }
    virtualized.extend(prefixed);
    virtualized
}

/// Replace the folder label of every message, and the list's own folder name, by its virtual
/// path.
pub fn virtualize_messages<M: FolderLabel>(list: &mut MessageList<M>, config: &PrefixConfig) {
    if config.is_disabled() {
        return;
    }

    list.folder_name = config.to_virtual(&list.folder_name);
    for message in &mut list.messages {
        let folder = config.to_virtual(message.folder());
        if folder != message.folder() {
            message.set_folder(folder);
        }
    }
}

/// Replace every folder-valued argument by its real path.
pub fn prepare_arguments(args: &mut FolderArgs, config: &PrefixConfig) {
    if config.is_disabled() {
        return;
    }

    let single = [
        &mut args.folder,
        &mut args.to_folder,
        &mut args.parent,
        &mut args.message_folder,
        &mut args.folder_full_name,
    ];
    for folder in single.into_iter().flatten() {
        *folder = config.to_real(folder);
    }

    for folder in args.folders.iter_mut().chain(args.folder_list.iter_mut()) {
        *folder = config.to_real(folder);
    }
}

/// Turn a persisted folder ordering, kept in virtual paths, into real paths so that it can be
/// matched against the folders listed by the server.
pub fn realize_folder_order(order: Vec<String>, config: &PrefixConfig) -> Vec<String> {
    if config.is_disabled() {
        return order;
    }

    order
        .into_iter()
        .map(|folder| config.to_real(&folder))
        .collect()
}
