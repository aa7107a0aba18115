//! Rewriting a real folder tree into the tree the user should see.
//!
//! The folder named after the prefix is the *container*: it disappears from the output and its
//! children become the top-level folders, renamed to their virtual paths. Top-level siblings of
//! the container do not belong to the virtualized namespace and are hidden. `INBOX` is the one
//! exception and is always the first top-level folder. A prefixed folder whose virtual path would
//! be `INBOX`, or lie below it, is hidden too.

use crate::path::{self, INBOX};
use crate::types::{take, walk_mut, FolderNode, FolderRole, FolderTree, PrefixConfig};
use tracing::{debug, trace};

/// Produce the virtual tree for `tree`.
///
/// When the container folder does not exist yet, the top-level folders are kept, and only the
/// folders already below the prefix are renamed. This never fails: an account without prefixed
/// folders is a normal state.
///
/// Rewriting a tree that was already virtualized with the same prefix returns it unchanged.
pub fn virtualize(tree: FolderTree, config: &PrefixConfig) -> FolderTree {
    if !config.is_disabled() && tree.virtualized.as_deref() == Some(config.prefix()) {
        trace!(prefix = config.prefix(), "folder tree already virtualized");
        return tree;
    }

    let FolderTree {
        mut roots, partial, ..
    } = tree;

    let inbox = take_inbox(&mut roots, config);

    let mut working = if config.is_disabled() {
        roots
    } else {
        match take(&mut roots, config.container()) {
            Some(container) => {
                if !roots.is_empty() {
                    debug!(
                        prefix = config.prefix(),
                        hidden = roots.len(),
                        "hiding folders outside of the prefix container"
                    );
                }
                container.children
            }
            None => {
                debug!(prefix = config.prefix(), "prefix container not found");
                roots
            }
        }
    };

    if !config.is_disabled() {
        hide_inbox_shadows(&mut working, config);
        walk_mut(&mut working, &mut |node: &mut FolderNode| rename(node, config));
    }

    let mut roots = Vec::with_capacity(working.len() + 1);
    roots.push(inbox);
    roots.append(&mut working);

    FolderTree {
        roots,
        partial,
        virtualized: if config.is_disabled() {
            None
        } else {
            Some(config.prefix().to_string())
        },
    }
}

/// Detach `INBOX` from wherever the server put it, or synthesize it.
fn take_inbox(roots: &mut Vec<FolderNode>, config: &PrefixConfig) -> FolderNode {
    let mut inbox = match take(roots, INBOX) {
        Some(inbox) => inbox,
        None => {
            debug!("INBOX missing from folder tree, synthesizing it");
            FolderNode::inbox(Some(config.delimiter()))
        }
    };
    inbox.set_role(FolderRole::Inbox);
    inbox
}

/// Drop `prefix/INBOX` and its subtree. Their virtual paths would be those of the real inbox,
/// which never maps back to the prefix.
fn hide_inbox_shadows(nodes: &mut Vec<FolderNode>, config: &PrefixConfig) {
    nodes.retain(|node| {
        let shadow = strip(node, config)
            .map_or(false, |virtual_path| config.is_inbox(virtual_path));
        if shadow {
            debug!(folder = node.raw_full_name(), "hiding folder shadowing INBOX");
        }
        !shadow
    });
    for node in nodes.iter_mut() {
        hide_inbox_shadows(&mut node.children, config);
    }
}

fn strip<'a>(node: &'a FolderNode, config: &PrefixConfig) -> Option<&'a str> {
    path::strip(node.raw_full_name(), config.prefix(), config.delimiter())
}

fn rename(node: &mut FolderNode, config: &PrefixConfig) {
    let virtual_path = match strip(node, config) {
        Some(virtual_path) => virtual_path.to_string(),
        None => return,
    };
    trace!(real = node.raw_full_name(), %virtual_path, "renaming folder");
    node.rename(virtual_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> FolderNode {
        FolderNode::new(name, Some('/'))
    }

    fn names(nodes: &[FolderNode]) -> Vec<&str> {
        nodes.iter().map(FolderNode::raw_full_name).collect()
    }

    fn work() -> PrefixConfig {
        PrefixConfig::new("Work", '/')
    }

    #[test]
    fn container_children_become_top_level() {
        let tree = FolderTree::new(vec![
            node("INBOX"),
            node("Work")
                .with_child(node("Work/Sent"))
                .with_child(node("Work/Inbox-copy")),
        ]);
        let tree = virtualize(tree, &work());
        assert_eq!(names(tree.roots()), ["INBOX", "Sent", "Inbox-copy"]);
        assert_eq!(tree.roots()[0].role(), FolderRole::Inbox);
    }

    #[test]
    fn descendants_are_renamed() {
        let tree = FolderTree::new(vec![node("Work").with_child(
            node("Work/Projects").with_child(node("Work/Projects/Rust")),
        )]);
        let tree = virtualize(tree, &work());
        let all: Vec<_> = tree.iter().map(FolderNode::raw_full_name).collect();
        assert_eq!(all, ["INBOX", "Projects", "Projects/Rust"]);
    }

    #[test]
    fn siblings_of_container_are_hidden() {
        let tree = FolderTree::new(vec![
            node("Archive"),
            node("Work").with_child(node("Work/Sent")),
            node("Personal"),
        ]);
        let tree = virtualize(tree, &work());
        assert_eq!(names(tree.roots()), ["INBOX", "Sent"]);
    }

    #[test]
    fn nested_inbox_moves_to_top() {
        let tree = FolderTree::new(vec![node("Work")
            .with_child(node("Work/Sent"))
            .with_child(node("INBOX").with_child(node("INBOX/Receipts")))]);
        let tree = virtualize(tree, &work());
        assert_eq!(names(tree.roots()), ["INBOX", "Sent"]);
        assert_eq!(names(tree.roots()[0].children()), ["INBOX/Receipts"]);
    }

    #[test]
    fn missing_inbox_is_synthesized() {
        let tree = FolderTree::new(vec![node("Work").with_child(node("Work/Sent"))]);
        let tree = virtualize(tree, &work());
        assert_eq!(names(tree.roots()), ["INBOX", "Sent"]);
        assert_eq!(tree.iter().filter(|n| n.is_inbox()).count(), 1);
    }

    #[test]
    fn missing_container_passes_through() {
        let tree = FolderTree::new(vec![node("INBOX"), node("Sent"), node("Trash")]);
        let tree = virtualize(tree, &work());
        assert_eq!(names(tree.roots()), ["INBOX", "Sent", "Trash"]);
    }

    #[test]
    fn disabled_prefix_keeps_everything() {
        let tree = FolderTree::new(vec![
            node("Sent"),
            node("INBOX"),
            node("Work").with_child(node("Work/Sent")),
        ]);
        let tree = virtualize(tree, &PrefixConfig::disabled('/'));
        assert_eq!(names(tree.roots()), ["INBOX", "Sent", "Work"]);
        assert_eq!(names(tree.roots()[2].children()), ["Work/Sent"]);
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let tree = FolderTree::new(vec![
            node("INBOX"),
            node("Work")
                .with_child(node("Work/Work"))
                .with_child(node("Work/Sent")),
        ]);
        let once = virtualize(tree, &work());
        assert_eq!(names(once.roots()), ["INBOX", "Work", "Sent"]);
        let twice = virtualize(once.clone(), &work());
        assert_eq!(once, twice);
    }

    #[test]
    fn prefixed_inbox_is_hidden() {
        let tree = FolderTree::new(vec![node("Work")
            .with_child(node("Work/INBOX").with_child(node("Work/INBOX/Old")))
            .with_child(node("Work/Sent"))]);
        let tree = virtualize(tree, &work());
        let all: Vec<_> = tree.iter().map(FolderNode::raw_full_name).collect();
        assert_eq!(all, ["INBOX", "Sent"]);
    }

    #[test]
    fn every_shown_folder_maps_back_to_a_real_one() {
        let real = FolderTree::new(vec![
            node("INBOX").with_child(node("INBOX/Receipts")),
            node("Work")
                .with_child(node("Work/INBOX"))
                .with_child(node("Work/Inboxes"))
                .with_child(node("Work/Work").with_child(node("Work/Work/Notes"))),
        ]);
        let config = work();
        let shown = virtualize(real.clone(), &config);

        for folder in shown.iter() {
            let real_path = config.to_real(folder.raw_full_name());
            assert!(real.get(&real_path).is_some(), "{} -> {}", folder, real_path);
        }
        assert_eq!(shown.len(), 5);
    }

    #[test]
    fn partial_flag_survives() {
        let tree = FolderTree::new(vec![node("Work")]).into_partial();
        assert!(virtualize(tree, &work()).is_partial());
    }

    #[test]
    fn multi_level_prefix() {
        let config = PrefixConfig::new("Clients/Acme", '/');
        let tree = FolderTree::from_flat(
            vec![
                node("INBOX"),
                node("Clients/Acme/Sent"),
                node("Clients/Other/Sent"),
            ],
            false,
        );
        let tree = virtualize(tree, &config);
        assert_eq!(names(tree.roots()), ["INBOX", "Sent"]);
    }
}
