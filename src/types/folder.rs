use super::FolderRole;
use crate::path::INBOX;
use std::fmt;

/// One mailbox folder and the folders below it.
///
/// `raw_full_name` is the folder's path as reported by the mail server, using the server's
/// hierarchy delimiter. A node owns its entire subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderNode {
    pub(crate) raw_full_name: String,
    pub(crate) delimiter: Option<char>,
    pub(crate) role: FolderRole,
    pub(crate) special_use: Option<FolderRole>,
    pub(crate) subscribed: bool,
    pub(crate) selectable: bool,
    pub(crate) children: Vec<FolderNode>,
}

impl FolderNode {
    /// Make a new selectable, subscribed folder with no children and no role.
    pub fn new(raw_full_name: impl Into<String>, delimiter: Option<char>) -> Self {
        FolderNode {
            raw_full_name: raw_full_name.into(),
            delimiter,
            role: FolderRole::Custom,
            special_use: None,
            subscribed: true,
            selectable: true,
            children: Vec::new(),
        }
    }

    /// An `INBOX` node tagged with the [`FolderRole::Inbox`] role.
    pub fn inbox(delimiter: Option<char>) -> Self {
        let mut inbox = FolderNode::new(INBOX, delimiter);
        inbox.role = FolderRole::Inbox;
        inbox
    }

    /// A non-selectable stand-in for a parent the server did not list.
    pub(crate) fn placeholder(raw_full_name: impl Into<String>, delimiter: Option<char>) -> Self {
        let mut node = FolderNode::new(raw_full_name, delimiter);
        node.selectable = false;
        node.subscribed = false;
        node
    }

    /// Set the server-reported special-use hint.
    pub fn with_special_use(mut self, role: FolderRole) -> Self {
        self.special_use = Some(role);
        self
    }

    /// Set whether the folder can be selected.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Set whether the folder is subscribed.
    pub fn with_subscribed(mut self, subscribed: bool) -> Self {
        self.subscribed = subscribed;
        self
    }

    /// Append a child folder.
    pub fn with_child(mut self, child: FolderNode) -> Self {
        self.children.push(child);
        self
    }

    /// The full path of this folder.
    pub fn raw_full_name(&self) -> &str {
        &self.raw_full_name
    }

    /// The last hierarchy level of the full path.
    pub fn name(&self) -> &str {
        match self.delimiter {
            Some(delimiter) => self
                .raw_full_name
                .rsplit(delimiter)
                .next()
                .unwrap_or(&self.raw_full_name),
            None => &self.raw_full_name,
        }
    }

    /// The hierarchy delimiter reported by the server, `None` for a flat name.
    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    /// Replace the full path of this folder. Children are left untouched.
    pub fn rename(&mut self, raw_full_name: impl Into<String>) {
        self.raw_full_name = raw_full_name.into();
    }

    /// The system role currently assigned to this folder.
    pub fn role(&self) -> FolderRole {
        self.role
    }

    /// Assign a role to this folder.
    pub fn set_role(&mut self, role: FolderRole) {
        self.role = role;
    }

    /// The role hinted at by the server through a special-use attribute, if any.
    pub fn special_use(&self) -> Option<FolderRole> {
        self.special_use
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn children(&self) -> &[FolderNode] {
        &self.children
    }

    /// Whether this is the literal `INBOX` folder.
    pub fn is_inbox(&self) -> bool {
        self.raw_full_name == INBOX
    }
}

impl fmt::Display for FolderNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_full_name)
    }
}

/// Pre-order iterator over a forest of folders.
pub struct Iter<'a> {
    stack: Vec<&'a FolderNode>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(nodes: &'a [FolderNode]) -> Self {
        Iter {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a FolderNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Visit every node of `nodes` and their descendants, parents before children.
pub(crate) fn walk_mut<F>(nodes: &mut [FolderNode], f: &mut F)
where
    F: FnMut(&mut FolderNode),
{
    for node in nodes {
        f(node);
        walk_mut(&mut node.children, f);
    }
}

pub(crate) fn find_mut<'a>(nodes: &'a mut [FolderNode], name: &str) -> Option<&'a mut FolderNode> {
    for node in nodes {
        if node.raw_full_name == name {
            return Some(node);
        }
        if let Some(found) = find_mut(&mut node.children, name) {
            return Some(found);
        }
    }
    None
}

/// Detach the first node named `name`, searching depth-first.
pub(crate) fn take(nodes: &mut Vec<FolderNode>, name: &str) -> Option<FolderNode> {
    if let Some(pos) = nodes.iter().position(|node| node.raw_full_name == name) {
        return Some(nodes.remove(pos));
    }
    nodes
        .iter_mut()
        .find_map(|node| take(&mut node.children, name))
}

/// A snapshot of an account's folders, as a forest of top-level folders.
///
/// A *partial* snapshot comes from a filtered or paginated listing and cannot be used to
/// conclude that a folder does not exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderTree {
    pub(crate) roots: Vec<FolderNode>,
    pub(crate) partial: bool,
    pub(crate) virtualized: Option<String>,
}

impl FolderTree {
    /// Make a complete snapshot out of the given top-level folders.
    pub fn new(roots: Vec<FolderNode>) -> Self {
        FolderTree {
            roots,
            partial: false,
            virtualized: None,
        }
    }

    /// Flag this snapshot as partial.
    pub fn into_partial(mut self) -> Self {
        self.partial = true;
        self
    }

    /// Build a tree out of folders listed in arbitrary order, nesting each one below its parent
    /// according to its delimiter. Siblings keep the order in which they were listed, and
    /// parents that were not listed are synthesized as non-selectable folders.
    pub fn from_flat(folders: Vec<FolderNode>, partial: bool) -> Self {
        let mut folders = folders;
        folders.sort_by_key(depth);
        let mut tree = FolderTree {
            roots: Vec::new(),
            partial,
            virtualized: None,
        };
        for folder in folders {
            tree.attach(folder);
        }
        tree
    }

    /// Insert a folder below its parent, creating missing parents as needed. A folder that is
    /// already present is replaced, keeping its children.
    pub fn attach(&mut self, folder: FolderNode) {
        if let Some(existing) = find_mut(&mut self.roots, &folder.raw_full_name) {
            let children = std::mem::take(&mut existing.children);
            *existing = folder;
            existing.children.extend(children);
            return;
        }

        let parent = folder
            .delimiter
            .and_then(|delimiter| folder.raw_full_name.rsplit_once(delimiter))
            .map(|(parent, _)| parent.to_string())
            .filter(|parent| !parent.is_empty());

        match parent {
            None => self.roots.push(folder),
            Some(parent) => {
                if find_mut(&mut self.roots, &parent).is_none() {
                    self.attach(FolderNode::placeholder(parent.clone(), folder.delimiter));
                }
                match find_mut(&mut self.roots, &parent) {
                    Some(parent) => parent.children.push(folder),
                    None => self.roots.push(folder),
                }
            }
        }
    }

    /// The top-level folders.
    pub fn roots(&self) -> &[FolderNode] {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut Vec<FolderNode> {
        &mut self.roots
    }

    /// Whether this snapshot comes from a filtered or paginated listing.
    pub fn is_partial(&self) -> bool {
        self.partial
    }

    /// Iterate over every folder, parents before children.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.roots)
    }

    /// Find a folder anywhere in the tree by its full path.
    pub fn get(&self, raw_full_name: &str) -> Option<&FolderNode> {
        self.iter()
            .find(|node| node.raw_full_name == raw_full_name)
    }

    /// The folder holding `role`, if any.
    pub fn with_role(&self, role: FolderRole) -> Option<&FolderNode> {
        self.iter().find(|node| node.role == role)
    }

    /// Number of folders in the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl<'a> IntoIterator for &'a FolderTree {
    type Item = &'a FolderNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn depth(folder: &FolderNode) -> usize {
    match folder.delimiter {
        Some(delimiter) => folder.raw_full_name.matches(delimiter).count(),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str) -> FolderNode {
        FolderNode::new(name, Some('/'))
    }

    #[test]
    fn nests_children_listed_before_parents() {
        let tree = FolderTree::from_flat(
            vec![node("Work/Sent"), node("INBOX"), node("Work"), node("Work/Drafts")],
            false,
        );
        let roots: Vec<_> = tree.roots().iter().map(FolderNode::raw_full_name).collect();
        assert_eq!(roots, ["INBOX", "Work"]);
        let work: Vec<_> = tree.roots()[1]
            .children()
            .iter()
            .map(FolderNode::raw_full_name)
            .collect();
        assert_eq!(work, ["Work/Sent", "Work/Drafts"]);
    }

    #[test]
    fn synthesizes_missing_parents() {
        let tree = FolderTree::from_flat(vec![node("Work/Projects/Rust")], false);
        let work = tree.get("Work").unwrap();
        assert!(!work.is_selectable());
        let projects = tree.get("Work/Projects").unwrap();
        assert!(!projects.is_selectable());
        assert!(tree.get("Work/Projects/Rust").unwrap().is_selectable());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn attach_replaces_existing_and_keeps_children() {
        let mut tree = FolderTree::from_flat(vec![node("Work/Sent")], false);
        tree.attach(node("Work").with_subscribed(true));
        let work = tree.get("Work").unwrap();
        assert!(work.is_selectable());
        assert_eq!(work.children().len(), 1);
    }

    #[test]
    fn iterates_pre_order() {
        let tree = FolderTree::new(vec![
            node("A").with_child(node("A/B").with_child(node("A/B/C"))),
            node("D"),
        ]);
        let names: Vec<_> = tree.iter().map(FolderNode::raw_full_name).collect();
        assert_eq!(names, ["A", "A/B", "A/B/C", "D"]);
    }

    #[test]
    fn name_is_last_level() {
        assert_eq!(node("Work/Projects/Rust").name(), "Rust");
        assert_eq!(FolderNode::new("Work.Sent", None).name(), "Work.Sent");
    }

    #[test]
    fn take_detaches_nested_node() {
        let mut roots = vec![node("A").with_child(node("A/B")), node("C")];
        let taken = take(&mut roots, "A/B").unwrap();
        assert_eq!(taken.raw_full_name(), "A/B");
        assert!(roots[0].children().is_empty());
        assert!(take(&mut roots, "Z").is_none());
    }
}
