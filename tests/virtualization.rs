use imap_prefix::testing::{folders, MemoryBackend};
use imap_prefix::{
    path, tree, FolderArgs, FolderCounts, FolderCountsMap, FolderNode, MessageInfo, MessageList,
    PrefixConfig, PrefixLayer,
};

const ACCOUNT: u64 = 42;

const WORK_LIST: &str = "\
* LIST (\\HasNoChildren) \"/\" INBOX\r\n\
* LIST (\\HasChildren) \"/\" Work\r\n\
* LIST (\\HasNoChildren \\Sent) \"/\" Work/Sent\r\n\
* LIST (\\HasNoChildren) \"/\" Work/Inbox-copy\r\n\
A2 OK LIST completed\r\n";

fn top_level(tree: &imap_prefix::FolderTree) -> Vec<&str> {
    tree.roots().iter().map(FolderNode::raw_full_name).collect()
}

fn layer_with(list: &str, prefix: &str) -> PrefixLayer<MemoryBackend> {
    let backend = MemoryBackend::new();
    backend.set_tree(ACCOUNT, folders::parse(list));
    backend.set_prefix(ACCOUNT, prefix);
    PrefixLayer::new(backend)
}

#[test]
fn work_prefix_end_to_end() {
    let real = folders::parse(WORK_LIST);
    let tree = tree::virtualize(real, &PrefixConfig::new("Work", '/'));

    assert_eq!(top_level(&tree), ["INBOX", "Sent", "Inbox-copy"]);
    assert!(tree.get("Work").is_none());
}

#[test]
fn virtualizing_twice_changes_nothing() {
    let config = PrefixConfig::new("Work", '/');
    let once = tree::virtualize(folders::parse(WORK_LIST), &config);
    let twice = tree::virtualize(once.clone(), &config);
    assert_eq!(once, twice);
}

#[test]
fn path_laws() {
    let delimiters = ['/', '.'];
    let prefixes = ["Work", "a", "Clients/Acme"];
    let paths = ["Sent", "Projects", "Sent Items", "Work", "INBOXES", "Inbox"];

    for &d in &delimiters {
        for p in &prefixes {
            for v in &paths {
                assert_eq!(path::to_virtual(&path::to_real(v, p, d), p, d), *v);
                assert_eq!(path::to_real(v, "", d), *v);
                assert_eq!(path::to_virtual(v, "", d), *v);
            }
            assert_eq!(path::to_real("INBOX", p, d), "INBOX");
            assert_eq!(
                path::to_real(&format!("INBOX{}Sub", d), p, d),
                format!("INBOX{}Sub", d)
            );
        }
    }
}

#[test]
fn layer_lists_virtual_folders_with_roles() {
    let layer = layer_with(WORK_LIST, "Work");
    let tree = layer.list_folders(ACCOUNT, false).unwrap();

    assert_eq!(top_level(&tree), ["INBOX", "Sent", "Inbox-copy"]);
    assert_eq!(
        tree.with_role(imap_prefix::FolderRole::Sent)
            .map(FolderNode::raw_full_name),
        Some("Sent")
    );
    assert_eq!(
        tree.with_role(imap_prefix::FolderRole::Inbox)
            .map(FolderNode::raw_full_name),
        Some("INBOX")
    );
}

#[test]
fn layer_without_container_passes_through() {
    let list = "\
* LIST () \"/\" INBOX\r\n\
* LIST () \"/\" Archive\r\n";
    let layer = layer_with(list, "Work");
    let tree = layer.list_folders(ACCOUNT, false).unwrap();
    assert_eq!(top_level(&tree), ["INBOX", "Archive"]);
}

#[test]
fn layer_round_trips_operation_paths() {
    let layer = layer_with(WORK_LIST, "Work");

    let mut args = FolderArgs {
        folder: Some("Inbox-copy".into()),
        to_folder: Some("INBOX".into()),
        folders: vec!["Sent".into()],
        ..FolderArgs::default()
    };
    layer.prepare_arguments(ACCOUNT, &mut args).unwrap();
    assert_eq!(args.folder.as_deref(), Some("Work/Inbox-copy"));
    assert_eq!(args.to_folder.as_deref(), Some("INBOX"));
    assert_eq!(args.folders, ["Work/Sent"]);

    let mut counts = FolderCountsMap::new();
    counts.insert(
        "Work/Inbox-copy".into(),
        FolderCounts {
            total: 4,
            unread: 1,
        },
    );
    counts.insert(
        "INBOX".into(),
        FolderCounts {
            total: 9,
            unread: 9,
        },
    );
    let counts = layer.virtualize_counts(ACCOUNT, counts).unwrap();
    assert_eq!(counts["Inbox-copy"].unread, 1);
    assert_eq!(counts["INBOX"].total, 9);

    let mut list = MessageList {
        folder_name: "Work/Inbox-copy".to_string(),
        messages: vec![MessageInfo {
            uid: 12,
            folder: "Work/Inbox-copy".into(),
            flags: vec![],
        }],
    };
    layer.virtualize_messages(ACCOUNT, &mut list).unwrap();
    assert_eq!(list.folder_name, "Inbox-copy");
    assert_eq!(list.messages[0].folder, "Inbox-copy");
    assert_eq!(list.messages[0].uid, 12);
}

#[test]
fn changing_prefix_changes_the_view() {
    let list = "\
* LIST () \"/\" INBOX\r\n\
* LIST () \"/\" Work\r\n\
* LIST () \"/\" Work/Reports\r\n\
* LIST () \"/\" Home\r\n\
* LIST () \"/\" Home/Recipes\r\n";
    let layer = layer_with(list, "Work");
    let tree = layer.list_folders(ACCOUNT, false).unwrap();
    assert_eq!(top_level(&tree), ["INBOX", "Reports"]);

    layer.update_prefix(ACCOUNT, "Home").unwrap();
    let tree = layer.list_folders(ACCOUNT, false).unwrap();
    assert_eq!(top_level(&tree), ["INBOX", "Recipes"]);

    layer.update_prefix(ACCOUNT, "").unwrap();
    let tree = layer.list_folders(ACCOUNT, false).unwrap();
    assert_eq!(top_level(&tree), ["INBOX", "Work", "Home"]);
}

#[test]
fn shown_folders_resolve_to_listed_folders() {
    let list = "\
* LIST () \"/\" INBOX\r\n\
* LIST () \"/\" Work\r\n\
* LIST () \"/\" Work/INBOX\r\n\
* LIST () \"/\" Work/Sent\r\n";
    let layer = layer_with(list, "Work");
    let real = folders::parse(list);
    let tree = layer.list_folders(ACCOUNT, false).unwrap();

    assert_eq!(top_level(&tree), ["INBOX", "Sent"]);
    for folder in tree.iter() {
        let mut args = FolderArgs {
            folder: Some(folder.raw_full_name().to_string()),
            ..FolderArgs::default()
        };
        layer.prepare_arguments(ACCOUNT, &mut args).unwrap();
        let real_path = args.folder.unwrap();
        assert!(real.get(&real_path).is_some(), "{}", real_path);
    }
}
