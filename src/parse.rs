//! Building folder trees out of raw `LIST` responses.

use crate::error::{ParseError, Result};
use crate::types::{FolderNode, FolderTree, NameAttribute};
use imap_proto::{MailboxDatum, Response};
use tracing::trace;

/// Parse the untagged `LIST` responses in `lines` into a folder tree with real paths.
///
/// `SPECIAL-USE` attributes become role hints, `\Noselect` marks the folder as not selectable
/// and the `LIST-EXTENDED` `\Subscribed` attribute marks it as subscribed. Any other response,
/// such as the tagged completion, is skipped.
pub fn parse_folder_tree(lines: &[u8], partial: bool) -> Result<FolderTree> {
    let mut lines = lines;
    let mut folders = Vec::new();

    while !lines.is_empty() {
        match imap_proto::parser::parse_response(lines) {
            Ok((
                rest,
                Response::MailboxData(MailboxDatum::List {
                    name_attributes,
                    delimiter,
                    name,
                }),
            )) => {
                lines = rest;
                let delimiter = delimiter.and_then(|delimiter| delimiter.chars().next());
                let attributes: Vec<_> = name_attributes
                    .into_iter()
                    .filter_map(NameAttribute::from_proto)
                    .collect();
                folders.push(folder_from_list(&name, delimiter, &attributes));
            }
            Ok((rest, resp)) => {
                lines = rest;
                trace!(?resp, "skipping non-LIST response");
            }
            Err(_) => {
                return Err(ParseError::Invalid(lines.to_vec()).into());
            }
        }
    }

    Ok(FolderTree::from_flat(folders, partial))
}

fn folder_from_list(
    name: &str,
    delimiter: Option<char>,
    attributes: &[NameAttribute<'_>],
) -> FolderNode {
    let mut folder = FolderNode::new(name, delimiter).with_subscribed(false);
    for attribute in attributes {
        match attribute {
            NameAttribute::NoSelect | NameAttribute::NonExistent => folder.selectable = false,
            NameAttribute::Subscribed => folder.subscribed = true,
            NameAttribute::SpecialUse(role) => {
                if folder.special_use.is_none() {
                    folder.special_use = Some(*role);
                }
            }
            _ => {}
        }
    }
    folder
}
