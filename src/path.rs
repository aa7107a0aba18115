//! Mapping between *virtual* folder paths, as the user sees them, and *real* folder paths, as
//! the mail server stores them below the account's prefix.
//!
//! `INBOX` is exempt from virtualization: it is a protocol-mandated name that many servers
//! special-case, so it and everything below it keep their real path.
//!
//! ```
//! use imap_prefix::path::{to_real, to_virtual};
//!
//! assert_eq!(to_real("Projects/Rust", "Work", '/'), "Work/Projects/Rust");
//! assert_eq!(to_virtual("Work/Projects/Rust", "Work", '/'), "Projects/Rust");
//! assert_eq!(to_real("INBOX/Receipts", "Work", '/'), "INBOX/Receipts");
//! ```

/// The reserved name of the inbox. Case-sensitive.
pub const INBOX: &str = "INBOX";

/// Whether `path` is `INBOX` or lies below it.
pub fn is_inbox(path: &str, delimiter: char) -> bool {
    match path.strip_prefix(INBOX) {
        Some(rest) => rest.is_empty() || rest.starts_with(delimiter),
        None => false,
    }
}

/// Translate a virtual path into the real path on the server.
///
/// An empty `prefix` disables virtualization. An empty `path` denotes the namespace root and
/// maps to the prefix container itself.
pub fn to_real(path: &str, prefix: &str, delimiter: char) -> String {
    if prefix.is_empty() || is_inbox(path, delimiter) {
        return path.to_string();
    }
    if path.is_empty() {
        return prefix.to_string();
    }
    format!("{}{}{}", prefix, delimiter, path)
}

/// Translate a real path into the path presented to the user.
///
/// Paths outside the prefix, such as shared or public folders, are returned unchanged. The
/// translation is idempotent as long as no virtual path itself starts with the prefix.
pub fn to_virtual(path: &str, prefix: &str, delimiter: char) -> String {
    strip(path, prefix, delimiter).unwrap_or(path).to_string()
}

/// The part of `path` after `prefix` and `delimiter`, or `None` when `path` is not below the
/// prefix.
pub(crate) fn strip<'a>(path: &'a str, prefix: &str, delimiter: char) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    path.strip_prefix(prefix)?.strip_prefix(delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIXES: &[&str] = &["Work", "Clients/Acme", "x"];
    const PATHS: &[&str] = &["Sent", "Projects/Rust", "Work", "Inboxes", "INBOXES", "a/b/c"];

    #[test]
    fn round_trip() {
        for prefix in PREFIXES {
            for path in PATHS {
                let real = to_real(path, prefix, '/');
                assert_eq!(to_virtual(&real, prefix, '/'), *path, "prefix {}", prefix);
            }
        }
    }

    #[test]
    fn empty_prefix_is_identity() {
        for path in PATHS.iter().chain(&["INBOX", "", "Work/Sent"]) {
            assert_eq!(to_real(path, "", '/'), *path);
            assert_eq!(to_virtual(path, "", '/'), *path);
        }
    }

    #[test]
    fn inbox_is_exempt() {
        assert_eq!(to_real("INBOX", "Work", '/'), "INBOX");
        assert_eq!(to_real("INBOX/Sub", "Work", '/'), "INBOX/Sub");
        assert_eq!(to_real("INBOX.Sub", "Work", '.'), "INBOX.Sub");
        assert_eq!(to_real("INBOXES", "Work", '/'), "Work/INBOXES");
        assert_eq!(to_real("Inbox", "Work", '/'), "Work/Inbox");
    }

    #[test]
    fn empty_path_is_container() {
        assert_eq!(to_real("", "Work", '/'), "Work");
    }

    #[test]
    fn paths_outside_prefix_are_kept() {
        assert_eq!(to_virtual("Shared/Team", "Work", '/'), "Shared/Team");
        assert_eq!(to_virtual("Workshop/Notes", "Work", '/'), "Workshop/Notes");
        assert_eq!(to_virtual("Work", "Work", '/'), "Work");
        assert_eq!(to_virtual("INBOX", "Work", '/'), "INBOX");
    }

    #[test]
    fn to_virtual_is_idempotent() {
        let once = to_virtual("Work/Sent", "Work", '/');
        assert_eq!(to_virtual(&once, "Work", '/'), once);
    }

    #[test]
    fn other_delimiters() {
        assert_eq!(to_real("Sent", "Work", '.'), "Work.Sent");
        assert_eq!(to_virtual("Work.Sent", "Work", '.'), "Sent");
        assert_eq!(to_virtual("Work/Sent", "Work", '.'), "Work/Sent");
    }
}
