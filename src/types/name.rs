use super::FolderRole;
use std::borrow::Cow;

/// An attribute set for a folder in a `LIST` response.
///
/// `imap-proto` reports the base and `SPECIAL-USE` attributes itself; the XLIST and
/// `LIST-EXTENDED` ones arrive as extensions and are recognized by name, case-insensitively.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum NameAttribute<'a> {
    /// It is not possible for any child levels of hierarchy to exist
    /// under this name; no child levels exist now and none can be
    /// created in the future.
    NoInferiors,

    /// It is not possible to use this name as a selectable mailbox.
    NoSelect,

    /// The folder does not exist, but is listed because it has subscribed children.
    NonExistent,

    /// The mailbox has been marked "interesting" by the server.
    Marked,

    /// The mailbox does not contain any additional messages since the
    /// last time the mailbox was selected.
    Unmarked,

    /// The folder is subscribed.
    Subscribed,

    /// A `SPECIAL-USE` ([RFC 6154](https://tools.ietf.org/html/rfc6154)) or `XLIST` attribute
    /// hinting at the role the folder plays.
    SpecialUse(FolderRole),

    /// A non-standard user- or server-defined name attribute.
    Custom(Cow<'a, str>),
}

impl<'a> NameAttribute<'a> {
    fn system(s: &str) -> Option<Self> {
        let name = s.strip_prefix('\\').unwrap_or(s);
        let attribute = match name.to_ascii_lowercase().as_str() {
            "noinferiors" => NameAttribute::NoInferiors,
            "noselect" => NameAttribute::NoSelect,
            "nonexistent" => NameAttribute::NonExistent,
            "marked" => NameAttribute::Marked,
            "unmarked" => NameAttribute::Unmarked,
            "subscribed" => NameAttribute::Subscribed,
            _ => NameAttribute::SpecialUse(FolderRole::from_special_use(name)?),
        };
        Some(attribute)
    }

    /// Convert an attribute parsed by `imap-proto`. Attributes without meaning here are dropped.
    pub(crate) fn from_proto(attribute: imap_proto::NameAttribute<'a>) -> Option<Self> {
        use imap_proto::NameAttribute as Proto;

        let attribute = match attribute {
            Proto::NoInferiors => NameAttribute::NoInferiors,
            Proto::NoSelect => NameAttribute::NoSelect,
            Proto::Marked => NameAttribute::Marked,
            Proto::Unmarked => NameAttribute::Unmarked,
            Proto::All => NameAttribute::SpecialUse(FolderRole::All),
            Proto::Drafts => NameAttribute::SpecialUse(FolderRole::Drafts),
            Proto::Junk => NameAttribute::SpecialUse(FolderRole::Spam),
            Proto::Sent => NameAttribute::SpecialUse(FolderRole::Sent),
            Proto::Trash => NameAttribute::SpecialUse(FolderRole::Trash),
            Proto::Extension(name) => NameAttribute::from(name),
            _ => return None,
        };
        Some(attribute)
    }

    /// The role hinted at by this attribute, if any.
    pub fn special_use(&self) -> Option<FolderRole> {
        match self {
            NameAttribute::SpecialUse(role) => Some(*role),
            _ => None,
        }
    }
}

impl<'a> From<Cow<'a, str>> for NameAttribute<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        if let Some(f) = NameAttribute::system(&s) {
            f
        } else {
            NameAttribute::Custom(s)
        }
    }
}

impl<'a> From<&'a str> for NameAttribute<'a> {
    fn from(s: &'a str) -> Self {
        NameAttribute::from(Cow::Borrowed(s))
    }
}
