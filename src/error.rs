//! IMAP prefix error types.

use std::result;

use thiserror::Error;

/// A convenience wrapper around `Result` for `imap_prefix::Error`.
pub type Result<T> = result::Result<T, Error>;

/// A set of errors that can occur while virtualizing an account's folders.
///
/// Only the collaborator-facing operations produce these. Path mapping, tree rewriting and
/// result rewriting never fail.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The folder tree could not be fetched from the mail server.
    #[error("cannot fetch folder tree: {0}")]
    Fetch(String),
    /// A persisted setting or system folder assignment could not be read or written.
    #[error("storage failure: {0}")]
    Storage(String),
    /// The mail server refused to create a folder.
    #[error("cannot create folder {path}: {reason}")]
    Create {
        /// Real path of the folder that was being created.
        path: String,
        /// Reason reported by the folder creator.
        reason: String,
    },
    /// Error parsing a server response.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Error validating input data.
    #[error(transparent)]
    Validate(#[from] ValidateError),
}

/// An error occured while trying to parse a server response.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The response could not be parsed as a sequence of IMAP responses.
    #[error("unable to parse LIST response: {}", String::from_utf8_lossy(.0))]
    Invalid(Vec<u8>),
}

/// An invalid character was found in a folder prefix.
#[derive(Debug, Error)]
#[error("invalid character in prefix: {0:?}")]
pub struct ValidateError(pub char);
