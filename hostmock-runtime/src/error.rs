use thiserror::Error;

/// Errors raised when calling into an installed API object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("nothing is installed under '{namespace}'")]
    NotInstalled { namespace: String },

    #[error("'{name}' is not a member of the installed object")]
    UnknownMember { name: String },

    #[error("'{name}' is a plain value and cannot be called")]
    NotCallable { name: String },
}
