use thiserror::Error;

/// Misuse detected by the registry. The engine logs these and carries on;
/// none of them reach the host as a failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FocusError {
    #[error("scope '{0}' is not registered")]
    UnknownScope(String),
    #[error("item '{id}' is already registered in scope '{scope}'")]
    DuplicateItem { scope: String, id: String },
    #[error("item '{id}' is not registered in scope '{scope}'")]
    UnknownItem { scope: String, id: String },
}
