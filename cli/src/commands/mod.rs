pub mod compare;
pub mod info;
pub mod suggest;

use thiserror::Error;

/// A problem with how the tool was invoked, as opposed to an internal
/// failure. Mapped to exit code 2.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);
