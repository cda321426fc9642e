use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortalError {
    /// Short reason name surfaced in the diagnostics log when an invocation
    /// fails unexpectedly.
    pub fn reason(&self) -> &'static str {
        match self {
            PortalError::PermissionDenied(_) => "PermissionDenied",
            PortalError::InvalidArgument(_) => "InvalidArgument",
            PortalError::OperationFailed(_) => "OperationFailed",
            PortalError::NotFound(_) => "NotFound",
            PortalError::Io(_) => "Io",
        }
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
