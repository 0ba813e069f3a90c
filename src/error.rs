//! Error types for the tail library.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a path is rejected before a tail session is started.
///
/// Checks run in a fixed order (existence, readability, not-a-directory,
/// regular file) and only the first violated condition is reported.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("File '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("File '{}' not readable", .path.display())]
    NotReadable { path: PathBuf },

    #[error("File '{}' is a directory", .path.display())]
    IsDirectory { path: PathBuf },

    /// Pipes, sockets and devices cannot be scanned backwards.
    #[error("File '{}' is not a regular file", .path.display())]
    NotRegularFile { path: PathBuf },
}

impl ValidationError {
    /// The path that failed validation.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ValidationError::NotFound { path }
            | ValidationError::NotReadable { path }
            | ValidationError::IsDirectory { path }
            | ValidationError::NotRegularFile { path } => path,
        }
    }
}

/// The main error type for tail operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors when reading the followed file or writing to a sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding errors when turning a line into text.
    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The path cannot be followed.
    #[error("Invalid file path: {0}")]
    Validation(#[from] ValidationError),

    /// The receiving side of a channel sink has been dropped.
    #[error("Stream closed")]
    StreamClosed,
}

/// A convenient Result type for tail operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();

        match error {
            Error::Io(_) => {}
            _ => panic!("Expected Error::Io variant"),
        }

        assert!(error.to_string().contains("I/O error"));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_utf8_error_conversion() {
        let utf8_error = String::from_utf8(vec![0, 159, 146, 150]).unwrap_err();
        let error: Error = utf8_error.into();

        match error {
            Error::Utf8(_) => {}
            _ => panic!("Expected Error::Utf8 variant"),
        }

        assert!(error.to_string().contains("UTF-8 decoding error"));
    }

    #[test]
    fn test_validation_messages_name_path_and_condition() {
        let path = PathBuf::from("/var/log/app.log");

        let error = ValidationError::NotFound { path: path.clone() };
        assert_eq!(error.to_string(), "File '/var/log/app.log' does not exist");

        let error = ValidationError::NotReadable { path: path.clone() };
        assert_eq!(error.to_string(), "File '/var/log/app.log' not readable");

        let error = ValidationError::IsDirectory { path: path.clone() };
        assert_eq!(error.to_string(), "File '/var/log/app.log' is a directory");

        let error = ValidationError::NotRegularFile { path: path.clone() };
        assert_eq!(
            error.to_string(),
            "File '/var/log/app.log' is not a regular file"
        );
        assert_eq!(error.path(), path.as_path());
    }

    #[test]
    fn test_validation_error_conversion() {
        let error: Error = ValidationError::IsDirectory {
            path: PathBuf::from("/tmp"),
        }
        .into();

        match &error {
            Error::Validation(ValidationError::IsDirectory { .. }) => {}
            _ => panic!("Expected Error::Validation variant"),
        }
        assert_eq!(
            error.to_string(),
            "Invalid file path: File '/tmp' is a directory"
        );
    }

    #[test]
    fn test_stream_closed_error() {
        let error = Error::StreamClosed;
        assert_eq!(error.to_string(), "Stream closed");
        assert_eq!(format!("{:?}", error), "StreamClosed");
    }

    #[test]
    fn test_error_chain_with_io_error() {
        let io_error = IoError::new(ErrorKind::PermissionDenied, "Access denied");
        let error: Error = io_error.into();

        match &error {
            Error::Io(inner) => {
                assert_eq!(inner.kind(), ErrorKind::PermissionDenied);
                assert_eq!(inner.to_string(), "Access denied");
            }
            _ => panic!("Expected Error::Io variant"),
        }
    }

    #[test]
    fn test_error_send_sync_traits() {
        // Errors cross task boundaries through the stream channel.
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
