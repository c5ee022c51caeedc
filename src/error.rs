//! Error types for CMD image encoding

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while building or writing a CMD image.
#[derive(Debug, Error)]
pub enum CmdError {
    /// The input binary could not be opened for reading.
    #[error("couldn't open input file '{}': {source}", path.display())]
    InputOpen {
        /// Path of the input binary.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Reading the input binary failed after it was opened.
    #[error("couldn't read input file '{}': {source}", path.display())]
    InputRead {
        /// Path of the input binary.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// The output file could not be created.
    #[error("couldn't create output file '{}': {source}", path.display())]
    OutputOpen {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Writing the image failed after the output was created.
    #[error("couldn't write output file '{}': {source}", path.display())]
    OutputWrite {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// A read from a caller-supplied stream failed.
    ///
    /// Callers that know which file backs the stream re-tag this as
    /// [`CmdError::InputRead`] so the diagnostic names it.
    #[error("couldn't read input data: {0}")]
    Read(#[source] io::Error),

    /// A write to a caller-supplied stream failed.
    ///
    /// Callers that know which file backs the stream re-tag this as
    /// [`CmdError::OutputWrite`] so the diagnostic names it.
    #[error("couldn't write image data: {0}")]
    Write(#[source] io::Error),

    /// A load block was handed a payload outside the 1-256 byte range.
    #[error("load block payload of {len} bytes is outside the 1-256 range")]
    InvalidBlockLen {
        /// Offending payload length.
        len: usize,
    },
}

impl CmdError {
    /// Create an input-open error for the given path.
    pub fn input_open(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::InputOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an input-read error for the given path.
    pub fn input_read(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::InputRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an output-open error for the given path.
    pub fn output_open(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::OutputOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an output-write error for the given path.
    pub fn output_write(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::OutputWrite {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Convenience alias for results of CMD encoding operations.
pub type Result<T> = std::result::Result<T, CmdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_errors_name_the_path() {
        let err = CmdError::input_open("game.bin", io::Error::other("no such file"));
        assert!(err.to_string().contains("game.bin"));
        assert!(err.to_string().contains("no such file"));

        let err = CmdError::output_open("game.cmd", io::Error::other("read-only"));
        assert!(err.to_string().contains("game.cmd"));
    }

    #[test]
    fn test_stream_errors_name_the_path() {
        let err = CmdError::input_read("game.bin", io::Error::other("unplugged"));
        assert!(err.to_string().contains("couldn't read input file"));
        assert!(err.to_string().contains("game.bin"));

        let err = CmdError::output_write("game.cmd", io::Error::other("no space"));
        assert!(err.to_string().contains("couldn't write output file"));
        assert!(err.to_string().contains("game.cmd"));
    }

    #[test]
    fn test_untagged_stream_errors_keep_the_os_reason() {
        let err = CmdError::Read(io::Error::other("pipe closed"));
        assert_eq!(err.to_string(), "couldn't read input data: pipe closed");

        let err = CmdError::Write(io::Error::other("pipe closed"));
        assert_eq!(err.to_string(), "couldn't write image data: pipe closed");
    }
}
