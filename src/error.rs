use std::{error::Error as StdError, fmt, io};

/// The descriptor-level operation in the course of which an [`Error`] arose.
///
/// Reported alongside every error so that callers relaying it (to logs, to an embedding runtime)
/// can name the failing syscall without string-matching on messages. [`as_str`](Self::as_str)
/// spells each variant the way the system call is spelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Creation of the pipe, including close-on-exec and non-blocking setup performed as part of
    /// it.
    Pipe,
    /// Retrieval of bytes from the read end.
    Read,
    /// Submission of bytes to the write end.
    Write,
    /// A descriptor mode query or change.
    Fcntl,
    /// Release of a descriptor.
    Close,
}
impl Operation {
    /// Returns the name of the system call this operation corresponds to.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::Read => "read",
            Self::Write => "write",
            Self::Fcntl => "fcntl",
            Self::Close => "close",
        }
    }
}
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error produced by fallible pipe operations.
///
/// Would-block, interruption, partial transfer and end-of-stream conditions are not errors and
/// appear in [`ReadOutcome`](crate::ReadOutcome)/[`WriteOutcome`](crate::WriteOutcome) instead;
/// this type covers argument rejections and genuine OS failures only. No operation retries
/// internally on error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The operation rejected its arguments without consulting the OS: an empty write buffer or
    /// a read length of zero.
    InvalidArgument {
        /// The operation that rejected its argument.
        operation: Operation,
    },
    /// The OS reported a failure.
    Os {
        /// The operation that failed.
        operation: Operation,
        /// The `errno` value observed at the moment of failure.
        code: i32,
    },
}
impl Error {
    pub(crate) const fn invalid_argument(operation: Operation) -> Self {
        Self::InvalidArgument { operation }
    }
    pub(crate) fn os(operation: Operation, e: &io::Error) -> Self {
        Self::Os { operation, code: e.raw_os_error().unwrap_or(0) }
    }
    /// Returns the operation in the course of which the error arose.
    #[inline]
    pub const fn operation(self) -> Operation {
        match self {
            Self::InvalidArgument { operation } | Self::Os { operation, .. } => operation,
        }
    }
    /// Returns the OS error code: the `errno` value for OS failures, `EINVAL` for argument
    /// rejections.
    #[inline]
    pub const fn code(self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => libc::EINVAL,
            Self::Os { code, .. } => code,
        }
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation(), io::Error::from_raw_os_error(self.code()))
    }
}
impl StdError for Error {}

impl From<Error> for io::Error {
    /// Converts to an [`io::Error`] of the [`ErrorKind`](io::ErrorKind) matching the OS error
    /// code, with the original value retained as the inner error.
    fn from(e: Error) -> Self {
        io::Error::new(io::Error::from_raw_os_error(e.code()).kind(), e)
    }
}
