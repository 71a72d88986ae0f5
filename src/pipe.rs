use crate::{c_wrappers, Error, Operation, ReadOutcome, WriteOutcome};
use std::{
    io,
    os::unix::io::{AsFd, AsRawFd, BorrowedFd, OwnedFd, RawFd},
};

/// How many bytes [`Reader::read`] asks the OS for. [`Reader::read_up_to`] takes the bound as an
/// argument instead.
pub const DEFAULT_READ_LEN: usize = 4096;

/// Creates a unidirectional anonymous pipe, returning handles to its reading and writing ends.
///
/// Both descriptors are marked close-on-exec, whatever the value of `nonblocking`. With
/// `nonblocking` set, both ends start out in non-blocking mode; the mode can be changed later on
/// each end independently via
/// [`set_nonblocking`](Reader::set_nonblocking). The two handles are independently owned and can
/// be moved to different threads.
///
/// Every failure of this function reports [`Operation::Pipe`], including failures of descriptor
/// setup that happen after the pipe itself came into existence; the descriptors of a
/// half-configured pipe are released before the error is returned, never handed out.
///
/// # System calls
/// - `pipe2` with `O_CLOEXEC` (and `O_NONBLOCK` as requested), on targets that have it
/// - `pipe` followed by `fcntl` setup of both descriptors, elsewhere
///
/// # Examples
/// ## Threaded transfer
/// ```no_run
#[doc = doctest_file::include_doctest!("demos/threaded/main.rs")]
/// ```
pub fn pipe(nonblocking: bool) -> Result<(Reader, Writer), Error> {
    let (r, w) =
        c_wrappers::pipe_pair(nonblocking).map_err(|e| Error::os(Operation::Pipe, &e))?;
    Ok((Reader(PipeFd::new(r)), Writer(PipeFd::new(w))))
}

fn is_transient(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted)
}

/// The descriptor slot both endpoint types wrap: an open descriptor or the closed sentinel.
struct PipeFd(Option<OwnedFd>);
impl PipeFd {
    const fn new(fd: OwnedFd) -> Self {
        Self(Some(fd))
    }
    fn borrow(&self, operation: Operation) -> Result<BorrowedFd<'_>, Error> {
        match &self.0 {
            Some(fd) => Ok(fd.as_fd()),
            // The OS never sees closed-endpoint operations, so the EBADF it would have produced
            // is filled in here.
            None => Err(Error::Os { operation, code: libc::EBADF }),
        }
    }
    fn descriptor(&self) -> RawFd {
        match &self.0 {
            Some(fd) => fd.as_raw_fd(),
            None => -1,
        }
    }
    fn close(&mut self) -> Result<(), Error> {
        let Some(fd) = self.0.take() else {
            return Ok(());
        };
        // The slot is already empty here: the endpoint reads as closed even if the OS reports a
        // failure below, and no second attempt is ever made.
        c_wrappers::close_fd(fd).map_err(|e| Error::os(Operation::Close, &e))
    }
    fn set_nonblocking(&self, nonblocking: bool) -> Result<bool, Error> {
        c_wrappers::set_nonblocking(self.borrow(Operation::Fcntl)?, nonblocking)
            .map_err(|e| Error::os(Operation::Fcntl, &e))
    }
    fn nonblocking(&self) -> Result<bool, Error> {
        c_wrappers::get_nonblocking(self.borrow(Operation::Fcntl)?)
            .map_err(|e| Error::os(Operation::Fcntl, &e))
    }
    fn read(&self, max_len: usize) -> Result<ReadOutcome, Error> {
        if max_len == 0 {
            return Err(Error::invalid_argument(Operation::Read));
        }
        let fd = self.borrow(Operation::Read)?;
        let mut buf = vec![0; max_len];
        match c_wrappers::read_fd(fd, &mut buf) {
            Ok(0) => Ok(ReadOutcome::EndOfStream),
            Ok(n) => {
                buf.truncate(n);
                Ok(ReadOutcome::Data(buf))
            }
            Err(e) if is_transient(&e) => Ok(ReadOutcome::Retry),
            Err(e) => Err(Error::os(Operation::Read, &e)),
        }
    }
    fn write(&self, data: &[u8]) -> Result<WriteOutcome, Error> {
        if data.is_empty() {
            return Err(Error::invalid_argument(Operation::Write));
        }
        let fd = self.borrow(Operation::Write)?;
        match c_wrappers::write_fd(fd, data) {
            Ok(n) if n == data.len() => Ok(WriteOutcome::Complete(n)),
            Ok(n) => Ok(WriteOutcome::Partial(n)),
            Err(e) if is_transient(&e) => Ok(WriteOutcome::Retry),
            Err(e) => Err(Error::os(Operation::Write, &e)),
        }
    }
}

/// Handle to the reading end of an anonymous pipe, created by [`pipe()`] together with the
/// [writing end](Writer).
///
/// Owns its descriptor exclusively; there is no way to duplicate an endpoint or to adopt a
/// foreign descriptor into one. Going out of scope without an explicit [`close`](Self::close)
/// releases the descriptor all the same.
pub struct Reader(PipeFd);
impl Reader {
    /// Reads up to [`DEFAULT_READ_LEN`] bytes from the pipe.
    ///
    /// Same as [`read_up_to`](Self::read_up_to) with that bound.
    #[inline]
    pub fn read(&self) -> Result<ReadOutcome, Error> {
        self.0.read(DEFAULT_READ_LEN)
    }
    /// Reads up to `max_len` bytes from the pipe, in a single underlying attempt.
    ///
    /// The outcome distinguishes delivered [`Data`](ReadOutcome::Data), a transient
    /// [`Retry`](ReadOutcome::Retry) condition (would block, or interrupted by a signal), and
    /// [`EndOfStream`](ReadOutcome::EndOfStream) once the writing end is closed and the pipe is
    /// drained. Delivered data is exactly as long as what the OS returned, which may be anything
    /// from one byte up to `max_len`.
    ///
    /// `max_len` of zero is rejected with [`Error::InvalidArgument`] before the OS is consulted.
    ///
    /// # System calls
    /// - `read`
    pub fn read_up_to(&self, max_len: usize) -> Result<ReadOutcome, Error> {
        self.0.read(max_len)
    }
}
multimacro! {
    Reader,
    endpoint_ops,
    endpoint_asraw,
    endpoint_debug,
    endpoint_display("anonpipe.reader"),
}

/// Handle to the writing end of an anonymous pipe, created by [`pipe()`] together with the
/// [reading end](Reader).
///
/// Owns its descriptor exclusively; there is no way to duplicate an endpoint or to adopt a
/// foreign descriptor into one. Going out of scope without an explicit [`close`](Self::close)
/// releases the descriptor all the same.
pub struct Writer(PipeFd);
impl Writer {
    /// Writes the buffer to the pipe, in a single underlying attempt.
    ///
    /// The outcome distinguishes a [`Complete`](WriteOutcome::Complete) transfer, a
    /// [`Partial`](WriteOutcome::Partial) one whose remainder must be resubmitted by the caller,
    /// and a transient [`Retry`](WriteOutcome::Retry) condition (would block, or interrupted by
    /// a signal before anything was consumed). There is no internal retry loop.
    ///
    /// An empty buffer is rejected with [`Error::InvalidArgument`] before the OS is consulted.
    /// Writing to a pipe whose reading end no longer exists fails with `EPIPE`; Rust programs
    /// leave `SIGPIPE` ignored, so that failure arrives as an error value, not a signal.
    ///
    /// # System calls
    /// - `write`
    pub fn write(&self, data: &[u8]) -> Result<WriteOutcome, Error> {
        self.0.write(data)
    }
}
multimacro! {
    Writer,
    endpoint_ops,
    endpoint_asraw,
    endpoint_debug,
    endpoint_display("anonpipe.writer"),
}
