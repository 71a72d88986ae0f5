/// What a read attempt came back with.
///
/// A read has three non-error conclusions, and conflating them loses information callers need:
/// an empty result in non-blocking mode means "nothing yet", while an empty result from a pipe
/// whose write end is gone means "nothing ever again". Each gets its own variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The bytes that were read, in order, exactly as many as the OS delivered.
    Data(Vec<u8>),
    /// Nothing was read because the operation would have had to wait, or was interrupted by a
    /// signal before any data arrived. Try again later.
    Retry,
    /// The write end has been closed and the pipe buffer is drained; no further data will ever
    /// arrive.
    EndOfStream,
}
impl ReadOutcome {
    /// Returns the bytes if any were read.
    #[inline]
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            Self::Data(bytes) => Some(bytes),
            Self::Retry | Self::EndOfStream => None,
        }
    }
    /// Whether the read needs to be reattempted later.
    #[inline]
    pub const fn is_retry(&self) -> bool {
        matches!(self, Self::Retry)
    }
    /// Whether the pipe is permanently out of data.
    #[inline]
    pub const fn is_end_of_stream(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// What a write attempt came back with.
///
/// A single underlying attempt is made per call. Short writes are surfaced rather than looped
/// on, which keeps backpressure decisions with the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The entire buffer was written. Carries the byte count for convenience.
    Complete(usize),
    /// Only this many bytes from the front of the buffer were written. The rest must be
    /// resubmitted.
    Partial(usize),
    /// Nothing was written because the operation would have had to wait, or was interrupted by a
    /// signal before any bytes were consumed. Try again later.
    Retry,
}
impl WriteOutcome {
    /// Returns how many bytes were actually consumed, which is zero for [`Retry`](Self::Retry).
    #[inline]
    pub const fn bytes_written(&self) -> usize {
        match self {
            Self::Complete(n) | Self::Partial(n) => *n,
            Self::Retry => 0,
        }
    }
    /// Whether the write needs to be reattempted later.
    #[inline]
    pub const fn is_retry(&self) -> bool {
        matches!(self, Self::Retry)
    }
    /// Whether the entire buffer was consumed.
    #[inline]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(..))
    }
}
