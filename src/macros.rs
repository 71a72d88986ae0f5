macro_rules! ok_or_errno {
    ($success:expr => $($scb:tt)+) => {
        if $success {
            Ok($($scb)+)
        } else {
            Err(::std::io::Error::last_os_error())
        }
    };
}

macro_rules! multimacro {
    ($ty:ty, $($macro:ident $(($($arg:tt)+))?),+ $(,)?) => {$(
        $macro!($ty $(, $($arg)+)?);
    )+};
}

/// Stamps the role-independent part of the endpoint surface onto a wrapper type.
macro_rules! endpoint_ops {
    ($ty:ty) => {
        impl $ty {
            /// Returns the raw file descriptor number, or `-1` if the endpoint has been closed.
            ///
            /// Informational only: the returned value is not a transfer of ownership, and closing
            /// or reconfiguring the descriptor behind the endpoint's back is not supported.
            #[inline]
            pub fn descriptor(&self) -> ::std::os::unix::io::RawFd {
                self.0.descriptor()
            }
            /// Closes the endpoint's file descriptor.
            ///
            /// The endpoint is marked closed before the OS is asked to release the descriptor, so
            /// a second call finds nothing to do and succeeds immediately. If the OS reports a
            /// close failure, that failure is returned, but the descriptor is considered gone
            /// either way and the operation is never retried.
            ///
            /// Endpoints that go out of scope without an explicit close release their descriptor
            /// automatically, discarding any close failure.
            ///
            /// # System calls
            /// - `close`
            #[inline]
            pub fn close(&mut self) -> ::std::result::Result<(), $crate::Error> {
                self.0.close()
            }
            /// Enables or disables non-blocking mode, returning the previous state.
            ///
            /// In non-blocking mode, reads and writes that would have to wait for the other end
            /// come back with a retry outcome instead of blocking. The flag change is skipped
            /// entirely if the descriptor is already in the requested mode.
            ///
            /// # System calls
            /// - `fcntl` with `F_GETFL`
            /// - `fcntl` with `F_SETFL`, only if the mode actually changes
            #[inline]
            pub fn set_nonblocking(
                &self,
                nonblocking: bool,
            ) -> ::std::result::Result<bool, $crate::Error> {
                self.0.set_nonblocking(nonblocking)
            }
            /// Queries whether the endpoint is in non-blocking mode.
            ///
            /// # System calls
            /// - `fcntl` with `F_GETFL`
            #[inline]
            pub fn nonblocking(&self) -> ::std::result::Result<bool, $crate::Error> {
                self.0.nonblocking()
            }
        }
    };
}

macro_rules! endpoint_asraw {
    ($ty:ty) => {
        impl ::std::os::unix::io::AsRawFd for $ty {
            #[inline]
            fn as_raw_fd(&self) -> ::std::os::unix::io::RawFd {
                self.0.descriptor()
            }
        }
    };
}

macro_rules! endpoint_debug {
    ($ty:ty) => {
        impl ::std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($ty)).field("fd", &self.0.descriptor()).finish()
            }
        }
    };
}

macro_rules! endpoint_display {
    ($ty:ty, $tag:literal) => {
        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, concat!($tag, ": {:p}"), self)
            }
        }
    };
}
