use libc::c_int;
#[cfg(not(anonpipe_pipe2))]
use std::os::unix::io::AsFd;
use std::{
    ffi::c_void,
    io,
    os::unix::io::{AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd},
    ptr,
};

/// Creates a pipe with both ends marked close-on-exec, in non-blocking mode if requested.
///
/// Returns the read end first. If any of the descriptor setup on the fallback path fails, both
/// freshly made descriptors are released before the error is returned.
pub(crate) fn pipe_pair(nonblocking: bool) -> io::Result<(OwnedFd, OwnedFd)> {
    #[cfg(anonpipe_pipe2)]
    {
        let mut flags = libc::O_CLOEXEC;
        if nonblocking {
            flags |= libc::O_NONBLOCK;
        }
        let (success, fds) = unsafe {
            let mut fds: [c_int; 2] = [0; 2];
            let result = libc::pipe2(fds.as_mut_ptr(), flags);
            (result == 0, fds)
        };
        if success {
            let [rfd, wfd] = fds;
            let (r, w) = unsafe {
                // SAFETY: we just created both of those file descriptors, which means that
                // neither of them can be in use elsewhere.
                (OwnedFd::from_raw_fd(rfd), OwnedFd::from_raw_fd(wfd))
            };
            Ok((r, w))
        } else {
            Err(io::Error::last_os_error())
        }
    }
    #[cfg(not(anonpipe_pipe2))]
    {
        let (success, fds) = unsafe {
            let mut fds: [c_int; 2] = [0; 2];
            let result = libc::pipe(fds.as_mut_ptr());
            (result == 0, fds)
        };
        if !success {
            return Err(io::Error::last_os_error());
        }
        let [rfd, wfd] = fds;
        let (r, w) = unsafe {
            // SAFETY: same as above.
            (OwnedFd::from_raw_fd(rfd), OwnedFd::from_raw_fd(wfd))
        };
        // Early returns below drop both ends, so a half-configured pipe is never handed out.
        set_cloexec(r.as_fd())?;
        set_cloexec(w.as_fd())?;
        if nonblocking {
            set_nonblocking(r.as_fd(), true)?;
            set_nonblocking(w.as_fd(), true)?;
        }
        Ok((r, w))
    }
}

fn get_status_flags(fd: BorrowedFd<'_>) -> io::Result<c_int> {
    let (val, success) = unsafe {
        // SAFETY: nothing too unsafe about this function. One thing to note is that we're passing
        // it a null pointer, which is, for some reason, required yet ignored for F_GETFL.
        let ret = libc::fcntl(fd.as_raw_fd(), libc::F_GETFL, ptr::null::<c_void>());
        (ret, ret != -1)
    };
    ok_or_errno!(success => val)
}
fn set_status_flags(fd: BorrowedFd<'_>, flags: c_int) -> io::Result<()> {
    let success = unsafe {
        // SAFETY: flags is a c_int, as documented in the manpage.
        libc::fcntl(fd.as_raw_fd(), libc::F_SETFL, flags) != -1
    };
    ok_or_errno!(success => ())
}

/// Sets the non-blocking flag and returns its previous value, skipping the `F_SETFL` call when
/// the flag already has the requested value.
pub(crate) fn set_nonblocking(fd: BorrowedFd<'_>, nonblocking: bool) -> io::Result<bool> {
    let old_flags = get_status_flags(fd)?;
    let new_flags = if nonblocking {
        old_flags | libc::O_NONBLOCK
    } else {
        // Inverting the O_NONBLOCK value sets all the bits in the flag set to 1 except for the
        // nonblocking flag, which clears the flag when ANDed.
        old_flags & !libc::O_NONBLOCK
    };
    if new_flags != old_flags {
        set_status_flags(fd, new_flags)?;
    }
    Ok(old_flags & libc::O_NONBLOCK != 0)
}
pub(crate) fn get_nonblocking(fd: BorrowedFd<'_>) -> io::Result<bool> {
    Ok(get_status_flags(fd)? & libc::O_NONBLOCK != 0)
}

pub(crate) fn read_fd(fd: BorrowedFd<'_>, buf: &mut [u8]) -> io::Result<usize> {
    let (success, bytes_read) = unsafe {
        let size_or_err = libc::read(fd.as_raw_fd(), buf.as_mut_ptr().cast(), buf.len());
        (size_or_err >= 0, size_or_err as usize)
    };
    ok_or_errno!(success => bytes_read)
}
pub(crate) fn write_fd(fd: BorrowedFd<'_>, buf: &[u8]) -> io::Result<usize> {
    let (success, bytes_written) = unsafe {
        let size_or_err = libc::write(fd.as_raw_fd(), buf.as_ptr().cast(), buf.len());
        (size_or_err >= 0, size_or_err as usize)
    };
    ok_or_errno!(success => bytes_written)
}

/// Closes a descriptor with exactly one `close` call, reporting failure instead of swallowing it
/// the way the `OwnedFd` destructor does.
///
/// Not retried on `EINTR`: the descriptor is invalid once `close` returns, whatever the return
/// value.
pub(crate) fn close_fd(fd: OwnedFd) -> io::Result<()> {
    let success = unsafe { libc::close(fd.into_raw_fd()) != -1 };
    ok_or_errno!(success => ())
}

#[cfg(not(anonpipe_pipe2))]
fn get_fdflags(fd: BorrowedFd<'_>) -> io::Result<c_int> {
    let (val, success) = unsafe {
        let ret = libc::fcntl(fd.as_raw_fd(), libc::F_GETFD, 0);
        (ret, ret != -1)
    };
    ok_or_errno!(success => val)
}
#[cfg(not(anonpipe_pipe2))]
fn set_fdflags(fd: BorrowedFd<'_>, flags: c_int) -> io::Result<()> {
    let success = unsafe { libc::fcntl(fd.as_raw_fd(), libc::F_SETFD, flags) != -1 };
    ok_or_errno!(success => ())
}
#[cfg(not(anonpipe_pipe2))]
fn set_cloexec(fd: BorrowedFd<'_>) -> io::Result<()> {
    set_fdflags(fd, get_fdflags(fd)? | libc::FD_CLOEXEC)?;
    Ok(())
}
