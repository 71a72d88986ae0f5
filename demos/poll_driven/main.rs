use {
    anonpipe::{pipe, ReadOutcome, WriteOutcome},
    std::{io, os::unix::io::AsRawFd},
};

// Single-threaded transfer through a non-blocking pipe, with poll(2) deciding when each end is
// worth another attempt. The payload is several times the OS pipe buffer, so the writing side
// gets to see partial transfers and full-buffer retry signals along the way.
fn main() -> io::Result<()> {
    let (rx, mut tx) = pipe(true)?;

    let payload = vec![0x2A; 256 * 1024];
    let mut unsent: &[u8] = &payload;
    let mut received = Vec::new();

    loop {
        let mut fds = [
            libc::pollfd { fd: rx.as_raw_fd(), events: libc::POLLIN, revents: 0 },
            // Once the writer is closed this reads as -1, which poll skips
            libc::pollfd { fd: tx.as_raw_fd(), events: libc::POLLOUT, revents: 0 },
        ];
        let ret = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if ret == -1 {
            let e = io::Error::last_os_error();
            if e.kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return Err(e);
        }

        if fds[1].revents & libc::POLLOUT != 0 {
            match tx.write(unsent)? {
                WriteOutcome::Complete(..) => unsent = &[],
                WriteOutcome::Partial(n) => unsent = &unsent[n..],
                WriteOutcome::Retry => {}
            }
            if unsent.is_empty() {
                // Closing the writer is what lets the reader observe end-of-stream
                tx.close()?;
            }
        }

        if fds[0].revents & (libc::POLLIN | libc::POLLHUP) != 0 {
            match rx.read()? {
                ReadOutcome::Data(bytes) => received.extend_from_slice(&bytes),
                ReadOutcome::Retry => {}
                ReadOutcome::EndOfStream => break,
            }
        }
    }

    assert_eq!(received, payload);
    println!("moved {} bytes through a non-blocking pipe", received.len());
    Ok(())
}
