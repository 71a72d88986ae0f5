use crate::{pipe, tests::util::*, Error, Operation, ReadOutcome, WriteOutcome};
use color_eyre::eyre::{bail, ensure};

#[test]
fn empty_pipe_reports_retry() -> TestResult {
    testinit();
    let (rx, _tx) = pipe(true)?;
    // Nothing has been written, but the writing end is alive: this is "not yet", not "never"
    ensure_eq!(rx.read()?, ReadOutcome::Retry);
    ensure_eq!(rx.read_up_to(1)?, ReadOutcome::Retry);
    Ok(())
}

#[test]
fn toggle_reports_previous_state() -> TestResult {
    testinit();
    let (rx, tx) = pipe(false)?;
    ensure_eq!(rx.set_nonblocking(true)?, false);
    ensure_eq!(rx.set_nonblocking(true)?, true);
    ensure_eq!(rx.nonblocking()?, true);
    ensure_eq!(rx.set_nonblocking(false)?, true);
    ensure_eq!(rx.nonblocking()?, false);
    // The two ends are toggled independently
    ensure_eq!(tx.nonblocking()?, false);
    Ok(())
}

#[test]
fn created_nonblocking_reports_enabled() -> TestResult {
    testinit();
    let (rx, tx) = pipe(true)?;
    ensure_eq!(rx.nonblocking()?, true);
    ensure_eq!(tx.nonblocking()?, true);
    let (rx, tx) = pipe(false)?;
    ensure_eq!(rx.nonblocking()?, false);
    ensure_eq!(tx.nonblocking()?, false);
    Ok(())
}

#[test]
fn full_buffer_reports_partial_then_retry() -> TestResult {
    testinit();
    let (rx, tx) = pipe(true)?;
    // Far bigger than any default pipe buffer
    let data = payload(0xF00DFEED, 4 * 1024 * 1024);
    let mut sent_total = match tx.write(&data)? {
        WriteOutcome::Partial(n) => {
            ensure!(n > 0, "partial transfer of zero bytes");
            ensure!(n < data.len(), "partial transfer of the whole buffer");
            n
        }
        other => bail!("expected a partial transfer into the empty pipe, got {other:?}"),
    };
    // The remainder still dwarfs the pipe buffer, so resubmitting hits the full-buffer
    // condition after a bounded number of rounds
    loop {
        match tx.write(&data[sent_total..])? {
            WriteOutcome::Partial(n) => sent_total += n,
            WriteOutcome::Retry => break,
            WriteOutcome::Complete(..) => bail!("a {}-byte transfer fit the buffer", data.len()),
        }
    }
    // What did make it through is an exact prefix
    let Some(bytes) = rx.read_up_to(sent_total)?.into_bytes() else {
        bail!("nothing came back out of the pipe");
    };
    ensure!(!bytes.is_empty(), "zero-byte readback");
    ensure!(bytes[..] == data[..bytes.len()], "readback differs from what was written");
    Ok(())
}

#[test]
fn toggle_after_close_reports_ebadf() -> TestResult {
    testinit();
    let (mut rx, _tx) = pipe(false)?;
    rx.close()?;
    let rejection = Err(Error::Os { operation: Operation::Fcntl, code: libc::EBADF });
    ensure_eq!(rx.set_nonblocking(true), rejection);
    ensure_eq!(rx.nonblocking(), rejection);
    Ok(())
}
