use super::{drain, write_all};
use crate::{pipe, tests::util::*, DEFAULT_READ_LEN, Error, Operation, ReadOutcome, WriteOutcome};
use color_eyre::eyre::{bail, ensure, WrapErr};
use std::thread;

#[test]
fn roundtrip_in_order() -> TestResult {
    testinit();
    let (rx, tx) = pipe(false).context("pipe creation failed")?;
    let msg = b"first in, first out";
    ensure_eq!(tx.write(msg)?, WriteOutcome::Complete(msg.len()));
    ensure_eq!(rx.read_up_to(msg.len())?, ReadOutcome::Data(msg.to_vec()));
    Ok(())
}

#[test]
fn partial_read_leaves_remainder() -> TestResult {
    testinit();
    let (rx, tx) = pipe(false)?;
    let msg = b"0123456789";
    ensure_eq!(tx.write(msg)?, WriteOutcome::Complete(msg.len()));
    ensure_eq!(rx.read_up_to(4)?, ReadOutcome::Data(msg[..4].to_vec()));
    ensure_eq!(rx.read()?, ReadOutcome::Data(msg[4..].to_vec()));
    Ok(())
}

#[test]
fn read_caps_at_default_len() -> TestResult {
    testinit();
    let (rx, tx) = pipe(false)?;
    let sent = payload(0x0DDB17E5, DEFAULT_READ_LEN + 904);
    write_all(&tx, &sent)?;
    let ReadOutcome::Data(first) = rx.read()? else {
        bail!("no data on the first read");
    };
    ensure_eq!(first.len(), DEFAULT_READ_LEN);
    let ReadOutcome::Data(rest) = rx.read()? else {
        bail!("no data on the second read");
    };
    ensure_eq!(rest.len(), 904);
    let mut received = first;
    received.extend_from_slice(&rest);
    ensure!(received == sent, "reassembled bytes differ from sent bytes");
    Ok(())
}

#[test]
fn write_rejects_empty_input() -> TestResult {
    testinit();
    let (rx, mut tx) = pipe(false)?;
    let rejection = Err(Error::InvalidArgument { operation: Operation::Write });
    ensure_eq!(tx.write(&[]), rejection);
    drop(rx);
    ensure_eq!(tx.write(&[]), rejection);
    tx.close()?;
    // Argument validation comes before the closed-endpoint check
    ensure_eq!(tx.write(&[]), rejection);
    Ok(())
}

#[test]
fn read_rejects_zero_length() -> TestResult {
    testinit();
    let (mut rx, tx) = pipe(false)?;
    let rejection = Err(Error::InvalidArgument { operation: Operation::Read });
    ensure_eq!(tx.write(b"pending")?, WriteOutcome::Complete(7));
    ensure_eq!(rx.read_up_to(0), rejection);
    rx.close()?;
    ensure_eq!(rx.read_up_to(0), rejection);
    Ok(())
}

#[test]
fn end_of_stream_after_writer_close() -> TestResult {
    testinit();
    let (rx, mut tx) = pipe(false)?;
    let msg = b"parting words";
    ensure_eq!(tx.write(msg)?, WriteOutcome::Complete(msg.len()));
    tx.close()?;
    ensure_eq!(rx.read()?, ReadOutcome::Data(msg.to_vec()));
    ensure_eq!(rx.read()?, ReadOutcome::EndOfStream);
    // And stays that way
    ensure_eq!(rx.read()?, ReadOutcome::EndOfStream);
    Ok(())
}

#[test]
fn end_of_stream_after_writer_drop() -> TestResult {
    testinit();
    let (rx, tx) = pipe(false)?;
    drop(tx);
    ensure_eq!(rx.read()?, ReadOutcome::EndOfStream);
    Ok(())
}

#[test]
fn write_after_reader_gone_reports_broken_pipe() -> TestResult {
    testinit();
    let (rx, tx) = pipe(false)?;
    drop(rx);
    ensure_eq!(
        tx.write(b"no one is listening"),
        Err(Error::Os { operation: Operation::Write, code: libc::EPIPE }),
    );
    Ok(())
}

#[test]
fn threaded_bulk_transfer() -> TestResult {
    testinit();
    let (rx, tx) = pipe(false)?;
    let sent = payload(0x7E5C0DE, 1024 * 1024);
    let resend = sent.clone();
    let jh = thread::spawn(move || write_all(&tx, &resend));
    let received = drain(&rx)?;
    jh.join().unwrap()?;
    ensure_eq!(received.len(), sent.len());
    ensure!(received == sent, "received bytes differ from sent bytes");
    Ok(())
}
