//{
fn main() -> std::io::Result<()> {
    //}
    use {
        anonpipe::{pipe, ReadOutcome, WriteOutcome},
        std::thread,
    };

    // A blocking pipe: reads and writes wait for the other end instead of asking to be
    // retried.
    let (rx, tx) = pipe(false)?;

    let jh = thread::spawn(move || -> std::io::Result<()> {
        let mut pending: &[u8] = b"one weather report, straight from the pipe\n";
        while !pending.is_empty() {
            match tx.write(pending)? {
                WriteOutcome::Complete(..) => break,
                // A short transfer leaves the tail with us, to be resubmitted
                WriteOutcome::Partial(n) => pending = &pending[n..],
                WriteOutcome::Retry => continue,
            }
        }
        Ok(())
        // The writer is dropped here, which is what produces end-of-stream on the other end
    });

    let mut report = Vec::new();
    loop {
        match rx.read()? {
            ReadOutcome::Data(bytes) => report.extend_from_slice(&bytes),
            ReadOutcome::Retry => continue,
            ReadOutcome::EndOfStream => break,
        }
    }
    jh.join().unwrap()?;

    print!("Received: {}", String::from_utf8_lossy(&report));
    //{
    Ok(())
} //}
