/// ----- WAITING MODULE -----
/// Cancellable simulated waits. The service loop suspends on a `WaitPoint`
/// for each travel step and each dwell; `AbortHandle::raise` resolves the
/// suspended wait early and the outcome tells the resumed code whether it
/// ran to completion or was cut short.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Elapsed,
    Interrupted,
}

#[derive(Debug, Clone)]
pub struct AbortHandle {
    signal: Sender<()>,
}

impl AbortHandle {
    /// Ends the wait currently suspended (or the next one) early. One-shot:
    /// raising again before the signal is consumed has no further effect.
    pub fn raise(&self) {
        let _ = self.signal.try_send(());
    }
}

#[derive(Debug)]
pub struct WaitPoint {
    signal: Receiver<()>,
}

impl WaitPoint {
    pub fn wait(&self, duration: Duration) -> WaitOutcome {
        match self.signal.recv_timeout(duration) {
            Ok(()) => WaitOutcome::Interrupted,
            Err(RecvTimeoutError::Timeout) => WaitOutcome::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                // nothing can interrupt any more; keep the simulated timing
                thread::sleep(duration);
                WaitOutcome::Elapsed
            }
        }
    }

    /// Discards a stale signal. Called before each request becomes active so
    /// an abort raised for the previous one cannot leak into the next.
    pub fn clear(&self) {
        while self.signal.try_recv().is_ok() {}
    }
}

pub fn abort_channel() -> (AbortHandle, WaitPoint) {
    let (tx, rx) = bounded(1);
    (AbortHandle { signal: tx }, WaitPoint { signal: rx })
}
