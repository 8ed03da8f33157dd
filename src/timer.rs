// Elapsed-time tracking and the once-per-second display ticker.
//
// The ticker thread never touches the terminal. It only nudges the game
// loop over a channel; all drawing happens on the loop's own thread, so
// no output lock is needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Session stopwatch, owned by the game loop.
#[derive(Default)]
pub struct Timer {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Timer {
    pub fn new() -> Self {
        Timer::default()
    }

    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Freeze the elapsed time. Safe to call when not running.
    pub fn stop(&mut self) {
        if let Some(t0) = self.start_time.take() {
            self.elapsed += t0.elapsed();
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        let live = self.start_time.map_or(Duration::ZERO, |t0| t0.elapsed());
        (self.elapsed + live).as_secs()
    }
}

/// Cooperative cancellation flag shared by the game loop and the ticker.
/// Checked, not preemptive: an in-flight one-second sleep finishes before
/// the flag is observed.
#[derive(Clone, Default)]
pub struct ShutdownToken(Arc<AtomicBool>);

impl ShutdownToken {
    pub fn new() -> Self {
        ShutdownToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A repaint nudge; carries no data, the loop re-reads its own `Timer`.
pub struct Tick;

/// Spawn the display ticker. It exits when the token is cancelled or the
/// receiving side is gone; the game loop joins the handle before tearing
/// the renderer down so no tick outlives the display.
pub fn spawn_ticker(token: ShutdownToken, tx: Sender<Tick>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !token.is_cancelled() {
            if tx.send(Tick).is_err() {
                break;
            }
            thread::sleep(Duration::from_secs(1));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn timer_is_zero_until_started() {
        let timer = Timer::new();
        assert_eq!(timer.elapsed_secs(), 0);
    }

    #[test]
    fn stop_freezes_elapsed_time() {
        let mut timer = Timer::new();
        timer.start();
        timer.stop();
        let frozen = timer.elapsed_secs();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(timer.elapsed_secs(), frozen);
    }

    #[test]
    fn cancelled_token_stops_the_ticker() {
        let token = ShutdownToken::new();
        let (tx, rx) = mpsc::channel();
        let handle = spawn_ticker(token.clone(), tx);
        // First tick is sent before the first sleep.
        assert!(rx.recv_timeout(Duration::from_secs(2)).is_ok());
        token.cancel();
        drop(rx);
        handle.join().unwrap();
        assert!(token.is_cancelled());
    }
}
