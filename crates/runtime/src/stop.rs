use std::io::BufRead;

use tokio::sync::watch;

pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the stop has been requested. A dropped handle counts as
    /// a stop so the run loop cannot outlive its controller.
    pub async fn stopped(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}

pub fn stop_channel() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, StopSignal { rx })
}

/// Reads stdin on a blocking thread and requests a stop when a line starting
/// with `q` arrives (or stdin reaches end of file).
pub fn spawn_stdin_quit_listener() -> StopSignal {
    let (handle, signal) = stop_channel();

    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) if line.trim_start().starts_with('q') => break,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
        handle.stop();
    });

    signal
}

#[cfg(test)]
mod tests {
    use super::stop_channel;

    #[test]
    fn signal_starts_unstopped() {
        let (_handle, signal) = stop_channel();

        assert!(!signal.is_stopped());
    }

    #[test]
    fn stop_flips_the_signal() {
        let (handle, signal) = stop_channel();

        handle.stop();

        assert!(signal.is_stopped());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn stopped_resolves_after_a_stop_request() {
        let (handle, mut signal) = stop_channel();

        handle.stop();
        signal.stopped().await;

        assert!(signal.is_stopped());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn dropping_the_handle_counts_as_a_stop() {
        let (handle, mut signal) = stop_channel();

        drop(handle);
        signal.stopped().await;
    }
}
