//! Debounce + distinct-until-changed over a channel.
//!
//! A value is forwarded only after `window` passes with no newer input, and
//! only if it differs from the value forwarded before it. Closing the input
//! flushes any pending value.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::time::Duration;

use tokio::sync::mpsc;

/// Spawn a debouncer task. Must be called from within a tokio runtime.
///
/// The task ends when the input sender is dropped or the output receiver
/// is dropped.
pub fn debounce<T>(window: Duration) -> (mpsc::UnboundedSender<T>, mpsc::UnboundedReceiver<T>)
where
    T: Clone + PartialEq + Send + 'static,
{
    let (in_tx, in_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    tokio::spawn(run(window, in_rx, out_tx));
    (in_tx, out_rx)
}

async fn run<T>(window: Duration, mut input: mpsc::UnboundedReceiver<T>, output: mpsc::UnboundedSender<T>)
where
    T: Clone + PartialEq,
{
    let mut distinct = Distinct::default();
    let mut pending: Option<T> = None;

    loop {
        let Some(value) = pending.take() else {
            match input.recv().await {
                Some(value) => pending = Some(value),
                None => return,
            }
            continue;
        };

        tokio::select! {
            next = input.recv() => match next {
                Some(newer) => pending = Some(newer),
                None => {
                    if let Some(value) = distinct.admit(value) {
                        if output.send(value).is_err() {
                            tracing::trace!("debounce output closed during flush");
                        }
                    }
                    return;
                }
            },
            () = tokio::time::sleep(window) => {
                if let Some(value) = distinct.admit(value) {
                    if output.send(value).is_err() {
                        return;
                    }
                }
            }
        }
    }
}

/// Remembers the last forwarded value and rejects repeats of it.
#[derive(Debug)]
pub(crate) struct Distinct<T> {
    last: Option<T>,
}

impl<T> Default for Distinct<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Clone + PartialEq> Distinct<T> {
    pub(crate) fn admit(&mut self, value: T) -> Option<T> {
        if self.last.as_ref() == Some(&value) {
            return None;
        }
        self.last = Some(value.clone());
        Some(value)
    }
}
