use std::time::Duration;

use tokio::sync::mpsc::{Sender, WeakSender};
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::events::{InputEvent, TickId};

/// Owned handle to at most one repeating timer.
pub trait Ticker {
    /// Starts a fresh timer; any previously scheduled one is cancelled first.
    fn schedule(&mut self, interval: Duration);
    /// Idempotent.
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
    /// Whether `tick` came from the timer that is live right now.
    fn is_current(&self, tick: TickId) -> bool;
}

struct Running {
    id: TickId,
    token: CancellationToken,
}

/// Posts `InputEvent::Tick` onto the controller queue from a tokio task.
///
/// Holds the queue weakly: once every other sender is gone the queue closes
/// and the timer task ends. Must be used from inside a tokio runtime.
pub struct TokioTicker {
    tx: WeakSender<InputEvent>,
    parent: CancellationToken,
    generation: u64,
    running: Option<Running>,
}

impl TokioTicker {
    pub fn new(tx: Sender<InputEvent>, parent: CancellationToken) -> Self {
        Self {
            tx: tx.downgrade(),
            parent,
            generation: 0,
            running: None,
        }
    }
}

impl Ticker for TokioTicker {
    fn schedule(&mut self, interval: Duration) {
        self.cancel();
        // tokio rejects a zero period
        let interval = interval.max(Duration::from_millis(1));
        self.generation += 1;
        let id = TickId(self.generation);
        let token = self.parent.child_token();
        let tx = self.tx.clone();
        let task_token = token.clone();
        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + interval, interval);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticks.tick() => {
                        trace!(tick = id.0, "timer fired");
                        let Some(queue) = tx.upgrade() else {
                            debug!("event queue closed; stopping timer");
                            break;
                        };
                        if queue.send(InputEvent::Tick(id)).await.is_err() {
                            debug!("event queue closed; stopping timer");
                            break;
                        }
                    }
                }
            }
        });
        debug!(
            tick = id.0,
            interval_ms = interval.as_millis() as u64,
            "timer scheduled"
        );
        self.running = Some(Running { id, token });
    }

    fn cancel(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
            debug!(tick = running.id.0, "timer cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.running.is_some()
    }

    fn is_current(&self, tick: TickId) -> bool {
        self.running.as_ref().is_some_and(|r| r.id == tick)
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn rescheduling_retires_the_previous_generation() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut ticker = TokioTicker::new(tx.clone(), CancellationToken::new());

        ticker.schedule(Duration::from_millis(100));
        ticker.schedule(Duration::from_millis(100));
        assert!(ticker.is_active());
        assert!(!ticker.is_current(TickId(1)));

        let event = tokio::time::timeout(Duration::from_millis(150), rx.recv())
            .await
            .expect("tick within one interval")
            .expect("queue open");
        assert_eq!(event, InputEvent::Tick(TickId(2)));
        assert!(ticker.is_current(TickId(2)));

        ticker.cancel();
        ticker.cancel();
        assert!(!ticker.is_active());
        let silent = tokio::time::timeout(Duration::from_millis(500), rx.recv()).await;
        assert!(silent.is_err(), "no ticks after cancel");
        drop(tx);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_does_not_keep_the_queue_open() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut ticker = TokioTicker::new(tx, CancellationToken::new());
        ticker.schedule(Duration::from_millis(100));

        let closed = tokio::time::timeout(Duration::from_millis(500), rx.recv())
            .await
            .expect("queue closes without external senders");
        assert_eq!(closed, None);
    }
}
