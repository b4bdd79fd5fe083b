use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::controller::{CarouselController, ControllerSettings};
use crate::events::InputEvent;
use crate::input::Subscriptions;
use crate::stage::Stage;
use crate::ticker::TokioTicker;

/// Drives one carousel from its event queue until cancelled.
///
/// Rules:
/// - Events are handled one at a time, each to completion, in queue order.
/// - Timer ticks share the queue with input, so a tick never interleaves
///   with a navigation.
/// - Input of a kind the controller did not register for is dropped.
///
/// `tx` must feed `rx`; the ticker posts its ticks through it but does not
/// keep the queue open, so `run` also returns once every other sender drops.
pub async fn run<S: Stage>(
    stage: S,
    settings: ControllerSettings,
    tx: Sender<InputEvent>,
    mut rx: Receiver<InputEvent>,
    cancel: CancellationToken,
) -> CarouselController<S, TokioTicker> {
    let ticker = TokioTicker::new(tx, cancel.child_token());
    let mut controller = CarouselController::new(stage, ticker, settings);
    let mut subscriptions = Subscriptions::new();
    controller.init(&mut subscriptions);

    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe_event = rx.recv() => {
                let Some(event) = maybe_event else {
                    debug!("event queue closed");
                    break;
                };
                if !subscriptions.accepts(&event) {
                    trace!(?event, "no handler registered; dropping");
                    continue;
                }
                let dispatch = controller.handle(event);
                if dispatch.default_prevented {
                    trace!("default action suppressed");
                }
            }
        }
    }

    controller.stop_timer();
    controller
}
