use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_carousel::controller::{ControllerSettings, PlayState};
use rust_carousel::events::{ControlButton, InputEvent, KeyCode};
use rust_carousel::stage::{Affordance, Stage, Toggle};
use rust_carousel::tasks::runtime;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

type ShownLog = Arc<Mutex<Vec<usize>>>;

struct Slot {
    index: usize,
    shown: Option<ShownLog>,
}

impl Toggle for Slot {
    fn set_active(&mut self, active: bool) {
        if let (true, Some(shown)) = (active, &self.shown) {
            shown.lock().unwrap().push(self.index);
        }
    }
}

struct SharedStage {
    panels: Vec<Slot>,
    indicators: Vec<Slot>,
    affordance: Arc<Mutex<Option<Affordance>>>,
}

impl SharedStage {
    fn new(count: usize) -> (Self, ShownLog, Arc<Mutex<Option<Affordance>>>) {
        let shown: ShownLog = Arc::default();
        let affordance = Arc::new(Mutex::new(None));
        let stage = Self {
            panels: (0..count)
                .map(|index| Slot {
                    index,
                    shown: Some(shown.clone()),
                })
                .collect(),
            indicators: (0..count).map(|index| Slot { index, shown: None }).collect(),
            affordance: affordance.clone(),
        };
        (stage, shown, affordance)
    }
}

impl Stage for SharedStage {
    fn panel_count(&self) -> usize {
        self.panels.len()
    }

    fn indicator_count(&self) -> usize {
        self.indicators.len()
    }

    fn panel_mut(&mut self, index: usize) -> Option<&mut dyn Toggle> {
        self.panels.get_mut(index).map(|s| s as &mut dyn Toggle)
    }

    fn indicator_mut(&mut self, index: usize) -> Option<&mut dyn Toggle> {
        self.indicators.get_mut(index).map(|s| s as &mut dyn Toggle)
    }

    fn show_affordance(&mut self, affordance: Affordance) {
        *self.affordance.lock().unwrap() = Some(affordance);
    }
}

fn settings() -> ControllerSettings {
    ControllerSettings {
        interval: Duration::from_millis(2000),
        swipe_threshold_px: 60.0,
    }
}

#[tokio::test(start_paused = true)]
async fn autoplay_pauses_while_hidden_and_stops_on_manual_input() {
    let (stage, shown, affordance) = SharedStage::new(3);
    let (tx, rx) = mpsc::channel::<InputEvent>(16);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(runtime::run(
        stage,
        settings(),
        tx.clone(),
        rx,
        cancel.clone(),
    ));

    sleep(Duration::from_millis(4100)).await;
    assert_eq!(*shown.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(*affordance.lock().unwrap(), Some(Affordance::Pause));

    tx.send(InputEvent::Visibility { hidden: true }).await.unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(
        *shown.lock().unwrap(),
        vec![0, 1, 2],
        "no advances while hidden"
    );

    tx.send(InputEvent::Visibility { hidden: false }).await.unwrap();
    sleep(Duration::from_millis(1900)).await;
    assert_eq!(
        shown.lock().unwrap().len(),
        3,
        "no catch-up burst on return"
    );
    sleep(Duration::from_millis(200)).await;
    assert_eq!(*shown.lock().unwrap(), vec![0, 1, 2, 0]);

    tx.send(InputEvent::Control(ControlButton::Next)).await.unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(*shown.lock().unwrap(), vec![0, 1, 2, 0, 1]);
    assert_eq!(*affordance.lock().unwrap(), Some(Affordance::Play));

    cancel.cancel();
    let controller = handle.await.unwrap();
    assert_eq!(controller.current_index(), 1);
    assert_eq!(controller.play_state(), PlayState::Paused);
}

#[tokio::test(start_paused = true)]
async fn space_resumes_with_a_full_interval() {
    let (stage, shown, _) = SharedStage::new(4);
    let (tx, rx) = mpsc::channel::<InputEvent>(16);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(runtime::run(
        stage,
        settings(),
        tx.clone(),
        rx,
        cancel.clone(),
    ));

    sleep(Duration::from_millis(1500)).await;
    tx.send(InputEvent::KeyDown(KeyCode::Space)).await.unwrap();
    sleep(Duration::from_millis(1500)).await;
    tx.send(InputEvent::KeyDown(KeyCode::Space)).await.unwrap();
    sleep(Duration::from_millis(1900)).await;
    assert_eq!(*shown.lock().unwrap(), vec![0]);
    sleep(Duration::from_millis(200)).await;
    assert_eq!(*shown.lock().unwrap(), vec![0, 1]);

    cancel.cancel();
    let controller = handle.await.unwrap();
    assert!(controller.is_playing());
    assert!(!rust_carousel::ticker::Ticker::is_active(controller.ticker()));
}

#[tokio::test(start_paused = true)]
async fn empty_carousel_ignores_input_and_never_ticks() {
    let (stage, shown, affordance) = SharedStage::new(0);
    let (tx, rx) = mpsc::channel::<InputEvent>(16);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(runtime::run(
        stage,
        settings(),
        tx.clone(),
        rx,
        cancel.clone(),
    ));

    tx.send(InputEvent::Control(ControlButton::Next)).await.unwrap();
    sleep(Duration::from_secs(10)).await;
    assert!(shown.lock().unwrap().is_empty());
    assert_eq!(*affordance.lock().unwrap(), None);

    cancel.cancel();
    let controller = handle.await.unwrap();
    assert_eq!(controller.play_state(), PlayState::Playing);
}

#[tokio::test(start_paused = true)]
async fn run_returns_once_the_queue_closes() {
    let (stage, _, _) = SharedStage::new(3);
    let (tx, rx) = mpsc::channel::<InputEvent>(16);
    let handle = tokio::spawn(runtime::run(
        stage,
        settings(),
        tx,
        rx,
        CancellationToken::new(),
    ));

    let controller = tokio::time::timeout(Duration::from_secs(60), handle)
        .await
        .expect("run should end without any sender left")
        .unwrap();
    assert_eq!(controller.current_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_last_sender_stops_a_playing_carousel() {
    let (stage, shown, _) = SharedStage::new(3);
    let (tx, rx) = mpsc::channel::<InputEvent>(16);
    let external = tx.clone();
    let handle = tokio::spawn(runtime::run(
        stage,
        settings(),
        tx,
        rx,
        CancellationToken::new(),
    ));

    sleep(Duration::from_millis(4100)).await;
    assert_eq!(*shown.lock().unwrap(), vec![0, 1, 2]);
    drop(external);

    let controller = tokio::time::timeout(Duration::from_secs(60), handle)
        .await
        .expect("run should end after the last sender drops")
        .unwrap();
    assert_eq!(controller.current_index(), 2);
    assert!(controller.is_playing());
    assert!(!rust_carousel::ticker::Ticker::is_active(controller.ticker()));
}
