use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use log::{info, warn};
use serde::Serialize;
use tokio::{
    sync::{broadcast, oneshot, Mutex},
    task::JoinHandle,
    time,
};

use crate::audio::AlarmHandle;

use super::{TimerPhase, TimerState};

const FINISHED_MESSAGE: &str = "Zeit abgelaufen! Die eingestellte Ruhezeit ist vorbei.";

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_seconds: u64,
    pub display: String,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            display: state.display(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum TimerEvent {
    StateChanged(TimerSnapshot),
    Finished(TimerSnapshot),
}

/// Blocking "time is up" notification collaborator. The returned receiver
/// resolves when the user explicitly dismisses the notification; dropping the
/// sender instead leaves the alarm ringing.
pub trait FinishNotifier: Send + Sync + 'static {
    fn show(&self, message: &str) -> oneshot::Receiver<()>;
}

/// Fallback notifier for embedders without a modal surface: logs the message
/// and keeps the dismissal signal open until `dismiss` is called.
#[derive(Default)]
pub struct LogNotifier {
    pending: std::sync::Mutex<Option<oneshot::Sender<()>>>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dismiss(&self) {
        if let Some(tx) = self.pending.lock().unwrap().take() {
            let _ = tx.send(());
        }
    }
}

impl FinishNotifier for LogNotifier {
    fn show(&self, message: &str) -> oneshot::Receiver<()> {
        info!("{message}");
        let (tx, rx) = oneshot::channel();
        *self.pending.lock().unwrap() = Some(tx);
        rx
    }
}

/// Owns the countdown state, the 1-second ticker task, and the alarm session.
/// Dropping in on any exit path goes through `shutdown`, which cancels the
/// ticker and releases the tone generator unconditionally.
#[derive(Clone)]
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    ticker: Arc<Mutex<Option<JoinHandle<()>>>>,
    tick_interval: Duration,
    alarm: AlarmHandle,
    notifier: Arc<dyn FinishNotifier>,
    events: broadcast::Sender<TimerEvent>,
}

impl TimerController {
    pub fn new(notifier: Arc<dyn FinishNotifier>) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            ticker: Arc::new(Mutex::new(None)),
            tick_interval: Duration::from_secs(1),
            alarm: AlarmHandle::new(),
            notifier,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from(&*self.state.lock().await)
    }

    /// Enters a new duration. Rejected while running, and rejected when either
    /// input is negative or both are zero; the state is left untouched in both
    /// cases. Entering a time from `Finished` also silences the alarm.
    pub async fn set_duration(&self, minutes: i64, seconds: i64) -> Result<TimerSnapshot> {
        if minutes < 0 || seconds < 0 || (minutes == 0 && seconds == 0) {
            return Err(anyhow!("duration must be positive"));
        }

        {
            let mut state = self.state.lock().await;
            if state.phase == TimerPhase::Running {
                return Err(anyhow!("timer already running"));
            }
            if state.phase == TimerPhase::Finished {
                self.silence_alarm();
                state.reset();
            }
            state.arm((minutes * 60 + seconds) as u64);
        }

        Ok(self.emit_state_changed().await)
    }

    /// Begins (or resumes) the countdown. Any previous ticker is cancelled
    /// before the new one spawns, so intervals never overlap.
    pub async fn start(&self) -> Result<TimerSnapshot> {
        {
            let mut state = self.state.lock().await;
            if state.remaining_seconds == 0 {
                return Err(anyhow!("nothing to count down"));
            }
            state.begin();
        }

        self.spawn_ticker().await;
        Ok(self.emit_state_changed().await)
    }

    /// Idempotent; keeps the remaining time exactly as it was.
    pub async fn pause(&self) -> TimerSnapshot {
        self.state.lock().await.pause();
        self.cancel_ticker().await;
        self.emit_state_changed().await
    }

    pub async fn reset(&self) -> TimerSnapshot {
        self.cancel_ticker().await;
        self.silence_alarm();
        self.state.lock().await.reset();
        self.emit_state_changed().await
    }

    pub async fn add_time(&self, delta_seconds: i64) -> TimerSnapshot {
        self.state.lock().await.add_seconds(delta_seconds);
        self.emit_state_changed().await
    }

    /// Explicit dismissal of the finished-timer notification: stops the audio
    /// (idempotently) and returns the timer to `Idle`. Harmless in any other
    /// phase.
    pub async fn acknowledge_alarm(&self) -> TimerSnapshot {
        self.silence_alarm();
        self.state.lock().await.acknowledge();
        self.emit_state_changed().await
    }

    /// Teardown for the owning view: cancels the ticker and releases the tone
    /// generator regardless of phase.
    pub async fn shutdown(&self) {
        self.cancel_ticker().await;
        self.silence_alarm();
        // a countdown without a tick source is paused, not running
        self.state.lock().await.pause();
    }

    fn silence_alarm(&self) {
        if let Err(e) = self.alarm.stop() {
            warn!("Failed to stop alarm audio: {e}");
        }
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(handle) = ticker_guard.take() {
            handle.abort();
        }

        let state = self.state.clone();
        let alarm = self.alarm.clone();
        let notifier = self.notifier.clone();
        let events = self.events.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            // The first interval tick completes immediately; consume it so
            // every observed tick is one full period.
            interval.tick().await;
            loop {
                interval.tick().await;

                let (snapshot, finished) = {
                    let mut guard = state.lock().await;
                    if guard.phase != TimerPhase::Running {
                        break;
                    }
                    let finished = guard.tick();
                    (TimerSnapshot::from(&*guard), finished)
                };

                let _ = events.send(TimerEvent::StateChanged(snapshot.clone()));

                if finished {
                    // Audio failure must never take down the state machine
                    if let Err(e) = alarm.ring() {
                        warn!("Alarm audio unavailable: {e}");
                    }
                    let _ = events.send(TimerEvent::Finished(snapshot));

                    let dismissed = notifier.show(FINISHED_MESSAGE);
                    let state = state.clone();
                    let alarm = alarm.clone();
                    let events = events.clone();
                    tokio::spawn(async move {
                        // A dropped notifier never dismisses; the alarm then
                        // keeps ringing until acknowledged or reset.
                        if dismissed.await.is_ok() {
                            if let Err(e) = alarm.stop() {
                                warn!("Failed to stop alarm audio: {e}");
                            }
                            let snapshot = {
                                let mut guard = state.lock().await;
                                guard.acknowledge();
                                TimerSnapshot::from(&*guard)
                            };
                            let _ = events.send(TimerEvent::StateChanged(snapshot));
                        }
                    });
                    break;
                }
            }
        });

        *ticker_guard = Some(handle);
    }

    async fn cancel_ticker(&self) {
        if let Some(handle) = self.ticker.lock().await.take() {
            handle.abort();
        }
    }

    async fn emit_state_changed(&self) -> TimerSnapshot {
        let snapshot = self.snapshot().await;
        let _ = self.events.send(TimerEvent::StateChanged(snapshot.clone()));
        snapshot
    }
}
