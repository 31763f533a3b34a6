pub mod controller;
pub mod state;

pub use controller::{FinishNotifier, LogNotifier, TimerController, TimerEvent, TimerSnapshot};
pub use state::{format_mm_ss, TimerPhase, TimerState};
