pub mod api;
pub mod audio;
pub mod dashboard;
pub mod settings;
pub mod stats;
pub mod timer;

pub use api::{ApiClient, CompletionProvider};
pub use dashboard::Dashboard;
pub use settings::{ApiSettings, SettingsStore};
pub use stats::{aggregate, CompletionRecord, DashboardStats, PlanCompletion};
pub use timer::{FinishNotifier, LogNotifier, TimerController, TimerEvent, TimerPhase};
