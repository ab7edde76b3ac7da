#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod format;
pub mod log;
pub mod timer;

mod progress;
mod service;
mod session;
mod settings;
mod setup;

pub use progress::{SavedWorkoutProgress, WorkoutProgressRepository, WorkoutProgressService};
pub use service::Service;
pub use session::{SessionError, SessionStart, SessionState, WorkoutSession, WorkoutSummary};
pub use settings::{Settings, SettingsRepository, SettingsService, WeightUnit};
pub use setup::{WorkoutSetupRepository, WorkoutSetupService};

/// Failure of a local key-value slot.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("corrupt slot content: {0}")]
    Corrupt(String),
    #[error("{0}")]
    Storage(String),
}
