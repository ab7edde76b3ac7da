use chrono::{DateTime, Utc};
use grnd_domain::Workout;

use crate::SlotError;

/// Snapshot of an ongoing session used to recover it after a reload.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedWorkoutProgress {
    pub workout: Workout,
    pub elapsed_time: u32,
    pub last_saved: DateTime<Utc>,
}

pub trait WorkoutProgressService {
    /// Store a snapshot and return the time it was written.
    ///
    /// Failures are logged and reported as `None`.
    fn save_workout_progress(&self, workout: &Workout, elapsed_time: u32)
    -> Option<DateTime<Utc>>;
    /// Load the stored snapshot. A corrupt snapshot is removed.
    fn load_workout_progress(&self) -> Option<SavedWorkoutProgress>;
    fn clear_workout_progress(&self);
}

pub trait WorkoutProgressRepository {
    fn read_workout_progress(&self) -> Result<Option<SavedWorkoutProgress>, SlotError>;
    fn write_workout_progress(&self, progress: SavedWorkoutProgress) -> Result<(), SlotError>;
    fn delete_workout_progress(&self) -> Result<(), SlotError>;
}
