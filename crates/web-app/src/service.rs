use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use grnd_domain::{SelectedExercises, Workout, WorkoutSetup};
use ::log::{debug, error};

use crate::{
    SavedWorkoutProgress, Settings, SettingsRepository, SettingsService, SlotError,
    WorkoutProgressRepository, WorkoutProgressService, WorkoutSetupRepository,
    WorkoutSetupService, log,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[cfg(test)]
    pub(crate) fn repository(&self) -> &R {
        &self.repository
    }
}

impl<R: log::Repository> log::Service for Service<R> {
    fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, SlotError> {
        self.repository.read_entries()
    }

    fn add_log_entry(&self, entry: log::Entry) -> Result<(), SlotError> {
        self.repository.add_entry(entry)
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    fn get_settings(&self) -> Result<Settings, SlotError> {
        self.repository.read_settings()
    }

    fn set_settings(&self, settings: Settings) -> Result<(), SlotError> {
        self.repository.write_settings(settings)
    }
}

impl<R: WorkoutProgressRepository> WorkoutProgressService for Service<R> {
    fn save_workout_progress(
        &self,
        workout: &Workout,
        elapsed_time: u32,
    ) -> Option<DateTime<Utc>> {
        let last_saved = Utc::now();
        match self
            .repository
            .write_workout_progress(SavedWorkoutProgress {
                workout: workout.clone(),
                elapsed_time,
                last_saved,
            }) {
            Ok(()) => Some(last_saved),
            Err(err) => {
                error!("failed to save workout progress: {err}");
                None
            }
        }
    }

    fn load_workout_progress(&self) -> Option<SavedWorkoutProgress> {
        match self.repository.read_workout_progress() {
            Ok(progress) => progress,
            Err(err @ SlotError::Corrupt(_)) => {
                error!("discarding saved workout progress: {err}");
                self.clear_workout_progress();
                None
            }
            Err(err) => {
                error!("failed to load workout progress: {err}");
                None
            }
        }
    }

    fn clear_workout_progress(&self) {
        match self.repository.delete_workout_progress() {
            Ok(()) => debug!("cleared workout progress"),
            Err(err) => error!("failed to clear workout progress: {err}"),
        }
    }
}

impl<R: WorkoutSetupRepository> WorkoutSetupService for Service<R> {
    fn get_workout_setup(&self) -> Option<(WorkoutSetup, SelectedExercises)> {
        let setup = self.repository.read_workout_setup();
        let selected = self.repository.read_selected_exercises();
        match (setup, selected) {
            (Ok(Some(setup)), Ok(Some(selected))) => Some((setup, selected)),
            (Ok(_), Ok(_)) => None,
            (Err(err), _) | (_, Err(err)) => {
                error!("failed to load workout setup: {err}");
                None
            }
        }
    }

    fn set_workout_setup(
        &self,
        setup: WorkoutSetup,
        selected: SelectedExercises,
    ) -> Result<(), SlotError> {
        self.repository.write_workout_setup(setup, selected)
    }

    fn clear_workout_setup(&self) {
        if let Err(err) = self.repository.delete_workout_setup() {
            error!("failed to clear workout setup: {err}");
        }
    }
}
