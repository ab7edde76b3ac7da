use grnd_domain::{SelectedExercises, WorkoutSetup};

use crate::SlotError;

pub trait WorkoutSetupService {
    /// The setup and exercise selection handed over by the setup page, if both are present.
    fn get_workout_setup(&self) -> Option<(WorkoutSetup, SelectedExercises)>;
    fn set_workout_setup(
        &self,
        setup: WorkoutSetup,
        selected: SelectedExercises,
    ) -> Result<(), SlotError>;
    fn clear_workout_setup(&self);
}

pub trait WorkoutSetupRepository {
    fn read_workout_setup(&self) -> Result<Option<WorkoutSetup>, SlotError>;
    fn read_selected_exercises(&self) -> Result<Option<SelectedExercises>, SlotError>;
    fn write_workout_setup(
        &self,
        setup: WorkoutSetup,
        selected: SelectedExercises,
    ) -> Result<(), SlotError>;
    fn delete_workout_setup(&self) -> Result<(), SlotError>;
}
