use chrono::{DateTime, Utc};
use grnd_domain::{
    CreateError, ExerciseID, MuscleGroupID, SelectedExercises, SetField, SetID, SetType,
    SetupError, TemplateID, TemplateName, UpdateError, UserID, ValidationError, Workout,
    WorkoutID, WorkoutService, WorkoutSetup,
};
use log::{debug, info};

use crate::{WorkoutProgressService, WorkoutSetupService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
    Completed,
    Cancelled,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("workout session is {0:?}")]
    InvalidState(SessionState),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to store workout: {0}")]
    Create(#[from] CreateError),
    #[error("failed to complete workout: {0}")]
    Update(#[from] UpdateError),
}

/// How the tree of a started session was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStart {
    Fresh,
    Restored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSummary {
    pub workout_id: WorkoutID,
    pub total_volume: f64,
    pub duration: u32,
}

/// A single workout session from its start until it is finished or cancelled.
///
/// Every change of the tree is written to the progress slot, so that an interrupted session can
/// be restored on the next start.
pub struct WorkoutSession<S> {
    service: S,
    state: SessionState,
    setup: Option<WorkoutSetup>,
    workout: Workout,
    elapsed_time: u32,
    last_saved: Option<DateTime<Utc>>,
}

impl<S: WorkoutProgressService + WorkoutSetupService> WorkoutSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: SessionState::Uninitialized,
            setup: None,
            workout: Workout::default(),
            elapsed_time: 0,
            last_saved: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    #[must_use]
    pub fn setup(&self) -> Option<&WorkoutSetup> {
        self.setup.as_ref()
    }

    #[must_use]
    pub fn elapsed_time(&self) -> u32 {
        self.elapsed_time
    }

    #[must_use]
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// Start the session, preferring a saved snapshot over a newly built tree.
    pub fn start(
        &mut self,
        setup: WorkoutSetup,
        selected: &SelectedExercises,
        now: DateTime<Utc>,
    ) -> Result<SessionStart, SessionError> {
        self.require(SessionState::Uninitialized)?;
        let fresh = setup.build_workout(selected)?;

        let start = match self.service.load_workout_progress() {
            Some(progress) if !progress.workout.is_empty() => {
                self.workout = progress.workout;
                self.elapsed_time = progress.elapsed_time;
                self.last_saved = Some(progress.last_saved);
                SessionStart::Restored
            }
            _ => {
                self.workout = fresh;
                self.elapsed_time = setup.elapsed_time(now);
                SessionStart::Fresh
            }
        };
        debug!("started workout session ({start:?})");

        self.setup = Some(setup);
        self.state = SessionState::Active;
        self.persist();

        Ok(start)
    }

    /// Recompute the elapsed time from the start of the session.
    pub fn tick(&mut self, now: DateTime<Utc>) -> u32 {
        if let (SessionState::Active, Some(setup)) = (self.state, &self.setup) {
            self.elapsed_time = setup.elapsed_time(now);
        }
        self.elapsed_time
    }

    pub fn add_exercise(&mut self, group_id: &MuscleGroupID) -> Result<(), SessionError> {
        self.apply(|workout| workout.add_exercise(group_id))
    }

    pub fn remove_exercise(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
    ) -> Result<(), SessionError> {
        self.apply(|workout| workout.remove_exercise(group_id, exercise_id))
    }

    pub fn remove_muscle_group(&mut self, group_id: &MuscleGroupID) -> Result<(), SessionError> {
        self.apply(|workout| workout.remove_muscle_group(group_id))
    }

    pub fn add_set(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
    ) -> Result<(), SessionError> {
        self.apply(|workout| workout.add_set(group_id, exercise_id))
    }

    pub fn remove_set(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
    ) -> Result<(), SessionError> {
        self.apply(|workout| workout.remove_set(group_id, exercise_id, set_id))
    }

    pub fn update_exercise_name(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        name: &str,
    ) -> Result<(), SessionError> {
        self.apply(|workout| workout.update_exercise_name(group_id, exercise_id, name))
    }

    pub fn update_exercise_notes(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        notes: &str,
    ) -> Result<(), SessionError> {
        self.apply(|workout| workout.update_exercise_notes(group_id, exercise_id, notes))
    }

    pub fn update_set(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
        field: SetField,
        value: &str,
    ) -> Result<(), SessionError> {
        self.apply(|workout| workout.update_set(group_id, exercise_id, set_id, field, value))
    }

    pub fn update_set_type(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
        set_type: SetType,
    ) -> Result<(), SessionError> {
        self.apply(|workout| workout.update_set_type(group_id, exercise_id, set_id, set_type))
    }

    pub fn toggle_set_completion(
        &mut self,
        group_id: &MuscleGroupID,
        exercise_id: &ExerciseID,
        set_id: &SetID,
    ) -> Result<(), SessionError> {
        self.require(SessionState::Active)?;
        self.workout = self
            .workout
            .toggle_set_completion(group_id, exercise_id, set_id)?;
        self.persist();
        Ok(())
    }

    /// Store the named exercises of the session as a completed workout.
    ///
    /// The session stays active if storing fails, so that finishing can be retried. A workout
    /// created before a failed completion is not removed.
    pub async fn finish(
        &mut self,
        service: &impl WorkoutService,
        user_id: UserID,
        now: DateTime<Utc>,
    ) -> Result<WorkoutSummary, SessionError> {
        self.require(SessionState::Active)?;

        let workout = self.workout.named_exercises_only();
        let total_volume = workout.total_volume();
        let duration = self.tick(now);
        let (name, template_id) = self
            .setup
            .as_ref()
            .map(|setup| (setup.name.clone(), setup.template_id.clone()))
            .unwrap_or_default();

        let workout_id = match template_id {
            Some(template_id) => {
                service
                    .create_workout_from_template(user_id, template_id)
                    .await?
            }
            None => service.create_workout(user_id, workout, name).await?,
        };
        service
            .complete_workout(workout_id.clone(), Some(total_volume), duration)
            .await?;

        self.service.clear_workout_progress();
        self.service.clear_workout_setup();
        self.state = SessionState::Completed;
        info!("finished workout {workout_id}");

        Ok(WorkoutSummary {
            workout_id,
            total_volume,
            duration,
        })
    }

    /// Discard the session and all of its local state.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.require(SessionState::Active)?;
        self.service.clear_workout_progress();
        self.service.clear_workout_setup();
        self.workout = Workout::default();
        self.state = SessionState::Cancelled;
        debug!("cancelled workout session");
        Ok(())
    }

    pub async fn save_as_template(
        &self,
        service: &impl WorkoutService,
        user_id: UserID,
        name: TemplateName,
        description: Option<String>,
        target_day: Option<String>,
        include_weights: bool,
    ) -> Result<TemplateID, SessionError> {
        self.require(SessionState::Active)?;
        let workout_id = service
            .create_workout(
                user_id.clone(),
                self.workout.named_exercises_only(),
                None,
            )
            .await?;
        Ok(service
            .save_workout_as_template(
                user_id,
                workout_id,
                name,
                description,
                target_day,
                include_weights,
            )
            .await?)
    }

    fn require(&self, state: SessionState) -> Result<(), SessionError> {
        if self.state == state {
            Ok(())
        } else {
            Err(SessionError::InvalidState(self.state))
        }
    }

    fn apply(&mut self, f: impl FnOnce(&Workout) -> Workout) -> Result<(), SessionError> {
        self.require(SessionState::Active)?;
        self.workout = f(&self.workout);
        self.persist();
        Ok(())
    }

    fn persist(&mut self) {
        if let Some(last_saved) = self
            .service
            .save_workout_progress(&self.workout, self.elapsed_time)
        {
            self.last_saved = Some(last_saved);
        }
    }
}
