use chrono::{DateTime, Utc};

use crate::{
    CreateError, ReadError, Template, TemplateID, TemplateName, UpdateError, UserID, Workout,
    WorkoutID,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self, user_id: UserID, limit: usize)
    -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn get_templates(&self, user_id: UserID) -> Result<Vec<Template>, ReadError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        workout: Workout,
        name: Option<String>,
    ) -> Result<WorkoutID, CreateError>;
    async fn complete_workout(
        &self,
        workout_id: WorkoutID,
        total_volume: Option<f64>,
        duration: u32,
    ) -> Result<(), UpdateError>;
    async fn create_workout_from_template(
        &self,
        user_id: UserID,
        template_id: TemplateID,
    ) -> Result<WorkoutID, CreateError>;
    async fn save_workout_as_template(
        &self,
        user_id: UserID,
        workout_id: WorkoutID,
        name: TemplateName,
        description: Option<String>,
        target_day: Option<String>,
        include_weights: bool,
    ) -> Result<TemplateID, CreateError>;
}

/// Access to the document store holding workouts and templates.
#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, ReadError>;
    async fn read_templates(&self, user_id: UserID) -> Result<Vec<Template>, ReadError>;
    async fn create_workout(
        &self,
        user_id: UserID,
        workout: Workout,
        name: Option<String>,
    ) -> Result<WorkoutID, CreateError>;
    async fn complete_workout(
        &self,
        workout_id: WorkoutID,
        total_volume: Option<f64>,
        duration: u32,
    ) -> Result<(), UpdateError>;
    async fn create_workout_from_template(
        &self,
        user_id: UserID,
        template_id: TemplateID,
    ) -> Result<WorkoutID, CreateError>;
    async fn save_workout_as_template(
        &self,
        user_id: UserID,
        workout_id: WorkoutID,
        name: TemplateName,
        description: Option<String>,
        target_day: Option<String>,
        include_weights: bool,
    ) -> Result<TemplateID, CreateError>;
}

/// A workout as persisted in the document store.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: WorkoutID,
    pub name: String,
    pub date: DateTime<Utc>,
    pub duration: Option<u32>,
    pub total_volume: Option<f64>,
    pub workout: Workout,
    pub completed: bool,
}

impl WorkoutRecord {
    /// The stored volume, or the volume derived from the sets for records stored without one.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.total_volume
            .unwrap_or_else(|| self.workout.total_volume())
    }

    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.workout.total_reps()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    use crate::workout::tests::workout;

    use super::*;

    fn record(total_volume: Option<f64>) -> WorkoutRecord {
        WorkoutRecord {
            id: "w1".into(),
            name: "Workout 2024-03-04".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap(),
            duration: Some(3600),
            total_volume,
            workout: workout(),
            completed: true,
        }
    }

    #[test]
    fn test_workout_record_volume() {
        assert_approx_eq!(record(Some(500.0)).volume(), 500.0);
        assert_approx_eq!(record(None).volume(), workout().total_volume());
    }

    #[test]
    fn test_workout_record_metrics_match_live_workout() {
        let record = record(None);
        assert_eq!(record.total_reps(), workout().total_reps());
        assert_eq!(
            record.workout.completion_percentage(),
            workout().completion_percentage()
        );
        assert_eq!(record.workout.best_sets(), workout().best_sets());
    }
}
