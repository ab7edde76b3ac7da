use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display};

use crate::{
    Exercise, ExerciseID, MuscleGroup, MuscleGroupID, SelectedExercises, Set, SetID, SetType,
    TemplateID, Workout, WorkoutSetup,
};

/// A reusable blueprint of muscle groups and exercises.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: TemplateID,
    pub name: TemplateName,
    pub description: Option<String>,
    pub target_day: Option<String>,
    pub muscle_groups: Vec<TemplateMuscleGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateMuscleGroup {
    pub id: MuscleGroupID,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateExercise {
    pub id: ExerciseID,
    pub name: String,
    pub notes: String,
    pub sets: Vec<TemplateSet>,
}

/// Planned set of a template. Reps are kept as a guide, the weight only if requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub id: SetID,
    pub reps: Option<String>,
    pub weight: Option<String>,
}

impl Template {
    /// Instantiate a workout with fresh exercise and set ids and all sets uncompleted.
    #[must_use]
    pub fn to_workout(&self) -> Workout {
        Workout::new(
            self.muscle_groups
                .iter()
                .map(|group| MuscleGroup {
                    id: group.id.clone(),
                    name: group.name.clone(),
                    exercises: group
                        .exercises
                        .iter()
                        .map(|exercise| Exercise {
                            id: ExerciseID::generate(),
                            name: exercise.name.clone(),
                            notes: exercise.notes.clone(),
                            sets: exercise
                                .sets
                                .iter()
                                .map(|set| Set {
                                    id: SetID::generate(),
                                    weight: set.weight.clone().unwrap_or_default(),
                                    reps: set.reps.clone().unwrap_or_default(),
                                    completed: false,
                                    set_type: SetType::Normal,
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        )
    }

    /// Prepare a session that starts from this template.
    ///
    /// The target day of the template is used if present, otherwise the current weekday.
    #[must_use]
    pub fn workout_setup(&self, now: DateTime<Utc>) -> (WorkoutSetup, SelectedExercises) {
        let setup = WorkoutSetup {
            day: self
                .target_day
                .clone()
                .unwrap_or_else(|| now.format("%A").to_string()),
            muscle_groups: self.muscle_groups.iter().map(|g| g.id.clone()).collect(),
            notes: self.description.clone().unwrap_or_default(),
            timestamp: now,
            start_time: now,
            name: Some(self.name.to_string()),
            template_id: Some(self.id.clone()),
        };
        let selected = self
            .muscle_groups
            .iter()
            .map(|g| {
                (
                    g.id.clone(),
                    g.exercises.iter().map(|e| e.name.clone()).collect(),
                )
            })
            .collect();
        (setup, selected)
    }
}

impl Workout {
    #[must_use]
    pub fn to_template(&self, include_weights: bool) -> Vec<TemplateMuscleGroup> {
        self.muscle_groups
            .iter()
            .map(|group| TemplateMuscleGroup {
                id: group.id.clone(),
                name: group.name.clone(),
                exercises: group
                    .exercises
                    .iter()
                    .map(|exercise| TemplateExercise {
                        id: exercise.id.clone(),
                        name: exercise.name.clone(),
                        notes: exercise.notes.clone(),
                        sets: exercise
                            .sets
                            .iter()
                            .map(|set| TemplateSet {
                                id: set.id.clone(),
                                reps: Some(set.reps.clone()),
                                weight: include_weights.then(|| set.weight.clone()),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateName(String);

impl TemplateName {
    pub fn new(name: &str) -> Result<Self, TemplateNameError> {
        let trimmed_name = name.trim();

        if trimmed_name.is_empty() {
            return Err(TemplateNameError::Empty);
        }

        let len = trimmed_name.chars().count();

        if len > 64 {
            return Err(TemplateNameError::TooLong(len));
        }

        Ok(TemplateName(trimmed_name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TemplateNameError {
    #[error("Template name must not be empty")]
    Empty,
    #[error("Template name must be 64 characters or fewer ({0} > 64)")]
    TooLong(usize),
}
