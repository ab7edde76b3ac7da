use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Exercise, MuscleGroup, MuscleGroupID, SetupError, TemplateID, Workout};

/// Names of the chosen exercises per muscle group.
pub type SelectedExercises = BTreeMap<MuscleGroupID, Vec<String>>;

/// Parameters of a workout session captured once before the session starts.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSetup {
    pub day: String,
    pub muscle_groups: Vec<MuscleGroupID>,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub name: Option<String>,
    pub template_id: Option<TemplateID>,
}

impl WorkoutSetup {
    #[must_use]
    pub fn new(muscle_groups: Vec<MuscleGroupID>, notes: &str, now: DateTime<Utc>) -> Self {
        Self {
            day: now.format("%A").to_string(),
            muscle_groups,
            notes: notes.to_string(),
            timestamp: now,
            start_time: now,
            name: None,
            template_id: None,
        }
    }

    #[must_use]
    pub fn is_from_template(&self) -> bool {
        self.template_id.is_some()
    }

    /// Whole seconds since the start of the session.
    #[must_use]
    pub fn elapsed_time(&self, now: DateTime<Utc>) -> u32 {
        u32::try_from((now - self.start_time).num_seconds().max(0)).unwrap_or(u32::MAX)
    }

    /// Ensure that exercises were chosen for every muscle group of the setup.
    pub fn validate(&self, selected: &SelectedExercises) -> Result<(), SetupError> {
        match self
            .muscle_groups
            .iter()
            .find(|id| selected.get(*id).is_none_or(Vec::is_empty))
        {
            Some(id) => Err(SetupError::MissingExercises(id.clone())),
            None => Ok(()),
        }
    }

    /// Build the initial tree with one empty set per chosen exercise.
    pub fn build_workout(&self, selected: &SelectedExercises) -> Result<Workout, SetupError> {
        self.validate(selected)?;
        Ok(Workout::new(
            self.muscle_groups
                .iter()
                .map(|id| MuscleGroup {
                    id: id.clone(),
                    name: muscle_group_label(id),
                    exercises: selected
                        .get(id)
                        .map(|names| names.iter().map(|name| Exercise::new(name)).collect())
                        .unwrap_or_default(),
                })
                .collect(),
        ))
    }
}

#[must_use]
pub fn muscle_group_label(id: &MuscleGroupID) -> String {
    match id.as_str() {
        "chest" => "Chest",
        "back" => "Back",
        "arms" => "Arms",
        "legs" => "Legs",
        "core" => "Core",
        "shoulders" => "Shoulders",
        "fullBody" => "Full Body",
        other => other,
    }
    .to_string()
}
