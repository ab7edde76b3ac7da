//! JSON layout of workouts and templates, shared by the local slots and the document store.

use std::{collections::BTreeMap, str::FromStr};

use chrono::{DateTime, Utc};
use grnd_domain as domain;
use grnd_web_app::SavedWorkoutProgress;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DtoError {
    #[error("invalid set type: {0}")]
    InvalidSetType(String),
    #[error(transparent)]
    InvalidTemplateName(#[from] domain::TemplateNameError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Set {
    pub id: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub reps: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub set_type: Option<String>,
}

impl From<&domain::Set> for Set {
    fn from(value: &domain::Set) -> Self {
        Self {
            id: value.id.to_string(),
            weight: value.weight.clone(),
            reps: value.reps.clone(),
            completed: value.completed,
            set_type: Some(value.set_type.to_string()),
        }
    }
}

impl TryFrom<Set> for domain::Set {
    type Error = DtoError;

    fn try_from(value: Set) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            weight: value.weight,
            reps: value.reps,
            completed: value.completed,
            set_type: match value.set_type {
                Some(set_type) => domain::SetType::from_str(&set_type)
                    .map_err(|_| DtoError::InvalidSetType(set_type))?,
                None => domain::SetType::Normal,
            },
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub sets: Vec<Set>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            notes: value.notes.clone(),
            sets: value.sets.iter().map(Set::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DtoError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: value.name,
            notes: value.notes,
            sets: value
                .sets
                .into_iter()
                .map(domain::Set::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MuscleGroup {
    pub id: String,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::MuscleGroup> for MuscleGroup {
    fn from(value: &domain::MuscleGroup) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<MuscleGroup> for domain::MuscleGroup {
    type Error = DtoError;

    fn try_from(value: MuscleGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: value.name,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::Exercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[must_use]
pub fn muscle_groups(workout: &domain::Workout) -> Vec<MuscleGroup> {
    workout.muscle_groups.iter().map(MuscleGroup::from).collect()
}

pub fn workout(muscle_groups: Vec<MuscleGroup>) -> Result<domain::Workout, DtoError> {
    Ok(domain::Workout::new(
        muscle_groups
            .into_iter()
            .map(domain::MuscleGroup::try_from)
            .collect::<Result<Vec<_>, _>>()?,
    ))
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutProgress {
    pub muscle_groups: Vec<MuscleGroup>,
    pub elapsed_time: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_saved: DateTime<Utc>,
}

impl From<&SavedWorkoutProgress> for WorkoutProgress {
    fn from(value: &SavedWorkoutProgress) -> Self {
        Self {
            muscle_groups: muscle_groups(&value.workout),
            elapsed_time: value.elapsed_time,
            last_saved: value.last_saved,
        }
    }
}

impl TryFrom<WorkoutProgress> for SavedWorkoutProgress {
    type Error = DtoError;

    fn try_from(value: WorkoutProgress) -> Result<Self, Self::Error> {
        Ok(Self {
            workout: workout(value.muscle_groups)?,
            elapsed_time: value.elapsed_time,
            last_saved: value.last_saved,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSetup {
    pub day: String,
    pub muscle_groups: Vec<String>,
    #[serde(default)]
    pub notes: String,
    pub timestamp: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub from_template: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl From<&domain::WorkoutSetup> for WorkoutSetup {
    fn from(value: &domain::WorkoutSetup) -> Self {
        Self {
            day: value.day.clone(),
            muscle_groups: value.muscle_groups.iter().map(ToString::to_string).collect(),
            notes: value.notes.clone(),
            timestamp: value.timestamp,
            start_time: value.start_time,
            name: value.name.clone(),
            from_template: value.is_from_template(),
            template_id: value.template_id.as_ref().map(ToString::to_string),
        }
    }
}

impl From<WorkoutSetup> for domain::WorkoutSetup {
    fn from(value: WorkoutSetup) -> Self {
        Self {
            day: value.day,
            muscle_groups: value.muscle_groups.into_iter().map(Into::into).collect(),
            notes: value.notes,
            timestamp: value.timestamp,
            start_time: value.start_time,
            name: value.name,
            template_id: value
                .template_id
                .filter(|_| value.from_template)
                .map(Into::into),
        }
    }
}

pub type SelectedExercises = BTreeMap<String, Vec<String>>;

#[must_use]
pub fn selected_exercises(value: &domain::SelectedExercises) -> SelectedExercises {
    value
        .iter()
        .map(|(id, names)| (id.to_string(), names.clone()))
        .collect()
}

#[must_use]
pub fn domain_selected_exercises(value: SelectedExercises) -> domain::SelectedExercises {
    value
        .into_iter()
        .map(|(id, names)| (id.into(), names))
        .collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    pub muscle_groups: Vec<MuscleGroup>,
    pub completed: bool,
}

impl TryFrom<WorkoutRecord> for domain::WorkoutRecord {
    type Error = DtoError;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(value: WorkoutRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: value.name,
            date: value.date,
            duration: value.duration.map(|duration| duration.max(0.0).round() as u32),
            total_volume: value.total_volume,
            workout: workout(value.muscle_groups)?,
            completed: value.completed,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateExercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub sets: Vec<TemplateSet>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TemplateMuscleGroup {
    pub id: String,
    pub name: String,
    pub exercises: Vec<TemplateExercise>,
}

impl From<TemplateMuscleGroup> for domain::TemplateMuscleGroup {
    fn from(value: TemplateMuscleGroup) -> Self {
        Self {
            id: value.id.into(),
            name: value.name,
            exercises: value
                .exercises
                .into_iter()
                .map(|exercise| domain::TemplateExercise {
                    id: exercise.id.into(),
                    name: exercise.name,
                    notes: exercise.notes,
                    sets: exercise
                        .sets
                        .into_iter()
                        .map(|set| domain::TemplateSet {
                            id: set.id.into(),
                            reps: set.reps,
                            weight: set.weight,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_day: Option<String>,
    pub muscle_groups: Vec<TemplateMuscleGroup>,
}

impl TryFrom<Template> for domain::Template {
    type Error = DtoError;

    fn try_from(value: Template) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::TemplateName::new(&value.name)?,
            description: value.description,
            target_day: value.target_day,
            muscle_groups: value
                .muscle_groups
                .into_iter()
                .map(domain::TemplateMuscleGroup::from)
                .collect(),
        })
    }
}
