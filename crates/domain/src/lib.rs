#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod id;
mod metrics;
mod record;
mod service;
mod setup;
mod statistics;
mod template;
mod workout;

pub use error::{CreateError, ReadError, SetupError, StorageError, UpdateError, ValidationError};
pub use id::{ExerciseID, MuscleGroupID, SetID, TemplateID, UserID, WorkoutID, generate_id};
pub use metrics::{BestSet, estimated_one_rep_max};
pub use record::{WorkoutRecord, WorkoutRepository, WorkoutService};
pub use service::Service;
pub use setup::{SelectedExercises, WorkoutSetup, muscle_group_label};
pub use statistics::{VolumeTrend, total_volume, volume_series, volume_trend};
pub use template::{
    Template, TemplateExercise, TemplateMuscleGroup, TemplateName, TemplateNameError, TemplateSet,
};
pub use workout::{
    Exercise, MuscleGroup, Set, SetField, SetLabel, SetType, Workout, parse_reps, parse_weight,
};
