use std::{
    collections::{BTreeMap, VecDeque},
    sync::Mutex,
};

use gloo_storage::Storage as _;
use grnd_domain as domain;
use grnd_web_app::{
    SavedWorkoutProgress, Settings, SettingsRepository, SlotError, WorkoutProgressRepository,
    WorkoutSetupRepository, log,
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use strum::AsRefStr;

use crate::dto;

#[derive(AsRefStr, Debug, Clone, Copy)]
pub enum Key {
    #[strum(serialize = "workoutSetup")]
    WorkoutSetup,
    #[strum(serialize = "selectedExercises")]
    SelectedExercises,
    #[strum(serialize = "workoutProgress")]
    WorkoutProgress,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

/// A key-value store holding one JSON value per key.
pub trait Backend {
    fn get(&self, key: Key) -> Result<Option<Value>, SlotError>;
    fn set(&self, key: Key, value: Value) -> Result<(), SlotError>;
    fn delete(&self, key: Key) -> Result<(), SlotError>;
}

/// The local storage of the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct Browser;

impl Backend for Browser {
    fn get(&self, key: Key) -> Result<Option<Value>, SlotError> {
        match gloo_storage::LocalStorage::get(key.as_ref()) {
            Ok(value) => Ok(Some(value)),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
            Err(gloo_storage::errors::StorageError::SerdeError(err)) => {
                Err(SlotError::Corrupt(err.to_string()))
            }
            Err(err) => Err(SlotError::Storage(err.to_string())),
        }
    }

    fn set(&self, key: Key, value: Value) -> Result<(), SlotError> {
        gloo_storage::LocalStorage::set(key.as_ref(), value)
            .map_err(|err| SlotError::Storage(err.to_string()))
    }

    fn delete(&self, key: Key) -> Result<(), SlotError> {
        gloo_storage::LocalStorage::delete(key.as_ref());
        Ok(())
    }
}

/// Raw slot contents kept in memory.
#[derive(Debug, Default)]
pub struct Memory {
    slots: Mutex<BTreeMap<String, String>>,
}

impl Memory {
    /// Store text as is, without checking that it is valid JSON.
    pub fn insert_raw(&self, key: Key, text: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(key.as_ref().to_string(), text.to_string());
        }
    }

    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.slots
            .lock()
            .is_ok_and(|slots| slots.contains_key(key.as_ref()))
    }
}

impl Backend for Memory {
    fn get(&self, key: Key) -> Result<Option<Value>, SlotError> {
        let slots = self
            .slots
            .lock()
            .map_err(|err| SlotError::Storage(err.to_string()))?;
        slots
            .get(key.as_ref())
            .map(|text| {
                serde_json::from_str(text).map_err(|err| SlotError::Corrupt(err.to_string()))
            })
            .transpose()
    }

    fn set(&self, key: Key, value: Value) -> Result<(), SlotError> {
        self.slots
            .lock()
            .map_err(|err| SlotError::Storage(err.to_string()))?
            .insert(key.as_ref().to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: Key) -> Result<(), SlotError> {
        self.slots
            .lock()
            .map_err(|err| SlotError::Storage(err.to_string()))?
            .remove(key.as_ref());
        Ok(())
    }
}

impl<B: Backend> Backend for &B {
    fn get(&self, key: Key) -> Result<Option<Value>, SlotError> {
        B::get(self, key)
    }

    fn set(&self, key: Key, value: Value) -> Result<(), SlotError> {
        B::set(self, key, value)
    }

    fn delete(&self, key: Key) -> Result<(), SlotError> {
        B::delete(self, key)
    }
}

pub struct LocalStorage<B = Browser> {
    backend: B,
}

impl LocalStorage<Browser> {
    #[must_use]
    pub fn new() -> Self {
        Self { backend: Browser }
    }
}

impl Default for LocalStorage<Browser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> LocalStorage<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, SlotError> {
        self.backend
            .get(key)?
            .map(|value| {
                serde_json::from_value(value).map_err(|err| SlotError::Corrupt(err.to_string()))
            })
            .transpose()
    }

    fn write<T: Serialize>(&self, key: Key, value: &T) -> Result<(), SlotError> {
        let value =
            serde_json::to_value(value).map_err(|err| SlotError::Storage(err.to_string()))?;
        self.backend.set(key, value)
    }
}

impl<B: Backend> WorkoutProgressRepository for LocalStorage<B> {
    fn read_workout_progress(&self) -> Result<Option<SavedWorkoutProgress>, SlotError> {
        self.read::<dto::WorkoutProgress>(Key::WorkoutProgress)?
            .map(|progress| {
                SavedWorkoutProgress::try_from(progress)
                    .map_err(|err| SlotError::Corrupt(err.to_string()))
            })
            .transpose()
    }

    fn write_workout_progress(&self, progress: SavedWorkoutProgress) -> Result<(), SlotError> {
        self.write(
            Key::WorkoutProgress,
            &dto::WorkoutProgress::from(&progress),
        )
    }

    fn delete_workout_progress(&self) -> Result<(), SlotError> {
        self.backend.delete(Key::WorkoutProgress)
    }
}

impl<B: Backend> WorkoutSetupRepository for LocalStorage<B> {
    fn read_workout_setup(&self) -> Result<Option<domain::WorkoutSetup>, SlotError> {
        Ok(self
            .read::<dto::WorkoutSetup>(Key::WorkoutSetup)?
            .map(domain::WorkoutSetup::from))
    }

    fn read_selected_exercises(&self) -> Result<Option<domain::SelectedExercises>, SlotError> {
        Ok(self
            .read::<dto::SelectedExercises>(Key::SelectedExercises)?
            .map(dto::domain_selected_exercises))
    }

    fn write_workout_setup(
        &self,
        setup: domain::WorkoutSetup,
        selected: domain::SelectedExercises,
    ) -> Result<(), SlotError> {
        self.write(Key::WorkoutSetup, &dto::WorkoutSetup::from(&setup))?;
        self.write(
            Key::SelectedExercises,
            &dto::selected_exercises(&selected),
        )
    }

    fn delete_workout_setup(&self) -> Result<(), SlotError> {
        self.backend.delete(Key::WorkoutSetup)?;
        self.backend.delete(Key::SelectedExercises)
    }
}

impl<B: Backend> SettingsRepository for LocalStorage<B> {
    fn read_settings(&self) -> Result<Settings, SlotError> {
        Ok(self.read(Key::Settings)?.unwrap_or_default())
    }

    fn write_settings(&self, settings: Settings) -> Result<(), SlotError> {
        self.write(Key::Settings, &settings)
    }
}

impl<B: Backend + Send + Sync + 'static> log::Repository for LocalStorage<B> {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, SlotError> {
        Ok(self.read(Key::Log)?.unwrap_or_default())
    }

    fn write_entries(&self, entries: VecDeque<log::Entry>) -> Result<(), SlotError> {
        self.write(Key::Log, &entries)
    }
}
