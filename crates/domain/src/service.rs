use log::{debug, error};

use crate::{
    CreateError, ReadError, Template, TemplateID, TemplateName, UpdateError, UserID, Workout,
    WorkoutID, WorkoutRecord, WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(
        &self,
        user_id: UserID,
        limit: usize,
    ) -> Result<Vec<WorkoutRecord>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(user_id, limit),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_templates(&self, user_id: UserID) -> Result<Vec<Template>, ReadError> {
        log_on_error!(
            self.repository.read_templates(user_id),
            ReadError,
            "get",
            "templates"
        )
    }

    async fn create_workout(
        &self,
        user_id: UserID,
        workout: Workout,
        name: Option<String>,
    ) -> Result<WorkoutID, CreateError> {
        log_on_error!(
            self.repository.create_workout(user_id, workout, name),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn complete_workout(
        &self,
        workout_id: WorkoutID,
        total_volume: Option<f64>,
        duration: u32,
    ) -> Result<(), UpdateError> {
        log_on_error!(
            self.repository
                .complete_workout(workout_id, total_volume, duration),
            UpdateError,
            "complete",
            "workout"
        )
    }

    async fn create_workout_from_template(
        &self,
        user_id: UserID,
        template_id: TemplateID,
    ) -> Result<WorkoutID, CreateError> {
        log_on_error!(
            self.repository
                .create_workout_from_template(user_id, template_id),
            CreateError,
            "create",
            "workout from template"
        )
    }

    async fn save_workout_as_template(
        &self,
        user_id: UserID,
        workout_id: WorkoutID,
        name: TemplateName,
        description: Option<String>,
        target_day: Option<String>,
        include_weights: bool,
    ) -> Result<TemplateID, CreateError> {
        log_on_error!(
            self.repository.save_workout_as_template(
                user_id,
                workout_id,
                name,
                description,
                target_day,
                include_weights
            ),
            CreateError,
            "save",
            "workout as template"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use crate::{StorageError, workout::tests::workout};

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        offline: bool,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRepository {
        fn check(&self, call: String) -> Result<(), StorageError> {
            self.calls.borrow_mut().push(call);
            if self.offline {
                return Err(StorageError::NoConnection);
            }
            Ok(())
        }
    }

    impl WorkoutRepository for FakeRepository {
        async fn read_workouts(
            &self,
            user_id: UserID,
            limit: usize,
        ) -> Result<Vec<WorkoutRecord>, ReadError> {
            self.check(format!("read_workouts {user_id} {limit}"))?;
            Ok(vec![])
        }

        async fn read_templates(&self, user_id: UserID) -> Result<Vec<Template>, ReadError> {
            self.check(format!("read_templates {user_id}"))?;
            Ok(vec![])
        }

        async fn create_workout(
            &self,
            user_id: UserID,
            workout: Workout,
            name: Option<String>,
        ) -> Result<WorkoutID, CreateError> {
            self.check(format!(
                "create_workout {user_id} {} {name:?}",
                workout.muscle_groups.len()
            ))?;
            Ok("w1".into())
        }

        async fn complete_workout(
            &self,
            workout_id: WorkoutID,
            total_volume: Option<f64>,
            duration: u32,
        ) -> Result<(), UpdateError> {
            self.check(format!(
                "complete_workout {workout_id} {total_volume:?} {duration}"
            ))?;
            Ok(())
        }

        async fn create_workout_from_template(
            &self,
            user_id: UserID,
            template_id: TemplateID,
        ) -> Result<WorkoutID, CreateError> {
            self.check(format!(
                "create_workout_from_template {user_id} {template_id}"
            ))?;
            Ok("w2".into())
        }

        async fn save_workout_as_template(
            &self,
            user_id: UserID,
            workout_id: WorkoutID,
            name: TemplateName,
            _description: Option<String>,
            _target_day: Option<String>,
            include_weights: bool,
        ) -> Result<TemplateID, CreateError> {
            self.check(format!(
                "save_workout_as_template {user_id} {workout_id} {name} {include_weights}"
            ))?;
            Ok("t1".into())
        }
    }

    #[test]
    fn test_create_and_complete_workout() {
        let service = Service::new(FakeRepository::default());

        let workout_id = block_on(service.create_workout(
            "u1".into(),
            workout(),
            Some("Push".to_string()),
        ))
        .unwrap();
        block_on(service.complete_workout(workout_id, Some(1726.0), 3600)).unwrap();

        assert_eq!(
            *service.repository.calls.borrow(),
            vec![
                "create_workout u1 2 Some(\"Push\")".to_string(),
                "complete_workout w1 Some(1726.0) 3600".to_string(),
            ]
        );
    }

    #[test]
    fn test_save_workout_as_template() {
        let service = Service::new(FakeRepository::default());

        assert_eq!(
            block_on(service.save_workout_as_template(
                "u1".into(),
                "w1".into(),
                TemplateName::new("Push Day").unwrap(),
                None,
                None,
                false,
            ))
            .unwrap(),
            TemplateID::from("t1")
        );
    }

    #[test]
    fn test_errors_are_passed_through() {
        let service = Service::new(FakeRepository {
            offline: true,
            ..FakeRepository::default()
        });

        assert!(matches!(
            block_on(service.get_workouts("u1".into(), 10)),
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
        assert!(matches!(
            block_on(service.create_workout_from_template("u1".into(), "t1".into())),
            Err(CreateError::Storage(StorageError::NoConnection))
        ));
        assert!(matches!(
            block_on(service.complete_workout("w1".into(), None, 0)),
            Err(UpdateError::Storage(StorageError::NoConnection))
        ));
    }
}
