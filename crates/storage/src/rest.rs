//! REST
//!
//! Client for the HTTP function API of the document store. Every call is a `POST` to
//! `/api/query` or `/api/mutation` naming a function of the `workouts` module.

use gloo_net::http::Request;
use grnd_domain as domain;
use log::debug;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::dto;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    /// Send a JSON body and return the JSON body of the response.
    async fn send_request(&self, url: &str, body: Value) -> Result<Value, domain::StorageError>;
}

#[derive(Clone, Copy)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, url: &str, body: Value) -> Result<Value, domain::StorageError> {
        let request = Request::post(url)
            .json(&body)
            .map_err(|err| domain::StorageError::Other(err.into()))?;
        let response = request
            .send()
            .await
            .map_err(|_| domain::StorageError::NoConnection)?;
        match response.json::<Value>().await {
            Ok(value) => Ok(value),
            Err(_) if !response.ok() => Err(domain::StorageError::Other(
                format!("{} {}", response.status(), response.status_text()).into(),
            )),
            Err(err) => Err(domain::StorageError::Other(err.into())),
        }
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    url: String,
    sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self::with_sender(url, GlooNetSendRequest)
    }
}

impl<S: SendRequest> REST<S> {
    pub fn with_sender(url: &str, sender: S) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            sender,
        }
    }

    async fn query<T: DeserializeOwned>(&self, function: &str, args: Value) -> Result<T, CallError> {
        self.call("query", function, args).await
    }

    async fn mutation<T: DeserializeOwned>(
        &self,
        function: &str,
        args: Value,
    ) -> Result<T, CallError> {
        self.call("mutation", function, args).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        kind: &str,
        function: &str,
        args: Value,
    ) -> Result<T, CallError> {
        let response = self
            .sender
            .send_request(
                &format!("{}/api/{kind}", self.url),
                json!({
                    "path": format!("workouts:{function}"),
                    "args": args,
                    "format": "json",
                }),
            )
            .await?;
        match serde_json::from_value::<FunctionResponse>(response).map_err(invalid_response)? {
            FunctionResponse::Success { value } => {
                serde_json::from_value(value).map_err(|err| CallError::from(invalid_response(err)))
            }
            FunctionResponse::Error { error_message } => {
                debug!("workouts:{function} failed: {error_message}");
                Err(CallError::Function(error_message))
            }
        }
    }
}

impl<S: SendRequest> domain::WorkoutRepository for REST<S> {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
        limit: usize,
    ) -> Result<Vec<domain::WorkoutRecord>, domain::ReadError> {
        let records: Vec<dto::WorkoutRecord> = self
            .query(
                "getRecentWorkouts",
                json!({ "userId": user_id.to_string(), "limit": limit }),
            )
            .await?;
        records
            .into_iter()
            .map(|record| {
                domain::WorkoutRecord::try_from(record)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn read_templates(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Template>, domain::ReadError> {
        let templates: Vec<dto::Template> = self
            .query(
                "getWorkoutTemplates",
                json!({ "userId": user_id.to_string() }),
            )
            .await?;
        templates
            .into_iter()
            .map(|template| {
                domain::Template::try_from(template)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    async fn create_workout(
        &self,
        user_id: domain::UserID,
        workout: domain::Workout,
        name: Option<String>,
    ) -> Result<domain::WorkoutID, domain::CreateError> {
        let mut args = json!({
            "userId": user_id.to_string(),
            "muscleGroups": dto::muscle_groups(&workout),
        });
        if let Some(name) = name {
            args["name"] = json!(name);
        }
        let id: String = self.mutation("createWorkout", args).await?;
        Ok(id.into())
    }

    async fn complete_workout(
        &self,
        workout_id: domain::WorkoutID,
        total_volume: Option<f64>,
        duration: u32,
    ) -> Result<(), domain::UpdateError> {
        let mut args = json!({
            "workoutId": workout_id.to_string(),
            "duration": duration,
        });
        if let Some(total_volume) = total_volume {
            args["totalVolume"] = json!(total_volume);
        }
        let _: Value = self.mutation("completeWorkout", args).await?;
        Ok(())
    }

    async fn create_workout_from_template(
        &self,
        user_id: domain::UserID,
        template_id: domain::TemplateID,
    ) -> Result<domain::WorkoutID, domain::CreateError> {
        let id: String = self
            .mutation(
                "createWorkoutFromTemplate",
                json!({
                    "userId": user_id.to_string(),
                    "templateId": template_id.to_string(),
                }),
            )
            .await?;
        Ok(id.into())
    }

    async fn save_workout_as_template(
        &self,
        user_id: domain::UserID,
        workout_id: domain::WorkoutID,
        name: domain::TemplateName,
        description: Option<String>,
        target_day: Option<String>,
        include_weights: bool,
    ) -> Result<domain::TemplateID, domain::CreateError> {
        let mut args = json!({
            "userId": user_id.to_string(),
            "workoutId": workout_id.to_string(),
            "name": name.to_string(),
            "includeWeights": include_weights,
        });
        if let Some(description) = description {
            args["description"] = json!(description);
        }
        if let Some(target_day) = target_day {
            args["targetDay"] = json!(target_day);
        }
        let id: String = self.mutation("saveWorkoutAsTemplate", args).await?;
        Ok(id.into())
    }
}

#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
enum FunctionResponse {
    Success {
        value: Value,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

/// Failure of a function call, either in transport or reported by the function itself.
#[derive(thiserror::Error, Debug)]
pub enum CallError {
    #[error(transparent)]
    Storage(#[from] domain::StorageError),
    #[error("{0}")]
    Function(String),
}

fn invalid_response(err: serde_json::Error) -> domain::StorageError {
    domain::StorageError::Other(format!("invalid response: {err}").into())
}

impl From<CallError> for domain::ReadError {
    fn from(value: CallError) -> Self {
        match value {
            CallError::Storage(err) => domain::ReadError::Storage(err),
            CallError::Function(message) => {
                domain::ReadError::Storage(domain::StorageError::Other(message.into()))
            }
        }
    }
}

impl From<CallError> for domain::CreateError {
    fn from(value: CallError) -> Self {
        match value {
            CallError::Storage(err) => domain::CreateError::Storage(err),
            CallError::Function(message) if message.contains("not found") => {
                domain::CreateError::NotFound
            }
            CallError::Function(message) if message.contains("Unauthorized") => {
                domain::CreateError::Unauthorized
            }
            CallError::Function(message) => {
                domain::CreateError::Storage(domain::StorageError::Other(message.into()))
            }
        }
    }
}

impl From<CallError> for domain::UpdateError {
    fn from(value: CallError) -> Self {
        match value {
            CallError::Storage(err) => domain::UpdateError::Storage(err),
            CallError::Function(message) if message.contains("not found") => {
                domain::UpdateError::NotFound
            }
            CallError::Function(message) => {
                domain::UpdateError::Storage(domain::StorageError::Other(message.into()))
            }
        }
    }
}
