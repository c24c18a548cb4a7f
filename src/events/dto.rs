use serde::{Deserialize, Serialize};
use time::{Date, Time};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Date>,
    pub event_time: Option<Time>,
    pub location: Option<String>,
}

/// A creation payload that passed boundary validation.
#[derive(Debug)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub event_date: Date,
    pub event_time: Time,
    pub location: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent, ApiError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Validation("title is required".into()))?;
        let event_date = self
            .event_date
            .ok_or_else(|| ApiError::Validation("event_date is required".into()))?;
        let event_time = self
            .event_time
            .ok_or_else(|| ApiError::Validation("event_time is required".into()))?;
        Ok(NewEvent {
            title,
            description: self.description,
            event_date,
            event_time,
            location: self.location,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Date>,
    pub event_time: Option<Time>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedEventResponse {
    pub message: &'static str,
    pub event_id: i64,
}
