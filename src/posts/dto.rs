use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: String,
    pub category: Option<String>,
}

impl CreatePostRequest {
    pub fn validate(self) -> Result<NewPost, ApiError> {
        let content = self
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ApiError::Validation("content is required".into()))?;
        Ok(NewPost {
            title: self.title,
            content,
            category: self.category,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    pub message: &'static str,
    pub post_id: i64,
}
