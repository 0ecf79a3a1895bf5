use serde::Deserialize;
use utoipa::ToSchema;

use super::Validator;
use crate::error::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        if let Some(name) = &self.name {
            v.not_blank(name, "name");
        }
        v.finish()
    }
}
