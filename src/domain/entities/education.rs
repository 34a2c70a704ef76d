use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
    pub achievements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    #[validate(length(min = 1, message = "Institution is required"))]
    pub institution: String,
    #[validate(length(min = 1, message = "Degree is required"))]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    pub start_year: i32,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl NewEducation {
    pub fn prepare_for_insert(&self) -> Education {
        Education {
            id: Uuid::new_v4(),
            institution: self.institution.clone(),
            degree: self.degree.clone(),
            field: self.field.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
            achievements: self.achievements.clone(),
            created_at: Utc::now(),
        }
    }
}
