use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementType {
    #[default]
    Award,
    Certification,
    Publication,
    Project,
    Other,
}

impl AchievementType {
    pub const ALL: [AchievementType; 5] = [
        AchievementType::Award,
        AchievementType::Certification,
        AchievementType::Publication,
        AchievementType::Project,
        AchievementType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementType::Award => "award",
            AchievementType::Certification => "certification",
            AchievementType::Publication => "publication",
            AchievementType::Project => "project",
            AchievementType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type")]
    pub kind: AchievementType,
    #[serde(default)]
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Achievement drafts are accepted as sent: an empty title is stored as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAchievement {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", default)]
    pub kind: AchievementType,
    #[serde(default)]
    pub url: Option<String>,
}

impl NewAchievement {
    pub fn prepare_for_insert(&self) -> Achievement {
        Achievement {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date,
            kind: self.kind,
            url: self.url.clone().filter(|u| !u.trim().is_empty()),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementsResponse {
    pub achievements: Vec<Achievement>,
}
