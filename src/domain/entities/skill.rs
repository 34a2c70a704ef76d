use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
    Language,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technical,
        SkillCategory::Soft,
        SkillCategory::Language,
        SkillCategory::Other,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endorsement {
    pub id: Uuid,
    pub endorsed_by: Uuid,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Endorsement {
    pub fn new(endorsed_by: Uuid, note: Option<String>) -> Self {
        Endorsement {
            id: Uuid::new_v4(),
            endorsed_by,
            note: note.filter(|n| !n.trim().is_empty()),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: SkillLevel,
    pub category: SkillCategory,
    #[serde(default)]
    pub endorsements: Vec<Endorsement>,
    pub created_at: DateTime<Utc>,
}

impl Skill {
    pub fn endorsement_count(&self) -> usize {
        self.endorsements.len()
    }

    pub fn is_endorsed_by(&self, user_id: Uuid) -> bool {
        self.endorsements.iter().any(|e| e.endorsed_by == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewSkill {
    #[validate(length(min = 1, message = "Skill name is required"))]
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
    #[serde(default)]
    pub category: SkillCategory,
}

impl NewSkill {
    pub fn prepare_for_insert(&self) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            level: self.level,
            category: self.category,
            endorsements: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndorseSkill {
    #[serde(default)]
    pub note: Option<String>,
}

/// Every skill endpoint answers with the owner's full, updated list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsResponse {
    pub skills: Vec<Skill>,
}
