use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{
    achievement::Achievement,
    availability::{Availability, UpdateAvailability},
    education::Education,
    experience::Experience,
    portfolio::PortfolioItem,
    skill::{Endorsement, Skill},
};
use crate::errors::AppError;

/// Everything a user shows on their profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: Uuid,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub portfolio: Vec<PortfolioItem>,
    #[serde(default)]
    pub availability: Availability,
}

impl Profile {
    pub fn new(user_id: Uuid) -> Self {
        Profile {
            user_id,
            skills: Vec::new(),
            achievements: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            portfolio: Vec::new(),
            availability: Availability::default(),
        }
    }

    pub fn skill(&self, skill_id: Uuid) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == skill_id)
    }

    pub fn remove_skill(&mut self, skill_id: Uuid) -> Result<Skill, AppError> {
        let position = self
            .skills
            .iter()
            .position(|s| s.id == skill_id)
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;

        Ok(self.skills.remove(position))
    }

    /// Appends an endorsement; a user endorses a given skill at most once.
    pub fn endorse_skill(
        &mut self,
        skill_id: Uuid,
        endorsement: Endorsement,
    ) -> Result<&Skill, AppError> {
        let skill = self
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;

        if skill.is_endorsed_by(endorsement.endorsed_by) {
            return Err(AppError::Conflict("Skill already endorsed by this user".to_string()));
        }

        skill.endorsements.push(endorsement);
        Ok(skill)
    }

    /// Removes by id; `Vec::remove` keeps the relative order of the rest.
    pub fn remove_achievement(&mut self, achievement_id: Uuid) -> Result<Achievement, AppError> {
        let position = self
            .achievements
            .iter()
            .position(|a| a.id == achievement_id)
            .ok_or_else(|| AppError::NotFound("Achievement not found".to_string()))?;

        Ok(self.achievements.remove(position))
    }

    pub fn update_availability(&mut self, update: &UpdateAvailability) -> Availability {
        update.apply_to(&mut self.availability);
        self.availability
    }
}
