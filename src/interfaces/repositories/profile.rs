use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::{
        achievement::Achievement,
        availability::{Availability, UpdateAvailability},
        education::Education,
        experience::Experience,
        portfolio::PortfolioItem,
        profile::Profile,
        skill::{Endorsement, Skill},
    },
    errors::AppError,
    repositories::memory_repo::MemoryProfileRepo,
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetches a profile; `None` until the user first saves something.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Appends a skill and returns the owner's full skill list
    async fn insert_skill(&self, user_id: Uuid, skill: Skill) -> Result<Vec<Skill>, AppError>;

    /// Removes a skill and returns the remaining list
    async fn remove_skill(&self, user_id: Uuid, skill_id: Uuid) -> Result<Vec<Skill>, AppError>;

    /// Attaches an endorsement and returns the updated skill
    async fn push_endorsement(
        &self,
        user_id: Uuid,
        skill_id: Uuid,
        endorsement: Endorsement,
    ) -> Result<Skill, AppError>;

    async fn insert_achievement(
        &self,
        user_id: Uuid,
        achievement: Achievement,
    ) -> Result<Vec<Achievement>, AppError>;

    async fn remove_achievement(
        &self,
        user_id: Uuid,
        achievement_id: Uuid,
    ) -> Result<Vec<Achievement>, AppError>;

    async fn insert_experience(&self, user_id: Uuid, experience: Experience) -> Result<Experience, AppError>;

    async fn insert_education(&self, user_id: Uuid, education: Education) -> Result<Education, AppError>;

    async fn insert_portfolio_item(&self, user_id: Uuid, item: PortfolioItem) -> Result<PortfolioItem, AppError>;

    async fn update_availability(
        &self,
        user_id: Uuid,
        update: UpdateAvailability,
    ) -> Result<Availability, AppError>;
}

impl MemoryProfileRepo {
    pub fn new() -> Self {
        MemoryProfileRepo::default()
    }

    /// Runs `f` on the user's profile, creating it on first write.
    fn with_profile<T>(&self, user_id: Uuid, f: impl FnOnce(&mut Profile) -> T) -> T {
        let mut entry = self.profiles
            .entry(user_id)
            .or_insert_with(|| Profile::new(user_id));
        f(entry.value_mut())
    }

    /// Runs `f` on an existing profile only.
    fn with_existing<T>(
        &self,
        user_id: Uuid,
        missing: &str,
        f: impl FnOnce(&mut Profile) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        match self.profiles.get_mut(&user_id) {
            Some(mut profile) => f(profile.value_mut()),
            None => Err(AppError::NotFound(missing.to_string())),
        }
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepo {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.get(&user_id).map(|p| p.value().clone()))
    }

    async fn insert_skill(&self, user_id: Uuid, skill: Skill) -> Result<Vec<Skill>, AppError> {
        Ok(self.with_profile(user_id, |profile| {
            profile.skills.push(skill);
            profile.skills.clone()
        }))
    }

    async fn remove_skill(&self, user_id: Uuid, skill_id: Uuid) -> Result<Vec<Skill>, AppError> {
        self.with_existing(user_id, "Skill not found", |profile| {
            profile.remove_skill(skill_id)?;
            Ok(profile.skills.clone())
        })
    }

    async fn push_endorsement(
        &self,
        user_id: Uuid,
        skill_id: Uuid,
        endorsement: Endorsement,
    ) -> Result<Skill, AppError> {
        self.with_existing(user_id, "Skill not found", |profile| {
            profile.endorse_skill(skill_id, endorsement).cloned()
        })
    }

    async fn insert_achievement(
        &self,
        user_id: Uuid,
        achievement: Achievement,
    ) -> Result<Vec<Achievement>, AppError> {
        Ok(self.with_profile(user_id, |profile| {
            profile.achievements.push(achievement);
            profile.achievements.clone()
        }))
    }

    async fn remove_achievement(
        &self,
        user_id: Uuid,
        achievement_id: Uuid,
    ) -> Result<Vec<Achievement>, AppError> {
        self.with_existing(user_id, "Achievement not found", |profile| {
            profile.remove_achievement(achievement_id)?;
            Ok(profile.achievements.clone())
        })
    }

    async fn insert_experience(&self, user_id: Uuid, experience: Experience) -> Result<Experience, AppError> {
        Ok(self.with_profile(user_id, |profile| {
            profile.experience.push(experience.clone());
            experience
        }))
    }

    async fn insert_education(&self, user_id: Uuid, education: Education) -> Result<Education, AppError> {
        Ok(self.with_profile(user_id, |profile| {
            profile.education.push(education.clone());
            education
        }))
    }

    async fn insert_portfolio_item(&self, user_id: Uuid, item: PortfolioItem) -> Result<PortfolioItem, AppError> {
        Ok(self.with_profile(user_id, |profile| {
            profile.portfolio.push(item.clone());
            item
        }))
    }

    async fn update_availability(
        &self,
        user_id: Uuid,
        update: UpdateAvailability,
    ) -> Result<Availability, AppError> {
        Ok(self.with_profile(user_id, |profile| profile.update_availability(&update)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::skill::{NewSkill, SkillCategory, SkillLevel};

    fn new_skill(name: &str) -> Skill {
        NewSkill {
            name: name.into(),
            level: SkillLevel::Intermediate,
            category: SkillCategory::Technical,
        }
        .prepare_for_insert()
    }

    #[tokio::test]
    async fn insert_skill_returns_full_list_with_new_skill_last() {
        let repo = MemoryProfileRepo::new();
        let user = Uuid::new_v4();

        repo.insert_skill(user, new_skill("Rust")).await.unwrap();
        let skills = repo.insert_skill(user, new_skill("Go")).await.unwrap();

        assert_eq!(skills.len(), 2);
        assert_eq!(skills.last().unwrap().name, "Go");
    }

    #[tokio::test]
    async fn endorsing_in_missing_profile_is_not_found() {
        let repo = MemoryProfileRepo::new();

        let result = repo
            .push_endorsement(Uuid::new_v4(), Uuid::new_v4(), Endorsement::new(Uuid::new_v4(), None))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn availability_updates_persist() {
        let repo = MemoryProfileRepo::new();
        let user = Uuid::new_v4();

        repo.update_availability(user, UpdateAvailability::all(true, false, true)).await.unwrap();
        let profile = repo.get_profile(user).await.unwrap().unwrap();

        assert!(profile.availability.for_mentoring);
        assert!(!profile.availability.for_job_opportunities);
        assert!(profile.availability.for_networking);
    }
}
