use uuid::Uuid;
use validator::Validate;

use crate::domain::access::ProfileAccess;
use crate::entities::{
    achievement::{Achievement, NewAchievement},
    availability::{Availability, UpdateAvailability},
    education::{Education, NewEducation},
    experience::{Experience, NewExperience},
    portfolio::{NewPortfolioItem, PortfolioItem},
    profile::Profile,
    skill::{EndorseSkill, Endorsement, NewSkill, Skill},
};
use crate::errors::AppError;
use crate::repositories::profile::ProfileRepository;

/// Profile edits. Every mutation is checked against the caller's access
/// before it reaches the repository.
pub struct ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub profile_repo: R,
}

impl<R> ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_repo: R) -> Self {
        ProfileHandler { profile_repo }
    }

    /// A user who never saved anything still has an (empty) profile.
    pub async fn get_profile(&self, owner: Uuid) -> Result<Profile, AppError> {
        let profile = self.profile_repo.get_profile(owner).await?;
        Ok(profile.unwrap_or_else(|| Profile::new(owner)))
    }

    pub async fn add_skill(
        &self,
        access: &ProfileAccess,
        request: NewSkill,
    ) -> Result<Vec<Skill>, AppError> {
        access.require_edit()?;
        request.validate()?;

        let skill = request.prepare_for_insert();
        tracing::info!(owner = %access.owner(), skill_id = %skill.id, "Adding skill");
        self.profile_repo.insert_skill(access.owner(), skill).await
    }

    pub async fn delete_skill(
        &self,
        access: &ProfileAccess,
        skill_id: Uuid,
    ) -> Result<Vec<Skill>, AppError> {
        access.require_edit()?;
        self.profile_repo.remove_skill(access.owner(), skill_id).await
    }

    pub async fn endorse_skill(
        &self,
        access: &ProfileAccess,
        skill_id: Uuid,
        request: EndorseSkill,
    ) -> Result<Skill, AppError> {
        access.require_endorse()?;

        let endorsement = Endorsement::new(access.viewer(), request.note);
        let skill = self.profile_repo
            .push_endorsement(access.owner(), skill_id, endorsement)
            .await?;

        tracing::info!(
            owner = %access.owner(),
            endorser = %access.viewer(),
            skill_id = %skill_id,
            endorsements = skill.endorsement_count(),
            "Skill endorsed"
        );
        Ok(skill)
    }

    /// No required-field checks: achievements are stored as submitted.
    pub async fn add_achievement(
        &self,
        access: &ProfileAccess,
        request: NewAchievement,
    ) -> Result<Vec<Achievement>, AppError> {
        access.require_edit()?;
        self.profile_repo
            .insert_achievement(access.owner(), request.prepare_for_insert())
            .await
    }

    pub async fn delete_achievement(
        &self,
        access: &ProfileAccess,
        achievement_id: Uuid,
    ) -> Result<Vec<Achievement>, AppError> {
        access.require_edit()?;
        self.profile_repo.remove_achievement(access.owner(), achievement_id).await
    }

    pub async fn add_experience(
        &self,
        access: &ProfileAccess,
        request: NewExperience,
    ) -> Result<Experience, AppError> {
        access.require_edit()?;
        request.validate()?;
        self.profile_repo
            .insert_experience(access.owner(), request.prepare_for_insert())
            .await
    }

    pub async fn add_education(
        &self,
        access: &ProfileAccess,
        request: NewEducation,
    ) -> Result<Education, AppError> {
        access.require_edit()?;
        request.validate()?;
        self.profile_repo
            .insert_education(access.owner(), request.prepare_for_insert())
            .await
    }

    pub async fn add_portfolio_item(
        &self,
        access: &ProfileAccess,
        request: NewPortfolioItem,
    ) -> Result<PortfolioItem, AppError> {
        access.require_edit()?;
        request.validate()?;
        self.profile_repo
            .insert_portfolio_item(access.owner(), request.prepare_for_insert())
            .await
    }

    pub async fn update_availability(
        &self,
        access: &ProfileAccess,
        request: UpdateAvailability,
    ) -> Result<Availability, AppError> {
        access.require_edit()?;
        self.profile_repo.update_availability(access.owner(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::skill::{SkillCategory, SkillLevel};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub ProfileRepo {}

        #[async_trait]
        impl ProfileRepository for ProfileRepo {
            async fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;
            async fn insert_skill(&self, user_id: Uuid, skill: Skill) -> Result<Vec<Skill>, AppError>;
            async fn remove_skill(&self, user_id: Uuid, skill_id: Uuid) -> Result<Vec<Skill>, AppError>;
            async fn push_endorsement(&self, user_id: Uuid, skill_id: Uuid, endorsement: Endorsement) -> Result<Skill, AppError>;
            async fn insert_achievement(&self, user_id: Uuid, achievement: Achievement) -> Result<Vec<Achievement>, AppError>;
            async fn remove_achievement(&self, user_id: Uuid, achievement_id: Uuid) -> Result<Vec<Achievement>, AppError>;
            async fn insert_experience(&self, user_id: Uuid, experience: Experience) -> Result<Experience, AppError>;
            async fn insert_education(&self, user_id: Uuid, education: Education) -> Result<Education, AppError>;
            async fn insert_portfolio_item(&self, user_id: Uuid, item: PortfolioItem) -> Result<PortfolioItem, AppError>;
            async fn update_availability(&self, user_id: Uuid, update: UpdateAvailability) -> Result<Availability, AppError>;
        }
    }

    fn javascript() -> NewSkill {
        NewSkill {
            name: "JavaScript".into(),
            level: SkillLevel::Advanced,
            category: SkillCategory::Technical,
        }
    }

    #[tokio::test]
    async fn add_skill_writes_to_the_owners_profile() {
        let owner = Uuid::new_v4();
        let mut repo = MockProfileRepo::new();
        repo.expect_insert_skill()
            .withf(move |user_id, skill| *user_id == owner && skill.name == "JavaScript")
            .times(1)
            .returning(|_, skill| Ok(vec![skill]));

        let skills = ProfileHandler::new(repo)
            .add_skill(&ProfileAccess::own(owner), javascript())
            .await
            .unwrap();

        assert_eq!(skills.len(), 1);
    }

    #[tokio::test]
    async fn empty_skill_name_never_reaches_the_repository() {
        let mut repo = MockProfileRepo::new();
        repo.expect_insert_skill().never();

        let result = ProfileHandler::new(repo)
            .add_skill(
                &ProfileAccess::own(Uuid::new_v4()),
                NewSkill { name: String::new(), ..javascript() },
            )
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn visitors_cannot_edit() {
        let mut repo = MockProfileRepo::new();
        repo.expect_insert_achievement().never();

        let access = ProfileAccess::new(Uuid::new_v4(), Uuid::new_v4());
        let result = ProfileHandler::new(repo)
            .add_achievement(&access, NewAchievement::default())
            .await;

        assert!(matches!(result, Err(AppError::ForbiddenAccess(_))));
    }

    #[tokio::test]
    async fn owners_cannot_endorse_themselves() {
        let mut repo = MockProfileRepo::new();
        repo.expect_push_endorsement().never();

        let result = ProfileHandler::new(repo)
            .endorse_skill(
                &ProfileAccess::own(Uuid::new_v4()),
                Uuid::new_v4(),
                EndorseSkill::default(),
            )
            .await;

        assert!(matches!(result, Err(AppError::ForbiddenAccess(_))));
    }

    #[tokio::test]
    async fn endorsement_records_the_viewer_and_note() {
        let viewer = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let skill = javascript().prepare_for_insert();
        let skill_id = skill.id;

        let mut repo = MockProfileRepo::new();
        repo.expect_push_endorsement()
            .withf(move |user_id, id, endorsement| {
                *user_id == owner
                    && *id == skill_id
                    && endorsement.endorsed_by == viewer
                    && endorsement.note.as_deref() == Some("Great JavaScript developer!")
            })
            .times(1)
            .returning(move |_, _, endorsement| {
                let mut skill = skill.clone();
                skill.endorsements.push(endorsement);
                Ok(skill)
            });

        let endorsed = ProfileHandler::new(repo)
            .endorse_skill(
                &ProfileAccess::new(viewer, owner),
                skill_id,
                EndorseSkill { note: Some("Great JavaScript developer!".into()) },
            )
            .await
            .unwrap();

        assert_eq!(endorsed.endorsement_count(), 1);
    }

    #[tokio::test]
    async fn missing_profile_reads_as_empty() {
        let owner = Uuid::new_v4();
        let mut repo = MockProfileRepo::new();
        repo.expect_get_profile().returning(|_| Ok(None));

        let profile = ProfileHandler::new(repo).get_profile(owner).await.unwrap();

        assert_eq!(profile, Profile::new(owner));
    }
}
