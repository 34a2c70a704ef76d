use crate::access::ProfileAccess;
use crate::client::{api::ProfileApi, error::ClientError};
use crate::entities::profile::Profile;
use crate::sections::{
    accomplishments::{AccomplishmentsSection, AccomplishmentsView, AchievementAction},
    skills::{SkillAction, SkillSection, SkillSectionView},
};

/// Owns one profile snapshot and keeps it in step with the API.
///
/// Sections only ever see the lists as props; their actions come back
/// through `dispatch_*`, which calls the API and applies the result. A failed
/// call leaves local state as it was.
pub struct ProfileContainer<A: ProfileApi> {
    api: A,
    profile: Profile,
    skills: SkillSection,
    accomplishments: AccomplishmentsSection,
}

impl<A: ProfileApi> ProfileContainer<A> {
    pub fn new(api: A, access: ProfileAccess) -> Self {
        ProfileContainer {
            api,
            profile: Profile::new(access.owner()),
            skills: SkillSection::new(access),
            accomplishments: AccomplishmentsSection::new(access),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn access(&self) -> ProfileAccess {
        self.skills.access()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub async fn load(&mut self) -> Result<&Profile, ClientError> {
        self.profile = self.api.profile(self.access().owner()).await?;
        Ok(&self.profile)
    }

    pub fn skill_section(&self) -> &SkillSection {
        &self.skills
    }

    pub fn skill_section_mut(&mut self) -> &mut SkillSection {
        &mut self.skills
    }

    pub fn accomplishments_section(&self) -> &AccomplishmentsSection {
        &self.accomplishments
    }

    pub fn accomplishments_section_mut(&mut self) -> &mut AccomplishmentsSection {
        &mut self.accomplishments
    }

    pub fn render_skills(&self) -> SkillSectionView {
        self.skills.render(&self.profile.skills)
    }

    pub fn render_accomplishments(&self) -> AccomplishmentsView {
        self.accomplishments.render(&self.profile.achievements)
    }

    pub async fn dispatch_skill(&mut self, action: SkillAction) -> Result<(), ClientError> {
        match action {
            SkillAction::Add(skill) => {
                self.profile.skills = self.api.add_skill(skill).await?;
            }
            SkillAction::Endorse { owner, skill_id } => {
                let endorsed = self.api.endorse_skill(owner, skill_id, None).await?;
                if let Some(slot) = self.profile.skills.iter_mut().find(|s| s.id == endorsed.id) {
                    *slot = endorsed;
                }
            }
            SkillAction::Delete { skill_id } => {
                self.profile.skills = self.api.delete_skill(skill_id).await?;
            }
        }
        Ok(())
    }

    pub async fn dispatch_achievement(&mut self, action: AchievementAction) -> Result<(), ClientError> {
        match action {
            AchievementAction::Add(achievement) => {
                self.profile.achievements = self.api.add_achievement(achievement).await?;
            }
            AchievementAction::Delete { achievement_id } => {
                self.profile.achievements = self.api.delete_achievement(achievement_id).await?;
            }
        }
        Ok(())
    }

    /// Submits the skill dialog, if it is open.
    pub async fn submit_skill(&mut self) -> Result<bool, ClientError> {
        match self.skills.submit() {
            Some(action) => self.dispatch_skill(action).await.map(|_| true),
            None => Ok(false),
        }
    }

    /// Endorses the skill rendered at `index`. Returns `false` when the viewer
    /// may not endorse or the index is out of range.
    pub async fn endorse_skill_at(&mut self, index: usize) -> Result<bool, ClientError> {
        match self.skills.endorse(&self.profile.skills, index) {
            Some(action) => self.dispatch_skill(action).await.map(|_| true),
            None => Ok(false),
        }
    }

    pub async fn delete_skill_at(&mut self, index: usize) -> Result<bool, ClientError> {
        match self.skills.delete(&self.profile.skills, index) {
            Some(action) => self.dispatch_skill(action).await.map(|_| true),
            None => Ok(false),
        }
    }

    pub async fn submit_achievement(&mut self) -> Result<bool, ClientError> {
        match self.accomplishments.submit() {
            Some(action) => self.dispatch_achievement(action).await.map(|_| true),
            None => Ok(false),
        }
    }

    pub async fn delete_achievement_at(&mut self, index: usize) -> Result<bool, ClientError> {
        match self.accomplishments.delete(&self.profile.achievements, index) {
            Some(action) => self.dispatch_achievement(action).await.map(|_| true),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::MockProfileApi;
    use crate::client::error::TransportDetail;
    use crate::entities::{
        achievement::NewAchievement,
        skill::{Endorsement, NewSkill, SkillCategory, SkillLevel},
    };
    use uuid::Uuid;

    fn javascript() -> NewSkill {
        NewSkill {
            name: "JavaScript".into(),
            level: SkillLevel::Advanced,
            category: SkillCategory::Technical,
        }
    }

    fn achievement(title: &str) -> NewAchievement {
        NewAchievement { title: title.into(), ..Default::default() }
    }

    fn rejected() -> ClientError {
        ClientError::Rejected(TransportDetail {
            status: Some(400),
            status_text: Some("Bad Request".into()),
            method: "POST".into(),
            url: "http://localhost/api/user/skills".into(),
            request_body: None,
            response_body: Some(r#"{"error":"Validation failed"}"#.into()),
            message: "HTTP status 400".into(),
        })
    }

    #[tokio::test]
    async fn load_replaces_the_snapshot() {
        let owner = Uuid::new_v4();
        let mut stored = Profile::new(owner);
        stored.skills.push(javascript().prepare_for_insert());

        let mut api = MockProfileApi::new();
        let returned = stored.clone();
        api.expect_profile()
            .withf(move |id| *id == owner)
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let mut container = ProfileContainer::new(api, ProfileAccess::own(owner));
        container.load().await.unwrap();

        assert_eq!(container.profile(), &stored);
        assert_eq!(container.render_skills().chips.len(), 1);
    }

    #[tokio::test]
    async fn submitted_skill_list_comes_from_the_server() {
        let owner = Uuid::new_v4();
        let mut api = MockProfileApi::new();
        api.expect_add_skill()
            .withf(|skill| skill.name == "JavaScript" && skill.level == SkillLevel::Advanced)
            .times(1)
            .returning(|skill| Ok(vec![skill.prepare_for_insert()]));

        let mut container = ProfileContainer::new(api, ProfileAccess::own(owner));
        let section = container.skill_section_mut();
        section.open_dialog();
        section.set_name("JavaScript");
        section.set_level(SkillLevel::Advanced);

        assert!(container.submit_skill().await.unwrap());
        assert_eq!(container.profile().skills.len(), 1);
        assert!(!container.skill_section().is_dialog_open());
    }

    #[tokio::test]
    async fn failed_add_leaves_the_list_untouched() {
        let owner = Uuid::new_v4();
        let mut api = MockProfileApi::new();
        api.expect_add_skill().returning(|_| Err(rejected()));

        let mut container = ProfileContainer::new(api, ProfileAccess::own(owner));
        let result = container.dispatch_skill(SkillAction::Add(NewSkill { name: String::new(), ..javascript() })).await;

        assert_eq!(result.unwrap_err().status(), Some(400));
        assert!(container.profile().skills.is_empty());
    }

    #[tokio::test]
    async fn endorse_replaces_only_the_endorsed_skill() {
        let viewer = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let first = javascript().prepare_for_insert();
        let second = NewSkill { name: "Rust".into(), ..javascript() }.prepare_for_insert();
        let target = second.id;

        let mut snapshot = Profile::new(owner);
        snapshot.skills = vec![first.clone(), second.clone()];

        let mut api = MockProfileApi::new();
        api.expect_profile().returning(move |_| Ok(snapshot.clone()));
        api.expect_endorse_skill()
            .withf(move |o, id, _| *o == owner && *id == target)
            .times(1)
            .returning(move |_, _, note| {
                let mut skill = second.clone();
                skill.endorsements.push(Endorsement::new(viewer, note));
                Ok(skill)
            });

        let mut container = ProfileContainer::new(api, ProfileAccess::new(viewer, owner));
        container.load().await.unwrap();

        assert!(container.endorse_skill_at(1).await.unwrap());

        let chips = container.render_skills().chips;
        assert_eq!(chips[0].endorsement_count, 0);
        assert_eq!(chips[1].endorsement_count, 1);
        assert_eq!(container.profile().skills[0], first);
    }

    #[tokio::test]
    async fn owner_cannot_endorse_and_nothing_is_sent() {
        let owner = Uuid::new_v4();
        let mut api = MockProfileApi::new();
        api.expect_endorse_skill().never();

        let mut container = ProfileContainer::new(api, ProfileAccess::own(owner));
        container.profile.skills.push(javascript().prepare_for_insert());

        assert!(!container.endorse_skill_at(0).await.unwrap());
    }

    #[tokio::test]
    async fn delete_by_position_sends_the_durable_id() {
        let owner = Uuid::new_v4();
        let achievements: Vec<_> = ["First", "Second", "Third"]
            .iter()
            .map(|title| achievement(title).prepare_for_insert())
            .collect();
        let doomed = achievements[1].id;
        let remaining: Vec<_> = achievements.iter().filter(|a| a.id != doomed).cloned().collect();

        let mut api = MockProfileApi::new();
        api.expect_delete_achievement()
            .withf(move |id| *id == doomed)
            .times(1)
            .returning(move |_| Ok(remaining.clone()));

        let mut container = ProfileContainer::new(api, ProfileAccess::own(owner));
        container.profile.achievements = achievements;

        assert!(container.delete_achievement_at(1).await.unwrap());
        assert!(!container.delete_achievement_at(5).await.unwrap());

        let titles: Vec<_> = container.profile().achievements.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["First", "Third"]);
    }

    #[tokio::test]
    async fn empty_achievement_title_is_submitted() {
        let owner = Uuid::new_v4();
        let mut api = MockProfileApi::new();
        api.expect_add_achievement()
            .withf(|a| a.title.is_empty())
            .times(1)
            .returning(|a| Ok(vec![a.prepare_for_insert()]));

        let mut container = ProfileContainer::new(api, ProfileAccess::own(owner));
        container.accomplishments_section_mut().open_dialog();

        assert!(container.submit_achievement().await.unwrap());
        assert_eq!(container.render_accomplishments().cards.len(), 1);
    }
}
