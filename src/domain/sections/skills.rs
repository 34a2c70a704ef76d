use serde::Serialize;
use uuid::Uuid;

use crate::domain::access::ProfileAccess;
use crate::entities::skill::{NewSkill, Skill, SkillCategory, SkillLevel};

/// Chip color for a skill level. The mapping is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChipColor {
    Neutral,
    Info,
    Warning,
    Danger,
}

impl From<SkillLevel> for ChipColor {
    fn from(level: SkillLevel) -> Self {
        match level {
            SkillLevel::Beginner => ChipColor::Neutral,
            SkillLevel::Intermediate => ChipColor::Info,
            SkillLevel::Advanced => ChipColor::Warning,
            SkillLevel::Expert => ChipColor::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillChip {
    pub skill_id: Uuid,
    pub label: String,
    pub color: ChipColor,
    pub endorsement_count: usize,
    pub clickable: bool,
    pub deletable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillSectionView {
    pub chips: Vec<SkillChip>,
    pub show_add_control: bool,
    pub dialog_open: bool,
    pub submit_enabled: bool,
}

/// The compose form behind the "add skill" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillDraft {
    pub name: String,
    pub level: SkillLevel,
    pub category: SkillCategory,
}

impl From<SkillDraft> for NewSkill {
    fn from(draft: SkillDraft) -> Self {
        NewSkill {
            name: draft.name,
            level: draft.level,
            category: draft.category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillAction {
    Add(NewSkill),
    Endorse { owner: Uuid, skill_id: Uuid },
    Delete { skill_id: Uuid },
}

/// Headless skills section. The skill list is not owned here: every method
/// that needs it takes the list the container currently holds.
#[derive(Debug, Clone)]
pub struct SkillSection {
    access: ProfileAccess,
    dialog_open: bool,
    draft: SkillDraft,
}

impl SkillSection {
    pub fn new(access: ProfileAccess) -> Self {
        SkillSection {
            access,
            dialog_open: false,
            draft: SkillDraft::default(),
        }
    }

    pub fn access(&self) -> ProfileAccess {
        self.access
    }

    pub fn show_add_control(&self) -> bool {
        self.access.can_edit()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn draft(&self) -> &SkillDraft {
        &self.draft
    }

    /// Opens the compose dialog; a no-op for viewers without the add control.
    pub fn open_dialog(&mut self) {
        if self.show_add_control() {
            self.dialog_open = true;
        }
    }

    /// Closing without submitting keeps whatever was typed.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_level(&mut self, level: SkillLevel) {
        self.draft.level = level;
    }

    pub fn set_category(&mut self, category: SkillCategory) {
        self.draft.category = category;
    }

    /// State of the dialog's submit button.
    pub fn can_submit(&self) -> bool {
        !self.draft.name.is_empty()
    }

    /// Emits the draft and resets the form. The name is not checked here, only
    /// the button is disabled; the server rejects an empty name.
    pub fn submit(&mut self) -> Option<SkillAction> {
        if !self.dialog_open {
            return None;
        }

        let draft = std::mem::take(&mut self.draft);
        self.dialog_open = false;
        Some(SkillAction::Add(draft.into()))
    }

    /// Clicking a chip endorses it, for viewers who are not the owner.
    pub fn endorse(&self, skills: &[Skill], index: usize) -> Option<SkillAction> {
        if !self.access.can_endorse() {
            return None;
        }
        skills.get(index).map(|skill| SkillAction::Endorse {
            owner: self.access.owner(),
            skill_id: skill.id,
        })
    }

    pub fn delete(&self, skills: &[Skill], index: usize) -> Option<SkillAction> {
        if !self.access.can_edit() {
            return None;
        }
        skills.get(index).map(|skill| SkillAction::Delete { skill_id: skill.id })
    }

    pub fn render(&self, skills: &[Skill]) -> SkillSectionView {
        let chips = skills
            .iter()
            .map(|skill| SkillChip {
                skill_id: skill.id,
                label: skill.name.clone(),
                color: skill.level.into(),
                endorsement_count: skill.endorsement_count(),
                clickable: self.access.can_endorse(),
                deletable: self.access.can_edit(),
            })
            .collect();

        SkillSectionView {
            chips,
            show_add_control: self.show_add_control(),
            dialog_open: self.dialog_open,
            submit_enabled: self.can_submit(),
        }
    }
}
