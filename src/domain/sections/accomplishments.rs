use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::access::ProfileAccess;
use crate::entities::achievement::{Achievement, AchievementType, NewAchievement};

pub const DETAILS_LINK_LABEL: &str = "View Details";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsLink {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementCard {
    pub achievement_id: Uuid,
    pub title: String,
    pub type_badge: String,
    pub description: String,
    pub date_label: Option<String>,
    pub details_link: Option<DetailsLink>,
    pub show_delete_control: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccomplishmentsView {
    pub cards: Vec<AchievementCard>,
    pub show_add_control: bool,
    pub dialog_open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AchievementDraft {
    pub title: String,
    pub description: String,
    pub date: Option<NaiveDate>,
    pub kind: AchievementType,
    pub url: Option<String>,
}

impl From<AchievementDraft> for NewAchievement {
    fn from(draft: AchievementDraft) -> Self {
        NewAchievement {
            title: draft.title,
            description: draft.description,
            date: draft.date,
            kind: draft.kind,
            url: draft.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AchievementAction {
    Add(NewAchievement),
    Delete { achievement_id: Uuid },
}

/// "January 2024" style label used on cards.
pub fn month_year(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

#[derive(Debug, Clone)]
pub struct AccomplishmentsSection {
    access: ProfileAccess,
    dialog_open: bool,
    draft: AchievementDraft,
}

impl AccomplishmentsSection {
    pub fn new(access: ProfileAccess) -> Self {
        AccomplishmentsSection {
            access,
            dialog_open: false,
            draft: AchievementDraft::default(),
        }
    }

    pub fn show_add_control(&self) -> bool {
        self.access.can_edit()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn draft(&self) -> &AchievementDraft {
        &self.draft
    }

    pub fn open_dialog(&mut self) {
        if self.show_add_control() {
            self.dialog_open = true;
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.draft.date = date;
    }

    pub fn set_kind(&mut self, kind: AchievementType) {
        self.draft.kind = kind;
    }

    pub fn set_url(&mut self, url: Option<String>) {
        self.draft.url = url;
    }

    /// Sends the form as typed, with no required-field checks, then resets it.
    pub fn submit(&mut self) -> Option<AchievementAction> {
        if !self.dialog_open {
            return None;
        }

        let draft = std::mem::take(&mut self.draft);
        self.dialog_open = false;
        Some(AchievementAction::Add(draft.into()))
    }

    /// Resolves a position in the rendered list to the achievement's id.
    pub fn delete(&self, achievements: &[Achievement], index: usize) -> Option<AchievementAction> {
        if !self.access.can_edit() {
            return None;
        }
        achievements
            .get(index)
            .map(|a| AchievementAction::Delete { achievement_id: a.id })
    }

    pub fn render(&self, achievements: &[Achievement]) -> AccomplishmentsView {
        let cards = achievements
            .iter()
            .map(|a| AchievementCard {
                achievement_id: a.id,
                title: a.title.clone(),
                type_badge: a.kind.as_str().to_uppercase(),
                description: a.description.clone(),
                date_label: a.date.map(month_year),
                details_link: a
                    .url
                    .as_ref()
                    .filter(|u| !u.is_empty())
                    .map(|href| DetailsLink { label: DETAILS_LINK_LABEL, href: href.clone() }),
                show_delete_control: self.access.can_edit(),
            })
            .collect();

        AccomplishmentsView {
            cards,
            show_add_control: self.show_add_control(),
            dialog_open: self.dialog_open,
        }
    }
}
