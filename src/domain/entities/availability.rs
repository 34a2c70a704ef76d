use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub for_mentoring: bool,
    pub for_job_opportunities: bool,
    pub for_networking: bool,
}

/// PATCH body: each flag is independent, absent flags keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailability {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_mentoring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_job_opportunities: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_networking: Option<bool>,
}

impl UpdateAvailability {
    pub fn all(for_mentoring: bool, for_job_opportunities: bool, for_networking: bool) -> Self {
        UpdateAvailability {
            for_mentoring: Some(for_mentoring),
            for_job_opportunities: Some(for_job_opportunities),
            for_networking: Some(for_networking),
        }
    }

    pub fn apply_to(&self, availability: &mut Availability) {
        if let Some(flag) = self.for_mentoring {
            availability.for_mentoring = flag;
        }
        if let Some(flag) = self.for_job_opportunities {
            availability.for_job_opportunities = flag;
        }
        if let Some(flag) = self.for_networking {
            availability.for_networking = flag;
        }
    }
}
