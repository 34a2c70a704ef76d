use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::client::{
    api::{ApiClient, ProfileApi},
    error::{ClientError, TransportDetail},
};
use crate::entities::{
    availability::UpdateAvailability,
    education::NewEducation,
    experience::{EmploymentType, NewExperience},
    portfolio::{NewPortfolioItem, PortfolioType},
    skill::{NewSkill, SkillCategory, SkillLevel},
    user::NewUser,
};

/// The smoke scenario, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmokeStep {
    Login,
    AddSkill,
    AddExperience,
    AddEducation,
    AddPortfolio,
    EndorseSkill,
    UpdateAvailability,
}

impl SmokeStep {
    pub const ALL: [SmokeStep; 7] = [
        SmokeStep::Login,
        SmokeStep::AddSkill,
        SmokeStep::AddExperience,
        SmokeStep::AddEducation,
        SmokeStep::AddPortfolio,
        SmokeStep::EndorseSkill,
        SmokeStep::UpdateAvailability,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SmokeStep::Login => "login",
            SmokeStep::AddSkill => "add-skill",
            SmokeStep::AddExperience => "add-experience",
            SmokeStep::AddEducation => "add-education",
            SmokeStep::AddPortfolio => "add-portfolio",
            SmokeStep::EndorseSkill => "endorse-skill",
            SmokeStep::UpdateAvailability => "update-availability",
        }
    }
}

impl fmt::Display for SmokeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// What the runner sends. `SmokeConfig::new` fills in the reference scenario.
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    pub base_url: String,
    pub owner: Credentials,
    /// A second account for the endorse step. Without it the runner registers
    /// a throwaway account, since the server refuses self-endorsement.
    pub endorser: Option<Credentials>,
    pub skill: NewSkill,
    pub experience: NewExperience,
    pub education: NewEducation,
    pub portfolio: NewPortfolioItem,
    pub endorsement_note: Option<String>,
    pub availability: UpdateAvailability,
}

impl SmokeConfig {
    pub fn new(base_url: impl Into<String>, owner: Credentials) -> Self {
        SmokeConfig {
            base_url: base_url.into(),
            owner,
            endorser: None,
            skill: NewSkill {
                name: "JavaScript".to_string(),
                level: SkillLevel::Advanced,
                category: SkillCategory::Technical,
            },
            experience: NewExperience {
                title: "Senior Developer".to_string(),
                company: "Tech Corp".to_string(),
                location: "Remote".to_string(),
                employment_type: EmploymentType::FullTime,
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
                end_date: None,
                description: "Leading the web platform team".to_string(),
                is_current_position: true,
            },
            education: NewEducation {
                institution: "University of Technology".to_string(),
                degree: "Bachelor of Science".to_string(),
                field: "Computer Science".to_string(),
                start_year: 2014,
                end_year: Some(2018),
                achievements: vec!["Dean's List".to_string(), "Graduated with Honors".to_string()],
            },
            portfolio: NewPortfolioItem {
                title: "E-commerce Platform".to_string(),
                description: "Full-stack storefront with payments".to_string(),
                kind: PortfolioType::Project,
                technologies: vec![
                    "React".to_string(),
                    "Node.js".to_string(),
                    "MongoDB".to_string(),
                ],
                url: Some("https://github.com/example/ecommerce".to_string()),
            },
            endorsement_note: Some("Great JavaScript developer!".to_string()),
            availability: UpdateAvailability::all(true, true, false),
        }
    }

    pub fn with_endorser(mut self, endorser: Credentials) -> Self {
        self.endorser = Some(endorser);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum StepOutcome {
    Passed { summary: String },
    Failed { error: String, detail: Option<TransportDetail> },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepResult {
    pub step: SmokeStep,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmokeReport {
    pub steps: Vec<StepResult>,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.steps.iter().all(|r| matches!(r.outcome, StepOutcome::Passed { .. }))
    }

    pub fn first_failure(&self) -> Option<&StepResult> {
        self.steps.iter().find(|r| matches!(r.outcome, StepOutcome::Failed { .. }))
    }

    pub fn outcome(&self, step: SmokeStep) -> Option<&StepOutcome> {
        self.steps.iter().find(|r| r.step == step).map(|r| &r.outcome)
    }
}

impl fmt::Display for SmokeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.steps {
            match &result.outcome {
                StepOutcome::Passed { summary } => {
                    writeln!(f, "PASS  {:<20} {}", result.step, summary)?
                }
                StepOutcome::Failed { error, .. } => {
                    writeln!(f, "FAIL  {:<20} {}", result.step, error)?
                }
                StepOutcome::Skipped => writeln!(f, "SKIP  {}", result.step)?,
            }
        }
        Ok(())
    }
}

/// Runs the scenario step by step. The first failure skips everything after it.
pub struct SmokeRunner {
    config: SmokeConfig,
    client: ApiClient,
    owner_id: Option<Uuid>,
    skill_id: Option<Uuid>,
}

impl SmokeRunner {
    pub fn new(config: SmokeConfig) -> Result<Self, ClientError> {
        let client = ApiClient::new(&config.base_url)?;
        Ok(SmokeRunner {
            config,
            client,
            owner_id: None,
            skill_id: None,
        })
    }

    pub async fn run(mut self) -> SmokeReport {
        let mut steps = Vec::with_capacity(SmokeStep::ALL.len());
        let mut failed = false;

        for step in SmokeStep::ALL {
            if failed {
                steps.push(StepResult { step, outcome: StepOutcome::Skipped });
                continue;
            }

            let outcome = match self.run_step(step).await {
                Ok(summary) => {
                    tracing::info!(step = %step, "{}", summary);
                    StepOutcome::Passed { summary }
                }
                Err(e) => {
                    failed = true;
                    let detail = e.detail().cloned();
                    match &detail {
                        Some(d) => tracing::error!(
                            step = %step,
                            status = ?d.status,
                            status_text = ?d.status_text,
                            method = %d.method,
                            url = %d.url,
                            request_body = ?d.request_body,
                            "{}",
                            d.reason()
                        ),
                        None => tracing::error!(step = %step, "{}", e),
                    }
                    StepOutcome::Failed { error: e.to_string(), detail }
                }
            };
            steps.push(StepResult { step, outcome });
        }

        SmokeReport { steps }
    }

    async fn run_step(&mut self, step: SmokeStep) -> Result<String, ClientError> {
        match step {
            SmokeStep::Login => {
                let auth = self
                    .client
                    .login(&self.config.owner.email, &self.config.owner.password)
                    .await?;
                self.owner_id = Some(auth.user.id);
                Ok(format!("logged in as {} ({})", auth.user.email, auth.user.id))
            }
            SmokeStep::AddSkill => {
                let skills = self.client.add_skill(self.config.skill.clone()).await?;
                let last = skills
                    .last()
                    .ok_or_else(|| empty_skill_list(self.client.base_url(), &self.config.skill))?;
                self.skill_id = Some(last.id);
                Ok(format!("added skill {} ({} total)", last.id, skills.len()))
            }
            SmokeStep::AddExperience => {
                let experience = self.client.add_experience(self.config.experience.clone()).await?;
                Ok(format!("added experience {}", experience.id))
            }
            SmokeStep::AddEducation => {
                let education = self.client.add_education(self.config.education.clone()).await?;
                Ok(format!("added education {}", education.id))
            }
            SmokeStep::AddPortfolio => {
                let item = self.client.add_portfolio(self.config.portfolio.clone()).await?;
                Ok(format!("added portfolio item {}", item.id))
            }
            SmokeStep::EndorseSkill => {
                let owner = self.owner_id.ok_or(ClientError::NotAuthenticated)?;
                let skill_id = self.skill_id.ok_or_else(|| {
                    ClientError::Encode("no skill id for the endorse path".to_string())
                })?;

                let endorser = match &self.config.endorser {
                    Some(endorser) => endorser.clone(),
                    None => self.register_throwaway_endorser().await?,
                };

                let mut endorser_client = ApiClient::new(&self.config.base_url)?;
                endorser_client.login(&endorser.email, &endorser.password).await?;
                let skill = endorser_client
                    .endorse_skill(owner, skill_id, self.config.endorsement_note.clone())
                    .await?;

                Ok(format!(
                    "endorsed skill {} as {} ({} endorsements)",
                    skill.id,
                    endorser.email,
                    skill.endorsement_count()
                ))
            }
            SmokeStep::UpdateAvailability => {
                let availability = self.client.update_availability(self.config.availability).await?;
                Ok(format!(
                    "availability mentoring={} jobs={} networking={}",
                    availability.for_mentoring,
                    availability.for_job_opportunities,
                    availability.for_networking
                ))
            }
        }
    }

    /// Owners may not endorse their own skills, so a run without a configured
    /// endorser signs up a fresh account for that one step.
    async fn register_throwaway_endorser(&self) -> Result<Credentials, ClientError> {
        let credentials = throwaway_endorser();
        let user = NewUser {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
            name: "Smoke Endorser".to_string(),
        };

        let created = self.client.register(&user).await?;
        tracing::info!(
            user_id = %created.id,
            email = %created.email,
            "Registered throwaway endorser"
        );
        Ok(credentials)
    }
}

fn throwaway_endorser() -> Credentials {
    let id = Uuid::new_v4().simple().to_string();
    Credentials::new(
        format!("smoke-endorser-{}@example.com", &id[..12]),
        format!("Sm0ke#{}!Qz", id),
    )
}

fn empty_skill_list(base_url: &str, skill: &NewSkill) -> ClientError {
    ClientError::Decode(TransportDetail {
        status: None,
        status_text: None,
        method: "POST".to_string(),
        url: format!("{}/user/skills", base_url),
        request_body: serde_json::to_value(skill).ok(),
        response_body: Some(r#"{"skills":[]}"#.to_string()),
        message: "skill list is empty".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(step: SmokeStep, outcome: StepOutcome) -> StepResult {
        StepResult { step, outcome }
    }

    #[test]
    fn steps_run_in_contract_order() {
        let names: Vec<_> = SmokeStep::ALL.iter().map(SmokeStep::name).collect();
        assert_eq!(
            names,
            [
                "login",
                "add-skill",
                "add-experience",
                "add-education",
                "add-portfolio",
                "endorse-skill",
                "update-availability",
            ]
        );
    }

    #[test]
    fn reference_scenario_defaults() {
        let config = SmokeConfig::new(
            "http://localhost:8080/api",
            Credentials::new("test@example.com", "password123"),
        );

        assert_eq!(config.skill.name, "JavaScript");
        assert_eq!(config.skill.level, SkillLevel::Advanced);
        assert_eq!(config.endorsement_note.as_deref(), Some("Great JavaScript developer!"));
        assert!(config.endorser.is_none());
    }

    #[test]
    fn report_passes_only_when_every_step_passed() {
        let passed = StepOutcome::Passed { summary: "ok".into() };
        let all_passed = SmokeReport {
            steps: SmokeStep::ALL.iter().map(|s| result(*s, passed.clone())).collect(),
        };
        assert!(all_passed.passed());
        assert!(all_passed.first_failure().is_none());

        let partial = SmokeReport {
            steps: vec![
                result(SmokeStep::Login, passed.clone()),
                result(
                    SmokeStep::AddSkill,
                    StepOutcome::Failed { error: "boom".into(), detail: None },
                ),
                result(SmokeStep::AddExperience, StepOutcome::Skipped),
            ],
        };
        assert!(!partial.passed());
        assert_eq!(partial.first_failure().map(|r| r.step), Some(SmokeStep::AddSkill));
        assert_eq!(partial.outcome(SmokeStep::AddExperience), Some(&StepOutcome::Skipped));
    }

    #[test]
    fn empty_skill_list_names_the_exchange() {
        let config = SmokeConfig::new(
            "http://localhost:8080/api",
            Credentials::new("test@example.com", "password123"),
        );
        let err = empty_skill_list("http://localhost:8080/api", &config.skill);
        let detail = err.detail().unwrap();

        assert_eq!(detail.method, "POST");
        assert_eq!(detail.url, "http://localhost:8080/api/user/skills");
        assert_eq!(detail.request_body.as_ref().unwrap()["name"], "JavaScript");
        assert_eq!(detail.reason(), r#"{"skills":[]}"#);
    }

    #[test]
    fn throwaway_endorsers_are_unique_and_strong() {
        let first = throwaway_endorser();
        let second = throwaway_endorser();

        assert_ne!(first.email, second.email);
        assert!(crate::password::validate_password_strength(&first.password).is_ok());
    }

    #[test]
    fn report_serializes_flat() {
        let report = SmokeReport {
            steps: vec![result(SmokeStep::Login, StepOutcome::Skipped)],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["step"], "login");
        assert_eq!(json["steps"][0]["outcome"], "skipped");
    }

    #[tokio::test]
    async fn unreachable_server_fails_fast() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let config = SmokeConfig::new(
            "http://127.0.0.1:9/api",
            Credentials::new("test@example.com", "password123"),
        );
        let report = SmokeRunner::new(config).unwrap().run().await;

        assert!(matches!(report.outcome(SmokeStep::Login), Some(StepOutcome::Failed { .. })));
        assert!(report.steps[1..].iter().all(|r| r.outcome == StepOutcome::Skipped));
    }
}
