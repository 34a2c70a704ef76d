use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::client::error::{redact, ClientError, TransportDetail};
use crate::entities::{
    achievement::{Achievement, AchievementsResponse, NewAchievement},
    availability::{Availability, UpdateAvailability},
    education::{Education, NewEducation},
    experience::{Experience, NewExperience},
    portfolio::{NewPortfolioItem, PortfolioItem},
    profile::Profile,
    skill::{EndorseSkill, NewSkill, Skill, SkillsResponse},
    token::AuthResponse,
    user::{LoginUser, NewUser, UserResponse},
};

/// Profile calls made on behalf of the logged-in user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<Profile, ClientError>;
    async fn add_skill(&self, skill: NewSkill) -> Result<Vec<Skill>, ClientError>;
    async fn delete_skill(&self, skill_id: Uuid) -> Result<Vec<Skill>, ClientError>;
    async fn endorse_skill(&self, owner: Uuid, skill_id: Uuid, note: Option<String>) -> Result<Skill, ClientError>;
    async fn add_achievement(&self, achievement: NewAchievement) -> Result<Vec<Achievement>, ClientError>;
    async fn delete_achievement(&self, achievement_id: Uuid) -> Result<Vec<Achievement>, ClientError>;
    async fn add_experience(&self, experience: NewExperience) -> Result<Experience, ClientError>;
    async fn add_education(&self, education: NewEducation) -> Result<Education, ClientError>;
    async fn add_portfolio(&self, item: NewPortfolioItem) -> Result<PortfolioItem, ClientError>;
    async fn update_availability(&self, update: UpdateAvailability) -> Result<Availability, ClientError>;
}

/// Token and identity obtained from a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
}

/// HTTP client for the profile API. `base_url` is the API root, for example
/// `http://localhost:8080/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!("{}: unsupported scheme", base_url)));
        }

        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Reuses a token obtained elsewhere.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Logs in and keeps the token for every later call.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginUser {
            email: email.to_string(),
            password: password.to_string(),
        };
        let auth: AuthResponse = self.send(Method::POST, "/auth/login", Some(&body), false).await?;

        self.session = Some(Session {
            token: auth.token.clone(),
            user_id: auth.user.id,
        });
        tracing::debug!(user_id = %auth.user.id, "Logged in");
        Ok(auth)
    }

    pub async fn register(&self, user: &NewUser) -> Result<UserResponse, ClientError> {
        self.send(Method::POST, "/auth/register", Some(user), false).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>, authed: bool) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request_body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ClientError::Encode(e.to_string()))?;

        let mut request = self.http.request(method.clone(), &url);
        if authed {
            let session = self.session.as_ref().ok_or(ClientError::NotAuthenticated)?;
            request = request.bearer_auth(&session.token);
        }
        if let Some(json) = &request_body {
            request = request.json(json);
        }

        let detail = |status: Option<StatusCode>, response_body: Option<String>, message: String| TransportDetail {
            status: status.map(|s| s.as_u16()),
            status_text: status.and_then(|s| s.canonical_reason()).map(str::to_string),
            method: method.to_string(),
            url: url.clone(),
            request_body: request_body.as_ref().map(redact),
            response_body,
            message,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(detail(None, None, e.to_string())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(detail(Some(status), None, e.to_string())))?;

        if !status.is_success() {
            let failure = detail(Some(status), Some(text), format!("HTTP status {}", status));
            tracing::warn!(method = %failure.method, url = %failure.url, status = status.as_u16(), "Request failed");
            return Err(if status == StatusCode::UNAUTHORIZED {
                ClientError::Unauthorized(failure)
            } else {
                ClientError::Rejected(failure)
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            ClientError::Decode(detail(Some(status), Some(text.clone()), e.to_string()))
        })
    }
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn profile(&self, user_id: Uuid) -> Result<Profile, ClientError> {
        self.send::<Value, _>(Method::GET, &format!("/user/{}/profile", user_id), None, true).await
    }

    async fn add_skill(&self, skill: NewSkill) -> Result<Vec<Skill>, ClientError> {
        let response: SkillsResponse = self.send(Method::POST, "/user/skills", Some(&skill), true).await?;
        Ok(response.skills)
    }

    async fn delete_skill(&self, skill_id: Uuid) -> Result<Vec<Skill>, ClientError> {
        let response: SkillsResponse = self
            .send::<Value, _>(Method::DELETE, &format!("/user/skills/{}", skill_id), None, true)
            .await?;
        Ok(response.skills)
    }

    async fn endorse_skill(&self, owner: Uuid, skill_id: Uuid, note: Option<String>) -> Result<Skill, ClientError> {
        let body = EndorseSkill { note };
        self.send(
            Method::POST,
            &format!("/user/{}/skills/{}/endorse", owner, skill_id),
            Some(&body),
            true,
        )
        .await
    }

    async fn add_achievement(&self, achievement: NewAchievement) -> Result<Vec<Achievement>, ClientError> {
        let response: AchievementsResponse = self
            .send(Method::POST, "/user/achievements", Some(&achievement), true)
            .await?;
        Ok(response.achievements)
    }

    async fn delete_achievement(&self, achievement_id: Uuid) -> Result<Vec<Achievement>, ClientError> {
        let response: AchievementsResponse = self
            .send::<Value, _>(Method::DELETE, &format!("/user/achievements/{}", achievement_id), None, true)
            .await?;
        Ok(response.achievements)
    }

    async fn add_experience(&self, experience: NewExperience) -> Result<Experience, ClientError> {
        self.send(Method::POST, "/user/experience", Some(&experience), true).await
    }

    async fn add_education(&self, education: NewEducation) -> Result<Education, ClientError> {
        self.send(Method::POST, "/user/education", Some(&education), true).await
    }

    async fn add_portfolio(&self, item: NewPortfolioItem) -> Result<PortfolioItem, ClientError> {
        self.send(Method::POST, "/user/portfolio", Some(&item), true).await
    }

    async fn update_availability(&self, update: UpdateAvailability) -> Result<Availability, ClientError> {
        self.send(Method::PATCH, "/user/availability", Some(&update), true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_must_be_http() {
        assert!(matches!(ApiClient::new("not a url"), Err(ClientError::InvalidUrl(_))));
        assert!(matches!(ApiClient::new("ftp://host/api"), Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let client = ApiClient::new("http://localhost:8080/api/").unwrap();
        assert_eq!(client.url("/user/skills"), "http://localhost:8080/api/user/skills");
    }

    #[tokio::test]
    async fn authenticated_calls_need_a_session() {
        let client = ApiClient::new("http://127.0.0.1:9/api").unwrap();
        let result = client.update_availability(UpdateAvailability::default()).await;
        assert!(matches!(result, Err(ClientError::NotAuthenticated)));
    }
}
