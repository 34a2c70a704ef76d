use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::{
    entities::user::{normalize_email, User},
    errors::AppError,
    repositories::memory_repo::MemoryUserRepo,
};


#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn user_exists(&self, id: &Uuid) -> Result<bool, AppError>;
    async fn count_users(&self) -> Result<u64, AppError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;
    async fn create_user(&self, user: User) -> Result<Uuid, AppError>;
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        MemoryUserRepo::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn user_exists(&self, id: &Uuid) -> Result<bool, AppError> {
        Ok(self.users.contains_key(id))
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        Ok(self.users.len() as u64)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = self.emails
            .get(&normalize_email(email))
            .and_then(|id| self.users.get(id.value()).map(|u| u.value().clone()));

        Ok(user)
    }

    async fn get_user_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn create_user(&self, user: User) -> Result<Uuid, AppError> {
        // The email entry is the uniqueness guard
        match self.emails.entry(normalize_email(&user.email)) {
            Entry::Occupied(_) => {
                Err(AppError::Conflict("User with this email already exists".to_string()))
            }
            Entry::Vacant(slot) => {
                let id = user.id;
                slot.insert(id);
                self.users.insert(id, user);
                Ok(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: "Test".into(),
            password_hash: "hash".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let repo = MemoryUserRepo::new();
        repo.create_user(user("test@example.com")).await.unwrap();

        let second = repo.create_user(user("TEST@example.com")).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn lookup_by_email_and_id() {
        let repo = MemoryUserRepo::new();
        let id = repo.create_user(user("ada@example.com")).await.unwrap();

        let by_email = repo.get_user_by_email(" Ada@Example.com ").await.unwrap().unwrap();
        assert_eq!(by_email.id, id);
        assert!(repo.user_exists(&id).await.unwrap());
        assert!(repo.get_user_by_id(&Uuid::new_v4()).await.unwrap().is_none());
    }
}
