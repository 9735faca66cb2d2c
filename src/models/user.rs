//! User records as stored in the `users` table.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

/// Parameters for inserting a new user.
///
/// The caller chooses the identifier and timestamps; the backend stores them as given.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

impl CreateUserParams {
    /// Fresh v4 identifier and matching creation/update timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}

impl From<CreateUserParams> for User {
    fn from(params: CreateUserParams) -> Self {
        User {
            id: params.id,
            created_at: params.created_at,
            updated_at: params.updated_at,
            name: params.name,
        }
    }
}
