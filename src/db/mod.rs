//! Provides database interaction functionalities.
//!
//! Handlers talk to the backend only through [`UserStore`]; the PostgreSQL implementation
//! lives in the `postgres` submodule.

mod postgres;

pub use postgres::*;

use crate::error::Result;
use crate::models::{CreateUserParams, User};

/// The user-record operations the command handlers rely on.
#[allow(async_fn_in_trait)]
pub trait UserStore {
    /// Creates the backing schema if it does not exist yet.
    async fn init_schema(&self) -> Result<()>;

    /// Inserts a new user and returns the stored record.
    ///
    /// Fails with `AppError::Persistence` on any backend error, including a duplicate name.
    async fn create_user(&self, params: CreateUserParams) -> Result<User>;

    /// Looks a user up by exact name. `Ok(None)` means no such user.
    async fn get_user(&self, name: &str) -> Result<Option<User>>;
}
