//! User Repository
//!
//! Read-only: user documents are owned by the auth collaborator, this server
//! only looks them up to populate seller/reviewer fields.

use std::collections::HashMap;

use super::{BaseRepository, RepoResult};
use crate::db::models::{User, UserBrief};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user by record link
    pub async fn find_by_id(&self, id: &Thing) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE id = $id")
            .bind(("id", id.clone()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }

    /// Brief lookups for a set of users, keyed by "user:id" string
    pub async fn find_briefs(&self, ids: &[Thing]) -> RepoResult<HashMap<String, UserBrief>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE id IN $ids")
            .bind(("ids", ids.to_vec()))
            .await?
            .take(0)?;

        Ok(users
            .into_iter()
            .map(|user| {
                let key = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
                (key, UserBrief::from(user))
            })
            .collect())
    }
}
