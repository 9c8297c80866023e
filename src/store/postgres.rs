use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;
use uuid::Uuid;

use super::{
    ContactsWithSkillParams, CreateContactParams, CreateContactSkillParams, CreateSessionParams,
    CreateSkillParams, CreateUserParams, ListParams, Store, UpdateContactParams,
    UpdateSkillParams,
};
use crate::{
    error::Result,
    models::{
        contact::Contact,
        session::Session,
        skill::{ContactSkill, Skill},
        user::User,
    },
    repositories::{
        contact as contact_repo, contact_skill as contact_skill_repo, session as session_repo,
        skill as skill_repo, user as user_repo,
    },
};

/// [`Store`] backed by PostgreSQL through a deadpool connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    /// Wraps an existing pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl Store for PgStore {
    async fn create_user(&self, params: CreateUserParams) -> Result<User> {
        user_repo::create_user(&self.pool, params).await
    }

    async fn get_user(&self, username: &str) -> Result<User> {
        user_repo::find_by_username(&self.pool, username).await
    }

    async fn delete_user(&self, username: &str) -> Result<()> {
        user_repo::delete_user(&self.pool, username).await
    }

    async fn create_session(&self, params: CreateSessionParams) -> Result<Session> {
        session_repo::create_session(&self.pool, params).await
    }

    async fn get_session(&self, id: Uuid) -> Result<Session> {
        session_repo::find_by_id(&self.pool, &id).await
    }

    async fn block_session(&self, id: Uuid) -> Result<Session> {
        session_repo::block_session(&self.pool, &id).await
    }

    async fn delete_session(&self, id: Uuid) -> Result<()> {
        session_repo::delete_session(&self.pool, &id).await
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        session_repo::delete_expired(&self.pool, &now).await
    }

    async fn create_contact(&self, params: CreateContactParams) -> Result<Contact> {
        contact_repo::create_contact(&self.pool, params).await
    }

    async fn get_contact(&self, id: i64) -> Result<Contact> {
        contact_repo::find_by_id(&self.pool, id).await
    }

    async fn list_contacts(&self, params: ListParams) -> Result<Vec<Contact>> {
        contact_repo::list_contacts(&self.pool, params).await
    }

    async fn update_contact(&self, params: UpdateContactParams) -> Result<Contact> {
        contact_repo::update_contact(&self.pool, params).await
    }

    async fn delete_contact(&self, id: i64) -> Result<()> {
        contact_repo::delete_contact(&self.pool, id).await
    }

    async fn contacts_with_skill(&self, params: ContactsWithSkillParams) -> Result<Vec<Contact>> {
        contact_repo::contacts_with_skill(&self.pool, params).await
    }

    async fn create_skill(&self, params: CreateSkillParams) -> Result<Skill> {
        skill_repo::create_skill(&self.pool, params).await
    }

    async fn get_skill(&self, id: i64) -> Result<Skill> {
        skill_repo::find_by_id(&self.pool, id).await
    }

    async fn list_skills(&self, params: ListParams) -> Result<Vec<Skill>> {
        skill_repo::list_skills(&self.pool, params).await
    }

    async fn update_skill(&self, params: UpdateSkillParams) -> Result<Skill> {
        skill_repo::update_skill(&self.pool, params).await
    }

    async fn delete_skill(&self, id: i64) -> Result<()> {
        skill_repo::delete_skill(&self.pool, id).await
    }

    async fn create_contact_skill(&self, params: CreateContactSkillParams) -> Result<ContactSkill> {
        contact_skill_repo::create_contact_skill(&self.pool, params).await
    }

    async fn skills_for_contact(&self, contact_id: i64) -> Result<Vec<Skill>> {
        contact_skill_repo::skills_for_contact(&self.pool, contact_id).await
    }
}
