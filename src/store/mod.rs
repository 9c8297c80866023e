//! The data-access boundary consumed by the handlers.
//!
//! Every method returns [`AppError::NotFound`](crate::error::AppError::NotFound)
//! for absent rows and [`AppError::Conflict`](crate::error::AppError::Conflict)
//! for uniqueness or foreign-key violations.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        contact::Contact,
        session::Session,
        skill::{ContactSkill, Skill},
        user::User,
    },
};

pub use postgres::PgStore;

#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub hashed_password: String,
    pub fullname: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct CreateSessionParams {
    pub id: Uuid,
    pub username: String,
    pub session_token: String,
    pub user_agent: String,
    pub client_ip: String,
    pub is_blocked: bool,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateContactParams {
    pub owner: String,
    pub firstname: String,
    pub lastname: String,
    pub fullname: String,
    pub home_address: String,
    pub email: String,
    pub phone_number: String,
}

/// Full replacement values for a contact. The owner is not updatable.
#[derive(Debug, Clone)]
pub struct UpdateContactParams {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub fullname: String,
    pub home_address: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Clone)]
pub struct CreateSkillParams {
    pub owner: String,
    pub skill_name: String,
    pub skill_level: String,
}

/// Full replacement values for a skill. The owner is not updatable.
#[derive(Debug, Clone)]
pub struct UpdateSkillParams {
    pub id: i64,
    pub skill_name: String,
    pub skill_level: String,
}

#[derive(Debug, Clone)]
pub struct CreateContactSkillParams {
    pub owner: String,
    pub contact_id: i64,
    pub skill_id: i64,
}

/// An owner-scoped page of rows.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub owner: String,
    pub limit: i64,
    pub offset: i64,
}

/// Filters contacts of `owner` by a bound skill name and, optionally, level.
#[derive(Debug, Clone)]
pub struct ContactsWithSkillParams {
    pub owner: String,
    pub skill_name: String,
    pub skill_level: Option<String>,
}

/// Typed CRUD over users, sessions, and owned resources.
pub trait Store: Clone + Send + Sync + 'static {
    fn create_user(&self, params: CreateUserParams) -> impl Future<Output = Result<User>> + Send;
    fn get_user(&self, username: &str) -> impl Future<Output = Result<User>> + Send;
    fn delete_user(&self, username: &str) -> impl Future<Output = Result<()>> + Send;

    fn create_session(
        &self,
        params: CreateSessionParams,
    ) -> impl Future<Output = Result<Session>> + Send;
    fn get_session(&self, id: Uuid) -> impl Future<Output = Result<Session>> + Send;
    fn block_session(&self, id: Uuid) -> impl Future<Output = Result<Session>> + Send;
    fn delete_session(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send;
    /// Removes every session whose expiry is at or before `now`.
    fn delete_expired_sessions(
        &self,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<u64>> + Send;

    fn create_contact(
        &self,
        params: CreateContactParams,
    ) -> impl Future<Output = Result<Contact>> + Send;
    fn get_contact(&self, id: i64) -> impl Future<Output = Result<Contact>> + Send;
    fn list_contacts(&self, params: ListParams)
        -> impl Future<Output = Result<Vec<Contact>>> + Send;
    fn update_contact(
        &self,
        params: UpdateContactParams,
    ) -> impl Future<Output = Result<Contact>> + Send;
    fn delete_contact(&self, id: i64) -> impl Future<Output = Result<()>> + Send;
    fn contacts_with_skill(
        &self,
        params: ContactsWithSkillParams,
    ) -> impl Future<Output = Result<Vec<Contact>>> + Send;

    fn create_skill(&self, params: CreateSkillParams)
        -> impl Future<Output = Result<Skill>> + Send;
    fn get_skill(&self, id: i64) -> impl Future<Output = Result<Skill>> + Send;
    fn list_skills(&self, params: ListParams) -> impl Future<Output = Result<Vec<Skill>>> + Send;
    fn update_skill(&self, params: UpdateSkillParams)
        -> impl Future<Output = Result<Skill>> + Send;
    fn delete_skill(&self, id: i64) -> impl Future<Output = Result<()>> + Send;

    fn create_contact_skill(
        &self,
        params: CreateContactSkillParams,
    ) -> impl Future<Output = Result<ContactSkill>> + Send;
    fn skills_for_contact(&self, contact_id: i64)
        -> impl Future<Output = Result<Vec<Skill>>> + Send;
}
