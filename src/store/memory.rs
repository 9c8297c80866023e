//! In-process [`Store`] used by the router tests.
//!
//! Mirrors the constraints in `sql/schema.sql` that the handlers rely on:
//! unique usernames and emails, owner foreign keys, unique bindings, and
//! cascading deletes.

use std::{collections::BTreeMap, sync::Arc};

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    ContactsWithSkillParams, CreateContactParams, CreateContactSkillParams, CreateSessionParams,
    CreateSkillParams, CreateUserParams, ListParams, Store, UpdateContactParams,
    UpdateSkillParams,
};
use crate::{
    error::{AppError, Result},
    models::{
        contact::Contact,
        session::Session,
        skill::{ContactSkill, Skill},
        user::User,
    },
};

#[derive(Default)]
struct Tables {
    users: BTreeMap<String, User>,
    sessions: BTreeMap<Uuid, Session>,
    contacts: BTreeMap<i64, Contact>,
    skills: BTreeMap<i64, Skill>,
    bindings: BTreeMap<i64, ContactSkill>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn require_user(&self, username: &str) -> Result<()> {
        if !self.users.contains_key(username) {
            return Err(AppError::Conflict(format!(
                "violates foreign key constraint: user {} does not exist",
                username
            )));
        }
        Ok(())
    }
}

fn page<T: Clone>(items: impl Iterator<Item = T>, params: &ListParams) -> Vec<T> {
    items
        .skip(params.offset.max(0) as usize)
        .take(params.limit.max(0) as usize)
        .collect()
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a contact with an arbitrary owner, bypassing the handlers.
    pub async fn insert_contact(&self, params: CreateContactParams) -> Contact {
        self.create_contact(params).await.unwrap()
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.tables.lock().await.sessions.len()
    }
}

impl Store for MemoryStore {
    async fn create_user(&self, params: CreateUserParams) -> Result<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.contains_key(&params.username)
            || tables.users.values().any(|u| u.email == params.email)
        {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        let user = User {
            username: params.username.clone(),
            hashed_password: params.hashed_password,
            fullname: params.fullname,
            email: params.email,
            password_last_changed: Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap(),
            created_at: Utc::now(),
        };
        tables.users.insert(params.username, user.clone());
        Ok(user)
    }

    async fn get_user(&self, username: &str) -> Result<User> {
        let tables = self.tables.lock().await;
        tables
            .users
            .get(username)
            .cloned()
            .ok_or(AppError::NotFound("user"))
    }

    async fn delete_user(&self, username: &str) -> Result<()> {
        let mut tables = self.tables.lock().await;
        let owns_rows = tables.contacts.values().any(|c| c.owner == username)
            || tables.skills.values().any(|s| s.owner == username)
            || tables.bindings.values().any(|b| b.owner == username);
        if owns_rows {
            return Err(AppError::Conflict(format!(
                "violates foreign key constraint: user {} still owns rows",
                username
            )));
        }
        tables.users.remove(username);
        tables.sessions.retain(|_, s| s.username != username);
        Ok(())
    }

    async fn create_session(&self, params: CreateSessionParams) -> Result<Session> {
        let mut tables = self.tables.lock().await;
        tables.require_user(&params.username)?;
        let session = Session {
            id: params.id,
            username: params.username,
            session_token: params.session_token,
            user_agent: params.user_agent,
            client_ip: params.client_ip,
            is_blocked: params.is_blocked,
            expires_at: params.expires_at,
            created_at: Utc::now(),
        };
        tables.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn get_session(&self, id: Uuid) -> Result<Session> {
        let tables = self.tables.lock().await;
        tables
            .sessions
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound("session"))
    }

    async fn block_session(&self, id: Uuid) -> Result<Session> {
        let mut tables = self.tables.lock().await;
        let session = tables
            .sessions
            .get_mut(&id)
            .ok_or(AppError::NotFound("session"))?;
        session.is_blocked = true;
        Ok(session.clone())
    }

    async fn delete_session(&self, id: Uuid) -> Result<()> {
        self.tables.lock().await.sessions.remove(&id);
        Ok(())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut tables = self.tables.lock().await;
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.expires_at > now);
        Ok((before - tables.sessions.len()) as u64)
    }

    async fn create_contact(&self, params: CreateContactParams) -> Result<Contact> {
        let mut tables = self.tables.lock().await;
        tables.require_user(&params.owner)?;
        if tables
            .contacts
            .values()
            .any(|c| c.owner == params.owner && c.email == params.email)
        {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        let contact = Contact {
            id: tables.next_id(),
            owner: params.owner,
            firstname: params.firstname,
            lastname: params.lastname,
            fullname: params.fullname,
            home_address: params.home_address,
            email: params.email,
            phone_number: params.phone_number,
            created_at: Utc::now(),
        };
        tables.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn get_contact(&self, id: i64) -> Result<Contact> {
        let tables = self.tables.lock().await;
        tables
            .contacts
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound("contact"))
    }

    async fn list_contacts(&self, params: ListParams) -> Result<Vec<Contact>> {
        let tables = self.tables.lock().await;
        let owned = tables
            .contacts
            .values()
            .filter(|c| c.owner == params.owner)
            .cloned();
        Ok(page(owned, &params))
    }

    async fn update_contact(&self, params: UpdateContactParams) -> Result<Contact> {
        let mut tables = self.tables.lock().await;
        let contact = tables
            .contacts
            .get_mut(&params.id)
            .ok_or(AppError::NotFound("contact"))?;
        contact.firstname = params.firstname;
        contact.lastname = params.lastname;
        contact.fullname = params.fullname;
        contact.home_address = params.home_address;
        contact.email = params.email;
        contact.phone_number = params.phone_number;
        Ok(contact.clone())
    }

    async fn delete_contact(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.contacts.remove(&id);
        tables.bindings.retain(|_, b| b.contact_id != id);
        Ok(())
    }

    async fn contacts_with_skill(&self, params: ContactsWithSkillParams) -> Result<Vec<Contact>> {
        let tables = self.tables.lock().await;
        let contacts = tables
            .contacts
            .values()
            .filter(|c| c.owner == params.owner)
            .filter(|c| {
                tables.bindings.values().any(|b| {
                    b.contact_id == c.id
                        && tables.skills.get(&b.skill_id).is_some_and(|s| {
                            s.skill_name == params.skill_name
                                && params
                                    .skill_level
                                    .as_ref()
                                    .is_none_or(|level| &s.skill_level == level)
                        })
                })
            })
            .cloned()
            .collect();
        Ok(contacts)
    }

    async fn create_skill(&self, params: CreateSkillParams) -> Result<Skill> {
        let mut tables = self.tables.lock().await;
        tables.require_user(&params.owner)?;
        let skill = Skill {
            id: tables.next_id(),
            owner: params.owner,
            skill_name: params.skill_name,
            skill_level: params.skill_level,
            created_at: Utc::now(),
        };
        tables.skills.insert(skill.id, skill.clone());
        Ok(skill)
    }

    async fn get_skill(&self, id: i64) -> Result<Skill> {
        let tables = self.tables.lock().await;
        tables
            .skills
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound("skill"))
    }

    async fn list_skills(&self, params: ListParams) -> Result<Vec<Skill>> {
        let tables = self.tables.lock().await;
        let owned = tables
            .skills
            .values()
            .filter(|s| s.owner == params.owner)
            .cloned();
        Ok(page(owned, &params))
    }

    async fn update_skill(&self, params: UpdateSkillParams) -> Result<Skill> {
        let mut tables = self.tables.lock().await;
        let skill = tables
            .skills
            .get_mut(&params.id)
            .ok_or(AppError::NotFound("skill"))?;
        skill.skill_name = params.skill_name;
        skill.skill_level = params.skill_level;
        Ok(skill.clone())
    }

    async fn delete_skill(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.skills.remove(&id);
        tables.bindings.retain(|_, b| b.skill_id != id);
        Ok(())
    }

    async fn create_contact_skill(&self, params: CreateContactSkillParams) -> Result<ContactSkill> {
        let mut tables = self.tables.lock().await;
        tables.require_user(&params.owner)?;
        if !tables.contacts.contains_key(&params.contact_id)
            || !tables.skills.contains_key(&params.skill_id)
        {
            return Err(AppError::Conflict(
                "violates foreign key constraint".to_string(),
            ));
        }
        if tables
            .bindings
            .values()
            .any(|b| b.contact_id == params.contact_id && b.skill_id == params.skill_id)
        {
            return Err(AppError::Conflict(
                "duplicate key value violates unique constraint".to_string(),
            ));
        }
        let binding = ContactSkill {
            id: tables.next_id(),
            owner: params.owner,
            contact_id: params.contact_id,
            skill_id: params.skill_id,
            created_at: Utc::now(),
        };
        tables.bindings.insert(binding.id, binding.clone());
        Ok(binding)
    }

    async fn skills_for_contact(&self, contact_id: i64) -> Result<Vec<Skill>> {
        let tables = self.tables.lock().await;
        let skills = tables
            .bindings
            .values()
            .filter(|b| b.contact_id == contact_id)
            .filter_map(|b| tables.skills.get(&b.skill_id).cloned())
            .collect();
        Ok(skills)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn user(username: &str) -> CreateUserParams {
        CreateUserParams {
            username: username.to_string(),
            hashed_password: "unused".to_string(),
            fullname: "Test User".to_string(),
            email: format!("{}@example.com", username),
        }
    }

    fn session(username: &str) -> CreateSessionParams {
        CreateSessionParams {
            id: Uuid::new_v4(),
            username: username.to_string(),
            session_token: "token".to_string(),
            user_agent: "test".to_string(),
            client_ip: "127.0.0.1".to_string(),
            is_blocked: false,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[tokio::test]
    async fn delete_user_is_restricted_by_owned_rows() {
        let store = MemoryStore::new();
        store.create_user(user("alice")).await.unwrap();
        store
            .create_skill(CreateSkillParams {
                owner: "alice".to_string(),
                skill_name: "rust".to_string(),
                skill_level: "expert".to_string(),
            })
            .await
            .unwrap();

        let err = store.delete_user("alice").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.get_user("alice").await.is_ok());
    }

    #[tokio::test]
    async fn delete_user_cascades_to_sessions() {
        let store = MemoryStore::new();
        store.create_user(user("alice")).await.unwrap();
        store.create_user(user("bob")).await.unwrap();
        store.create_session(session("alice")).await.unwrap();
        store.create_session(session("bob")).await.unwrap();

        store.delete_user("alice").await.unwrap();

        assert!(matches!(
            store.get_user("alice").await,
            Err(AppError::NotFound("user"))
        ));
        assert_eq!(store.session_count().await, 1);
    }
}
