use axum::{extract::State, Extension, Json};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::Result,
    guard::{ensure_all_owned, ensure_owner},
    models::{contact::Contact, skill::Skill},
    state::AppState,
    store::{
        ContactsWithSkillParams, CreateContactParams, ListParams, Store, UpdateContactParams,
    },
    token::Payload,
    validation::{blank_as_none, IdParams, PageParams, ValidJson, ValidPath, ValidQuery},
};

/// The request payload for creating a contact.
#[derive(Deserialize, Debug, Validate)]
pub struct CreateContactRequest {
    #[garde(length(min = 1, max = 255))]
    pub firstname: String,
    #[garde(length(min = 1, max = 255))]
    pub lastname: String,
    #[garde(length(min = 1, max = 255))]
    pub fullname: String,
    #[garde(length(min = 1, max = 255))]
    pub home_address: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1, max = 32))]
    pub phone_number: String,
}

/// The request payload for updating a contact.
///
/// Absent or blank fields keep their stored value.
#[derive(Deserialize, Debug, Validate)]
pub struct UpdateContactRequest {
    #[garde(range(min = 1))]
    pub id: i64,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(length(max = 255))]
    pub firstname: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(length(max = 255))]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(length(max = 255))]
    pub fullname: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(length(max = 255))]
    pub home_address: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(length(max = 32))]
    pub phone_number: Option<String>,
}

impl UpdateContactRequest {
    /// Fills every missing field from `current`.
    pub fn merge(self, current: Contact) -> UpdateContactParams {
        UpdateContactParams {
            id: current.id,
            firstname: self.firstname.unwrap_or(current.firstname),
            lastname: self.lastname.unwrap_or(current.lastname),
            fullname: self.fullname.unwrap_or(current.fullname),
            home_address: self.home_address.unwrap_or(current.home_address),
            email: self.email.unwrap_or(current.email),
            phone_number: self.phone_number.unwrap_or(current.phone_number),
        }
    }
}

#[derive(Deserialize, Debug, Validate)]
pub struct ContactsWithSkillQuery {
    #[garde(length(min = 1))]
    pub skill_name: String,
}

#[derive(Deserialize, Debug, Validate)]
pub struct ContactsWithSkillAndLevelQuery {
    #[garde(length(min = 1))]
    pub skill_name: String,
    #[garde(length(min = 1))]
    pub skill_level: String,
}

/// Fetches a contact and checks it belongs to `auth`.
async fn owned_contact<S: Store>(state: &AppState<S>, id: i64, auth: &Payload) -> Result<Contact> {
    let contact = state.store.get_contact(id).await?;
    ensure_owner(&contact, auth)?;
    Ok(contact)
}

/// Handles contact creation.
pub async fn create_contact<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidJson(payload): ValidJson<CreateContactRequest>,
) -> Result<Json<Contact>> {
    let contact = state
        .store
        .create_contact(CreateContactParams {
            owner: auth.username,
            firstname: payload.firstname,
            lastname: payload.lastname,
            fullname: payload.fullname,
            home_address: payload.home_address,
            email: payload.email,
            phone_number: payload.phone_number,
        })
        .await?;

    tracing::info!("✅ Contact created: {} (owner {})", contact.id, contact.owner);
    Ok(Json(contact))
}

/// Returns one of the caller's contacts.
pub async fn get_contact<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidPath(params): ValidPath<IdParams>,
) -> Result<Json<Contact>> {
    let contact = owned_contact(&state, params.id, &auth).await?;
    Ok(Json(contact))
}

/// Returns a page of the caller's contacts.
pub async fn list_contacts<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidQuery(page): ValidQuery<PageParams>,
) -> Result<Json<Vec<Contact>>> {
    let contacts = state
        .store
        .list_contacts(ListParams {
            owner: auth.username.clone(),
            limit: page.limit(),
            offset: page.offset()?,
        })
        .await?;

    ensure_all_owned(&contacts, &auth)?;
    Ok(Json(contacts))
}

/// Applies a partial update to one of the caller's contacts.
pub async fn update_contact<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidJson(payload): ValidJson<UpdateContactRequest>,
) -> Result<Json<Contact>> {
    let current = owned_contact(&state, payload.id, &auth).await?;

    let contact = state.store.update_contact(payload.merge(current)).await?;

    tracing::info!("✅ Contact updated: {}", contact.id);
    Ok(Json(contact))
}

/// Deletes one of the caller's contacts.
pub async fn delete_contact<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidPath(params): ValidPath<IdParams>,
) -> Result<Json<&'static str>> {
    let contact = owned_contact(&state, params.id, &auth).await?;

    state.store.delete_contact(contact.id).await?;

    tracing::info!("🗑️ Contact deleted: {}", contact.id);
    Ok(Json("Successfully deleted contact."))
}

/// Lists the skills bound to one of the caller's contacts.
pub async fn contact_skills<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidPath(params): ValidPath<IdParams>,
) -> Result<Json<Vec<Skill>>> {
    let contact = owned_contact(&state, params.id, &auth).await?;

    let skills = state.store.skills_for_contact(contact.id).await?;

    ensure_all_owned(&skills, &auth)?;
    Ok(Json(skills))
}

/// Lists the caller's contacts that have a skill with the given name.
pub async fn contacts_with_skill<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidQuery(query): ValidQuery<ContactsWithSkillQuery>,
) -> Result<Json<Vec<Contact>>> {
    let contacts = state
        .store
        .contacts_with_skill(ContactsWithSkillParams {
            owner: auth.username.clone(),
            skill_name: query.skill_name,
            skill_level: None,
        })
        .await?;

    ensure_all_owned(&contacts, &auth)?;
    Ok(Json(contacts))
}

/// Lists the caller's contacts that have a skill with the given name and level.
pub async fn contacts_with_skill_and_level<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidQuery(query): ValidQuery<ContactsWithSkillAndLevelQuery>,
) -> Result<Json<Vec<Contact>>> {
    let contacts = state
        .store
        .contacts_with_skill(ContactsWithSkillParams {
            owner: auth.username.clone(),
            skill_name: query.skill_name,
            skill_level: Some(query.skill_level),
        })
        .await?;

    ensure_all_owned(&contacts, &auth)?;
    Ok(Json(contacts))
}
