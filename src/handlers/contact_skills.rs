use axum::{extract::State, Extension, Json};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::Result,
    guard::ensure_owner,
    models::skill::ContactSkill,
    state::AppState,
    store::{CreateContactSkillParams, Store},
    token::Payload,
    validation::ValidJson,
};

/// The request payload for binding a skill to a contact.
#[derive(Deserialize, Debug, Validate)]
pub struct AddSkillRequest {
    #[garde(range(min = 1))]
    pub contact_id: i64,
    #[garde(range(min = 1))]
    pub skill_id: i64,
}

/// Binds one of the caller's skills to one of the caller's contacts.
///
/// Both sides are fetched and guarded before the binding is written.
pub async fn add_skill<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidJson(payload): ValidJson<AddSkillRequest>,
) -> Result<Json<ContactSkill>> {
    let contact = state.store.get_contact(payload.contact_id).await?;
    ensure_owner(&contact, &auth)?;
    let skill = state.store.get_skill(payload.skill_id).await?;
    ensure_owner(&skill, &auth)?;

    let binding = state
        .store
        .create_contact_skill(CreateContactSkillParams {
            owner: auth.username,
            contact_id: contact.id,
            skill_id: skill.id,
        })
        .await?;

    tracing::info!(
        "✅ Skill {} bound to contact {}",
        binding.skill_id,
        binding.contact_id
    );
    Ok(Json(binding))
}
