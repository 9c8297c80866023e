use axum::{extract::State, Extension, Json};
use garde::Validate;
use serde::Deserialize;

use crate::{
    error::Result,
    guard::{ensure_all_owned, ensure_owner},
    models::skill::Skill,
    state::AppState,
    store::{CreateSkillParams, ListParams, Store, UpdateSkillParams},
    token::Payload,
    validation::{blank_as_none, IdParams, PageParams, ValidJson, ValidPath, ValidQuery},
};

/// The request payload for creating a skill.
#[derive(Deserialize, Debug, Validate)]
pub struct CreateSkillRequest {
    #[garde(length(min = 1, max = 255))]
    pub skill_name: String,
    #[garde(length(min = 1, max = 255))]
    pub skill_level: String,
}

/// The request payload for updating a skill.
///
/// Absent or blank fields keep their stored value.
#[derive(Deserialize, Debug, Validate)]
pub struct UpdateSkillRequest {
    #[garde(range(min = 1))]
    pub id: i64,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(length(max = 255))]
    pub skill_name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    #[garde(length(max = 255))]
    pub skill_level: Option<String>,
}

impl UpdateSkillRequest {
    /// Fills every missing field from `current`.
    pub fn merge(self, current: Skill) -> UpdateSkillParams {
        UpdateSkillParams {
            id: current.id,
            skill_name: self.skill_name.unwrap_or(current.skill_name),
            skill_level: self.skill_level.unwrap_or(current.skill_level),
        }
    }
}

/// Fetches a skill and checks it belongs to `auth`.
async fn owned_skill<S: Store>(state: &AppState<S>, id: i64, auth: &Payload) -> Result<Skill> {
    let skill = state.store.get_skill(id).await?;
    ensure_owner(&skill, auth)?;
    Ok(skill)
}

/// Handles skill creation.
pub async fn create_skill<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidJson(payload): ValidJson<CreateSkillRequest>,
) -> Result<Json<Skill>> {
    let skill = state
        .store
        .create_skill(CreateSkillParams {
            owner: auth.username,
            skill_name: payload.skill_name,
            skill_level: payload.skill_level,
        })
        .await?;

    tracing::info!("✅ Skill created: {} (owner {})", skill.id, skill.owner);
    Ok(Json(skill))
}

/// Returns one of the caller's skills.
pub async fn get_skill<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidPath(params): ValidPath<IdParams>,
) -> Result<Json<Skill>> {
    let skill = owned_skill(&state, params.id, &auth).await?;
    Ok(Json(skill))
}

/// Returns a page of the caller's skills.
pub async fn list_skills<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidQuery(page): ValidQuery<PageParams>,
) -> Result<Json<Vec<Skill>>> {
    let skills = state
        .store
        .list_skills(ListParams {
            owner: auth.username.clone(),
            limit: page.limit(),
            offset: page.offset()?,
        })
        .await?;

    ensure_all_owned(&skills, &auth)?;
    Ok(Json(skills))
}

/// Applies a partial update to one of the caller's skills.
pub async fn update_skill<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidJson(payload): ValidJson<UpdateSkillRequest>,
) -> Result<Json<Skill>> {
    let current = owned_skill(&state, payload.id, &auth).await?;

    let skill = state.store.update_skill(payload.merge(current)).await?;

    tracing::info!("✅ Skill updated: {}", skill.id);
    Ok(Json(skill))
}

/// Deletes one of the caller's skills.
pub async fn delete_skill<S: Store>(
    State(state): State<AppState<S>>,
    Extension(auth): Extension<Payload>,
    ValidPath(params): ValidPath<IdParams>,
) -> Result<Json<&'static str>> {
    let skill = owned_skill(&state, params.id, &auth).await?;

    state.store.delete_skill(skill.id).await?;

    tracing::info!("🗑️ Skill deleted: {}", skill.id);
    Ok(Json("Successfully deleted skill."))
}
