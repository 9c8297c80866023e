use deadpool_postgres::Pool;
use crate::{
    error::{AppError, Result},
    models::skill::Skill,
    store::{CreateSkillParams, ListParams, UpdateSkillParams},
};

const SKILL_COLUMNS: &str = "id, owner, skill_name, skill_level, created_at";

/// Creates a new skill.
pub async fn create_skill(pool: &Pool, params: CreateSkillParams) -> Result<Skill> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            &*format!(
                r#"
                INSERT INTO skills (owner, skill_name, skill_level)
                VALUES ($1, $2, $3)
                RETURNING {SKILL_COLUMNS}
                "#
            ),
            &[&params.owner, &params.skill_name, &params.skill_level],
        )
        .await?;
    Skill::try_from(&row)
}

/// Finds a skill by id.
pub async fn find_by_id(pool: &Pool, id: i64) -> Result<Skill> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!("SELECT {SKILL_COLUMNS} FROM skills WHERE id = $1 LIMIT 1"),
            &[&id],
        )
        .await?
        .ok_or(AppError::NotFound("skill"))?;
    Skill::try_from(&row)
}

/// Lists one page of the owner's skills, ordered by id.
pub async fn list_skills(pool: &Pool, params: ListParams) -> Result<Vec<Skill>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            &*format!(
                r#"
                SELECT {SKILL_COLUMNS}
                FROM skills
                WHERE owner = $1
                ORDER BY id
                LIMIT $2
                OFFSET $3
                "#
            ),
            &[&params.owner, &params.limit, &params.offset],
        )
        .await?;
    rows.iter().map(Skill::try_from).collect()
}

/// Overwrites the name and level of a skill.
pub async fn update_skill(pool: &Pool, params: UpdateSkillParams) -> Result<Skill> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!(
                r#"
                UPDATE skills
                SET skill_name = $2,
                    skill_level = $3
                WHERE id = $1
                RETURNING {SKILL_COLUMNS}
                "#
            ),
            &[&params.id, &params.skill_name, &params.skill_level],
        )
        .await?
        .ok_or(AppError::NotFound("skill"))?;
    Skill::try_from(&row)
}

/// Deletes a skill by id.
pub async fn delete_skill(pool: &Pool, id: i64) -> Result<()> {
    let client = pool.get().await?;
    client
        .execute("DELETE FROM skills WHERE id = $1", &[&id])
        .await?;
    Ok(())
}
