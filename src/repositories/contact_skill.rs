use deadpool_postgres::Pool;
use crate::{
    error::Result,
    models::skill::{ContactSkill, Skill},
    store::CreateContactSkillParams,
};

/// Binds a skill to a contact.
pub async fn create_contact_skill(
    pool: &Pool,
    params: CreateContactSkillParams,
) -> Result<ContactSkill> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            r#"
            INSERT INTO contact_has_skill (owner, contact_id, skill_id)
            VALUES ($1, $2, $3)
            RETURNING id, owner, contact_id, skill_id, created_at
            "#,
            &[&params.owner, &params.contact_id, &params.skill_id],
        )
        .await?;
    ContactSkill::try_from(&row)
}

/// Lists the skills bound to a contact.
pub async fn skills_for_contact(pool: &Pool, contact_id: i64) -> Result<Vec<Skill>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            r#"
            SELECT s.id, s.owner, s.skill_name, s.skill_level, s.created_at
            FROM skills s
            INNER JOIN contact_has_skill chs ON chs.skill_id = s.id
            WHERE chs.contact_id = $1
            ORDER BY s.id
            "#,
            &[&contact_id],
        )
        .await?;
    rows.iter().map(Skill::try_from).collect()
}
