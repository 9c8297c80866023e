use deadpool_postgres::Pool;
use crate::{
    error::{AppError, Result},
    models::contact::Contact,
    store::{ContactsWithSkillParams, CreateContactParams, ListParams, UpdateContactParams},
};

const CONTACT_COLUMNS: &str =
    "id, owner, firstname, lastname, fullname, home_address, email, phone_number, created_at";

/// Creates a new contact.
pub async fn create_contact(pool: &Pool, params: CreateContactParams) -> Result<Contact> {
    let client = pool.get().await?;
    let row = client
        .query_one(
            &*format!(
                r#"
                INSERT INTO contacts (owner, firstname, lastname, fullname, home_address, email, phone_number)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING {CONTACT_COLUMNS}
                "#
            ),
            &[
                &params.owner,
                &params.firstname,
                &params.lastname,
                &params.fullname,
                &params.home_address,
                &params.email,
                &params.phone_number,
            ],
        )
        .await?;
    Contact::try_from(&row)
}

/// Finds a contact by id.
pub async fn find_by_id(pool: &Pool, id: i64) -> Result<Contact> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 LIMIT 1"),
            &[&id],
        )
        .await?
        .ok_or(AppError::NotFound("contact"))?;
    Contact::try_from(&row)
}

/// Lists one page of the owner's contacts, ordered by id.
pub async fn list_contacts(pool: &Pool, params: ListParams) -> Result<Vec<Contact>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            &*format!(
                r#"
                SELECT {CONTACT_COLUMNS}
                FROM contacts
                WHERE owner = $1
                ORDER BY id
                LIMIT $2
                OFFSET $3
                "#
            ),
            &[&params.owner, &params.limit, &params.offset],
        )
        .await?;
    rows.iter().map(Contact::try_from).collect()
}

/// Overwrites every mutable column of a contact.
pub async fn update_contact(pool: &Pool, params: UpdateContactParams) -> Result<Contact> {
    let client = pool.get().await?;
    let row = client
        .query_opt(
            &*format!(
                r#"
                UPDATE contacts
                SET firstname = $2,
                    lastname = $3,
                    fullname = $4,
                    home_address = $5,
                    email = $6,
                    phone_number = $7
                WHERE id = $1
                RETURNING {CONTACT_COLUMNS}
                "#
            ),
            &[
                &params.id,
                &params.firstname,
                &params.lastname,
                &params.fullname,
                &params.home_address,
                &params.email,
                &params.phone_number,
            ],
        )
        .await?
        .ok_or(AppError::NotFound("contact"))?;
    Contact::try_from(&row)
}

/// Deletes a contact by id.
pub async fn delete_contact(pool: &Pool, id: i64) -> Result<()> {
    let client = pool.get().await?;
    client
        .execute("DELETE FROM contacts WHERE id = $1", &[&id])
        .await?;
    Ok(())
}

/// Lists the owner's contacts bound to a skill with the given name and,
/// when provided, level.
pub async fn contacts_with_skill(
    pool: &Pool,
    params: ContactsWithSkillParams,
) -> Result<Vec<Contact>> {
    let client = pool.get().await?;
    let rows = client
        .query(
            &*format!(
                r#"
                SELECT {CONTACT_COLUMNS}
                FROM contacts
                WHERE owner = $1
                  AND id IN (
                    SELECT chs.contact_id
                    FROM contact_has_skill chs
                    INNER JOIN skills s ON s.id = chs.skill_id
                    WHERE s.skill_name = $2
                      AND ($3::VARCHAR IS NULL OR s.skill_level = $3)
                  )
                ORDER BY id
                "#
            ),
            &[&params.owner, &params.skill_name, &params.skill_level],
        )
        .await?;
    rows.iter().map(Contact::try_from).collect()
}
