use sqlx::{FromRow, PgPool};
use store::{Contact, ContactFields, ContactId, ContactStore, StoreError};

/// ContactStore backed by the `contacts` table.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    email: String,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Self {
            id: ContactId(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

fn unavailable(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

fn write_error(err: sqlx::Error) -> StoreError {
    if is_unique_violation(&err) {
        StoreError::DuplicateEmail
    } else {
        unavailable(err)
    }
}

impl ContactStore for PgStore {
    async fn list_all(&self) -> Result<Vec<Contact>, StoreError> {
        let rows: Vec<ContactRow> =
            sqlx::query_as("SELECT id, name, email FROM contacts ORDER BY name, id")
                .fetch_all(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn get(&self, id: ContactId) -> Result<Option<Contact>, StoreError> {
        let row: Option<ContactRow> =
            sqlx::query_as("SELECT id, name, email FROM contacts WHERE id = $1")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(row.map(Contact::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Contact>, StoreError> {
        let row: Option<ContactRow> =
            sqlx::query_as("SELECT id, name, email FROM contacts WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;
        Ok(row.map(Contact::from))
    }

    async fn insert(&self, fields: &ContactFields) -> Result<Contact, StoreError> {
        let row: ContactRow = sqlx::query_as(
            "INSERT INTO contacts (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error)?;
        Ok(row.into())
    }

    async fn update(&self, id: ContactId, fields: &ContactFields) -> Result<Contact, StoreError> {
        let row: Option<ContactRow> = sqlx::query_as(
            "UPDATE contacts SET name = $1, email = $2 WHERE id = $3 RETURNING id, name, email",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error)?;
        row.map(Contact::from).ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: ContactId) -> Result<Contact, StoreError> {
        let row: Option<ContactRow> =
            sqlx::query_as("DELETE FROM contacts WHERE id = $1 RETURNING id, name, email")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(unavailable)?;
        row.map(Contact::from).ok_or(StoreError::NotFound(id))
    }
}
