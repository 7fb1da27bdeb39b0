use crate::adapters::database::DbPool;
use crate::adapters::database::records::ContactRecord;
use crate::domain::submission::{NewSubmission, SubmissionReceipt};
use crate::services::store::{StoreError, SubmissionStore};
use async_trait::async_trait;

/// Stores submissions in the `contacts` table.
#[derive(Clone, Debug)]
pub struct PgSubmissionStore {
    pool: DbPool,
}

impl PgSubmissionStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    #[tracing::instrument(level = "debug", skip(self, submission), fields(email = %submission.email))]
    async fn insert(&self, submission: &NewSubmission) -> Result<SubmissionReceipt, StoreError> {
        let rows = sqlx::query_as::<_, ContactRecord>(
            r"
            INSERT INTO contacts (name, email, message, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id::text AS id, name, email, message, created_at
            ",
        )
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.message)
        .bind(submission.created_at)
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(SubmissionReceipt::Stored(rows.into_iter().map(Into::into).collect()))
    }
}

fn to_store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) => StoreError::new(db.message(), db.code().map(|code| code.into_owned())),
        _ => StoreError::new(err.to_string(), None),
    }
}
