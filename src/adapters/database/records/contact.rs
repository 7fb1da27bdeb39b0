use crate::domain::submission::ContactSubmission;
use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: OffsetDateTime,
}

impl From<ContactRecord> for ContactSubmission {
    fn from(record: ContactRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            message: record.message,
            created_at: record.created_at,
        }
    }
}
