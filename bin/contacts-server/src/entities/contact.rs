use std::future::Future;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use contacts_types::NewContact;
use uuid::Uuid;

use crate::entities::{ContactRecord, SqliteStore};

/// Append-only contact persistence.
///
/// The store is the sole authority for `id` and `created_at`; callers never
/// supply either.
pub trait ContactStore: Send + Sync + 'static {
    /// Assign an id and creation time, persist, and return the stored row.
    fn insert(
        &self,
        contact: NewContact,
    ) -> impl Future<Output = Result<ContactRecord, sqlx::Error>> + Send;

    /// Every record, newest first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<ContactRecord>, sqlx::Error>> + Send;
}

type ContactRow = (String, String, String, String, Option<String>, String);

impl ContactStore for SqliteStore {
    async fn insert(&self, contact: NewContact) -> Result<ContactRecord, sqlx::Error> {
        let record = ContactRecord {
            id: Uuid::new_v4().to_string(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            message: contact.message,
            // Truncated to the stored precision so the returned row equals
            // what list_all reads back.
            created_at: Utc::now().trunc_subsecs(6),
        };
        sqlx::query(
            "INSERT INTO contacts (id, name, email, phone, message, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .bind(&record.message)
        .bind(format_timestamp(record.created_at))
        .execute(&self.pool)
        .await?;
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<ContactRecord>, sqlx::Error> {
        // rowid breaks ties between rows written within the same microsecond.
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id, name, email, phone, message, created_at \
                 FROM contacts ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, email, phone, message, created_at)| ContactRecord {
                id,
                name,
                email,
                phone,
                message,
                created_at: created_at.parse().unwrap_or_else(|e: chrono::ParseError| {
                    tracing::warn!(
                        raw = %created_at,
                        error = %e,
                        "failed to parse contact created_at; using now"
                    );
                    Utc::now()
                }),
            })
            .collect())
    }
}

/// Fixed-width RFC 3339 so that text ordering in SQL is chronological.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod test {
    use super::*;

    fn candidate(name: &str) -> NewContact {
        NewContact {
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_owned(),
            message: None,
        }
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let a: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let b: DateTime<Utc> = "2024-01-01T00:00:00.5Z".parse().unwrap();
        let (fa, fb) = (format_timestamp(a), format_timestamp(b));
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
        assert_eq!(fa, "2024-01-01T00:00:00.000000Z");
    }

    #[tokio::test]
    async fn insert_assigns_identity_and_timestamp() {
        let store = SqliteStore::in_memory().await.unwrap();
        let before = Utc::now();
        let stored = store.insert(candidate("Alex")).await.unwrap();

        assert!(Uuid::parse_str(&stored.id).is_ok());
        assert!(stored.created_at >= before);
        assert_eq!(stored.name, "Alex");
        assert_eq!(stored.phone, "555-0100");
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_empty() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_all_returns_newest_first() {
        let store = SqliteStore::in_memory().await.unwrap();
        let first = store.insert(candidate("First")).await.unwrap();
        let second = store.insert(candidate("Second")).await.unwrap();
        let third = store.insert(candidate("Third")).await.unwrap();

        let ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn stored_rows_round_trip_through_list() {
        let store = SqliteStore::in_memory().await.unwrap();
        let mut c = candidate("Noted");
        c.message = Some("met at the conference".to_owned());
        let stored = store.insert(c).await.unwrap();

        let listed = store.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], stored);
    }

    #[tokio::test]
    async fn closed_store_surfaces_storage_error() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.close().await;
        assert!(store.list_all().await.is_err());
        assert!(store.insert(candidate("Late")).await.is_err());
    }
}
