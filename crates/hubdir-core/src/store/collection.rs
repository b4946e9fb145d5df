use serde_json::{Map, Value};
use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use super::Filter;
use crate::error::StoreError;

/// A schema-flexible stored record.
pub type Document = Map<String, Value>;

/// Member holding the document key; unique within a collection.
pub const ID_FIELD: &str = "_id";

/// Handle to one logical collection. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    pool: SqlitePool,
}

impl Collection {
    pub(super) fn new(name: &str, pool: SqlitePool) -> Self {
        Self {
            name: name.to_owned(),
            pool,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documents matching `filter` in insertion order, skipping the first
    /// `skip` and returning at most `limit`.
    pub async fn find(
        &self,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, StoreError> {
        let mut qb = self.select("SELECT id, body FROM documents", filter);
        qb.push(" ORDER BY seq ASC LIMIT ");
        qb.push_bind(clamp_i64(limit));
        qb.push(" OFFSET ");
        qb.push_bind(clamp_i64(skip));

        let rows: Vec<(String, String)> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|(id, body)| parse_body(id, &body))
            .collect()
    }

    /// Exact lookup on `_id`.
    pub async fn find_one(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM documents WHERE collection = ?1 AND id = ?2")
                .bind(&self.name)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|(body,)| parse_body(id.to_owned(), &body))
            .transpose()
    }

    pub async fn count(&self, filter: &Filter) -> Result<u64, StoreError> {
        let mut qb = self.select("SELECT COUNT(*) FROM documents", filter);
        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Insert one document keyed by its string `_id`.
    pub async fn insert_one(&self, document: Document) -> Result<(), StoreError> {
        let (id, body) = encode(&document)?;
        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)")
            .bind(&self.name)
            .bind(&id)
            .bind(&body)
            .execute(&self.pool)
            .await
            .map_err(|e| self.insert_error(e, id))?;
        Ok(())
    }

    /// Insert all documents in one transaction; nothing is kept if any fails.
    pub async fn insert_many(&self, documents: Vec<Document>) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;
        let inserted = self.insert_in(&mut tx, &documents).await?;
        tx.commit().await?;
        Ok(inserted)
    }

    /// Atomically drop every document of this collection and insert
    /// `documents` in their place. Returns `(deleted, inserted)`.
    pub async fn replace_all(&self, documents: Vec<Document>) -> Result<(u64, u64), StoreError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM documents WHERE collection = ?1")
            .bind(&self.name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let inserted = self.insert_in(&mut tx, &documents).await?;
        tx.commit().await?;
        Ok((deleted, inserted))
    }

    async fn insert_in(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        documents: &[Document],
    ) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for document in documents {
            let (id, body) = encode(document)?;
            sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?1, ?2, ?3)")
                .bind(&self.name)
                .bind(&id)
                .bind(&body)
                .execute(&mut **tx)
                .await
                .map_err(|e| self.insert_error(e, id))?;
            inserted += 1;
        }
        Ok(inserted)
    }

    fn select<'args>(&self, head: &str, filter: &Filter) -> QueryBuilder<'args, Sqlite> {
        let mut qb = QueryBuilder::new(head);
        qb.push(" WHERE collection = ");
        qb.push_bind(self.name.clone());
        qb.push(" AND ");
        filter.push_sql(&mut qb);
        qb
    }

    fn insert_error(&self, e: sqlx::Error, id: String) -> StoreError {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            StoreError::DuplicateKey {
                collection: self.name.clone(),
                id,
            }
        } else {
            StoreError::Unavailable(e)
        }
    }
}

fn encode(document: &Document) -> Result<(String, String), StoreError> {
    let id = document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingId)?
        .to_owned();
    let body = serde_json::to_string(document).map_err(|e| StoreError::MalformedDocument {
        id: id.clone(),
        message: e.to_string(),
    })?;
    Ok((id, body))
}

fn parse_body(id: String, body: &str) -> Result<Document, StoreError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::MalformedDocument {
            id,
            message: format!("expected a JSON object, found {other}"),
        }),
        Err(e) => Err(StoreError::MalformedDocument {
            id,
            message: e.to_string(),
        }),
    }
}

fn clamp_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
