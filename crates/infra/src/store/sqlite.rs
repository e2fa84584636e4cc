//! SQLite-backed item store.
//!
//! Every operation is a single SQL statement, so each one is atomic without an
//! explicit transaction. Mutations use `RETURNING` to hand back the row as
//! persisted (or as it was just before deletion).

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use tracing::instrument;

use stockroom_core::{Item, ItemFields, ItemFilter, ItemId, Page};

use super::r#trait::{ItemStore, StoreResult};

const SELECT_COLUMNS: &str = "id, name, description, price, quantity";

#[derive(Debug, FromRow)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    quantity: i64,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: ItemId(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

fn to_sql_int(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Item store over the `items` table.
#[derive(Debug, Clone)]
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    /// Wrap an existing pool. The caller is responsible for the schema;
    /// see [`SqliteItemStore::ensure_schema`].
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `url` and bootstrap the table.
    ///
    /// In-memory databases exist per connection, so they are pinned to a single
    /// long-lived pooled connection.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;

        tracing::info!(in_memory, "sqlite item store ready");
        Ok(store)
    }

    /// Create the `items` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS items (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT    NOT NULL,
                description TEXT    NOT NULL,
                price       REAL    NOT NULL,
                quantity    INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    #[instrument(skip(self), fields(item_id = %id))]
    async fn get(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: Page) -> StoreResult<Vec<Item>> {
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM items ORDER BY id LIMIT ?1 OFFSET ?2"
        ))
        .bind(to_sql_int(page.limit))
        .bind(to_sql_int(page.skip))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    #[instrument(skip(self, fields), fields(name = %fields.name))]
    async fn create(&self, fields: ItemFields) -> StoreResult<Item> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            INSERT INTO items (name, description, price, quantity)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.quantity)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(item_id = row.id, "item created");
        Ok(row.into())
    }

    #[instrument(skip(self, fields), fields(item_id = %id))]
    async fn update(&self, id: ItemId, fields: ItemFields) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE items
            SET name = ?1, description = ?2, price = ?3, quantity = ?4
            WHERE id = ?5
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(fields.quantity)
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    #[instrument(skip(self), fields(item_id = %id))]
    async fn delete(&self, id: ItemId) -> StoreResult<Option<Item>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "DELETE FROM items WHERE id = ?1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    #[instrument(skip(self))]
    async fn search(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {SELECT_COLUMNS} FROM items WHERE 1 = 1"
        ));

        // instr() is case-sensitive, unlike LIKE for ASCII text.
        if let Some(name) = filter.name_criterion() {
            qb.push(" AND instr(name, ")
                .push_bind(name.to_string())
                .push(") > 0");
        }
        if let Some(description) = filter.description_criterion() {
            qb.push(" AND instr(description, ")
                .push_bind(description.to_string())
                .push(") > 0");
        }
        if let Some(min) = filter.min_price {
            qb.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            qb.push(" AND price <= ").push_bind(max);
        }
        if let Some(quantity) = filter.quantity {
            qb.push(" AND quantity = ").push_bind(quantity);
        }
        qb.push(" ORDER BY id");

        let rows = qb
            .build_query_as::<ItemRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("sqlite item store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{conformance, StoreError};

    async fn memory_store() -> SqliteItemStore {
        SqliteItemStore::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn conforms_to_item_store_contract() {
        conformance::run_all(&memory_store().await).await;
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = memory_store().await;
        store.ensure_schema().await.unwrap();
        store.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    async fn in_memory_database_is_shared_across_calls() {
        let store = memory_store().await;
        let created = store
            .create(conformance::fields("Shared", "same connection", 1.0, 1))
            .await
            .unwrap();

        let clone = store.clone();
        assert_eq!(clone.get(created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn operations_fail_after_close() {
        let store = memory_store().await;
        store.close().await;

        let err = store.get(ItemId(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn description_search_is_case_sensitive() {
        let store = memory_store().await;
        store
            .create(conformance::fields("Lamp", "Brass Desk lamp", 30.0, 1))
            .await
            .unwrap();

        let upper = ItemFilter {
            description: Some("Brass".to_string()),
            ..Default::default()
        };
        let lower = ItemFilter {
            description: Some("brass".to_string()),
            ..Default::default()
        };

        assert_eq!(store.search(&upper).await.unwrap().len(), 1);
        assert!(store.search(&lower).await.unwrap().is_empty());
    }
}
