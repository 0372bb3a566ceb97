//! Postgres-backed record stores.
//!
//! One table per record type. Ids come from `BIGSERIAL` columns, so they are
//! assigned by the database and increase monotonically. `sales.seller_id`
//! references `sellers.id` with `ON DELETE CASCADE`.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError::Storage` with the failing operation
//! in the message:
//!
//! | SQLx Error | PostgreSQL Error Code | Message prefix |
//! |------------|----------------------|----------------|
//! | Database (foreign key violation) | `23503` | `foreign key violation in ...` |
//! | Database (not-null violation) | `23502` | `missing required column in ...` |
//! | Database (other) | Any other | `database error in ...` |
//! | PoolClosed | N/A | `connection pool closed in ...` |
//! | Other | N/A | `sqlx error in ...` |
//!
//! Every statement runs in its own implicit transaction; `save_changes` has
//! nothing left to flush.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;

use salesdesk_core::{Entity, SaleId, SellerId};
use salesdesk_sales::{NewSale, Sale};
use salesdesk_sellers::{NewSeller, Seller};

use super::{RecordStore, SaleStore, StoreError, StoreFactory, Stores};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS sellers (
        id      BIGSERIAL PRIMARY KEY,
        tax_id  TEXT NOT NULL,
        name    TEXT NOT NULL DEFAULT '',
        email   TEXT NOT NULL DEFAULT '',
        phone   TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id         BIGSERIAL PRIMARY KEY,
        seller_id  BIGINT NOT NULL REFERENCES sellers (id) ON DELETE CASCADE,
        item       TEXT NOT NULL,
        date       TIMESTAMPTZ NOT NULL,
        status     TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS sales_seller_id_idx ON sales (seller_id)",
];

/// Factory over a shared Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PostgresStoreFactory {
    pool: Arc<PgPool>,
}

impl PostgresStoreFactory {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }
}

impl StoreFactory for PostgresStoreFactory {
    fn create(&self) -> Stores {
        Stores {
            sellers: Arc::new(PostgresSellerStore {
                pool: self.pool.clone(),
            }),
            sales: Arc::new(PostgresSaleStore {
                pool: self.pool.clone(),
            }),
        }
    }
}

/// `sellers` table.
#[derive(Debug, Clone)]
pub struct PostgresSellerStore {
    pool: Arc<PgPool>,
}

#[async_trait]
impl RecordStore<Seller> for PostgresSellerStore {
    #[instrument(skip(self, draft), err)]
    async fn add(&self, draft: NewSeller) -> Result<Seller, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO sellers (tax_id, name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&draft.tax_id)
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("add_seller", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("add_seller", e))?;
        Ok(Seller::with_id(SellerId::new(id), draft))
    }

    #[instrument(skip(self), fields(seller_id = %id), err)]
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, StoreError> {
        let row = sqlx::query("SELECT id, tax_id, name, email, phone FROM sellers WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_seller", e))?;

        row.map(|r| SellerRow::from_row(&r).map(Seller::from))
            .transpose()
            .map_err(|e| map_sqlx_error("find_seller", e))
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Seller>, StoreError> {
        let rows = sqlx::query("SELECT id, tax_id, name, email, phone FROM sellers ORDER BY id ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_sellers", e))?;

        rows.iter()
            .map(|r| SellerRow::from_row(r).map(Seller::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_sellers", e))
    }

    #[instrument(skip(self, record), fields(seller_id = %record.id), err)]
    async fn update(&self, record: &Seller) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE sellers
            SET tax_id = $2, name = $3, email = $4, phone = $5
            WHERE id = $1
            "#,
        )
        .bind(record.id.get())
        .bind(&record.tax_id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.phone)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_seller", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(record.id.get()));
        }
        Ok(())
    }

    #[instrument(skip(self, record), fields(seller_id = %record.id), err)]
    async fn remove(&self, record: &Seller) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM sellers WHERE id = $1")
            .bind(record.id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("remove_seller", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(record.id.get()));
        }
        Ok(())
    }

    async fn save_changes(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// `sales` table.
#[derive(Debug, Clone)]
pub struct PostgresSaleStore {
    pool: Arc<PgPool>,
}

#[async_trait]
impl RecordStore<Sale> for PostgresSaleStore {
    #[instrument(skip(self, draft), fields(seller_id = %draft.seller_id), err)]
    async fn add(&self, draft: NewSale) -> Result<Sale, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO sales (seller_id, item, date, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(draft.seller_id.get())
        .bind(&draft.item)
        .bind(draft.date)
        .bind(&draft.status)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("add_sale", e))?;

        let id: i64 = row.try_get("id").map_err(|e| map_sqlx_error("add_sale", e))?;
        Ok(Sale::with_id(SaleId::new(id), draft))
    }

    #[instrument(skip(self), fields(sale_id = %id), err)]
    async fn find_by_id(&self, id: SaleId) -> Result<Option<Sale>, StoreError> {
        let row = sqlx::query("SELECT id, seller_id, item, date, status FROM sales WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_sale", e))?;

        row.map(|r| SaleRow::from_row(&r).map(Sale::from))
            .transpose()
            .map_err(|e| map_sqlx_error("find_sale", e))
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Sale>, StoreError> {
        let rows = sqlx::query("SELECT id, seller_id, item, date, status FROM sales ORDER BY id ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_sales", e))?;

        rows.iter()
            .map(|r| SaleRow::from_row(r).map(Sale::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_sales", e))
    }

    #[instrument(skip(self, record), fields(sale_id = %record.id()), err)]
    async fn update(&self, record: &Sale) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE sales
            SET seller_id = $2, item = $3, date = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(record.id().get())
        .bind(record.seller_id().get())
        .bind(record.item())
        .bind(record.date())
        .bind(record.status())
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_sale", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(record.id().get()));
        }
        Ok(())
    }

    #[instrument(skip(self, record), fields(sale_id = %record.id()), err)]
    async fn remove(&self, record: &Sale) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(record.id().get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("remove_sale", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(record.id().get()));
        }
        Ok(())
    }

    async fn save_changes(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl SaleStore for PostgresSaleStore {
    /// The `ON DELETE CASCADE` foreign key already removes a seller's sales
    /// together with the seller row, so after a seller delete this finds none.
    #[instrument(skip(self), fields(seller_id = %seller_id), err)]
    async fn remove_by_seller(&self, seller_id: SellerId) -> Result<usize, StoreError> {
        let result = sqlx::query("DELETE FROM sales WHERE seller_id = $1")
            .bind(seller_id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("remove_sales_by_seller", e))?;
        Ok(result.rows_affected() as usize)
    }
}

struct SellerRow {
    id: i64,
    tax_id: String,
    name: String,
    email: String,
    phone: String,
}

impl<'r> FromRow<'r, PgRow> for SellerRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(SellerRow {
            id: row.try_get("id")?,
            tax_id: row.try_get("tax_id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
        })
    }
}

impl From<SellerRow> for Seller {
    fn from(row: SellerRow) -> Self {
        Seller {
            id: SellerId::new(row.id),
            tax_id: row.tax_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
        }
    }
}

struct SaleRow {
    id: i64,
    seller_id: i64,
    item: String,
    date: DateTime<Utc>,
    status: String,
}

impl<'r> FromRow<'r, PgRow> for SaleRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(SaleRow {
            id: row.try_get("id")?,
            seller_id: row.try_get("seller_id")?,
            item: row.try_get("item")?,
            date: row.try_get("date")?,
            status: row.try_get("status")?,
        })
    }
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Sale::restore(
            SaleId::new(row.id),
            SellerId::new(row.seller_id),
            row.item,
            row.date,
            row.status,
        )
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let detail = db_err.message().to_string();
            match db_err.code().as_deref() {
                Some("23503") => StoreError::Storage(format!(
                    "foreign key violation in {operation}: {detail}"
                )),
                Some("23502") => StoreError::Storage(format!(
                    "missing required column in {operation}: {detail}"
                )),
                _ => StoreError::Storage(format!("database error in {operation}: {detail}")),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Storage(format!("connection pool closed in {operation}"))
        }
        _ => StoreError::Storage(format!("sqlx error in {operation}: {err}")),
    }
}
