//! # Order Repository (SQLite)
//!
//! The SQLite implementation of the `OrderStore` port.
//!
//! ## Append Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteOrderStore::append(&order)                                       │
//! │       │                                                                 │
//! │       ├── id = Uuid::new_v4()                                           │
//! │       │                                                                 │
//! │       ├── BEGIN                                                         │
//! │       │     INSERT INTO orders (...)                                    │
//! │       │     INSERT INTO order_lines (...)   × line_items.len()          │
//! │       ├── COMMIT                                                        │
//! │       │                                                                 │
//! │       └── Ok(OrderId(id))                                               │
//! │                                                                         │
//! │  Any failure before COMMIT rolls back (the transaction is dropped), so │
//! │  an order is stored whole or not at all.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use rental_core::{Money, Order, OrderId, OrderLineItem, OrderStore, PricingTerms, StoreError};

/// An order read back from the database, with the id it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOrder {
    pub id: OrderId,
    pub order: Order,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    monthly_total_cents: i64,
    rental_period_months: i64,
    delivery_fee_cents: i64,
    subtotal_cents: i64,
    submitted_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    item_key: String,
    name_snapshot: String,
    unit_price_cents: i64,
    monthly_rate_cents: i64,
    quantity: i64,
    line_monthly_total_cents: i64,
}

/// Order store backed by the `orders` and `order_lines` tables.
#[derive(Debug, Clone)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    /// Creates a new SqliteOrderStore.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteOrderStore { pool }
    }

    /// Inserts the order and its lines in one transaction.
    pub async fn insert(&self, order: &Order) -> DbResult<OrderId> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!(id = %id, lines = order.line_items().len(), "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (
                id, monthly_total_cents, rental_period_months,
                delivery_fee_cents, subtotal_cents, submitted_at, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&id)
        .bind(order.monthly_total().cents())
        .bind(i64::from(order.rental_period_months()))
        .bind(order.delivery_fee().cents())
        .bind(order.subtotal().cents())
        .bind(order.submitted_at())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for (position, line) in order.line_items().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO order_lines (
                    order_id, position, item_key, name_snapshot,
                    unit_price_cents, monthly_rate_cents, quantity,
                    line_monthly_total_cents
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&id)
            .bind(i64::try_from(position).unwrap_or(i64::MAX))
            .bind(&line.key)
            .bind(&line.name)
            .bind(line.unit_price.cents())
            .bind(line.monthly_rate.cents())
            .bind(i64::from(line.quantity))
            .bind(line.line_monthly_total.cents())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderId::new(id))
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &OrderId) -> DbResult<Option<StoredOrder>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, monthly_total_cents, rental_period_months,
                   delivery_fee_cents, subtotal_cents, submitted_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    /// Lists the most recently submitted orders, newest first.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<StoredOrder>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, monthly_total_cents, rental_period_months,
                   delivery_fee_cents, subtotal_cents, submitted_at
            FROM orders
            ORDER BY submitted_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.hydrate(row).await?);
        }
        Ok(orders)
    }

    /// Counts stored orders.
    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    /// Loads the lines for a row and rebuilds the order.
    ///
    /// Totals are recomputed from the lines and must match what was stored.
    async fn hydrate(&self, row: OrderRow) -> DbResult<StoredOrder> {
        let lines: Vec<OrderLineRow> = sqlx::query_as(
            r#"
            SELECT item_key, name_snapshot, unit_price_cents, monthly_rate_cents,
                   quantity, line_monthly_total_cents
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(&row.id)
        .fetch_all(&self.pool)
        .await?;

        let line_items = lines
            .into_iter()
            .map(|line| {
                let quantity = u32::try_from(line.quantity).map_err(|_| {
                    DbError::corrupt("order_lines", format!("quantity {}", line.quantity))
                })?;
                Ok(OrderLineItem {
                    key: line.item_key,
                    name: line.name_snapshot,
                    unit_price: Money::from_cents(line.unit_price_cents),
                    monthly_rate: Money::from_cents(line.monthly_rate_cents),
                    quantity,
                    line_monthly_total: Money::from_cents(line.line_monthly_total_cents),
                })
            })
            .collect::<DbResult<Vec<_>>>()?;

        let months = u32::try_from(row.rental_period_months).map_err(|_| {
            DbError::corrupt("orders", format!("rental period {}", row.rental_period_months))
        })?;
        let terms = PricingTerms::new(months, Money::from_cents(row.delivery_fee_cents))
            .map_err(|e| DbError::corrupt("orders", e.to_string()))?;

        let order = Order::from_lines(line_items, &terms, row.submitted_at);

        if order.monthly_total().cents() != row.monthly_total_cents
            || order.subtotal().cents() != row.subtotal_cents
        {
            return Err(DbError::corrupt(
                "orders",
                format!("totals for {} do not match their lines", row.id),
            ));
        }

        Ok(StoredOrder {
            id: OrderId::new(row.id),
            order,
        })
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    #[instrument(skip(self, order), fields(backend = "sqlite"))]
    async fn append(&self, order: &Order) -> Result<OrderId, StoreError> {
        Ok(self.insert(order).await?)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::TimeZone;
    use rental_core::{Cart, Catalog, CatalogItem};
    use std::sync::Arc;

    fn chairs() -> Arc<Catalog> {
        Arc::new(
            Catalog::new(vec![
                CatalogItem::new(
                    "florence",
                    "Florence Chair",
                    Money::from_dollars(980),
                    Money::from_dollars(45),
                ),
                CatalogItem::new(
                    "hewitt",
                    "Hewitt Chair",
                    Money::from_dollars(897),
                    Money::from_dollars(39),
                ),
                CatalogItem::new(
                    "harper",
                    "Harper Swivel Chair",
                    Money::from_dollars(800),
                    Money::from_dollars(28),
                ),
            ])
            .unwrap(),
        )
    }

    fn order_at(seed: &[(&str, u32)], minute: u32) -> Order {
        let cart = Cart::with_quantities(chairs(), seed.iter().copied()).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, minute, 0).unwrap();
        Order::snapshot(&cart, &PricingTerms::default(), at)
    }

    async fn store() -> (Database, SqliteOrderStore) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = db.orders();
        (db, store)
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let (_db, store) = store().await;
        let order = order_at(&[("florence", 1), ("hewitt", 2), ("harper", 2)], 0);

        let id = store.append(&order).await.unwrap();
        let stored = store.get_by_id(&id).await.unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.order, order);
        assert_eq!(stored.order.subtotal(), Money::from_dollars(557));
    }

    #[tokio::test]
    async fn test_each_append_gets_a_new_id() {
        let (_db, store) = store().await;
        let order = order_at(&[("hewitt", 1)], 0);

        let first = store.append(&order).await.unwrap();
        let second = store.append(&order).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let (_db, store) = store().await;
        let missing = store.get_by_id(&OrderId::new("nope")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first() {
        let (_db, store) = store().await;
        let older = store.append(&order_at(&[("florence", 1)], 1)).await.unwrap();
        let newer = store.append(&order_at(&[("harper", 3)], 2)).await.unwrap();

        let recent = store.list_recent(10).await.unwrap();
        let ids: Vec<&OrderId> = recent.iter().map(|o| &o.id).collect();
        assert_eq!(ids, vec![&newer, &older]);

        assert_eq!(store.list_recent(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_order_has_no_lines() {
        let (_db, store) = store().await;
        let order = order_at(&[], 0);

        let id = store.append(&order).await.unwrap();
        let stored = store.get_by_id(&id).await.unwrap().unwrap();

        assert!(stored.order.is_empty());
        assert_eq!(stored.order.subtotal(), Money::from_dollars(199));
    }

    #[tokio::test]
    async fn test_closed_pool_is_unavailable() {
        let (db, store) = store().await;
        db.close().await;

        let err = store.append(&order_at(&[("hewitt", 1)], 0)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_tampered_totals_are_reported() {
        let (db, store) = store().await;
        let id = store.append(&order_at(&[("hewitt", 2)], 0)).await.unwrap();

        sqlx::query("UPDATE orders SET subtotal_cents = 1 WHERE id = ?1")
            .bind(id.as_str())
            .execute(db.pool())
            .await
            .unwrap();

        let err = store.get_by_id(&id).await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRow { .. }));
    }

    #[tokio::test]
    async fn test_orders_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rental.db");
        let order = order_at(&[("florence", 1), ("harper", 2)], 0);

        let id = {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            let id = db.orders().append(&order).await.unwrap();
            db.close().await;
            id
        };

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let stored = db.orders().get_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.order, order);
    }
}
