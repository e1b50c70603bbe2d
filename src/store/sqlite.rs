use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::models::{
    NewPlan, NewPriceTable, NewRoadMap, Pack, Plan, PlanPatch, PriceTable, PriceTablePatch,
    RoadMap, RoadMapPatch,
};
use crate::store::{RecordStore, StoreError, StoreResult};

/// [`RecordStore`] backed by SQLite.
///
/// Road and destination lists are kept as JSON text columns, one row per record.
#[derive(Clone)]
pub struct SqliteStore {
    db_pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct RoadMapRow {
    id: String,
    name: String,
    roads: String,
}

impl RoadMapRow {
    fn into_record(self) -> StoreResult<RoadMap> {
        Ok(RoadMap {
            id: self.id,
            name: self.name,
            roads: serde_json::from_str(&self.roads)?,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PlanRow {
    id: String,
    name: String,
    pack_minutes: i64,
    pack_extra: i64,
    pack_cost: i64,
}

impl PlanRow {
    fn into_record(self) -> StoreResult<Plan> {
        let column = |value: i64, name: &str| {
            u32::try_from(value).map_err(|_| {
                StoreError::CorruptRecord(format!("plan {} has {} = {}", self.id, name, value))
            })
        };
        let pack = Pack {
            minutes: column(self.pack_minutes, "pack_minutes")?,
            extra: column(self.pack_extra, "pack_extra")?,
            cost: column(self.pack_cost, "pack_cost")?,
        };

        Ok(Plan {
            id: self.id,
            name: self.name,
            pack,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PriceTableRow {
    id: String,
    origin: String,
    destinations: String,
}

impl PriceTableRow {
    fn into_record(self) -> StoreResult<PriceTable> {
        Ok(PriceTable {
            id: self.id,
            origin: self.origin,
            destinations: serde_json::from_str(&self.destinations)?,
        })
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl SqliteStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    /// Open (creating if needed) the database file at `path` and run migrations
    pub async fn connect(path: &str, max_connections: u32) -> StoreResult<Self> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        info!(database = %path, "Record store ready");
        Ok(store)
    }

    /// Single-connection in-memory database, migrated
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        // One connection that never expires, or the database goes with it
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!("./migrations").run(&self.db_pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db_pool
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn list_maps(&self) -> StoreResult<Vec<RoadMap>> {
        let rows = sqlx::query_as::<_, RoadMapRow>(
            r#"
            SELECT id, name, roads
            FROM road_maps
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        rows.into_iter().map(RoadMapRow::into_record).collect()
    }

    async fn get_map(&self, id: &str) -> StoreResult<Option<RoadMap>> {
        let row = sqlx::query_as::<_, RoadMapRow>(
            "SELECT id, name, roads FROM road_maps WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        row.map(RoadMapRow::into_record).transpose()
    }

    async fn create_map(&self, map: NewRoadMap) -> StoreResult<RoadMap> {
        let id = new_id();
        let now = now_millis();
        let roads = serde_json::to_string(&map.roads)?;

        sqlx::query(
            r#"
            INSERT INTO road_maps (id, name, roads, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&map.name)
        .bind(&roads)
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        Ok(RoadMap {
            id,
            name: map.name,
            roads: map.roads,
        })
    }

    async fn update_map(&self, id: &str, patch: RoadMapPatch) -> StoreResult<Option<RoadMap>> {
        let roads = patch.roads.as_ref().map(serde_json::to_string).transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE road_maps
            SET name = COALESCE(?, name), roads = COALESCE(?, roads), updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(patch.name)
        .bind(roads)
        .bind(now_millis())
        .bind(id)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_map(id).await
    }

    async fn delete_map(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM road_maps WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_plans(&self) -> StoreResult<Vec<Plan>> {
        let rows = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, name, pack_minutes, pack_extra, pack_cost
            FROM plans
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        rows.into_iter().map(PlanRow::into_record).collect()
    }

    async fn get_plan(&self, id: &str) -> StoreResult<Option<Plan>> {
        let row = sqlx::query_as::<_, PlanRow>(
            "SELECT id, name, pack_minutes, pack_extra, pack_cost FROM plans WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        row.map(PlanRow::into_record).transpose()
    }

    async fn create_plan(&self, plan: NewPlan) -> StoreResult<Plan> {
        let id = new_id();
        let now = now_millis();

        sqlx::query(
            r#"
            INSERT INTO plans (id, name, pack_minutes, pack_extra, pack_cost, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&plan.name)
        .bind(i64::from(plan.pack.minutes))
        .bind(i64::from(plan.pack.extra))
        .bind(i64::from(plan.pack.cost))
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        Ok(Plan {
            id,
            name: plan.name,
            pack: plan.pack,
        })
    }

    async fn update_plan(&self, id: &str, patch: PlanPatch) -> StoreResult<Option<Plan>> {
        let pack = patch.pack;

        let result = sqlx::query(
            r#"
            UPDATE plans
            SET name = COALESCE(?, name),
                pack_minutes = COALESCE(?, pack_minutes),
                pack_extra = COALESCE(?, pack_extra),
                pack_cost = COALESCE(?, pack_cost),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(patch.name)
        .bind(pack.map(|p| i64::from(p.minutes)))
        .bind(pack.map(|p| i64::from(p.extra)))
        .bind(pack.map(|p| i64::from(p.cost)))
        .bind(now_millis())
        .bind(id)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_plan(id).await
    }

    async fn delete_plan(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM plans WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_prices(&self) -> StoreResult<Vec<PriceTable>> {
        let rows = sqlx::query_as::<_, PriceTableRow>(
            r#"
            SELECT id, origin, destinations
            FROM price_tables
            ORDER BY created_at ASC, rowid ASC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        rows.into_iter().map(PriceTableRow::into_record).collect()
    }

    async fn get_price(&self, id: &str) -> StoreResult<Option<PriceTable>> {
        let row = sqlx::query_as::<_, PriceTableRow>(
            "SELECT id, origin, destinations FROM price_tables WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        row.map(PriceTableRow::into_record).transpose()
    }

    async fn find_price_by_origin(&self, origin: &str) -> StoreResult<Option<PriceTable>> {
        let row = sqlx::query_as::<_, PriceTableRow>(
            r#"
            SELECT id, origin, destinations
            FROM price_tables
            WHERE origin = ?
            ORDER BY created_at ASC, rowid ASC
            LIMIT 1
            "#,
        )
        .bind(origin)
        .fetch_optional(&self.db_pool)
        .await?;

        row.map(PriceTableRow::into_record).transpose()
    }

    async fn create_price(&self, price: NewPriceTable) -> StoreResult<PriceTable> {
        let id = new_id();
        let now = now_millis();
        let destinations = serde_json::to_string(&price.destinations)?;

        sqlx::query(
            r#"
            INSERT INTO price_tables (id, origin, destinations, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&price.origin)
        .bind(&destinations)
        .bind(now)
        .bind(now)
        .execute(&self.db_pool)
        .await?;

        Ok(PriceTable {
            id,
            origin: price.origin,
            destinations: price.destinations,
        })
    }

    async fn update_price(
        &self,
        id: &str,
        patch: PriceTablePatch,
    ) -> StoreResult<Option<PriceTable>> {
        let destinations = patch
            .destinations
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE price_tables
            SET origin = COALESCE(?, origin),
                destinations = COALESCE(?, destinations),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(patch.origin)
        .bind(destinations)
        .bind(now_millis())
        .bind(id)
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_price(id).await
    }

    async fn delete_price(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM price_tables WHERE id = ?")
            .bind(id)
            .execute(&self.db_pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DestinationPrice, Road};

    fn road(origin: &str, destination: &str, cost: f64) -> Road {
        Road {
            origin: origin.to_string(),
            destination: destination.to_string(),
            cost,
        }
    }

    #[tokio::test]
    async fn test_map_crud() {
        let store = SqliteStore::in_memory().await.unwrap();

        let created = store
            .create_map(NewRoadMap {
                name: "Barretos".to_string(),
                roads: vec![road("Jaborandi", "Colina", 10.0)],
            })
            .await
            .unwrap();
        assert!(Uuid::parse_str(&created.id).is_ok());

        let fetched = store.get_map(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = store
            .update_map(
                &created.id,
                RoadMapPatch {
                    roads: Some(vec![road("Colina", "Bebedouro", 32.0)]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Barretos");
        assert_eq!(updated.roads[0].cost, 32.0);

        assert!(store.delete_map(&created.id).await.unwrap());
        assert!(!store.delete_map(&created.id).await.unwrap());
        assert!(store.get_map(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_returns_none() {
        let store = SqliteStore::in_memory().await.unwrap();
        let missing = Uuid::new_v4().to_string();

        assert!(store.update_map(&missing, RoadMapPatch::default()).await.unwrap().is_none());
        assert!(store.update_plan(&missing, PlanPatch::default()).await.unwrap().is_none());
        assert!(store
            .update_price(&missing, PriceTablePatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_after_delete_returns_none() {
        let store = SqliteStore::in_memory().await.unwrap();
        let plan = store
            .create_plan(NewPlan {
                name: "FaleMais 60".to_string(),
                pack: Pack { minutes: 60, extra: 10, cost: 60 },
            })
            .await
            .unwrap();
        assert!(store.delete_plan(&plan.id).await.unwrap());

        let patch = PlanPatch {
            name: Some("FaleMais 90".to_string()),
            ..Default::default()
        };
        assert!(store.update_plan(&plan.id, patch).await.unwrap().is_none());
        assert!(store.list_plans().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_plan_update_keeps_other_columns() {
        let store = SqliteStore::in_memory().await.unwrap();
        let plan = store
            .create_plan(NewPlan {
                name: "FaleMais 30".to_string(),
                pack: Pack { minutes: 30, extra: 10, cost: 30 },
            })
            .await
            .unwrap();

        let renamed = store
            .update_plan(
                &plan.id,
                PlanPatch {
                    name: Some("FaleMais 30 Plus".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "FaleMais 30 Plus");
        assert_eq!(renamed.pack, plan.pack);
    }

    #[tokio::test]
    async fn test_out_of_range_pack_column_is_an_error() {
        let store = SqliteStore::in_memory().await.unwrap();
        let plan = store
            .create_plan(NewPlan {
                name: "FaleMais 30".to_string(),
                pack: Pack { minutes: 30, extra: 10, cost: 30 },
            })
            .await
            .unwrap();

        sqlx::query("UPDATE plans SET pack_minutes = ? WHERE id = ?")
            .bind(-1_i64)
            .bind(&plan.id)
            .execute(store.pool())
            .await
            .unwrap();

        let result = store.get_plan(&plan.id).await;
        assert!(matches!(result, Err(StoreError::CorruptRecord(_))));
        assert!(matches!(store.list_plans().await, Err(StoreError::CorruptRecord(_))));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = SqliteStore::in_memory().await.unwrap();
        for i in 0..5 {
            store
                .create_plan(NewPlan {
                    name: format!("plan{}", i),
                    pack: Pack { minutes: 30, extra: 10, cost: 30 },
                })
                .await
                .unwrap();
        }

        let names: Vec<String> = store
            .list_plans()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["plan0", "plan1", "plan2", "plan3", "plan4"]);
    }

    #[tokio::test]
    async fn test_find_price_by_origin() {
        let store = SqliteStore::in_memory().await.unwrap();
        let first = store
            .create_price(NewPriceTable {
                origin: "011".to_string(),
                destinations: vec![DestinationPrice {
                    destination: "016".to_string(),
                    cost: 1.9,
                }],
            })
            .await
            .unwrap();
        store
            .create_price(NewPriceTable {
                origin: "011".to_string(),
                destinations: vec![DestinationPrice {
                    destination: "016".to_string(),
                    cost: 5.0,
                }],
            })
            .await
            .unwrap();

        let found = store.find_price_by_origin("011").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(store.find_price_by_origin("012").await.unwrap().is_none());
    }
}
