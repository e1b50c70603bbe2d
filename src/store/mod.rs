//! Record persistence behind a repository interface.
//!
//! Handlers only see [`RecordStore`]; [`SqliteStore`] is the implementation
//! the server runs with.

pub mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    NewPlan, NewPriceTable, NewRoadMap, Plan, PlanPatch, PriceTable, PriceTablePatch, RoadMap,
    RoadMapPatch,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("corrupt document column: {0}")]
    Document(#[from] serde_json::Error),

    #[error("corrupt record: {0}")]
    CorruptRecord(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over road maps, plans and price tables.
///
/// `update_*` returns `None` and `delete_*` returns `false` when no record has
/// the given id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_maps(&self) -> StoreResult<Vec<RoadMap>>;
    async fn get_map(&self, id: &str) -> StoreResult<Option<RoadMap>>;
    async fn create_map(&self, map: NewRoadMap) -> StoreResult<RoadMap>;
    async fn update_map(&self, id: &str, patch: RoadMapPatch) -> StoreResult<Option<RoadMap>>;
    async fn delete_map(&self, id: &str) -> StoreResult<bool>;

    async fn list_plans(&self) -> StoreResult<Vec<Plan>>;
    async fn get_plan(&self, id: &str) -> StoreResult<Option<Plan>>;
    async fn create_plan(&self, plan: NewPlan) -> StoreResult<Plan>;
    async fn update_plan(&self, id: &str, patch: PlanPatch) -> StoreResult<Option<Plan>>;
    async fn delete_plan(&self, id: &str) -> StoreResult<bool>;

    async fn list_prices(&self) -> StoreResult<Vec<PriceTable>>;
    async fn get_price(&self, id: &str) -> StoreResult<Option<PriceTable>>;
    /// Earliest-created price table for `origin`
    async fn find_price_by_origin(&self, origin: &str) -> StoreResult<Option<PriceTable>>;
    async fn create_price(&self, price: NewPriceTable) -> StoreResult<PriceTable>;
    async fn update_price(
        &self,
        id: &str,
        patch: PriceTablePatch,
    ) -> StoreResult<Option<PriceTable>>;
    async fn delete_price(&self, id: &str) -> StoreResult<bool>;
}
