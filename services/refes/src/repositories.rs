//! Catalog store access
//!
//! Handlers only see the [`CatalogStore`] trait. The PostgreSQL
//! implementation lives in [`catalog`]; tests swap in an in-memory one.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::{
    models::{Region, catalog::CatalogEntry, contest::ContestEntry},
    query::ListQuery,
};

pub mod catalog;

/// Region-partitioned catalog of games and contests
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All contests of a region
    async fn contest_entries(&self, region: Region) -> DatabaseResult<Vec<ContestEntry>>;

    /// Games of a region matching a list query, in query order
    async fn list_entries(
        &self,
        region: Region,
        query: &ListQuery,
    ) -> DatabaseResult<Vec<CatalogEntry>>;

    /// Whether a game may be downloaded in a region
    async fn is_public(&self, region: Region, sid: i64) -> DatabaseResult<bool>;
}
