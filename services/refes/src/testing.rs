//! In-memory collaborators for tests

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};

use crate::{
    archive::{ArchiveError, ContentArchive},
    models::{Region, catalog::CatalogEntry, contest::ContestEntry},
    query::{Direction, FilterField, ListQuery, SortField},
    repositories::CatalogStore,
    state::AppState,
};

pub fn test_state(catalog: MemoryCatalog, archive: MemoryArchive) -> AppState {
    AppState::new(Arc::new(catalog), Arc::new(archive))
}

/// Catalog held in vectors. Runs list queries the way the SQL store does.
#[derive(Clone, Default)]
pub struct MemoryCatalog {
    games: Vec<(Region, CatalogEntry)>,
    contests: Vec<(Region, ContestEntry)>,
    public: HashSet<(Region, i64)>,
    fail: bool,
    last_query: Arc<Mutex<Option<ListQuery>>>,
}

impl MemoryCatalog {
    /// A catalog whose every call fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_game(mut self, region: Region, entry: CatalogEntry) -> Self {
        self.games.push((region, entry));
        self
    }

    pub fn with_contest(mut self, region: Region, entry: ContestEntry) -> Self {
        self.contests.push((region, entry));
        self
    }

    pub fn with_public(mut self, region: Region, sid: i64) -> Self {
        self.public.insert((region, sid));
        self
    }

    pub fn last_query(&self) -> Option<ListQuery> {
        self.last_query.lock().unwrap().clone()
    }

    fn check(&self) -> DatabaseResult<()> {
        if self.fail {
            Err(DatabaseError::Query(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

fn filter_value(entry: &CatalogEntry, filter: FilterField) -> Option<String> {
    match filter {
        FilterField::None => None,
        FilterField::Title => Some(entry.title.clone()),
        FilterField::UName => Some(entry.uname.clone()),
        FilterField::Suid => Some(entry.suid.to_string()),
        FilterField::Password => Some(entry.password.clone()),
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn contest_entries(&self, region: Region) -> DatabaseResult<Vec<ContestEntry>> {
        self.check()?;
        Ok(self
            .contests
            .iter()
            .filter(|(stored, _)| *stored == region)
            .map(|(_, contest)| contest.clone())
            .collect())
    }

    async fn list_entries(
        &self,
        region: Region,
        query: &ListQuery,
    ) -> DatabaseResult<Vec<CatalogEntry>> {
        self.check()?;
        *self.last_query.lock().unwrap() = Some(query.clone());

        let mut entries: Vec<CatalogEntry> = self
            .games
            .iter()
            .filter(|(stored, _)| *stored == region)
            .map(|(_, entry)| entry)
            .filter(|entry| match (filter_value(entry, query.filter), &query.keyword) {
                (Some(value), Some(keyword)) if query.filter.is_exact() => &value == keyword,
                (Some(value), Some(keyword)) => value.contains(keyword.as_str()),
                _ => true,
            })
            .cloned()
            .collect();

        match query.sort {
            SortField::None => {}
            SortField::UpdatedAt => entries.sort_by_key(|entry| entry.updt),
            SortField::DownloadCount => entries.sort_by_key(|entry| entry.dlcount),
            SortField::ReviewAverage => {
                entries.sort_by(|a, b| a.reviewave.total_cmp(&b.reviewave))
            }
        }
        if query.sort != SortField::None && query.direction == Direction::Descending {
            entries.reverse();
        }

        if query.limit > 0 {
            entries = entries
                .into_iter()
                .skip(query.offset as usize)
                .take(query.limit as usize)
                .collect();
        }

        Ok(entries)
    }

    async fn is_public(&self, region: Region, sid: i64) -> DatabaseResult<bool> {
        self.check()?;
        Ok(self.public.contains(&(region, sid)))
    }
}

/// Archive of already-decompressed games
#[derive(Clone, Default)]
pub struct MemoryArchive {
    games: HashMap<(Region, i64), Vec<u8>>,
}

impl MemoryArchive {
    pub fn with_game(mut self, region: Region, sid: i64, content: Vec<u8>) -> Self {
        self.games.insert((region, sid), content);
        self
    }
}

#[async_trait]
impl ContentArchive for MemoryArchive {
    async fn load(&self, region: Region, sid: i64) -> Result<Vec<u8>, ArchiveError> {
        self.games
            .get(&(region, sid))
            .cloned()
            .ok_or_else(|| ArchiveError::Read {
                path: format!("{}/game{:06}.zst", region.as_str(), sid).into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}
