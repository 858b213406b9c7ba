//! PostgreSQL catalog repository
//!
//! Each region has its own pair of tables (`games_us`/`games_jp`,
//! `contests_us`/`contests_jp`). Table and column names only ever come from
//! the constants here and the enums in [`crate::query`]; request values are
//! always bound.

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgPool, Postgres, QueryBuilder, Row, postgres::PgRow};
use tracing::debug;

use super::CatalogStore;
use crate::{
    genre::GenreSet,
    models::{Region, catalog::CatalogEntry, contest::ContestEntry},
    query::ListQuery,
};

const GAME_COLUMNS: &str = "sid, suid, title, uname, password, updt, datablocksize, version, \
     packageversion, reviewave, lang, edit, attribute, award, famer, comment, contest, owner, \
     genre, dlcount";

const CONTEST_COLUMNS: &str = "id, name, apply_start, apply_end, exc_start, exc_end";

fn games_table(region: Region) -> &'static str {
    match region {
        Region::Us => "games_us",
        Region::Jpn => "games_jp",
    }
}

fn contests_table(region: Region) -> &'static str {
    match region {
        Region::Us => "contests_us",
        Region::Jpn => "contests_jp",
    }
}

/// Assemble the listing statement for a region
pub(crate) fn list_statement(region: Region, query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {} FROM {}",
        GAME_COLUMNS,
        games_table(region)
    ));

    if let (Some(column), Some(pattern)) = (query.filter.column(), query.pattern()) {
        let operator = if query.filter.is_exact() { " = " } else { " LIKE " };
        builder
            .push(" WHERE ")
            .push(column)
            .push(operator)
            .push_bind(pattern);
    }

    if let Some(column) = query.sort.column() {
        builder
            .push(" ORDER BY ")
            .push(column)
            .push(" ")
            .push(query.direction.sql());
    }

    // OFFSET without LIMIT is pointless
    if query.limit > 0 {
        builder.push(" LIMIT ").push_bind(query.limit as i64);
        if query.offset > 0 {
            builder.push(" OFFSET ").push_bind(query.offset as i64);
        }
    }

    builder
}

fn catalog_entry(row: &PgRow) -> Result<CatalogEntry, sqlx::Error> {
    let genre: String = row.try_get("genre")?;

    Ok(CatalogEntry {
        sid: row.try_get("sid")?,
        suid: row.try_get("suid")?,
        title: row.try_get("title")?,
        uname: row.try_get("uname")?,
        password: row.try_get("password")?,
        updt: row.try_get("updt")?,
        datablocksize: row.try_get("datablocksize")?,
        version: row.try_get("version")?,
        packageversion: row.try_get("packageversion")?,
        reviewave: row.try_get("reviewave")?,
        lang: row.try_get("lang")?,
        edit: row.try_get("edit")?,
        attribute: row.try_get("attribute")?,
        award: row.try_get("award")?,
        famer: row.try_get("famer")?,
        comment: row.try_get("comment")?,
        contest: row.try_get("contest")?,
        owner: row.try_get("owner")?,
        genres: GenreSet::from_csv(&genre),
        dlcount: row.try_get("dlcount")?,
    })
}

fn contest_entry(row: &PgRow) -> Result<ContestEntry, sqlx::Error> {
    Ok(ContestEntry {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        apply_start: row.try_get("apply_start")?,
        apply_end: row.try_get("apply_end")?,
        exc_start: row.try_get("exc_start")?,
        exc_end: row.try_get("exc_end")?,
    })
}

/// Catalog repository backed by PostgreSQL
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new catalog repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn contest_entries(&self, region: Region) -> DatabaseResult<Vec<ContestEntry>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            CONTEST_COLUMNS,
            contests_table(region)
        );

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        rows.iter()
            .map(contest_entry)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::Query)
    }

    async fn list_entries(
        &self,
        region: Region,
        query: &ListQuery,
    ) -> DatabaseResult<Vec<CatalogEntry>> {
        let mut statement = list_statement(region, query);
        debug!("Listing catalog: {}", statement.sql());

        let rows = statement
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        rows.iter()
            .map(catalog_entry)
            .collect::<Result<Vec<_>, _>>()
            .map_err(DatabaseError::Query)
    }

    async fn is_public(&self, region: Region, sid: i64) -> DatabaseResult<bool> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE sid = $1 AND region = $2",
            games_table(region)
        );

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(sid)
            .bind(region.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(count != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FilterField, SortHints};
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    fn select(table: &str) -> String {
        format!("SELECT {} FROM {}", GAME_COLUMNS, table)
    }

    #[test]
    fn test_unfiltered_statement() {
        let query = ListQuery::build(FilterField::None, "", SortHints::default(), 0, 9).unwrap();
        let statement = list_statement(Region::Us, &query);
        assert_eq!(statement.sql(), select("games_us"));
    }

    #[test]
    fn test_substring_filter_sorted_and_bounded() {
        let sort = SortHints {
            updated_at: "desc",
            download_count: "asc",
            review_average: "",
        };
        let keyword = STANDARD.encode("Quest");
        let query = ListQuery::build(FilterField::Title, &keyword, sort, 10, 5).unwrap();
        let statement = list_statement(Region::Jpn, &query);

        assert_eq!(
            statement.sql(),
            format!(
                "{} WHERE title LIKE $1 ORDER BY updt DESC LIMIT $2 OFFSET $3",
                select("games_jp")
            )
        );
    }

    #[test]
    fn test_password_filter_is_exact() {
        let keyword = STANDARD.encode("secret9");
        let query =
            ListQuery::build(FilterField::Password, &keyword, SortHints::default(), 0, 0).unwrap();
        let statement = list_statement(Region::Us, &query);

        assert_eq!(
            statement.sql(),
            format!("{} WHERE password = $1", select("games_us"))
        );
    }

    #[test]
    fn test_suid_filter_compares_text() {
        let keyword = STANDARD.encode("12");
        let sort = SortHints {
            review_average: "asc",
            ..SortHints::default()
        };
        let query = ListQuery::build(FilterField::Suid, &keyword, sort, 3, 0).unwrap();
        let statement = list_statement(Region::Us, &query);

        assert_eq!(
            statement.sql(),
            format!(
                "{} WHERE CAST(suid AS TEXT) LIKE $1 ORDER BY reviewave ASC LIMIT $2",
                select("games_us")
            )
        );
    }

    #[test]
    fn test_region_tables() {
        assert_eq!(games_table(Region::Us), "games_us");
        assert_eq!(games_table(Region::Jpn), "games_jp");
        assert_eq!(contests_table(Region::Us), "contests_us");
        assert_eq!(contests_table(Region::Jpn), "contests_jp");
    }
}
