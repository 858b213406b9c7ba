//! Catalog list queries
//!
//! Turns the loosely-typed listing request into a [`ListQuery`]: a filter
//! column, a sanitised keyword, a sort column and direction, and bounds.
//! Column names come from the closed enums below and nowhere else; the
//! keyword only ever reaches the store as a bound parameter.

use std::sync::OnceLock;

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use regex::Regex;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// The client pads its base64 inconsistently, so accept both forms
const KEYWORD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Column the listing is filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    None,
    Title,
    UName,
    Suid,
    Password,
}

impl FilterField {
    /// Column expression to compare the keyword against
    pub fn column(self) -> Option<&'static str> {
        match self {
            FilterField::None => None,
            FilterField::Title => Some("title"),
            FilterField::UName => Some("uname"),
            FilterField::Suid => Some("CAST(suid AS TEXT)"),
            FilterField::Password => Some("password"),
        }
    }

    /// Passwords must match exactly, everything else is a substring search
    pub fn is_exact(self) -> bool {
        self == FilterField::Password
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    None,
    UpdatedAt,
    DownloadCount,
    ReviewAverage,
}

impl SortField {
    pub fn column(self) -> Option<&'static str> {
        match self {
            SortField::None => None,
            SortField::UpdatedAt => Some("updt"),
            SortField::DownloadCount => Some("dlcount"),
            SortField::ReviewAverage => Some("reviewave"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn sql(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }

    /// `"desc"` selects descending, any other value ascending
    fn from_hint(hint: &str) -> Self {
        if hint == "desc" {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }
}

/// The three sort fields of a listing request, as sent
#[derive(Debug, Clone, Copy, Default)]
pub struct SortHints<'a> {
    pub updated_at: &'a str,
    pub download_count: &'a str,
    pub review_average: &'a str,
}

impl SortHints<'_> {
    /// First non-empty hint wins, in the order updated-at, download count,
    /// review average.
    pub fn resolve(&self) -> (SortField, Direction) {
        [
            (SortField::UpdatedAt, self.updated_at),
            (SortField::DownloadCount, self.download_count),
            (SortField::ReviewAverage, self.review_average),
        ]
        .into_iter()
        .find(|(_, hint)| !hint.is_empty())
        .map(|(field, hint)| (field, Direction::from_hint(hint)))
        .unwrap_or((SortField::None, Direction::Ascending))
    }
}

/// A validated, bounded listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: FilterField,
    pub keyword: Option<String>,
    pub sort: SortField,
    pub direction: Direction,
    /// Maximum rows, 0 for no bound
    pub limit: u64,
    /// Rows to skip; always 0 when `limit` is 0
    pub offset: u64,
}

impl ListQuery {
    /// Build a query from the request fields.
    ///
    /// `raw_keyword` is base64 and is only looked at when `filter` is not
    /// [`FilterField::None`]; once decoded it must be plain ASCII
    /// alphanumerics.
    pub fn build(
        filter: FilterField,
        raw_keyword: &str,
        sort: SortHints<'_>,
        count: i64,
        offset: i64,
    ) -> ApiResult<Self> {
        let keyword = match filter {
            FilterField::None => None,
            _ => Some(decode_keyword(raw_keyword)?),
        };

        let (sort, direction) = sort.resolve();

        let (limit, offset) = if count > 0 {
            (count as u64, offset.max(0) as u64)
        } else {
            (0, 0)
        };

        let query = Self {
            filter,
            keyword,
            sort,
            direction,
            limit,
            offset,
        };
        debug!("Built list query: {:?}", query);
        Ok(query)
    }

    /// Value bound against the filter column, with wildcards for
    /// substring filters
    pub fn pattern(&self) -> Option<String> {
        let keyword = self.keyword.as_deref()?;
        if self.filter.is_exact() {
            Some(keyword.to_string())
        } else {
            Some(format!("%{}%", keyword))
        }
    }
}

fn decode_keyword(raw: &str) -> ApiResult<String> {
    static KEYWORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = KEYWORD_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Failed to compile keyword regex"));

    let decoded = KEYWORD_ENGINE
        .decode(raw)
        .map_err(|_| ApiError::InvalidKeyword(raw.to_string()))?;
    let keyword =
        String::from_utf8(decoded).map_err(|_| ApiError::InvalidKeyword(raw.to_string()))?;

    if !regex.is_match(&keyword) {
        return Err(ApiError::InvalidKeyword(keyword));
    }

    Ok(keyword)
}
