//! Contest entries and their wire projection

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{encode_text, format_wire_time};

/// A contest as stored in the catalog. The stored review window is not
/// read, see [`ContestListEntry::project`].
#[derive(Debug, Clone, PartialEq)]
pub struct ContestEntry {
    pub id: i32,
    pub name: String,
    pub apply_start: NaiveDateTime,
    pub apply_end: NaiveDateTime,
    pub exc_start: NaiveDateTime,
    pub exc_end: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContestListEntry {
    pub id: String,
    pub name: String,
    pub apply_start: String,
    pub apply_end: String,
    pub review_start: String,
    pub review_end: String,
    pub exc_start: String,
    pub exc_end: String,
    pub now_date: String,
}

impl ContestListEntry {
    /// Project a stored contest for the client, stamped with the server's
    /// current time.
    ///
    /// The review window is sent with the apply window's dates, matching
    /// what the client has been seeing so far.
    pub fn project(entry: &ContestEntry, now: &NaiveDateTime) -> Self {
        Self {
            id: entry.id.to_string(),
            name: encode_text(&entry.name),
            apply_start: format_wire_time(&entry.apply_start),
            apply_end: format_wire_time(&entry.apply_end),
            review_start: format_wire_time(&entry.apply_start),
            review_end: format_wire_time(&entry.apply_end),
            exc_start: format_wire_time(&entry.exc_start),
            exc_end: format_wire_time(&entry.exc_end),
            now_date: format_wire_time(now),
        }
    }
}
