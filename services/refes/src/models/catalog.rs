//! Catalog entries and their wire projection

use chrono::NaiveDateTime;
use serde::Serialize;

use super::{encode_text, format_wire_time};
use crate::genre::GenreSet;

/// One game as stored in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub sid: i32,
    pub suid: i32,
    pub title: String,
    pub uname: String,
    pub password: String,
    pub updt: NaiveDateTime,
    pub datablocksize: i32,
    pub version: i32,
    pub packageversion: i32,
    pub reviewave: f64,
    pub lang: String,
    pub edit: i32,
    pub attribute: i32,
    pub award: i32,
    pub famer: i32,
    pub comment: String,
    pub contest: i32,
    pub owner: i32,
    pub genres: GenreSet,
    pub dlcount: i32,
}

/// A catalog entry as the client sees it. Every value is a string; free
/// text is base64.
#[derive(Debug, Clone, Serialize)]
pub struct RpgListEntry {
    pub sid: String,
    pub suid: String,
    pub title: String,
    pub uname: String,
    pub password: String,
    pub updt: String,
    pub datablocksize: String,
    pub version: String,
    pub packageversion: String,
    pub reviewave: String,
    pub lang: String,
    pub edit: String,
    pub attribute: String,
    pub award: String,
    pub famer: String,
    pub comment: String,
    pub contest: String,
    pub owner: String,
    pub dlcount: String,
    #[serde(flatten)]
    pub genres: GenreSet,
}

impl From<&CatalogEntry> for RpgListEntry {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            sid: entry.sid.to_string(),
            suid: entry.suid.to_string(),
            title: encode_text(&entry.title),
            uname: encode_text(&entry.uname),
            password: entry.password.clone(),
            updt: format_wire_time(&entry.updt),
            datablocksize: entry.datablocksize.to_string(),
            version: entry.version.to_string(),
            packageversion: entry.packageversion.to_string(),
            reviewave: format!("{:.5}", entry.reviewave),
            lang: entry.lang.clone(),
            edit: entry.edit.to_string(),
            attribute: entry.attribute.to_string(),
            award: entry.award.to_string(),
            famer: entry.famer.to_string(),
            comment: encode_text(&entry.comment),
            contest: entry.contest.to_string(),
            owner: entry.owner.to_string(),
            dlcount: entry.dlcount.to_string(),
            genres: entry.genres,
        }
    }
}
