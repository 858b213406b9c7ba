//! Request payloads
//!
//! These mirror what the client sends. Not every field is acted on yet;
//! `token` in particular is accepted on every call but never checked.
#![allow(dead_code)]

use serde::{Deserialize, Deserializer};

use crate::genre::GenreSet;

/// Accepts a JSON number or a decimal string
fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Request carrying only the session fields (`flags`, `signin`, `news`,
/// `contestlist`, `myrpglist`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GenericRequest {
    pub region: String,
    pub lang: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsernameRequest {
    pub region: String,
    pub lang: String,
    pub token: String,
    pub uname: String,
}

/// Request for every `rpglist*` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpgListRequest {
    pub startupdt: i64,
    pub contest: i64,
    pub sortupdt: String,
    pub sortdlcount: String,
    pub sortreviewave: String,
    pub keyword: String,
    pub offset: i64,
    pub recnum: i64,
    pub award: i64,
    pub famer: i64,
    pub region: String,
    pub lang: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpgDownloadRequest {
    pub ver: String,
    #[serde(deserialize_with = "int_or_string")]
    pub sid: i64,
    pub region: String,
    pub lang: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpgReviewRequest {
    pub review: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub sid: i64,
    pub region: String,
    pub lang: String,
    pub token: String,
}

/// Report ("infomercial") request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InfomercialRequest {
    #[serde(deserialize_with = "int_or_string")]
    pub sid: i64,
    pub info1: i64,
    pub info2: i64,
    pub info3: i64,
    pub info4: i64,
    pub info5: i64,
    pub info6: i64,
    pub region: String,
    pub lang: String,
    pub token: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpgUploadRequest {
    pub title: String,
    pub version: String,
    pub lang: String,
    pub packageversion: i64,
    pub edit: i64,
    pub attribute: i64,
    pub comment: String,
    pub owner: i64,
    pub crc32: i64,
    pub datablocksize: i64,
    pub region: String,
    pub token: String,
    #[serde(flatten)]
    pub genres: GenreSet,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RpgDeleteRequest {
    pub region: String,
    pub lang: String,
    pub token: String,
    #[serde(deserialize_with = "int_or_string")]
    pub sid: i64,
}
