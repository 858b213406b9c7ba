//! Endpoint handlers
//!
//! Each handler decodes its request shape, does its work and returns a
//! [`Reply`]. Turning the reply into wire bytes is left to the router.

use chrono::Local;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{
    endpoint::Endpoint,
    error::{ApiError, ApiResult},
    models::{
        ContestListReply, EndCodeReply, FlagsReply, GenericRequest, IndexedReply,
        InfomercialRequest, Region,
        RpgDeleteRequest, RpgDownloadRequest, RpgListRequest, RpgReviewRequest, RpgUploadRequest,
        UsernameRequest,
        catalog::RpgListEntry,
        contest::ContestListEntry,
    },
    query::{FilterField, ListQuery, SortHints},
    state::AppState,
};

/// What a handler produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// JSON text, re-encoded for the client before sending
    Text(Vec<u8>),
    /// Raw bytes sent as they are
    Binary(Vec<u8>),
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    Ok(serde_json::from_slice(body)?)
}

fn json<T: Serialize>(value: &T) -> ApiResult<Reply> {
    Ok(Reply::Text(serde_json::to_vec(value)?))
}

/// Run the handler for `endpoint`
pub async fn handle(state: &AppState, endpoint: Endpoint, body: &[u8]) -> ApiResult<Reply> {
    match endpoint {
        Endpoint::Username => username(body),
        Endpoint::Flags => flags(body),
        Endpoint::SignIn => sign_in(body),
        Endpoint::ContestList => contest_list(state, body).await,
        Endpoint::RpgList
        | Endpoint::RpgListTitle
        | Endpoint::RpgListUName
        | Endpoint::RpgListSuid
        | Endpoint::RpgListPassword => rpg_list(state, endpoint, body).await,
        Endpoint::RpgDownload => rpg_download(state, body).await,
        Endpoint::News | Endpoint::MyRpgList => not_implemented::<GenericRequest>(endpoint, body),
        Endpoint::RpgReview => not_implemented::<RpgReviewRequest>(endpoint, body),
        Endpoint::Infomercial => not_implemented::<InfomercialRequest>(endpoint, body),
        Endpoint::RpgUpload => rpg_upload(body),
        Endpoint::RpgDelete => not_implemented::<RpgDeleteRequest>(endpoint, body),
    }
}

/// Username registration. Nothing is stored yet.
fn username(body: &[u8]) -> ApiResult<Reply> {
    let request: UsernameRequest = decode(body)?;
    debug!("Username registration in {} ({})", request.region, request.lang);

    json(&EndCodeReply::ok())
}

fn flags(body: &[u8]) -> ApiResult<Reply> {
    let request: GenericRequest = decode(body)?;

    json(&FlagsReply::for_request(&request))
}

fn sign_in(body: &[u8]) -> ApiResult<Reply> {
    let request: GenericRequest = decode(body)?;
    debug!("Sign-in from region {}", request.region);

    json(&EndCodeReply::ok())
}

async fn contest_list(state: &AppState, body: &[u8]) -> ApiResult<Reply> {
    let request: GenericRequest = decode(body)?;
    let region = Region::from_wire(&request.region);

    let contests = state.catalog.contest_entries(region).await?;
    let now = Local::now().naive_local();

    let entries: Vec<ContestListEntry> = contests
        .iter()
        .map(|contest| ContestListEntry::project(contest, &now))
        .collect();

    json(&ContestListReply::ok(entries))
}

async fn rpg_list(state: &AppState, endpoint: Endpoint, body: &[u8]) -> ApiResult<Reply> {
    let request: RpgListRequest = decode(body)?;
    let filter = endpoint.list_filter().unwrap_or(FilterField::None);

    let sort = SortHints {
        updated_at: &request.sortupdt,
        download_count: &request.sortdlcount,
        review_average: &request.sortreviewave,
    };
    let query = ListQuery::build(filter, &request.keyword, sort, request.recnum, request.offset)?;
    let region = Region::from_wire(&request.region);

    let entries = state.catalog.list_entries(region, &query).await?;
    debug!("{} returned {} entries", endpoint, entries.len());

    let entries: Vec<RpgListEntry> = entries.iter().map(RpgListEntry::from).collect();
    json(&IndexedReply::ok(entries))
}

async fn rpg_download(state: &AppState, body: &[u8]) -> ApiResult<Reply> {
    let request: RpgDownloadRequest = decode(body)?;
    let region = Region::from_wire(&request.region);

    if !state.catalog.is_public(region, request.sid).await? {
        return Err(ApiError::NotPublic {
            sid: request.sid,
            region: request.region,
        });
    }

    let content = state.archive.load(region, request.sid).await?;
    info!(
        "Serving game {}/{} ({} bytes)",
        request.sid,
        region.as_str(),
        content.len()
    );

    Ok(Reply::Binary(content))
}

/// Uploads arrive either as the JSON header or as the raw game data, so
/// the body is only inspected for logging.
fn rpg_upload(body: &[u8]) -> ApiResult<Reply> {
    match serde_json::from_slice::<RpgUploadRequest>(body) {
        Ok(request) if request.genres.is_empty() => {
            debug!("Upload of {} bytes without genres", request.datablocksize)
        }
        Ok(request) => debug!(
            "Upload of {} bytes with genres [{}]",
            request.datablocksize,
            request.genres.to_csv()
        ),
        Err(_) => debug!("Upload of {} bytes of raw data", body.len()),
    }

    Err(ApiError::NotImplemented(Endpoint::RpgUpload))
}

/// Decode the request so malformed payloads are told apart, then refuse
fn not_implemented<T: DeserializeOwned>(endpoint: Endpoint, body: &[u8]) -> ApiResult<Reply> {
    decode::<T>(body)?;
    Err(ApiError::NotImplemented(endpoint))
}
