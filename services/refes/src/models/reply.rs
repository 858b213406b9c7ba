//! Reply payloads

use serde::{Serialize, Serializer, ser::SerializeMap};

use super::{GenericRequest, contest::ContestListEntry, encode_text};

/// Bare acknowledgement used by `username` and `signin`
#[derive(Debug, Clone, Serialize)]
pub struct EndCodeReply {
    #[serde(rename = "EndCode")]
    pub end_code: i32,
}

impl EndCodeReply {
    pub fn ok() -> Self {
        Self { end_code: 0 }
    }
}

/// Server flags and the caller's identity
#[derive(Debug, Clone, Serialize)]
pub struct FlagsReply {
    pub id: String,
    pub region: String,
    pub lang: String,
    pub maintenance: String,
    pub serchcontest: String,
    pub serchfamer: String,
    pub serchothercountries: String,
    pub contestmode: String,
    pub suid: String,
    pub uname: String,
    pub flag1: i32,
    pub flag2: i32,
    pub flag3: i32,
    pub endcode: i32,
}

/// Placeholder identity until sessions are tracked
const PLACEHOLDER_ID: &str = "1";
const PLACEHOLDER_UNAME: &str = "reFES User";

/// Reserved flag slots are always sent as -1
const RESERVED_FLAG: i32 = -1;

impl FlagsReply {
    pub fn for_request(request: &GenericRequest) -> Self {
        Self {
            id: PLACEHOLDER_ID.to_string(),
            region: request.region.clone(),
            lang: request.lang.clone(),
            maintenance: "0".to_string(),
            serchcontest: "0".to_string(),
            serchfamer: "0".to_string(),
            serchothercountries: "1".to_string(),
            contestmode: "0".to_string(),
            suid: PLACEHOLDER_ID.to_string(),
            uname: encode_text(PLACEHOLDER_UNAME),
            flag1: RESERVED_FLAG,
            flag2: RESERVED_FLAG,
            flag3: RESERVED_FLAG,
            endcode: 0,
        }
    }
}

/// Entries keyed by their position (`"0"`, `"1"`, ...)
#[derive(Debug, Clone)]
pub struct Indexed<T>(pub Vec<T>);

impl<T: Serialize> Serialize for Indexed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, entry) in self.0.iter().enumerate() {
            map.serialize_entry(&index.to_string(), entry)?;
        }
        map.end()
    }
}

/// A list reply: the positional entries at the top level, followed by
/// `endcode`
#[derive(Debug, Clone)]
pub struct IndexedReply<T> {
    pub entries: Vec<T>,
    pub end_code: i32,
}

impl<T> IndexedReply<T> {
    pub fn ok(entries: Vec<T>) -> Self {
        Self {
            entries,
            end_code: 0,
        }
    }
}

impl<T: Serialize> Serialize for IndexedReply<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        for (index, entry) in self.entries.iter().enumerate() {
            map.serialize_entry(&index.to_string(), entry)?;
        }
        map.serialize_entry("endcode", &self.end_code)?;
        map.end()
    }
}

/// Contest list reply. Unlike the game list, the entries stay nested under
/// `ContestListEntries`.
#[derive(Debug, Clone, Serialize)]
pub struct ContestListReply {
    #[serde(rename = "ContestListEntries")]
    pub entries: Indexed<ContestListEntry>,
    pub endcode: i32,
}

impl ContestListReply {
    pub fn ok(entries: Vec<ContestListEntry>) -> Self {
        Self {
            entries: Indexed(entries),
            endcode: 0,
        }
    }
}
