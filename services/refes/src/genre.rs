//! Genre tag codec
//!
//! A game carries up to 34 genre tags. The catalog stores them as a
//! comma-separated list of tag numbers (`"1,6,17"`), the client sees them as
//! sparse `genreN` fields set to `"1"`. Inside the server they are a single
//! [`GenreSet`]; the two foreign shapes only exist at the boundaries.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{IgnoredAny, MapAccess, Visitor},
    ser::SerializeMap,
};

/// Highest genre tag the client knows about
pub const MAX_GENRE: u8 = 34;

/// Bounded set of genre tags in `1..=34`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GenreSet(u64);

impl GenreSet {
    /// Create an empty set
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a tag. Returns `false` and leaves the set untouched when the tag
    /// is outside `1..=34`.
    pub fn insert(&mut self, tag: u8) -> bool {
        if !(1..=MAX_GENRE).contains(&tag) {
            return false;
        }
        self.0 |= 1u64 << tag;
        true
    }

    pub fn contains(&self, tag: u8) -> bool {
        (1..=MAX_GENRE).contains(&tag) && self.0 & (1u64 << tag) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate over the members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> {
        let set = *self;
        (1..=MAX_GENRE).filter(move |tag| set.contains(*tag))
    }

    /// Decode the catalog's comma-separated representation.
    ///
    /// Tokens that are not plain decimal numbers, or that fall outside
    /// `1..=34`, are dropped.
    pub fn from_csv(csv: &str) -> Self {
        let mut set = Self::new();
        for token in csv.split(',').map(str::trim) {
            if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(tag) = token.parse::<u8>() {
                set.insert(tag);
            }
        }
        set
    }

    /// Encode to the catalog's comma-separated representation
    pub fn to_csv(&self) -> String {
        self.iter()
            .map(|tag| tag.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<u8> for GenreSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Parse a wire field name such as `genre17` into its tag number
fn wire_tag(key: &str) -> Option<u8> {
    let digits = key.strip_prefix("genre")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits
        .parse::<u8>()
        .ok()
        .filter(|tag| (1..=MAX_GENRE).contains(tag))
}

/// Serializes as the sparse wire fields: one `"genreN": "1"` entry per
/// member, nothing for absent tags. Meant to be `#[serde(flatten)]`ed into
/// the surrounding object.
impl Serialize for GenreSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for tag in self.iter() {
            map.serialize_entry(&format!("genre{}", tag), "1")?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GenreSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GenreVisitor)
    }
}

struct GenreVisitor;

impl<'de> Visitor<'de> for GenreVisitor {
    type Value = GenreSet;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with genreN flag fields")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut set = GenreSet::new();
        while let Some(key) = map.next_key::<String>()? {
            match wire_tag(&key) {
                Some(tag) => {
                    let flag: serde_json::Value = map.next_value()?;
                    let member = match &flag {
                        serde_json::Value::String(s) => s == "1",
                        serde_json::Value::Number(n) => n.as_u64() == Some(1),
                        _ => false,
                    };
                    if member {
                        set.insert(tag);
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(set)
    }
}
