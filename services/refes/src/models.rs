//! Request and response shapes of the client protocol
//!
//! Field names follow the client byte for byte, misspellings included.
//! Requests default every missing field, the client leaves out whatever it
//! doesn't care about.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::NaiveDateTime;

pub mod catalog;
pub mod contest;
mod reply;
mod request;

pub use reply::*;
pub use request::*;

/// Timestamp format used everywhere on the wire
pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn format_wire_time(time: &NaiveDateTime) -> String {
    time.format(WIRE_TIME_FORMAT).to_string()
}

/// Text fields are base64 on the wire so the client can carry any script
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Storage partition a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Us,
    Jpn,
}

impl Region {
    /// `JPN` selects the Japanese partition, anything else the US one
    pub fn from_wire(region: &str) -> Self {
        if region == "JPN" { Region::Jpn } else { Region::Us }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Jpn => "JPN",
        }
    }
}
