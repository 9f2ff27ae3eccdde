//! Attorney record as served by the content API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record::{set_str_field, str_field};

const SLUG: &str = "slug";
const PHOTO_URL: &str = "photo_url";

/// Attorney or team member profile.
///
/// Holds the JSON object returned by the API. Only `photo_url` is ever
/// rewritten; every other field, including ones this crate does not know,
/// serializes back exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attorney {
    fields: Map<String, Value>,
}

impl Attorney {
    /// URL-friendly identifier.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        str_field(&self.fields, SLUG)
    }

    /// Absolute photo URL.
    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        str_field(&self.fields, PHOTO_URL)
    }

    /// Replaces the photo URL.
    pub fn set_photo_url(&mut self, url: String) {
        set_str_field(&mut self.fields, PHOTO_URL, url);
    }
}
