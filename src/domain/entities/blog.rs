//! Blog post record as served by the content API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record::{set_str_field, str_field};

const SLUG: &str = "slug";
const FEATURED_IMAGE: &str = "featured_image";
const CONTENT: &str = "content";

/// Blog post.
///
/// `featured_image` is a scalar image URL and `content` is rich-text HTML
/// that may embed `<img>` tags. All other fields pass through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blog {
    fields: Map<String, Value>,
}

impl Blog {
    /// URL-friendly identifier.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        str_field(&self.fields, SLUG)
    }

    /// Absolute URL of the featured image.
    #[must_use]
    pub fn featured_image(&self) -> Option<&str> {
        str_field(&self.fields, FEATURED_IMAGE)
    }

    /// Replaces the featured image URL.
    pub fn set_featured_image(&mut self, url: String) {
        set_str_field(&mut self.fields, FEATURED_IMAGE, url);
    }

    /// Rich-text body.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        str_field(&self.fields, CONTENT)
    }

    /// Replaces the rich-text body.
    pub fn set_content(&mut self, html: String) {
        set_str_field(&mut self.fields, CONTENT, html);
    }
}
