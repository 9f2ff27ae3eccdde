//! Practice area record as served by the content API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::record::{set_str_field, str_field};

const SLUG: &str = "slug";
const DESCRIPTION: &str = "description";
const FEATURED_IMAGE_URL: &str = "featured_image_url";
const GALLERY_IMAGES: &str = "gallery_images";
const IMAGE_URL: &str = "image_url";

/// A practice area page.
///
/// Image fields are `featured_image_url` and the `image_url` of each
/// `gallery_images` entry, both possibly host-relative; `description` is
/// rich-text HTML. Everything else passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PracticeArea {
    fields: Map<String, Value>,
}

impl PracticeArea {
    /// URL-friendly identifier.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        str_field(&self.fields, SLUG)
    }

    /// Rich-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        str_field(&self.fields, DESCRIPTION)
    }

    /// Replaces the description.
    pub fn set_description(&mut self, html: String) {
        set_str_field(&mut self.fields, DESCRIPTION, html);
    }

    /// Featured image URL.
    #[must_use]
    pub fn featured_image_url(&self) -> Option<&str> {
        str_field(&self.fields, FEATURED_IMAGE_URL)
    }

    /// Replaces the featured image URL.
    pub fn set_featured_image_url(&mut self, url: String) {
        set_str_field(&mut self.fields, FEATURED_IMAGE_URL, url);
    }

    /// Returns the `image_url` of every gallery entry, in gallery order.
    ///
    /// Entries without a string `image_url` yield `None`, so indices line up
    /// with the gallery.
    #[must_use]
    pub fn gallery_image_urls(&self) -> Vec<Option<&str>> {
        self.fields
            .get(GALLERY_IMAGES)
            .and_then(Value::as_array)
            .map(|images| {
                images
                    .iter()
                    .map(|image| image.get(IMAGE_URL).and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replaces the `image_url` of the gallery entry at `index`.
    ///
    /// Does nothing when there is no object entry at `index`.
    pub fn set_gallery_image_url(&mut self, index: usize, url: String) {
        if let Some(Value::Object(image)) = self
            .fields
            .get_mut(GALLERY_IMAGES)
            .and_then(|images| images.get_mut(index))
        {
            set_str_field(image, IMAGE_URL, url);
        }
    }
}
