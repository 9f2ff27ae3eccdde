//! Wire shapes of content API responses.

use serde::Deserialize;

/// A listing body: either paginated (`{"results": [...]}`) or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    /// Paginated response.
    Paginated {
        /// Records on this page.
        results: Vec<T>,
    },
    /// Unpaginated response.
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    /// Returns the contained records.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        match self {
            Self::Paginated { results } => results,
            Self::Bare(records) => records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Attorney;

    #[test]
    fn test_paginated_listing() {
        let json = r#"{"count": 1, "next": null, "results": [{"slug": "a"}]}"#;
        let listing: Listing<Attorney> = serde_json::from_str(json).unwrap();
        let records = listing.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].slug(), Some("a"));
    }

    #[test]
    fn test_bare_listing() {
        let json = r#"[{"slug": "a"}, {"slug": "b"}]"#;
        let listing: Listing<Attorney> = serde_json::from_str(json).unwrap();
        assert_eq!(listing.into_records().len(), 2);
    }

    #[test]
    fn test_null_fields_do_not_drop_the_listing() {
        let json = r#"[{"full_name": "A", "email": null}, {"full_name": "B"}]"#;
        let listing: Listing<Attorney> = serde_json::from_str(json).unwrap();
        let records = listing.into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(
            serde_json::to_string(&records[0]).unwrap(),
            r#"{"full_name":"A","email":null}"#
        );
    }
}
