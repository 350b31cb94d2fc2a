//! Pagination metadata attached to list responses

use serde::{Deserialize, Deserializer, Serialize};

/// Page cursor metadata returned alongside list-shaped payloads
///
/// This is a snapshot of one fetched page. It owns no navigation state:
/// `previous` is `None` exactly on the first page and `next` is `None`
/// exactly on the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Index of this page (0-based)
    #[serde(deserialize_with = "deserialize_index")]
    pub page: u32,
    /// Page size limit used for the request
    #[serde(deserialize_with = "deserialize_index")]
    pub limit: u32,
    /// Index of the previous page, if any
    #[serde(default, deserialize_with = "deserialize_optional_index")]
    pub previous: Option<u32>,
    /// Index of the next page, if any
    #[serde(default, deserialize_with = "deserialize_optional_index")]
    pub next: Option<u32>,
}

impl Pagination {
    /// Pagination for a payload that fits on one page
    pub fn single(limit: u32) -> Self {
        Self {
            page: 0,
            limit,
            previous: None,
            next: None,
        }
    }

    /// Returns true if there is no page before this one
    pub fn is_first(&self) -> bool {
        self.previous.is_none()
    }

    /// Returns true if there is no page after this one
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndex {
    Number(u64),
    Text(String),
}

fn parse_raw<E: serde::de::Error>(raw: RawIndex) -> Result<Option<u32>, E> {
    let value = match raw {
        RawIndex::Number(n) => n,
        RawIndex::Text(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("null") {
                return Ok(None);
            }
            s.parse::<u64>().map_err(E::custom)?
        }
    };
    u32::try_from(value).map(Some).map_err(E::custom)
}

fn deserialize_index<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    parse_raw(RawIndex::deserialize(deserializer)?)?
        .ok_or_else(|| D::Error::custom("page index must not be null"))
}

/// Previous/next indices arrive as numbers, `null`, or sometimes as strings.
fn deserialize_optional_index<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawIndex>::deserialize(deserializer)? {
        Some(raw) => parse_raw(raw),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let json = r#"{"previous": 0, "limit": 20, "page": 1, "next": 2}"#;
        let p: Pagination = serde_json::from_str(json).unwrap();

        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
        assert_eq!(p.previous, Some(0));
        assert_eq!(p.next, Some(2));
        assert!(!p.is_first());
        assert!(!p.is_last());
    }

    #[test]
    fn test_null_and_string_indices() {
        let json = r#"{"previous": "null", "limit": "100", "page": "0", "next": null}"#;
        let p: Pagination = serde_json::from_str(json).unwrap();

        assert_eq!(p, Pagination::single(100));
        assert!(p.is_first());
        assert!(p.is_last());
    }

    #[test]
    fn test_missing_optional_fields() {
        let json = r#"{"limit": 50, "page": 3}"#;
        let p: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(p.previous, None);
        assert_eq!(p.next, None);
    }

    #[test]
    fn test_rejects_negative_index() {
        let json = r#"{"previous": null, "limit": 20, "page": -1, "next": null}"#;
        assert!(serde_json::from_str::<Pagination>(json).is_err());
    }
}
