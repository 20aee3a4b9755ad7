//
//  gocd-client
//  api/common/links.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HAL Links
//!
//! Nearly every GoCD response carries a `_links` object that names related
//! resources:
//!
//! ```json
//! {
//!   "self": {"href": "https://ci.example.com/go/api/admin/pipelines/build"},
//!   "doc":  {"href": "https://api.gocd.org/#pipeline-config"},
//!   "find": {"href": "https://ci.example.com/go/api/admin/pipelines/:pipeline_name"}
//! }
//! ```
//!
//! [`HalLinks`] keeps the relations in the order the server sent them,
//! looks them up without regard to case, and refuses hrefs that are not
//! valid URL references.
//!
//! ## Example
//!
//! ```rust
//! use gocd_client::api::common::HalLinks;
//!
//! let links = HalLinks::from_json(r#"{"Self": {"href": "https://ci.example.com/go/api/version"}}"#)?;
//! assert_eq!(links.keys(), vec!["Self"]);
//! assert_eq!(links["self"].href, "https://ci.example.com/go/api/version");
//! assert!(links.get("doc").is_none());
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;
use std::ops::Index;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use url::{ParseError, Url};

/// A rejected link href.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("parse \"{href}\": {reason}")]
    InvalidHref { href: String, reason: String },
}

/// A single named relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalLink {
    pub name: String,
    pub href: String,
}

impl HalLink {
    /// Validates `href` and builds the link.
    ///
    /// Absolute URLs and relative references (`/go/api/agents`) are both
    /// accepted. A relative reference whose first path segment contains a
    /// colon is ambiguous with a scheme and is rejected.
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Result<Self, LinkError> {
        let href = href.into();
        validate_href(&href)?;
        Ok(Self {
            name: name.into(),
            href,
        })
    }

    /// The href as an absolute URL, when it is one.
    pub fn url(&self) -> Option<Url> {
        Url::parse(&self.href).ok()
    }
}

fn validate_href(href: &str) -> Result<(), LinkError> {
    let invalid = |reason: &str| LinkError::InvalidHref {
        href: href.to_string(),
        reason: reason.to_string(),
    };

    match Url::parse(href) {
        Ok(_) => Ok(()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let first_segment = href
                .split(['/', '?', '#'])
                .next()
                .unwrap_or_default();
            if first_segment.contains(':') {
                return Err(invalid("first path segment in URL cannot contain colon"));
            }
            Ok(())
        }
        Err(e) => Err(invalid(&e.to_string())),
    }
}

/// Ordered, case-insensitive collection of [`HalLink`]s.
///
/// Names are unique. Adding a name that is already present replaces its
/// href in place, so a document with duplicate keys keeps the last value at
/// the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HalLinks {
    links: Vec<HalLink>,
}

impl HalLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a `_links` object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds or replaces a relation.
    pub fn add(&mut self, name: impl Into<String>, href: impl Into<String>) -> Result<(), LinkError> {
        self.insert(HalLink::new(name, href)?);
        Ok(())
    }

    fn insert(&mut self, link: HalLink) {
        match self
            .links
            .iter_mut()
            .find(|l| l.name.eq_ignore_ascii_case(&link.name))
        {
            Some(existing) => existing.href = link.href,
            None => self.links.push(link),
        }
    }

    /// Existence-checked lookup.
    pub fn get(&self, name: &str) -> Option<&HalLink> {
        self.links.iter().find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Relation names in insertion order.
    pub fn keys(&self) -> Vec<&str> {
        self.links.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HalLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Panicking lookup. Use [`HalLinks::get`] when the relation may be absent.
impl Index<&str> for HalLinks {
    type Output = HalLink;

    fn index(&self, name: &str) -> &Self::Output {
        match self.get(name) {
            Some(link) => link,
            None => panic!("no link named '{name}'"),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Href {
    href: String,
}

impl Serialize for HalLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.links.len()))?;
        for link in &self.links {
            map.serialize_entry(
                &link.name,
                &Href {
                    href: link.href.clone(),
                },
            )?;
        }
        map.end()
    }
}

struct HalLinksVisitor;

impl<'de> Visitor<'de> for HalLinksVisitor {
    type Value = HalLinks;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of {\"name\": {\"href\": url}} relations")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut links = HalLinks::new();
        while let Some((name, value)) = access.next_entry::<String, Href>()? {
            let link = HalLink::new(name, value.href).map_err(de::Error::custom)?;
            links.insert(link);
        }
        Ok(links)
    }
}

impl<'de> Deserialize<'de> for HalLinks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HalLinksVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_marshal() {
        let mut links = HalLinks::new();
        links.add("test-link", "http://example.com").unwrap();
        assert_eq!(
            serde_json::to_string(&links).unwrap(),
            r#"{"test-link":{"href":"http://example.com"}}"#
        );
    }

    #[test]
    fn test_unmarshal_bad_json() {
        let err = HalLinks::from_json("hallo").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_unmarshal_bad_url() {
        let err = HalLinks::from_json(r#"{"test-link":{"href":"-test://bad-url"}}"#).unwrap_err();
        assert!(err
            .to_string()
            .starts_with(r#"parse "-test://bad-url": first path segment in URL cannot contain colon"#));
    }

    #[test]
    fn test_relative_href_accepted() {
        let links = HalLinks::from_json(
            r#"{"find":{"href":"/go/api/admin/pipelines/:pipeline_name"}}"#,
        )
        .unwrap();
        assert!(links["find"].url().is_none());
    }

    #[test]
    fn test_keys_preserve_order() {
        let links = HalLinks::from_json(
            r#"{"self":{"href":"https://a.example"},"doc":{"href":"https://b.example"},"find":{"href":"https://c.example"}}"#,
        )
        .unwrap();
        assert_eq!(links.keys(), vec!["self", "doc", "find"]);
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let links = HalLinks::from_json(
            r#"{"self":{"href":"https://old.example"},"doc":{"href":"https://doc.example"},"SELF":{"href":"https://new.example"}}"#,
        )
        .unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links.keys(), vec!["self", "doc"]);
        assert_eq!(links["self"].href, "https://new.example");
    }

    #[test]
    fn test_get_case_insensitive() {
        let mut links = HalLinks::new();
        links.add("Self", "https://ci.example.com/go/api/agents").unwrap();
        assert!(links.get("self").is_some());
        assert!(links.get("SELF").is_some());
        assert!(links.get("missing").is_none());
    }

    #[test]
    #[should_panic(expected = "no link named 'missing'")]
    fn test_index_missing_panics() {
        let links = HalLinks::new();
        let _ = &links["missing"];
    }

    #[test]
    fn test_round_trip() {
        let mut links = HalLinks::new();
        links.add("self", "https://ci.example.com/go/api/agents/1").unwrap();
        links.add("doc", "https://api.gocd.org/#agents").unwrap();
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(HalLinks::from_json(&json).unwrap(), links);
    }
}
