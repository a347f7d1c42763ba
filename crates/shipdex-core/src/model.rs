//! Catalog records as returned by the API.
//!
//! Records are kept as opaque, insertion-ordered JSON objects so every field the
//! API sends is passed through to the view in payload order. Only the fields the
//! pipeline depends on are validated and exposed through typed accessors.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::FetchError;

/// One starship record. Identity is its `url` field.
#[derive(Debug, Clone, PartialEq)]
pub struct Starship {
    fields: Map<String, Value>,
}

impl Starship {
    /// Validates and wraps a decoded starship object.
    ///
    /// `source` is the URL the record came from and is only used for error messages.
    pub fn from_value(value: Value, source: &str) -> Result<Self, FetchError> {
        let Value::Object(fields) = value else {
            return Err(FetchError::decode(source, "starship record is not an object"));
        };
        for key in ["url", "manufacturer"] {
            if !fields.get(key).is_some_and(Value::is_string) {
                return Err(FetchError::decode(
                    source,
                    format!("starship record missing string field `{key}`"),
                ));
            }
        }
        for key in ["pilots", "films"] {
            let ok = match fields.get(key) {
                Some(Value::Array(items)) => items.iter().all(Value::is_string),
                _ => false,
            };
            if !ok {
                return Err(FetchError::decode(
                    source,
                    format!("starship record field `{key}` is not a list of URLs"),
                ));
            }
        }
        Ok(Self { fields })
    }

    pub fn url(&self) -> &str {
        self.str_field("url").unwrap_or_default()
    }

    /// Comma-separated manufacturer names, e.g. `"Kuat Drive Yards, Fondor Shipyards"`.
    pub fn manufacturer(&self) -> &str {
        self.str_field("manufacturer").unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn pilots(&self) -> impl Iterator<Item = &str> {
        self.url_list("pilots")
    }

    pub fn films(&self) -> impl Iterator<Item = &str> {
        self.url_list("films")
    }

    pub fn created(&self) -> Option<&str> {
        self.str_field("created")
    }

    pub fn edited(&self) -> Option<&str> {
        self.str_field("edited")
    }

    /// All fields in payload order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn url_list(&self, key: &str) -> impl Iterator<Item = &str> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }
}

/// A pilot (person) or film record, fetched by URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    url: String,
    fields: Map<String, Value>,
}

impl Resource {
    /// Wraps a decoded detail object. The identity is the URL it was fetched from.
    pub fn from_value(url: &str, value: Value) -> Result<Self, FetchError> {
        match value {
            Value::Object(fields) => Ok(Self {
                url: url.to_string(),
                fields,
            }),
            _ => Err(FetchError::decode(url, "resource is not an object")),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `name` for people, `title` for films, otherwise the URL.
    pub fn display_name(&self) -> &str {
        ["name", "title"]
            .iter()
            .find_map(|k| self.fields.get(*k).and_then(Value::as_str))
            .unwrap_or(self.url.as_str())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Resolved resources keyed by URL.
pub type ResourceIndex = BTreeMap<String, Resource>;

/// One page of the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub next: Option<String>,
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn starship_accessors() {
        let s = fixtures::ship(
            9,
            "Imperial Department of Military Research, Sienar Fleet Systems",
            &["https://swapi.dev/api/people/13/"],
            &[],
        );
        assert_eq!(s.url(), "https://swapi.dev/api/starships/9/");
        assert_eq!(s.name(), Some("Ship 9"));
        assert!(s.manufacturer().starts_with("Imperial"));
        assert_eq!(
            s.pilots().collect::<Vec<_>>(),
            vec!["https://swapi.dev/api/people/13/"]
        );
        assert_eq!(s.films().count(), 0);
    }

    #[test]
    fn starship_keeps_payload_field_order() {
        let v = json!({
            "name": "X-wing",
            "model": "T-65 X-wing",
            "manufacturer": "Incom Corporation",
            "pilots": [],
            "films": [],
            "url": "https://swapi.dev/api/starships/12/"
        });
        let s = Starship::from_value(v, "test").unwrap();
        let keys: Vec<&str> = s.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "model", "manufacturer", "pilots", "films", "url"]);
    }

    #[test]
    fn starship_missing_url_is_decode_error() {
        let v = json!({ "manufacturer": "x", "pilots": [], "films": [] });
        let err = Starship::from_value(v, "page").unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn starship_non_string_pilots_is_decode_error() {
        let v = json!({ "url": "u", "manufacturer": "x", "pilots": [1], "films": [] });
        assert!(Starship::from_value(v, "page").is_err());
    }

    #[test]
    fn resource_display_name() {
        let pilot = Resource::from_value("p", json!({ "name": "Han Solo" })).unwrap();
        let film = Resource::from_value("f", json!({ "title": "A New Hope" })).unwrap();
        let bare = Resource::from_value("https://x/1/", json!({})).unwrap();
        assert_eq!(pilot.display_name(), "Han Solo");
        assert_eq!(film.display_name(), "A New Hope");
        assert_eq!(bare.display_name(), "https://x/1/");
    }

    #[test]
    fn resource_rejects_non_object() {
        assert!(Resource::from_value("u", json!([1, 2])).is_err());
    }

    #[test]
    fn list_page_null_next() {
        let p: ListPage =
            serde_json::from_value(json!({ "count": 0, "next": null, "results": [] })).unwrap();
        assert!(p.next.is_none());
        assert!(p.results.is_empty());
    }
}
