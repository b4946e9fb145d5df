use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{Display, EnumString};
use tracing::warn;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::store::{Document, ID_FIELD};

/// `last_changed` marker stamped on freshly created entries.
pub const JUST_NOW: &str = "just now";

/// Provenance / trust classification of an image.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Badge {
    Official,
    #[default]
    Community,
    Verified,
}

/// One container image as returned to callers. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    /// Unique identifier; always equal to `name`.
    pub id: String,
    pub name: String,
    pub logo: String,
    pub description: String,
    /// Conventionally one of featured, starter, ai, application, base, fips.
    pub category: String,
    pub latest_tag: String,
    pub downloads: u64,
    /// Human readable size, e.g. `"45MB"`.
    pub size: String,
    pub is_free: bool,
    pub fips: bool,
    pub badge: Badge,
    pub last_changed: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate for `create_entry`: an entry minus its server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewCatalogEntry {
    /// Image name, e.g. `"node"`. Becomes the entry id.
    #[validate(length(min = 1, max = 128), custom(function = "validate_image_name"))]
    pub name: String,
    /// Logo URL.
    pub logo: String,
    pub description: String,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    pub latest_tag: String,
    #[serde(default)]
    pub downloads: u64,
    pub size: String,
    #[serde(default = "default_is_free")]
    pub is_free: bool,
    #[serde(default)]
    pub fips: bool,
    pub badge: Badge,
}

fn default_is_free() -> bool {
    true
}

/// Lowercase alphanumerics plus `.`, `_`, `-` and `/`, starting with an
/// alphanumeric.
fn validate_image_name(name: &str) -> Result<(), ValidationError> {
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    let rest_ok = chars.all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-' | '/')
    });
    if first_ok && rest_ok {
        Ok(())
    } else {
        Err(ValidationError::new("image_name").with_message(
            "name must be lowercase alphanumerics, '.', '_', '-' or '/', starting with an alphanumeric"
                .into(),
        ))
    }
}

impl NewCatalogEntry {
    /// Stored form of the candidate with the server-assigned fields set.
    pub(crate) fn into_document(self, last_changed: &str, now: DateTime<Utc>) -> Document {
        let stamp = now.to_rfc3339();
        let mut doc = Document::new();
        doc.insert(ID_FIELD.into(), json!(self.name));
        doc.insert("name".into(), json!(self.name));
        doc.insert("logo".into(), json!(self.logo));
        doc.insert("description".into(), json!(self.description));
        doc.insert("category".into(), json!(self.category));
        doc.insert("latest_tag".into(), json!(self.latest_tag));
        doc.insert("downloads".into(), json!(self.downloads));
        doc.insert("size".into(), json!(self.size));
        doc.insert("is_free".into(), json!(self.is_free));
        doc.insert("fips".into(), json!(self.fips));
        doc.insert("badge".into(), json!(self.badge.to_string()));
        doc.insert("last_changed".into(), json!(last_changed));
        doc.insert("created_at".into(), json!(stamp));
        doc.insert("updated_at".into(), json!(stamp));
        doc
    }
}

impl CatalogEntry {
    /// Map a stored document into a fully populated entry.
    ///
    /// Never fails: every missing or mistyped member falls back to its
    /// default so partially populated legacy documents stay readable.
    /// `downloads` → 0, `is_free` → true, `fips` → false, timestamps → now,
    /// `badge` → community, other strings → empty, `id`/`name` → each other.
    pub fn from_document(doc: &Document) -> Self {
        let stored_id = string_field(doc, ID_FIELD);
        let name = string_field(doc, "name")
            .or_else(|| stored_id.clone())
            .unwrap_or_default();
        let id = stored_id.unwrap_or_else(|| name.clone());

        let badge = match doc.get("badge") {
            Some(Value::String(raw)) => raw.parse().unwrap_or_else(|_| {
                warn!(id = %id, badge = %raw, "unknown badge; using default");
                Badge::default()
            }),
            _ => Badge::default(),
        };

        let now = Utc::now();
        Self {
            name,
            logo: string_field(doc, "logo").unwrap_or_default(),
            description: string_field(doc, "description").unwrap_or_default(),
            category: string_field(doc, "category").unwrap_or_default(),
            latest_tag: string_field(doc, "latest_tag").unwrap_or_default(),
            downloads: doc.get("downloads").and_then(Value::as_u64).unwrap_or(0),
            size: string_field(doc, "size").unwrap_or_default(),
            is_free: doc.get("is_free").and_then(Value::as_bool).unwrap_or(true),
            fips: doc.get("fips").and_then(Value::as_bool).unwrap_or(false),
            badge,
            last_changed: string_field(doc, "last_changed").unwrap_or_default(),
            created_at: timestamp_field(doc, "created_at", &id).unwrap_or(now),
            updated_at: timestamp_field(doc, "updated_at", &id).unwrap_or(now),
            id,
        }
    }
}

fn string_field(doc: &Document, key: &str) -> Option<String> {
    doc.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn timestamp_field(doc: &Document, key: &'static str, id: &str) -> Option<DateTime<Utc>> {
    let raw = doc.get(key)?.as_str()?;
    raw.parse()
        .map_err(|e: chrono::ParseError| {
            warn!(id = %id, raw = %raw, error = %e, field = key, "failed to parse entry timestamp; using now");
        })
        .ok()
}
