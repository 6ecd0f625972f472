use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const MAX_GROUP_ID_LEN: usize = 100;
pub const MAX_GROUP_NAME_LEN: usize = 100;
pub const MAX_EVENT_TYPE_LEN: usize = 100;
pub const MAX_MEMBER_NAME_LEN: usize = 100;
pub const MAX_MEMBERS_PER_GROUP: usize = 50;
pub const MAX_ITEMS_PER_MEMBER: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_PRICE_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 1000;
pub const MAX_DOCUMENT_BYTES: usize = 500 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EventTheme {
    Christmas,
    Hanukkah,
    Birthday,
    Wedding,
    Generic,
}

impl EventTheme {
    /// Matches a stored label against the known cosmetic themes.
    /// Free-form labels fall through to `None` and are kept as-is.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "christmas" => Some(EventTheme::Christmas),
            "hanukkah" => Some(EventTheme::Hanukkah),
            "birthday" => Some(EventTheme::Birthday),
            "wedding" => Some(EventTheme::Wedding),
            "generic" => Some(EventTheme::Generic),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventTheme::Christmas => write!(f, "christmas"),
            EventTheme::Hanukkah => write!(f, "hanukkah"),
            EventTheme::Birthday => write!(f, "birthday"),
            EventTheme::Wedding => write!(f, "wedding"),
            EventTheme::Generic => write!(f, "generic"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl std::fmt::Display for ItemPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemPriority::High => write!(f, "high"),
            ItemPriority::Medium => write!(f, "medium"),
            ItemPriority::Low => write!(f, "low"),
        }
    }
}

/// One wishlist entry. The serialized shape is the persisted document
/// format, hence the camelCase field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub description: String,
    #[serde(default)]
    pub priority: ItemPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    // Early document versions stored claimedBy as a bare name string;
    // rows written back then still deserialize through string_or_vec.
    #[serde(default, deserialize_with = "string_or_vec")]
    pub claimed_by: Vec<String>,
    #[serde(default)]
    pub purchased: bool,
    #[serde(default, deserialize_with = "string_or_vec")]
    pub split_with: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Wishlist {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// The whole per-group document, stored as one JSONB value keyed by the
/// group id. Member names are the map keys, unique and case-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDocument {
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub users: BTreeMap<String, Wishlist>,
}

/// Raw storage row for a group.
#[derive(Debug, Clone, FromRow)]
pub struct GroupRecord {
    pub group_id: String,
    pub document: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing row for the admin surface; `group_name` is pulled out of the
/// document column and may be missing on corrupt rows.
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct GroupSummary {
    pub group_id: String,
    pub group_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrVec::deserialize(deserializer)? {
        StringOrVec::One(name) if name.is_empty() => Vec::new(),
        StringOrVec::One(name) => vec![name],
        StringOrVec::Many(names) => names,
    })
}
