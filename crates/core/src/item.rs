//! Todo item entity and its persisted record shape

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::client::ExternalItem;
use crate::store::StoreError;

/// Item identifier, unique across the whole collection
pub type ItemId = u32;

/// Date key used for items without a date
pub const UNDATED_KEY: &str = "undated";

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub desc: String,
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub uid: Option<String>,
    pub completed: bool,
    pub archived: bool,
}

impl Item {
    pub fn new(id: ItemId, desc: impl Into<String>, date: Option<NaiveDate>, tags: Vec<String>) -> Self {
        Self {
            id,
            desc: desc.into(),
            date,
            tags,
            uid: None,
            completed: false,
            archived: false,
        }
    }

    /// Build a fresh item from an external tuple, keeping its uid
    pub fn from_external(id: ItemId, external: ExternalItem) -> Self {
        Self {
            id,
            desc: external.desc,
            date: external.date,
            tags: external.tags,
            uid: Some(external.uid),
            completed: external.completed,
            archived: external.archived,
        }
    }

    /// Replace descriptive fields; flags and identity are left alone
    pub fn edit(&mut self, desc: impl Into<String>, date: Option<NaiveDate>, tags: Vec<String>) {
        self.desc = desc.into();
        self.date = date;
        self.tags = tags;
    }

    /// Refresh editable fields and flags from an external tuple. `uid` is immutable.
    pub fn update_from(&mut self, external: ExternalItem) {
        self.edit(external.desc, external.date, external.tags);
        self.completed = external.completed;
        self.archived = external.archived;
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }

    pub fn toggle_archived(&mut self) {
        self.archived = !self.archived;
    }

    pub fn date_key(&self) -> String {
        date_key(self.date)
    }

    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            id: self.id,
            desc: self.desc.clone(),
            tags: self.tags.clone(),
            uid: self.uid.clone(),
            completed: self.completed,
            archived: self.archived,
        }
    }

    pub fn from_record(date: Option<NaiveDate>, record: ItemRecord) -> Self {
        Self {
            id: record.id,
            desc: record.desc,
            date,
            tags: record.tags,
            uid: record.uid,
            completed: record.completed,
            archived: record.archived,
        }
    }
}

/// Plain record persisted under a date key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: ItemId,
    pub desc: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub archived: bool,
}

/// Stores written by hand sometimes carry ids as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(ItemId),
    Str(String),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<ItemId, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Str(raw) => raw
            .trim()
            .parse::<ItemId>()
            .map_err(|e| serde::de::Error::custom(format!("invalid id {raw:?}: {e}"))),
    }
}

/// Format a date as its persisted key
pub fn date_key(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format(DATE_KEY_FORMAT).to_string(),
        None => UNDATED_KEY.to_string(),
    }
}

/// Parse a persisted key back into a date
pub fn parse_date_key(key: &str) -> Result<Option<NaiveDate>, StoreError> {
    if key == UNDATED_KEY {
        return Ok(None);
    }
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .map(Some)
        .map_err(|_| StoreError::InvalidDateKey(key.to_string()))
}
