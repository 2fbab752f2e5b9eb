//! Todo engine
//!
//! Loads the full collection from the store at construction, applies one
//! mutation at a time, and writes the whole collection back after each.
//! A failed write leaves the in-memory collection mutated.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::client::IntegratedClient;
use crate::collection::Collection;
use crate::error::{Result, TodoError};
use crate::item::{Item, ItemId, parse_date_key};
use crate::presenter::Presenter;
use crate::prioritize::reprioritize;
use crate::store::{DateGroups, SharedStore, StoreError};

/// Engine options taken from configuration or the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoOptions {
    /// List archived items as well
    pub archived: bool,
}

/// Counts reported by `sync_down`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub added: usize,
    pub updated: usize,
}

pub struct Todo {
    store: SharedStore,
    client: Option<Arc<dyn IntegratedClient>>,
    options: TodoOptions,
    items: Collection,
}

impl std::fmt::Debug for Todo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Todo")
            .field("options", &self.options)
            .field("has_client", &self.client.is_some())
            .field("items", &self.items)
            .finish()
    }
}

impl Todo {
    /// Load and sort every item from `store`
    pub fn new(store: SharedStore, options: TodoOptions) -> Result<Self> {
        let items = Self::load_items(&store)?;
        info!("Loaded {} items", items.len());
        Ok(Self {
            store,
            client: None,
            options,
            items,
        })
    }

    /// Attach the integrated client used by `sync_down`
    pub fn with_client(mut self, client: Arc<dyn IntegratedClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn items(&self) -> &Collection {
        &self.items
    }

    pub fn options(&self) -> TodoOptions {
        self.options
    }

    /// Items `list` shows: everything when archived listing is on, else unarchived only
    pub fn listed_items(&self) -> Vec<&Item> {
        if self.options.archived {
            self.items.iter().collect()
        } else {
            self.items.filter_by(|item| item.archived, &false)
        }
    }

    pub fn list(&self, presenter: &dyn Presenter) -> String {
        presenter.render(&self.listed_items())
    }

    /// Append a new item with the next free id
    pub fn add(
        &mut self,
        desc: impl Into<String>,
        date: Option<NaiveDate>,
        tags: Vec<String>,
    ) -> Result<ItemId> {
        let id = self.items.next_id().ok_or(TodoError::IdsExhausted)?;
        self.items.push(Item::new(id, desc, date, tags));
        self.items.sort();
        debug!(id, "Added item");

        self.persist()?;
        Ok(id)
    }

    pub fn edit(
        &mut self,
        id: ItemId,
        desc: impl Into<String>,
        date: Option<NaiveDate>,
        tags: Vec<String>,
    ) -> Result<()> {
        self.find_by_id_mut(id)?.edit(desc, date, tags);
        self.items.sort();
        debug!(id, "Edited item");

        self.persist()
    }

    /// Toggle `completed` on each id in order; stops at the first unknown id
    pub fn complete(&mut self, ids: &[ItemId]) -> Result<()> {
        for &id in ids {
            self.find_by_id_mut(id)?.toggle_completed();
            debug!(id, "Toggled completed");
        }

        self.persist()
    }

    /// Toggle `archived` on each id in order; stops at the first unknown id
    pub fn archive(&mut self, ids: &[ItemId]) -> Result<()> {
        for &id in ids {
            self.find_by_id_mut(id)?.toggle_archived();
            debug!(id, "Toggled archived");
        }

        self.persist()
    }

    /// Remove each id, then renumber the survivors to `1..=N`
    pub fn delete(&mut self, ids: &[ItemId]) -> Result<()> {
        for &id in ids {
            self.items.remove(id).ok_or(TodoError::ItemNotFound(id))?;
            debug!(id, "Deleted item");
        }

        self.reset_item_indices()
    }

    /// Remove every archived item, then renumber the survivors
    pub fn delete_archived(&mut self) -> Result<usize> {
        let removed = self.items.remove_where(|item| item.archived);
        debug!(removed, "Deleted archived items");

        self.reset_item_indices()?;
        Ok(removed)
    }

    /// Move an item `step` slots toward the front of its date group
    ///
    /// Negative steps move it back. The move is clamped to the group bounds
    /// and only ids inside the group are permuted. Returns the item's new id.
    pub fn prioritize(&mut self, id: ItemId, step: i64) -> Result<ItemId> {
        let date = self.find_by_id(id)?.date;
        let mut group: Vec<ItemId> = self
            .items
            .filter_by(|item| item.date, &date)
            .iter()
            .map(|item| item.id)
            .collect();
        group.sort_unstable();

        let shift = reprioritize(&group, id, step).ok_or(TodoError::ItemNotFound(id))?;
        if !shift.is_noop() {
            for item in &mut self.items {
                if item.date == date {
                    item.id = shift.apply(item.id);
                }
            }
            self.items.sort();
        }
        debug!(id, new_id = shift.new_id, actual_step = shift.actual_step, "Reprioritized item");

        self.persist()?;
        Ok(shift.new_id)
    }

    /// Completed-item counts per date, in date order
    pub fn analyze(&self) -> Vec<(Option<NaiveDate>, usize)> {
        let completed = self.items.filter_by(|item| item.completed, &true);
        crate::collection::group_items(completed, |item| item.date)
            .into_iter()
            .map(|(date, items)| (date, items.len()))
            .collect()
    }

    /// Merge items from the integrated client, matching on `uid`
    ///
    /// Matched items are updated in place; the rest are appended with fresh ids.
    pub fn sync_down(&mut self) -> Result<SyncSummary> {
        let client = self.client.clone().ok_or(TodoError::NoIntegratedClient)?;
        let fetched = client.fetch()?;

        let mut next_id = self.items.next_id();
        let mut summary = SyncSummary::default();
        for external in fetched {
            let uid = Some(external.uid.clone());
            match self.items.find_by_mut(|item| item.uid.clone(), &uid) {
                Some(existing) => {
                    existing.update_from(external);
                    summary.updated += 1;
                }
                None => {
                    let id = next_id.ok_or(TodoError::IdsExhausted)?;
                    self.items.push(Item::from_external(id, external));
                    next_id = id.checked_add(1);
                    summary.added += 1;
                }
            }
        }
        self.items.sort();
        info!(added = summary.added, updated = summary.updated, "Synced from integrated client");

        self.persist()?;
        Ok(summary)
    }

    /// Serialize the collection grouped by date key
    pub fn to_groups(&self) -> DateGroups {
        let mut groups = DateGroups::new();
        for (key, items) in self.items.group_by(Item::date_key) {
            groups.insert(key, items.iter().map(|item| item.to_record()).collect());
        }
        groups
    }

    /// Ids must be positive and unique across every date key
    fn load_items(store: &SharedStore) -> Result<Collection> {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        for (key, records) in store.read()? {
            let date = parse_date_key(&key)?;
            for record in records {
                if record.id == 0 {
                    return Err(StoreError::InvalidRecord(format!("id 0 under {key}")).into());
                }
                if !seen.insert(record.id) {
                    return Err(StoreError::InvalidRecord(format!(
                        "duplicate id {} under {key}",
                        record.id
                    ))
                    .into());
                }
                items.push(Item::from_record(date, record));
            }
        }
        Ok(Collection::from_items(items))
    }

    fn find_by_id(&self, id: ItemId) -> Result<&Item> {
        self.items.find_by_id(id).ok_or(TodoError::ItemNotFound(id))
    }

    fn find_by_id_mut(&mut self, id: ItemId) -> Result<&mut Item> {
        self.items.find_by_id_mut(id).ok_or(TodoError::ItemNotFound(id))
    }

    fn reset_item_indices(&mut self) -> Result<()> {
        self.items.reindex();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let groups = self.to_groups();
        self.store.write(&groups)?;
        debug!(items = self.items.len(), groups = groups.len(), "Persisted collection");
        Ok(())
    }
}
