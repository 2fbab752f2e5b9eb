//! Ordered item collection with id management and query helpers

use crate::item::{Item, ItemId};

/// Ordered set of items, canonically sorted by `(date, id)`
///
/// Undated items sort before dated ones since `None < Some(_)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection and bring it into canonical order
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut collection = Self { items };
        collection.sort();
        collection
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Remove the first item with `id`, returning it
    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        let position = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(position))
    }

    /// Remove every item matching `predicate`, returning how many went
    pub fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&Item) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        before - self.items.len()
    }

    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));
    }

    pub fn is_sorted(&self) -> bool {
        self.items
            .windows(2)
            .all(|pair| (pair[0].date, pair[0].id) <= (pair[1].date, pair[1].id))
    }

    /// Highest id in use, or 0 for an empty collection
    pub fn last_id(&self) -> ItemId {
        self.items.iter().map(|item| item.id).max().unwrap_or(0)
    }

    /// Id the next appended item receives, `None` once `ItemId::MAX` is taken
    pub fn next_id(&self) -> Option<ItemId> {
        self.last_id().checked_add(1)
    }

    /// Sort canonically and renumber ids to `1..=N`
    pub fn reindex(&mut self) {
        self.sort();
        for (index, item) in self.items.iter_mut().enumerate() {
            item.id = index as ItemId + 1;
        }
    }

    /// First item whose `attr` equals `value`
    pub fn find_by<F, V>(&self, attr: F, value: &V) -> Option<&Item>
    where
        F: Fn(&Item) -> V,
        V: PartialEq,
    {
        self.items.iter().find(|item| attr(item) == *value)
    }

    pub fn find_by_mut<F, V>(&mut self, attr: F, value: &V) -> Option<&mut Item>
    where
        F: Fn(&Item) -> V,
        V: PartialEq,
    {
        self.items.iter_mut().find(|item| attr(item) == *value)
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<&Item> {
        self.find_by(|item| item.id, &id)
    }

    pub fn find_by_id_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.find_by_mut(|item| item.id, &id)
    }

    /// All items whose `attr` equals `value`, in collection order
    pub fn filter_by<F, V>(&self, attr: F, value: &V) -> Vec<&Item>
    where
        F: Fn(&Item) -> V,
        V: PartialEq,
    {
        self.filter(|item| attr(item) == *value)
    }

    /// All items satisfying `predicate`, in collection order
    pub fn filter<P>(&self, predicate: P) -> Vec<&Item>
    where
        P: Fn(&Item) -> bool,
    {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    /// Group items by `attr`, groups ordered by first occurrence
    pub fn group_by<F, K>(&self, attr: F) -> Vec<(K, Vec<&Item>)>
    where
        F: Fn(&Item) -> K,
        K: PartialEq,
    {
        group_items(self.items.iter(), attr)
    }
}

/// Group any item sequence by key, keeping first-seen group order
pub fn group_items<'a, I, F, K>(items: I, attr: F) -> Vec<(K, Vec<&'a Item>)>
where
    I: IntoIterator<Item = &'a Item>,
    F: Fn(&Item) -> K,
    K: PartialEq,
{
    let mut groups: Vec<(K, Vec<&'a Item>)> = Vec::new();
    for item in items {
        let key = attr(item);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, members)) => members.push(item),
            None => groups.push((key, vec![item])),
        }
    }
    groups
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a mut Collection {
    type Item = &'a mut Item;
    type IntoIter = std::slice::IterMut<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
