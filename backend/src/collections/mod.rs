//! Flat ordered collections owned by the template
//!
//! Roles, groups, topics, and token templates all follow the same contract:
//! elements get an id on entry, ids are unique within their collection, and
//! removal is by id with a missing element being a no-op. Collections are
//! small (tens of entries) so lookups are linear scans.

use crate::core::{Change, IdGenerator};
use tracing::warn;

/// An element that can live in a [`Collection`]
pub trait CollectionElement: Clone {
    /// Human-readable kind, for logs
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Display label (role name, topic name, token tag, ...)
    fn label(&self) -> &str;
    fn set_label(&mut self, label: String);

    /// Label given to a new element created with none, `index` being the
    /// collection length at creation time
    fn default_label(index: usize) -> String;
}

/// Ordered collection with unique element ids
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: CollectionElement> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from deserialized elements, assigning ids in order
    pub fn from_elements<I>(elements: I, ids: &mut dyn IdGenerator) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut collection = Self::new();
        for element in elements {
            let _ = collection.add(element, ids);
        }
        collection
    }

    /// Create a new element from `seed`, labelling it when the seed has no
    /// label. Returns the new element's id.
    pub fn create(&mut self, mut seed: T, ids: &mut dyn IdGenerator) -> String {
        if seed.label().is_empty() {
            seed.set_label(T::default_label(self.items.len()));
        }
        let id = ids.next_id();
        seed.set_id(id.clone());
        self.items.push(seed);
        id
    }

    /// Append an element. An element without an id gets one; an element
    /// whose id is already present is rejected.
    pub fn add(&mut self, mut element: T, ids: &mut dyn IdGenerator) -> Change {
        if element.id().is_empty() {
            element.set_id(ids.next_id());
        } else if self.contains(element.id()) {
            warn!(kind = T::KIND, id = element.id(), "duplicate collection id ignored");
            return Change::Unchanged;
        }
        self.items.push(element);
        Change::Changed
    }

    /// Remove by id; a missing id is a no-op
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ordinal of the first element with this label
    pub fn position_of_label(&self, label: &str) -> Option<usize> {
        self.items.iter().position(|item| item.label() == label)
    }

    pub fn at(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
