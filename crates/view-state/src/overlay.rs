//! Highlight registries keyed by entity identifier.
//!
//! Both registries store the highlighted identifier as an `Option`, so the
//! at-most-one invariant holds by construction rather than by bookkeeping
//! over a per-entity flag map.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Opaque identifier of a content entity (partner, FAQ entry).
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Expand/collapse state where at most one entry is open.
pub struct AccordionRegistry {
    active: Option<EntityId>,
}

impl AccordionRegistry {
    /// Pre-activate the first identifier in presentation order; an empty list
    /// starts with nothing expanded.
    pub fn first_of<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = EntityId>,
    {
        Self {
            active: ids.into_iter().next(),
        }
    }

    /// Open `id`, closing whatever was open, or close it when it is already open.
    pub fn toggle(&mut self, id: EntityId) {
        if self.active.as_ref() == Some(&id) {
            trace!(%id, "accordion collapse");
            self.active = None;
        } else {
            trace!(%id, "accordion expand");
            self.active = Some(id);
        }
    }

    pub fn is_active(&self, id: &EntityId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn active(&self) -> Option<&EntityId> {
        self.active.as_ref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Hovered/focused marker tracking for the partner map.
///
/// Pointer-enter and focus share [`HoverRegistry::set_hover`]; pointer-leave
/// and blur share [`HoverRegistry::clear_hover`], which only clears when the
/// caller is still the tracked marker. A leave that arrives after another
/// marker's enter is therefore a no-op.
pub struct HoverRegistry {
    hovered: Option<EntityId>,
}

impl HoverRegistry {
    pub fn set_hover(&mut self, id: Option<EntityId>) {
        trace!(hovered = ?id, "hover set");
        self.hovered = id;
    }

    /// Compare-and-clear. Returns whether the tracked identifier was cleared.
    pub fn clear_hover(&mut self, id: &EntityId) -> bool {
        if self.hovered.as_ref() == Some(id) {
            self.hovered = None;
            true
        } else {
            trace!(%id, current = ?self.hovered, "stale hover clear ignored");
            false
        }
    }

    pub fn is_hovered(&self, id: &EntityId) -> bool {
        self.hovered.as_ref() == Some(id)
    }

    pub fn hovered(&self) -> Option<&EntityId> {
        self.hovered.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> EntityId {
        EntityId::from(s)
    }

    #[test]
    fn accordion_opens_first_entry() {
        let registry = AccordionRegistry::first_of([id("faq-0"), id("faq-1")]);
        assert!(registry.is_active(&id("faq-0")));
        assert!(!registry.is_active(&id("faq-1")));
    }

    #[test]
    fn accordion_with_no_entries_starts_closed() {
        let registry = AccordionRegistry::first_of(std::iter::empty());
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn accordion_toggle_replaces_and_clears() {
        let mut registry = AccordionRegistry::first_of([id("faq-0")]);
        registry.toggle(id("faq-3"));
        assert_eq!(registry.active(), Some(&id("faq-3")));
        assert!(!registry.is_active(&id("faq-0")));
        registry.toggle(id("faq-3"));
        assert_eq!(registry.active(), None);
    }

    #[test]
    fn accordion_accepts_unknown_identifier() {
        let mut registry = AccordionRegistry::default();
        registry.toggle(id("gone"));
        assert!(registry.is_active(&id("gone")));
    }

    #[test]
    fn stale_clear_keeps_new_hover() {
        let mut registry = HoverRegistry::default();
        registry.set_hover(Some(id("Lund University (LU)")));
        registry.set_hover(Some(id("University of Lisbon (UL)")));
        assert!(!registry.clear_hover(&id("Lund University (LU)")));
        assert_eq!(registry.hovered(), Some(&id("University of Lisbon (UL)")));
    }

    #[test]
    fn matching_clear_removes_hover() {
        let mut registry = HoverRegistry::default();
        registry.set_hover(Some(id("a")));
        assert!(registry.clear_hover(&id("a")));
        assert_eq!(registry.hovered(), None);
        assert!(!registry.clear_hover(&id("a")));
    }
}
