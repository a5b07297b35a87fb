//! Typed content model supplied by the content collaborator.
//!
//! The core never mutates content; it indexes into it by identifier. A
//! built-in STARS dataset is bundled in [`builtin`], and alternative content
//! can be loaded from JSON with the same shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result,
    overlay::EntityId,
    projection::{CoordinateTable, MapEntity, Tooltip},
};

pub mod builtin;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub name: String,
    pub location: String,
    pub role: String,
    pub description: String,
    pub url: String,
}

impl MapEntity for Institution {
    fn entity_id(&self) -> EntityId {
        EntityId::new(self.name.clone())
    }

    fn tooltip(&self) -> Tooltip {
        Tooltip {
            title: self.name.clone(),
            subtitle: self.location.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerGroup {
    pub region: String,
    pub institutions: Vec<Institution>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    pub image_ref: String,
}

impl NewsItem {
    /// Long-form date as printed on the news cards, e.g. `October 15, 2025`.
    pub fn display_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub partners: Vec<PartnerGroup>,
    pub coordinates: CoordinateTable,
    pub faqs: Vec<FaqEntry>,
    #[serde(default)]
    pub news: Vec<NewsItem>,
}

impl Content {
    /// The bundled STARS Erasmus+ dataset.
    pub fn builtin() -> Result<Self> {
        Self::from_json(builtin::STARS_CONTENT_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let content: Content = serde_json::from_str(json)?;
        debug!(
            partners = content.institutions().count(),
            coordinates = content.coordinates.len(),
            faqs = content.faqs.len(),
            news = content.news.len(),
            "content loaded"
        );
        Ok(content)
    }

    /// All institutions across regions, in presentation order.
    pub fn institutions(&self) -> impl Iterator<Item = &Institution> {
        self.partners.iter().flat_map(|group| group.institutions.iter())
    }

    /// FAQ entries paired with their accordion identifiers.
    pub fn faq_entries(&self) -> impl Iterator<Item = (EntityId, &FaqEntry)> {
        self.faqs
            .iter()
            .enumerate()
            .map(|(idx, entry)| (faq_id(idx), entry))
    }

    /// Whether the home page shows its "recent updates" section.
    pub fn has_updates(&self) -> bool {
        !self.news.is_empty()
    }
}

/// Accordion identifier of the FAQ entry at `index`.
pub fn faq_id(index: usize) -> EntityId {
    EntityId::new(format!("faq-{index}"))
}
