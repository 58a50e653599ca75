//! Feed rendering for cached events.
//!
//! Any record implementing [`FeedItem`] can be rendered into a [`Feed`] with
//! one entry per cached event, then written out as an Atom document (what
//! feed readers consume) or as JSON.

use atom_syndication::{Entry as AtomEntry, Feed as AtomFeed, Text};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{BoundedEventCache, Error};

/// Minimal capability a record needs to appear in a feed.
pub trait FeedItem {
    /// Display title of the entry.
    fn title(&self) -> String;

    /// When the entry arrived.
    fn created(&self) -> DateTime<Utc>;

    /// Stable identifier, if the record carries one.
    fn id(&self) -> Option<String> {
        None
    }
}

/// Which end of the cache a feed starts from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedOrder {
    /// Most recent entry first.
    #[default]
    NewestFirst,
    /// Insertion order.
    OldestFirst,
}

impl FeedOrder {
    /// Take a snapshot of `cache` in this order.
    pub fn snapshot<T: Clone>(self, cache: &BoundedEventCache<T>) -> Vec<T> {
        match self {
            FeedOrder::NewestFirst => cache.elements_reversed(),
            FeedOrder::OldestFirst => cache.elements(),
        }
    }
}

/// Output format of a rendered feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeedFormat {
    /// Atom 1.0 XML.
    #[default]
    Atom,
    /// Pretty-printed JSON.
    Json,
}

/// One rendered feed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeedEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub created: DateTime<Utc>,
}

impl FeedEntry {
    /// Atom entry id: the record's own id, or one derived from its arrival time.
    pub fn atom_id(&self) -> String {
        match &self.id {
            Some(id) => format!("urn:home-services:entry:{id}"),
            None => format!("urn:home-services:entry:{}", self.created.timestamp_nanos_opt().unwrap_or_default()),
        }
    }
}

/// A rendered feed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub items: Vec<FeedEntry>,
}

impl Feed {
    /// Build a feed from `items`, keeping their order.
    pub fn from_items<'a, I, T>(title: &str, description: &str, items: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a T>,
        T: FeedItem + 'a,
    {
        let items = items
            .into_iter()
            .map(|item| FeedEntry { id: item.id(), title: item.title(), created: item.created() })
            .collect();

        Self { title: title.to_string(), description: description.to_string(), created: now, items }
    }

    /// Serialize the feed as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Render` if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render(format!("Failed to serialize feed: {e}")))
    }

    /// Serialize the feed as an Atom 1.0 document.
    ///
    /// Each entry's `created` time is used for both `updated` and `published`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Render` if the XML cannot be written.
    pub fn to_atom(&self) -> Result<String, Error> {
        let entries: Vec<AtomEntry> = self
            .items
            .iter()
            .map(|item| {
                let mut entry = AtomEntry::default();
                entry.set_title(item.title.as_str());
                entry.set_id(item.atom_id());
                entry.set_updated(item.created.fixed_offset());
                entry.set_published(Some(item.created.fixed_offset()));
                entry
            })
            .collect();

        let mut feed = AtomFeed::default();
        feed.set_title(self.title.as_str());
        let subtitle: Text = self.description.as_str().into();
        feed.set_subtitle(Some(subtitle));
        feed.set_id(format!("urn:home-services:feed:{}", slug(&self.title)));
        feed.set_updated(self.created.fixed_offset());
        feed.set_entries(entries);

        let bytes = feed
            .write_to(Vec::new())
            .map_err(|e| Error::Render(format!("Failed to write Atom feed: {e}")))?;
        String::from_utf8(bytes).map_err(|e| Error::Render(format!("Atom feed is not UTF-8: {e}")))
    }

    /// Serialize the feed in `format`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Render` if serialization fails.
    pub fn render(&self, format: FeedFormat) -> Result<String, Error> {
        match format {
            FeedFormat::Atom => self.to_atom(),
            FeedFormat::Json => self.to_json(),
        }
    }
}

fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
