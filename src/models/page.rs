use serde::{Deserialize, Serialize};

use super::Event;

/// Navigation links returned alongside a page. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PageLinks {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

/// Pagination metadata returned alongside a page. Informational only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub from: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub to: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One response from the events endpoint.
///
/// Only `data.len()` participates in pagination decisions; `links` and `meta`
/// are carried through for display and debugging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventsPage {
    pub data: Vec<Event>,
    #[serde(default)]
    pub links: Option<PageLinks>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl EventsPage {
    /// Build a page holding only events, without links or metadata.
    pub fn from_events(data: Vec<Event>) -> Self {
        Self {
            data,
            links: None,
            meta: None,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
