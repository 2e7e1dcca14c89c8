//! Content grid with client-local category filtering
//!
//! Cards follow input order exactly. Filtering never re-fetches and never
//! re-sorts; it only selects the subset whose category matches.

use chrono::NaiveDate;
use ketebul_common::content::{ContentRecord, Link};
use ketebul_common::ImageResolver;
use serde::Serialize;

use super::image_view::{ImageMarkup, ResilientImageView};
use super::rich_text;

/// Label of the pseudo-category that matches everything
pub const ALL_CATEGORIES: &str = "All";

/// Summary length on cards, in characters
const SUMMARY_CHARS: usize = 120;

/// Requested width for card images; only CDN assets are resized
pub const CARD_IMAGE_WIDTH: u32 = 600;

const DEFAULT_EMPTY_MESSAGE: &str = "No items to show.";

/// Active category selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a `category` query value; absent, blank or "All" select everything
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") => CategoryFilter::All,
            Some(value) if value.eq_ignore_ascii_case(ALL_CATEGORIES) => CategoryFilter::All,
            Some(value) => CategoryFilter::Category(value.to_string()),
        }
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(wanted) => record.category.as_deref() == Some(wanted.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(c) => c,
        }
    }
}

/// Day / month / year badge shown beside dated cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBadge {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl DateBadge {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.format("%d").to_string(),
            month: date.format("%b").to_string().to_uppercase(),
            year: date.format("%Y").to_string(),
        }
    }
}

/// Render-ready card for one record
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub summary: String,
    /// Pre-escaped rich-text body
    pub body_html: String,
    pub image: ImageMarkup,
    pub link: Option<Link>,
    pub button_label: Option<String>,
    pub date: Option<DateBadge>,
    pub venue: Option<String>,
    pub role: Option<String>,
    pub category: Option<String>,
}

/// Filter tab for the category bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTab {
    pub label: String,
    pub active: bool,
}

/// Render-ready grid
#[derive(Debug, Clone, Serialize)]
pub struct GridView {
    pub cards: Vec<Card>,
    pub empty_message: Option<String>,
    pub tabs: Vec<FilterTab>,
}

#[derive(Debug, Clone)]
pub struct ContentGrid {
    records: Vec<ContentRecord>,
    filter: CategoryFilter,
    empty_message: String,
}

impl ContentGrid {
    pub fn new(records: Vec<ContentRecord>) -> Self {
        Self {
            records,
            filter: CategoryFilter::All,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// Records passing the active filter, in input order
    pub fn visible(&self) -> Vec<&ContentRecord> {
        self.records.iter().filter(|r| self.filter.matches(r)).collect()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for category in self.records.iter().filter_map(|r| r.category.as_deref()) {
            if !seen.contains(&category) {
                seen.push(category);
            }
        }
        seen
    }

    pub fn tabs(&self) -> Vec<FilterTab> {
        std::iter::once(ALL_CATEGORIES)
            .chain(self.categories())
            .map(|label| FilterTab {
                label: label.to_string(),
                active: self.filter.label() == label,
            })
            .collect()
    }

    pub fn view(&self, resolver: &ImageResolver) -> GridView {
        let cards: Vec<Card> = self
            .visible()
            .into_iter()
            .map(|record| build_card(record, resolver))
            .collect();

        let empty_message = cards.is_empty().then(|| self.empty_message.clone());

        GridView {
            cards,
            empty_message,
            tabs: self.tabs(),
        }
    }
}

fn build_card(record: &ContentRecord, resolver: &ImageResolver) -> Card {
    let image = ResilientImageView::for_reference(
        resolver,
        record.image.as_ref(),
        record.title.clone(),
        Some(CARD_IMAGE_WIDTH),
    );

    Card {
        id: record.id.clone(),
        title: record.title.clone(),
        summary: summarize(&record.body_text(), SUMMARY_CHARS),
        body_html: record.body.as_ref().map(rich_text::to_html).unwrap_or_default(),
        image: image.markup(),
        link: record.link.clone(),
        button_label: record.button_label().map(str::to_string),
        date: record.date.map(DateBadge::from_date),
        venue: record.venue.clone(),
        role: record.role.clone(),
        category: record.category.clone(),
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis
pub fn summarize(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}
