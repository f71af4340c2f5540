//! FAQ accordion with category and search filtering.
//!
//! [`FaqState`] is a reducer: every click, keypress or filter change is a
//! [`FaqAction`] and [`FaqState::apply`] reports what changed. At most one
//! item is open at a time, across all categories.

use regex::RegexBuilder;
use tim_observability::StructuredLogger;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

const MARK_OPEN: &str = "<mark class=\"search-highlight\">";
const MARK_CLOSE: &str = "</mark>";

/// A question as authored, before any state is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// One accordion item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqItem {
    pub category: String,
    pub question: String,
    pub answer: String,
    pub is_open: bool,
    pub is_visible: bool,
}

impl FaqItem {
    fn matches(&self, category: &str, search: &str) -> bool {
        let in_category = category == ALL_CATEGORIES || self.category == category;
        let in_search = search.is_empty()
            || self.question.to_lowercase().contains(search)
            || self.answer.to_lowercase().contains(search);
        in_category && in_search
    }
}

/// Keys that move focus between questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqKey {
    ArrowDown,
    ArrowUp,
    Home,
    End,
}

impl FaqKey {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(FaqKey::ArrowDown),
            "ArrowUp" => Some(FaqKey::ArrowUp),
            "Home" => Some(FaqKey::Home),
            "End" => Some(FaqKey::End),
            _ => None,
        }
    }
}

/// Accordion inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaqAction {
    /// Click on the question at this index.
    Toggle(usize),
    /// Keyboard focus landed on the question at this index.
    Focus(usize),
    /// Escape pressed anywhere.
    Escape,
    /// Arrow/Home/End pressed on a focused question.
    Navigate(FaqKey),
    /// Category button clicked (`all` or a category name).
    SetCategory(String),
    /// Search text changed.
    SetSearch(String),
    /// Search cleared.
    ClearSearch,
}

/// What an action changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqTransition {
    Opened(usize),
    Closed(usize),
    AllClosed,
    Focused(usize),
    Filtered { visible: usize },
    Unchanged,
}

/// State of the whole FAQ section.
#[derive(Debug, Clone)]
pub struct FaqState {
    items: Vec<FaqItem>,
    category: String,
    search: String,
    focus: Option<usize>,
    logger: StructuredLogger,
}

impl FaqState {
    /// Build the accordion with the first item open.
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| FaqItem {
                category: e.category,
                question: e.question,
                answer: e.answer,
                is_open: i == 0,
                is_visible: true,
            })
            .collect();
        Self {
            items,
            category: ALL_CATEGORIES.to_string(),
            search: String::new(),
            focus: None,
            logger: StructuredLogger::disabled(),
        }
    }

    /// Attach a logger for open/close interactions.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.child("faq");
        self
    }

    /// Apply an action.
    pub fn apply(&mut self, action: FaqAction) -> FaqTransition {
        match action {
            FaqAction::Toggle(index) => self.toggle(index),
            FaqAction::Focus(index) => match self.items.get(index) {
                Some(item) if item.is_visible => {
                    self.focus = Some(index);
                    FaqTransition::Focused(index)
                }
                _ => FaqTransition::Unchanged,
            },
            FaqAction::Escape => {
                if self.open_index().is_none() {
                    return FaqTransition::Unchanged;
                }
                self.collapse_all();
                FaqTransition::AllClosed
            }
            FaqAction::Navigate(key) => self.navigate(key),
            FaqAction::SetCategory(category) => {
                self.category = category.trim().to_string();
                self.refilter()
            }
            FaqAction::SetSearch(text) => {
                self.search = text.trim().to_lowercase();
                self.refilter()
            }
            FaqAction::ClearSearch => {
                self.search.clear();
                self.refilter()
            }
        }
    }

    fn toggle(&mut self, index: usize) -> FaqTransition {
        let was_open = match self.items.get(index) {
            Some(item) if item.is_visible => item.is_open,
            _ => return FaqTransition::Unchanged,
        };

        for item in &mut self.items {
            item.is_open = false;
        }
        self.items[index].is_open = !was_open;
        self.focus = Some(index);

        self.logger
            .info_builder(if was_open { "faq closed" } else { "faq opened" })
            .field("question", self.items[index].question.clone())
            .emit();

        if was_open {
            FaqTransition::Closed(index)
        } else {
            FaqTransition::Opened(index)
        }
    }

    fn navigate(&mut self, key: FaqKey) -> FaqTransition {
        let visible = self.visible_indices();
        let position = self
            .focus
            .and_then(|f| visible.iter().position(|&v| v == f));

        let target = match key {
            FaqKey::ArrowDown => match position {
                Some(p) => visible.get(p + 1).copied(),
                None => visible.first().copied(),
            },
            FaqKey::ArrowUp => position
                .and_then(|p| p.checked_sub(1))
                .and_then(|p| visible.get(p).copied()),
            FaqKey::Home => visible.first().copied(),
            FaqKey::End => visible.last().copied(),
        };

        match target {
            Some(index) if Some(index) != self.focus => {
                self.focus = Some(index);
                FaqTransition::Focused(index)
            }
            _ => FaqTransition::Unchanged,
        }
    }

    fn refilter(&mut self) -> FaqTransition {
        for item in &mut self.items {
            item.is_visible = item.matches(&self.category, &self.search);
        }
        FaqTransition::Filtered {
            visible: self.visible_indices().len(),
        }
    }

    /// Append a question to an existing category, after its last item.
    ///
    /// Returns the new item's index, or `None` if no item has that
    /// category yet.
    pub fn add_item(
        &mut self,
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Option<usize> {
        let category = category.into();
        let last = self.items.iter().rposition(|item| item.category == category)?;
        let index = last + 1;

        let mut item = FaqItem {
            category,
            question: question.into(),
            answer: answer.into(),
            is_open: false,
            is_visible: true,
        };
        item.is_visible = item.matches(&self.category, &self.search);
        self.items.insert(index, item);

        if let Some(focus) = self.focus.as_mut() {
            if *focus >= index {
                *focus += 1;
            }
        }
        Some(index)
    }

    /// Close every item.
    pub fn collapse_all(&mut self) {
        for item in &mut self.items {
            item.is_open = false;
        }
    }

    /// All items in display order.
    pub fn items(&self) -> &[FaqItem] {
        &self.items
    }

    /// Index of the open item, if any.
    pub fn open_index(&self) -> Option<usize> {
        self.items.iter().position(|item| item.is_open)
    }

    /// Index of the focused question, if any.
    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Indices of items passing the current filters.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_visible)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the "No questions found" panel should show.
    pub fn no_results(&self) -> bool {
        self.items.iter().all(|item| !item.is_visible)
    }

    /// Current category filter.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Current normalized search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    /// Whether the group heading for `category` should show.
    pub fn group_visible(&self, category: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.category == category && item.is_visible)
    }

    /// Question markup, highlighted when a search is active.
    pub fn question_html(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| self.markup(&item.question, item.is_visible))
    }

    /// Answer markup, highlighted when a search is active.
    pub fn answer_html(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| self.markup(&item.answer, item.is_visible))
    }

    fn markup(&self, text: &str, visible: bool) -> String {
        if visible && !self.search.is_empty() {
            highlight(text, &self.search)
        } else {
            escape_html(text)
        }
    }
}

/// Escape `text` and wrap every case-insensitive occurrence of `term` in
/// `<mark class="search-highlight">`.
pub fn highlight(text: &str, term: &str) -> String {
    if term.is_empty() {
        return escape_html(text);
    }
    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(_) => return escape_html(text),
    };

    let mut out = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for found in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..found.start()]));
        out.push_str(MARK_OPEN);
        out.push_str(&escape_html(found.as_str()));
        out.push_str(MARK_CLOSE);
        last = found.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Inverse of [`highlight`]: drop the markers and unescape, giving back
/// the original text byte for byte.
pub fn strip_highlights(markup: &str) -> String {
    let unmarked = markup.replace(MARK_OPEN, "").replace(MARK_CLOSE, "");
    unescape_html(&unmarked)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn unescape_html(s: &str) -> String {
    const ENTITIES: [(&str, char); 5] = [
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
        ("&quot;", '"'),
        ("&#39;", '\''),
    ];

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, c)) => {
                out.push(*c);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// The storefront's published questions.
pub fn default_entries() -> Vec<FaqEntry> {
    vec![
        FaqEntry::new(
            "orders",
            "How do I place an order?",
            "Browse the shop, pick your size and press Add to Cart. When you are ready, open the cart and follow the checkout steps.",
        ),
        FaqEntry::new(
            "orders",
            "Can I change or cancel my order?",
            "Orders can be changed or cancelled within 2 hours of purchase. Contact support with your order number.",
        ),
        FaqEntry::new(
            "shipping",
            "How long does delivery take?",
            "Delivery within Lusaka takes 1-2 business days. Other provinces take 3-5 business days.",
        ),
        FaqEntry::new(
            "shipping",
            "Do you offer free shipping?",
            "Orders over K1,000 ship free anywhere in Zambia.",
        ),
        FaqEntry::new(
            "returns",
            "What is your return policy?",
            "Unworn items with tags attached can be returned within 30 days for a full refund.",
        ),
        FaqEntry::new(
            "returns",
            "How long do refunds take?",
            "Refunds are issued to the original payment method within 5-7 business days of receiving the return.",
        ),
        FaqEntry::new(
            "sizing",
            "How do I find my size?",
            "Each product page links to a size guide with chest, waist & hip measurements.",
        ),
        FaqEntry::new(
            "sizing",
            "Do your clothes run true to size?",
            "Most styles run true to size. Tailored pieces such as blazers have a slimmer fit, so consider sizing up.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FaqState {
        FaqState::new(default_entries())
    }

    fn open_count(state: &FaqState) -> usize {
        state.items().iter().filter(|i| i.is_open).count()
    }

    #[test]
    fn test_first_item_starts_open() {
        let state = state();
        assert_eq!(state.open_index(), Some(0));
        assert_eq!(open_count(&state), 1);
    }

    #[test]
    fn test_opening_closes_others() {
        let mut state = state();
        assert_eq!(state.apply(FaqAction::Toggle(4)), FaqTransition::Opened(4));
        assert_eq!(state.open_index(), Some(4));
        assert_eq!(open_count(&state), 1);
    }

    #[test]
    fn test_toggle_open_item_closes_it() {
        let mut state = state();
        assert_eq!(state.apply(FaqAction::Toggle(0)), FaqTransition::Closed(0));
        assert_eq!(open_count(&state), 0);
    }

    #[test]
    fn test_escape_closes_all() {
        let mut state = state();
        state.apply(FaqAction::Toggle(3));
        assert_eq!(state.apply(FaqAction::Escape), FaqTransition::AllClosed);
        assert_eq!(open_count(&state), 0);
        assert_eq!(state.apply(FaqAction::Escape), FaqTransition::Unchanged);
    }

    #[test]
    fn test_category_and_search_filter() {
        let mut state = state();
        state.apply(FaqAction::SetCategory("shipping".into()));
        assert_eq!(state.visible_indices(), vec![2, 3]);

        let t = state.apply(FaqAction::SetSearch("FREE".into()));
        assert_eq!(t, FaqTransition::Filtered { visible: 1 });
        assert_eq!(state.visible_indices(), vec![3]);
        assert!(state.group_visible("shipping"));
        assert!(!state.group_visible("orders"));

        state.apply(FaqAction::SetSearch("zzz".into()));
        assert!(state.no_results());
    }

    #[test]
    fn test_navigation_skips_hidden_items() {
        let mut state = state();
        state.apply(FaqAction::SetSearch("refund".into()));
        assert_eq!(state.visible_indices(), vec![4, 5]);

        assert_eq!(state.apply(FaqAction::Navigate(FaqKey::ArrowDown)), FaqTransition::Focused(4));
        assert_eq!(state.apply(FaqAction::Navigate(FaqKey::ArrowDown)), FaqTransition::Focused(5));
        assert_eq!(state.apply(FaqAction::Navigate(FaqKey::ArrowDown)), FaqTransition::Unchanged);
        assert_eq!(state.apply(FaqAction::Navigate(FaqKey::Home)), FaqTransition::Focused(4));
        assert_eq!(state.apply(FaqAction::Navigate(FaqKey::ArrowUp)), FaqTransition::Unchanged);
        assert_eq!(state.apply(FaqAction::Navigate(FaqKey::End)), FaqTransition::Focused(5));
    }

    #[test]
    fn test_hidden_item_cannot_toggle() {
        let mut state = state();
        state.apply(FaqAction::SetCategory("sizing".into()));
        assert_eq!(state.apply(FaqAction::Toggle(2)), FaqTransition::Unchanged);
        assert_eq!(state.apply(FaqAction::Toggle(99)), FaqTransition::Unchanged);
    }

    #[test]
    fn test_highlight_roundtrip() {
        let text = "Each product page links to a size guide with chest, waist & hip measurements.";
        let marked = highlight(text, "size");
        assert_eq!(
            marked,
            "Each product page links to a <mark class=\"search-highlight\">size</mark> guide with chest, waist &amp; hip measurements."
        );
        assert_eq!(strip_highlights(&marked), text);
    }

    #[test]
    fn test_highlight_case_insensitive_and_literal() {
        let marked = highlight("Size S (small) or size M", "size");
        assert_eq!(marked.matches("<mark").count(), 2);
        assert!(marked.contains(">Size</mark>"));

        let marked = highlight("Price (K) in Kwacha", "(k)");
        assert!(marked.contains("<mark class=\"search-highlight\">(K)</mark>"));
        assert_eq!(strip_highlights(&marked), "Price (K) in Kwacha");
    }

    #[test]
    fn test_strip_restores_markup_like_text() {
        let text = "Use <b>&amp;</b> \"quotes\" & 'apostrophes'";
        assert_eq!(strip_highlights(&highlight(text, "b")), text);
    }

    #[test]
    fn test_question_html_follows_search() {
        let mut state = state();
        state.apply(FaqAction::SetSearch("return".into()));
        let html = state.question_html(4).unwrap();
        assert!(html.contains("<mark class=\"search-highlight\">return</mark>"));

        state.apply(FaqAction::ClearSearch);
        assert_eq!(state.question_html(4).unwrap(), "What is your return policy?");
    }

    #[test]
    fn test_add_item_into_existing_category() {
        let mut state = state();
        state.apply(FaqAction::Focus(6));
        let index = state
            .add_item("shipping", "Do you ship abroad?", "Not yet.")
            .unwrap();
        assert_eq!(index, 4);
        assert_eq!(state.items()[4].question, "Do you ship abroad?");
        assert_eq!(state.focus(), Some(7));

        assert!(state.add_item("gift-cards", "Q", "A").is_none());
    }

    #[test]
    fn test_added_item_respects_filters() {
        let mut state = state();
        state.apply(FaqAction::SetCategory("orders".into()));
        let index = state.add_item("returns", "Exchange?", "Yes.").unwrap();
        assert!(!state.items()[index].is_visible);
    }

    #[test]
    fn test_categories_in_order() {
        assert_eq!(state().categories(), vec!["orders", "shipping", "returns", "sizing"]);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(FaqKey::from_key_name("End"), Some(FaqKey::End));
        assert_eq!(FaqKey::from_key_name("Tab"), None);
    }
}
