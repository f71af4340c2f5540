//! FAQ accordion.

use tim_commerce::faq::FaqState;

use crate::html::html_escape;

/// Render every category group with its items, plus the no-results panel.
pub fn render_faq(state: &FaqState) -> String {
    let groups: String = state
        .categories()
        .into_iter()
        .map(|category| render_group(state, category))
        .collect();

    format!(
        r#"<section class="faq-section" data-section="faq">
{groups}
<div class="faq-no-results"{hidden}>
    <h3>No questions found</h3>
    <p>Try a different search term or browse all categories.</p>
</div>
</section>"#,
        groups = groups,
        hidden = hidden_attr(state.no_results()),
    )
}

fn render_group(state: &FaqState, category: &str) -> String {
    let items: String = state
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.category == category)
        .map(|(index, _)| render_item(state, index))
        .collect();

    format!(
        r#"<div class="faq-category" data-category="{slug}"{hidden}>
    <h2 class="faq-category-title">{title}</h2>
    {items}
</div>
"#,
        slug = html_escape(category),
        hidden = hidden_attr(state.group_visible(category)),
        title = html_escape(&title_case(category)),
        items = items,
    )
}

fn render_item(state: &FaqState, index: usize) -> String {
    let item = &state.items()[index];
    let question = state.question_html(index).unwrap_or_default();
    let answer = state.answer_html(index).unwrap_or_default();
    let focused = if state.focus() == Some(index) {
        r#" data-focused="true""#
    } else {
        ""
    };

    format!(
        r#"<div class="faq-item{active}" data-index="{index}"{hidden}>
        <button class="faq-question" id="faq-q-{index}" aria-expanded="{expanded}" aria-controls="faq-a-{index}"{focused}>{question}</button>
        <div class="faq-answer" id="faq-a-{index}" role="region" aria-labelledby="faq-q-{index}"{answer_hidden}><p>{answer}</p></div>
    </div>
"#,
        active = if item.is_open { " active" } else { "" },
        index = index,
        hidden = hidden_attr(item.is_visible),
        expanded = item.is_open,
        focused = focused,
        question = question,
        answer_hidden = hidden_attr(item.is_open),
        answer = answer,
    )
}

fn hidden_attr(shown: bool) -> &'static str {
    if shown {
        ""
    } else {
        " hidden"
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
