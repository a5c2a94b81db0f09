//! Plain generated text to publishable paragraph markup.

use crate::types::Markup;

/// Wraps every non-empty line of `text` in a `<p>` element.
///
/// Purely structural: line contents are not interpreted or escaped. Not
/// idempotent; apply once to plain text only.
pub fn text_to_markup(text: &str) -> Markup {
    let paragraphs = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", line))
        .collect::<Vec<_>>();

    Markup::new(paragraphs.join("\n"))
}
