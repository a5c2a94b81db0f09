//! Composes generation prompts from resolved content with Handlebars templates.
//!
//! Templates are embedded at build time from `templates/`. Every prompt opens
//! with a `"""` sentinel and closes with `"""` plus a newline so the service
//! can tell instructions apart from quoted source material.

use crate::constants::{
    TRANSCRIPT_ARTICLE_WORDS, TRANSCRIPT_FACT_CAP, TRANSCRIPT_QUOTES_IN_ARTICLE,
    TRANSCRIPT_QUOTE_CAP,
};
use crate::error::AppError;
use crate::model::ResolvedContent;
use crate::types::WordBudget;
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;

const NEWS_ARTICLE: &str = "news_article";
const BLOG_POST: &str = "blog_post";
const CUSTOM: &str = "custom";
const TRANSCRIPT_CLEAN: &str = "transcript_clean";
const TRANSCRIPT_FACTS: &str = "transcript_facts";
const TRANSCRIPT_QUOTES: &str = "transcript_quotes";
const TRANSCRIPT_ARTICLE: &str = "transcript_article";

const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
    (NEWS_ARTICLE, include_str!("../../templates/news_article.hbs")),
    (BLOG_POST, include_str!("../../templates/blog_post.hbs")),
    (CUSTOM, include_str!("../../templates/custom.hbs")),
    (
        TRANSCRIPT_CLEAN,
        include_str!("../../templates/transcript_clean.hbs"),
    ),
    (
        TRANSCRIPT_FACTS,
        include_str!("../../templates/transcript_facts.hbs"),
    ),
    (
        TRANSCRIPT_QUOTES,
        include_str!("../../templates/transcript_quotes.hbs"),
    ),
    (
        TRANSCRIPT_ARTICLE,
        include_str!("../../templates/transcript_article.hbs"),
    ),
];

/// The organisation a transcript was produced for, named in the cleaning prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Renders every prompt a mix sends to the generation service.
pub struct PromptComposer {
    registry: Handlebars<'static>,
    publisher: Option<Publisher>,
}

impl PromptComposer {
    /// Registers the embedded templates.
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        // Prompts are plain text; source documents must reach the service verbatim.
        registry.register_escape_fn(handlebars::no_escape);

        for (name, template) in EMBEDDED_TEMPLATES {
            registry
                .register_template_string(name, *template)
                .map_err(|e| AppError::TemplateRenderError {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        log::debug!("Registered {} prompt templates", EMBEDDED_TEMPLATES.len());

        Ok(Self {
            registry,
            publisher: None,
        })
    }

    pub fn with_publisher(mut self, publisher: Option<Publisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn news_article(
        &self,
        items: &[ResolvedContent],
        budget: WordBudget,
    ) -> Result<String, AppError> {
        self.render(
            NEWS_ARTICLE,
            &json!({
                "plural": items.len() != 1,
                "length": budget.to_string(),
                "documents": join_documents(items),
            }),
        )
    }

    pub fn blog_post(
        &self,
        items: &[ResolvedContent],
        budget: WordBudget,
    ) -> Result<String, AppError> {
        self.render(
            BLOG_POST,
            &json!({
                "plural": items.len() != 1,
                "length": budget.to_string(),
                "documents": join_documents(items),
            }),
        )
    }

    /// The user's own instructions replace the strategy preamble.
    pub fn custom(&self, items: &[ResolvedContent], instructions: &str) -> Result<String, AppError> {
        self.render(
            CUSTOM,
            &json!({
                "plural": items.len() != 1,
                "instructions": instructions.trim(),
                "documents": join_documents(items),
            }),
        )
    }

    pub fn transcript_clean(&self, transcript: &str) -> Result<String, AppError> {
        self.render(
            TRANSCRIPT_CLEAN,
            &json!({
                "publisher": self.publisher,
                "transcript": transcript,
            }),
        )
    }

    pub fn transcript_facts(&self, cleaned: &str) -> Result<String, AppError> {
        self.render(
            TRANSCRIPT_FACTS,
            &json!({
                "fact_cap": TRANSCRIPT_FACT_CAP,
                "transcript": cleaned,
            }),
        )
    }

    pub fn transcript_quotes(&self, cleaned: &str) -> Result<String, AppError> {
        self.render(
            TRANSCRIPT_QUOTES,
            &json!({
                "quote_cap": TRANSCRIPT_QUOTE_CAP,
                "transcript": cleaned,
            }),
        )
    }

    /// Always asks for `TRANSCRIPT_ARTICLE_WORDS`, whatever the bowl's length.
    pub fn transcript_article(&self, facts: &str, quotes_json: &str) -> Result<String, AppError> {
        self.render(
            TRANSCRIPT_ARTICLE,
            &json!({
                "length": TRANSCRIPT_ARTICLE_WORDS,
                "quotes_in_article": TRANSCRIPT_QUOTES_IN_ARTICLE,
                "facts": facts,
                "quotes": quotes_json,
            }),
        )
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, AppError> {
        let prompt = self
            .registry
            .render(name, data)
            .map_err(|e| AppError::TemplateRenderError {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        log::debug!("Rendered {} prompt: {} bytes", name, prompt.len());
        Ok(prompt)
    }
}

/// Joins documents as `Document "<title>":\n<text>`, one blank line apart.
fn join_documents(items: &[ResolvedContent]) -> String {
    items
        .iter()
        .map(|item| format!("Document \"{}\":\n{}", item.title, item.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}
