// src/mix/compose.rs
//! Runs a selected strategy and turns its output into publishable markup.

use super::events::StatusChannel;
use super::failure::{GenerationStage, MixFailure};
use super::strategy::Strategy;
use super::transcript::TranscriptPipeline;
use crate::algebras::GenerationService;
use crate::constants::{MESSAGE_MIXING, THIRD_PARTY_LINKS_HEADING};
use crate::formatting::{text_to_markup, PromptComposer};
use crate::model::ResolvedContent;
use crate::types::Markup;

pub async fn compose_creation(
    strategy: &Strategy,
    resolved: &[ResolvedContent],
    composer: &PromptComposer,
    generator: &dyn GenerationService,
    status: &StatusChannel,
) -> Result<Markup, MixFailure> {
    let text = match strategy {
        Strategy::Transcript => {
            let transcript = resolved.first().ok_or(MixFailure::EmptyBowl)?;
            TranscriptPipeline::new(composer, generator)
                .run(&transcript.text, status)
                .await?
        }
        Strategy::News { budget } => {
            status.message(MESSAGE_MIXING);
            let prompt = composer
                .news_article(resolved, *budget)
                .map_err(MixFailure::Prompt)?;
            let article = generate(generator, &prompt).await?;
            append_third_party_links(article, resolved)
        }
        Strategy::Blog { budget } => {
            status.message(MESSAGE_MIXING);
            let prompt = composer
                .blog_post(resolved, *budget)
                .map_err(MixFailure::Prompt)?;
            generate(generator, &prompt).await?
        }
        Strategy::Custom { instructions } => {
            status.message(MESSAGE_MIXING);
            let prompt = composer
                .custom(resolved, instructions)
                .map_err(MixFailure::Prompt)?;
            generate(generator, &prompt).await?
        }
    };

    log::info!(
        "Composed {} creation: {} bytes of text",
        strategy.name(),
        text.len()
    );

    if strategy.needs_paragraph_markup() {
        Ok(text_to_markup(&text))
    } else {
        Ok(Markup::new(text))
    }
}

async fn generate(generator: &dyn GenerationService, prompt: &str) -> Result<String, MixFailure> {
    generator
        .generate_text(prompt)
        .await
        .map_err(|e| MixFailure::generation(GenerationStage::Compose, e))
}

/// Lists every origin URL the documents carry under a trailing heading.
/// Articles built from documents without origin URLs are returned unchanged.
fn append_third_party_links(article: String, resolved: &[ResolvedContent]) -> String {
    let links: Vec<&str> = resolved
        .iter()
        .filter_map(|item| item.orig_url.as_deref())
        .filter(|url| !url.trim().is_empty())
        .collect();

    if links.is_empty() {
        return article;
    }

    format!(
        "{}\n\n{}\n\n{}\n",
        article,
        THIRD_PARTY_LINKS_HEADING,
        links.join("\n")
    )
}
