// src/mix/transcript.rs
//! The three-stage transcript transform: clean, extract, write.
//!
//! Cleaning must finish first because both extractions read its output.
//! Fact and quote extraction then run concurrently, and the article is only
//! written once both have returned.

use super::events::StatusChannel;
use super::failure::{GenerationStage, MixFailure};
use crate::algebras::GenerationService;
use crate::constants::{
    MESSAGE_CLEANING_TRANSCRIPT, MESSAGE_EXTRACTING, MESSAGE_WRITING_ARTICLE, TRANSCRIPT_QUOTE_CAP,
};
use crate::formatting::PromptComposer;
use crate::model::QuoteSheet;
use serde_json::Value;

pub struct TranscriptPipeline<'a> {
    composer: &'a PromptComposer,
    generator: &'a dyn GenerationService,
}

impl<'a> TranscriptPipeline<'a> {
    pub fn new(composer: &'a PromptComposer, generator: &'a dyn GenerationService) -> Self {
        Self {
            composer,
            generator,
        }
    }

    /// Produces plain article text from a raw transcript.
    pub async fn run(&self, transcript: &str, status: &StatusChannel) -> Result<String, MixFailure> {
        status.message(MESSAGE_CLEANING_TRANSCRIPT);
        let cleaned = self.clean(transcript).await?;

        status.message(MESSAGE_EXTRACTING);
        let (facts, quotes) = self.extract(&cleaned).await?;

        status.message(MESSAGE_WRITING_ARTICLE);
        self.write_article(&facts, &quotes).await
    }

    async fn clean(&self, transcript: &str) -> Result<String, MixFailure> {
        let prompt = self
            .composer
            .transcript_clean(transcript)
            .map_err(MixFailure::Prompt)?;
        let cleaned = self
            .generator
            .generate_text(&prompt)
            .await
            .map_err(|e| MixFailure::generation(GenerationStage::CleanTranscript, e))?;
        log::debug!(
            "Cleaned transcript: {} -> {} bytes",
            transcript.len(),
            cleaned.len()
        );
        Ok(cleaned)
    }

    /// Returns the fact list and the serialised quote sheet.
    async fn extract(&self, cleaned: &str) -> Result<(String, String), MixFailure> {
        let facts_prompt = self
            .composer
            .transcript_facts(cleaned)
            .map_err(MixFailure::Prompt)?;
        let quotes_prompt = self
            .composer
            .transcript_quotes(cleaned)
            .map_err(MixFailure::Prompt)?;

        let facts = async {
            self.generator
                .generate_text(&facts_prompt)
                .await
                .map_err(|e| MixFailure::generation(GenerationStage::ExtractFacts, e))
        };
        let quotes = async {
            self.generator
                .generate_structured(&quotes_prompt)
                .await
                .map_err(|e| MixFailure::generation(GenerationStage::ExtractQuotes, e))
        };

        let (facts, quotes) = futures::try_join!(facts, quotes)?;
        Ok((facts, serialize_quotes(quotes)))
    }

    async fn write_article(&self, facts: &str, quotes: &str) -> Result<String, MixFailure> {
        let prompt = self
            .composer
            .transcript_article(facts, quotes)
            .map_err(MixFailure::Prompt)?;
        self.generator
            .generate_text(&prompt)
            .await
            .map_err(|e| MixFailure::generation(GenerationStage::WriteArticle, e))
    }
}

/// Keeps at most `TRANSCRIPT_QUOTE_CAP` quotes. A payload that is not a quote
/// sheet is passed through untouched.
fn serialize_quotes(value: Value) -> String {
    match serde_json::from_value::<QuoteSheet>(value.clone()) {
        Ok(sheet) => {
            let sheet = sheet.truncated(TRANSCRIPT_QUOTE_CAP);
            log::debug!("Extracted {} quotes", sheet.quotes.len());
            serde_json::to_string(&sheet).unwrap_or_else(|_| value.to_string())
        }
        Err(e) => {
            log::warn!("Quote extraction returned an unexpected shape: {}", e);
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebras::GenerationError;
    use crate::mix::events::MixEvent;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    /// Answers by prompt content and records every prompt it saw.
    struct StageScript {
        prompts: Mutex<Vec<String>>,
        quotes: Value,
        fail_facts: bool,
    }

    impl StageScript {
        fn new(quotes: Value) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                quotes,
                fail_facts: false,
            }
        }
    }

    #[async_trait]
    impl GenerationService for StageScript {
        async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().push(prompt.to_string());
            if prompt.contains("[Facts]:") {
                Ok("Rates rose.".to_string())
            } else if prompt.contains("facts that can be extracted") {
                if self.fail_facts {
                    return Err(GenerationError::Upstream {
                        status: 503,
                        message: "overloaded".to_string(),
                    });
                }
                Ok("1. Rates rose by a quarter point.".to_string())
            } else {
                Ok("Host: Rates rose by a quarter point.".to_string())
            }
        }

        async fn generate_structured(&self, prompt: &str) -> Result<Value, GenerationError> {
            self.prompts.lock().push(prompt.to_string());
            Ok(self.quotes.clone())
        }
    }

    fn quotes(count: usize) -> Value {
        let quotes: Vec<_> = (0..count)
            .map(|i| json!({"speaker": format!("S{}", i), "affiliation": "Bank", "quote": "q"}))
            .collect();
        json!({ "quotes": quotes })
    }

    #[tokio::test]
    async fn test_stages_run_in_order_with_narration() {
        let composer = PromptComposer::new().unwrap();
        let generator = StageScript::new(quotes(2));
        let (status, mut rx) = StatusChannel::new();

        let article = TranscriptPipeline::new(&composer, &generator)
            .run("Host: Uh, rates, rates rose by 25 bps.", &status)
            .await
            .unwrap();
        assert_eq!(article, "Rates rose.");

        let prompts = generator.prompts.lock().clone();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[0].contains("rates rose by 25 bps"));
        // Both extractions read the cleaned transcript, not the raw one.
        assert!(prompts[1..3]
            .iter()
            .all(|p| p.contains("Rates rose by a quarter point.")));
        assert!(prompts[3].contains("[Facts]:\n1. Rates rose by a quarter point."));
        assert!(prompts[3].contains("1200 words"));

        let mut messages = Vec::new();
        while let Ok(MixEvent::Message(m)) = rx.try_recv() {
            messages.push(m);
        }
        assert_eq!(
            messages,
            vec![
                "Cleaning transcript",
                "Extracting facts and quotes",
                "Writing the article"
            ]
        );
    }

    #[tokio::test]
    async fn test_extraction_failure_aborts_before_writing() {
        let composer = PromptComposer::new().unwrap();
        let mut generator = StageScript::new(quotes(1));
        generator.fail_facts = true;
        let (status, _rx) = StatusChannel::new();

        let err = TranscriptPipeline::new(&composer, &generator)
            .run("Host: hello", &status)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MixFailure::Generation {
                stage: GenerationStage::ExtractFacts,
                ..
            }
        ));
        assert!(!generator
            .prompts
            .lock()
            .iter()
            .any(|p| p.contains("[Facts]:")));
    }

    /// Fact and quote extraction each wait until the other has started.
    struct RendezvousScript {
        extraction: tokio::sync::Barrier,
    }

    #[async_trait]
    impl GenerationService for RendezvousScript {
        async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
            if prompt.contains("[Facts]:") {
                Ok("Rates rose.".to_string())
            } else if prompt.contains("facts that can be extracted") {
                self.extraction.wait().await;
                Ok("1. Rates rose.".to_string())
            } else {
                Ok("Host: Rates rose.".to_string())
            }
        }

        async fn generate_structured(&self, _prompt: &str) -> Result<Value, GenerationError> {
            self.extraction.wait().await;
            Ok(quotes(1))
        }
    }

    #[tokio::test]
    async fn test_facts_and_quotes_are_extracted_concurrently() {
        let composer = PromptComposer::new().unwrap();
        let generator = RendezvousScript {
            extraction: tokio::sync::Barrier::new(2),
        };
        let (status, _rx) = StatusChannel::new();

        let article = tokio::time::timeout(
            std::time::Duration::from_secs(2),
            TranscriptPipeline::new(&composer, &generator).run("Host: rates rose", &status),
        )
        .await
        .expect("extractions were not in flight together")
        .unwrap();

        assert_eq!(article, "Rates rose.");
    }

    #[test]
    fn test_quotes_are_capped() {
        let serialized = serialize_quotes(quotes(14));
        let sheet: QuoteSheet = serde_json::from_str(&serialized).unwrap();
        assert_eq!(sheet.quotes.len(), TRANSCRIPT_QUOTE_CAP);
        assert_eq!(sheet.quotes[0].speaker, "S0");
    }

    #[test]
    fn test_unexpected_quote_shape_passes_through() {
        let value = json!(["just", "strings"]);
        assert_eq!(serialize_quotes(value), r#"["just","strings"]"#);
    }
}
