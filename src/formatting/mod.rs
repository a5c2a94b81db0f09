// src/formatting/mod.rs
//! Renders generation prompts and turns generated text into publishable markup.

mod markup;
mod prompt_templates;

pub use self::markup::text_to_markup;
pub use self::prompt_templates::{PromptComposer, Publisher};
