// src/constants.rs
//! Domain constants that define the operational boundaries of a mix.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Output length
// ---------------------------------------------------------------------------

/// Word counts requested from the generation service per bowl length label.
pub const LENGTH_WORD_COUNTS: &[(&str, u32)] = &[
    ("concise", 300),
    ("shortForm", 600),
    ("longForm", 1200),
    ("exhaustive", 4000),
];

/// Word count used when a bowl carries a length label outside the table.
///
/// Matches the `longForm` entry; an unknown label never fails a mix.
pub const DEFAULT_WORD_COUNT: u32 = 1200;

/// Length instruction used when composing an article from a transcript.
///
/// This deliberately ignores the bowl's own length label. The generic news
/// composer honours the label; the transcript pipeline does not.
pub const TRANSCRIPT_ARTICLE_WORDS: &str = "1200 words";

// ---------------------------------------------------------------------------
// Transcript extraction
// ---------------------------------------------------------------------------

/// How many standalone facts the extraction stage asks for.
pub const TRANSCRIPT_FACT_CAP: usize = 50;

/// How many third-party quotes the extraction stage asks for and keeps.
pub const TRANSCRIPT_QUOTE_CAP: usize = 10;

/// How many of the extracted quotes the compose prompt asks the article to use.
pub const TRANSCRIPT_QUOTES_IN_ARTICLE: usize = 5;

/// Content type marking spoken-word source material.
pub const TRANSCRIPT_CONTENT_TYPE: &str = "transcript";

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// Filename prefix for every published creation.
pub const CREATION_FILENAME_PREFIX: &str = "creation--";

/// Filename extension for every published creation.
pub const CREATION_FILENAME_EXTENSION: &str = "html";

/// Heading appended to news articles that cite origin URLs.
pub const THIRD_PARTY_LINKS_HEADING: &str = "Third Party Links";

// ---------------------------------------------------------------------------
// User-visible alerts
// ---------------------------------------------------------------------------

pub const ALERT_LOGIN_EXPIRED: &str = "Login expired.";

pub const ALERT_MIX_FAILED: &str = "Could not mix contents into the desired creation.";

pub const ALERT_EMPTY_BOWL: &str = "There is nothing in the bowl to mix.";

pub const ALERT_SAVE_FAILED: &str = "Could not save the creation to the bowl.";

// ---------------------------------------------------------------------------
// Generation service
// ---------------------------------------------------------------------------

pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

pub const DEFAULT_GENERATION_API_BASE: &str = "https://api.openai.com/v1";

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Progress narration
// ---------------------------------------------------------------------------

pub const MESSAGE_GATHERING: &str = "Gathering contents";

pub const MESSAGE_MIXING: &str = "Mixing contents";

pub const MESSAGE_CLEANING_TRANSCRIPT: &str = "Cleaning transcript";

pub const MESSAGE_EXTRACTING: &str = "Extracting facts and quotes";

pub const MESSAGE_WRITING_ARTICLE: &str = "Writing the article";

pub const MESSAGE_SAVING: &str = "Saving creation";
