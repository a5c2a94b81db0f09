//! Domain model: the bowl record, the content it references, and the
//! request/response shapes of a mix.

mod bowl;
mod content;
mod request;

pub use bowl::{BowlConfig, BowlMeta, BowlSnapshot, BOWL_SCHEMA_VERSION};
pub use content::{ContentItem, Quote, QuoteSheet, ResolvedContent};
pub use request::{Identity, MixRequest};
