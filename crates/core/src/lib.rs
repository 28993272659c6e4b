//! fontslim core - the orchestration around font subsetting.
//!
//! Data flows left to right: [`CharsetResolver`] and [`OutputPlan`] feed
//! [`BatchFontGenerator`], whose successful outcomes feed
//! [`css::synthesize`]. [`minify`] runs the whole chain.

pub mod batch;
pub mod charset;
pub mod collections;
pub mod config;
pub mod css;
pub mod error;
pub mod io;
pub mod output;
pub mod parallel;
pub mod pipeline;

pub use batch::{BatchFontGenerator, BatchResult, GeneratedFont, GenerationOutcome};
pub use charset::{CharsetResolver, ResolvedSubset, SubsetMode};
pub use collections::{CharacterCollection, CollectionRegistry};
pub use error::{Error, Result};
pub use output::{OutputPlan, OutputSpec, PlannedOutput, infer_formats};
pub use pipeline::{MinifyReport, MinifyRequest, minify};

pub use fontslim_font_codec::{CodecOptions, FontCodec, Format, ReadOptions, Transcoder, WriteOptions};
