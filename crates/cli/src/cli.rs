//! CLI definitions and request building.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use fontslim_core::{CodecOptions, Format, MinifyRequest, ReadOptions, WriteOptions};
use serde::de::DeserializeOwned;

#[derive(Debug, Parser)]
#[command(name = "fontslim", version, disable_version_flag = true)]
#[command(about = "Subset a font to the characters you use and emit web font formats")]
pub struct Cli {
    /// Input font (ttf, otf, woff or eot)
    pub input: PathBuf,

    /// Predefined character collection (default: top500)
    #[arg(short, long)]
    pub collection: Option<String>,

    /// Characters to keep; combined with --collection when both are given
    #[arg(short, long)]
    pub words: Option<String>,

    /// Output file or directory (a trailing '/' always means a directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated output formats (e.g., woff2,woff,ttf)
    #[arg(short, long, value_delimiter = ',')]
    pub formats: Option<Vec<Format>>,

    /// JSON options for reading the source font
    #[arg(long, value_name = "JSON", value_parser = parse_json::<ReadOptions>)]
    pub input_options: Option<ReadOptions>,

    /// JSON options for writing the target formats
    #[arg(long, value_name = "JSON", value_parser = parse_json::<WriteOptions>)]
    pub output_options: Option<WriteOptions>,

    /// Family name used in the @font-face rule (default: input file stem)
    #[arg(long)]
    pub font_family: Option<String>,

    /// Exit with an error when any format fails
    #[arg(long)]
    pub strict: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,
}

fn parse_json<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_str(value).map_err(|e| format!("invalid JSON: {e}"))
}

impl Cli {
    pub fn into_request(self) -> MinifyRequest {
        MinifyRequest {
            input: self.input,
            output: self.output,
            formats: self.formats,
            collection: self.collection,
            words: self.words,
            font_family: self.font_family,
            options: CodecOptions {
                input: self.input_options.unwrap_or_default(),
                output: self.output_options.unwrap_or_default(),
            },
        }
    }
}
