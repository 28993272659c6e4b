//! `@font-face` rule synthesis.

use fontslim_font_codec::Format;
use log::warn;

use crate::batch::GenerationOutcome;

/// Web delivery preference: lower ranks come first in `src`.
pub fn format_rank(format: Format) -> u8 {
    match format {
        Format::Woff2 => 0,
        Format::Woff => 1,
        Format::Ttf => 2,
        _ => 3,
    }
}

/// Keyword used in the `format()` hint of a `src` entry.
pub fn css_format(format: Format) -> &'static str {
    match format {
        Format::Ttf => "truetype",
        Format::Otf => "opentype",
        Format::Eot => "embedded-opentype",
        Format::Svg => "svg",
        Format::Woff => "woff",
        Format::Woff2 => "woff2",
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Builds an `@font-face` rule referencing every successful outcome.
///
/// Sources are referenced by file name, so the stylesheet is expected to
/// live beside the fonts. When nothing succeeded the rule carries only the
/// family name.
pub fn synthesize(outcomes: &[GenerationOutcome], font_family: &str) -> String {
    let mut included: Vec<&GenerationOutcome> = outcomes.iter().filter(|o| o.success()).collect();
    included.sort_by_key(|o| format_rank(o.format));

    let sources: Vec<String> = included
        .iter()
        .map(|o| {
            let file = o.path.file_name().unwrap_or(o.path.as_os_str()).to_string_lossy();
            format!("url({}) format('{}')", quote(&file), css_format(o.format))
        })
        .collect();

    let mut css = String::from("@font-face {\n");
    css.push_str(&format!("  font-family: {};\n", quote(font_family)));
    if sources.is_empty() {
        warn!("No font was generated; @font-face rule has no src");
    } else {
        css.push_str(&format!("  src: {};\n", sources.join(",\n       ")));
    }
    css.push('}');
    css
}
