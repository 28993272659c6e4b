//! SVG font generation from sfnt glyph outlines.
//!
//! Emits an SVG 1.1 `<font>` document with one `<glyph>` per mapped
//! character. SVG fonts share the font's y-up coordinate system, so outlines
//! are written in font units without flipping.

use std::{fmt::Write as _, result};

use kurbo::{BezPath, Point};
use log::{debug, warn};
use skrifa::{
    FontRef, GlyphId, MetadataProvider,
    instance::{LocationRef, Size},
    outline::{DrawSettings, OutlineGlyphCollection, OutlinePen},
    raw::ReadError,
    string::StringId,
};

/// Errors that can occur while generating an SVG font.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse font: {0}")]
    Parse(#[from] ReadError),

    #[error("failed to format SVG: {0}")]
    Format(#[from] std::fmt::Error),
}

pub type Result<T> = result::Result<T, Error>;

/// Options for SVG font output.
#[derive(Debug, Clone, Default)]
pub struct SvgOptions {
    /// Text placed in the `<metadata>` element.
    pub metadata: Option<String>,
}

#[derive(Default)]
struct PathPen {
    path: BezPath,
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(point(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path.quad_to(point(cx0, cy0), point(x, y));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(point(cx0, cy0), point(cx1, cy1), point(x, y));
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

fn point(x: f32, y: f32) -> Point {
    Point::new(f64::from(x), f64::from(y))
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn family_name(font: &FontRef) -> String {
    font.localized_strings(StringId::FAMILY_NAME)
        .english_or_first()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "fontslim".to_string())
}

fn glyph_path(outlines: &OutlineGlyphCollection, gid: GlyphId) -> String {
    let Some(glyph) = outlines.get(gid) else {
        return String::new();
    };
    let mut pen = PathPen::default();
    let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
    if let Err(e) = glyph.draw(settings, &mut pen) {
        warn!("glyph {gid}: outline not drawn: {e}");
        return String::new();
    }
    pen.path.to_svg()
}

/// Renders an SVG font document from sfnt data.
pub fn encode_svg(sfnt: &[u8], options: &SvgOptions) -> Result<String> {
    let font = FontRef::new(sfnt)?;
    let location = LocationRef::default();
    let metrics = font.metrics(Size::unscaled(), location);
    let glyph_metrics = font.glyph_metrics(Size::unscaled(), location);
    let outlines = font.outline_glyphs();
    let family = escape(&family_name(&font));
    let advance = |gid: GlyphId| glyph_metrics.advance_width(gid).unwrap_or(0.0).round();

    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" standalone="no"?>"#)?;
    writeln!(
        out,
        r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">"#
    )?;
    writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg">"#)?;
    if let Some(metadata) = &options.metadata {
        writeln!(out, "<metadata>{}</metadata>", escape(metadata))?;
    }
    writeln!(out, "<defs>")?;
    writeln!(out, r#"<font id="{family}" horiz-adv-x="{}">"#, advance(GlyphId::NOTDEF))?;
    writeln!(
        out,
        r#"  <font-face font-family="{family}" units-per-em="{}" ascent="{}" descent="{}" />"#,
        metrics.units_per_em,
        metrics.ascent.round(),
        metrics.descent.round(),
    )?;
    writeln!(
        out,
        r#"  <missing-glyph horiz-adv-x="{}" d="{}" />"#,
        advance(GlyphId::NOTDEF),
        glyph_path(&outlines, GlyphId::NOTDEF)
    )?;

    let mut count = 0usize;
    for (codepoint, gid) in font.charmap().mappings() {
        // Control characters have no meaning as SVG glyphs.
        if codepoint < 0x20 {
            continue;
        }
        writeln!(
            out,
            r#"  <glyph glyph-name="uni{codepoint:04X}" unicode="&#x{codepoint:X};" horiz-adv-x="{}" d="{}" />"#,
            advance(gid),
            glyph_path(&outlines, gid)
        )?;
        count += 1;
    }

    writeln!(out, "</font>")?;
    writeln!(out, "</defs>")?;
    writeln!(out, "</svg>")?;

    debug!("SVG: {count} glyphs, {} bytes", out.len());
    Ok(out)
}
