//! End-to-end minification of one font.

use std::path::{Path, PathBuf};

use fontslim_font_codec::{CodecOptions, FontCodec, Format};
use log::info;

use crate::{
    batch::{BatchFontGenerator, BatchResult},
    charset::{CharsetResolver, ResolvedSubset},
    collections::CollectionRegistry,
    config::DEFAULT_COLLECTION,
    css::synthesize,
    error::Result,
    output::{OutputPlan, OutputSpec, infer_formats},
};

/// Everything one minification run needs.
#[derive(Debug, Clone, Default)]
pub struct MinifyRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    /// Explicit format list; `None` lets the output path or defaults decide.
    pub formats: Option<Vec<Format>>,
    /// Explicit collection; `None` means the default collection, implicitly.
    pub collection: Option<String>,
    /// Custom text; `Some("")` is a valid, empty request.
    pub words: Option<String>,
    /// Family name for the `@font-face` rule; defaults to the input stem.
    pub font_family: Option<String>,
    pub options: CodecOptions,
}

impl MinifyRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), ..Default::default() }
    }

    fn font_family(&self) -> String {
        self.font_family.clone().unwrap_or_else(|| family_from_path(&self.input))
    }
}

fn family_from_path(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

/// What a minification run produced.
#[derive(Debug)]
pub struct MinifyReport {
    pub subset: ResolvedSubset,
    pub plan: OutputPlan,
    pub batch: BatchResult,
    pub css: String,
}

/// Resolves the subset, plans outputs, generates every format and builds
/// the stylesheet rule.
///
/// Validation happens before the codec is touched: an unknown collection or
/// an empty format list fails without converting anything.
pub fn minify<C: FontCodec>(
    request: &MinifyRequest,
    registry: &CollectionRegistry,
    generator: &BatchFontGenerator<C>,
) -> Result<MinifyReport> {
    let collection = request.collection.as_deref().unwrap_or(DEFAULT_COLLECTION);
    let subset = CharsetResolver::new(registry).resolve(
        request.words.as_deref(),
        collection,
        request.collection.is_some(),
    )?;

    let destination = OutputSpec::classify(request.output.as_deref());
    let formats = infer_formats(request.formats.as_deref(), &destination);
    let plan = OutputPlan::new(&request.input, &destination, &formats)?;

    let batch = generator.generate(&request.input, &subset, &plan, &request.options)?;
    info!("Batch complete: {} succeeded, {} failed", batch.succeeded(), batch.failed());

    let css = synthesize(&batch.outcomes, &request.font_family());
    Ok(MinifyReport { subset, plan, batch, css })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::Error;

    struct CopyCodec;

    impl FontCodec for CopyCodec {
        fn convert(
            &self,
            data: &[u8],
            _source: Format,
            _target: Format,
            _chars: &[char],
            _options: &CodecOptions,
        ) -> fontslim_font_codec::Result<Vec<u8>> {
            Ok(data.to_vec())
        }
    }

    struct PanicCodec;

    impl FontCodec for PanicCodec {
        fn convert(
            &self,
            _data: &[u8],
            _source: Format,
            _target: Format,
            _chars: &[char],
            _options: &CodecOptions,
        ) -> fontslim_font_codec::Result<Vec<u8>> {
            panic!("codec must not run")
        }
    }

    #[test]
    fn test_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("Brand.ttf");
        fs::write(&input, b"FONT").unwrap();

        let report = minify(
            &MinifyRequest::new(&input),
            &CollectionRegistry::builtin(),
            &BatchFontGenerator::new(CopyCodec),
        )
        .unwrap();

        assert_eq!(report.subset.len(), 500);
        assert_eq!(
            report.plan.formats().collect::<Vec<_>>(),
            [Format::Woff2, Format::Woff, Format::Ttf]
        );
        assert!(dir.path().join("Brand.min.woff2").exists());
        assert!(report.css.contains("font-family: 'Brand';"));
    }

    #[test]
    fn test_output_file_infers_format() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("font.ttf");
        fs::write(&input, b"FONT").unwrap();

        let request = MinifyRequest {
            output: Some(dir.path().join("out/site.woff")),
            words: Some("abc".into()),
            font_family: Some("Site".into()),
            ..MinifyRequest::new(&input)
        };
        let report = minify(&request, &CollectionRegistry::builtin(), &BatchFontGenerator::new(CopyCodec))
            .unwrap();

        assert_eq!(report.plan.formats().collect::<Vec<_>>(), [Format::Woff]);
        assert!(dir.path().join("out/site.woff").exists());
        assert_eq!(report.subset.len(), 3);
        assert!(report.css.contains("url('site.woff') format('woff')"));
    }

    #[test]
    fn test_unknown_collection_never_reaches_codec() {
        let request = MinifyRequest {
            collection: Some("top1".into()),
            ..MinifyRequest::new("missing.ttf")
        };
        let err = minify(&request, &CollectionRegistry::builtin(), &BatchFontGenerator::new(PanicCodec))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCollection { .. }));
    }

    #[test]
    fn test_family_from_path() {
        assert_eq!(family_from_path(Path::new("a/b/My Font.ttf")), "My Font");
        assert_eq!(family_from_path(Path::new("")), "");
    }
}
