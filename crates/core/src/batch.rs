//! Batch font generation.
//!
//! One batch converts a single input font into every planned format. Setup
//! (input checks, directory creation) is fatal; each format's conversion
//! then runs as an independent job whose failure is recorded, not raised.

use std::{
    fs::{self, create_dir_all},
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;
use fontslim_font_codec::{CodecOptions, FontCodec, Format};
use log::{debug, info, warn};

use crate::{
    charset::ResolvedSubset,
    error::{Error, Result},
    io::FontFile,
    output::{OutputPlan, PlannedOutput},
    parallel::settle_all,
};

/// A successfully written output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratedFont {
    pub bytes: usize,
}

/// Result of one format's job.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub format: Format,
    pub path: PathBuf,
    pub result: anyhow::Result<GeneratedFont>,
}

impl GenerationOutcome {
    pub fn success(&self) -> bool {
        self.result.is_ok()
    }

    /// The failure, present exactly when [`success`](Self::success) is false.
    pub fn error(&self) -> Option<&anyhow::Error> {
        self.result.as_ref().err()
    }
}

/// Outcomes of a batch, in requested-format order.
#[derive(Debug)]
pub struct BatchResult {
    pub output_dir: PathBuf,
    pub outcomes: Vec<GenerationOutcome>,
}

impl BatchResult {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn successes(&self) -> impl Iterator<Item = &GenerationOutcome> {
        self.outcomes.iter().filter(|o| o.success())
    }
}

/// Fans out one codec call per planned format.
#[derive(Debug, Clone)]
pub struct BatchFontGenerator<C> {
    codec: C,
}

impl<C: FontCodec> BatchFontGenerator<C> {
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Converts `input` into every format in `plan`.
    ///
    /// Returns `Err` only for setup failures: a missing or unreadable input,
    /// an input whose format cannot be told from its extension, or an output
    /// directory that cannot be created. Per-format failures are recorded in
    /// the returned outcomes.
    pub fn generate(
        &self,
        input: &Path,
        subset: &ResolvedSubset,
        plan: &OutputPlan,
        options: &CodecOptions,
    ) -> Result<BatchResult> {
        let source = Format::from_path(input)
            .ok_or_else(|| Error::UnsupportedInput(input.to_path_buf()))?;
        let data = read_input(input)?;

        for dir in plan.directories() {
            create_dir_all(dir)
                .map_err(|source| Error::CreateDirectory { path: dir.to_path_buf(), source })?;
        }

        info!(
            "Generating {} format(s) from {} ({} chars)",
            plan.len(),
            input.display(),
            subset.len()
        );

        let results = settle_all(plan.entries(), |entry| {
            self.generate_one(&data, source, entry, subset, options)
        });

        let outcomes: Vec<GenerationOutcome> = plan
            .entries()
            .iter()
            .zip(results)
            .map(|(entry, result)| {
                if let Err(e) = &result {
                    warn!("{}: {e:#}", entry.format);
                }
                GenerationOutcome { format: entry.format, path: entry.path.clone(), result }
            })
            .collect();

        Ok(BatchResult { output_dir: plan.output_dir(), outcomes })
    }

    fn generate_one(
        &self,
        data: &[u8],
        source: Format,
        entry: &PlannedOutput,
        subset: &ResolvedSubset,
        options: &CodecOptions,
    ) -> anyhow::Result<GeneratedFont> {
        let file = FontFile::new(&entry.path);
        file.ensure_parent_dir()?;

        let output = self
            .codec
            .convert(data, source, entry.format, subset.chars(), options)
            .with_context(|| format!("Failed to convert {source} to {}", entry.format))?;
        file.write(&output)?;

        let ratio = if data.is_empty() { 0.0 } else { output.len() as f64 / data.len() as f64 };
        debug!(
            "{} -> {} ({} -> {} bytes, {:.1}%)",
            entry.format,
            entry.path.display(),
            data.len(),
            output.len(),
            ratio * 100.0
        );
        Ok(GeneratedFont { bytes: output.len() })
    }
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    match fs::metadata(input) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(Error::MissingInput(input.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::MissingInput(input.to_path_buf()));
        }
        Err(source) => return Err(Error::ReadInput { path: input.to_path_buf(), source }),
    }
    fs::read(input).map_err(|source| Error::ReadInput { path: input.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use fontslim_font_codec::Error as CodecError;

    use super::*;
    use crate::{
        charset::CharsetResolver,
        collections::{CharacterCollection, CollectionRegistry},
        output::OutputSpec,
    };

    /// Echoes the input prefixed with the target format, failing on request.
    struct FakeCodec {
        fail: Option<Format>,
        calls: AtomicUsize,
    }

    impl FakeCodec {
        fn failing(format: Format) -> Self {
            Self { fail: Some(format), calls: AtomicUsize::new(0) }
        }

        fn ok() -> Self {
            Self { fail: None, calls: AtomicUsize::new(0) }
        }
    }

    impl FontCodec for FakeCodec {
        fn convert(
            &self,
            data: &[u8],
            _source: Format,
            target: Format,
            chars: &[char],
            _options: &CodecOptions,
        ) -> fontslim_font_codec::Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail == Some(target) {
                return Err(CodecError::UnsupportedSource(target));
            }
            let mut out = format!("{target}:{}:", chars.len()).into_bytes();
            out.extend_from_slice(data);
            Ok(out)
        }
    }

    fn subset(words: &str) -> ResolvedSubset {
        let mut registry = CollectionRegistry::new();
        registry.register(CharacterCollection::new("abc", "abc".chars()));
        CharsetResolver::new(&registry).resolve(Some(words), "abc", false).unwrap()
    }

    fn write_input(dir: &Path) -> PathBuf {
        let input = dir.join("font.ttf");
        fs::write(&input, b"FONT").unwrap();
        input
    }

    #[test]
    fn test_one_failure_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let destination = OutputSpec::Directory(dir.path().join("dist"));
        let plan = OutputPlan::new(&input, &destination, &[Format::Woff2, Format::Woff, Format::Ttf])
            .unwrap();

        let generator = BatchFontGenerator::new(FakeCodec::failing(Format::Woff));
        let batch =
            generator.generate(&input, &subset("hi"), &plan, &CodecOptions::default()).unwrap();

        assert_eq!(batch.outcomes.len(), 3);
        assert_eq!(batch.failed(), 1);
        assert_eq!(
            batch.outcomes.iter().map(|o| o.format).collect::<Vec<_>>(),
            [Format::Woff2, Format::Woff, Format::Ttf]
        );
        assert!(!batch.outcomes[1].success());
        assert!(batch.outcomes[1].error().is_some());
        assert!(!batch.outcomes[1].path.exists());
        for outcome in [&batch.outcomes[0], &batch.outcomes[2]] {
            assert!(outcome.success());
            assert!(outcome.error().is_none());
            assert!(outcome.path.exists());
        }
        assert_eq!(generator.codec().calls.load(Ordering::SeqCst), 3);
        assert_eq!(batch.output_dir, dir.path().join("dist"));
    }

    #[test]
    fn test_written_bytes_come_from_codec() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let plan = OutputPlan::new(&input, &OutputSpec::Beside, &[Format::Eot]).unwrap();

        let batch = BatchFontGenerator::new(FakeCodec::ok())
            .generate(&input, &subset("xyz"), &plan, &CodecOptions::default())
            .unwrap();

        assert!(batch.all_succeeded());
        let written = fs::read(dir.path().join("font.min.eot")).unwrap();
        assert_eq!(written, b"eot:3:FONT");
        assert_eq!(batch.outcomes[0].result.as_ref().unwrap().bytes, written.len());
    }

    #[test]
    fn test_empty_subset_still_converts() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let plan = OutputPlan::new(&input, &OutputSpec::Beside, &[Format::Ttf]).unwrap();

        let batch = BatchFontGenerator::new(FakeCodec::ok())
            .generate(&input, &subset(""), &plan, &CodecOptions::default())
            .unwrap();
        assert!(batch.all_succeeded());
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.ttf");
        let plan = OutputPlan::new(&input, &OutputSpec::Beside, &[Format::Ttf]).unwrap();

        let generator = BatchFontGenerator::new(FakeCodec::ok());
        let err = generator
            .generate(&input, &subset("a"), &plan, &CodecOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        assert_eq!(generator.codec().calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_input_extension_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("font.bin");
        fs::write(&input, b"FONT").unwrap();
        let plan = OutputPlan::new(&input, &OutputSpec::Beside, &[Format::Ttf]).unwrap();

        let err = BatchFontGenerator::new(FakeCodec::ok())
            .generate(&input, &subset("a"), &plan, &CodecOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedInput(_)));
    }

    #[test]
    fn test_uncreatable_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let destination = OutputSpec::Directory(blocker.join("dist"));
        let plan = OutputPlan::new(&input, &destination, &[Format::Ttf]).unwrap();

        let generator = BatchFontGenerator::new(FakeCodec::ok());
        let err = generator
            .generate(&input, &subset("a"), &plan, &CodecOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::CreateDirectory { .. }));
        assert_eq!(generator.codec().calls.load(Ordering::SeqCst), 0);
    }
}
