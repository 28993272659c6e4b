//! Output path planning.
//!
//! `--output` is sniffed for a file extension: with one it names a single
//! file whose extension is swapped per format, without one it names a
//! directory. A trailing path separator always means a directory, which is
//! the only way to target directories whose names contain a dot.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use fontslim_font_codec::Format;
use indexmap::IndexSet;

use crate::{
    config::{DEFAULT_FORMATS, MIN_SUFFIX},
    error::{Error, Result},
};

/// Where outputs should go, as classified from `--output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSpec {
    /// No `--output`: write beside the input.
    Beside,
    /// A concrete file path.
    File(PathBuf),
    /// A directory to write `{stem}.min.{format}` files into.
    Directory(PathBuf),
}

impl OutputSpec {
    pub fn classify(output: Option<&Path>) -> Self {
        let Some(path) = output else {
            return OutputSpec::Beside;
        };
        let raw = path.as_os_str().to_string_lossy();
        if raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR) {
            OutputSpec::Directory(path.to_path_buf())
        } else if path.extension().is_some() {
            OutputSpec::File(path.to_path_buf())
        } else {
            OutputSpec::Directory(path.to_path_buf())
        }
    }
}

/// Chooses the formats to produce.
///
/// Precedence: an explicit list, then the extension of an output file, then
/// [`DEFAULT_FORMATS`].
pub fn infer_formats(explicit: Option<&[Format]>, destination: &OutputSpec) -> Vec<Format> {
    if let Some(formats) = explicit {
        return formats.to_vec();
    }
    if let OutputSpec::File(path) = destination
        && let Some(format) = Format::from_path(path)
    {
        return vec![format];
    }
    DEFAULT_FORMATS.to_vec()
}

/// One planned output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    pub format: Format,
    pub path: PathBuf,
}

/// One output path per requested format, in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    entries: Vec<PlannedOutput>,
}

impl OutputPlan {
    /// Computes output paths for `formats`.
    ///
    /// Repeated formats are planned once, at their first position.
    pub fn new(input: &Path, destination: &OutputSpec, formats: &[Format]) -> Result<Self> {
        let formats: IndexSet<Format> = formats.iter().copied().collect();
        if formats.is_empty() {
            return Err(Error::NoFormats);
        }

        let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let entries = formats
            .into_iter()
            .map(|format| {
                let path = match destination {
                    OutputSpec::File(file) => file.with_extension(format.extension()),
                    OutputSpec::Directory(dir) => {
                        dir.join(format!("{stem}.{MIN_SUFFIX}.{}", format.extension()))
                    }
                    OutputSpec::Beside => {
                        input.with_extension(format!("{MIN_SUFFIX}.{}", format.extension()))
                    }
                };
                PlannedOutput { format, path }
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[PlannedOutput] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn formats(&self) -> impl Iterator<Item = Format> + '_ {
        self.entries.iter().map(|e| e.format)
    }

    /// Directory holding the outputs. Every branch of planning puts all
    /// files in one directory.
    pub fn output_dir(&self) -> PathBuf {
        self.entries
            .first()
            .and_then(|e| e.path.parent())
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Distinct non-empty parent directories of the planned paths.
    pub fn directories(&self) -> Vec<&Path> {
        let dirs: IndexSet<&Path> = self
            .entries
            .iter()
            .filter_map(|e| e.path.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        dirs.into_iter().collect()
    }
}
