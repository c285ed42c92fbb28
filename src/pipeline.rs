//! Batch processing of a directory of PDFs.
//!
//! Each file is sniffed, parsed, classified and written as `<stem>.json`
//! before the next one starts. Failures are per file: they are logged,
//! recorded in the [`RunSummary`] and the batch moves on. Only setup
//! problems (missing input directory, unwritable output directory) make
//! [`Pipeline::run`] return an error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::{ClassifyOptions, HeadingClassifier};
use crate::detect::{has_pdf_extension, sniff_bytes, sniff_path};
use crate::error::{Error, Result};
use crate::lang::{
    detect_or_fallback, LanguageDetector, ModelRegistry, WhatlangDetector, DEFAULT_LANGUAGE,
};
use crate::model::{DocumentResult, TextSpan};
use crate::parser::{ExtractOptions, LopdfBackend, SpanExtractor};
use crate::render::{to_json, JsonFormat};

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Span extraction options
    pub extract: ExtractOptions,
    /// Classifier thresholds
    pub classify: ClassifyOptions,
    /// Language code used when detection fails
    pub fallback_language: String,
    /// Number of non-empty spans sampled for language detection
    pub sample_spans: usize,
    /// Output JSON layout
    pub json_format: JsonFormat,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::new().lenient(),
            classify: ClassifyOptions::default(),
            fallback_language: DEFAULT_LANGUAGE.to_string(),
            sample_spans: 20,
            json_format: JsonFormat::Pretty,
        }
    }
}

impl PipelineOptions {
    /// Create pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the classifier options.
    pub fn with_classify(mut self, classify: ClassifyOptions) -> Self {
        self.classify = classify;
        self
    }

    /// Set the extraction options.
    pub fn with_extract(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }

    /// Set the fallback language code.
    pub fn with_fallback_language(mut self, code: impl Into<String>) -> Self {
        self.fallback_language = code.into();
        self
    }

    /// Set the output JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }
}

/// Progress notifications emitted during a run.
#[derive(Debug)]
pub enum PipelineEvent<'a> {
    /// The scan found `total` PDFs.
    Started { total: usize },
    /// A file was processed and its result written.
    FileDone { path: &'a Path, output: &'a Path },
    /// A file was skipped.
    FileFailed { path: &'a Path, error: &'a Error },
}

/// A file that could not be processed.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Written result files, in processing order
    pub outputs: Vec<PathBuf>,
    /// Skipped inputs
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    /// Number of files processed successfully.
    pub fn processed(&self) -> usize {
        self.outputs.len()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of PDFs found.
    pub fn total(&self) -> usize {
        self.processed() + self.failed()
    }

    /// Whether every file succeeded.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives extraction, language detection and classification over PDFs.
pub struct Pipeline {
    options: PipelineOptions,
    registry: ModelRegistry,
    classifier: HeadingClassifier,
    detector: Box<dyn LanguageDetector>,
}

impl Pipeline {
    /// Create a pipeline with the bundled language profiles and detector.
    pub fn new(options: PipelineOptions) -> Self {
        let classifier = HeadingClassifier::new(options.classify.clone());
        Self {
            options,
            registry: ModelRegistry::new(),
            classifier,
            detector: Box::new(WhatlangDetector::new()),
        }
    }

    /// Replace the language detector.
    pub fn with_detector(mut self, detector: impl LanguageDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Replace the language profile registry.
    pub fn with_registry(mut self, registry: ModelRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Get the pipeline options.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Process every PDF in `input_dir`, writing results to `output_dir`.
    pub fn run(&self, input_dir: &Path, output_dir: &Path) -> Result<RunSummary> {
        self.run_with_progress(input_dir, output_dir, |_| {})
    }

    /// Like [`Pipeline::run`], reporting progress through `on_event`.
    pub fn run_with_progress<F>(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        mut on_event: F,
    ) -> Result<RunSummary>
    where
        F: FnMut(PipelineEvent<'_>),
    {
        let files = find_pdfs(input_dir)?;
        fs::create_dir_all(output_dir).map_err(|source| Error::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        log::info!("Found {} PDF files in {}", files.len(), input_dir.display());
        on_event(PipelineEvent::Started { total: files.len() });

        let mut summary = RunSummary::default();
        for path in files {
            let output = output_path(output_dir, &path);
            log::info!("Processing {} -> {}", path.display(), output.display());

            match self.process_to(&path, &output) {
                Ok(()) => {
                    on_event(PipelineEvent::FileDone {
                        path: &path,
                        output: &output,
                    });
                    summary.outputs.push(output);
                }
                Err(error) => {
                    log::error!("Failed to process {}: {}", path.display(), error);
                    on_event(PipelineEvent::FileFailed {
                        path: &path,
                        error: &error,
                    });
                    summary.failures.push(FileFailure {
                        path,
                        message: error.to_string(),
                    });
                }
            }
        }

        log::info!(
            "Completed: {} processed, {} failed",
            summary.processed(),
            summary.failed()
        );
        Ok(summary)
    }

    /// Extract the title, outline and language of one PDF.
    pub fn process_file(&self, path: &Path) -> Result<DocumentResult> {
        let header = sniff_path(path)?;
        log::debug!("{}: {}", path.display(), header);

        let spans = {
            let backend = LopdfBackend::load_file(path)?;
            if backend.is_encrypted() {
                log::debug!("{} is encrypted (PDF {})", path.display(), backend.version());
            }
            SpanExtractor::new(&backend, self.options.extract.clone()).extract()?
        };
        log::info!("Extracted {} spans from {}", spans.len(), path.display());
        log::debug!(
            "First spans: {:?}",
            spans.iter().take(5).map(|s| s.text.as_str()).collect::<Vec<_>>()
        );

        Ok(self.analyze(&spans))
    }

    /// Extract the title, outline and language of an in-memory PDF.
    pub fn process_bytes(&self, data: &[u8]) -> Result<DocumentResult> {
        sniff_bytes(data)?;
        let spans = {
            let backend = LopdfBackend::load_bytes(data)?;
            SpanExtractor::new(&backend, self.options.extract.clone()).extract()?
        };
        Ok(self.analyze(&spans))
    }

    /// Detect the language of extracted spans and classify them.
    pub fn analyze(&self, spans: &[TextSpan]) -> DocumentResult {
        let language = detect_or_fallback(
            self.detector.as_ref(),
            spans,
            self.options.sample_spans,
            &self.options.fallback_language,
        );
        log::info!("Detected language: {}", language);

        let model = self.registry.get(&language);
        self.classifier.classify(spans, &language, model)
    }

    fn process_to(&self, path: &Path, output: &Path) -> Result<()> {
        let result = self.process_file(path)?;
        let json = to_json(&result, self.options.json_format)?;
        fs::write(output, json)?;
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}

/// List the PDFs directly inside `dir`, sorted by file name.
pub fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InputNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `<output_dir>/<stem>.json` for an input file.
pub fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{}.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    struct FixedDetector(&'static str);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_output_path() {
        let out = output_path(Path::new("/out"), Path::new("/in/report.final.PDF"));
        assert_eq!(out, PathBuf::from("/out/report.final.json"));
    }

    #[test]
    fn test_find_pdfs_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["b.pdf", "a.PDF", "notes.txt", "c.pdf.bak"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let files = find_pdfs(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDF", "b.pdf"]);
    }

    #[test]
    fn test_missing_input_dir() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = Pipeline::default()
            .run(&missing, &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)));
        assert!(err.is_setup());
    }

    #[test]
    fn test_failed_files_are_recorded() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(input.path().join("empty.pdf"), b"").unwrap();
        fs::write(input.path().join("fake.pdf"), b"hello").unwrap();

        let mut events = Vec::new();
        let summary = Pipeline::default()
            .run_with_progress(input.path(), output.path(), |e| {
                events.push(match e {
                    PipelineEvent::Started { total } => format!("start {}", total),
                    PipelineEvent::FileDone { .. } => "done".to_string(),
                    PipelineEvent::FileFailed { .. } => "failed".to_string(),
                })
            })
            .unwrap();

        assert_eq!(summary.processed(), 0);
        assert_eq!(summary.failed(), 2);
        assert_eq!(events, vec!["start 2", "failed", "failed"]);
        assert!(fs::read_dir(output.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_analyze_without_text_uses_fallback() {
        let pipeline = Pipeline::new(PipelineOptions::new().with_fallback_language("es"));
        let result = pipeline.analyze(&[]);
        assert_eq!(result, DocumentResult::empty("es"));
    }

    #[test]
    fn test_custom_detector() {
        use crate::model::BoundingBox;

        let pipeline = Pipeline::default().with_detector(FixedDetector("ja"));
        let spans = vec![TextSpan::new(
            "概要",
            0,
            BoundingBox::new(0.0, 0.0, 20.0, 12.0),
            12.0,
            "MS-Mincho",
        )];
        let result = pipeline.analyze(&spans);
        assert_eq!(result.language, "ja");
        assert_eq!(result.title, "概要");
    }
}
