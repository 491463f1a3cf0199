use std::path::{Path, PathBuf};

use thiserror::Error;

use slipsort_core::{ReceiptRecord, RenameStatus};

use crate::classify::{self, EntityRecognizer, KeywordTable, NoopEntities};
use crate::normalize::NormalizedText;
use crate::recognizer::OcrBackend;
use crate::rename::{self, NameRegistry};
use crate::{amount, date};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Contract violation by the caller — the only fatal per-record
    /// condition. Missing dates, missing amounts, and OCR failures are
    /// all recovered inside the pipeline.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Runs the receipt-understanding pass for a batch:
/// normalize → {date, amount, category} → unique file name.
///
/// Name finalization mutates the batch registry, so records must be
/// produced one at a time in batch order; `process_batch` guarantees
/// that, and callers driving `process_lines` themselves get the same
/// determinism by holding one registry and feeding files in order.
pub struct ReceiptPipeline<R: OcrBackend, E: EntityRecognizer = NoopEntities> {
    recognizer: R,
    entities: E,
    keywords: KeywordTable,
}

impl<R: OcrBackend> ReceiptPipeline<R, NoopEntities> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            entities: NoopEntities,
            keywords: KeywordTable::default(),
        }
    }
}

impl<R: OcrBackend, E: EntityRecognizer> ReceiptPipeline<R, E> {
    /// Swap in an external entity recognizer as extra classification
    /// evidence.
    pub fn with_entities<E2: EntityRecognizer>(self, entities: E2) -> ReceiptPipeline<R, E2> {
        ReceiptPipeline {
            recognizer: self.recognizer,
            entities,
            keywords: self.keywords,
        }
    }

    /// Replace the built-in trigger table.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.keywords = keywords;
        self
    }

    /// Core pass over already-extracted text lines. This is the batch
    /// input surface: callers that run OCR elsewhere supply
    /// `(source, extension, lines)` and a batch registry.
    pub fn process_lines(
        &self,
        source: &Path,
        extension: &str,
        raw_lines: &[String],
        registry: &mut NameRegistry,
    ) -> ReceiptRecord {
        self.run(source, extension, raw_lines, false, registry)
    }

    /// Record a file whose text could not be extracted at all. The
    /// record still receives a batch-unique fallback name, flagged
    /// `SkippedNoData`.
    pub fn process_unreadable(
        &self,
        source: &Path,
        extension: &str,
        registry: &mut NameRegistry,
    ) -> ReceiptRecord {
        self.run(source, extension, &[], true, registry)
    }

    /// Read a file from disk, run the OCR backend, and process the
    /// result. Backend failure is recovered by substituting empty text.
    pub async fn process_file(
        &self,
        path: &Path,
        registry: &mut NameRegistry,
    ) -> Result<ReceiptRecord, PipelineError> {
        if path.as_os_str().is_empty() {
            return Err(PipelineError::InvalidInput("empty source path".to_string()));
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let bytes = tokio::fs::read(path).await?;
        match self.recognizer.extract_lines(&bytes) {
            Ok(lines) => Ok(self.run(path, &extension, &lines, false, registry)),
            Err(e) => {
                tracing::warn!("OCR failed for {}: {e}", path.display());
                Ok(self.process_unreadable(path, &extension, registry))
            }
        }
    }

    /// Process a whole batch sequentially with a fresh registry.
    /// Input order fixes the collision tie-break order, so the output
    /// names are deterministic for a given path list. A file that
    /// cannot be read is logged and skipped; it never aborts the batch.
    pub async fn process_batch(&self, paths: &[PathBuf]) -> Vec<ReceiptRecord> {
        let mut registry = NameRegistry::new();
        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            match self.process_file(path, &mut registry).await {
                Ok(record) => {
                    tracing::info!("{} -> {}", path.display(), record.new_name);
                    records.push(record);
                }
                Err(e) => tracing::warn!("Skipping {}: {e}", path.display()),
            }
        }
        records
    }

    fn run(
        &self,
        source: &Path,
        extension: &str,
        raw_lines: &[String],
        ocr_failed: bool,
        registry: &mut NameRegistry,
    ) -> ReceiptRecord {
        let text = NormalizedText::new(raw_lines);
        let date = date::extract_date(&text);
        let amount = amount::extract_amount(&text);
        let category = classify::classify_with(&self.keywords, &text, &self.entities);

        let base = rename::base_name(category, date, amount);
        let finalized = rename::finalize(&base, extension, registry);
        let status = if ocr_failed {
            RenameStatus::SkippedNoData
        } else {
            finalized.status
        };

        ReceiptRecord {
            source: source.to_path_buf(),
            category,
            date,
            amount,
            new_name: finalized.file_name,
            status,
        }
    }
}
