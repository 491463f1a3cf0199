use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;

use slipsort_core::ReceiptRecord;
use slipsort_ocr::{KeywordTable, MockRecognizer, NameRegistry, ReceiptPipeline};

#[derive(Debug, Parser)]
#[command(
    name = "slipsort",
    about = "Classify receipt images and rename them as \"Category - Date - $Amount\""
)]
pub struct Cli {
    /// Folder containing receipt images.
    pub dir: PathBuf,

    /// File extensions to process, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "jpg,jpeg,png,tiff,bmp")]
    pub ext: Vec<String>,

    /// TOML file overriding the built-in category trigger table.
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Folder of pre-extracted `<image stem>.txt` transcripts. Skips
    /// OCR entirely; required when built without the `tesseract`
    /// feature.
    #[arg(long)]
    pub transcripts: Option<PathBuf>,

    /// Apply the proposed renames on disk.
    #[arg(long)]
    pub apply: bool,

    /// Emit the batch result as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let files = collect_files(&cli.dir, &cli.ext)
        .with_context(|| format!("Failed to list {}", cli.dir.display()))?;
    if files.is_empty() {
        bail!(
            "No matching files in {} (extensions: {})",
            cli.dir.display(),
            cli.ext.join(", ")
        );
    }
    tracing::info!("Processing {} files from {}", files.len(), cli.dir.display());

    let keywords = match &cli.rules {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read rules file {}", path.display()))?;
            KeywordTable::from_toml(&content)?
        }
        None => KeywordTable::default(),
    };

    let records = if let Some(transcripts) = &cli.transcripts {
        process_transcripts(&files, transcripts, keywords)
    } else {
        process_images(&files, keywords).await?
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_report(&records);
    }

    if cli.apply {
        apply_renames(&records);
    }
    Ok(())
}

/// Transcript-driven batch: each image's text comes from a sidecar
/// `<stem>.txt` file. A missing or unreadable sidecar is treated like
/// an OCR failure for that one file.
fn process_transcripts(
    files: &[PathBuf],
    transcripts: &Path,
    keywords: KeywordTable,
) -> Vec<ReceiptRecord> {
    let pipeline = ReceiptPipeline::new(MockRecognizer::new("")).with_keywords(keywords);
    let mut registry = NameRegistry::new();
    let mut records = Vec::with_capacity(files.len());

    for file in files {
        let extension = extension_of(file);
        let sidecar = transcripts
            .join(file.file_stem().unwrap_or_default())
            .with_extension("txt");
        let record = match std::fs::read_to_string(&sidecar) {
            Ok(text) => {
                let lines: Vec<String> = text.lines().map(str::to_string).collect();
                pipeline.process_lines(file, &extension, &lines, &mut registry)
            }
            Err(e) => {
                tracing::warn!("No transcript for {}: {e}", file.display());
                pipeline.process_unreadable(file, &extension, &mut registry)
            }
        };
        records.push(record);
    }
    records
}

#[cfg(feature = "tesseract")]
async fn process_images(
    files: &[PathBuf],
    keywords: KeywordTable,
) -> anyhow::Result<Vec<ReceiptRecord>> {
    use slipsort_ocr::recognizer::tesseract_backend::TesseractRecognizer;

    let recognizer = TesseractRecognizer::new(None, "eng");
    let pipeline = ReceiptPipeline::new(recognizer).with_keywords(keywords);
    Ok(pipeline.process_batch(files).await)
}

#[cfg(not(feature = "tesseract"))]
async fn process_images(
    _files: &[PathBuf],
    _keywords: KeywordTable,
) -> anyhow::Result<Vec<ReceiptRecord>> {
    bail!(
        "This build has no OCR engine (the `tesseract` feature is off). \
         Pass --transcripts <dir> with pre-extracted text files."
    )
}

/// Matching files in the folder, sorted by name so the collision
/// tie-break order is stable across runs.
fn collect_files(dir: &Path, extensions: &[String]) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            let ext = extension_of(path);
            extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn print_report(records: &[ReceiptRecord]) {
    for record in records {
        let original = record
            .source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| record.source.display().to_string());
        println!(
            "{original} -> {} [{} | {} | {} | {}]",
            record.new_name,
            record.category,
            record.date_label(),
            record.amount_label(),
            record.status
        );
    }
    println!("{} receipts processed", records.len());
}

/// Perform the actual renames. The pipeline only guarantees uniqueness
/// within the batch; a pre-existing file outside the batch keeps its
/// place and the rename is skipped with a warning.
fn apply_renames(records: &[ReceiptRecord]) {
    let mut renamed = 0usize;
    for record in records {
        let parent = record.source.parent().unwrap_or_else(|| Path::new("."));
        let target = parent.join(&record.new_name);
        if target == record.source {
            continue;
        }
        if target.exists() {
            tracing::warn!(
                "Target already exists, not overwriting: {}",
                target.display()
            );
            continue;
        }
        match std::fs::rename(&record.source, &target) {
            Ok(()) => {
                tracing::info!("Renamed {} -> {}", record.source.display(), target.display());
                renamed += 1;
            }
            Err(e) => tracing::warn!("Failed to rename {}: {e}", record.source.display()),
        }
    }
    println!("{renamed} files renamed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use slipsort_core::{Category, RenameStatus};

    fn touch(path: &Path) {
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn collect_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.jpg"));
        touch(&dir.path().join("a.JPG"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("c.png"));

        let files = collect_files(dir.path(), &["jpg".to_string(), "png".to_string()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.jpg", "c.png"]);
    }

    #[test]
    fn transcripts_drive_classification_and_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let tdir = tempfile::tempdir().unwrap();

        for stem in ["r1", "r2"] {
            touch(&dir.path().join(format!("{stem}.jpg")));
            std::fs::write(
                tdir.path().join(format!("{stem}.txt")),
                "SHELL GAS STATION\nTotal $30.00",
            )
            .unwrap();
        }
        // No transcript for the third image.
        touch(&dir.path().join("r3.jpg"));

        let files = collect_files(dir.path(), &["jpg".to_string()]).unwrap();
        let records = process_transcripts(&files, tdir.path(), KeywordTable::default());

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].category, Category::Gas);
        assert_eq!(records[0].new_name, "Gas - Unknown Date - $30.00.jpg");
        assert_eq!(records[1].new_name, "Gas - Unknown Date - $30.00 (1).jpg");
        assert_eq!(records[1].status, RenameStatus::CollisionResolved);
        assert_eq!(records[2].status, RenameStatus::SkippedNoData);
        assert_eq!(records[2].new_name, "Other - Unknown Date - $0.00.jpg");
    }

    #[test]
    fn apply_renames_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.jpg");
        touch(&source);
        // Occupy the target name before the rename runs.
        let taken = dir.path().join("Other - Unknown Date - $0.00.jpg");
        touch(&taken);

        let records = vec![ReceiptRecord {
            source: source.clone(),
            category: Category::Other,
            date: None,
            amount: None,
            new_name: "Other - Unknown Date - $0.00.jpg".to_string(),
            status: RenameStatus::Renamed,
        }];
        apply_renames(&records);

        // Neither clobbered nor moved.
        assert!(source.exists());
        assert!(taken.exists());
    }

    #[test]
    fn apply_renames_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("scan.jpg");
        touch(&source);

        let records = vec![ReceiptRecord {
            source: source.clone(),
            category: Category::Gas,
            date: None,
            amount: None,
            new_name: "Gas - Unknown Date - $0.00.jpg".to_string(),
            status: RenameStatus::Renamed,
        }];
        apply_renames(&records);

        assert!(!source.exists());
        assert!(dir.path().join("Gas - Unknown Date - $0.00.jpg").exists());
    }
}
