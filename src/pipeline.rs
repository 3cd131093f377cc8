//! Batch orchestrator: discover input files, preprocess them once, then run
//! one translation sweep per published target language.
//!
//! The run is strictly sequential. A connectivity failure before any file I/O
//! is fatal; a malformed input file or a failed output write is logged and
//! skipped; everything below that degrades per-string inside the passes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::backfill;
use crate::cache::{ContextCache, DescriptionCache};
use crate::catalog;
use crate::config::Config;
use crate::deepl;
use crate::openai;
use crate::translate;

/// Folder name for a target language: two-letter codes are lower-cased to
/// match common locale folder conventions, region-qualified codes stay as-is
pub fn language_folder_name(code: &str) -> String {
    if code.len() == 2 {
        code.to_lowercase()
    } else {
        code.to_string()
    }
}

/// List the `.json` files directly inside `dir`, sorted by name
pub fn discover_json_files(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list working directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }
    }
    files.sort();
    Ok(files)
}

fn write_document(path: &PathBuf, document: &Value) -> Result<()> {
    // Serialized fully in memory first so a failed write never leaves a
    // half-translated file behind on a later language sweep
    let pretty = serde_json::to_string_pretty(document)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, pretty).with_context(|| format!("Failed to write {}", path.display()))
}

/// Run the whole batch: connectivity check, preprocessing, one sweep per
/// target language.
pub async fn run(client: &Client, config: &Config) -> Result<()> {
    let files = discover_json_files(&config.working_dir)?;
    if files.is_empty() {
        info!("No JSON files found in {}", config.working_dir.display());
        return Ok(());
    }
    info!("Found {} JSON files to process", files.len());

    // Connectivity check: both services must answer before any file is touched
    openai::check_connection(client, config)
        .await
        .context("Azure OpenAI connectivity check failed")?;
    info!("Azure OpenAI connection successful");

    let languages = deepl::get_target_languages(client, config)
        .await
        .context("DeepL connectivity check failed")?;
    info!(
        "DeepL connection successful - retrieved {} target languages",
        languages.len()
    );

    // Phase 1: backfill descriptions and collect contexts, once per file
    info!("Phase 1: preprocessing files and generating contexts");
    let mut contexts = ContextCache::new();
    let mut descriptions = DescriptionCache::new();
    let mut preprocessed: Vec<(String, Value)> = Vec::new();

    for file_name in &files {
        let path = config.working_dir.join(file_name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error reading {}: {}", file_name, e);
                continue;
            }
        };
        let document: Value = match serde_json::from_str(&raw) {
            Ok(document) => document,
            Err(e) => {
                error!("Error parsing JSON in {}: {}", file_name, e);
                continue;
            }
        };

        let document = if catalog::needs_backfill(file_name) {
            info!("Backfilling missing descriptions in {}", file_name);
            backfill::backfill_descriptions(
                client,
                config,
                &mut descriptions,
                &document,
                "",
                file_name,
            )
            .await
        } else {
            document
        };

        info!("Generating contexts for all strings in {}", file_name);
        translate::collect_contexts(client, config, &mut contexts, &document, "", file_name).await;

        preprocessed.push((file_name.clone(), document));
    }
    info!("Generated contexts for {} unique strings", contexts.len());

    // Phase 2: one sweep per target language, sequentially
    info!("Phase 2: translating files for each target language");
    for language in &languages {
        info!(
            "Processing language: {} (formality supported: {})",
            language.language, language.supports_formality
        );

        let folder = config
            .working_dir
            .join(language_folder_name(&language.language));
        fs::create_dir_all(&folder)
            .with_context(|| format!("Failed to create output folder {}", folder.display()))?;

        for (file_name, document) in &preprocessed {
            let translated = translate::translate_document(
                client, config, &contexts, document, "", file_name, language,
            )
            .await;

            let output_path = folder.join(file_name);
            match write_document(&output_path, &translated) {
                Ok(()) => info!(
                    "Created translation for '{}' in folder '{}'",
                    file_name,
                    folder.display()
                ),
                Err(e) => error!(
                    "Error writing {} for {}: {}",
                    file_name, language.language, e
                ),
            }
        }
    }

    info!(
        "All translations complete. Used {} cached contexts across all languages",
        contexts.len()
    );
    Ok(())
}
