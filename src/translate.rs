//! The two document passes: context collection and recursive translation.
//!
//! Phase 1 walks every string leaf and populates the context cache; phase 2
//! walks the same document once per target language and replaces each
//! non-empty string leaf with its DeepL translation, reconstructing mappings
//! and sequences with identical key and index order.

use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::{ContextCache, ContextKey};
use crate::config::Config;
use crate::deepl::{self, TargetLanguage};
use crate::keypath;
use crate::openai;

/// Phase 1: generate and cache a context for every non-empty string leaf.
///
/// The return value of each generation call is discarded; the pass exists
/// purely to populate `cache` before the per-language translation sweeps.
pub fn collect_contexts<'a>(
    client: &'a Client,
    config: &'a Config,
    cache: &'a mut ContextCache,
    value: &'a Value,
    key_prefix: &'a str,
    file_name: &'a str,
) -> BoxFuture<'a, ()> {
    Box::pin(async move {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let child_path = keypath::child(key_prefix, key);
                    collect_contexts(client, config, &mut *cache, child, &child_path, file_name)
                        .await;
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let item_path = keypath::element(key_prefix, index);
                    collect_contexts(client, config, &mut *cache, item, &item_path, file_name)
                        .await;
                }
            }
            Value::String(text) if !text.trim().is_empty() => {
                openai::generate_context(client, config, cache, key_prefix, text, file_name).await;
            }
            _ => {}
        }
    })
}

/// Phase 2: translate every non-empty string leaf of the document.
///
/// Non-string scalars and empty strings pass through untouched. A failed
/// translation keeps the original text for that leaf and the walk continues;
/// the whole-document result is always produced.
pub fn translate_document<'a>(
    client: &'a Client,
    config: &'a Config,
    cache: &'a ContextCache,
    value: &'a Value,
    key_prefix: &'a str,
    file_name: &'a str,
    language: &'a TargetLanguage,
) -> BoxFuture<'a, Value> {
    Box::pin(async move {
        match value {
            Value::Object(map) => {
                let mut translated = Map::new();
                for (key, child) in map {
                    let child_path = keypath::child(key_prefix, key);
                    let result = translate_document(
                        client, config, cache, child, &child_path, file_name, language,
                    )
                    .await;
                    translated.insert(key.clone(), result);
                }
                Value::Object(translated)
            }
            Value::Array(items) => {
                let mut translated = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = keypath::element(key_prefix, index);
                    translated.push(
                        translate_document(
                            client, config, cache, item, &item_path, file_name, language,
                        )
                        .await,
                    );
                }
                Value::Array(translated)
            }
            Value::String(text) => {
                if text.trim().is_empty() {
                    return value.clone();
                }
                Value::String(
                    translate_leaf(client, config, cache, text, key_prefix, file_name, language)
                        .await,
                )
            }
            scalar => scalar.clone(),
        }
    })
}

async fn translate_leaf(
    client: &Client,
    config: &Config,
    cache: &ContextCache,
    text: &str,
    key_path: &str,
    file_name: &str,
    language: &TargetLanguage,
) -> String {
    // Phase 1 always runs first, so this lookup should hit; degrade to the
    // generic context rather than failing if it somehow does not
    let key = ContextKey::new(file_name, key_path, text);
    let context = cache
        .get(&key)
        .map(str::to_string)
        .unwrap_or_else(|| openai::fallback_context(key_path));

    debug!("Translating '{}' with context: '{}'", text, context);

    let formality = language
        .supports_formality
        .then_some(config.default_formality.as_str());

    match deepl::translate_text(client, config, text, &language.language, &context, formality).await
    {
        Ok(translated) => translated,
        Err(e) => {
            warn!(
                "Translation error at {} in {}: {}",
                key_path, file_name, e
            );
            text.to_string()
        }
    }
}
