//! Description backfill: fill empty `description` fields before translation.
//!
//! The machine UI files carry optional `description` fields that give human
//! translators (and the translation context prompts) a hint about each
//! setting. Files sometimes ship with those fields empty; this pass fills
//! them from the surrounding structure so the later context pass sees a
//! complete document.

use futures::future::BoxFuture;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::cache::DescriptionCache;
use crate::config::Config;
use crate::keypath;
use crate::openai;

const DESCRIPTION_FIELD: &str = "description";

/// A description field counts as missing when it is present but carries no text
fn is_empty_description(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Return a structurally identical document with every empty `description`
/// field (immediate child of a mapping) replaced by generated text.
///
/// Generation is memoized by (file, parent key path); failures degrade to the
/// fixed fallback description inside [`openai::generate_missing_description`],
/// so this walk itself cannot fail.
pub fn backfill_descriptions<'a>(
    client: &'a Client,
    config: &'a Config,
    cache: &'a mut DescriptionCache,
    value: &'a Value,
    key_prefix: &'a str,
    file_name: &'a str,
) -> BoxFuture<'a, Value> {
    Box::pin(async move {
        match value {
            Value::Object(map) => {
                let mut filled = Map::new();
                for (key, child) in map {
                    if key == DESCRIPTION_FIELD && is_empty_description(child) {
                        let description = openai::generate_missing_description(
                            client,
                            config,
                            &mut *cache,
                            key_prefix,
                            map,
                            file_name,
                        )
                        .await;
                        filled.insert(key.clone(), Value::String(description));
                    } else {
                        let child_path = keypath::child(key_prefix, key);
                        let replaced = backfill_descriptions(
                            client,
                            config,
                            &mut *cache,
                            child,
                            &child_path,
                            file_name,
                        )
                        .await;
                        filled.insert(key.clone(), replaced);
                    }
                }
                Value::Object(filled)
            }
            Value::Array(items) => {
                let mut filled = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = keypath::element(key_prefix, index);
                    filled.push(
                        backfill_descriptions(
                            client,
                            config,
                            &mut *cache,
                            item,
                            &item_path,
                            file_name,
                        )
                        .await,
                    );
                }
                Value::Array(filled)
            }
            scalar => scalar.clone(),
        }
    })
}
