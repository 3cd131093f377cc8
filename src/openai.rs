//! Azure OpenAI chat-completions client.
//!
//! Generates the two kinds of helper text this tool needs: a short
//! disambiguating context for every UI string before it is sent to DeepL, and
//! replacement text for empty `description` fields. Both generation paths are
//! memoized and degrade to fixed fallback strings on any service failure; an
//! error never escapes this module except from [`check_connection`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::cache::{ContextCache, ContextKey, DescriptionCache, DescriptionKey};
use crate::catalog;
use crate::config::Config;
use crate::error::ServiceError;
use crate::keypath;

const SERVICE: &str = "Azure OpenAI";

const CONTEXT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates precise UI translation contexts.";

const DESCRIPTION_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates concise UI descriptions.";

/// Substitute description when generation fails or no context exists
pub const FALLBACK_DESCRIPTION: &str = "Controls settings for the machine";

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

impl Message {
    fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user".to_string(),
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Generic context used when generation is skipped or returns nothing
pub fn fallback_context(key_path: &str) -> String {
    format!("Context for UI element: {}", key_path)
}

fn fallback_context_with_file(key_path: &str, file_name: &str) -> String {
    format!("Context for UI element: {} in {}", key_path, file_name)
}

/// Issue one chat-completion request and return the trimmed completion text
async fn request_completion(
    client: &Client,
    config: &Config,
    system_prompt: &str,
    user_prompt: String,
    temperature: f32,
) -> Result<String, ServiceError> {
    let request = ChatRequest {
        messages: vec![Message::system(system_prompt), Message::user(user_prompt)],
        temperature,
    };

    let response = client
        .post(config.chat_endpoint())
        .header("api-key", &config.azure_openai_api_key)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|e| ServiceError::transport(SERVICE, e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            service: SERVICE,
            status,
            body,
        });
    }

    let chat_response: ChatResponse = response
        .json()
        .await
        .map_err(|e| ServiceError::transport(SERVICE, e))?;

    chat_response
        .choices
        .first()
        .map(|c| c.message.content.trim().to_string())
        .ok_or(ServiceError::EmptyResponse {
            service: SERVICE,
            missing: "choices",
        })
}

/// Verify the service is reachable with a trivial request
pub async fn check_connection(client: &Client, config: &Config) -> Result<(), ServiceError> {
    request_completion(
        client,
        config,
        CONTEXT_SYSTEM_PROMPT,
        "Test connection to Azure OpenAI".to_string(),
        0.0,
    )
    .await
    .map(|_| ())
}

fn build_context_prompt(key_path: &str, original_text: &str, file_name: &str) -> String {
    let file_description = catalog::file_description(file_name);
    let hierarchy = keypath::breadcrumb(key_path);

    format!(
        "Generate a translation context for a UI string from a machine touchscreen interface.\n\
         File: '{}'\n\
         File Description: '{}'\n\
         Key path: '{}'\n\
         Key hierarchy: '{}'\n\
         Original text: '{}'\n\n\
         Guidelines: Provide a concise description indicating where and how the text is used, \
         its purpose, and any potential ambiguities. For example, if it is a button label, \
         mention that. For simple language name like 'Portuguese (Brazil)', indicate it's a \
         language selection option.\n\
         Now, generate the context.",
        file_name, file_description, key_path, hierarchy, original_text
    )
}

/// Generate (or recall) the translation context for one UI string.
///
/// Never fails: service errors are logged and replaced by a fallback context
/// naming the file, and very short or path-less strings skip the service
/// entirely. The result is cached under (file, key path, text), so repeated
/// calls with the same triple hit the service at most once.
pub async fn generate_context(
    client: &Client,
    config: &Config,
    cache: &mut ContextCache,
    key_path: &str,
    original_text: &str,
    file_name: &str,
) -> String {
    let key = ContextKey::new(file_name, key_path, original_text);
    if let Some(context) = cache.get(&key) {
        return context.to_string();
    }

    // Not worth a service call for very short texts or an empty path;
    // counted in characters so one-character symbols like "°" still qualify
    if key_path.is_empty() || original_text.trim().chars().count() < 2 {
        let context = fallback_context(key_path);
        cache.insert(key, context.clone());
        return context;
    }

    let prompt = build_context_prompt(key_path, original_text, file_name);
    let context = match request_completion(client, config, CONTEXT_SYSTEM_PROMPT, prompt, 0.0).await
    {
        Ok(completion) if !completion.is_empty() => completion,
        Ok(_) => fallback_context(key_path),
        Err(e) => {
            warn!("Error generating context for {}: {}", key_path, e);
            fallback_context_with_file(key_path, file_name)
        }
    };

    cache.insert(key, context.clone());
    context
}

fn build_description_prompt(key_path: &str, parent: &Map<String, Value>) -> String {
    let parent_key = keypath::last_segment(key_path);
    let name = parent
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(parent_key);

    let mut prompt = format!(
        "Generate a concise description for a missing field in a cleaning machine UI.\n\n\
         Field key path: {}\n\
         Field name: {}\n",
        key_path, name
    );

    if let Some(short_name) = parent.get("shortName").and_then(Value::as_str) {
        prompt.push_str(&format!("Short name: {}\n", short_name));
    }

    let siblings = sibling_descriptions(parent);
    if !siblings.is_empty() {
        prompt.push_str("\nRelated fields for context:\n");
        prompt.push_str(&siblings.join("\n"));
        prompt.push_str("\n\n");
    }

    prompt.push_str(&format!(
        "Based on this information, generate a brief, clear description for the '{}' setting \
         that explains what this control does on the cleaning machine. \
         Keep it concise (under 100 characters) and focused on user understanding.",
        parent_key
    ));

    prompt
}

/// Collect `"<name>: <description>"` lines from sibling mappings that already
/// carry a non-empty description
fn sibling_descriptions(parent: &Map<String, Value>) -> Vec<String> {
    parent
        .iter()
        .filter_map(|(key, value)| {
            let sibling = value.as_object()?;
            let description = sibling.get("description")?.as_str()?;
            if description.is_empty() {
                return None;
            }
            let name = sibling.get("name").and_then(Value::as_str).unwrap_or(key);
            Some(format!("{}: {}", name, description))
        })
        .collect()
}

/// Generate (or recall) replacement text for an empty `description` field.
///
/// `key_path` addresses the parent mapping that owns the field; `parent` is
/// that mapping, mined for `name`/`shortName` and sibling descriptions. Never
/// fails: the fixed fallback description covers both the empty-path
/// short-circuit and service errors.
pub async fn generate_missing_description(
    client: &Client,
    config: &Config,
    cache: &mut DescriptionCache,
    key_path: &str,
    parent: &Map<String, Value>,
    file_name: &str,
) -> String {
    let key = DescriptionKey::new(file_name, key_path);
    if let Some(description) = cache.get(&key) {
        return description.to_string();
    }

    if key_path.is_empty() {
        let description = FALLBACK_DESCRIPTION.to_string();
        cache.insert(key, description.clone());
        return description;
    }

    let prompt = build_description_prompt(key_path, parent);
    let description =
        match request_completion(client, config, DESCRIPTION_SYSTEM_PROMPT, prompt, 0.3).await {
            Ok(completion) if !completion.is_empty() => {
                debug!("Generated description for {}: {}", key_path, completion);
                completion
            }
            Ok(_) => FALLBACK_DESCRIPTION.to_string(),
            Err(e) => {
                warn!("Error generating description for {}: {}", key_path, e);
                FALLBACK_DESCRIPTION.to_string()
            }
        };

    cache.insert(key, description.clone());
    description
}
