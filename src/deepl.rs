//! DeepL REST client: target-language discovery and single-string translation.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ServiceError;

const SERVICE: &str = "DeepL";

/// A target language published by the translation service
#[derive(Debug, Clone, Deserialize)]
pub struct TargetLanguage {
    /// Language code as published, e.g. "DE" or "PT-BR"
    pub language: String,
    pub name: String,
    #[serde(default)]
    pub supports_formality: bool,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    source_lang: &'a str,
    target_lang: &'a str,
    context: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    formality: Option<&'a str>,
    model_type: &'a str,
    preserve_formatting: bool,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

fn auth_header(config: &Config) -> String {
    format!("DeepL-Auth-Key {}", config.deepl_api_key)
}

/// Fetch the published target-language list.
///
/// Doubles as the connectivity check: the orchestrator calls this before any
/// file I/O and aborts the run if it fails.
pub async fn get_target_languages(
    client: &Client,
    config: &Config,
) -> Result<Vec<TargetLanguage>, ServiceError> {
    let response = client
        .get(format!("{}/v2/languages", config.deepl_api_url))
        .query(&[("type", "target")])
        .header("Authorization", auth_header(config))
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

    response
        .json()
        .await
        .map_err(|e| ServiceError::transport(SERVICE, e))
}

/// Translate one string from English into the target language.
///
/// `formality` must already be gated on the language's capability: pass
/// `None` for languages that do not support a formality register and the
/// parameter is omitted from the request entirely.
pub async fn translate_text(
    client: &Client,
    config: &Config,
    text: &str,
    target_lang: &str,
    context: &str,
    formality: Option<&str>,
) -> Result<String, ServiceError> {
    let request = TranslateRequest {
        text: [text],
        source_lang: "EN",
        target_lang,
        context,
        formality,
        model_type: &config.model_type,
        preserve_formatting: true,
    };

    let response = client
        .post(format!("{}/v2/translate", config.deepl_api_url))
        .header("Authorization", auth_header(config))
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

    let translate_response: TranslateResponse = response
        .json()
        .await
        .map_err(|e| ServiceError::transport(SERVICE, e))?;

    translate_response
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or(ServiceError::EmptyResponse {
            service: SERVICE,
            missing: "translations",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ==================== Test Helpers ====================

    fn create_test_config(api_url: &str) -> Config {
        Config {
            deepl_api_key: "test-deepl-key".to_string(),
            deepl_api_url: api_url.to_string(),
            azure_openai_endpoint: "http://unused.test".to_string(),
            azure_openai_api_key: "unused".to_string(),
            azure_api_version: "2024-08-01-preview".to_string(),
            azure_deployment: "gpt-4o".to_string(),
            default_formality: "more".to_string(),
            model_type: "prefer_quality_optimized".to_string(),
            working_dir: std::path::PathBuf::from("."),
        }
    }

    // ==================== Request Serialization ====================

    #[test]
    fn test_translate_request_with_formality() {
        let request = TranslateRequest {
            text: ["Start Cleaning"],
            source_lang: "EN",
            target_lang: "DE",
            context: "Button label on the start screen",
            formality: Some("more"),
            model_type: "prefer_quality_optimized",
            preserve_formatting: true,
        };

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(json.contains("\"formality\":\"more\""));
        assert!(json.contains("\"source_lang\":\"EN\""));
        assert!(json.contains("\"target_lang\":\"DE\""));
        assert!(json.contains("\"model_type\":\"prefer_quality_optimized\""));
        assert!(json.contains("\"preserve_formatting\":true"));
    }

    #[test]
    fn test_translate_request_omits_formality_when_unsupported() {
        let request = TranslateRequest {
            text: ["Start Cleaning"],
            source_lang: "EN",
            target_lang: "JA",
            context: "Button label",
            formality: None,
            model_type: "prefer_quality_optimized",
            preserve_formatting: true,
        };

        let json = serde_json::to_string(&request).expect("Should serialize");
        assert!(!json.contains("formality"));
    }

    // ==================== Language List ====================

    #[test]
    fn test_target_language_deserialization() {
        let json = r#"[
            {"language": "DE", "name": "German", "supports_formality": true},
            {"language": "JA", "name": "Japanese", "supports_formality": false},
            {"language": "PT-BR", "name": "Portuguese (Brazilian)", "supports_formality": true}
        ]"#;

        let languages: Vec<TargetLanguage> =
            serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(languages.len(), 3);
        assert_eq!(languages[0].language, "DE");
        assert!(languages[0].supports_formality);
        assert!(!languages[1].supports_formality);
        assert_eq!(languages[2].language, "PT-BR");
    }

    #[test]
    fn test_target_language_defaults_formality_to_false() {
        let language: TargetLanguage =
            serde_json::from_str(r#"{"language": "ZH", "name": "Chinese"}"#)
                .expect("Should deserialize");
        assert!(!language.supports_formality);
    }

    #[tokio::test]
    async fn test_get_target_languages_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/languages"))
            .and(query_param("type", "target"))
            .and(header("Authorization", "DeepL-Auth-Key test-deepl-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"language": "DE", "name": "German", "supports_formality": true},
                {"language": "JA", "name": "Japanese", "supports_formality": false}
            ])))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let languages = get_target_languages(&client, &config)
            .await
            .expect("Should succeed");
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].name, "German");
    }

    #[tokio::test]
    async fn test_get_target_languages_auth_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/languages"))
            .respond_with(ResponseTemplate::new(403).set_body_string("invalid auth key"))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let result = get_target_languages(&client, &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("403"));
    }

    // ==================== Translation ====================

    #[tokio::test]
    async fn test_translate_text_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .and(header("Authorization", "DeepL-Auth-Key test-deepl-key"))
            .and(body_partial_json(json!({
                "text": ["Start Cleaning"],
                "source_lang": "EN",
                "target_lang": "DE",
                "context": "Button label on the start screen",
                "formality": "more",
                "preserve_formatting": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "translations": [{"detected_source_language": "EN", "text": "Reinigung starten"}]
            })))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let translated = translate_text(
            &client,
            &config,
            "Start Cleaning",
            "DE",
            "Button label on the start screen",
            Some("more"),
        )
        .await
        .expect("Should succeed");

        assert_eq!(translated, "Reinigung starten");
    }

    #[tokio::test]
    async fn test_translate_text_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let result = translate_text(&client, &config, "Text", "DE", "ctx", None).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_translate_text_empty_translations() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"translations": []})),
            )
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri());
        let client = reqwest::Client::new();

        let result = translate_text(&client, &config, "Text", "DE", "ctx", None).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("translations"));
    }
}
