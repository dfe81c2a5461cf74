use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{CaltrackError, Result};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    model: String,
    temperature: f32,
    timeout_secs: u64,
}

/// Thin single-shot chat-completion client. Retry policy lives in
/// `CalorieEstimator`, not here.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig, api_key: &str) -> Result<Self> {
        let api_config = ApiConfig::from_llm_config(config);

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_key.to_string());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                CaltrackError::Llm(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // async-openai retries transient errors internally with exponential
        // backoff for up to 15 minutes by default. The estimator owns the
        // whole retry schedule, so give the internal machinery no time at all.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// One chat-completion request; no retries at this layer.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(CaltrackError::Validation(
                "Prompt cannot be empty".to_string(),
            ));
        }

        let request = self.build_request(prompt)?;

        match self.client.chat().create(request).await {
            Ok(response) => Self::extract_content(response),
            Err(error) => {
                if let Some(rate_limit_error) = Self::rate_limit_error(&error) {
                    return Err(rate_limit_error);
                }

                if let Some(auth_error) = Self::auth_error(&error) {
                    return Err(auth_error);
                }

                Err(Self::map_openai_error(error))
            }
        }
    }

    fn build_request(&self, prompt: &str) -> Result<CreateChatCompletionRequest> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|error| CaltrackError::Validation(format!("Invalid user prompt: {error}")))?
            .into()];

        CreateChatCompletionRequestArgs::default()
            .model(self.config.model.clone())
            .messages(messages)
            .temperature(self.config.temperature)
            .build()
            .map_err(|error| {
                CaltrackError::Validation(format!("Invalid completion request: {error}"))
            })
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CaltrackError::Llm("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(CaltrackError::Llm(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(message)
    }

    fn rate_limit_error(error: &OpenAIError) -> Option<CaltrackError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) =>
            {
                Some(CaltrackError::LlmRateLimit { retry_after: None })
            }
            OpenAIError::ApiError(api_error) if Self::is_rate_limit_api_error(api_error) => {
                Some(CaltrackError::LlmRateLimit { retry_after: None })
            }
            _ => None,
        }
    }

    fn auth_error(error: &OpenAIError) -> Option<CaltrackError> {
        match error {
            OpenAIError::Reqwest(reqwest_error)
                if reqwest_error.status() == Some(reqwest::StatusCode::UNAUTHORIZED)
                    || reqwest_error.status() == Some(reqwest::StatusCode::FORBIDDEN) =>
            {
                Some(CaltrackError::LlmAuth(format!(
                    "LLM authentication failed: {reqwest_error}"
                )))
            }
            OpenAIError::ApiError(api_error) if Self::is_auth_api_error(api_error) => Some(
                CaltrackError::LlmAuth(format!("LLM authentication failed: {api_error}")),
            ),
            _ => None,
        }
    }

    fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("rate limit")
            || message.contains("too many requests")
            || error_type.contains("rate_limit")
            || code.contains("rate_limit")
            || code == "insufficient_quota"
    }

    fn is_auth_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("unauthorized")
            || message.contains("forbidden")
            || message.contains("authentication")
            || message.contains("invalid api key")
            || code.contains("invalid_api_key")
            || code.contains("authentication")
            || error_type.contains("authentication")
    }

    fn map_openai_error(error: OpenAIError) -> CaltrackError {
        match error {
            OpenAIError::Reqwest(reqwest_error) if reqwest_error.status().is_none() => {
                CaltrackError::LlmConnection(format!(
                    "Could not reach the estimation endpoint: {reqwest_error}"
                ))
            }
            OpenAIError::Reqwest(reqwest_error) => {
                CaltrackError::Llm(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                CaltrackError::Llm(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                CaltrackError::Llm(format!("Failed to parse LLM response: {err}"))
            }
            OpenAIError::InvalidArgument(message) => CaltrackError::Validation(message),
            other => CaltrackError::Llm(other.to_string()),
        }
    }
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        let normalized_model = if provider.eq_ignore_ascii_case("local") {
            config.model.clone()
        } else {
            model.to_string()
        };

        Self {
            base_url,
            model: normalized_model,
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "openai" => OPENAI_BASE_URL,
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => "http://localhost:1234/v1",
        _ => OPENAI_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_llm_config() -> LlmConfig {
        LlmConfig {
            model: "openai/gpt-3.5-turbo".to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 30,
            max_retries: 3,
            retry_backoff_ms: 1000,
            temperature: 0.3,
        }
    }

    #[test]
    fn test_client_uses_provider_default_base_url() {
        let client =
            LlmApiClient::new(&test_llm_config(), "sk-test").expect("client should be created");
        assert_eq!(client.base_url(), OPENAI_BASE_URL);
    }

    #[test]
    fn test_explicit_base_url_wins() {
        let mut config = test_llm_config();
        config.base_url = Some("http://localhost:9999/v1".to_string());
        let client = LlmApiClient::new(&config, "sk-test").expect("client should be created");
        assert_eq!(client.base_url(), "http://localhost:9999/v1");
    }

    #[test]
    fn test_provider_prefix_is_stripped_from_model() {
        let client =
            LlmApiClient::new(&test_llm_config(), "sk-test").expect("client should be created");
        assert_eq!(client.config.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_local_model_name_kept_verbatim() {
        let mut config = test_llm_config();
        config.model = "my-finetune/v2".to_string();
        config.base_url = Some("http://localhost:8080/v1".to_string());
        let client = LlmApiClient::new(&config, "sk-test").expect("client should be created");
        assert_eq!(client.config.model, "my-finetune/v2");
    }

    #[test]
    fn test_build_request_sets_temperature() {
        let client =
            LlmApiClient::new(&test_llm_config(), "sk-test").expect("client should be created");
        let request = client
            .build_request("Estimate calories in: toast")
            .expect("request should build");
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn test_rate_limit_api_error_detection() {
        let api_error = ApiError {
            message: "Rate limit exceeded".to_string(),
            r#type: Some("rate_limit_exceeded".to_string()),
            param: None,
            code: Some("rate_limit_exceeded".to_string()),
        };
        assert!(LlmApiClient::is_rate_limit_api_error(&api_error));
    }

    #[test]
    fn test_auth_api_error_detection() {
        let api_error = ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("invalid_request_error".to_string()),
            param: None,
            code: Some("invalid_api_key".to_string()),
        };
        assert!(LlmApiClient::is_auth_api_error(&api_error));
        assert!(!LlmApiClient::is_rate_limit_api_error(&api_error));
    }
}
