use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ExpressionGenerator, GenerateError};
use crate::config::Dimension;

pub const DEFAULT_ENDPOINT: &str =
  "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Chat-completion client for an OpenAI-compatible endpoint.
pub struct GroqGenerator {
  client: reqwest::Client,
  endpoint: String,
  model: String,
  api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: [ChatMessage<'a>; 2],
  temperature: f64,
  max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role: &'a str,
  content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
  choices: Option<Vec<Choice>>,
}

#[derive(Deserialize)]
struct Choice {
  message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
  content: Option<String>,
}

impl GroqGenerator {
  pub fn new(api_key: Option<String>) -> Self {
    GroqGenerator {
      client: reqwest::Client::new(),
      endpoint: DEFAULT_ENDPOINT.to_string(),
      model: DEFAULT_MODEL.to_string(),
      api_key,
    }
  }

  /// Key taken from `GROQ_API_KEY`.
  pub fn from_env() -> Self {
    Self::new(std::env::var("GROQ_API_KEY").ok())
  }

  pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
    self.endpoint = endpoint.into();
    self
  }

  pub fn with_model(mut self, model: impl Into<String>) -> Self {
    self.model = model.into();
    self
  }
}

pub fn system_prompt(dimension: Dimension) -> &'static str {
  match dimension {
    Dimension::TwoD => {
      "You are a mathematical function generator. Given a description, \
       generate a mathematical expression for a 2D function y = f(x). \
       Only return the expression itself, nothing else. Use the operators \
       + - * / ^ and parentheses, the variable x, the constants PI and E, \
       and functions such as sin, cos, exp, log, sqrt, abs, besselJ0, erf, \
       gamma. For example, if asked for \"a sine wave\", return \"sin(x)\"."
    }
    Dimension::ThreeD => {
      "You are a mathematical function generator. Given a description, \
       generate a mathematical expression for a 3D function z = f(x, y). \
       Only return the expression itself, nothing else. Use the operators \
       + - * / ^ and parentheses, the variables x and y, the constants PI \
       and E, and functions such as sin, cos, exp, log, sqrt, abs, \
       besselJ0, erf, gamma. For example, if asked for \"a simple hill\", \
       return \"x*x + y*y\"."
    }
  }
}

/// Pull `choices[0].message.content` out of a response body.
pub fn extract_content(body: &str) -> Result<String, GenerateError> {
  let response: ChatResponse = serde_json::from_str(body)
    .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;
  response
    .choices
    .and_then(|choices| choices.into_iter().next())
    .and_then(|choice| choice.message)
    .and_then(|message| message.content)
    .map(|content| content.trim().to_string())
    .ok_or_else(|| {
      GenerateError::InvalidResponse(
        "missing choices[0].message.content".into(),
      )
    })
}

#[async_trait]
impl ExpressionGenerator for GroqGenerator {
  async fn generate(
    &self,
    prompt: &str,
    dimension: Dimension,
  ) -> Result<String, GenerateError> {
    let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingApiKey)?;
    let request = ChatRequest {
      model: &self.model,
      messages: [
        ChatMessage {
          role: "system",
          content: system_prompt(dimension),
        },
        ChatMessage {
          role: "user",
          content: prompt,
        },
      ],
      temperature: 0.7,
      max_tokens: 100,
    };

    log::debug!("requesting {dimension} expression from {}", self.endpoint);
    let response = self
      .client
      .post(&self.endpoint)
      .bearer_auth(api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(GenerateError::Status {
        status: status.as_u16(),
        body,
      });
    }
    extract_content(&body)
  }
}
