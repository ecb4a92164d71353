//! Boundary to an external text-generation service that turns a free-text
//! description into an expression.
//!
//! The sampler never depends on this module. A failed or slow request is not
//! fatal: [`generate_with_fallback`] always hands back a plottable expression,
//! plus a warning describing what went wrong.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::Dimension;
use crate::evaluator::strip_math_qualifier;

pub mod groq;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum GenerateError {
  #[error("Prompt is required")]
  EmptyPrompt,
  #[error("No API key configured")]
  MissingApiKey,
  #[error("request timed out after {0:?}")]
  Timeout(Duration),
  #[error("request failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("API error: {status} {body}")]
  Status { status: u16, body: String },
  #[error("Invalid API response structure: {0}")]
  InvalidResponse(String),
  #[error("service returned an empty expression")]
  EmptyExpression,
}

#[async_trait]
pub trait ExpressionGenerator: Send + Sync {
  /// One request to the service. Implementations return the raw text
  /// payload; cleanup happens in [`generate_with_fallback`].
  async fn generate(
    &self,
    prompt: &str,
    dimension: Dimension,
  ) -> Result<String, GenerateError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
  pub expression: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub warning: Option<String>,
}

pub fn fallback_expression(dimension: Dimension) -> &'static str {
  match dimension {
    Dimension::TwoD => "sin(x)",
    Dimension::ThreeD => "sin(x)*cos(y)",
  }
}

/// Ask `generator` once, bounded by `timeout`. No retries.
pub async fn generate_with_fallback(
  generator: &dyn ExpressionGenerator,
  prompt: &str,
  dimension: Dimension,
  timeout: Duration,
) -> Generated {
  match try_generate(generator, prompt, dimension, timeout).await {
    Ok(expression) => Generated {
      expression,
      warning: None,
    },
    Err(e) => {
      log::warn!("expression generation failed: {e}");
      Generated {
        expression: fallback_expression(dimension).to_string(),
        warning: Some(format!(
          "Could not generate function with AI: {e}. \
           Using fallback expression instead."
        )),
      }
    }
  }
}

async fn try_generate(
  generator: &dyn ExpressionGenerator,
  prompt: &str,
  dimension: Dimension,
  timeout: Duration,
) -> Result<String, GenerateError> {
  if prompt.trim().is_empty() {
    return Err(GenerateError::EmptyPrompt);
  }
  let raw = tokio::time::timeout(timeout, generator.generate(prompt, dimension))
    .await
    .map_err(|_| GenerateError::Timeout(timeout))??;
  let expression = clean_expression(&raw);
  if expression.is_empty() {
    return Err(GenerateError::EmptyExpression);
  }
  Ok(expression)
}

/// Strip markdown decoration and `Math.` qualifiers from a service reply.
pub fn clean_expression(raw: &str) -> String {
  let mut lines = Vec::new();
  for line in raw.trim().lines() {
    let trimmed = line.trim();
    // Fence lines, with or without a language tag
    if trimmed.starts_with("```") {
      let rest = trimmed.trim_start_matches('`');
      let rest = rest.trim_end_matches('`').trim();
      if rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        continue;
      }
      lines.push(rest.to_string());
      continue;
    }
    lines.push(line.to_string());
  }
  let joined = lines.join("\n");
  let trimmed = joined.trim().trim_matches('`').trim();
  strip_math_qualifier(trimmed)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_plain() {
    assert_eq!(clean_expression("  x^2 + 1 \n"), "x^2 + 1");
  }

  #[test]
  fn clean_inline_backticks() {
    assert_eq!(clean_expression("`sin(x)`"), "sin(x)");
  }

  #[test]
  fn clean_fenced_block() {
    assert_eq!(
      clean_expression("```javascript\nMath.sin(x) * Math.cos(y)\n```"),
      "sin(x) * cos(y)"
    );
  }

  #[test]
  fn clean_single_line_fence() {
    assert_eq!(clean_expression("```x*x + y*y```"), "x*x + y*y");
  }
}
