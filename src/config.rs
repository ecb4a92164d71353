use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_RESOLUTION: usize = 200;
pub const MIN_RESOLUTION: usize = 50;
pub const MAX_RESOLUTION: usize = 500;

pub const DEFAULT_GRID_SIZE: usize = 30;
pub const MIN_GRID_SIZE: usize = 10;
pub const MAX_GRID_SIZE: usize = 100;

/// Category a function was entered under. Only `Exponential` changes how
/// the expression is rewritten; every category sees the full library.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FunctionType {
  #[default]
  Polynomial,
  Trigonometric,
  Exponential,
  Logarithmic,
  Special,
  Bessel,
  Error,
  Gamma,
  Hyperbolic,
}

impl FunctionType {
  pub const ALL: [FunctionType; 9] = [
    FunctionType::Polynomial,
    FunctionType::Trigonometric,
    FunctionType::Exponential,
    FunctionType::Logarithmic,
    FunctionType::Special,
    FunctionType::Bessel,
    FunctionType::Error,
    FunctionType::Gamma,
    FunctionType::Hyperbolic,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      FunctionType::Polynomial => "polynomial",
      FunctionType::Trigonometric => "trigonometric",
      FunctionType::Exponential => "exponential",
      FunctionType::Logarithmic => "logarithmic",
      FunctionType::Special => "special",
      FunctionType::Bessel => "bessel",
      FunctionType::Error => "error",
      FunctionType::Gamma => "gamma",
      FunctionType::Hyperbolic => "hyperbolic",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      FunctionType::Polynomial => "Polynomial",
      FunctionType::Trigonometric => "Trigonometric",
      FunctionType::Exponential => "Exponential",
      FunctionType::Logarithmic => "Logarithmic",
      FunctionType::Special => "Special",
      FunctionType::Bessel => "Bessel Functions",
      FunctionType::Error => "Error Functions",
      FunctionType::Gamma => "Gamma Functions",
      FunctionType::Hyperbolic => "Hyperbolic",
    }
  }
}

impl std::fmt::Display for FunctionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for FunctionType {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    FunctionType::ALL
      .into_iter()
      .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| format!("unknown function type: {s}"))
  }
}

/// Plot dimension: `y = f(x)` or `z = f(x, y)`.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  clap::ValueEnum,
)]
pub enum Dimension {
  #[default]
  #[serde(rename = "2d")]
  #[value(name = "2d")]
  TwoD,
  #[serde(rename = "3d")]
  #[value(name = "3d")]
  ThreeD,
}

impl Dimension {
  /// Variables an expression of this dimension may reference.
  pub fn variables(self) -> &'static [&'static str] {
    match self {
      Dimension::TwoD => &["x"],
      Dimension::ThreeD => &["x", "y"],
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Dimension::TwoD => "2d",
      Dimension::ThreeD => "3d",
    }
  }
}

impl std::fmt::Display for Dimension {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Closed interval `[min, max]`. The sampler does not enforce `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self {
    Range { min, max }
  }

  pub fn span(&self) -> f64 {
    self.max - self.min
  }

  pub fn is_valid(&self) -> bool {
    self.min.is_finite() && self.max.is_finite() && self.min <= self.max
  }
}

impl Default for Range {
  fn default() -> Self {
    Range::new(-10.0, 10.0)
  }
}

/// One user-defined function as the plot sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionConfig {
  pub id: String,
  #[serde(rename = "type")]
  pub function_type: FunctionType,
  pub expression: String,
  #[serde(default = "default_visible")]
  pub visible: bool,
  #[serde(default, rename = "is3D")]
  pub is_3d: bool,
}

fn default_visible() -> bool {
  true
}

impl FunctionConfig {
  pub fn new(
    expression: impl Into<String>,
    function_type: FunctionType,
  ) -> Self {
    FunctionConfig {
      id: Uuid::new_v4().to_string(),
      function_type,
      expression: expression.into(),
      visible: true,
      is_3d: false,
    }
  }

  pub fn new_3d(expression: impl Into<String>) -> Self {
    FunctionConfig {
      is_3d: true,
      ..FunctionConfig::new(expression, FunctionType::Special)
    }
  }

  pub fn with_id(mut self, id: impl Into<String>) -> Self {
    self.id = id.into();
    self
  }

  pub fn hidden(mut self) -> Self {
    self.visible = false;
    self
  }

  pub fn dimension(&self) -> Dimension {
    if self.is_3d {
      Dimension::ThreeD
    } else {
      Dimension::TwoD
    }
  }
}

/// View settings shared by the 2D and 3D samplers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSettings {
  pub x_range: Range,
  pub y_range: Range,
  pub z_range: Range,
  pub resolution: usize,
  pub grid_size: usize,
}

impl Default for GraphSettings {
  fn default() -> Self {
    GraphSettings {
      x_range: Range::default(),
      y_range: Range::default(),
      z_range: Range::default(),
      resolution: DEFAULT_RESOLUTION,
      grid_size: DEFAULT_GRID_SIZE,
    }
  }
}

impl GraphSettings {
  /// Pull resolution and grid size into the ranges the controls allow.
  pub fn clamped(self) -> Self {
    GraphSettings {
      resolution: self.resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
      grid_size: self.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE),
      ..self
    }
  }
}
