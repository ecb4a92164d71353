use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

pub mod catalog;
pub mod config;
pub mod evaluator;
pub mod functions;
pub mod generator;
pub mod sampler;
pub mod syntax;

pub use config::{
  Dimension, FunctionConfig, FunctionType, GraphSettings, Range,
};
pub use evaluator::{Bindings, Expression, evaluate, try_evaluate};
pub use sampler::plot::{
  LinePoint, PlotSamples, SamplePoint, sample_functions, sample_line,
};
pub use sampler::plot3d::{
  Point3D, SurfaceSamples, sample_surface, sample_surfaces,
};

#[derive(Parser)]
#[grammar = "expression.pest"]
pub struct ExpressionParser;

/// Everything that can stop an expression from producing a plottable number.
///
/// Callers that only care about plotting fold all of these into NaN via
/// [`evaluate`]; the variants exist for diagnostics and logging.
#[derive(Error, Debug)]
pub enum ExprError {
  #[error("Parse error: {0}")]
  ParseError(#[from] Box<pest::error::Error<Rule>>),
  #[error("Empty expression")]
  EmptyInput,
  #[error("Unknown identifier: {0}")]
  UnknownIdentifier(String),
  #[error("Unknown function: {0}")]
  UnknownFunction(String),
  #[error("{0} is a function and cannot be used as a value")]
  NotAValue(String),
  #[error("{0} is not a function")]
  NotCallable(String),
  #[error("{name} expects {expected} argument(s), got {got}")]
  ArityMismatch {
    name: String,
    expected: usize,
    got: usize,
  },
  #[error("Result is not a finite number: {0}")]
  NonFinite(f64),
  #[error("Malformed syntax tree: {0}")]
  Malformed(String),
}

impl ExpressionParser {
  pub fn parse_program(
    input: &str,
  ) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>>
  {
    Self::parse(Rule::Program, input).map_err(Box::new)
  }
}

/// Parse raw expression text (already rewritten, `**` for powers) into pest
/// pairs.
pub fn parse(
  input: &str,
) -> Result<pest::iterators::Pairs<'_, Rule>, Box<pest::error::Error<Rule>>> {
  ExpressionParser::parse_program(input)
}
