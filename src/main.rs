use std::time::Duration;

use clap::{Parser, Subcommand};
use funcplot::catalog::{SURFACE_PRESETS, examples};
use funcplot::config::{FunctionConfig, FunctionType, GraphSettings, Range};
use funcplot::functions::library;
use funcplot::generator::groq::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GroqGenerator};
use funcplot::generator::generate_with_fallback;
use funcplot::{
  Bindings, Dimension, ExprError, Expression, sample_functions,
  sample_surfaces,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Log debug output (overrides RUST_LOG)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Evaluate an expression at a single point
  Eval {
    /// The expression to evaluate, e.g. "besselJ0(x) * x^2"
    expression: String,
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    x: f64,
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f64>,
    #[arg(
      long = "type",
      value_enum,
      default_value_t = FunctionType::Polynomial
    )]
    function_type: FunctionType,
  },
  /// Sample y = f(x) for one or more expressions and print JSON
  Plot {
    #[arg(required = true)]
    expressions: Vec<String>,
    #[arg(long, allow_hyphen_values = true, default_value_t = -10.0)]
    x_min: f64,
    #[arg(long, allow_hyphen_values = true, default_value_t = 10.0)]
    x_max: f64,
    #[arg(long, default_value_t = funcplot::config::DEFAULT_RESOLUTION)]
    resolution: usize,
    #[arg(
      long = "type",
      value_enum,
      default_value_t = FunctionType::Polynomial
    )]
    function_type: FunctionType,
  },
  /// Sample z = f(x, y) on a lattice for one or more expressions and print JSON
  Surface {
    #[arg(required = true)]
    expressions: Vec<String>,
    #[arg(long, allow_hyphen_values = true, default_value_t = -10.0)]
    x_min: f64,
    #[arg(long, allow_hyphen_values = true, default_value_t = 10.0)]
    x_max: f64,
    #[arg(long, allow_hyphen_values = true, default_value_t = -10.0)]
    y_min: f64,
    #[arg(long, allow_hyphen_values = true, default_value_t = 10.0)]
    y_max: f64,
    #[arg(long, default_value_t = funcplot::config::DEFAULT_GRID_SIZE)]
    grid_size: usize,
  },
  /// Ask a text-generation service for an expression matching a description
  Generate {
    prompt: String,
    #[arg(long, value_enum, default_value_t = Dimension::TwoD)]
    dimension: Dimension,
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
    #[arg(
      long,
      env = "FUNCPLOT_GENERATOR_ENDPOINT",
      default_value = DEFAULT_ENDPOINT
    )]
    endpoint: String,
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,
  },
  /// List the callable functions
  Functions,
  /// Show example expressions
  Examples,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  match cli.command {
    Commands::Eval {
      expression,
      x,
      y,
      function_type,
    } => {
      let bindings = match y {
        Some(y) => Bindings::xy(x, y),
        None => Bindings::x(x),
      };
      match eval_once(&expression, function_type, &bindings) {
        Ok(result) => println!("{result}"),
        Err(e) => {
          log::warn!("{e}");
          println!("NaN");
        }
      }
    }
    Commands::Plot {
      expressions,
      x_min,
      x_max,
      resolution,
      function_type,
    } => {
      let settings = GraphSettings {
        x_range: Range::new(x_min, x_max),
        resolution,
        ..GraphSettings::default()
      }
      .clamped();
      warn_if_inverted("x", settings.x_range);
      let functions: Vec<FunctionConfig> = expressions
        .iter()
        .enumerate()
        .map(|(i, e)| {
          FunctionConfig::new(e.as_str(), function_type)
            .with_id(format!("f{}", i + 1))
        })
        .collect();
      let samples =
        sample_functions(&functions, settings.x_range, settings.resolution);
      println!("{}", serde_json::to_string_pretty(&samples)?);
    }
    Commands::Surface {
      expressions,
      x_min,
      x_max,
      y_min,
      y_max,
      grid_size,
    } => {
      let settings = GraphSettings {
        x_range: Range::new(x_min, x_max),
        y_range: Range::new(y_min, y_max),
        grid_size,
        ..GraphSettings::default()
      }
      .clamped();
      warn_if_inverted("x", settings.x_range);
      warn_if_inverted("y", settings.y_range);
      let functions: Vec<FunctionConfig> = expressions
        .iter()
        .enumerate()
        .map(|(i, e)| {
          FunctionConfig::new_3d(e.as_str()).with_id(format!("f{}", i + 1))
        })
        .collect();
      let surfaces = sample_surfaces(&functions, &settings);
      for surface in surfaces.iter().filter(|s| !s.is_dense()) {
        log::warn!(
          "{}: {} of {} lattice points are not finite and were dropped",
          surface.function_id,
          surface.expected_len() - surface.points.len(),
          surface.expected_len()
        );
      }
      println!("{}", serde_json::to_string_pretty(&surfaces)?);
    }
    Commands::Generate {
      prompt,
      dimension,
      model,
      endpoint,
      api_key,
      timeout_secs,
    } => {
      let generator = GroqGenerator::new(api_key)
        .with_endpoint(endpoint)
        .with_model(model);
      let generated = generate_with_fallback(
        &generator,
        &prompt,
        dimension,
        Duration::from_secs(timeout_secs),
      )
      .await;
      if let Some(warning) = &generated.warning {
        eprintln!("Warning: {warning}");
      }
      println!("{}", generated.expression);
    }
    Commands::Functions => {
      let library = library();
      for name in library.names() {
        println!("{name:<10} {}", library.describe(name).unwrap_or_default());
      }
    }
    Commands::Examples => {
      for function_type in FunctionType::ALL {
        println!(
          "{}: {}",
          function_type.label(),
          examples(function_type).join(", ")
        );
      }
      println!("3D surfaces:");
      for (label, expression) in SURFACE_PRESETS {
        println!("  {label}: {expression}");
      }
    }
  }

  Ok(())
}

fn init_logging(verbose: bool) {
  let mut builder = env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("warn"),
  );
  if verbose {
    builder.filter_level(log::LevelFilter::Debug);
  }
  builder.init();
}

fn warn_if_inverted(axis: &str, range: Range) {
  if !range.is_valid() {
    log::warn!(
      "{axis} range [{}, {}] is empty or not finite",
      range.min,
      range.max
    );
  }
}

fn eval_once(
  expression: &str,
  function_type: FunctionType,
  bindings: &Bindings,
) -> Result<f64, ExprError> {
  let compiled = Expression::compile(expression, function_type)?;
  log::debug!("parsed {expression:?} as {}", compiled.ast());
  compiled.eval(bindings)
}
