use serde::Serialize;

use crate::config::{Dimension, FunctionConfig, FunctionType, Range};
use crate::evaluator::{Bindings, Expression};

/// One sample of a single 2D function. `value` is `None` where the function
/// cannot be plotted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
  pub x: f64,
  pub value: Option<f64>,
}

/// One row of a multi-function 2D plot: the values of every series at `x`,
/// in the same order as [`PlotSamples::series`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePoint {
  pub x: f64,
  pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSamples {
  /// Function ids, one per column of `values`.
  pub series: Vec<String>,
  pub points: Vec<SamplePoint>,
}

impl PlotSamples {
  /// The `(x, value)` column of one series.
  pub fn series_points(&self, id: &str) -> Option<Vec<LinePoint>> {
    let column = self.series.iter().position(|s| s == id)?;
    Some(
      self
        .points
        .iter()
        .map(|p| LinePoint {
          x: p.x,
          value: p.values[column],
        })
        .collect(),
    )
  }
}

/// The x coordinates of a 2D plot: `resolution + 1` points from `x.min` to
/// `x.max` inclusive. A resolution of zero yields just `x.min`.
pub fn sample_xs(
  x_range: Range,
  resolution: usize,
) -> impl Iterator<Item = f64> {
  let step = if resolution == 0 {
    0.0
  } else {
    x_range.span() / resolution as f64
  };
  (0..=resolution).map(move |i| x_range.min + i as f64 * step)
}

/// Sample a compiled expression over `x_range`.
pub fn sample_expression(
  expression: &Expression,
  x_range: Range,
  resolution: usize,
) -> Vec<LinePoint> {
  sample_xs(x_range, resolution)
    .map(|x| LinePoint {
      x,
      value: expression.eval_or_none(&Bindings::x(x)),
    })
    .collect()
}

/// Sample expression text over `x_range`. An expression that does not parse
/// or validate keeps every slot with a missing value.
pub fn sample_line(
  expression: &str,
  function_type: FunctionType,
  x_range: Range,
  resolution: usize,
) -> Vec<LinePoint> {
  match prepare(expression, function_type, Dimension::TwoD) {
    Some(compiled) => sample_expression(&compiled, x_range, resolution),
    None => sample_xs(x_range, resolution)
      .map(|x| LinePoint { x, value: None })
      .collect(),
  }
}

/// Sample every visible 2D function over a shared x grid.
///
/// Each function is compiled once and evaluated independently, so a broken
/// expression only blanks its own column.
pub fn sample_functions(
  functions: &[FunctionConfig],
  x_range: Range,
  resolution: usize,
) -> PlotSamples {
  let plotted: Vec<&FunctionConfig> =
    functions.iter().filter(|f| f.visible && !f.is_3d).collect();
  let compiled: Vec<Option<Expression>> = plotted
    .iter()
    .map(|f| prepare(&f.expression, f.function_type, Dimension::TwoD))
    .collect();

  let points = sample_xs(x_range, resolution)
    .map(|x| {
      let bindings = Bindings::x(x);
      SamplePoint {
        x,
        values: compiled
          .iter()
          .map(|expr| expr.as_ref().and_then(|e| e.eval_or_none(&bindings)))
          .collect(),
      }
    })
    .collect();

  PlotSamples {
    series: plotted.iter().map(|f| f.id.clone()).collect(),
    points,
  }
}

/// Compile and validate, logging why an expression will not plot.
pub(crate) fn prepare(
  expression: &str,
  function_type: FunctionType,
  dimension: Dimension,
) -> Option<Expression> {
  let compiled = Expression::compile(expression, function_type)
    .and_then(|e| e.validate(dimension).map(|()| e));
  match compiled {
    Ok(e) => {
      log::debug!("plotting {expression:?} as {}", e.ast());
      Some(e)
    }
    Err(err) => {
      log::debug!("{expression:?} cannot be plotted in {dimension}: {err}");
      None
    }
  }
}

/// Split points into contiguous finite runs, breaking at missing values.
/// Runs of a single point are dropped since they cannot form a line.
pub fn split_into_segments(points: &[LinePoint]) -> Vec<Vec<(f64, f64)>> {
  let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
  let mut current: Vec<(f64, f64)> = Vec::new();

  for point in points {
    match point.value {
      Some(y) => current.push((point.x, y)),
      None if current.len() > 1 => segments.push(std::mem::take(&mut current)),
      None => current.clear(),
    }
  }
  if current.len() > 1 {
    segments.push(current);
  }
  segments
}
