use serde::Serialize;

use crate::config::{Dimension, FunctionConfig, GraphSettings, Range};
use crate::evaluator::{Bindings, Expression};
use crate::sampler::plot::prepare;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point3D {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// The lattice samples of one surface `z = f(x, y)`.
///
/// Nodes where `z` is not finite are left out entirely, so `points` may hold
/// fewer than `(grid_size + 1)^2` entries. Triangulation has to check
/// [`SurfaceSamples::is_dense`] before treating the points as a square grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceSamples {
  pub function_id: String,
  pub grid_size: usize,
  pub points: Vec<Point3D>,
}

impl SurfaceSamples {
  /// Number of lattice nodes had nothing been dropped.
  pub fn expected_len(&self) -> usize {
    (self.grid_size + 1) * (self.grid_size + 1)
  }

  pub fn is_dense(&self) -> bool {
    self.points.len() == self.expected_len()
  }

  /// Side length of the point square, when the emitted count is a perfect
  /// square. A ragged surface can still hit a square count by accident.
  pub fn lattice_side(&self) -> Option<usize> {
    let len = self.points.len();
    let side = (len as f64).sqrt().round() as usize;
    (side * side == len && side > 0).then_some(side)
  }
}

/// Walk the `(grid_size + 1) x (grid_size + 1)` lattice in x-major order,
/// keeping only finite values.
pub fn sample_lattice(
  expression: &Expression,
  x_range: Range,
  y_range: Range,
  grid_size: usize,
) -> Vec<Point3D> {
  let (x_step, y_step) = if grid_size == 0 {
    (0.0, 0.0)
  } else {
    (
      x_range.span() / grid_size as f64,
      y_range.span() / grid_size as f64,
    )
  };

  let mut points = Vec::with_capacity((grid_size + 1) * (grid_size + 1));
  for i in 0..=grid_size {
    let x = x_range.min + i as f64 * x_step;
    for j in 0..=grid_size {
      let y = y_range.min + j as f64 * y_step;
      if let Some(z) = expression.eval_or_none(&Bindings::xy(x, y)) {
        points.push(Point3D { x, y, z });
      }
    }
  }
  points
}

/// Sample one surface. An expression that does not parse or validate yields
/// no points.
pub fn sample_surface(
  function: &FunctionConfig,
  x_range: Range,
  y_range: Range,
  grid_size: usize,
) -> SurfaceSamples {
  let compiled = prepare(
    &function.expression,
    function.function_type,
    Dimension::ThreeD,
  );
  let points = match compiled {
    Some(compiled) => sample_lattice(&compiled, x_range, y_range, grid_size),
    None => Vec::new(),
  };

  let samples = SurfaceSamples {
    function_id: function.id.clone(),
    grid_size,
    points,
  };
  if !samples.is_dense() {
    log::debug!(
      "surface {} kept {} of {} lattice nodes",
      function.id,
      samples.points.len(),
      samples.expected_len()
    );
  }
  samples
}

/// Sample every visible 3D function with the ranges and grid of `settings`.
pub fn sample_surfaces(
  functions: &[FunctionConfig],
  settings: &GraphSettings,
) -> Vec<SurfaceSamples> {
  functions
    .iter()
    .filter(|f| f.visible && f.is_3d)
    .map(|f| {
      sample_surface(f, settings.x_range, settings.y_range, settings.grid_size)
    })
    .collect()
}
