use approx::assert_abs_diff_eq;
use funcplot::sampler::plot::{sample_xs, split_into_segments};
use funcplot::*;

mod line {
  use super::*;

  #[test]
  fn resolution_plus_one_points() {
    let points =
      sample_line("sin(x)", FunctionType::Trigonometric, Range::default(), 200);
    assert_eq!(points.len(), 201);
    assert_eq!(points[0].x, -10.0);
    assert_abs_diff_eq!(points[200].x, 10.0, epsilon = 1e-12);
    assert!(points.iter().all(|p| p.value.is_some()));
  }

  #[test]
  fn non_finite_values_are_blanked() {
    let points =
      sample_line("1/x", FunctionType::Polynomial, Range::new(-1.0, 1.0), 2);
    let values: Vec<Option<f64>> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![Some(-1.0), None, Some(1.0)]);
  }

  #[test]
  fn invalid_expression_keeps_every_slot() {
    let points =
      sample_line("foo(x)", FunctionType::Polynomial, Range::default(), 50);
    assert_eq!(points.len(), 51);
    assert!(points.iter().all(|p| p.value.is_none()));
  }

  #[test]
  fn zero_resolution_is_one_point() {
    let xs: Vec<f64> = sample_xs(Range::new(2.0, 5.0), 0).collect();
    assert_eq!(xs, vec![2.0]);
  }

  #[test]
  fn reversed_range_walks_downwards() {
    let xs: Vec<f64> = sample_xs(Range::new(1.0, -1.0), 2).collect();
    assert_eq!(xs, vec![1.0, 0.0, -1.0]);
  }
}

mod multiple_functions {
  use super::*;

  #[test]
  fn broken_function_only_blanks_its_column() {
    let functions = vec![
      FunctionConfig::new("foo(x)", FunctionType::Polynomial).with_id("bad"),
      FunctionConfig::new("x^2", FunctionType::Polynomial).with_id("good"),
    ];
    let samples = sample_functions(&functions, Range::new(-2.0, 2.0), 4);
    assert_eq!(samples.series, vec!["bad", "good"]);
    assert_eq!(samples.points.len(), 5);
    for point in &samples.points {
      assert_eq!(point.values[0], None);
      assert_eq!(point.values[1], Some(point.x * point.x));
    }
  }

  #[test]
  fn hidden_and_surface_functions_are_skipped() {
    let functions = vec![
      FunctionConfig::new("x", FunctionType::Polynomial).with_id("a"),
      FunctionConfig::new("2*x", FunctionType::Polynomial)
        .with_id("b")
        .hidden(),
      FunctionConfig::new_3d("x + y").with_id("c"),
    ];
    let samples = sample_functions(&functions, Range::new(0.0, 1.0), 1);
    assert_eq!(samples.series, vec!["a"]);
    assert_eq!(samples.points[1].values, vec![Some(1.0)]);
  }

  #[test]
  fn series_points_extracts_a_column() {
    let functions = vec![
      FunctionConfig::new("x + 1", FunctionType::Polynomial).with_id("f1"),
      FunctionConfig::new("sqrt(x)", FunctionType::Polynomial).with_id("f2"),
    ];
    let samples = sample_functions(&functions, Range::new(-1.0, 1.0), 2);
    let column = samples.series_points("f2").unwrap();
    let values: Vec<Option<f64>> = column.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![None, Some(0.0), Some(1.0)]);
    assert!(samples.series_points("f3").is_none());
  }

  #[test]
  fn surface_variable_in_line_plot_is_blank() {
    let functions =
      vec![FunctionConfig::new("x + y", FunctionType::Polynomial).with_id("f")];
    let samples = sample_functions(&functions, Range::default(), 10);
    assert!(samples.points.iter().all(|p| p.values[0].is_none()));
  }
}

mod segments {
  use super::*;

  #[test]
  fn breaks_at_missing_values() {
    let points =
      sample_line("1/x", FunctionType::Polynomial, Range::new(-2.0, 2.0), 4);
    let segments = split_into_segments(&points);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0], vec![(-2.0, -0.5), (-1.0, -1.0)]);
    assert_eq!(segments[1], vec![(1.0, 1.0), (2.0, 0.5)]);
  }

  #[test]
  fn single_points_are_dropped() {
    let points = sample_line(
      "sqrt(x)",
      FunctionType::Polynomial,
      Range::new(-2.0, 0.0),
      2,
    );
    assert!(split_into_segments(&points).is_empty());
  }
}

mod surface {
  use super::*;

  fn settings(grid_size: usize) -> GraphSettings {
    GraphSettings {
      x_range: Range::new(-1.0, 1.0),
      y_range: Range::new(-1.0, 1.0),
      grid_size,
      ..GraphSettings::default()
    }
  }

  #[test]
  fn full_lattice() {
    let function = FunctionConfig::new_3d("x + y").with_id("plane");
    let s = settings(2);
    let surface = sample_surface(&function, s.x_range, s.y_range, s.grid_size);
    assert_eq!(surface.function_id, "plane");
    assert_eq!(surface.points.len(), 9);
    assert!(surface.is_dense());
    assert_eq!(surface.lattice_side(), Some(3));
    assert_eq!(
      surface.points[0],
      Point3D {
        x: -1.0,
        y: -1.0,
        z: -2.0
      }
    );
    assert_eq!(
      surface.points[8],
      Point3D {
        x: 1.0,
        y: 1.0,
        z: 2.0
      }
    );
  }

  #[test]
  fn x_major_order() {
    let function = FunctionConfig::new_3d("x*y");
    let s = settings(2);
    let surface = sample_surface(&function, s.x_range, s.y_range, s.grid_size);
    let coords: Vec<(f64, f64)> =
      surface.points.iter().map(|p| (p.x, p.y)).take(4).collect();
    assert_eq!(
      coords,
      vec![(-1.0, -1.0), (-1.0, 0.0), (-1.0, 1.0), (0.0, -1.0)]
    );
  }

  #[test]
  fn non_finite_nodes_are_dropped() {
    let function = FunctionConfig::new_3d("y/x");
    let s = settings(2);
    let surface = sample_surface(&function, s.x_range, s.y_range, s.grid_size);
    // the x = 0 column is gone
    assert_eq!(surface.points.len(), 6);
    assert!(surface.points.iter().all(|p| p.x != 0.0 && p.z.is_finite()));
    assert!(!surface.is_dense());
    assert_eq!(surface.lattice_side(), None);
  }

  #[test]
  fn invalid_expression_yields_no_points() {
    let function = FunctionConfig::new_3d("foo(x, y)");
    let s = settings(4);
    let surface = sample_surface(&function, s.x_range, s.y_range, s.grid_size);
    assert!(surface.points.is_empty());
    assert_eq!(surface.expected_len(), 25);
  }

  #[test]
  fn only_visible_surfaces_are_sampled() {
    let functions = vec![
      FunctionConfig::new_3d("x^2 + y^2").with_id("bowl"),
      FunctionConfig::new_3d("x - y").with_id("hidden").hidden(),
      FunctionConfig::new("x", FunctionType::Polynomial).with_id("line"),
    ];
    let surfaces = sample_surfaces(&functions, &settings(10));
    assert_eq!(surfaces.len(), 1);
    assert_eq!(surfaces[0].function_id, "bowl");
    assert_eq!(surfaces[0].points.len(), 121);
  }

  #[test]
  fn special_functions_on_a_surface() {
    let function = FunctionConfig::new_3d("besselJ0(sqrt(x^2 + y^2) * 2)");
    let surface = sample_surface(
      &function,
      Range::new(-10.0, 10.0),
      Range::new(-10.0, 10.0),
      10,
    );
    assert!(surface.is_dense());
    let center = surface
      .points
      .iter()
      .find(|p| p.x == 0.0 && p.y == 0.0)
      .unwrap();
    assert_eq!(center.z, 1.0);
  }
}

mod settings {
  use super::*;

  #[test]
  fn clamped_to_control_limits() {
    let s = GraphSettings {
      resolution: 5,
      grid_size: 1000,
      ..GraphSettings::default()
    }
    .clamped();
    assert_eq!(s.resolution, 50);
    assert_eq!(s.grid_size, 100);
  }

  #[test]
  fn function_config_json() {
    let json = r#"{"id":"f1","type":"bessel","expression":"besselJ0(x)"}"#;
    let config: FunctionConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.function_type, FunctionType::Bessel);
    assert!(config.visible);
    assert!(!config.is_3d);
    assert_eq!(config.dimension(), Dimension::TwoD);
  }
}
