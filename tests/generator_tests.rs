use linefield::LineError;
use linefield::config::{ParamUpdate, ShapeParams};
use linefield::generator::LineFieldGenerator;
use linefield::grid::GridSpace;
use linefield::lines::LineSet;
use linefield::rng::{Rng, SequenceJitter};

fn params(line_length: i32, line_gap: i32, row_density: i32, column_density: i32) -> ShapeParams {
    ShapeParams {
        line_length,
        line_gap,
        row_density,
        column_density,
    }
}

/// Split a line set into per-row runs of along-axis pairs, keyed by index.
fn rows(set: &LineSet) -> Vec<(u32, Vec<[u32; 2]>)> {
    let mut out: Vec<(u32, Vec<[u32; 2]>)> = Vec::new();
    for (along, orth) in set.along.iter().zip(&set.orth) {
        match out.last_mut() {
            Some((idx, run)) if *idx == orth[0] => run.push(*along),
            _ => out.push((orth[0], vec![*along])),
        }
    }
    out
}

#[test]
fn test_demo_parameters() {
    let g = LineFieldGenerator::create(params(250, 50, 80, 80), Rng::new(42)).unwrap();
    assert_eq!(g.row_step(), 20);
    assert_eq!(g.column_step(), 20);

    for set in [g.horizontal_lines(), g.vertical_lines()] {
        let expected: Vec<u32> = (0..3000).step_by(20).collect();
        assert_eq!(set.indices, expected);
        assert_eq!(set.along.len(), set.orth.len());
        assert!(set.segments().all(|s| s.length() == 250));

        for (index, run) in rows(set) {
            assert_eq!(index % 20, 0);
            assert!(run.len() <= 10);
            assert!(run[0][0] < 300, "first start must come from the jitter range");
            for pair in &run {
                assert_eq!(pair[1] - pair[0], 250);
                assert!(pair[1] < 3000);
            }
            for w in run.windows(2) {
                assert_eq!(w[1][0] - w[0][0], 300);
            }
        }
    }
}

#[test]
fn test_golden_output_without_jitter() {
    let g = LineFieldGenerator::create(params(250, 50, 80, 80), SequenceJitter::zero()).unwrap();
    let h = g.horizontal_lines();
    assert_eq!(h.len(), 150 * 10);
    assert_eq!(h.xs()[0], [0, 250]);
    assert_eq!(h.ys()[0], [0, 0]);
    assert_eq!(h.xs()[10], [0, 250]);
    assert_eq!(h.ys()[10], [20, 20]);

    let v = g.vertical_lines();
    assert_eq!(v.xs()[0], [0, 0]);
    assert_eq!(v.ys()[9], [2700, 2950]);
}

#[test]
fn test_same_seed_is_idempotent() {
    let p = params(120, 40, 60, 30);
    let a = LineFieldGenerator::create(p, Rng::new(7)).unwrap();
    let b = LineFieldGenerator::create(p, Rng::new(7)).unwrap();
    assert_eq!(a.horizontal_lines(), b.horizontal_lines());
    assert_eq!(a.vertical_lines(), b.vertical_lines());

    let mut c = LineFieldGenerator::create(p, Rng::new(1)).unwrap();
    c.set_rng(Rng::new(7));
    c.regenerate(&ParamUpdate::from(p)).unwrap();
    assert_eq!(c.horizontal_lines(), a.horizontal_lines());
    assert_eq!(c.vertical_lines(), a.vertical_lines());
}

#[test]
fn test_row_density_is_monotonic() {
    let mut prev = 0;
    for density in 0..=90 {
        let g = LineFieldGenerator::create(params(250, 50, density, 0), Rng::new(3)).unwrap();
        assert_eq!(g.row_step(), (100 - density) as usize);
        let n = g.horizontal_lines().indices.len();
        assert!(n >= prev, "density {density}: {n} rows < {prev}");
        prev = n;
    }
    assert_eq!(prev, 300);
}

#[test]
fn test_zero_length_lines() {
    let g = LineFieldGenerator::create(params(0, 1, 0, 0), Rng::new(9)).unwrap();
    let h = g.horizontal_lines();
    assert_eq!(h.indices.len(), 30);
    assert_eq!(h.len(), 30 * 3000);
    assert!(h.along.iter().all(|p| p[0] == p[1]));
}

#[test]
fn test_zero_length_and_gap_rejected() {
    let err = LineFieldGenerator::create(params(0, 0, 80, 80), Rng::new(1)).err();
    assert!(matches!(err, Some(LineError::Configuration { .. })));
}

#[test]
fn test_density_out_of_range_rejected() {
    let err = LineFieldGenerator::create(params(10, 10, 80, 91), Rng::new(1)).err();
    assert!(matches!(
        err,
        Some(LineError::Range {
            name: "column_density",
            ..
        })
    ));
}

#[test]
fn test_zero_gap_update_keeps_previous_gap() {
    let mut g = LineFieldGenerator::create(params(250, 50, 80, 80), Rng::new(1)).unwrap();
    g.regenerate(&ParamUpdate {
        line_gap: Some(0),
        ..ParamUpdate::default()
    })
    .unwrap();
    assert_eq!(g.params().line_gap, 50);
    assert!(g.horizontal_lines().along.iter().all(|p| p[1] - p[0] == 250));
}

#[test]
fn test_update_regenerates_both_sets() {
    let mut g = LineFieldGenerator::create(params(250, 50, 80, 80), Rng::new(1)).unwrap();
    g.regenerate(&ParamUpdate {
        line_length: Some(100),
        column_density: Some(50),
        ..ParamUpdate::default()
    })
    .unwrap();
    assert_eq!(g.params(), params(100, 50, 80, 50));
    assert!(g.horizontal_lines().along.iter().all(|p| p[1] - p[0] == 100));
    assert!(g.vertical_lines().along.iter().all(|p| p[1] - p[0] == 100));
    assert_eq!(g.vertical_lines().indices.len(), 60);
}

#[test]
fn test_rejected_update_keeps_lines() {
    let mut g = LineFieldGenerator::create(params(250, 50, 80, 80), Rng::new(1)).unwrap();
    let before = g.vertical_lines().clone();
    assert!(g
        .regenerate(&ParamUpdate {
            line_length: Some(-10),
            ..ParamUpdate::default()
        })
        .is_err());
    assert_eq!(g.vertical_lines(), &before);
    assert_eq!(g.params().line_length, 250);
}

#[test]
fn test_params_file_roundtrip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("params.json");
    std::fs::write(&path, r#"{"line_length": 120, "row_density": 40}"#).unwrap();
    let p = ShapeParams::load(&path).unwrap();
    assert_eq!(p, params(120, 50, 40, 80));
}

#[test]
fn test_params_file_validation() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("params.json");
    std::fs::write(&path, r#"{"line_length": 0, "line_gap": 0}"#).unwrap();
    let err = ShapeParams::load(&path).err();
    assert!(matches!(err, Some(LineError::Configuration { .. })));
}

#[test]
fn test_params_file_missing() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = ShapeParams::load(&dir.path().join("absent.json")).err();
    assert!(matches!(err, Some(LineError::Io(_))));
}

#[test]
fn test_custom_space_and_resolution_bound() {
    let space = GridSpace::new(100).unwrap();
    let g = LineFieldGenerator::with_space(space, params(25, 5, 80, 80), SequenceJitter::zero())
        .unwrap();
    let h = g.horizontal_lines();
    assert_eq!(h.indices.len(), 15);
    assert_eq!(*h.xs().last().unwrap(), [270, 295]);

    let err = GridSpace::new(GridSpace::MAX_RESOLUTION + 1).err();
    assert!(matches!(err, Some(LineError::Range { .. })));
}
