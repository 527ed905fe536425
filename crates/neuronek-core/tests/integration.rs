//! Integration tests for neuronek-core.
//!
//! These tests drive the full frame pipeline:
//! substance table → dose log → decay model → rasterizer → canvas → legend.

use std::time::{Duration, SystemTime};

use neuronek_core::{
    ChartLayout, DecayModel, DecayParams, DoseLog, Frame, Gutters, Layer, Mark, PointAttributor,
    RenderConfig, SubstanceTable, TimeAxis, attribute, render,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const HOUR: Duration = Duration::from_secs(3600);

fn now() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_750_000_000)
}

/// Random doses of random builtin substances over the last 30 hours.
fn random_log(table: &SubstanceTable, rng: &mut StdRng, count: usize) -> DoseLog {
    let mut offsets: Vec<u64> = (0..count).map(|_| rng.random_range(0..30 * 3600)).collect();
    // insertion order is chronological, oldest first
    offsets.sort_unstable_by(|a, b| b.cmp(a));

    let mut log = DoseLog::new();
    for ago in offsets {
        let id = table.ids().nth(rng.random_range(0..table.len())).unwrap();
        let amount = rng.random_range(1.0..600.0);
        log.record(table, id, amount, now() - Duration::from_secs(ago))
            .unwrap();
    }
    log
}

#[test]
fn single_dose_halves_after_one_half_life() {
    let table = SubstanceTable::builtin();
    let params = DecayParams::default();
    for (id, substance) in table.iter() {
        for amount in [20.0, 150.0, 300.0, 1000.0] {
            let at = now() - 30 * HOUR;
            let mut log = DoseLog::new();
            log.record(&table, id, amount, at).unwrap();
            let model = DecayModel::new(&table, log.events(), params);

            let v = model.intensity(id, at + substance.half_life());
            let expected = (amount / 2.0 / params.reference_dose).clamp(0.0, 1.0);
            assert!(
                (v - expected).abs() < 1e-9,
                "{} {amount}: {v} != {expected}",
                substance.name()
            );
            assert_eq!(model.intensity(id, at - Duration::from_secs(1)), 0.0);
        }
    }
}

#[test]
fn intensity_never_increases_between_doses() {
    let table = SubstanceTable::builtin();
    let mut rng = StdRng::seed_from_u64(11);
    let log = random_log(&table, &mut rng, 12);
    let model = DecayModel::new(&table, log.events(), DecayParams::default());

    for id in table.ids() {
        let dose_times: Vec<SystemTime> = log
            .events()
            .iter()
            .filter(|e| e.substance() == id)
            .map(|e| e.at())
            .collect();
        for pair in dose_times.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let span = to.duration_since(from).unwrap();
            let mut prev = f64::INFINITY;
            for k in 1..=50u32 {
                let t = from + span.mul_f64(k as f64 / 51.0);
                let v = model.intensity(id, t);
                assert!(v <= prev + 1e-12, "{id:?} rose from {prev} to {v}");
                prev = v;
            }
        }
    }
}

#[test]
fn aggregate_always_in_unit_interval() {
    let table = SubstanceTable::builtin();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let log = random_log(&table, &mut rng, 25);
        let model = DecayModel::new(&table, log.events(), DecayParams::default());
        for id in table.ids() {
            for _ in 0..40 {
                let t = now() - Duration::from_secs(rng.random_range(0..36 * 3600));
                let v = model.intensity(id, t);
                assert!((0.0..=1.0).contains(&v), "{v}");
            }
        }
    }
}

#[test]
fn caffeine_scenario() {
    let table = SubstanceTable::builtin();
    let caffeine = table.find_by_name("Caffeine").unwrap();
    let mut log = DoseLog::new();
    log.record(&table, caffeine, 200.0, now() - 2 * HOUR).unwrap();

    let model = DecayModel::new(&table, log.events(), DecayParams::default());
    let first = model.intensity(caffeine, now());
    assert!((first - 0.758).abs() < 1e-3, "{first}");

    log.record(&table, caffeine, 200.0, now() - HOUR).unwrap();
    let model = DecayModel::new(&table, log.events(), DecayParams::default());
    let second = 0.5f64.powf(1.0 / 5.0);
    assert_eq!(model.intensity(caffeine, now()), (first + second).min(1.0));
}

#[test]
fn rasterized_cells_stay_in_bounds() {
    let table = SubstanceTable::builtin();
    let mut rng = StdRng::seed_from_u64(3);
    let config = RenderConfig::default();
    for _ in 0..15 {
        let log = random_log(&table, &mut rng, 10);
        let width = rng.random_range(12..120);
        let height = rng.random_range(6..40);
        let rendering = render(&table, log.events(), width, height, now(), &config);
        let canvas = rendering.frame.canvas().expect("size above minimum");
        let layout = canvas.layout();
        for (row, column, _) in canvas.lit_cells() {
            assert!(row < layout.plot_rows());
            assert!(layout.data_columns().contains(&column));
        }
    }
}

#[test]
fn stored_tags_agree_with_recomputed_owner() {
    let table = SubstanceTable::builtin();
    let mut rng = StdRng::seed_from_u64(99);
    let config = RenderConfig::default();
    for _ in 0..10 {
        let log = random_log(&table, &mut rng, 16);
        let rendering = render(&table, log.events(), 70, 18, now(), &config);
        let canvas = rendering.frame.canvas().unwrap();

        let model = DecayModel::new(&table, log.events(), config.decay);
        let axis = TimeAxis::new(now(), config.window);
        let attributor = PointAttributor::new(&model, canvas.layout(), &axis);

        for (row, column, cell) in canvas.lit_cells() {
            assert_eq!(attribute(canvas, row, column), cell.owner);
            if cell.layer == Layer::Curve(Mark::Point) {
                assert_eq!(
                    attributor.derive_owner(row, column),
                    cell.owner,
                    "cell ({row}, {column})"
                );
            }
        }
    }
}

#[test]
fn overlapping_curves_last_declared_wins() {
    let table = SubstanceTable::builtin();
    let mut log = DoseLog::new();
    // identical doses 30s ago: all four curves share the top-right cell
    for id in table.ids() {
        log.record(&table, id, 400.0, now() - Duration::from_secs(30))
            .unwrap();
    }
    let rendering = render(&table, log.events(), 40, 12, now(), &RenderConfig::default());
    let canvas = rendering.frame.canvas().unwrap();
    let last = canvas.layout().last_data_column();
    let cell = canvas.get(0, last).unwrap();
    assert_eq!(cell.glyph, '●');
    assert_eq!(cell.owner, table.ids().last());
}

#[test]
fn recent_doses_lists_last_three() {
    let table = SubstanceTable::builtin();
    let caffeine = table.find_by_symbol('C').unwrap();
    let mut log = DoseLog::new();
    for (i, amount) in [100.0, 110.0, 120.0, 130.0, 140.0].into_iter().enumerate() {
        let at = now() - Duration::from_secs((5 - i as u64) * 600);
        log.record(&table, caffeine, amount, at).unwrap();
    }
    let rendering = render(&table, log.events(), 80, 20, now(), &RenderConfig::default());
    let amounts: Vec<f64> = rendering.legend.recent.iter().map(|r| r.amount).collect();
    assert_eq!(amounts, vec![140.0, 130.0, 120.0]);
    assert_eq!(rendering.legend.recent[0].label, "C 140mg (10m)");
}

#[test]
fn undersized_canvas_degrades() {
    let table = SubstanceTable::builtin();
    let mut rng = StdRng::seed_from_u64(5);
    let log = random_log(&table, &mut rng, 5);
    for (w, h) in [(0, 0), (1, 100), (100, 1), (11, 6), (12, 5)] {
        let rendering = render(&table, log.events(), w, h, now(), &RenderConfig::default());
        assert!(matches!(rendering.frame, Frame::TooSmall { .. }), "{w}x{h}");
        assert_eq!(rendering.legend.recent.len(), 3);
    }
}

#[test]
fn custom_gutters_shift_the_plot() {
    let config = RenderConfig {
        gutters: Gutters {
            left: 3,
            right: 2,
            bottom: 2,
        },
        ..RenderConfig::default()
    };
    let table = SubstanceTable::builtin();
    let mut log = DoseLog::new();
    let caffeine = table.find_by_symbol('C').unwrap();
    log.record(&table, caffeine, 300.0, now() - 20 * HOUR).unwrap();
    let rendering = render(&table, log.events(), 30, 12, now(), &config);
    let canvas = rendering.frame.canvas().unwrap();

    let layout = ChartLayout::new(30, 12, config.gutters).unwrap();
    assert_eq!(canvas.layout(), &layout);
    assert_eq!(canvas.get(10, 2).unwrap().glyph, '└');
    assert!(canvas
        .lit_cells()
        .all(|(r, c, _)| r < 10 && (3..=27).contains(&c)));
}
