// Host-side tests for interaction counting.
#![allow(dead_code)]

mod support;

use support::core::error::CoreError;
use support::core::progress::*;
use support::core::sample::PointerSample;

#[derive(Default)]
struct Recorder {
    fractions: Vec<f32>,
    completions: u32,
}

impl ProgressObserver for Recorder {
    fn on_progress(&mut self, fraction: f32) {
        self.fractions.push(fraction);
    }
    fn on_complete(&mut self) {
        self.completions += 1;
    }
}

fn sample_at(t_ms: f64, pressure: f32) -> PointerSample {
    PointerSample::new(10.0, 20.0, pressure, t_ms)
}

#[test]
fn zero_target_is_rejected() {
    let err = ProgressAccumulator::new(AccumulatorConfig::with_target(0)).unwrap_err();
    assert_eq!(err, CoreError::ZeroTarget);
}

#[test]
fn low_pressure_never_counts() {
    let mut acc = ProgressAccumulator::new(AccumulatorConfig::with_target(5)).unwrap();
    let mut rec = Recorder::default();
    for i in 0..20 {
        let out = acc.record(&sample_at(i as f64 * 100.0, 0.05), &mut rec);
        assert_eq!(out, CountOutcome::BelowThreshold);
    }
    assert_eq!(acc.count(), 0);
    assert!(rec.fractions.is_empty());
}

#[test]
fn throttle_limits_counting_to_one_per_window() {
    let mut acc = ProgressAccumulator::new(AccumulatorConfig::with_target(100)).unwrap();
    let mut rec = Recorder::default();
    assert!(acc.record(&sample_at(0.0, 0.7), &mut rec).counted());
    assert_eq!(
        acc.record(&sample_at(20.0, 0.7), &mut rec),
        CountOutcome::Throttled
    );
    assert_eq!(
        acc.record(&sample_at(49.0, 0.7), &mut rec),
        CountOutcome::Throttled
    );
    assert!(acc.record(&sample_at(50.0, 0.7), &mut rec).counted());
    assert_eq!(acc.count(), 2);
    assert_eq!(rec.fractions, vec![0.01, 0.02]);
}

#[test]
fn fraction_is_non_decreasing_and_bounded() {
    let mut acc = ProgressAccumulator::new(AccumulatorConfig::with_target(7)).unwrap();
    let mut rec = Recorder::default();
    let mut last = 0.0;
    // irregular spacing, mixed pressure
    let mut t = 0.0;
    for i in 0..200 {
        t += [5.0, 17.0, 60.0, 33.0, 120.0][i % 5];
        let pressure = if i % 7 == 0 { 0.0 } else { 0.8 };
        acc.record(&sample_at(t, pressure), &mut rec);
        let f = acc.fraction();
        assert!((0.0..=1.0).contains(&f));
        assert!(f >= last);
        last = f;
    }
    assert!(rec.fractions.windows(2).all(|w| w[0] <= w[1]));
    assert!(rec.fractions.iter().all(|f| (0.0..=1.0).contains(f)));
}

#[test]
fn completion_fires_exactly_once() {
    let mut acc = ProgressAccumulator::new(AccumulatorConfig::with_target(3)).unwrap();
    let mut rec = Recorder::default();
    let mut outcomes = Vec::new();
    for i in 0..10 {
        outcomes.push(acc.record(&sample_at(i as f64 * 100.0, 0.9), &mut rec));
    }
    assert_eq!(rec.completions, 1);
    assert_eq!(outcomes[2], CountOutcome::Completed { count: 3 });
    assert!(outcomes[3..].iter().all(|o| *o == CountOutcome::Saturated));
    assert_eq!(acc.count(), 3);
    assert_eq!(acc.fraction(), 1.0);
    assert!(acc.is_complete());
    // the completing sample reported 1.0 before completion
    assert_eq!(rec.fractions.last().copied(), Some(1.0));
}

#[test]
fn sixty_hertz_for_two_seconds_counts_throttle_rate_not_draw_rate() {
    let mut acc = ProgressAccumulator::new(AccumulatorConfig::with_target(100)).unwrap();
    let mut rec = Recorder::default();
    let frame_ms = 1000.0 / 60.0;
    for i in 0..120 {
        acc.record(&sample_at(i as f64 * frame_ms, 0.7), &mut rec);
    }
    let count = acc.count();
    assert!((30..=40).contains(&count), "counted {}", count);
    assert!(acc.fraction() < 0.5);
    assert!(!acc.is_complete());
    assert_eq!(rec.completions, 0);
}

#[test]
fn closure_observer_receives_reports() {
    let mut acc = ProgressAccumulator::new(AccumulatorConfig::with_target(2)).unwrap();
    let mut seen = Vec::new();
    let mut done = false;
    {
        let mut obs = FnObserver {
            on_progress: |f: f32| seen.push(f),
            on_complete: || done = true,
        };
        acc.record(&sample_at(0.0, 0.5), &mut obs);
        acc.record(&sample_at(100.0, 0.5), &mut obs);
    }
    assert_eq!(seen, vec![0.5, 1.0]);
    assert!(done);
}

#[test]
fn unit_observer_is_a_no_op() {
    let mut acc = ProgressAccumulator::new(AccumulatorConfig::default()).unwrap();
    assert!(acc.record(&sample_at(0.0, 1.0), &mut ()).counted());
    assert_eq!(acc.target(), 100);
}
