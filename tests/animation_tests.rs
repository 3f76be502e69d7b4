// Host-side tests for the frame clock, animated fields and river waves.
#![allow(dead_code)]

mod support;

use glam::Vec2;
use support::core::clock::*;
use support::core::error::CoreError;
use support::core::field::*;
use support::core::wave::*;

const SURFACE: Vec2 = Vec2::new(800.0, 600.0);

fn positions(field: &Field) -> Vec<Vec2> {
    field.shapes().pos.clone()
}

#[test]
fn field_without_interaction_is_a_pure_function_of_time() {
    let mut a = Field::new(FieldConfig::river(), 7).unwrap();
    let mut b = Field::new(FieldConfig::river(), 7).unwrap();
    for t in [0.0, 0.5, 1.25, 9.0] {
        a.advance(t, SURFACE, None, 1.0);
        b.advance(t, SURFACE, None, 1.0);
        assert_eq!(positions(&a), positions(&b));
    }
}

#[test]
fn arena_columns_match_the_shape_count() {
    let field = Field::new(FieldConfig::galaxy(), 3).unwrap();
    let s = field.shapes();
    let n = FieldConfig::galaxy().shape_count;
    assert_eq!(s.len(), n);
    for len in [s.amp.len(), s.freq.len(), s.phase.len(), s.size.len()] {
        assert_eq!(len, n);
    }
    assert_eq!(s.color.len(), n);
    assert_eq!(s.pos.len(), n);
    assert_eq!(s.glow.len(), n);
}

#[test]
fn replay_order_does_not_matter() {
    let mut direct = Field::new(FieldConfig::galaxy(), 3).unwrap();
    let mut stepped = Field::new(FieldConfig::galaxy(), 3).unwrap();
    direct.advance(2.0, SURFACE, None, 1.0);
    for t in [0.1, 5.0, 0.7, 2.0] {
        stepped.advance(t, SURFACE, None, 1.0);
    }
    assert_eq!(positions(&direct), positions(&stepped));
}

#[test]
fn hovering_pointer_does_not_perturb() {
    let mut calm = Field::new(FieldConfig::love(), 11).unwrap();
    let mut hover = Field::new(FieldConfig::love(), 11).unwrap();
    calm.advance(1.0, SURFACE, None, 1.0);
    let pointer = FieldPointer {
        pos: SURFACE * 0.5,
        pressed: false,
    };
    hover.advance(1.0, SURFACE, Some(pointer), 1.0);
    assert_eq!(positions(&calm), positions(&hover));
    assert!(hover.shapes().glow.iter().all(|g| *g == 0.0));
}

#[test]
fn pressed_pointer_only_moves_shapes_inside_the_radius() {
    let mut calm = Field::new(FieldConfig::river(), 5).unwrap();
    let mut pressed = Field::new(FieldConfig::river(), 5).unwrap();
    let center = SURFACE * 0.5;
    calm.advance(2.0, SURFACE, None, 1.0);
    pressed.advance(
        2.0,
        SURFACE,
        Some(FieldPointer {
            pos: center,
            pressed: true,
        }),
        1.0,
    );
    let radius = pressed.config().falloff.radius;
    let mut moved = 0;
    for (i, (c, p)) in positions(&calm).iter().zip(positions(&pressed)).enumerate() {
        if c.distance(center) >= radius {
            assert_eq!(*c, p, "shape {} outside the radius moved", i);
        } else if *c != p {
            moved += 1;
        }
    }
    assert!(moved > 0);
}

#[test]
fn falloff_is_linear_and_scales_with_intensity() {
    let f = Falloff::default();
    assert_eq!(f.weight(0.0, 1.0), 1.0);
    assert!((f.weight(75.0, 1.0) - 0.5).abs() < 1e-6);
    assert_eq!(f.weight(150.0, 1.0), 0.0);
    assert_eq!(f.weight(400.0, 1.0), 0.0);
    assert!((f.weight(150.0, 2.0) - 0.5).abs() < 1e-6);
    assert_eq!(f.weight(10.0, 0.0), 0.0);
}

#[test]
fn pulse_decays_back_to_ambient() {
    let mut calm = Field::new(FieldConfig::keyboard(), 9).unwrap();
    let mut burst = Field::new(FieldConfig::keyboard(), 9).unwrap();
    burst.pulse(1.0, 0.0);
    calm.advance(0.1, SURFACE, None, 1.0);
    burst.advance(0.1, SURFACE, None, 1.0);
    assert_ne!(positions(&calm), positions(&burst));
    calm.advance(20.0, SURFACE, None, 1.0);
    burst.advance(20.0, SURFACE, None, 1.0);
    for (c, b) in positions(&calm).iter().zip(positions(&burst)) {
        assert!(c.distance(b) < 1e-3);
    }
}

#[test]
fn presets_validate_and_thin() {
    for name in ["river", "ocean", "waterfall", "love", "engagement", "galaxy", "keyboard"] {
        let cfg = FieldConfig::preset(name).unwrap();
        assert_eq!(cfg.name, name);
        assert!(cfg.validate().is_ok());
        assert!(cfg.thinned(2).shape_count <= cfg.shape_count / 2 + 1);
    }
    assert!(FieldConfig::preset("lava").is_none());
    assert_eq!(FieldConfig::galaxy().thinned(5000).shape_count, 1);
}

#[test]
fn empty_palette_is_rejected() {
    let cfg = FieldConfig {
        palette: Vec::new(),
        ..FieldConfig::river()
    };
    assert_eq!(Field::new(cfg, 1).err(), Some(CoreError::EmptyPalette));
}

#[test]
fn colours_render_as_css() {
    assert_eq!(Rgba::new(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.500)");
    assert_eq!(Rgba::new(1, 2, 3, 0.5).with_alpha(2.0).to_css(), "rgba(1, 2, 3, 1.000)");
}

#[test]
fn ripple_is_zero_outside_the_influence_radius() {
    let pointer = Vec2::new(100.0, 100.0);
    assert_eq!(ripple_offset(Vec2::new(301.0, 100.0), pointer, 1.0, 1.0), 0.0);
    assert_eq!(ripple_offset(Vec2::new(100.0, 500.0), pointer, 3.0, 1.5), 0.0);
    // intensity widens the radius
    let inside = ripple_offset(Vec2::new(320.0, 100.0), pointer, 0.3, 1.5);
    assert!(inside.abs() > 0.0);
}

#[test]
fn traced_layer_matches_ambient_without_pointer() {
    let layer = RIVER_LAYERS[3];
    let mut out = Vec::new();
    trace_layer(&layer, 100.0, 400.0, 2.0, 10.0, None, 1.0, &mut out);
    assert_eq!(out.len(), 11);
    for p in &out {
        assert_eq!(p.y, layer.ambient_y(p.x, 2.0, 400.0));
    }
    // buffer is reused, not appended to
    trace_layer(&layer, 50.0, 400.0, 2.0, 10.0, None, 1.0, &mut out);
    assert_eq!(out.len(), 6);
}

#[test]
fn sparkles_ring_the_pointer() {
    let s = pointer_sparkles(Vec2::ZERO, 0.0, 2, 8);
    assert_eq!(s.len(), 16);
    assert!(s.iter().all(|(p, _, _)| p.length() > 20.0 && p.length() < 70.0));
}

#[test]
fn fixed_clock_advances_by_constant_steps() {
    let mut clock = FrameClock::fixed();
    for i in 0..60 {
        assert!(clock.tick(i as f64 * 7.0).is_some());
    }
    assert!((clock.elapsed_sec() - 1.0).abs() < 1e-4);
    assert_eq!(clock.frames(), 60);
}

#[test]
fn measured_clock_clamps_long_gaps() {
    let mut clock = FrameClock::new(StepMode::Measured);
    assert_eq!(clock.tick(0.0), Some(0.0));
    let step = clock.tick(5000.0).unwrap();
    assert!(step <= 0.1 + 1e-6);
}

#[test]
fn capped_clock_skips_frames_arriving_too_fast() {
    let mut clock = FrameClock::new(StepMode::Measured).with_max_rate(30.0);
    let frame_ms = 1000.0 / 60.0;
    let accepted = (0..120)
        .filter(|i| clock.tick(*i as f64 * frame_ms).is_some())
        .count();
    assert!((55..=65).contains(&accepted), "accepted {}", accepted);
    assert!((clock.elapsed_sec() - 2.0).abs() < 0.1);
}
