// Host-side tests for chapter flow: phases, story state, puzzle and toasts.
#![allow(dead_code)]

mod support;

use glam::Vec2;
use support::core::chapter::*;
use support::core::device::PerformanceLevel;
use support::core::error::CoreError;
use support::core::notify::*;
use support::core::phase::*;
use support::core::progress::CountOutcome;
use support::core::puzzle::*;
use support::core::sample::{PointerSample, StrokeEvent};
use support::core::story::*;

fn sample(x: f32, t_ms: f64) -> StrokeEvent {
    StrokeEvent::Sample(PointerSample::new(x, 10.0, 0.8, t_ms))
}

fn story(chapter: u32, target: u32) -> Story {
    let cfg = ChapterConfig::for_chapter(chapter)
        .unwrap()
        .with_target(target)
        .unwrap();
    Story::new(cfg).unwrap()
}

// phases

#[test]
fn phases_never_move_backwards() {
    let mut m = PhaseMachine::new(PhasePlan::four_stage());
    assert_eq!(m.current(), ChapterPhase::Introduction);
    m.advance(0.55);
    assert_eq!(m.current(), ChapterPhase::Messages);
    assert!(m.advance(0.1).is_empty());
    assert_eq!(m.current(), ChapterPhase::Messages);
}

#[test]
fn a_jump_reports_every_intermediate_phase() {
    let mut m = PhaseMachine::new(PhasePlan::four_stage());
    let entered = m.advance(1.0);
    assert_eq!(
        entered.as_slice(),
        &[
            ChapterPhase::Interaction,
            ChapterPhase::Messages,
            ChapterPhase::Complete
        ]
    );
    assert!(m.is_complete());
}

#[test]
fn two_stage_plan_starts_interactive() {
    let plan = PhasePlan::two_stage();
    assert_eq!(plan.initial(), ChapterPhase::Interaction);
    assert_eq!(plan.phase_for(0.99), ChapterPhase::Interaction);
    assert_eq!(plan.phase_for(1.0), ChapterPhase::Complete);
}

#[test]
fn malformed_plans_are_rejected() {
    let out_of_range = PhasePlan::new(
        ChapterPhase::Introduction,
        &[(1.5, ChapterPhase::Complete)],
    );
    assert_eq!(out_of_range.unwrap_err(), CoreError::InvalidThreshold(1.5));
    let unordered = PhasePlan::new(
        ChapterPhase::Introduction,
        &[(0.5, ChapterPhase::Messages), (0.2, ChapterPhase::Complete)],
    );
    assert!(unordered.is_err());
    let backwards = PhasePlan::new(
        ChapterPhase::Messages,
        &[(0.5, ChapterPhase::Interaction)],
    );
    assert!(backwards.is_err());
}

// chapters

#[test]
fn chapter_table() {
    let one = ChapterConfig::for_chapter(1).unwrap();
    assert_eq!(one.required_interactions, 150);
    assert_eq!(one.mode, ChapterMode::Carve);
    assert_eq!(one.next_chapter(), Some(2));

    let two = ChapterConfig::for_chapter(2).unwrap();
    assert_eq!(two.backdrop, Backdrop::River);
    assert_eq!(two.phases, PhaseStyle::FourStage);
    assert_eq!(two.messages.len(), 8);
    assert!(!two.has_love_notes);
    assert_eq!(two.field_config().name, "river");
    assert!((two.intensity(1.0) - 1.5).abs() < 1e-6);

    let three = ChapterConfig::for_chapter(3).unwrap();
    assert!(three.has_love_notes);
    assert!(!three.has_puzzle);

    let four = ChapterConfig::for_chapter(4).unwrap();
    assert!(!four.has_love_notes);
    assert!(four.has_puzzle);
    assert_eq!(four.field_config().name, "galaxy");
    assert_eq!(four.next_chapter(), None);

    assert_eq!(
        ChapterConfig::for_chapter(9).unwrap_err(),
        CoreError::UnknownChapter(9)
    );
    assert_eq!(one.with_target(0).unwrap_err(), CoreError::ZeroTarget);
}

#[test]
fn stroke_and_glow_scale_with_pressure() {
    assert_eq!(stroke_width(0.0), 12.0);
    assert_eq!(stroke_width(1.0), 20.0);
    assert_eq!(glow_radius(0.5), 40.0);
}

#[test]
fn touch_devices_get_reduced_effects() {
    let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
    let ipad_desktop_ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";
    assert_eq!(PerformanceLevel::detect(iphone, 5), PerformanceLevel::Medium);
    assert_eq!(
        PerformanceLevel::detect(ipad_desktop_ua, 5),
        PerformanceLevel::Medium
    );
    let desktop = PerformanceLevel::detect(ipad_desktop_ua, 0);
    assert_eq!(desktop, PerformanceLevel::High);
    assert_eq!(desktop.frame_cap_hz(), None);
    assert_eq!(PerformanceLevel::Medium.frame_cap_hz(), Some(30.0));
    assert_eq!(PerformanceLevel::Medium.shape_divisor(), 2);
}

// story

#[test]
fn ink_starts_fresh_after_each_stroke() {
    let mut notes = NotificationCenter::new();
    let mut s = story(1, 10);
    let first = s.handle(sample(1.0, 0.0), &mut notes);
    assert_eq!(first.ink.map(|i| i.from), Some(None));
    let second = s.handle(sample(2.0, 5.0), &mut notes);
    assert_eq!(second.ink.and_then(|i| i.from), Some(Vec2::new(1.0, 10.0)));
    // drawn but not counted
    assert_eq!(second.outcome, Some(CountOutcome::Throttled));

    let end = s.handle(StrokeEvent::End, &mut notes);
    assert!(end.stroke_ended);
    assert!(end.ink.is_none());
    let restart = s.handle(sample(9.0, 500.0), &mut notes);
    assert_eq!(restart.ink.map(|i| i.from), Some(None));
}

#[test]
fn light_touches_are_neither_drawn_nor_counted() {
    let mut notes = NotificationCenter::new();
    let mut s = story(1, 10);
    s.handle(sample(1.0, 0.0), &mut notes);
    let light = StrokeEvent::Sample(PointerSample::new(5.0, 10.0, 0.05, 500.0));
    let up = s.handle(light, &mut notes);
    assert!(up.ink.is_none());
    assert_eq!(up.outcome, Some(CountOutcome::BelowThreshold));
    // the next firm sample joins the last drawn point
    let next = s.handle(sample(6.0, 600.0), &mut notes);
    assert_eq!(next.ink.and_then(|i| i.from), Some(Vec2::new(1.0, 10.0)));
}

#[test]
fn counted_samples_leave_glow_areas() {
    let mut notes = NotificationCenter::new();
    let mut s = story(3, 10);
    s.handle(sample(1.0, 0.0), &mut notes);
    s.handle(sample(2.0, 10.0), &mut notes);
    assert_eq!(s.glow().len(), 1);
    assert!((s.glow().head().unwrap().weight - glow_radius(0.8)).abs() < 1e-6);
    assert_eq!(s.sweep(10_000.0), 1);
}

#[test]
fn completion_happens_once_and_posts_the_easter_egg() {
    let mut notes = NotificationCenter::new();
    let mut s = story(1, 3);
    let mut completions = 0;
    for i in 0..10 {
        if s.handle(sample(i as f32, i as f64 * 100.0), &mut notes).completed {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert!(s.is_complete());
    assert_eq!(s.phase(), ChapterPhase::Complete);
    assert_eq!(s.completed_at_ms(), Some(200.0));
    assert_eq!(notes.visible().len(), 1);
    assert_eq!(notes.visible()[0].title, "Premier Secret Découvert !");
    assert_eq!(notes.visible()[0].duration_ms, 7000.0);
    assert!(notes.is_discovered("chapter-1"));
}

#[test]
fn instruction_hides_once_interaction_is_underway() {
    let mut notes = NotificationCenter::new();
    let mut s = story(3, 10);
    assert!(s.show_instruction());
    s.handle(sample(0.0, 0.0), &mut notes);
    s.handle(sample(0.0, 100.0), &mut notes);
    assert!(!s.show_instruction());
    assert!(s.intensity() > 1.0);
}

#[test]
fn messages_are_revealed_only_after_the_messages_phase() {
    let mut notes = NotificationCenter::new();
    let mut s = story(2, 10);
    assert_eq!(s.phase(), ChapterPhase::Introduction);
    assert!(s.reveal_next_message().is_none());

    let mut entered = Vec::new();
    for i in 0..5 {
        let up = s.handle(sample(i as f32, i as f64 * 100.0), &mut notes);
        entered.extend(up.entered);
    }
    assert_eq!(entered, vec![ChapterPhase::Interaction, ChapterPhase::Messages]);

    let first = s.reveal_next_message().unwrap();
    assert!(!first.from_reader);
    while s.reveal_next_message().is_some() {}
    assert_eq!(s.revealed_messages().len(), 8);
}

#[test]
fn chat_alternates_between_author_and_reader() {
    let two = ChapterConfig::for_chapter(2).unwrap();
    let from_reader: Vec<bool> = two.messages.iter().map(|m| m.from_reader).collect();
    assert_eq!(
        from_reader,
        vec![false, true, true, false, true, false, true, true]
    );
    assert_eq!(two.messages[1].text, "Ptdrrrr je vais la tuer");
    assert_eq!(two.messages[7].text, "Et toi?");
}

#[test]
fn first_message_is_ready_when_the_messages_phase_starts() {
    let mut notes = NotificationCenter::new();
    let mut s = story(2, 10);
    let mut i = 0;
    loop {
        let up = s.handle(sample(i as f32, i as f64 * 100.0), &mut notes);
        i += 1;
        if up.entered.contains(&ChapterPhase::Messages) {
            break;
        }
        assert!(s.reveal_next_message().is_none());
    }
    assert!(s.reveal_next_message().is_some());
    assert_eq!(s.revealed_messages().len(), 1);
}

#[test]
fn chapter_is_read_from_the_query_string() {
    assert_eq!(chapter_from_query("?chapter=2"), Some(2));
    assert_eq!(chapter_from_query("?from=home&chapter=3"), Some(3));
    assert_eq!(chapter_from_query("chapter=4"), Some(4));
    assert_eq!(chapter_from_query(""), None);
    assert_eq!(chapter_from_query("?chapter=x"), None);
    assert_eq!(chapter_from_query("?chapters=2"), None);
}

#[test]
fn only_the_last_chapter_carries_a_puzzle() {
    assert!(story(1, 5).puzzle().is_none());
    let mut s = story(4, 5);
    let puzzle = s.puzzle_mut().unwrap();
    puzzle.activate();
    assert_eq!(puzzle.submit("21082002"), PuzzleOutcome::Solved);
}

// puzzle

#[test]
fn puzzle_needs_activation() {
    let mut p = SecretPuzzle::default();
    assert_eq!(p.submit("21082002"), PuzzleOutcome::Inactive);
    assert!(!p.is_solved());
}

#[test]
fn correct_code_after_wrong_guesses_solves() {
    let mut p = SecretPuzzle::default();
    p.activate();
    assert_eq!(p.submit("1234"), PuzzleOutcome::Wrong { remaining: 2 });
    assert_eq!(p.submit("0000"), PuzzleOutcome::Wrong { remaining: 1 });
    assert_eq!(p.submit("21082002"), PuzzleOutcome::Solved);
    assert!(p.is_solved());
    assert!(!p.is_active());
    assert_eq!(p.submit("21082002"), PuzzleOutcome::AlreadySolved);
}

#[test]
fn code_must_match_exactly() {
    let mut p = SecretPuzzle::default();
    p.activate();
    assert_eq!(p.submit(" 21082002"), PuzzleOutcome::Wrong { remaining: 2 });
    assert_eq!(p.submit("21082002 "), PuzzleOutcome::Wrong { remaining: 1 });
    assert!(!p.is_solved());
}

#[test]
fn three_wrong_answers_lock_out_until_reactivated() {
    let mut p = SecretPuzzle::default();
    p.activate();
    p.submit("a");
    p.submit("b");
    assert_eq!(p.submit("c"), PuzzleOutcome::LockedOut);
    assert!(!p.is_active());
    assert_eq!(p.attempts(), 0);
    assert_eq!(p.submit("21082002"), PuzzleOutcome::Inactive);

    p.activate();
    p.set_input("21082002");
    assert_eq!(p.input(), "21082002");
    assert_eq!(p.submit_current(), PuzzleOutcome::Solved);
}

#[test]
fn typed_input_is_ignored_while_inactive() {
    let mut p = SecretPuzzle::new("42", 1);
    p.set_input("42");
    assert_eq!(p.input(), "");
}

// notifications

#[test]
fn ids_are_unique_and_increasing() {
    let mut c = NotificationCenter::new();
    let a = c.post("a", "", NotificationKind::Love, None, 0.0);
    let b = c.post("b", "", NotificationKind::Love, None, 0.0);
    assert!(b > a);
    assert_eq!(c.visible()[0].duration_ms, 5000.0);
}

#[test]
fn toasts_expire_after_their_duration_unless_sticky() {
    let mut c = NotificationCenter::new();
    let short = c.post("short", "", NotificationKind::Milestone, Some(1000.0), 0.0);
    let sticky = c.post("sticky", "", NotificationKind::Secret, Some(0.0), 0.0);
    assert!(c.expire(999.0).is_empty());
    assert_eq!(c.expire(1000.0), vec![short]);
    assert!(c.expire(1_000_000.0).is_empty());
    assert_eq!(c.visible().len(), 1);
    assert!(c.dismiss(sticky));
    assert!(!c.dismiss(sticky));
    assert!(c.visible().is_empty());
}

#[test]
fn easter_egg_durations_depend_on_the_trigger() {
    let mut c = NotificationCenter::new();
    c.trigger_easter_egg(Some(2), None, 0.0);
    c.trigger_easter_egg(Some(2), Some("custom"), 0.0);
    c.trigger_easter_egg(None, None, 0.0);
    let durations: Vec<f64> = c.visible().iter().map(|n| n.duration_ms).collect();
    assert_eq!(durations, vec![7000.0, 6000.0, 5000.0]);
    assert_eq!(c.visible()[0].kind, NotificationKind::Love);
    assert_eq!(c.visible()[1].message, "custom");
    assert_eq!(c.discovered_count(), 1);
    assert!(c.is_discovered("chapter-2"));
}

#[test]
fn kinds_map_to_toast_classes() {
    assert_eq!(NotificationKind::Secret.css_class(), "toast-secret");
    assert_eq!(NotificationKind::EasterEgg.emoji(), "✨");
}
