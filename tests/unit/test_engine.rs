//! Unit tests for the animation engine
//!
//! Tests cover:
//! - Typewriter reveal cadence and completion
//! - Progressive counter gating and monotonic progress
//! - Staged status walk and freeze
//! - Loading glyph gating
//! - Dispose semantics

use proptest::prelude::*;
use std::time::Duration;
use termfolio::engine::glyph::LOADING_GLYPHS;
use termfolio::engine::stages::CONNECTION_STAGES;
use termfolio::engine::{
    spawn_gated_glyph, Driver, MeterSpec, ProgressiveCounter, StageSequence, Typewriter,
};
use tokio::sync::watch;

/// Sleep just past `n` periods so the n-th tick has fired
async fn after_ticks(period: Duration, n: u32) {
    tokio::time::sleep(period * n + period / 2).await;
}

// ============================================================================
// Typewriter Tests
// ============================================================================

mod typewriter_tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(150);

    #[tokio::test(start_paused = true)]
    async fn test_reveals_one_char_per_tick() {
        let handle = Typewriter::new("hero", "ALPHA FF").spawn(PERIOD);
        assert_eq!(handle.state().visible(), "");

        after_ticks(PERIOD, 3).await;
        assert_eq!(handle.state().visible(), "ALP");
        assert!(!handle.state().is_complete());

        after_ticks(PERIOD, 5).await;
        let state = handle.state();
        assert_eq!(state.visible(), "ALPHA FF");
        assert!(state.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_ticking_when_complete() {
        let handle = Typewriter::new("short", "ab").spawn(PERIOD);
        after_ticks(PERIOD, 10).await;
        assert_eq!(handle.ticks(), 2);
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_source_is_complete_at_mount() {
        let handle = Typewriter::new("empty", "").spawn(PERIOD);
        assert!(handle.state().is_complete());
        after_ticks(PERIOD, 3).await;
        assert_eq!(handle.ticks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_freezes_reveal() {
        let mut handle = Typewriter::new("bio", "SYSTEM SCAN").spawn(PERIOD);
        after_ticks(PERIOD, 2).await;
        handle.dispose();
        assert!(handle.is_disposed());

        after_ticks(PERIOD, 5).await;
        assert_eq!(handle.state().visible(), "SY");
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_signal_resolves() {
        let handle = Typewriter::new("bio", "abc").spawn(PERIOD);
        let signal = handle.completion();
        assert!(!signal.is_complete());
        assert!(signal.wait().await);
        assert!(handle.state().is_complete());
    }

    #[test]
    fn test_multibyte_reveal_never_splits_code_points() {
        let mut typewriter = Typewriter::new("glyphs", "⌘⛨⚡");
        typewriter.advance();
        assert_eq!(typewriter.snapshot().visible(), "⌘");
        typewriter.advance();
        assert_eq!(typewriter.snapshot().visible(), "⌘⛨");
    }
}

// ============================================================================
// Progressive Counter Tests
// ============================================================================

mod counter_tests {
    use super::*;

    const TYPE_PERIOD: Duration = Duration::from_millis(10);
    const COUNT_PERIOD: Duration = Duration::from_millis(15);

    fn specs() -> Vec<MeterSpec> {
        vec![
            MeterSpec::new("A", "*", 3),
            MeterSpec::new("B", "*", 1),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_waits_for_typewriter() {
        let bio = Typewriter::new("bio", "hello").spawn(TYPE_PERIOD);
        let counter = ProgressiveCounter::new(specs()).spawn(COUNT_PERIOD, bio.completion());

        after_ticks(TYPE_PERIOD, 3).await;
        assert!(counter.state().is_none());
        assert_eq!(counter.ticks(), 0);

        after_ticks(TYPE_PERIOD, 2).await;
        let meters = counter.state().expect("initialized after completion");
        assert!(meters.iter().all(|m| m.current == 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_reaches_targets_and_stops() {
        let bio = Typewriter::new("bio", "x").spawn(TYPE_PERIOD);
        let counter = ProgressiveCounter::new(specs()).spawn(COUNT_PERIOD, bio.completion());

        tokio::time::sleep(TYPE_PERIOD * 2 + COUNT_PERIOD * 10).await;
        let meters = counter.state().unwrap();
        assert_eq!(meters[0].current, 3);
        assert_eq!(meters[1].current, 1);
        assert_eq!(counter.ticks(), 3);
        assert!(!counter.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_never_starts_if_typewriter_disposed() {
        let mut bio = Typewriter::new("bio", "long enough text").spawn(TYPE_PERIOD);
        let counter = ProgressiveCounter::new(specs()).spawn(COUNT_PERIOD, bio.completion());

        after_ticks(TYPE_PERIOD, 2).await;
        bio.dispose();
        drop(bio);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(counter.state().is_none());
    }
}

// ============================================================================
// Staged Status Tests
// ============================================================================

mod stage_tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(500);

    #[tokio::test(start_paused = true)]
    async fn test_walks_connection_stages_once() {
        let handle = StageSequence::connection().spawn(PERIOD);
        assert_eq!(handle.state().label, "CONNECTING");

        after_ticks(PERIOD, 2).await;
        assert_eq!(handle.state().label, "CONNECTING..");
        assert!(!handle.state().is_final);

        after_ticks(PERIOD, 10).await;
        let snapshot = handle.state();
        assert_eq!(snapshot.label, "ONLINE");
        assert!(snapshot.is_final);
        assert_eq!(handle.ticks(), (CONNECTION_STAGES.len() - 1) as u64);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_stage_is_final_at_mount() {
        static ONLY: &[&str] = &["READY"];
        let handle = StageSequence::new(ONLY).unwrap().spawn(PERIOD);
        assert!(handle.state().is_final);
        after_ticks(PERIOD, 2).await;
        assert_eq!(handle.ticks(), 0);
    }

    #[test]
    fn test_empty_stage_list_rejected() {
        assert!(StageSequence::new(&[]).is_none());
    }
}

// ============================================================================
// Loading Glyph Tests
// ============================================================================

mod glyph_tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_glyph_runs_only_while_gate_open() {
        let (gate, rx) = watch::channel(false);
        let handle = spawn_gated_glyph(LOADING_GLYPHS, PERIOD, rx, |open: &bool| *open);

        after_ticks(PERIOD, 3).await;
        assert_eq!(handle.state(), None);
        assert_eq!(handle.ticks(), 0);

        gate.send_replace(true);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(handle.state(), Some(".  "));

        after_ticks(PERIOD, 3).await;
        assert_eq!(handle.state(), Some(".  "));
        assert_eq!(handle.ticks(), 3);

        gate.send_replace(false);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(handle.state(), None);

        after_ticks(PERIOD, 4).await;
        assert_eq!(handle.ticks(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose_stops_open_glyph() {
        let (_gate, rx) = watch::channel(true);
        let mut handle = spawn_gated_glyph(LOADING_GLYPHS, PERIOD, rx, |open: &bool| *open);
        after_ticks(PERIOD, 1).await;
        handle.dispose();
        let ticks = handle.ticks();

        after_ticks(PERIOD, 5).await;
        assert_eq!(handle.ticks(), ticks);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_typewriter_reveals_prefixes(source in "\\PC{0,40}") {
        let mut typewriter = Typewriter::new("prop", source.clone());
        let total = source.chars().count();
        let mut previous = String::new();
        for step in 0..=total {
            let state = typewriter.snapshot();
            prop_assert_eq!(state.revealed_len(), step);
            prop_assert!(source.starts_with(state.visible()));
            prop_assert!(state.visible().starts_with(previous.as_str()));
            prop_assert_eq!(state.is_complete(), step == total);
            previous = state.visible().to_string();
            typewriter.advance();
        }
        let finished = typewriter.snapshot();
        prop_assert_eq!(finished.visible(), source.as_str());
    }

    #[test]
    fn prop_counter_is_monotonic_and_bounded(targets in proptest::collection::vec(0u8..=120, 1..5)) {
        let specs: Vec<MeterSpec> = targets
            .iter()
            .map(|t| MeterSpec::new("m", "*", *t))
            .collect();
        let mut counter = ProgressiveCounter::new(specs);
        counter.start();

        let mut previous: Vec<u8> = vec![0; targets.len()];
        for _ in 0..=100 {
            let meters = counter.snapshot().unwrap();
            for (meter, prev) in meters.iter().zip(previous.iter()) {
                prop_assert!(meter.current >= *prev);
                prop_assert!(meter.current <= meter.target);
                prop_assert!(meter.target <= 100);
            }
            previous = meters.iter().map(|m| m.current).collect();
            if counter.is_terminal() {
                break;
            }
            counter.advance();
        }
        prop_assert!(counter.is_terminal());
    }
}
