//! Pause and resume tests: frozen countdown, aborted playback, replay on
//! resume, and how other commands interact with a paused game.

mod common;

use common::*;
use memory_grid::core::{CellId, Phase, ResumePhase};
use memory_grid::engine::{Command, EndReason, InputOutcome};
use memory_grid::frontend::PresenterEvent;

// =============================================================================
// Pausing During Input
// =============================================================================

/// Test that remaining input time does not move while paused.
#[test]
fn test_pause_freezes_remaining_time() {
    let mut engine = engine(1);
    engine.start();
    run_until_input(&mut engine);
    engine.advance(1_000);
    assert_eq!(engine.remaining_ms(), 4_200);

    engine.toggle_pause();
    assert_eq!(engine.phase(), Phase::Paused(ResumePhase::Input));
    engine.advance(60_000);
    assert_eq!(engine.remaining_ms(), 4_200);
    assert_eq!(engine.phase(), Phase::Paused(ResumePhase::Input));
}

/// Test that resuming counts down from the frozen time after a full tick.
#[test]
fn test_resume_continues_from_remaining_time() {
    let mut engine = engine(1);
    engine.start();
    run_until_input(&mut engine);
    engine.advance(1_000);
    engine.toggle_pause();
    engine.advance(3_333);

    engine.toggle_pause();
    assert_eq!(engine.phase(), Phase::Input);
    assert_eq!(engine.remaining_ms(), 4_200);

    engine.advance(49);
    assert_eq!(engine.remaining_ms(), 4_200);
    engine.advance(1);
    assert_eq!(engine.remaining_ms(), 4_150);
    assert_eq!(engine.time_budget_ms(), 5_200);
}

/// Test that repeated pause/resume leaves a single live countdown tick.
#[test]
fn test_double_toggle_does_not_double_tick() {
    let mut engine = engine(1);
    engine.start();
    run_until_input(&mut engine);
    engine.advance(1_000);

    engine.toggle_pause();
    engine.toggle_pause();
    engine.toggle_pause();
    engine.toggle_pause();
    assert_eq!(engine.phase(), Phase::Input);

    // Only the latest armed tick counts down
    engine.advance(500);
    assert_eq!(engine.remaining_ms(), 3_700);
}

/// Test that cell selections are ignored while paused and accepted after resume.
#[test]
fn test_input_ignored_while_paused() {
    let mut engine = engine(1);
    engine.start();
    run_until_input(&mut engine);
    let cell = engine.round().expected().unwrap();

    engine.toggle_pause();
    assert_eq!(engine.select_cell(cell), InputOutcome::Ignored);
    assert_eq!(engine.round().player_step(), 0);
    assert_eq!(engine.round().score(), 0);

    engine.toggle_pause();
    assert!(matches!(engine.select_cell(cell), InputOutcome::RoundWon { .. }));
}

/// Test that pausing shows the pause overlay and resuming hides it.
#[test]
fn test_pause_shows_overlay_and_resume_hides_it() {
    let mut engine = engine(1);
    engine.start();
    run_until_input(&mut engine);
    engine.presenter_mut().take_events();

    engine.handle(Command::TogglePause);
    let overlay = engine.presenter().last_overlay().unwrap();
    assert_eq!(overlay.title, "PAUSA");
    assert_eq!(overlay.message.as_deref(), Some("Juego detenido"));
    assert_eq!(overlay.action.as_deref(), Some("CONTINUAR"));
    assert!(engine.presenter().events().contains(&PresenterEvent::Paused(true)));

    engine.handle(Command::TogglePause);
    let events = engine.presenter().events();
    assert!(events.contains(&PresenterEvent::OverlayHidden));
    assert_eq!(events.last(), Some(&PresenterEvent::Paused(false)));
}

// =============================================================================
// Pausing During Playback
// =============================================================================

/// Test that pausing mid-playback switches the lit cell off and stops playback.
#[test]
fn test_pause_mid_playback_unlights_and_stops() {
    let mut engine = engine(9);
    engine.start();
    play_round(&mut engine);
    play_round(&mut engine);

    // Round 3: next-round delay, lead-in, then the first cell lights
    engine.advance(800 + 800 + 10);
    assert_eq!(engine.presenter().currently_lit().len(), 1);

    engine.toggle_pause();
    assert_eq!(engine.phase(), Phase::Paused(ResumePhase::Showing));
    assert!(engine.presenter().currently_lit().is_empty());

    engine.presenter_mut().take_events();
    engine.advance(30_000);
    assert!(engine.presenter().lit_cells().is_empty());
    assert_eq!(engine.phase(), Phase::Paused(ResumePhase::Showing));
}

/// Test that resuming interrupted playback replays the sequence from the start after the lead-in.
#[test]
fn test_resume_replays_whole_sequence() {
    let mut engine = engine(9);
    engine.start();
    play_round(&mut engine);
    play_round(&mut engine);

    // Interrupt partway through the sequence
    engine.advance(800 + 800 + 600);
    engine.toggle_pause();
    engine.presenter_mut().take_events();

    engine.toggle_pause();
    assert_eq!(engine.phase(), Phase::Showing);

    // Lead-in again before anything lights
    engine.advance(799);
    assert!(engine.presenter().lit_cells().is_empty());

    run_until_input(&mut engine);
    let sequence: Vec<CellId> = engine.round().sequence().iter().copied().collect();
    assert_eq!(sequence.len(), 3);
    assert_eq!(engine.presenter().lit_cells(), sequence);
    assert_eq!(engine.remaining_ms(), 7_600);
}

/// Test that pausing between rounds delays the next step by a full next-round delay.
#[test]
fn test_pause_between_rounds_keeps_sequence() {
    let mut engine = engine(4);
    engine.start();
    play_round(&mut engine);
    assert_eq!(engine.phase(), Phase::Showing);

    engine.toggle_pause();
    engine.advance(5_000);
    assert_eq!(engine.round().sequence().len(), 1);

    engine.toggle_pause();
    engine.advance(799);
    assert_eq!(engine.round().sequence().len(), 1);
    engine.advance(1);
    assert_eq!(engine.round().sequence().len(), 2);

    run_until_input(&mut engine);
    assert_eq!(engine.round().sequence().len(), 2);
    assert_eq!(engine.round().level(), 2);
}

/// Test that pausing while a grown board settles reruns the settle delay.
#[test]
fn test_pause_while_board_settles() {
    let mut engine = engine(12);
    engine.start();
    for _ in 0..5 {
        play_round(&mut engine);
    }
    engine.advance(800);
    assert_eq!(engine.round().grid_size(), 3);
    assert_eq!(engine.round().sequence().len(), 5);

    engine.toggle_pause();
    engine.advance(2_000);
    engine.toggle_pause();

    // The settle delay runs again in full before the step is appended
    engine.advance(499);
    assert_eq!(engine.round().sequence().len(), 5);
    engine.advance(1);
    assert_eq!(engine.round().sequence().len(), 6);
    assert_eq!(engine.presenter().grids_rendered().last(), Some(&3));
}

// =============================================================================
// Pause Interactions
// =============================================================================

/// Test that pause does nothing before a game starts or after it ends.
#[test]
fn test_pause_ignored_when_idle_or_over() {
    let mut engine = engine(2);
    engine.toggle_pause();
    assert_eq!(engine.phase(), Phase::Idle);

    lose_after_rounds(&mut engine, 1);
    assert_eq!(engine.phase(), Phase::GameOver);
    engine.toggle_pause();
    assert_eq!(engine.phase(), Phase::GameOver);
}

/// Test that start on a paused game resumes it instead of starting over.
#[test]
fn test_start_while_paused_resumes() {
    let mut engine = engine(2);
    engine.start();
    run_until_input(&mut engine);
    engine.advance(300);
    let sequence = engine.round().sequence().clone();

    engine.toggle_pause();
    engine.start();
    assert_eq!(engine.phase(), Phase::Input);
    assert_eq!(engine.remaining_ms(), 4_900);
    assert_eq!(engine.round().sequence(), &sequence);
}

/// Test that restart from pause ends the game and leaves no countdown behind.
#[test]
fn test_restart_while_paused_ends_game() {
    let mut engine = engine(2);
    engine.start();
    play_round(&mut engine);
    run_until_input(&mut engine);
    engine.toggle_pause();

    engine.restart();
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(engine.report().unwrap().reason, EndReason::Restarted);
    assert_eq!(engine.report().unwrap().final_score, 62);
    assert!(engine
        .presenter()
        .events()
        .iter()
        .rev()
        .any(|e| *e == PresenterEvent::Paused(false)));

    // The frozen countdown never resurfaces
    engine.advance(60_000);
    assert_eq!(engine.phase(), Phase::GameOver);
}

/// Test that sound can be toggled without leaving pause.
#[test]
fn test_sound_toggle_while_paused() {
    let mut engine = engine(2);
    engine.start();
    engine.toggle_pause();
    engine.toggle_sound();
    assert!(!engine.sound_on());
    assert_eq!(engine.phase(), Phase::Paused(ResumePhase::Showing));
}
