//! Windowless runner, driven by a script of key presses, for automated runs.

use crate::{
    board::BoardId,
    frame_clock::FrameClock,
    game_state::GameState,
    input::KeyboardInput,
    render::Renderer,
    settings::Settings,
};
use anyhow::*;
use winit::keyboard::KeyCode;


/// Env var which, if set, forces headless mode.
pub const HEADLESS_ENV: &'static str = "PLATFORMER_HEADLESS_TEST";


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Press, with the text the key types if any.
    Press(Option<&'static str>),
    Release,
}

/// Key action to perform at the start of a given frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScriptedKey {
    pub frame: u64,
    pub key: KeyCode,
    pub action: KeyAction,
}

const fn press(frame: u64, key: KeyCode, text: &'static str) -> ScriptedKey {
    ScriptedKey { frame, key, action: KeyAction::Press(Some(text)) }
}

const fn release(frame: u64, key: KeyCode) -> ScriptedKey {
    ScriptedKey { frame, key, action: KeyAction::Release }
}

/// Walk right, with a jump attempt along the way.
pub const DEMO_SCRIPT: &'static [ScriptedKey] = &[
    press(0, KeyCode::KeyD, "d"),
    press(3, KeyCode::Space, " "),
    release(5, KeyCode::Space),
    release(8, KeyCode::KeyD),
];

/// Run for up to `max_frames` frames at the nominal frame step, feeding in `script`, or until a
/// quit event. Returns the final game state.
pub fn run_headless<R: Renderer>(
    settings: &Settings,
    max_frames: u64,
    script: &[ScriptedKey],
    renderer: &mut R,
) -> Result<GameState> {
    let mut state = GameState::new(BoardId::from_name(&settings.start_board), settings.tuning());
    let mut input = KeyboardInput::new();
    let mut clock = FrameClock::new(settings.fps, Some(max_frames));
    let dt = clock.nominal_dt();
    info!(max_frames, board = %state.board.id, "running headless");

    loop {
        for step in script.iter().filter(|step| step.frame == clock.frames()) {
            let event = match step.action {
                KeyAction::Press(text) => input.on_key_press(step.key, text),
                KeyAction::Release => input.on_key_release(step.key),
            };
            if let Some(event) = event {
                state.apply_event(event);
            }
        }
        if state.quit_requested() {
            info!(frames = clock.frames(), "quit requested");
            break;
        }

        state.update(dt, input.horizontal());
        renderer.draw(&state.snapshot(input.cheat_buffer()))?;

        if clock.end_frame() {
            info!(frames = clock.frames(), "frame cap reached");
            break;
        }
    }
    Ok(state)
}


#[cfg(test)]
use crate::render::TraceRenderer;

#[test]
fn test_demo_runs_to_frame_cap() {
    let settings = Settings::default();
    let mut renderer = TraceRenderer::new();
    let state = run_headless(&settings, settings.headless_frames, DEMO_SCRIPT, &mut renderer).unwrap();
    assert_eq!(state.frame(), 12);
    assert_eq!(renderer.frames_drawn(), 12);
    assert!(state.body.rect.pos.x > state.board.spawn.x);
    assert!(state.body.rect.pos.y > state.board.spawn.y);
}

#[test]
fn test_quit_stops_early() {
    let script = [press(2, KeyCode::Escape, "")];
    let mut renderer = TraceRenderer::new();
    let state = run_headless(&Settings::default(), 12, &script, &mut renderer).unwrap();
    assert!(state.quit_requested());
    assert_eq!(state.frame(), 2);
}

#[test]
fn test_cheat_code_switches_board() {
    let mut script = Vec::new();
    for (key, text) in [
        (KeyCode::Slash, "/"),
        (KeyCode::KeyB, "b"),
        (KeyCode::KeyV, "v"),
        (KeyCode::KeyA, "a"),
        (KeyCode::KeyU, "u"),
        (KeyCode::KeyL, "l"),
        (KeyCode::KeyT, "t"),
        (KeyCode::Enter, "\r"),
    ] {
        script.push(press(1, key, text));
        script.push(release(1, key));
    }
    let settings = Settings {
        start_board: "annex".to_owned(),
        ..Settings::default()
    };
    let mut renderer = TraceRenderer::new();
    let state = run_headless(&settings, 3, &script, &mut renderer).unwrap();
    assert_eq!(state.board.id, BoardId::Vault);
    // held a then released it, which shouldn't have moved the player
    assert_eq!(state.body.rect.pos.x, state.board.spawn.x);
}
