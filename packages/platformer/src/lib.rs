//! Tiny Platformer: climb a tower of platforms, and wander between rooms through doors.
//!
//! The simulation is a pure function of the previous `GameState`, this frame's input events, and
//! the elapsed time. Windowing, input, and drawing sit around it in `app` and `headless`.

#[macro_use]
extern crate tracing;

pub mod physics;
pub mod movement;
pub mod board;
pub mod camera;
pub mod hud;
pub mod cheat_code;
pub mod input;
pub mod game_state;
pub mod render;
pub mod frame_clock;
pub mod settings;
pub mod logging;
pub mod headless;
pub mod app;
