//! Heads-up display: climbing progress and status text.

use crate::{
    board::Board,
    camera::VIEW_W,
    render::RenderSnapshot,
};


/// Solids narrower than this don't count as climbable platforms.
const MIN_PLATFORM_W: f32 = 100.0;


/// How far the player has climbed towards the highest platform of a board.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Progress {
    /// Pixels above the floor, never negative.
    pub climbed: f32,
    /// Pixels from the floor to the highest platform, at least 1.
    pub total: f32,
    /// `climbed / total`, clamped to `[0, 1]`.
    pub fraction: f32,
}

impl Progress {
    /// Progress of a player whose top is at `player_y`.
    pub fn measure(board: &Board, player_y: f32) -> Self {
        let base_y = board.floor_y;
        let total = (base_y - climb_top(board)).max(1.0);
        let climbed = (base_y - player_y).max(0.0);
        Progress {
            climbed,
            total,
            fraction: (climbed / total).clamp(0.0, 1.0),
        }
    }
}

/// Y of the highest wide in-view solid of `board`.
pub fn climb_top(board: &Board) -> f32 {
    board.solids.iter()
        .filter(|s| s.left() >= 0.0 && s.left() < VIEW_W && s.ext.w >= MIN_PLATFORM_W)
        .map(|s| s.top())
        .reduce(f32::min)
        .unwrap_or(board.floor_y - 1.0)
}

const HELP_LINES: &'static [&'static str] = &[
    "A/D or Left/Right: Move",
    "Space/W/Up: Jump (W/Up at a door: Enter)",
    "PgUp/PgDn: Gravity +/-",
    "-/=: Jump strength -/+",
    "R: Reset, Esc: Quit, /: Cheat",
];

/// Text lines to display for a frame.
pub fn hud_lines(snapshot: &RenderSnapshot) -> Vec<String> {
    let progress = snapshot.progress;
    let mut lines = HELP_LINES.iter()
        .map(|&line| line.to_owned())
        .collect::<Vec<_>>();
    lines.push(format!("Board: {}", snapshot.board.id));
    lines.push(format!("On ground: {}", if snapshot.grounded { "yes" } else { "no" }));
    lines.push(format!("Gravity: {:.0} px/s^2", snapshot.tuning.gravity));
    lines.push(format!("Jump: {:.0} px/s", snapshot.tuning.jump_speed));
    lines.push(format!(
        "Height: {:.0} / {:.0} px ({:.0}%)",
        progress.climbed,
        progress.total,
        progress.fraction * 100.0,
    ));
    if let Some(label) = snapshot.door_label {
        lines.push(format!("Door to {}: press Up to enter", label));
    }
    if let Some(ref buffer) = snapshot.cheat_buffer {
        lines.push(format!("> /{}_", buffer));
    }
    lines
}


#[test]
fn test_progress_on_climb() {
    let board = Board::load(crate::board::BoardId::Climb);
    let top = climb_top(&board);
    assert_eq!(top, -4810.0);

    let p = Progress::measure(&board, board.floor_y + 100.0);
    assert_eq!(p.climbed, 0.0);
    assert_eq!(p.fraction, 0.0);

    let p = Progress::measure(&board, board.floor_y - 537.0);
    assert_eq!(p.total, 5370.0);
    assert_eq!(p.climbed, 537.0);
    assert!((p.fraction - 0.1).abs() < 1e-6);

    let p = Progress::measure(&board, -9000.0);
    assert_eq!(p.fraction, 1.0);
}

#[test]
fn test_progress_on_flat_board() {
    let mut board = Board::load(crate::board::BoardId::Vault);
    board.solids.clear();
    assert_eq!(climb_top(&board), board.floor_y - 1.0);
    let p = Progress::measure(&board, board.floor_y - 50.0);
    assert_eq!(p.total, 1.0);
    assert_eq!(p.fraction, 1.0);
}
