//! The whole mutable state of a running game, advanced one frame at a time.

use crate::{
    board::{
        check_door,
        Board,
        BoardId,
        Door,
    },
    camera::Camera,
    cheat_code::CheatCommand,
    hud::Progress,
    input::InputEvent,
    movement::{
        step_player,
        FrameInput,
        Horizontal,
        PlayerBody,
        Tuning,
    },
    physics::resolve::Resolved,
    render::RenderSnapshot,
};
use std::mem::take;


/// Active board, player, camera, and tuning.
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    pub body: PlayerBody,
    pub camera: Camera,
    pub tuning: Tuning,
    /// Tuning restored on reset.
    base_tuning: Tuning,
    /// Jump edges received since the last update.
    pending: FrameInput,
    quit: bool,
    frame: u64,
}

impl GameState {
    pub fn new(board: BoardId, tuning: Tuning) -> Self {
        let board = Board::load(board);
        let body = PlayerBody::new(board.spawn);
        GameState {
            camera: Camera::centered_on(body.rect.pos.y),
            board,
            body,
            tuning,
            base_tuning: tuning,
            pending: FrameInput::default(),
            quit: false,
            frame: 0,
        }
    }

    /// Replace the active board, putting the player at rest on its spawn point.
    pub fn switch_board(&mut self, id: BoardId) {
        info!(from = %self.board.id, to = %id, "switching board");
        self.board = Board::load(id);
        self.respawn();
    }

    /// Put the player back at the spawn point and restore the initial tuning.
    pub fn reset(&mut self) {
        info!(board = %self.board.id, "reset");
        self.tuning = self.base_tuning;
        self.respawn();
    }

    fn respawn(&mut self) {
        self.body = PlayerBody::new(self.board.spawn);
        self.camera.snap(self.body.rect.pos.y);
        self.pending = FrameInput::default();
    }

    /// Door the player is currently standing in, if any.
    pub fn overlapping_door(&self) -> Option<&Door> {
        check_door(self.body.rect, &self.board.doors)
    }

    pub fn apply_event(&mut self, event: InputEvent) {
        trace!(?event, "input event");
        match event {
            InputEvent::Quit => self.quit = true,
            InputEvent::Reset => self.reset(),
            InputEvent::JumpPressed => self.pending.jump_pressed = true,
            InputEvent::JumpOrEnterPressed => {
                let door_target = self.overlapping_door()
                    .filter(|_| self.body.grounded)
                    .map(|door| door.target);
                if let Some(target) = door_target {
                    self.switch_board(target);
                } else {
                    self.pending.jump_pressed = true;
                }
            }
            InputEvent::JumpReleased => self.pending.jump_released = true,
            InputEvent::GravityUp => self.tuning.adjust_gravity(1),
            InputEvent::GravityDown => self.tuning.adjust_gravity(-1),
            InputEvent::JumpSpeedUp => self.tuning.adjust_jump_speed(1),
            InputEvent::JumpSpeedDown => self.tuning.adjust_jump_speed(-1),
            InputEvent::Cheat(command) => match command {
                CheatCommand::SwitchBoard(name) => self.switch_board(BoardId::from_name(&name)),
                CheatCommand::Reset => self.reset(),
                CheatCommand::SetGravity(gravity) => self.tuning.set_gravity(gravity),
                CheatCommand::SetJumpSpeed(jump_speed) => self.tuning.set_jump_speed(jump_speed),
            },
        }
    }

    /// Advance by `dt` seconds with the given held movement direction.
    pub fn update(&mut self, dt: f32, horizontal: Horizontal) -> Resolved {
        let input = FrameInput {
            horizontal,
            ..take(&mut self.pending)
        };
        let resolved = step_player(&mut self.body, input, &self.tuning, dt, &self.board.solids);

        let pos = self.body.rect.pos;
        let vel = self.body.vel;
        info!("POS x={:.2} y={:.2} VEL vx={:.2} vy={:.2}", pos.x, pos.y, vel.x, vel.y);

        self.camera.follow(pos.y, dt);
        self.frame += 1;
        resolved
    }

    pub fn snapshot(&self, cheat_buffer: Option<&str>) -> RenderSnapshot<'_> {
        RenderSnapshot {
            board: &self.board,
            player: self.body.rect,
            camera_y: self.camera.y,
            grounded: self.body.grounded,
            tuning: self.tuning,
            progress: Progress::measure(&self.board, self.body.rect.pos.y),
            door_label: self.overlapping_door().map(|door| door.label),
            cheat_buffer: cheat_buffer.map(str::to_owned),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Number of updates so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}


#[cfg(test)]
const TEST_DT: f32 = 1.0 / 60.0;

#[cfg(test)]
fn settled(id: BoardId) -> GameState {
    let mut state = GameState::new(id, Tuning::default());
    for _ in 0..60 {
        state.update(TEST_DT, Horizontal::Neutral);
    }
    assert!(state.body.grounded);
    state
}

#[test]
fn test_settles_on_floor() {
    let state = settled(BoardId::Climb);
    assert_eq!(state.body.rect.bottom(), state.board.floor_y);
    assert_eq!(state.body.vel.y, 0.0);
    assert_eq!(state.frame(), 60);
}

#[test]
fn test_switch_board_resets_body() {
    let mut state = settled(BoardId::Climb);
    state.body.vel = vek::Vec2::new(123.0, -456.0);
    state.body.rect = state.body.rect.translate(vek::Vec2::new(300.0, -200.0));
    state.apply_event(InputEvent::JumpPressed);

    state.switch_board(BoardId::Vault);
    assert_eq!(state.board.id, BoardId::Vault);
    assert_eq!(state.body.rect.pos, state.board.spawn);
    assert_eq!(state.body.vel, vek::Vec2::zero());
    assert!(!state.body.grounded);
    assert_eq!(state.camera, Camera::centered_on(state.board.spawn.y));

    // the pending jump doesn't carry over
    state.update(TEST_DT, Horizontal::Neutral);
    assert!(state.body.vel.y > 0.0);
}

#[test]
fn test_enter_door_when_grounded() {
    let mut state = settled(BoardId::Climb);
    let door = state.board.doors[0].clone();
    state.body.rect = state.body.rect.with_pos(vek::Vec2::new(door.rect.left(), state.body.rect.pos.y));
    assert_eq!(state.overlapping_door().map(|d| d.label), Some(door.label));
    assert_eq!(state.snapshot(None).door_label, Some(door.label));

    state.apply_event(InputEvent::JumpOrEnterPressed);
    assert_eq!(state.board.id, door.target);
    assert_eq!(state.body.rect.pos, state.board.spawn);
}

#[test]
fn test_door_ignored_when_airborne() {
    let mut state = settled(BoardId::Climb);
    let door = state.board.doors[0].clone();
    state.body.rect = state.body.rect.with_pos(vek::Vec2::new(door.rect.left(), state.body.rect.pos.y - 10.0));
    state.body.grounded = false;
    state.apply_event(InputEvent::JumpOrEnterPressed);
    assert_eq!(state.board.id, BoardId::Climb);
}

#[test]
fn test_up_jumps_away_from_doors() {
    let mut state = settled(BoardId::Climb);
    assert!(state.overlapping_door().is_none());
    state.apply_event(InputEvent::JumpOrEnterPressed);
    state.update(TEST_DT, Horizontal::Neutral);
    assert_eq!(state.board.id, BoardId::Climb);
    assert!(state.body.vel.y < 0.0);
    assert!(!state.body.grounded);
}

#[test]
fn test_space_never_enters_door() {
    let mut state = settled(BoardId::Climb);
    let door = state.board.doors[0].clone();
    state.body.rect = state.body.rect.with_pos(vek::Vec2::new(door.rect.left(), state.body.rect.pos.y));
    state.apply_event(InputEvent::JumpPressed);
    state.update(TEST_DT, Horizontal::Neutral);
    assert_eq!(state.board.id, BoardId::Climb);
    assert!(state.body.vel.y < 0.0);
}

#[test]
fn test_tuning_events_and_reset() {
    let mut state = GameState::new(BoardId::Climb, Tuning::default());
    state.apply_event(InputEvent::GravityUp);
    state.apply_event(InputEvent::JumpSpeedDown);
    assert_eq!(state.tuning.gravity, 1800.0);
    assert_eq!(state.tuning.jump_speed, 780.0);
    state.apply_event(InputEvent::Cheat(CheatCommand::SetGravity(99999.0)));
    assert_eq!(state.tuning.gravity, crate::movement::MAX_GRAVITY);

    state.update(TEST_DT, Horizontal::Right);
    state.apply_event(InputEvent::Reset);
    assert_eq!(state.tuning, Tuning::default());
    assert_eq!(state.body.rect.pos, state.board.spawn);
    assert_eq!(state.body.vel, vek::Vec2::zero());
}

#[test]
fn test_cheat_switch_unknown_board_falls_back() {
    let mut state = GameState::new(BoardId::Vault, Tuning::default());
    state.apply_event(InputEvent::Cheat(CheatCommand::SwitchBoard("annex".to_owned())));
    assert_eq!(state.board.id, BoardId::Annex);
    state.apply_event(InputEvent::Cheat(CheatCommand::SwitchBoard("nowhere".to_owned())));
    assert_eq!(state.board.id, BoardId::DEFAULT);
}

#[test]
fn test_quit() {
    let mut state = GameState::new(BoardId::Climb, Tuning::default());
    assert!(!state.quit_requested());
    state.apply_event(InputEvent::Quit);
    assert!(state.quit_requested());
}

#[test]
fn test_snapshot() {
    let state = settled(BoardId::Climb);
    let snapshot = state.snapshot(Some("bva"));
    assert_eq!(snapshot.player, state.body.rect);
    assert!(snapshot.grounded);
    assert_eq!(snapshot.progress.climbed, state.board.floor_y - state.body.rect.pos.y);
    let view_player = snapshot.to_view(snapshot.player);
    assert_eq!(view_player.pos.y, state.body.rect.pos.y - state.camera.y);
    assert!(snapshot.visible_solids().count() > 0);
    let hud = crate::hud::hud_lines(&snapshot);
    assert!(hud.iter().any(|line| line == "On ground: yes"));
    assert!(hud.iter().any(|line| line == "Board: climb"));
    assert!(hud.iter().any(|line| line == "> /bva_"));
}
