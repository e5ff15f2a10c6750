//! Per-frame player motion: input acceleration, friction, gravity, and jumping.

use crate::physics::prelude::*;
use vek::*;


pub const MOVE_ACCEL: f32 = 8000.0;
pub const MOVE_MAX_SPEED: f32 = 300.0;
/// Horizontal velocity decay rate per second when grounded.
pub const GROUND_FRICTION: f32 = 8.0;
/// Horizontal velocity decay rate per second when airborne.
pub const AIR_FRICTION: f32 = 1.5;
pub const MAX_FALL_SPEED: f32 = 1000.0;
/// Multiplier applied to upwards velocity when jump is released early.
pub const JUMP_CUT: f32 = 0.45;
pub const COYOTE_TIME: f32 = 0.12;
pub const JUMP_BUFFER: f32 = 0.12;

pub const DEFAULT_GRAVITY: f32 = 1700.0;
pub const MIN_GRAVITY: f32 = 100.0;
pub const MAX_GRAVITY: f32 = 4000.0;
pub const GRAVITY_STEP: f32 = 100.0;

pub const DEFAULT_JUMP_SPEED: f32 = 820.0;
pub const MIN_JUMP_SPEED: f32 = 200.0;
pub const MAX_JUMP_SPEED: f32 = 2000.0;
pub const JUMP_SPEED_STEP: f32 = 40.0;

pub const PLAYER_SIZE: Extent2<f32> = Extent2 { w: 40.0, h: 50.0 };


/// Runtime-adjustable physics parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tuning {
    /// Gravity in px/s², within `[MIN_GRAVITY, MAX_GRAVITY]`.
    pub gravity: f32,
    /// Initial upwards speed of a jump in px/s, within `[MIN_JUMP_SPEED, MAX_JUMP_SPEED]`.
    pub jump_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            gravity: DEFAULT_GRAVITY,
            jump_speed: DEFAULT_JUMP_SPEED,
        }
    }
}

impl Tuning {
    /// Construct with both values clamped into range.
    pub fn new(gravity: f32, jump_speed: f32) -> Self {
        let mut tuning = Tuning::default();
        tuning.set_gravity(gravity);
        tuning.set_jump_speed(jump_speed);
        tuning
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity.clamp(MIN_GRAVITY, MAX_GRAVITY);
    }

    pub fn set_jump_speed(&mut self, jump_speed: f32) {
        self.jump_speed = jump_speed.clamp(MIN_JUMP_SPEED, MAX_JUMP_SPEED);
    }

    pub fn adjust_gravity(&mut self, steps: i32) {
        self.set_gravity(self.gravity + GRAVITY_STEP * steps as f32);
    }

    pub fn adjust_jump_speed(&mut self, steps: i32) {
        self.set_jump_speed(self.jump_speed + JUMP_SPEED_STEP * steps as f32);
    }
}


/// Coyote time and jump buffer timers, in seconds remaining.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct JumpTimers {
    pub coyote: f32,
    pub buffer: f32,
}

impl JumpTimers {
    /// Remember a jump request for the next `JUMP_BUFFER` seconds.
    pub fn request_jump(&mut self) {
        self.buffer = JUMP_BUFFER;
    }

    /// Advance timers by `dt`, given whether the body is currently grounded. Returns whether a
    /// jump should fire now, in which case the buffered request is consumed.
    pub fn tick(&mut self, dt: f32, grounded: bool) -> bool {
        if grounded {
            self.coyote = COYOTE_TIME;
        } else {
            self.coyote = (self.coyote - dt).max(0.0);
        }
        self.buffer = (self.buffer - dt).max(0.0);

        if self.buffer > 0.0 && (grounded || self.coyote > 0.0) {
            self.buffer = 0.0;
            true
        } else {
            false
        }
    }
}


/// Held horizontal movement direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Horizontal {
    Left,
    #[default]
    Neutral,
    Right,
}

impl Horizontal {
    /// Direction from which of the left and right keys are held. Both cancel out.
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Horizontal::Left,
            (false, true) => Horizontal::Right,
            _ => Horizontal::Neutral,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Horizontal::Left => -1.0,
            Horizontal::Neutral => 0.0,
            Horizontal::Right => 1.0,
        }
    }
}

/// Input to a single motion step.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FrameInput {
    pub horizontal: Horizontal,
    /// Jump was pressed since the last step.
    pub jump_pressed: bool,
    /// Jump was released since the last step.
    pub jump_released: bool,
}


/// The player's physical state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayerBody {
    pub rect: AaRect,
    pub vel: Vec2<f32>,
    pub grounded: bool,
    pub timers: JumpTimers,
}

impl PlayerBody {
    /// Body at rest with its top-left corner at `spawn`.
    pub fn new(spawn: Vec2<f32>) -> Self {
        PlayerBody {
            rect: AaRect::new(spawn.x, spawn.y, PLAYER_SIZE.w, PLAYER_SIZE.h),
            vel: Vec2::zero(),
            grounded: false,
            timers: JumpTimers::default(),
        }
    }
}

/// Advance `body` by `dt` seconds through `solids`.
pub fn step_player(
    body: &mut PlayerBody,
    input: FrameInput,
    tuning: &Tuning,
    dt: f32,
    solids: &[AaRect],
) -> Resolved {
    if input.jump_pressed {
        body.timers.request_jump();
    }
    if input.jump_released && body.vel.y < 0.0 {
        body.vel.y *= JUMP_CUT;
    }

    // horizontal acceleration or friction
    let dir = input.horizontal.sign();
    if dir == 0.0 {
        let friction = if body.grounded { GROUND_FRICTION } else { AIR_FRICTION };
        body.vel.x -= body.vel.x * friction * dt;
    } else {
        body.vel.x += dir * MOVE_ACCEL * dt;
        body.vel.x = body.vel.x.clamp(-MOVE_MAX_SPEED, MOVE_MAX_SPEED);
    }

    // jumping
    if body.timers.tick(dt, body.grounded) {
        trace!("jump");
        body.vel.y = -tuning.jump_speed;
        body.grounded = false;
    }

    // gravity
    body.vel.y += tuning.gravity * dt;
    body.vel.y = body.vel.y.min(MAX_FALL_SPEED);

    // movement and collision
    let dx = body.vel.x * dt;
    let dy = body.vel.y * dt;
    let resolved = resolve_collisions(body.rect, dx, dy, solids);
    body.rect = resolved.rect;
    if resolved.dx != dx {
        body.vel.x = 0.0;
    }
    if resolved.dy != dy || resolved.grounded || resolved.ceiling {
        body.vel.y = 0.0;
    }
    body.grounded = resolved.grounded;

    resolved
}


#[cfg(test)]
const TEST_DT: f32 = 1.0 / 60.0;

#[test]
fn test_coyote_time_allows_late_jump() {
    for &(airborne_ticks, should_jump) in &[(10, true), (13, false)] {
        let mut timers = JumpTimers::default();
        assert!(!timers.tick(0.01, true));
        for _ in 0..airborne_ticks - 1 {
            assert!(!timers.tick(0.01, false));
        }
        timers.request_jump();
        assert_eq!(timers.tick(0.01, false), should_jump, "after {} ticks", airborne_ticks);
    }
}

#[test]
fn test_jump_buffer_fires_on_landing() {
    for &(ticks_until_landing, should_jump) in &[(10, true), (13, false)] {
        let mut timers = JumpTimers::default();
        timers.request_jump();
        for _ in 0..ticks_until_landing - 1 {
            assert!(!timers.tick(0.01, false));
        }
        assert_eq!(timers.tick(0.01, true), should_jump, "after {} ticks", ticks_until_landing);
    }
}

#[test]
fn test_buffered_jump_fires_after_landing_frame() {
    let floor = AaRect::new(0.0, 100.0, 400.0, 40.0);
    let mut body = PlayerBody::new(Vec2::new(100.0, 100.0 - PLAYER_SIZE.h - 2.0));
    let tuning = Tuning::default();

    let input = FrameInput { jump_pressed: true, ..FrameInput::default() };
    step_player(&mut body, input, &tuning, TEST_DT, &[floor]);
    assert!(!body.grounded);
    step_player(&mut body, FrameInput::default(), &tuning, TEST_DT, &[floor]);
    assert!(!body.grounded);
    step_player(&mut body, FrameInput::default(), &tuning, TEST_DT, &[floor]);
    assert!(body.grounded);
    assert_eq!(body.rect.bottom(), floor.top());
    assert_eq!(body.vel.y, 0.0);

    step_player(&mut body, FrameInput::default(), &tuning, TEST_DT, &[floor]);
    assert!(!body.grounded);
    assert_eq!(body.vel.y, -tuning.jump_speed + tuning.gravity * TEST_DT);
    assert!(body.rect.bottom() < floor.top());
}

#[test]
fn test_no_jump_without_ground() {
    let mut body = PlayerBody::new(Vec2::new(0.0, 0.0));
    let tuning = Tuning::default();
    let input = FrameInput { jump_pressed: true, ..FrameInput::default() };
    step_player(&mut body, input, &tuning, TEST_DT, &[]);
    assert!(body.vel.y > 0.0);
}

#[test]
fn test_horizontal_speed_clamped() {
    let mut body = PlayerBody::new(Vec2::new(0.0, 0.0));
    let tuning = Tuning::default();
    let input = FrameInput { horizontal: Horizontal::Right, ..FrameInput::default() };
    for _ in 0..30 {
        step_player(&mut body, input, &tuning, TEST_DT, &[]);
    }
    assert_eq!(body.vel.x, MOVE_MAX_SPEED);
    let input = FrameInput { horizontal: Horizontal::Left, ..FrameInput::default() };
    for _ in 0..30 {
        step_player(&mut body, input, &tuning, TEST_DT, &[]);
    }
    assert_eq!(body.vel.x, -MOVE_MAX_SPEED);
}

#[test]
fn test_ground_friction_decays_faster_than_air() {
    let floor = AaRect::new(-1000.0, 100.0, 4000.0, 40.0);
    let tuning = Tuning::default();

    let mut grounded = PlayerBody::new(Vec2::new(0.0, 100.0 - PLAYER_SIZE.h));
    grounded.grounded = true;
    grounded.vel.x = 200.0;
    let mut airborne = PlayerBody::new(Vec2::new(0.0, -1000.0));
    airborne.vel.x = 200.0;

    step_player(&mut grounded, FrameInput::default(), &tuning, TEST_DT, &[floor]);
    step_player(&mut airborne, FrameInput::default(), &tuning, TEST_DT, &[floor]);
    assert!(grounded.vel.x < airborne.vel.x);
    assert!(grounded.vel.x > 0.0);
    assert!(airborne.vel.x < 200.0);
}

#[test]
fn test_fall_speed_clamped() {
    let mut body = PlayerBody::new(Vec2::new(0.0, 0.0));
    let tuning = Tuning::new(MAX_GRAVITY, DEFAULT_JUMP_SPEED);
    for _ in 0..60 {
        step_player(&mut body, FrameInput::default(), &tuning, TEST_DT, &[]);
    }
    assert_eq!(body.vel.y, MAX_FALL_SPEED);
}

#[test]
fn test_jump_release_cuts_upwards_velocity() {
    let mut body = PlayerBody::new(Vec2::new(0.0, 0.0));
    body.vel.y = -500.0;
    let tuning = Tuning::default();
    let input = FrameInput { jump_released: true, ..FrameInput::default() };
    step_player(&mut body, input, &tuning, TEST_DT, &[]);
    assert_eq!(body.vel.y, -500.0 * JUMP_CUT + tuning.gravity * TEST_DT);

    let mut falling = PlayerBody::new(Vec2::new(0.0, 0.0));
    falling.vel.y = 100.0;
    step_player(&mut falling, input, &tuning, TEST_DT, &[]);
    assert_eq!(falling.vel.y, 100.0 + tuning.gravity * TEST_DT);
}

#[test]
fn test_wall_zeroes_horizontal_velocity() {
    let wall = AaRect::new(43.0, -500.0, 20.0, 1000.0);
    let mut body = PlayerBody::new(Vec2::new(0.0, 0.0));
    body.vel.x = 300.0;
    let input = FrameInput { horizontal: Horizontal::Right, ..FrameInput::default() };
    step_player(&mut body, input, &Tuning::default(), TEST_DT, &[wall]);
    assert_eq!(body.vel.x, 0.0);
    assert_eq!(body.rect.right(), wall.left());
}

#[test]
fn test_tuning_clamped() {
    let mut tuning = Tuning::default();
    tuning.adjust_gravity(100);
    assert_eq!(tuning.gravity, MAX_GRAVITY);
    tuning.adjust_gravity(-100);
    assert_eq!(tuning.gravity, MIN_GRAVITY);
    tuning.adjust_jump_speed(-100);
    assert_eq!(tuning.jump_speed, MIN_JUMP_SPEED);
    tuning.set_jump_speed(9999.0);
    assert_eq!(tuning.jump_speed, MAX_JUMP_SPEED);
    assert_eq!(Tuning::new(0.0, 0.0), Tuning { gravity: MIN_GRAVITY, jump_speed: MIN_JUMP_SPEED });
}
