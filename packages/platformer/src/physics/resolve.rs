//! Axis-separated collision resolution against static solids.

use super::aa_rect::AaRect;
use vek::*;


/// Outcome of `resolve_collisions`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Resolved {
    /// Rect after movement and clamping.
    pub rect: AaRect,
    /// Horizontal displacement actually applied, zeroed if blocked.
    pub dx: f32,
    /// Vertical displacement actually applied, zeroed if blocked.
    pub dy: f32,
    /// Whether a downwards move was stopped by the top of a solid.
    pub grounded: bool,
    /// Whether an upwards move was stopped by the bottom of a solid.
    pub ceiling: bool,
}

/// Move `rect` by `<dx, dy>`, resolving collisions against `solids`.
///
/// Horizontal movement is resolved before vertical movement. On each axis, the first solid in
/// slice order which intersects the tentatively moved rect is the one clamped against, even if
/// some other solid is nearer. At most one solid is resolved per axis.
pub fn resolve_collisions(rect: AaRect, dx: f32, dy: f32, solids: &[AaRect]) -> Resolved {
    let mut grounded = false;
    let mut ceiling = false;
    let mut dx = dx;
    let mut dy = dy;

    // horizontal
    let mut moved = rect.translate(Vec2::new(dx, 0.0));
    if dx != 0.0 {
        if let Some(solid) = first_collision(moved, solids) {
            let x =
                if dx > 0.0 { solid.left() - rect.ext.w }
                else { solid.right() };
            moved = rect.with_pos(Vec2::new(x, rect.pos.y));
            dx = 0.0;
        }
    }

    // vertical
    let before_vertical = moved;
    moved = moved.translate(Vec2::new(0.0, dy));
    if dy != 0.0 {
        if let Some(solid) = first_collision(moved, solids) {
            let y =
                if dy > 0.0 {
                    grounded = true;
                    solid.top() - rect.ext.h
                } else {
                    ceiling = true;
                    solid.bottom()
                };
            moved = before_vertical.with_pos(Vec2::new(before_vertical.pos.x, y));
            dy = 0.0;
        }
    }

    Resolved {
        rect: moved,
        dx,
        dy,
        grounded,
        ceiling,
    }
}

/// First solid, in slice order, which intersects `rect`.
pub fn first_collision(rect: AaRect, solids: &[AaRect]) -> Option<AaRect> {
    solids.iter().copied().find(|&solid| rect.intersects(solid))
}


#[test]
fn test_no_solids_moves_freely() {
    let body = AaRect::new(0.0, 0.0, 10.0, 10.0);
    for &(dx, dy) in &[(5.0, 7.0), (-3.0, 0.0), (0.0, -12.5), (0.0, 0.0)] {
        let r = resolve_collisions(body, dx, dy, &[]);
        assert_eq!(r, Resolved {
            rect: body.translate(Vec2::new(dx, dy)),
            dx,
            dy,
            grounded: false,
            ceiling: false,
        });
    }
}

#[test]
fn test_horizontal_stops_at_wall() {
    let wall = AaRect::new(100.0, 0.0, 20.0, 200.0);
    let body = AaRect::new(60.0, 50.0, 40.0, 40.0);
    let r = resolve_collisions(body, 10.0, 0.0, &[wall]);
    assert_eq!(r.rect.right(), wall.left());
    assert_eq!(r.dx, 0.0);
    assert_eq!(r.dy, 0.0);
    assert!(!r.grounded);
    assert!(!r.ceiling);
}

#[test]
fn test_horizontal_stops_at_wall_moving_left() {
    let wall = AaRect::new(0.0, 0.0, 20.0, 200.0);
    let body = AaRect::new(25.0, 50.0, 40.0, 40.0);
    let r = resolve_collisions(body, -10.0, 0.0, &[wall]);
    assert_eq!(r.rect.left(), wall.right());
    assert_eq!(r.dx, 0.0);
    assert!(!r.rect.intersects(wall));
}

#[test]
fn test_lands_on_platform() {
    let platform = AaRect::new(0.0, 100.0, 200.0, 20.0);
    let body = AaRect::new(60.0, 60.0, 40.0, 40.0);
    let r = resolve_collisions(body, 0.0, 50.0, &[platform]);
    assert_eq!(r.rect.bottom(), platform.top());
    assert_eq!(r.dy, 0.0);
    assert!(r.grounded);
    assert!(!r.ceiling);
}

#[test]
fn test_hits_ceiling() {
    let ceiling = AaRect::new(0.0, 0.0, 200.0, 20.0);
    let body = AaRect::new(60.0, 30.0, 40.0, 40.0);
    let r = resolve_collisions(body, 0.0, -20.0, &[ceiling]);
    assert_eq!(r.rect.top(), ceiling.bottom());
    assert_eq!(r.dy, 0.0);
    assert!(r.ceiling);
    assert!(!r.grounded);
}

#[test]
fn test_diagonal_into_corner_resolves_horizontal_first() {
    let floor = AaRect::new(0.0, 100.0, 300.0, 20.0);
    let wall = AaRect::new(150.0, 0.0, 20.0, 100.0);
    let body = AaRect::new(100.0, 55.0, 40.0, 40.0);
    let r = resolve_collisions(body, 20.0, 20.0, &[floor, wall]);
    assert_eq!(r.rect.right(), wall.left());
    assert_eq!(r.rect.bottom(), floor.top());
    assert_eq!(r.dx, 0.0);
    assert_eq!(r.dy, 0.0);
    assert!(r.grounded);
}

#[test]
fn test_first_solid_in_order_wins() {
    let near = AaRect::new(0.0, 100.0, 200.0, 20.0);
    let far = AaRect::new(0.0, 110.0, 200.0, 20.0);
    let body = AaRect::new(60.0, 60.0, 40.0, 40.0);
    let r = resolve_collisions(body, 0.0, 55.0, &[far, near]);
    assert_eq!(r.rect.bottom(), far.top());
    let r = resolve_collisions(body, 0.0, 55.0, &[near, far]);
    assert_eq!(r.rect.bottom(), near.top());
}

#[test]
fn test_zero_displacement_is_idempotent() {
    let floor = AaRect::new(0.0, 100.0, 200.0, 20.0);
    let body = AaRect::new(60.0, 60.0, 40.0, 40.0);
    let a = resolve_collisions(body, 0.0, 0.0, &[floor]);
    let b = resolve_collisions(a.rect, 0.0, 0.0, &[floor]);
    assert_eq!(a.rect, body);
    assert_eq!(b, a);
    assert_eq!((a.dx, a.dy), (0.0, 0.0));
}

#[test]
fn test_resting_on_platform_stays_grounded() {
    let floor = AaRect::new(0.0, 100.0, 200.0, 20.0);
    let body = AaRect::new(60.0, 50.0, 40.0, 50.0);
    let r = resolve_collisions(body, 3.0, 0.5, &[floor]);
    assert!(r.grounded);
    assert_eq!(r.rect.bottom(), 100.0);
    assert_eq!(r.rect.left(), 63.0);
    assert_eq!(r.dx, 3.0);
}
