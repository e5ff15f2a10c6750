//! Static board layouts.

use super::{
    Board,
    BoardId,
    Door,
};
use crate::{
    camera::{VIEW_W, VIEW_H},
    physics::aa_rect::AaRect,
};
use vek::*;


const FLOOR_H: f32 = 40.0;
const FLOOR_Y: f32 = VIEW_H - FLOOR_H;
const WALL_W: f32 = 40.0;
const DOOR_SIZE: Extent2<f32> = Extent2 { w: 50.0, h: 80.0 };

const PLATFORM_SIZE: Extent2<f32> = Extent2 { w: 200.0, h: 20.0 };
const CLIMB_PLATFORMS: usize = 59;
const CLIMB_STEP: f32 = 90.0;


fn door(x: f32, label: &'static str, target: BoardId) -> Door {
    Door {
        rect: AaRect::new(x, FLOOR_Y - DOOR_SIZE.h, DOOR_SIZE.w, DOOR_SIZE.h),
        label,
        target,
    }
}

// floor across the whole view plus tall walls just outside it
fn room() -> Vec<AaRect> {
    vec![
        AaRect::new(0.0, FLOOR_Y, VIEW_W, FLOOR_H),
        AaRect::new(-WALL_W, -5000.0, WALL_W, 10000.0),
        AaRect::new(VIEW_W, -5000.0, WALL_W, 10000.0),
    ]
}

/// Vertical climb of ascending platforms cycling through three columns.
pub fn climb() -> Board {
    let mut solids = room();

    let columns = [
        60.0,
        (VIEW_W / 2.0 - PLATFORM_SIZE.w / 2.0).floor(),
        VIEW_W - PLATFORM_SIZE.w - 60.0,
    ];
    let mut y = VIEW_H - 100.0;
    for i in 1..=CLIMB_PLATFORMS {
        y -= CLIMB_STEP;
        let x = columns[i % columns.len()];
        solids.push(AaRect::new(x, y, PLATFORM_SIZE.w, PLATFORM_SIZE.h));
    }

    Board {
        id: BoardId::Climb,
        solids,
        doors: vec![door(720.0, "Annex", BoardId::Annex)],
        spawn: Vec2::new(64.0, VIEW_H - 200.0),
        floor_y: FLOOR_Y,
    }
}

/// Low-ceilinged room with a ledge, between the climb and the vault.
pub fn annex() -> Board {
    let mut solids = room();
    solids.push(AaRect::new(0.0, 160.0, VIEW_W, 40.0));
    solids.push(AaRect::new(300.0, 440.0, PLATFORM_SIZE.w, PLATFORM_SIZE.h));
    solids.push(AaRect::new(520.0, 340.0, 120.0, PLATFORM_SIZE.h));

    Board {
        id: BoardId::Annex,
        solids,
        doors: vec![
            door(40.0, "Climb", BoardId::Climb),
            door(710.0, "Vault", BoardId::Vault),
        ],
        spawn: Vec2::new(200.0, 400.0),
        floor_y: FLOOR_Y,
    }
}

/// Narrow shaft with two steps.
pub fn vault() -> Board {
    let solids = vec![
        AaRect::new(200.0, FLOOR_Y, 400.0, FLOOR_H),
        AaRect::new(160.0, -400.0, WALL_W, VIEW_H + 400.0),
        AaRect::new(600.0, -400.0, WALL_W, VIEW_H + 400.0),
        AaRect::new(260.0, 460.0, 120.0, PLATFORM_SIZE.h),
        AaRect::new(420.0, 370.0, 120.0, PLATFORM_SIZE.h),
    ];

    Board {
        id: BoardId::Vault,
        solids,
        doors: vec![door(220.0, "Annex", BoardId::Annex)],
        spawn: Vec2::new(300.0, 400.0),
        floor_y: FLOOR_Y,
    }
}


#[test]
fn test_climb_platforms() {
    let board = climb();
    assert_eq!(board.solids.len(), 3 + CLIMB_PLATFORMS);
    let top = board.solids[3..].iter().map(|s| s.top()).fold(f32::INFINITY, f32::min);
    assert_eq!(top, VIEW_H - 100.0 - CLIMB_STEP * CLIMB_PLATFORMS as f32);
    assert_eq!(board.solids[3], AaRect::new(300.0, 410.0, 200.0, 20.0));
}
