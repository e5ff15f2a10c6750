//! Boards: named level layouts connected by doors.

pub mod layouts;

use crate::physics::aa_rect::AaRect;
use std::fmt;
use vek::*;


/// Identifier of a board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BoardId {
    /// The vertical climb. The default board.
    Climb,
    Annex,
    Vault,
}

impl BoardId {
    pub const ALL: [BoardId; 3] = [BoardId::Climb, BoardId::Annex, BoardId::Vault];

    pub const DEFAULT: BoardId = BoardId::Climb;

    pub fn name(self) -> &'static str {
        match self {
            BoardId::Climb => "climb",
            BoardId::Annex => "annex",
            BoardId::Vault => "vault",
        }
    }

    /// Look up a board by name, case-insensitively, or `None` if there is no such board.
    pub fn try_from_name(name: &str) -> Option<Self> {
        BoardId::ALL.iter().copied().find(|id| id.name().eq_ignore_ascii_case(name))
    }

    /// Look up a board by name, falling back to the default board if there is no such board.
    pub fn from_name(name: &str) -> Self {
        BoardId::try_from_name(name).unwrap_or_else(|| {
            warn!(%name, "unknown board, using {}", BoardId::DEFAULT);
            BoardId::DEFAULT
        })
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// Trigger region which leads to another board.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub rect: AaRect,
    pub label: &'static str,
    pub target: BoardId,
}

/// A loaded board.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: BoardId,
    /// Static impassable terrain, in resolution order.
    pub solids: Vec<AaRect>,
    pub doors: Vec<Door>,
    /// Player top-left corner position on entering the board.
    pub spawn: Vec2<f32>,
    /// Y of the floor surface, the base from which climbing progress is measured.
    pub floor_y: f32,
}

impl Board {
    pub fn load(id: BoardId) -> Self {
        match id {
            BoardId::Climb => layouts::climb(),
            BoardId::Annex => layouts::annex(),
            BoardId::Vault => layouts::vault(),
        }
    }
}

/// First door, in slice order, whose trigger region intersects `body`.
pub fn check_door(body: AaRect, doors: &[Door]) -> Option<&Door> {
    doors.iter().find(|door| door.rect.intersects(body))
}


#[test]
fn test_load_is_deterministic() {
    for id in BoardId::ALL {
        let board = Board::load(id);
        assert_eq!(board, Board::load(id));
        assert_eq!(board.id, id);
    }
}

#[test]
fn test_unknown_board_falls_back_to_default() {
    assert_eq!(Board::load(BoardId::from_name("no such board")).id, BoardId::DEFAULT);
    assert_eq!(BoardId::from_name(""), BoardId::DEFAULT);
    assert_eq!(BoardId::from_name("VAULT"), BoardId::Vault);
    assert_eq!(BoardId::try_from_name("nope"), None);
}

#[test]
fn test_board_names_round_trip() {
    for id in BoardId::ALL {
        assert_eq!(BoardId::from_name(id.name()), id);
        assert_eq!(id.to_string(), id.name());
    }
}

#[test]
fn test_check_door_first_in_order() {
    let doors = [
        Door { rect: AaRect::new(0.0, 0.0, 50.0, 80.0), label: "a", target: BoardId::Annex },
        Door { rect: AaRect::new(20.0, 0.0, 50.0, 80.0), label: "b", target: BoardId::Vault },
    ];
    let body = AaRect::new(30.0, 10.0, 10.0, 10.0);
    assert_eq!(check_door(body, &doors).map(|door| door.label), Some("a"));
    let body = AaRect::new(60.0, 10.0, 10.0, 10.0);
    assert_eq!(check_door(body, &doors).map(|door| door.label), Some("b"));
    let body = AaRect::new(70.0, 10.0, 10.0, 10.0);
    assert!(check_door(body, &doors).is_none());
    assert!(check_door(body, &[]).is_none());
}

#[test]
fn test_spawns_are_clear_of_solids() {
    for id in BoardId::ALL {
        let board = Board::load(id);
        let body = crate::movement::PlayerBody::new(board.spawn);
        for solid in &board.solids {
            assert!(!body.rect.intersects(*solid), "{} spawn inside {:?}", id, solid);
        }
    }
}

#[test]
fn test_doors_lead_to_other_boards() {
    for id in BoardId::ALL {
        let board = Board::load(id);
        assert!(!board.doors.is_empty());
        for door in &board.doors {
            assert_ne!(door.target, id);
            assert_eq!(door.rect.bottom(), board.floor_y, "{} door not on floor", door.label);
        }
    }
}
