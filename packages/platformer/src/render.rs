//! Read-only view of the game for drawing, and the seam to whatever draws it.

use crate::{
    board::Board,
    camera::VIEW_H,
    hud::{
        hud_lines,
        Progress,
    },
    movement::Tuning,
    physics::aa_rect::AaRect,
};
use anyhow::*;
use vek::*;


/// Everything needed to draw a frame.
#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub board: &'a Board,
    pub player: AaRect,
    pub camera_y: f32,
    pub grounded: bool,
    pub tuning: Tuning,
    pub progress: Progress,
    /// Label of the door the player is standing in, if any.
    pub door_label: Option<&'static str>,
    /// Cheat code text typed so far, if one is being typed.
    pub cheat_buffer: Option<String>,
}

impl<'a> RenderSnapshot<'a> {
    /// Convert a world-space rect to view space.
    pub fn to_view(&self, rect: AaRect) -> AaRect {
        rect.translate(Vec2::new(0.0, -self.camera_y))
    }

    /// Solids at least partially within the view, in view space.
    pub fn visible_solids(&self) -> impl Iterator<Item=AaRect> + '_ {
        self.board.solids.iter()
            .map(|&solid| self.to_view(solid))
            .filter(|solid| solid.bottom() > 0.0 && solid.top() < VIEW_H)
    }
}

/// Something which can draw frames.
pub trait Renderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()>;
}

/// Renderer which just logs the HUD whenever it changes.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    last_hud: Vec<String>,
    frames_drawn: u64,
}

impl TraceRenderer {
    pub fn new() -> Self {
        TraceRenderer::default()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl Renderer for TraceRenderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        self.frames_drawn += 1;
        let hud = hud_lines(snapshot);
        if hud != self.last_hud {
            debug!(frame = self.frames_drawn, visible_solids = snapshot.visible_solids().count(), "hud:\n{}", hud.join("\n"));
            self.last_hud = hud;
        }
        Ok(())
    }
}
