//! Vertically following camera.

/// Logical view width in pixels.
pub const VIEW_W: f32 = 800.0;
/// Logical view height in pixels.
pub const VIEW_H: f32 = 600.0;

/// Rate at which the camera closes the distance to its target, per second.
const FOLLOW_RATE: f32 = 5.0;


/// Camera with a vertical offset. The view is a fixed width, so there is no horizontal offset.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Camera {
    /// World y of the top of the view.
    pub y: f32,
}

impl Camera {
    /// Camera already centered on a player whose top is at `player_y`.
    pub fn centered_on(player_y: f32) -> Self {
        Camera {
            y: Self::target(player_y),
        }
    }

    fn target(player_y: f32) -> f32 {
        player_y - VIEW_H * 0.5
    }

    /// Ease towards centering on `player_y`.
    pub fn follow(&mut self, player_y: f32, dt: f32) {
        let target = Self::target(player_y);
        self.y += (target - self.y) * (dt * FOLLOW_RATE).min(1.0);
    }

    /// Jump straight to centering on `player_y`.
    pub fn snap(&mut self, player_y: f32) {
        *self = Camera::centered_on(player_y);
    }
}


#[test]
fn test_camera_follow() {
    let mut camera = Camera::default();
    camera.follow(400.0, 0.1);
    assert_eq!(camera.y, 50.0);
    camera.follow(400.0, 1.0);
    assert_eq!(camera.y, 100.0);
    camera.follow(400.0, 1.0);
    assert_eq!(camera.y, 100.0);
    camera.snap(1000.0);
    assert_eq!(camera.y, 700.0);
}
