//! Physics system.
//!
//! Built around axis-aligned rects. The world geometry is a list of unmoveable solids, and the
//! player is a single rect which is moved through it one axis at a time:
//!
//! - `AaRect` is the geometric primitive, with exclusive (edge-touching doesn't count)
//!   intersection.
//! - `resolve_collisions` moves a rect by a displacement, clamping it against the first
//!   intersecting solid on each axis and reporting whether it landed or hit a ceiling.

pub mod aa_rect;
pub mod resolve;


/// Physics system common re-exports.
pub mod prelude {
    pub use super::{
        aa_rect::AaRect,
        resolve::{
            resolve_collisions,
            first_collision,
            Resolved,
        },
    };
}
