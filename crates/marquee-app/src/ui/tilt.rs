use serde::{Deserialize, Serialize};

const PERSPECTIVE_PX: f32 = 700.0;
const MAX_TILT_DEG: f32 = 5.0;
const PRESSED_SCALE: f32 = 0.98;

/// Client-space bounding box of a feature card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Hover tilt applied to a card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tilt {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

impl Tilt {
    /// Tilt towards the pointer; `None` for a collapsed rect.
    pub fn from_pointer(x: f32, y: f32, rect: &CardRect) -> Option<Self> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        let rel_x = (x - rect.left) / rect.width;
        let rel_y = (y - rect.top) / rect.height;
        Some(Self {
            rotate_x: (rel_y - 0.5) * MAX_TILT_DEG,
            rotate_y: (rel_x - 0.5) * -MAX_TILT_DEG,
        })
    }

    pub fn css(&self) -> String {
        format!(
            "perspective({PERSPECTIVE_PX}px) rotateX({}deg) rotateY({}deg) scale3d({PRESSED_SCALE}, {PRESSED_SCALE}, {PRESSED_SCALE})",
            self.rotate_x, self.rotate_y
        )
    }
}
