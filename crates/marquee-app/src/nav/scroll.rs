use serde::Serialize;

/// Direction derived from the latest scroll sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    AtTop,
    Down,
    Up,
    Unchanged,
}

/// Scroll-derived nav state.
///
/// `is_visible` / `is_floating` depend only on the latest `(current_y, last_y)`
/// pair; an unchanged non-zero sample keeps whatever flags were there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollState {
    pub current_y: f32,
    pub last_y: f32,
    pub direction: ScrollDirection,
    pub is_visible: bool,
    pub is_floating: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            current_y: 0.0,
            last_y: 0.0,
            direction: ScrollDirection::AtTop,
            is_visible: true,
            is_floating: false,
        }
    }
}

impl ScrollState {
    /// Apply one scroll sample. Values are not validated.
    pub fn reduce(self, y: f32) -> Self {
        let last_y = self.current_y;
        let (direction, is_visible, is_floating) = if y == 0.0 {
            (ScrollDirection::AtTop, true, false)
        } else if y > last_y {
            (ScrollDirection::Down, false, true)
        } else if y < last_y {
            (ScrollDirection::Up, true, true)
        } else {
            (ScrollDirection::Unchanged, self.is_visible, self.is_floating)
        };
        Self {
            current_y: y,
            last_y,
            direction,
            is_visible,
            is_floating,
        }
    }

    /// Whether the displayed flags differ from `other`.
    pub fn flags_differ(&self, other: &ScrollState) -> bool {
        self.is_visible != other.is_visible || self.is_floating != other.is_floating
    }
}
