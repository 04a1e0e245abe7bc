use serde::{Deserialize, Serialize};

/// Vertical anchor within a box, as a fraction of its height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Top,
    Center,
    Bottom,
    /// Pixels below the top edge.
    Offset(f32),
}

impl Anchor {
    fn resolve(self, height: f32) -> f32 {
        match self {
            Anchor::Top => 0.0,
            Anchor::Center => height * 0.5,
            Anchor::Bottom => height,
            Anchor::Offset(px) => px,
        }
    }
}

/// "When `element` anchor meets `viewport` anchor".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerPoint {
    pub element: Anchor,
    pub viewport: Anchor,
}

impl TriggerPoint {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this trigger point is crossed.
    pub fn scroll_offset(&self, layout: &ElementBox, viewport_height: f32) -> f32 {
        layout.top + self.element.resolve(layout.height) - self.viewport.resolve(viewport_height)
    }
}

/// Document-space position of an element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub top: f32,
    pub height: f32,
}

/// Scroll offsets between which a linked animation scrubs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    pub fn from_triggers(
        start: TriggerPoint,
        end: TriggerPoint,
        layout: &ElementBox,
        viewport_height: f32,
    ) -> Self {
        Self {
            start: start.scroll_offset(layout, viewport_height),
            end: end.scroll_offset(layout, viewport_height),
        }
    }

    /// Linear progress of `y` through the range, clamped to 0..=1.
    pub fn progress(&self, y: f32) -> f32 {
        let span = self.end - self.start;
        if span.abs() < f32::EPSILON {
            return if y >= self.end { 1.0 } else { 0.0 };
        }
        ((y - self.start) / span).clamp(0.0, 1.0)
    }
}
