use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pixel rectangle of a view on screen, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of `size` pixels in the bottom-right corner of `outer`, `margin` pixels in.
    pub fn bottom_right(outer: &Viewport, size: f64, margin: f64) -> Self {
        Self::new(
            outer.x + outer.width - size - margin,
            outer.y + outer.height - size - margin,
            size,
            size,
        )
    }

    pub fn contains(&self, pos: DVec2) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    /// Pixel position to normalized device coordinates (y up).
    pub fn to_ndc(&self, pos: DVec2) -> DVec2 {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        DVec2::new(
            (pos.x - self.x) / width * 2.0 - 1.0,
            1.0 - (pos.y - self.y) / height * 2.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerGesture {
    Click(DVec2),
    Drag,
}

/// Tells clicks from drags by how far the pointer travelled between press and release.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    threshold: f64,
    down_at: Option<DVec2>,
    last: Option<DVec2>,
}

impl PointerTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            down_at: None,
            last: None,
        }
    }

    pub fn is_down(&self) -> bool {
        self.down_at.is_some()
    }

    pub fn press(&mut self, pos: DVec2) {
        self.down_at = Some(pos);
        self.last = Some(pos);
    }

    /// Movement since the previous press/move while the button is held.
    pub fn drag_delta(&mut self, pos: DVec2) -> Option<DVec2> {
        self.down_at?;
        let previous = self.last.replace(pos)?;
        Some(pos - previous)
    }

    /// Release without a matching press counts as a drag.
    pub fn release(&mut self, pos: DVec2) -> PointerGesture {
        self.last = None;
        match self.down_at.take() {
            Some(start) if start.distance(pos) < self.threshold => PointerGesture::Click(pos),
            _ => PointerGesture::Drag,
        }
    }
}
