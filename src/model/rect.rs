//! Rectangle value used by the layout pass

use serde::{Deserialize, Serialize};

use super::Orientation;

/// Rectangle for layout calculations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Extent along the axis children of a row with `orientation` are stacked on
    pub fn main_extent(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Build the slice `[offset, offset + size)` of this rect along the main axis
    pub(crate) fn slice(&self, orientation: Orientation, offset: f32, size: f32) -> Rect {
        match orientation {
            Orientation::Horizontal => Rect::new(self.x + offset, self.y, size, self.height),
            Orientation::Vertical => Rect::new(self.x, self.y + offset, self.width, size),
        }
    }

    /// Remove a band of `height` pixels from the top, returning `(band, rest)`
    pub(crate) fn split_top(&self, height: f32) -> (Rect, Rect) {
        let band = height.clamp(0.0, self.height);
        (
            Rect::new(self.x, self.y, self.width, band),
            Rect::new(self.x, self.y + band, self.width, self.height - band),
        )
    }

    pub(crate) fn is_valid_viewport(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_uses_exclusive_upper_bounds() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(10.0, 20.0));
        assert!(rect.contains(50.0, 40.0));
        assert!(!rect.contains(110.0, 40.0));
        assert!(!rect.contains(50.0, 70.0));
    }

    #[test]
    fn test_split_top_clamps_band() {
        let rect = Rect::new(0.0, 0.0, 100.0, 30.0);
        let (band, rest) = rect.split_top(40.0);
        assert_eq!(band.height, 30.0);
        assert_eq!(rest.height, 0.0);
        assert_eq!(rest.y, 30.0);
    }

    #[test]
    fn test_slice_follows_orientation() {
        let rect = Rect::new(5.0, 5.0, 200.0, 100.0);
        assert_eq!(
            rect.slice(Orientation::Horizontal, 10.0, 50.0),
            Rect::new(15.0, 5.0, 50.0, 100.0)
        );
        assert_eq!(
            rect.slice(Orientation::Vertical, 10.0, 50.0),
            Rect::new(5.0, 15.0, 200.0, 50.0)
        );
    }

    #[test]
    fn test_viewport_validation() {
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_valid_viewport());
        assert!(!Rect::new(0.0, 0.0, -1.0, 10.0).is_valid_viewport());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 10.0).is_valid_viewport());
    }
}
