use serde::{Deserialize, Serialize};

/// Bounding box of a focusable region in viewport coordinates.
///
/// Units are pixel equivalents; terminal hosts scale their cell grid so that
/// dead-zone and padding settings keep the same meaning on every surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Zero-area or non-finite boxes belong to regions that are not laid out
    /// (virtualized rows, hidden sections) and never take part in a search.
    pub fn is_renderable(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_edges() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(b.center(), (60.0, 45.0));
        assert_eq!(b.right(), 110.0);
        assert_eq!(b.bottom(), 70.0);
    }

    #[test]
    fn test_zero_area_is_not_renderable() {
        assert!(!Bounds::new(0.0, 0.0, 0.0, 40.0).is_renderable());
        assert!(!Bounds::new(0.0, 0.0, 40.0, 0.0).is_renderable());
        assert!(!Bounds::new(f32::NAN, 0.0, 40.0, 40.0).is_renderable());
        assert!(Bounds::new(-30.0, -30.0, 40.0, 40.0).is_renderable());
    }
}
