use derive_new::new;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its upper left and lower right corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, new)]
pub struct BoundingBox {
    /// Upper left x
    pub ulx: f32,

    /// Upper left y
    pub uly: f32,

    /// Lower right x
    pub lrx: f32,

    /// Lower right y
    pub lry: f32,

    /// Whether the coordinates are in pixels or relative to the image size
    pub absolute_coords: bool,
}

impl BoundingBox {
    /// Box width in the box's own coordinate system
    pub fn width(&self) -> f32 {
        self.lrx - self.ulx
    }

    /// Box height in the box's own coordinate system
    pub fn height(&self) -> f32 {
        self.lry - self.uly
    }

    /// Convert to pixel coordinates for an image of the given size
    pub fn to_absolute(&self, image_width: f32, image_height: f32) -> Self {
        if self.absolute_coords {
            return *self;
        }

        Self {
            ulx: self.ulx * image_width,
            uly: self.uly * image_height,
            lrx: self.lrx * image_width,
            lry: self.lry * image_height,
            absolute_coords: true,
        }
    }

    /// Convert to coordinates relative to an image of the given size
    pub fn to_relative(&self, image_width: f32, image_height: f32) -> Self {
        if !self.absolute_coords {
            return *self;
        }

        Self {
            ulx: self.ulx / image_width,
            uly: self.uly / image_height,
            lrx: self.lrx / image_width,
            lry: self.lry / image_height,
            absolute_coords: false,
        }
    }

    /// Scale the box onto an integer grid of `target_width x target_height`, as layout-aware
    /// language models expect. Coordinates are clamped to the grid.
    pub fn to_grid(
        &self,
        image_width: f32,
        image_height: f32,
        target_width: u32,
        target_height: u32,
    ) -> [i32; 4] {
        let rel = self.to_relative(image_width, image_height);

        let scale = |value: f32, target: u32| -> i32 {
            ((value * target as f32).round() as i32).clamp(0, target as i32)
        };

        [
            scale(rel.ulx, target_width),
            scale(rel.uly, target_height),
            scale(rel.lrx, target_width),
            scale(rel.lry, target_height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_to_grid_from_absolute() {
        let bbox = BoundingBox::new(100.0, 50.0, 300.0, 150.0, true);

        assert_eq!(bbox.to_grid(1000.0, 500.0, 1000, 1000), [100, 100, 300, 300]);
    }

    #[test]
    fn test_to_grid_clamps() {
        let bbox = BoundingBox::new(-0.1, 0.5, 1.2, 0.75, false);

        assert_eq!(bbox.to_grid(400.0, 400.0, 1000, 1000), [0, 500, 1000, 750]);
    }

    #[test]
    fn test_absolute_relative() {
        let bbox = BoundingBox::new(0.25, 0.5, 0.5, 1.0, false);
        let absolute = bbox.to_absolute(200.0, 100.0);

        assert_eq!(absolute, BoundingBox::new(50.0, 50.0, 100.0, 100.0, true));
        assert_eq!(absolute.to_relative(200.0, 100.0), bbox);
        assert_eq!(absolute.width(), 50.0);
    }
}
