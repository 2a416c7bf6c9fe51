//! Static images such as service logos.

use std::path::Path;
use std::sync::Arc;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Shared reference to an image file. Decoding belongs to the device.
pub type ImageRef = Arc<Path>;

/// An image drawn at a fixed position, scaled to `size` when given.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticImage {
    pub image: ImageRef,
    pub position: Point,
    pub size: Option<Size>,
}

impl StaticImage {
    pub fn new(
        image: impl AsRef<Path>,
        position: Point,
        size: Option<Size>,
    ) -> Self {
        Self {
            image: Arc::from(image.as_ref()),
            position,
            size,
        }
    }

    /// Region covered by the image, when its size is known up front.
    #[inline]
    pub fn bounds(&self) -> Option<Rectangle> { self.size.map(|size| Rectangle::new(self.position, size)) }
}
