use thiserror::Error;

/// Errors relating to [`Bitmap`]s.
#[derive(Copy, Clone, Debug, Error)]
#[non_exhaustive]
pub enum BitmapError {
    /// The bitmap is not square, so it cannot be fingerprinted.
    #[error("Bitmap is not square: {}x{}", width, height)]
    NonSquareImage {
        /// The bitmap width in pixels.
        width: usize,

        /// The bitmap height in pixels.
        height: usize,
    },

    /// Pixel data length didn't match the width/height of the [`Bitmap`].
    #[error(
        "Wrong number of pixels for a {}x{} bitmap: Expected {}, got {}",
        width,
        height,
        expected,
        actual
    )]
    WrongPixelCount {
        /// The bitmap width in pixels.
        width: usize,

        /// The bitmap height in pixels.
        height: usize,

        /// The expected number of pixels.
        expected: usize,

        /// The actual number of pixels that was provided.
        actual: usize,
    },
}

/// An ARGB pixel raster holding a captured turn icon.
///
/// Each pixel is a packed `0xAARRGGBB` value, matching what screen-capture and
/// notification-icon sources hand over. Only the green and alpha channels
/// matter for recognition: navigation apps draw their turn icons in white on
/// transparent, and green tracks overall brightness well while staying cheap
/// to extract.
///
/// # Examples
///
/// ```
/// use navhud_core::Bitmap;
///
/// let mut bitmap = Bitmap::new(64, 64);
/// bitmap.set_pixel(3, 5, 0xFFFF_FFFF); // Opaque white
/// assert_eq!(0xFFFF_FFFF, bitmap.pixel(3, 5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Creates a new fully-transparent (all-zero) bitmap of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Bitmap {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Creates a bitmap from existing row-major ARGB pixel data.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`BitmapError::WrongPixelCount`] if the data
    /// length is not `width * height`.
    ///
    /// [`BitmapError::WrongPixelCount`]: enum.BitmapError.html#variant.WrongPixelCount
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, BitmapError> {
        if pixels.len() != width * height {
            return Err(BitmapError::WrongPixelCount {
                width,
                height,
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Bitmap { width, height, pixels })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel at the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height, "Pixel coordinates out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Sets the pixel at the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: u32) {
        assert!(x < self.width && y < self.height, "Pixel coordinates out of bounds");
        self.pixels[y * self.width + x] = pixel;
    }

    /// Replaces every pixel with opaque white or transparent black depending on
    /// whether its [`green_alpha`] brightness exceeds `threshold`.
    ///
    /// This removes antialiasing noise before the grid is sampled.
    ///
    /// [`green_alpha`]: fn.green_alpha.html
    pub fn binarize(&mut self, threshold: u32) {
        for pixel in &mut self.pixels {
            *pixel = if green_alpha(*pixel) > threshold { 0xFFFF_FFFF } else { 0 };
        }
    }

    /// Returns a copy scaled to `side` × `side` using nearest-neighbor sampling.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`BitmapError::NonSquareImage`] if this bitmap
    /// is not square.
    ///
    /// [`BitmapError::NonSquareImage`]: enum.BitmapError.html#variant.NonSquareImage
    pub fn resized(&self, side: usize) -> Result<Bitmap, BitmapError> {
        if self.width == side && self.height == side {
            return Ok(self.clone());
        }
        if self.width != self.height {
            return Err(BitmapError::NonSquareImage {
                width: self.width,
                height: self.height,
            });
        }

        let original_side = self.height;
        let ratio = original_side as f32 / side as f32;
        let mut resized = Bitmap::new(side, side);
        for y in 0..side {
            let y0 = ((y as f32 * ratio) as usize).min(original_side - 1);
            for x in 0..side {
                let x0 = ((x as f32 * ratio) as usize).min(original_side - 1);
                resized.set_pixel(x, y, self.pixel(x0, y0));
            }
        }
        Ok(resized)
    }
}

/// Computes the green-times-alpha brightness of an ARGB pixel, scaled back to 0–255.
///
/// # Examples
///
/// ```
/// use navhud_core::green_alpha;
///
/// assert_eq!(254, green_alpha(0xFFFF_FFFF)); // Opaque white
/// assert_eq!(0, green_alpha(0x00FF_FFFF));   // Fully transparent
/// assert_eq!(0, green_alpha(0xFFFF_00FF));   // No green
/// ```
pub fn green_alpha(pixel: u32) -> u32 {
    let alpha = (pixel >> 24) & 0xFF;
    let green = (pixel >> 8) & 0xFF;
    (green * alpha) >> 8
}
