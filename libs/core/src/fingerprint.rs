use std::fmt;

use crate::bitmap::{green_alpha, Bitmap, BitmapError};

/// Cells per side of the sampling grid.
pub const GRID_LEN: usize = 8;

/// Total cells in a fingerprint.
pub const CELL_COUNT: usize = GRID_LEN * GRID_LEN;

/// Side length of the intermediate canvas icons are normalized onto.
pub const CANVAS_SIDE: usize = 132;

/// Brightness above which a raw pixel counts as lit during binarization.
pub const BINARY_THRESHOLD: u32 = 200;

/// Brightness at or above which a sampled grid cell counts as lit.
pub const BRIGHT_THRESHOLD: u32 = 254;

const CELL_STRIDE: usize = CANVAS_SIDE / GRID_LEN; // 16

/// An 8×8 brightness signature condensed from a turn-icon bitmap.
///
/// Cells are packed into a `u64` least-significant-bit first in row-major
/// order, so bit `row * 8 + col` holds the cell at `(col, row)`. Two
/// fingerprints are compared by Hamming distance over the first 63 cells; the
/// final cell sits in the icon's corner and carries no shape information, so
/// it is excluded from every comparison.
///
/// # Examples
///
/// ```
/// use navhud_core::Fingerprint;
///
/// let fingerprint = Fingerprint::from_value(0b101);
/// assert!(fingerprint.bit(0));
/// assert!(!fingerprint.bit(1));
/// assert!(fingerprint.bit(2));
/// assert_eq!(2, fingerprint.distance(0b110));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    value: u64,
}

impl Fingerprint {
    /// Condenses a square icon bitmap down to a fingerprint.
    ///
    /// The bitmap is binarized against [`BINARY_THRESHOLD`], normalized onto a
    /// [`CANVAS_SIDE`]-pixel square canvas, and sampled on an 8×8 grid; each
    /// cell lights up when its sample point is at least [`BRIGHT_THRESHOLD`]
    /// bright.
    ///
    /// # Errors
    ///
    /// Returns an error of kind [`BitmapError::NonSquareImage`] if the bitmap
    /// is not square.
    ///
    /// # Examples
    ///
    /// ```
    /// use navhud_core::{Bitmap, Fingerprint};
    ///
    /// let dark = Bitmap::new(132, 132);
    /// assert_eq!(0, Fingerprint::extract(&dark)?.value());
    /// # Ok::<(), navhud_core::BitmapError>(())
    /// ```
    ///
    /// [`BINARY_THRESHOLD`]: constant.BINARY_THRESHOLD.html
    /// [`CANVAS_SIDE`]: constant.CANVAS_SIDE.html
    /// [`BRIGHT_THRESHOLD`]: constant.BRIGHT_THRESHOLD.html
    /// [`BitmapError::NonSquareImage`]: enum.BitmapError.html#variant.NonSquareImage
    pub fn extract(bitmap: &Bitmap) -> Result<Self, BitmapError> {
        let mut normalized = bitmap.clone();
        normalized.binarize(BINARY_THRESHOLD);
        let normalized = normalized.resized(CANVAS_SIDE)?;

        let mut value = 0u64;
        for row in 0..GRID_LEN {
            for col in 0..GRID_LEN {
                let pixel = normalized.pixel(col * CELL_STRIDE, row * CELL_STRIDE);
                if green_alpha(pixel) >= BRIGHT_THRESHOLD {
                    value |= 1 << (row * GRID_LEN + col);
                }
            }
        }
        Ok(Fingerprint { value })
    }

    /// Creates a fingerprint directly from its packed cell value.
    pub fn from_value(value: u64) -> Self {
        Fingerprint { value }
    }

    /// Returns the packed cell value.
    pub fn value(self) -> u64 {
        self.value
    }

    /// Returns whether cell `index` (0–63, row-major) is lit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 64 or greater.
    pub fn bit(self, index: usize) -> bool {
        assert!(index < CELL_COUNT, "Cell index out of bounds");
        self.value >> index & 1 == 1
    }

    /// Returns the Hamming distance to a template over the first 63 cells.
    ///
    /// The final cell (bit 63) is ignored.
    pub fn distance(self, template: u64) -> u32 {
        const MASK: u64 = !(1 << (CELL_COUNT - 1));
        ((self.value ^ template) & MASK).count_ones()
    }
}

impl fmt::Display for Fingerprint {
    /// Formats the fingerprint as an 8×8 grid of `#` and `.` cells.
    ///
    /// # Examples
    ///
    /// ```
    /// use navhud_core::Fingerprint;
    ///
    /// let fingerprint = Fingerprint::from_value(0x0102);
    /// let grid = fingerprint.to_string();
    /// assert!(grid.starts_with(".#......\n#......."));
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_LEN {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..GRID_LEN {
                let cell = if self.bit(row * GRID_LEN + col) { '#' } else { '.' };
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Builds a square bitmap whose grid sample points are lit according to
    // the bits of `value`.
    fn bitmap_for(value: u64) -> Bitmap {
        let mut bitmap = Bitmap::new(CANVAS_SIDE, CANVAS_SIDE);
        for row in 0..GRID_LEN {
            for col in 0..GRID_LEN {
                if value >> (row * GRID_LEN + col) & 1 == 1 {
                    bitmap.set_pixel(col * CELL_STRIDE, row * CELL_STRIDE, 0xFFFF_FFFF);
                }
            }
        }
        bitmap
    }

    #[test]
    fn extract_recovers_grid_pattern() {
        let value = 0x1010_1010_1038_1000;
        assert_eq!(value, Fingerprint::extract(&bitmap_for(value)).unwrap().value());
    }

    #[test]
    fn dark_bitmap_is_all_zero() {
        let bitmap = Bitmap::new(CANVAS_SIDE, CANVAS_SIDE);
        assert_eq!(0, Fingerprint::extract(&bitmap).unwrap().value());
    }

    #[test]
    fn bright_bitmap_is_all_ones() {
        let mut bitmap = Bitmap::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                bitmap.set_pixel(x, y, 0xFFFF_FFFF);
            }
        }
        assert_eq!(u64::MAX, Fingerprint::extract(&bitmap).unwrap().value());
    }

    #[test]
    fn binarization_threshold_is_exclusive() {
        // Brightness 201 survives binarization (and becomes fully bright);
        // brightness 200 does not.
        let mut bitmap = Bitmap::new(CANVAS_SIDE, CANVAS_SIDE);
        bitmap.set_pixel(0, 0, 0xFFFF_CAFF); // green 0xCA -> 201
        bitmap.set_pixel(CELL_STRIDE, 0, 0xFFFF_C9FF); // green 0xC9 -> 200
        let fingerprint = Fingerprint::extract(&bitmap).unwrap();
        assert!(fingerprint.bit(0));
        assert!(!fingerprint.bit(1));
        assert_eq!(1, fingerprint.value());
    }

    #[test]
    fn non_square_bitmap_rejected() {
        let bitmap = Bitmap::new(100, 120);
        let error = Fingerprint::extract(&bitmap).unwrap_err();
        assert!(matches!(error, BitmapError::NonSquareImage { width: 100, height: 120 }));
    }

    #[test]
    fn extract_scales_larger_icons() {
        // A 264x264 icon with 2x2 lit blocks at doubled sample coordinates
        // lands on the same cells after normalization.
        let mut bitmap = Bitmap::new(264, 264);
        for &(col, row) in &[(0usize, 0usize), (3, 2), (7, 7)] {
            for dy in 0..2 {
                for dx in 0..2 {
                    bitmap.set_pixel(col * 32 + dx, row * 32 + dy, 0xFFFF_FFFF);
                }
            }
        }
        let fingerprint = Fingerprint::extract(&bitmap).unwrap();
        assert!(fingerprint.bit(0));
        assert!(fingerprint.bit(2 * GRID_LEN + 3));
        assert!(fingerprint.bit(7 * GRID_LEN + 7));
        assert_eq!(3, fingerprint.value().count_ones());
    }

    #[test]
    fn distance_ignores_high_bit() {
        let fingerprint = Fingerprint::from_value(1 << 63);
        assert_eq!(0, fingerprint.distance(0));
        assert_eq!(1, fingerprint.distance(1));
    }

    #[test]
    fn display_draws_grid() {
        let fingerprint = Fingerprint::from_value(0x8000_0000_0000_0001);
        let grid = fingerprint.to_string();
        let rows: Vec<&str> = grid.split('\n').collect();
        assert_eq!(8, rows.len());
        assert_eq!("#.......", rows[0]);
        assert_eq!(".......#", rows[7]);
    }
}
