/*!
    Pixel format and frame geometry types.
*/

use std::fmt;

/**
    Video pixel formats.

    This is a subset of formats commonly encountered in media pipelines.
    Not all FFmpeg pixel formats are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Packed BGRA, 32bpp (common for display on macOS/Windows)
    Bgra,
    /// Packed RGBA, 32bpp (common for display)
    Rgba,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit little-endian in 16-bit words (HDR content)
    Yuv420p10,
    /// Semi-planar YUV 4:2:0, 10-bit little-endian in 16-bit words
    P010le,
    /// Single 8-bit luma plane
    Gray8,
    /// Full-range (JPEG) planar YUV 4:2:0
    Yuvj420p,
    /// Full-range (JPEG) planar YUV 4:2:2
    Yuvj422p,
    /// Full-range (JPEG) planar YUV 4:4:4
    Yuvj444p,
}

/**
    Byte layout of one plane in a tightly packed frame buffer.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLayout {
    /// Bytes in one row of the plane, without padding.
    pub row_bytes: usize,
    /// Number of rows in the plane.
    pub rows: usize,
}

impl PlaneLayout {
    /**
        Total bytes in the plane.
    */
    pub const fn len(self) -> usize {
        self.row_bytes * self.rows
    }

    /**
        Returns true if the plane holds no bytes.
    */
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl PixelFormat {
    /**
        Returns the number of bits per pixel for this format.

        For planar formats, this is the average bits per pixel.
    */
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Gray8 => 8,
            Self::Yuv420p | Self::Yuvj420p | Self::Nv12 => 12,
            Self::Yuv422p | Self::Yuvj422p => 16,
            Self::Yuv420p10 | Self::P010le => 24,
            Self::Rgb24 | Self::Bgr24 | Self::Yuv444p | Self::Yuvj444p => 24,
            Self::Bgra | Self::Rgba => 32,
        }
    }

    /**
        Returns true if this is a planar format.
    */
    pub const fn is_planar(self) -> bool {
        match self {
            Self::Yuv420p | Self::Yuv422p | Self::Yuv444p | Self::Yuv420p10 => true,
            Self::Yuvj420p | Self::Yuvj422p | Self::Yuvj444p => true,
            // semi-planar counts as planar
            Self::Nv12 | Self::P010le => true,
            Self::Bgra | Self::Rgba | Self::Rgb24 | Self::Bgr24 | Self::Gray8 => false,
        }
    }

    /**
        Returns the layout of each plane for a frame of the given size.

        Chroma planes of subsampled formats round their dimensions up, so odd
        frame sizes keep their last column and row of chroma.
    */
    pub fn planes(self, width: u32, height: u32) -> Vec<PlaneLayout> {
        let w = width as usize;
        let h = height as usize;
        let half_w = w.div_ceil(2);
        let half_h = h.div_ceil(2);

        let plane = |row_bytes, rows| PlaneLayout { row_bytes, rows };

        match self {
            Self::Bgra | Self::Rgba => vec![plane(w * 4, h)],
            Self::Rgb24 | Self::Bgr24 => vec![plane(w * 3, h)],
            Self::Gray8 => vec![plane(w, h)],
            Self::Yuv420p | Self::Yuvj420p => {
                vec![plane(w, h), plane(half_w, half_h), plane(half_w, half_h)]
            }
            Self::Yuv422p | Self::Yuvj422p => vec![plane(w, h), plane(half_w, h), plane(half_w, h)],
            Self::Yuv444p | Self::Yuvj444p => vec![plane(w, h), plane(w, h), plane(w, h)],
            Self::Yuv420p10 => vec![
                plane(w * 2, h),
                plane(half_w * 2, half_h),
                plane(half_w * 2, half_h),
            ],
            Self::Nv12 => vec![plane(w, h), plane(half_w * 2, half_h)],
            Self::P010le => vec![plane(w * 2, h), plane(half_w * 4, half_h)],
        }
    }

    /**
        Returns true for the full-range (JPEG) YUV formats.
    */
    pub const fn is_full_range(self) -> bool {
        matches!(self, Self::Yuvj420p | Self::Yuvj422p | Self::Yuvj444p)
    }

    /**
        Returns the size in bytes of a tightly packed frame of the given size.
    */
    pub fn frame_size(self, width: u32, height: u32) -> usize {
        self.planes(width, height).iter().map(|p| p.len()).sum()
    }
}

/**
    A frame size in pixels.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VideoSize {
    pub width: u32,
    pub height: u32,
}

impl VideoSize {
    /**
        Create a new video size.
    */
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for VideoSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_format_bits_per_pixel() {
        assert_eq!(PixelFormat::Yuv420p.bits_per_pixel(), 12);
        assert_eq!(PixelFormat::Bgra.bits_per_pixel(), 32);
        assert_eq!(PixelFormat::Rgb24.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::Gray8.bits_per_pixel(), 8);
    }

    #[test]
    fn pixel_format_is_planar() {
        assert!(PixelFormat::Yuv420p.is_planar());
        assert!(PixelFormat::Nv12.is_planar());
        assert!(!PixelFormat::Bgra.is_planar());
        assert!(!PixelFormat::Gray8.is_planar());
    }

    #[test]
    fn yuv420p_planes() {
        let planes = PixelFormat::Yuv420p.planes(64, 48);
        assert_eq!(
            planes,
            vec![
                PlaneLayout { row_bytes: 64, rows: 48 },
                PlaneLayout { row_bytes: 32, rows: 24 },
                PlaneLayout { row_bytes: 32, rows: 24 },
            ]
        );
        assert_eq!(PixelFormat::Yuv420p.frame_size(64, 48), 64 * 48 * 3 / 2);
    }

    #[test]
    fn odd_sizes_round_chroma_up() {
        let planes = PixelFormat::Yuv420p.planes(5, 3);
        assert_eq!(planes[1], PlaneLayout { row_bytes: 3, rows: 2 });
        assert_eq!(PixelFormat::Yuv420p.frame_size(5, 3), 15 + 6 + 6);
    }

    #[test]
    fn packed_and_semi_planar_sizes() {
        assert_eq!(PixelFormat::Rgba.frame_size(32, 24), 32 * 24 * 4);
        assert_eq!(PixelFormat::Rgb24.frame_size(32, 24), 32 * 24 * 3);
        assert_eq!(PixelFormat::Nv12.frame_size(32, 24), 32 * 24 + 32 * 12);
        assert_eq!(PixelFormat::P010le.frame_size(32, 24), (32 * 24 + 32 * 12) * 2);
        assert_eq!(PixelFormat::Yuv422p.planes(32, 24).len(), 3);
    }

    #[test]
    fn full_range_formats_share_limited_layouts() {
        for (full, limited) in [
            (PixelFormat::Yuvj420p, PixelFormat::Yuv420p),
            (PixelFormat::Yuvj422p, PixelFormat::Yuv422p),
            (PixelFormat::Yuvj444p, PixelFormat::Yuv444p),
        ] {
            assert_ne!(full, limited);
            assert!(full.is_full_range());
            assert!(!limited.is_full_range());
            assert_eq!(full.planes(33, 17), limited.planes(33, 17));
            assert_eq!(full.bits_per_pixel(), limited.bits_per_pixel());
        }
    }

    #[test]
    fn video_size_display() {
        assert_eq!(VideoSize::new(1280, 720).to_string(), "1280x720");
    }
}
