/*!
    Decoded frames.
*/

use crate::{PixelFormat, Pts, Rational, VideoSize};

/**
    A decoded picture in packed form.

    Planes sit back to back in `data` with no row padding, in the order and
    sizes [`PixelFormat::planes`] gives for the frame's geometry.
*/
#[derive(Clone, Debug)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub pts: Option<Pts>,
    /// Decode timestamp of the packet the frame was decoded from.
    pub dts: Option<Pts>,
    /// Time base of `pts` and `dts`.
    pub time_base: Rational,
}

impl VideoFrame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        pts: Option<Pts>,
        time_base: Rational,
    ) -> Self {
        Self {
            data,
            width,
            height,
            format,
            pts,
            dts: None,
            time_base,
        }
    }

    pub fn with_dts(mut self, dts: Option<Pts>) -> Self {
        self.dts = dts;
        self
    }

    pub fn size(&self) -> VideoSize {
        VideoSize::new(self.width, self.height)
    }

    /**
        The packet's decode timestamp, or the presentation timestamp if
        the packet had none.
    */
    pub fn best_timestamp(&self) -> Option<Pts> {
        self.dts.or(self.pts)
    }

    /**
        Number of bytes `data` should hold for this geometry and format.
    */
    pub fn expected_data_len(&self) -> usize {
        self.format.frame_size(self.width, self.height)
    }

    /**
        Bytes of one plane. None if the format has no such plane or `data`
        is too short to hold it.
    */
    pub fn plane(&self, index: usize) -> Option<&[u8]> {
        let planes = self.format.planes(self.width, self.height);
        let layout = planes.get(index)?;
        let start: usize = planes[..index].iter().map(|p| p.len()).sum();
        self.data.get(start..start + layout.len())
    }
}

static_assertions::assert_impl_all!(VideoFrame: Send, Sync);
