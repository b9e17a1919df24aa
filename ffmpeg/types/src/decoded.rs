/*!
    Frames as the decoder produced them.

    Only available with the `ffmpeg` feature.
*/

use std::fmt;

use ffmpeg_next::{format::Pixel, frame};

use crate::ffmpeg::packet_dts;
use crate::{Pts, Rational, Result, VideoFrame, VideoSize};

/**
    A decoded frame still in the library's own layout.

    Keeps whatever pixel format the codec produced, including formats
    [`PixelFormat`](crate::PixelFormat) has no variant for, so it can be
    handed to the scaler as-is. Pack it with [`DecodedFrame::to_packed`]
    once it is in a supported format.
*/
pub struct DecodedFrame {
    frame: frame::Video,
    time_base: Rational,
}

impl DecodedFrame {
    pub fn new(frame: frame::Video, time_base: Rational) -> Self {
        Self { frame, time_base }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn size(&self) -> VideoSize {
        VideoSize::new(self.width(), self.height())
    }

    /**
        The codec's pixel format.
    */
    pub fn pixel(&self) -> Pixel {
        self.frame.format()
    }

    pub fn pts(&self) -> Option<Pts> {
        self.frame.pts().map(Pts)
    }

    /**
        Decode timestamp of the packet the frame came from.
    */
    pub fn dts(&self) -> Option<Pts> {
        packet_dts(&self.frame)
    }

    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    pub fn as_ffmpeg(&self) -> &frame::Video {
        &self.frame
    }

    /**
        Copy into a packed [`VideoFrame`].

        Fails with `UnsupportedFormat` if the frame's pixel format has no
        packed representation. Rescale it first in that case.
    */
    pub fn to_packed(&self) -> Result<VideoFrame> {
        VideoFrame::from_ffmpeg(&self.frame, self.time_base)
    }
}

impl fmt::Debug for DecodedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedFrame")
            .field("size", &self.size())
            .field("pixel", &self.pixel())
            .field("pts", &self.pts())
            .field("time_base", &self.time_base)
            .finish_non_exhaustive()
    }
}
