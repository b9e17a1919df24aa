use std::time::Duration;

use ffmpeg_types::VideoFrame;

/**
    A frame handed to the frame callback.
*/
#[derive(Clone, Debug)]
pub struct Frame {
    /// The decoded (and possibly rescaled) picture.
    pub video: VideoFrame,
    /// Timestamp in microseconds, taken from the packet DTS and falling
    /// back to the PTS. None if the frame carries neither.
    pub timestamp_us: Option<i64>,
}

impl Frame {
    pub(crate) fn new(video: VideoFrame) -> Self {
        let timestamp_us = video
            .best_timestamp()
            .map(|ts| ts.to_micros(video.time_base));
        Self {
            video,
            timestamp_us,
        }
    }

    /**
        Timestamp as a Duration. Negative timestamps clamp to zero.
    */
    pub fn timestamp(&self) -> Option<Duration> {
        self.timestamp_us
            .map(|us| Duration::from_micros(u64::try_from(us).unwrap_or(0)))
    }

    pub fn width(&self) -> u32 {
        self.video.width
    }

    pub fn height(&self) -> u32 {
        self.video.height
    }
}
