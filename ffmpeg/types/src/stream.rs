/*!
    Stream information types.
*/

use std::time::Duration;

use crate::{PixelFormat, Rational, VideoSize};

/**
    Information about a video stream.
*/
#[derive(Clone, Debug)]
pub struct VideoStreamInfo {
    /// Index of the stream within its container.
    pub index: usize,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format (None if the decoder reports one we do not model).
    pub pixel_format: Option<PixelFormat>,
    /// Frame rate (may be approximate or unavailable).
    pub frame_rate: Option<Rational>,
    /// Time base for timestamps.
    pub time_base: Rational,
    /// Total duration (may be unavailable for some streams).
    pub duration: Option<Duration>,
    /// Short name of the codec, as FFmpeg reports it.
    pub codec_name: String,
}

impl VideoStreamInfo {
    /**
        Returns the frame dimensions.
    */
    pub fn size(&self) -> VideoSize {
        VideoSize::new(self.width, self.height)
    }

    /**
        Returns the aspect ratio as a float.
    */
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /**
        Returns the frame rate as fps, if available.
    */
    pub fn fps(&self) -> Option<f64> {
        self.frame_rate.map(|r| r.to_f64())
    }
}

/**
    Combined media information for a container.
*/
#[derive(Clone, Debug)]
pub struct MediaInfo {
    /// Total duration of the container, if known.
    pub duration: Option<Duration>,
    /// Number of streams of any type.
    pub stream_count: usize,
    /// The best video stream, if any.
    pub video: Option<VideoStreamInfo>,
}

impl MediaInfo {
    /**
        Returns true if the container has a video stream.
    */
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> VideoStreamInfo {
        VideoStreamInfo {
            index: 0,
            width: 1920,
            height: 1080,
            pixel_format: Some(PixelFormat::Yuv420p),
            frame_rate: Some(Rational::new(30000, 1001)),
            time_base: Rational::new(1, 90000),
            duration: None,
            codec_name: "h264".to_string(),
        }
    }

    #[test]
    fn video_stream_info_helpers() {
        let info = info();
        assert_eq!(info.size(), VideoSize::new(1920, 1080));
        assert!((info.aspect_ratio() - 16.0 / 9.0).abs() < 1e-9);
        assert!((info.fps().unwrap_or_default() - 29.97).abs() < 0.01);
    }

    #[test]
    fn media_info_has_video() {
        let with = MediaInfo {
            duration: None,
            stream_count: 1,
            video: Some(info()),
        };
        let without = MediaInfo {
            duration: None,
            stream_count: 1,
            video: None,
        };
        assert!(with.has_video());
        assert!(!without.has_video());
    }
}
