/*!
    Video frame rescaling.
*/

use std::ffi::CString;

use ffmpeg_next::{
    ffi,
    format::Pixel,
    software::scaling::{context::Context as ScalerContext, flag::Flags as ScalerFlags},
    util::frame::video::Video as VideoFrameFFmpeg,
};
use tracing::{debug, error};

use ffmpeg_types::{DecodedFrame, Error, PixelFormat, Result, VideoFrame, VideoSize};

/**
    Scaling algorithm for video resizing.
*/
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScalingAlgorithm {
    /// Nearest neighbor - fastest, lowest quality.
    Nearest,
    /// Bilinear interpolation - fast, acceptable quality.
    #[default]
    Bilinear,
    /// Bicubic interpolation - moderate speed, good quality.
    Bicubic,
    /// Lanczos resampling - slowest, highest quality.
    Lanczos,
}

impl ScalingAlgorithm {
    fn to_ffmpeg_flags(self) -> ScalerFlags {
        match self {
            Self::Nearest => ScalerFlags::POINT,
            Self::Bilinear => ScalerFlags::BILINEAR,
            Self::Bicubic => ScalerFlags::BICUBIC,
            Self::Lanczos => ScalerFlags::LANCZOS,
        }
    }
}

/**
    Configuration for a rescaler.

    Both geometries are fixed for the lifetime of the rescaler.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RescalerConfig {
    /// Size of incoming frames.
    pub src_size: VideoSize,
    /// Pixel format of incoming frames, as the decoder reports it.
    pub src_format: Pixel,
    /// Size of produced frames.
    pub dst_size: VideoSize,
    /// Pixel format of produced frames.
    pub dst_format: PixelFormat,
    /// Scaling algorithm to use.
    pub algorithm: ScalingAlgorithm,
}

impl RescalerConfig {
    /**
        Create a new rescaler configuration using bilinear scaling.
    */
    pub fn new(
        src_size: VideoSize,
        src_format: Pixel,
        dst_size: VideoSize,
        dst_format: PixelFormat,
    ) -> Self {
        Self {
            src_size,
            src_format,
            dst_size,
            dst_format,
            algorithm: ScalingAlgorithm::default(),
        }
    }

    /**
        Set the scaling algorithm.
    */
    pub fn with_algorithm(mut self, algorithm: ScalingAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/**
    Fixed-geometry video rescaler.

    Converts frames of one size and pixel format into another. The
    destination buffer is allocated once, when the rescaler is created.
    Frames that do not match the source geometry are rejected rather than
    triggering a resize.
*/
pub struct Rescaler {
    config: RescalerConfig,
    context: ScalerContext,
    src: VideoFrameFFmpeg,
    dst: VideoFrameFFmpeg,
}

impl Rescaler {
    /**
        Create a rescaler and allocate its destination buffer.

        Fails with FFmpeg's "invalid argument" status if no scaling context
        can be created for the conversion.
    */
    pub fn new(config: RescalerConfig) -> Result<Self> {
        let src_pixel = config.src_format;
        let dst_pixel = Pixel::from(config.dst_format);

        let context = ScalerContext::get(
            src_pixel,
            config.src_size.width,
            config.src_size.height,
            dst_pixel,
            config.dst_size.width,
            config.dst_size.height,
            config.algorithm.to_ffmpeg_flags(),
        )
        .map_err(|_| {
            error!(
                "impossible to create scale context for the conversion fmt:{} s:{} -> fmt:{} s:{}",
                pixel_name(src_pixel),
                config.src_size,
                pixel_name(dst_pixel),
                config.dst_size,
            );
            Error::from(ffmpeg_next::Error::Other { errno: ffi::EINVAL })
        })?;

        let src = VideoFrameFFmpeg::new(src_pixel, config.src_size.width, config.src_size.height);
        let dst = VideoFrameFFmpeg::new(dst_pixel, config.dst_size.width, config.dst_size.height);

        debug!(
            src = %config.src_size,
            dst = %config.dst_size,
            algorithm = ?config.algorithm,
            "created rescaler"
        );

        Ok(Self {
            config,
            context,
            src,
            dst,
        })
    }

    /**
        Get the configuration this rescaler was created with.
    */
    pub fn config(&self) -> &RescalerConfig {
        &self.config
    }

    /**
        Size of the frames this rescaler produces.
    */
    pub fn output_size(&self) -> VideoSize {
        self.config.dst_size
    }

    /**
        Rescale a frame straight from the decoder.

        The frame is read in place, so any pixel format swscale accepts
        works here even if it has no packed form. Timestamps and time base
        are carried over from the input frame.
    */
    pub fn rescale_decoded(&mut self, frame: &DecodedFrame) -> Result<VideoFrame> {
        self.check_input(frame.size(), frame.pixel())?;
        self.context.run(frame.as_ffmpeg(), &mut self.dst)?;

        let mut output = VideoFrame::from_ffmpeg(&self.dst, frame.time_base())?;
        output.pts = frame.pts();
        output.dts = frame.dts();
        Ok(output)
    }

    /**
        Rescale a packed frame.

        Timestamps and time base are carried over from the input frame.
    */
    pub fn rescale(&mut self, frame: &VideoFrame) -> Result<VideoFrame> {
        self.check_input(frame.size(), Pixel::from(frame.format))?;

        frame.copy_into_ffmpeg(&mut self.src)?;
        self.context.run(&self.src, &mut self.dst)?;

        let mut output = VideoFrame::from_ffmpeg(&self.dst, frame.time_base)?;
        output.pts = frame.pts;
        output.dts = frame.dts;
        Ok(output)
    }

    fn check_input(&self, size: VideoSize, pixel: Pixel) -> Result<()> {
        if size != self.config.src_size || pixel != self.config.src_format {
            return Err(Error::invalid_data(format!(
                "frame is {} {}, rescaler expects {} {}",
                size,
                pixel_name(pixel),
                self.config.src_size,
                pixel_name(self.config.src_format)
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Rescaler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rescaler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/**
    Parse a video size string such as `640x480` or `hd720`.

    Accepts every abbreviation FFmpeg knows. The library's status is
    forwarded on failure.
*/
pub fn parse_video_size(size: &str) -> Result<VideoSize> {
    let c_size = CString::new(size)
        .map_err(|_| Error::invalid_data("video size contains a NUL byte"))?;

    let mut width = 0;
    let mut height = 0;
    // SAFETY: c_size is a valid NUL-terminated string, outputs are plain ints
    let ret = unsafe { ffi::av_parse_video_size(&mut width, &mut height, c_size.as_ptr()) };
    if ret < 0 {
        return Err(ffmpeg_next::Error::from(ret).into());
    }

    Ok(VideoSize::new(width as u32, height as u32))
}

fn pixel_name(pixel: Pixel) -> &'static str {
    pixel.descriptor().map(|d| d.name()).unwrap_or("none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffmpeg_types::{Pts, Rational};

    fn solid_yuv(width: u32, height: u32, luma: u8) -> VideoFrame {
        solid(PixelFormat::Yuv420p, width, height, luma)
    }

    fn solid(format: PixelFormat, width: u32, height: u32, luma: u8) -> VideoFrame {
        let planes = format.planes(width, height);
        let mut data = vec![luma; planes[0].len()];
        data.resize(format.frame_size(width, height), 128);
        VideoFrame::new(data, width, height, format, Some(Pts(3)), Rational::new(1, 10))
            .with_dts(Some(Pts(3)))
    }

    #[test]
    fn parses_sizes_and_abbreviations() {
        assert_eq!(parse_video_size("64x48").ok(), Some(VideoSize::new(64, 48)));
        assert_eq!(parse_video_size("vga").ok(), Some(VideoSize::new(640, 480)));
        assert_eq!(parse_video_size("hd720").ok(), Some(VideoSize::new(1280, 720)));
    }

    #[test]
    fn bad_size_forwards_einval() {
        let err = parse_video_size("not-a-size").unwrap_err();
        assert_eq!(err.code(), Some(-ffi::EINVAL));
        assert!(parse_video_size("64x\0").is_err());
    }

    #[test]
    fn impossible_context_is_einval() {
        let config = RescalerConfig::new(
            VideoSize::new(0, 0),
            Pixel::YUV420P,
            VideoSize::new(32, 24),
            PixelFormat::Yuv420p,
        );
        let err = Rescaler::new(config).unwrap_err();
        assert_eq!(err.code(), Some(-ffi::EINVAL));
    }

    #[test]
    fn upscales_into_fixed_buffer() {
        let config = RescalerConfig::new(
            VideoSize::new(16, 12),
            Pixel::YUV420P,
            VideoSize::new(32, 24),
            PixelFormat::Yuv420p,
        );
        let mut rescaler = Rescaler::new(config).expect("rescaler");

        let output = rescaler.rescale(&solid_yuv(16, 12, 100)).expect("rescale");
        assert_eq!(output.size(), VideoSize::new(32, 24));
        assert_eq!(output.data.len(), output.expected_data_len());
        assert_eq!(output.pts, Some(Pts(3)));
        assert_eq!(output.dts, Some(Pts(3)));
        assert_eq!(output.time_base, Rational::new(1, 10));

        let luma = output.plane(0).expect("luma plane");
        assert!(luma.iter().all(|&y| y.abs_diff(100) <= 2));
    }

    #[test]
    fn converts_pixel_format() {
        let config = RescalerConfig::new(
            VideoSize::new(16, 12),
            Pixel::YUV420P,
            VideoSize::new(16, 12),
            PixelFormat::Rgba,
        )
        .with_algorithm(ScalingAlgorithm::Nearest);
        let mut rescaler = Rescaler::new(config).expect("rescaler");

        let output = rescaler.rescale(&solid_yuv(16, 12, 128)).expect("rescale");
        assert_eq!(output.format, PixelFormat::Rgba);
        assert_eq!(output.data.len(), 16 * 12 * 4);
    }

    #[test]
    fn rejects_frames_of_another_geometry() {
        let config = RescalerConfig::new(
            VideoSize::new(16, 12),
            Pixel::YUV420P,
            VideoSize::new(8, 6),
            PixelFormat::Yuv420p,
        );
        let mut rescaler = Rescaler::new(config).expect("rescaler");

        let err = rescaler.rescale(&solid_yuv(32, 24, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidData { .. }));
        assert_eq!(rescaler.output_size(), VideoSize::new(8, 6));
    }

    #[test]
    fn rejects_frames_of_another_format() {
        let config = RescalerConfig::new(
            VideoSize::new(16, 12),
            Pixel::YUV420P,
            VideoSize::new(8, 6),
            PixelFormat::Yuv420p,
        );
        let mut rescaler = Rescaler::new(config).expect("rescaler");

        let frame = solid(PixelFormat::Yuvj420p, 16, 12, 0);
        assert!(matches!(rescaler.rescale(&frame), Err(Error::InvalidData { .. })));
    }

    #[test]
    fn full_range_source_is_compressed_to_limited() {
        let to_limited = |format: PixelFormat| {
            let config = RescalerConfig::new(
                VideoSize::new(16, 12),
                Pixel::from(format),
                VideoSize::new(32, 24),
                PixelFormat::Yuv420p,
            );
            let mut rescaler = Rescaler::new(config).expect("rescaler");
            let output = rescaler.rescale(&solid(format, 16, 12, 255)).expect("rescale");
            output.plane(0).expect("luma plane").to_vec()
        };

        // full-range white maps onto limited-range white
        let from_full = to_limited(PixelFormat::Yuvj420p);
        assert!(from_full.iter().all(|&y| y.abs_diff(235) <= 3), "{from_full:?}");

        let from_limited = to_limited(PixelFormat::Yuv420p);
        assert!(from_limited.iter().all(|&y| y >= 250), "{from_limited:?}");
    }

    #[test]
    fn decoded_frames_rescale_without_packing() {
        // 10-bit 4:2:2 has no packed form but swscale reads it directly
        let (width, height) = (16, 12);
        let mut native = VideoFrameFFmpeg::new(Pixel::YUV422P10LE, width, height);
        for (plane, value) in [(0, 400u16), (1, 512), (2, 512)] {
            let stride = native.stride(plane);
            let rows = native.plane_height(plane) as usize;
            let cols = native.plane_width(plane) as usize;
            let data = native.data_mut(plane);
            for row in 0..rows {
                for col in 0..cols {
                    let at = row * stride + col * 2;
                    data[at..at + 2].copy_from_slice(&value.to_le_bytes());
                }
            }
        }
        native.set_pts(Some(7));
        let decoded = DecodedFrame::new(native, Rational::new(1, 10));

        let config = RescalerConfig::new(
            VideoSize::new(width, height),
            decoded.pixel(),
            VideoSize::new(8, 6),
            PixelFormat::Yuv420p,
        );
        let mut rescaler = Rescaler::new(config).expect("rescaler");

        let output = rescaler.rescale_decoded(&decoded).expect("rescale");
        assert_eq!(output.format, PixelFormat::Yuv420p);
        assert_eq!(output.size(), VideoSize::new(8, 6));
        assert_eq!(output.pts, Some(Pts(7)));
        assert_eq!(output.time_base, Rational::new(1, 10));

        // 400 in ten bits is 100 in eight
        let luma = output.plane(0).expect("luma plane");
        assert!(luma.iter().all(|&y| y.abs_diff(100) <= 2), "{luma:?}");
    }

    #[test]
    fn decoded_frames_of_another_geometry_are_rejected() {
        let config = RescalerConfig::new(
            VideoSize::new(16, 12),
            Pixel::YUV420P,
            VideoSize::new(8, 6),
            PixelFormat::Yuv420p,
        );
        let mut rescaler = Rescaler::new(config).expect("rescaler");

        let native = VideoFrameFFmpeg::new(Pixel::YUV422P10LE, 16, 12);
        let decoded = DecodedFrame::new(native, Rational::new(1, 10));
        let err = rescaler.rescale_decoded(&decoded).unwrap_err();
        assert!(matches!(err, Error::InvalidData { .. }));
    }
}
