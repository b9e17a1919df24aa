/*!
    Conversions between ffmpeg-next types and the types in this crate.

    Only available with the `ffmpeg` feature.
*/

use ffmpeg_next::{ffi, format::Pixel, frame};

use crate::{Error, PixelFormat, Pts, Rational, Result, VideoFrame};

impl From<ffmpeg_next::Error> for Error {
    fn from(e: ffmpeg_next::Error) -> Self {
        match e {
            ffmpeg_next::Error::Eof => Self::Eof,
            ffmpeg_next::Error::Other { errno } if errno == ffi::EAGAIN => Self::Again,
            ffmpeg_next::Error::Other { errno }
                if std::io::Error::from_raw_os_error(errno).kind()
                    == std::io::ErrorKind::NotFound =>
            {
                Self::Io(std::io::Error::from_raw_os_error(errno))
            }
            other => {
                let message = other.to_string();
                Self::ffmpeg(i32::from(other), message)
            }
        }
    }
}

impl From<ffmpeg_next::Rational> for Rational {
    fn from(r: ffmpeg_next::Rational) -> Self {
        // FFmpeg uses 0/0 for "unknown"
        if r.denominator() == 0 {
            return Self::new(0, 1);
        }
        Self::new(r.numerator(), r.denominator())
    }
}

impl From<Rational> for ffmpeg_next::Rational {
    fn from(r: Rational) -> Self {
        ffmpeg_next::Rational::new(r.num, r.den)
    }
}

impl TryFrom<Pixel> for PixelFormat {
    type Error = Error;

    fn try_from(format: Pixel) -> Result<Self> {
        match format {
            Pixel::YUV420P => Ok(Self::Yuv420p),
            Pixel::YUVJ420P => Ok(Self::Yuvj420p),
            Pixel::NV12 => Ok(Self::Nv12),
            Pixel::BGRA => Ok(Self::Bgra),
            Pixel::RGBA => Ok(Self::Rgba),
            Pixel::RGB24 => Ok(Self::Rgb24),
            Pixel::BGR24 => Ok(Self::Bgr24),
            Pixel::YUV422P => Ok(Self::Yuv422p),
            Pixel::YUVJ422P => Ok(Self::Yuvj422p),
            Pixel::YUV444P => Ok(Self::Yuv444p),
            Pixel::YUVJ444P => Ok(Self::Yuvj444p),
            Pixel::YUV420P10LE => Ok(Self::Yuv420p10),
            Pixel::P010LE => Ok(Self::P010le),
            Pixel::GRAY8 => Ok(Self::Gray8),
            other => Err(Error::unsupported_format(format!(
                "pixel format {other:?}"
            ))),
        }
    }
}

impl From<PixelFormat> for Pixel {
    fn from(format: PixelFormat) -> Self {
        match format {
            PixelFormat::Yuv420p => Pixel::YUV420P,
            PixelFormat::Nv12 => Pixel::NV12,
            PixelFormat::Bgra => Pixel::BGRA,
            PixelFormat::Rgba => Pixel::RGBA,
            PixelFormat::Rgb24 => Pixel::RGB24,
            PixelFormat::Bgr24 => Pixel::BGR24,
            PixelFormat::Yuv422p => Pixel::YUV422P,
            PixelFormat::Yuv444p => Pixel::YUV444P,
            PixelFormat::Yuv420p10 => Pixel::YUV420P10LE,
            PixelFormat::P010le => Pixel::P010LE,
            PixelFormat::Gray8 => Pixel::GRAY8,
            PixelFormat::Yuvj420p => Pixel::YUVJ420P,
            PixelFormat::Yuvj422p => Pixel::YUVJ422P,
            PixelFormat::Yuvj444p => Pixel::YUVJ444P,
        }
    }
}

impl VideoFrame {
    /**
        Copy a decoded FFmpeg frame into a packed `VideoFrame`.

        Row padding from the library's line strides is dropped. The frame's
        pts and the dts of the packet that produced it are carried over.
    */
    pub fn from_ffmpeg(src: &frame::Video, time_base: Rational) -> Result<Self> {
        let format = PixelFormat::try_from(src.format())?;
        let (width, height) = (src.width(), src.height());

        let mut data = Vec::with_capacity(format.frame_size(width, height));
        for (index, layout) in format.planes(width, height).into_iter().enumerate() {
            let stride = src.stride(index);
            let plane = src.data(index);
            for row in 0..layout.rows {
                let start = row * stride;
                let bytes = plane.get(start..start + layout.row_bytes).ok_or_else(|| {
                    Error::invalid_data(format!("plane {index} is shorter than its geometry"))
                })?;
                data.extend_from_slice(bytes);
            }
        }

        Ok(Self::new(data, width, height, format, src.pts().map(Pts), time_base)
            .with_dts(packet_dts(src)))
    }

    /**
        Build an FFmpeg frame from this packed frame.

        Fails with `InvalidData` if `data` is shorter than the geometry needs.
    */
    pub fn to_ffmpeg(&self) -> Result<frame::Video> {
        let mut dst = frame::Video::new(self.format.into(), self.width, self.height);
        self.copy_into_ffmpeg(&mut dst)?;
        Ok(dst)
    }

    /**
        Copy this frame into an already allocated FFmpeg frame.

        The destination must have been allocated with the same geometry
        and pixel format.
    */
    pub fn copy_into_ffmpeg(&self, dst: &mut frame::Video) -> Result<()> {
        if self.data.len() < self.expected_data_len() {
            return Err(Error::invalid_data(format!(
                "frame data is {} bytes, expected {}",
                self.data.len(),
                self.expected_data_len()
            )));
        }
        if dst.width() != self.width
            || dst.height() != self.height
            || dst.format() != Pixel::from(self.format)
        {
            return Err(Error::invalid_data(format!(
                "destination frame is {}x{} {:?}, expected {}x{} {:?}",
                dst.width(),
                dst.height(),
                dst.format(),
                self.width,
                self.height,
                self.format
            )));
        }

        let mut offset = 0;
        for (index, layout) in self.format.planes(self.width, self.height).into_iter().enumerate() {
            let stride = dst.stride(index);
            let plane = dst.data_mut(index);
            for row in 0..layout.rows {
                let src = &self.data[offset..offset + layout.row_bytes];
                plane[row * stride..row * stride + layout.row_bytes].copy_from_slice(src);
                offset += layout.row_bytes;
            }
        }
        dst.set_pts(self.pts.map(|pts| pts.0));

        Ok(())
    }
}

/**
    Decode timestamp of the packet a library frame was decoded from.
*/
pub(crate) fn packet_dts(frame: &frame::Video) -> Option<Pts> {
    // SAFETY: the frame wraps a valid AVFrame for the lifetime of the borrow
    let pkt_dts = unsafe { (*frame.as_ptr()).pkt_dts };
    (pkt_dts != ffi::AV_NOPTS_VALUE).then_some(Pts(pkt_dts))
}
