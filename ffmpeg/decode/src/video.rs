/*!
    Video decoder implementation.
*/

use ffmpeg_next::{
    codec::{self, decoder::Video as VideoDecoderFFmpeg, threading},
    ffi,
    format::Pixel,
    util::frame::video::Video as VideoFrameFFmpeg,
};
use tracing::{debug, error};

use ffmpeg_source::SelectedStream;
use ffmpeg_types::{DecodedFrame, Error, Packet, Rational, Result};

use crate::config::VideoDecoderConfig;

/**
    Video decoder.

    Decodes packets of one video stream into frames. Can only be created
    from a [`SelectedStream`]. Dropping the decoder frees its codec context.

    Frames come out in the codec's own pixel format as [`DecodedFrame`]s.
*/
pub struct VideoDecoder {
    decoder: VideoDecoderFFmpeg,
    stream_index: usize,
    time_base: Rational,
}

impl VideoDecoder {
    /**
        Open a decoder for the selected stream.

        Allocates a codec context from the stream's parameters, applies the
        configured thread count and opens the matching decoder.
    */
    pub fn open(stream: &SelectedStream, config: VideoDecoderConfig) -> Result<Self> {
        ffmpeg_next::init()?;

        let mut decoder_ctx = codec::context::Context::from_parameters(stream.parameters().clone())?;

        // SAFETY: the context was just allocated and is not shared
        unsafe {
            (*decoder_ctx.as_mut_ptr()).pkt_timebase = ffmpeg_next::Rational::from(stream.time_base()).into();
        }

        if let Some(count) = config.threads {
            decoder_ctx.set_threading(threading::Config {
                kind: threading::Type::Frame,
                count,
                ..Default::default()
            });
        }

        let decoder = decoder_ctx.decoder().video().map_err(|e| {
            error!("cannot open video decoder");
            Error::from(e)
        })?;

        debug!(
            stream_index = stream.index(),
            width = decoder.width(),
            height = decoder.height(),
            format = ?decoder.format(),
            "opened video decoder"
        );

        Ok(Self {
            decoder,
            stream_index: stream.index(),
            time_base: stream.time_base(),
        })
    }

    /**
        Index of the stream this decoder was opened for.
    */
    pub fn stream_index(&self) -> usize {
        self.stream_index
    }

    /**
        Get the time base for this decoder.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Coded frame width.
    */
    pub fn width(&self) -> u32 {
        self.decoder.width()
    }

    /**
        Coded frame height.
    */
    pub fn height(&self) -> u32 {
        self.decoder.height()
    }

    /**
        Pixel format the decoder produces.
    */
    pub fn pixel(&self) -> Pixel {
        self.decoder.format()
    }

    /**
        Send one packet to the decoder.

        Every status is forwarded: [`Error::Again`] means frames must be
        received before more input is accepted.
    */
    pub fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        self.decoder.send_packet(&to_ffmpeg_packet(packet))?;
        Ok(())
    }

    /**
        Signal end of stream so buffered frames can be drained.
    */
    pub fn send_eof(&mut self) -> Result<()> {
        self.decoder.send_eof()?;
        Ok(())
    }

    /**
        Receive one decoded frame.

        Returns [`Error::Again`] when the decoder needs more input and
        [`Error::Eof`] once it has been fully drained.
    */
    pub fn receive_frame(&mut self) -> Result<DecodedFrame> {
        let mut frame = VideoFrameFFmpeg::empty();
        self.decoder.receive_frame(&mut frame)?;
        Ok(DecodedFrame::new(frame, self.time_base))
    }

    /**
        Decode a packet, returning decoded frames.

        May return zero, one, or multiple frames depending on codec buffering.
    */
    pub fn decode(&mut self, packet: &Packet) -> Result<Vec<DecodedFrame>> {
        let ffmpeg_pkt = to_ffmpeg_packet(packet);

        // EAGAIN means the decoder is full, drain it and retry once
        match self.decoder.send_packet(&ffmpeg_pkt) {
            Ok(()) => {}
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                let mut frames = self.receive_frames()?;
                self.decoder.send_packet(&ffmpeg_pkt)?;
                frames.extend(self.receive_frames()?);
                return Ok(frames);
            }
            Err(e) => return Err(e.into()),
        }

        self.receive_frames()
    }

    /**
        Flush the decoder to get any remaining buffered frames.

        Call this at end of stream. The decoder must be [`reset`](Self::reset)
        before it accepts packets again.
    */
    pub fn flush(&mut self) -> Result<Vec<DecodedFrame>> {
        let mut frames = self.receive_frames()?;

        match self.decoder.send_eof() {
            Ok(()) | Err(ffmpeg_next::Error::Eof) => {}
            Err(ffmpeg_next::Error::Other { errno }) if errno == ffi::EAGAIN => {
                frames.extend(self.receive_frames()?);
                self.decoder.send_eof()?;
            }
            Err(e) => return Err(e.into()),
        }

        frames.extend(self.receive_frames()?);
        Ok(frames)
    }

    /**
        Reset the decoder after a seek.

        Discards buffered frames from the old position.
    */
    pub fn reset(&mut self) {
        self.decoder.flush();
    }

    /**
        Receive frames until the decoder asks for input or is drained.
    */
    fn receive_frames(&mut self) -> Result<Vec<DecodedFrame>> {
        let mut frames = Vec::new();
        loop {
            match self.receive_frame() {
                Ok(frame) => frames.push(frame),
                Err(Error::Again | Error::Eof) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(frames)
    }
}

fn to_ffmpeg_packet(packet: &Packet) -> ffmpeg_next::Packet {
    let mut ffmpeg_pkt = if packet.data.is_empty() {
        ffmpeg_next::Packet::empty()
    } else {
        ffmpeg_next::Packet::copy(&packet.data)
    };

    ffmpeg_pkt.set_stream(packet.stream_index);
    ffmpeg_pkt.set_pts(packet.pts.map(|pts| pts.0));
    ffmpeg_pkt.set_dts(packet.dts.map(|dts| dts.0));
    ffmpeg_pkt.set_duration(packet.duration.0);
    if packet.is_keyframe {
        ffmpeg_pkt.set_flags(ffmpeg_next::packet::Flags::KEY);
    }

    ffmpeg_pkt
}

impl std::fmt::Debug for VideoDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoDecoder")
            .field("stream_index", &self.stream_index)
            .field("time_base", &self.time_base)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffmpeg_types::{MediaDuration, Pts, StreamType};

    #[test]
    fn packet_fields_carry_over() {
        let packet = Packet::new(
            vec![1, 2, 3],
            2,
            Some(Pts(10)),
            Some(Pts(9)),
            MediaDuration(1),
            Rational::new(1, 25),
            true,
            StreamType::Video,
        );

        let ffmpeg_pkt = to_ffmpeg_packet(&packet);
        assert_eq!(ffmpeg_pkt.data(), Some(&[1u8, 2, 3][..]));
        assert_eq!(ffmpeg_pkt.stream(), 2);
        assert_eq!(ffmpeg_pkt.pts(), Some(10));
        assert_eq!(ffmpeg_pkt.dts(), Some(9));
        assert_eq!(ffmpeg_pkt.duration(), 1);
        assert!(ffmpeg_pkt.is_key());
    }

    #[test]
    fn missing_timestamps_stay_unset() {
        let packet = Packet::new(
            vec![0],
            0,
            None,
            None,
            MediaDuration(0),
            Rational::new(1, 25),
            false,
            StreamType::Video,
        );

        let ffmpeg_pkt = to_ffmpeg_packet(&packet);
        assert_eq!(ffmpeg_pkt.pts(), None);
        assert_eq!(ffmpeg_pkt.dts(), None);
        assert!(!ffmpeg_pkt.is_key());
    }
}
