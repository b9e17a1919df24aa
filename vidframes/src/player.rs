/*!
    The player façade.

    Owns the container, the decoder and the optional rescaler, and drives
    them either step by step through the pass-through methods or all at
    once through [`Player::run`].
*/

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info};

use ffmpeg_decode::VideoDecoder;
use ffmpeg_source::{SeekFlags, SelectedStream, Source, SourceConfig};
use ffmpeg_transform::{Rescaler, RescalerConfig, ScalingAlgorithm, parse_video_size};
use ffmpeg_types::{
    Clock, DecodedFrame, Error, MediaInfo, Packet, PixelFormat, Rational, Result, VideoFrame,
    VideoSize,
    WallClock,
};

use crate::config::PlayerConfig;
use crate::control::{PlaybackControl, Status};
use crate::frame::Frame;

/// How long to wait between polls while paused or starved.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

type FrameCallback = Box<dyn FnMut(Frame)>;

/**
    Headless video player.

    Not thread-safe. Use [`Player::control`] to steer it from other threads.
*/
pub struct Player {
    // Handles drop in declaration order: rescaler, decoder, container
    rescaler: Option<Rescaler>,
    decoder: Option<VideoDecoder>,
    stream: Option<SelectedStream>,
    source: Source,

    config: PlayerConfig,
    control: PlaybackControl,
    pending_scale: Option<VideoSize>,
    on_frame: Option<FrameCallback>,
    initialized: bool,

    clock: WallClock,
    /// Timestamp of the first frame paced since the last seek.
    pace_origin: Option<Duration>,
}

impl Player {
    /**
        Open a media file.

        Only the container is opened here. The stream and decoder are set
        up on the first call to [`run`](Self::run), or explicitly through
        [`select_video_stream`](Self::select_video_stream) and
        [`open_codec`](Self::open_codec).
    */
    pub fn open<P: AsRef<Path>>(path: P, config: PlayerConfig) -> Result<Self> {
        let source_config = SourceConfig::default().with_dump_format(config.dump_format);
        let source = Source::open(path, source_config)?;

        let status = if config.autoplay {
            Status::Playing
        } else {
            Status::Paused
        };

        Ok(Self {
            rescaler: None,
            decoder: None,
            stream: None,
            source,
            config,
            control: PlaybackControl::new(status),
            pending_scale: None,
            on_frame: None,
            initialized: false,
            clock: WallClock::new(),
            pace_origin: None,
        })
    }

    /**
        Get a control handle for this player.
    */
    pub fn control(&self) -> PlaybackControl {
        self.control.clone()
    }

    pub fn status(&self) -> Status {
        self.control.status()
    }

    pub fn media_info(&self) -> &MediaInfo {
        self.source.media_info()
    }

    pub fn play(&self) {
        self.control.play();
    }

    pub fn pause(&self) {
        self.control.pause();
    }

    pub fn resume(&self) {
        self.control.resume();
    }

    /**
        Request a seek, in the video stream's time base.
    */
    pub fn seek(&self, timestamp: i64) {
        self.control.seek(timestamp);
    }

    pub fn reset(&self) {
        self.control.reset();
    }

    pub fn stop(&self) {
        self.control.stop();
    }

    /**
        Pick the best video stream and return its index.
    */
    pub fn select_video_stream(&mut self) -> Result<usize> {
        let stream = self.source.select_video_stream()?;
        let index = stream.index();
        self.stream = Some(stream);
        Ok(index)
    }

    /**
        Open a decoder for the selected stream.

        Fails with `InvalidState` if no stream has been selected yet.
    */
    pub fn open_codec(&mut self) -> Result<()> {
        let stream = self
            .stream
            .as_ref()
            .ok_or_else(|| Error::invalid_state("no video stream selected"))?;
        self.decoder = Some(VideoDecoder::open(stream, self.config.decoder.clone())?);
        Ok(())
    }

    /**
        Size of the frames the open decoder produces.
    */
    pub fn codec_size(&self) -> Option<VideoSize> {
        self.decoder
            .as_ref()
            .map(|d| VideoSize::new(d.width(), d.height()))
    }

    pub fn read_packet(&mut self) -> Result<Packet> {
        self.source.read_packet()
    }

    pub fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        self.decoder_mut()?.send_packet(packet)
    }

    /**
        Receive the next frame in the codec's pixel format.
    */
    pub fn receive_frame(&mut self) -> Result<DecodedFrame> {
        self.decoder_mut()?.receive_frame()
    }

    /**
        Seek a stream directly. The status of the seek is returned unchanged.

        Does not reset the decoder.
    */
    pub fn seek_frame(&mut self, stream_index: usize, timestamp: i64, flags: SeekFlags) -> Result<()> {
        self.source.seek_stream(stream_index, timestamp, flags)
    }

    pub fn time_base(&self, stream_index: usize) -> Result<Rational> {
        self.source.time_base(stream_index)
    }

    /**
        Create a rescaler from the decoder's geometry to the given size and
        pixel format, replacing any existing one.

        Fails with `InvalidState` if no decoder is open.
    */
    pub fn create_rescaler(
        &mut self,
        size: VideoSize,
        format: PixelFormat,
        algorithm: ScalingAlgorithm,
    ) -> Result<()> {
        let decoder = self
            .decoder
            .as_ref()
            .ok_or_else(|| Error::invalid_state("no decoder open"))?;

        let config = RescalerConfig::new(
            VideoSize::new(decoder.width(), decoder.height()),
            decoder.pixel(),
            size,
            format,
        )
        .with_algorithm(algorithm);

        self.rescaler = Some(Rescaler::new(config)?);
        Ok(())
    }

    pub fn has_rescaler(&self) -> bool {
        self.rescaler.is_some()
    }

    pub fn rescale(&mut self, frame: &DecodedFrame) -> Result<VideoFrame> {
        self.rescaler
            .as_mut()
            .ok_or_else(|| Error::invalid_state("no rescaler"))?
            .rescale_decoded(frame)
    }

    pub fn close_rescaler(&mut self) {
        self.rescaler = None;
    }

    /**
        Request YUV420P output at the given size.

        Applied when the player initialises, or right away if it already has.
    */
    pub fn set_scale(&mut self, width: u32, height: u32) -> Result<()> {
        let size = VideoSize::new(width, height);
        if self.initialized {
            self.create_rescaler(size, PixelFormat::Yuv420p, ScalingAlgorithm::default())
        } else {
            self.pending_scale = Some(size);
            Ok(())
        }
    }

    /**
        Same as [`set_scale`](Self::set_scale), taking a size string such
        as `640x480` or `vga`.
    */
    pub fn set_scale_size(&mut self, size: &str) -> Result<()> {
        let size = parse_video_size(size)?;
        self.set_scale(size.width, size.height)
    }

    /**
        Register the callback that receives every delivered frame.
    */
    pub fn on_frame<F>(&mut self, callback: F)
    where
        F: FnMut(Frame) + 'static,
    {
        self.on_frame = Some(Box::new(callback));
    }

    /**
        Play until the stream ends or the player is stopped.

        Initialises the player on first use. Returns `Ok` once the status is
        `Ended` or `Stopped`. End of stream is handled here, every other
        error is returned.
    */
    pub fn run(&mut self) -> Result<()> {
        self.initialize()?;
        let video_index = self.video_index()?;

        loop {
            match self.control.status() {
                Status::Seeking => {
                    if let Some(target) = self.control.take_seek() {
                        self.apply_seek(video_index, target)?;
                    }
                }
                Status::Playing => {
                    self.clock.resume();
                    match self.source.read_packet() {
                        Ok(packet) if packet.is_from_stream(video_index) => {
                            let frames = self.decoder_mut()?.decode(&packet)?;
                            self.deliver(frames)?;
                        }
                        Ok(_) => {}
                        Err(Error::Eof) => self.end_of_stream(video_index)?,
                        Err(Error::Again) => std::thread::sleep(POLL_INTERVAL),
                        Err(e) => return Err(e),
                    }
                }
                Status::Paused => {
                    self.clock.pause();
                    std::thread::sleep(POLL_INTERVAL);
                }
                Status::Ended | Status::Stopped => return Ok(()),
            }
        }
    }

    /**
        Close the player, releasing the rescaler, decoder and container in
        that order.
    */
    pub fn close(mut self) {
        self.close_rescaler();
        self.decoder = None;
        self.stream = None;
        debug!(path = %self.source.path().display(), "closed player");
    }

    fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        if self.stream.is_none() {
            self.select_video_stream()?;
        }
        if self.decoder.is_none() {
            self.open_codec()?;
        }
        if let Some(size) = self.pending_scale.take() {
            self.create_rescaler(size, PixelFormat::Yuv420p, ScalingAlgorithm::default())?;
        }

        let size = match (&self.rescaler, self.codec_size()) {
            (Some(rescaler), _) => rescaler.output_size(),
            (None, Some(size)) => size,
            (None, None) => return Err(Error::invalid_state("no decoder open")),
        };
        info!("size {size}");

        self.initialized = true;
        Ok(())
    }

    fn video_index(&self) -> Result<usize> {
        self.stream
            .as_ref()
            .map(SelectedStream::index)
            .ok_or_else(|| Error::invalid_state("no video stream selected"))
    }

    fn decoder_mut(&mut self) -> Result<&mut VideoDecoder> {
        self.decoder
            .as_mut()
            .ok_or_else(|| Error::invalid_state("no decoder open"))
    }

    fn apply_seek(&mut self, video_index: usize, target: i64) -> Result<()> {
        self.source
            .seek_stream(video_index, target, SeekFlags::FRAME | SeekFlags::ANY)?;
        self.decoder_mut()?.reset();
        self.pace_origin = None;
        Ok(())
    }

    fn end_of_stream(&mut self, video_index: usize) -> Result<()> {
        let frames = self.decoder_mut()?.flush()?;
        self.deliver(frames)?;

        if self.config.looping {
            debug!("end of stream, looping");
            self.apply_seek(video_index, 0)
        } else {
            debug!("end of stream");
            self.control.finish();
            Ok(())
        }
    }

    fn deliver(&mut self, frames: Vec<DecodedFrame>) -> Result<()> {
        for frame in frames {
            // A stop or seek from the callback discards the rest of the batch
            if matches!(self.control.status(), Status::Stopped | Status::Seeking) {
                break;
            }

            // Frames without a packed form fail here unless a rescaler converts them
            let video = match self.rescaler.as_mut() {
                Some(rescaler) => rescaler.rescale_decoded(&frame)?,
                None => frame.to_packed()?,
            };
            let frame = Frame::new(video);
            debug!(timestamp_us = ?frame.timestamp_us, "frame");

            if self.config.realtime {
                if let Some(timestamp) = frame.timestamp() {
                    self.pace(timestamp);
                }
            }

            if let Some(callback) = self.on_frame.as_mut() {
                callback(frame);
            }
        }
        Ok(())
    }

    /**
        Sleep until a frame is due according to the wall clock.
    */
    fn pace(&mut self, timestamp: Duration) {
        let origin = match self.pace_origin {
            Some(origin) => origin,
            None => {
                self.clock.reset_to(Duration::ZERO);
                self.pace_origin = Some(timestamp);
                timestamp
            }
        };

        let due = timestamp.saturating_sub(origin);
        let now = self.clock.position();
        if due > now {
            std::thread::sleep(due - now);
        }
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("source", &self.source)
            .field("stream", &self.stream)
            .field("decoder", &self.decoder)
            .field("rescaler", &self.rescaler)
            .field("status", &self.control.status())
            .finish_non_exhaustive()
    }
}
