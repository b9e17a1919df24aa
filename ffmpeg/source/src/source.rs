/*!
    Media source implementation.
*/

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ffmpeg_next::{codec, ffi, format::context::Input as InputContext, media::Type};
use tracing::{debug, error, warn};

use ffmpeg_types::{Error, MediaDuration, MediaInfo, Packet, Pts, Rational, Result, StreamType};

use crate::config::{SeekFlags, SourceConfig};
use crate::probe::extract_media_info;

/**
    The video stream chosen for decoding.

    Only obtainable from [`Source::select_video_stream`], so a decoder can
    never be created before a stream has been selected.
*/
#[derive(Clone)]
pub struct SelectedStream {
    index: usize,
    time_base: Rational,
    parameters: codec::Parameters,
}

impl SelectedStream {
    /**
        Index of the stream within its container.
    */
    pub fn index(&self) -> usize {
        self.index
    }

    /**
        Time base of the stream's timestamps.
    */
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /**
        Codec parameters of the stream, used to open a decoder.
    */
    pub fn parameters(&self) -> &codec::Parameters {
        &self.parameters
    }
}

impl fmt::Debug for SelectedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedStream")
            .field("index", &self.index)
            .field("time_base", &self.time_base)
            .field("codec", &self.parameters.id())
            .finish()
    }
}

/**
    An opened media container.

    Created by [`Source::open`]. Reads packets from every stream in file
    order and seeks within the container. Dropping the source closes it.
*/
pub struct Source {
    input: InputContext,
    path: PathBuf,
    media_info: MediaInfo,
    /// Type and time base of each stream, by index.
    streams: Vec<(StreamType, Rational)>,
    video_stream_index: Option<usize>,
}

impl Source {
    /**
        Open a media file.

        # Example

        ```ignore
        let source = Source::open("video.mp4", SourceConfig::default())?;
        println!("Duration: {:?}", source.media_info().duration);
        ```
    */
    pub fn open<P: AsRef<Path>>(path: P, config: SourceConfig) -> Result<Self> {
        ffmpeg_next::init()?;

        let path = path.as_ref().to_path_buf();
        let input = ffmpeg_next::format::input(&path).map_err(|e| {
            error!("could not open source file {}", path.display());
            Error::from(e)
        })?;

        if config.dump_format {
            ffmpeg_next::format::context::input::dump(&input, 0, path.to_str());
        }

        let media_info = extract_media_info(&input);
        let streams = input.streams().map(|s| describe_stream(&s)).collect();

        debug!(
            path = %path.display(),
            streams = media_info.stream_count,
            duration = ?media_info.duration,
            "opened source"
        );

        Ok(Self {
            input,
            path,
            media_info,
            streams,
            video_stream_index: None,
        })
    }

    /**
        Path the source was opened from.
    */
    pub fn path(&self) -> &Path {
        &self.path
    }

    /**
        Get the media info for this source.
    */
    pub fn media_info(&self) -> &MediaInfo {
        &self.media_info
    }

    /**
        Number of streams in the container.
    */
    pub fn stream_count(&self) -> usize {
        self.streams.len()
    }

    /**
        Index of the selected video stream, if one has been selected.
    */
    pub fn video_stream_index(&self) -> Option<usize> {
        self.video_stream_index
    }

    /**
        Pick the best video stream in the container.

        Fails with FFmpeg's "stream not found" status if there is none.
    */
    pub fn select_video_stream(&mut self) -> Result<SelectedStream> {
        let stream = self.input.streams().best(Type::Video).ok_or_else(|| {
            warn!(path = %self.path.display(), "no video stream");
            Error::from(ffmpeg_next::Error::StreamNotFound)
        })?;

        let selected = SelectedStream {
            index: stream.index(),
            time_base: Rational::from(stream.time_base()),
            parameters: stream.parameters(),
        };
        self.video_stream_index = Some(selected.index);

        debug!(index = selected.index, time_base = %selected.time_base, "selected video stream");
        Ok(selected)
    }

    /**
        Time base of a stream.
    */
    pub fn time_base(&self, stream_index: usize) -> Result<Rational> {
        self.stream_entry(stream_index).map(|(_, time_base)| time_base)
    }

    /**
        Read the next packet from any stream.

        Packets are returned in file order, interleaved between streams.
        End of file is [`Error::Eof`]; every other status is forwarded.
    */
    pub fn read_packet(&mut self) -> Result<Packet> {
        let mut packet = ffmpeg_next::Packet::empty();
        packet.read(&mut self.input)?;

        let stream_index = packet.stream();
        let (stream_type, time_base) = self.stream_entry(stream_index)?;

        Ok(Packet::new(
            packet.data().map(<[u8]>::to_vec).unwrap_or_default(),
            stream_index,
            packet.pts().map(Pts),
            packet.dts().map(Pts),
            MediaDuration(packet.duration()),
            time_base,
            packet.is_key(),
            stream_type,
        ))
    }

    /**
        Seek a stream to a timestamp in that stream's time base.

        Forwards to `av_seek_frame`; the status is returned unchanged.
        After seeking, reset any decoder fed from this source.
    */
    pub fn seek_stream(&mut self, stream_index: usize, timestamp: i64, flags: SeekFlags) -> Result<()> {
        debug!(stream_index, timestamp, ?flags, "seek");

        let stream_index = i32::try_from(stream_index)
            .map_err(|_| Error::invalid_data(format!("stream index {stream_index} out of range")))?;

        // SAFETY: the input context is open for the lifetime of self
        let ret = unsafe {
            ffi::av_seek_frame(self.input.as_mut_ptr(), stream_index, timestamp, flags.bits())
        };
        if ret < 0 {
            return Err(ffmpeg_next::Error::from(ret).into());
        }
        Ok(())
    }

    /**
        Seek the container to the keyframe at or before a position.

        The actual position after seeking may be before the target due to
        keyframe alignment.
    */
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        let timestamp = i64::try_from(position.as_micros()).unwrap_or(i64::MAX);
        debug!(?position, "seek");
        self.input.seek(timestamp, ..timestamp)?;
        Ok(())
    }

    fn stream_entry(&self, stream_index: usize) -> Result<(StreamType, Rational)> {
        if let Some(entry) = self.streams.get(stream_index) {
            return Ok(*entry);
        }
        // Streams may be added after the header was read
        self.input
            .stream(stream_index)
            .map(|s| describe_stream(&s))
            .ok_or_else(|| Error::from(ffmpeg_next::Error::StreamNotFound))
    }
}

fn describe_stream(stream: &ffmpeg_next::Stream) -> (StreamType, Rational) {
    let stream_type = match stream.parameters().medium() {
        Type::Video => StreamType::Video,
        Type::Audio => StreamType::Audio,
        Type::Subtitle => StreamType::Subtitle,
        Type::Data => StreamType::Data,
        _ => StreamType::Other,
    };
    (stream_type, Rational::from(stream.time_base()))
}

/**
    Iterator adapter for Source that yields packets until end of stream.
*/
impl Iterator for Source {
    type Item = Result<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_packet() {
            Ok(packet) => Some(Ok(packet)),
            Err(Error::Eof) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("path", &self.path)
            .field("streams", &self.streams.len())
            .field("video_stream_index", &self.video_stream_index)
            .finish_non_exhaustive()
    }
}

/**
    Open a media file with default configuration.
*/
pub fn open<P: AsRef<Path>>(path: P) -> Result<Source> {
    Source::open(path, SourceConfig::default())
}
