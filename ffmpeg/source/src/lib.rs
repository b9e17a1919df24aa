/*!
    Media source and demuxing for the ffmpeg crate ecosystem.

    This crate handles the input side of the media pipeline. It opens a media
    container, picks the stream to decode, and produces encoded packets that
    downstream crates can decode.

    # Example

    ```ignore
    use ffmpeg_source::{Source, SourceConfig};

    let mut source = Source::open("video.mp4", SourceConfig::default())?;
    let stream = source.select_video_stream()?;

    for packet in &mut source {
        let packet = packet?;
        if packet.is_from_stream(stream.index()) {
            // hand to a decoder
        }
    }
    ```
*/

mod config;
mod probe;
mod source;

pub use config::{SeekFlags, SourceConfig};
pub use probe::probe;
pub use source::{SelectedStream, Source, open};

pub use ffmpeg_types::{Error, MediaInfo, Packet, Result, StreamType, VideoStreamInfo};
