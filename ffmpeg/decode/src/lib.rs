/*!
    Media decoding for the ffmpeg crate ecosystem.

    This crate transforms encoded packets into raw frames. Decoders are
    opened from a stream selected on an [`ffmpeg_source::Source`], so the
    stream always exists before its decoder does.

    # Example

    ```ignore
    use ffmpeg_source::open;
    use ffmpeg_decode::{VideoDecoder, VideoDecoderConfig};

    let mut source = open("video.mp4")?;
    let stream = source.select_video_stream()?;
    let mut decoder = VideoDecoder::open(&stream, VideoDecoderConfig::new())?;

    for packet in &mut source {
        let packet = packet?;
        if packet.is_from_stream(stream.index()) {
            for frame in decoder.decode(&packet)? {
                // Process frame
            }
        }
    }

    // Drain frames still buffered in the decoder
    let remaining = decoder.flush()?;
    ```

    # Send / receive

    [`VideoDecoder::send_packet`] and [`VideoDecoder::receive_frame`] map one
    to one onto FFmpeg's send/receive API and forward its statuses, with
    [`Error::Again`] standing for "need more input" and [`Error::Eof`] for
    a fully drained decoder. [`VideoDecoder::decode`] wraps the two for the
    common case.

    Frames keep the codec's pixel format. Pack them with
    [`DecodedFrame::to_packed`], or hand them to a rescaler first when the
    format has no packed form.
*/

pub use ffmpeg_source::SelectedStream;
pub use ffmpeg_types::{DecodedFrame, Error, Packet, Result};

mod config;
mod video;

pub use config::VideoDecoderConfig;
pub use video::VideoDecoder;
