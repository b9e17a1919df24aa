/*!
    Probing functionality for extracting media metadata.
*/

use std::path::Path;
use std::time::Duration;

use ffmpeg_next::{format::context::Input as InputContext, media::Type};

use ffmpeg_types::{MediaDuration, MediaInfo, PixelFormat, Rational, Result, VideoStreamInfo};

/**
    Probe a media file to extract metadata without opening it for playback.

    # Example

    ```ignore
    let info = probe("video.mp4")?;
    if let Some(video) = &info.video {
        println!("Video: {}x{}", video.width, video.height);
    }
    ```
*/
pub fn probe<P: AsRef<Path>>(path: P) -> Result<MediaInfo> {
    ffmpeg_next::init()?;
    let input_ctx = ffmpeg_next::format::input(&path)?;
    Ok(extract_media_info(&input_ctx))
}

/**
    Extract MediaInfo from an already-opened input context.
*/
pub(crate) fn extract_media_info(input_ctx: &InputContext) -> MediaInfo {
    let video = extract_video_stream_info(input_ctx);

    // Container duration is in AV_TIME_BASE (microsecond) units
    let duration = if input_ctx.duration() > 0 {
        Some(Duration::from_micros(input_ctx.duration() as u64))
    } else {
        video.as_ref().and_then(|v| v.duration)
    };

    MediaInfo {
        duration,
        stream_count: input_ctx.streams().count(),
        video,
    }
}

fn extract_video_stream_info(input_ctx: &InputContext) -> Option<VideoStreamInfo> {
    let stream = input_ctx.streams().best(Type::Video)?;

    let time_base = Rational::from(stream.time_base());

    let duration = (stream.duration() > 0)
        .then(|| MediaDuration(stream.duration()).to_duration(time_base));

    let frame_rate = [stream.avg_frame_rate(), stream.rate()]
        .into_iter()
        .map(Rational::from)
        .find(|rate| !rate.is_zero());

    let codec_name = stream.parameters().id().name().to_string();

    // A decoder context gives us dimensions and pixel format without decoding
    let decoder_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters()).ok()?;
    let decoder = decoder_ctx.decoder().video().ok()?;

    Some(VideoStreamInfo {
        index: stream.index(),
        width: decoder.width(),
        height: decoder.height(),
        pixel_format: PixelFormat::try_from(decoder.format()).ok(),
        frame_rate,
        time_base,
        duration,
        codec_name,
    })
}
