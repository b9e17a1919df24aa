/*!
    Media frame transformation for the ffmpeg crate ecosystem.

    This crate converts decoded video frames between sizes and pixel formats.
    Decoders output frames in whatever format the codec specifies; a
    [`Rescaler`] turns them into the format consumers need.

    # Example

    ```ignore
    use ffmpeg_transform::{Rescaler, RescalerConfig, parse_video_size};
    use ffmpeg_types::PixelFormat;

    let target = parse_video_size("hd720")?;
    let config = RescalerConfig::new(decoder_size, decoder.pixel(), target, PixelFormat::Yuv420p);
    let mut rescaler = Rescaler::new(config)?;

    for frame in decoded_frames {
        let scaled = rescaler.rescale_decoded(&frame)?;
        // Consume scaled frame
    }
    ```

    # Fixed geometry

    A rescaler is created for one source geometry and one destination
    geometry, and its output buffer is allocated up front. Frames of any
    other size or format are rejected with [`Error::InvalidData`]; create a
    new rescaler when the stream geometry changes.
*/

pub use ffmpeg_types::{DecodedFrame, Error, PixelFormat, Result, VideoFrame, VideoSize};

mod video;

pub use video::{Rescaler, RescalerConfig, ScalingAlgorithm, parse_video_size};
