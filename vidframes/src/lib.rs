/*!
    Headless frame-by-frame video player.

    Opens a media file, picks its best video stream, decodes it and hands
    every frame (optionally rescaled) to a callback.

    # Example

    ```ignore
    use vidframes::{Player, PlayerConfig};

    let mut player = Player::open("video.mp4", PlayerConfig::default())?;
    player.set_scale_size("vga")?;
    player.on_frame(|frame| {
        println!("{:?} {}x{}", frame.timestamp_us, frame.width(), frame.height());
    });
    player.run()?;
    player.close();
    ```

    The lower-level handles are also available one step at a time through
    [`Player::select_video_stream`], [`Player::open_codec`],
    [`Player::read_packet`] and friends.
*/

mod config;
mod control;
mod frame;
mod output;
mod player;

pub use config::PlayerConfig;
pub use control::{PlaybackControl, Status};
pub use frame::Frame;
pub use output::RawVideoWriter;
pub use player::Player;

pub use ffmpeg_decode::VideoDecoderConfig;
pub use ffmpeg_source::SeekFlags;
pub use ffmpeg_transform::{ScalingAlgorithm, parse_video_size};
pub use ffmpeg_types::{
    DecodedFrame, Error, MediaInfo, Packet, PixelFormat, Pts, Rational, Result, VideoFrame,
    VideoSize,
};
