/*!
    Shared types for the ffmpeg crate ecosystem.

    This crate defines the vocabulary of the ecosystem, the types that cross crate
    boundaries. By default it has no dependency on FFmpeg, so consumers can depend
    on it without pulling in FFmpeg bindings. The `ffmpeg` feature adds conversions
    to and from `ffmpeg-next` types.

    # Core Types

    - [`Rational`] - Rational numbers for time bases and frame rates
    - [`Pts`] and [`MediaDuration`] - Timestamps in time_base units
    - [`VideoFrame`] - Decoded frame data
    - [`Packet`] and [`StreamType`] - Encoded packet data
    - `DecodedFrame` - A decoder's frame in its native layout (`ffmpeg` feature)

    # Format Types

    - [`PixelFormat`] and [`PlaneLayout`] - Video pixel formats and their byte layout
    - [`VideoSize`] - Frame dimensions

    # Stream Information

    - [`VideoStreamInfo`] - Stream metadata
    - [`MediaInfo`] - Combined media information

    # Clock

    - [`Clock`] - Trait for playback clocks
    - [`WallClock`] - Pausable wall-time clock

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
*/

mod clock;
mod error;
mod format;
mod frame;
mod packet;
mod rational;
mod stream;
mod timestamp;

#[cfg(feature = "ffmpeg")]
mod decoded;
#[cfg(feature = "ffmpeg")]
mod ffmpeg;

pub use clock::{Clock, WallClock};
#[cfg(feature = "ffmpeg")]
pub use decoded::DecodedFrame;
pub use error::{Error, Result};
pub use format::{PixelFormat, PlaneLayout, VideoSize};
pub use frame::VideoFrame;
pub use packet::{Packet, StreamType};
pub use rational::Rational;
pub use stream::{MediaInfo, VideoStreamInfo};
pub use timestamp::{MediaDuration, Pts};
