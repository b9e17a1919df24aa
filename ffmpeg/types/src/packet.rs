/*!
    Demuxed packets.
*/

use std::time::Duration;

use crate::{MediaDuration, Pts, Rational};

/**
    Kind of stream a packet was read from.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamType {
    Video,
    Audio,
    Subtitle,
    /// Timecodes, metadata tracks and similar.
    Data,
    /// Attachments and anything the demuxer could not classify.
    Other,
}

/**
    One compressed packet, as read from a container.

    Packets of every stream come out of the container interleaved. Use
    [`Packet::is_from_stream`] to pick out the ones a decoder wants.
*/
#[derive(Clone, Debug)]
pub struct Packet {
    pub data: Vec<u8>,
    /// Index of the stream within its container.
    pub stream_index: usize,
    pub pts: Option<Pts>,
    /// Decode timestamp. Differs from `pts` when frames are reordered.
    pub dts: Option<Pts>,
    pub duration: MediaDuration,
    /// Time base of the owning stream.
    pub time_base: Rational,
    pub is_keyframe: bool,
    pub stream_type: StreamType,
}

impl Packet {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        data: Vec<u8>,
        stream_index: usize,
        pts: Option<Pts>,
        dts: Option<Pts>,
        duration: MediaDuration,
        time_base: Rational,
        is_keyframe: bool,
        stream_type: StreamType,
    ) -> Self {
        Self {
            data,
            stream_index,
            pts,
            dts,
            duration,
            time_base,
            is_keyframe,
            stream_type,
        }
    }

    pub fn is_video(&self) -> bool {
        self.stream_type == StreamType::Video
    }

    pub fn is_from_stream(&self, stream_index: usize) -> bool {
        self.stream_index == stream_index
    }

    /**
        The decode timestamp, or the presentation timestamp for containers
        that only carry one.
    */
    pub fn decode_timestamp(&self) -> Option<Pts> {
        self.dts.or(self.pts)
    }

    /**
        How long the packet's content lasts.
    */
    pub fn duration(&self) -> Duration {
        self.duration.to_duration(self.time_base)
    }
}

static_assertions::assert_impl_all!(Packet: Send, Sync);
