/*!
    Player configuration.
*/

use ffmpeg_decode::VideoDecoderConfig;

/**
    Configuration for a [`Player`](crate::Player).
*/
#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Start playing as soon as `run` is called. Otherwise start paused.
    pub autoplay: bool,
    /// Seek back to the start when the stream ends.
    pub looping: bool,
    /// Print the container description to stderr when opening.
    pub dump_format: bool,
    /// Deliver frames no faster than their timestamps.
    pub realtime: bool,
    /// Decoder settings.
    pub decoder: VideoDecoderConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            looping: false,
            dump_format: false,
            realtime: false,
            decoder: VideoDecoderConfig::default(),
        }
    }
}

impl PlayerConfig {
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_dump_format(mut self, dump_format: bool) -> Self {
        self.dump_format = dump_format;
        self
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_decoder(mut self, decoder: VideoDecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }
}
