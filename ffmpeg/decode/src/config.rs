/*!
    Decoder configuration types.
*/

/**
    Configuration for video decoder.
*/
#[derive(Clone, Debug, Default)]
pub struct VideoDecoderConfig {
    /// Number of decoding threads (None = FFmpeg's default, 0 = auto-detect).
    pub threads: Option<usize>,
}

impl VideoDecoderConfig {
    /**
        Create a new config with default settings.
    */
    pub fn new() -> Self {
        Self::default()
    }

    /**
        Create a config that decodes with the given number of threads.

        Passing 0 lets FFmpeg pick a count based on the available cores.
    */
    pub fn with_threads(threads: usize) -> Self {
        Self {
            threads: Some(threads),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leaves_threading_alone() {
        assert_eq!(VideoDecoderConfig::new().threads, None);
        assert_eq!(VideoDecoderConfig::with_threads(4).threads, Some(4));
    }
}
