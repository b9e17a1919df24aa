/*!
    Raw video output.
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ffmpeg_types::{Error, Result, VideoFrame};

/**
    Writes packed frames back to back, with no header.

    The output can be read back with `ffplay -f rawvideo` given the frame
    size and pixel format.
*/
#[derive(Debug)]
pub struct RawVideoWriter<W: Write> {
    writer: W,
    frames_written: u64,
}

impl RawVideoWriter<BufWriter<File>> {
    /**
        Create (or truncate) a file and write frames into it.
    */
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RawVideoWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
        }
    }

    /**
        Append one frame. Fails with `InvalidData` if the frame holds fewer
        bytes than its geometry needs.
    */
    pub fn write_frame(&mut self, frame: &VideoFrame) -> Result<()> {
        let len = frame.expected_data_len();
        let data = frame.data.get(..len).ok_or_else(|| {
            Error::invalid_data(format!(
                "frame data is {} bytes, expected {len}",
                frame.data.len()
            ))
        })?;
        self.writer.write_all(data)?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /**
        Flush and return the underlying writer.
    */
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffmpeg_types::{PixelFormat, Rational};

    fn gray(width: u32, height: u32, value: u8) -> VideoFrame {
        let len = (width * height) as usize;
        VideoFrame::new(vec![value; len], width, height, PixelFormat::Gray8, None, Rational::new(1, 1))
    }

    #[test]
    fn frames_are_concatenated() {
        let mut writer = RawVideoWriter::new(Vec::new());
        writer.write_frame(&gray(2, 2, 1)).expect("write");
        writer.write_frame(&gray(2, 2, 7)).expect("write");
        assert_eq!(writer.frames_written(), 2);

        let out = writer.finish().expect("finish");
        assert_eq!(out, vec![1, 1, 1, 1, 7, 7, 7, 7]);
    }

    #[test]
    fn trailing_bytes_are_not_written() {
        let mut frame = gray(2, 1, 3);
        frame.data.push(99);

        let mut writer = RawVideoWriter::new(Vec::new());
        writer.write_frame(&frame).expect("write");
        assert_eq!(writer.finish().expect("finish"), vec![3, 3]);
    }

    #[test]
    fn short_frame_is_rejected() {
        let mut frame = gray(4, 4, 0);
        frame.data.truncate(3);

        let mut writer = RawVideoWriter::new(Vec::new());
        let err = writer.write_frame(&frame).unwrap_err();
        assert!(matches!(err, Error::InvalidData { .. }));
        assert_eq!(writer.frames_written(), 0);
    }
}
