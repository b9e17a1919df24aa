#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 48;
pub const FRAME_COUNT: usize = 10;
/// Frames are 1/10 s apart, so frame `n` is at `n * FRAME_STEP_US`.
pub const FRAME_STEP_US: i64 = 100_000;

/**
    Luma value of frame `n` in the synthetic clip.
*/
pub fn luma_of(n: usize) -> u8 {
    (n * 20) as u8
}

/**
    Write a YUV4MPEG2 clip of `FRAME_COUNT` solid frames at 10 fps.
*/
pub fn write_y4m(dir: &Path) -> PathBuf {
    let path = dir.join("clip.y4m");

    let luma_len = (WIDTH * HEIGHT) as usize;
    let chroma_len = ((WIDTH / 2) * (HEIGHT / 2)) as usize;

    let mut data = format!("YUV4MPEG2 W{WIDTH} H{HEIGHT} F10:1 Ip A1:1 C420jpeg\n").into_bytes();
    for n in 0..FRAME_COUNT {
        data.extend_from_slice(b"FRAME\n");
        data.extend(std::iter::repeat_n(luma_of(n), luma_len));
        data.extend(std::iter::repeat_n(128u8, chroma_len * 2));
    }

    fs::write(&path, data).expect("write y4m");
    path
}

/// Luma sample of the 10-bit clip.
pub const LUMA_10BIT: u16 = 400;
/// `LUMA_10BIT` reduced to eight bits.
pub const LUMA_10BIT_AS_8BIT: u8 = 100;

/**
    Write a 10-bit 4:2:2 YUV4MPEG2 clip of `FRAME_COUNT` solid frames at
    10 fps. Samples are 16-bit little endian.
*/
pub fn write_y4m_422p10(dir: &Path) -> PathBuf {
    let path = dir.join("clip-422p10.y4m");

    let luma_samples = (WIDTH * HEIGHT) as usize;
    let chroma_samples = ((WIDTH / 2) * HEIGHT) as usize;

    let mut data = format!("YUV4MPEG2 W{WIDTH} H{HEIGHT} F10:1 Ip A1:1 C422p10\n").into_bytes();
    for _ in 0..FRAME_COUNT {
        data.extend_from_slice(b"FRAME\n");
        for _ in 0..luma_samples {
            data.extend_from_slice(&LUMA_10BIT.to_le_bytes());
        }
        for _ in 0..chroma_samples * 2 {
            data.extend_from_slice(&512u16.to_le_bytes());
        }
    }

    fs::write(&path, data).expect("write y4m");
    path
}

/**
    Write a short mono PCM WAV file, a container with no video stream.
*/
pub fn write_wav(dir: &Path) -> PathBuf {
    let path = dir.join("tone.wav");

    let sample_rate: u32 = 8000;
    let samples: Vec<u8> = (0..sample_rate / 10)
        .flat_map(|i| ((i % 64) as i16 * 256).to_le_bytes())
        .collect();
    let data_len = samples.len() as u32;

    let mut data = Vec::with_capacity(44 + samples.len());
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&(36 + data_len).to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // mono
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    data.extend_from_slice(&2u16.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_len.to_le_bytes());
    data.extend_from_slice(&samples);

    fs::write(&path, data).expect("write wav");
    path
}
