use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use tracing::{error, info};

use vidframes::{Player, PlayerConfig, RawVideoWriter, VideoDecoderConfig};

#[derive(Parser, Debug)]
#[command(name = "vidframes")]
#[command(about = "Decode a video file frame by frame")]
struct Args {
    /// Media file to decode
    #[arg(short, long)]
    input: PathBuf,

    /// Write decoded frames to a raw video file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output size, either WxH or an abbreviation such as "vga" or "hd720"
    #[arg(short, long)]
    scale: Option<String>,

    /// Start over when the end of the file is reached
    #[arg(long = "loop")]
    looping: bool,

    /// Print the container description before decoding
    #[arg(long)]
    dump_format: bool,

    /// Deliver frames at their presentation rate
    #[arg(long)]
    realtime: bool,

    /// Stop after this many frames
    #[arg(short = 'n', long)]
    max_frames: Option<u64>,

    /// Start at this timestamp, in the video stream's time base
    #[arg(long)]
    seek: Option<i64>,

    /// Decoder thread count (0 = auto)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

#[derive(Default)]
struct Progress {
    frames: u64,
    last_timestamp_us: Option<i64>,
    write_error: Option<vidframes::Error>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let decoder = match args.threads {
        Some(threads) => VideoDecoderConfig::with_threads(threads),
        None => VideoDecoderConfig::new(),
    };
    let config = PlayerConfig::default()
        .with_looping(args.looping)
        .with_dump_format(args.dump_format)
        .with_realtime(args.realtime)
        .with_decoder(decoder);

    let mut player = Player::open(&args.input, config)
        .with_context(|| format!("failed to open {}", args.input.display()))?;

    if let Some(scale) = &args.scale {
        player
            .set_scale_size(scale)
            .with_context(|| format!("invalid scale {scale:?}"))?;
    }
    if let Some(timestamp) = args.seek {
        player.seek(timestamp);
    }

    let writer = match &args.output {
        Some(path) => Some(
            RawVideoWriter::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => None,
    };
    let writer = Arc::new(Mutex::new(writer));
    let progress = Arc::new(Mutex::new(Progress::default()));

    let control = player.control();
    let max_frames = args.max_frames;
    {
        let writer = Arc::clone(&writer);
        let progress = Arc::clone(&progress);
        player.on_frame(move |frame| {
            let mut progress = progress.lock();
            if let Some(writer) = writer.lock().as_mut() {
                if let Err(e) = writer.write_frame(&frame.video) {
                    error!("failed to write frame: {e}");
                    progress.write_error = Some(e);
                    control.stop();
                    return;
                }
            }

            progress.frames += 1;
            progress.last_timestamp_us = frame.timestamp_us;

            if max_frames.is_some_and(|max| progress.frames >= max) {
                control.stop();
            }
        });
    }

    player.run().context("playback failed")?;
    let status = player.status();
    player.close();

    if let Some(writer) = writer.lock().take() {
        writer.finish().context("failed to flush output")?;
    }

    let progress = std::mem::take(&mut *progress.lock());
    if let Some(e) = progress.write_error {
        return Err(e).context("failed to write output");
    }

    info!(
        frames = progress.frames,
        last_timestamp_us = ?progress.last_timestamp_us,
        ?status,
        "done"
    );

    Ok(())
}
