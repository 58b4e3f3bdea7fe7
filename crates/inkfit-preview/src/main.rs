use argh::FromArgs;
use inkfit_image::ImageSize;
use inkfit_io::{fps_counter::FpsCounter, functional as F};
use inkfit_pose::zoom::ControlLayout;
use inkfit_preview::{
    sink::{NullSink, PngSequenceSink},
    synthetic::{demo_overlay, CheckerboardCamera, SweepingArmTracker},
    DisplaySink, FrameOutcome, PreviewConfig, PreviewSession,
};
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

#[derive(FromArgs, Debug)]
/// Preview a tattoo on a synthetic forearm
struct Args {
    /// path to the overlay image, a demo overlay is generated when omitted
    #[argh(option, short = 'i')]
    overlay: Option<PathBuf>,

    /// path to a JSON configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// directory to write the composited frames to
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// number of frames to process
    #[argh(option, short = 'n', default = "120")]
    num_frames: usize,

    /// width of the frames
    #[argh(option, default = "1280")]
    width: usize,

    /// height of the frames
    #[argh(option, default = "720")]
    height: usize,

    /// drop tracking data every N frames, 0 never drops
    #[argh(option, default = "0")]
    gap_every: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => PreviewConfig::from_file(path)?,
        None => PreviewConfig::default(),
    };

    let overlay = match &args.overlay {
        Some(path) => F::read_overlay_rgba8(path)?,
        None => demo_overlay([256, 256].into())?,
    };

    let frame_size = ImageSize {
        width: args.width,
        height: args.height,
    };

    let layout = ControlLayout::for_frame(
        frame_size,
        config.controls.radius,
        config.controls.padding,
        config.controls.offset,
    );

    let mut camera = CheckerboardCamera::new(frame_size, 40)?;
    let mut tracker = SweepingArmTracker::new(frame_size, layout).with_gaps(args.gap_every);
    let mut sink: Box<dyn DisplaySink> = match &args.output {
        Some(dir) => Box::new(PngSequenceSink::new(dir)?),
        None => Box::new(NullSink),
    };

    let mut session = PreviewSession::new(config, overlay)?;

    // create a cancel token to stop the preview loop
    let cancel_token = Arc::new(AtomicBool::new(false));

    ctrlc::set_handler({
        let cancel_token = cancel_token.clone();
        move || {
            log::info!("Received Ctrl-C signal. Sending cancel signal !!");
            cancel_token.store(true, Ordering::SeqCst);
        }
    })?;

    let mut fps_counter = FpsCounter::new();
    let mut composited = 0;

    for i in 0..args.num_frames {
        if cancel_token.load(Ordering::SeqCst) {
            break;
        }

        let outcome = session.step(&mut camera, &mut tracker, sink.as_mut())?;
        if outcome == FrameOutcome::Composited {
            composited += 1;
        }

        fps_counter.update();
        if i % 30 == 0 {
            log::info!(
                "frame {i}: {outcome:?}, zoom {:.2}, {:.1} fps",
                session.zoom_factor(),
                fps_counter.fps()
            );
        }
    }

    log::info!(
        "processed {} frames, {} with the overlay",
        fps_counter.frames(),
        composited
    );

    Ok(())
}
