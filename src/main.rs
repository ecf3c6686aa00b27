mod config;
mod event;
mod host;

use anyhow::{Context, Result};
use emu_window::{
    init_libretro_window, EmuEvent, EmuWindow, HeadlessContext, PointerSample, TouchEvent,
};
use std::time::Duration;

use crate::config::HostConfig;
use crate::host::{Engine, FrameOutcome, RetroCore};

const POINTER_STEPS: u32 = 32;

/// Clears and swaps every frame, logs touch input.
#[derive(Default)]
struct BlankEngine;

impl Engine for BlankEngine {
    fn init_renderer(&mut self, window: &mut dyn EmuWindow) -> Result<()> {
        let (width, height) = window.size();
        log::info!("Renderer target {}x{} @{}x", width, height, window.scale_factor());
        Ok(())
    }

    fn run_frame(&mut self, window: &mut dyn EmuWindow) -> Result<()> {
        window.make_current()?;
        window.setup_framebuffer()?;
        window.swap_buffers()?;
        window.done_current();
        Ok(())
    }

    fn handle_input(&mut self, event: EmuEvent) {
        match event {
            EmuEvent::Touch(TouchEvent::Pressed { x, y }) => log::info!("Touch at {}, {}", x, y),
            EmuEvent::Touch(TouchEvent::Moved { x, y }) => log::debug!("Touch moved {}, {}", x, y),
            EmuEvent::Touch(TouchEvent::Released) => log::info!("Touch released"),
            EmuEvent::LayoutChanged { width, height } => {
                log::info!("Layout {}x{}", width, height)
            }
        }
    }
}

fn main() -> Result<()> {
    profiling::register_thread!("Main Thread");
    env_logger::init();

    let path = std::env::args().nth(1);
    let config = HostConfig::load_or_default(path.as_deref())?;
    let (event_tx, event_rx) = event::channel();

    log::info!("Init window");
    let (window, host) =
        init_libretro_window(config.window.clone(), HeadlessContext::default(), event_tx)
            .context("Failed to init window")?;

    let mut retro = RetroCore::new(window, BlankEngine::default(), event_rx);
    retro.load()?;

    // the host thread reports input on its own schedule
    let pointer = std::thread::spawn(move || {
        profiling::register_thread!("Host Input");
        host.request_minimal_area(1024, 960);
        for step in 0..POINTER_STEPS {
            let x = (step as i32 * 0x7fff / POINTER_STEPS as i32) as i16;
            host.report_pointer(PointerSample::new(x, 0x4000, step < POINTER_STEPS - 1));
            std::thread::sleep(Duration::from_millis(4));
        }
    });

    retro.context_reset()?;

    let mut presented = 0;
    for _ in 0..config.frames {
        if retro.run()? == FrameOutcome::Presented {
            presented += 1;
        }
        profiling::finish_frame!();
        std::thread::sleep(Duration::from_millis(1));
    }

    pointer.join().ok();
    retro.run()?;
    retro.context_destroy();

    let stats = retro.window().context().stats();
    log::info!(
        "Presented {}/{} frames, {} clears, status {:?}",
        presented,
        config.frames,
        stats.clears,
        retro.window().status()
    );
    Ok(())
}
