use anyhow::{Context, Result};
use emu_window::{EmuEvent, EmuWindow, HostContext, LibretroWindow};

use crate::event::Rx;

/// The emulation engine as seen from the host loop.
pub trait Engine {
    fn init_renderer(&mut self, window: &mut dyn EmuWindow) -> Result<()>;
    fn run_frame(&mut self, window: &mut dyn EmuWindow) -> Result<()>;
    fn handle_input(&mut self, event: EmuEvent);
}

/// What the host should show for the tick that just ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Nothing new was rendered, repeat the previous frame.
    Duplicated,
}

/// Plays the plugin runtime's part: forwards context callbacks and runs
/// one engine frame per host tick.
pub struct RetroCore<E, C> {
    window: LibretroWindow<C>,
    engine: E,
    event_rx: Rx,
    renderer_ready: bool,
}

impl<E: Engine, C: HostContext> RetroCore<E, C> {
    pub fn new(window: LibretroWindow<C>, engine: E, event_rx: Rx) -> Self {
        Self {
            window,
            engine,
            event_rx,
            renderer_ready: false,
        }
    }

    /// Game loaded. The host may not have a context yet.
    pub fn load(&mut self) -> Result<()> {
        if self.window.should_defer_renderer_init() {
            log::info!("Deferring renderer init until the host provides a context");
            return Ok(());
        }
        self.init_renderer()
    }

    pub fn context_reset(&mut self) -> Result<()> {
        self.window
            .create_context()
            .context("Failed to create context")?;
        if !self.renderer_ready {
            self.init_renderer()?;
        }
        Ok(())
    }

    pub fn context_destroy(&mut self) {
        self.window.destroy_context();
    }

    fn init_renderer(&mut self) -> Result<()> {
        self.engine
            .init_renderer(&mut self.window)
            .context("Failed to init renderer")?;
        self.renderer_ready = true;
        log::info!("Renderer initialised");
        Ok(())
    }

    #[profiling::function]
    pub fn run(&mut self) -> Result<FrameOutcome> {
        self.window.poll_events();
        for event in self.event_rx.try_iter() {
            self.engine.handle_input(event);
        }

        if self.renderer_ready {
            self.engine.run_frame(&mut self.window)?;
        }

        if self.window.has_submitted_frame() {
            Ok(FrameOutcome::Presented)
        } else {
            Ok(FrameOutcome::Duplicated)
        }
    }

    pub fn window(&self) -> &LibretroWindow<C> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut LibretroWindow<C> {
        &mut self.window
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_renderer_ready(&self) -> bool {
        self.renderer_ready
    }
}
