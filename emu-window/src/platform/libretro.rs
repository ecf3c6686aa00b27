use std::thread::ThreadId;

use crossbeam_channel::{Receiver, Sender, TryRecvError, TrySendError};

use crate::config::WindowConfig;
use crate::context::{Framebuffer, HostContext};
use crate::error::{Result, WindowError};
use crate::event::{EmuEvent, HostEvent};
use crate::layout::FramebufferLayout;
use crate::pointer::{PointerBridge, PointerSample, ScreenTracker};
use crate::state::{Affinity, ClearFlag, ContextState, FrameSignal, Lifecycle};
use crate::EmuWindow;

/// Host-side setters. Everything sent here is applied on the next
/// `poll_events`.
#[derive(Clone)]
pub struct HostHandle {
    tx: Sender<HostEvent>,
}

impl HostHandle {
    fn send(&self, event: HostEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(e)) => {
                log::warn!("Host event queue full, dropping {:?}", e);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    pub fn report_pointer(&self, sample: PointerSample) -> bool {
        self.send(HostEvent::Pointer(sample))
    }

    pub fn request_minimal_area(&self, width: u32, height: u32) -> bool {
        self.send(HostEvent::MinimalAreaChange { width, height })
    }

    pub fn set_emulated_pointer(&self, enabled: bool) -> bool {
        self.send(HostEvent::EmulatedPointer(enabled))
    }

    pub fn configure(&self, config: WindowConfig) -> bool {
        self.send(HostEvent::Configure(config))
    }
}

/// Observable adapter state, comparable across calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowStatus {
    pub lifecycle: Lifecycle,
    pub width: u32,
    pub height: u32,
    pub framebuffer: Option<Framebuffer>,
    pub needs_clearing: bool,
    pub frame_pending: bool,
    pub touching: bool,
}

/// Window whose context and surface belong to a plugin host.
pub struct LibretroWindow<C> {
    config: WindowConfig,
    minimal: (u32, u32),
    layout: FramebufferLayout,
    context: C,
    state: ContextState,
    affinity: Affinity,
    frame: FrameSignal,
    clear: ClearFlag,
    pointer: PointerBridge,
    host_rx: Receiver<HostEvent>,
    event_tx: Sender<EmuEvent>,
}

impl<C: HostContext> LibretroWindow<C> {
    pub fn new(
        config: WindowConfig,
        context: C,
        event_tx: Sender<EmuEvent>,
    ) -> Result<(Self, HostHandle)> {
        config.validate()?;
        let (host_tx, host_rx) = crossbeam_channel::bounded(256);
        let layout = FramebufferLayout::compute(&config, (0, 0));
        let pointer = PointerBridge::new(Box::new(ScreenTracker), config.emulated_pointer);

        log::info!(
            "Host window {}x{} (scale {}, {:?})",
            layout.width,
            layout.height,
            config.scale,
            config.layout
        );

        let window = Self {
            config,
            minimal: (0, 0),
            layout,
            context,
            state: ContextState::Uninitialized,
            affinity: Affinity::default(),
            frame: FrameSignal::default(),
            clear: ClearFlag::default(),
            pointer,
            host_rx,
            event_tx,
        };

        Ok((window, HostHandle { tx: host_tx }))
    }

    /// Set up state for a context the host has just made available.
    ///
    /// An existing context is torn down first.
    pub fn create_context(&mut self) -> Result<()> {
        self.affinity.debug_check("create_context");

        if let ContextState::Ready { .. } = self.state {
            log::info!("Context recreated without destroy, tearing down first");
            self.teardown();
        }

        let framebuffer = self
            .context
            .acquire_framebuffer()
            .map_err(WindowError::ContextCreation)?;

        log::info!("Context created, framebuffer {}", framebuffer.raw());
        self.state = ContextState::Ready { framebuffer };
        if let Some(ev) = self.pointer.reset() {
            self.emit(EmuEvent::Touch(ev));
        }
        self.announce_geometry();
        self.clear.request();
        Ok(())
    }

    /// Release state tied to the current context. No-op without one.
    pub fn destroy_context(&mut self) {
        self.affinity.debug_check("destroy_context");

        match self.state {
            ContextState::Ready { .. } => {
                self.teardown();
                log::info!("Context destroyed");
            }
            _ => log::debug!("destroy_context without a context, ignoring"),
        }
    }

    fn teardown(&mut self) {
        self.context.release();
        self.affinity.release();
        self.state = ContextState::Lost;
    }

    /// Recompute the framebuffer layout from the config and the host's
    /// minimal area.
    pub fn update_layout(&mut self) {
        let layout = FramebufferLayout::compute(&self.config, self.minimal);
        let changed = (layout.width, layout.height) != (self.layout.width, self.layout.height);
        self.layout = layout;
        self.announce_geometry();

        if changed {
            log::info!("Layout changed to {}x{}", layout.width, layout.height);
            self.emit(EmuEvent::LayoutChanged {
                width: layout.width,
                height: layout.height,
            });
        }
        self.clear.request();
    }

    fn announce_geometry(&mut self) {
        if !self.context.set_geometry(&self.layout.geometry()) {
            log::error!("Host rejected layout {}x{}", self.layout.width, self.layout.height);
        }
    }

    /// Consume the frame-submitted flag.
    pub fn has_submitted_frame(&self) -> bool {
        self.frame.take()
    }

    /// Acknowledge a clear performed by the renderer itself.
    pub fn mark_cleared(&self) {
        self.clear.acknowledge();
    }

    pub fn apply_config(&mut self, config: WindowConfig) -> Result<()> {
        config.validate()?;
        if config.emulated_pointer != self.pointer.is_enabled() {
            self.set_emulated_pointer(config.emulated_pointer);
        }
        self.config = config;
        self.update_layout();
        Ok(())
    }

    pub fn set_emulated_pointer(&mut self, enabled: bool) {
        self.config.emulated_pointer = enabled;
        if let Some(ev) = self.pointer.set_enabled(enabled) {
            self.emit(EmuEvent::Touch(ev));
        }
    }

    pub fn handle_pointer(&mut self, sample: PointerSample) {
        if let Some(ev) = self.pointer.update(sample, &self.layout) {
            self.emit(EmuEvent::Touch(ev));
        }
    }

    pub fn has_touched(&self) -> bool {
        self.pointer.has_touched()
    }

    pub fn reset_touched(&mut self) {
        self.pointer.reset_touched();
    }

    pub fn layout(&self) -> &FramebufferLayout {
        &self.layout
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle()
    }

    /// Thread the context is bound to, if any.
    pub fn bound_thread(&self) -> Option<ThreadId> {
        self.affinity.owner()
    }

    pub fn is_current_thread(&self) -> bool {
        self.affinity.is_current_thread()
    }

    pub fn status(&self) -> WindowStatus {
        WindowStatus {
            lifecycle: self.state.lifecycle(),
            width: self.layout.width,
            height: self.layout.height,
            framebuffer: self.state.framebuffer(),
            needs_clearing: self.clear.is_set(),
            frame_pending: self.frame.peek(),
            touching: self.pointer.is_touching(),
        }
    }

    fn framebuffer(&self, op: &'static str) -> Result<Framebuffer> {
        self.state.framebuffer().ok_or_else(|| {
            log::error!("`{}` called without a context", op);
            WindowError::NoContext(op)
        })
    }

    fn emit(&self, event: EmuEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(e)) => log::warn!("Engine event queue full, dropping {:?}", e),
            Err(TrySendError::Disconnected(e)) => log::debug!("No engine listening for {:?}", e),
        }
    }
}

impl<C: HostContext> EmuWindow for LibretroWindow<C> {
    #[profiling::function]
    fn swap_buffers(&mut self) -> Result<()> {
        self.affinity.debug_check("swap_buffers");
        self.framebuffer("swap_buffers")?;

        self.frame.submit();
        self.context.unbind_framebuffer();
        self.context.present(self.layout.width, self.layout.height);
        self.context.reset_state();
        Ok(())
    }

    #[profiling::function]
    fn poll_events(&mut self) {
        loop {
            match self.host_rx.try_recv() {
                Ok(e) => match e {
                    HostEvent::Pointer(sample) => self.handle_pointer(sample),
                    HostEvent::MinimalAreaChange { width, height } => {
                        self.on_minimal_client_area_change_request((width, height))
                    }
                    HostEvent::EmulatedPointer(enabled) => self.set_emulated_pointer(enabled),
                    HostEvent::Configure(config) => {
                        if let Err(e) = self.apply_config(config) {
                            log::error!("Ignoring host config: {}", e);
                        }
                    }
                },
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn make_current(&mut self) -> Result<()> {
        self.framebuffer("make_current")?;
        let framebuffer = self
            .context
            .current_framebuffer()
            .map_err(WindowError::Context)?;

        self.state = ContextState::Ready { framebuffer };
        self.context.bind_framebuffer(framebuffer);
        self.affinity.bind();
        Ok(())
    }

    fn done_current(&mut self) {
        if self.state.framebuffer().is_some() {
            self.context.unbind_framebuffer();
        }
        self.affinity.release();
    }

    fn setup_framebuffer(&mut self) -> Result<()> {
        self.affinity.debug_check("setup_framebuffer");
        let framebuffer = self.framebuffer("setup_framebuffer")?;

        self.context.bind_framebuffer(framebuffer);
        // clearing is slow on some hosts, only do it when asked
        if self.clear.is_set() {
            self.context.clear(self.layout.width, self.layout.height);
            self.clear.acknowledge();
        }
        Ok(())
    }

    fn needs_clearing(&self) -> bool {
        self.clear.is_set()
    }

    fn should_defer_renderer_init(&self) -> bool {
        self.state == ContextState::Uninitialized
    }

    fn on_minimal_client_area_change_request(&mut self, minimal: (u32, u32)) {
        self.minimal = minimal;
        self.update_layout();
    }

    fn size(&self) -> (u32, u32) {
        (self.layout.width, self.layout.height)
    }

    fn scale_factor(&self) -> f32 {
        self.config.scale
    }
}

impl<C> Drop for LibretroWindow<C> {
    fn drop(&mut self) {
        if let ContextState::Ready { .. } = self.state {
            log::warn!("Window dropped while a context is still live");
        }
    }
}
