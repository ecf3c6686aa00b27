//! Window and context adapter for rendering into a surface owned by a
//! plugin host.
//!
//! The host creates the GL context and pumps frames; [`LibretroWindow`]
//! tracks that context and exposes it to the emulation engine through the
//! [`EmuWindow`] trait.

mod config;
mod context;
mod error;
mod event;
mod layout;
mod pointer;
mod state;

pub mod platform;

pub use self::config::{LayoutOption, WindowConfig, MAX_SCALE};
pub use self::context::{Framebuffer, HostContext, HostVideo};
pub use self::error::{ContextError, Result, WindowError};
pub use self::event::{EmuEvent, HostEvent, TouchEvent};
pub use self::layout::{FramebufferLayout, Geometry, Rect};
pub use self::platform::{HeadlessContext, HostHandle, LibretroWindow, WindowStatus};
pub use self::pointer::{PointerBridge, PointerSample, PointerTracker, ScreenTracker};
pub use self::state::Lifecycle;
pub use crossbeam_channel;

use crossbeam_channel::Sender;

/// Window operations the renderer relies on.
///
/// Implementations decide who owns the context; the renderer only binds,
/// draws and swaps.
pub trait EmuWindow {
    /// Present the rendered frame.
    fn swap_buffers(&mut self) -> Result<()>;

    /// Apply pending window and input events. Never blocks.
    fn poll_events(&mut self);

    /// Bind the context to the calling thread.
    fn make_current(&mut self) -> Result<()>;

    /// Release the context from the calling thread.
    fn done_current(&mut self);

    fn setup_framebuffer(&mut self) -> Result<()>;

    /// Whether the surface must be cleared before the next draw.
    fn needs_clearing(&self) -> bool;

    /// Whether the renderer should wait for a context before initialising.
    fn should_defer_renderer_init(&self) -> bool;

    /// Called when a configuration change affects the minimal window size.
    fn on_minimal_client_area_change_request(&mut self, minimal: (u32, u32));

    fn size(&self) -> (u32, u32);
    fn scale_factor(&self) -> f32;
}

#[profiling::function]
pub fn init_libretro_window<C: HostContext>(
    config: WindowConfig,
    context: C,
    event_tx: Sender<EmuEvent>,
) -> Result<(LibretroWindow<C>, HostHandle)> {
    LibretroWindow::new(config, context, event_tx)
}
