use std::ffi::c_void;

use crate::error::ContextError;
use crate::layout::Geometry;

/// Host-side framebuffer object name. `0` is the default framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Framebuffer(u32);

impl Framebuffer {
    pub const DEFAULT: Self = Self(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Everything the adapter needs from the host-owned graphics context.
///
/// The adapter only ever calls these while it believes a context exists,
/// except for [`HostContext::set_geometry`] which goes to the host directly.
pub trait HostContext {
    /// Prepare adapter-side state for a fresh context and return the
    /// framebuffer the host wants us to draw into.
    fn acquire_framebuffer(&mut self) -> Result<Framebuffer, ContextError>;

    /// Framebuffer for the coming frame. Hosts may hand out a different one
    /// per frame.
    fn current_framebuffer(&mut self) -> Result<Framebuffer, ContextError>;

    /// Drop adapter-side state tied to the current context.
    fn release(&mut self);

    fn bind_framebuffer(&mut self, framebuffer: Framebuffer);

    fn unbind_framebuffer(&mut self);

    /// Clear colour, depth and stencil over `width` x `height`.
    fn clear(&mut self, width: u32, height: u32);

    /// Hand the finished frame to the host.
    fn present(&mut self, width: u32, height: u32);

    /// Leave the GL pipeline in the state the host expects between frames.
    fn reset_state(&mut self);

    /// Announce new output geometry. Returns whether the host accepted it.
    fn set_geometry(&mut self, geometry: &Geometry) -> bool;
}

/// Callbacks a plugin host provides for hardware rendering.
pub trait HostVideo {
    fn proc_address(&self, symbol: &str) -> *const c_void;

    /// Framebuffer object the host currently renders into.
    fn current_framebuffer(&self) -> usize;

    /// Tell the host a valid hardware frame of the given size is ready.
    fn frame_ready(&mut self, width: u32, height: u32);

    fn set_geometry(&mut self, geometry: &Geometry) -> bool;
}
