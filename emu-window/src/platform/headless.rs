use crate::context::{Framebuffer, HostContext};
use crate::error::ContextError;
use crate::layout::Geometry;

/// What a [`HeadlessContext`] has been asked to do so far.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadlessStats {
    pub acquires: u32,
    pub releases: u32,
    pub binds: u32,
    pub clears: u32,
    pub presents: u32,
    pub resets: u32,
    pub last_present: Option<(u32, u32)>,
    pub geometry: Option<Geometry>,
}

/// [`HostContext`] that performs no GL calls and only records them.
#[derive(Debug)]
pub struct HeadlessContext {
    framebuffer: Framebuffer,
    live: bool,
    fail_acquire: bool,
    reject_geometry: bool,
    stats: HeadlessStats,
}

impl HeadlessContext {
    pub fn new(framebuffer: Framebuffer) -> Self {
        Self {
            framebuffer,
            live: false,
            fail_acquire: false,
            reject_geometry: false,
            stats: HeadlessStats::default(),
        }
    }

    /// Make every following acquire fail, as a host without a context would.
    pub fn set_fail_acquire(&mut self, fail: bool) {
        self.fail_acquire = fail;
    }

    pub fn set_reject_geometry(&mut self, reject: bool) {
        self.reject_geometry = reject;
    }

    /// Host switched to another framebuffer object.
    pub fn set_framebuffer(&mut self, framebuffer: Framebuffer) {
        self.framebuffer = framebuffer;
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn stats(&self) -> &HeadlessStats {
        &self.stats
    }
}

impl Default for HeadlessContext {
    fn default() -> Self {
        Self::new(Framebuffer::DEFAULT)
    }
}

impl HostContext for HeadlessContext {
    fn acquire_framebuffer(&mut self) -> Result<Framebuffer, ContextError> {
        if self.fail_acquire {
            return Err(ContextError::Unavailable("headless acquire disabled".into()));
        }
        self.stats.acquires += 1;
        self.live = true;
        Ok(self.framebuffer)
    }

    fn current_framebuffer(&mut self) -> Result<Framebuffer, ContextError> {
        if !self.live {
            return Err(ContextError::Unavailable("no headless context".into()));
        }
        Ok(self.framebuffer)
    }

    fn release(&mut self) {
        self.stats.releases += 1;
        self.live = false;
    }

    fn bind_framebuffer(&mut self, _framebuffer: Framebuffer) {
        self.stats.binds += 1;
    }

    fn unbind_framebuffer(&mut self) {}

    fn clear(&mut self, _width: u32, _height: u32) {
        self.stats.clears += 1;
    }

    fn present(&mut self, width: u32, height: u32) {
        self.stats.presents += 1;
        self.stats.last_present = Some((width, height));
    }

    fn reset_state(&mut self) {
        self.stats.resets += 1;
    }

    fn set_geometry(&mut self, geometry: &Geometry) -> bool {
        if self.reject_geometry {
            return false;
        }
        self.stats.geometry = Some(*geometry);
        true
    }
}
