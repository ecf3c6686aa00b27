use std::num::NonZeroU32;

use glow::HasContext;

use crate::context::{Framebuffer, HostContext, HostVideo};
use crate::error::ContextError;
use crate::layout::Geometry;

/// [`HostContext`] backed by the host's OpenGL context through `glow`.
///
/// GL entry points are loaded from the host on every context creation, so
/// a host that recreates its context hands us fresh pointers.
pub struct GlowContext<H> {
    host: H,
    gl: Option<glow::Context>,
}

impl<H: HostVideo> GlowContext<H> {
    pub fn new(host: H) -> Self {
        Self { host, gl: None }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    fn host_framebuffer(&self) -> Result<Framebuffer, ContextError> {
        let raw = self.host.current_framebuffer();
        u32::try_from(raw)
            .map(Framebuffer::new)
            .map_err(|_| ContextError::InvalidFramebuffer(raw))
    }

    fn gl(&self, op: &str) -> Option<&glow::Context> {
        if self.gl.is_none() {
            log::warn!("GL `{}` skipped: no context loaded", op);
        }
        self.gl.as_ref()
    }
}

fn native(framebuffer: Framebuffer) -> Option<glow::NativeFramebuffer> {
    NonZeroU32::new(framebuffer.raw()).map(glow::NativeFramebuffer)
}

impl<H: HostVideo> HostContext for GlowContext<H> {
    fn acquire_framebuffer(&mut self) -> Result<Framebuffer, ContextError> {
        for symbol in ["glBindFramebuffer", "glClear"] {
            if self.host.proc_address(symbol).is_null() {
                return Err(ContextError::MissingEntryPoint(symbol));
            }
        }

        let framebuffer = self.host_framebuffer()?;
        let host = &self.host;
        let gl = unsafe { glow::Context::from_loader_function(|s| host.proc_address(s)) };
        log::debug!("GL context loaded: {:?}", gl.version());
        self.gl = Some(gl);

        Ok(framebuffer)
    }

    fn current_framebuffer(&mut self) -> Result<Framebuffer, ContextError> {
        if self.gl.is_none() {
            return Err(ContextError::Unavailable("GL not loaded".into()));
        }
        self.host_framebuffer()
    }

    fn release(&mut self) {
        self.gl = None;
    }

    fn bind_framebuffer(&mut self, framebuffer: Framebuffer) {
        if let Some(gl) = self.gl("bind_framebuffer") {
            unsafe { gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, native(framebuffer)) };
        }
    }

    fn unbind_framebuffer(&mut self) {
        if let Some(gl) = self.gl("unbind_framebuffer") {
            unsafe { gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None) };
        }
    }

    fn clear(&mut self, width: u32, height: u32) {
        if let Some(gl) = self.gl("clear") {
            unsafe {
                gl.viewport(0, 0, width as i32, height as i32);
                gl.clear_color(0.0, 0.0, 0.0, 1.0);
                gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT | glow::STENCIL_BUFFER_BIT);
            }
        }
    }

    fn present(&mut self, width: u32, height: u32) {
        self.host.frame_ready(width, height);
    }

    fn reset_state(&mut self) {
        if let Some(gl) = self.gl("reset_state") {
            unsafe {
                gl.use_program(None);
                gl.bind_vertex_array(None);
                gl.bind_buffer(glow::ARRAY_BUFFER, None);
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
                gl.active_texture(glow::TEXTURE0);
                gl.bind_texture(glow::TEXTURE_2D, None);
                gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                gl.disable(glow::BLEND);
                gl.disable(glow::CULL_FACE);
                gl.disable(glow::DEPTH_TEST);
                gl.disable(glow::SCISSOR_TEST);
                gl.disable(glow::STENCIL_TEST);
                gl.color_mask(true, true, true, true);
                gl.depth_mask(true);
            }
        }
    }

    fn set_geometry(&mut self, geometry: &Geometry) -> bool {
        self.host.set_geometry(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::c_void;

    struct NoGlHost {
        framebuffer: usize,
        frames: Vec<(u32, u32)>,
    }

    impl HostVideo for NoGlHost {
        fn proc_address(&self, _symbol: &str) -> *const c_void {
            std::ptr::null()
        }

        fn current_framebuffer(&self) -> usize {
            self.framebuffer
        }

        fn frame_ready(&mut self, width: u32, height: u32) {
            self.frames.push((width, height));
        }

        fn set_geometry(&mut self, _geometry: &Geometry) -> bool {
            true
        }
    }

    #[test]
    fn missing_entry_points_fail_acquire() {
        let mut ctx = GlowContext::new(NoGlHost {
            framebuffer: 3,
            frames: Vec::new(),
        });
        assert!(matches!(
            ctx.acquire_framebuffer(),
            Err(ContextError::MissingEntryPoint("glBindFramebuffer"))
        ));
        assert!(ctx.current_framebuffer().is_err());

        // no GL loaded: draw calls are skipped, present still reaches the host
        ctx.clear(10, 10);
        ctx.present(10, 20);
        assert_eq!(ctx.host().frames, vec![(10, 20)]);
    }

    #[test]
    fn default_framebuffer_maps_to_none() {
        assert!(native(Framebuffer::DEFAULT).is_none());
        assert!(native(Framebuffer::new(7)).is_some());
    }
}
