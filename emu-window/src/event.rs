use crate::config::WindowConfig;
use crate::pointer::PointerSample;

/// Reported by the host, drained by `poll_events`.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Pointer(PointerSample),
    MinimalAreaChange { width: u32, height: u32 },
    EmulatedPointer(bool),
    Configure(WindowConfig),
}

/// Touch input in framebuffer pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchEvent {
    Pressed { x: u32, y: u32 },
    Moved { x: u32, y: u32 },
    Released,
}

/// Delivered to the emulation engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmuEvent {
    Touch(TouchEvent),
    LayoutChanged { width: u32, height: u32 },
}
