use crate::event::TouchEvent;
use crate::layout::FramebufferLayout;

/// Extent of host pointer coordinates on either side of the centre.
pub const POINTER_EXTENT: i32 = 0x7fff;

/// Raw pointer state as reported by the host, in normalised coordinates
/// spanning the whole framebuffer (`-0x7fff..=0x7fff` on both axes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerSample {
    pub x: i16,
    pub y: i16,
    pub pressed: bool,
}

impl PointerSample {
    pub fn new(x: i16, y: i16, pressed: bool) -> Self {
        Self { x, y, pressed }
    }
}

/// Maps a host sample onto a touch position in framebuffer pixels.
pub trait PointerTracker {
    fn track(&mut self, sample: PointerSample, layout: &FramebufferLayout) -> Option<(u32, u32)>;
}

/// Scales host coordinates to the framebuffer and clamps them into the
/// touch screen.
#[derive(Debug, Default)]
pub struct ScreenTracker;

fn to_pixels(v: i16, extent: u32) -> u32 {
    let offset = (i32::from(v).clamp(-POINTER_EXTENT, POINTER_EXTENT) + POINTER_EXTENT) as u64;
    let px = offset * u64::from(extent) / (2 * POINTER_EXTENT as u64);
    (px as u32).min(extent.saturating_sub(1))
}

impl PointerTracker for ScreenTracker {
    fn track(&mut self, sample: PointerSample, layout: &FramebufferLayout) -> Option<(u32, u32)> {
        let screen = layout.bottom_screen?;
        let x = to_pixels(sample.x, layout.width);
        let y = to_pixels(sample.y, layout.height);
        Some((
            x.clamp(screen.left, screen.right().saturating_sub(1)),
            y.clamp(screen.top, screen.bottom().saturating_sub(1)),
        ))
    }
}

/// Turns host pointer samples into engine touch events.
pub struct PointerBridge {
    tracker: Box<dyn PointerTracker + Send>,
    enabled: bool,
    pressed_at: Option<(u32, u32)>,
    has_touched: bool,
}

impl PointerBridge {
    pub fn new(tracker: Box<dyn PointerTracker + Send>, enabled: bool) -> Self {
        Self {
            tracker,
            enabled,
            pressed_at: None,
            has_touched: false,
        }
    }

    pub fn update(
        &mut self,
        sample: PointerSample,
        layout: &FramebufferLayout,
    ) -> Option<TouchEvent> {
        if !self.enabled {
            return None;
        }

        let position = if sample.pressed {
            self.tracker.track(sample, layout)
        } else {
            None
        };

        match (position, self.pressed_at) {
            (Some((x, y)), None) => {
                self.pressed_at = Some((x, y));
                self.has_touched = true;
                Some(TouchEvent::Pressed { x, y })
            }
            (Some((x, y)), Some(prev)) if prev != (x, y) => {
                self.pressed_at = Some((x, y));
                Some(TouchEvent::Moved { x, y })
            }
            (Some(_), Some(_)) => None,
            (None, Some(_)) => {
                self.pressed_at = None;
                Some(TouchEvent::Released)
            }
            (None, None) => None,
        }
    }

    /// Disabling while a press is held releases it.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<TouchEvent> {
        self.enabled = enabled;
        if !enabled {
            return self.reset();
        }
        None
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_touching(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Whether any press has been seen since construction or the last
    /// [`PointerBridge::reset_touched`].
    pub fn has_touched(&self) -> bool {
        self.has_touched
    }

    pub fn reset_touched(&mut self) {
        self.has_touched = false;
    }

    /// Drop the current press.
    pub fn reset(&mut self) -> Option<TouchEvent> {
        self.pressed_at.take().map(|_| TouchEvent::Released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WindowConfig;

    fn layout() -> FramebufferLayout {
        FramebufferLayout::compute(
            &WindowConfig {
                scale: 1.0,
                ..Default::default()
            },
            (0, 0),
        )
    }

    fn bridge(enabled: bool) -> PointerBridge {
        PointerBridge::new(Box::new(ScreenTracker), enabled)
    }

    #[test]
    fn disabled_bridge_suppresses_then_enabled_emits_once() {
        let layout = layout();
        let sample = PointerSample::new(0, 0x4000, true);
        let mut bridge = bridge(false);

        assert_eq!(bridge.update(sample, &layout), None);
        assert!(!bridge.has_touched());

        bridge.set_enabled(true);
        let ev = bridge.update(sample, &layout);
        assert!(matches!(ev, Some(TouchEvent::Pressed { .. })));
        // same sample again: still held, nothing new
        assert_eq!(bridge.update(sample, &layout), None);
    }

    #[test]
    fn press_move_release() {
        let layout = layout();
        let mut bridge = bridge(true);

        assert_eq!(
            bridge.update(PointerSample::new(0, 0x4000, true), &layout),
            Some(TouchEvent::Pressed { x: 200, y: 360 })
        );
        assert_eq!(
            bridge.update(PointerSample::new(0x1000, 0x4000, true), &layout),
            Some(TouchEvent::Moved { x: 225, y: 360 })
        );
        assert_eq!(
            bridge.update(PointerSample::new(0x1000, 0x4000, false), &layout),
            Some(TouchEvent::Released)
        );
        assert_eq!(
            bridge.update(PointerSample::new(0x1000, 0x4000, false), &layout),
            None
        );
        assert!(bridge.has_touched());
        bridge.reset_touched();
        assert!(!bridge.has_touched());
    }

    #[test]
    fn positions_clamp_into_touch_screen() {
        let layout = layout();
        let mut tracker = ScreenTracker;
        // top-left corner of the framebuffer lies on the top screen
        let pos = tracker.track(PointerSample::new(i16::MIN, i16::MIN, true), &layout);
        assert_eq!(pos, Some((40, 240)));
        let pos = tracker.track(PointerSample::new(i16::MAX, i16::MAX, true), &layout);
        assert_eq!(pos, Some((359, 479)));
    }

    #[test]
    fn disabling_releases_held_press() {
        let layout = layout();
        let mut bridge = bridge(true);
        bridge.update(PointerSample::new(0, 0x4000, true), &layout);
        assert_eq!(bridge.set_enabled(false), Some(TouchEvent::Released));
        assert!(!bridge.is_touching());
        assert_eq!(bridge.set_enabled(false), None);
    }
}
