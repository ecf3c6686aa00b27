use crate::config::{LayoutOption, WindowConfig};

pub const TOP_SCREEN_WIDTH: u32 = 400;
pub const TOP_SCREEN_HEIGHT: u32 = 240;
pub const BOTTOM_SCREEN_WIDTH: u32 = 320;
pub const BOTTOM_SCREEN_HEIGHT: u32 = 240;

/// Pixel rectangle inside the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    fn scaled(self, scale: f32) -> Self {
        Self {
            left: scale_dim(self.left, scale),
            top: scale_dim(self.top, scale),
            width: scale_dim(self.width, scale),
            height: scale_dim(self.height, scale),
        }
    }

    fn offset(self, dx: u32, dy: u32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            ..self
        }
    }
}

fn scale_dim(v: u32, scale: f32) -> u32 {
    (v as f32 * scale).round() as u32
}

/// Geometry announced to the host after every layout change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub base_width: u32,
    pub base_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub aspect_ratio: f32,
}

/// Computed render target size and where each emulated screen sits in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramebufferLayout {
    pub width: u32,
    pub height: u32,
    pub top_screen: Option<Rect>,
    /// The touch screen. `None` when the arrangement hides it.
    pub bottom_screen: Option<Rect>,
}

impl FramebufferLayout {
    pub fn compute(config: &WindowConfig, minimal: (u32, u32)) -> Self {
        let top = (TOP_SCREEN_WIDTH, TOP_SCREEN_HEIGHT);
        let bottom = (BOTTOM_SCREEN_WIDTH, BOTTOM_SCREEN_HEIGHT);
        let (primary, secondary) = if config.swap_screens {
            (bottom, top)
        } else {
            (top, bottom)
        };

        let (width, height, primary_rect, secondary_rect) = match config.layout {
            LayoutOption::Default => {
                let width = primary.0.max(secondary.0);
                (
                    width,
                    primary.1 + secondary.1,
                    Some(Rect::new((width - primary.0) / 2, 0, primary.0, primary.1)),
                    Some(Rect::new(
                        (width - secondary.0) / 2,
                        primary.1,
                        secondary.0,
                        secondary.1,
                    )),
                )
            }
            LayoutOption::SingleScreen => (
                primary.0,
                primary.1,
                Some(Rect::new(0, 0, primary.0, primary.1)),
                None,
            ),
            LayoutOption::LargeScreen => {
                let small = (secondary.0 / 4, secondary.1 / 4);
                (
                    primary.0 + small.0,
                    primary.1,
                    Some(Rect::new(0, 0, primary.0, primary.1)),
                    Some(Rect::new(primary.0, primary.1 - small.1, small.0, small.1)),
                )
            }
            LayoutOption::SideScreen => {
                let height = primary.1.max(secondary.1);
                (
                    primary.0 + secondary.0,
                    height,
                    Some(Rect::new(0, 0, primary.0, primary.1)),
                    Some(Rect::new(primary.0, 0, secondary.0, secondary.1)),
                )
            }
        };

        let (top_rect, bottom_rect) = if config.swap_screens {
            (secondary_rect, primary_rect)
        } else {
            (primary_rect, secondary_rect)
        };

        let base_width = scale_dim(width, config.scale).max(1);
        let base_height = scale_dim(height, config.scale).max(1);
        let width = base_width.max(minimal.0);
        let height = base_height.max(minimal.1);
        let dx = (width - base_width) / 2;
        let dy = (height - base_height) / 2;
        let place = |r: Rect| r.scaled(config.scale).offset(dx, dy);

        Self {
            width,
            height,
            top_screen: top_rect.map(place),
            bottom_screen: bottom_rect.map(place),
        }
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            base_width: self.width,
            base_height: self.height,
            max_width: self.width,
            max_height: self.height,
            aspect_ratio: self.width as f32 / self.height as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(layout: LayoutOption, scale: f32, swap_screens: bool) -> WindowConfig {
        WindowConfig {
            scale,
            layout,
            swap_screens,
            ..Default::default()
        }
    }

    #[test]
    fn default_layout_stacks_screens() {
        let layout = FramebufferLayout::compute(&config(LayoutOption::Default, 1.0, false), (0, 0));
        assert_eq!((layout.width, layout.height), (400, 480));
        assert_eq!(layout.top_screen, Some(Rect::new(0, 0, 400, 240)));
        assert_eq!(layout.bottom_screen, Some(Rect::new(40, 240, 320, 240)));

        let layout = FramebufferLayout::compute(&config(LayoutOption::Default, 2.0, false), (0, 0));
        assert_eq!((layout.width, layout.height), (800, 960));
        assert_eq!(layout.bottom_screen, Some(Rect::new(80, 480, 640, 480)));
    }

    #[test]
    fn single_screen_hides_the_other() {
        let layout =
            FramebufferLayout::compute(&config(LayoutOption::SingleScreen, 1.0, false), (0, 0));
        assert_eq!((layout.width, layout.height), (400, 240));
        assert!(layout.bottom_screen.is_none());

        let layout =
            FramebufferLayout::compute(&config(LayoutOption::SingleScreen, 1.0, true), (0, 0));
        assert_eq!((layout.width, layout.height), (320, 240));
        assert!(layout.top_screen.is_none());
        assert_eq!(layout.bottom_screen, Some(Rect::new(0, 0, 320, 240)));
    }

    #[test]
    fn large_and_side_layouts() {
        let layout =
            FramebufferLayout::compute(&config(LayoutOption::LargeScreen, 1.0, false), (0, 0));
        assert_eq!((layout.width, layout.height), (480, 240));
        assert_eq!(layout.bottom_screen, Some(Rect::new(400, 180, 80, 60)));

        let layout =
            FramebufferLayout::compute(&config(LayoutOption::SideScreen, 1.0, true), (0, 0));
        assert_eq!((layout.width, layout.height), (720, 240));
        assert_eq!(layout.bottom_screen, Some(Rect::new(0, 0, 320, 240)));
        assert_eq!(layout.top_screen, Some(Rect::new(320, 0, 400, 240)));
    }

    #[test]
    fn never_smaller_than_minimal_area() {
        let options = [
            LayoutOption::Default,
            LayoutOption::SingleScreen,
            LayoutOption::LargeScreen,
            LayoutOption::SideScreen,
        ];
        let minimal = [(0, 0), (400, 300), (1, 5000), (2000, 1), (1920, 1080)];
        for option in options {
            for scale in [1.0, 1.5, 2.0, 4.0] {
                for min in minimal {
                    let layout = FramebufferLayout::compute(&config(option, scale, false), min);
                    assert!(layout.width >= min.0 && layout.height >= min.1);
                    assert!(layout.width > 0 && layout.height > 0);
                }
            }
        }
    }

    #[test]
    fn largest_scale_with_huge_minimal_area_stays_in_bounds() {
        let layout = FramebufferLayout::compute(
            &config(LayoutOption::SideScreen, crate::config::MAX_SCALE, false),
            (u32::MAX, u32::MAX),
        );
        assert_eq!((layout.width, layout.height), (u32::MAX, u32::MAX));
        let bottom = layout.bottom_screen.unwrap();
        assert!(bottom.right() <= layout.width && bottom.bottom() <= layout.height);
    }

    #[test]
    fn larger_minimal_area_centres_screens() {
        let layout =
            FramebufferLayout::compute(&config(LayoutOption::SingleScreen, 1.0, false), (600, 440));
        assert_eq!((layout.width, layout.height), (600, 440));
        assert_eq!(layout.top_screen, Some(Rect::new(100, 100, 400, 240)));

        let screen = layout.top_screen.unwrap();
        assert!(screen.contains(100, 100) && screen.contains(499, 339));
        assert!(!screen.contains(500, 100) && !screen.contains(99, 339));

        let geometry = layout.geometry();
        assert_eq!(geometry.base_width, 600);
        assert_eq!(geometry.max_height, 440);
    }
}
