pub mod gl;
pub mod headless;
pub mod libretro;

pub use self::gl::GlowContext;
pub use self::headless::{HeadlessContext, HeadlessStats};
pub use self::libretro::{HostHandle, LibretroWindow, WindowStatus};
