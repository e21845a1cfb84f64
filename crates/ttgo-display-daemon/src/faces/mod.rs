//! Screen layouts drawn with display primitives.

mod work;

pub use work::WorkFace;

use ttgo_display_hw::rgb565;

/// Colors used by a face, in RGB565.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: u16,
    pub text: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: rgb565(0x1A, 0x2A, 0x3A),
            text: rgb565(0xEE, 0xEE, 0xEE),
        }
    }
}
