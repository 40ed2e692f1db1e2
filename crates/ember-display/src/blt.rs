//! Seam to the external pixel-blit library.

use crate::gop::ModeInfo;
use crate::DisplayError;

/// One pixel in blit-buffer order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BltPixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

/// The four block-transfer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BltOperation {
    /// Fill a screen rectangle from the first buffer pixel.
    VideoFill,
    /// Copy a screen rectangle into the buffer.
    VideoToBltBuffer,
    /// Copy the buffer onto a screen rectangle.
    BufferToVideo,
    /// Copy one screen rectangle onto another.
    VideoToVideo,
}

/// External blit library, configured once per framebuffer.
///
/// Callers are single-threaded during boot and never reenter `blt`;
/// implementations need no locking around the framebuffer copy.
pub trait BltLib {
    fn configure(&mut self, framebuffer_base: u64, info: &ModeInfo) -> Result<(), DisplayError>;

    fn blt(
        &mut self,
        buffer: Option<&mut [BltPixel]>,
        op: BltOperation,
        source: (u32, u32),
        destination: (u32, u32),
        width: u32,
        height: u32,
        delta: usize,
    ) -> Result<(), DisplayError>;
}
