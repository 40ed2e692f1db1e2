//! Mode-query/blit display abstraction.

use crate::blt::{BltLib, BltOperation, BltPixel};
use crate::info::{FramebufferInfo, PixelFormat};
use crate::DisplayError;

/// Information about the single mode the boot stage programmed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeInfo {
    pub version: u32,
    pub horizontal_resolution: u32,
    pub vertical_resolution: u32,
    pub pixel_format: PixelFormat,
    pub pixels_per_scan_line: u32,
}

impl ModeInfo {
    pub fn from_framebuffer(info: &FramebufferInfo) -> Self {
        Self {
            version: 0,
            horizontal_resolution: info.x_resolution,
            vertical_resolution: info.y_resolution,
            pixel_format: info.pixel_format(),
            pixels_per_scan_line: info.x_resolution,
        }
    }
}

/// Graphics output over the boot-stage framebuffer.
///
/// There is exactly one mode; it was set before this driver ever ran.
pub struct GraphicsOutput<B: BltLib> {
    info: FramebufferInfo,
    mode: ModeInfo,
    blt_lib: B,
}

impl<B: BltLib> GraphicsOutput<B> {
    /// Wrap the framebuffer and point the blit library at it.
    pub fn new(info: FramebufferInfo, mut blt_lib: B) -> Result<Self, DisplayError> {
        let mode = ModeInfo::from_framebuffer(&info);
        blt_lib.configure(info.physical_address, &mode)?;
        Ok(Self {
            info,
            mode,
            blt_lib,
        })
    }

    pub fn max_mode(&self) -> u32 {
        1
    }

    pub fn current_mode(&self) -> u32 {
        0
    }

    pub fn query_mode(&self, mode_number: u32) -> Result<ModeInfo, DisplayError> {
        if mode_number >= self.max_mode() {
            return Err(DisplayError::InvalidMode(mode_number));
        }
        Ok(self.mode)
    }

    /// Accept a switch to the mode that is already active; there is nothing
    /// else to switch to.
    pub fn set_mode(&mut self, mode_number: u32) -> Result<(), DisplayError> {
        if mode_number >= self.max_mode() {
            return Err(DisplayError::InvalidMode(mode_number));
        }
        Ok(())
    }

    pub fn framebuffer_base(&self) -> u64 {
        self.info.physical_address
    }

    pub fn framebuffer_size(&self) -> u64 {
        self.info.framebuffer_size()
    }

    pub fn mode_info(&self) -> ModeInfo {
        self.mode
    }

    pub fn bits_per_pixel(&self) -> u8 {
        self.info.bits_per_pixel
    }

    #[cfg(test)]
    pub(crate) fn blt_lib(&self) -> &B {
        &self.blt_lib
    }

    pub fn blt(
        &mut self,
        buffer: Option<&mut [BltPixel]>,
        op: BltOperation,
        source: (u32, u32),
        destination: (u32, u32),
        width: u32,
        height: u32,
        delta: usize,
    ) -> Result<(), DisplayError> {
        self.blt_lib
            .blt(buffer, op, source, destination, width, height, delta)
    }
}
