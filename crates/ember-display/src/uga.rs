//! Legacy draw interface over the same framebuffer.

use crate::blt::{BltLib, BltOperation, BltPixel};
use crate::gop::GraphicsOutput;
use crate::info::FramebufferInfo;
use crate::DisplayError;

/// Geometry reported by the legacy draw interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UgaMode {
    pub horizontal_resolution: u32,
    pub vertical_resolution: u32,
    pub color_depth: u32,
    pub refresh_rate: u32,
}

/// Draw operations of the legacy interface, mapped 1:1 onto [`BltOperation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UgaBltOperation {
    UgaVideoFill,
    UgaVideoToBltBuffer,
    UgaBltBufferToVideo,
    UgaVideoToVideo,
}

impl From<UgaBltOperation> for BltOperation {
    fn from(op: UgaBltOperation) -> Self {
        match op {
            UgaBltOperation::UgaVideoFill => BltOperation::VideoFill,
            UgaBltOperation::UgaVideoToBltBuffer => BltOperation::VideoToBltBuffer,
            UgaBltOperation::UgaBltBufferToVideo => BltOperation::BufferToVideo,
            UgaBltOperation::UgaVideoToVideo => BltOperation::VideoToVideo,
        }
    }
}

/// Legacy draw view over the framebuffer; a thin shim around
/// [`GraphicsOutput`].
pub struct UgaDraw<B: BltLib> {
    output: GraphicsOutput<B>,
}

impl<B: BltLib> UgaDraw<B> {
    pub fn new(info: FramebufferInfo, blt_lib: B) -> Result<Self, DisplayError> {
        Ok(Self {
            output: GraphicsOutput::new(info, blt_lib)?,
        })
    }

    /// Report the single prepared mode. The hardware does not expose a real
    /// refresh rate; 60Hz is the conventional answer.
    pub fn get_mode(&self) -> UgaMode {
        let mode = self.output.mode_info();
        UgaMode {
            horizontal_resolution: mode.horizontal_resolution,
            vertical_resolution: mode.vertical_resolution,
            color_depth: u32::from(self.output.bits_per_pixel()),
            refresh_rate: 60,
        }
    }

    /// Accept a mode request only when it restates the active geometry; the
    /// refresh rate is not checked, nothing drives it.
    pub fn set_mode(
        &mut self,
        width: u32,
        height: u32,
        depth: u32,
        _refresh_rate: u32,
    ) -> Result<(), DisplayError> {
        let current = self.get_mode();
        if width == current.horizontal_resolution
            && height == current.vertical_resolution
            && depth == current.color_depth
        {
            Ok(())
        } else {
            Err(DisplayError::ModeNotFound {
                width,
                height,
                depth,
            })
        }
    }

    pub fn blt(
        &mut self,
        buffer: Option<&mut [BltPixel]>,
        op: UgaBltOperation,
        source: (u32, u32),
        destination: (u32, u32),
        width: u32,
        height: u32,
        delta: usize,
    ) -> Result<(), DisplayError> {
        self.output
            .blt(buffer, op.into(), source, destination, width, height, delta)
    }
}
