use crate::{Params, Rgb565};

// ── Pixel buffer with physical stride ──────────────────────────────────────

/// One full frame laid out like the VGA pixel memory: `height` lines of
/// `stride` pixels, of which only the first `width` are visible.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    w: usize,
    h: usize,
    stride: usize,
    px: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new(w: usize, h: usize, stride: usize) -> Self {
        let stride = stride.max(w);
        Self {
            w,
            h,
            stride,
            px: vec![Rgb565::BLACK; stride * h],
        }
    }

    /// The 320x240 layout with a 512-pixel stride.
    pub fn vga() -> Self {
        Self::new(
            Params::VISIBLE_WIDTH as usize,
            Params::VISIBLE_HEIGHT as usize,
            Params::STRIDE,
        )
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Writes outside the visible region are dropped, never wrapped.
    pub fn set(&mut self, x: i32, y: i32, c: Rgb565) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.stride + x as usize] = c;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            Some(self.px[y as usize * self.stride + x as usize])
        } else {
            None
        }
    }

    pub fn fill(&mut self, c: Rgb565) {
        for line in self.px.chunks_exact_mut(self.stride) {
            line[..self.w].fill(c);
        }
    }

    /// Raw memory including stride padding.
    pub fn as_slice(&self) -> &[Rgb565] {
        &self.px
    }

    /// Bulk copy of another buffer of identical layout.
    pub fn copy_from(&mut self, other: &FrameBuffer) {
        debug_assert_eq!(
            (self.w, self.h, self.stride),
            (other.w, other.h, other.stride)
        );
        let n = self.px.len().min(other.px.len());
        self.px[..n].copy_from_slice(&other.px[..n]);
    }
}

// ── Live + back buffer ──────────────────────────────────────────────────────

/// Which buffer drawing calls land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Live,
    Back,
}

/// The display surface: what the device shows (`live`) and where frames are
/// composed (`back`).
pub struct Surface {
    live: FrameBuffer,
    back: FrameBuffer,
}

impl Surface {
    pub fn new() -> Self {
        Self::with_buffer(FrameBuffer::vga())
    }

    pub fn with_buffer(layout: FrameBuffer) -> Self {
        Self {
            back: layout.clone(),
            live: layout,
        }
    }

    pub fn target_mut(&mut self, target: Target) -> &mut FrameBuffer {
        match target {
            Target::Live => &mut self.live,
            Target::Back => &mut self.back,
        }
    }

    pub fn live(&self) -> &FrameBuffer {
        &self.live
    }

    pub fn back(&self) -> &FrameBuffer {
        &self.back
    }

    /// Publish the composed back buffer in one copy.
    pub fn present(&mut self) {
        self.live.copy_from(&self.back);
    }

    /// Publish an externally composed buffer in one copy.
    pub fn present_from(&mut self, buffer: &FrameBuffer) {
        self.live.copy_from(buffer);
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}
