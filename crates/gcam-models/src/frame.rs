//! Raw video frames.

use std::borrow::Cow;

/// Channel ordering of a frame's interleaved 8-bit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Blue-green-red, as delivered by V4L/OpenCV style sources
    Bgr,
    /// Red-green-blue, as expected by landmark detectors
    Rgb,
}

/// An owned 2D pixel buffer, three bytes per pixel.
///
/// The capture loop produces one per cycle; the store holds at most the
/// latest one. Cloning is an explicit full-buffer copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Frame {
    /// Wrap an interleaved buffer. The buffer length must be `width * height * 3`.
    pub fn new(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Self {
        debug_assert_eq!(data.len(), (width * height * 3) as usize);
        Self {
            data,
            width,
            height,
            format,
        }
    }

    /// A solid-color frame.
    pub fn filled(width: u32, height: u32, format: PixelFormat, px: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&px);
        }
        Self::new(data, width, height, format)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) * 3) as usize;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Write a pixel; out-of-bounds coordinates are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 3) as usize;
        self.data[i..i + 3].copy_from_slice(&px);
    }

    /// View of this frame in RGB order, converting only when needed.
    pub fn to_rgb(&self) -> Cow<'_, Frame> {
        match self.format {
            PixelFormat::Rgb => Cow::Borrowed(self),
            PixelFormat::Bgr => {
                let mut data = self.data.clone();
                for px in data.chunks_exact_mut(3) {
                    px.swap(0, 2);
                }
                Cow::Owned(Frame::new(data, self.width, self.height, PixelFormat::Rgb))
            }
        }
    }
}
