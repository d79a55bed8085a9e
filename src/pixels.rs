//! # 像素缓冲区模块
//!
//! 编解码器唯一操作的数据：按行优先、通道交错排列的 RGBA 像素，
//! 每个通道 8 bit。图像文件的解码与重新编码不属于本模块。

use crate::constants::{CHANNELS_PER_PIXEL, RED_CHANNEL};
use crate::error::PixelBufferError;

/// 宽 × 高 × 4 字节的 RGBA 像素缓冲区。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 由宽、高和原始 RGBA 数据构造缓冲区。
    ///
    /// # Errors
    ///
    /// 当 `data.len() != width * height * 4` 时返回 `DimensionMismatch`。
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = u64::from(width) * u64::from(height) * CHANNELS_PER_PIXEL as u64;
        if expected != data.len() as u64 {
            return Err(PixelBufferError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 所有通道均为 0 的缓冲区。
    ///
    /// # Panics
    ///
    /// 当 `width * height * 4` 超出 `usize` 的范围时 panic。
    pub fn blank(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS_PER_PIXEL))
            .unwrap_or_else(|| panic!("a {width}x{height} RGBA buffer does not fit in memory"));
        Self {
            width,
            height,
            data: vec![0; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 像素数量，也就是可寻址的位数。
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS_PER_PIXEL
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// 读取某个像素的某个通道，越界时返回 `None`。
    pub fn channel(&self, pixel: usize, channel: usize) -> Option<u8> {
        if channel >= CHANNELS_PER_PIXEL {
            return None;
        }
        pixel
            .checked_mul(CHANNELS_PER_PIXEL)
            .and_then(|offset| offset.checked_add(channel))
            .and_then(|index| self.data.get(index))
            .copied()
    }

    pub(crate) fn red_lsb(&self, pixel: usize) -> u8 {
        self.data[pixel * CHANNELS_PER_PIXEL + RED_CHANNEL] & 1
    }

    /// 清除红色通道的最低位，再写入 `bit`，高 7 位保持不变。
    pub(crate) fn set_red_lsb(&mut self, pixel: usize, bit: u8) {
        let byte = &mut self.data[pixel * CHANNELS_PER_PIXEL + RED_CHANNEL];
        *byte = (*byte & 0xFE) | (bit & 1);
    }
}
