//! # 位帧模块
//!
//! 定义编码器和解码器共用的寻址约定：
//! 32 位大端长度前缀 (消息的位数)，后接消息本身，每个字节高位在前；
//! 第 `i` 位写入第 `i` 个像素的红色通道。

use crate::constants::{BITS_PER_CHAR, LENGTH_PREFIX_BITS, RED_CHANNEL};
use crate::error::EncodeError;

/// 实际写入图像的位序列：长度前缀 + 消息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    bytes: Vec<u8>,
}

impl BitStream {
    /// 位序列的总长度 (包含长度前缀)。
    pub fn len(&self) -> usize {
        self.bytes.len() * BITS_PER_CHAR
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 按顺序逐位迭代，每个字节高位在前，每一项为 0 或 1。
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bytes
            .iter()
            .flat_map(|&byte| (0..BITS_PER_CHAR).rev().map(move |shift| (byte >> shift) & 1))
    }
}

/// 计算消息的位长度。
///
/// # Errors
///
/// 位长度超过 `u32::MAX` 时返回 `PayloadTooLarge`。
pub fn bit_length(payload: &[u8]) -> Result<u32, EncodeError> {
    let bits = payload.len() as u64 * BITS_PER_CHAR as u64;
    u32::try_from(bits).map_err(|_| EncodeError::PayloadTooLarge { bits })
}

/// 生成长度前缀与消息拼接后的位序列。
pub fn frame(payload: &[u8]) -> Result<BitStream, EncodeError> {
    let prefix = bit_length(payload)?.to_be_bytes();

    let mut bytes = Vec::with_capacity(prefix.len() + payload.len());
    bytes.extend_from_slice(&prefix);
    bytes.extend_from_slice(payload);

    Ok(BitStream { bytes })
}

/// 第 `i` 位所在的 (像素下标, 通道下标)。
pub fn channel_for_bit_index(i: usize) -> (usize, usize) {
    (i, RED_CHANNEL)
}

/// 加上长度前缀之后的总位数。
pub fn framed_bits(payload_bits: u32) -> u64 {
    LENGTH_PREFIX_BITS as u64 + u64::from(payload_bits)
}

/// 给定像素数量时，最多能隐藏的字符数。
pub fn capacity_bytes(pixel_count: usize) -> usize {
    let payload_bits = pixel_count
        .saturating_sub(LENGTH_PREFIX_BITS)
        .min(u32::MAX as usize);
    payload_bits / BITS_PER_CHAR
}
