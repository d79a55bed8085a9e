//! # 隐写核心模块
//!
//! 红色通道最低有效位 (LSB) 的编码与解码。两者都是纯函数：
//! 不做 I/O，不记录日志，失败时不会留下写了一半的缓冲区。
//!
//! 输出图像必须以无损格式保存，任何有损压缩都会破坏隐藏的数据。

use crate::constants::{BITS_PER_CHAR, LENGTH_PREFIX_BITS};
use crate::error::{DecodeError, EncodeError};
use crate::framing::{bit_length, channel_for_bit_index, frame, framed_bits};
use crate::pixels::PixelBuffer;

/// 将文本隐藏到像素缓冲区中。
///
/// 每个字符必须能用单个字节表示 (码点 0-255)。
///
/// # Errors
///
/// * `EmptyPayload` - 文本为空。
/// * `InvalidCharacter` - 存在码点大于 255 的字符。
/// * `CapacityExceeded` - 图像像素数少于 `32 + 8 * 字符数`。
pub fn encode(pixels: PixelBuffer, text: &str) -> Result<PixelBuffer, EncodeError> {
    let payload = text
        .chars()
        .enumerate()
        .map(|(index, character)| {
            u8::try_from(character).map_err(|_| EncodeError::InvalidCharacter { character, index })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    encode_bytes(pixels, &payload)
}

/// 将已经按单字节表示的消息隐藏到像素缓冲区中。
///
/// 只改写前 `32 + 8 * payload.len()` 个像素红色通道的最低位，
/// 其余通道和其余像素保持不变。所有检查都在写入之前完成。
pub fn encode_bytes(mut pixels: PixelBuffer, payload: &[u8]) -> Result<PixelBuffer, EncodeError> {
    if payload.is_empty() {
        return Err(EncodeError::EmptyPayload);
    }

    let required = framed_bits(bit_length(payload)?);
    let available = pixels.pixel_count() as u64;
    if required > available {
        return Err(EncodeError::CapacityExceeded {
            required,
            available,
        });
    }

    let stream = frame(payload)?;
    for (i, bit) in stream.iter().enumerate() {
        let (pixel, _) = channel_for_bit_index(i);
        pixels.set_red_lsb(pixel, bit);
    }

    Ok(pixels)
}

/// 从像素缓冲区中恢复隐藏的文本，每个字节按码点映射为一个字符。
///
/// # Errors
///
/// * `TruncatedHeader` - 像素数不足 32。
/// * `MalformedLength` - 长度前缀不是 8 的倍数。
/// * `CapacityExceeded` - 长度前缀声明的消息超出了图像容量。
pub fn decode(pixels: &PixelBuffer) -> Result<String, DecodeError> {
    let payload = decode_bytes(pixels)?;
    Ok(payload.into_iter().map(char::from).collect())
}

/// 从像素缓冲区中恢复隐藏消息的原始字节。
pub fn decode_bytes(pixels: &PixelBuffer) -> Result<Vec<u8>, DecodeError> {
    let pixel_count = pixels.pixel_count();
    if pixel_count < LENGTH_PREFIX_BITS {
        return Err(DecodeError::TruncatedHeader {
            pixels: pixel_count,
        });
    }

    let message_bits = read_bits(pixels, 0, LENGTH_PREFIX_BITS);
    if message_bits as usize % BITS_PER_CHAR != 0 {
        return Err(DecodeError::MalformedLength { bits: message_bits });
    }

    let required = framed_bits(message_bits);
    let available = pixel_count as u64;
    if required > available {
        return Err(DecodeError::CapacityExceeded {
            required,
            available,
        });
    }

    let payload = (0..message_bits as usize / BITS_PER_CHAR)
        .map(|i| read_bits(pixels, LENGTH_PREFIX_BITS + i * BITS_PER_CHAR, BITS_PER_CHAR) as u8)
        .collect();

    Ok(payload)
}

/// 从第 `start` 位开始读取 `count` 位 (最多 32 位)，高位在前。
fn read_bits(pixels: &PixelBuffer, start: usize, count: usize) -> u32 {
    (start..start + count).fold(0, |acc, i| {
        let (pixel, _) = channel_for_bit_index(i);
        (acc << 1) | u32::from(pixels.red_lsb(pixel))
    })
}
