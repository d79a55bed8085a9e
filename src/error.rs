//! # 错误类型模块
//!
//! 编码、解码以及像素缓冲区构造过程中可能出现的全部错误。
//! 所有错误都在调用内部就能检测到，且不可重试。

use thiserror::Error;

/// 隐藏文本时可能出现的错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// 要隐藏的文本为空。
    #[error("the message to hide is empty")]
    EmptyPayload,

    /// 字符的码点超出了单字节的范围 (0-255)。
    #[error("character {character:?} at index {index} does not fit in a single byte")]
    InvalidCharacter { character: char, index: usize },

    /// 消息的位长度无法用 32 位长度前缀表示。
    #[error("message of {bits} bits cannot be described by a 32-bit length prefix")]
    PayloadTooLarge { bits: u64 },

    /// 图像的像素数量不足以容纳长度前缀和消息。
    #[error("not enough pixels: message requires {required} bits but only {available} are available")]
    CapacityExceeded { required: u64, available: u64 },
}

/// 恢复文本时可能出现的错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// 图像甚至无法容纳 32 位的长度前缀。
    #[error("image has {pixels} pixels, too few to hold the 32-bit length prefix")]
    TruncatedHeader { pixels: usize },

    /// 长度前缀不是 8 的倍数，图像中没有有效的隐藏消息。
    #[error("length prefix of {bits} bits is not byte aligned; the image holds no hidden message")]
    MalformedLength { bits: u32 },

    /// 长度前缀声明的消息超出了图像的容量。
    #[error("length prefix claims {required} bits but the image only holds {available}")]
    CapacityExceeded { required: u64, available: u64 },
}

/// 构造像素缓冲区时可能出现的错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    #[error("a {width}x{height} RGBA image needs {expected} bytes, got {actual}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: u64,
        actual: usize,
    },
}
