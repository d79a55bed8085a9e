//! # redbit 库
//!
//! 本库包含红色通道 LSB 隐写工具的核心逻辑：
//! 位帧约定 (`framing`)、编码与解码 (`steganography`) 以及命令行处理 (`handler`)。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod error;
pub mod framing;
pub mod handler;
pub mod pixels;
pub mod steganography;

pub use error::{DecodeError, EncodeError, PixelBufferError};
pub use pixels::PixelBuffer;
pub use steganography::{decode, decode_bytes, encode, encode_bytes};
