/// 长度前缀的位数。
/// 消息的位长度以 32 位大端无符号整数写入，每个像素的红色通道承载 1 bit，
/// 因此需要 32 个像素来隐藏长度信息。
pub const LENGTH_PREFIX_BITS: usize = 32;

/// 每个像素的通道数 (R, G, B, A)。
pub const CHANNELS_PER_PIXEL: usize = 4;

/// 红色通道在像素内的下标。只有这个通道的最低有效位会被改写。
pub const RED_CHANNEL: usize = 0;

/// 每个字符占用的位数 (一个字符对应一个字节)。
pub const BITS_PER_CHAR: usize = 8;

/// 未指定输出路径时，隐写图像文件名的前缀。
pub const ENCODED_PREFIX: &str = "encoded-";

/// 未指定输出路径时，恢复文本的默认文件名。
pub const DEFAULT_RECOVERED_NAME: &str = "revealed-message.txt";

/// 可以无损保存像素的图像扩展名。
pub const LOSSLESS_EXTENSIONS: [&str; 6] = ["png", "bmp", "tif", "tiff", "webp", "qoi"];
