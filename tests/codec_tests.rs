use rand::{Rng, RngCore};
use redbit::{
    DecodeError, EncodeError, PixelBuffer, PixelBufferError, decode, decode_bytes, encode,
    framing::{bit_length, capacity_bytes, channel_for_bit_index, frame, framed_bits},
};

/// 一个辅助函数，用于创建一个带有随机像素的缓冲区
fn random_pixels(width: u32, height: u32) -> PixelBuffer {
    let mut data = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut data);
    PixelBuffer::new(width, height, data).expect("dimensions match")
}

/// 将前 32 个像素的红色通道最低位写成给定的长度前缀
fn with_length_prefix(mut data: Vec<u8>, bits: u32) -> Vec<u8> {
    for i in 0..32 {
        let bit = ((bits >> (31 - i)) & 1) as u8;
        data[i * 4] = (data[i * 4] & 0xFE) | bit;
    }
    data
}

/// 验证可打印 ASCII 文本的完整往返
#[test]
fn test_round_trip_printable_ascii() {
    let mut rng = rand::rng();
    for len in [1usize, 2, 7, 64, 300] {
        let text: String = (0..len)
            .map(|_| char::from(rng.random_range(0x20u8..0x7F)))
            .collect();
        let pixels = random_pixels(64, 64);

        let encoded = encode(pixels, &text).expect("text fits");
        assert_eq!(decode(&encoded).expect("message present"), text);
    }
}

/// 验证 128-255 范围的字符按码点往返
#[test]
fn test_round_trip_latin1() {
    let text = "café ÿ ©";
    let encoded = encode(random_pixels(20, 20), text).unwrap();

    assert_eq!(decode(&encoded).unwrap(), text);
    assert_eq!(
        decode_bytes(&encoded).unwrap(),
        vec![b'c', b'a', b'f', 0xE9, b' ', 0xFF, b' ', 0xA9]
    );
}

/// 验证编码只修改前 32 + 8n 个像素红色通道的最低位
#[test]
fn test_encode_touches_only_red_lsb_of_framed_pixels() {
    let original = random_pixels(30, 30);
    let text = "non-interference";
    let touched = 32 + 8 * text.len();

    let encoded = encode(original.clone(), text).unwrap();
    let before = original.as_raw();
    let after = encoded.as_raw();

    assert_eq!(before.len(), after.len());
    for (i, (&old, &new)) in before.iter().zip(after).enumerate() {
        let (pixel, channel) = (i / 4, i % 4);
        if channel == 0 && pixel < touched {
            assert_eq!(old & 0xFE, new & 0xFE, "high bits of pixel {pixel} changed");
        } else {
            assert_eq!(old, new, "byte {i} outside the framed region changed");
        }
    }
}

/// 验证恰好填满图像时成功，多一位则失败
#[test]
fn test_capacity_boundary() {
    // 32 位前缀 + 2 个字符 = 48 位
    let exact = PixelBuffer::blank(48, 1);
    let encoded = encode(exact, "ok").expect("exact fit succeeds");
    assert_eq!(decode(&encoded).unwrap(), "ok");

    let short = PixelBuffer::blank(47, 1);
    assert_eq!(
        encode(short, "ok"),
        Err(EncodeError::CapacityExceeded {
            required: 48,
            available: 47
        })
    );
}

#[test]
fn test_encode_rejects_empty_message() {
    assert_eq!(
        encode(PixelBuffer::blank(40, 1), ""),
        Err(EncodeError::EmptyPayload)
    );
}

/// 验证码点大于 255 的字符不会被截断
#[test]
fn test_encode_rejects_multibyte_character() {
    assert_eq!(
        encode(PixelBuffer::blank(100, 1), "ab中"),
        Err(EncodeError::InvalidCharacter {
            character: '中',
            index: 2
        })
    );
}

/// 10x1 的图像连长度前缀都放不下
#[test]
fn test_ten_by_one_image_cannot_hold_header() {
    let result = encode(PixelBuffer::blank(10, 1), "H");
    assert_eq!(
        result,
        Err(EncodeError::CapacityExceeded {
            required: 40,
            available: 10
        })
    );
}

/// 40x1 的全零图像中隐藏 "Hi"
#[test]
fn test_forty_by_one_image_holds_hi() {
    let encoded = encode(PixelBuffer::blank(40, 1), "Hi").unwrap();

    // 长度前缀为 16 (0b1_0000)，只有第 27 个像素的最低位为 1
    let prefix: Vec<u8> = (0..32).map(|p| encoded.channel(p, 0).unwrap()).collect();
    let mut expected = vec![0u8; 32];
    expected[27] = 1;
    assert_eq!(prefix, expected);

    // 'H' = 0x48, 'i' = 0x69
    let payload: Vec<u8> = (32..48).map(|p| encoded.channel(p, 0).unwrap()).collect();
    assert_eq!(
        payload,
        vec![0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 1, 0, 1, 0, 0, 1]
    );

    assert_eq!(decode(&encoded).unwrap(), "Hi");
}

#[test]
fn test_encode_is_deterministic() {
    let pixels = random_pixels(16, 16);
    let first = encode(pixels.clone(), "same").unwrap();
    let second = encode(pixels, "same").unwrap();
    assert_eq!(first, second);
}

/// 用较短的消息重新编码，会覆盖前缀，旧消息的尾部作为噪声保留
#[test]
fn test_reencode_overwrites_previous_message() {
    let pixels = random_pixels(32, 32);
    let long = encode(pixels, "a much longer first message").unwrap();
    let short = encode(long.clone(), "short").unwrap();

    assert_eq!(decode(&short).unwrap(), "short");

    let stray = 32 + 8 * "short".len();
    assert_eq!(&long.as_raw()[stray * 4..], &short.as_raw()[stray * 4..]);
}

#[test]
fn test_decode_rejects_unaligned_length() {
    let data = with_length_prefix(vec![0u8; 64 * 4], 13);
    let pixels = PixelBuffer::new(64, 1, data).unwrap();

    assert_eq!(decode(&pixels), Err(DecodeError::MalformedLength { bits: 13 }));
}

#[test]
fn test_decode_rejects_truncated_header() {
    assert_eq!(
        decode(&PixelBuffer::blank(31, 1)),
        Err(DecodeError::TruncatedHeader { pixels: 31 })
    );
}

/// 长度前缀声明的消息超出图像容量
#[test]
fn test_decode_rejects_length_beyond_capacity() {
    let data = with_length_prefix(vec![0u8; 40 * 4], 16);
    let pixels = PixelBuffer::new(40, 1, data).unwrap();

    assert_eq!(
        decode(&pixels),
        Err(DecodeError::CapacityExceeded {
            required: 48,
            available: 40
        })
    );
}

#[test]
fn test_decode_zero_length_prefix_is_empty() {
    assert_eq!(decode(&PixelBuffer::blank(32, 1)).unwrap(), "");
}

#[test]
fn test_frame_layout() {
    let stream = frame(b"A").unwrap();
    let bits: Vec<u8> = stream.iter().collect();

    assert_eq!(stream.len(), 40);
    assert_eq!(bits.len(), 40);
    // 前缀 8 = 0b1000
    assert_eq!(bits[..32].iter().rposition(|&b| b == 1), Some(28));
    assert_eq!(bits[..32].iter().filter(|&&b| b == 1).count(), 1);
    // 'A' = 0x41
    assert_eq!(&bits[32..], &[0, 1, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn test_framing_helpers() {
    assert_eq!(bit_length(b"abc"), Ok(24));
    assert_eq!(framed_bits(24), 56);
    assert_eq!(channel_for_bit_index(0), (0, 0));
    assert_eq!(channel_for_bit_index(77), (77, 0));

    assert_eq!(capacity_bytes(0), 0);
    assert_eq!(capacity_bytes(39), 0);
    assert_eq!(capacity_bytes(40), 1);
    assert_eq!(capacity_bytes(100 * 100), (10_000 - 32) / 8);
}

/// 消息位长度必须能用 32 位长度前缀表示
#[test]
fn test_bit_length_rejects_payload_beyond_u32() {
    assert_eq!(
        bit_length(&vec![0u8; 1 << 29]),
        Err(EncodeError::PayloadTooLarge { bits: 1 << 32 })
    );
    assert_eq!(bit_length(&vec![0u8; (1 << 29) - 1]), Ok(u32::MAX - 7));
}

/// 极大的像素下标不会溢出，也不会读到其它像素
#[test]
fn test_channel_out_of_range_pixel_is_none() {
    let buffer = PixelBuffer::new(2, 2, vec![7; 16]).unwrap();
    assert_eq!(buffer.channel(usize::MAX / 4 + 1, 0), None);
    assert_eq!(buffer.channel(usize::MAX / 4, 3), None);
    assert_eq!(buffer.channel(usize::MAX, 0), None);
}

#[test]
#[should_panic(expected = "does not fit in memory")]
fn test_blank_rejects_oversized_dimensions() {
    PixelBuffer::blank(u32::MAX, u32::MAX);
}

#[test]
fn test_pixel_buffer_rejects_wrong_length() {
    assert_eq!(
        PixelBuffer::new(2, 2, vec![0; 15]),
        Err(PixelBufferError::DimensionMismatch {
            width: 2,
            height: 2,
            expected: 16,
            actual: 15
        })
    );

    let buffer = PixelBuffer::new(2, 2, vec![7; 16]).unwrap();
    assert_eq!(buffer.pixel_count(), 4);
    assert_eq!(buffer.channel(3, 3), Some(7));
    assert_eq!(buffer.channel(4, 0), None);
    assert_eq!(buffer.channel(0, 4), None);
}
