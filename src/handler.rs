//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `capacity` 子命令的高级业务逻辑。
//! 本模块负责图像文件与像素缓冲区之间的转换、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, HideArgs, RecoverArgs};
use crate::constants::{DEFAULT_RECOVERED_NAME, ENCODED_PREFIX, LOSSLESS_EXTENSIONS};
use crate::error::EncodeError;
use crate::framing::capacity_bytes;
use crate::pixels::PixelBuffer;
use crate::steganography::{decode, encode};
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbaImage;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、将文本隐藏到像素中，最后以无损格式写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 目标文件已存在且未指定 `--force`，或目标扩展名不是无损格式。
/// * 文本为空、包含无法用单字节表示的字符，或图像空间不足。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_encoded_path(&args.image));
    ensure_lossless(&dest)?;
    ensure_writable(&dest, args.force)?;

    let text = match (&args.message, &args.text) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either --text or --message must be given."),
    };

    let pixels = load_pixels(&args.image)?;
    let capacity = capacity_bytes(pixels.pixel_count());
    debug!(
        "Hiding {} characters in {} pixels",
        text.chars().count(),
        pixels.pixel_count()
    );

    let encoded = encode(pixels, &text).map_err(|err| {
        let hint = match err {
            EncodeError::CapacityExceeded { .. } => format!(
                " \nAt most {} characters fit in this image.",
                capacity.to_string().green().bold()
            ),
            _ => String::new(),
        };
        anyhow::Error::new(err).context(format!(
            "Failed to hide the text in {}.{}",
            args.image.to_string_lossy().red().bold(),
            hint
        ))
    })?;

    save_pixels(encoded, &dest)?;
    info!("Encoded image written to {}", dest.display());

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、恢复隐藏的文本，并将其写入目标文本文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 图像中没有有效的隐藏消息。
/// * 无法写入到目标文本文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let dest = args
        .text
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, DEFAULT_RECOVERED_NAME));
    ensure_writable(&dest, args.force)?;

    let pixels = load_pixels(&args.image)?;
    let text = decode(&pixels).with_context(|| {
        format!(
            "Failed to recover the hidden text from '{}'. \nThe image may not contain a hidden message or was saved lossily.",
            args.image.to_string_lossy().red().bold()
        )
    })?;
    debug!("Recovered {} characters", text.chars().count());

    fs::write(&dest, &text).with_context(|| {
        format!(
            "Unable to write to target text file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    if args.print {
        println!("{text}");
    }

    println!(
        "The text has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Capacity' 命令的执行逻辑：打印像素数量和最多可隐藏的字符数。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let pixels = load_pixels(&args.image)?;
    let characters = capacity_bytes(pixels.pixel_count());

    println!(
        "{} ({}x{}, {} pixels) can hide up to {} characters.",
        args.image.to_string_lossy().bold(),
        pixels.width(),
        pixels.height(),
        pixels.pixel_count(),
        characters.to_string().green().bold()
    );
    Ok(())
}

/// 读取图像文件并转换为 RGBA 像素缓冲区。
pub fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    let (width, height) = image.dimensions();
    debug!("Loaded {}x{} image from {}", width, height, path.display());
    Ok(PixelBuffer::new(width, height, image.into_raw())?)
}

/// 将像素缓冲区按目标扩展名对应的格式写入文件。
pub fn save_pixels(pixels: PixelBuffer, path: &Path) -> Result<()> {
    let (width, height) = (pixels.width(), pixels.height());
    let image = RgbaImage::from_raw(width, height, pixels.into_raw())
        .context("Pixel buffer does not match the image dimensions.")?;

    image.save(path).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 默认的隐写图像路径：输入图像旁的 `encoded-<文件名>.png`。
pub fn default_encoded_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    sibling_path(image, &format!("{ENCODED_PREFIX}{stem}.png"))
}

fn sibling_path(path: &Path, name: &str) -> PathBuf {
    path.parent()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {} \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn ensure_lossless(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    anyhow::ensure!(
        LOSSLESS_EXTENSIONS.contains(&extension.as_str()),
        "Refusing to write {}: the output must use a lossless format ({}).",
        path.to_string_lossy().red().bold(),
        LOSSLESS_EXTENSIONS.join(", ").green()
    );
    Ok(())
}
