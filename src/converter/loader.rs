//! # 加载与解码模块
//!
//! ## 设计思路
//!
//! 在“尽可能早”的阶段执行输入校验，尽快失败，减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! 1. 存在性 + metadata 体积限制
//! 2. 读取原始字节
//! 3. 按内容识别格式并读取 header 尺寸，按像素上限快速拒绝
//! 4. 完整解码为 `SourceImage`

use image::ImageReader;
use std::io::Cursor;
use std::path::Path;

use super::source::SourceImage;
use super::{ConvertError, ConverterConfig};

/// 从本地路径加载并解码源图像。
pub(crate) fn load_source(
    path: &Path,
    config: &ConverterConfig,
) -> Result<SourceImage, ConvertError> {
    log::debug!("📁 开始读取本地图片 - 路径: {}", path.display());

    let bytes = read_with_limit(path, config.max_file_size)?;

    let (header_width, header_height) = inspect_dimensions(&bytes)?;
    validate_pixel_limits(config, header_width, header_height)?;

    let decoded = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| ConvertError::Decode(format!("无法识别图片格式：{}", e)))?
        .decode()
        .map_err(|e| ConvertError::Decode(format!("图片解码失败：{}", e)))?;

    let source = SourceImage::new(decoded);
    log::debug!(
        "✅ 图片解码成功 - {} 尺寸: {}x{} alpha={}",
        path.display(),
        source.width(),
        source.height(),
        source.has_alpha()
    );
    Ok(source)
}

fn read_with_limit(path: &Path, max_file_size: u64) -> Result<Vec<u8>, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::FileSystem(format!("文件不存在：{}", path.display())));
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| ConvertError::FileSystem(format!("无法读取文件信息：{}", e)))?;

    if !metadata.is_file() {
        return Err(ConvertError::FileSystem(format!("不是普通文件：{}", path.display())));
    }

    if metadata.len() > max_file_size {
        return Err(ConvertError::ResourceLimit(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            metadata.len() as f64 / 1024.0 / 1024.0,
            max_file_size as f64 / 1024.0 / 1024.0
        )));
    }

    std::fs::read(path).map_err(|e| ConvertError::FileSystem(format!("无法读取图片文件：{}", e)))
}

/// 仅通过图片头信息读取宽高，用于在完整解码前做像素限制检查。
fn inspect_dimensions(bytes: &[u8]) -> Result<(u32, u32), ConvertError> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ConvertError::Decode(format!("无法识别图片格式：{}", e)))?
        .into_dimensions()
        .map_err(|e| ConvertError::Decode(format!("无法读取图片尺寸：{}", e)))
}

fn validate_pixel_limits(
    config: &ConverterConfig,
    width: u32,
    height: u32,
) -> Result<(), ConvertError> {
    let pixels = (width as u64)
        .checked_mul(height as u64)
        .ok_or_else(|| ConvertError::ResourceLimit("图片像素数溢出".to_string()))?;

    if pixels > config.max_decoded_pixels {
        return Err(ConvertError::ResourceLimit(format!(
            "图片像素过大：{} 像素（限制：{} 像素）",
            pixels, config.max_decoded_pixels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 255) as u8, (y % 255) as u8, 90])
        });
        let path = dir.join(name);
        DynamicImage::ImageRgb8(img)
            .save_with_format(&path, ImageFormat::Png)
            .expect("failed to write test png");
        path
    }

    #[test]
    fn loads_rgb_source_without_alpha() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "plain.png", 40, 30);

        let source = load_source(&path, &ConverterConfig::default()).expect("load should succeed");
        assert_eq!(source.dimensions(), (40, 30));
        assert!(!source.has_alpha());
    }

    #[test]
    fn decodes_by_content_not_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let png = write_png(dir.path(), "real.png", 8, 8);
        let disguised = dir.path().join("disguised.jpg");
        std::fs::rename(&png, &disguised).expect("rename");

        let source = load_source(&disguised, &ConverterConfig::default())
            .expect("content decides format");
        assert_eq!(source.dimensions(), (8, 8));
    }

    #[test]
    fn missing_file_is_file_system_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = load_source(&dir.path().join("nope.png"), &ConverterConfig::default());
        assert!(matches!(result, Err(ConvertError::FileSystem(_))));
    }

    #[test]
    fn garbage_bytes_are_decode_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").expect("write");

        let result = load_source(&path, &ConverterConfig::default());
        assert!(matches!(result, Err(ConvertError::Decode(_))));
    }

    #[test]
    fn rejects_too_many_pixels_before_decode() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "big.png", 200, 200);
        let config = ConverterConfig {
            max_decoded_pixels: 10_000,
            ..ConverterConfig::default()
        };

        let result = load_source(&path, &config);
        assert!(matches!(result, Err(ConvertError::ResourceLimit(_))));
    }

    #[test]
    fn rejects_oversized_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_png(dir.path(), "heavy.png", 64, 64);
        let config = ConverterConfig {
            max_file_size: 16,
            ..ConverterConfig::default()
        };

        let result = load_source(&path, &config);
        assert!(matches!(result, Err(ConvertError::ResourceLimit(_))));
    }
}
