//! # WebP 转换器
//!
//! 整图按 0.5 缩放（截断取整），以固定质量 50 有损编码，不补边。

use std::path::Path;

use image::DynamicImage;

use super::ConvertError;
use super::config::{ConverterConfig, WEBP_QUALITY};
use super::handler::Converter;
use super::loader::load_source;
use super::pipeline::half_scale;
use super::source::ConversionJob;

pub const WEBP_EXTENSION: &str = "webp";

pub struct WebpConverter {
    config: ConverterConfig,
}

impl WebpConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }
}

impl Converter for WebpConverter {
    fn label(&self) -> &'static str {
        "WebP"
    }

    fn output_extension(&self) -> &'static str {
        WEBP_EXTENSION
    }

    fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let source = load_source(&job.input, &self.config)?;
        let scaled = half_scale(&source, self.config.resize_filter)?;
        let encoded = encode_webp(&scaled, WEBP_QUALITY)?;
        write_bytes(&encoded, &job.output)
    }

    fn summary(&self, converted: usize) -> String {
        format!("Converted {} image(s) to WebP", converted)
    }
}

/// 有损编码；RGB 源保持 RGB，带 alpha 的源按 RGBA 编码。
pub fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ConvertError> {
    let (width, height) = (image.width(), image.height());

    let encoder_result = if image.color().has_alpha() {
        let rgba = image.to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height)
            .encode_simple(false, quality as f32)
            .map(|memory| memory.to_vec())
    } else {
        let rgb = image.to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height)
            .encode_simple(false, quality as f32)
            .map(|memory| memory.to_vec())
    };

    encoder_result.map_err(|e| {
        ConvertError::Encode(format!("WebP 编码失败（{}x{}）：{:?}", width, height, e))
    })
}

fn write_bytes(bytes: &[u8], output: &Path) -> Result<(), ConvertError> {
    std::fs::write(output, bytes).map_err(|e| {
        ConvertError::FileSystem(format!("无法写入输出文件 {}：{}", output.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn encoded_output_decodes_back_with_same_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 20, Rgb([10, 120, 200])));
        let bytes = encode_webp(&img, WEBP_QUALITY).expect("encode should succeed");

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
        let decoded = image::load_from_memory(&bytes).expect("webp should decode");
        assert_eq!((decoded.width(), decoded.height()), (30, 20));
    }

    #[test]
    fn summary_mentions_webp() {
        let converter = WebpConverter::new(ConverterConfig::default());
        assert_eq!(converter.summary(3), "Converted 3 image(s) to WebP");
        assert_eq!(converter.output_extension(), "webp");
    }
}
