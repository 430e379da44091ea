//! # 几何与缩放流水线模块
//!
//! ## 设计思路
//!
//! 集中管理两条流水线共用的“源图 → 目标尺寸像素”变换：
//! - favicon：保持宽高比缩放后居中贴到全透明正方形画布（letterbox）
//! - WebP：宽高各乘 0.5 后直接缩放，不补边
//!
//! 两条路径的取整方式不同：favicon 对缩放边四舍五入，WebP 截断取整。
//!
//! ## 实现思路
//!
//! 1. 纯函数计算目标尺寸与偏移（便于属性测试）
//! 2. `fast_image_resize` 卷积缩放，失败时回退 `image::resize_exact`
//! 3. 合成时按源图 alpha 混合，不做不透明覆盖

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

use super::ConvertError;
use super::config::WEBP_SCALE;
use super::source::{SourceImage, ThumbnailVariant};

/// 缩放后内容在正方形画布中的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
}

/// 计算 letterbox 几何。
///
/// 宽大于高时宽度占满、垂直居中；否则（含正方形）高度占满、水平居中。
/// 缩放边四舍五入且至少为 1；奇数余量归入右/下边距。
/// `size` 为 0 时返回全零的空放置。
///
/// # 示例
/// ```rust
/// use image_drop_converters::converter::letterbox_placement;
///
/// let p = letterbox_placement(200, 100, 100);
/// assert_eq!((p.width, p.height, p.offset_x, p.offset_y), (100, 50, 0, 25));
/// ```
pub fn letterbox_placement(src_width: u32, src_height: u32, size: u32) -> Placement {
    let ratio = src_width as f64 / src_height as f64;

    if ratio > 1.0 {
        let height = scaled_edge(size as f64 / ratio, size);
        Placement {
            width: size,
            height,
            offset_x: 0,
            offset_y: (size - height) / 2,
        }
    } else {
        let width = scaled_edge(size as f64 * ratio, size);
        Placement {
            width,
            height: size,
            offset_x: (size - width) / 2,
            offset_y: 0,
        }
    }
}

fn scaled_edge(value: f64, size: u32) -> u32 {
    (value.round() as u32).max(1).min(size)
}

/// WebP 目标尺寸：宽高各乘 `WEBP_SCALE` 后截断取整。
///
/// # 示例
/// ```rust
/// use image_drop_converters::converter::half_scale_dimensions;
///
/// assert_eq!(half_scale_dimensions(641, 480), (320, 240));
/// ```
pub fn half_scale_dimensions(width: u32, height: u32) -> (u32, u32) {
    (
        (width as f64 * WEBP_SCALE) as u32,
        (height as f64 * WEBP_SCALE) as u32,
    )
}

/// 生成一个 `size × size` 的 RGBA 帧，源图保持宽高比居中，空白处全透明。
pub fn square_thumbnail(
    source: &SourceImage,
    size: u32,
    filter: FilterType,
) -> Result<ThumbnailVariant, ConvertError> {
    if size == 0 {
        return Err(ConvertError::InvalidConfig("图标尺寸必须为正整数".to_string()));
    }

    let (src_width, src_height) = source.dimensions();
    if src_width == 0 || src_height == 0 {
        return Err(ConvertError::Decode(format!(
            "源图尺寸无效：{}x{}",
            src_width, src_height
        )));
    }

    let placement = letterbox_placement(src_width, src_height, size);

    // 无 alpha 的源图先补全为不透明 RGBA，保证填充区与内容区处理一致。
    let rgba = DynamicImage::ImageRgba8(source.to_rgba8());
    let resized = resize_rgba(&rgba, placement.width, placement.height, filter)?;

    let mut canvas: RgbaImage = ImageBuffer::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    image::imageops::overlay(
        &mut canvas,
        &resized,
        placement.offset_x as i64,
        placement.offset_y as i64,
    );

    Ok(ThumbnailVariant {
        size,
        pixels: canvas,
    })
}

/// WebP 路径的整图缩放（不补边）。
pub fn half_scale(source: &SourceImage, filter: FilterType) -> Result<DynamicImage, ConvertError> {
    let (width, height) = source.dimensions();
    let (target_width, target_height) = half_scale_dimensions(width, height);

    if target_width == 0 || target_height == 0 {
        return Err(ConvertError::Resize(format!(
            "缩放后尺寸为 0：{}x{} -> {}x{}",
            width, height, target_width, target_height
        )));
    }

    log::debug!(
        "🧩 半尺寸缩放：{}x{} -> {}x{}（filter={:?}）",
        width,
        height,
        target_width,
        target_height,
        filter
    );

    let resized = resize_rgba(source.image(), target_width, target_height, filter)?;
    if source.has_alpha() {
        Ok(DynamicImage::ImageRgba8(resized))
    } else {
        Ok(DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(resized).to_rgb8()))
    }
}

/// 缩放为 RGBA8，优先 `fast_image_resize`，失败回退 `image::resize_exact`。
fn resize_rgba(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, ConvertError> {
    if target_width == 0 || target_height == 0 {
        return Err(ConvertError::Resize(format!(
            "目标尺寸无效：{}x{}",
            target_width, target_height
        )));
    }

    match resize_with_fast_image_resize(image, target_width, target_height, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}", err);
            Ok(image
                .resize_exact(target_width, target_height, filter)
                .to_rgba8())
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
    filter: FilterType,
) -> Result<RgbaImage, ConvertError> {
    let src = image.to_rgba8();
    let (src_width, src_height) = src.dimensions();

    let src_image = fr::images::Image::from_vec_u8(
        src_width,
        src_height,
        src.into_raw(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| ConvertError::Resize(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ConvertError::Resize(format!("fast_image_resize 执行失败：{}", e)))?;

    ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| ConvertError::Resize("fast_image_resize 输出缓冲长度异常".to_string()))
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}
