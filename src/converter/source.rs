//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入”和“流水线中间结果”解耦：
//! - `ConversionJob` 表示一次单文件转换（输入路径 + 推导出的输出路径）
//! - `SourceImage` 表示已解码、只读的源图像
//! - `ThumbnailVariant` 表示写入 ICO 前的单个正方形帧

use image::{DynamicImage, GenericImageView, RgbaImage};
use std::path::{Path, PathBuf};

/// 单文件转换任务。
///
/// 输出路径永远与输入同目录、同主文件名，只替换扩展名；已存在的文件会被静默覆盖。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl ConversionJob {
    /// # 示例
    /// ```rust
    /// use image_drop_converters::converter::ConversionJob;
    /// use std::path::Path;
    ///
    /// let job = ConversionJob::new("/photos/cat.final.png", "ico");
    /// assert_eq!(job.output, Path::new("/photos/cat.final.ico"));
    /// ```
    pub fn new(input: impl Into<PathBuf>, output_extension: &str) -> Self {
        let input = input.into();
        let output = derive_output_path(&input, output_extension);
        Self { input, output }
    }
}

/// 同目录、同主文件名、替换扩展名。
pub fn derive_output_path(input: &Path, output_extension: &str) -> PathBuf {
    input.with_extension(output_extension)
}

/// 解码后的源图像。
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// 颜色模式是否带 alpha 通道。
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// 提升为 RGBA8（无 alpha 的源图补全不透明通道）。
    pub fn to_rgba8(&self) -> RgbaImage {
        self.image.to_rgba8()
    }
}

/// 单个 favicon 帧：`size × size` 的 RGBA 缓冲，不足部分为全透明填充。
pub struct ThumbnailVariant {
    pub size: u32,
    pub pixels: RgbaImage,
}

impl ThumbnailVariant {
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// 交出 RGBA 字节（`size * size * 4`），写入 ICO 时一次性消费。
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels.into_raw()
    }
}
