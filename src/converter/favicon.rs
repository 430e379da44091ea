//! # favicon（ICO）转换器
//!
//! 每个勾选尺寸生成一帧正方形透明补边缩略图，按勾选顺序全部写入同一个 ICO 容器。

use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::config::MAX_ICO_EDGE;
use super::handler::Converter;
use super::loader::load_source;
use super::pipeline::square_thumbnail;
use super::source::{ConversionJob, ThumbnailVariant};
use super::{ConvertError, ConverterConfig};

pub const ICO_EXTENSION: &str = "ico";

/// ICO 转换器，持有本批次的尺寸快照。
pub struct FaviconConverter {
    sizes: Vec<u32>,
    config: ConverterConfig,
}

impl FaviconConverter {
    /// 使用配置中勾选的尺寸。
    pub fn from_config(config: ConverterConfig) -> Self {
        let sizes = config.favicon_sizes.selected();
        Self { sizes, config }
    }

    /// 使用显式尺寸列表（按给定顺序写帧）。
    pub fn with_sizes(sizes: Vec<u32>, config: ConverterConfig) -> Self {
        Self { sizes, config }
    }

    pub fn sizes(&self) -> &[u32] {
        &self.sizes
    }

    /// 为单个源文件生成全部帧。
    fn build_variants(&self, job: &ConversionJob) -> Result<Vec<ThumbnailVariant>, ConvertError> {
        let source = load_source(&job.input, &self.config)?;
        self.sizes
            .iter()
            .map(|&size| square_thumbnail(&source, size, self.config.resize_filter))
            .collect()
    }
}

impl Converter for FaviconConverter {
    fn label(&self) -> &'static str {
        "ICO"
    }

    fn output_extension(&self) -> &'static str {
        ICO_EXTENSION
    }

    fn validate(&self) -> Result<(), ConvertError> {
        if self.sizes.is_empty() {
            return Err(ConvertError::NoSizesSelected);
        }
        if let Some(bad) = self.sizes.iter().find(|&&s| s == 0 || s > MAX_ICO_EDGE) {
            return Err(ConvertError::InvalidConfig(format!(
                "图标尺寸超出范围：{}（允许 1~{}）",
                bad, MAX_ICO_EDGE
            )));
        }
        Ok(())
    }

    fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError> {
        let variants = self.build_variants(job)?;
        write_ico(variants, &job.output)
    }

    fn summary(&self, converted: usize) -> String {
        let size_text = self
            .sizes
            .iter()
            .map(|s| format!("{s}x{s}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Converted {} image(s) to ICO with sizes: {}",
            converted, size_text
        )
    }
}

/// 将所有帧写入一个多分辨率 ICO 文件（已存在则覆盖）。
pub fn write_ico(variants: Vec<ThumbnailVariant>, output: &Path) -> Result<(), ConvertError> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);

    for variant in variants {
        let (width, height) = variant.dimensions();
        let image = IconImage::from_rgba_data(width, height, variant.into_raw());
        let entry = IconDirEntry::encode(&image).map_err(|e| {
            ConvertError::Encode(format!("ICO 帧编码失败（{}x{}）：{}", width, height, e))
        })?;
        icon_dir.add_entry(entry);
    }

    let file = File::create(output).map_err(|e| {
        ConvertError::FileSystem(format!("无法创建输出文件 {}：{}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    icon_dir
        .write(&mut writer)
        .map_err(|e| ConvertError::FileSystem(format!("写入 ICO 失败：{}", e)))?;
    writer
        .flush()
        .map_err(|e| ConvertError::FileSystem(format!("写入 ICO 失败：{}", e)))
}
