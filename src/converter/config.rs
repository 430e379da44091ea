//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ConverterConfig`，保证运行时行为可观测、可测试。
//! 图标尺寸勾选状态作为普通配置结构存放，由服务层在每次拖放时取快照，
//! 处理中途修改勾选不会影响正在进行的批次。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置（全部尺寸勾选，Lanczos3 滤镜）。
//! - `SizeSelection` 只接受枚举内的尺寸，输出顺序固定为升序。
//! - WebP 的缩放比例与质量是编译期常量，不进入配置。

use image::imageops::FilterType;

use super::ConvertError;

/// 可勾选的 favicon 尺寸（像素边长）。
pub const FAVICON_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// ICO 容器单帧允许的最大边长。
pub const MAX_ICO_EDGE: u32 = 256;

/// WebP 输出相对原图的缩放比例（宽高同时缩放，截断取整）。
pub const WEBP_SCALE: f64 = 0.5;

/// WebP 有损编码质量（libwebp 0–100 刻度）。
pub const WEBP_QUALITY: u8 = 50;

/// 转换配置。
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码前按头信息校验的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 缩放滤镜。
    pub resize_filter: FilterType,
    /// favicon 尺寸勾选状态。
    pub favicon_sizes: SizeSelection,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_file_size: 100 * 1024 * 1024,
            max_decoded_pixels: 100_000_000,
            resize_filter: FilterType::Lanczos3,
            favicon_sizes: SizeSelection::default(),
        }
    }
}

/// 每个 favicon 尺寸一个独立开关。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSelection {
    enabled: [bool; FAVICON_SIZES.len()],
}

impl Default for SizeSelection {
    /// 默认全部勾选。
    fn default() -> Self {
        Self::all()
    }
}

impl SizeSelection {
    pub fn all() -> Self {
        Self {
            enabled: [true; FAVICON_SIZES.len()],
        }
    }

    pub fn none() -> Self {
        Self {
            enabled: [false; FAVICON_SIZES.len()],
        }
    }

    /// 按给定尺寸列表构建，列表外的尺寸保持未勾选。
    ///
    /// # 示例
    /// ```rust
    /// use image_drop_converters::converter::SizeSelection;
    ///
    /// let selection = SizeSelection::from_sizes(&[32, 16])?;
    /// assert_eq!(selection.selected(), vec![16, 32]);
    /// # Ok::<(), image_drop_converters::converter::ConvertError>(())
    /// ```
    pub fn from_sizes(sizes: &[u32]) -> Result<Self, ConvertError> {
        let mut selection = Self::none();
        for &size in sizes {
            selection.set(size, true)?;
        }
        Ok(selection)
    }

    /// 切换单个尺寸。
    pub fn set(&mut self, size: u32, enabled: bool) -> Result<(), ConvertError> {
        let index = Self::index_of(size)?;
        self.enabled[index] = enabled;
        Ok(())
    }

    pub fn is_enabled(&self, size: u32) -> bool {
        Self::index_of(size)
            .map(|index| self.enabled[index])
            .unwrap_or(false)
    }

    /// 已勾选的尺寸，按枚举顺序（升序）输出。
    pub fn selected(&self) -> Vec<u32> {
        FAVICON_SIZES
            .iter()
            .zip(self.enabled.iter())
            .filter_map(|(&size, &on)| on.then_some(size))
            .collect()
    }

    fn index_of(size: u32) -> Result<usize, ConvertError> {
        FAVICON_SIZES
            .iter()
            .position(|&candidate| candidate == size)
            .ok_or_else(|| {
                ConvertError::InvalidConfig(format!(
                    "未知图标尺寸：{}（可选：{:?}）",
                    size, FAVICON_SIZES
                ))
            })
    }
}
