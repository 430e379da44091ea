//! # 图片转换模块（converter）
//!
//! ## 设计思路
//!
//! 该模块将“拖放负载解析 → 准入过滤 → 解码 → 缩放/补边 → 编码写出 → 状态更新”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `service`：拖放入口，持有配置与状态槽，按批次派发后台任务
//! - `handler`：`Converter` trait 与批次编排（单文件错误隔离）
//! - `favicon` / `webp_converter`：两条流水线的单文件转换与编码写出
//! - `loader`：文件读取、体积/像素上限校验、解码
//! - `pipeline`：letterbox 几何、半尺寸计算、缩放
//! - `payload` / `admission`：拖放文本解析与扩展名准入
//! - `status`：共享状态文本槽与批次结果
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 新同事快速上手
//!
//! ```text
//! 拖放（原始文本 / 进程参数）
//!    ↓
//! service.rs（解析负载 + 配置快照 + spawn_blocking）
//!    ↓
//! handler.rs（逐文件编排 + 错误隔离 + 状态文本）
//!    ├─ admission.rs（扩展名过滤）
//!    ├─ loader.rs（读取 + 限制 + 解码）
//!    ├─ pipeline.rs（letterbox / 半尺寸缩放）
//!    └─ favicon.rs / webp_converter.rs（编码 + 写出）
//!    ↓
//! status.rs（最终状态写入共享槽）
//! ```

mod admission;
mod config;
mod error;
mod favicon;
mod handler;
mod loader;
mod payload;
mod pipeline;
mod service;
mod source;
mod status;
mod webp_converter;

pub use admission::{SUPPORTED_EXTENSIONS, is_supported_image};
pub use config::{
    ConverterConfig, FAVICON_SIZES, MAX_ICO_EDGE, SizeSelection, WEBP_QUALITY, WEBP_SCALE,
};
pub use error::ConvertError;
pub use favicon::{FaviconConverter, ICO_EXTENSION, write_ico};
pub use handler::{Converter, run_batch};
pub use payload::parse_drop_payload;
pub use pipeline::{
    Placement, half_scale, half_scale_dimensions, letterbox_placement, square_thumbnail,
};
pub use service::{ConverterService, PipelineKind};
pub use source::{ConversionJob, SourceImage, ThumbnailVariant, derive_output_path};
pub use status::{
    BatchReporter, BatchResult, STATUS_NO_VALID_IMAGES, STATUS_PROCESSING, STATUS_READY, StatusSlot,
};
pub use webp_converter::{WEBP_EXTENSION, WebpConverter, encode_webp};
