//! # 服务层（拖放入口）
//!
//! ## 设计思路
//!
//! `ConverterService` 对应一个拖放窗口：持有配置、共享状态槽和流水线类型。
//! 每次拖放：
//! 1. 解析拖放负载
//! 2. 读取配置快照（之后修改勾选不会影响本批次）
//! 3. 领取批次序号
//! 4. 在 tokio 阻塞线程池上启动一个独立后台任务，顺序处理整批文件
//!
//! 解码/缩放/编码全部在后台任务中完成，调用方线程不被阻塞。
//! 运行时句柄在构建服务时捕获，之后从不在运行时内的线程提交也能派发任务。
//! 多次拖放的批次并发执行，不排队、不取消，状态槽按批次序号丢弃过期写入。

use std::path::PathBuf;
use std::sync::RwLock;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::favicon::FaviconConverter;
use super::handler::{Converter, run_batch};
use super::payload::parse_drop_payload;
use super::status::{BatchResult, StatusSlot};
use super::webp_converter::WebpConverter;
use super::{ConvertError, ConverterConfig};

use crate::error::AppError;

/// 流水线类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    Favicon,
    Webp,
}

impl PipelineKind {
    fn build_converter(self, config: ConverterConfig) -> Box<dyn Converter> {
        match self {
            Self::Favicon => Box::new(FaviconConverter::from_config(config)),
            Self::Webp => Box::new(WebpConverter::new(config)),
        }
    }
}

/// 一个批次的后台任务句柄。
pub type BatchHandle = JoinHandle<Result<BatchResult, ConvertError>>;

/// 拖放转换服务。
///
/// 构建时捕获当前 tokio 运行时句柄，之后可以在任意线程（包括不在运行时内的界面线程）提交拖放。
pub struct ConverterService {
    kind: PipelineKind,
    config: RwLock<ConverterConfig>,
    status: StatusSlot,
    runtime: Option<Handle>,
}

impl ConverterService {
    pub fn new(kind: PipelineKind) -> Self {
        Self::with_config(kind, ConverterConfig::default())
    }

    pub fn with_config(kind: PipelineKind, config: ConverterConfig) -> Self {
        Self {
            kind,
            config: RwLock::new(config),
            status: StatusSlot::new(),
            runtime: Handle::try_current().ok(),
        }
    }

    /// 显式绑定运行时（服务在运行时之外构建时使用）。
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// 共享状态槽（界面轮询或订阅用）。
    pub fn status(&self) -> &StatusSlot {
        &self.status
    }

    /// 获取配置快照。
    pub fn config_snapshot(&self) -> Result<ConverterConfig, ConvertError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| ConvertError::InvalidConfig("配置读取锁已中毒".to_string()))
    }

    /// 勾选/取消某个 favicon 尺寸。
    pub fn set_size_enabled(&self, size: u32, enabled: bool) -> Result<(), ConvertError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| ConvertError::InvalidConfig("配置写入锁已中毒".to_string()))?;
        config.favicon_sizes.set(size, enabled)?;
        log::info!(
            "⚙️ 图标尺寸 {}x{} 已{}，当前：{:?}",
            size,
            size,
            if enabled { "勾选" } else { "取消" },
            config.favicon_sizes.selected()
        );
        Ok(())
    }

    pub fn selected_sizes(&self) -> Result<Vec<u32>, ConvertError> {
        Ok(self.config_snapshot()?.favicon_sizes.selected())
    }

    /// 处理一次拖放的原始负载文本。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use image_drop_converters::converter::{ConverterService, PipelineKind};
    ///
    /// # async fn demo() -> Result<(), image_drop_converters::error::AppError> {
    /// let service = ConverterService::new(PipelineKind::Webp);
    /// let result = service.run_drop("{/tmp/a b.png} {/tmp/c.png}").await?;
    /// println!("{}", result.status);
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit_drop(&self, raw_payload: &str) -> Result<BatchHandle, AppError> {
        self.submit_paths(parse_drop_payload(raw_payload))
    }

    /// 以已拆分好的路径列表作为一个批次提交。
    ///
    /// 没有可用运行时时返回 `AppError::Task`，不会领取批次序号。
    pub fn submit_paths(&self, paths: Vec<PathBuf>) -> Result<BatchHandle, AppError> {
        let runtime = self.runtime_handle()?;
        let converter = self.kind.build_converter(self.config_snapshot()?);
        let reporter = self.status.begin_batch();

        log::info!(
            "📥 收到拖放 - {:?} batch #{}，{} 个路径",
            self.kind,
            reporter.sequence(),
            paths.len()
        );

        Ok(runtime.spawn_blocking(move || run_batch(converter.as_ref(), &paths, &reporter)))
    }

    /// 提交并等待批次完成。
    pub async fn run_drop(&self, raw_payload: &str) -> Result<BatchResult, AppError> {
        let handle = self.submit_drop(raw_payload)?;
        Self::join(handle).await
    }

    pub async fn run_paths(&self, paths: Vec<PathBuf>) -> Result<BatchResult, AppError> {
        let handle = self.submit_paths(paths)?;
        Self::join(handle).await
    }

    fn runtime_handle(&self) -> Result<Handle, AppError> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or_else(|| AppError::Task("未绑定 tokio 运行时，无法派发后台转换任务".to_string()))
    }

    async fn join(handle: BatchHandle) -> Result<BatchResult, AppError> {
        let result = handle
            .await
            .map_err(|e| AppError::Task(format!("后台转换任务异常退出：{}", e)))??;
        Ok(result)
    }
}
