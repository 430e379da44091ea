//! # 批次编排模块
//!
//! ## 设计思路
//!
//! 两条流水线结构完全一致，差异只在“单文件如何转换”。`Converter` trait 抽出这一点，
//! `run_batch` 负责共用的部分：
//! 1. 批次级前置校验（favicon 没有勾选尺寸时直接中止，不处理任何文件）
//! 2. 逐个文件：准入过滤 → 推导输出路径 → 转换
//! 3. 单文件错误只记录、不中断后续文件
//! 4. 生成最终状态文本
//!
//! 同一批次内文件严格顺序处理，不做并行。

use std::path::PathBuf;
use std::time::Instant;

use super::ConvertError;
use super::admission::is_supported_image;
use super::source::ConversionJob;
use super::status::{
    BatchReporter, BatchResult, STATUS_NO_VALID_IMAGES, STATUS_PROCESSING, error_message,
    processed_message,
};

/// 单文件转换器。
pub trait Converter: Send + Sync {
    /// 输出格式名（日志用）。
    fn label(&self) -> &'static str;

    /// 输出扩展名（不含点）。
    fn output_extension(&self) -> &'static str;

    /// 批次开始前的配置校验。
    fn validate(&self) -> Result<(), ConvertError> {
        Ok(())
    }

    /// 转换单个文件并写出 `job.output`。
    fn convert(&self, job: &ConversionJob) -> Result<(), ConvertError>;

    /// 至少成功一个文件时的最终状态文本。
    fn summary(&self, converted: usize) -> String;
}

/// 顺序处理一个批次。
///
/// 只有批次级配置错误会返回 `Err`；单文件错误体现在 `BatchResult::last_error`。
pub fn run_batch(
    converter: &dyn Converter,
    paths: &[PathBuf],
    reporter: &BatchReporter,
) -> Result<BatchResult, ConvertError> {
    reporter.report(STATUS_PROCESSING);

    if let Err(err) = converter.validate() {
        log::warn!(
            "⛔ {} 批次配置错误，未处理任何文件 - code={} : {}",
            converter.label(),
            err.code(),
            err
        );
        reporter.report(error_message(&err));
        return Err(err);
    }

    let batch_start = Instant::now();
    let mut converted = 0usize;
    let mut last_error: Option<String> = None;

    log::info!(
        "📦 {} 批次开始 - batch #{} 共 {} 个路径",
        converter.label(),
        reporter.sequence(),
        paths.len()
    );

    for path in paths {
        if !is_supported_image(path) {
            log::debug!("🚫 跳过不支持的文件：{}", path.display());
            continue;
        }

        let job = ConversionJob::new(path.clone(), converter.output_extension());
        let file_start = Instant::now();

        match converter.convert(&job) {
            Ok(()) => {
                converted += 1;
                log::info!(
                    "✅ {} -> {} ({}ms)",
                    job.input.display(),
                    job.output.display(),
                    file_start.elapsed().as_millis()
                );
                reporter.report(processed_message(converted));
            }
            Err(err) => {
                log::warn!(
                    "⚠️ 处理失败 {} - code={} stage={} : {}",
                    job.input.display(),
                    err.code(),
                    err.stage(),
                    err
                );
                let message = err.to_string();
                reporter.report(error_message(&message));
                last_error = Some(message);
            }
        }
    }

    let status = if converted > 0 {
        converter.summary(converted)
    } else {
        STATUS_NO_VALID_IMAGES.to_string()
    };
    reporter.report(status.clone());

    log::info!(
        "🏁 {} 批次结束 - batch #{} 成功 {} 个，耗时 {}ms",
        converter.label(),
        reporter.sequence(),
        converted,
        batch_start.elapsed().as_millis()
    );

    Ok(BatchResult {
        converted,
        last_error,
        status,
    })
}
