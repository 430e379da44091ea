//! # 可执行入口共用逻辑
//!
//! 把拖到程序图标上的文件（系统以进程参数形式传入）当作一次拖放，交给对应流水线。
//! 没有参数时说明当前进程拿不到拖放能力，输出一次操作说明后以降级模式正常退出。

use std::path::PathBuf;

use crate::converter::{BatchResult, ConverterService, PipelineKind};
use crate::error::AppError;

/// 初始化日志，默认级别 `info`，可用 `RUST_LOG` 覆盖。
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// 无拖放输入时展示的说明。
pub fn drop_instructions(kind: PipelineKind) -> String {
    let (program, target) = match kind {
        PipelineKind::Favicon => (
            "favicon-converter",
            "a multi-size .ico (16, 32, 48, 64, 128, 256 px) next to each image",
        ),
        PipelineKind::Webp => (
            "webp-converter",
            "a .webp at 50% scale and quality 50 next to each image",
        ),
    };

    format!(
        "No dropped files received.\n\n\
         Drag and drop .jpg/.jpeg/.png/.bmp/.tiff/.gif files onto the {program} program icon,\n\
         or start it with the image paths as arguments:\n\n    {program} <image> [<image> ...]\n\n\
         It writes {target}."
    )
}

/// 运行一次批次；`Ok(None)` 表示没有执行任何批次（无输入或配置错误）。
pub async fn run(kind: PipelineKind, paths: Vec<PathBuf>) -> Result<Option<BatchResult>, AppError> {
    if paths.is_empty() {
        log::warn!("未收到拖放文件，进入降级模式");
        println!("{}", drop_instructions(kind));
        return Ok(None);
    }

    run_with_service(&ConverterService::new(kind), paths).await
}

/// 配置错误已经写入状态槽，只展示状态，不作为进程失败。
async fn run_with_service(
    service: &ConverterService,
    paths: Vec<PathBuf>,
) -> Result<Option<BatchResult>, AppError> {
    let result = match service.run_paths(paths).await {
        Ok(batch) => {
            if let Some(err) = &batch.last_error {
                log::warn!("批次中存在失败文件，最后一个错误：{}", err);
            }
            Ok(Some(batch))
        }
        Err(AppError::Convert(err)) if err.is_config_error() => {
            log::warn!("配置不可用，批次未执行：{}", err);
            Ok(None)
        }
        Err(err) => {
            log::error!("批次未执行：{}", err);
            Err(err)
        }
    };

    println!("{}", service.status().current());
    result
}
