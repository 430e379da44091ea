//! # favicon 转换器 — 应用入口
//!
//! 拖到程序图标上的图片会在原目录生成同名 `.ico`（16/32/48/64/128/256 全部尺寸）。

use std::path::PathBuf;
use std::process::ExitCode;

use image_drop_converters::converter::PipelineKind;
use image_drop_converters::shell;

#[tokio::main]
async fn main() -> ExitCode {
    shell::init_logging();

    let dropped: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    match shell::run(PipelineKind::Favicon, dropped).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
