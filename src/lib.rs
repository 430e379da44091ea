//! # 图片拖放转换工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   可执行入口 favicon-converter / webp-converter           │
//! │        （把拖到程序图标上的文件作为一次拖放）             │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ shell::run
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓            后端 (Rust)                           │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ converter ── 拖放解析 · 准入 · 解码 · 缩放 · 编码     │
//! │  │   ├─ favicon        多尺寸 ICO（透明补边正方形帧）     │
//! │  │   └─ webp           0.5 倍缩放，质量 50                │
//! │  │                                                       │
//! │  └─ shell ────── 日志初始化、降级提示、状态输出           │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`converter`] | 两条转换流水线、批次编排、状态槽 |
//! | [`shell`] | 可执行入口共用逻辑 |

pub mod converter;
pub mod error;
pub mod shell;
