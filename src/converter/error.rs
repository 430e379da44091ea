//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载转换链路中的所有失败来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//!
//! 扩展名不在允许列表内的文件不算错误（准入阶段直接跳过），因此这里没有对应分支。

/// 转换链路统一错误类型。
///
/// 单个文件的错误只会让该文件被跳过；`NoSizesSelected` / `InvalidConfig`
/// 属于批次级配置错误，会在处理任何文件之前中止整个批次。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("解码错误：{0}")]
    Decode(String),

    #[error("缩放错误：{0}")]
    Resize(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),

    #[error("No sizes selected")]
    NoSizesSelected,
}

impl ConvertError {
    /// 稳定错误码，便于日志检索。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "E_DECODE",
            Self::Resize(_) => "E_RESIZE",
            Self::Encode(_) => "E_ENCODE",
            Self::FileSystem(_) => "E_FILE_SYSTEM",
            Self::ResourceLimit(_) => "E_RESOURCE_LIMIT",
            Self::InvalidConfig(_) => "E_INVALID_CONFIG",
            Self::NoSizesSelected => "E_NO_SIZES",
        }
    }

    /// 出错所在的流水线阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileSystem(_) => "load",
            Self::ResourceLimit(_) | Self::Decode(_) => "decode",
            Self::Resize(_) => "resize",
            Self::Encode(_) => "encode",
            Self::InvalidConfig(_) | Self::NoSizesSelected => "config",
        }
    }

    /// 是否为批次级配置错误（不计入单文件错误）。
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::NoSizesSelected)
    }
}
