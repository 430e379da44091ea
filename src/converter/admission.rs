//! # 准入过滤
//!
//! 只看扩展名（大小写不敏感），不做魔数嗅探。不在列表内的文件静默跳过，不计为错误。

use std::path::Path;

/// 允许转换的扩展名（小写，不含点）。
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "gif"];

/// 判断路径是否可以进入转换流水线。
///
/// # 示例
/// ```rust
/// use image_drop_converters::converter::is_supported_image;
///
/// assert!(is_supported_image("photo.PNG"));
/// assert!(!is_supported_image("photo.txt"));
/// ```
pub fn is_supported_image(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
