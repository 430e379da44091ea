//! # 拖放负载解析
//!
//! 桌面环境投递的拖放数据是一整串文本：
//! - 以 `{` 开头时，每个路径都被花括号包裹（路径内可含空格），按 `} {` 切分后去掉首尾花括号；
//! - 否则按空白切分。
//!
//! 规则必须与常见桌面环境的路径引用约定保持一致，不要“改进”它：
//! 例如 `{a b.png} c.png` 这种混合写法不会被拆开。

use std::path::PathBuf;

const BRACE_OPEN: char = '{';
const BRACE_SEPARATOR: &str = "} {";

/// 将一次拖放的原始文本解析为路径列表。
///
/// # 示例
/// ```rust
/// use image_drop_converters::converter::parse_drop_payload;
/// use std::path::PathBuf;
///
/// let paths = parse_drop_payload(r"{C:\a b\x.png} {C:\y.png}");
/// assert_eq!(paths, vec![PathBuf::from(r"C:\a b\x.png"), PathBuf::from(r"C:\y.png")]);
/// ```
pub fn parse_drop_payload(raw: &str) -> Vec<PathBuf> {
    let tokens: Vec<&str> = if raw.starts_with(BRACE_OPEN) {
        raw.split(BRACE_SEPARATOR)
            .map(|token| token.trim_matches(|c| c == '{' || c == '}'))
            .collect()
    } else {
        raw.split_whitespace().collect()
    };

    tokens
        .into_iter()
        .filter(|token| !token.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brace_wrapped_paths_keep_inner_spaces() {
        let paths = parse_drop_payload(r"{C:\a b\x.png} {C:\y.png}");
        assert_eq!(
            paths,
            vec![PathBuf::from(r"C:\a b\x.png"), PathBuf::from(r"C:\y.png")]
        );
        assert!(paths
            .iter()
            .all(|p| !p.to_string_lossy().contains(['{', '}'])));
    }

    #[test]
    fn whitespace_separated_paths() {
        let paths = parse_drop_payload(r"C:\x.png C:\y.png");
        assert_eq!(paths, vec![PathBuf::from(r"C:\x.png"), PathBuf::from(r"C:\y.png")]);
    }

    #[test]
    fn single_brace_wrapped_path() {
        let paths = parse_drop_payload("{/home/me/My Pictures/logo.png}");
        assert_eq!(paths, vec![PathBuf::from("/home/me/My Pictures/logo.png")]);
    }

    #[test]
    fn empty_payload_yields_nothing() {
        assert!(parse_drop_payload("").is_empty());
        assert!(parse_drop_payload("   \n\t").is_empty());
        assert!(parse_drop_payload("{}").is_empty());
    }

    #[test]
    fn mixed_quoting_is_not_split() {
        let paths = parse_drop_payload("{a b.png} c.png");
        assert_eq!(paths, vec![PathBuf::from("a b.png} c.png")]);
    }
}
