use regex::Regex;
use std::sync::LazyLock;

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").unwrap());
/// 只匹配行首的标题标记，`C# basics` 中的 `#` 保留
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").unwrap());

/// 去除模型输出中的粗体、斜体、行内代码与标题标记
pub fn clean_markup(text: &str) -> String {
    let text = BOLD.replace_all(text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = CODE.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    text.trim().to_string()
}

/// 按行切分并去掉空行，每行两端空白被去除
pub fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// 超过 `budget` 个字符时截断并追加 `...`
pub fn truncate_with_ellipsis(content: &str, budget: usize) -> String {
    if content.chars().count() > budget {
        let head: String = content.chars().take(budget).collect();
        format!("{}...", head)
    } else {
        content.to_string()
    }
}

/// URI组件编码，空格编码为 `%20`
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markup_strips_emphasis_and_headings() {
        let text = "## **Phase 1:** *Basics* with `code`\n";
        assert_eq!(clean_markup(text), "Phase 1: Basics with code");
    }

    #[test]
    fn test_clean_markup_keeps_inline_hash() {
        assert_eq!(
            clean_markup("# Phase 1: C# Basics\n  ### Learn F# and C# syntax"),
            "Phase 1: C# Basics\nLearn F# and C# syntax"
        );
    }

    #[test]
    fn test_truncate_with_ellipsis_counts_chars() {
        assert_eq!(truncate_with_ellipsis("short", 50), "short");
        let long = "a".repeat(51);
        let truncated = truncate_with_ellipsis(&long, 50);
        assert_eq!(truncated.len(), 53);
        assert!(truncated.ends_with("..."));

        // 多字节字符不能在字节边界处被截断
        let wide = "学".repeat(60);
        assert_eq!(truncate_with_ellipsis(&wide, 50).chars().count(), 53);
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Eiffel Tower, Paris"), "Eiffel%20Tower%2C%20Paris");
        assert_eq!(encode_component("a+b"), "a%2Bb");
    }

    #[test]
    fn test_non_empty_lines_trims() {
        assert_eq!(non_empty_lines("  a \n\n\t\nb\r\n"), vec!["a", "b"]);
    }
}
