use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tokio::fs;

/// 会员号分隔符：逗号或任意空白（含换行）
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("separator regex is valid"));

/// 按换行、逗号、空白切分会员号列表，丢弃空项
pub fn parse_identifiers(raw: &str) -> Vec<String> {
    SEPARATORS
        .split(raw)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// 从文件中加载会员号列表
pub async fn load_identifiers(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        anyhow::bail!("会员号文件不存在: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取会员号文件: {}", path.display()))?;

    let identifiers = parse_identifiers(&content);

    tracing::info!(
        "从 {} 加载了 {} 个会员号",
        path.file_name().unwrap_or_default().to_string_lossy(),
        identifiers.len()
    );

    Ok(identifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let ids = parse_identifiers("11111111, 22222222\n\n  33333333\tjane@example.org,,");
        assert_eq!(
            ids,
            vec!["11111111", "22222222", "33333333", "jane@example.org"]
        );
    }

    #[test]
    fn test_parse_blank_input() {
        assert!(parse_identifiers(" \n , ").is_empty());
    }

    #[test]
    fn test_parse_crlf_and_tabs() {
        let ids = parse_identifiers("\r\n11111111\r\n\t22222222\r\n");
        assert_eq!(ids, vec!["11111111", "22222222"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = tokio_test::block_on(load_identifiers(Path::new(
            "definitely/not/here/identifiers.txt",
        )));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "membership_validator_ids_{}.txt",
            std::process::id()
        ));
        tokio::fs::write(&path, "11111111\n22222222,33333333\n")
            .await
            .unwrap();

        let ids = load_identifiers(&path).await.unwrap();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[2], "33333333");

        let _ = tokio::fs::remove_file(&path).await;
    }
}
