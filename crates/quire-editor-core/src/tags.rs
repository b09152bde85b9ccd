use smol_str::{SmolStr, ToSmolStr};

/// Split a raw tag string on commas, trimming each piece and dropping
/// empties. Order and duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<SmolStr> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(|tag| tag.to_smolstr())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" a, b ,,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_tags_empty_and_blank() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_parse_tags_keeps_duplicates_and_inner_spaces() {
        assert_eq!(
            parse_tags("web development, rust,rust"),
            vec!["web development", "rust", "rust"]
        );
    }
}
