//! Dot-and-bracket key paths into a JSON document (e.g. `a.b[2].c`).

/// Extend a key path with a mapping key
pub fn child(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Extend a key path with a sequence index
pub fn element(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}

/// Render a key path as a readable hierarchy for prompts
pub fn breadcrumb(path: &str) -> String {
    path.split('.').collect::<Vec<_>>().join(" > ")
}

/// Final segment of a key path (the parent mapping's own key)
pub fn last_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_from_root() {
        assert_eq!(child("", "title"), "title");
    }

    #[test]
    fn test_child_nested() {
        assert_eq!(child("screen.title", "text"), "screen.title.text");
    }

    #[test]
    fn test_element_appends_index() {
        assert_eq!(element("items", 0), "items[0]");
        assert_eq!(element("a.b", 12), "a.b[12]");
    }

    #[test]
    fn test_element_from_root() {
        assert_eq!(element("", 3), "[3]");
    }

    #[test]
    fn test_breadcrumb() {
        assert_eq!(breadcrumb("a.b.c"), "a > b > c");
        assert_eq!(breadcrumb("single"), "single");
        assert_eq!(breadcrumb(""), "");
    }

    #[test]
    fn test_breadcrumb_keeps_indices_with_segment() {
        assert_eq!(breadcrumb("a.b[2].c"), "a > b[2] > c");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("a.b.c"), "c");
        assert_eq!(last_segment("single"), "single");
        assert_eq!(last_segment(""), "");
    }
}
