use crate::bookmark::Bookmark;

/// Normalize a tag to #tag format
pub fn normalize_tag(t: &str) -> String {
    let trimmed = t.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with('#') {
        trimmed.to_string()
    } else {
        format!("#{}", trimmed)
    }
}

/// Normalize and deduplicate a list of tags
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = tags
        .into_iter()
        .map(|t| normalize_tag(&t))
        .filter(|t| !t.is_empty())
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized
}

/// Check if a bookmark carries all required tags
pub fn bookmark_has_tags(bookmark: &Bookmark, tags: &[String]) -> bool {
    if tags.is_empty() {
        return true;
    }
    tags.iter().all(|t| bookmark.tags.contains(t))
}

/// Get pinned tags from environment or default
pub fn get_pinned_tags() -> Vec<String> {
    const DEFAULT: &str = "#reading,#reference,#daily";

    let pinned = std::env::var("LINK_DECK_PINNED_TAGS")
        .unwrap_or_else(|_| DEFAULT.to_string());

    pinned
        .split(',')
        .map(|t| normalize_tag(t.trim()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Hash a label (tag or host) for deterministic color selection
pub fn hash_label(label: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in label.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

/// Deterministic palette color for a label; the same tag or host always
/// renders in the same color across runs.
pub fn color_for_label(label: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (137, 180, 250),
        (166, 227, 161),
        (249, 226, 175),
        (245, 194, 231),
        (255, 169, 167),
        (148, 226, 213),
        (198, 160, 246),
        (240, 198, 198),
        (244, 219, 214),
        (181, 232, 224),
        (135, 176, 249),
        (183, 189, 248),
        (201, 203, 255),
        (255, 214, 165),
        (179, 255, 171),
        (255, 201, 210),
        (196, 181, 255),
        (186, 225, 255),
        (255, 241, 173),
        (204, 255, 229),
        (255, 199, 190),
        (214, 182, 255),
        (255, 214, 235),
        (168, 237, 255),
        (238, 231, 220),
        (211, 228, 205),
        (255, 234, 190),
        (214, 200, 255),
        (255, 210, 198),
        (204, 246, 221),
        (255, 230, 214),
        (196, 222, 255),
    ];
    let h = hash_label(label);
    PALETTE[(h as usize) % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark_with_tags(tags: &[&str]) -> Bookmark {
        Bookmark {
            id: "test".to_string(),
            title: "Test".to_string(),
            url: "https://example.com".to_string(),
            description: String::new(),
            category: String::new(),
            section: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            added: None,
        }
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("rust"), "#rust");
        assert_eq!(normalize_tag("#rust"), "#rust");
        assert_eq!(normalize_tag("  news  "), "#news");
        assert_eq!(normalize_tag(""), "");
    }

    #[test]
    fn test_normalize_tags() {
        let tags =
            vec!["rust".to_string(), "#news".to_string(), "rust".to_string()];
        let result = normalize_tags(tags);
        assert_eq!(result, vec!["#news", "#rust"]);
    }

    #[test]
    fn test_bookmark_has_tags() {
        let bookmark = bookmark_with_tags(&["#rust", "#news"]);

        assert!(bookmark_has_tags(&bookmark, &[]));
        assert!(bookmark_has_tags(&bookmark, &["#rust".to_string()]));
        assert!(bookmark_has_tags(
            &bookmark,
            &["#news".to_string(), "#rust".to_string()]
        ));
        assert!(!bookmark_has_tags(&bookmark, &["#missing".to_string()]));
    }

    #[test]
    fn test_hash_label_deterministic() {
        let h1 = hash_label("rust");
        let h2 = hash_label("rust");
        assert_eq!(h1, h2);

        let h3 = hash_label("news");
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_color_for_label_consistent() {
        let c1 = color_for_label("crates.io");
        let c2 = color_for_label("crates.io");
        assert_eq!(c1, c2);
    }
}
