//! Query-string codec for the filter state. The encoding is the survival of
//! the original URL parameters: `q`, `tags` (comma-joined, `#` stripped),
//! `category`, `section`, in that order, empty fields omitted.

use crate::filter::FilterState;
use crate::tags::normalize_tags;

pub fn encode(state: &FilterState) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    if let Some(q) = &state.search {
        if !q.is_empty() {
            serializer.append_pair("q", q);
        }
    }
    if !state.tags.is_empty() {
        let tags: Vec<&str> = state
            .tags
            .iter()
            .map(|t| t.trim_start_matches('#'))
            .collect();
        serializer.append_pair("tags", &tags.join(","));
    }
    if let Some(category) = &state.category {
        serializer.append_pair("category", category);
    }
    if let Some(section) = &state.section {
        serializer.append_pair("section", section);
    }
    serializer.finish()
}

/// Tolerant decode: takes a bare query string or anything containing `?`,
/// ignores unknown keys, re-normalizes tags, and drops a section arriving
/// without a category.
pub fn decode(input: &str) -> FilterState {
    let qs = match input.split_once('?') {
        Some((_, rest)) => rest,
        None => input,
    };

    let mut state = FilterState::default();
    let mut tags: Vec<String> = Vec::new();
    for (key, value) in url::form_urlencoded::parse(qs.as_bytes()) {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "q" => state.search = Some(value.to_string()),
            "tags" | "tag" => {
                tags.extend(value.split(',').map(|t| t.to_string()))
            }
            "category" => state.category = Some(value.to_string()),
            "section" => state.section = Some(value.to_string()),
            _ => {}
        }
    }
    state.tags = normalize_tags(tags);
    if state.category.is_none() {
        state.section = None;
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_canonical() {
        let state = FilterState {
            search: Some("rust".to_string()),
            tags: vec!["#cli".to_string(), "#tools".to_string()],
            category: Some("Development".to_string()),
            section: Some("Tools".to_string()),
        };
        assert_eq!(
            encode(&state),
            "q=rust&tags=cli%2Ctools&category=Development&section=Tools"
        );
        assert_eq!(encode(&FilterState::default()), "");
    }

    #[test]
    fn test_round_trip() {
        let state = FilterState {
            search: Some("rust lang".to_string()),
            tags: vec!["#cli".to_string(), "#web".to_string()],
            category: Some("Development".to_string()),
            section: None,
        };
        assert_eq!(decode(&encode(&state)), state);
    }

    #[test]
    fn test_decode_tolerates_junk() {
        let state = decode("bogus=1&q=rust&tags=cli,cli,%23web&page=3");
        assert_eq!(state.search.as_deref(), Some("rust"));
        assert_eq!(state.tags, vec!["#cli", "#web"]);
        assert!(state.category.is_none());
    }

    #[test]
    fn test_decode_drops_orphan_section() {
        let state = decode("section=Tools&q=x");
        assert!(state.section.is_none());
        let state = decode("category=Development&section=Tools");
        assert_eq!(state.section.as_deref(), Some("Tools"));
    }

    #[test]
    fn test_decode_accepts_full_url() {
        let state =
            decode("https://deck.example/view?q=news&category=News");
        assert_eq!(state.search.as_deref(), Some("news"));
        assert_eq!(state.category.as_deref(), Some("News"));
    }

    #[test]
    fn test_repeated_tag_keys_merge() {
        let state = decode("tag=cli&tag=web");
        assert_eq!(state.tags, vec!["#cli", "#web"]);
    }
}
