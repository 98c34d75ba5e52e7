//! The filtering/grouping pipeline. Everything here is a linear scan over
//! the loaded collection; the collection is small enough that no indexing is
//! warranted.

use crate::bookmark::{Bookmark, cmp_added};
use crate::tags::bookmark_has_tags;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::error::Error;

/// The active view: what the original app kept in its URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: Option<String>,
    /// Normalized `#tags`; a bookmark must carry all of them.
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub section: Option<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.tags.is_empty()
            && self.category.is_none()
            && self.section.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Url,
    Category,
    Added,
}

impl SortField {
    pub fn parse(s: &str) -> Result<Self, Box<dyn Error>> {
        match s {
            "title" => Ok(Self::Title),
            "url" => Ok(Self::Url),
            "category" => Ok(Self::Category),
            "added" => Ok(Self::Added),
            other => {
                Err(format!("Unknown sort field: {other} (title|url|category|added)").into())
            }
        }
    }
}

/// Apply the full filter state: category, then section, then tags, then
/// free-text search over title, description, URL, and tags.
pub fn filtered_bookmarks<'a>(
    all: &'a [Bookmark],
    state: &FilterState,
) -> Vec<&'a Bookmark> {
    let mut matched: Vec<&Bookmark> = all.iter().collect();

    if let Some(category) = &state.category {
        matched.retain(|b| b.category.eq_ignore_ascii_case(category));
    }
    if let Some(section) = &state.section {
        matched.retain(|b| b.section.eq_ignore_ascii_case(section));
    }
    if !state.tags.is_empty() {
        matched.retain(|b| bookmark_has_tags(b, &state.tags));
    }
    if let Some(q) = &state.search {
        let ql = q.to_lowercase();
        if !ql.is_empty() {
            matched.retain(|b| matches_search(b, &ql));
        }
    }
    matched
}

fn matches_search(b: &Bookmark, query_lower: &str) -> bool {
    b.title.to_lowercase().contains(query_lower)
        || b.description.to_lowercase().contains(query_lower)
        || b.url.to_lowercase().contains(query_lower)
        || b.tags.iter().any(|t| t.to_lowercase().contains(query_lower))
}

pub fn sort_bookmarks(
    items: &mut [&Bookmark],
    field: SortField,
    ascending: bool,
) {
    let comparator = |a: &&Bookmark, b: &&Bookmark| -> Ordering {
        match field {
            SortField::Title => cmp_ci(&a.title, &b.title),
            SortField::Url => cmp_ci(&a.url, &b.url),
            SortField::Category => cmp_ci(&a.category, &b.category)
                .then_with(|| cmp_ci(&a.section, &b.section))
                .then_with(|| cmp_ci(&a.title, &b.title)),
            SortField::Added => cmp_added(a, b)
                .then_with(|| cmp_ci(&a.title, &b.title)),
        }
    };
    items.sort_by(|a, b| {
        let ord = comparator(a, b);
        if ascending { ord } else { ord.reverse() }
    });
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Tag counts over the view filtered by everything except the current tag
/// selection, so each count answers "how many bookmarks would this tag
/// leave". Pinned tags always appear, at zero when absent. Ordered by count
/// descending, then name.
pub fn tag_counts(
    all: &[Bookmark],
    state: &FilterState,
) -> Vec<(String, usize)> {
    let mut without_tags = state.clone();
    without_tags.tags = Vec::new();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for b in filtered_bookmarks(all, &without_tags) {
        for tag in &b.tags {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
    }
    for tag in crate::tags::get_pinned_tags() {
        counts.entry(tag).or_insert(0);
    }

    let mut out: Vec<(String, usize)> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[derive(Debug)]
pub struct SectionGroup<'a> {
    /// Empty string for unsectioned entries.
    pub name: String,
    pub bookmarks: Vec<&'a Bookmark>,
}

#[derive(Debug)]
pub struct CategoryGroup<'a> {
    /// Empty string for uncategorized entries.
    pub name: String,
    pub sections: Vec<SectionGroup<'a>>,
}

impl CategoryGroup<'_> {
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.bookmarks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.bookmarks.is_empty())
    }
}

/// Group an already-filtered view by category then section. Categories are
/// sorted by name with uncategorized last; unsectioned entries lead their
/// category; bookmarks sort by title.
pub fn group_bookmarks<'a>(filtered: &[&'a Bookmark]) -> Vec<CategoryGroup<'a>> {
    let mut by_category: BTreeMap<String, BTreeMap<String, Vec<&Bookmark>>> =
        BTreeMap::new();
    for b in filtered {
        by_category
            .entry(b.category.clone())
            .or_default()
            .entry(b.section.clone())
            .or_default()
            .push(b);
    }

    let mut groups: Vec<CategoryGroup<'a>> = by_category
        .into_iter()
        .map(|(name, sections)| {
            let mut sections: Vec<SectionGroup<'a>> = sections
                .into_iter()
                .map(|(name, mut bookmarks)| {
                    bookmarks
                        .sort_by(|a, b| cmp_ci(&a.title, &b.title));
                    SectionGroup { name, bookmarks }
                })
                .collect();
            sections.sort_by(|a, b| match (a.name.is_empty(), b.name.is_empty()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => cmp_ci(&a.name, &b.name),
            });
            CategoryGroup { name, sections }
        })
        .collect();

    groups.sort_by(|a, b| match (a.name.is_empty(), b.name.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => cmp_ci(&a.name, &b.name),
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(
        title: &str,
        url: &str,
        category: &str,
        section: &str,
        tags: &[&str],
    ) -> Bookmark {
        Bookmark {
            id: String::new(),
            title: title.to_string(),
            url: url.to_string(),
            description: format!("{title} description"),
            category: category.to_string(),
            section: section.to_string(),
            tags: tags.iter().map(|t| format!("#{t}")).collect(),
            added: None,
        }
    }

    fn sample() -> Vec<Bookmark> {
        vec![
            bookmark(
                "Rust Blog",
                "https://blog.rust-lang.org/",
                "Development",
                "Blogs",
                &["rust", "news"],
            ),
            bookmark(
                "Crates.io",
                "https://crates.io/",
                "Development",
                "Tools",
                &["rust", "packages"],
            ),
            bookmark(
                "Hacker News",
                "https://news.ycombinator.com/",
                "News",
                "",
                &["news", "daily"],
            ),
            bookmark("Scratchpad", "https://pad.example/", "", "", &[]),
        ]
    }

    #[test]
    fn test_filter_by_category_and_section() {
        let all = sample();
        let state = FilterState {
            category: Some("Development".to_string()),
            ..Default::default()
        };
        assert_eq!(filtered_bookmarks(&all, &state).len(), 2);

        let state = FilterState {
            category: Some("development".to_string()),
            section: Some("tools".to_string()),
            ..Default::default()
        };
        let matched = filtered_bookmarks(&all, &state);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Crates.io");
    }

    #[test]
    fn test_filter_requires_all_tags() {
        let all = sample();
        let state = FilterState {
            tags: vec!["#news".to_string(), "#rust".to_string()],
            ..Default::default()
        };
        let matched = filtered_bookmarks(&all, &state);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "Rust Blog");
    }

    #[test]
    fn test_search_covers_title_url_description_tags() {
        let all = sample();
        let by_url = FilterState {
            search: Some("ycombinator".to_string()),
            ..Default::default()
        };
        assert_eq!(filtered_bookmarks(&all, &by_url).len(), 1);

        let by_tag = FilterState {
            search: Some("daily".to_string()),
            ..Default::default()
        };
        assert_eq!(filtered_bookmarks(&all, &by_tag).len(), 1);

        let miss = FilterState {
            search: Some("zzz-no-match".to_string()),
            ..Default::default()
        };
        assert!(filtered_bookmarks(&all, &miss).is_empty());
    }

    #[test]
    fn test_sort_title_and_reverse() {
        let all = sample();
        let mut items: Vec<&Bookmark> = all.iter().collect();
        sort_bookmarks(&mut items, SortField::Title, true);
        assert_eq!(items[0].title, "Crates.io");
        sort_bookmarks(&mut items, SortField::Title, false);
        assert_eq!(items[0].title, "Scratchpad");
    }

    #[test]
    fn test_tag_counts_ignore_tag_selection() {
        let all = sample();
        let state = FilterState {
            tags: vec!["#daily".to_string()],
            ..Default::default()
        };
        let counts = tag_counts(&all, &state);
        let news = counts.iter().find(|(t, _)| t == "#news").unwrap();
        // #news stays at 2 even though the #daily selection narrows the list.
        assert_eq!(news.1, 2);
    }

    #[test]
    fn test_tag_counts_include_pinned_at_zero() {
        let all = sample();
        let counts = tag_counts(&all, &FilterState::default());
        // Defaults are pinned even when no bookmark carries them.
        assert!(counts.iter().any(|(t, n)| t == "#reading" && *n == 0));
    }

    #[test]
    fn test_group_order() {
        let all = sample();
        let filtered: Vec<&Bookmark> = all.iter().collect();
        let groups = group_bookmarks(&filtered);

        let names: Vec<&str> =
            groups.iter().map(|g| g.name.as_str()).collect();
        // Uncategorized goes last.
        assert_eq!(names, vec!["Development", "News", ""]);

        let dev = &groups[0];
        assert_eq!(dev.len(), 2);
        let sections: Vec<&str> =
            dev.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(sections, vec!["Blogs", "Tools"]);
    }
}
