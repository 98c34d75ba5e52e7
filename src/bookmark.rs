use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const ID_WIDTH: usize = 6;

/// One link record from the bookmarks document. Ids are not part of the
/// document; they are derived from the URL at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub section: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

impl Bookmark {
    /// Host part of the URL, when it parses.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }

    pub fn parse_added(&self) -> Option<DateTime<FixedOffset>> {
        self.added
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    }
}

#[derive(Serialize, Deserialize)]
struct Collection {
    bookmarks: Vec<Bookmark>,
}

/// Accept both `{ "bookmarks": [...] }` and a bare top-level array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped(Collection),
    Bare(Vec<Bookmark>),
}

pub fn bookmarks_path() -> io::Result<PathBuf> {
    if let Ok(file) = std::env::var("LINK_DECK_FILE") {
        return Ok(PathBuf::from(file));
    }
    let home = std::env::var("HOME").map_err(|_| {
        io::Error::other("HOME not set; set LINK_DECK_FILE explicitly")
    })?;
    Ok(PathBuf::from(home).join(".link_deck").join("bookmarks.json"))
}

/// Load and normalize the bookmarks document. Records without a URL are
/// skipped with a warning; orphan sections are cleared and tags deduped so
/// the in-memory collection always satisfies the model invariants.
pub fn load_collection(path: &Path) -> Result<Vec<Bookmark>, Box<dyn Error>> {
    if !path.exists() {
        return Err(format!(
            "Bookmarks file not found: {} (set LINK_DECK_FILE or run `lnk seed`)",
            path.display()
        )
        .into());
    }
    let raw = fs::read_to_string(path)?;
    let document: Document = serde_json::from_str(&raw).map_err(|e| {
        format!("Could not parse {}: {e}", path.display())
    })?;
    let mut bookmarks = match document {
        Document::Wrapped(c) => c.bookmarks,
        Document::Bare(b) => b,
    };

    bookmarks.retain(|b| {
        if b.url.trim().is_empty() {
            eprintln!("Skipping bookmark without URL: {}", b.title);
            false
        } else {
            true
        }
    });

    for b in &mut bookmarks {
        b.title = b.title.trim().to_string();
        b.tags = crate::tags::normalize_tags(std::mem::take(&mut b.tags));
        // Section implies category.
        if b.category.trim().is_empty() && !b.section.trim().is_empty() {
            b.section = String::new();
        }
        b.category = b.category.trim().to_string();
        b.section = b.section.trim().to_string();
    }

    assign_ids(&mut bookmarks);
    Ok(bookmarks)
}

pub fn find_by_id<'a>(
    bookmarks: &'a [Bookmark],
    id: &str,
) -> Option<&'a Bookmark> {
    bookmarks.iter().find(|b| b.id == id)
}

pub fn cmp_added(a: &Bookmark, b: &Bookmark) -> Ordering {
    match (a.parse_added(), b.parse_added()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

/// Ids are base62 of a hash of the URL, so they stay stable between runs and
/// can live in shell history. Duplicate URLs get a counter suffix.
fn assign_ids(bookmarks: &mut [Bookmark]) {
    let mut taken: HashSet<String> = HashSet::new();
    for b in bookmarks {
        let base =
            encode_base62_width(crate::tags::hash_label(&b.url), ID_WIDTH);
        let base: String = base.chars().take(ID_WIDTH).collect();
        let mut candidate = base.clone();
        let mut suffix: u64 = 1;
        while taken.contains(&candidate) {
            candidate = format!("{base}{}", encode_base62(suffix));
            suffix += 1;
        }
        taken.insert(candidate.clone());
        b.id = candidate;
    }
}

fn encode_base62(num: u64) -> String {
    const ALPHABET: &[u8] =
        b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
    if num == 0 {
        return "0".to_string();
    }
    let mut n = num;
    let base = ALPHABET.len() as u64;
    let mut out = Vec::new();
    while n > 0 {
        let idx = (n % base) as usize;
        out.push(ALPHABET[idx] as char);
        n /= base;
    }
    out.iter().rev().collect()
}

fn encode_base62_width(num: u64, width: usize) -> String {
    let base = encode_base62(num);
    if base.len() >= width {
        base
    } else {
        format!("{}{}", "0".repeat(width - base.len()), base)
    }
}

/// Write a sample document, used by `seed` and handy in demos.
pub fn write_seed(path: &Path, count: usize) -> Result<usize, Box<dyn Error>> {
    const SITES: &[(&str, &str, &str, &str, &str, &[&str])] = &[
        (
            "Rust Blog",
            "https://blog.rust-lang.org/",
            "Official Rust project blog",
            "Development",
            "Blogs",
            &["rust", "news"],
        ),
        (
            "Crates.io",
            "https://crates.io/",
            "The Rust package registry",
            "Development",
            "Tools",
            &["rust", "packages"],
        ),
        (
            "MDN Web Docs",
            "https://developer.mozilla.org/",
            "Web platform documentation",
            "Development",
            "Docs",
            &["web", "reference"],
        ),
        (
            "Hacker News",
            "https://news.ycombinator.com/",
            "Tech news aggregator",
            "News",
            "",
            &["news", "daily"],
        ),
        (
            "Lobsters",
            "https://lobste.rs/",
            "Computing-focused link aggregator",
            "News",
            "",
            &["news"],
        ),
        (
            "Wikipedia",
            "https://en.wikipedia.org/",
            "The free encyclopedia",
            "Reference",
            "",
            &["reference", "daily"],
        ),
    ];

    let count = count.min(SITES.len());
    let bookmarks: Vec<Bookmark> = SITES[..count]
        .iter()
        .map(|(title, url, description, category, section, tags)| Bookmark {
            id: String::new(),
            title: title.to_string(),
            url: url.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            section: section.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            added: None,
        })
        .collect();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(&Collection { bookmarks })?;
    fs::write(path, json + "\n")?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_doc(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("bookmarks.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_wrapped_and_bare() {
        let tmp = tempfile::tempdir().unwrap();
        let wrapped = write_doc(
            tmp.path(),
            r#"{"bookmarks":[{"title":"A","url":"https://a.example/"}]}"#,
        );
        assert_eq!(load_collection(&wrapped).unwrap().len(), 1);

        let bare = write_doc(
            tmp.path(),
            r#"[{"title":"A","url":"https://a.example/"}]"#,
        );
        assert_eq!(load_collection(&bare).unwrap().len(), 1);
    }

    #[test]
    fn test_load_normalizes_invariants() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_doc(
            tmp.path(),
            r##"[
                {"title":"A","url":"https://a.example/",
                 "section":"Orphan","tags":["x","#x","y"]},
                {"title":"No URL","url":"  "}
            ]"##,
        );
        let loaded = load_collection(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].section, "");
        assert_eq!(loaded[0].tags, vec!["#x", "#y"]);
    }

    #[test]
    fn test_ids_stable_and_unique() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_doc(
            tmp.path(),
            r#"[
                {"title":"A","url":"https://a.example/"},
                {"title":"B","url":"https://b.example/"},
                {"title":"A again","url":"https://a.example/"}
            ]"#,
        );
        let first = load_collection(&path).unwrap();
        let second = load_collection(&path).unwrap();
        let first_ids: Vec<&str> =
            first.iter().map(|b| b.id.as_str()).collect();
        let second_ids: Vec<&str> =
            second.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);

        let unique: HashSet<&&str> = first_ids.iter().collect();
        assert_eq!(unique.len(), first_ids.len());
        // Duplicate URLs still share the id prefix.
        assert!(first_ids[2].starts_with(first_ids[0]));
    }

    #[test]
    fn test_host_and_added() {
        let b = Bookmark {
            id: String::new(),
            title: "A".to_string(),
            url: "https://blog.rust-lang.org/inside-rust/".to_string(),
            description: String::new(),
            category: String::new(),
            section: String::new(),
            tags: Vec::new(),
            added: Some("2025-03-12T10:00:00Z".to_string()),
        };
        assert_eq!(b.host().as_deref(), Some("blog.rust-lang.org"));
        assert!(b.parse_added().is_some());
    }

    #[test]
    fn test_missing_file_is_friendly() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_collection(&tmp.path().join("nope.json"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("LINK_DECK_FILE"));
    }

    #[test]
    fn test_write_seed_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deck").join("bookmarks.json");
        let written = write_seed(&path, 4).unwrap();
        assert_eq!(written, 4);
        let loaded = load_collection(&path).unwrap();
        assert_eq!(loaded.len(), 4);
    }
}
