use crate::filter::FilterState;
use std::error::Error;

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a single tag from -t/--tag flag
    pub fn extract_tag(&mut self) -> Result<String, Box<dyn Error>> {
        match self.iter.next() {
            Some(v) => {
                let tag = crate::tags::normalize_tag(&v);
                if tag.is_empty() {
                    Err(format!(
                        "Invalid tag provided to {}",
                        self.command_name
                    )
                    .into())
                } else {
                    Ok(tag)
                }
            }
            None => Err(format!(
                "Provide a tag after -t/--tag for {}",
                self.command_name
            )
            .into()),
        }
    }

    /// Extract a string value for a flag
    pub fn extract_value(
        &mut self,
        flag: &str,
    ) -> Result<String, Box<dyn Error>> {
        self.iter.next().ok_or_else(|| {
            format!("Provide a value after {} for {}", flag, self.command_name)
                .into()
        })
    }

    /// Check if there are remaining arguments
    pub fn has_more(&self) -> bool {
        self.iter.len() > 0
    }

    /// Get next positional argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    /// Collect remaining args
    pub fn collect_remaining(self) -> Vec<String> {
        self.iter.collect()
    }
}

/// The flag set shared by every listing command.
#[derive(Default, Debug)]
pub struct CommonFlags {
    pub search: Option<String>,
    pub tag_filters: Vec<String>,
    pub category: Option<String>,
    pub section: Option<String>,
    pub query: Option<String>,
    pub sort_field: String,
    pub ascending: bool,
    pub group: bool,
    pub relative_time: bool,
    pub show_all: bool,
    pub plain: bool,
    pub positional: Vec<String>,
}

impl CommonFlags {
    pub fn new() -> Self {
        Self {
            sort_field: "title".to_string(),
            ascending: true,
            ..Default::default()
        }
    }

    pub fn parse(
        args: Vec<String>,
        command_name: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let mut flags = Self::new();
        let mut parser = ArgParser::new(args, command_name);
        while let Some(arg) = parser.next() {
            match arg.as_str() {
                "-s" | "--search" => {
                    flags.search = Some(parser.extract_value("-s/--search")?)
                }
                "-t" | "--tag" => {
                    flags.tag_filters.push(parser.extract_tag()?)
                }
                "-c" | "--category" => {
                    flags.category =
                        Some(parser.extract_value("-c/--category")?)
                }
                "-S" | "--section" => {
                    flags.section = Some(parser.extract_value("-S/--section")?)
                }
                "--query" => {
                    flags.query = Some(parser.extract_value("--query")?)
                }
                "--sort" => {
                    flags.sort_field = parser.extract_value("--sort")?
                }
                "--asc" => flags.ascending = true,
                "--desc" => flags.ascending = false,
                "-g" | "--group" => flags.group = true,
                "-r" | "--relative" => flags.relative_time = true,
                "-a" | "--all" => flags.show_all = true,
                "-p" | "--plain" => flags.plain = true,
                other => {
                    if other.starts_with('-') {
                        return Err(format!(
                            "Unknown flag for {command_name}: {other}"
                        )
                        .into());
                    }
                    flags.positional.push(other.to_string());
                }
            }
        }
        Ok(flags)
    }

    /// Merge an optional `--query` snapshot with the explicit flags; explicit
    /// flags win. A section needs a category in scope, from either source.
    pub fn filter_state(&self) -> Result<FilterState, Box<dyn Error>> {
        let mut state = match &self.query {
            Some(q) => crate::query::decode(q),
            None => FilterState::default(),
        };
        if let Some(search) = &self.search {
            state.search = Some(search.clone());
        }
        if !self.tag_filters.is_empty() {
            state.tags =
                crate::tags::normalize_tags(self.tag_filters.clone());
        }
        if let Some(category) = &self.category {
            state.category = Some(category.clone());
        }
        if let Some(section) = &self.section {
            if state.category.is_none() {
                return Err(
                    "--section requires --category (section implies category)"
                        .into(),
                );
            }
            state.section = Some(section.clone());
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommonFlags {
        CommonFlags::parse(
            args.iter().map(|s| s.to_string()).collect(),
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_arg_parser_extract_tag() {
        let args = vec!["-t".to_string(), "rust".to_string()];
        let mut parser = ArgParser::new(args, "test");
        let flag = parser.next().unwrap();
        assert_eq!(flag, "-t");
        let tag = parser.extract_tag().unwrap();
        assert_eq!(tag, "#rust");
    }

    #[test]
    fn test_common_flags_defaults() {
        let flags = CommonFlags::new();
        assert_eq!(flags.sort_field, "title");
        assert!(flags.ascending);
        assert!(flags.tag_filters.is_empty());
    }

    #[test]
    fn test_parse_filters_and_positionals() {
        let flags = parse(&[
            "rust", "-t", "cli", "-c", "Development", "--sort", "url",
            "--desc",
        ]);
        assert_eq!(flags.positional, vec!["rust"]);
        assert_eq!(flags.tag_filters, vec!["#cli"]);
        assert_eq!(flags.category.as_deref(), Some("Development"));
        assert_eq!(flags.sort_field, "url");
        assert!(!flags.ascending);
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result = CommonFlags::parse(
            vec!["--bogus".to_string()],
            "test",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_state_merges_query_with_flags() {
        let flags = parse(&[
            "--query",
            "q=old&tags=web&category=News",
            "-s",
            "new search",
        ]);
        let state = flags.filter_state().unwrap();
        assert_eq!(state.search.as_deref(), Some("new search"));
        assert_eq!(state.tags, vec!["#web"]);
        assert_eq!(state.category.as_deref(), Some("News"));
    }

    #[test]
    fn test_section_requires_category() {
        let flags = parse(&["-S", "Tools"]);
        assert!(flags.filter_state().is_err());

        let flags = parse(&["-S", "Tools", "-c", "Development"]);
        let state = flags.filter_state().unwrap();
        assert_eq!(state.section.as_deref(), Some("Tools"));

        // A category arriving via --query also satisfies the invariant.
        let flags = parse(&["-S", "Tools", "--query", "category=Development"]);
        assert!(flags.filter_state().is_ok());
    }
}
