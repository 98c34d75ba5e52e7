use std::error::Error;
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

/// Builder around an fzf invocation. Selection lines are `id<TAB>display`;
/// fzf shows the display columns and we read the id back out.
pub struct FzfSelector {
    preview_command: Option<String>,
    multi_select: bool,
    height: Option<String>,
    layout: Option<String>,
    preview_window: Option<String>,
    delimiter: Option<String>,
    with_nth: Option<String>,
}

impl FzfSelector {
    pub fn new() -> Self {
        Self {
            preview_command: None,
            multi_select: false,
            height: None,
            layout: None,
            preview_window: None,
            delimiter: None,
            with_nth: None,
        }
    }

    /// Selector over bookmark rows with a full-card preview rendered by this
    /// binary itself.
    pub fn with_bookmark_preview() -> Self {
        let renderer = get_renderer_name();
        let preview = format!(
            "env -u NO_COLOR CLICOLOR_FORCE=1 {} view {{1}} 2>/dev/null",
            renderer
        );
        Self {
            preview_command: Some(preview),
            multi_select: true,
            height: Some("70%".to_string()),
            layout: Some("reverse".to_string()),
            preview_window: Some("down:wrap".to_string()),
            delimiter: Some("\t".to_string()),
            with_nth: Some("2..".to_string()),
        }
    }

    pub fn multi_select(mut self, enabled: bool) -> Self {
        self.multi_select = enabled;
        self
    }

    pub fn height(mut self, height: &str) -> Self {
        self.height = Some(height.to_string());
        self
    }

    pub fn layout(mut self, layout: &str) -> Self {
        self.layout = Some(layout.to_string());
        self
    }

    /// Select from raw input lines; returns the selected lines.
    pub fn select_from_input(
        &self,
        input: &str,
    ) -> Result<Vec<String>, Box<dyn Error>> {
        if !is_fzf_available() {
            return Err(
                "fzf is not installed or LINK_DECK_NO_FZF is set".into()
            );
        }

        let mut cmd = Command::new("fzf");

        if self.multi_select {
            cmd.arg("--multi");
        }

        if let Some(ref height) = self.height {
            cmd.arg("--height").arg(height);
        }

        if let Some(ref layout) = self.layout {
            cmd.arg("--layout").arg(layout);
        }

        if let Some(ref delimiter) = self.delimiter {
            cmd.arg("--delimiter").arg(delimiter);
        }

        if let Some(ref with_nth) = self.with_nth {
            cmd.arg("--with-nth").arg(with_nth);
        }

        if let Some(ref preview) = self.preview_command {
            cmd.arg("--preview").arg(preview);
        }

        if let Some(ref preview_window) = self.preview_window {
            cmd.arg("--preview-window").arg(preview_window);
        }

        let mut child =
            cmd.stdin(Stdio::piped()).stdout(Stdio::piped()).spawn()?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;

        if !output.status.success() || output.stdout.is_empty() {
            return Ok(Vec::new()); // User cancelled
        }

        let selected = String::from_utf8_lossy(&output.stdout);
        Ok(selected.lines().map(|s| s.to_string()).collect())
    }

    /// Select bookmark ids from `id<TAB>display` rows.
    pub fn select_ids(
        &self,
        rows: &[String],
    ) -> Result<Vec<String>, Box<dyn Error>> {
        let selected = self.select_from_input(&rows.join("\n"))?;
        Ok(selected
            .iter()
            .filter_map(|line| line.split('\t').next())
            .map(|id| id.to_string())
            .collect())
    }
}

impl Default for FzfSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if fzf is available
pub fn is_fzf_available() -> bool {
    if std::env::var("LINK_DECK_NO_FZF").is_ok() {
        return false;
    }

    static FZF_AVAILABLE: OnceLock<bool> = OnceLock::new();
    *FZF_AVAILABLE.get_or_init(|| {
        Command::new("fzf")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    })
}

/// Get the preview renderer binary name (cached)
fn get_renderer_name() -> &'static str {
    static RENDERER: OnceLock<&str> = OnceLock::new();
    RENDERER.get_or_init(|| {
        if Command::new("link_deck")
            .arg("help")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
        {
            "link_deck"
        } else {
            "lnk"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fzf_selector_builder() {
        let selector = FzfSelector::new()
            .multi_select(true)
            .height("50%")
            .layout("reverse");

        assert!(selector.multi_select);
        assert_eq!(selector.height.as_deref(), Some("50%"));
        assert_eq!(selector.layout.as_deref(), Some("reverse"));
    }

    #[test]
    fn test_with_bookmark_preview() {
        let selector = FzfSelector::with_bookmark_preview();
        assert!(selector.multi_select);
        assert_eq!(selector.delimiter.as_deref(), Some("\t"));
        assert!(selector.preview_command.unwrap().contains("view"));
    }

    #[test]
    fn test_get_renderer_name_cached() {
        let name1 = get_renderer_name();
        let name2 = get_renderer_name();
        assert_eq!(name1, name2);
        assert!(name1 == "link_deck" || name1 == "lnk");
    }
}
