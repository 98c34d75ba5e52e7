//! Side effects: launching the system browser and the clipboard.

use crate::bookmark::Bookmark;
use std::env;
use std::error::Error;
use std::process::Command;

fn browser_command() -> String {
    if let Ok(browser) = env::var("LINK_DECK_BROWSER") {
        return browser;
    }
    if cfg!(target_os = "macos") {
        "open".to_string()
    } else if cfg!(target_os = "windows") {
        "explorer".to_string()
    } else {
        "xdg-open".to_string()
    }
}

pub fn open_in_browser(b: &Bookmark) -> Result<(), Box<dyn Error>> {
    let command = browser_command();
    let status = Command::new(&command).arg(&b.url).status().map_err(|e| {
        format!("Could not launch {command}: {e} (set LINK_DECK_BROWSER)")
    })?;
    if !status.success() {
        return Err(
            format!("{command} exited with non-zero status for {}", b.url)
                .into(),
        );
    }
    println!("Opened {} ({})", b.url, b.title);
    Ok(())
}

/// Copy text to the system clipboard. Headless sessions have no clipboard to
/// reach, so the text is printed instead and the command still succeeds.
pub fn copy_to_clipboard(text: &str) -> Result<(), Box<dyn Error>> {
    match arboard::Clipboard::new().and_then(|mut c| c.set_text(text)) {
        Ok(()) => {
            println!("Copied {text}");
            Ok(())
        }
        Err(err) => {
            eprintln!("Clipboard unavailable ({err}); printing instead");
            println!("{text}");
            Ok(())
        }
    }
}

/// The copy payload: the bare URL, or a markdown link with `--markdown`.
pub fn copy_payload(b: &Bookmark, markdown: bool) -> String {
    if markdown {
        format!("[{}]({})", b.title, b.url)
    } else {
        b.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark() -> Bookmark {
        Bookmark {
            id: "abc123".to_string(),
            title: "Rust Blog".to_string(),
            url: "https://blog.rust-lang.org/".to_string(),
            description: String::new(),
            category: String::new(),
            section: String::new(),
            tags: Vec::new(),
            added: None,
        }
    }

    #[test]
    fn test_copy_payload() {
        let b = bookmark();
        assert_eq!(copy_payload(&b, false), "https://blog.rust-lang.org/");
        assert_eq!(
            copy_payload(&b, true),
            "[Rust Blog](https://blog.rust-lang.org/)"
        );
    }
}
