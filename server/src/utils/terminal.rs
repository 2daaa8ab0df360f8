//! Terminal output helpers for the startup banner and CLI

const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Whether ANSI colors should be written (honors `NO_COLOR`)
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
}

fn paint(text: &str, color: &str) -> String {
    if colors_enabled() {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}

/// Format a URL as a clickable terminal hyperlink (OSC 8) when the terminal
/// supports it, otherwise as colored text
pub fn terminal_link(url: &str) -> String {
    let text = paint(url, CYAN);
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, text)
    } else {
        text
    }
}

/// Status marker for CLI results
pub fn status_mark(ok: bool) -> String {
    if ok {
        paint("valid", GREEN)
    } else {
        paint("invalid", RED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_link_contains_url() {
        let url = "http://localhost:8089/api/v1?x=1&y=2";
        assert!(terminal_link(url).contains(url));
    }

    #[test]
    fn test_terminal_link_hyperlink_wraps_url() {
        let url = "http://localhost:8089/api/docs";
        let result = terminal_link(url);
        if result.starts_with("\x1b]8;;") {
            assert!(result.starts_with(&format!("\x1b]8;;{}\x07", url)));
            assert!(result.ends_with("\x1b]8;;\x07"));
        }
    }

    #[test]
    fn test_paint_wraps_or_passes_through() {
        let painted = paint("text", CYAN);
        if colors_enabled() {
            assert_eq!(painted, "\x1b[36mtext\x1b[0m");
        } else {
            assert_eq!(painted, "text");
        }
    }

    #[test]
    fn test_status_mark_words() {
        assert!(status_mark(true).contains("valid"));
        assert!(status_mark(false).contains("invalid"));
    }
}
