//! Color and emoji formatting for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";

    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Apply color to text if terminal supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Bold cyan label, used for "key: value" lines
pub fn label(text: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}{}", Colors::BOLD, Colors::BRIGHT_CYAN, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Emoji when the terminal can render it, plain fallback otherwise
pub fn emoji_or<'a>(emoji: &'a str, fallback: &'a str) -> &'a str {
    if supports_formatting() { emoji } else { fallback }
}

/// Terminal capability detection
pub fn supports_formatting() -> bool {
    use std::env;
    use std::io::IsTerminal;

    if env::var("NO_COLOR").is_ok() || env::var("FORCE_COLOR").as_deref() == Ok("0") {
        return false;
    }

    if env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // Disable formatting when running tests
    if cfg!(test) || env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" || term.is_empty() {
            return false;
        }

        if term.contains("color")
            || term.contains("256")
            || term.starts_with("xterm")
            || term.starts_with("screen")
            || term.starts_with("tmux")
            || term == "linux"
        {
            return true;
        }
    }

    if let Ok(term_program) = env::var("TERM_PROGRAM") {
        match term_program.as_str() {
            "Apple_Terminal" | "iTerm.app" | "vscode" | "Hyper" | "Alacritty" | "kitty"
            | "WezTerm" => return true,
            _ => {}
        }
    }

    false
}
