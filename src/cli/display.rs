// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the skillsearch CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. The theme comes
//! from `SKILLSEARCH_THEME` if set, then `COLORFGBG`, then defaults to dark.
//! Colors are dropped entirely for non-TTY output and when `NO_COLOR` is set,
//! so piping into a file gives plain text.

use std::sync::OnceLock;

use skillsearch::{SkillSource, SkillType};

/// Width between the box borders.
pub const BOX_WIDTH: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SKILLSEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", where bg 7 and up (except 8) is a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(Ok(bg)) = colorfgbg.split(';').next_back().map(str::parse::<u8>) {
            if bg >= 7 && bg != 8 {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

type Rgb = (u8, u8, u8);

/// A palette entry: (dark, light).
#[derive(Debug, Clone, Copy)]
pub struct Color(Rgb, Rgb);

pub const GREEN: Color = Color((152, 195, 121), (80, 161, 79));
pub const YELLOW: Color = Color((229, 192, 123), (193, 132, 1));
pub const BLUE: Color = Color((97, 175, 239), (64, 120, 242));
pub const MAGENTA: Color = Color((198, 120, 221), (166, 38, 164));
pub const CYAN: Color = Color((86, 182, 194), (1, 132, 188));
pub const GRAY: Color = Color((92, 99, 112), (160, 161, 167));
pub const BRIGHT_GREEN: Color = Color((166, 226, 46), (68, 140, 39));
pub const BRIGHT_CYAN: Color = Color((102, 217, 239), (1, 112, 158));

impl Color {
    fn escape(self) -> String {
        let (r, g, b) = match theme() {
            Theme::Dark => self.0,
            Theme::Light => self.1,
        };
        format!("\x1b[38;2;{};{};{}m", r, g, b)
    }
}

/// Colors only on a TTY, and never with `NO_COLOR`.
pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Color plus optional modifiers, or plain text when colors are off.
pub fn themed(color: Color, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color.escape(), text, RESET)
    } else {
        text.to_string()
    }
}

fn border(text: &str) -> String {
    themed(GRAY, &[], text)
}

/// Visible length, skipping ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// `┌─ LABEL ─────┐`
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("{}{}{}", border("┌"), label_part, border(&format!("{}┐", "─".repeat(remaining))));
}

/// `│ content     │`
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// `│ key         value │`
pub fn field(key: &str, value: &str) {
    row(&format!("{:<18}{}", themed(GRAY, &[], key), value));
}

/// `└─────────────┘`
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

pub fn title(text: &str) -> String {
    themed(BRIGHT_CYAN, &[BOLD], text)
}

/// Dimmed text for secondary information.
pub fn muted(text: &str) -> String {
    themed(GRAY, &[], text)
}

pub fn type_badge(skill_type: SkillType) -> String {
    let color = match skill_type {
        SkillType::Discipline => return String::new(),
        SkillType::Reference => BLUE,
        SkillType::Diagnostic => YELLOW,
        SkillType::Router => GRAY,
        SkillType::Meta => MAGENTA,
    };
    themed(color, &[], &format!("[{}]", skill_type))
}

pub fn source_badge(source: SkillSource) -> String {
    match source {
        SkillSource::Apple => themed(CYAN, &[], "[Apple]"),
        SkillSource::Axiom => String::new(),
    }
}

/// Score, brighter for stronger matches.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>7.2}", score);
    let color = if score >= 10.0 {
        BRIGHT_GREEN
    } else if score >= 5.0 {
        GREEN
    } else if score >= 1.0 {
        YELLOW
    } else {
        GRAY
    };
    themed(color, &[], &text)
}

/// OK / FAIL marker.
pub fn status(ok: bool) -> String {
    if ok {
        themed(GREEN, &[BOLD], "ok")
    } else {
        themed(YELLOW, &[BOLD], "rebuild needed")
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
