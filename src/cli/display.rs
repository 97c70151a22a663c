// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the indexsearch CLI.
//!
//! Plain text when stdout is not a terminal or `NO_COLOR` is set, so piped
//! output is stable. On a terminal, field names and counts get OneDark or
//! One Light colors. The theme comes from `INDEXSEARCH_THEME` ("dark" or
//! "light"), then `COLORFGBG`, then defaults to dark.

use std::sync::OnceLock;
use std::time::Duration;

use indexsearch::index::StoredDocument;

// ═══════════════════════════════════════════════════════════════════════════
// THEME
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("INDEXSEARCH_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg": 7 and up, except 8, is a light background
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

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// (dark, light) pairs
const BLUE: [(u8, u8, u8); 2] = [(97, 175, 239), (64, 120, 242)];
const GREEN: [(u8, u8, u8); 2] = [(152, 195, 121), (80, 161, 79)];
const GRAY: [(u8, u8, u8); 2] = [(92, 99, 112), (160, 161, 167)];

fn rgb(palette: [(u8, u8, u8); 2]) -> String {
    let (r, g, b) = match theme() {
        Theme::Dark => palette[0],
        Theme::Light => palette[1],
    };
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMATTING
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

fn paint(enabled: bool, style: &str, text: &str) -> String {
    if enabled {
        format!("{}{}{}", style, text, RESET)
    } else {
        text.to_string()
    }
}

/// Milliseconds with microsecond precision.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.3} milliseconds", elapsed.as_secs_f64() * 1000.0)
}

pub fn summary_line(total: u64, elapsed: Duration, query: &str) -> String {
    summary_line_styled(use_colors(), total, elapsed, query)
}

fn summary_line_styled(colors: bool, total: u64, elapsed: Duration, query: &str) -> String {
    format!(
        "Found {} documents in {} that matched query '{}'",
        paint(colors, &format!("{}{}", BOLD, rgb(GREEN)), &total.to_string()),
        paint(colors, &rgb(GRAY), &format_elapsed(elapsed)),
        query
    )
}

/// `Document<name:value name:value>` with fields in name order.
pub fn document_line(document: &StoredDocument) -> String {
    document_line_styled(use_colors(), document)
}

fn document_line_styled(colors: bool, document: &StoredDocument) -> String {
    let fields: Vec<String> = document
        .iter()
        .map(|(name, value)| format!("{}:{}", paint(colors, &rgb(BLUE), name), value))
        .collect();
    format!("Document<{}>", fields.join(" "))
}
