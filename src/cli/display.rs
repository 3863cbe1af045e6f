// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal rendering for the crumbtree CLI.
//!
//! OneDark on dark terminals, One Light on light ones. Detection tries
//! `CRUMBTREE_THEME` first, then `COLORFGBG`, then falls back to dark.
//! `NO_COLOR` and non-TTY stdout turn colors off entirely, so piping the output
//! into another tool gives plain text.
//!
//! Result trees print like `tree(1)`:
//!
//! ```text
//! Docs                          /docs
//! ├── Routing                   /docs/routing
//! │   └── Load functions ●      /docs/routing#load
//! │       load data before a page renders
//! └── Migrating ●               /docs/migrating  rank 3
//! ```
//!
//! `●` marks nodes that matched the query; the rest are grouping nodes.

use crumbtree::{Block, TreeNode};
use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 72;

/// Longest content excerpt printed under a matched node.
const EXCERPT_CHARS: usize = 72;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();
static COLORS: OnceLock<bool> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("CRUMBTREE_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // COLORFGBG is "fg;bg"; background 7 and up (except 8) is a light terminal
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

/// Colors only for a TTY, and never when `NO_COLOR` is set.
pub fn use_colors() -> bool {
    *COLORS.get_or_init(|| {
        std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(CYAN);
theme_color!(GRAY);

/// Apply a theme color plus modifiers, or nothing when colors are off.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, ignoring ANSI escapes.
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

fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        format!("{} ", s)
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// First `max` characters of `text` on one line, with an ellipsis if cut.
pub fn excerpt(text: &str, max: usize) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

// ═══════════════════════════════════════════════════════════════════════════
// BOXES
// ═══════════════════════════════════════════════════════════════════════════

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) -> String {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    format!("{}┌{}{}{}{}┐{}", border, reset, label_part, border, "─".repeat(remaining), reset)
}

/// │ content          │
pub fn row(content: &str) -> String {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    format!("{}│{}{}{}{}│{}", border, reset, content, " ".repeat(pad), border, reset)
}

/// └──────────────────┘
pub fn section_bot() -> String {
    let border = if use_colors() { GRAY() } else { String::new() };
    let reset = if use_colors() { RESET } else { "" };
    format!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), reset)
}

// ═══════════════════════════════════════════════════════════════════════════
// RESULTS
// ═══════════════════════════════════════════════════════════════════════════

/// Render a result forest with tree glyphs, one node per line.
pub fn render_forest(forest: &[TreeNode]) -> String {
    let mut out = String::new();
    for root in forest {
        render_node(&mut out, root, "", None);
    }
    out
}

fn render_node(out: &mut String, node: &TreeNode, indent: &str, last: Option<bool>) {
    let (branch, child_indent) = match last {
        None => (String::new(), String::new()),
        Some(true) => (format!("{}└── ", indent), format!("{}    ", indent)),
        Some(false) => (format!("{}├── ", indent), format!("{}│   ", indent)),
    };

    let mut label = if node.node.is_some() {
        format!("{} {}", themed(BLUE, &[BOLD], node.label()), themed(GREEN, &[], "●"))
    } else {
        node.label().to_string()
    };
    label = format!("{}{}", themed(GRAY, &[], &branch), label);

    let mut line = pad_right(&label, 40);
    if let Some(href) = &node.href {
        line.push_str(&themed(CYAN, &[], href));
    }
    if let Some(rank) = node.node.as_ref().and_then(|block| block.rank) {
        let _ = write!(line, "  {}", themed(YELLOW, &[], &format!("rank {}", rank)));
    }
    out.push_str(line.trim_end());
    out.push('\n');

    if let Some(block) = &node.node {
        if !block.content.is_empty() {
            let guide = if last.is_none() { String::new() } else { child_indent.clone() };
            let _ = writeln!(
                out,
                "{}{}",
                themed(GRAY, &[], &format!("{}    ", guide)),
                themed(GRAY, &[DIM], &excerpt(&block.content, EXCERPT_CHARS))
            );
        }
    }

    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(out, child, &child_indent, Some(i + 1 == count));
    }
}

/// Render the flat ranked list.
pub fn render_flat(blocks: &[Arc<Block>]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        let path = block.breadcrumbs.join(" › ");
        let mut line = format!(
            "{:>3}. {}",
            i + 1,
            pad_right(&themed(BLUE, &[BOLD], &path), 48)
        );
        line.push_str(&themed(CYAN, &[], &block.href));
        if let Some(rank) = block.rank {
            let _ = write!(line, "  {}", themed(YELLOW, &[], &format!("rank {}", rank)));
        }
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Recent searches, one per line. Empty when there are none.
pub fn render_recents(recents: &[String]) -> String {
    let mut out = String::new();
    for query in recents {
        let _ = writeln!(out, "{}", themed(GRAY, &[], query));
    }
    out
}

/// One-line footer: hit count and elapsed time.
pub fn summary(matches: usize, roots: usize, elapsed: std::time::Duration) -> String {
    let micros = elapsed.as_micros();
    let time = if micros < 1_000 {
        format!("{}µs", micros)
    } else {
        format!("{:.2}ms", micros as f64 / 1_000.0)
    };
    themed(
        GRAY,
        &[],
        &format!("{} matches in {} sections ({})", matches, roots, time),
    )
}
