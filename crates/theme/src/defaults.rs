//! Built-in design tokens
//!
//! Apple-style palette, 8-point spacing grid and SF type scale used by the
//! print job pages.

use indexmap::IndexMap;

use crate::tokens::{ColorToken, FontSize, Theme};

// ============================================================================
// TOKEN TABLES
// ============================================================================

const APPLE_BLUE: &[(&str, &str)] = &[
    ("50", "#eff6ff"),
    ("100", "#dbeafe"),
    ("200", "#bfdbfe"),
    ("300", "#93c5fd"),
    ("400", "#60a5fa"),
    ("500", "#3b82f6"),
    ("600", "#007AFF"),
    ("700", "#1d4ed8"),
    ("800", "#1e40af"),
    ("900", "#1e3a8a"),
];

const APPLE_RED: &[(&str, &str)] = &[
    ("50", "#fef2f2"),
    ("100", "#fee2e2"),
    ("200", "#fecaca"),
    ("300", "#fca5a5"),
    ("400", "#f87171"),
    ("500", "#ef4444"),
    ("600", "#FF3B30"),
    ("700", "#dc2626"),
    ("800", "#b91c1c"),
    ("900", "#991b1b"),
];

const APPLE_GREEN: &[(&str, &str)] = &[
    ("50", "#f0fdf4"),
    ("100", "#dcfce7"),
    ("200", "#bbf7d0"),
    ("300", "#86efac"),
    ("400", "#4ade80"),
    ("500", "#22c55e"),
    ("600", "#34C759"),
    ("700", "#15803d"),
    ("800", "#166534"),
    ("900", "#14532d"),
];

const APPLE_GRAY: &[(&str, &str)] = &[
    ("50", "#f9fafb"),
    ("100", "#f3f4f6"),
    ("200", "#e5e7eb"),
    ("300", "#d1d5db"),
    ("400", "#9ca3af"),
    ("500", "#6b7280"),
    ("600", "#4b5563"),
    ("700", "#374151"),
    ("800", "#1f2937"),
    ("900", "#111827"),
];

const SYSTEM_COLORS: &[(&str, &str)] = &[
    ("system-blue", "#007AFF"),
    ("system-red", "#FF3B30"),
    ("system-green", "#34C759"),
    ("system-orange", "#FF9500"),
    ("system-yellow", "#FFCC00"),
];

const SPACING: &[(&str, &str)] = &[
    ("0.5", "2px"),
    ("1", "4px"),
    ("1.5", "6px"),
    ("2", "8px"),
    ("3", "12px"),
    ("4", "16px"),
    ("5", "20px"),
    ("6", "24px"),
    ("8", "32px"),
    ("10", "40px"),
    ("12", "48px"),
    ("16", "64px"),
    ("20", "80px"),
    ("24", "96px"),
    // minimum touch target
    ("touch", "44px"),
    ("touch-lg", "48px"),
];

const RADIUS: &[(&str, &str)] = &[
    ("apple", "8px"),
    ("apple-lg", "12px"),
    ("apple-xl", "16px"),
    ("apple-2xl", "20px"),
];

const SHADOW: &[(&str, &str)] = &[
    ("apple-sm", "0 1px 2px 0 rgba(0, 0, 0, 0.05)"),
    (
        "apple",
        "0 1px 3px 0 rgba(0, 0, 0, 0.1), 0 1px 2px 0 rgba(0, 0, 0, 0.06)",
    ),
    (
        "apple-md",
        "0 4px 6px -1px rgba(0, 0, 0, 0.1), 0 2px 4px -1px rgba(0, 0, 0, 0.06)",
    ),
    (
        "apple-lg",
        "0 10px 15px -3px rgba(0, 0, 0, 0.1), 0 4px 6px -2px rgba(0, 0, 0, 0.05)",
    ),
    (
        "apple-xl",
        "0 20px 25px -5px rgba(0, 0, 0, 0.1), 0 10px 10px -5px rgba(0, 0, 0, 0.04)",
    ),
    ("apple-2xl", "0 25px 50px -12px rgba(0, 0, 0, 0.25)"),
    ("glass", "0 8px 32px 0 rgba(31, 38, 135, 0.37)"),
    ("glass-lg", "0 8px 32px 0 rgba(31, 38, 135, 0.5)"),
];

const FONT_SANS: &[&str] = &[
    "SF Pro Text",
    "SF Pro Display",
    "-apple-system",
    "BlinkMacSystemFont",
    "system-ui",
    "Segoe UI",
    "Roboto",
    "Helvetica Neue",
    "Arial",
    "sans-serif",
];

const FONT_MONO: &[&str] = &[
    "SF Mono",
    "Monaco",
    "Inconsolata",
    "Roboto Mono",
    "source-code-pro",
    "Menlo",
    "monospace",
];

/// (name, size, line height, weight)
const FONT_SIZE: &[(&str, &str, &str, &str)] = &[
    ("apple-caption2", "11px", "13px", "400"),
    ("apple-caption1", "12px", "16px", "400"),
    ("apple-footnote", "13px", "18px", "400"),
    ("apple-subheadline", "15px", "20px", "400"),
    ("apple-callout", "16px", "21px", "400"),
    ("apple-body", "17px", "22px", "400"),
    ("apple-headline", "17px", "22px", "600"),
    ("apple-title3", "20px", "25px", "400"),
    ("apple-title2", "22px", "28px", "400"),
    ("apple-title1", "28px", "34px", "400"),
    ("apple-large-title", "34px", "41px", "400"),
];

const BLUR: &[(&str, &str)] = &[
    ("apple", "10px"),
    ("apple-md", "16px"),
    ("apple-lg", "24px"),
];

const EASING: &[(&str, &str)] = &[
    ("apple", "cubic-bezier(0.25, 0.1, 0.25, 1)"),
    ("apple-spring", "cubic-bezier(0.175, 0.885, 0.32, 1.275)"),
];

const DURATION: &[(&str, &str)] = &[
    ("apple-fast", "150ms"),
    ("apple-normal", "200ms"),
    ("apple-slow", "300ms"),
];

/// Semantic variables the component stylesheets read from `:root`.
const ALIASES: &[(&str, &str)] = &[
    ("color-primary", "colors.system-blue"),
    ("color-danger", "colors.system-red"),
    ("color-success", "colors.system-green"),
    ("color-warning", "colors.system-orange"),
    ("spacing-xs", "spacing.1"),
    ("spacing-sm", "spacing.2"),
    ("spacing-md", "spacing.4"),
    ("spacing-lg", "spacing.6"),
    ("spacing-xl", "spacing.8"),
    ("radius-sm", "radius.apple"),
    ("radius-md", "radius.apple-lg"),
    ("radius-lg", "radius.apple-xl"),
];

// ============================================================================
// ASSEMBLY
// ============================================================================

fn table(entries: &[(&str, &str)]) -> IndexMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

fn stack(fonts: &[&str]) -> Vec<String> {
    fonts.iter().map(|f| (*f).to_owned()).collect()
}

impl Default for Theme {
    fn default() -> Self {
        let mut colors = IndexMap::new();
        colors.insert("apple-blue".to_owned(), ColorToken::Palette(table(APPLE_BLUE)));
        colors.insert("apple-red".to_owned(), ColorToken::Palette(table(APPLE_RED)));
        colors.insert("apple-green".to_owned(), ColorToken::Palette(table(APPLE_GREEN)));
        colors.insert("apple-gray".to_owned(), ColorToken::Palette(table(APPLE_GRAY)));
        colors.insert(
            "apple-orange".to_owned(),
            ColorToken::Palette(table(&[("600", "#FF9500")])),
        );
        for (name, value) in SYSTEM_COLORS {
            colors.insert((*name).to_owned(), ColorToken::Single((*value).to_owned()));
        }

        let font_family = [("sans", stack(FONT_SANS)), ("mono", stack(FONT_MONO))]
            .into_iter()
            .map(|(name, fonts)| (name.to_owned(), fonts))
            .collect();

        let font_size = FONT_SIZE
            .iter()
            .map(|(name, size, line_height, weight)| {
                ((*name).to_owned(), FontSize::new(*size, *line_height, *weight))
            })
            .collect();

        Self {
            colors,
            spacing: table(SPACING),
            radius: table(RADIUS),
            shadow: table(SHADOW),
            font_family,
            font_size,
            blur: table(BLUR),
            easing: table(EASING),
            duration: table(DURATION),
            aliases: table(ALIASES),
        }
    }
}

impl Theme {
    /// A theme with no tokens at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            colors: IndexMap::new(),
            spacing: IndexMap::new(),
            radius: IndexMap::new(),
            shadow: IndexMap::new(),
            font_family: IndexMap::new(),
            font_size: IndexMap::new(),
            blur: IndexMap::new(),
            easing: IndexMap::new(),
            duration: IndexMap::new(),
            aliases: IndexMap::new(),
        }
    }
}
