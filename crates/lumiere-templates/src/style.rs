use serde::Serialize;

use crate::theme::Theme;

/// Number of placeholder tiles shown in place of an empty gallery.
const PLACEHOLDER_TILES: usize = 4;

/// Per-record presentation overrides.
#[derive(Clone, Copy, Debug, Default)]
pub struct StyleOverrides<'a> {
    pub primary_color: Option<&'a str>,
    pub text_color: Option<&'a str>,
    pub font_style: Option<&'a str>,
    pub is_dark: Option<bool>,
}

/// A resolved theme with the record's overrides applied.
///
/// `theme` is left untouched; the top-level fields are what the page uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStyle {
    pub theme: &'static Theme,
    pub accent: String,
    pub text: String,
    pub is_dark: bool,
    pub font_style: Option<String>,
}

impl PageStyle {
    /// Layer overrides on top of `theme`. Blank override strings are ignored.
    pub fn compose(theme: &'static Theme, overrides: StyleOverrides<'_>) -> Self {
        let present = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        PageStyle {
            theme,
            accent: present(overrides.primary_color).unwrap_or_else(|| theme.accent.to_owned()),
            text: present(overrides.text_color).unwrap_or_else(|| theme.text.to_owned()),
            is_dark: overrides.is_dark.unwrap_or(theme.is_dark),
            font_style: present(overrides.font_style),
        }
    }
}

pub fn placeholder_count(gallery: &[String]) -> usize {
    if gallery.is_empty() {
        PLACEHOLDER_TILES
    } else {
        0
    }
}
