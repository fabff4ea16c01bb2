//! Cosmetic style of the registered decoration type.
//!
//! Field names serialize in camelCase so clients can hand the style to
//! their editor's decoration API unchanged.

use serde::{Deserialize, Serialize};

/// Where the decoration is marked in the overview ruler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverviewRulerLane {
    Left,
    Center,
    #[default]
    Right,
    Full,
}

/// Style properties that vary per color theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemableStyle {
    pub border_color: String,
}

/// Decoration style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecorationStyle {
    pub border_width: String,
    pub border_style: String,
    pub overview_ruler_color: String,
    pub overview_ruler_lane: OverviewRulerLane,
    /// Used in light color themes.
    pub light: ThemableStyle,
    /// Used in dark color themes.
    pub dark: ThemableStyle,
    pub text_decoration: String,
}

impl Default for DecorationStyle {
    fn default() -> Self {
        Self {
            border_width: "1px".to_string(),
            border_style: "solid".to_string(),
            overview_ruler_color: "blue".to_string(),
            overview_ruler_lane: OverviewRulerLane::Right,
            light: ThemableStyle {
                border_color: "darkblue".to_string(),
            },
            dark: ThemableStyle {
                border_color: "lightblue".to_string(),
            },
            text_decoration: "double underline overline".to_string(),
        }
    }
}
