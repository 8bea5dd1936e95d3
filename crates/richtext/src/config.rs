//! YAML configuration for rendering options and themes.
//!
//! ```yaml
//! render:
//!   width: 72
//!   renumber_ordered: true
//! theme:
//!   bold: { fg: yellow, modifiers: [bold] }
//!   quote: { fg: "#808080", modifiers: [italic] }
//! ```
//!
//! Every field is optional. Theme entries that are left out keep the default theme's style.

use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use richtext_core::theme::Theme;
use richtext_markup::document::FormatRenderOptions;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let config: Config = if s.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(s)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be rendered.
    pub fn validate(&self) -> Result<()> {
        if self.render.width == 0 {
            return Err(Error::InvalidValue {
                field: "render.width".to_string(),
                reason: "width must be greater than 0".to_string(),
            });
        }
        for (field, value) in [
            ("render.quote_prefix", &self.render.quote_prefix),
            ("render.bullet", &self.render.bullet),
        ] {
            if value.contains(['\n', '\r']) {
                return Err(Error::InvalidValue {
                    field: field.to_string(),
                    reason: "must be a single line".to_string(),
                });
            }
        }
        self.theme.to_theme().map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Width used when the output is not a terminal.
    #[serde(default = "default_width")]
    pub width: u16,
    #[serde(default = "default_true")]
    pub wrap: bool,
    #[serde(default = "default_quote_prefix")]
    pub quote_prefix: String,
    #[serde(default = "default_bullet")]
    pub bullet: String,
    #[serde(default)]
    pub renumber_ordered: bool,
}

fn default_width() -> u16 {
    80
}

fn default_true() -> bool {
    true
}

fn default_quote_prefix() -> String {
    FormatRenderOptions::default().quote_prefix
}

fn default_bullet() -> String {
    FormatRenderOptions::default().bullet
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            wrap: default_true(),
            quote_prefix: default_quote_prefix(),
            bullet: default_bullet(),
            renumber_ordered: false,
        }
    }
}

impl RenderConfig {
    pub fn to_options(&self) -> FormatRenderOptions {
        FormatRenderOptions {
            wrap: self.wrap,
            quote_prefix: self.quote_prefix.clone(),
            bullet: self.bullet.clone(),
            renumber_ordered: self.renumber_ordered,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Start from [`Theme::monochrome`] instead of [`Theme::default`].
    #[serde(default)]
    pub monochrome: bool,
    #[serde(default)]
    pub text: Option<StyleConfig>,
    #[serde(default)]
    pub muted: Option<StyleConfig>,
    #[serde(default)]
    pub accent: Option<StyleConfig>,
    #[serde(default)]
    pub bold: Option<StyleConfig>,
    #[serde(default)]
    pub italic: Option<StyleConfig>,
    #[serde(default)]
    pub underline: Option<StyleConfig>,
    #[serde(default)]
    pub quote: Option<StyleConfig>,
    #[serde(default)]
    pub quote_marker: Option<StyleConfig>,
    #[serde(default)]
    pub list_marker: Option<StyleConfig>,
    #[serde(default)]
    pub selection: Option<StyleConfig>,
}

impl ThemeConfig {
    pub fn to_theme(&self) -> Result<Theme> {
        let mut theme = if self.monochrome {
            Theme::monochrome()
        } else {
            Theme::default()
        };
        let slots: [(&str, &Option<StyleConfig>, &mut Style); 10] = [
            ("theme.text", &self.text, &mut theme.text_primary),
            ("theme.muted", &self.muted, &mut theme.text_muted),
            ("theme.accent", &self.accent, &mut theme.accent),
            ("theme.bold", &self.bold, &mut theme.bold),
            ("theme.italic", &self.italic, &mut theme.italic),
            ("theme.underline", &self.underline, &mut theme.underline),
            ("theme.quote", &self.quote, &mut theme.quote),
            ("theme.quote_marker", &self.quote_marker, &mut theme.quote_marker),
            ("theme.list_marker", &self.list_marker, &mut theme.list_marker),
            ("theme.selection", &self.selection, &mut theme.selection),
        ];
        for (field, config, slot) in slots {
            if let Some(config) = config {
                *slot = config.to_style(field)?;
            }
        }
        Ok(theme)
    }
}

/// A style written as color names and modifier names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub fg: Option<String>,
    #[serde(default)]
    pub bg: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl StyleConfig {
    /// `field` names the entry in error messages.
    pub fn to_style(&self, field: &str) -> Result<Style> {
        let mut style = Style::default();
        if let Some(fg) = &self.fg {
            style = style.fg(parse_color(field, fg)?);
        }
        if let Some(bg) = &self.bg {
            style = style.bg(parse_color(field, bg)?);
        }
        for name in &self.modifiers {
            style = style.add_modifier(parse_modifier(field, name)?);
        }
        Ok(style)
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color> {
    Color::from_str(value).map_err(|_| Error::InvalidColor {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_modifier(field: &str, value: &str) -> Result<Modifier> {
    let modifier = match value.to_lowercase().replace('-', "_").as_str() {
        "bold" => Modifier::BOLD,
        "dim" => Modifier::DIM,
        "italic" => Modifier::ITALIC,
        "underline" | "underlined" => Modifier::UNDERLINED,
        "slow_blink" => Modifier::SLOW_BLINK,
        "rapid_blink" => Modifier::RAPID_BLINK,
        "reversed" | "reverse" => Modifier::REVERSED,
        "hidden" => Modifier::HIDDEN,
        "crossed_out" | "strikethrough" => Modifier::CROSSED_OUT,
        _ => {
            return Err(Error::InvalidModifier {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
    };
    Ok(modifier)
}
