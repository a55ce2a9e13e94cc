use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_muted: String,
    pub accent: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub selected: String,
    pub correct: String,
    pub correct_bg: String,
    pub incorrect: String,
    pub incorrect_bg: String,
    pub completed: String,
    pub locked: String,
    pub hearts: String,
    pub xp: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // User themes shadow bundled ones of the same name.
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("lingo")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort();
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("lingo-dark").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#131f24".to_string(),
            fg: "#f1f7fb".to_string(),
            text_muted: "#52656d".to_string(),
            accent: "#58cc02".to_string(),
            border: "#37464f".to_string(),
            border_focused: "#1cb0f6".to_string(),
            header_bg: "#202f36".to_string(),
            header_fg: "#f1f7fb".to_string(),
            bar_filled: "#58cc02".to_string(),
            bar_empty: "#37464f".to_string(),
            selected: "#1cb0f6".to_string(),
            correct: "#58a700".to_string(),
            correct_bg: "#1f3b12".to_string(),
            incorrect: "#ff4b4b".to_string(),
            incorrect_bg: "#3f1d20".to_string(),
            completed: "#ffc800".to_string(),
            locked: "#52656d".to_string(),
            hearts: "#ff4b4b".to_string(),
            xp: "#ffc800".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_muted(&self) -> Color { Self::parse_color(&self.text_muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn selected(&self) -> Color { Self::parse_color(&self.selected) }
    pub fn correct(&self) -> Color { Self::parse_color(&self.correct) }
    pub fn correct_bg(&self) -> Color { Self::parse_color(&self.correct_bg) }
    pub fn incorrect(&self) -> Color { Self::parse_color(&self.incorrect) }
    pub fn incorrect_bg(&self) -> Color { Self::parse_color(&self.incorrect_bg) }
    pub fn completed(&self) -> Color { Self::parse_color(&self.completed) }
    pub fn locked(&self) -> Color { Self::parse_color(&self.locked) }
    pub fn hearts(&self) -> Color { Self::parse_color(&self.hearts) }
    pub fn xp(&self) -> Color { Self::parse_color(&self.xp) }
}
