//! Light/dark palettes
//!
//! The page owns the theme (a `data-theme` attribute on the document root);
//! the game only reads it each frame to pick colors.

/// Page color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Anything but an explicit "light" is the dark default
    pub fn from_attr(attr: Option<&str>) -> Self {
        match attr {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

/// Every color the renderer uses
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub grid: &'static str,
    pub watermark: &'static str,
    pub watermark_alpha: f64,
    pub guide: &'static str,
    pub flame: &'static str,
    pub body: &'static str,
    pub window: &'static str,
    pub rock_fill: &'static str,
    pub rock_edge: &'static str,
    pub rock_highlight: &'static str,
    pub ring_outer: &'static str,
    pub ring_inner: &'static str,
    pub spike_glow: &'static str,
    pub spike: &'static str,
    /// "r,g,b" for the hit flash (alpha added per frame)
    pub flash_hit_rgb: &'static str,
    /// "r,g,b" for the near-miss flash
    pub flash_near_rgb: &'static str,
    pub hud: &'static str,
    pub banner_alpha: f64,
    pub prompt_alpha: f64,
}

pub const LIGHT: Palette = Palette {
    grid: "rgba(20,33,43,0.16)",
    watermark: "rgba(20,33,43,0.65)",
    watermark_alpha: 0.30,
    guide: "rgba(196,167,117,0.95)",
    flame: "rgba(196,167,117,0.9)",
    body: "#14212B",
    window: "#EEF3F8",
    rock_fill: "#C4A775",
    rock_edge: "rgba(20,33,43,0.6)",
    rock_highlight: "rgba(238,243,248,0.7)",
    ring_outer: "rgba(196,167,117,0.9)",
    ring_inner: "rgba(20,33,43,0.5)",
    spike_glow: "rgba(255,120,80,0.26)",
    spike: "#14212B",
    flash_hit_rgb: "255,255,255",
    flash_near_rgb: "196,167,117",
    hud: "rgba(20,33,43,0.7)",
    banner_alpha: 0.85,
    prompt_alpha: 0.75,
};

pub const DARK: Palette = Palette {
    grid: "rgba(255,255,255,0.14)",
    watermark: "rgba(255,255,255,0.55)",
    watermark_alpha: 0.22,
    guide: "rgba(214,193,158,0.9)",
    flame: "rgba(214,193,158,0.8)",
    body: "#FFFFFF",
    window: "#14212B",
    rock_fill: "#D6C19E",
    rock_edge: "rgba(0,0,0,0.55)",
    rock_highlight: "rgba(255,255,255,0.6)",
    ring_outer: "rgba(214,193,158,0.9)",
    ring_inner: "rgba(0,0,0,0.55)",
    spike_glow: "rgba(255,80,40,0.32)",
    spike: "#000000",
    flash_hit_rgb: "255,255,255",
    flash_near_rgb: "214,193,158",
    hud: "rgba(255,255,255,0.82)",
    banner_alpha: 0.9,
    prompt_alpha: 0.8,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_attr() {
        assert_eq!(Theme::from_attr(Some("light")), Theme::Light);
        assert_eq!(Theme::from_attr(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_attr(None), Theme::Dark);
        assert_eq!(Theme::Light.palette().body, "#14212B");
    }
}
