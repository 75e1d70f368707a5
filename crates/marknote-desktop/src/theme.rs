//! Theme configuration for the desktop app

use std::sync::OnceLock;

/// Cached system dark mode preference (detected once at startup)
static SYSTEM_DARK_MODE: OnceLock<bool> = OnceLock::new();

/// Resolved theme (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

/// Resolve the theme from `MARKNOTE_THEME`, falling back to the system
/// preference
#[must_use]
pub fn resolve_theme() -> ResolvedTheme {
    match std::env::var("MARKNOTE_THEME").ok().as_deref().map(str::trim) {
        Some("dark") => ResolvedTheme::Dark,
        Some("light") => ResolvedTheme::Light,
        _ if is_system_dark_mode() => ResolvedTheme::Dark,
        _ => ResolvedTheme::Light,
    }
}

/// Detect system dark mode preference (cached after first call)
#[must_use]
pub fn is_system_dark_mode() -> bool {
    *SYSTEM_DARK_MODE.get_or_init(detect_system_dark_mode)
}

#[cfg(target_os = "macos")]
fn detect_system_dark_mode() -> bool {
    use std::process::Command;
    match Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout)
            .trim()
            .eq_ignore_ascii_case("dark"),
        Err(e) => {
            tracing::warn!("Failed to detect system theme: {}. Using light mode.", e);
            false
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn detect_system_dark_mode() -> bool {
    std::env::var("GTK_THEME").is_ok_and(|theme| theme.to_lowercase().contains("dark"))
}

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_selected: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub danger: &'static str,
}

/// Light theme colors
pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f6f7f9",
    bg_selected: "#e3e5f4",
    text_primary: "#1f2328",
    text_secondary: "#57606a",
    text_muted: "#8c959f",
    border: "#d0d7de",
    accent: "#4a4e74",
    accent_text: "#ffffff",
    danger: "#cf222e",
};

/// Dark theme colors
pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#16181d",
    bg_secondary: "#1f2229",
    bg_selected: "#3b3f63",
    text_primary: "#e6edf3",
    text_secondary: "#9da7b3",
    text_muted: "#6e7681",
    border: "#30363d",
    accent: "#8b8fd6",
    accent_text: "#16181d",
    danger: "#f85149",
};

impl ResolvedTheme {
    /// Get the color palette for this theme
    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }

    pub const fn as_attr(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}
