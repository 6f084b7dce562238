use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Theme preference selected by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// The concrete appearance a [`ThemeMode`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Light,
    Dark,
}

impl ThemeMode {
    /// Resolves the mode against the OS color-scheme signal.
    pub fn resolve(self, system_prefers_dark: bool) -> Appearance {
        match self {
            ThemeMode::Light => Appearance::Light,
            ThemeMode::Dark => Appearance::Dark,
            ThemeMode::System if system_prefers_dark => Appearance::Dark,
            ThemeMode::System => Appearance::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::System => write!(f, "system"),
        }
    }
}

impl fmt::Display for Appearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Appearance::Light => write!(f, "light"),
            Appearance::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            _ => Err(format!(
                "Invalid theme '{}'. Valid options: light, dark, system",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_display() {
        assert_eq!(format!("{}", ThemeMode::Light), "light");
        assert_eq!(format!("{}", ThemeMode::Dark), "dark");
        assert_eq!(format!("{}", ThemeMode::System), "system");
    }

    #[test]
    fn test_theme_mode_from_str() {
        assert_eq!(ThemeMode::from_str("light").unwrap(), ThemeMode::Light);
        assert_eq!(ThemeMode::from_str("DARK").unwrap(), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_str("System").unwrap(), ThemeMode::System);
        assert!(ThemeMode::from_str("sepia").is_err());
        assert!(ThemeMode::from_str("").is_err());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(ThemeMode::Light.resolve(true), Appearance::Light);
        assert_eq!(ThemeMode::Dark.resolve(false), Appearance::Dark);
        assert_eq!(ThemeMode::System.resolve(true), Appearance::Dark);
        assert_eq!(ThemeMode::System.resolve(false), Appearance::Light);
    }

    #[test]
    fn test_theme_mode_json() {
        assert_eq!(serde_json::to_string(&ThemeMode::Dark).unwrap(), "\"dark\"");
        let parsed: ThemeMode = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(parsed, ThemeMode::System);
    }
}
