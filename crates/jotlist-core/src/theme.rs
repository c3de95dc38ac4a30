#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Anything other than the literal `"dark"` (including a missing value)
    /// resolves to light.
    pub fn from_storage(stored: Option<&str>) -> Self {
        match stored {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn storage_value(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn as_class(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Light => "Dark mode",
            Self::Dark => "Light mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_or_unknown_preference_is_light() {
        assert_eq!(ThemeMode::from_storage(None), ThemeMode::Light);
        assert_eq!(ThemeMode::from_storage(Some("night")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_storage(Some("DARK")), ThemeMode::Light);
    }

    #[test]
    fn storage_value_round_trips_through_from_storage() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_storage(Some(mode.storage_value())), mode);
        }
    }

    #[test]
    fn next_flips_between_modes() {
        assert_eq!(ThemeMode::Light.next(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.next(), ThemeMode::Light);
        assert!(ThemeMode::Dark.is_dark());
        assert!(!ThemeMode::Light.is_dark());
    }
}
