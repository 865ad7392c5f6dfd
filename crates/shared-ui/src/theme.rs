use dioxus::prelude::*;

/// Light or dark palette, applied as `data-theme` on `<html>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Parse a stored key, falling back to light.
    pub fn from_key(s: &str) -> Self {
        match s {
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label for the sidebar button that switches away from this mode.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            ThemeMode::Light => "Dark mode",
            ThemeMode::Dark => "Light mode",
        }
    }
}

/// Shared theme state provided as context by the app shell.
#[derive(Clone, Copy)]
pub struct ThemeState {
    pub is_dark: Signal<bool>,
}

impl ThemeState {
    pub fn mode(&self) -> ThemeMode {
        ThemeMode::from_dark(*self.is_dark.read())
    }

    /// Flip the mode and push it to the document.
    pub fn toggle(&mut self) {
        let next = self.mode().toggled();
        self.is_dark.set(next == ThemeMode::Dark);
        set_theme(next);
    }
}

/// Seed the theme on application startup from the persisted cookie.
///
/// Call this once in the top-level App component.
#[component]
pub fn ThemeSeed() -> Element {
    use_effect(|| {
        document::eval(
            r#"
            (function() {
                var match = document.cookie.match(/(?:^|;\s*)theme=([^;]*)/);
                var theme = match ? match[1] : 'light';
                document.documentElement.setAttribute('data-theme', theme);
            })();
            "#,
        );
    });

    rsx! {}
}

/// Persist the mode to a cookie and update the document.
pub fn set_theme(mode: ThemeMode) {
    let theme = mode.as_str();
    document::eval(&format!(
        r#"
        (function() {{
            document.cookie = 'theme={theme};path=/;max-age=2592000;SameSite=Lax';
            document.documentElement.setAttribute('data-theme', '{theme}');
        }})();
        "#,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_light() {
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }

    #[test]
    fn keys_round_trip_and_unknown_falls_back() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_key(mode.as_str()), mode);
        }
        assert_eq!(ThemeMode::from_key("cyberpunk"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_key(""), ThemeMode::Light);
    }

    #[test]
    fn toggling_flips_mode() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_dark(true), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.toggle_label(), "Dark mode");
    }
}
