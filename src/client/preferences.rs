use std::collections::HashMap;

const THEME_KEY: &str = "theme";
const PRIMARY_COLOR_KEY: &str = "primaryColor";
pub const DEFAULT_PRIMARY_COLOR: &str = "#f59e0b";

/// Key/value storage that outlives a page load
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(theme: &str) -> Result<Theme, String> {
        match theme {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("{} is not a valid theme", theme)),
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl AsRef<str> for Theme {
    fn as_ref(&self) -> &str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Theme and accent colour of the site, written back to the store on every change
pub struct Preferences<S: PreferenceStore> {
    store: S,
    theme: Theme,
    primary_color: String,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Reads the saved preferences, falling back to the defaults for missing or unknown values.
    pub fn load(store: S) -> Preferences<S> {
        let theme = store
            .get(THEME_KEY)
            .and_then(|theme| Theme::parse(&theme).ok())
            .unwrap_or_default();
        let primary_color = store
            .get(PRIMARY_COLOR_KEY)
            .unwrap_or_else(|| String::from(DEFAULT_PRIMARY_COLOR));

        Preferences {
            store,
            theme,
            primary_color,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn primary_color(&self) -> &str {
        &self.primary_color
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.store.set(THEME_KEY, self.theme.as_ref().to_string());

        self.theme
    }

    pub fn set_primary_color(&mut self, color: impl Into<String>) {
        self.primary_color = color.into();
        self.store.set(PRIMARY_COLOR_KEY, self.primary_color.clone());
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
