//! Message lookup for user-visible toolbar text.
//!
//! Components receive a `Translator` instead of hard-coding strings. The
//! built-in messages are Fluent resources embedded from `assets/i18n/`,
//! one file per locale. A missing message falls back to its key.

use std::collections::BTreeMap;

use {
    anyhow::{Result as AnyhowResult, anyhow},
    fluent_bundle::{FluentBundle, FluentResource},
    rust_embed::RustEmbed,
    sys_locale::get_locale,
    tracing::debug,
    unic_langid::LanguageIdentifier,
};

use crate::error::ErrorReporter;

/// Key of the heading above the view mode toggle.
pub const LAYOUT_KEY: &str = "toggle_fields_menu.layout";
/// Key of the column menu's trigger tooltip.
pub const COLUMNS_KEY: &str = "toggle_fields_menu.columns";
/// Locale used when neither the settings nor the system name a supported one.
pub const DEFAULT_LOCALE: &str = "en";

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Locales;

/// Looks up localized text by message key.
pub trait Translator {
    /// Returns the localized text for `key`, or `key` itself if unknown.
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, key: &str) -> String {
        self(key).unwrap_or_else(|| key.to_string())
    }
}

/// Parses a locale such as `"de"` or `"fr-CA"`.
#[must_use]
pub fn parse_locale(locale: &str) -> Option<LanguageIdentifier> {
    locale.parse().ok()
}

/// Locales with an embedded message resource.
#[must_use]
pub fn available_locales() -> Vec<LanguageIdentifier> {
    Locales::iter()
        .filter_map(|file| file.strip_suffix(".ftl").and_then(parse_locale))
        .collect()
}

/// Picks the locale to translate into.
///
/// The configured locale wins, then the system locale, then
/// `DEFAULT_LOCALE`.
#[must_use]
pub fn resolve_locale(configured: Option<&str>) -> LanguageIdentifier {
    configured
        .and_then(parse_locale)
        .or_else(|| get_locale().as_deref().and_then(parse_locale))
        .unwrap_or_else(default_locale)
}

fn default_locale() -> LanguageIdentifier {
    parse_locale(DEFAULT_LOCALE).unwrap_or_default()
}

/// Best available match for `requested`: the exact locale, else one with
/// the same language.
fn negotiate(
    requested: &LanguageIdentifier,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    available
        .iter()
        .find(|locale| *locale == requested)
        .or_else(|| {
            available
                .iter()
                .find(|locale| locale.language == requested.language)
        })
        .cloned()
}

/// Fluent message catalog for one locale, with plain-text overrides.
///
/// Keys are `message` or `message.attribute`, so `toggle_fields_menu.layout`
/// reads the `layout` attribute of the `toggle_fields_menu` message.
pub struct MessageCatalog {
    /// Locale the bundle was built for.
    locale: LanguageIdentifier,
    /// Loaded Fluent messages.
    bundle: FluentBundle<FluentResource>,
    /// Overrides consulted before the bundle, keyed by message key.
    overrides: BTreeMap<String, String>,
}

impl MessageCatalog {
    /// Creates a catalog for `locale` with no messages.
    #[must_use]
    pub fn new(locale: LanguageIdentifier) -> Self {
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        bundle.set_use_isolating(false);

        Self {
            locale,
            bundle,
            overrides: BTreeMap::new(),
        }
    }

    /// Creates the built-in catalog best matching `requested`.
    ///
    /// Unsupported locales get the `DEFAULT_LOCALE` messages. A resource
    /// that fails to load is reported and leaves the catalog empty.
    #[must_use]
    pub fn builtin(requested: &LanguageIdentifier) -> Self {
        let locale = negotiate(requested, &available_locales()).unwrap_or_else(default_locale);

        let mut catalog = Self::new(locale);
        if let Err(error) = catalog.load_builtin() {
            ErrorReporter::warn(&error, "Loading built-in messages");
        }
        catalog
    }

    /// Creates the catalog described by the toolbar settings.
    ///
    /// # Arguments
    ///
    /// * `locale` - Configured locale; `None` follows the system locale
    /// * `overrides` - Messages replacing the built-in ones
    #[must_use]
    pub fn from_settings(locale: Option<&str>, overrides: &BTreeMap<String, String>) -> Self {
        Self::builtin(&resolve_locale(locale)).with_overrides(overrides)
    }

    /// Replaces the message for `key`.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.overrides.insert(key.into(), message.into());
    }

    /// Applies overrides on top of the current messages.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, message) in overrides {
            self.insert(key.clone(), message.clone());
        }
        self
    }

    /// Locale of this catalog.
    #[must_use]
    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    fn load_builtin(&mut self) -> AnyhowResult<()> {
        let file_name = format!("{}.ftl", self.locale);
        let file = Locales::get(&file_name)
            .ok_or_else(|| anyhow!("No message resource {file_name}"))?;

        let source = String::from_utf8_lossy(file.data.as_ref()).into_owned();
        let resource = FluentResource::try_new(source)
            .map_err(|(_, errors)| anyhow!("{file_name} has {} syntax errors", errors.len()))?;
        self.bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("{file_name} redefines {} messages", errors.len()))?;

        debug!(locale = %self.locale, "Loaded built-in messages");
        Ok(())
    }

    fn format(&self, key: &str) -> Option<String> {
        let (id, attribute) = match key.split_once('.') {
            Some((id, attribute)) => (id, Some(attribute)),
            None => (key, None),
        };

        let message = self.bundle.get_message(id)?;
        let pattern = match attribute {
            Some(attribute) => message.get_attribute(attribute)?.value(),
            None => message.value()?,
        };

        let mut errors = Vec::new();
        let text = self.bundle.format_pattern(pattern, None, &mut errors);
        errors.is_empty().then(|| text.into_owned())
    }
}

impl Translator for MessageCatalog {
    fn translate(&self, key: &str) -> String {
        self.overrides
            .get(key)
            .cloned()
            .or_else(|| self.format(key))
            .unwrap_or_else(|| key.to_string())
    }
}
