//! Localized labels using Fluent
//!
//! Translations are embedded at build time; `fr` is the deck's default and
//! `en` the fallback for missing messages.

use crate::DeckError;
use fluent::{FluentArgs, FluentBundle, FluentResource};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Convenience macro for getting localized strings
#[macro_export]
macro_rules! t {
    ($i18n:expr, $key:expr) => {
        $i18n.get($key)
    };
    ($i18n:expr, $key:expr, $($arg_name:ident = $arg_value:expr),+ $(,)?) => {{
        let mut args = fluent::FluentArgs::new();
        $(
            args.set(stringify!($arg_name), $arg_value);
        )+
        $i18n.get_with_args($key, Some(&args))
    }};
}

const EMBEDDED: &[(&str, &str)] = &[
    ("fr", include_str!("../locales/fr/deck.ftl")),
    ("en", include_str!("../locales/en/deck.ftl")),
];

/// Localization manager
pub struct I18n {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
    current_locale: String,
    fallback_locale: String,
}

impl I18n {
    /// Create a manager for `locale`, e.g. `fr` or `en-GB`
    ///
    /// Unknown languages fall back to English with a warning.
    pub fn new(locale: &str) -> Result<Self, DeckError> {
        let requested: LanguageIdentifier = locale
            .parse()
            .map_err(|e| DeckError::Locale(format!("Invalid locale {}: {}", locale, e)))?;

        let mut bundles = HashMap::new();
        for (name, source) in EMBEDDED {
            bundles.insert(name.to_string(), build_bundle(name, source)?);
        }

        let language = requested.language.as_str().to_string();
        let current_locale = if bundles.contains_key(&language) {
            language
        } else {
            tracing::warn!("No translations for {}, using en", locale);
            "en".to_string()
        };

        Ok(Self {
            bundles,
            current_locale,
            fallback_locale: "en".to_string(),
        })
    }

    /// Get the current locale
    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    /// Get a localized string
    pub fn get(&self, key: &str) -> String {
        self.get_with_args(key, None)
    }

    /// Get a localized string with arguments
    pub fn get_with_args(&self, key: &str, args: Option<&FluentArgs>) -> String {
        for locale in [&self.current_locale, &self.fallback_locale] {
            if let Some(text) = self.format(locale, key, args) {
                return text;
            }
        }

        // Return key as fallback
        key.to_string()
    }

    fn format(&self, locale: &str, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        let bundle = self.bundles.get(locale)?;
        let pattern = bundle.get_message(key)?.value()?;

        let mut errors = Vec::new();
        let result = bundle.format_pattern(pattern, args, &mut errors);
        if errors.is_empty() {
            Some(result.into_owned())
        } else {
            tracing::debug!("Fluent errors for {} in {}: {:?}", key, locale, errors);
            None
        }
    }

    /// Tooltip for the previous-slide button at position `current`
    pub fn prev_title(&self, current: usize) -> String {
        if current <= 1 {
            self.get("nav-first-title")
        } else {
            t!(self, "nav-prev-title", number = current - 1)
        }
    }

    /// Tooltip for the next-slide button at position `current`
    pub fn next_title(&self, current: usize, total: usize) -> String {
        if current >= total {
            self.get("nav-last-title")
        } else {
            t!(self, "nav-next-title", number = current + 1)
        }
    }

    /// Accessibility label for the panel at `index`
    pub fn panel_label(&self, index: usize, total: usize) -> String {
        t!(self, "panel-label", index = index, total = total)
    }

    pub fn keyboard_help(&self) -> String {
        self.get("keyboard-help")
    }
}

fn build_bundle(locale: &str, source: &str) -> Result<FluentBundle<FluentResource>, DeckError> {
    let lang_id: LanguageIdentifier = locale
        .parse()
        .map_err(|e| DeckError::Locale(format!("Invalid locale {}: {}", locale, e)))?;

    let resource = FluentResource::try_new(source.to_string()).map_err(|(_, errors)| {
        DeckError::Locale(format!("Fluent parse errors in {}: {:?}", locale, errors))
    })?;

    let mut bundle = FluentBundle::new(vec![lang_id]);
    // Tooltips go straight into plain-text attributes
    bundle.set_use_isolating(false);
    bundle
        .add_resource(resource)
        .map_err(|errors| DeckError::Locale(format!("Fluent bundle errors: {:?}", errors)))?;

    Ok(bundle)
}
