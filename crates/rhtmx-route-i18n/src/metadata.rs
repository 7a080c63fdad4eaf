//! Locale metadata injection
//!
//! Every localized route records the locale that produced it inside one of
//! its options: `assigns` for template-style verbs, `private` for `live`.
//! Downstream helper generators read the locale back from that field.

use crate::config::LocalizerConfig;
use crate::error::{LocalizeError, Result};
use crate::locale::LocaleId;
use crate::route::{OptionValue, RouteOptions, Verb};

/// Merges the locale into an existing metadata record (pure function)
///
/// - `None` → a fresh record holding only the locale
/// - `Some(Map)` → the locale key is set, other keys keep their order
/// - anything else → `Err` with the shape that was found
///
/// # Examples
///
/// ```
/// use rhtmx_route_i18n::metadata::put_locale;
/// use rhtmx_route_i18n::{LocaleId, OptionValue};
///
/// let fr = LocaleId::from("fr");
/// let record = put_locale(None, "locale", &fr).unwrap();
/// assert_eq!(record.get("locale"), Some(&OptionValue::str("fr")));
/// ```
pub fn put_locale(
    existing: Option<OptionValue>,
    locale_key: &str,
    locale: &LocaleId,
) -> std::result::Result<OptionValue, &'static str> {
    let value = OptionValue::str(locale.as_str());

    match existing {
        None => Ok(OptionValue::Map(vec![(locale_key.to_string(), value)])),
        Some(OptionValue::Map(mut entries)) => {
            match entries.iter_mut().find(|(key, _)| key == locale_key) {
                Some((_, slot)) => *slot = value,
                None => entries.push((locale_key.to_string(), value)),
            }
            Ok(OptionValue::Map(entries))
        }
        Some(other) => Err(other.kind()),
    }
}

/// Writes locale metadata into route options
#[derive(Clone, Copy)]
pub struct MetadataInjector<'a> {
    config: &'a LocalizerConfig,
}

impl<'a> MetadataInjector<'a> {
    pub fn new(config: &'a LocalizerConfig) -> Self {
        Self { config }
    }

    /// Returns new options carrying `locale` in the verb's metadata field
    ///
    /// With a keyword list, any existing field value is taken out, merged,
    /// and appended as the last keyword. A positional-only call gets a new
    /// one-entry keyword list. The nested block is carried over untouched and
    /// stays after every keyword option.
    pub fn inject(
        &self,
        verb: &Verb,
        path: &str,
        options: &RouteOptions,
        locale: &LocaleId,
    ) -> Result<RouteOptions> {
        let field = self.config.metadata_field(verb);

        let extra = match &options.extra {
            None => vec![(field.to_string(), self.record(None, field, path, locale)?)],
            Some(keywords) => {
                let mut rest = Vec::with_capacity(keywords.len() + 1);
                let mut existing = None;

                for (key, value) in keywords {
                    if key == field {
                        existing = Some(value.clone());
                    } else {
                        rest.push((key.clone(), value.clone()));
                    }
                }

                rest.push((field.to_string(), self.record(existing, field, path, locale)?));
                rest
            }
        };

        Ok(RouteOptions {
            extra: Some(extra),
            nested: options.nested.clone(),
        })
    }

    fn record(
        &self,
        existing: Option<OptionValue>,
        field: &str,
        path: &str,
        locale: &LocaleId,
    ) -> Result<OptionValue> {
        put_locale(existing, &self.config.locale_key, locale).map_err(|found| {
            LocalizeError::MalformedOptions {
                field: field.to_string(),
                path: path.to_string(),
                found,
            }
        })
    }
}
