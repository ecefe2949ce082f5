//! Console translations.
//!
//! Each language ships one JSON catalog compiled into the bundle. Lookups
//! walk a dotted key through the catalog, then through the English catalog,
//! then use the caller's default text.

use serde_json::Value;
use std::sync::LazyLock;

/// Console languages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    /// English.
    English,
    /// Simplified Chinese.
    Chinese,
}

struct Catalog {
    tag: &'static str,
    label: &'static str,
    source: &'static str,
}

const ENGLISH: Catalog = Catalog {
    tag: "en",
    label: "English",
    source: include_str!("../../i18n/en.json"),
};

const CHINESE: Catalog = Catalog {
    tag: "zh-CN",
    label: "中文",
    source: include_str!("../../i18n/zh.json"),
};

impl Locale {
    /// Languages in picker order.
    pub const ALL: [Self; 2] = [Self::English, Self::Chinese];

    const fn catalog(self) -> &'static Catalog {
        match self {
            Self::English => &ENGLISH,
            Self::Chinese => &CHINESE,
        }
    }

    /// BCP 47 tag, used for `<html lang>` and stored preferences.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        self.catalog().tag
    }

    /// Name shown in the language picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.catalog().label
    }

    /// Pick the language for a browser or stored tag by its primary subtag.
    #[must_use]
    pub fn negotiate(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.trim();
        Self::ALL.into_iter().find(|locale| {
            locale
                .tag()
                .split('-')
                .next()
                .is_some_and(|own| own.eq_ignore_ascii_case(primary))
        })
    }
}

/// Language used when nothing else is known.
pub const DEFAULT_LOCALE: Locale = Locale::English;

static ENGLISH_MESSAGES: LazyLock<Value> = LazyLock::new(|| parse_catalog(Locale::English));

/// Parsed catalog of one language.
#[derive(Clone, Debug)]
pub struct TranslationBundle {
    /// Language of the catalog.
    pub locale: Locale,
    messages: Value,
}

impl PartialEq for TranslationBundle {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
    }
}

impl TranslationBundle {
    /// Load the catalog of `locale`. An unreadable catalog behaves as empty.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            messages: parse_catalog(locale),
        }
    }

    /// Text at dotted `key`, else the English text, else `default`.
    #[must_use]
    pub fn text(&self, key: &str, default: &str) -> String {
        lookup(&self.messages, key)
            .or_else(|| lookup(&ENGLISH_MESSAGES, key))
            .unwrap_or(default)
            .to_string()
    }
}

fn parse_catalog(locale: Locale) -> Value {
    serde_json::from_str(locale.catalog().source).unwrap_or(Value::Null)
}

fn lookup<'a>(messages: &'a Value, key: &str) -> Option<&'a str> {
    key.split('.')
        .try_fold(messages, |node, segment| node.get(segment))?
        .as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_uses_caller_default() {
        let bundle = TranslationBundle::new(Locale::Chinese);
        assert_eq!(bundle.text("nonexistent.key", "fallback"), "fallback");
        assert_eq!(bundle.text("task", "section"), "section");
    }

    #[test]
    fn untranslated_key_reads_english() {
        let bundle = TranslationBundle::new(Locale::Chinese);
        assert_eq!(bundle.text("meta.english_only", "x"), "English only");
    }

    #[test]
    fn every_catalog_parses_and_covers_task_rows() {
        for locale in Locale::ALL {
            let bundle = TranslationBundle::new(locale);
            assert_eq!(bundle.locale, locale);
            assert!(!bundle.text("task.title", "").is_empty());
        }
        assert_eq!(TranslationBundle::new(Locale::Chinese).text("task.back", ""), "返回");
    }

    #[test]
    fn browser_tags_negotiate_by_primary_subtag() {
        assert_eq!(Locale::negotiate("zh-CN"), Some(Locale::Chinese));
        assert_eq!(Locale::negotiate("ZH_tw"), Some(Locale::Chinese));
        assert_eq!(Locale::negotiate("en_US"), Some(Locale::English));
        assert_eq!(Locale::negotiate(Locale::Chinese.tag()), Some(Locale::Chinese));
        assert_eq!(Locale::negotiate("fr"), None);
        assert_eq!(Locale::negotiate(""), None);
    }
}
