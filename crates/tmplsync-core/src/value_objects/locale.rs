//! Locale value object
//!
//! Vendors report template languages as ISO 639-1 codes with an optional region
//! (`en`, `en_US`, `pt_BR`) or as bare ISO 639-3 codes (`fil`). Internally
//! locales are stored as ISO 639-3 plus an optional region (`eng`, `eng-US`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 639-1 → ISO 639-3 for the languages template vendors accept
const ISO639_1_TO_3: &[(&str, &str)] = &[
    ("af", "afr"),
    ("am", "amh"),
    ("ar", "ara"),
    ("az", "aze"),
    ("be", "bel"),
    ("bg", "bul"),
    ("bn", "ben"),
    ("bs", "bos"),
    ("ca", "cat"),
    ("cs", "ces"),
    ("cy", "cym"),
    ("da", "dan"),
    ("de", "deu"),
    ("el", "ell"),
    ("en", "eng"),
    ("es", "spa"),
    ("et", "est"),
    ("eu", "eus"),
    ("fa", "fas"),
    ("fi", "fin"),
    ("fr", "fra"),
    ("ga", "gle"),
    ("gl", "glg"),
    ("gu", "guj"),
    ("ha", "hau"),
    ("he", "heb"),
    ("hi", "hin"),
    ("hr", "hrv"),
    ("hu", "hun"),
    ("hy", "hye"),
    ("id", "ind"),
    ("ig", "ibo"),
    ("is", "isl"),
    ("it", "ita"),
    ("ja", "jpn"),
    ("ka", "kat"),
    ("kk", "kaz"),
    ("km", "khm"),
    ("kn", "kan"),
    ("ko", "kor"),
    ("ky", "kir"),
    ("lo", "lao"),
    ("lt", "lit"),
    ("lv", "lav"),
    ("mk", "mkd"),
    ("ml", "mal"),
    ("mn", "mon"),
    ("mr", "mar"),
    ("ms", "msa"),
    ("my", "mya"),
    ("nb", "nob"),
    ("ne", "nep"),
    ("nl", "nld"),
    ("no", "nor"),
    ("pa", "pan"),
    ("pl", "pol"),
    ("ps", "pus"),
    ("pt", "por"),
    ("ro", "ron"),
    ("ru", "rus"),
    ("rw", "kin"),
    ("si", "sin"),
    ("sk", "slk"),
    ("sl", "slv"),
    ("so", "som"),
    ("sq", "sqi"),
    ("sr", "srp"),
    ("sv", "swe"),
    ("sw", "swa"),
    ("ta", "tam"),
    ("te", "tel"),
    ("th", "tha"),
    ("tl", "tgl"),
    ("tr", "tur"),
    ("uk", "ukr"),
    ("ur", "urd"),
    ("uz", "uzb"),
    ("vi", "vie"),
    ("xh", "xho"),
    ("yo", "yor"),
    ("zh", "zho"),
    ("zu", "zul"),
];

/// Normalized locale: three-letter language plus optional region
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Map a vendor language code to a locale, `None` when it can't be mapped
    pub fn from_vendor(code: &str) -> Option<Self> {
        let code = code.trim();
        let (lang, region) = match code.split_once(['_', '-']) {
            Some((lang, region)) => (lang, Some(region)),
            None => (code, None),
        };

        let language = match lang.len() {
            2 => ISO639_1_TO_3
                .iter()
                .find(|(two, _)| two.eq_ignore_ascii_case(lang))
                .map(|(_, three)| (*three).to_string())?,
            3 if lang.chars().all(|c| c.is_ascii_alphabetic()) => lang.to_ascii_lowercase(),
            _ => return None,
        };

        let region = match region {
            None => None,
            Some(r) if r.len() == 2 && r.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(r.to_ascii_uppercase())
            }
            Some(r) if r.len() == 3 && r.chars().all(|c| c.is_ascii_digit()) => Some(r.to_string()),
            Some(_) => return None,
        };

        Some(Self { language, region })
    }

    /// Parse a locale already in internal form (`eng`, `eng-US`)
    pub fn parse(value: &str) -> Option<Self> {
        let (language, region) = match value.split_once('-') {
            Some((l, r)) => (l, Some(r)),
            None => (value, None),
        };
        if language.len() != 3 || !language.chars().all(|c| c.is_ascii_lowercase()) {
            return None;
        }
        if region.is_some_and(|r| r.is_empty()) {
            return None;
        }
        Some(Self {
            language: language.to_string(),
            region: region.map(str::to_string),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => f.write_str(&self.language),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid locale: {value}"))
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor(code: &str) -> Option<String> {
        Locale::from_vendor(code).map(|l| l.to_string())
    }

    #[test]
    fn test_from_vendor() {
        assert_eq!(vendor("en").as_deref(), Some("eng"));
        assert_eq!(vendor("en_US").as_deref(), Some("eng-US"));
        assert_eq!(vendor("fil").as_deref(), Some("fil"));
        assert_eq!(vendor("pt_BR").as_deref(), Some("por-BR"));
        assert_eq!(vendor("es_419").as_deref(), Some("spa-419"));
        assert_eq!(vendor("kli").as_deref(), Some("kli"));
    }

    #[test]
    fn test_unmappable_codes() {
        assert_eq!(vendor("xx"), None);
        assert_eq!(vendor(""), None);
        assert_eq!(vendor("english"), None);
        assert_eq!(vendor("en_United"), None);
    }

    #[test]
    fn test_parse_roundtrip_display() {
        let locale = Locale::parse("eng-US").unwrap();
        assert_eq!(locale.language(), "eng");
        assert_eq!(locale.region(), Some("US"));
        assert_eq!(locale.to_string(), "eng-US");
        assert!(Locale::parse("en").is_none());
    }

    #[test]
    fn test_serde_as_string() {
        let locale = Locale::from_vendor("fr").unwrap();
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"fra\"");
        let back: Locale = serde_json::from_str("\"fra\"").unwrap();
        assert_eq!(back, locale);
    }
}
