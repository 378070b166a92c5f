//! Language tables used to validate source and destination codes
//!
//! Three lookup tiers are consulted in order: the exact code table,
//! a small alias table for codes the service renamed, and a table of
//! lower-case English language names.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Code → human readable name, in the order the service lists them.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("af", "afrikaans"),
    ("sq", "albanian"),
    ("am", "amharic"),
    ("ar", "arabic"),
    ("hy", "armenian"),
    ("az", "azerbaijani"),
    ("eu", "basque"),
    ("be", "belarusian"),
    ("bn", "bengali"),
    ("bs", "bosnian"),
    ("bg", "bulgarian"),
    ("ca", "catalan"),
    ("ceb", "cebuano"),
    ("ny", "chichewa"),
    ("zh-cn", "chinese (simplified)"),
    ("zh-tw", "chinese (traditional)"),
    ("co", "corsican"),
    ("hr", "croatian"),
    ("cs", "czech"),
    ("da", "danish"),
    ("nl", "dutch"),
    ("en", "english"),
    ("eo", "esperanto"),
    ("et", "estonian"),
    ("tl", "filipino"),
    ("fi", "finnish"),
    ("fr", "french"),
    ("fy", "frisian"),
    ("gl", "galician"),
    ("ka", "georgian"),
    ("de", "german"),
    ("el", "greek"),
    ("gu", "gujarati"),
    ("ht", "haitian creole"),
    ("ha", "hausa"),
    ("haw", "hawaiian"),
    ("iw", "hebrew"),
    ("he", "hebrew"),
    ("hi", "hindi"),
    ("hmn", "hmong"),
    ("hu", "hungarian"),
    ("is", "icelandic"),
    ("ig", "igbo"),
    ("id", "indonesian"),
    ("ga", "irish"),
    ("it", "italian"),
    ("ja", "japanese"),
    ("jw", "javanese"),
    ("kn", "kannada"),
    ("kk", "kazakh"),
    ("km", "khmer"),
    ("ko", "korean"),
    ("ku", "kurdish (kurmanji)"),
    ("ky", "kyrgyz"),
    ("lo", "lao"),
    ("la", "latin"),
    ("lv", "latvian"),
    ("lt", "lithuanian"),
    ("lb", "luxembourgish"),
    ("mk", "macedonian"),
    ("mg", "malagasy"),
    ("ms", "malay"),
    ("ml", "malayalam"),
    ("mt", "maltese"),
    ("mi", "maori"),
    ("mr", "marathi"),
    ("mn", "mongolian"),
    ("my", "myanmar (burmese)"),
    ("ne", "nepali"),
    ("no", "norwegian"),
    ("or", "odia"),
    ("ps", "pashto"),
    ("fa", "persian"),
    ("pl", "polish"),
    ("pt", "portuguese"),
    ("pa", "punjabi"),
    ("ro", "romanian"),
    ("ru", "russian"),
    ("sm", "samoan"),
    ("gd", "scots gaelic"),
    ("sr", "serbian"),
    ("st", "sesotho"),
    ("sn", "shona"),
    ("sd", "sindhi"),
    ("si", "sinhala"),
    ("sk", "slovak"),
    ("sl", "slovenian"),
    ("so", "somali"),
    ("es", "spanish"),
    ("su", "sundanese"),
    ("sw", "swahili"),
    ("sv", "swedish"),
    ("tg", "tajik"),
    ("ta", "tamil"),
    ("te", "telugu"),
    ("th", "thai"),
    ("tr", "turkish"),
    ("uk", "ukrainian"),
    ("ur", "urdu"),
    ("ug", "uyghur"),
    ("uz", "uzbek"),
    ("vi", "vietnamese"),
    ("cy", "welsh"),
    ("xh", "xhosa"),
    ("yi", "yiddish"),
    ("yo", "yoruba"),
    ("zu", "zulu"),
];

/// Codes the service no longer accepts, mapped to their replacement.
pub const SPECIAL_CASES: &[(&str, &str)] = &[("ee", "et")];

static LANGCODES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    // Later entries win, so "hebrew" resolves to "he".
    LANGUAGES.iter().map(|&(code, name)| (name, code)).collect()
});

/// Resolve a code, alias or language name to a canonical code
///
/// Returns `None` when none of the three tables knows `input`.
pub fn resolve_language(input: &str) -> Option<&'static str> {
    if let Some(&(code, _)) = LANGUAGES.iter().find(|&&(c, _)| c == input) {
        return Some(code);
    }
    if let Some(&(_, code)) = SPECIAL_CASES.iter().find(|&&(alias, _)| alias == input) {
        return Some(code);
    }
    LANGCODES.get(input).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_codes_resolve_to_themselves() {
        for &(code, _) in LANGUAGES {
            assert_eq!(resolve_language(code), Some(code));
        }
    }

    #[test]
    fn test_names_resolve_to_same_code_as_direct_input() {
        for &(code, name) in LANGUAGES {
            let resolved = resolve_language(name).unwrap();
            // Both hebrew codes share a name; the name lands on the newer one.
            if name == "hebrew" {
                assert_eq!(resolved, "he");
            } else {
                assert_eq!(resolved, code);
                assert_eq!(resolve_language(resolved), resolve_language(code));
            }
        }
    }

    #[test]
    fn test_special_cases() {
        assert_eq!(resolve_language("ee"), Some("et"));
        assert_eq!(resolve_language("ee"), resolve_language("estonian"));
    }

    #[test]
    fn test_unknown_inputs() {
        assert_eq!(resolve_language("klingon"), None);
        assert_eq!(resolve_language(""), None);
        assert_eq!(resolve_language("EN"), None);
    }

    #[test]
    fn test_regional_codes_are_exact_only() {
        assert_eq!(resolve_language("zh-tw"), Some("zh-tw"));
        assert_eq!(resolve_language("zh"), None);
        assert_eq!(resolve_language("xx"), None);
    }
}
