//! Library of ready-made patterns.

use phf::{Map, phf_map};

/// A named, ready-made pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub pattern: &'static str,
}

/// Presets in display order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Email",
        pattern: r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
    },
    Preset {
        name: "Phone",
        pattern: r"\b\d{3}-\d{3}-\d{4}\b",
    },
    Preset {
        name: "URL",
        pattern: r"https?:\/\/(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()@:%_\+.~#?&//=]*)",
    },
    Preset {
        name: "Date (MM/DD/YYYY)",
        pattern: r"\b(0?[1-9]|1[0-2])\/(0?[1-9]|[12][0-9]|3[01])\/(19|20)\d{2}\b",
    },
    Preset {
        name: "Hex Color",
        pattern: r"#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})",
    },
    Preset {
        name: "IPv4 Address",
        pattern: r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b",
    },
];

/// Short command-line names, mapped to an index into [`PRESETS`].
const SLUG_TO_INDEX: Map<&'static str, usize> = phf_map! {
    "email" => 0,
    "phone" => 1,
    "url" => 2,
    "date" => 3,
    "hex" => 4,
    "ipv4" => 5,
};

/// Find a preset by slug (`"ipv4"`) or display name (`"IPv4 Address"`),
/// ignoring case.
pub fn find(name: &str) -> Option<&'static Preset> {
    let lower = name.trim().to_lowercase();
    if let Some(&index) = SLUG_TO_INDEX.get(lower.as_str()) {
        return PRESETS.get(index);
    }
    PRESETS.iter().find(|p| p.name.to_lowercase() == lower)
}

/// The slug for a preset, if it has one.
pub fn slug_of(preset: &Preset) -> Option<&'static str> {
    SLUG_TO_INDEX
        .entries()
        .find(|&(_, &index)| PRESETS.get(index) == Some(preset))
        .map(|(&slug, _)| slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, RegexEngine};
    use crate::options::{OptionSet, encode};

    #[test]
    fn test_display_order() {
        let names: Vec<_> = PRESETS.iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            [
                "Email",
                "Phone",
                "URL",
                "Date (MM/DD/YYYY)",
                "Hex Color",
                "IPv4 Address"
            ]
        );
    }

    #[test]
    fn test_find_by_slug_and_name() {
        assert_eq!(find("ipv4").map(|p| p.name), Some("IPv4 Address"));
        assert_eq!(find("HEX").map(|p| p.name), Some("Hex Color"));
        assert_eq!(find("date (mm/dd/yyyy)").map(|p| p.name), Some("Date (MM/DD/YYYY)"));
        assert!(find("zipcode").is_none());
    }

    #[test]
    fn test_every_preset_has_slug() {
        for preset in PRESETS {
            let slug = slug_of(preset).unwrap();
            assert_eq!(find(slug), Some(preset));
        }
    }

    #[test]
    fn test_every_preset_compiles_with_defaults() {
        let engine = RegexEngine;
        let modifiers = encode(&OptionSet::default());
        for preset in PRESETS {
            assert!(
                engine.compile(preset.pattern, &modifiers).is_ok(),
                "preset failed to compile: {}",
                preset.name
            );
        }
    }

    #[test]
    fn test_presets_match_examples() {
        let engine = RegexEngine;
        let modifiers = encode(&OptionSet::default());
        let cases = [
            ("email", "mail me at jane.doe@example.com", true),
            ("phone", "Call 555-123-4567", true),
            ("url", "see https://www.example.org/path", true),
            ("date", "due 12/31/2024", true),
            ("hex", "color: #1a2B3c", true),
            ("ipv4", "host 192.168.0.1 up", true),
            ("ipv4", "no address here", false),
        ];
        for (slug, sample, expected) in cases {
            let preset = find(slug).unwrap();
            let matcher = engine.compile(preset.pattern, &modifiers).unwrap();
            assert_eq!(matcher.is_match(sample), expected, "{slug} on {sample:?}");
        }
    }
}
