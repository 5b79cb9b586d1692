//! Enumerated record fields.
//!
//! Every enumerated field is permissive: known values map onto variants,
//! anything else is kept verbatim in a `Custom` variant and round-trips
//! unchanged through serialization.

use serde::{Deserialize, Serialize};

macro_rules! permissive_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($key:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value outside the known set, kept verbatim.
            Custom(String),
        }

        impl $name {
            /// Stored keys of every known variant, in display order.
            pub const KNOWN_KEYS: &'static [&'static str] = &[$($key),+];

            /// `(stored key, label)` of every known variant, in display order.
            pub const OPTIONS: &'static [(&'static str, &'static str)] = &[$(($key, $label)),+];

            /// All known variants, in display order.
            #[must_use]
            pub fn known() -> Vec<Self> {
                vec![$(Self::$variant),+]
            }

            /// The stored string form.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $key, )+
                    Self::Custom(raw) => raw,
                }
            }

            /// Display label; unknown values display verbatim.
            #[must_use]
            pub fn label(&self) -> &str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::Custom(raw) => raw,
                }
            }

            /// Whether this value is one of the known variants.
            #[must_use]
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Custom(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match raw.as_str() {
                    $( $key => Self::$variant, )+
                    _ => Self::Custom(raw),
                }
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::from(raw.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Custom(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

permissive_enum! {
    /// Topic of a news clipping.
    NewsCategory, default = Other {
        /// A published CVE.
        Cve => ("cve", "CVE"),
        /// A vulnerability report.
        Vuln => ("vuln", "취약점"),
        /// A breach or incident.
        Breach => ("breach", "침해사고"),
        /// Tools and techniques.
        Tools => ("tools", "도구/기법"),
        /// Policy and announcements.
        Policy => ("policy", "정책/공지"),
        /// Anything else.
        Other => ("other", "기타"),
    }
}

impl NewsCategory {
    /// Accent color used on news cards.
    ///
    /// Unknown categories borrow the color of `other`.
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Cve => "#f85149",
            Self::Vuln => "#d29922",
            Self::Breach => "#bc8cff",
            Self::Tools => "#58a6ff",
            Self::Policy => "#3fb950",
            Self::Other | Self::Custom(_) => "#8b949e",
        }
    }
}

permissive_enum! {
    /// Severity of a news clipping.
    Severity, default = Info {
        /// Critical.
        Critical => ("critical", "CRITICAL"),
        /// High.
        High => ("high", "HIGH"),
        /// Medium.
        Medium => ("medium", "MEDIUM"),
        /// Low.
        Low => ("low", "LOW"),
        /// Informational.
        Info => ("info", "INFO"),
    }
}

permissive_enum! {
    /// Topic of a glossary entry.
    GlossaryCategory, default = Concept {
        /// Attack techniques.
        Attack => ("attack", "공격 기법"),
        /// Defense and protection.
        Defense => ("defense", "방어/보호"),
        /// Cryptography.
        Crypto => ("crypto", "암호화"),
        /// Networking.
        Network => ("network", "네트워크"),
        /// Tools and frameworks.
        Tool => ("tool", "도구/프레임워크"),
        /// General concepts.
        Concept => ("concept", "개념/용어"),
    }
}

permissive_enum! {
    /// Difficulty of a glossary entry.
    Difficulty, default = Beginner {
        /// Beginner.
        Beginner => ("beginner", "입문"),
        /// Intermediate.
        Intermediate => ("intermediate", "중급"),
        /// Advanced.
        Advanced => ("advanced", "고급"),
    }
}

permissive_enum! {
    /// Kind of a curated resource.
    ResourceCategory, default = Docs {
        /// Courses.
        Course => ("course", "강의/코스"),
        /// Documentation and references.
        Docs => ("docs", "문서/레퍼런스"),
        /// CTFs and wargames.
        Ctf => ("ctf", "CTF/워게임"),
        /// Tools.
        Tool => ("tool", "도구"),
        /// Blogs and articles.
        Blog => ("blog", "블로그/아티클"),
        /// Videos.
        Video => ("video", "영상"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_parse() {
        assert_eq!(NewsCategory::from("cve"), NewsCategory::Cve);
        assert_eq!(Severity::from("critical"), Severity::Critical);
        assert_eq!(GlossaryCategory::from("attack"), GlossaryCategory::Attack);
        assert_eq!(Difficulty::from("advanced"), Difficulty::Advanced);
        assert_eq!(ResourceCategory::from("ctf"), ResourceCategory::Ctf);
    }

    #[test]
    fn test_unknown_values_kept_verbatim() {
        let category = NewsCategory::from("malware");
        assert_eq!(category, NewsCategory::Custom("malware".to_string()));
        assert_eq!(category.as_str(), "malware");
        assert_eq!(category.label(), "malware");
        assert!(!category.is_known());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(Severity::from("HIGH"), Severity::Custom("HIGH".to_string()));
    }

    #[test]
    fn test_serialization_is_plain_string() {
        let json = serde_json::to_string(&GlossaryCategory::Crypto).unwrap();
        assert_eq!(json, "\"crypto\"");

        let custom: ResourceCategory = serde_json::from_str("\"podcast\"").unwrap();
        assert_eq!(custom.as_str(), "podcast");
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"podcast\"");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(NewsCategory::default(), NewsCategory::Other);
        assert_eq!(Severity::default(), Severity::Info);
        assert_eq!(GlossaryCategory::default(), GlossaryCategory::Concept);
        assert_eq!(Difficulty::default(), Difficulty::Beginner);
        assert_eq!(ResourceCategory::default(), ResourceCategory::Docs);
    }

    #[test]
    fn test_labels() {
        assert_eq!(NewsCategory::Breach.label(), "침해사고");
        assert_eq!(Difficulty::Intermediate.label(), "중급");
        assert_eq!(Severity::Medium.label(), "MEDIUM");
    }

    #[test]
    fn test_known_keys_order() {
        assert_eq!(
            NewsCategory::KNOWN_KEYS,
            &["cve", "vuln", "breach", "tools", "policy", "other"]
        );
        assert_eq!(ResourceCategory::known().len(), 6);
        assert_eq!(Difficulty::OPTIONS[2], ("advanced", "고급"));
    }

    #[test]
    fn test_unknown_news_category_color_falls_back() {
        assert_eq!(
            NewsCategory::from("zzz").color(),
            NewsCategory::Other.color()
        );
    }
}
