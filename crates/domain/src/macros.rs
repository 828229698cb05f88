//! Declarative helpers shared by domain modules.

/// Define an open string vocabulary: a set of known lowercase values plus an
/// `Other(String)` variant that keeps anything else verbatim.
///
/// Only the exact canonical text maps to a known variant. Any other
/// spelling, including a differently cased or padded one, is kept in `Other`
/// so the value serializes back exactly as it was received.
macro_rules! define_open_enum {
    (
        $(#[doc = $doc:expr])*
        $name:ident {
            $( $(#[doc = $vdoc:expr])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[doc = $vdoc])* $variant, )+
            /// A value outside the known vocabulary, kept verbatim.
            Other(String),
        }

        impl $name {
            /// Canonical text form.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $text, )+
                    Self::Other(value) => value.as_str(),
                }
            }

            /// Whether this value is part of the known vocabulary.
            #[must_use]
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }

            /// Compare texts ignoring ASCII case and surrounding whitespace.
            #[must_use]
            pub fn matches_loosely(&self, other: &Self) -> bool {
                self.as_str().trim().eq_ignore_ascii_case(other.as_str().trim())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $text => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(text) => text,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use define_open_enum;
