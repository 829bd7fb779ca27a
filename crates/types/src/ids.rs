//! Newtype wrappers for the names that tie renderers, formatters and stages together.
//!
//! A renderer and a formatter only meet through these identifiers, so mixing up a
//! format id with a stage name is a compile error rather than a failed registry lookup.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(value: impl Into<Arc<str>>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl From<&$name> for $name {
            fn from(id: &$name) -> Self {
                id.clone()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                &*self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                &*self.0 == *other
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identity of a renderer specification (a document type such as `"document"`).
    RendererId
);

string_id!(
    /// An output format a formatter can produce for a renderer (e.g. `"pdf"`).
    FormatId
);

string_id!(
    /// The name of a rendering stage, without any `build_`/`finalize_` prefix.
    StageName
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_id_creation() {
        let a = FormatId::new("pdf");
        let b = FormatId::from("pdf");
        let c = FormatId::from(String::from("pdf"));

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "pdf");
        assert_eq!(a, "pdf");
    }

    #[test]
    fn test_display_is_bare_name() {
        assert_eq!(StageName::new("document_body").to_string(), "document_body");
        assert_eq!(format!("{}", RendererId::new("invoice")), "invoice");
    }

    #[test]
    fn test_borrowed_lookup() {
        let mut formats = HashMap::new();
        formats.insert(FormatId::new("pdf"), 1);
        formats.insert(FormatId::new("text"), 2);

        assert_eq!(formats.get("pdf"), Some(&1));
        assert_eq!(formats.get("csv"), None);
    }

    #[test]
    fn test_ordering_follows_name() {
        let mut ids = vec![FormatId::new("text"), FormatId::new("csv"), FormatId::new("pdf")];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(FormatId::as_str).collect();
        assert_eq!(names, vec!["csv", "pdf", "text"]);
    }
}
