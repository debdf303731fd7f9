use std::fmt::Display;

/// Declares a string-backed category enum with `as_str`, `Display` and `TryFrom<&str>`
macro_rules! object_types {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Get the unique string token that identifies this category
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = SettingsError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err(SettingsError::Unknown(stringify!($name), value.to_string())),
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

object_types! {
    /// Layout categories produced by upstream layout detection
    LayoutType {
        /// A single word
        Word => "word",
        /// A text block
        Text => "text",
        /// A title block
        Title => "title",
        /// A list block
        List => "list",
        /// A table
        Table => "table",
        /// A figure
        Figure => "figure",
        /// A text line
        Line => "line",
    }
}

object_types! {
    /// Sub-category keys of word annotations
    WordType {
        /// The text of the word, held as a container value
        Characters => "characters",
        /// The semantic token class (e.g. "header")
        TokenClass => "token_class",
        /// The BIO tag
        Tag => "tag",
        /// The combined token class and tag (e.g. "B-header")
        TokenTag => "token_tag",
    }
}

object_types! {
    /// Summary keys of a page
    PageType {
        /// The document type predicted by sequence classification
        DocumentType => "document_type",
        /// The document language
        Language => "language",
    }
}

object_types! {
    /// Token classes for form understanding
    TokenClasses {
        /// Header
        Header => "header",
        /// Question
        Question => "question",
        /// Answer
        Answer => "answer",
        /// Anything else
        Other => "other",
    }
}

object_types! {
    /// Begin/inside/outside positional tags
    BioTag {
        /// Begin
        Begin => "B",
        /// Inside
        Inside => "I",
        /// Outside
        Outside => "O",
        /// Single
        Single => "S",
        /// End
        End => "E",
    }
}

object_types! {
    /// Relationship keys between annotations
    Relationships {
        /// Child annotations of a layout block
        Child => "child",
        /// Position of an annotation in reading order
        ReadingOrder => "reading_order",
    }
}

/// Split a token tag such as "B-header" into the token class and its BIO tag.
///
/// A plain "O" maps to the "other" class. A label without a tag prefix is kept as the token class
/// with an outside tag.
pub fn split_token_tag(token_tag: &str) -> (String, BioTag) {
    if token_tag == BioTag::Outside.as_str() {
        return (TokenClasses::Other.to_string(), BioTag::Outside);
    }

    match token_tag.split_once('-') {
        Some((tag, token_class)) => match BioTag::try_from(tag) {
            Ok(tag) => (token_class.to_lowercase(), tag),
            Err(_) => (token_tag.to_lowercase(), BioTag::Outside),
        },
        None => (token_tag.to_lowercase(), BioTag::Outside),
    }
}

/// Settings Error
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// No category found for the given string
    #[error("no {0} found for {1}")]
    Unknown(&'static str, String),
}
