//! Book record and ISBN identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Title stored when the metadata source omits one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Author stored when the metadata source lists no contributors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
/// Maximum accepted ISBN length, hyphens included.
pub const ISBN_MAX: usize = 32;

/// Validation errors returned by [`Isbn::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IsbnValidationError {
    Empty,
    ContainsWhitespace,
    TooLong { max: usize },
}

impl fmt::Display for IsbnValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "ISBN cannot be empty."),
            Self::ContainsWhitespace => write!(f, "ISBN must not contain whitespace."),
            Self::TooLong { max } => write!(f, "ISBN must be at most {max} characters."),
        }
    }
}

impl std::error::Error for IsbnValidationError {}

/// ISBN-like identifier used as the unique catalog key.
///
/// Surrounding whitespace is trimmed on construction; the remaining text is
/// kept verbatim so hyphenated and bare forms are distinct keys.
///
/// # Examples
/// ```
/// use catalog::domain::Isbn;
///
/// let isbn = Isbn::new(" 9780345391803 ").expect("valid ISBN");
/// assert_eq!(isbn.as_str(), "9780345391803");
/// assert_eq!(isbn.bibkey(), "ISBN:9780345391803");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Validate and construct an [`Isbn`] from borrowed input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, IsbnValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IsbnValidationError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IsbnValidationError::ContainsWhitespace);
        }
        if trimmed.chars().count() > ISBN_MAX {
            return Err(IsbnValidationError::TooLong { max: ISBN_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Key used by Open Library style `bibkeys` queries and responses.
    pub fn bibkey(&self) -> String {
        format!("ISBN:{}", self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}

impl TryFrom<String> for Isbn {
    type Error = IsbnValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Normalised catalog record.
///
/// Records are created from resolved metadata and never mutated afterwards.
/// The serialised form (`title`, `author`, `isbn`) is also the on-disk layout
/// of the JSON file store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: Isbn,
}

impl Book {
    /// Construct a record from already-normalised fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>, isbn: Isbn) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn,
        }
    }

    /// Build a record from optional metadata, substituting placeholders.
    ///
    /// Contributor names are joined with `", "`. A missing title becomes
    /// [`UNKNOWN_TITLE`]; an empty contributor list becomes [`UNKNOWN_AUTHOR`].
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::{Book, Isbn, UNKNOWN_TITLE};
    ///
    /// let isbn = Isbn::new("9780141439518").expect("valid ISBN");
    /// let names = ["Jane Austen".to_owned()];
    /// let book = Book::from_metadata(isbn, None, names);
    /// assert_eq!(book.title, UNKNOWN_TITLE);
    /// assert_eq!(book.author, "Jane Austen");
    /// ```
    pub fn from_metadata<I>(isbn: Isbn, title: Option<String>, author_names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let names: Vec<String> = author_names.into_iter().collect();
        let author = if names.is_empty() {
            UNKNOWN_AUTHOR.to_owned()
        } else {
            names.join(", ")
        };
        Self {
            title: title.unwrap_or_else(|| UNKNOWN_TITLE.to_owned()),
            author,
            isbn,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {} (ISBN: {})", self.title, self.author, self.isbn)
    }
}
