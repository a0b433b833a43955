//! Interned identifiers for nodes, ports and scene elements.
//!
//! [`Id`] is a `Copy` handle to a string stored once in a process-wide
//! interner. Equality and hashing work on the symbol; ordering by the
//! underlying text goes through [`Id::cmp_collated`], which follows the
//! Unicode root collation rather than byte order.

use std::{
    cmp::Ordering,
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use icu_collator::{Collator, CollatorBorrowed, options::CollatorOptions};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

thread_local! {
    /// Root-locale collator with default (tertiary) strength.
    static COLLATOR: Option<CollatorBorrowed<'static>> =
        Collator::try_new(Default::default(), CollatorOptions::default()).ok();
}

/// Compares two strings by root collation, falling back to byte order for
/// strings the collator considers equal or when no collation data is
/// available.
fn collate(lhs: &str, rhs: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(lhs, rhs),
            None => Ordering::Equal,
        })
        .then_with(|| lhs.cmp(rhs))
}

/// Interned identifier.
///
/// # Examples
///
/// ```
/// use rosette_core::identifier::Id;
///
/// let step = Id::new("bwa_mem");
/// let port: Id = "reads".into();
///
/// assert_eq!(step, "bwa_mem");
/// assert_ne!(step, port);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Compares the text of two identifiers by Unicode root collation.
    ///
    /// This is the order a browser's `localeCompare` produces: letters
    /// compare case-insensitively first, lowercase sorts before uppercase
    /// only when the letters tie, and punctuation sorts before digits and
    /// letters. Identifiers themselves carry no meaningful order (symbols
    /// are handed out in interning order), so anything that sorts by name
    /// must use this.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use rosette_core::identifier::Id;
    ///
    /// assert_eq!(Id::new("b").cmp_collated(Id::new("a")), Ordering::Greater);
    /// assert_eq!(Id::new("Reads").cmp_collated(Id::new("bam")), Ordering::Greater);
    /// assert_eq!(Id::new("a").cmp_collated(Id::new("a")), Ordering::Equal);
    /// ```
    pub fn cmp_collated(self, other: Id) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        let interner = interner();
        let lhs = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        let rhs = interner
            .resolve(other.0)
            .expect("Symbol should exist in interner");
        collate(lhs, rhs)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f.write_str(name)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<'de> serde::Deserialize<'de> for Id {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}
