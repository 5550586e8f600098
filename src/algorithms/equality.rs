//! Element equality policies
//!
//! Every metric compares elements exclusively through an [`Equality`] policy.
//! Any `Fn(&T, &T) -> bool` closure is a policy; the unit structs here cover
//! the common text comparers.
//!
//! A policy should be an equivalence relation (reflexive, symmetric,
//! transitive). Predicates that are not still produce deterministic results,
//! but the metric guarantees (symmetry, triangle inequality, optimal
//! substructure) no longer hold.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Decides whether two elements are considered equal.
pub trait Equality<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
}

impl<T: ?Sized, F> Equality<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Structural equality via `PartialEq`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exact;

impl<T: PartialEq + ?Sized> Equality<T> for Exact {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Equal when the Unicode lowercase mappings are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreCase;

/// Equal when the base characters are equal after stripping combining marks
/// from the canonical decomposition (`ñ` ~ `n`). Case-sensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreDiacritics;

/// [`IgnoreCase`] and [`IgnoreDiacritics`] combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreCaseAndDiacritics;

fn strip_marks<I: Iterator<Item = char>>(chars: I) -> impl Iterator<Item = char> {
    chars.nfd().filter(|c| !is_combining_mark(*c))
}

fn char_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn char_eq_ignore_diacritics(a: char, b: char) -> bool {
    a == b || strip_marks(std::iter::once(a)).eq(strip_marks(std::iter::once(b)))
}

fn char_eq_ignore_both(a: char, b: char) -> bool {
    a == b
        || strip_marks(std::iter::once(a))
            .flat_map(char::to_lowercase)
            .eq(strip_marks(std::iter::once(b)).flat_map(char::to_lowercase))
}

fn str_eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.chars().flat_map(char::to_lowercase).eq(b.chars().flat_map(char::to_lowercase))
}

fn str_eq_ignore_diacritics(a: &str, b: &str) -> bool {
    a == b || strip_marks(a.chars()).eq(strip_marks(b.chars()))
}

fn str_eq_ignore_both(a: &str, b: &str) -> bool {
    a == b
        || strip_marks(a.chars())
            .flat_map(char::to_lowercase)
            .eq(strip_marks(b.chars()).flat_map(char::to_lowercase))
}

macro_rules! impl_text_equality {
    ($policy:ty, $char_fn:ident, $str_fn:ident) => {
        impl Equality<char> for $policy {
            #[inline]
            fn equals(&self, a: &char, b: &char) -> bool {
                $char_fn(*a, *b)
            }
        }

        impl Equality<str> for $policy {
            #[inline]
            fn equals(&self, a: &str, b: &str) -> bool {
                $str_fn(a, b)
            }
        }

        impl Equality<String> for $policy {
            #[inline]
            fn equals(&self, a: &String, b: &String) -> bool {
                $str_fn(a, b)
            }
        }

        impl<'a> Equality<&'a str> for $policy {
            #[inline]
            fn equals(&self, a: &&'a str, b: &&'a str) -> bool {
                $str_fn(a, b)
            }
        }
    };
}

impl_text_equality!(IgnoreCase, char_eq_ignore_case, str_eq_ignore_case);
impl_text_equality!(IgnoreDiacritics, char_eq_ignore_diacritics, str_eq_ignore_diacritics);
impl_text_equality!(IgnoreCaseAndDiacritics, char_eq_ignore_both, str_eq_ignore_both);

/// Named text comparer, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EqualityMode {
    #[default]
    Exact,
    IgnoreCase,
    IgnoreDiacritics,
    IgnoreCaseAndDiacritics,
}

impl EqualityMode {
    /// Compare two characters under this mode.
    #[must_use]
    pub fn chars_equal(self, a: char, b: char) -> bool {
        match self {
            EqualityMode::Exact => a == b,
            EqualityMode::IgnoreCase => char_eq_ignore_case(a, b),
            EqualityMode::IgnoreDiacritics => char_eq_ignore_diacritics(a, b),
            EqualityMode::IgnoreCaseAndDiacritics => char_eq_ignore_both(a, b),
        }
    }
}
