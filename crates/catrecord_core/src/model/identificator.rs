//! Identificator derivation.
//!
//! The identificator is a display token recomputed on every write that
//! touches a cat's name. Derivation is a pure function of `(name, age, id)`
//! so callers can plug their own scheme into the service.

use crate::model::cat::CatId;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Pure derivation of a cat identificator.
pub trait IdentificatorStrategy {
    fn derive(&self, name: &str, age: i32, id: Option<CatId>) -> String;
}

/// Default scheme: `<slug>-<age>` before the first save, `<slug>-<age>-<id>`
/// afterwards.
///
/// `slug` is the lowercased name with whitespace runs collapsed to `-`. An
/// empty name yields an empty slug.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardIdentificator;

impl IdentificatorStrategy for StandardIdentificator {
    fn derive(&self, name: &str, age: i32, id: Option<CatId>) -> String {
        let slug = slugify(name);
        match id {
            Some(id) => format!("{slug}-{age}-{id}"),
            None => format!("{slug}-{age}"),
        }
    }
}

fn slugify(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim(), "-")
        .to_lowercase()
}
