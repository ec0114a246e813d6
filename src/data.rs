// src/data.rs
// Serialized shapes for the two pipelines. Field order and optionality
// mirror the catalog JSON consumed downstream: `special` appears only when
// set, a course carries either `tree` or `variant`.

use std::collections::BTreeMap;

use serde::Serialize;

/// One prerequisite reference inside an AND-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Five-character discipline code, marker stripped. Taken as ground
    /// truth from the source text, never validated against section keys.
    pub code: String,
    /// Satisfiable while the referenced discipline is still in progress.
    pub partial: bool,
    /// Set to `Some(true)` by the resolver when `code` matches no known
    /// discipline anywhere in the corpus. Never `Some(false)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<bool>,
}

impl Requirement {
    pub fn new(code: impl Into<String>, partial: bool) -> Self {
        Self { code: code.into(), partial, special: None }
    }
}

/// OR-of-ANDs: satisfied when any one AND-group is fully satisfied.
/// An empty list means "no prerequisites" and is distinct from the
/// unparseable case, which is represented as an absent expression.
pub type RequirementExpression = Vec<Vec<Requirement>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discipline {
    pub code: String,
    pub name: String,
    /// `None` when the requirement text was absent or failed to parse.
    pub reqs: Option<RequirementExpression>,
}

/// Discipline code → record, one map per section.
pub type SectionMap = BTreeMap<String, Discipline>;

/// Section initials → section map, the whole catalog snapshot.
pub type Corpus = BTreeMap<String, SectionMap>;

/// One named curriculum of a course that offers several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub name: String,
    pub tree: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub code: u32,
    pub name: String,
    /// Ordered semesters, each an ordered list of discipline codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<Vec<String>>>,
    #[serde(rename = "variant", skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
}

impl Course {
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self { code, name: name.into(), tree: None, variants: Vec::new() }
    }
}
