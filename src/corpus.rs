// src/corpus.rs
// Whole-catalog index and the cross-reference pass over it. Resolution is
// strictly a second phase: it must only run once every section has been
// collected, otherwise codes living in a not-yet-loaded section would be
// flagged as unresolved.

use std::collections::HashSet;

use crate::data::{Corpus, SectionMap};

/// Section keys are the first two bytes of a discipline code.
pub const SECTION_PREFIX_LEN: usize = 2;

/// Aggregate per-section results into one corpus. Pure collection, no
/// transformation. Duplicate section keys are last-write-wins; the source
/// catalog never produces them.
pub fn build_corpus(sections: impl IntoIterator<Item = (String, SectionMap)>) -> Corpus {
    let mut corpus = Corpus::new();
    for (initials, section) in sections {
        corpus.insert(initials, section);
    }
    corpus
}

/// Two-level membership check: the code's prefix selects the section, the
/// full code is looked up in that section only. A prefix that matches no
/// section key means the code does not exist, no scan required.
pub fn code_exists(code: &str, corpus: &Corpus) -> bool {
    let Some(prefix) = code.get(..SECTION_PREFIX_LEN) else {
        return false;
    };
    corpus
        .get(prefix)
        .is_some_and(|section| section.contains_key(code))
}

/// Stamp `special: true` on every requirement whose code resolves to no
/// discipline in the corpus. Requirements that do resolve are left
/// untouched, so running this twice changes nothing.
pub fn resolve_special_flags(corpus: &mut Corpus) {
    // Lookups need the finished corpus while flags are being written, so
    // collect the unresolved codes first.
    let mut unresolved: HashSet<String> = HashSet::new();
    for section in corpus.values() {
        for discipline in section.values() {
            let Some(groups) = &discipline.reqs else { continue };
            for group in groups {
                for requirement in group {
                    if !code_exists(&requirement.code, corpus) {
                        unresolved.insert(requirement.code.clone());
                    }
                }
            }
        }
    }

    for section in corpus.values_mut() {
        for discipline in section.values_mut() {
            let Some(groups) = &mut discipline.reqs else { continue };
            for group in groups {
                for requirement in group {
                    if unresolved.contains(&requirement.code) {
                        requirement.special = Some(true);
                    }
                }
            }
        }
    }
}
