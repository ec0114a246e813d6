// src/scrape/disciplines.rs
// Section extraction for the disciplines pipeline: the index page lists
// section initials, each section page lists discipline blocks. Sections
// are fetched by a fixed worker pool and joined before anything else
// happens to them; the resolver in src/corpus.rs needs every section.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use crate::config::consts::{
    CODE_NAME_SEPARATOR, DISCIPLINE_HEADER_ID, DISCIPLINE_ROW_CLASS, DISCIPLINES_PREFIX,
    INITIALS_LISTING_CLASS, JITTER_MS, REQUEST_PAUSE_MS, REQUIREMENTS_LABEL, WORKERS,
};
use crate::core::{html, net};
use crate::data::{Discipline, SectionMap};
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;
use crate::requirements;

fn section_path(initials: &str) -> String {
    format!("{DISCIPLINES_PREFIX}{}.html", initials.to_lowercase())
}

/// Section keys from the disciplines index page: the listing block's child
/// divs, uppercased, interior spaces folded to underscores.
pub fn parse_initials(doc: &str) -> Option<Vec<String>> {
    let listing = html::first_with_class(doc, INITIALS_LISTING_CLASS)?;
    let initials = html::blocks_of_tag(html::inner_html(listing), "div")
        .iter()
        .map(|block| html::inner_text(block).to_uppercase().replace(' ', "_"))
        .filter(|s| !s.is_empty())
        .collect();
    Some(initials)
}

pub fn fetch_initials() -> Result<Vec<String>> {
    let doc = net::http_get(&format!("{DISCIPLINES_PREFIX}index.html"))?;
    parse_initials(&doc).ok_or_else(|| {
        ScrapeError::Structure("initials listing missing from the disciplines index".into())
    })
}

/// All discipline records on one section page. A block that cannot yield a
/// header is dropped; nothing here aborts the section.
pub fn parse_section(doc: &str) -> SectionMap {
    let mut section = SectionMap::new();
    for block in html::blocks_with_class(doc, DISCIPLINE_ROW_CLASS) {
        let Some(discipline) = parse_discipline(block) else { continue };
        section.insert(discipline.code.clone(), discipline);
    }
    section
}

/// One discipline block. The header element (id contains "disc") carries
/// "CODE - Name"; the requirement string sits in the element after the
/// "Pré-Requisitos" label. A missing header skips the discipline; a
/// missing or unparseable requirement string only nulls `reqs`.
fn parse_discipline(block: &str) -> Option<Discipline> {
    let header = html::first_with_id(block, DISCIPLINE_HEADER_ID)?;
    let text = html::inner_text(header);
    let (code, name) = text.split_once(CODE_NAME_SEPARATOR)?;

    let reqs = match requirement_text(block) {
        Some(raw) => requirements::parse_expression(&raw),
        None => None,
    };

    Some(Discipline { code: code.to_string(), name: name.to_string(), reqs })
}

fn requirement_text(block: &str) -> Option<String> {
    let (_, label_end) = html::leaf_with_text(block, REQUIREMENTS_LABEL)?;
    let sibling = html::next_element_after(block, label_end)?;
    Some(html::inner_text(sibling))
}

pub fn fetch_section(initials: &str) -> Result<SectionMap> {
    let doc = net::http_get(&section_path(initials))?;
    Ok(parse_section(&doc))
}

/// Fetch and parse every section on a fixed worker pool, then join.
///
/// Workers pull section keys off a shared cursor and report each result
/// over a channel; the coordinator is the sole receiver. Any retrieval
/// failure aborts the whole run: a missing section would turn every
/// reference into it into a false "special" flag during resolution.
///
/// The joined list is sorted by section key so downstream iteration order
/// never depends on worker timing.
pub fn collect_sections(
    initials: &[String],
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<(String, SectionMap)>> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(initials.len());
    }

    type FetchOk = (String, SectionMap);
    type FetchErr = (String, ScrapeError);

    let keys = Arc::new(initials.to_vec());
    let cursor = Arc::new(AtomicUsize::new(0));
    let (res_tx, res_rx) = mpsc::channel::<std::result::Result<FetchOk, FetchErr>>();

    let workers = WORKERS.min(keys.len()).max(1);

    for _ in 0..workers {
        let keys = Arc::clone(&keys);
        let cursor = Arc::clone(&cursor);
        let tx = res_tx.clone();

        thread::spawn(move || {
            loop {
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                if i >= keys.len() {
                    break;
                }
                let key = keys[i].clone();
                let result = match fetch_section(&key) {
                    Ok(section) => Ok((key, section)),
                    Err(e) => Err((keys[i].clone(), e)),
                };
                let _ = tx.send(result);
                let jitter = (i as u64) % JITTER_MS;
                thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS + jitter)); // be polite
            }
        });
    }
    drop(res_tx); // coordinator is sole receiver now

    let mut sections: Vec<FetchOk> = Vec::with_capacity(keys.len());
    for _ in 0..keys.len() {
        match res_rx.recv() {
            Ok(Ok((key, section))) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&key);
                }
                sections.push((key, section));
            }
            Ok(Err((key, e))) => {
                loge!("section {key}: {e}");
                return Err(e);
            }
            Err(_) => break, // workers ended early; bail gracefully
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    sections.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Requirement;

    const INDEX: &str = r#"
        <html><body>
          <div class="cols disciplinas">
            <div><a href="aa.html">AA</a></div>
            <div>F </div>
            <div>ce co</div>
            <div>mc</div>
          </div>
        </body></html>
    "#;

    const SECTION: &str = r#"
        <html><body>
          <div class="row">
            <h2 id="disc_MC102">MC102 - Algoritmos e Programação de Computadores</h2>
            <p><b>Pré-Requisitos:</b><br/><span></span></p>
          </div>
          <div class="row">
            <h2 id="disc_MC404">MC404 - Organização Básica de Computadores - RISC-V</h2>
            <p><b>Pré-Requisitos:</b><br/><span>MC102 ou *MC102+F 128</span></p>
          </div>
          <div class="row">
            <h2 id="disc_MC999">MC999 - Tópicos Especiais</h2>
            <p><b>Pré-Requisitos:</b><br/><span>AA200-AB12</span></p>
          </div>
          <div class="row">
            <h2 id="disc_MC888">MC888 - Disciplina Sem Bloco</h2>
          </div>
          <div class="row">
            <p>malformed block without a header</p>
          </div>
        </body></html>
    "#;

    #[test]
    fn initials_are_uppercased_and_underscored() {
        // Leading/trailing whitespace is collapsed away by text extraction;
        // interior spaces become underscores.
        assert_eq!(
            parse_initials(INDEX),
            Some(vec!["AA".into(), "F".into(), "CE_CO".into(), "MC".into()])
        );
    }

    #[test]
    fn initials_listing_missing_is_none() {
        assert_eq!(parse_initials("<html><body></body></html>"), None);
    }

    #[test]
    fn section_path_lowercases_initials() {
        assert!(section_path("F_").ends_with("/disciplinas/f_.html"));
    }

    #[test]
    fn section_parses_every_recoverable_block() {
        let section = parse_section(SECTION);
        assert_eq!(section.len(), 4); // headerless block dropped

        // Empty requirement string: valid, zero groups.
        assert_eq!(section["MC102"].reqs, Some(vec![]));

        // Full expression, order preserved.
        assert_eq!(
            section["MC404"].reqs,
            Some(vec![
                vec![Requirement::new("MC102", false)],
                vec![Requirement::new("MC102", true), Requirement::new("F 128", false)],
            ])
        );

        // Unparseable token nulls the whole expression.
        assert_eq!(section["MC999"].reqs, None);

        // Requirement fragment structurally absent.
        assert_eq!(section["MC888"].reqs, None);
    }

    #[test]
    fn name_keeps_separators_past_the_first() {
        let section = parse_section(SECTION);
        assert_eq!(section["MC404"].name, "Organização Básica de Computadores - RISC-V");
    }

    #[test]
    fn empty_key_set_joins_immediately() {
        let sections = collect_sections(&[], None).unwrap();
        assert!(sections.is_empty());
    }
}
