// src/scrape/courses.rs
// Course pipeline: the catalog index lists course labels, each course page
// carries a suggested curriculum, either one tree or several named
// variants. Structurally independent from the disciplines pipeline; trees
// are never validated against the corpus.

use crate::config::consts::{
    CATALOG_PREFIX, CODE_NAME_SEPARATOR, COURSE_LABEL_CLASS, DISCIPLINE_HREF,
    PLAIN_COURSE_ANCHOR, SEMESTER_HEADING, VARIANT_HEADING_IGNORE,
};
use crate::core::{html, net};
use crate::data::{Course, Variant};
use crate::error::{Result, ScrapeError};
use crate::progress::Progress;

fn course_path(code: u32) -> String {
    format!("{CATALOG_PREFIX}cursos/{code}g/sugestao.html")
}

/// Courses from the catalog index, without trees. Labels that do not carry
/// a numeric code are logged and skipped.
pub fn parse_course_index(doc: &str) -> Vec<Course> {
    let mut courses = Vec::new();
    for block in html::blocks_with_class(doc, COURSE_LABEL_CLASS) {
        let text = html::inner_text(block);
        match parse_course_label(&text) {
            Some(course) => courses.push(course),
            None => loge!("unparseable course label: {text:?}"),
        }
    }
    courses
}

fn parse_course_label(text: &str) -> Option<Course> {
    let (code, name) = text.split_once(CODE_NAME_SEPARATOR)?;
    Some(Course::new(code.trim().parse().ok()?, name))
}

/// A course has exactly one curriculum when its page carries the plain
/// `<a name="...codigo...">` anchor; otherwise the page lists variants.
pub fn has_variants(doc: &str) -> bool {
    !html::has_tag_with_attr(doc, "a", "name", PLAIN_COURSE_ANCHOR)
}

/// Ordered semesters under `scope`: every `h3` mentioning "semestre"
/// opens one, and the heading's next element holds the discipline links.
pub fn parse_tree(scope: &str) -> Vec<Vec<String>> {
    let mut semesters = Vec::new();
    let mut pos = 0;
    while let Some((_, end)) = html::tag_with_text(scope, "h3", SEMESTER_HEADING, pos) {
        pos = end;
        let Some(content) = html::next_element_after(scope, end) else { continue };
        semesters.push(semester_codes(content));
    }
    semesters
}

fn semester_codes(content: &str) -> Vec<String> {
    html::link_texts(content, DISCIPLINE_HREF)
        .iter()
        .filter_map(|text| discipline_code(text))
        .collect()
}

/// Link text is "CODE credit-info"; keep the code. A one-character first
/// token means the code itself embeds a space ("F 128").
fn discipline_code(link_text: &str) -> Option<String> {
    let mut parts = link_text.split_whitespace();
    let first = parts.next()?;
    if first.chars().count() == 1 {
        let second = parts.next()?;
        Some(format!("{first} {second}"))
    } else {
        Some(first.to_string())
    }
}

/// Variants are delimited by `h2` headings; each variant's tree is built
/// from the slice between its heading and the next one. Note headings
/// ("Observação...") are not variants.
pub fn parse_variants(doc: &str) -> Vec<Variant> {
    let mut headings = Vec::new();
    let mut pos = 0;
    while let Some(span) = html::tag_block(doc, "h2", pos) {
        pos = span.1;
        headings.push(span);
    }

    let mut variants = Vec::new();
    for (i, &(start, end)) in headings.iter().enumerate() {
        let name = html::inner_text(&doc[start..end]);
        if name.is_empty() || name.to_lowercase().starts_with(VARIANT_HEADING_IGNORE) {
            continue;
        }
        let scope_end = headings.get(i + 1).map_or(doc.len(), |&(next_start, _)| next_start);
        variants.push(Variant { name, tree: parse_tree(&doc[end..scope_end]) });
    }
    variants
}

/// Fetch the course index, then every course page, sequentially.
pub fn collect_courses(mut progress: Option<&mut dyn Progress>) -> Result<Vec<Course>> {
    let index = net::http_get(&format!("{CATALOG_PREFIX}index.html"))?;
    let mut courses = parse_course_index(&index);
    if courses.is_empty() {
        return Err(ScrapeError::Structure("no course labels on the catalog index".into()));
    }

    if let Some(p) = progress.as_deref_mut() {
        p.begin(courses.len());
    }

    for course in &mut courses {
        let page = net::http_get(&course_path(course.code))?;
        if has_variants(&page) {
            course.variants = parse_variants(&page);
        } else {
            course.tree = Some(parse_tree(&page));
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&course.code.to_string());
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(courses)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE_INDEX: &str = r#"
        <div><span class="rotulo-curso">34 - Engenharia de Computação</span></div>
        <div><span class="rotulo-curso">42 - Ciência da Computação</span></div>
        <div><span class="rotulo-curso">AB - Não Numérico</span></div>
        <div><span class="rotulo-curso">sem separador</span></div>
    "#;

    const PLAIN_COURSE: &str = r#"
        <a name="esp.codigo"></a>
        <h3>1º Semestre</h3>
        <table>
          <tr><td><a href="../disciplinas/mc.html#MC102">MC102 6</a></td></tr>
          <tr><td><a href="../disciplinas/f.html#F 128">F 128 4</a></td></tr>
          <tr><td><a href="outra.html">Atividade sem código</a></td></tr>
        </table>
        <h3>2º Semestre</h3>
        <table>
          <tr><td><a href="../disciplinas/mc.html#MC202">MC202 6</a></td></tr>
        </table>
        <h3>Observações</h3>
        <p>texto livre</p>
    "#;

    const VARIANT_COURSE: &str = r#"
        <h2>AA - Opção Sistemas</h2>
        <h3>1º Semestre</h3>
        <div><a href="../disciplinas/mc.html#MC102">MC102 6</a></div>
        <h2>BB - Opção Teoria</h2>
        <h3>1º Semestre</h3>
        <div><a href="../disciplinas/ma.html#MA111">MA111 6</a></div>
        <h2>Observação</h2>
        <p>nota</p>
    "#;

    #[test]
    fn index_parses_numeric_labels_and_skips_the_rest() {
        let courses = parse_course_index(COURSE_INDEX);
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].code, 34);
        assert_eq!(courses[0].name, "Engenharia de Computação");
        assert_eq!(courses[1].code, 42);
    }

    #[test]
    fn course_path_shape() {
        assert!(course_path(34).ends_with("/cursos/34g/sugestao.html"));
    }

    #[test]
    fn plain_course_is_detected_by_its_anchor() {
        assert!(!has_variants(PLAIN_COURSE));
        assert!(has_variants(VARIANT_COURSE));
    }

    #[test]
    fn tree_collects_semesters_in_order() {
        let tree = parse_tree(PLAIN_COURSE);
        assert_eq!(tree, vec![vec!["MC102".to_string(), "F 128".into()], vec!["MC202".into()]]);
    }

    #[test]
    fn spaced_codes_are_rejoined() {
        assert_eq!(discipline_code("F 128 4"), Some("F 128".into()));
        assert_eq!(discipline_code("MC102 6"), Some("MC102".into()));
        assert_eq!(discipline_code("MC102"), Some("MC102".into()));
        assert_eq!(discipline_code(""), None);
        assert_eq!(discipline_code("F"), None);
    }

    #[test]
    fn variants_are_split_on_headings() {
        let variants = parse_variants(VARIANT_COURSE);
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].name, "AA - Opção Sistemas");
        assert_eq!(variants[0].tree, vec![vec!["MC102".to_string()]]);
        assert_eq!(variants[1].name, "BB - Opção Teoria");
        assert_eq!(variants[1].tree, vec![vec!["MA111".to_string()]]);
    }
}
