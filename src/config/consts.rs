// src/config/consts.rs

// Net config
pub const HOST: &str = "www.dac.unicamp.br";
pub const CATALOG_PREFIX: &str = "/sistemas/catalogos/grad/catalogo2021/";
pub const DISCIPLINES_PREFIX: &str = "/sistemas/catalogos/grad/catalogo2021/disciplinas/";

// Page structure: patterns matched against class/id/name attributes
// and tag text, always case-insensitively.
pub const INITIALS_LISTING_CLASS: &str = "disc";
pub const DISCIPLINE_ROW_CLASS: &str = "row";
pub const DISCIPLINE_HEADER_ID: &str = "disc";
pub const REQUIREMENTS_LABEL: &str = "requisitos";
pub const COURSE_LABEL_CLASS: &str = "rotulo-curso";
pub const SEMESTER_HEADING: &str = "semestre";
pub const DISCIPLINE_HREF: &str = "disc";
pub const PLAIN_COURSE_ANCHOR: &str = "codigo";
pub const VARIANT_HEADING_IGNORE: &str = "observa";

// Code and name as printed in headers: "MC102 - Algoritmos e ..."
pub const CODE_NAME_SEPARATOR: &str = " - ";

// Concurrency
pub const WORKERS: usize = 12;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Logging
pub const LOG_FILE: &str = "scrape.log";
