// src/core/sanitize.rs
//! Field normalizer: pure cell-value cleaning.
//!
//! Everything here is stateless and works on cell markup or text. Row-level
//! decisions (which column, reject or keep) belong to the dataset specs.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::grid::Cell;
use crate::record::Side;

// Attribute run of a start tag; quoted values may contain `>`.
macro_rules! attrs_re {
    () => {
        r#"(?:[^>"']|"[^"]*"|'[^']*')*"#
    };
}

static SUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(r"(?is)<sup\b", attrs_re!(), r">.*?</sup\s*>")).expect("sup regex")
});
static BR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"(?i)<br\b", attrs_re!(), ">")).expect("br regex"));
static CITATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("citation regex"));
static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("paren regex"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("entity regex")
});
static SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bsrc=(?:"([^"]*)"|'([^']*)')"#).expect("src regex"));
static THUMB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+px-").expect("thumb regex"));
static DIAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\d][\d\s\-()]*").expect("dial regex"));
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year regex"));
static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(concat!(r"(?i)</?a\b", attrs_re!(), ">")).expect("anchor regex"));
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w\S*").expect("word regex"));

/// Thumbnail width requested for flag images.
pub const FLAG_WIDTH_SEGMENT: &str = "/320px-";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text (country names, notes).
    Text,
    /// Short codes: a parenthetical is a qualifier, not part of the code.
    Code,
}

/// Clean a cell into a single-line scalar string.
pub fn clean_cell(cell: &Cell, kind: FieldKind) -> String {
    clean_markup(cell.markup(), kind)
}

/// Superscripts (with content) out, `<br>` to newline, other tags out,
/// entities decoded, `[…]` citations out, parentheticals out for codes,
/// first line only, whitespace collapsed.
pub fn clean_markup(markup: &str, kind: FieldKind) -> String {
    let s = SUP_RE.replace_all(markup, "");
    let s = BR_RE.replace_all(&s, "\n");
    let s = decode_entities(&remove_tags(&s));
    let s = CITATION_RE.replace_all(&s, "");
    let s = match kind {
        FieldKind::Code => PAREN_RE.replace_all(&s, ""),
        FieldKind::Text => s,
    };
    normalize_ws(first_line(&s))
}

/// Remove `[1]`, `[a]`, `[note 2]` style markers.
pub fn strip_citations(s: &str) -> String {
    s!(CITATION_RE.replace_all(s, "").trim())
}

/// First non-empty line, trimmed.
pub fn first_line(s: &str) -> &str {
    s.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

/// Remove all `<...>` tags. Text between tags is kept as-is; a `>` inside a
/// quoted attribute value does not end the tag.
pub fn remove_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    for ch in s.chars() {
        if !in_tag {
            if ch == '<' { in_tag = true; } else { out.push(ch); }
            continue;
        }
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '>') => in_tag = false,
            _ => {}
        }
    }
    out
}

/// Decode numeric character references and the handful of named ones that
/// show up in table cells. Unknown names pass through untouched.
pub fn decode_entities(s: &str) -> String {
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "nbsp" => Some('\u{a0}'),
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    _ => None,
                }
            };
            match decoded {
                Some(ch) => ch.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Collapse sequences of whitespace (including no-break spaces) into a single
/// space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    s!(out.trim())
}

/// First image `src` in the markup, made absolute and upgraded to the larger
/// thumbnail. Empty when the cell has no image.
pub fn flag_url(markup: &str) -> String {
    let Some(src) = SRC_RE
        .captures(markup)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str())
    else {
        return s!();
    };
    let abs = if src.starts_with("//") { join!("https:", src) } else { s!(src) };
    THUMB_RE.replace_all(&abs, FLAG_WIDTH_SEGMENT).into_owned()
}

/// Leading calling-code run (`+1 (242)`, `44`, `+7 6-7`), always `+`-prefixed.
/// `None` when the text holds no code at all.
pub fn dial_code(text: &str) -> Option<String> {
    let m = DIAL_RE.find(text)?;
    let code = m.as_str().trim();
    if !code.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(if code.starts_with('+') { s!(code) } else { join!("+", code) })
}

/// First standalone four-digit run, e.g. the year of a traffic switch.
pub fn first_year(text: &str) -> Option<String> {
    YEAR_RE.find(text).map(|m| s!(m.as_str()))
}

/// `Left` when the text says "Left" (case-sensitive); `Right` for anything
/// else, including empty or unreadable text.
pub fn classify_side(text: &str) -> Side {
    if text.contains("Left") { Side::Left } else { Side::Right }
}

/// Drop `<a ...>` / `</a>` wrappers, keeping what they wrap.
pub fn unwrap_anchors(markup: &str) -> String {
    s!(ANCHOR_RE.replace_all(markup, "").trim())
}

/// "ENGLISH and french" → "English And French".
pub fn title_case(s: &str) -> String {
    WORD_RE
        .replace_all(s, |caps: &Captures| {
            let word = &caps[0];
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => s!(),
            }
        })
        .into_owned()
}

/// Cache-file stem for a URL: lower-case, whitespace → `_`, anything other
/// than word characters and `-` dropped.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_us = false;
    for ch in s.to_lowercase().chars() {
        if ch.is_alphanumeric() || ch == '-' { out.push(ch); last_us = false; }
        else if ch == '_' || ch.is_whitespace() {
            if !last_us { out.push('_'); last_us = true; }
        }
    }
    s!(out.trim_matches('_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_drops_citations_sup_and_tags() {
        let m = r##"<a href="/wiki/Andorra">Andorra</a><sup id="cite_ref-1" class="reference"><a href="#cite_note-1">[1]</a></sup>"##;
        assert_eq!(clean_markup(m, FieldKind::Text), "Andorra");
        assert_eq!(clean_markup("France[a][note 3]", FieldKind::Text), "France");
    }

    #[test]
    fn quoted_gt_stays_inside_tag() {
        let m = r#"<a href="/wiki/Andorra" title="Andorra > Europe">Andorra</a><br data-x='a>b'>Europe"#;
        assert_eq!(remove_tags(m), "AndorraEurope");
        assert_eq!(clean_markup(m, FieldKind::Text), "Andorra");
        assert_eq!(unwrap_anchors(r#"<a title="1 > 0">.ad</a>"#), ".ad");
        assert_eq!(clean_markup(r#"X<sup title="a>b">[1]</sup>"#, FieldKind::Text), "X");
    }

    #[test]
    fn clean_code_drops_parenthetical() {
        assert_eq!(clean_markup("GBZ (Gibraltar)", FieldKind::Code), "GBZ");
        assert_eq!(clean_markup("GBZ (Gibraltar)", FieldKind::Text), "GBZ (Gibraltar)");
    }

    #[test]
    fn clean_keeps_first_line() {
        assert_eq!(clean_markup("\n Monaco \nformerly MC", FieldKind::Text), "Monaco");
        assert_eq!(clean_markup("RUS<br/>SU (until 1992)", FieldKind::Code), "RUS");
    }

    #[test]
    fn entities_decoded_and_ws_collapsed() {
        assert_eq!(clean_markup("Bosnia&#160;and&nbsp;Herzegovina", FieldKind::Text), "Bosnia and Herzegovina");
        assert_eq!(decode_entities("&#x2B;44 &amp; &bogus; &#99999999;"), "+44 & &bogus; &#99999999;");
    }

    #[test]
    fn flag_url_upgraded() {
        let m = r#"<span><img alt="" src="//upload.site/x/y/flag.svg/23px-flag.svg.png" width="23"></span>"#;
        assert_eq!(flag_url(m), "https://upload.site/x/y/flag.svg/320px-flag.svg.png");
        assert_eq!(flag_url(r#"<img src="https://a/b/40px-c.png">"#), "https://a/b/320px-c.png");
        assert_eq!(flag_url("no image"), "");
    }

    #[test]
    fn dial_code_variants() {
        assert_eq!(dial_code("+1 (242)").as_deref(), Some("+1 (242)"));
        assert_eq!(dial_code("93").as_deref(), Some("+93"));
        assert_eq!(dial_code("code +7 6-7").as_deref(), Some("+7 6-7"));
        assert_eq!(dial_code("N/A"), None);
        assert_eq!(dial_code("+"), None);
    }

    #[test]
    fn year_and_side() {
        let t = "traffic keeps to the Left (changed 1967)";
        assert_eq!(classify_side(t), Side::Left);
        assert_eq!(first_year(t).as_deref(), Some("1967"));
        assert_eq!(classify_side("left"), Side::Right);
        assert_eq!(classify_side(""), Side::Right);
        assert_eq!(first_year("12345 and 88"), None);
    }

    #[test]
    fn anchors_unwrapped() {
        assert_eq!(
            unwrap_anchors(r#"<i><b><a href="/wiki/A">A</a></b>ndorra</i> "#),
            "<i><b>A</b>ndorra</i>"
        );
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("ENGLISH and french"), "English And French");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn slugify_url() {
        assert_eq!(
            slugify("https://en.wikipedia.org/wiki/Left-_and_right-hand_traffic"),
            "httpsenwikipediaorgwikileft-_and_right-hand_traffic"
        );
    }
}
