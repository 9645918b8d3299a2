//! Server-rendered modal markup helpers
//!
//! The markup is opaque except for two things: dropping the legacy
//! `container` class on the dialog body's direct `div` children, and a
//! plain-text rendering for terminals.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][A-Za-z0-9-]*)([^>]*?)(/?)>").expect("hardcoded tag regex is valid")
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)(class\s*=\s*(?:"([^"]*)"|'([^']*)'))"#)
        .expect("hardcoded class regex is valid")
});

static SKIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("hardcoded script regex is valid")
});

static BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|h[1-6]|li|tr|section|header|footer)\s*>")
        .expect("hardcoded break regex is valid")
});

static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("hardcoded tag regex is valid"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Class dropped from `.modal-body > div` for older templates
pub const LEGACY_CONTAINER_CLASS: &str = "container";

fn class_value<'a>(caps: &'a Captures<'_>) -> &'a str {
    caps.get(2)
        .or_else(|| caps.get(3))
        .map_or("", |m| m.as_str())
}

fn has_class(attrs: &str, class: &str) -> bool {
    CLASS_RE
        .captures(attrs)
        .is_some_and(|caps| class_value(&caps).split_whitespace().any(|c| c == class))
}

/// Remove one class token from an opening tag; `None` if absent
fn remove_class(tag: &str, class: &str) -> Option<String> {
    let caps = CLASS_RE.captures(tag)?;
    // group 1 excludes the separating whitespace
    let whole = caps.get(1)?;
    let classes: Vec<&str> = class_value(&caps).split_whitespace().collect();
    if !classes.contains(&class) {
        return None;
    }

    let remaining: Vec<&str> = classes.into_iter().filter(|c| *c != class).collect();
    let before = &tag[..whole.start()];
    let after = &tag[whole.end()..];

    Some(if remaining.is_empty() {
        format!("{}{after}", before.trim_end())
    } else {
        format!("{before}class=\"{}\"{after}", remaining.join(" "))
    })
}

/// Drop the legacy `container` class from `div`s directly under `.modal-body`
///
/// Other classes and all other elements are left untouched.
pub fn strip_legacy_container(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut copied = 0;
    // open elements: (name, is a modal body)
    let mut open: Vec<(String, bool)> = Vec::new();

    for caps in TAG_RE.captures_iter(markup) {
        let Some(whole) = caps.get(0) else { continue };
        let name = caps[2].to_ascii_lowercase();

        if !caps[1].is_empty() {
            if let Some(pos) = open.iter().rposition(|(n, _)| *n == name) {
                open.truncate(pos);
            }
            continue;
        }

        let attrs = &caps[3];
        let parent_is_body = open.last().is_some_and(|(_, body)| *body);
        if parent_is_body && name == "div" {
            if let Some(rewritten) = remove_class(whole.as_str(), LEGACY_CONTAINER_CLASS) {
                out.push_str(&markup[copied..whole.start()]);
                out.push_str(&rewritten);
                copied = whole.end();
            }
        }

        let self_closing = !caps[4].is_empty() || VOID_ELEMENTS.contains(&name.as_str());
        if !self_closing {
            let is_body = has_class(attrs, "modal-body");
            open.push((name, is_body));
        }
    }

    out.push_str(&markup[copied..]);
    out
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Plain-text rendering of markup, one block per line
pub fn modal_text(markup: &str) -> String {
    let without_scripts = SKIP_RE.replace_all(markup, "");
    let with_breaks = BREAK_RE.replace_all(&without_scripts, "\n");
    let stripped = ANY_TAG_RE.replace_all(&with_breaks, " ");
    let decoded = decode_entities(&stripped);

    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
