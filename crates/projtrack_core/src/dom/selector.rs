//! Minimal compound selector: `tag`, `#id`, `.class` or a combination such
//! as `ul.droppable` or `input#title`.

use once_cell::sync::Lazy;
use regex::Regex;

static SELECTOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<tag>[A-Za-z][A-Za-z0-9-]*)?(?:#(?P<id>[A-Za-z0-9_-]+))?(?:\.(?P<class>[A-Za-z0-9_-]+))?$")
        .expect("valid selector regex")
});

/// Parsed simple selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub class: Option<String>,
}

impl Selector {
    /// Parses one selector. Returns `None` for empty or unsupported syntax.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let caps = SELECTOR_RE.captures(trimmed)?;
        let part = |name| caps.name(name).map(|m| m.as_str().to_string());
        Some(Self {
            tag: part("tag").map(|tag| tag.to_ascii_lowercase()),
            id: part("id"),
            class: part("class"),
        })
    }

    pub(crate) fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(expected) = &self.tag {
            if !tag.eq_ignore_ascii_case(expected) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if id != Some(expected.as_str()) {
                return false;
            }
        }
        if let Some(expected) = &self.class {
            if !classes.iter().any(|class| class == expected) {
                return false;
            }
        }
        true
    }
}
