//! Response sanitizer
//!
//! The deployed model tends to open its answers with a fixed self-introduction
//! ("Hi, I am Carenzaa...", "How can I help you?"). This module strips that
//! preamble while keeping lines that carry real content.
//!
//! Everything here is pure string work so it can be tested in isolation from
//! the network and session code.

use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases that mark a line as self-introduction boilerplate
pub const DEFAULT_BOILERPLATE_MARKERS: &[&str] =
    &["Hi, I am Carenzaa", "How can I help you", "I am Carenzaa"];

/// Phrases that mark a line as useful content, even when it also carries boilerplate
pub const DEFAULT_CONTENT_MARKERS: &[&str] = &["To become", "Here's"];

/// Results shorter than this many characters are treated as over-stripped
pub const DEFAULT_MIN_LENGTH: usize = 20;

static DEFAULT_SANITIZER: Lazy<Sanitizer> = Lazy::new(|| {
    Sanitizer::new(SanitizerConfig::default()).expect("default sanitizer markers are valid")
});

/// Tunable markers and thresholds for the sanitizer
///
/// The defaults are tied to the currently deployed model. A different
/// backend will introduce itself differently, so all of them can be
/// overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizerConfig {
    pub boilerplate_markers: Vec<String>,
    pub content_markers: Vec<String>,
    pub min_length: usize,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            boilerplate_markers: DEFAULT_BOILERPLATE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            content_markers: DEFAULT_CONTENT_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}

/// Best-effort remover of the model's introductory preamble
///
/// Never returns an empty string for non-empty input. There is no guarantee
/// that every piece of boilerplate is removed.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    config: SanitizerConfig,
    /// Matches one leading sentence that opens with a boilerplate marker
    intro: Option<Regex>,
}

impl Sanitizer {
    /// Build a sanitizer, compiling the introductory-sentence pattern from the markers
    pub fn new(config: SanitizerConfig) -> Result<Self, regex::Error> {
        let escaped: Vec<String> = config
            .boilerplate_markers
            .iter()
            .filter(|m| !m.is_empty())
            .map(|m| regex::escape(m))
            .collect();

        let intro = if escaped.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"^\s*(?:{})[^.?!\n]*[.?!]\s*",
                escaped.join("|")
            ))?)
        };

        Ok(Self { config, intro })
    }

    /// Markers and thresholds in use
    pub fn config(&self) -> &SanitizerConfig {
        &self.config
    }

    /// Strip the introductory preamble from a model answer
    pub fn clean(&self, text: &str) -> String {
        let kept: Vec<&str> = text
            .split('\n')
            .filter_map(|line| self.filter_line(line))
            .collect();
        let joined = kept.join("\n");
        let cleaned = joined.trim();

        if !cleaned.is_empty() && cleaned.chars().count() >= self.config.min_length {
            return cleaned.to_string();
        }

        // Over-stripped: fall back to removing only the opening introduction
        let fallback = self.strip_intro(text).trim();
        if fallback.is_empty() || self.is_only_boilerplate(fallback) {
            text.to_string()
        } else {
            fallback.to_string()
        }
    }

    /// Boilerplate with nothing marked as content alongside it
    fn is_only_boilerplate(&self, text: &str) -> bool {
        contains_any(text, &self.config.boilerplate_markers)
            && !contains_any(text, &self.config.content_markers)
    }

    /// Decide what survives of a single line
    fn filter_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        if !contains_any(line, &self.config.boilerplate_markers) {
            return Some(line);
        }

        if !contains_any(line, &self.config.content_markers) {
            return None;
        }

        let rest = self.strip_intro(line);
        if rest.trim().is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    /// Remove consecutive introductory sentences from the start of `text`
    fn strip_intro<'a>(&self, text: &'a str) -> &'a str {
        let Some(intro) = &self.intro else {
            return text;
        };

        let mut rest = text;
        while let Some(found) = intro.find(rest) {
            if found.end() == 0 {
                break;
            }
            rest = &rest[found.end()..];
        }
        rest
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        DEFAULT_SANITIZER.clone()
    }
}

/// Clean text with the default markers
pub fn clean(text: &str) -> String {
    DEFAULT_SANITIZER.clean(text)
}

fn contains_any(line: &str, markers: &[String]) -> bool {
    markers
        .iter()
        .any(|marker| !marker.is_empty() && line.contains(marker.as_str()))
}
