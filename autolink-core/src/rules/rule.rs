//! rule.rs - A single compiled link rule and the ordered rule snapshot.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::config::{LinkRule, MAX_PATTERN_LENGTH};
use crate::errors::AutolinkError;

/// Size limit for a compiled pattern.
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// One character that is not a word character, as seen by [`is_word_char`].
const NON_WORD: &str = r"[^\p{Alphabetic}\p{N}_]";

/// Name of the group holding the configured pattern inside the bounded matcher.
const MATCH_GROUP: &str = "__autolink_match";

/// Returns true for characters that may not touch either end of a match.
///
/// A word character is any Unicode alphanumeric character or `_`. Everything
/// else (whitespace, punctuation, symbols) and the edges of the text count
/// as a boundary.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Wraps `pattern` so it only matches between non-word characters or the
/// edges of the text.
fn bounded_pattern(pattern: &str) -> String {
    format!(
        "(?:^|{nw})(?P<{group}>(?:{pattern}))(?:{nw}|$)",
        nw = NON_WORD,
        group = MATCH_GROUP,
        pattern = pattern
    )
}

/// An immutable matcher/replacer pair.
///
/// Every rule enforces word boundaries on both sides of a match, regardless of
/// what its pattern looks like, so `foobar` never matches inside `foobarfoobar`.
#[derive(Clone)]
pub struct Rule {
    name: String,
    pattern: String,
    regex: Regex,
    /// The bare pattern anchored to a whole string, used to resolve `$1` and
    /// `${name}` against a match. Only built when captures are expanded.
    expander: Option<Regex>,
    replacement: String,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern)
            .field("replacement", &self.replacement)
            .field("expand_captures", &self.expander.is_some())
            .finish()
    }
}

impl Rule {
    /// Compiles a literal-replacement rule.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, AutolinkError> {
        Self::build(name.into(), pattern, replacement.into(), false, false)
    }

    /// Compiles the configured rule at position `index` of its configuration.
    pub fn from_config(link: &LinkRule, index: usize) -> Result<Self, AutolinkError> {
        Self::build(
            link.display_name(index),
            &link.pattern,
            link.replacement.clone(),
            link.expand_captures,
            link.case_insensitive,
        )
    }

    fn build(
        name: String,
        pattern: &str,
        replacement: String,
        expand_captures: bool,
        case_insensitive: bool,
    ) -> Result<Self, AutolinkError> {
        if pattern.is_empty() {
            return Err(AutolinkError::EmptyPattern { rule: name });
        }
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(AutolinkError::PatternLengthExceeded {
                rule: name,
                len: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        // Compile the bare pattern first so errors point at what the user wrote.
        if let Err(source) = compile(pattern, case_insensitive) {
            return Err(AutolinkError::InvalidPattern { rule: name, source });
        }

        let regex = match compile(&bounded_pattern(pattern), case_insensitive) {
            Ok(regex) => regex,
            Err(source) => return Err(AutolinkError::InvalidPattern { rule: name, source }),
        };

        let expander = if expand_captures {
            match compile(&format!("^(?:{})$", pattern), case_insensitive) {
                Ok(regex) => Some(regex),
                Err(source) => return Err(AutolinkError::InvalidPattern { rule: name, source }),
            }
        } else {
            None
        };

        Ok(Self {
            name,
            pattern: pattern.to_string(),
            regex,
            expander,
            replacement,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Replaces every word-bounded occurrence of the pattern in `text`.
    ///
    /// Matches are non-overlapping and scanned left to right. Scanning resumes
    /// after the consumed span, so the rule never sees its own replacement.
    /// Empty matches are ignored.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut rewritten: Option<String> = None;
        let mut last = 0;
        let mut pos = 0;

        while pos <= text.len() {
            let Some((whole_start, m)) = self.find_at(text, pos) else {
                break;
            };

            if m.is_empty() {
                pos = next_char_start(text, whole_start);
                continue;
            }

            let out = rewritten.get_or_insert_with(|| String::with_capacity(text.len()));
            out.push_str(&text[last..m.start]);
            self.push_replacement(&text[m.clone()], out);
            last = m.end;
            pos = m.end;
        }

        match rewritten {
            Some(mut out) => {
                out.push_str(&text[last..]);
                Cow::Owned(out)
            }
            None => Cow::Borrowed(text),
        }
    }

    /// Finds the next bounded match starting at or after `pos`. Returns where
    /// the whole match (separator included) starts and the span of the
    /// pattern itself.
    ///
    /// The separator in front of a match is consumed by the matcher, so when
    /// `pos` directly follows a non-word character the search runs on the
    /// rest of the text, where that character is the start of the haystack.
    fn find_at(&self, text: &str, pos: usize) -> Option<(usize, Range<usize>)> {
        let follows_separator =
            pos > 0 && text[..pos].chars().next_back().is_some_and(|c| !is_word_char(c));
        let (haystack, base) = if follows_separator {
            (&text[pos..], pos)
        } else {
            (text, 0)
        };

        let caps = self.regex.captures_at(haystack, pos - base)?;
        let whole = caps.get(0)?;
        let m = caps.name(MATCH_GROUP)?;
        Some((base + whole.start(), base + m.start()..base + m.end()))
    }

    fn push_replacement(&self, matched: &str, out: &mut String) {
        let caps = self
            .expander
            .as_ref()
            .and_then(|expander| expander.captures(matched));
        match caps {
            Some(caps) => caps.expand(&self.replacement, out),
            None => out.push_str(&self.replacement),
        }
    }
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

/// Byte index of the character following the one at `at`, or past the end.
fn next_char_start(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// One ordered, immutable snapshot of compiled rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Runs every rule over `text` in order, each one seeing the output of the
    /// previous one.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(text);
        for rule in &self.rules {
            let next = match rule.apply(&current) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = next {
                current = Cow::Owned(s);
            }
        }
        current
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
