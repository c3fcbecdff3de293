//! Interestingness filter for script URLs and inline script bodies.
//!
//! Each `FilterMode` is bound to an ordered list of compiled regex rules,
//! built once per process. Text is interesting iff no rule matches its
//! lower-cased form.

mod rules;

pub use rules::RuleCategory;

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use strum_macros::EnumIter;

/// Named rule set selected once per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, EnumIter)]
pub enum FilterMode {
    /// Broad rules, including vendor paths, minified builds and static assets
    Strict,
    /// Analytics, CDNs and well-known libraries only
    Relaxed,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Strict => "strict",
            FilterMode::Relaxed => "relaxed",
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled matcher.
#[derive(Debug)]
pub struct FilterRule {
    pub category: RuleCategory,
    pub pattern: Regex,
}

/// Ordered rules for one mode.
#[derive(Debug)]
pub struct FilterPolicy {
    mode: FilterMode,
    rules: Vec<FilterRule>,
}

static STRICT_POLICY: LazyLock<FilterPolicy> =
    LazyLock::new(|| FilterPolicy::compile(FilterMode::Strict, rules::STRICT_RULES));

static RELAXED_POLICY: LazyLock<FilterPolicy> =
    LazyLock::new(|| FilterPolicy::compile(FilterMode::Relaxed, rules::RELAXED_RULES));

impl FilterPolicy {
    /// The shared, compiled policy for `mode`.
    pub fn for_mode(mode: FilterMode) -> &'static FilterPolicy {
        match mode {
            FilterMode::Strict => &STRICT_POLICY,
            FilterMode::Relaxed => &RELAXED_POLICY,
        }
    }

    /// Compiles a rule table. Patterns that fail to compile are logged and
    /// left out rather than taking the process down.
    pub fn compile(mode: FilterMode, table: &[(RuleCategory, &str)]) -> Self {
        let rules = table
            .iter()
            .filter_map(|(category, pattern)| match Regex::new(pattern) {
                Ok(pattern) => Some(FilterRule {
                    category: *category,
                    pattern,
                }),
                Err(e) => {
                    log::error!("Failed to compile {mode} filter rule '{pattern}': {e}");
                    None
                }
            })
            .collect();
        Self { mode, rules }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// The first rule matching the lower-cased `text`, if any.
    pub fn first_match(&self, text: &str) -> Option<&FilterRule> {
        let lower = text.to_lowercase();
        self.rules.iter().find(|rule| rule.pattern.is_match(&lower))
    }

    /// True iff no rule matches.
    pub fn is_interesting(&self, text: &str) -> bool {
        self.first_match(text).is_none()
    }
}

/// True iff no rule of `mode` matches the lower-cased `url`.
pub fn is_interesting_url(url: &str, mode: FilterMode) -> bool {
    FilterPolicy::for_mode(mode).is_interesting(url)
}

/// True iff no rule of `mode` matches the lower-cased script text.
pub fn is_interesting_body(text: &str, mode: FilterMode) -> bool {
    FilterPolicy::for_mode(mode).is_interesting(text)
}
