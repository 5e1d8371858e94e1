// wordwarden-core/src/engine.rs
//! Pipeline orchestration for message filtering.
//!
//! The pipeline runs scan -> validate -> render -> resolve -> rewrite over an
//! immutable input string. Every stage is pure CPU; only rule-set refresh
//! (through the [`RuleCache`]) ever awaits, and it never mutates anything
//! except the cache itself.
//!
//! License: MIT OR APACHE 2.0

use chrono::Utc;
use log::debug;
use serde::Serialize;

use crate::cache::RuleCache;
use crate::config::CommunityId;
use crate::renderer;
use crate::resolver;
use crate::ruleset::RuleSet;
use crate::scanner;
use crate::term_match::TermMatch;
use crate::validators::{self, QualityThresholds};

/// Tunables for one engine instance.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Thresholds for the evasion-quality heuristics.
    pub quality: QualityThresholds,
}

/// The result of filtering one message: the rewritten text plus the accepted
/// matches, for delivery and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome {
    /// The input exactly as received.
    pub original: String,
    /// The input with every accepted match replaced.
    pub filtered: String,
    /// Accepted matches, ascending by start offset.
    pub matches: Vec<TermMatch>,
    /// RFC 3339 timestamp of when filtering ran.
    pub filtered_at: String,
}

impl FilterOutcome {
    /// True when filtering changed the text. Derived, so it can never
    /// disagree with the payload it describes.
    pub fn changed(&self) -> bool {
        self.original != self.filtered
    }
}

/// Filters inbound messages for many communities, keeping each community's
/// compiled rules fresh through a [`RuleCache`].
pub struct FilterEngine {
    cache: RuleCache,
    options: FilterOptions,
}

impl FilterEngine {
    pub fn new(cache: RuleCache) -> Self {
        Self::with_options(cache, FilterOptions::default())
    }

    pub fn with_options(cache: RuleCache, options: FilterOptions) -> Self {
        Self { cache, options }
    }

    /// The cache this engine reads rules through. Collaborators that save
    /// rule changes invalidate communities here.
    pub fn cache(&self) -> &RuleCache {
        &self.cache
    }

    /// Filters one message for a community.
    ///
    /// Infallible by design: rule-loading trouble degrades to the cache's
    /// stale-or-empty policy, and an empty rule set filters nothing.
    pub async fn filter_message(&self, community: CommunityId, text: &str) -> FilterOutcome {
        let rules = self.cache.get(community).await;
        filter_with_rules(text, &rules, &self.options)
    }
}

/// Runs the pure pipeline stages against an already-compiled rule set.
pub fn filter_with_rules(text: &str, rules: &RuleSet, options: &FilterOptions) -> FilterOutcome {
    let candidates = scanner::scan(text, rules);
    let mut valid = validators::validate(candidates, rules, text, &options.quality);
    renderer::render_all(&mut valid);
    let accepted = resolver::resolve(valid);
    let filtered = renderer::rewrite(text, &accepted);
    if !accepted.is_empty() {
        debug!("Replaced {} match(es)", accepted.len());
    }

    FilterOutcome {
        original: text.to_string(),
        filtered,
        matches: accepted,
        filtered_at: Utc::now().to_rfc3339(),
    }
}
