// wordwarden-core/src/lib.rs
//! # Wordwarden Core Library
//!
//! `wordwarden-core` provides the fundamental, platform-independent logic for
//! banned-term filtering. It defines the data structures for filtering rules,
//! synthesizes evasion-tolerant match patterns from canonical terms, and runs
//! the full detect-validate-resolve-render pipeline that turns an inbound
//! message into its filtered form.
//!
//! The pipeline is pure with respect to its input: the original string is
//! never mutated, and the only state the library touches is its own caches.
//! How messages arrive, how rule files reach disk, and what happens to the
//! filtered text are all concerns of the embedding host.
//!
//! ## Modules
//!
//! * `config`: Defines `FilterRule`s and `FilterConfig`, the decoded rule shape.
//! * `ruleset`: Compiles configurations into queryable `RuleSet` snapshots.
//! * `patterns`: Synthesizes and caches the per-term pattern sets.
//! * `scanner`: Produces raw match candidates over a rule set.
//! * `validators`: Suppresses exempted and low-quality candidates.
//! * `resolver`: Picks the final non-overlapping match set.
//! * `renderer`: Handles plural and case agreement, and the final splice.
//! * `term_match`: Defines the candidate record shared across the pipeline.
//! * `engine`: Orchestrates the stages behind `FilterEngine`.
//! * `cache`: Keeps per-community rule sets fresh behind a TTL.
//! * `headless`: Convenience wrappers for one-shot, non-interactive use.
//!
//! ## Public API
//!
//! **Configuration & Rules**
//!
//! * [`FilterConfig`]: A community's decoded rule collection, with editing helpers.
//! * [`FilterRule`]: One replacement with the banned terms and exemptions it owns.
//! * [`RuleSet`]: The compiled, immutable form the pipeline scans against.
//! * [`CommunityId`]: Identifies whose rules apply.
//!
//! **Filtering**
//!
//! * [`FilterEngine`]: The long-lived engine; one per host process.
//! * [`FilterOutcome`]: The rewritten text plus accepted match diagnostics.
//! * [`filter_with_rules`]: The pure pipeline, for callers holding a `RuleSet`.
//!
//! **Rule Freshness**
//!
//! * [`RuleStore`]: The async source-of-truth seam a host implements.
//! * [`RuleCache`]: TTL caching with explicit invalidation and coalesced rebuilds.
//!
//! **Headless Mode**
//!
//! * [`filter_text`]: A convenience function for a full, one-shot filtering pass.
//!
//! ## Usage Example
//!
//! ```rust
//! use wordwarden_core::{FilterConfig, filter_text};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     // 1. Decode a rule collection: replacement text -> banned words.
//!     let rules = FilterConfig::from_json_str(r#"{"heck": ["hell"]}"#)?;
//!
//!     // 2. Filter a message in a single call.
//!     let outcome = filter_text(&rules, "What the hell!");
//!     assert_eq!(outcome.filtered, "What the heck!");
//!     assert!(outcome.changed());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The library uses `anyhow::Error` at fallible boundaries and defines
//! [`WordwardenError`] for programmatic handling. The filtering path itself
//! is infallible: malformed rules, unsafe patterns, and store failures all
//! degrade with a logged warning rather than dropping a message.
//!
//! ## Design Principles
//!
//! * **Deterministic:** identical input and rules always produce identical
//!   output; iteration orders are defined, never an accident of hashing.
//! * **Immutable snapshots:** rule sets and cache entries are replaced
//!   wholesale, so concurrent readers always see a consistent view.
//! * **Degrade, don't drop:** a broken rule costs that rule, not the message.
//!
//! ---
//! License: MIT OR Apache-2.0

// All modules must be declared before they can be used.
pub mod cache;
pub mod config;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod patterns;
pub mod renderer;
pub mod resolver;
pub mod ruleset;
pub mod scanner;
pub mod term_match;
pub mod validators;

/// Re-exports the public configuration types for managing filtering rules.
pub use config::{CommunityId, FilterConfig, FilterRule, RuleEntry, WordsField};

/// Re-exports the custom error type for clear error reporting.
pub use errors::WordwardenError;

/// Re-exports the compiled rule-set type the pipeline scans against.
pub use ruleset::RuleSet;

/// Re-exports the engine types and the pure pipeline entry point.
pub use engine::{filter_with_rules, FilterEngine, FilterOptions, FilterOutcome};

/// Re-exports rule freshness machinery: the store seam and the TTL cache.
pub use cache::{RuleCache, RuleStore, RULE_CACHE_TTL};

/// Re-exports types for candidate matches and content-safe logging.
pub use term_match::{redact_content, TermMatch};

/// Re-exports functions for one-shot, non-interactive use.
pub use headless::{filter_json_rules, filter_text};

// Re-export key types from the patterns::compiler module for advanced usage.
pub use patterns::compiler::{synthesize, CompiledPattern, PatternKind, MAX_PATTERN_LENGTH};

/// Re-exports the validator thresholds for hosts that tune them.
pub use validators::QualityThresholds;
