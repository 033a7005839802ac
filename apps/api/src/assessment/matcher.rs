//! Criterion Matcher: decides which criteria a single sentence satisfies.
//!
//! Matching is case-insensitive substring containment: a keyword embedded in a
//! longer word still counts ("rewarded" satisfies "award"). There is no
//! word-boundary check, stemming or fuzzy matching.

use crate::assessment::criteria::CriteriaRegistry;

/// Borrowing view over the registry. Cheap to build per request.
pub struct CriterionMatcher<'a> {
    registry: &'a CriteriaRegistry,
}

impl<'a> CriterionMatcher<'a> {
    pub fn new(registry: &'a CriteriaRegistry) -> Self {
        Self { registry }
    }

    /// Names of every criterion `sentence` satisfies, in registry order.
    pub fn matches(&self, sentence: &str) -> Vec<&'a str> {
        let lowered = sentence.to_lowercase();
        self.registry
            .iter()
            .filter(|c| c.is_met_by(&lowered))
            .map(|c| c.name())
            .collect()
    }
}
