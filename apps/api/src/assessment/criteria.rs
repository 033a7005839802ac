//! Criteria Registry: the fixed set of achievement criteria and their trigger keywords.
//!
//! Built once at startup, validated, then shared read-only (`Arc<CriteriaRegistry>`)
//! across every request. There is no way to mutate a registry after construction.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

/// Startup-fatal misconfiguration of the criteria set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Criteria registry is empty")]
    Empty,

    #[error("Duplicate criterion name '{0}'")]
    DuplicateName(String),

    #[error("Criterion '{0}' has no keywords")]
    NoKeywords(String),

    #[error("Criterion '{0}' has a blank keyword")]
    BlankKeyword(String),
}

/// One named achievement category. Keywords are stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    name: String,
    keywords: Vec<String>,
}

impl Criterion {
    pub fn new<N, I, K>(name: N, keywords: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True if any keyword occurs as a substring of `lowered`.
    /// The caller lower-cases the sentence once for all criteria.
    pub fn is_met_by(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Keywords per O-1A criterion, as deployed.
const O1A_CRITERIA: &[(&str, &[&str])] = &[
    ("Awards", &["award", "honor", "prize", "recognition"]),
    ("Membership", &["member of", "fellowship", "committee"]),
    ("Press", &["media", "interview", "article", "featured"]),
    ("Judging", &["judge", "reviewer", "panel"]),
    (
        "Original Contribution",
        &["invention", "patent", "breakthrough"],
    ),
    (
        "Scholarly Articles",
        &["publication", "research paper", "journal"],
    ),
    ("Critical Employment", &["leadership", "founder", "director"]),
    ("High Remuneration", &["salary", "compensation", "earnings"]),
];

/// Ordered, validated, immutable set of criteria.
#[derive(Debug, Clone)]
pub struct CriteriaRegistry {
    criteria: Vec<Criterion>,
}

impl CriteriaRegistry {
    /// Validates and freezes `criteria`. Keywords are lower-cased here so the
    /// matcher never has to.
    pub fn new(criteria: Vec<Criterion>) -> Result<Self, RegistryError> {
        if criteria.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(criteria.len());

        for criterion in criteria {
            if !seen.insert(criterion.name.clone()) {
                return Err(RegistryError::DuplicateName(criterion.name));
            }
            if criterion.keywords.is_empty() {
                return Err(RegistryError::NoKeywords(criterion.name));
            }
            if criterion.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(RegistryError::BlankKeyword(criterion.name));
            }

            let keywords = criterion.keywords.iter().map(|k| k.to_lowercase()).collect();
            normalized.push(Criterion {
                name: criterion.name,
                keywords,
            });
        }

        Ok(Self {
            criteria: normalized,
        })
    }

    /// The eight O-1A extraordinary-ability criteria.
    pub fn o1a() -> Result<Self, RegistryError> {
        Self::new(
            O1A_CRITERIA
                .iter()
                .map(|(name, keywords)| Criterion::new(*name, keywords.iter().copied()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.criteria.iter().map(Criterion::name)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_o1a_registry_has_eight_criteria_in_order() {
        let registry = CriteriaRegistry::o1a().unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "Awards",
                "Membership",
                "Press",
                "Judging",
                "Original Contribution",
                "Scholarly Articles",
                "Critical Employment",
                "High Remuneration",
            ]
        );
        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_keywords_are_lowercased_at_construction() {
        let registry =
            CriteriaRegistry::new(vec![Criterion::new("Press", ["MEDIA", "Featured In"])])
                .unwrap();
        assert_eq!(registry.criteria()[0].keywords(), ["media", "featured in"]);
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert_eq!(CriteriaRegistry::new(vec![]).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = CriteriaRegistry::new(vec![
            Criterion::new("Awards", ["award"]),
            Criterion::new("Awards", ["prize"]),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("Awards".to_string()));
    }

    #[test]
    fn test_criterion_without_keywords_rejected() {
        let err =
            CriteriaRegistry::new(vec![Criterion::new("Judging", Vec::<String>::new())])
                .unwrap_err();
        assert_eq!(err, RegistryError::NoKeywords("Judging".to_string()));
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let err = CriteriaRegistry::new(vec![Criterion::new("Judging", ["judge", "  "])])
            .unwrap_err();
        assert_eq!(err, RegistryError::BlankKeyword("Judging".to_string()));
    }

    #[test]
    fn test_is_met_by_is_substring_containment() {
        let c = Criterion::new("Awards", ["award"]);
        assert!(c.is_met_by("she was rewarded handsomely"));
        assert!(!c.is_met_by("no match here"));
    }
}
