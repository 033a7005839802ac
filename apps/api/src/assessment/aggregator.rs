//! Assessment Aggregator: folds per-sentence matches into per-criterion evidence
//! and derives the overall rating.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::assessment::criteria::CriteriaRegistry;
use crate::assessment::matcher::CriterionMatcher;

/// Criteria met at or above this count rate `High`.
pub const HIGH_THRESHOLD: usize = 6;
/// Criteria met at or above this count (and below `HIGH_THRESHOLD`) rate `Medium`.
pub const MEDIUM_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Low,
    Medium,
    High,
}

impl Rating {
    /// Pure function of the number of criteria with at least one matching sentence.
    pub fn from_met_count(met_count: usize) -> Self {
        match met_count {
            n if n >= HIGH_THRESHOLD => Rating::High,
            n if n >= MEDIUM_THRESHOLD => Rating::Medium,
            _ => Rating::Low,
        }
    }
}

/// Criterion name → matching sentences, in registry order.
///
/// Every registry criterion has an entry, possibly empty. Sentences keep
/// document order, and a repeated sentence is kept once per occurrence.
/// Serializes as a JSON object whose keys follow registry order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEvidence {
    entries: Vec<(String, Vec<String>)>,
}

impl MatchEvidence {
    fn empty_for(registry: &CriteriaRegistry) -> Self {
        Self {
            entries: registry
                .names()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
        }
    }

    fn push(&mut self, criterion: &str, sentence: &str) {
        if let Some((_, sentences)) = self.entries.iter_mut().find(|(n, _)| n == criterion) {
            sentences.push(sentence.to_string());
        }
    }

    #[allow(dead_code)]
    pub fn get(&self, criterion: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(n, _)| n == criterion)
            .map(|(_, s)| s.as_slice())
    }

    #[allow(dead_code)]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of criteria with at least one sentence of evidence.
    pub fn met_count(&self) -> usize {
        self.entries.iter().filter(|(_, s)| !s.is_empty()).count()
    }
}

impl Serialize for MatchEvidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, sentences) in &self.entries {
            map.serialize_entry(name, sentences)?;
        }
        map.end()
    }
}

/// Outcome of one assessment. Built once by [`aggregate`], read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AssessmentResult {
    criteria_met: MatchEvidence,
    rating: Rating,
}

impl AssessmentResult {
    pub fn criteria_met(&self) -> &MatchEvidence {
        &self.criteria_met
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }
}

/// Runs every sentence through the matcher and derives the rating.
///
/// Total over any input: an empty sentence list yields all-empty evidence and `Low`.
pub fn aggregate<S: AsRef<str>>(registry: &CriteriaRegistry, sentences: &[S]) -> AssessmentResult {
    let matcher = CriterionMatcher::new(registry);
    let mut criteria_met = MatchEvidence::empty_for(registry);

    for sentence in sentences {
        let sentence = sentence.as_ref();
        for criterion in matcher.matches(sentence) {
            criteria_met.push(criterion, sentence);
        }
    }

    let rating = Rating::from_met_count(criteria_met.met_count());
    AssessmentResult {
        criteria_met,
        rating,
    }
}
