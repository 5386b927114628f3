//! Background knowledge: required and forbidden directed edges plus tier ordering.
//!
//! Every mutation keeps the invariant that no ordered pair is both
//! required and forbidden. A mutation that would break it fails and
//! leaves the knowledge unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{KnowledgeError, TesseraResult};

/// One tier of the temporal ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tier {
    pub variables: BTreeSet<String>,
    /// Forbid every edge between two members of this tier.
    pub forbidden_within: bool,
}

/// Required/forbidden edge constraints and an optional tier partition.
///
/// Edges from a later tier into an earlier one are implicitly forbidden.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Knowledge {
    required: BTreeSet<(String, String)>,
    forbidden: BTreeSet<(String, String)>,
    tiers: Vec<Tier>,
    default_to_knowledge_layout: bool,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON and check the required/forbidden invariant.
    pub fn from_json(json: &str) -> TesseraResult<Self> {
        let knowledge: Self = serde_json::from_str(json)?;
        knowledge.validate()?;
        Ok(knowledge)
    }

    /// Re-check every invariant. Needed after deserialization, which bypasses the setters.
    pub fn validate(&self) -> Result<(), KnowledgeError> {
        for (from, to) in &self.required {
            if from == to {
                return Err(KnowledgeError::SelfEdge { name: from.clone() });
            }
            if self.required.contains(&(to.clone(), from.clone())) {
                return Err(KnowledgeError::RequiredBothWays {
                    a: from.clone(),
                    b: to.clone(),
                });
            }
            if let Some(reason) = self.forbidden_reason(from, to) {
                return Err(KnowledgeError::Conflict {
                    from: from.clone(),
                    to: to.clone(),
                    reason,
                });
            }
        }
        Ok(())
    }

    /// No constraints at all.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
            && self.forbidden.is_empty()
            && self.tiers.iter().all(|t| t.variables.is_empty())
    }

    pub fn is_required(&self, from: &str, to: &str) -> bool {
        self.required
            .contains(&(from.to_string(), to.to_string()))
    }

    /// Explicitly forbidden, or forbidden by the tier ordering.
    pub fn is_forbidden(&self, from: &str, to: &str) -> bool {
        self.forbidden_reason(from, to).is_some()
    }

    /// Forbidden in both directions, so no edge may join the pair at all.
    pub fn is_adjacency_forbidden(&self, a: &str, b: &str) -> bool {
        self.is_forbidden(a, b) && self.is_forbidden(b, a)
    }

    /// Required in either direction.
    pub fn is_adjacency_required(&self, a: &str, b: &str) -> bool {
        self.is_required(a, b) || self.is_required(b, a)
    }

    fn forbidden_reason(&self, from: &str, to: &str) -> Option<String> {
        if self
            .forbidden
            .contains(&(from.to_string(), to.to_string()))
        {
            return Some("explicitly forbidden".to_string());
        }
        if tier_forbids(&self.tiers, from, to) {
            return Some("forbidden by tier ordering".to_string());
        }
        None
    }

    /// Require `from --> to`.
    pub fn set_required(&mut self, from: &str, to: &str) -> Result<(), KnowledgeError> {
        if from == to {
            return Err(KnowledgeError::SelfEdge {
                name: from.to_string(),
            });
        }
        if self.is_required(to, from) {
            return Err(KnowledgeError::RequiredBothWays {
                a: from.to_string(),
                b: to.to_string(),
            });
        }
        if let Some(reason) = self.forbidden_reason(from, to) {
            return Err(KnowledgeError::Conflict {
                from: from.to_string(),
                to: to.to_string(),
                reason,
            });
        }
        self.required.insert((from.to_string(), to.to_string()));
        Ok(())
    }

    /// Forbid `from --> to`.
    pub fn set_forbidden(&mut self, from: &str, to: &str) -> Result<(), KnowledgeError> {
        if from == to {
            return Err(KnowledgeError::SelfEdge {
                name: from.to_string(),
            });
        }
        if self.is_required(from, to) {
            return Err(KnowledgeError::Conflict {
                from: from.to_string(),
                to: to.to_string(),
                reason: "already required".to_string(),
            });
        }
        self.forbidden.insert((from.to_string(), to.to_string()));
        Ok(())
    }

    pub fn remove_required(&mut self, from: &str, to: &str) -> bool {
        self.required.remove(&(from.to_string(), to.to_string()))
    }

    pub fn remove_forbidden(&mut self, from: &str, to: &str) -> bool {
        self.forbidden.remove(&(from.to_string(), to.to_string()))
    }

    /// Move `variable` into tier `tier`, creating empty tiers up to it as needed.
    pub fn set_tier(&mut self, tier: usize, variable: &str) -> Result<(), KnowledgeError> {
        let mut tiers = self.tiers.clone();
        for t in &mut tiers {
            t.variables.remove(variable);
        }
        if tiers.len() <= tier {
            tiers.resize_with(tier + 1, Tier::default);
        }
        tiers[tier].variables.insert(variable.to_string());
        self.commit_tiers(tiers)
    }

    /// Forbid (or re-allow) edges between members of `tier`.
    pub fn set_tier_forbidden_within(
        &mut self,
        tier: usize,
        forbidden: bool,
    ) -> Result<(), KnowledgeError> {
        let mut tiers = self.tiers.clone();
        if tiers.len() <= tier {
            tiers.resize_with(tier + 1, Tier::default);
        }
        tiers[tier].forbidden_within = forbidden;
        self.commit_tiers(tiers)
    }

    /// Remove `variable` from whatever tier holds it.
    pub fn remove_from_tiers(&mut self, variable: &str) {
        for t in &mut self.tiers {
            t.variables.remove(variable);
        }
    }

    fn commit_tiers(&mut self, tiers: Vec<Tier>) -> Result<(), KnowledgeError> {
        if let Some((from, to)) = self
            .required
            .iter()
            .find(|(from, to)| tier_forbids(&tiers, from, to))
        {
            return Err(KnowledgeError::Conflict {
                from: from.clone(),
                to: to.clone(),
                reason: "required edge would be forbidden by tier ordering".to_string(),
            });
        }
        self.tiers = tiers;
        Ok(())
    }

    pub fn tier_of(&self, variable: &str) -> Option<usize> {
        tier_index(&self.tiers, variable)
    }

    pub fn num_tiers(&self) -> usize {
        self.tiers.len()
    }

    /// Tier contents, earliest first.
    pub fn tiers(&self) -> Vec<Vec<String>> {
        self.tiers
            .iter()
            .map(|t| t.variables.iter().cloned().collect())
            .collect()
    }

    pub fn is_tier_forbidden_within(&self, tier: usize) -> bool {
        self.tiers.get(tier).is_some_and(|t| t.forbidden_within)
    }

    pub fn required_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.required.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Whether a display layer should lay nodes out by tier.
    pub fn is_default_to_knowledge_layout(&self) -> bool {
        self.default_to_knowledge_layout
    }

    pub fn set_default_to_knowledge_layout(&mut self, value: bool) {
        self.default_to_knowledge_layout = value;
    }
}

fn tier_index(tiers: &[Tier], variable: &str) -> Option<usize> {
    tiers.iter().position(|t| t.variables.contains(variable))
}

fn tier_forbids(tiers: &[Tier], from: &str, to: &str) -> bool {
    match (tier_index(tiers, from), tier_index(tiers, to)) {
        (Some(f), Some(t)) if f > t => true,
        (Some(f), Some(t)) if f == t => tiers[f].forbidden_within,
        _ => false,
    }
}
