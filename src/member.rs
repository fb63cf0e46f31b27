//! Group roster snapshots and fuzzy member lookup.

use std::fmt;
use std::iter;

use log::debug;

use crate::matching::fuzzy_similarity;

/// Numeric member id as assigned by the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One group member as seen at snapshot time.
#[derive(Debug, Clone)]
pub struct GroupMember {
    pub id: MemberId,
    pub display_name: String,
}

/// Read-only view of a group roster.
///
/// The bot's own membership is carried separately so searches can rank it
/// like any ordinary member.
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    pub members: Vec<GroupMember>,
    pub bot: GroupMember,
}

impl GroupSnapshot {
    /// Every member of the group, the bot's own entry last.
    pub fn all_members(&self) -> impl Iterator<Item = &GroupMember> {
        self.members.iter().chain(iter::once(&self.bot))
    }
}

/// Score thresholds steering [`fuzzy_find_member`].
#[derive(Debug, Clone, Copy)]
pub struct SearchThresholds {
    /// Minimum score for a member to show up among the candidates at all.
    pub min_rate: f64,
    /// Minimum score for a candidate to be eligible for automatic selection.
    pub match_rate: f64,
    /// Maximum gap between the strongest and weakest eligible candidate
    /// before the search refuses to pick one.
    pub disambiguation_rate: f64,
}

impl Default for SearchThresholds {
    fn default() -> Self {
        Self {
            min_rate: 0.2,
            match_rate: 0.6,
            disambiguation_rate: 0.1,
        }
    }
}

/// Rank group members against a display-name query.
///
/// Scores every member (the bot's own entry included) with
/// [`fuzzy_similarity`] and drops everything under
/// [`min_rate`](SearchThresholds::min_rate). When exactly one candidate
/// clears [`match_rate`](SearchThresholds::match_rate), or one clears it
/// ahead of the runner-up by more than
/// [`disambiguation_rate`](SearchThresholds::disambiguation_rate), that
/// member is returned alone with its score normalized to `1.0`. Otherwise
/// the full candidate list comes back, strongest first, and the caller has
/// to disambiguate. An empty result means nothing scored above `min_rate`.
#[must_use]
pub fn fuzzy_find_member<'a>(
    group: &'a GroupSnapshot,
    target: &str,
    thresholds: &SearchThresholds,
) -> Vec<(&'a GroupMember, f64)> {
    let mut candidates: Vec<(&GroupMember, f64)> = group
        .all_members()
        .map(|member| (member, fuzzy_similarity(&member.display_name, target)))
        .filter(|(_, score)| *score >= thresholds.min_rate)
        .collect();
    candidates.sort_by(|(_, left), (_, right)| right.total_cmp(left));

    let best: Vec<(&GroupMember, f64)> = candidates
        .iter()
        .copied()
        .filter(|(_, score)| *score >= thresholds.match_rate)
        .collect();

    match best.as_slice() {
        [] => {
            debug!(
                "Member search '{target}': no confident match among {} candidates",
                candidates.len()
            );
            candidates
        }
        &[(member, score)] => {
            debug!(
                "Member search '{target}': resolved to '{}' (score {score:.3})",
                member.display_name
            );
            vec![(member, 1.0)]
        }
        &[(strongest, top), .., (_, weakest)] => {
            if top - weakest <= thresholds.disambiguation_rate {
                debug!(
                    "Member search '{target}': {} matches within {:.3} of each other, ambiguous",
                    best.len(),
                    top - weakest
                );
                candidates
            } else {
                debug!(
                    "Member search '{target}': resolved to '{}' (score {top:.3})",
                    strongest.display_name
                );
                vec![(strongest, 1.0)]
            }
        }
    }
}
