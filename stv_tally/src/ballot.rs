use log::debug;
use std::collections::HashSet;

use crate::config::*;
use crate::{CandidateId, VoteValue};

/// Reads a preference label from a questionnaire grid.
///
/// Blank cells carry no preference. `P3`, `p3` and `3` are all the third
/// preference. Any other content (including `P0`) is an error: it usually means
/// that the wrong columns were handed over as vote columns.
///
/// ```
/// use stv_tally::parse_preference_label;
///
/// assert_eq!(parse_preference_label("P2"), Ok(Some(2)));
/// assert_eq!(parse_preference_label(""), Ok(None));
/// assert!(parse_preference_label("yes").is_err());
/// ```
pub fn parse_preference_label(label: &str) -> Result<Option<u32>, VotingErrors> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let digits = trimmed
        .strip_prefix('P')
        .or_else(|| trimmed.strip_prefix('p'))
        .unwrap_or(trimmed);
    match digits.parse::<u32>() {
        Ok(rank) if rank >= 1 => Ok(Some(rank)),
        _ => InvalidPreferenceLabelSnafu { label }.fail(),
    }
}

/// A formal ballot, as it moves between candidates during the count.
#[derive(PartialEq, Debug, Clone)]
pub(crate) struct Ballot {
    // Guaranteed to never be empty at construction.
    preferences: Vec<CandidateId>,
    count: u64,
    // In (0, 1] as long as the ballot is not exhausted.
    value: f64,
    // Index in preferences of the candidate currently receiving this ballot.
    // None once the ballot is exhausted.
    active: Option<usize>,
}

impl Ballot {
    pub(crate) fn new(preferences: Vec<CandidateId>, count: u64) -> Ballot {
        assert!(!preferences.is_empty(), "A ballot needs a first preference");
        Ballot {
            preferences,
            count,
            value: 1.0,
            active: Some(0),
        }
    }

    /// The candidate this ballot currently counts for.
    pub(crate) fn current(&self) -> Option<CandidateId> {
        self.active.map(|idx| self.preferences[idx])
    }

    /// The candidate ranked at the given preference (starting at 1), whether
    /// this candidate is still running or not.
    pub(crate) fn preference(&self, rank: usize) -> Option<CandidateId> {
        rank.checked_sub(1)
            .and_then(|idx| self.preferences.get(idx))
            .cloned()
    }

    /// The value carried by this ballot, accounting for identical ballots.
    pub(crate) fn weight(&self) -> VoteValue {
        VoteValue(self.value * self.count as f64)
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.active.is_none()
    }

    /// Moves to the next preference that is still running, or exhausts the
    /// ballot. The ballot never goes back to an earlier preference.
    pub(crate) fn advance(&mut self, still_running: &HashSet<CandidateId>) {
        if let Some(idx) = self.active {
            self.active = self.preferences[idx + 1..]
                .iter()
                .position(|cid| still_running.contains(cid))
                .map(|offset| idx + 1 + offset);
        }
    }

    /// Applies the transfer value of a surplus.
    pub(crate) fn devalue(&mut self, factor: f64) {
        assert!(
            (0.0..=1.0).contains(&factor),
            "Transfer value out of range: {}",
            factor
        );
        self.value *= factor;
        // Nothing left to transfer.
        if self.value <= 0.0 {
            self.value = 0.0;
            self.active = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn value(&self) -> f64 {
        self.value
    }
}

/// Applies the formality rules to one vote.
///
/// The columns of excluded candidates are dropped first. A rank that was only
/// given to excluded candidates is skipped, and the following preferences move
/// up. The remaining preferences must then run 1, 2, 3, ... : the first missing
/// or shared rank ends the ballot. A ballot without a usable first preference
/// is informal and `None` is returned.
pub(crate) fn formal_ballot(vote: &Vote, excluded: &[bool]) -> Option<Ballot> {
    if vote.count == 0 {
        return None;
    }
    // A contiguous sequence cannot go beyond the number of candidates.
    let max_rank = vote
        .ranks
        .iter()
        .flatten()
        .max()
        .map(|r| (*r as usize).min(vote.ranks.len()))?;

    let mut preferences: Vec<CandidateId> = Vec::new();
    for rank in 1..=max_rank as u32 {
        let marked: Vec<usize> = vote
            .ranks
            .iter()
            .enumerate()
            .filter_map(|(idx, r)| if *r == Some(rank) { Some(idx) } else { None })
            .collect();
        let kept: Vec<usize> = marked
            .iter()
            .filter(|idx| !excluded.get(**idx).cloned().unwrap_or(false))
            .cloned()
            .collect();
        match kept.as_slice() {
            [idx] => preferences.push(CandidateId(*idx as u32)),
            // Only excluded candidates were given this rank.
            [] if !marked.is_empty() => continue,
            // Either a gap or an ambiguous rank.
            _ => {
                debug!(
                    "formal_ballot: truncating {:?} at rank {} after {} preference(s)",
                    vote.ranks,
                    rank,
                    preferences.len()
                );
                break;
            }
        }
    }

    if preferences.is_empty() {
        debug!("formal_ballot: informal vote {:?}", vote.ranks);
        None
    } else {
        Some(Ballot::new(preferences, vote.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(ranks: &[Option<u32>]) -> Vote {
        Vote {
            ranks: ranks.to_vec(),
            count: 1,
        }
    }

    fn prefs(b: &Ballot) -> Vec<u32> {
        b.preferences.iter().map(|cid| cid.0).collect()
    }

    #[test]
    fn labels() {
        assert_eq!(parse_preference_label("P1"), Ok(Some(1)));
        assert_eq!(parse_preference_label(" p12 "), Ok(Some(12)));
        assert_eq!(parse_preference_label("4"), Ok(Some(4)));
        assert_eq!(parse_preference_label("   "), Ok(None));
        assert_eq!(
            parse_preference_label("P0"),
            Err(VotingErrors::InvalidPreferenceLabel {
                label: "P0".to_string()
            })
        );
        assert!(parse_preference_label("Px").is_err());
    }

    #[test]
    fn complete_sequence_is_formal() {
        let b = formal_ballot(
            &vote(&[Some(2), Some(1), Some(4), Some(3)]),
            &[false; 4],
        )
        .unwrap();
        assert_eq!(prefs(&b), vec![1, 0, 3, 2]);
        assert_eq!(b.current(), Some(CandidateId(1)));
    }

    #[test]
    fn gap_truncates() {
        // Preferences 1, 3, 4: only the first one is kept.
        let b = formal_ballot(&vote(&[Some(1), Some(3), Some(4), None]), &[false; 4]).unwrap();
        assert_eq!(prefs(&b), vec![0]);
    }

    #[test]
    fn missing_first_preference_is_informal() {
        assert!(formal_ballot(&vote(&[None, Some(2), Some(3)]), &[false; 3]).is_none());
        assert!(formal_ballot(&vote(&[None, None, None]), &[false; 3]).is_none());
    }

    #[test]
    fn shared_rank_truncates() {
        let b = formal_ballot(&vote(&[Some(1), Some(2), Some(2)]), &[false; 3]).unwrap();
        assert_eq!(prefs(&b), vec![0]);
        assert!(formal_ballot(&vote(&[Some(1), Some(1), Some(2)]), &[false; 3]).is_none());
    }

    #[test]
    fn exclusion_shifts_preferences() {
        // The excluded candidate held rank 2: ranks 3 and 4 move up.
        let b = formal_ballot(
            &vote(&[Some(1), Some(2), Some(3), Some(4)]),
            &[false, true, false, false],
        )
        .unwrap();
        assert_eq!(prefs(&b), vec![0, 2, 3]);
        // The excluded candidate was the first preference.
        let b = formal_ballot(&vote(&[Some(2), Some(1), None]), &[false, true, false]).unwrap();
        assert_eq!(prefs(&b), vec![0]);
        // Only the excluded candidate was ranked.
        assert!(formal_ballot(&vote(&[None, Some(1), None]), &[false, true, false]).is_none());
    }

    #[test]
    fn zero_count_is_informal() {
        let v = Vote {
            ranks: vec![Some(1)],
            count: 0,
        };
        assert!(formal_ballot(&v, &[false]).is_none());
    }

    #[test]
    fn advance_and_devalue() {
        let mut b = Ballot::new(vec![CandidateId(0), CandidateId(1), CandidateId(2)], 1);
        let running: HashSet<CandidateId> = [CandidateId(2)].iter().cloned().collect();
        b.devalue(0.5);
        b.advance(&running);
        assert_eq!(b.current(), Some(CandidateId(2)));
        assert_eq!(b.value(), 0.5);
        b.advance(&HashSet::new());
        assert!(b.is_exhausted());
        assert_eq!(b.preference(2), Some(CandidateId(1)));
        assert_eq!(b.preference(0), None);
    }

    #[test]
    fn zero_transfer_value_exhausts() {
        let mut b = Ballot::new(vec![CandidateId(0), CandidateId(1)], 3);
        b.devalue(0.0);
        assert!(b.is_exhausted());
        assert_eq!(b.weight(), VoteValue(0.0));
    }
}
