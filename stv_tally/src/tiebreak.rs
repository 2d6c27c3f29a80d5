use log::{debug, info};

use crate::ballot::Ballot;
use crate::config::*;
use crate::{lowest_candidates, CandidateId, Round, RoundId, VoteValue};

/// The candidate picked by the tiebreak and the rule that picked it.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub(crate) struct TiebreakOutcome {
    pub(crate) loser: CandidateId,
    pub(crate) method: TiebreakMethod,
}

/// Everything the tiebreak is allowed to look at.
pub(crate) struct TiebreakContext<'a> {
    /// The rounds before the current one, oldest first.
    pub(crate) previous_rounds: &'a [Round],
    pub(crate) ballots: &'a [Ballot],
    /// The deepest preference a ballot can hold.
    pub(crate) max_depth: usize,
    pub(crate) mode: TieBreakMode,
    pub(crate) num_round: RoundId,
    pub(crate) names: &'a [String],
}

/// Picks the candidate to eliminate among candidates tied for the lowest total.
///
/// The previous rounds are checked first, most recent first. If they never
/// separated the candidates, the raw preferences are counted level by level.
/// As a last resort, the tiebreak mode decides.
pub(crate) fn break_tie(
    tied: &[CandidateId],
    ctx: &TiebreakContext,
) -> Result<TiebreakOutcome, VotingErrors> {
    assert!(tied.len() >= 2, "No tie to break: {:?}", tied);

    if let Some((loser, round)) = backwards_tiebreak(tied, ctx.previous_rounds) {
        info!(
            "Tiebreak: previous round {} separates the candidates, {} is lowest",
            round, ctx.names[loser.0 as usize]
        );
        return Ok(TiebreakOutcome {
            loser,
            method: TiebreakMethod::PreviousRound(round),
        });
    }
    debug!("break_tie: backwards tiebreak failed for {:?}", tied);

    let still_tied = match raw_preference_tiebreak(tied, ctx.ballots, ctx.max_depth) {
        RawPreferenceOutcome::Decided(loser, preference) => {
            info!(
                "Tiebreak: preference level {} separates the candidates, {} is lowest",
                preference, ctx.names[loser.0 as usize]
            );
            return Ok(TiebreakOutcome {
                loser,
                method: TiebreakMethod::RawPreference(preference),
            });
        }
        RawPreferenceOutcome::StillTied(cids) => cids,
    };

    let cand_with_names: Vec<(CandidateId, String)> = still_tied
        .iter()
        .map(|cid| (*cid, ctx.names[cid.0 as usize].clone()))
        .collect();
    match ctx.mode {
        TieBreakMode::Random(seed) => {
            let permutation = candidate_permutation_crypto(&cand_with_names, seed, ctx.num_round);
            debug!(
                "break_tie: elimination queue from random permutation: {:?}",
                permutation
            );
            let loser = permutation[0];
            info!(
                "Tiebreak: tied all the way down, random draw picks {}",
                ctx.names[loser.0 as usize]
            );
            Ok(TiebreakOutcome {
                loser,
                method: TiebreakMethod::Random,
            })
        }
        TieBreakMode::StopCounting => UnresolvedTieSnafu {
            candidates: cand_with_names
                .into_iter()
                .map(|(_, name)| name)
                .collect::<Vec<String>>(),
        }
        .fail(),
    }
}

/// Walks the rounds backward and returns the first tied candidate that was
/// strictly lowest on its own, with the round it happened in.
fn backwards_tiebreak(
    tied: &[CandidateId],
    previous_rounds: &[Round],
) -> Option<(CandidateId, RoundId)> {
    for (idx, round) in previous_rounds.iter().enumerate().rev() {
        let totals: Vec<(CandidateId, VoteValue)> = tied
            .iter()
            .filter_map(|cid| round.total(*cid).map(|t| (*cid, t)))
            .collect();
        // Every candidate tied now was running in all the earlier rounds.
        assert_eq!(totals.len(), tied.len());
        if let [loser] = lowest_candidates(&totals).as_slice() {
            return Some((*loser, idx as RoundId + 1));
        }
    }
    None
}

enum RawPreferenceOutcome {
    Decided(CandidateId, u32),
    StillTied(Vec<CandidateId>),
}

/// Counts, for each preference level, the value of all the ballots ranking
/// each tied candidate at that level. Every level compares the whole tied
/// set. If no level has a single lowest candidate, the candidates lowest at
/// the deepest level remain tied.
fn raw_preference_tiebreak(
    tied: &[CandidateId],
    ballots: &[Ballot],
    max_depth: usize,
) -> RawPreferenceOutcome {
    let mut still_tied: Vec<CandidateId> = tied.to_vec();
    for preference in 1..=max_depth {
        let totals: Vec<(CandidateId, VoteValue)> = tied
            .iter()
            .map(|cid| {
                let total: VoteValue = ballots
                    .iter()
                    .filter(|b| b.preference(preference) == Some(*cid))
                    .map(|b| b.weight())
                    .sum();
                (*cid, total)
            })
            .collect();
        debug!(
            "raw_preference_tiebreak: preference {}: {:?}",
            preference, totals
        );
        let lowest = lowest_candidates(&totals);
        if let [loser] = lowest.as_slice() {
            return RawPreferenceOutcome::Decided(*loser, preference as u32);
        }
        still_tied = lowest;
    }
    RawPreferenceOutcome::StillTied(still_tied)
}

/// Generates a "random" permutation of the candidates. Random in this context means hard to guess in advance.
/// The order is given by the SHA-256 digest of the seed, the round and the name, so that the same seed
/// always gives the same permutation.
fn candidate_permutation_crypto(
    candidates: &[(CandidateId, String)],
    seed: u32,
    num_round: u32,
) -> Vec<CandidateId> {
    let mut data: Vec<(CandidateId, String)> = candidates
        .iter()
        .map(|(cid, name)| {
            let key = format!("{:08}{:08}{}", seed, num_round, name);
            (*cid, sha256::digest(key.as_str()))
        })
        .collect();
    data.sort_by_key(|p| p.1.clone());
    data.iter().map(|p| p.0).collect()
}
