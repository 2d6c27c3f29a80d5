mod ballot;
pub mod builder;
mod config;
pub mod manual;
pub mod quick_start;
mod quota;
mod tiebreak;

use log::{debug, info};
use snafu::ensure;

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    ops::{Add, AddAssign},
};

pub use crate::ballot::parse_preference_label;
pub use crate::config::*;
pub use crate::quota::quota;

use crate::ballot::{formal_ballot, Ballot};
use crate::tiebreak::{break_tie, TiebreakContext};

// **** Private structures ****

type RoundId = u32;

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct CandidateId(u32);

// Vote totals are sums of fractional transfer values. Two totals closer than
// this are considered equal.
const EPSILON: f64 = 1e-9;

#[derive(PartialEq, Debug, Clone, Copy, PartialOrd)]
struct VoteValue(f64);

impl VoteValue {
    const EMPTY: VoteValue = VoteValue(0.0);

    fn approx_eq(self, other: VoteValue) -> bool {
        (self.0 - other.0).abs() < EPSILON
    }

    fn reaches(self, quota: u64) -> bool {
        self.0 + EPSILON >= quota as f64
    }
}

impl std::iter::Sum for VoteValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        VoteValue(iter.map(|vc| vc.0).sum())
    }
}

impl AddAssign for VoteValue {
    fn add_assign(&mut self, rhs: VoteValue) {
        self.0 += rhs.0;
    }
}

impl Add for VoteValue {
    type Output = VoteValue;
    fn add(self: VoteValue, rhs: VoteValue) -> VoteValue {
        VoteValue(self.0 + rhs.0)
    }
}

/// The totals of one round. Rounds are never modified once counted.
#[derive(PartialEq, Debug, Clone)]
struct Round {
    // The candidates still running, in candidate order.
    totals: Vec<(CandidateId, VoteValue)>,
    exhausted: VoteValue,
    elected_value: VoteValue,
}

impl Round {
    fn total(&self, cid: CandidateId) -> Option<VoteValue> {
        self.totals
            .iter()
            .find(|(c, _)| *c == cid)
            .map(|(_, vc)| *vc)
    }
}

/// Where the ballots of one candidate went when it left the count.
#[derive(PartialEq, Debug, Clone, Default)]
struct Transfers {
    to: HashMap<CandidateId, VoteValue>,
    exhausted: Option<VoteValue>,
}

#[derive(PartialEq, Debug, Clone)]
struct RoundStatistics {
    round: Round,
    elected: Vec<(CandidateId, Transfers)>,
    eliminated: Vec<(CandidateId, Transfers)>,
    tiebreak: Option<TiebreakMethod>,
}

/// All the candidates with the lowest total.
fn lowest_candidates(totals: &[(CandidateId, VoteValue)]) -> Vec<CandidateId> {
    let min_count = totals
        .iter()
        .map(|(_, vc)| *vc)
        .fold(None, |acc: Option<VoteValue>, vc| match acc {
            Some(m) if m <= vc => Some(m),
            _ => Some(vc),
        });
    match min_count {
        Some(m) => totals
            .iter()
            .filter_map(|(cid, vc)| if vc.approx_eq(m) { Some(*cid) } else { None })
            .collect(),
        None => vec![],
    }
}

/// Sorts by decreasing total. Candidates with the same total stay in candidate order.
fn sort_by_decreasing_total(totals: &mut [(CandidateId, VoteValue)]) {
    totals.sort_by(|(c1, v1), (c2, v2)| {
        if v1.approx_eq(*v2) {
            c1.cmp(c2)
        } else {
            v2.partial_cmp(v1).unwrap_or(Ordering::Equal)
        }
    });
}

/// The state of the count for one role.
struct ElectionState {
    ballots: Vec<Ballot>,
    // The candidates still running, in candidate order.
    running: Vec<CandidateId>,
    // In order of election.
    elected: Vec<CandidateId>,
    seats: usize,
    quota: u64,
    initial_value: VoteValue,
    elected_value: VoteValue,
    // Append-only.
    history: Vec<Round>,
    stats: Vec<RoundStatistics>,
}

impl ElectionState {
    fn seats_remaining(&self) -> usize {
        self.seats - self.elected.len()
    }

    fn running_set(&self) -> HashSet<CandidateId> {
        self.running.iter().cloned().collect()
    }

    fn count(&self) -> Round {
        let mut tally: HashMap<CandidateId, VoteValue> = self
            .running
            .iter()
            .map(|cid| (*cid, VoteValue::EMPTY))
            .collect();
        let mut exhausted = VoteValue::EMPTY;
        for b in self.ballots.iter() {
            match b.current() {
                Some(cid) => {
                    let vc = tally
                        .get_mut(&cid)
                        .expect("A ballot points to a candidate that is not running");
                    *vc += b.weight();
                }
                None => exhausted += b.weight(),
            }
        }
        let round = Round {
            totals: self
                .running
                .iter()
                .map(|cid| (*cid, tally[cid]))
                .collect(),
            exhausted,
            elected_value: self.elected_value,
        };

        let counted: VoteValue =
            round.totals.iter().map(|(_, vc)| *vc).sum::<VoteValue>() + exhausted;
        let current: VoteValue = self.ballots.iter().map(|b| b.weight()).sum();
        let tolerance = EPSILON * self.initial_value.0.max(1.0) * 1e3;
        assert!(
            (counted.0 - current.0).abs() <= tolerance
                && (counted.0 + self.elected_value.0 - self.initial_value.0).abs() <= tolerance,
            "Vote value is not conserved: counted {:?}, ballots {:?}, elected {:?}, initial {:?}",
            counted,
            current,
            self.elected_value,
            self.initial_value
        );
        round
    }

    /// Moves the ballots of the candidates that just left the count to their
    /// next preference, applying the transfer value of each candidate first.
    fn transfer(&mut self, factors: &HashMap<CandidateId, f64>) -> HashMap<CandidateId, Transfers> {
        self.running.retain(|cid| !factors.contains_key(cid));
        let still_running = self.running_set();

        let mut transfers: HashMap<CandidateId, Transfers> = factors
            .keys()
            .map(|cid| (*cid, Transfers::default()))
            .collect();
        for b in self.ballots.iter_mut() {
            let old_first = match b.current() {
                Some(cid) if factors.contains_key(&cid) => cid,
                _ => continue,
            };
            b.devalue(factors[&old_first]);
            b.advance(&still_running);
            let e = transfers.entry(old_first).or_default();
            match b.current() {
                Some(new_first) => {
                    *e.to.entry(new_first).or_insert(VoteValue::EMPTY) += b.weight();
                }
                None => {
                    *e.exhausted.get_or_insert(VoteValue::EMPTY) += b.weight();
                }
            }
        }
        transfers
    }

    /// Orders the candidates that reached the quota and keeps those that get a
    /// seat. When candidates with the same total compete for the last seats,
    /// the candidate that the tiebreak would eliminate is seated last.
    fn seating_order(
        &self,
        mut reached: Vec<(CandidateId, VoteValue)>,
        mode: TieBreakMode,
        names: &[String],
    ) -> Result<Vec<(CandidateId, VoteValue)>, VotingErrors> {
        sort_by_decreasing_total(&mut reached);
        let seats = self.seats_remaining();
        if reached.len() <= seats {
            return Ok(reached);
        }

        let boundary = reached[seats - 1].1;
        let (mut contenders, safe): (Vec<_>, Vec<_>) =
            reached.into_iter().partition(|(_, vc)| vc.approx_eq(boundary));
        let mut seated: Vec<(CandidateId, VoteValue)> = safe
            .into_iter()
            .filter(|(_, vc)| *vc > boundary)
            .collect();
        debug!(
            "seating_order: {:?} contend for {} seat(s)",
            contenders,
            seats - seated.len()
        );

        let ctx = TiebreakContext {
            previous_rounds: &self.history[..self.history.len() - 1],
            ballots: &self.ballots,
            max_depth: names.len(),
            mode,
            num_round: self.history.len() as RoundId,
            names,
        };
        let mut seated_last: Vec<(CandidateId, VoteValue)> = Vec::new();
        while contenders.len() > 1 {
            let cids: Vec<CandidateId> = contenders.iter().map(|(cid, _)| *cid).collect();
            let outcome = break_tie(&cids, &ctx)?;
            if let Some(pos) = contenders.iter().position(|(cid, _)| *cid == outcome.loser) {
                seated_last.push(contenders.remove(pos));
            }
        }
        seated.extend(contenders);
        seated.extend(seated_last.into_iter().rev());
        seated.truncate(seats);
        Ok(seated)
    }

    fn run(&mut self, mode: TieBreakMode, names: &[String]) -> Result<(), VotingErrors> {
        // Every round elects or eliminates at least one candidate.
        let max_rounds = self.running.len() + 1;
        loop {
            if self.running.is_empty() || self.seats_remaining() == 0 {
                return Ok(());
            }
            assert!(
                self.history.len() < max_rounds,
                "The count did not converge after {} rounds",
                self.history.len()
            );
            let round_id = self.history.len() as RoundId + 1;
            let round = self.count();
            info!(
                "Round id: {:?} totals: {:?} exhausted: {:?}",
                round_id, round.totals, round.exhausted
            );
            self.history.push(round.clone());
            let mut stats = RoundStatistics {
                round: round.clone(),
                elected: Vec::new(),
                eliminated: Vec::new(),
                tiebreak: None,
            };

            let reached: Vec<(CandidateId, VoteValue)> = round
                .totals
                .iter()
                .filter(|(_, vc)| vc.reaches(self.quota))
                .cloned()
                .collect();

            if !reached.is_empty() {
                let winners = self.seating_order(reached, mode, names)?;
                debug!("run: round {} winners: {:?}", round_id, winners);
                self.elected.extend(winners.iter().map(|(cid, _)| *cid));
                if self.seats_remaining() == 0 {
                    stats.elected = winners
                        .iter()
                        .map(|(cid, _)| (*cid, Transfers::default()))
                        .collect();
                    self.stats.push(stats);
                    return Ok(());
                }

                let mut factors: HashMap<CandidateId, f64> = HashMap::new();
                for (cid, total) in winners.iter() {
                    let factor = if total.0 > 0.0 {
                        ((total.0 - self.quota as f64) / total.0).max(0.0)
                    } else {
                        0.0
                    };
                    debug!(
                        "run: {:?} surplus: {:?} transfer value: {:?}",
                        cid,
                        total.0 - self.quota as f64,
                        factor
                    );
                    // The quota stays with the winner.
                    self.elected_value += VoteValue(total.0 * (1.0 - factor));
                    factors.insert(*cid, factor);
                }
                let mut transfers = self.transfer(&factors);
                stats.elected = winners
                    .iter()
                    .map(|(cid, _)| (*cid, transfers.remove(cid).unwrap_or_default()))
                    .collect();
                self.stats.push(stats);
                continue;
            }

            if self.running.len() <= self.seats_remaining() {
                // Not enough candidates left to compete for the seats.
                let mut remaining = round.totals.clone();
                sort_by_decreasing_total(&mut remaining);
                debug!("run: electing all remaining candidates {:?}", remaining);
                self.elected.extend(remaining.iter().map(|(cid, _)| *cid));
                stats.elected = remaining
                    .iter()
                    .map(|(cid, _)| (*cid, Transfers::default()))
                    .collect();
                self.running.clear();
                self.stats.push(stats);
                return Ok(());
            }

            let lowest = lowest_candidates(&round.totals);
            let loser = match lowest.as_slice() {
                [single] => *single,
                _ => {
                    info!(
                        "Tiebreak initiated between {:?}",
                        lowest
                            .iter()
                            .map(|cid| names[cid.0 as usize].as_str())
                            .collect::<Vec<&str>>()
                    );
                    let ctx = TiebreakContext {
                        previous_rounds: &self.history[..self.history.len() - 1],
                        ballots: &self.ballots,
                        max_depth: names.len(),
                        mode,
                        num_round: round_id,
                        names,
                    };
                    let outcome = break_tie(&lowest, &ctx)?;
                    stats.tiebreak = Some(outcome.method);
                    outcome.loser
                }
            };
            debug!("run: eliminating {:?}", loser);
            let mut transfers = self.transfer(&[(loser, 1.0)].iter().cloned().collect());
            stats.eliminated = vec![(loser, transfers.remove(&loser).unwrap_or_default())];
            self.stats.push(stats);
        }
    }
}

struct CheckResult {
    ballots: Vec<Ballot>,
    formal_votes: u64,
    informal_votes: u64,
}

// Applies the formality rules to all the votes.
fn checks(coll: &[Vote], candidates: &[Candidate]) -> Result<CheckResult, VotingErrors> {
    debug!("checks: coll size: {:?}", coll.len());
    let excluded: Vec<bool> = candidates.iter().map(|c| c.excluded).collect();
    let mut ballots: Vec<Ballot> = Vec::new();
    let mut formal_votes: u64 = 0;
    let mut informal_votes: u64 = 0;
    for v in coll.iter() {
        ensure!(
            v.ranks.len() == candidates.len(),
            BallotWidthMismatchSnafu {
                expected: candidates.len(),
                found: v.ranks.len()
            }
        );
        match formal_ballot(v, &excluded) {
            Some(b) => {
                formal_votes += v.count;
                ballots.push(b);
            }
            None => informal_votes += v.count,
        }
    }
    debug!(
        "checks: formal votes: {:?} informal votes: {:?}",
        formal_votes, informal_votes
    );
    Ok(CheckResult {
        ballots,
        formal_votes,
        informal_votes,
    })
}

/// Runs the Single Transferable Vote count for one role.
///
/// Arguments:
/// * `coll` the votes of this role, one rank per registered candidate
/// * `rules` the number of seats and the tiebreak policy
/// * `candidates` the registered candidates, in the order of the ranks of the votes
pub fn run_election(
    coll: &[Vote],
    rules: &ElectionRules,
    candidates: &[Candidate],
) -> Result<ElectionResult, VotingErrors> {
    info!(
        "Processing {:?} votes, candidates: {:?}, rules: {:?}",
        coll.len(),
        candidates,
        rules
    );
    ensure!(!candidates.is_empty(), EmptyElectionSnafu);
    ensure!(
        rules.number_of_seats > 0,
        InvalidQuotaInputSnafu {
            seats: rules.number_of_seats
        }
    );
    let mut seen: HashSet<&str> = HashSet::new();
    for c in candidates.iter() {
        ensure!(
            seen.insert(c.name.as_str()),
            DuplicateCandidateSnafu {
                name: c.name.clone()
            }
        );
    }

    let cr = checks(coll, candidates)?;
    let quota = quota(cr.formal_votes, rules.number_of_seats)?;
    info!(
        "Formal votes: {} informal votes: {} seats: {} quota: {}",
        cr.formal_votes, cr.informal_votes, rules.number_of_seats, quota
    );

    let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
    let running: Vec<CandidateId> = candidates
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| {
            if c.excluded {
                None
            } else {
                Some(CandidateId(idx as u32))
            }
        })
        .collect();
    for cid in running.iter() {
        info!("Candidate: {}: {}", cid.0, names[cid.0 as usize]);
    }

    let initial_value: VoteValue = cr.ballots.iter().map(|b| b.weight()).sum();
    let mut state = ElectionState {
        ballots: cr.ballots,
        running,
        elected: Vec::new(),
        seats: rules.number_of_seats as usize,
        quota,
        initial_value,
        elected_value: VoteValue::EMPTY,
        history: Vec::new(),
        stats: Vec::new(),
    };
    state.run(rules.tiebreak_mode, &names)?;

    let winners: Vec<String> = state
        .elected
        .iter()
        .map(|cid| names[cid.0 as usize].clone())
        .collect();
    info!("Winners: {:?}", winners);
    Ok(ElectionResult {
        winners,
        seats: rules.number_of_seats,
        quota,
        formal_votes: cr.formal_votes,
        informal_votes: cr.informal_votes,
        round_stats: round_results_to_stats(&state.stats, &names),
    })
}

fn round_results_to_stats(results: &[RoundStatistics], names: &[String]) -> Vec<RoundStats> {
    results
        .iter()
        .enumerate()
        .map(|(idx, r)| round_result_to_stat(r, idx as RoundId + 1, names))
        .collect()
}

fn round_result_to_stat(stats: &RoundStatistics, round_id: RoundId, names: &[String]) -> RoundStats {
    let name = |cid: &CandidateId| names[cid.0 as usize].clone();
    let transfer_stats = |(cid, t): &(CandidateId, Transfers)| {
        let mut to: Vec<(&CandidateId, &VoteValue)> = t.to.iter().collect();
        to.sort_by_key(|(cid, _)| **cid);
        TransferStats {
            name: name(cid),
            transfers: to.iter().map(|(c, vc)| (name(*c), vc.0)).collect(),
            exhausted: t.exhausted.unwrap_or(VoteValue::EMPTY).0,
        }
    };
    RoundStats {
        round: round_id,
        tally: stats
            .round
            .totals
            .iter()
            .map(|(cid, vc)| (name(cid), vc.0))
            .collect(),
        exhausted: stats.round.exhausted.0,
        elected_value: stats.round.elected_value.0,
        tally_results_elected: stats.elected.iter().map(&transfer_stats).collect(),
        tally_result_eliminated: stats.eliminated.iter().map(&transfer_stats).collect(),
        tiebreak: stats.tiebreak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn cands(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|n| Candidate::new(n)).collect()
    }

    // Ballots listing candidate indexes in preference order.
    fn votes(prefs_list: &[(u64, &[usize])], width: usize) -> Vec<Vote> {
        prefs_list
            .iter()
            .map(|(count, prefs)| {
                let mut ranks = vec![None; width];
                for (pos, idx) in prefs.iter().enumerate() {
                    ranks[*idx] = Some(pos as u32 + 1);
                }
                Vote {
                    ranks,
                    count: *count,
                }
            })
            .collect()
    }

    fn state_for(coll: &[Vote], seats: u32, candidates: &[Candidate]) -> ElectionState {
        let cr = checks(coll, candidates).unwrap();
        let initial_value = cr.ballots.iter().map(|b| b.weight()).sum();
        ElectionState {
            ballots: cr.ballots,
            running: (0..candidates.len() as u32).map(CandidateId).collect(),
            elected: Vec::new(),
            seats: seats as usize,
            quota: quota(cr.formal_votes, seats).unwrap(),
            initial_value,
            elected_value: VoteValue::EMPTY,
            history: Vec::new(),
            stats: Vec::new(),
        }
    }

    #[test]
    fn ballot_values_stay_in_range() {
        init();
        let candidates = cands(&["A", "B", "C", "D"]);
        let coll = votes(
            &[(50, &[0, 1, 2]), (20, &[1, 0]), (18, &[2, 3]), (12, &[3, 2])],
            4,
        );
        let mut state = state_for(&coll, 3, &candidates);
        let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        state.run(TieBreakMode::StopCounting, &names).unwrap();
        assert_eq!(
            state.elected,
            vec![CandidateId(0), CandidateId(1), CandidateId(2)]
        );
        // A passes 0.48 to B, then B passes 18/44 of that on to C.
        let expected = 0.48 * 18.0 / 44.0;
        for b in state.ballots.iter() {
            assert!(b.value() <= 1.0);
            if !b.is_exhausted() {
                assert!(b.value() > 0.0);
            }
        }
        let first = &state.ballots[0];
        assert!((first.value() - expected).abs() < 1e-12);
        assert_eq!(first.current(), Some(CandidateId(2)));
        // The quota did not move.
        assert_eq!(state.quota, 26);
    }

    #[test]
    fn ballot_values_never_increase() {
        init();
        let candidates = cands(&["A", "B", "C", "D"]);
        let coll = votes(
            &[(50, &[0, 1, 2]), (20, &[1, 0]), (18, &[2, 3]), (12, &[3, 2])],
            4,
        );
        let mut state = state_for(&coll, 3, &candidates);
        // A and then B pass on their surplus, then D is eliminated.
        let steps: Vec<HashMap<CandidateId, f64>> = vec![
            [(CandidateId(0), 24.0 / 50.0)].iter().cloned().collect(),
            [(CandidateId(1), 18.0 / 44.0)].iter().cloned().collect(),
            [(CandidateId(3), 1.0)].iter().cloned().collect(),
        ];
        for factors in steps.iter() {
            let round = state.count();
            for (cid, factor) in factors.iter() {
                let total = round.total(*cid).unwrap();
                state.elected_value += VoteValue(total.0 * (1.0 - factor));
            }
            state.history.push(round);
            let before: Vec<f64> = state.ballots.iter().map(|b| b.value()).collect();
            state.transfer(factors);
            for (b, old) in state.ballots.iter().zip(before.iter()) {
                assert!(b.value() <= *old, "value went from {} to {}", old, b.value());
                assert!(b.value() >= 0.0);
            }
        }
        assert_eq!(state.running, vec![CandidateId(2)]);
    }

    #[test]
    fn value_is_conserved() {
        init();
        let candidates = cands(&["A", "B", "C", "D", "E"]);
        let coll = votes(
            &[
                (31, &[0, 1, 3]),
                (9, &[0, 2]),
                (20, &[1, 4, 2]),
                (14, &[2, 3]),
                (11, &[3, 0, 1]),
                (15, &[4]),
            ],
            5,
        );
        let res = run_election(&coll, &ElectionRules::with_seats(3), &candidates).unwrap();
        assert_eq!(res.quota, 26);
        for rs in res.round_stats.iter() {
            let total: f64 = rs.tally.iter().map(|(_, v)| *v).sum::<f64>()
                + rs.exhausted
                + rs.elected_value;
            assert!((total - 100.0).abs() < 1e-6, "round {}: {}", rs.round, total);
        }
    }

    #[test]
    fn lowest_with_tolerance() {
        let totals = vec![
            (CandidateId(0), VoteValue(0.1 + 0.2)),
            (CandidateId(1), VoteValue(0.3)),
            (CandidateId(2), VoteValue(0.5)),
        ];
        assert_eq!(
            lowest_candidates(&totals),
            vec![CandidateId(0), CandidateId(1)]
        );
        assert!(lowest_candidates(&[]).is_empty());
    }

    #[test]
    fn raw_preferences_decide_the_lowest() {
        init();
        let candidates = cands(&["A", "B", "C", "D"]);
        let coll = votes(&[(40, &[0, 2]), (40, &[1]), (10, &[2]), (10, &[3])], 4);
        let res = run_election(
            &coll,
            &ElectionRules {
                number_of_seats: 1,
                tiebreak_mode: TieBreakMode::Random(3),
            },
            &candidates,
        )
        .unwrap();
        // C and D tie on 10 in the first round, but C is ranked second by 40 voters.
        let first = &res.round_stats[0];
        assert_eq!(first.tiebreak, Some(TiebreakMethod::RawPreference(2)));
        assert_eq!(first.tally_result_eliminated[0].name, "D");
        assert_eq!(res.winners.len(), 1);
        assert_eq!(res.quota, 51);
    }

    #[test]
    fn seating_breaks_ties_at_the_boundary() {
        let candidates = cands(&["A", "B", "C", "D"]);
        let coll = votes(&[(40, &[0, 2]), (40, &[1]), (10, &[2]), (10, &[3])], 4);
        let mut state = state_for(&coll, 1, &candidates);
        state.history.push(state.count());
        let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        let contest = vec![
            (CandidateId(0), VoteValue(40.0)),
            (CandidateId(1), VoteValue(40.0)),
        ];
        // Nothing but the draw separates A and B.
        let seated = state
            .seating_order(contest.clone(), TieBreakMode::Random(3), &names)
            .unwrap();
        assert_eq!(seated.len(), 1);
        let again = state
            .seating_order(contest.clone(), TieBreakMode::Random(3), &names)
            .unwrap();
        assert_eq!(seated, again);
        assert_eq!(
            state.seating_order(contest, TieBreakMode::StopCounting, &names),
            Err(VotingErrors::UnresolvedTie {
                candidates: vec!["A".to_string(), "B".to_string()]
            })
        );
    }

    #[test]
    fn seating_prefers_higher_totals() {
        let candidates = cands(&["A", "B", "C"]);
        let coll = votes(&[(10, &[0]), (10, &[1]), (10, &[2])], 3);
        let mut state = state_for(&coll, 1, &candidates);
        state.history.push(state.count());
        let names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
        let seated = state
            .seating_order(
                vec![
                    (CandidateId(0), VoteValue(12.0)),
                    (CandidateId(1), VoteValue(20.0)),
                    (CandidateId(2), VoteValue(15.0)),
                ],
                TieBreakMode::StopCounting,
                &names,
            )
            .unwrap();
        assert_eq!(seated, vec![(CandidateId(1), VoteValue(20.0))]);
    }
}
