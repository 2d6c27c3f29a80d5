pub use crate::config::*;

use snafu::ensure;

/// A builder for one role: registers the candidates, the exclusions and the votes.
///
/// ```
/// pub use stv_tally::builder::Builder;
/// pub use stv_tally::ElectionRules;
/// # use stv_tally::VotingErrors;
///
/// let mut builder = Builder::new(&ElectionRules::with_seats(1))?
///     .candidates(&["Anna".to_string(), "Bob".to_string(), "Clara".to_string()])?
///     .exclude(&["Clara".to_string()])?;
///
/// // One label per candidate, in the order of the candidates.
/// builder.add_vote_labels(&["P1", "P2", ""])?;
/// builder.add_vote_labels(&["P2", "P1", "P3"])?;
/// builder.add_vote_labels(&["P1", "", ""])?;
///
/// let result = builder.run()?;
/// assert_eq!(result.winners, vec!["Anna".to_string()]);
/// # Ok::<(), VotingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: ElectionRules,
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _votes: Vec<Vote>,
}

impl Builder {
    pub fn new(rules: &ElectionRules) -> Result<Builder, VotingErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _candidates: Vec::new(),
            _votes: Vec::new(),
        })
    }

    /// Registers the candidates. Votes added before are dropped.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, VotingErrors> {
        let mut candidates: Vec<Candidate> = Vec::new();
        for name in cands.iter() {
            ensure!(
                !candidates.iter().any(|c: &Candidate| c.name == *name),
                DuplicateCandidateSnafu { name: name.clone() }
            );
            candidates.push(Candidate::new(name));
        }
        Ok(Builder {
            _rules: self._rules,
            _candidates: candidates,
            _votes: Vec::new(),
        })
    }

    /// Marks some registered candidates as excluded.
    ///
    /// Every name must be one of the registered candidates: a name that does not
    /// match usually means a misspelling, and the election is not run.
    pub fn exclude(mut self, excluded: &[String]) -> Result<Builder, VotingErrors> {
        for name in excluded.iter() {
            let c = self
                ._candidates
                .iter_mut()
                .find(|c| c.name == *name)
                .ok_or(VotingErrors::MalformedBallotSchema { name: name.clone() })?;
            c.excluded = true;
        }
        Ok(self)
    }

    /// Adds a vote from the labels of the form.
    ///
    /// It is the simplest use case for most cases. The labels follow the order
    /// of the candidates, see [crate::parse_preference_label] for the accepted
    /// labels.
    pub fn add_vote_labels<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<(), VotingErrors> {
        let mut ranks: Vec<Option<u32>> = Vec::new();
        for label in labels {
            ranks.push(crate::parse_preference_label(label.as_ref())?);
        }
        self.add_vote(&ranks, 1)
    }

    /// Adds a vote, with a potential weight attached to it.
    ///
    /// ranks: the preference given to each candidate, in the order of the candidates.
    pub fn add_vote(&mut self, ranks: &[Option<u32>], count: u64) -> Result<(), VotingErrors> {
        ensure!(
            ranks.len() == self._candidates.len(),
            BallotWidthMismatchSnafu {
                expected: self._candidates.len(),
                found: ranks.len()
            }
        );
        self._votes.push(Vote {
            ranks: ranks.to_vec(),
            count,
        });
        Ok(())
    }

    pub fn num_votes(&self) -> usize {
        self._votes.len()
    }

    /// Runs the count on the votes added so far.
    pub fn run(&self) -> Result<ElectionResult, VotingErrors> {
        crate::run_election(&self._votes, &self._rules, &self._candidates)
    }
}
