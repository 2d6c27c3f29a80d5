// ********* Input data structures ***********

use snafu::Snafu;

/// A candidate running for one role.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Candidate {
    pub name: String,
    /// Excluded candidates are removed from every ballot before the formality
    /// checks run. They can never be elected or eliminated.
    pub excluded: bool,
}

impl Candidate {
    pub fn new(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            excluded: false,
        }
    }
}

/// The preferences of one voter (or of `count` identical voters) for one role.
///
/// `ranks[i]` is the preference number given to the i-th registered candidate,
/// or `None` when the voter left that cell blank. In most cases, it is easier
/// to go through the builder API which parses the labels of the form.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Vote {
    pub ranks: Vec<Option<u32>>,
    pub count: u64,
}

// ******** Output data structures *********

/// Where the ballots of an elected or eliminated candidate went.
#[derive(PartialEq, Debug, Clone)]
pub struct TransferStats {
    pub name: String,
    /// The value received by each continuing candidate.
    pub transfers: Vec<(String, f64)>,
    /// The value that had no further preference.
    pub exhausted: f64,
}

/// The rule that settled a tie for the lowest total.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TiebreakMethod {
    /// The tied candidates had different totals in this earlier round.
    PreviousRound(u32),
    /// The tied candidates had different totals at this raw preference level.
    RawPreference(u32),
    /// Nothing separated the candidates, the seeded draw decided.
    Random,
}

/// Statistics for one round
#[derive(PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    /// The totals of the candidates still running, in candidate order.
    pub tally: Vec<(String, f64)>,
    /// The value of the ballots that have no continuing preference.
    pub exhausted: f64,
    /// The value kept by the candidates elected in earlier rounds.
    pub elected_value: f64,
    /// Candidates elected in this round, in seating order. The transfers are
    /// empty when the election ended in this round.
    pub tally_results_elected: Vec<TransferStats>,
    pub tally_result_eliminated: Vec<TransferStats>,
    pub tiebreak: Option<TiebreakMethod>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct ElectionResult {
    /// The winners, in the order they were elected.
    pub winners: Vec<String>,
    pub seats: u32,
    pub quota: u64,
    pub formal_votes: u64,
    pub informal_votes: u64,
    pub round_stats: Vec<RoundStats>,
}

impl ElectionResult {
    /// The number of seats that could not be filled because too few candidates
    /// were running.
    pub fn unfilled_seats(&self) -> u32 {
        self.seats.saturating_sub(self.winners.len() as u32)
    }
}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum VotingErrors {
    #[snafu(display("No candidate is registered for this election"))]
    EmptyElection,
    #[snafu(display("Cannot compute a quota: the number of seats must be positive, got {seats}"))]
    InvalidQuotaInput { seats: u32 },
    #[snafu(display("Excluded candidate {name} is not running in this election, check the spelling"))]
    MalformedBallotSchema { name: String },
    #[snafu(display("Candidate {name} is registered more than once"))]
    DuplicateCandidate { name: String },
    #[snafu(display("Cannot read preference label {label:?}, expected P1, P2, ... or a blank"))]
    InvalidPreferenceLabel { label: String },
    #[snafu(display("A vote ranks {found} candidates but {expected} are registered"))]
    BallotWidthMismatch { expected: usize, found: usize },
    #[snafu(display("Cannot break the tie between {:?} without a random draw", candidates))]
    UnresolvedTie { candidates: Vec<String> },
}

// ********* Configuration **********

/// What to do when neither the previous rounds nor the raw preferences
/// separate the candidates tied for the lowest total.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    /// Draw a candidate using the given seed. The same seed always leads to the
    /// same draw.
    Random(u32),
    /// Refuse to draw and fail the election.
    StopCounting,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionRules {
    pub number_of_seats: u32,
    pub tiebreak_mode: TieBreakMode,
}

impl ElectionRules {
    pub const DEFAULT_RULES: ElectionRules = ElectionRules {
        number_of_seats: 1,
        tiebreak_mode: TieBreakMode::Random(0),
    };

    pub fn with_seats(number_of_seats: u32) -> ElectionRules {
        ElectionRules {
            number_of_seats,
            ..ElectionRules::DEFAULT_RULES
        }
    }
}
