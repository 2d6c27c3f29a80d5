use snafu::ensure;

use crate::config::*;

/// The Droop quota: the smallest whole number of votes that at most `seats`
/// candidates can reach at the same time.
///
/// It is computed once from the formal votes at the start of the count and
/// does not change when ballots get exhausted.
///
/// ```
/// assert_eq!(stv_tally::quota(100, 1), Ok(51));
/// assert_eq!(stv_tally::quota(100, 2), Ok(34));
/// ```
pub fn quota(formal_votes: u64, seats: u32) -> Result<u64, VotingErrors> {
    ensure!(seats > 0, InvalidQuotaInputSnafu { seats });
    Ok(formal_votes / (seats as u64 + 1) + 1)
}
