use super::model::Vote;

/// A vote request. `Clear` withdraws whatever the voter had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ballot {
    Up,
    Down,
    Clear,
}

impl Ballot {
    /// The magnitude stored for this ballot; `None` means "no entry".
    pub fn magnitude(self) -> Option<i8> {
        match self {
            Ballot::Up => Some(1),
            Ballot::Down => Some(-1),
            Ballot::Clear => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub score: i64,
    pub upvote_percentage: i64,
}

/// Score and upvote percentage for a vote set.
///
/// The percentage is `up * 100 / total` rounded half away from zero, and 0
/// for an empty set.
pub fn recompute(votes: &[Vote]) -> Tally {
    if votes.is_empty() {
        return Tally::default();
    }

    let score = votes.iter().map(|v| i64::from(v.vote)).sum();
    let up = votes.iter().filter(|v| v.vote == 1).count();
    // f64::round is half-away-from-zero, not banker's rounding.
    let percentage = (up as f64 * 100.0 / votes.len() as f64).round() as i64;

    Tally {
        score,
        upvote_percentage: percentage,
    }
}
