// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A recorded stance on a motion, either by a party or by the quiz taker.
///
/// This is a closed enumeration: the original data format carries the
/// stances as the strings `voor` / `tegen` / `neutraal`, which are mapped
/// to this type at the input boundary.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum VoteChoice {
    For,
    Against,
    Neutral,
}

/// A motion: one quiz question, with the historical vote of every party.
///
/// The `votes` are kept in sequence order. The order of the parties in the
/// first motion defines the ranking order for tied results when no explicit
/// party registry is provided.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Motion {
    pub id: String,
    /// Display text. Opaque to the engine.
    pub title: String,
    /// Display text. Opaque to the engine.
    pub description: String,
    /// The recorded stance of each party on this motion, keyed by party name.
    /// Every motion in a dataset must carry the same set of party names.
    pub votes: Vec<(String, VoteChoice)>,
}

/// A declared party. The declaration order fixes the ranking order for
/// parties with an equal match percentage.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Party {
    pub name: String,
    pub code: Option<String>,
    /// An excluded party is still validated against the dataset but does
    /// not appear in the rankings.
    pub excluded: bool,
}

/// The stance of the quiz taker on one motion.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Answer {
    pub motion_id: String,
    pub choice: VoteChoice,
}

// ******** Output data structures *********

/// The computed affinity of one party with the given answers.
#[derive(PartialEq, Debug, Clone)]
pub struct MatchResult {
    pub party: String,
    /// In `[0, 100]`.
    pub percentage: f64,
    /// The number of answers that entered the comparison for this party.
    pub counted_answers: u32,
}

/// The ranked outcome of a matching run.
#[derive(PartialEq, Debug, Clone)]
pub struct MatchingResult {
    /// Sorted by percentage, descending. Parties with an equal percentage
    /// keep their registry order. Parties without any counted answer are
    /// absent: a percentage is undefined without a basis for comparison.
    pub rankings: Vec<MatchResult>,
    /// The number of motions in the dataset.
    pub num_motions: usize,
    /// The number of answers that were not neutral.
    pub num_counted_answers: usize,
}

impl MatchingResult {
    /// The best-matching party, if any party could be scored.
    pub fn top_match(&self) -> Option<&MatchResult> {
        self.rankings.first()
    }
}

/// Errors that prevent a matching run from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MatchingErrors {
    /// The motion sequence was empty.
    EmptyDataset,
    /// Two motions carry the same id.
    DuplicateMotion { motion_id: String },
    /// An answer references a motion id that is not in the dataset.
    UnknownMotion { motion_id: String },
    /// A motion is missing a vote for a party that the dataset declares,
    /// or carries a vote for a party that it does not.
    InconsistentPartyVotes { motion_id: String, party: String },
    /// The session has no current motion left to answer.
    SessionComplete,
    /// A motion was given as a list of stances but no parties have been
    /// declared to pair them with.
    NoDeclaredParties,
}

impl Error for MatchingErrors {}

impl Display for MatchingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchingErrors::EmptyDataset => write!(f, "the motion dataset is empty"),
            MatchingErrors::DuplicateMotion { motion_id } => {
                write!(f, "duplicate motion id {:?} in the dataset", motion_id)
            }
            MatchingErrors::UnknownMotion { motion_id } => {
                write!(f, "answer references unknown motion id {:?}", motion_id)
            }
            MatchingErrors::InconsistentPartyVotes { motion_id, party } => {
                write!(
                    f,
                    "motion {:?} disagrees with the dataset about party {:?}",
                    motion_id, party
                )
            }
            MatchingErrors::SessionComplete => {
                write!(f, "all motions of this session have been answered")
            }
            MatchingErrors::NoDeclaredParties => {
                write!(f, "no parties have been declared for this quiz")
            }
        }
    }
}
