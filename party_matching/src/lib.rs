mod config;
pub mod builder;
pub mod quick_start;
pub mod session;

use log::{debug, info};

use std::{
    collections::{HashMap, HashSet},
    ops::AddAssign,
};

pub use crate::config::*;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct PartyId(u32);

// Agreement is accumulated in half points so that the arithmetic stays exact:
// full agreement is worth two half points, a neutral party stance one.
// The division happens only once, when the percentage is reported.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
struct MatchScore(u64);

impl MatchScore {
    const EMPTY: MatchScore = MatchScore(0);
    const PARTIAL: MatchScore = MatchScore(1);
    const FULL: MatchScore = MatchScore(2);
}

impl AddAssign for MatchScore {
    fn add_assign(&mut self, rhs: MatchScore) {
        self.0 += rhs.0;
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
struct PartyTally {
    score: MatchScore,
    // The number of answers that entered the comparison. A neutral answer
    // from the quiz taker is not part of the basis at all.
    counted: u32,
}

impl PartyTally {
    const EMPTY: PartyTally = PartyTally {
        score: MatchScore::EMPTY,
        counted: 0,
    };

    // Only meaningful when counted > 0.
    fn percentage(&self) -> f64 {
        (self.score.0 as f64) * 100.0 / ((2 * self.counted) as f64)
    }
}

struct CheckResult {
    // Name, id and exclusion flag for every party, in registry order.
    parties: Vec<(String, PartyId, bool)>,
    // For every motion id, the stances aligned with the party order above.
    stances: HashMap<String, Vec<VoteChoice>>,
}

// Validates the dataset and indexes it for the tallying pass.
// Parties are returned in registry order when a registry is provided, in
// first-appearance order over the motions otherwise.
fn checks(
    motions: &[Motion],
    registry: &Option<Vec<Party>>,
) -> Result<CheckResult, MatchingErrors> {
    debug!("checks: dataset size: {:?}", motions.len());
    if motions.is_empty() {
        return Err(MatchingErrors::EmptyDataset);
    }

    let declared: Vec<Party> = match registry {
        Some(parties) => parties.clone(),
        None => {
            let mut seen: HashSet<String> = HashSet::new();
            let mut res: Vec<Party> = Vec::new();
            for m in motions.iter() {
                for (name, _) in m.votes.iter() {
                    if seen.insert(name.clone()) {
                        res.push(Party {
                            name: name.clone(),
                            code: None,
                            excluded: false,
                        });
                    }
                }
            }
            res
        }
    };

    let party_ids: HashMap<&str, PartyId> = declared
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.name.as_str(), PartyId(idx as u32)))
        .collect();

    let mut stances: HashMap<String, Vec<VoteChoice>> = HashMap::new();
    for m in motions.iter() {
        let mut row: Vec<Option<VoteChoice>> = vec![None; declared.len()];
        for (name, choice) in m.votes.iter() {
            let pid = party_ids.get(name.as_str()).ok_or_else(|| {
                // A party that the registry does not know about.
                MatchingErrors::InconsistentPartyVotes {
                    motion_id: m.id.clone(),
                    party: name.clone(),
                }
            })?;
            let slot = &mut row[pid.0 as usize];
            if slot.is_some() {
                // The same party voted twice on one motion.
                return Err(MatchingErrors::InconsistentPartyVotes {
                    motion_id: m.id.clone(),
                    party: name.clone(),
                });
            }
            *slot = Some(*choice);
        }
        let mut full: Vec<VoteChoice> = Vec::with_capacity(row.len());
        for (idx, slot) in row.iter().enumerate() {
            match slot {
                Some(choice) => full.push(*choice),
                None => {
                    return Err(MatchingErrors::InconsistentPartyVotes {
                        motion_id: m.id.clone(),
                        party: declared[idx].name.clone(),
                    });
                }
            }
        }
        if stances.insert(m.id.clone(), full).is_some() {
            return Err(MatchingErrors::DuplicateMotion {
                motion_id: m.id.clone(),
            });
        }
    }

    let parties: Vec<(String, PartyId, bool)> = declared
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.name.clone(), PartyId(idx as u32), p.excluded))
        .collect();
    debug!("checks: parties {:?}", parties);

    Ok(CheckResult { parties, stances })
}

/// Validates a motion dataset without running a tally.
///
/// This is meant to run once at load time: every motion must carry a vote for
/// exactly the set of parties the dataset declares, and motion ids must be
/// unique. A dataset that passes this check cannot fail a later
/// [run_matching_stats] call except through a dangling answer id.
pub fn validate_dataset(
    motions: &[Motion],
    registry: &Option<Vec<Party>>,
) -> Result<(), MatchingErrors> {
    checks(motions, registry).map(|_| ())
}

/// Computes the ranked match percentages for the given answers.
///
/// Arguments:
/// * `motions` the full motion dataset of the quiz
/// * `answers` the stances of the quiz taker, one per answered motion. The
///   sequence may be partial.
/// * `registry` the declared parties. If not provided, the parties are
///   inferred from the votes of the motions.
///
/// Per party, a non-neutral answer scores 1 for agreement, 0.5 when the party
/// itself was neutral and 0 for opposition; the percentage is the scored
/// fraction of the counted answers. Neutral answers are not counted for any
/// party. A party with no counted answer has no defined percentage and is
/// left out of the rankings.
pub fn run_matching_stats(
    motions: &[Motion],
    answers: &[Answer],
    registry: &Option<Vec<Party>>,
) -> Result<MatchingResult, MatchingErrors> {
    info!(
        "run_matching_stats: processing {:?} answers over {:?} motions",
        answers.len(),
        motions.len()
    );

    let cr = checks(motions, registry)?;
    for (name, pid, _) in cr.parties.iter() {
        debug!("Party: {}: {}", pid.0, name);
    }

    let mut tallies: Vec<PartyTally> = vec![PartyTally::EMPTY; cr.parties.len()];
    let mut num_counted_answers: usize = 0;

    for a in answers.iter() {
        let stances =
            cr.stances
                .get(&a.motion_id)
                .ok_or_else(|| MatchingErrors::UnknownMotion {
                    motion_id: a.motion_id.clone(),
                })?;
        if a.choice == VoteChoice::Neutral {
            // An abstention: it is excluded from the basis entirely, not
            // scored as a disagreement.
            debug!("run_matching_stats: skipping neutral answer on {:?}", a.motion_id);
            continue;
        }
        num_counted_answers += 1;
        for (tally, stance) in tallies.iter_mut().zip(stances.iter()) {
            tally.counted += 1;
            tally.score += if *stance == a.choice {
                MatchScore::FULL
            } else if *stance == VoteChoice::Neutral {
                MatchScore::PARTIAL
            } else {
                MatchScore::EMPTY
            };
        }
    }

    let mut rankings: Vec<MatchResult> = Vec::new();
    for ((name, _, excluded), tally) in cr.parties.iter().zip(tallies.iter()) {
        if *excluded {
            debug!("run_matching_stats: party {:?} is excluded from rankings", name);
            continue;
        }
        if tally.counted == 0 {
            // No basis for comparison for this party.
            debug!("run_matching_stats: party {:?} has no counted answers", name);
            continue;
        }
        rankings.push(MatchResult {
            party: name.clone(),
            percentage: tally.percentage(),
            counted_answers: tally.counted,
        });
    }

    // The sort is stable: parties with an equal percentage keep the registry
    // order.
    rankings.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    for (rank, r) in rankings.iter().enumerate() {
        info!(
            "run_matching_stats: #{} {} {:.2}%",
            rank + 1,
            r.party,
            r.percentage
        );
    }

    Ok(MatchingResult {
        rankings,
        num_motions: motions.len(),
        num_counted_answers,
    })
}
