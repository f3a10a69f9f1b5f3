pub use crate::config::*;
use crate::run_matching_stats;

/// A builder for assembling a quiz dataset and a set of answers.
///
/// ```
/// pub use party_matching::builder::Builder;
/// pub use party_matching::VoteChoice;
/// # use party_matching::MatchingErrors;
///
/// let mut builder = Builder::new()
///     .parties(&["Rood".to_string(), "Blauw".to_string()])?;
///
/// builder.add_motion("m1", "Motie over iets", &[VoteChoice::For, VoteChoice::Against])?;
/// builder.add_answer("m1", VoteChoice::For)?;
///
/// let res = builder.results()?;
/// assert_eq!(res.rankings[0].party, "Rood");
///
/// # Ok::<(), MatchingErrors>(())
/// ```
pub struct Builder {
    pub(crate) _registry: Option<Vec<Party>>,
    pub(crate) _motions: Vec<Motion>,
    pub(crate) _answers: Vec<Answer>,
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _registry: None,
            _motions: Vec::new(),
            _answers: Vec::new(),
        }
    }

    /// Declares the parties of the quiz, in ranking order.
    pub fn parties(self, names: &[String]) -> Result<Builder, MatchingErrors> {
        Ok(Builder {
            _registry: Some(
                names
                    .iter()
                    .map(|name| Party {
                        name: name.clone(),
                        code: None,
                        excluded: false,
                    })
                    .collect(),
            ),
            _motions: self._motions,
            _answers: self._answers,
        })
    }

    /// Adds a motion with the party stances in declaration order.
    ///
    /// This form requires the parties to have been declared first with
    /// [Builder::parties].
    pub fn add_motion(
        &mut self,
        id: &str,
        title: &str,
        stances: &[VoteChoice],
    ) -> Result<(), MatchingErrors> {
        let registry = match self._registry.as_deref() {
            Some(parties) => parties,
            None => {
                return Err(MatchingErrors::NoDeclaredParties);
            }
        };
        let votes: Vec<(String, VoteChoice)> = registry
            .iter()
            .zip(stances.iter())
            .map(|(p, choice)| (p.name.clone(), *choice))
            .collect();
        self.add_motion_2(&Motion {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            votes,
        })
    }

    pub fn add_motion_2(&mut self, motion: &Motion) -> Result<(), MatchingErrors> {
        self._motions.push(motion.clone());
        Ok(())
    }

    pub fn add_answer(&mut self, motion_id: &str, choice: VoteChoice) -> Result<(), MatchingErrors> {
        self._answers.push(Answer {
            motion_id: motion_id.to_string(),
            choice,
        });
        Ok(())
    }

    /// Runs the matching over everything added so far.
    pub fn results(&self) -> Result<MatchingResult, MatchingErrors> {
        run_matching_stats(&self._motions, &self._answers, &self._registry)
    }

    /// Starts an interactive session over the motions added so far. Answers
    /// already added to the builder are not carried over.
    pub fn session(&self) -> Result<crate::session::QuizSession, MatchingErrors> {
        crate::session::QuizSession::new(self._motions.clone(), self._registry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assembles_and_scores() {
        let mut builder = Builder::new()
            .parties(&["Rood".to_string(), "Blauw".to_string(), "Groen".to_string()])
            .unwrap();
        builder
            .add_motion(
                "m1",
                "Eerste motie",
                &[VoteChoice::For, VoteChoice::Against, VoteChoice::Neutral],
            )
            .unwrap();
        builder.add_answer("m1", VoteChoice::For).unwrap();
        let res = builder.results().unwrap();
        let names: Vec<&str> = res.rankings.iter().map(|r| r.party.as_str()).collect();
        assert_eq!(names, vec!["Rood", "Groen", "Blauw"]);
    }

    #[test]
    fn motions_by_stance_require_declared_parties() {
        let mut builder = Builder::new();
        assert!(builder
            .add_motion("m1", "Eerste motie", &[VoteChoice::For])
            .is_err());
    }

    #[test]
    fn stances_shorter_than_the_registry_are_rejected_at_scoring() {
        let mut builder = Builder::new()
            .parties(&["Rood".to_string(), "Blauw".to_string()])
            .unwrap();
        builder
            .add_motion("m1", "Eerste motie", &[VoteChoice::For])
            .unwrap();
        builder.add_answer("m1", VoteChoice::For).unwrap();
        assert!(builder.results().is_err());
    }
}
