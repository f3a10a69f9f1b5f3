//! The quiz session controller.
//!
//! A [QuizSession] owns the full state of one quiz run: the motion dataset,
//! the current position and the accumulated answers. All state lives in the
//! session value itself, so independent sessions over the same dataset never
//! interfere.

use log::debug;

use crate::{
    run_matching_stats, validate_dataset, Answer, MatchingErrors, MatchingResult, Motion, Party,
    VoteChoice,
};

/// Whether the session still has motions left to answer.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SessionStatus {
    InProgress,
    Complete,
}

/// One quiz run: presents the motions in sequence and accumulates the
/// answers of the quiz taker.
#[derive(PartialEq, Debug, Clone)]
pub struct QuizSession {
    motions: Vec<Motion>,
    registry: Option<Vec<Party>>,
    position: usize,
    answers: Vec<Answer>,
}

impl QuizSession {
    /// Starts a session over the given dataset.
    ///
    /// The dataset is validated here, once: a session cannot be constructed
    /// over motions with diverging party sets.
    pub fn new(
        motions: Vec<Motion>,
        registry: Option<Vec<Party>>,
    ) -> Result<QuizSession, MatchingErrors> {
        validate_dataset(&motions, &registry)?;
        Ok(QuizSession {
            motions,
            registry,
            position: 0,
            answers: Vec::new(),
        })
    }

    pub fn num_motions(&self) -> usize {
        self.motions.len()
    }

    /// The zero-based index of the motion currently presented.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The motion currently presented, or None once the session is complete.
    pub fn current_motion(&self) -> Option<&Motion> {
        self.motions.get(self.position)
    }

    pub fn status(&self) -> SessionStatus {
        if self.position < self.motions.len() {
            SessionStatus::InProgress
        } else {
            SessionStatus::Complete
        }
    }

    /// Completion progress in `[0, 100]`, counting the motion currently
    /// presented.
    pub fn progress_percent(&self) -> f64 {
        let answered = (self.position + 1).min(self.motions.len());
        (answered as f64) * 100.0 / (self.motions.len() as f64)
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Records the stance of the quiz taker on the current motion and
    /// advances to the next one.
    pub fn record_answer(&mut self, choice: VoteChoice) -> Result<SessionStatus, MatchingErrors> {
        let motion = self
            .motions
            .get(self.position)
            .ok_or(MatchingErrors::SessionComplete)?;
        debug!(
            "record_answer: motion {:?} answered {:?}",
            motion.id, choice
        );
        self.answers.push(Answer {
            motion_id: motion.id.clone(),
            choice,
        });
        self.position += 1;
        Ok(self.status())
    }

    /// Computes the rankings for the answers given so far. The session does
    /// not need to be complete.
    pub fn results(&self) -> Result<MatchingResult, MatchingErrors> {
        run_matching_stats(&self.motions, &self.answers, &self.registry)
    }

    /// Discards all answers and returns to the first motion.
    pub fn restart(&mut self) {
        debug!("restart: discarding {:?} answers", self.answers.len());
        self.position = 0;
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Vec<Motion> {
        let stances = [
            [VoteChoice::For, VoteChoice::Against],
            [VoteChoice::Against, VoteChoice::For],
        ];
        stances
            .iter()
            .enumerate()
            .map(|(idx, row)| Motion {
                id: format!("{}", idx + 1),
                title: format!("Motion {}", idx + 1),
                description: String::new(),
                votes: vec![("X".to_string(), row[0]), ("Y".to_string(), row[1])],
            })
            .collect()
    }

    #[test]
    fn session_walks_the_motions_in_order() {
        let mut session = QuizSession::new(dataset(), None).unwrap();
        assert_eq!(session.num_motions(), 2);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.current_motion().unwrap().id, "1");
        assert_eq!(session.progress_percent(), 50.0);

        let status = session.record_answer(VoteChoice::For).unwrap();
        assert_eq!(status, SessionStatus::InProgress);
        assert_eq!(session.current_motion().unwrap().id, "2");
        assert_eq!(session.progress_percent(), 100.0);

        let status = session.record_answer(VoteChoice::For).unwrap();
        assert_eq!(status, SessionStatus::Complete);
        assert!(session.current_motion().is_none());

        let res = session.results().unwrap();
        assert_eq!(res.rankings.len(), 2);
        assert_eq!(res.rankings[0].percentage, 50.0);
        assert_eq!(res.rankings[1].percentage, 50.0);
    }

    #[test]
    fn answering_past_the_end_is_an_error() {
        let mut session = QuizSession::new(dataset(), None).unwrap();
        session.record_answer(VoteChoice::For).unwrap();
        session.record_answer(VoteChoice::Against).unwrap();
        assert_eq!(
            session.record_answer(VoteChoice::For),
            Err(MatchingErrors::SessionComplete)
        );
    }

    #[test]
    fn partial_sessions_can_be_scored() {
        let mut session = QuizSession::new(dataset(), None).unwrap();
        session.record_answer(VoteChoice::For).unwrap();
        let res = session.results().unwrap();
        assert_eq!(res.rankings[0].party, "X");
        assert_eq!(res.rankings[0].percentage, 100.0);
        assert_eq!(res.num_counted_answers, 1);
    }

    #[test]
    fn restart_resets_position_and_answers() {
        let mut session = QuizSession::new(dataset(), None).unwrap();
        session.record_answer(VoteChoice::For).unwrap();
        session.record_answer(VoteChoice::Neutral).unwrap();
        session.restart();
        assert_eq!(session.position(), 0);
        assert!(session.answers().is_empty());
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert!(session.results().unwrap().rankings.is_empty());
    }

    #[test]
    fn invalid_datasets_are_rejected_at_construction() {
        let mut motions = dataset();
        motions[1].votes.pop();
        assert!(QuizSession::new(motions, None).is_err());
    }
}
