use log::{debug, info, warn};

use party_matching::session::{QuizSession, SessionStatus};
use party_matching::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::Write as IoWrite;
use std::io::{self, BufRead};

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::matcher::answers_reader::*;
use crate::matcher::config_reader::*;

#[derive(Debug, Snafu)]
pub enum MatcherError {
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Motion ids must be numbers or strings"))]
    ParsingJsonId {},
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ReadingStdin { source: std::io::Error },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

type MatcherResult<T> = Result<T, MatcherError>;

/// Where the answers of the quiz taker come from.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnswerSource {
    /// A JSON answers file.
    JsonFile(String),
    /// A comma-separated list, one entry per motion in dataset order.
    InlineList(String),
    /// The motions are presented on stdout and answered on stdin.
    Interactive,
}

pub mod config_reader {
    use crate::matcher::*;
    use std::collections::HashMap;

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputSettings {
        #[serde(rename = "quizName")]
        pub quiz_name: String,
        #[serde(rename = "quizDate")]
        pub quiz_date: Option<String>,
        #[serde(rename = "quizSite")]
        pub quiz_site: Option<String>,
    }

    // The "config" block of the output summary.
    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct OutputConfig {
        pub quiz: String,
        pub date: Option<String>,
        pub site: Option<String>,
        #[serde(rename = "countedAnswers")]
        pub counted_answers: String,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct QuizParty {
        pub name: String,
        pub code: Option<String>,
        pub excluded: Option<bool>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct QuizMotion {
        // The original dataset uses integer ids, its successor uses GUID
        // strings. Both are accepted and normalized to strings.
        id: JSValue,
        pub title: String,
        pub description: Option<String>,
        pub votes: HashMap<String, String>,
    }

    impl QuizMotion {
        pub fn motion_id(&self) -> MatcherResult<String> {
            read_js_id(&self.id)
        }
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct QuizConfig {
        #[serde(rename = "outputSettings")]
        pub output_settings: OutputSettings,
        pub parties: Vec<QuizParty>,
        pub motions: Vec<QuizMotion>,
    }

    pub fn read_quiz_config(path: String) -> MatcherResult<QuizConfig> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
        let config: QuizConfig =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        debug!("read_quiz_config: {:?}", config);
        Ok(config)
    }

    pub fn read_summary(path: String) -> MatcherResult<JSValue> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
        let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        Ok(js)
    }

    fn read_js_id(x: &JSValue) -> MatcherResult<String> {
        match x {
            JSValue::Number(n) => Ok(n.to_string()),
            JSValue::String(s) => Ok(s.clone()),
            _ => None.context(ParsingJsonIdSnafu {}),
        }
    }
}

/// Maps a stance label to a [VoteChoice]. Both the Dutch labels of the
/// original dataset and their English equivalents are accepted.
fn parse_choice(s: &str) -> MatcherResult<VoteChoice> {
    match s.trim().to_lowercase().as_str() {
        "voor" | "for" => Ok(VoteChoice::For),
        "tegen" | "against" => Ok(VoteChoice::Against),
        "neutraal" | "neutral" => Ok(VoteChoice::Neutral),
        x => {
            whatever!("Unknown stance {:?}: expected voor, tegen or neutraal", x)
        }
    }
}

/// Turns the parsed configuration into the engine's data contracts.
pub fn validate_config(config: &QuizConfig) -> MatcherResult<(Vec<Motion>, Vec<Party>)> {
    let parties: Vec<Party> = config
        .parties
        .iter()
        .map(|p| Party {
            name: p.name.clone(),
            code: match p.code.clone() {
                Some(x) if x.is_empty() => None,
                x => x,
            },
            excluded: p.excluded.unwrap_or(false),
        })
        .collect();

    let mut motions: Vec<Motion> = Vec::new();
    for qm in config.motions.iter() {
        let mut votes: Vec<(String, VoteChoice)> = Vec::new();
        for (party, stance) in qm.votes.iter() {
            votes.push((party.clone(), parse_choice(stance)?));
        }
        motions.push(Motion {
            id: qm.motion_id()?,
            title: qm.title.clone(),
            description: qm.description.clone().unwrap_or_default(),
            votes,
        });
    }
    Ok((motions, parties))
}

pub mod answers_reader {
    use crate::matcher::*;

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct AnswerEntry {
        #[serde(rename = "motionId")]
        motion_id: JSValue,
        pub vote: String,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct AnswersFile {
        pub answers: Vec<AnswerEntry>,
    }

    pub fn read_answers_file(path: String) -> MatcherResult<Vec<Answer>> {
        let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
        let parsed: AnswersFile =
            serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
        let mut res: Vec<Answer> = Vec::new();
        for entry in parsed.answers.iter() {
            let motion_id = match &entry.motion_id {
                JSValue::Number(n) => n.to_string(),
                JSValue::String(s) => s.clone(),
                _ => None.context(ParsingJsonIdSnafu {})?,
            };
            res.push(Answer {
                motion_id,
                choice: parse_choice(entry.vote.as_str())?,
            });
        }
        Ok(res)
    }

    /// Parses a comma-separated answer list, positional by motion order.
    /// A `-` or empty entry skips the motion (no answer recorded).
    pub fn parse_inline_answers(list: &str, motions: &[Motion]) -> MatcherResult<Vec<Answer>> {
        let entries: Vec<&str> = list.split(',').collect();
        if entries.len() > motions.len() {
            whatever!(
                "Got {} answers for {} motions",
                entries.len(),
                motions.len()
            );
        }
        let mut res: Vec<Answer> = Vec::new();
        for (entry, motion) in entries.iter().zip(motions.iter()) {
            let trimmed = entry.trim();
            if trimmed.is_empty() || trimmed == "-" {
                continue;
            }
            res.push(Answer {
                motion_id: motion.id.clone(),
                choice: parse_choice(trimmed)?,
            });
        }
        Ok(res)
    }
}

// Presents the motions on stdout and reads the answers from stdin.
// An empty line or 'q' ends the session early; the partial answers are
// still scored.
fn run_interactive_session(
    motions: Vec<Motion>,
    registry: Vec<Party>,
) -> MatcherResult<Vec<Answer>> {
    let mut session = match QuizSession::new(motions, Some(registry)) {
        Result::Ok(s) => s,
        Result::Err(e) => {
            whatever!("Invalid quiz dataset: {}", e)
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let (title, description) = match session.current_motion() {
            Some(motion) => (motion.title.clone(), motion.description.clone()),
            None => break,
        };
        println!(
            "[{}/{}] {}",
            session.position() + 1,
            session.num_motions(),
            title
        );
        if !description.is_empty() {
            println!("{}", description);
        }
        print!("voor/tegen/neutraal> ");
        io::stdout().flush().context(ReadingStdinSnafu {})?;

        let line = match lines.next() {
            Some(l) => l.context(ReadingStdinSnafu {})?,
            None => break,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "q" || trimmed == "quit" {
            info!("run_interactive_session: stopping early");
            break;
        }
        let choice = parse_choice(trimmed)?;
        if session.record_answer(choice) == Result::Ok(SessionStatus::Complete) {
            break;
        }
    }
    Ok(session.answers().to_vec())
}

fn result_stats_to_json(rs: &MatchingResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for (idx, r) in rs.rankings.iter().enumerate() {
        l.push(json!({
            "rank": idx + 1,
            "party": r.party,
            "percentage": format!("{:.2}", r.percentage),
            "countedAnswers": r.counted_answers.to_string(),
        }));
    }
    l
}

/// The share line for the best match, as the original quiz formats it.
fn share_text(settings: &OutputSettings, rs: &MatchingResult) -> Option<String> {
    let top = rs.top_match()?;
    let base = format!(
        "Ik match {}% met {} op de {}!",
        top.percentage.round() as i64,
        top.party,
        settings.quiz_name
    );
    match settings.quiz_site.as_deref() {
        Some(site) => Some(format!("{} Probeer het zelf op {}", base, site)),
        None => Some(base),
    }
}

fn build_summary_js(config: &QuizConfig, rs: &MatchingResult) -> JSValue {
    let c = OutputConfig {
        quiz: config.output_settings.quiz_name.clone(),
        date: config.output_settings.quiz_date.clone(),
        site: config.output_settings.quiz_site.clone(),
        counted_answers: rs.num_counted_answers.to_string(),
    };
    json!({
        "config": c,
        "results": result_stats_to_json(rs),
        "shareText": share_text(&config.output_settings, rs),
    })
}

pub fn run_quiz(
    config_path: String,
    answer_source: AnswerSource,
    check_summary_path: Option<String>,
    out_path: Option<String>,
) -> MatcherResult<()> {
    let config = read_quiz_config(config_path)?;
    let (motions, parties) = validate_config(&config)?;

    if let Result::Err(e) = validate_dataset(&motions, &Some(parties.clone())) {
        whatever!("Invalid quiz dataset: {}", e)
    }

    let answers: Vec<Answer> = match answer_source {
        AnswerSource::JsonFile(path) => read_answers_file(path)?,
        AnswerSource::InlineList(list) => parse_inline_answers(list.as_str(), &motions)?,
        AnswerSource::Interactive => run_interactive_session(motions.clone(), parties.clone())?,
    };
    info!("run_quiz: {:?} answers collected", answers.len());

    let res = run_matching_stats(&motions, &answers, &Some(parties));
    let result = match res {
        Result::Ok(x) => x,
        Result::Err(x) => {
            whatever!("Matching error: {}", x)
        }
    };

    if result.rankings.is_empty() {
        println!("Not enough non-neutral answers to compute a match.");
    }

    let result_js = build_summary_js(&config, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    match out_path {
        Some(path) if path != "stdout" => {
            fs::write(path.clone(), &pretty_js_stats).context(WritingSummarySnafu { path })?;
        }
        _ => {
            println!("{}", pretty_js_stats);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = check_summary_path {
        let summary_ref = read_summary(summary_p)?;
        debug!("run_quiz: reference summary {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::answers_reader::parse_inline_answers;
    use super::config_reader::read_quiz_config;
    use super::{run_quiz, validate_config, AnswerSource};
    use party_matching::run_matching_stats;

    fn test_dir() -> String {
        option_env!("MM_TEST_DIR")
            .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/test_data"))
            .to_string()
    }

    fn run_quiz_test(test_name: &str, answers_lpath: &str, summary_lpath: &str) {
        let test_dir = test_dir();
        let res = run_quiz(
            format!("{}/{}/{}_config.json", test_dir, test_name, test_name),
            AnswerSource::JsonFile(format!("{}/{}/{}", test_dir, test_name, answers_lpath)),
            Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
            None,
        );
        assert!(res.is_ok(), "{:?}", res.err());
    }

    #[test]
    fn simple_quiz() {
        run_quiz_test(
            "simple_quiz",
            "answers_voor.json",
            "expected_summary_voor.json",
        );
    }

    #[test]
    fn simple_quiz_all_neutral() {
        run_quiz_test(
            "simple_quiz",
            "answers_neutraal.json",
            "expected_summary_neutraal.json",
        );
    }

    #[test]
    fn simple_quiz_inline_answers() {
        let test_dir = test_dir();
        let res = run_quiz(
            format!("{}/simple_quiz/simple_quiz_config.json", test_dir),
            AnswerSource::InlineList("voor,voor".to_string()),
            Some(format!(
                "{}/simple_quiz/expected_summary_voor.json",
                test_dir
            )),
            None,
        );
        assert!(res.is_ok(), "{:?}", res.err());
    }

    #[test]
    fn motiematcher_dataset() {
        let test_dir = test_dir();
        let config = read_quiz_config(format!(
            "{}/motiematcher/motiematcher_config.json",
            test_dir
        ))
        .unwrap();
        let (motions, parties) = validate_config(&config).unwrap();
        assert_eq!(motions.len(), 10);
        assert_eq!(parties.len(), 15);

        let answers =
            parse_inline_answers("voor,tegen,-,neutraal,voor,tegen,voor,-,voor,tegen", &motions)
                .unwrap();
        let res = run_matching_stats(&motions, &answers, &Some(parties)).unwrap();
        assert_eq!(res.num_counted_answers, 7);
        assert_eq!(res.rankings.len(), 15);
        for r in res.rankings.iter() {
            assert!((0.0..=100.0).contains(&r.percentage), "{:?}", r);
            assert_eq!(r.counted_answers, 7);
        }
        for w in res.rankings.windows(2) {
            assert!(w[0].percentage >= w[1].percentage);
        }
    }

    #[test]
    fn motiematcher_numeric_ids_end_to_end() {
        let test_dir = test_dir();
        let res = run_quiz(
            format!("{}/motiematcher/motiematcher_config.json", test_dir),
            AnswerSource::JsonFile(format!("{}/motiematcher/answers_example.json", test_dir)),
            None,
            None,
        );
        assert!(res.is_ok(), "{:?}", res.err());
    }

    #[test]
    fn dangling_answer_id_fails() {
        let test_dir = test_dir();
        let res = run_quiz(
            format!("{}/simple_quiz/simple_quiz_config.json", test_dir),
            AnswerSource::JsonFile(format!("{}/simple_quiz/answers_dangling.json", test_dir)),
            None,
            None,
        );
        assert!(res.is_err());
    }
}
