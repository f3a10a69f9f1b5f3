use clap::Parser;

/// This is a party matching quiz tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the quiz description in JSON format: the
    /// parties, the motions and the recorded votes of every party on every motion.
    #[clap(short, long, value_parser)]
    pub config: String,

    /// (file path) A file containing the answers of the quiz taker in JSON format.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (list of comma-separated values) The answers of the quiz taker, one per motion
    /// in dataset order: 'voor', 'tegen', 'neutraal' or '-' to skip a motion.
    /// English labels 'for', 'against' and 'neutral' are also accepted.
    #[clap(short, long, value_parser)]
    pub answers: Option<String>,

    /// If passed as an argument, the motions are presented one by one on the standard
    /// output and the answers are read from the standard input.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    /// (file path) A reference file containing the expected summary of a quiz in JSON
    /// format. If provided, motiematcher will check that the tabulated output matches
    /// the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the quiz will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
