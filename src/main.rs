use clap::Parser;
use log::LevelFilter;
use snafu::ErrorCompat;

mod args;
mod matcher;

use crate::args::Args;
use crate::matcher::AnswerSource;

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let answer_source = if args.interactive {
        AnswerSource::Interactive
    } else if let Some(path) = args.input {
        AnswerSource::JsonFile(path)
    } else if let Some(list) = args.answers {
        AnswerSource::InlineList(list)
    } else {
        eprintln!("No answers provided: use --input, --answers or --interactive.");
        std::process::exit(2);
    };

    let res = matcher::run_quiz(args.config, answer_source, args.reference, args.out);
    if let Err(e) = res {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
