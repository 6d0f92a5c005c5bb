use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use crossterm::tty::IsTty;
use speakwell::{
    align,
    config::{Config, ConfigStore, FileConfigStore},
    practice::{PracticeEvent, PracticeSession},
    recognizer::LineRecognizer,
    report,
    words::WordList,
};
use std::{
    error::Error,
    io::{self, stdin},
};

/// pronunciation trainer: score what was heard against what should have been said
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "Aligns a recognized speech transcript against a target word character by character and scores how much of the word came through."
)]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// disable colored output
    #[clap(long, global = true)]
    no_color: bool,

    /// print results as JSON
    #[clap(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// score one transcript against one target word
    Align {
        /// the word or phrase that should have been said
        target: String,
        /// what the speech recognizer heard
        recognized: String,
    },
    /// practice a list of words, reading one transcript per line from stdin
    Practice {
        /// number of words to draw from the word list
        #[clap(short = 'w', long)]
        number_of_words: Option<usize>,

        /// bundled word list to draw from
        #[clap(short = 'l', long)]
        word_list: Option<String>,

        /// practice these words instead of drawing from a list (repeatable)
        #[clap(long = "word")]
        words: Vec<String>,

        /// silent attempts allowed per word before it is skipped
        #[clap(long)]
        retries: Option<usize>,

        /// persist the effective settings as the new defaults
        #[clap(long)]
        save_config: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let store = FileConfigStore::new();
    let mut config = store.load();
    log::debug!("loaded config from {}: {config:?}", store.path().display());

    let color = config.color && !cli.no_color && !cli.json && io::stdout().is_tty();

    match cli.command {
        Command::Align { target, recognized } => {
            if target.trim().is_empty() {
                let mut cmd = Cli::command();
                cmd.error(ErrorKind::ValueValidation, "target word must not be empty")
                    .exit();
            }
            let result = align(&target, &recognized);
            if cli.json {
                println!("{}", report::to_json(&result)?);
            } else {
                println!("{}", report::render_result(&result, color));
            }
        }
        Command::Practice {
            number_of_words,
            word_list,
            words,
            retries,
            save_config,
        } => {
            apply_overrides(&mut config, number_of_words, word_list, retries);
            if save_config {
                store.save(&config)?;
            }
            run_practice(&config, words, cli.json, color)?;
        }
    }

    Ok(())
}

fn apply_overrides(
    config: &mut Config,
    number_of_words: Option<usize>,
    word_list: Option<String>,
    retries: Option<usize>,
) {
    if let Some(n) = number_of_words {
        config.number_of_words = n;
    }
    if let Some(list) = word_list {
        config.word_list = list;
    }
    if let Some(r) = retries {
        config.retries_on_no_speech = r;
    }
}

fn run_practice(
    config: &Config,
    words: Vec<String>,
    json: bool,
    color: bool,
) -> Result<(), Box<dyn Error>> {
    let words = if words.is_empty() {
        match WordList::load(&config.word_list) {
            Ok(list) => list.pick(config.number_of_words),
            Err(e) => {
                let mut cmd = Cli::command();
                let available = WordList::available().join(", ");
                cmd.error(
                    ErrorKind::InvalidValue,
                    format!("{e} (available: {available})"),
                )
                .exit();
            }
        }
    } else {
        words
    };

    let mut session = PracticeSession::new(words, config.retries_on_no_speech);
    let mut recognizer = LineRecognizer::new(stdin().lock());

    session.run_with(&mut recognizer, |event| {
        if json {
            return;
        }
        match event {
            PracticeEvent::Prompt { word, index, total } => {
                println!("[{}/{}] Say: {}", index + 1, total, word);
            }
            PracticeEvent::Scored(attempt) => {
                println!("{}\n", report::render_result(&attempt.result, color));
            }
            PracticeEvent::NoSpeech { retries_left, .. } => {
                println!("No speech detected, try again ({retries_left} left).");
            }
            PracticeEvent::Skipped { word } => {
                println!("Skipping {word}.\n");
            }
        }
    })?;

    let summary = session.summary();
    if json {
        let out = serde_json::json!({
            "attempts": session.attempts(),
            "skipped": session.skipped(),
            "summary": summary,
        });
        println!("{}", report::to_json(&out)?);
    } else {
        println!("{}", report::render_summary(&summary));
    }

    Ok(())
}
