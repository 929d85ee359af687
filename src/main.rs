use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use cvti_scorer::config::loader::{get_global_config_path, load_or_default, save_config_to_file};
use cvti_scorer::log_collector::{get_global_logs_path, init_logging};
use cvti_scorer::models::AnswerInput;
use cvti_scorer::report::{mapping_rows, to_csv, to_markdown};
use cvti_scorer::results::{JsonlResultStore, ResultStats, ResultStore, DEFAULT_STATS_WINDOW};
use cvti_scorer::{
    category_for_code, AnswerImpact, CvtiCode, CvtiScorer, QuestionBank, QuizSession,
    ResultRecord, ScoringConfig,
};

#[derive(Parser)]
#[command(name = "cvti", version, about = "CVTI scam-susceptibility classifier")]
struct Cli {
    /// Directory for log files (default: ./logs)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Log debug detail (per-axis decisions)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a JSON array of answer impacts (null = skipped question)
    Score {
        answers: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Map a code such as TSGJ or OSPJ to its category
    Classify {
        code: String,
        /// Override the apathy-axis count derived from the code
        #[arg(long)]
        apathy_axes: Option<usize>,
    },
    /// Print all 81 codes with their categories
    Table {
        #[arg(long, value_enum, default_value_t = TableFormat::Csv)]
        format: TableFormat,
    },
    /// Take the quiz interactively
    Quiz {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        /// Question bank JSON (default: built-in)
        #[arg(long)]
        questions: Option<PathBuf>,
        /// Append the result to this JSON-lines file
        #[arg(long)]
        store: Option<PathBuf>,
        /// Risk score 0-100 to record with the result
        #[arg(long)]
        risk: Option<f64>,
    },
    /// Aggregate a JSON-lines results file
    Stats {
        results: PathBuf,
        #[arg(long, default_value_t = DEFAULT_STATS_WINDOW)]
        limit: usize,
    },
    /// Write the default scoring configuration
    InitConfig {
        /// Target file (.toml or .json); default ~/.config/cvti/scoring.toml
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TableFormat {
    Csv,
    Md,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let log_dir = match cli.log_dir.clone() {
        Some(dir) => Some(dir),
        None => get_global_logs_path().ok(),
    };
    let collector = log_dir.and_then(|dir| match init_logging(&dir, level) {
        Ok(collector) => Some(collector),
        Err(e) => {
            eprintln!("[Main] WARNING: logging disabled: {}", e);
            None
        }
    });

    let outcome = run(cli.command);

    if let Some(collector) = collector {
        if let Err(e) = collector.wait_for_empty() {
            eprintln!("[Main] WARNING: failed to flush logs: {}", e);
        }
    }
    outcome
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Score { answers, config, seed } => {
            let mut scorer = build_scorer(config.as_deref(), seed)?;
            let answers = read_answers(&answers)?;
            let result = scorer.score(&answers);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Classify { code, apathy_axes } => {
            if apathy_axes.is_none() {
                // strict parse only to warn; mapping itself accepts anything
                if let Err(e) = code.parse::<CvtiCode>() {
                    log::warn!("[Main] '{}' is not a well-formed code: {}", code, e);
                }
            }
            let category = category_for_code(&code, apathy_axes);
            println!("{}\t{}\t{}", code.trim().to_uppercase(), category, category.name());
        }
        Commands::Table { format } => {
            let rows = mapping_rows();
            let out = match format {
                TableFormat::Csv => to_csv(&rows),
                TableFormat::Md => to_markdown(&rows),
            };
            println!("{}", out);
        }
        Commands::Quiz {
            config,
            seed,
            questions,
            store,
            risk,
        } => {
            let mut scorer = build_scorer(config.as_deref(), seed)?;
            let bank = match questions {
                Some(path) => QuestionBank::load_from_file(&path)
                    .with_context(|| format!("loading questions from {}", path.display()))?,
                None => QuestionBank::builtin().context("loading built-in questions")?,
            };
            run_quiz(&bank, &mut scorer, store.as_deref(), risk)?;
        }
        Commands::Stats { results, limit } => {
            let store = JsonlResultStore::new(&results);
            let records = store
                .recent(limit)
                .with_context(|| format!("reading {}", results.display()))?;
            let stats = ResultStats::aggregate(&records);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::InitConfig { path, force } => {
            let path = match path {
                Some(path) => path,
                None => get_global_config_path()?,
            };
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            save_config_to_file(&ScoringConfig::default(), &path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }
    Ok(())
}

fn build_scorer(config: Option<&Path>, seed: Option<u64>) -> anyhow::Result<CvtiScorer> {
    let mut config = load_or_default(config).context("loading scoring configuration")?;
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config.build_scorer()?)
}

fn read_answers(path: &Path) -> anyhow::Result<Vec<Option<AnswerImpact>>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let inputs: Vec<Option<AnswerInput>> = serde_json::from_str(&content)
        .with_context(|| format!("parsing answers in {}", path.display()))?;
    Ok(inputs
        .into_iter()
        .map(|input| input.map(AnswerInput::into_impact))
        .collect())
}

fn run_quiz(
    bank: &QuestionBank,
    scorer: &mut CvtiScorer,
    store: Option<&Path>,
    risk: Option<f64>,
) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();
    let mut session = QuizSession::new(bank);

    while let Some(question) = session.current_question() {
        writeln!(
            stdout,
            "\n[{}/{}] {:.0}%\n{}",
            session.current_index() + 1,
            bank.len(),
            session.progress_percent(),
            question.situation
        )?;
        for (i, choice) in question.choices.iter().enumerate() {
            writeln!(stdout, "  {}. {}", i + 1, choice.text)?;
        }
        write!(stdout, "> ")?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            bail!("input closed before the quiz was finished");
        };
        let line = line?;
        let answer = line.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("s") {
            session.skip()?;
            continue;
        }
        match answer.parse::<usize>() {
            Ok(n) if n >= 1 => {
                if let Err(e) = session.choose(n - 1) {
                    writeln!(stdout, "{}", e.user_message())?;
                }
            }
            _ => writeln!(stdout, "Enter a choice number, or press Enter to skip.")?,
        }
    }

    let result = session.finish(scorer)?;
    writeln!(
        stdout,
        "\nCVTI: {}\nType: {} {} ({})\n{}",
        result.cvti,
        result.scam_type.symbol(),
        result.scam_type,
        result.scam_type.name(),
        result.scam_type.description()
    )?;

    let record = ResultRecord::from_result(&result, risk);
    writeln!(stdout, "Risk: {} · {}%", record.risk_band(), record.risk)?;

    if let Some(path) = store {
        let mut store = JsonlResultStore::new(path);
        store
            .append(&record)
            .with_context(|| format!("saving result to {}", path.display()))?;
        writeln!(stdout, "Saved to {}", path.display())?;
    }
    Ok(())
}
