use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use bingo_caller::logging;
use bingo_caller::narration::LogSink;
use bingo_caller::service;
use bingo_caller::{
    CardCatalog, CardId, CheckOutcome, EvaluationMode, GameController, GameEvent, Narrator, Notice,
    RoundConfig, RoundSnapshot, Session, SessionHandle, TokioScheduler, UNIVERSE_SIZE,
};

#[derive(Debug, Parser)]
#[command(name = "bingo-caller")]
#[command(about = "Call a bingo round from the terminal")]
struct Cli {
    /// Round configuration (TOML)
    #[arg(long, default_value = "round.toml")]
    config: PathBuf,

    /// Card catalog (JSON)
    #[arg(long, default_value = "cards.json")]
    catalog: PathBuf,

    /// Seed the draw order for a reproducible round
    #[arg(long)]
    seed: Option<u64>,

    /// Override the evaluation mode (auto or manual)
    #[arg(long)]
    mode: Option<EvaluationMode>,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

/// A line typed by the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OperatorCommand {
    Start,
    Pause,
    Restart,
    Mode(EvaluationMode),
    Check(CardId),
    Retry,
    Status,
    Board,
    Fullscreen,
    Help,
    Quit,
}

impl FromStr for OperatorCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();

        let parsed = match (command.as_str(), argument) {
            ("start" | "resume", None) => Self::Start,
            ("pause", None) => Self::Pause,
            ("restart", None) => Self::Restart,
            ("mode", Some(mode)) => Self::Mode(mode.parse()?),
            ("check", Some(id)) => {
                let id: u32 = id.parse().with_context(|| format!("not a card id: {id}"))?;
                Self::Check(CardId::new(id))
            }
            ("retry", None) => Self::Retry,
            ("status", None) => Self::Status,
            ("board", None) => Self::Board,
            ("fullscreen", None) => Self::Fullscreen,
            ("help" | "?", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            _ => bail!("unknown command: {line}"),
        };
        Ok(parsed)
    }
}

const HELP: &str = "commands: start | pause | restart | mode auto|manual | check <id> | retry | status | board | fullscreen | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose).context("installing logger")?;

    let catalog = CardCatalog::from_path(&cli.catalog)
        .with_context(|| format!("loading card catalog {}", cli.catalog.display()))?;
    let mut config = RoundConfig::from_path(&cli.config)
        .with_context(|| format!("loading round config {}", cli.config.display()))?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode);
    }

    let claims = service::from_config(config.claims.as_ref())?;
    let narrator = Narrator::new(LogSink, config.narration_language);
    let controller = GameController::new(config, &catalog)?;
    let state = controller.new_state();

    tracing::info!(
        round = %controller.config().round_id,
        cards = controller.selected_cards().len(),
        pattern = %controller.config().winning_pattern.name(),
        "round loaded"
    );

    let (session, handle, mut notices) =
        Session::new(controller, state, TokioScheduler, claims, narrator);
    let task = session.spawn();

    let printer = tokio::spawn(async move {
        while let Some(notice) = notices.recv().await {
            print_notice(&notice);
        }
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<OperatorCommand>() {
            Ok(OperatorCommand::Quit) => break,
            Ok(command) => {
                if let Err(err) = run_command(&handle, command).await {
                    println!("error: {err}");
                }
            }
            Err(err) => println!("{err}\n{HELP}"),
        }
    }

    handle.shutdown()?;
    task.await?;
    drop(handle);
    printer.abort();
    Ok(())
}

async fn run_command(handle: &SessionHandle, command: OperatorCommand) -> bingo_caller::Result<()> {
    match command {
        OperatorCommand::Start => handle.start()?,
        OperatorCommand::Pause => handle.pause()?,
        OperatorCommand::Restart => handle.restart()?,
        OperatorCommand::Mode(mode) => handle.set_mode(mode)?,
        OperatorCommand::Check(card_id) => match handle.check(card_id).await? {
            CheckOutcome::Ignored => println!("round already has a winner"),
            // Won and Failed are reported through notices
            CheckOutcome::Won { .. } | CheckOutcome::Failed { .. } => {}
        },
        OperatorCommand::Retry => {
            if !handle.retry_claim().await? {
                println!("no failed claim to retry");
            }
        }
        OperatorCommand::Status => print_status(&handle.snapshot().await?),
        OperatorCommand::Board => print_board(&handle.snapshot().await?),
        OperatorCommand::Fullscreen => tracing::info!("fullscreen toggled"),
        OperatorCommand::Help => println!("{HELP}"),
        OperatorCommand::Quit => {}
    }
    Ok(())
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Event(GameEvent::NumberCalled { number, call_count }) => {
            println!("{}  ({call_count}/{UNIVERSE_SIZE})", number.label());
        }
        Notice::Event(GameEvent::WinnerDeclared {
            card_id, evaluation, ..
        }) => {
            println!("BINGO! {card_id} wins ({} lines)", evaluation.lines_completed);
        }
        Notice::Event(GameEvent::ManualCheckFailed {
            card_id, evaluation, ..
        }) => {
            println!("{card_id} is not a winner ({} lines)", evaluation.lines_completed);
        }
        Notice::Event(GameEvent::PoolExhausted) => {
            println!("all {UNIVERSE_SIZE} numbers called, no winner");
        }
        Notice::Event(GameEvent::StatusChanged { to, .. }) => println!("status: {to}"),
        Notice::Event(GameEvent::ModeChanged { mode }) => println!("mode: {mode}"),
        Notice::Event(GameEvent::RoundReset { .. }) => println!("round reset"),
        Notice::ClaimAccepted { card_id, .. } => println!("claim accepted for {card_id}"),
        Notice::ClaimFailed { card_id, message } => {
            println!("claim failed for {card_id}: {message} (type 'retry')");
        }
    }
}

fn print_status(snapshot: &RoundSnapshot) {
    let recent: Vec<String> = snapshot.recent.iter().map(|n| n.label()).collect();
    println!(
        "round {} | {} | mode {} | {} | prize {:.2}",
        snapshot.round_id,
        snapshot.status,
        snapshot.mode,
        snapshot.pattern.name(),
        snapshot.prize
    );
    println!(
        "called {}/{UNIVERSE_SIZE} | recent: {}",
        snapshot.called.len(),
        if recent.is_empty() { "-".to_string() } else { recent.join(" ") }
    );
    if let Some(check) = snapshot.last_check {
        println!("last check: {} {:?}", check.card_id, check.outcome);
    }
}

fn print_board(snapshot: &RoundSnapshot) {
    for row in snapshot.called.board() {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|(number, called)| {
                if *called {
                    format!("[{:>2}]", number.value())
                } else {
                    format!(" {:>2} ", number.value())
                }
            })
            .collect();
        println!("{} {}", row.category, cells.join(""));
    }
}
