mod config;

use std::fmt;

use academy_core::model::games::{Flip, MemoryBoard, NextWord, Resolution, RoundState, WordBuilder};
use academy_core::model::quiz::{Advance, QuizKind, Tick};
use academy_core::model::{Achievement, Theme};
use services::content;
use services::{AppServices, Clock, CountdownTimer, GameServiceError, QuizRun, QuizServiceError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, normalize_sqlite_url};

const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidLimit { raw: String },
    MissingGame,
    InvalidGame { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
            ArgsError::MissingGame => write!(f, "play needs a quiz or game to start"),
            ArgsError::InvalidGame { raw } => write!(f, "unknown quiz or game: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  academy lessons  [--db <sqlite_url>]");
    eprintln!("  academy progress [--db <sqlite_url>]");
    eprintln!("  academy history  [--db <sqlite_url>] [--limit <n>]");
    eprintln!("  academy play <quiz|game> [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Quizzes: lesson:<id>, quick_quiz, taco_trivia, flag_match, exam");
    eprintln!("Games:   memory, words");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {}", AppConfig::DEFAULT_DB_URL);
    eprintln!("  --limit {DEFAULT_HISTORY_LIMIT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ACADEMY_DB_URL, ACADEMY_LOG (falls back to RUST_LOG)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Lessons,
    Progress,
    History,
    Play,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "lessons" => Some(Self::Lessons),
            "progress" => Some(Self::Progress),
            "history" => Some(Self::History),
            "play" => Some(Self::Play),
            _ => None,
        }
    }
}

/// What `play` starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Game {
    Quiz(QuizKind),
    Memory,
    Words,
}

impl Game {
    fn from_arg(arg: &str) -> Result<Self, ArgsError> {
        match arg {
            "memory" => Ok(Self::Memory),
            "words" => Ok(Self::Words),
            other => other
                .parse::<QuizKind>()
                .map(Self::Quiz)
                .map_err(|_| ArgsError::InvalidGame {
                    raw: other.to_owned(),
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    command: Command,
    db_url: String,
    limit: u32,
    game: Option<Game>,
}

impl Args {
    /// `Ok(None)` means help was requested.
    fn parse(argv: Vec<String>, config: &AppConfig) -> Result<Option<Self>, ArgsError> {
        let mut args = argv.into_iter().peekable();
        let command = match args.peek().map(String::as_str) {
            None => Command::Lessons,
            Some("--help" | "-h") => return Ok(None),
            Some(first) if first.starts_with("--") => Command::Lessons,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_owned()))?;
                args.next();
                command
            }
        };

        let mut parsed = Self {
            command,
            db_url: config.db_url.clone(),
            limit: DEFAULT_HISTORY_LIMIT,
            game: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--limit" if command == Command::History => {
                    let value = require_value(&mut args, "--limit")?;
                    parsed.limit = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                }
                "--help" | "-h" => return Ok(None),
                _ if command == Command::Play
                    && parsed.game.is_none()
                    && !arg.starts_with("--") =>
                {
                    parsed.game = Some(Game::from_arg(&arg)?);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if command == Command::Play && parsed.game.is_none() {
            return Err(ArgsError::MissingGame);
        }
        Ok(Some(parsed))
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(AppConfig::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn show_lessons(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let progress = services.progress().load().await?;
    for lesson in content::lessons()? {
        let status = if lesson.is_locked() {
            "locked"
        } else if progress.perfect_lessons().contains(&lesson.id()) {
            "perfect"
        } else if progress.has_completed(lesson.id()) {
            "done"
        } else {
            ""
        };
        println!(
            "{:>2}. {:<10} {:<24} {:<7} {status}",
            lesson.id().value(),
            lesson.category().label(),
            lesson.title(),
            lesson.difficulty().to_string(),
        );
    }
    Ok(())
}

async fn show_progress(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let progress_service = services.progress();
    let progress = progress_service.load().await?;
    let catalog = content::lessons()?;
    let unlocked = progress_service.achievements(&catalog).await?;
    let themes = progress_service.unlocked_themes().await?;
    let selected = progress_service.selected_theme().await?;

    println!("Score:   {}", progress.total_score());
    println!("Level:   {}", progress.level());
    println!("Streak:  {} day(s)", progress.streak_days());
    println!(
        "Lessons: {} completed, {} perfect",
        progress.completed_lessons().len(),
        progress.perfect_lessons().len()
    );
    println!();
    println!("Achievements:");
    for achievement in Achievement::ALL {
        let mark = if unlocked.contains(&achievement) { "x" } else { " " };
        println!(
            "  [{mark}] {} {} - {}",
            achievement.emoji(),
            achievement.title(),
            achievement.description()
        );
    }
    println!();
    println!("Themes:");
    for theme in Theme::ALL {
        let state = if theme == selected {
            "selected".to_owned()
        } else if themes.contains(&theme) {
            "unlocked".to_owned()
        } else {
            format!(
                "level {} and {} coins",
                theme.unlock_level(),
                theme.unlock_coins()
            )
        };
        println!("  {:<16} {state}", theme.id());
    }
    Ok(())
}

async fn show_history(services: &AppServices, limit: u32) -> Result<(), Box<dyn std::error::Error>> {
    let items = services.history().recent(limit).await?;
    if items.is_empty() {
        println!("No quizzes played yet.");
        return Ok(());
    }
    for item in items {
        let verdict = match item.passed {
            Some(true) => " PASS",
            Some(false) => " FAIL",
            None => "",
        };
        let expired = if item.expired { " (time up)" } else { "" };
        println!(
            "{}  {:<12} {:>2}/{:<2} {:>3}%  +{}{verdict}{expired}",
            item.completed_at.format("%Y-%m-%d %H:%M"),
            item.kind.to_string(),
            item.score,
            item.total,
            item.percentage,
            item.points,
        );
    }
    Ok(())
}

fn show_question(run: &QuizRun) {
    let session = run.session();
    let Some(question) = session.current_question() else {
        return;
    };
    println!();
    print!(
        "Question {}/{}",
        session.current_index() + 1,
        session.total_questions()
    );
    if let Some(remaining) = session.remaining() {
        print!("  ({}:{:02} left)", remaining.num_minutes(), remaining.num_seconds() % 60);
    }
    println!();
    println!("{}", question.prompt());
    for (index, option) in question.options().iter().enumerate() {
        let marker = if session.selected_answer() == Some(index) { ">" } else { " " };
        println!(" {marker}{}. {option}", index + 1);
    }
}

enum Input {
    Line(Option<String>),
    Tick(Option<chrono::Duration>),
}

async fn play(services: &AppServices, kind: QuizKind) -> Result<(), Box<dyn std::error::Error>> {
    let quiz = services.quiz_loop();
    let mut run = quiz.start(kind)?;
    let mut timer = run.session().time_limit().map(|_| CountdownTimer::start());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type an option number to answer, n for next, b for back, q to quit.");
    show_question(&run);

    loop {
        let input = match timer.as_mut() {
            Some(timer) => tokio::select! {
                line = lines.next_line() => Input::Line(line?),
                tick = timer.next_tick() => Input::Tick(tick),
            },
            None => Input::Line(lines.next_line().await?),
        };

        match input {
            Input::Tick(None) => timer = None,
            Input::Tick(Some(elapsed)) => match quiz.tick(&mut run, elapsed).await? {
                Tick::Running { remaining } => {
                    let secs = remaining.num_seconds();
                    if secs > 0 && (secs % 60 == 0 || secs == 10) {
                        println!("{}:{:02} left", secs / 60, secs % 60);
                    }
                }
                Tick::Expired(_) => {
                    println!("Time is up!");
                    break;
                }
            },
            Input::Line(None) => return Ok(()),
            Input::Line(Some(line)) => match line.trim() {
                "q" => return Ok(()),
                "b" => match quiz.go_back(&mut run) {
                    Ok(_) => show_question(&run),
                    Err(err) => println!("{err}"),
                },
                "" | "n" => match quiz.advance(&mut run).await {
                    Ok(Advance::Next { .. }) => show_question(&run),
                    Ok(Advance::Completed(_)) => break,
                    Err(QuizServiceError::Quiz(err)) => println!("{err}"),
                    Err(err) => return Err(err.into()),
                },
                other => match other.parse::<usize>() {
                    Ok(choice) if choice >= 1 => match quiz.answer(&mut run, choice - 1) {
                        Ok(()) => reveal(&run),
                        Err(err) => println!("{err}"),
                    },
                    _ => println!("Type an option number, n, b or q."),
                },
            },
        }
    }
    drop(timer);

    if let Some(finish) = run.finish() {
        let outcome = finish.outcome;
        println!();
        println!(
            "Score {}/{} ({}%), +{} points, total {}",
            outcome.score, outcome.total, outcome.percentage, finish.points, finish.total_score
        );
        match outcome.passed {
            Some(true) => println!("Exam passed!"),
            Some(false) => println!(
                "Exam not passed; {}% needed.",
                kind.rules().pass_mark.unwrap_or_default()
            ),
            None => {}
        }
        if let Some(level) = finish.level_up {
            println!("Level up! You reached level {level}.");
        }
        if let Some(lesson) = finish.lesson.filter(|l| l.first_time) {
            println!("Lesson completed: +{} bonus points.", lesson.bonus);
        }
    }
    Ok(())
}

fn reveal(run: &QuizRun) {
    let session = run.session();
    let (Some(question), Some(selected)) = (session.current_question(), session.selected_answer())
    else {
        return;
    };
    if question.is_correct(selected) {
        println!("Correct! {}", question.explanation());
    } else {
        println!(
            "Not quite. The answer is {}. {}",
            question.correct_option(),
            question.explanation()
        );
    }
}

fn render_board(board: &MemoryBoard) -> String {
    board
        .cards()
        .iter()
        .enumerate()
        .map(|(index, card)| {
            if board.is_face_up(index) {
                format!("{}:{}", index + 1, card.face)
            } else {
                format!("{}:??", index + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

async fn play_memory(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let games = services.games();
    let mut game = games.start_memory()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Flip two cards by number to find each emoji and its Spanish word. q quits.");
    println!("{}", render_board(game.board()));

    while !game.board().is_complete() {
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let line = line.trim();
        if line == "q" {
            return Ok(());
        }
        let Ok(choice) = line.parse::<usize>() else {
            println!("Type a card number or q.");
            continue;
        };
        match games.flip(&mut game, choice.saturating_sub(1)) {
            Ok(Flip::FirstUp) => println!("{}", render_board(game.board())),
            Ok(Flip::PairPending) => {
                println!("{}", render_board(game.board()));
                match games.resolve(&mut game).await? {
                    Resolution::Matched { .. } => println!("Match! Score {}", game.board().score()),
                    Resolution::Mismatch => println!("No match."),
                }
            }
            Err(GameServiceError::Game(err)) => println!("{err}"),
            Err(err) => return Err(err.into()),
        }
    }

    let moves = game.board().moves();
    let update = games.bank_memory(&mut game).await?;
    println!();
    println!(
        "Board cleared in {moves} moves: +{} points, total {}",
        update.points,
        update.progress.total_score()
    );
    if let Some(level) = update.level_up {
        println!("Level up! You reached level {level}.");
    }
    Ok(())
}

fn show_word(builder: &WordBuilder) {
    let tiles = builder
        .tiles()
        .iter()
        .enumerate()
        .map(|(index, letter)| {
            if builder.is_tile_used(index) {
                format!("{}:_", index + 1)
            } else {
                format!("{}:{letter}", index + 1)
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!();
    println!(
        "Word {}/{}  hint: {}",
        builder.current_index() + 1,
        builder.total(),
        builder.current().hint
    );
    println!("{tiles}");
}

async fn play_words(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let games = services.games();
    let mut builder = games.start_words()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Tap tiles by number to spell the Spanish word. q quits.");
    show_word(&builder);

    loop {
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let line = line.trim();
        if line == "q" {
            return Ok(());
        }
        let Ok(choice) = line.parse::<usize>() else {
            println!("Type a tile number or q.");
            continue;
        };
        match builder.tap(choice.saturating_sub(1)) {
            Ok(RoundState::Building) => println!("{}", builder.guess()),
            Ok(RoundState::Solved) => {
                println!("{} is right!", builder.guess());
                match games.next_word(&mut builder)? {
                    NextWord::Word { .. } => show_word(&builder),
                    NextWord::Completed { score, total } => {
                        println!();
                        println!("All words built: {score}/{total}");
                        return Ok(());
                    }
                }
            }
            Ok(RoundState::Failed) => {
                println!("{} is not it. Try again.", builder.guess());
                builder.retry()?;
                show_word(&builder);
            }
            Err(err) => println!("{err}"),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = Args::parse(argv, &config).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    init_tracing(&config.log_filter);

    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url, Clock::system()).await?;
    tracing::debug!(db_url = %args.db_url, command = ?args.command, "storage ready");

    match args.command {
        Command::Lessons => show_lessons(&services).await,
        Command::Progress => show_progress(&services).await,
        Command::History => show_history(&services, args.limit).await,
        Command::Play => match args.game {
            Some(Game::Quiz(kind)) => play(&services, kind).await,
            Some(Game::Memory) => play_memory(&services).await,
            Some(Game::Words) => play_words(&services).await,
            None => Err(ArgsError::MissingGame.into()),
        },
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use academy_core::model::LessonId;

    fn parse(args: &[&str]) -> Result<Option<Args>, ArgsError> {
        let argv = args.iter().map(|a| (*a).to_owned()).collect();
        Args::parse(argv, &AppConfig::default())
    }

    #[test]
    fn no_arguments_lists_lessons() {
        let args = parse(&[]).unwrap().unwrap();
        assert_eq!(args.command, Command::Lessons);
        assert_eq!(args.db_url, AppConfig::DEFAULT_DB_URL);
    }

    #[test]
    fn history_accepts_a_limit() {
        let args = parse(&["history", "--limit", "5", "--db", "sqlite://h.db"])
            .unwrap()
            .unwrap();
        assert_eq!(args.command, Command::History);
        assert_eq!(args.limit, 5);
        assert_eq!(args.db_url, "sqlite://h.db");
        assert!(matches!(
            parse(&["history", "--limit", "many"]),
            Err(ArgsError::InvalidLimit { .. })
        ));
    }

    #[test]
    fn play_requires_a_known_quiz() {
        let args = parse(&["play", "lesson:3"]).unwrap().unwrap();
        assert_eq!(args.game, Some(Game::Quiz(QuizKind::Lesson(LessonId::new(3)))));
        assert!(matches!(parse(&["play"]), Err(ArgsError::MissingGame)));
        assert!(matches!(
            parse(&["play", "karaoke"]),
            Err(ArgsError::InvalidGame { .. })
        ));
    }

    #[test]
    fn play_starts_the_mini_games() {
        let args = parse(&["play", "memory", "--db", "sqlite::memory:"])
            .unwrap()
            .unwrap();
        assert_eq!(args.game, Some(Game::Memory));
        let args = parse(&["play", "words"]).unwrap().unwrap();
        assert_eq!(args.game, Some(Game::Words));
        assert!(matches!(
            parse(&["play", "words", "memory"]),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn board_hides_cards_until_flipped() {
        let pairs = vec![
            ("🌮".to_owned(), "Taco".to_owned()),
            ("🌵".to_owned(), "Cactus".to_owned()),
        ];
        let mut board = MemoryBoard::new(&pairs, None).unwrap();
        board.flip(1).unwrap();
        let rendered = render_board(&board);
        assert!(rendered.contains("2:Taco"));
        assert!(!rendered.contains("Cactus"));
        assert!(rendered.contains("1:??"));
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(
            parse(&["dance"]),
            Err(ArgsError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse(&["progress", "--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(
            parse(&["lessons", "--limit", "3"]),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(parse(&["--help"]).unwrap().is_none());
    }
}
