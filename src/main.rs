//! Gobang: GUI, one-shot suggestions and self-play

use std::error::Error as StdError;
use std::fs;

use clap::{value_parser, Arg, ArgMatches, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gobang::selfplay::{self, SelfPlayConfig};
use gobang::ui::{GameState, GobangApp};
use gobang::{AdvisorConfig, Board, GameMode, MoveAdvisor, Stone};

type CliResult = std::result::Result<(), Box<dyn StdError>>;

fn load_config(matches: &ArgMatches) -> gobang::Result<AdvisorConfig> {
    match matches.get_one::<String>("config") {
        Some(path) => {
            info!(%path, "loading advisor config");
            AdvisorConfig::load(path)
        }
        None => Ok(AdvisorConfig::default()),
    }
}

fn parse_side(s: &str) -> std::result::Result<Stone, String> {
    match s.to_lowercase().as_str() {
        "black" | "b" | "x" => Ok(Stone::Black),
        "white" | "w" | "o" => Ok(Stone::White),
        _ => Err(format!("unknown side '{s}', expected black or white")),
    }
}

fn play(matches: &ArgMatches) -> CliResult {
    let config = load_config(matches)?;
    let seed = matches.get_one::<u64>("seed").copied();
    let state = GameState::new(GameMode::default(), config, seed);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gobang"),
        ..Default::default()
    };

    eframe::run_native(
        "Gobang",
        options,
        Box::new(|cc| Ok(Box::new(GobangApp::new(cc, state)))),
    )?;
    Ok(())
}

fn suggest(matches: &ArgMatches) -> CliResult {
    let config = load_config(matches)?;
    let path = matches
        .get_one::<String>("board")
        .ok_or("missing --board")?;
    let side = matches
        .get_one::<Stone>("side")
        .copied()
        .unwrap_or(Stone::Black);

    let board: Board = fs::read_to_string(path)?.parse()?;
    let mut advisor = MoveAdvisor::with_config(config);
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        advisor = advisor.with_seed(seed);
    }

    let advice = advisor.advise(&board, side);
    print!("{board}");
    match advice.best_move {
        Some(pos) => println!(
            "{} to play {} ({:?}, score {:.1}, {}us)",
            side.name(),
            pos,
            advice.kind,
            advice.score,
            advice.time_us
        ),
        None => println!("board is full, no move for {}", side.name()),
    }
    Ok(())
}

fn self_play(matches: &ArgMatches) -> CliResult {
    let (weights, tuning) = load_config(matches)?.into_parts();
    let games = matches.get_one::<u32>("games").copied().unwrap_or(10);
    let config = SelfPlayConfig {
        weights,
        tuning,
        seed: matches.get_one::<u64>("seed").copied(),
    };

    let summary = selfplay::run(&config, games);
    println!("games:       {}", summary.games);
    println!("black wins:  {}", summary.black_wins);
    println!("white wins:  {}", summary.white_wins);
    println!("draws:       {}", summary.draws);
    println!("avg length:  {:.1}", summary.average_length());
    Ok(())
}

fn main() -> CliResult {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arg_config = Arg::new("config")
        .long("config")
        .short('c')
        .help("JSON file with weights and tuning");
    let arg_seed = Arg::new("seed")
        .long("seed")
        .short('s')
        .value_parser(value_parser!(u64))
        .help("Seed for reproducible openings and tie-breaks");

    let matches = Command::new("gobang")
        .about("Gomoku move advisor")
        .arg(arg_config.clone())
        .arg(arg_seed.clone())
        .subcommand(
            Command::new("play")
                .about("Play in the GUI (default)")
                .arg(arg_config.clone())
                .arg(arg_seed.clone()),
        )
        .subcommand(
            Command::new("suggest")
                .about("Print the advised move for a text board")
                .arg(Arg::new("board").long("board").short('b').required(true))
                .arg(
                    Arg::new("side")
                        .long("side")
                        .default_value("black")
                        .value_parser(parse_side),
                )
                .arg(arg_config.clone())
                .arg(arg_seed.clone()),
        )
        .subcommand(
            Command::new("selfplay")
                .about("Advisor against itself")
                .arg(
                    Arg::new("games")
                        .long("games")
                        .short('n')
                        .default_value("10")
                        .value_parser(value_parser!(u32)),
                )
                .arg(arg_config.clone())
                .arg(arg_seed.clone()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("suggest", sub)) => suggest(sub),
        Some(("selfplay", sub)) => self_play(sub),
        Some(("play", sub)) => play(sub),
        _ => play(&matches),
    }
}
