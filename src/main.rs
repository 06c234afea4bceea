//! Line-oriented driver for the engine: a stand-in for the UI shell that
//! owns one game session and exercises the public API over stdin/stdout.

use std::io::{self, BufRead};

use anyhow::Context;
use tabia::chess::core::Move;
use tabia::chess::game::{Game, StartingSide};
use tabia::interface;
use tabia::Error;

fn starting_side(token: Option<&str>) -> Result<StartingSide, Error> {
    match token {
        None => Ok(StartingSide::default()),
        Some("random") => Ok(StartingSide::Random),
        Some(player) => Ok(StartingSide::Fixed(player.try_into()?)),
    }
}

fn run_command(game: &mut Game, line: &str) -> anyhow::Result<()> {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Ok(());
    };
    match command {
        "new" => {
            game.reset(starting_side(tokens.next())?);
            println!("{} to move", game.side_to_move());
        },
        "board" => println!("{}", game.board()),
        "code" => println!("{}", game.code()),
        "turn" => println!("{}", game.side_to_move()),
        "move" => {
            let Some(literal) = tokens.next() else {
                println!("usage: move <from><to>, e.g. move e2e4");
                return Ok(());
            };
            let Move { from, to } = literal.try_into()?;
            match game.try_move(from, to)? {
                Some(captured) => println!("captured {captured}"),
                None => println!("ok"),
            }
        },
        "legal" => {
            let Some(literal) = tokens.next() else {
                println!("usage: legal <square>, e.g. legal e2");
                return Ok(());
            };
            let destinations = game.legal_destinations(literal.try_into()?);
            let listing: Vec<String> = destinations
                .iter()
                .map(std::string::ToString::to_string)
                .collect();
            println!("{}", listing.join(" "));
        },
        "eval" => {
            let code = match tokens.next() {
                Some(field) => interface::parse_board_code(field)?,
                None => game.code(),
            };
            let response = interface::score_response(code)?;
            println!("{}", serde_json::to_string(&response)?);
        },
        "decode" => {
            let Some(field) = tokens.next() else {
                println!("usage: decode <decimal board code>");
                return Ok(());
            };
            let view = interface::board_view(interface::parse_board_code(field)?)?;
            println!("{}", serde_json::to_string(&view)?);
        },
        _ => println!("unknown command: {command}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut game = Game::default();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading command input")?;
        if line.trim() == "quit" {
            break;
        }
        if let Err(e) = run_command(&mut game, &line) {
            println!("rejected: {e}");
        }
    }
    Ok(())
}
