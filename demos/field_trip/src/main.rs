//! Field Trip Example
//!
//! Walks through a hunt session from the terminal. Commands are read from
//! stdin, one per line:
//!
//! ```text
//! login <email> <password>
//! scan <marker tag>        e.g. scan mrkr_basilica-min
//! ok                       dismiss the last scan result
//! play <GAME_ID>           autoplay a minigame, e.g. play GAME_FLAVORS
//! progress | menu | story <n> | museum
//! logout | quit
//! ```
//!
//! Usage: `field_trip [api.ron] [db path]`. Set `HUNT_CONTENT` to a directory
//! of RON files to replace the built-in Taal content, and `RUST_LOG` to
//! control log output.

mod play;

use hunt_core::{GameId, ShuffleRng};
use hunt_db::Store;
use hunt_script::Loader;
use hunt_session::{HuntSession, ScanOutcome};
use hunt_sync::{ApiClient, ApiConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => ApiConfig::from_file(path)?,
        None => ApiConfig::default(),
    };
    let store = match args.next() {
        Some(path) => Store::open(path)?,
        None => Store::in_memory()?,
    };

    let catalog = match std::env::var("HUNT_CONTENT") {
        Ok(dir) => {
            let mut loader = Loader::new();
            loader.load_directory(&dir)?;
            loader.finish()?
        }
        Err(_) => hunt_script::builtin()?,
    };
    info!(
        markers = catalog.markers.len(),
        chapters = catalog.chapters.len(),
        "content loaded"
    );

    println!("=== The Hunt: Taal field trip ===");
    println!("Backend: {}\n", config.base_url);

    let client = ApiClient::new(config)?;
    let mut session = HuntSession::new(catalog, store, client)?;
    if let Some(profile) = session.restore()? {
        println!("Welcome back, {}!", profile.player_name);
    }

    let mut rng = ShuffleRng::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["login", email, password] => match session.login(email, password).await {
                Ok(outcome) => {
                    println!("Logged in as {}", outcome.profile.player_name);
                    if outcome.show_intro {
                        println!("(showing the intro story)");
                        session.mark_intro_seen()?;
                    }
                }
                Err(e) => println!("Login failed: {e}"),
            },
            ["logout"] => {
                session.logout()?;
                println!("Logged out");
            }
            ["scan", tag] => match session.scan(tag).await? {
                ScanOutcome::Busy => println!("Scanner is paused, type 'ok' first"),
                ScanOutcome::Blocked { reason, .. } => println!("{reason}"),
                ScanOutcome::Discovered { item, unlocked } => {
                    println!("Discovery! {item}");
                    if let Some(game) = unlocked.minigame {
                        println!("Minigame unlocked: {}", game.title());
                    }
                }
            },
            ["ok"] => session.resume_scanning(),
            ["play", game] => {
                let game: GameId = match game.parse() {
                    Ok(game) => game,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                if !session.is_game_unlocked(game)? {
                    println!("{} is still locked", game.title());
                    continue;
                }
                let result = play::autoplay(game, session.catalog(), &mut rng)?;
                println!("{}: score {} ({})", game.title(), result.score, if result.won { "won" } else { "lost" });
                for item in session.finish_minigame(result).await? {
                    println!("Reward unlocked: {item}");
                }
            }
            ["progress"] => match session.refresh_progress().await? {
                Some(report) => {
                    for area in report {
                        println!("{:<18} {}/{} ({}%)", area.name, area.unlocked, area.total, area.rounded_percent());
                    }
                }
                None => println!("Log in to see progress"),
            },
            ["menu"] => {
                for (game, open) in session.game_menu()? {
                    println!("{:<24} {}", game.title(), if open { "open" } else { "locked" });
                }
            }
            ["story", n] => {
                let Ok(index) = n.parse::<usize>() else {
                    println!("story takes a chapter number");
                    continue;
                };
                if let Some(chapter) = session.gate().chapters().get(index) {
                    println!("{} ({})", chapter.title, chapter.location);
                }
                for (fragment, readable) in session.story(index) {
                    if readable {
                        println!("  {}", fragment.text);
                    } else {
                        println!("  ???");
                    }
                }
            }
            ["museum"] => {
                for item in session.museum_items() {
                    println!("  {item}");
                }
            }
            _ => println!("Unknown command: {line}"),
        }
    }

    session.settle().await;
    Ok(())
}
