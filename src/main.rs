//! Headless autoplay driver.
//!
//! Plays a session at the fixed tick rate: clicks the enemy at a steady
//! cadence, buys the cheapest affordable perk whenever it can, autosaves,
//! and saves once more on exit.
//!
//! Usage:
//!   enemy-clicker [OPTIONS]
//!
//! Examples:
//!   enemy-clicker                         # Continue the saved game for 60s
//!   enemy-clicker --new --seed 42         # Reproducible fresh run
//!   enemy-clicker --seconds 600 --cps 12  # Longer, faster run

use enemy_clicker::assets::GeneratedAssets;
use enemy_clicker::character::PurchaseOutcome;
use enemy_clicker::config::{GameConfig, LogConfig};
use enemy_clicker::core::{ClickOutcome, FrameLimiter, GameSession, InputEvent};
use enemy_clicker::logging;
use enemy_clicker::save::{SaveError, SaveManager};
use log::{error, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::io;
use std::path::PathBuf;

struct RunOptions {
    seed: Option<u64>,
    seconds: u64,
    clicks_per_second: u32,
    save_path: Option<PathBuf>,
    new_game: bool,
    shop: bool,
    realtime: bool,
    log_file: Option<PathBuf>,
    verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seed: None,
            seconds: 60,
            clicks_per_second: 8,
            save_path: None,
            new_game: false,
            shop: true,
            realtime: false,
            log_file: None,
            verbose: false,
        }
    }
}

#[derive(Default)]
struct RunStats {
    clicks: u64,
    crits: u64,
    kills: u64,
    loot_earned: u64,
    purchases: u64,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    let config = GameConfig {
        save_path: options.save_path.clone(),
        log: LogConfig {
            level: if options.verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            file: options.log_file.clone(),
        },
        ..GameConfig::default()
    };
    logging::init(&config.log)?;

    let saves = match &config.save_path {
        Some(path) => SaveManager::at(path.clone()),
        None => SaveManager::new()?,
    };
    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let ticks_per_second = config.ticks_per_second;
    let mut session = GameSession::new(config, Box::new(GeneratedAssets::default()), rng);

    if !options.new_game && saves.save_exists() {
        match session.load_from(&saves) {
            Ok(()) | Err(SaveError::MissingSaveFile) => {}
            Err(_) => warn!("starting a new game instead"),
        }
    }

    let stats = play(&mut session, &saves, &options, ticks_per_second);
    print_summary(&session, &stats, &saves);
    Ok(())
}

fn play(
    session: &mut GameSession,
    saves: &SaveManager,
    options: &RunOptions,
    ticks_per_second: u32,
) -> RunStats {
    let mut stats = RunStats::default();
    let total_ticks = options.seconds * ticks_per_second as u64;
    let click_interval = (ticks_per_second / options.clicks_per_second.max(1)).max(1) as u64;
    let mut limiter = options
        .realtime
        .then(|| FrameLimiter::new(ticks_per_second));

    for tick in 0..total_ticks {
        if options.shop {
            if let Some(stat) = session.perks().cheapest_affordable(session.player()) {
                let point = session.buy_button_center(stat);
                if let ClickOutcome::Shop(PurchaseOutcome::Purchased { .. }) =
                    session.on_click(point)
                {
                    stats.purchases += 1;
                }
            }
        }

        if tick % click_interval == 0 {
            let point = session.enemy().rect().center();
            if let ClickOutcome::Attack(result) = session.on_click(point) {
                stats.clicks += 1;
                if result.attack.is_crit {
                    stats.crits += 1;
                }
                stats.loot_earned += result.loot_gained;
            }
        }

        let result = session.on_tick();
        if result.enemy_died {
            stats.kills += 1;
        }
        if result.autosave_due {
            if let Err(e) = session.save_to(saves) {
                error!("autosave failed: {}", e);
            }
        }

        if let Some(limiter) = limiter.as_mut() {
            limiter.wait();
        }
    }

    session.handle_input(InputEvent::Quit, saves);
    stats
}

fn print_summary(session: &GameSession, stats: &RunStats, saves: &SaveManager) {
    let snapshot = session.snapshot();

    println!("Run summary");
    println!("  Hits:           {} ({} critical)", stats.clicks, stats.crits);
    println!("  Enemies killed: {}", stats.kills);
    println!("  Loot earned:    {}", stats.loot_earned);
    println!("  Perks bought:   {}", stats.purchases);
    println!();
    println!("Player");
    println!("  Loot:           {}", snapshot.player.loot);
    println!("  Damage:         {}", snapshot.player.base_damage);
    println!("  Crit rate:      {}%", snapshot.player.critical_rate);
    println!("  Crit damage:    +{}%", snapshot.player.critical_damage);
    println!("  Loot bonus:     +{}%", snapshot.player.loot_bonus);
    println!();
    println!("Enemy");
    println!("  Defeated so far: {}", snapshot.enemy.enemy_count);
    println!("  Tier:            {}", snapshot.enemy.tier);
    println!(
        "  Health:          {}/{}",
        snapshot.enemy.health, snapshot.enemy.base_health
    );
    println!();
    println!("Shop");
    for perk in &snapshot.perks {
        println!(
            "  {:<3} level {:<3} next +{:<4} costs {}",
            perk.name, perk.level, perk.bonus, perk.price
        );
    }
    println!();
    println!("Saved to {}", saves.path().display());
}

fn parse_args(args: &[String]) -> RunOptions {
    let mut options = RunOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    options.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--seconds" => {
                if i + 1 < args.len() {
                    options.seconds = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "-c" | "--cps" => {
                if i + 1 < args.len() {
                    options.clicks_per_second = args[i + 1].parse().unwrap_or(8);
                    i += 1;
                }
            }
            "--save" => {
                if i + 1 < args.len() {
                    options.save_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--log-file" => {
                if i + 1 < args.len() {
                    options.log_file = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--new" => {
                options.new_game = true;
            }
            "--no-shop" => {
                options.shop = false;
            }
            "--realtime" => {
                options.realtime = true;
            }
            "-v" | "--verbose" => {
                options.verbose = true;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn print_help() {
    println!("Enemy Clicker autoplay");
    println!();
    println!("USAGE:");
    println!("    enemy-clicker [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -s, --seed <S>       Random seed for reproducibility");
    println!("    -t, --seconds <N>    Game seconds to play (default: 60)");
    println!("    -c, --cps <N>        Clicks per second (default: 8)");
    println!("        --save <PATH>    Save file (default: platform config dir)");
    println!("        --new            Ignore any existing save");
    println!("        --no-shop        Never buy perks");
    println!("        --realtime       Run at wall-clock speed");
    println!("        --log-file <P>   Write the log to a file instead of stderr");
    println!("    -v, --verbose        Debug logging");
    println!("    -h, --help           Print this help");
}
