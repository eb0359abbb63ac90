mod assets;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use earthguard_progress::{
    BadgeCatalog, DuplicatePolicy, MissionId, ProgressEngine, ProgressError, SystemClock,
};

use assets::StaticCatalogs;
use store::FileStore;

type Engine = ProgressEngine<SystemClock, FileStore>;

#[derive(Debug, Parser)]
#[command(name = "earthguard", version)]
#[command(about = "EarthGuardian - daily eco-mission tracker")]
struct Args {
    /// Progress file location (defaults to the platform data directory)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Allow completing the same mission more than once per day
    #[arg(long)]
    repeatable: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the profile summary
    Status,
    /// List today's missions
    Missions,
    /// Show the badge ladder
    Badges,
    /// Complete a mission and collect its reward
    Complete {
        /// Mission id (see `missions`)
        id: MissionId,
    },
    /// Grant bonus points
    Award {
        /// Points to add
        points: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let path = match args.data_file {
        Some(path) => path,
        None => store::default_data_path()
            .context("no platform data directory available; pass --data-file")?,
    };
    log::debug!("progress file: {}", path.display());
    let policy = if args.repeatable {
        DuplicatePolicy::Repeatable
    } else {
        DuplicatePolicy::RejectSameDay
    };

    let mut engine =
        ProgressEngine::bootstrap(&StaticCatalogs, SystemClock, FileStore::new(path), policy)
            .context("failed to load mission/badge catalogs")?;
    // The CLI process is the "foreground event": hydrate, then reconcile
    // any rollover since the last run.
    engine.hydrate();
    engine.check_and_reset_daily();

    match args.command {
        Command::Status => print_status(&engine),
        Command::Missions => print_missions(&engine),
        Command::Badges => print_badges(&engine),
        Command::Complete { id } => complete(&mut engine, id)?,
        Command::Award { points } => {
            engine.add_points(points)?;
            println!("{} +{points} points", "Granted".green().bold());
        }
    }
    Ok(())
}

fn print_status(engine: &Engine) {
    let summary = engine.profile_summary();
    println!(
        "{} {}",
        format!("Level {}", summary.level).green().bold(),
        "Earth Guardian".bold()
    );
    println!(
        "Points: {} | Streak: {} days | Today: {} missions",
        summary.points.to_string().yellow(),
        summary.streak.to_string().yellow(),
        summary.completed_today.to_string().yellow(),
    );
    println!(
        "Lifetime completions: {} | Trees saved: {:.1}",
        summary.total_completions, summary.trees_saved,
    );
    if let Some(badge) = engine.next_badge() {
        println!(
            "Next badge: {} ({}/{})",
            badge.name.cyan(),
            summary.points.min(badge.threshold),
            badge.threshold
        );
    }
}

fn print_missions(engine: &Engine) {
    println!("{}", "Today's missions".bold());
    for mission in engine.mission_catalog().iter() {
        let mark = if engine.completed_today(mission.id) {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        println!(
            "{mark} {:>2}  {:<8} {:>3}pt  {}",
            mission.id,
            mission.category.display_name(),
            mission.points,
            mission.title
        );
    }
}

fn print_badges(engine: &Engine) {
    let points = engine.points();
    println!("{}", "Badge ladder".bold());
    for badge in engine.badge_catalog().iter() {
        let line = format!("{:<16} {:>5} points", badge.name, badge.threshold);
        if BadgeCatalog::is_unlocked(badge, points) {
            println!("{} {}", "unlocked".green(), line);
        } else {
            println!("{} {}", "  locked".dimmed(), line.dimmed());
        }
    }
}

fn complete(engine: &mut Engine, id: MissionId) -> Result<()> {
    match engine.complete_and_reward(id) {
        Ok(reward) => {
            println!(
                "{} +{} points",
                "Mission complete!".green().bold(),
                reward.points_awarded
            );
            if let Some(badge) = reward.unlocked_badge {
                println!("{} {}", "Badge unlocked:".yellow().bold(), badge.name.bold());
            }
        }
        Err(ProgressError::AlreadyCompletedToday(id)) => {
            println!("Mission {id} is already done today. Come back tomorrow!");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
