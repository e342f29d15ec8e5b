use legend::achievements::{AchievementId, Signal, ALL_ACHIEVEMENTS};
use legend::core::constants::{CONFIG_FILE, DEFAULT_EXPORT_FILE};
use legend::core::{Clock, Engine, EngineEvent, ManualClock, SystemClock};
use legend::{EngineConfig, FileStore};
use std::io;
use std::path::PathBuf;

/// One step of a scripted `session` run.
#[derive(Debug, Clone, PartialEq)]
enum SessionStep {
    Section(String),
    Interact,
    Navigate,
    Cta,
    Signal(Signal),
    Xp(u64, String),
    Unlock(String),
    Wait(u64),
    Hide,
    Show,
}

fn parse_step(arg: &str) -> Result<SessionStep, String> {
    let (kind, rest) = arg.split_once(':').unwrap_or((arg, ""));
    match kind {
        "section" if !rest.is_empty() => Ok(SessionStep::Section(rest.to_string())),
        "interact" => Ok(SessionStep::Interact),
        "navigate" => Ok(SessionStep::Navigate),
        "cta" => Ok(SessionStep::Cta),
        "signal" => Signal::from_key(rest)
            .map(SessionStep::Signal)
            .ok_or_else(|| format!("unknown signal '{}'", rest)),
        "xp" => {
            let (amount, reason) = rest.split_once(':').unwrap_or((rest, "Manual grant"));
            amount
                .parse()
                .map(|amount| SessionStep::Xp(amount, reason.to_string()))
                .map_err(|_| format!("invalid XP amount '{}'", amount))
        }
        "unlock" if !rest.is_empty() => Ok(SessionStep::Unlock(rest.to_string())),
        "wait" => rest
            .parse()
            .map(SessionStep::Wait)
            .map_err(|_| format!("invalid wait seconds '{}'", rest)),
        "hide" => Ok(SessionStep::Hide),
        "show" => Ok(SessionStep::Show),
        _ => Err(format!("unknown session step '{}'", arg)),
    }
}

fn describe_event(event: &EngineEvent) -> String {
    match event {
        EngineEvent::XpGained {
            amount,
            reason,
            total_xp,
        } => format!("+{} XP  {} (total {})", amount, reason, total_xp),
        EngineEvent::LevelUp {
            new_level,
            bonus_xp,
            ..
        } => format!("Level up! Reached level {} (+{} bonus XP)", new_level, bonus_xp),
        EngineEvent::AchievementUnlocked {
            icon,
            title,
            xp_reward,
            ..
        } => format!("{} Achievement unlocked: {} (+{} XP)", icon, title, xp_reward),
        EngineEvent::SessionStarted { visit_count } => format!("Session started (visit #{})", visit_count),
        EngineEvent::SessionEnded { summary } => format!(
            "Session ended after {}s, {} sections, {} interactions",
            summary.duration / 1000,
            summary.sections_visited.len(),
            summary.interactions_count
        ),
        EngineEvent::ProgressReset => "All progress reset".to_string(),
    }
}

fn print_events(engine: &mut Engine) {
    for event in engine.take_events() {
        println!("  {}", describe_event(&event));
    }
}

fn print_status(engine: &Engine) {
    let progress = engine.progress();
    println!("Level {} - XP: {}", progress.level, progress.xp);
    match progress.xp_to_next_level {
        Some(remaining) => println!(
            "Progress to next level: {:.1}% ({} XP to go)",
            progress.progress_percent, remaining
        ),
        None => println!("Maximum level reached"),
    }
    if progress.time_spent_minutes > 0.0 {
        println!("Time this session: {:.1} min", progress.time_spent_minutes);
    }
    println!(
        "Achievements: {}/{}",
        engine.unlocked_count(),
        engine.total_achievements()
    );
    println!("Visits: {}", engine.visit_count());
}

fn print_achievements(engine: &Engine) {
    for def in ALL_ACHIEVEMENTS {
        let mark = if engine.is_unlocked(def.id) { "x" } else { " " };
        println!(
            "[{}] {} {:<28} {:<10} {:>5} XP  {}",
            mark,
            def.icon,
            def.title,
            def.rarity.name(),
            def.xp_reward,
            def.description
        );
    }
}

fn run_session(engine: &mut Engine, clock: &ManualClock, steps: &[SessionStep]) {
    engine.start_session();
    print_events(engine);
    for step in steps {
        match step {
            SessionStep::Section(id) => {
                engine.record_section_view(id);
            }
            SessionStep::Interact => engine.record_interaction(),
            SessionStep::Navigate => engine.record_navigation(),
            SessionStep::Cta => engine.record_cta_click(),
            SessionStep::Signal(signal) => {
                engine.record_signal(*signal);
            }
            SessionStep::Xp(amount, reason) => engine.add_xp(*amount, reason),
            SessionStep::Unlock(key) => {
                if !engine.unlock_achievement_key(key) && AchievementId::from_key(key).is_none() {
                    eprintln!("  (unknown achievement '{}' ignored)", key);
                }
            }
            SessionStep::Wait(seconds) => {
                let ticks = seconds.saturating_mul(1000) / engine.config().tick_interval_ms.max(1);
                for _ in 0..ticks {
                    clock.advance(engine.config().tick_interval_ms);
                    engine.tick();
                }
            }
            SessionStep::Hide => engine.set_visible(false),
            SessionStep::Show => engine.set_visible(true),
        }
        print_events(engine);
    }
    engine.drain_pending();
    engine.end_session();
    print_events(engine);
}

fn open_engine(clock: Box<dyn Clock>) -> io::Result<Engine> {
    let store = FileStore::open_default().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let config = EngineConfig::load(&store.dir().join(CONFIG_FILE));
    Ok(Engine::new(config, Box::new(store), clock))
}

fn print_help() {
    println!("Legend - visitor progression engine\n");
    println!("Usage: legend [--verbose] <command>\n");
    println!("Commands:");
    println!("  status              Show level, XP and achievement count");
    println!("  achievements        List all achievements and their state");
    println!("  session <step>...   Run a scripted session. Steps:");
    println!("                        section:<id>  interact  navigate  cta");
    println!("                        signal:<name>  xp:<amount>[:<reason>]");
    println!("                        unlock:<id>");
    println!("                        wait:<seconds>  hide  show");
    println!("  export [path]       Write all stored state to a JSON file");
    println!("  reset --yes         Erase all progress (cannot be undone)");
    println!("  --version           Show version information");
    println!("  --help              Show this help message");
}

fn main() -> io::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    args.retain(|a| a != "--verbose");

    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let Some(command) = args.first().cloned() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "status" => {
            let engine = open_engine(Box::new(SystemClock))?;
            print_status(&engine);
        }
        "achievements" => {
            let engine = open_engine(Box::new(SystemClock))?;
            print_achievements(&engine);
        }
        "session" => {
            let steps = match args[1..].iter().map(|a| parse_step(a)).collect::<Result<Vec<_>, _>>() {
                Ok(steps) => steps,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };
            let now = SystemClock.now();
            let clock = ManualClock::with_offset(now.timestamp_millis(), *now.offset());
            let mut engine = open_engine(Box::new(clock.clone()))?;
            run_session(&mut engine, &clock, &steps);
            println!();
            print_status(&engine);
        }
        "export" => {
            let path = args
                .get(1)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
            let engine = open_engine(Box::new(SystemClock))?;
            engine
                .export_to_file(&path)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            println!("Progress exported to {}", path.display());
        }
        "reset" => {
            let confirmed = args.iter().any(|a| a == "--yes");
            if !confirmed {
                eprintln!("This erases all progress and cannot be undone.");
                eprintln!("Run 'legend reset --yes' to confirm.");
                std::process::exit(1);
            }
            let mut engine = open_engine(Box::new(SystemClock))?;
            engine.reset_progress(true);
            print_events(&mut engine);
        }
        "--version" | "-v" => {
            println!("{}", legend::build_info::version_line());
        }
        "--help" | "-h" => print_help(),
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'legend --help' for usage.");
            std::process::exit(1);
        }
    }
    Ok(())
}
