//! Camellia — console entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI arguments
//!   3. Load config
//!   4. Init logger once at the effective level (CLI > env > config)
//!   5. Open the knowledge store and build the engine
//!   6. Without `-i`: print status and exit; with `-i`: banner + REPL

use std::io::{self, Write};

use tracing::info;
use uuid::Uuid;

use camellia_bot::{
    config, logger, AppError, ChatEngine, Config, ConversationStats, TrainingReport,
};

struct CliArgs {
    interactive: bool,
    config_path: Option<String>,
    verbosity: u8,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args()?;
    let config = config::load(args.config_path.as_deref())?;

    let (level, prefer_cli) = match verbosity_level(args.verbosity) {
        Some(level) => (level, true),
        None => (config.log_level.as_str(), false),
    };
    logger::init(level, prefer_cli, config.log_file.as_deref())?;

    info!(
        bot_name = %config.bot_name,
        work_dir = %config.work_dir.display(),
        "starting"
    );

    let mut engine = ChatEngine::new(&config)?;

    if !args.interactive {
        print_status(&config, &engine);
        return Ok(());
    }

    let session_id = Uuid::new_v4().to_string();
    print_banner(&config, &engine, &session_id);
    repl(&mut engine, &config.bot_name, &session_id)?;
    engine.save()?;
    println!("Goodbye!");
    Ok(())
}

fn parse_cli_args() -> Result<CliArgs, AppError> {
    let mut args = CliArgs {
        interactive: false,
        config_path: None,
        verbosity: 0,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-i" | "--interactive" => args.interactive = true,
            "-f" | "--config" => {
                args.config_path = Some(iter.next().ok_or_else(|| {
                    AppError::Config("-f requires a path argument".to_string())
                })?);
            }
            "-v" => args.verbosity += 1,
            "-vv" => args.verbosity += 2,
            "-vvv" => args.verbosity += 3,
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                return Err(AppError::Config(format!("unknown argument: {other}")));
            }
        }
    }
    Ok(args)
}

fn verbosity_level(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn print_usage() {
    println!("camellia-bot [options]");
    println!();
    println!("  -i, --interactive    start the chat console");
    println!("  -f, --config <path>  use this config file");
    println!("  -v                   raise log verbosity (-v info, -vv debug, -vvv trace)");
    println!("  -h, --help           this text");
}

fn print_status(config: &Config, engine: &ChatEngine) {
    let stats = engine.conversation_stats();
    println!("{} is configured.", config.bot_name);
    println!("  work dir:        {}", config.work_dir.display());
    println!("  knowledge store: {}", engine.store_type());
    println!("  topics tracked:  {}", stats.topics_tracked);
    println!("  knowledge items: {}", stats.knowledge_items);
    println!("Run again with -i to chat.");
}

fn print_banner(config: &Config, engine: &ChatEngine, session_id: &str) {
    println!("╭───────────────────────────────────────────────╮");
    println!("│  {:<43}  │", format!("{} interactive console", config.bot_name));
    println!("╰───────────────────────────────────────────────╯");
    println!("knowledge store: {}   session: {}", engine.store_type(), session_id);
    println!("Type a message, or /help for commands.");
}

fn repl(engine: &mut ChatEngine, bot_name: &str, session_id: &str) -> Result<(), AppError> {
    let stdin = io::stdin();
    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(engine, command.trim()) {
                break;
            }
            continue;
        }

        let reply = engine.process_message(line, Some(session_id));
        println!("{bot_name}> {reply}");
    }
    Ok(())
}

/// Run one slash command. Returns false when the REPL should stop.
fn handle_command(engine: &mut ChatEngine, command: &str) -> bool {
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };
    match name {
        "train" => {
            let topics: Vec<String> = rest
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            if topics.is_empty() {
                println!("Training from the default sources...");
            } else {
                println!("Training on {} topic(s)...", topics.len());
            }
            let report =
                engine.train_from_web(if topics.is_empty() { None } else { Some(&topics) }, None);
            print_report(&report);
        }
        "stats" => print_stats(&engine.conversation_stats()),
        "clear" => {
            engine.clear_memory();
            println!("Conversation memory cleared.");
        }
        "reset" => match engine.reset_knowledge() {
            Ok(()) => println!("All learned knowledge wiped."),
            Err(error) => println!("Reset failed: {error}"),
        },
        "suggest" => {
            let interests: Vec<String> = rest
                .split([',', ' '])
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            println!("Suggested sources:");
            for url in engine.suggest_sources(&interests) {
                println!("  {url}");
            }
        }
        "help" => print_help(),
        "quit" | "exit" => return false,
        other => println!("Unknown command /{other}. Try /help."),
    }
    true
}

fn print_report(report: &TrainingReport) {
    println!(
        "Scraped {} source(s); stored {} item(s) across {} topic(s).",
        report.sources_scraped, report.knowledge_items_added, report.topics_learned
    );
    if !report.success {
        println!("Some knowledge could not be stored.");
    }
    for error in &report.errors {
        println!("  ! {error}");
    }
}

fn print_stats(stats: &ConversationStats) {
    println!("  interactions:     {}", stats.total_interactions);
    println!("  topics tracked:   {}", stats.topics_tracked);
    println!("  knowledge items:  {}", stats.knowledge_items);
    println!("  learned patterns: {}", stats.learned_patterns);
    println!("  recent messages:  {}", stats.recent_messages);
}

fn print_help() {
    println!("Commands:");
    println!("  /train [topic, topic...]  scrape sources and learn from them");
    println!("  /stats                    show conversation statistics");
    println!("  /suggest [interests]      list curated source urls");
    println!("  /clear                    forget the running conversation");
    println!("  /reset                    wipe all learned knowledge");
    println!("  /help                     this text");
    println!("  /quit                     save and exit");
}
