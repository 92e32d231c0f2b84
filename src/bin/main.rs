use fintro_assistant::{
    config::AppConfig,
    knowledge::SUGGESTED_QUESTIONS,
    models::Sender,
    recommendation::RecommendationEngine,
    resolver::IntentResolver,
    Session,
};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  /recommend <risk 1-10> <amount 100-10000>   rank ETFs for a profile
  /period <1M|3M|6M|1Y|5Y>                    show returns for a period
  /suggest                                    list example questions
  /quit                                       exit
Anything else is sent to the assistant.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Logs go to stderr so they don't interleave with the chat
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let resolver = config.load_resolver()?;
    let engine = config.load_engine()?;

    info!("Fintro Assistant starting");

    let mut session = Session::new();
    if let Some(greeting) = session.transcript.last() {
        println!("bot> {}", greeting.text);
    }
    println!("{}", HELP);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match run_command(line, &mut session, &resolver, &engine, config.reply_delay) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) => {
                warn!("Command failed: {}", e);
                println!("error: {}", e);
            }
        }
    }

    Ok(())
}

/// Returns `Ok(false)` when the user asked to quit
fn run_command(
    line: &str,
    session: &mut Session,
    resolver: &IntentResolver,
    engine: &RecommendationEngine,
    reply_delay: Duration,
) -> fintro_assistant::Result<bool> {
    let mut parts = line.split_whitespace();

    match parts.next() {
        Some("/quit") | Some("/exit") => return Ok(false),
        Some("/suggest") => {
            for question in SUGGESTED_QUESTIONS {
                println!("  {}", question);
            }
        }
        Some("/recommend") => {
            let (Some(risk), Some(amount)) = (parts.next(), parts.next()) else {
                println!("usage: /recommend <risk> <amount>");
                return Ok(true);
            };
            let (Ok(risk), Ok(amount)) = (risk.parse::<u8>(), amount.parse::<u32>()) else {
                println!("risk and amount must be whole numbers");
                return Ok(true);
            };

            session.update_profile(engine, risk, amount)?;
            print_recommendations(session);
        }
        Some("/period") => {
            let Some(label) = parts.next() else {
                println!("usage: /period <1M|3M|6M|1Y|5Y>");
                return Ok(true);
            };
            let period = session.select_period(label)?;

            println!("Expected returns ({})", period);
            for (name, value) in session.performance() {
                let sign = if value >= 0.0 { "+" } else { "" };
                println!("  {}: {}{}%", name, sign, value);
            }
        }
        Some(_) => {
            // UX pacing only
            thread::sleep(reply_delay);
            if let Some(turn) = session.submit_message(resolver, line) {
                if turn.sender == Sender::Bot {
                    println!("bot> {}", turn.text);
                }
            }
        }
        None => {}
    }

    Ok(true)
}

fn print_recommendations(session: &Session) {
    let profile = session.profile;
    println!(
        "Profile: {} ({} of students, {})",
        profile,
        profile.share_of_students(),
        profile.experience_years()
    );
    println!("  {}", profile.description());

    if session.recommendations.is_empty() {
        println!("No ETFs match this profile.");
        return;
    }

    for etf in &session.recommendations {
        println!(
            "  {:>3}%  {} ({}) [{}] return {}% | expense {}% | volatility {}% | risk {}/10 ({:?})",
            etf.match_score,
            etf.name,
            etf.ticker,
            etf.category,
            etf.annual_return,
            etf.expense_ratio,
            etf.volatility,
            etf.risk_level,
            etf.risk_badge()
        );
    }
}
