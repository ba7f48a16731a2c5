mod animator;
mod colors;
mod config;
mod logging;
mod scene;
mod session;
mod settings;
mod steps;
mod surface;
mod terminal;

use clap::Parser;
use config::TimerConfig;
use rand::rngs::StdRng;
use rand::SeedableRng;
use session::{Session, SystemClock};
use settings::Settings;
use std::io;
use terminal::Terminal;

#[derive(Parser)]
#[command(name = "bonsai-timer")]
#[command(version)]
#[command(about = "Work/break timer that grows a bonsai tree while you work and sheds it on break", long_about = None)]
struct Cli {
    /// Work phase length in minutes (default 25)
    #[arg(short, long, value_name = "MINUTES", num_args = 0..=1, default_missing_value = "0", allow_negative_numbers = true)]
    work: Option<String>,

    /// Break phase length in minutes (default 5)
    #[arg(short, long = "break", value_name = "MINUTES", num_args = 0..=1, default_missing_value = "0", allow_negative_numbers = true)]
    brk: Option<String>,

    /// Random seed for a reproducible tree sequence
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let settings = Settings::load();
    let config = TimerConfig::resolve(
        cli.work.as_deref(),
        cli.brk.as_deref(),
        cli.seed,
        &settings.timer,
    );

    let seed = config.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0) // Fallback seed for misconfigured system clocks
    });
    tracing::info!(
        work_mins = config.work_mins,
        break_mins = config.break_mins,
        seed,
        "starting timer"
    );

    let term = Terminal::new()?;
    let mut session = Session::new(term, SystemClock, StdRng::seed_from_u64(seed), config);
    session.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bonsai-timer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn bare_flag_means_zero_minutes() {
        let cli = parse(&["-w", "-b", "3"]);
        assert_eq!(cli.work.as_deref(), Some("0"));
        assert_eq!(cli.brk.as_deref(), Some("3"));
    }

    #[test]
    fn garbage_minutes_reach_the_permissive_parser() {
        let cli = parse(&["--work", "abc", "--break", "-2"]);
        let cfg = TimerConfig::resolve(cli.work.as_deref(), cli.brk.as_deref(), None, &Default::default());
        assert_eq!(cfg.work_mins, 0);
        assert_eq!(cfg.break_mins, 0);
    }

    #[test]
    fn omitted_flags_use_defaults() {
        let cli = parse(&["-s", "42"]);
        let cfg = TimerConfig::resolve(cli.work.as_deref(), cli.brk.as_deref(), cli.seed, &Default::default());
        assert_eq!((cfg.work_mins, cfg.break_mins, cfg.seed), (25, 5, Some(42)));
    }
}
