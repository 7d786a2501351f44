use battler_core::state::{
    ClientConfig, DEFAULT_API_BASE, DEFAULT_NUM_PLAYERS, DEFAULT_TOURNAMENT_SIZE, REQUEST_TIMEOUT_MS,
    RESET_DELAY_MS, RESUME_DELAY_MS,
};
use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "battler")]
#[command(about = "Play a Pet Battler tournament from the terminal", long_about = None)]
pub struct Args {
    /// Base URL of the game service
    #[arg(long, env = "BATTLER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Creatures in the tournament bracket
    #[arg(long, env = "BATTLER_TOURNAMENT_SIZE", default_value_t = DEFAULT_TOURNAMENT_SIZE)]
    pub tournament_size: u32,

    /// Human players in the run
    #[arg(long, env = "BATTLER_NUM_PLAYERS", default_value_t = DEFAULT_NUM_PLAYERS)]
    pub num_players: u32,

    /// Pause before moves unlock after a round (ms)
    #[arg(long, env = "BATTLER_RESUME_DELAY_MS", default_value_t = RESUME_DELAY_MS)]
    pub resume_delay_ms: u32,

    /// Pause on the elimination message (ms)
    #[arg(long, env = "BATTLER_RESET_DELAY_MS", default_value_t = RESET_DELAY_MS)]
    pub reset_delay_ms: u32,

    /// Per-request timeout (ms)
    #[arg(long, env = "BATTLER_TIMEOUT_MS", default_value_t = REQUEST_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.trim_end_matches('/').to_string(),
            num_players: self.num_players,
            tournament_size: self.tournament_size,
            resume_delay_ms: self.resume_delay_ms,
            reset_delay_ms: self.reset_delay_ms,
            request_timeout_ms: self.timeout_ms,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
