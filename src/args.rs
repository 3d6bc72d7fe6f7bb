//! Command line arguments

use std::time::Duration;

use bigtwo::bigtwo::{Difficulty, Seat, SeatKind, TableConfig, Variant};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// House rules.
    #[arg(short, long, value_enum, default_value_t)]
    pub variant: Variant,

    /// Number of human seats, starting from South and continuing clockwise.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub humans: u8,

    /// Strength of the computer seats.
    #[arg(short, long, value_enum, default_value_t)]
    pub difficulty: Difficulty,

    /// Seconds a human seat may take before their turn is played for them.
    #[arg(short, long, default_value_t = 15)]
    pub timeout: u64,

    /// Seed for the deal.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the game log to stderr as JSON.
    #[arg(long)]
    pub record: bool,
}

impl From<&Args> for TableConfig {
    fn from(args: &Args) -> Self {
        let mut seats = [SeatKind::Computer(args.difficulty); 4];
        let mut seat = Seat::South;
        for _ in 0..args.humans {
            seats[seat.index()] = SeatKind::Human;
            seat = seat.next();
        }
        TableConfig {
            variant: args.variant,
            seats,
            turn_timeout: Duration::from_secs(args.timeout),
            seed: args.seed,
        }
    }
}
