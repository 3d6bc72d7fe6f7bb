//! Simple console interactive player.

use std::io::{BufRead, Write};
use std::thread::JoinHandle;

use ansi_term::{ANSIString, ANSIStrings};
use tokio::sync::mpsc;

use super::{Event, Observer, PlayerState};
use crate::bigtwo::{parse_cards, Card, Command, Seat};

/// Renders the game to the terminal, and reads commands for human seats from stdin.
pub struct Console {
    color: bool,
}
impl Default for Console {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Parses a line of input into a command.
///
/// The line is either `pass`, or a list of cards. When more than one seat is controlled by
/// humans, the line must be prefixed by the seat, as in `n: 3d 3c`.
fn parse_command(line: &str, humans: &[Seat]) -> Result<Command, String> {
    let (seat, rest) = match line.split_once(':') {
        Some((prefix, rest)) => {
            let mut chars = prefix.trim().chars();
            let seat = match (chars.next(), chars.next()) {
                (Some(c), None) => Seat::try_from(c).ok(),
                _ => None,
            };
            let seat = seat
                .filter(|s| humans.contains(s))
                .ok_or_else(|| format!("not a human seat: {prefix}"))?;
            (seat, rest)
        }
        None => match humans {
            [seat] => (*seat, line),
            _ => return Err("prefix the command with a seat, e.g. \"s: pass\"".into()),
        },
    };
    let rest = rest.trim();
    if rest.eq_ignore_ascii_case("pass") {
        return Ok(Command::Pass { seat });
    }
    let cards = parse_cards(rest).map_err(|err| err.to_string())?;
    if cards.is_empty() {
        return Err("no cards".into());
    }
    Ok(Command::Play { seat, cards })
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn into_observer(self) -> Box<dyn Observer> {
        Box::new(self)
    }

    /// Spawns a thread that reads commands for the human seats from stdin. The thread exits at
    /// the end of input, or once the receiver is dropped.
    pub fn spawn_reader(humans: Vec<Seat>, commands: mpsc::Sender<Command>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line, &humans) {
                    Ok(command) => {
                        if commands.blocking_send(command).is_err() {
                            break;
                        }
                    }
                    Err(err) => println!("Invalid input ({err}), try again"),
                }
            }
        })
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn format_cards(&self, cards: &[Card]) -> String {
        let mut parts: Vec<ANSIString> = vec![];
        for (ii, card) in cards.iter().enumerate() {
            if ii > 0 {
                parts.push(" ".into());
            }
            parts.push(card.to_ansi_string());
        }
        self.format(&ANSIStrings(&parts))
    }
}

impl Observer for Console {
    fn notify(&self, state: PlayerState, event: &Event) {
        match event {
            Event::GameStarted { variant, opener } => {
                println!("{variant} rules. You are {}.", state.seat);
                println!("{opener} holds {} and opens.", self.format_cards(&[Card::OPENING]));
            }
            Event::PlayerTurnStarted(_) => (),
            Event::CardsPlayed(seat, play) => {
                println!(
                    "{seat}: {} ({})",
                    self.format_cards(play.cards()),
                    play.shape()
                );
            }
            Event::PlayerPassed(seat) => println!("{seat}: pass"),
            Event::RoundReopened => println!("All passed, table cleared."),
            Event::InvalidPlay(seat, err) => println!("{seat}: {err}"),
            Event::GameEnded(outcome) => {
                println!("{} wins!", outcome.winner);
                for (seat, total) in &outcome.scores.totals {
                    println!(
                        "  {seat}: {total:+} (penalty {})",
                        outcome.scores.penalty(*seat)
                    );
                }
            }
        }
    }

    fn prompt(&self, state: PlayerState) {
        if let Some(previous) = state.previous {
            println!(
                "To beat: {} from {}",
                self.format_cards(previous.play.cards()),
                previous.seat
            );
        }
        println!("Hand: {}", self.format_cards(&state.hand.to_vec()));
        print!("{}, play (or pass)? ", state.seat);
        std::io::stdout().flush().expect("flush");
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_command() {
        let south = [Seat::South];
        assert_eq!(
            parse_command("pass", &south),
            Ok(Command::Pass { seat: Seat::South })
        );
        assert_eq!(
            parse_command("3d, 3c", &south),
            Ok(Command::Play {
                seat: Seat::South,
                cards: parse_cards("3d 3c").unwrap()
            })
        );
        assert!(parse_command("", &south).is_err());
        assert!(parse_command("3x", &south).is_err());

        let both = [Seat::North, Seat::South];
        assert_eq!(
            parse_command("n: PASS", &both),
            Ok(Command::Pass { seat: Seat::North })
        );
        assert!(parse_command("pass", &both).is_err());
        assert!(parse_command("e: pass", &both).is_err());
    }
}
