//! Interactive entry of favourite places.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};

use crate::places::{CandidateList, Place};
use crate::traits::{InputSource, RouteOracle};

/// Maximum number of favourites asked for in one session.
pub const MAX_FAVORITES: usize = 20;

/// Ask for up to [`MAX_FAVORITES`] place names and resolve them to addresses.
///
/// Entering `q` or closing the input stops early. Names the oracle cannot
/// resolve are followed by a prompt for the address itself; a blank answer
/// drops the place.
pub fn collect_favorites<I, O>(input: &mut I, oracle: &O) -> CandidateList
where
    I: InputSource + ?Sized,
    O: RouteOracle + ?Sized,
{
    let mut names = Vec::new();
    for i in 1..=MAX_FAVORITES {
        let Some(answer) = input.prompt(&format!("Enter favorite place #{i} (or type 'q' to finish): "))
        else {
            break;
        };
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("q") {
            break;
        }
        if !answer.is_empty() {
            names.push(answer.to_string());
        }
    }

    let mut favorites = CandidateList::new();
    for name in names {
        let resolved = match oracle.resolve_name_to_address(&name) {
            Ok(address) => address,
            Err(err) => {
                warn!(name = %name, error = %err, "name lookup failed");
                None
            }
        };

        let address = match resolved {
            Some(address) => address,
            None => match input.prompt(&format!("Please write the address of {name}: ")) {
                Some(address) if !address.trim().is_empty() => address.trim().to_string(),
                _ => {
                    warn!(name = %name, "no address for favorite, skipping");
                    continue;
                }
            },
        };

        favorites.push(Place::named(address, name));
    }

    info!(count = favorites.len(), "collected favorites");
    favorites
}

/// Prompts on stdout and reads answers line by line from stdin.
#[derive(Debug, Default)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn prompt(&mut self, message: &str) -> Option<String> {
        let mut stdout = io::stdout();
        stdout.write_all(message.as_bytes()).ok()?;
        stdout.flush().ok()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}
