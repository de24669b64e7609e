//! Line commands typed at the prompt, standing in for the filter controls,
//! card buttons, detail overlay and page bar.

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use engine_logging::engine_debug;

use super::app::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
    Flip,
}

impl Switch {
    pub fn apply(&self, current: bool) -> bool {
        match self {
            Switch::On => true,
            Switch::Off => false,
            Switch::Flip => !current,
        }
    }
}

/// A card on the current page (1-based position) or a record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Position(usize),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Year(Option<String>),
    SuccessOnly(Switch),
    FavoritesOnly(Switch),
    /// Toggle a favorite; without a target, the record in the open overlay.
    Favorite(Option<Target>),
    Open(Target),
    Lookup(String),
    Close,
    Page(usize),
    Next,
    Previous,
    Reload,
    Help,
    Quit,
    Empty,
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "search" | "s" | "/" => Ok(Command::Search(rest.to_string())),
        "year" | "y" => Ok(Command::Year(match rest.to_ascii_lowercase().as_str() {
            "" | "all" => None,
            _ => Some(parse_year(rest)?),
        })),
        "success" => parse_switch(rest).map(Command::SuccessOnly),
        "favorites" | "favs" => parse_switch(rest).map(Command::FavoritesOnly),
        "fav" | "f" | "star" => Ok(Command::Favorite(if rest.is_empty() {
            None
        } else {
            Some(parse_target(rest))
        })),
        "open" | "o" | "details" => {
            if rest.is_empty() {
                Err("open needs a card number or launch id".to_string())
            } else {
                Ok(Command::Open(parse_target(rest)))
            }
        }
        "lookup" | "id" => {
            if rest.is_empty() {
                Err("lookup needs a launch id".to_string())
            } else {
                Ok(Command::Lookup(rest.to_string()))
            }
        }
        "close" | "esc" | "x" => Ok(Command::Close),
        "page" | "p" => rest
            .parse::<usize>()
            .map(Command::Page)
            .map_err(|_| format!("not a page number: {rest:?}")),
        "next" | "n" | ">" => Ok(Command::Next),
        "prev" | "previous" | "<" => Ok(Command::Previous),
        "reload" | "r" => Ok(Command::Reload),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command {other:?}; type help")),
    }
}

fn parse_year(raw: &str) -> Result<String, String> {
    raw.parse::<i32>()
        .map(|year| year.to_string())
        .map_err(|_| format!("not a year: {raw:?}"))
}

fn parse_switch(raw: &str) -> Result<Switch, String> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "toggle" => Ok(Switch::Flip),
        "on" | "yes" | "true" | "1" => Ok(Switch::On),
        "off" | "no" | "false" | "0" => Ok(Switch::Off),
        other => Err(format!("expected on or off, got {other:?}")),
    }
}

fn parse_target(raw: &str) -> Target {
    match raw.parse::<usize>() {
        Ok(position) if position > 0 => Target::Position(position),
        _ => Target::Id(raw.to_string()),
    }
}

/// Reads stdin on a background thread, one command per line.
pub fn spawn_reader(events: mpsc::Sender<Event>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let event = match parse_command(&line) {
                Ok(command) => Event::Command(command),
                Err(problem) => Event::InputError(problem),
            };
            if events.send(event).is_err() {
                return;
            }
        }
        engine_debug!("stdin closed");
        let _ = events.send(Event::Command(Command::Quit));
    });
}
