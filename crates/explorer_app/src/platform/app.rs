use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use engine_logging::{engine_debug, engine_info};
use explorer_core::{update, AppState, AppViewModel, DetailView, Msg};

use super::effects::EffectRunner;
use super::input::{self, Command, Target};
use super::ui;
use crate::config::AppConfig;

const TICK_INTERVAL: Duration = Duration::from_millis(75);

/// Everything the main loop reacts to.
pub enum Event {
    Msg(Msg),
    Command(Command),
    InputError(String),
}

/// What a typed command turns into once resolved against the current view.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Dispatch(Msg),
    Print(String),
    Quit,
    Nothing,
}

pub fn run_app(config: AppConfig) -> io::Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<Event>();
    let mut effects = EffectRunner::new(&config, event_tx.clone())?;
    let mut state = AppState::with_settings(config.view);

    let tick_tx = event_tx.clone();
    thread::spawn(move || {
        while tick_tx
            .send(Event::Msg(Msg::Tick {
                now: Instant::now(),
            }))
            .is_ok()
        {
            thread::sleep(TICK_INTERVAL);
        }
    });
    input::spawn_reader(event_tx);

    dispatch(
        &mut state,
        Msg::FavoritesRestored(effects.persisted_favorites()),
        &mut effects,
    )?;
    dispatch(&mut state, Msg::ReloadRequested, &mut effects)?;

    while let Ok(event) = event_rx.recv() {
        match event {
            Event::Msg(msg) => dispatch(&mut state, msg, &mut effects)?,
            Event::InputError(problem) => print_line(&problem)?,
            Event::Command(command) => match resolve_command(command, &state) {
                Action::Dispatch(msg) => dispatch(&mut state, msg, &mut effects)?,
                Action::Print(text) => print_line(&text)?,
                Action::Quit => break,
                Action::Nothing => {}
            },
        }
    }

    engine_info!("Exiting");
    Ok(())
}

fn dispatch(state: &mut AppState, msg: Msg, effects: &mut EffectRunner) -> io::Result<()> {
    let (next, pending) = update(std::mem::take(state), msg);
    *state = next;
    effects.run(pending);
    if state.consume_dirty() {
        let screen = ui::render::render(&state.view());
        let mut stdout = io::stdout().lock();
        stdout.write_all(screen.as_bytes())?;
        stdout.write_all(b"> ")?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.write_all(b"> ")?;
    stdout.flush()
}

fn resolve_command(command: Command, state: &AppState) -> Action {
    let view = state.view();
    match command {
        Command::Search(text) => Action::Dispatch(Msg::SearchChanged {
            text,
            at: Instant::now(),
        }),
        Command::Year(year) => Action::Dispatch(Msg::YearSelected(year)),
        Command::SuccessOnly(switch) => Action::Dispatch(Msg::SuccessOnlyChanged(
            switch.apply(view.filters.success_only),
        )),
        Command::FavoritesOnly(switch) => Action::Dispatch(Msg::FavoritesOnlyChanged(
            switch.apply(view.filters.favorites_only),
        )),
        Command::Favorite(Some(target)) => match resolve_target(&target, &view) {
            Ok(id) => Action::Dispatch(Msg::FavoriteToggled { id }),
            Err(problem) => Action::Print(problem),
        },
        Command::Favorite(None) => match &view.detail {
            Some(DetailView::Record(record)) => Action::Dispatch(Msg::FavoriteToggled {
                id: record.id.clone(),
            }),
            _ => Action::Print("no launch is open; use fav <number|id>".to_string()),
        },
        Command::Open(target) => match resolve_target(&target, &view) {
            Ok(id) if state.records().iter().any(|record| record.id == id) => {
                Action::Dispatch(Msg::RecordSelected { id })
            }
            Ok(id) => Action::Dispatch(Msg::LookupRequested { id }),
            Err(problem) => Action::Print(problem),
        },
        Command::Lookup(id) => Action::Dispatch(Msg::LookupRequested { id }),
        Command::Close => Action::Dispatch(Msg::DetailClosed),
        Command::Page(page) => Action::Dispatch(Msg::PageRequested(page)),
        Command::Next => Action::Dispatch(Msg::NextPage),
        Command::Previous => Action::Dispatch(Msg::PreviousPage),
        Command::Reload => Action::Dispatch(Msg::ReloadRequested),
        Command::Help => Action::Print(ui::constants::HELP_TEXT.to_string()),
        Command::Quit => Action::Quit,
        Command::Empty => {
            engine_debug!("Empty command line");
            Action::Nothing
        }
    }
}

fn resolve_target(target: &Target, view: &AppViewModel) -> Result<String, String> {
    match target {
        Target::Id(id) => Ok(id.clone()),
        Target::Position(position) => position
            .checked_sub(1)
            .and_then(|index| view.cards.get(index))
            .map(|card| card.id.clone())
            .ok_or_else(|| format!("no card {position} on this page")),
    }
}

#[cfg(test)]
mod tests {
    use explorer_core::{Outcome, Record, RecordLinks};

    use super::super::input::Switch;
    use super::*;

    fn record(id: &str, name: &str) -> Record {
        Record {
            id: id.to_string(),
            name: name.to_string(),
            date_utc: "2021-03-04T05:06:07.000Z".to_string(),
            outcome: Outcome::Succeeded,
            details: None,
            rocket_name: "Falcon 9".to_string(),
            links: RecordLinks::default(),
        }
    }

    fn loaded() -> AppState {
        let (state, _) = update(AppState::new(), Msg::ReloadRequested);
        update(
            state,
            Msg::RecordsLoaded {
                request_id: 1,
                records: vec![record("a", "Mission Alpha"), record("b", "Mission Beta")],
            },
        )
        .0
    }

    #[test]
    fn positions_map_to_cards_on_the_page() {
        let state = loaded();
        assert_eq!(
            resolve_command(Command::Favorite(Some(Target::Position(2))), &state),
            Action::Dispatch(Msg::FavoriteToggled {
                id: "b".to_string()
            })
        );
        assert!(matches!(
            resolve_command(Command::Favorite(Some(Target::Position(3))), &state),
            Action::Print(_)
        ));
    }

    #[test]
    fn open_selects_known_records_and_looks_up_others() {
        let state = loaded();
        assert_eq!(
            resolve_command(Command::Open(Target::Position(1)), &state),
            Action::Dispatch(Msg::RecordSelected {
                id: "a".to_string()
            })
        );
        assert_eq!(
            resolve_command(Command::Open(Target::Id("zzz".to_string())), &state),
            Action::Dispatch(Msg::LookupRequested {
                id: "zzz".to_string()
            })
        );
    }

    #[test]
    fn favorite_without_target_uses_open_record() {
        let state = loaded();
        assert!(matches!(
            resolve_command(Command::Favorite(None), &state),
            Action::Print(_)
        ));

        let (state, _) = update(
            state,
            Msg::RecordSelected {
                id: "b".to_string(),
            },
        );
        assert_eq!(
            resolve_command(Command::Favorite(None), &state),
            Action::Dispatch(Msg::FavoriteToggled {
                id: "b".to_string()
            })
        );
    }

    #[test]
    fn switches_flip_current_filter_flags() {
        let state = loaded();
        assert_eq!(
            resolve_command(Command::SuccessOnly(Switch::Flip), &state),
            Action::Dispatch(Msg::SuccessOnlyChanged(true))
        );
        let (state, _) = update(state, Msg::FavoritesOnlyChanged(true));
        assert_eq!(
            resolve_command(Command::FavoritesOnly(Switch::Flip), &state),
            Action::Dispatch(Msg::FavoritesOnlyChanged(false))
        );
    }

    #[test]
    fn quit_and_help_do_not_touch_state() {
        let state = AppState::new();
        assert_eq!(resolve_command(Command::Quit, &state), Action::Quit);
        assert!(matches!(
            resolve_command(Command::Help, &state),
            Action::Print(_)
        ));
        assert_eq!(resolve_command(Command::Empty, &state), Action::Nothing);
    }
}
