use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use explorer_core::{Effect, Msg, RecordId};
use explorer_engine::{EngineEvent, EngineHandle};

use super::app::Event;
use super::persistence::{open_favorites, save_favorites, AppFavoritesStore};
use crate::config::AppConfig;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct EffectRunner {
    engine: EngineHandle,
    favorites: AppFavoritesStore,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, events: mpsc::Sender<Event>) -> std::io::Result<Self> {
        let engine = EngineHandle::new(config.fetch.clone())?;
        let favorites = open_favorites(&config.data_dir);
        let runner = Self { engine, favorites };
        runner.spawn_event_loop(events);
        Ok(runner)
    }

    pub fn persisted_favorites(&self) -> Vec<RecordId> {
        self.favorites.all().ids_sorted()
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchAll { request_id } => {
                    engine_info!("FetchAll request_id={}", request_id);
                    self.engine.fetch_all(request_id);
                }
                Effect::FetchOne { request_id, id } => {
                    engine_info!("FetchOne request_id={} id={}", request_id, id);
                    self.engine.fetch_one(request_id, id);
                }
                Effect::PersistFavorites { ids } => {
                    save_favorites(&mut self.favorites, ids);
                }
            }
        }
    }

    fn spawn_event_loop(&self, events: mpsc::Sender<Event>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            pump_events(|| engine.recv_timeout(EVENT_POLL_INTERVAL), &events);
        });
    }
}

/// Forwards engine events until the engine or the main loop goes away.
fn pump_events<F>(mut next: F, events: &mpsc::Sender<Event>)
where
    F: FnMut() -> Result<EngineEvent, RecvTimeoutError>,
{
    loop {
        match next() {
            Ok(event) => {
                if events.send(Event::Msg(map_event(event))).is_err() {
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                engine_warn!("Engine event channel closed");
                return;
            }
        }
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AllFetched { request_id, result } => match result {
            Ok(records) => Msg::RecordsLoaded {
                request_id,
                records,
            },
            Err(err) => {
                engine_warn!("Request {} failed: {}", request_id, err);
                Msg::RecordsFailed {
                    request_id,
                    message: err.message,
                }
            }
        },
        EngineEvent::OneFetched {
            request_id,
            id,
            result,
        } => match result {
            Ok(record) => Msg::LookupResolved { request_id, record },
            Err(err) => {
                engine_warn!("Lookup {} for {} failed: {}", request_id, id, err);
                Msg::LookupFailed {
                    request_id,
                    message: err.message,
                }
            }
        },
    }
}
