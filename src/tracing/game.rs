// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{collections::HashMap, fmt::Debug, io::Write, sync::Mutex, time::SystemTime};

use derive_more::From;
use serde::{Deserialize, Serialize};
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{layer::Context, Layer};

use crate::tracing::constants;

/// One line of a game log.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameLogEvent {
    pub timestamp: SystemTime,
    pub kind: GameEventKind,
}

#[derive(Debug, Serialize, Deserialize, From)]
pub enum GameEventKind {
    GameStart(GameStartEvent),
    Move(MoveEvent),
    Explosion(ExplosionEvent),
    GameOver(GameOverEvent),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameStartEvent {
    pub fen: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MoveEvent {
    pub side: String,
    pub mov: String,
    pub piece: String,
    pub captured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExplosionEvent {
    pub center: String,
    /// Destroyed pieces as letter and square, separated by spaces.
    pub destroyed: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameOverEvent {
    pub outcome: String,
    pub fen: String,
}

/// The GameLogLayer is a Layer that understands the instrumentation in the game and explosion routines and writes
/// every move, explosion and result it sees as one JSON object per line. It does no analysis of its own; the log is
/// meant to be read back later, e.g. by `atomic-analyze`.
pub struct GameLogLayer {
    writer: Box<Mutex<dyn Write + Send + Sync>>,
}

impl GameLogLayer {
    pub fn new<W: Write + 'static + Send + Sync>(dest: W) -> GameLogLayer {
        GameLogLayer {
            writer: Box::new(Mutex::new(dest)),
        }
    }

    fn record_event<T: Into<GameEventKind>>(&self, kind: T) {
        let event = GameLogEvent {
            timestamp: SystemTime::now(),
            kind: kind.into(),
        };

        // A failing log sink must never take the game down with it.
        if let Ok(mut writer) = self.writer.lock() {
            if serde_json::to_writer(&mut *writer, &event).is_ok() {
                let _ = writeln!(&mut *writer);
            }
        }
    }

    fn on_game_start(&self, mut attrs: HashMap<String, String>) {
        self.record_event(GameStartEvent {
            fen: attrs.remove("fen").unwrap_or_default(),
        });
    }

    fn on_move_made(&self, mut attrs: HashMap<String, String>) {
        self.record_event(MoveEvent {
            side: attrs.remove("side").unwrap_or_default(),
            mov: attrs.remove("mov").unwrap_or_default(),
            piece: attrs.remove("piece").unwrap_or_default(),
            captured: attrs
                .get("captured")
                .and_then(|c| c.parse().ok())
                .unwrap_or(false),
        });
    }

    fn on_explosion(&self, mut attrs: HashMap<String, String>) {
        self.record_event(ExplosionEvent {
            center: attrs.remove("center").unwrap_or_default(),
            destroyed: attrs.remove("destroyed").unwrap_or_default(),
        });
    }

    fn on_game_over(&self, mut attrs: HashMap<String, String>) {
        self.record_event(GameOverEvent {
            outcome: attrs.remove("outcome").unwrap_or_default(),
            fen: attrs.remove("fen").unwrap_or_default(),
        });

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

impl<S: Subscriber> Layer<S> for GameLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let attrs = event.extract_fields();
        // Not all events have `event` keys (e.g. rejected moves or mundane logs from other crates).
        // Ignore the ones we don't care about.
        let kind = match attrs.get("event") {
            Some(kind) => kind.clone(),
            None => return,
        };

        match kind.as_str() {
            constants::GAME_START => self.on_game_start(attrs),
            constants::MOVE_MADE => self.on_move_made(attrs),
            constants::EXPLOSION => self.on_explosion(attrs),
            constants::GAME_OVER => self.on_game_over(attrs),
            _ => {}
        }
    }
}

trait HasExtractableFields {
    fn extract_fields(&self) -> HashMap<String, String>;
}

impl HasExtractableFields for Event<'_> {
    fn extract_fields(&self) -> HashMap<String, String> {
        let mut extractor = HashMapExtractor(HashMap::new());
        self.record(&mut extractor);
        extractor.0
    }
}

struct HashMapExtractor(HashMap<String, String>);
impl Visit for HashMapExtractor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0
            .insert(field.name().to_owned(), format!("{:?}", value));
    }
}
