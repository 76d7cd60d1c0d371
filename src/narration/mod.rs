//! Call narration.
//!
//! Narration listens to `GameEvent::NumberCalled` and nothing else feeds
//! back into the game. The speech engine sits behind `NarrationSink`.

pub mod narrator;
mod words;

pub use narrator::{
    announcement_text, select_voice, LogSink, NarrationError, NarrationSink, Narrator, Utterance,
    Voice, FALLBACK_LANG,
};
