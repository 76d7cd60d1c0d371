//! Turns "number called" events into speech requests.
//!
//! The narrator owns voice selection and its fallback. Speech failures are
//! logged and dropped; they never reach the game.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::words;
use crate::core::{BallNumber, Language};
use crate::game::GameEvent;

/// Language used when no voice matches the round's language.
pub const FALLBACK_LANG: &str = "en-US";

/// Voice vendors preferred when several voices match.
const PREFERRED_VENDORS: [&str; 2] = ["Google", "Microsoft"];

#[derive(Error, Debug)]
pub enum NarrationError {
    #[error("speech engine unavailable")]
    Unavailable,
    #[error("speech failed: {0}")]
    Failed(String),
}

/// A voice offered by the speech engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag, e.g. `am-ET`.
    pub lang: String,
    /// The engine's default voice.
    #[serde(default)]
    pub is_default: bool,
}

/// One announcement for the speech engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Utterance {
    pub text: String,
    pub language_tag: String,
    /// Name of the chosen voice; `None` lets the engine pick.
    pub voice: Option<String>,
}

/// Where announcements go.
pub trait NarrationSink: Send {
    /// Voices currently available. May be empty.
    fn voices(&self) -> Vec<Voice>;

    fn speak(&mut self, utterance: &Utterance) -> Result<(), NarrationError>;

    /// Stop any speech in progress.
    fn cancel(&mut self);
}

/// Sink that writes announcements to the log. Has no voices.
#[derive(Clone, Debug, Default)]
pub struct LogSink;

impl NarrationSink for LogSink {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), NarrationError> {
        info!(text = %utterance.text, lang = %utterance.language_tag, "announce");
        Ok(())
    }

    fn cancel(&mut self) {}
}

/// Text spoken for a call, e.g. `B. 5.` or, in Amharic, `B. አምስት.`
#[must_use]
pub fn announcement_text(number: BallNumber, language: Language) -> String {
    let spoken = match language {
        Language::Amharic => words::amharic(number.value()).unwrap_or_else(|| number.to_string()),
        Language::English | Language::Tigrinya => number.to_string(),
    };
    format!("{}. {}.", number.category(), spoken)
}

/// Pick a voice for `language`.
///
/// A voice qualifies when its tag starts with the language subtag and it is
/// from a preferred vendor or the engine default. With no match, returns
/// `None` and the caller speaks with [`FALLBACK_LANG`].
#[must_use]
pub fn select_voice(voices: &[Voice], language: Language) -> Option<&Voice> {
    let prefix = language.tag();
    voices.iter().find(|voice| {
        voice.lang.starts_with(prefix)
            && (voice.is_default || PREFERRED_VENDORS.iter().any(|v| voice.name.contains(v)))
    })
}

/// Subscribes to game events and announces each call.
pub struct Narrator {
    sink: Box<dyn NarrationSink>,
    language: Language,
}

impl Narrator {
    pub fn new(sink: impl NarrationSink + 'static, language: Language) -> Self {
        Self {
            sink: Box::new(sink),
            language,
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Build the utterance for a call, choosing a voice.
    #[must_use]
    pub fn utterance(&self, number: BallNumber) -> Utterance {
        let text = announcement_text(number, self.language);
        let voices = self.sink.voices();
        match select_voice(&voices, self.language) {
            Some(voice) => Utterance {
                text,
                language_tag: voice.lang.clone(),
                voice: Some(voice.name.clone()),
            },
            None => {
                warn!(
                    language = self.language.tag(),
                    fallback = FALLBACK_LANG,
                    "no voice for narration language"
                );
                Utterance {
                    text,
                    language_tag: FALLBACK_LANG.to_string(),
                    voice: None,
                }
            }
        }
    }

    /// React to one game event.
    pub fn handle(&mut self, event: &GameEvent) {
        if event.silences_narration() {
            self.sink.cancel();
            return;
        }

        if let Some(number) = event.called_number() {
            // Cut off the previous call so announcements never overlap
            self.sink.cancel();
            let utterance = self.utterance(number);
            if let Err(err) = self.sink.speak(&utterance) {
                warn!(error = %err, text = %utterance.text, "narration failed");
            }
        }
    }
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}
