//! Tolerant decoders for provider responses.
//!
//! Providers disagree on almost everything: a game may arrive as an object
//! or a one-element array, names may be a plain string or a list of
//! region-tagged strings, French and English field names both occur, and
//! numbers show up where strings are expected. Each of those variations is
//! a variant here, so normalization downstream only deals with one model.
//!
//! Fields that fail to decode are dropped individually (see [`lenient`])
//! rather than failing the whole game.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

use crate::error::ScrapeError;

/// Region and language tags tried in order when picking localized text.
pub const PREFERRED_TAGS: &[&str] = &["en", "us", "wor", "ss", "eu"];

/// Decode a field, turning a type mismatch into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`], for list fields that default to empty.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(lenient::<D, OneOrMany<T>>(deserializer)?
        .map(OneOrMany::into_vec)
        .unwrap_or_default())
}

/// A value that may be a single item or a list of items.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Text tagged with a region (`us`, `jp`, `wor`...) or a language (`en`, `fr`...).
#[derive(Debug, Clone, Deserialize)]
pub struct TaggedText {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub langue: Option<String>,
    pub text: String,
}

impl TaggedText {
    fn tag(&self) -> Option<&str> {
        self.region.as_deref().or(self.langue.as_deref())
    }
}

/// Pick the text for the first preferred tag, else the first entry.
pub fn pick_tagged(entries: &[TaggedText]) -> Option<&str> {
    PREFERRED_TAGS
        .iter()
        .find_map(|pref| entries.iter().find(|e| e.tag() == Some(*pref)))
        .or_else(|| entries.first())
        .map(|e| e.text.as_str())
}

/// Object carrying its text under one of several keys.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedText {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Any of the ways a provider spells a single piece of text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Plain(String),
    Number(Number),
    Tagged(Vec<TaggedText>),
    Named(NamedText),
}

impl TextValue {
    /// Best single string for this value, trimmed; `None` when empty.
    pub fn best(&self) -> Option<String> {
        let text = match self {
            Self::Plain(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Tagged(entries) => pick_tagged(entries)?.to_string(),
            Self::Named(named) => named
                .text
                .clone()
                .or_else(|| named.nom.clone())
                .or_else(|| named.name.clone())?,
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// One genre, in any of the shapes providers use.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GenreValue {
    Plain(String),
    Localized { noms: Vec<TaggedText> },
    Named(NamedText),
}

impl GenreValue {
    pub fn best(&self) -> Option<String> {
        match self {
            Self::Plain(s) => TextValue::Plain(s.clone()).best(),
            Self::Localized { noms } => pick_tagged(noms).map(|s| s.trim().to_string()),
            Self::Named(named) => TextValue::Named(named.clone()).best(),
        }
    }
}

/// A media asset reference (cover, screenshot, marquee...).
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// One game as described by any supported provider.
///
/// Fields hold the merged value of every spelling a provider may use, so a
/// payload carrying both `nom` and `name` decodes instead of failing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawGameRecord")]
pub struct GameRecord {
    pub noms: Vec<TaggedText>,
    pub name: Option<TextValue>,
    pub description: Option<TextValue>,
    pub media: Vec<Media>,
    pub genres: Vec<GenreValue>,
    pub genre: Option<TextValue>,
    pub system: Option<TextValue>,
    pub developer: Option<TextValue>,
    pub publisher: Option<TextValue>,
    pub players: Option<TextValue>,
    pub dates: Vec<TaggedText>,
    pub year: Option<TextValue>,
}

/// Wire form of [`GameRecord`]: one field per spelling.
#[derive(Debug, Default, Deserialize)]
struct RawGameRecord {
    #[serde(default, deserialize_with = "lenient_vec")]
    noms: Vec<TaggedText>,
    #[serde(default, deserialize_with = "lenient")]
    name: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    nom: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    synopsis: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    overview: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    desc: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient_vec")]
    media: Vec<Media>,
    #[serde(default, deserialize_with = "lenient_vec")]
    medias: Vec<Media>,
    #[serde(default, deserialize_with = "lenient_vec")]
    genres: Vec<GenreValue>,
    #[serde(default, deserialize_with = "lenient")]
    genre: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    system: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    systeme: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    developer: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    developpeur: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    publisher: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    editeur: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    players: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    joueurs: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient_vec")]
    dates: Vec<TaggedText>,
    #[serde(default, deserialize_with = "lenient")]
    year: Option<TextValue>,
    #[serde(default, deserialize_with = "lenient")]
    annee: Option<TextValue>,
}

/// First spelling that yields usable text, else the first one present.
fn first_text<const N: usize>(spellings: [Option<TextValue>; N]) -> Option<TextValue> {
    let position = spellings
        .iter()
        .position(|v| v.as_ref().and_then(TextValue::best).is_some())
        .or_else(|| spellings.iter().position(Option::is_some))?;
    spellings.into_iter().nth(position).flatten()
}

impl From<RawGameRecord> for GameRecord {
    fn from(raw: RawGameRecord) -> Self {
        let media = if raw.media.is_empty() {
            raw.medias
        } else {
            raw.media
        };
        Self {
            noms: raw.noms,
            name: first_text([raw.name, raw.nom, raw.title]),
            description: first_text([raw.description, raw.synopsis, raw.overview, raw.desc]),
            media,
            genres: raw.genres,
            genre: raw.genre,
            system: first_text([raw.system, raw.systeme]),
            developer: first_text([raw.developer, raw.developpeur]),
            publisher: first_text([raw.publisher, raw.editeur]),
            players: first_text([raw.players, raw.joueurs]),
            dates: raw.dates,
            year: first_text([raw.year, raw.annee]),
        }
    }
}

impl GameRecord {
    /// Preferred display name: region-tagged names first, then a plain name.
    pub fn primary_name(&self) -> Option<String> {
        pick_tagged(&self.noms)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_ref().and_then(TextValue::best))
    }

    /// Every name this game is known by, for matching.
    pub fn all_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .noms
            .iter()
            .map(|n| n.text.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        if let Some(name) = self.name.as_ref().and_then(TextValue::best) {
            names.push(name);
        }
        names
    }
}

/// `{ "response": { "jeu": ... } }` as returned by ScreenScraper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub response: EnvelopeBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopeBody {
    #[serde(default)]
    pub jeu: Option<OneOrMany<GameRecord>>,
    #[serde(default)]
    pub jeux: Vec<GameRecord>,
}

/// Top-level response, told apart by shape: an array is a listing, an
/// object with `response` is a ScreenScraper envelope, any other object is
/// a single game.
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    /// ScreenScraper envelope holding one game or a list.
    ScreenScraper(Envelope),
    /// Bare list of games.
    Listing(Vec<GameRecord>),
    /// A single game object.
    Single(GameRecord),
}

impl<'de> Deserialize<'de> for ProviderPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl ProviderPayload {
    pub fn decode(text: &str) -> Result<Self, ScrapeError> {
        serde_json::from_str(text).map_err(|e| {
            ScrapeError::api(format!(
                "{e}. Response: {}",
                text.chars().take(200).collect::<String>()
            ))
        })
    }

    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let envelope = value.get("response").is_some();
        match value {
            Value::Array(_) => serde_json::from_value(value).map(Self::Listing),
            Value::Object(_) if envelope => serde_json::from_value(value).map(Self::ScreenScraper),
            Value::Object(_) => serde_json::from_value(value).map(Self::Single),
            other => Err(serde::de::Error::custom(format!(
                "expected a game object or list, found {}",
                kind(&other)
            ))),
        }
    }

    /// Candidate games in response order.
    pub fn into_candidates(self) -> Vec<GameRecord> {
        match self {
            Self::ScreenScraper(envelope) => {
                let mut games = envelope
                    .response
                    .jeu
                    .map(OneOrMany::into_vec)
                    .unwrap_or_default();
                games.extend(envelope.response.jeux);
                games
            }
            Self::Listing(games) => games,
            Self::Single(game) => vec![game],
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
