//! Conversion of a decoded provider game into the canonical [`MetadataRecord`].

use std::collections::BTreeSet;

use retbro_core::metadata::{MAX_SCREENSHOTS, NO_DESCRIPTION, or_unknown};
use retbro_core::{MetadataRecord, PlaceholderImages};

use crate::types::{GameRecord, GenreValue, Media, TextValue, pick_tagged};

/// Media type fragments that identify a cover, most specific first.
const COVER_TYPES: &[&str] = &["box-2d", "box", "boxart", "cover", "2d"];

/// Media types that are screenshots outright (ScreenScraper codes).
const SCREENSHOT_CODES: &[&str] = &["ss", "sstitle"];

/// Media type fragments that identify a screenshot.
const SCREENSHOT_TYPES: &[&str] = &["screen", "title", "in-game", "ingame"];

fn text(value: &Option<TextValue>) -> Option<String> {
    value.as_ref().and_then(TextValue::best)
}

fn is_usable(media: &Media) -> bool {
    !media.url.trim().is_empty()
}

/// First cover image, honouring the type priority order.
pub fn cover_url(media: &[Media]) -> Option<String> {
    COVER_TYPES.iter().find_map(|wanted| {
        media
            .iter()
            .filter(|m| is_usable(m))
            .find(|m| m.media_type.to_lowercase().contains(wanted))
            .map(|m| m.url.clone())
    })
}

/// Screenshot URLs in response order, without duplicates, capped at
/// [`MAX_SCREENSHOTS`].
pub fn screenshot_urls(media: &[Media]) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    for m in media.iter().filter(|m| is_usable(m)) {
        let kind = m.media_type.to_lowercase();
        let is_shot = SCREENSHOT_CODES.contains(&kind.as_str())
            || SCREENSHOT_TYPES.iter().any(|t| kind.contains(t));
        if is_shot && !urls.contains(&m.url) {
            urls.push(m.url.clone());
        }
        if urls.len() == MAX_SCREENSHOTS {
            break;
        }
    }
    urls
}

fn genres(game: &GameRecord) -> BTreeSet<String> {
    let mut set: BTreeSet<String> = game
        .genres
        .iter()
        .filter_map(GenreValue::best)
        .filter(|g| !g.is_empty())
        .collect();
    if let Some(single) = text(&game.genre) {
        set.insert(single);
    }
    set
}

/// Release year: the explicit year field, else the preferred release date.
/// Dates such as `1987-12-17` are cut to their year.
fn year(game: &GameRecord) -> Option<String> {
    let raw = text(&game.year).or_else(|| pick_tagged(&game.dates).map(str::to_string))?;
    let raw = raw.trim();
    let digits: String = raw.chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(digits)
    } else {
        Some(raw.to_string())
    }
}

/// Build the canonical record for a matched game.
///
/// `display_name` is used when the game carries no name; `lookup_key` seeds
/// the placeholder cover when it has no box art.
pub fn to_record(
    game: &GameRecord,
    display_name: &str,
    lookup_key: &str,
    placeholders: &PlaceholderImages,
) -> MetadataRecord {
    MetadataRecord {
        name: game
            .primary_name()
            .unwrap_or_else(|| display_name.to_string()),
        description: text(&game.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        cover_image_url: cover_url(&game.media)
            .unwrap_or_else(|| placeholders.cover_for(lookup_key)),
        screenshots: screenshot_urls(&game.media),
        system: or_unknown(text(&game.system)),
        genres: genres(game),
        developer: or_unknown(text(&game.developer)),
        publisher: or_unknown(text(&game.publisher)),
        players: or_unknown(text(&game.players)),
        year: or_unknown(year(game)),
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
