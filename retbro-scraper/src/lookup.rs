use crate::types::GameRecord;

/// How a candidate game was matched against the lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// One of the game's names equals the key, ignoring case
    Exact,
    /// One of the game's names contains the key, ignoring case
    Contains,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchTier::Exact => write!(f, "exact"),
            MatchTier::Contains => write!(f, "contains"),
        }
    }
}

/// Result of a successful match.
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub game: GameRecord,
    pub tier: MatchTier,
}

/// Pick the best candidate for a lookup key using the two-tier policy.
///
/// 1. Exact match: the first candidate with a name equal to the key
///    (case-insensitive) wins, wherever it sits in the list.
/// 2. Substring match: otherwise the first candidate with a name containing
///    the key wins.
///
/// Returns `None` when neither tier matches, or when the key is empty.
pub fn select_match(candidates: Vec<GameRecord>, lookup_key: &str) -> Option<LookupResult> {
    let needle = lookup_key.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let names: Vec<Vec<String>> = candidates
        .iter()
        .map(|game| game.all_names().iter().map(|n| n.to_lowercase()).collect())
        .collect();

    let exact = names
        .iter()
        .position(|game_names| game_names.iter().any(|n| *n == needle));
    let (index, tier) = match exact {
        Some(i) => (i, MatchTier::Exact),
        None => {
            let i = names
                .iter()
                .position(|game_names| game_names.iter().any(|n| n.contains(&needle)))?;
            (i, MatchTier::Contains)
        }
    };

    candidates
        .into_iter()
        .nth(index)
        .map(|game| LookupResult { game, tier })
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
