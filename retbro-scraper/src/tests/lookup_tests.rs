use super::*;
use crate::types::TextValue;

fn game(name: &str) -> GameRecord {
    GameRecord {
        name: Some(TextValue::Plain(name.to_string())),
        ..Default::default()
    }
}

fn picked(result: Option<LookupResult>) -> Option<(String, MatchTier)> {
    result.map(|r| (r.game.primary_name().unwrap_or_default(), r.tier))
}

#[test]
fn exact_match_wins_over_earlier_substring() {
    let candidates = vec![game("Mega Man 2"), game("mega man"), game("Mega Man X")];
    assert_eq!(
        picked(select_match(candidates, "Mega Man")),
        Some(("mega man".to_string(), MatchTier::Exact))
    );
}

#[test]
fn first_substring_match_when_no_exact() {
    let candidates = vec![game("Contra"), game("Mega Man 3"), game("Mega Man 2")];
    assert_eq!(
        picked(select_match(candidates, "mega man")),
        Some(("Mega Man 3".to_string(), MatchTier::Contains))
    );
}

#[test]
fn no_match_returns_none() {
    let candidates = vec![game("Contra"), game("Gradius")];
    assert!(select_match(candidates, "Metroid").is_none());
}

#[test]
fn empty_key_never_matches() {
    assert!(select_match(vec![game("Contra")], "  ").is_none());
}

#[test]
fn alternate_region_names_are_considered() {
    let text = r#"{"response": {"jeu": {"noms": [
        {"region": "us", "text": "Mega Man"},
        {"region": "jp", "text": "Rockman"}
    ]}}}"#;
    let candidates = crate::types::ProviderPayload::decode(text)
        .unwrap()
        .into_candidates();
    let result = select_match(candidates, "rockman").unwrap();
    assert_eq!(result.tier, MatchTier::Exact);
    assert_eq!(result.game.primary_name().as_deref(), Some("Mega Man"));
}

#[test]
fn tier_display() {
    assert_eq!(MatchTier::Exact.to_string(), "exact");
    assert_eq!(MatchTier::Contains.to_string(), "contains");
}
