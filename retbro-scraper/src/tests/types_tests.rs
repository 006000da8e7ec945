use super::*;

const SCREENSCRAPER_SINGLE: &str = r#"{
  "header": {"success": "true"},
  "response": {
    "ssuser": {"id": "demo", "requeststoday": "3"},
    "jeu": {
      "id": "1234",
      "noms": [
        {"region": "jp", "text": "Rockman"},
        {"region": "us", "text": "Mega Man"}
      ],
      "synopsis": [
        {"langue": "fr", "text": "Un robot bleu."},
        {"langue": "en", "text": "A blue robot."}
      ],
      "systeme": {"id": "3", "text": "NES"},
      "developpeur": {"id": "1", "text": "Capcom"},
      "editeur": {"id": "1", "text": "Capcom"},
      "joueurs": {"text": "1"},
      "dates": [{"region": "us", "text": "1987-12-17"}],
      "genres": [
        {"id": "7", "noms": [{"langue": "fr", "text": "Plateforme"}, {"langue": "en", "text": "Platform"}]}
      ],
      "medias": [
        {"type": "ss", "url": "https://ss/1.png", "region": "wor"},
        {"type": "box-2D", "url": "https://box/us.png", "region": "us"}
      ]
    }
  }
}"#;

#[test]
fn decodes_screenscraper_envelope() {
    let payload = ProviderPayload::decode(SCREENSCRAPER_SINGLE).unwrap();
    assert!(matches!(payload, ProviderPayload::ScreenScraper(_)));

    let games = payload.into_candidates();
    assert_eq!(games.len(), 1);
    let game = &games[0];
    assert_eq!(game.primary_name().as_deref(), Some("Mega Man"));
    assert_eq!(game.all_names(), vec!["Rockman", "Mega Man"]);
    assert_eq!(
        game.description.as_ref().and_then(TextValue::best).as_deref(),
        Some("A blue robot.")
    );
    assert_eq!(game.media.len(), 2);
    assert_eq!(game.genres[0].best().as_deref(), Some("Platform"));
    assert_eq!(
        game.developer.as_ref().and_then(TextValue::best).as_deref(),
        Some("Capcom")
    );
}

#[test]
fn decodes_envelope_with_game_array() {
    let text = r#"{"response": {"jeu": [{"nom": "Contra"}, {"nom": "Super C"}]}}"#;
    let games = ProviderPayload::decode(text).unwrap().into_candidates();
    let names: Vec<_> = games.iter().filter_map(GameRecord::primary_name).collect();
    assert_eq!(names, vec!["Contra", "Super C"]);
}

#[test]
fn decodes_flat_listing_with_english_fields() {
    let text = r#"[{
        "name": "Metroid",
        "overview": "Samus explores Zebes.",
        "system": {"name": "NES"},
        "developer": {"name": "Nintendo R&D1"},
        "publisher": "Nintendo",
        "players": 1,
        "year": 1986,
        "genres": [{"name": "Action"}, "Adventure"],
        "media": {"type": "boxart", "url": "https://img/metroid.png"}
    }]"#;
    let payload = ProviderPayload::decode(text).unwrap();
    assert!(matches!(payload, ProviderPayload::Listing(_)));

    let game = payload.into_candidates().remove(0);
    assert_eq!(game.primary_name().as_deref(), Some("Metroid"));
    assert_eq!(game.players.as_ref().and_then(TextValue::best).as_deref(), Some("1"));
    assert_eq!(game.year.as_ref().and_then(TextValue::best).as_deref(), Some("1986"));
    let genres: Vec<_> = game.genres.iter().filter_map(GenreValue::best).collect();
    assert_eq!(genres, vec!["Action", "Adventure"]);
    assert_eq!(game.media.len(), 1);
    assert_eq!(game.media[0].url, "https://img/metroid.png");
}

#[test]
fn decodes_single_object() {
    let payload = ProviderPayload::decode(r#"{"title": "Kirby's Adventure"}"#).unwrap();
    assert!(matches!(payload, ProviderPayload::Single(_)));
    let game = payload.into_candidates().remove(0);
    assert_eq!(game.primary_name().as_deref(), Some("Kirby's Adventure"));
}

#[test]
fn mistyped_fields_are_dropped_not_fatal() {
    let text = r#"{"nom": "Zelda", "joueurs": true, "medias": "nope", "genres": 5}"#;
    let game = ProviderPayload::decode(text).unwrap().into_candidates().remove(0);
    assert_eq!(game.primary_name().as_deref(), Some("Zelda"));
    assert!(game.players.is_none());
    assert!(game.media.is_empty());
    assert!(game.genres.is_empty());
}

#[test]
fn non_json_is_an_api_error() {
    let err = ProviderPayload::decode("Erreur : Rom/Iso/Dossier non trouvée !").unwrap_err();
    assert!(matches!(err, ScrapeError::Api(_)));
}

#[test]
fn pick_tagged_prefers_english_then_first() {
    let entries = vec![
        TaggedText { region: Some("jp".into()), langue: None, text: "A".into() },
        TaggedText { region: Some("wor".into()), langue: None, text: "B".into() },
    ];
    assert_eq!(pick_tagged(&entries), Some("B"));

    let only_jp = vec![TaggedText { region: Some("jp".into()), langue: None, text: "A".into() }];
    assert_eq!(pick_tagged(&only_jp), Some("A"));
    assert_eq!(pick_tagged(&[]), None);
}

#[test]
fn blank_text_is_none() {
    assert_eq!(TextValue::Plain("   ".into()).best(), None);
}

#[test]
fn one_element_listing_is_a_listing() {
    let payload = ProviderPayload::decode(r#"[{"name": "Mega Man"}]"#).unwrap();
    assert!(matches!(payload, ProviderPayload::Listing(_)));
    let names: Vec<_> = payload
        .into_candidates()
        .iter()
        .filter_map(GameRecord::primary_name)
        .collect();
    assert_eq!(names, vec!["Mega Man"]);
}

#[test]
fn scalar_payload_is_an_api_error() {
    let err = ProviderPayload::decode("42").unwrap_err();
    assert!(matches!(err, ScrapeError::Api(_)));
}

#[test]
fn both_name_spellings_decode() {
    let text = r#"{"response": {"jeu": {"nom": "Rockman", "name": "Mega Man", "title": ""}}}"#;
    let game = ProviderPayload::decode(text).unwrap().into_candidates().remove(0);
    assert_eq!(game.primary_name().as_deref(), Some("Mega Man"));
}

#[test]
fn blank_spelling_falls_through_to_the_next() {
    let game = ProviderPayload::decode(r#"{"name": " ", "nom": "Contra"}"#)
        .unwrap()
        .into_candidates()
        .remove(0);
    assert_eq!(game.primary_name().as_deref(), Some("Contra"));
}

#[test]
fn description_prefers_description_over_overview() {
    let text = r#"[{
        "name": "Metroid",
        "description": "Bounty hunter on Zebes.",
        "overview": "Samus explores Zebes.",
        "year": 1986,
        "annee": "1987",
        "media": [],
        "medias": {"type": "ss", "url": "https://ss/metroid.png"}
    }]"#;
    let game = ProviderPayload::decode(text).unwrap().into_candidates().remove(0);
    assert_eq!(
        game.description.as_ref().and_then(TextValue::best).as_deref(),
        Some("Bounty hunter on Zebes.")
    );
    assert_eq!(game.year.as_ref().and_then(TextValue::best).as_deref(), Some("1986"));
    assert_eq!(game.media.len(), 1);
    assert_eq!(game.media[0].url, "https://ss/metroid.png");
}
