use super::*;

#[test]
fn parses_keys_and_pointer_lines() {
    assert_eq!(parse_input("  left "), Ok(Some(BrowseInput::Key(Key::Left))));
    assert_eq!(parse_input("ESC"), Ok(Some(BrowseInput::Key(Key::Escape))));
    assert_eq!(parse_input("hover 3"), Ok(Some(BrowseInput::Hover(2))));
    assert_eq!(parse_input("click #1"), Ok(Some(BrowseInput::Click(0))));
    assert_eq!(parse_input(""), Ok(None));
    assert_eq!(parse_input("q"), Ok(Some(BrowseInput::Quit)));
}

#[test]
fn slash_sets_filter_verbatim() {
    assert_eq!(
        parse_input("/mega man"),
        Ok(Some(BrowseInput::Filter("mega man".to_string())))
    );
    assert_eq!(parse_input("/"), Ok(Some(BrowseInput::Filter(String::new()))));
}

#[test]
fn rejects_bad_lines() {
    assert!(parse_input("hover").is_err());
    assert!(parse_input("click 0").is_err());
    assert!(parse_input("pad 1").is_err());
    assert!(parse_input("press x").is_err());
    assert!(parse_input("jump").is_err());
}

#[test]
fn pad_values_are_clamped() {
    assert_eq!(
        parse_input("pad 2 -0.5"),
        Ok(Some(BrowseInput::Stick { x: 1.0, y: -0.5 }))
    );
    assert_eq!(parse_input("press 9"), Ok(Some(BrowseInput::Press(9))));
}

#[test]
fn virtual_pad_taps_once() {
    let mut pad = VirtualPad::default();
    assert_eq!(pad.sample(), None);

    pad.set_stick(0.9, 0.0);
    pad.tap(0);
    let first = pad.sample().unwrap();
    assert_eq!(first.axes, [0.9, 0.0]);
    assert_eq!(first.buttons, vec![true]);

    let second = pad.sample().unwrap();
    assert_eq!(second.axes, [0.9, 0.0]);
    assert!(second.buttons.is_empty());
}

#[test]
fn clicking_a_title_hovers_it_first() {
    let input = InputUnifier::new(retbro_lib::GamepadConfig::default());
    assert_eq!(
        pointer_commands(&input, 2, true, Mode::Overlay),
        vec![Command::SelectTitle(2), Command::Launch]
    );
    assert_eq!(
        pointer_commands(&input, 1, true, Mode::Browsing),
        vec![Command::Open(Some(1))]
    );
    assert_eq!(
        pointer_commands(&input, 1, false, Mode::Browsing),
        vec![Command::SelectSystem(1)]
    );
}
