use super::*;

fn page() -> Url {
    Url::parse("https://archive.org/download/nes-collection/").unwrap()
}

#[test]
fn resolves_protocol_relative_and_rooted_links() {
    let html = r#"
        <a href="//ia800.us.archive.org/1/items/x/Contra%20(USA).nes">Contra</a>
        <a href="/download/nes-collection/Tetris%20(World).gb">Tetris</a>
        <a class="dl" HREF='Mega%20Man%20(USA).NES'>Mega Man</a>
    "#;
    assert_eq!(
        extract_rom_links(html, &page()),
        vec![
            "https://ia800.us.archive.org/1/items/x/Contra%20(USA).nes",
            "https://archive.org/download/nes-collection/Tetris%20(World).gb",
            "https://archive.org/download/nes-collection/Mega%20Man%20(USA).NES",
        ]
    );
}

#[test]
fn keeps_only_rom_extensions() {
    let html = r#"
        <a href="/details/nes-collection">Details</a>
        <a href="/download/nes-collection/readme.txt">Readme</a>
        <a href="/download/nes-collection/Sonic.sms">Sonic</a>
        <a href="/download/nes-collection/Metroid.fds">Metroid</a>
        <a href="/download/nes-collection/archive.zip">All</a>
    "#;
    let links = extract_rom_links(html, &page());
    assert_eq!(
        links,
        vec![
            "https://archive.org/download/nes-collection/Sonic.sms",
            "https://archive.org/download/nes-collection/Metroid.fds",
        ]
    );
}

#[test]
fn duplicate_links_collapse() {
    let html = r#"<a href="/a/Zelda.nes">x</a><a href="https://archive.org/a/Zelda.nes">y</a>"#;
    assert_eq!(extract_rom_links(html, &page()), vec!["https://archive.org/a/Zelda.nes"]);
}

#[test]
fn query_string_does_not_hide_extension() {
    let html = r#"<a href="/a/Zelda.nes?download=1&amp;x=2">x</a>"#;
    assert_eq!(
        extract_rom_links(html, &page()),
        vec!["https://archive.org/a/Zelda.nes?download=1&x=2"]
    );
}

#[test]
fn catalog_json_loads_back_as_one_system() {
    let links = vec![
        "https://archive.org/a/Zelda.nes".to_string(),
        "https://archive.org/a/Metroid.nes".to_string(),
    ];
    let json = catalog_json("NES", &links);
    let catalog = retbro_core::Catalog::from_json_str(&json).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.systems()[0].name, "NES");
    assert_eq!(catalog.systems()[0].title_urls(), links.as_slice());
}
