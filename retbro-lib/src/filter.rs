use retbro_core::Title;

/// Normalize a search query the way [`apply_filter`] compares it.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Indices of the titles whose display name contains `query`, ignoring case.
///
/// The result keeps catalog order; an empty query keeps every title.
pub fn apply_filter(query: &str, titles: &[Title]) -> Vec<usize> {
    let needle = normalize_query(query);
    titles
        .iter()
        .enumerate()
        .filter(|(_, t)| needle.is_empty() || t.display_name.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(urls: &[&str]) -> Vec<Title> {
        urls.iter().map(|u| Title::from_url(*u)).collect()
    }

    #[test]
    fn case_insensitive_substring() {
        let list = titles(&["roms/Mega Man (USA).nes", "roms/Contra (USA).nes"]);
        assert_eq!(apply_filter("mega", &list), vec![0]);
        assert_eq!(apply_filter("USA", &list), vec![0, 1]);
        assert_eq!(apply_filter("zelda", &list), Vec::<usize>::new());
    }

    #[test]
    fn empty_or_blank_query_keeps_all() {
        let list = titles(&["a.nes", "b.nes", "c.nes"]);
        assert_eq!(apply_filter("", &list), vec![0, 1, 2]);
        assert_eq!(apply_filter("   ", &list), vec![0, 1, 2]);
    }

    #[test]
    fn query_is_trimmed() {
        let list = titles(&["roms/Mega Man (USA).nes", "roms/Contra (USA).nes"]);
        assert_eq!(apply_filter("  contra ", &list), vec![1]);
    }

    #[test]
    fn idempotent_and_order_preserving() {
        let list = titles(&["c/Zelda.nes", "c/Zelda II.nes", "c/Metroid.nes", "c/zelda 3.sfc"]);
        let once = apply_filter("zelda", &list);
        let visible: Vec<Title> = once.iter().map(|&i| list[i].clone()).collect();
        let twice: Vec<Title> = apply_filter("zelda", &visible)
            .iter()
            .map(|&i| visible[i].clone())
            .collect();
        assert_eq!(once, vec![0, 1, 3]);
        assert_eq!(visible, twice);
    }
}
