use crate::platform::Platform;
use crate::title::Title;

/// Request handed to the external player when a title is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    pub rom_url: String,
    pub platform: Platform,
}

impl Handoff {
    pub fn for_title(title: &Title) -> Self {
        Self {
            rom_url: title.url.clone(),
            platform: title.platform(),
        }
    }

    /// Navigation target for the player page, e.g.
    /// `emulator.html?rom=roms%2FContra.nes&core=nes`.
    pub fn navigation_url(&self, player_page: &str) -> String {
        let sep = if player_page.contains('?') { '&' } else { '?' };
        format!(
            "{}{}rom={}&core={}",
            player_page,
            sep,
            urlencoding::encode(&self.rom_url),
            self.platform.core_id()
        )
    }
}
