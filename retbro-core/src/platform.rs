/// Playback platform identifiers understood by the external player.
///
/// Each variant maps to one player core. The player is handed the core id
/// together with the ROM URL, and picks its emulator from the core id alone,
/// so this table is the single place where file extensions turn into cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Nes,
    Snes,
    N64,
    GameBoy,
    Gba,
    Ds,
    PcEngine,
}

/// All platform variants in lookup order.
const ALL_PLATFORMS: &[Platform] = &[
    Platform::Nes,
    Platform::Snes,
    Platform::N64,
    Platform::GameBoy,
    Platform::Gba,
    Platform::Ds,
    Platform::PcEngine,
];

impl Platform {
    /// Platform used when an extension is not in the table.
    pub const BASELINE: Platform = Platform::Nes;

    /// Core identifier passed to the player.
    pub fn core_id(&self) -> &'static str {
        match self {
            Self::Nes => "nes",
            Self::Snes => "snes",
            Self::N64 => "n64",
            Self::GameBoy => "gb",
            Self::Gba => "gba",
            Self::Ds => "nds",
            Self::PcEngine => "pce",
        }
    }

    /// Full display name for the platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nes => "Nintendo Entertainment System",
            Self::Snes => "Super Nintendo Entertainment System",
            Self::N64 => "Nintendo 64",
            Self::GameBoy => "Game Boy",
            Self::Gba => "Game Boy Advance",
            Self::Ds => "Nintendo DS",
            Self::PcEngine => "PC Engine / TurboGrafx-16",
        }
    }

    /// File extensions (lowercase, no dot) that select this platform.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Nes => &["nes", "unif", "unf", "fds"],
            Self::Snes => &["smc", "sfc", "swc", "fig"],
            Self::N64 => &["z64", "n64"],
            Self::GameBoy => &["gb"],
            Self::Gba => &["gba"],
            Self::Ds => &["nds"],
            Self::PcEngine => &["pce"],
        }
    }

    /// Look up the platform for a bare extension (case-insensitive).
    ///
    /// Unrecognized extensions fall back to [`Platform::BASELINE`].
    pub fn from_extension(ext: &str) -> Platform {
        let lower = ext.trim_start_matches('.').to_ascii_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.extensions().contains(&lower.as_str()))
            .unwrap_or(Self::BASELINE)
    }

    /// Derive the platform hint from a title URL.
    ///
    /// Only the final path segment is considered, with any query string or
    /// fragment removed first.
    pub fn from_url(url: &str) -> Platform {
        let segment = crate::title::last_segment(url);
        match segment.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => Self::BASELINE,
        }
    }

    /// All platform variants.
    pub fn all() -> &'static [Platform] {
        ALL_PLATFORMS
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.core_id())
    }
}

/// Error returned when a string cannot be parsed into a `Platform`.
#[derive(Debug, Clone)]
pub struct PlatformParseError(pub String);

impl std::fmt::Display for PlatformParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown player core: '{}'", self.0)
    }
}

impl std::error::Error for PlatformParseError {}

impl std::str::FromStr for Platform {
    type Err = PlatformParseError;

    /// Parse a platform from its core id (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ALL_PLATFORMS
            .iter()
            .copied()
            .find(|p| p.core_id() == lower)
            .ok_or_else(|| PlatformParseError(s.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/platform_tests.rs"]
mod tests;
