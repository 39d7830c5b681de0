use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use libgame::{
    Universe,
    boundary::BoundaryMode,
    pattern::{Format, PatternKind},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub width: u32,
    pub height: u32,
    pub boundary_mode: BoundaryMode,

    /// The fill used at startup, unless `pattern_file` is set.
    pub pattern: PatternKind,

    /// A `.cells` or `.rle` file to load at startup. The universe takes the file's dimensions.
    pub pattern_file: Option<PathBuf>,

    /// Makes `random` fills reproducible.
    pub seed: Option<u64>,

    /// Delay between steps while running.
    pub tick_millis: u64,

    /// Step in delta mode and highlight births and deaths when rendering.
    pub show_changes: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            boundary_mode: BoundaryMode::Wrap,
            pattern: PatternKind::Fancy,
            pattern_file: None,
            seed: None,
            tick_millis: 200,
            show_changes: true,
        }
    }
}

impl ClientConfig {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }

    pub fn build_universe(&self) -> anyhow::Result<Universe> {
        let mut universe = if let Some(path) = &self.pattern_file {
            let mut universe = Universe::new(1, 1)?;
            load_pattern_file(&mut universe, path)?;
            universe
        } else {
            let mut universe = Universe::new(self.width, self.height)
                .context("Invalid universe dimensions in config")?;
            self.fill(&mut universe, self.pattern);
            universe
        };

        universe.set_boundary_mode(self.boundary_mode);
        Ok(universe)
    }

    /// Resets the universe to a fill, seeding random fills when the config asks for it.
    pub fn fill(&self, universe: &mut Universe, pattern: PatternKind) {
        match (pattern, self.seed) {
            (PatternKind::Random, Some(seed)) => universe.reset_random_seeded(seed),
            (pattern, _) => universe.reset(pattern),
        }
    }
}

pub fn load_pattern_file<P>(universe: &mut Universe, path: P) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(extension) = path.extension() {
        let extension = extension.to_string_lossy();
        if Format::from_extension(&extension).is_none() {
            bail!("Unsupported pattern file extension .{extension} (expected .cells, .txt or .rle)");
        }
    }

    let contents =
        fs::read(path).with_context(|| format!("Couldn't read pattern {}", path.display()))?;

    universe
        .load_from_text(&contents)
        .with_context(|| format!("Couldn't load pattern {}", path.display()))
}
