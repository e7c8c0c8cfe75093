//! Startup helpers: locating the config file and generating the world.

use std::path::{Path, PathBuf};

use eventgrid_world::{Generator, World};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::config::{CONFIG_PATH_ENV, ConfigError, DEFAULT_CONFIG_FILE, ShellConfig};
use crate::error::ShellError;

/// Load configuration from `$EVENTGRID_CONFIG`, else `eventgrid.yaml` in
/// the working directory, else defaults. Environment overrides apply in
/// every case.
pub fn load_config() -> Result<ShellConfig, ConfigError> {
    let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let config = match explicit {
        Some(path) => ShellConfig::from_file(&path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            ShellConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => {
            let mut config = ShellConfig::default();
            config.apply_env_overrides()?;
            config
        }
    };
    config.validate()?;
    Ok(config)
}

/// Random source for world generation: seeded when a seed is configured,
/// from the operating system otherwise.
pub fn world_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Generate the world described by the configuration.
pub fn build_world(config: &ShellConfig) -> Result<World, ShellError> {
    let bounds = config.bounds()?;
    let mut generator = Generator::new(config.generation_settings())?;
    let mut rng = world_rng(config.world.seed);
    let world = generator.generate_world(bounds, &mut rng)?;
    info!(
        min_x = bounds.min_x(),
        min_y = bounds.min_y(),
        max_x = bounds.max_x(),
        max_y = bounds.max_y(),
        cells = world.cell_count(),
        seed = ?config.world.seed,
        "world generated"
    );
    Ok(world)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn seeded_worlds_are_reproducible() {
        let config = ShellConfig::parse("world:\n  seed: 31\n  event_frequency: 0.5\n").unwrap();
        let a = build_world(&config).unwrap();
        let b = build_world(&config).unwrap();
        assert!(a.cells().eq(b.cells()));
    }

    #[test]
    fn configured_bounds_are_used() {
        let config =
            ShellConfig::parse("world:\n  min_x: 0\n  min_y: 0\n  max_x: 3\n  max_y: 1\n  seed: 1\n")
                .unwrap();
        let world = build_world(&config).unwrap();
        assert_eq!(world.cell_count(), 8);
        assert!(world.locate_cell(3, 1).is_ok());
        assert!(world.locate_cell(-1, 0).is_err());
    }

    #[test]
    fn inverted_bounds_fail_to_build() {
        let config = ShellConfig::parse("world:\n  min_y: 3\n  max_y: 2\n").unwrap();
        assert!(matches!(
            build_world(&config),
            Err(ShellError::World { .. })
        ));
    }

    #[test]
    fn zero_tickets_config_builds_world_without_results() {
        let config = ShellConfig::parse("world:\n  seed: 4\ntickets:\n  max_tickets: 0\n").unwrap();
        let world = build_world(&config).unwrap();
        assert!(world.search_nearby_events(0, 0, 5).unwrap().is_empty());
    }
}
