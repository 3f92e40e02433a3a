//! Applying command-line overrides on top of the loaded config

use crate::domain::Config;

/// Settings given on the command line; `None` keeps the loaded value.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub max_files: Option<usize>,
    pub ignore_file: Option<String>,
    pub follow_symlinks: bool,
}

pub fn merge_cli_with_config(mut config: Config, overrides: &CliOverrides) -> Config {
    if let Some(max_files) = overrides.max_files {
        config.max_files = max_files;
    }
    if let Some(ignore_file) = &overrides.ignore_file {
        config.ignore_file = ignore_file.clone();
    }
    // A flag can only switch symlink following on.
    config.follow_symlinks |= overrides.follow_symlinks;
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_keep_config() {
        let cfg = Config { max_files: 7, ..Config::default() };
        assert_eq!(merge_cli_with_config(cfg.clone(), &CliOverrides::default()), cfg);
    }

    #[test]
    fn test_overrides_win() {
        let overrides = CliOverrides {
            max_files: Some(3),
            ignore_file: Some(".paneignore".to_string()),
            follow_symlinks: true,
        };
        let cfg = merge_cli_with_config(Config::default(), &overrides);
        assert_eq!(cfg.max_files, 3);
        assert_eq!(cfg.ignore_file, ".paneignore");
        assert!(cfg.follow_symlinks);
    }
}
