use super::ConfigError;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::in_dir(home))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: dir.into().join(".sigrelayrc"),
        }
    }

    pub fn with_rc(rc_path: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            rc_path: rc_path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rc_in_dir() {
        let paths = ConfigPaths::in_dir("/home/testuser");
        assert_eq!(paths.rc_path, PathBuf::from("/home/testuser/.sigrelayrc"));
    }

    #[test]
    fn test_explicit_rc() {
        let paths = ConfigPaths::with_rc("/etc/sigrelay.conf");
        assert_eq!(paths.rc_path, PathBuf::from("/etc/sigrelay.conf"));
    }
}
