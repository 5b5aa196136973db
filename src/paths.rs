use std::path::PathBuf;

pub const ROOT_ENV: &str = "TICKKK_ROOT";

/// Returns the directory holding the client's config and session files.
///
/// Resolution order:
/// 1. `TICKKK_ROOT` environment variable (if set)
/// 2. Platform config directory (e.g. `~/.config/tickkk`)
/// 3. `.tickkk` in the current working directory
pub fn tickkk_root() -> PathBuf {
    if let Ok(root) = std::env::var(ROOT_ENV) {
        return PathBuf::from(root);
    }
    directories::ProjectDirs::from("", "", "tickkk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".tickkk"))
}

/// Returns the path of the YAML config file.
pub fn config_path() -> PathBuf {
    tickkk_root().join("config.yaml")
}

/// Returns the path of the durable session file (token + user).
pub fn session_path() -> PathBuf {
    tickkk_root().join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_root_with_env_var() {
        let _guard = unsafe { EnvGuard::set(ROOT_ENV, "/custom/path/tickkk") };
        assert_eq!(tickkk_root(), PathBuf::from("/custom/path/tickkk"));
        assert_eq!(
            config_path(),
            PathBuf::from("/custom/path/tickkk/config.yaml")
        );
        assert_eq!(
            session_path(),
            PathBuf::from("/custom/path/tickkk/session.json")
        );
    }

    #[test]
    #[serial]
    fn test_root_default_ends_with_tickkk() {
        let _guard = unsafe { EnvGuard::remove(ROOT_ENV) };
        let root = tickkk_root();
        let last = root.file_name().unwrap().to_string_lossy().to_string();
        assert!(last == "tickkk" || last == ".tickkk", "unexpected root {root:?}");
    }
}
