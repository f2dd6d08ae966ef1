//! Installed-application registration lookup.
//!
//! Windows records the game's install path in the registry. Other platforms
//! have no equivalent store, so their locator always answers `None`.

use std::path::PathBuf;

/// Registry keys (under HKLM) that may hold the game's install path.
pub const GAME_REGISTRY_KEYS: &[&str] = &[
    r"SOFTWARE\WOW6432Node\Bethesda Softworks\FalloutNV",
    r"SOFTWARE\Bethesda Softworks\FalloutNV",
];

/// Value name holding the install path.
pub const INSTALLED_PATH_VALUE: &str = "Installed Path";

/// Capability to read an application's registered install location.
pub trait InstalledAppLocator {
    /// Read `value` under `key`, or `None` if absent or unreadable.
    fn lookup(&self, key: &str, value: &str) -> Option<PathBuf>;
}

/// Locator backed by the Windows registry.
#[cfg(windows)]
pub struct WindowsRegistry;

#[cfg(windows)]
impl InstalledAppLocator for WindowsRegistry {
    fn lookup(&self, key: &str, value: &str) -> Option<PathBuf> {
        use winreg::enums::HKEY_LOCAL_MACHINE;
        use winreg::RegKey;

        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        match hklm.open_subkey(key).and_then(|k| k.get_value::<String, _>(value)) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(err) => {
                tracing::debug!(key, value, %err, "Registry lookup failed");
                None
            }
        }
    }
}

/// Locator for platforms without an application registry.
pub struct NoRegistry;

impl InstalledAppLocator for NoRegistry {
    fn lookup(&self, _key: &str, _value: &str) -> Option<PathBuf> {
        None
    }
}

/// The locator appropriate for the current platform.
pub fn platform_locator() -> Box<dyn InstalledAppLocator> {
    #[cfg(windows)]
    {
        Box::new(WindowsRegistry)
    }
    #[cfg(not(windows))]
    {
        Box::new(NoRegistry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_registry_is_empty() {
        for key in GAME_REGISTRY_KEYS {
            assert!(NoRegistry.lookup(key, INSTALLED_PATH_VALUE).is_none());
        }
    }

    #[cfg(not(windows))]
    #[test]
    fn test_platform_locator_off_windows_is_empty() {
        let locator = platform_locator();
        assert!(locator
            .lookup(GAME_REGISTRY_KEYS[0], INSTALLED_PATH_VALUE)
            .is_none());
    }
}
