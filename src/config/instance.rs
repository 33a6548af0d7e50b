//! config singleton management stuff
use {
    crate::config::options::DeliciousCfg,
    color_eyre::Result,
    std::sync::{LazyLock, RwLock, RwLockReadGuard},
    tracing::warn,
};

/// global config instance, defaults are used if loading fails
static CONFIG: LazyLock<RwLock<DeliciousCfg>> = LazyLock::new(|| {
    RwLock::new(DeliciousCfg::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load configuration, using defaults");
        DeliciousCfg::default()
    }))
});

/// init the config explicitly
pub fn init_config() -> Result<()> {
    let _l = config()?;
    Ok(())
}

/// get a ro ref to the config
pub fn config() -> Result<RwLockReadGuard<'static, DeliciousCfg>> {
    CONFIG
        .read()
        .map_err(|e| color_eyre::eyre::eyre!("Configuration lock poisoned: {}", e))
}

/// get a specific config value with a default fallback
pub fn get_or_default<T, F>(getter: F, default: T) -> T
where
    F: FnOnce(&DeliciousCfg) -> Option<T>,
    T: Clone,
{
    config()
        .ok()
        .and_then(|cfg| getter(&cfg))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_read() {
        init_config().unwrap();
        assert!(config().unwrap().version.is_some());
    }

    #[test]
    fn test_get_or_default_falls_back() {
        let value = get_or_default(|_| None::<u32>, 7);
        assert_eq!(value, 7);
    }
}
