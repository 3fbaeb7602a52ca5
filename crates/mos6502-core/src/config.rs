/// Stack pointer value held before the first reset.
pub const DEFAULT_POWER_ON_SP: u8 = 0x00;

/// Top-level immutable configuration for an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Bills one extra cycle when an indexed read crosses a page.
    pub page_cross_penalty: bool,
    /// `SP` before the first reset; the reset sequence leaves it 3 lower.
    pub power_on_sp: u8,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            page_cross_penalty: true,
            power_on_sp: DEFAULT_POWER_ON_SP,
        }
    }
}

impl CoreConfig {
    /// Returns `SP` as the first reset will leave it.
    #[must_use]
    pub const fn post_reset_sp(&self) -> u8 {
        self.power_on_sp.wrapping_sub(3)
    }
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DEFAULT_POWER_ON_SP};

    #[test]
    fn defaults_match_nmos_power_on() {
        let config = CoreConfig::default();
        assert!(config.page_cross_penalty);
        assert_eq!(config.power_on_sp, DEFAULT_POWER_ON_SP);
        assert_eq!(config.post_reset_sp(), 0xFD);
    }

    #[test]
    fn post_reset_sp_wraps() {
        let config = CoreConfig {
            power_on_sp: 0x01,
            ..CoreConfig::default()
        };
        assert_eq!(config.post_reset_sp(), 0xFE);
    }
}
