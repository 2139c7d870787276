use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::model::CostInputs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    /// Inputs used when a request omits one
    pub inputs: CostInputs,
    pub surface: SurfaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
            request_timeout_secs: 10,
            enable_cors: false,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Samples per axis when the request does not ask for a resolution
    pub resolution: usize,
    /// Upper bound on samples per axis
    pub max_resolution: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            resolution: 50,
            max_resolution: 200,
        }
    }
}

impl Config {
    /// Layered sources: built-in defaults, `config/default.toml`, `LCOE__*` env, `PORT`
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("LCOE__").split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.surface.max_resolution < 2 {
            anyhow::bail!("surface.max_resolution must be at least 2");
        }
        if !(2..=self.surface.max_resolution).contains(&self.surface.resolution) {
            anyhow::bail!(
                "surface.resolution must be between 2 and {}, got {}",
                self.surface.max_resolution,
                self.surface.resolution
            );
        }
        self.inputs.check_bounds()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PanelType, PowerGenerationRate};

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.surface.resolution, 50);
        assert_eq!(cfg.server.socket_addr().unwrap().port(), 8501);
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("server.port", 9000))
            .merge(Serialized::default("inputs.power_generation_rate", "terrestrial"))
            .merge(Serialized::default("surface.resolution", 20));
        let cfg = Config::from_figment(figment).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.inputs.power_generation_rate, PowerGenerationRate::Terrestrial);
        assert_eq!(cfg.surface.resolution, 20);
    }

    #[test]
    fn test_resolution_above_cap_rejected() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("surface.resolution", 500));
        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    fn test_out_of_bounds_default_inputs_rejected() {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Serialized::default("inputs.discount_rate", 40.0));
        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    fn test_env_overrides_port_and_nested_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PORT", "9123");
            jail.set_env("LCOE__SURFACE__RESOLUTION", "20");
            jail.set_env("LCOE__INPUTS__POWER_GENERATION_RATE", "terrestrial");
            jail.set_env("LCOE__INPUTS__PANEL_TYPE", "multi_junction_gaas");

            let cfg = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.port, 9123);
            assert_eq!(cfg.surface.resolution, 20);
            assert_eq!(cfg.inputs.power_generation_rate, PowerGenerationRate::Terrestrial);
            assert_eq!(cfg.inputs.panel_type, PanelType::MultiJunctionGaas);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_then_env_precedence() {
        figment::Jail::expect_with(|jail| {
            std::fs::create_dir_all(jail.directory().join("config")).map_err(|e| e.to_string())?;
            jail.create_file(
                "config/default.toml",
                r#"
                [server]
                host = "0.0.0.0"
                port = 8600

                [surface]
                resolution = 30
                max_resolution = 120
                "#,
            )?;
            jail.set_env("LCOE__SURFACE__RESOLUTION", "40");
            jail.set_env("LCOE__SERVER__PORT", "7000");
            jail.set_env("PORT", "9500");

            let cfg = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.host, "0.0.0.0");
            assert_eq!(cfg.surface.max_resolution, 120);
            assert_eq!(cfg.surface.resolution, 40);
            assert_eq!(cfg.server.port, 9500);
            assert_eq!(cfg.inputs.discount_rate, 7.7);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_env_value_fails_load() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("LCOE__SURFACE__RESOLUTION", "1");
            assert!(Config::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_bad_host_rejected() {
        let mut cfg = Config::default();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.server.socket_addr().is_err());
    }
}
