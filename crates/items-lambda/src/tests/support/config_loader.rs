//! Configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use items_config::Config;
use ortho_config::{OrthoConfig, OrthoError};

use crate::bootstrap::ConfigLoader;

/// Table name used by successful scenarios.
pub const TEST_TABLE: &str = "ItemsUnderTest";

/// Loader that resolves a fixed table in a fixed region.
#[derive(Debug, Default)]
pub struct TestConfigLoader;

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            table_name: TEST_TABLE.to_owned(),
            region: Some("eu-west-1".to_owned()),
            ..Config::default()
        })
    }
}

/// Loader whose configuration names a blank table.
#[derive(Debug, Default)]
pub struct BlankTableLoader;

impl ConfigLoader for BlankTableLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            table_name: "   ".to_owned(),
            ..Config::default()
        })
    }
}

/// Loader that intentionally fails by passing an unknown CLI flag.
#[derive(Debug, Default)]
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("items-lambda"),
            OsString::from("--no-such-option"),
            OsString::from("value"),
        ];
        Config::load_from_iter(args)
    }
}
