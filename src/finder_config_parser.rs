use crate::error::ConfigError;
use crate::finder::FinderConfig;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a JSON finder configuration. Missing fields get their default
/// values, e.g. `{"coarse_step": 2.0}`.
pub fn read_config<P: AsRef<Path>>(file_name: P) -> Result<FinderConfig, ConfigError>
{
    let file = File::open(file_name)?;
    parse_config(BufReader::new(file))
}

pub fn parse_config<R: Read>(reader: R) -> Result<FinderConfig, ConfigError>
{
    // Validated separately so a bad step is reported as
    // ConfigError::Invalid rather than as a JSON error
    let raw: RawConfig = serde_json::from_reader(reader)?;
    let defaults = FinderConfig::default();
    Ok(FinderConfig::new(raw.coarse_step.unwrap_or(defaults.coarse_step()),
                         raw.min_step.unwrap_or(defaults.min_step()))?)
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig
{
    coarse_step: Option<f64>,
    min_step: Option<f64>
}

#[test]
fn test_parse_config()
{
    let config = parse_config(r#"{"min_step": 0.25}"#.as_bytes()).unwrap();
    assert_eq!(config, FinderConfig::new(4.0, 0.25).unwrap());

    match parse_config(r#"{"coarse_step": -1}"#.as_bytes()) {
        Err(ConfigError::Invalid(_)) => {},
        r => panic!("Unexpected result: {:?}", r)
    }
    match parse_config(r#"{"coarse": 1}"#.as_bytes()) {
        Err(ConfigError::Json(_)) => {},
        r => panic!("Unexpected result: {:?}", r)
    }
}

#[test]
fn test_read_missing_config()
{
    match read_config("/nonexistent/finder.json") {
        Err(ConfigError::Io(_)) => {},
        r => panic!("Unexpected result: {:?}", r)
    }
}
