// Environment-driven configuration for the API binary.
//
// Surface
// - CAMPUS_EVENTS_ADDR: socket address to bind (default 0.0.0.0:8080)
// - CAMPUS_EVENTS_DATA_DIR: directory for the JSON blob (default ./data)
// - CAMPUS_EVENTS_STORAGE_KEY: collection key, also the blob file name
//   (default campus-events-db)

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_STORAGE_KEY: &str = "campus-events-db";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let addr = std::env::var("CAMPUS_EVENTS_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());
        let bind_addr = addr
            .parse()
            .with_context(|| format!("CAMPUS_EVENTS_ADDR is not a socket address: {addr}"))?;
        let data_dir = std::env::var("CAMPUS_EVENTS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let storage_key = std::env::var("CAMPUS_EVENTS_STORAGE_KEY")
            .unwrap_or_else(|_| DEFAULT_STORAGE_KEY.into());
        Ok(Self {
            bind_addr,
            data_dir,
            storage_key,
        })
    }
}
