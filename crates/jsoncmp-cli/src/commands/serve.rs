//! Serve command
//!
//! Usage: jsoncmp serve [--bind <ADDR>] [--storage memory|fs] [--data-dir <DIR>]
//!
//! Every flag can also come from the environment (or a `.env` file).

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use jsoncmp_api::AppState;
use jsoncmp_core::logging_facility::{init, Profile};
use jsoncmp_engine::{open_slot_store, Comparator, SlotBackend};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageKind {
    /// Keep payloads in process memory
    Memory,
    /// Keep payloads as files under --data-dir
    Fs,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "JSONCMP_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Slot storage backend
    #[arg(long, env = "JSONCMP_STORAGE", value_enum, default_value_t = StorageKind::Fs)]
    pub storage: StorageKind,

    /// Directory for payload files (fs storage only)
    #[arg(long, env = "JSONCMP_DATA_DIR", default_value = ".jsoncmp/payloads")]
    pub data_dir: PathBuf,

    /// Log output: development (human readable) or production (JSON)
    #[arg(long, env = "JSONCMP_LOG_FORMAT", default_value = "development")]
    pub log_format: Profile,
}

impl ServeArgs {
    pub fn backend(&self) -> SlotBackend {
        match self.storage {
            StorageKind::Memory => SlotBackend::Memory,
            StorageKind::Fs => SlotBackend::Fs(self.data_dir.clone()),
        }
    }
}

/// Execute serve command
pub fn execute(args: ServeArgs) -> Result<()> {
    init(args.log_format);

    let backend = args.backend();
    let store = open_slot_store(&backend)
        .with_context(|| format!("opening slot storage {:?}", backend))?;
    tracing::info!(backend = ?backend, "slot storage ready");

    let state = AppState::new(Comparator::new(store));

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(jsoncmp_api::serve(args.bind, state))
}
