//! subfetch - session-scoped client for the OpenSubtitles lookup service
//!
//! Fingerprints video files, searches for matching subtitles, downloads and
//! unpacks them, and exposes the service's catalog calls.
//!
//! # Modules
//!
//! - `hash` - 64-bit content fingerprint of a video file
//! - `rpc` - dynamic wire values, typed requests/responses, transport seam
//! - `session` - login/search/download/logout lifecycle
//! - `models` - status codes, subtitle candidates, catalog records
//! - `config` - persisted settings
//! - `cli`, `commands` - command line for the companion binary

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod hash;
pub mod models;
pub mod rpc;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{MarshalError, Result, SubtleError, TransportError};
pub use hash::MovieHash;
pub use models::{
    ImdbEntry, LanguageInfo, MovieInfo, Status, StatusResult, SubtitleCandidate,
    SubtitlePayload, TranslationInfo,
};
pub use rpc::{Method, RpcClient, Transport, Value};
pub use session::SubtitleSession;
