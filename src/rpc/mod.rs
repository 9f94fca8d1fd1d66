//! Remote procedure layer
//!
//! - `value`: the dynamic value tree the transport speaks
//! - `request`: typed requests and their wire parameter lists
//! - `response`: typed responses decoded from wire values
//! - `client`: one typed method per remote procedure
//!
//! The transport itself (HTTP framing, XML-RPC envelopes, retries) lives
//! behind the [`Transport`] trait and is supplied by the caller.

pub mod client;
pub mod request;
pub mod response;
pub mod value;

use std::fmt;

use crate::error::TransportError;

pub use client::RpcClient;
pub use value::{Struct, Value};

/// Remote procedures exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    LogIn,
    LogOut,
    NoOperation,
    SearchSubtitles,
    SearchToMail,
    DownloadSubtitles,
    ServerInfo,
    ReportWrongMovieHash,
    SubtitlesVote,
    AddComment,
    CheckMovieHash,
    CheckSubHash,
    GetSubLanguages,
    DetectLanguage,
    GetAvailableTranslations,
    GetTranslation,
    AutoUpdate,
    SearchMoviesOnImdb,
    GetImdbMovieDetails,
    InsertMovie,
}

impl Method {
    /// Procedure name as sent on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Method::LogIn => "LogIn",
            Method::LogOut => "LogOut",
            Method::NoOperation => "NoOperation",
            Method::SearchSubtitles => "SearchSubtitles",
            Method::SearchToMail => "SearchToMail",
            Method::DownloadSubtitles => "DownloadSubtitles",
            Method::ServerInfo => "ServerInfo",
            Method::ReportWrongMovieHash => "ReportWrongMovieHash",
            Method::SubtitlesVote => "SubtitlesVote",
            Method::AddComment => "AddComment",
            Method::CheckMovieHash => "CheckMovieHash",
            Method::CheckSubHash => "CheckSubHash",
            Method::GetSubLanguages => "GetSubLanguages",
            Method::DetectLanguage => "DetectLanguage",
            Method::GetAvailableTranslations => "GetAvailableTranslations",
            Method::GetTranslation => "GetTranslation",
            Method::AutoUpdate => "AutoUpdate",
            Method::SearchMoviesOnImdb => "SearchMoviesOnIMDB",
            Method::GetImdbMovieDetails => "GetIMDBMovieDetails",
            Method::InsertMovie => "InsertMovie",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Performs one blocking remote call
///
/// `params` is the positional parameter list; keyed parameters travel as a
/// [`Value::Struct`] inside it. Implementations own endpoint selection,
/// timeouts and retries.
pub trait Transport {
    fn call(&self, method: Method, params: Vec<Value>) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn call(&self, method: Method, params: Vec<Value>) -> Result<Value, TransportError> {
        (**self).call(method, params)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn call(&self, method: Method, params: Vec<Value>) -> Result<Value, TransportError> {
        (**self).call(method, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_keep_service_casing() {
        assert_eq!(Method::SearchMoviesOnImdb.name(), "SearchMoviesOnIMDB");
        assert_eq!(Method::GetImdbMovieDetails.to_string(), "GetIMDBMovieDetails");
        assert_eq!(Method::LogIn.name(), "LogIn");
    }
}
