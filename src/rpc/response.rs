//! Typed responses decoded from wire values
//!
//! Every response embeds a [`StatusResult`]. A non-OK status is carried as
//! data; deciding whether it is fatal is left to [`RpcClient`] and its
//! callers (see [`ResponseEnvelope::ensure_ok`]).
//!
//! The `data` member is read per method: `false` always means "no
//! results", otherwise it is a list of structs, a single struct, or a flat
//! struct of scalars.
//!
//! [`RpcClient`]: crate::rpc::RpcClient

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{MarshalError, SubtleError};
use crate::models::{
    ImdbEntry, LanguageInfo, MovieInfo, StatusResult, SubtitleCandidate, SubtitlePayload,
    TranslationInfo,
};
use crate::rpc::{Struct, Value};

/// Decoding from the dynamic value tree
pub trait FromWire: Sized {
    fn from_wire(value: &Value) -> Result<Self, MarshalError>;
}

/// Access to the status envelope shared by all responses
pub trait ResponseEnvelope: Sized {
    fn status(&self) -> &StatusResult;

    /// Turn a non-OK status into [`SubtleError::RemoteStatus`]
    fn ensure_ok(self) -> Result<Self, SubtleError> {
        let status = self.status();
        if status.is_ok() {
            Ok(self)
        } else {
            Err(SubtleError::RemoteStatus {
                status: status.status,
                message: status.message.clone(),
            })
        }
    }
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(impl ResponseEnvelope for $ty {
            fn status(&self) -> &StatusResult {
                &self.status
            }
        })*
    };
}

// =============================================================================
// Envelope Helpers
// =============================================================================

fn root(value: &Value) -> Result<&Struct, MarshalError> {
    value.as_struct("response")
}

fn seconds(value: &Value) -> Result<f64, MarshalError> {
    match value.get("seconds") {
        Some(v) => v.as_f64("seconds"),
        None => Ok(0.0),
    }
}

/// Parse `status` and `seconds`; a missing status line reads as empty and fails
fn envelope(value: &Value) -> Result<StatusResult, MarshalError> {
    root(value)?;
    let message = value.string_field("status")?;
    StatusResult::parse(&message, seconds(value)?)
}

/// Some methods never send a status line; treat those as OK
fn envelope_or_ok(value: &Value) -> Result<StatusResult, MarshalError> {
    if value.get("status").is_some() {
        envelope(value)
    } else {
        root(value)?;
        Ok(StatusResult::ok(seconds(value)?))
    }
}

/// The `data` member, with absence and `false` both meaning "no results"
fn data(value: &Value) -> Option<&Value> {
    value.get("data").filter(|d| !d.is_false())
}

fn data_list(value: &Value) -> Result<&[Value], MarshalError> {
    match data(value) {
        Some(d) => d.as_array("data"),
        None => Ok(&[]),
    }
}

/// Keyed `data`; an empty array stands in for an empty struct
fn data_struct(value: &Value) -> Result<Option<&Struct>, MarshalError> {
    match data(value) {
        None => Ok(None),
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(d) => d.as_struct("data").map(Some),
    }
}

// =============================================================================
// Session Responses
// =============================================================================

/// Response that carries nothing beyond its status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusResponse {
    pub status: StatusResult,
}

impl FromWire for StatusResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        Ok(Self {
            status: envelope(value)?,
        })
    }
}

pub type LogOutResponse = StatusResponse;
pub type NoOperationResponse = StatusResponse;
pub type SearchMailResponse = StatusResponse;
pub type ReportWrongMovieHashResponse = StatusResponse;
pub type AddCommentResponse = StatusResponse;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginResponse {
    pub status: StatusResult,
    /// Session token; empty unless the login succeeded
    pub token: String,
}

impl FromWire for LoginResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        let token = if status.is_ok() {
            value.string_field("token")?
        } else {
            String::new()
        };
        Ok(Self { status, token })
    }
}

// =============================================================================
// Search and Download
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub status: StatusResult,
    /// Candidates in the order the service ranked them
    pub data: Vec<SubtitleCandidate>,
}

impl FromWire for SearchResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        if !status.is_ok() {
            return Ok(Self {
                status,
                data: Vec::new(),
            });
        }

        let data = data_list(value)?
            .iter()
            .map(|item| {
                item.as_struct("data[]")?;
                SubtitleCandidate::from_attributes(&item.string_members())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { status, data })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadResponse {
    pub status: StatusResult,
    pub subtitles: Vec<SubtitlePayload>,
}

impl FromWire for DownloadResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        if !status.is_ok() {
            return Ok(Self {
                status,
                subtitles: Vec::new(),
            });
        }

        let subtitles = data_list(value)?
            .iter()
            .map(|item| -> Result<SubtitlePayload, MarshalError> {
                item.as_struct("data[]")?;
                Ok(SubtitlePayload {
                    id_subtitle_file: item.scalar_field("idsubtitlefile")?,
                    data: item.string_field("data")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { status, subtitles })
    }
}

// =============================================================================
// Server and Feedback
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerInfoResponse {
    pub status: StatusResult,
    pub xmlrpc_version: String,
    pub xmlrpc_url: String,
    pub application: String,
    pub contact: String,
    pub website_url: String,
    pub users_online_total: String,
    pub users_online_program: String,
    pub users_logged_in: String,
    pub users_max_alltime: String,
    pub users_registered: String,
    pub subs_downloads: String,
    pub subs_subtitle_files: String,
    pub movies_total: String,
    pub movies_aka: String,
    pub total_subtitles_languages: String,
    /// Language code → last update time of its UI strings
    pub last_update_strings: BTreeMap<String, String>,
}

impl FromWire for ServerInfoResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let last_update_strings = value
            .get("last_update_strings")
            .map(Value::string_members)
            .unwrap_or_default();

        Ok(Self {
            status: envelope_or_ok(value)?,
            xmlrpc_version: value.scalar_field("xmlrpc_version")?,
            xmlrpc_url: value.string_field("xmlrpc_url")?,
            application: value.string_field("application")?,
            contact: value.string_field("contact")?,
            website_url: value.string_field("website_url")?,
            users_online_total: value.scalar_field("users_online_total")?,
            users_online_program: value.scalar_field("users_online_program")?,
            users_logged_in: value.scalar_field("users_loggedin")?,
            users_max_alltime: value.scalar_field("users_max_alltime")?,
            users_registered: value.scalar_field("users_registered")?,
            subs_downloads: value.scalar_field("subs_downloads")?,
            subs_subtitle_files: value.scalar_field("subs_subtitle_files")?,
            movies_total: value.scalar_field("movies_total")?,
            movies_aka: value.scalar_field("movies_aka")?,
            total_subtitles_languages: value.scalar_field("total_subtitles_languages")?,
            last_update_strings,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitlesVoteResponse {
    pub status: StatusResult,
    pub sub_rating: String,
    pub sub_sum_votes: String,
    pub id_subtitle: String,
}

impl FromWire for SubtitlesVoteResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        let (sub_rating, sub_sum_votes, id_subtitle) = match data(value) {
            Some(d @ Value::Struct(_)) => (
                d.scalar_field("SubRating")?,
                d.scalar_field("SubSumVotes")?,
                d.scalar_field("IDSubtitle")?,
            ),
            _ => Default::default(),
        };

        Ok(Self {
            status,
            sub_rating,
            sub_sum_votes,
            id_subtitle,
        })
    }
}

// =============================================================================
// Checking
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckMovieHashResponse {
    pub status: StatusResult,
    /// Fingerprint → matched movie; unknown fingerprints are absent
    pub movie_infos: BTreeMap<String, MovieInfo>,
}

impl FromWire for CheckMovieHashResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        let mut movie_infos = BTreeMap::new();

        for (hash, entry) in data_struct(value)?.into_iter().flatten() {
            // unmatched hashes come back as an empty array
            if !matches!(entry, Value::Struct(_)) {
                continue;
            }
            movie_infos.insert(
                hash.clone(),
                MovieInfo {
                    movie_hash: entry.scalar_field("MovieHash")?,
                    imdb_id: entry.scalar_field("MovieImdbID")?,
                    name: entry.scalar_field("MovieName")?,
                    year: entry.scalar_field("MovieYear")?,
                },
            );
        }

        Ok(Self {
            status,
            movie_infos,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckSubHashResponse {
    pub status: StatusResult,
    /// Subtitle hash → subtitle file id, "0" when the hash is unknown
    pub sub_ids: BTreeMap<String, String>,
}

impl FromWire for CheckSubHashResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        let sub_ids = data_struct(value)?
            .into_iter()
            .flatten()
            .map(|(hash, id)| -> Result<(String, String), MarshalError> {
                Ok((hash.clone(), id.to_scalar_string(hash)?))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(Self { status, sub_ids })
    }
}

// =============================================================================
// Languages and Translations
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetSubLanguagesResponse {
    pub status: StatusResult,
    pub languages: Vec<LanguageInfo>,
}

impl FromWire for GetSubLanguagesResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let languages = data_list(value)?
            .iter()
            .map(|item| -> Result<LanguageInfo, MarshalError> {
                item.as_struct("data[]")?;
                Ok(LanguageInfo {
                    sub_language_id: item.string_field("SubLanguageID")?,
                    language_name: item.string_field("LanguageName")?,
                    iso639: item.string_field("ISO639")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            status: envelope_or_ok(value)?,
            languages,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectLanguageResponse {
    pub status: StatusResult,
    /// Submitted text key → detected language id
    pub detected: BTreeMap<String, String>,
}

impl FromWire for DetectLanguageResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        let detected = data(value).map(Value::string_members).unwrap_or_default();
        Ok(Self { status, detected })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetAvailableTranslationsResponse {
    pub status: StatusResult,
    /// ISO 639 code → translation availability
    pub translations: BTreeMap<String, TranslationInfo>,
}

impl FromWire for GetAvailableTranslationsResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let mut translations = BTreeMap::new();
        for (code, info) in data_struct(value)?.into_iter().flatten() {
            info.as_struct(code)?;
            translations.insert(
                code.clone(),
                TranslationInfo {
                    last_created: info.scalar_field("LastCreated")?,
                    strings_no: info.scalar_field("StringsNo")?,
                },
            );
        }

        Ok(Self {
            status: envelope_or_ok(value)?,
            translations,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetTranslationResponse {
    pub status: StatusResult,
    /// Base64 encoded translation file
    pub translation: String,
}

impl FromWire for GetTranslationResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        Ok(Self {
            status: envelope(value)?,
            translation: value.string_field("data")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutoUpdateResponse {
    pub status: StatusResult,
    pub version: String,
    /// Only the links for platforms with a release are present
    pub url_windows: Option<String>,
    pub url_linux: Option<String>,
    pub comments: Option<String>,
}

impl FromWire for AutoUpdateResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let optional = |key: &str| -> Result<Option<String>, MarshalError> {
            value
                .get(key)
                .map(|v| v.as_str(key).map(str::to_string))
                .transpose()
        };

        Ok(Self {
            status: envelope(value)?,
            version: value.scalar_field("version")?,
            url_windows: optional("url_windows")?,
            url_linux: optional("url_linux")?,
            comments: optional("comments")?,
        })
    }
}

// =============================================================================
// Movies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchMoviesOnImdbResponse {
    pub status: StatusResult,
    pub results: Vec<ImdbEntry>,
}

impl FromWire for SearchMoviesOnImdbResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        let results = data_list(value)?
            .iter()
            .map(|item| -> Result<ImdbEntry, MarshalError> {
                item.as_struct("data[]")?;
                Ok(ImdbEntry {
                    id: item.scalar_field("id")?,
                    title: item.string_field("title")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { status, results })
    }
}

/// Movie details scraped from IMDb by the service
///
/// Scraped fields are unreliable, so anything with an unexpected type is
/// dropped and reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImdbMovieDetails {
    pub id: String,
    pub title: String,
    pub year: String,
    pub cover: String,
    /// Person id → name
    pub cast: BTreeMap<String, String>,
    pub directors: BTreeMap<String, String>,
    pub writers: BTreeMap<String, String>,
    pub awards: String,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
    pub languages: Vec<String>,
    pub duration: String,
    pub certifications: Vec<String>,
    pub tagline: String,
    pub plot: String,
    pub goofs: String,
    pub trivia: String,
    pub request_from: String,
}

impl ImdbMovieDetails {
    fn from_struct(data: &Value) -> Self {
        let scalar = |key: &str| {
            data.get(key)
                .and_then(|v| v.to_scalar_string(key).ok())
                .unwrap_or_default()
        };
        let map = |key: &str| data.get(key).map(Value::string_members).unwrap_or_default();
        let list = |key: &str| data.get(key).map(Value::string_items).unwrap_or_default();

        Self {
            id: scalar("id"),
            title: data.lenient_string("title"),
            year: scalar("year"),
            cover: data.lenient_string("cover"),
            cast: map("cast"),
            directors: map("directors"),
            writers: map("writers"),
            awards: data.lenient_string("awards"),
            genres: list("genres"),
            countries: list("countries"),
            languages: list("languages"),
            duration: scalar("duration"),
            certifications: list("certifications"),
            tagline: data.lenient_string("tagline"),
            plot: data.lenient_string("plot"),
            goofs: data.lenient_string("goofs"),
            trivia: data.lenient_string("trivia"),
            request_from: data.lenient_string("request_from"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GetImdbMovieDetailsResponse {
    pub status: StatusResult,
    pub details: ImdbMovieDetails,
}

impl FromWire for GetImdbMovieDetailsResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        let status = envelope(value)?;
        let details = match data(value) {
            Some(d @ Value::Struct(_)) => ImdbMovieDetails::from_struct(d),
            _ => ImdbMovieDetails::default(),
        };
        Ok(Self { status, details })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertMovieResponse {
    pub status: StatusResult,
    /// Id of the newly created movie
    pub id: String,
}

impl FromWire for InsertMovieResponse {
    fn from_wire(value: &Value) -> Result<Self, MarshalError> {
        Ok(Self {
            status: envelope(value)?,
            id: value.scalar_field("id")?,
        })
    }
}

impl_envelope!(
    StatusResponse,
    LoginResponse,
    SearchResponse,
    DownloadResponse,
    ServerInfoResponse,
    SubtitlesVoteResponse,
    CheckMovieHashResponse,
    CheckSubHashResponse,
    GetSubLanguagesResponse,
    DetectLanguageResponse,
    GetAvailableTranslationsResponse,
    GetTranslationResponse,
    AutoUpdateResponse,
    SearchMoviesOnImdbResponse,
    GetImdbMovieDetailsResponse,
    InsertMovieResponse,
);
