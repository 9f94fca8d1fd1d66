//! Data structures shared across the client
//!
//! - **Status**: the service's status codes and the envelope every response carries
//! - **Subtitles**: search candidates and downloaded payloads
//! - **Catalog**: languages, movies, translations and IMDb entries

use base64::Engine;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use crate::error::MarshalError;

// =============================================================================
// Status Models
// =============================================================================

/// Status codes reported by the service in the `status` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// 200 OK
    Ok,
    /// 206 Partial content
    Partial,
    /// 301 Moved to another endpoint
    Moved,
    /// 401 Unauthorized
    Unauthorized,
    /// 402 Subtitles have an invalid format
    InvalidFormat,
    /// 403 Subtitle hashes differ
    HashDifferent,
    /// 404 Invalid language
    InvalidLanguage,
    /// 405 Mandatory parameters missing
    MissingParams,
    /// 406 No session
    NoSession,
    /// 407 Download limit reached
    DownloadLimit,
    /// 408 Invalid parameters
    InvalidParams,
    /// 409 Method not found
    MethodNotFound,
    /// 410 Other or unknown error
    UnknownError,
    /// 411 Empty or invalid user agent
    InvalidUserAgent,
    /// 412 A field has an invalid format
    FieldFormat,
    /// 501 Temporarily down
    TemporaryDown,
    /// 503 Service unavailable
    Unavailable,
    /// Any other three-digit code the service sends
    Other(u16),
}

impl Status {
    /// Map a numeric code; codes outside the table are kept as `Other`
    pub fn from_code(code: u16) -> Self {
        match code {
            200 => Status::Ok,
            206 => Status::Partial,
            301 => Status::Moved,
            401 => Status::Unauthorized,
            402 => Status::InvalidFormat,
            403 => Status::HashDifferent,
            404 => Status::InvalidLanguage,
            405 => Status::MissingParams,
            406 => Status::NoSession,
            407 => Status::DownloadLimit,
            408 => Status::InvalidParams,
            409 => Status::MethodNotFound,
            410 => Status::UnknownError,
            411 => Status::InvalidUserAgent,
            412 => Status::FieldFormat,
            501 => Status::TemporaryDown,
            503 => Status::Unavailable,
            other => Status::Other(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Partial => 206,
            Status::Moved => 301,
            Status::Unauthorized => 401,
            Status::InvalidFormat => 402,
            Status::HashDifferent => 403,
            Status::InvalidLanguage => 404,
            Status::MissingParams => 405,
            Status::NoSession => 406,
            Status::DownloadLimit => 407,
            Status::InvalidParams => 408,
            Status::MethodNotFound => 409,
            Status::UnknownError => 410,
            Status::InvalidUserAgent => 411,
            Status::FieldFormat => 412,
            Status::TemporaryDown => 501,
            Status::Unavailable => 503,
            Status::Other(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == Status::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Status envelope embedded in every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResult {
    pub status: Status,
    /// Full status line, e.g. "200 OK"
    pub message: String,
    /// Server-side processing time in seconds
    pub seconds: f64,
}

impl StatusResult {
    /// Parse a status line such as `"407 Download limit reached"`.
    ///
    /// The code is the token before the first space and must be exactly
    /// three ASCII digits. Codes outside the table parse as [`Status::Other`].
    pub fn parse(message: &str, seconds: f64) -> Result<Self, MarshalError> {
        let code = message.split(' ').next().unwrap_or_default();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MarshalError::InvalidStatus(message.to_string()));
        }

        let code: u16 = code
            .parse()
            .map_err(|_| MarshalError::InvalidStatus(message.to_string()))?;
        let status = Status::from_code(code);

        Ok(Self {
            status,
            message: message.to_string(),
            seconds,
        })
    }

    /// Envelope for methods that never send a status line
    pub fn ok(seconds: f64) -> Self {
        Self {
            status: Status::Ok,
            message: "200 OK".to_string(),
            seconds,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

impl fmt::Display for StatusResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.message, self.seconds)
    }
}

// =============================================================================
// Subtitle Models
// =============================================================================

/// One subtitle search result
///
/// Every attribute the service documents for a search hit is required;
/// building from an attribute map with any key missing fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCandidate {
    pub id_sub_movie_file: String,
    pub movie_hash: String,
    pub movie_byte_size: String,
    pub movie_time_ms: String,
    pub id_subtitle_file: String,
    pub sub_file_name: String,
    pub sub_actual_cd: String,
    pub sub_size: String,
    pub sub_hash: String,
    pub id_subtitle: String,
    pub user_id: String,
    pub sub_language_id: String,
    pub sub_format: String,
    pub sub_sum_cd: String,
    pub sub_author_comment: String,
    pub sub_add_date: String,
    pub sub_bad: String,
    pub sub_rating: String,
    pub sub_downloads_cnt: String,
    pub movie_release_name: String,
    pub id_movie: String,
    pub id_movie_imdb: String,
    pub movie_name: String,
    pub movie_name_eng: String,
    pub movie_year: String,
    pub movie_imdb_rating: String,
    pub user_nick_name: String,
    pub iso639: String,
    pub language_name: String,
    pub sub_download_link: String,
    pub zip_download_link: String,
}

impl SubtitleCandidate {
    /// Build from the flattened string members of a search hit
    pub fn from_attributes(attrs: &BTreeMap<String, String>) -> Result<Self, MarshalError> {
        let field = |key: &str| {
            attrs
                .get(key)
                .cloned()
                .ok_or_else(|| MarshalError::MissingField(key.to_string()))
        };

        Ok(Self {
            id_sub_movie_file: field("IDSubMovieFile")?,
            movie_hash: field("MovieHash")?,
            movie_byte_size: field("MovieByteSize")?,
            movie_time_ms: field("MovieTimeMS")?,
            id_subtitle_file: field("IDSubtitleFile")?,
            sub_file_name: field("SubFileName")?,
            sub_actual_cd: field("SubActualCD")?,
            sub_size: field("SubSize")?,
            sub_hash: field("SubHash")?,
            id_subtitle: field("IDSubtitle")?,
            user_id: field("UserID")?,
            sub_language_id: field("SubLanguageID")?,
            sub_format: field("SubFormat")?,
            sub_sum_cd: field("SubSumCD")?,
            sub_author_comment: field("SubAuthorComment")?,
            sub_add_date: field("SubAddDate")?,
            sub_bad: field("SubBad")?,
            sub_rating: field("SubRating")?,
            sub_downloads_cnt: field("SubDownloadsCnt")?,
            movie_release_name: field("MovieReleaseName")?,
            id_movie: field("IDMovie")?,
            id_movie_imdb: field("IDMovieImdb")?,
            movie_name: field("MovieName")?,
            movie_name_eng: field("MovieNameEng")?,
            movie_year: field("MovieYear")?,
            movie_imdb_rating: field("MovieImdbRating")?,
            user_nick_name: field("UserNickName")?,
            iso639: field("ISO639")?,
            language_name: field("LanguageName")?,
            sub_download_link: field("SubDownloadLink")?,
            zip_download_link: field("ZipDownloadLink")?,
        })
    }

    /// Numeric subtitle file id used by the download call
    pub fn subtitle_file_id(&self) -> Result<i64, MarshalError> {
        self.id_subtitle_file
            .trim()
            .parse()
            .map_err(|_| MarshalError::InvalidId(self.id_subtitle_file.clone()))
    }

    /// One-line movie title with its IMDb link
    pub fn title_line(&self) -> String {
        format!(
            "{} ({}) - www.imdb.com/title/tt{}",
            self.movie_name, self.movie_year, self.id_movie_imdb
        )
    }
}

impl fmt::Display for SubtitleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Language: {}", self.sub_language_id)?;
        writeln!(f, "Rating: {}", self.sub_rating)?;
        writeln!(f, "Downvotes: {}", self.sub_bad)?;
        writeln!(f, "Downloaded: {}", self.sub_downloads_cnt)?;
        writeln!(f, "Uploaded by: {}", self.user_nick_name)?;
        writeln!(f, "Subtitle filename: {}", self.sub_file_name)?;
        write!(f, "Download URL: {}", self.sub_download_link)
    }
}

/// A downloaded subtitle: file id plus base64 of the gzipped content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitlePayload {
    pub id_subtitle_file: String,
    pub data: String,
}

impl SubtitlePayload {
    /// Base64-decode then gunzip the payload into memory
    pub fn decode(&self) -> Result<Vec<u8>, MarshalError> {
        let compact: String = self.data.split_ascii_whitespace().collect();
        let gzipped = base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| MarshalError::Payload(format!("base64: {}", e)))?;

        let mut content = Vec::new();
        GzDecoder::new(gzipped.as_slice())
            .read_to_end(&mut content)
            .map_err(|e| MarshalError::Payload(format!("gzip: {}", e)))?;

        Ok(content)
    }
}

// =============================================================================
// Catalog Models
// =============================================================================

/// A subtitle language supported by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub sub_language_id: String,
    pub language_name: String,
    pub iso639: String,
}

impl fmt::Display for LanguageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}/{}]", self.language_name, self.sub_language_id, self.iso639)
    }
}

/// Movie matched by a content fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieInfo {
    pub movie_hash: String,
    pub imdb_id: String,
    pub name: String,
    pub year: String,
}

impl fmt::Display for MovieInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) tt{} [{}]", self.name, self.year, self.imdb_id, self.movie_hash)
    }
}

/// Availability of a UI translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationInfo {
    pub last_created: String,
    pub strings_no: String,
}

/// IMDb search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImdbEntry {
    pub id: String,
    pub title: String,
}

impl fmt::Display for ImdbEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tt{})", self.title, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn candidate_attrs(id: &str, file_name: &str) -> BTreeMap<String, String> {
        let keys = [
            "IDSubMovieFile", "MovieHash", "MovieByteSize", "MovieTimeMS", "IDSubtitleFile",
            "SubFileName", "SubActualCD", "SubSize", "SubHash", "IDSubtitle", "UserID",
            "SubLanguageID", "SubFormat", "SubSumCD", "SubAuthorComment", "SubAddDate", "SubBad",
            "SubRating", "SubDownloadsCnt", "MovieReleaseName", "IDMovie", "IDMovieImdb",
            "MovieName", "MovieNameEng", "MovieYear", "MovieImdbRating", "UserNickName", "ISO639",
            "LanguageName", "SubDownloadLink", "ZipDownloadLink",
        ];
        let mut attrs: BTreeMap<String, String> =
            keys.iter().map(|k| (k.to_string(), String::new())).collect();
        attrs.insert("IDSubtitleFile".into(), id.into());
        attrs.insert("SubFileName".into(), file_name.into());
        attrs
    }

    #[test]
    fn test_status_parse_ok() {
        let result = StatusResult::parse("200 OK", 0.007).unwrap();
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.message, "200 OK");
        assert!(result.is_ok());
    }

    #[test]
    fn test_status_parse_without_text() {
        let result = StatusResult::parse("407", 0.0).unwrap();
        assert_eq!(result.status, Status::DownloadLimit);
    }

    #[test]
    fn test_status_parse_rejects_non_numeric() {
        assert_eq!(
            StatusResult::parse("OK 200", 0.0),
            Err(MarshalError::InvalidStatus("OK 200".into()))
        );
        assert!(StatusResult::parse("", 0.0).is_err());
        assert!(StatusResult::parse("2000 OK", 0.0).is_err());
    }

    #[test]
    fn test_status_parse_unknown_code() {
        let result = StatusResult::parse("429 Too many requests", 0.0).unwrap();
        assert_eq!(result.status, Status::Other(429));
        assert_eq!(result.status.code(), 429);
        assert_eq!(result.status.to_string(), "429");
        assert!(!result.is_ok());
    }

    #[test]
    fn test_status_code_roundtrip() {
        for code in [200, 206, 301, 401, 406, 407, 412, 501, 503] {
            assert_eq!(Status::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_candidate_requires_every_key() {
        let mut attrs = candidate_attrs("1951", "movie.srt");
        assert!(SubtitleCandidate::from_attributes(&attrs).is_ok());

        attrs.remove("ZipDownloadLink");
        assert_eq!(
            SubtitleCandidate::from_attributes(&attrs),
            Err(MarshalError::MissingField("ZipDownloadLink".into()))
        );
    }

    #[test]
    fn test_candidate_file_id() {
        let candidate = SubtitleCandidate::from_attributes(&candidate_attrs("1951", "a.srt")).unwrap();
        assert_eq!(candidate.subtitle_file_id(), Ok(1951));

        let bad = SubtitleCandidate::from_attributes(&candidate_attrs("abc", "a.srt")).unwrap();
        assert!(matches!(bad.subtitle_file_id(), Err(MarshalError::InvalidId(_))));
    }

    #[test]
    fn test_payload_decode() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();
        let gz = encoder.finish().unwrap();

        let payload = SubtitlePayload {
            id_subtitle_file: "1".into(),
            data: base64::engine::general_purpose::STANDARD.encode(gz),
        };
        let content = payload.decode().unwrap();
        assert!(content.ends_with(b"Hello\n"));
    }

    #[test]
    fn test_payload_decode_rejects_garbage() {
        let payload = SubtitlePayload {
            id_subtitle_file: "1".into(),
            data: "%%%".into(),
        };
        assert!(matches!(payload.decode(), Err(MarshalError::Payload(_))));

        let not_gzip = SubtitlePayload {
            id_subtitle_file: "1".into(),
            data: base64::engine::general_purpose::STANDARD.encode(b"plain text"),
        };
        assert!(matches!(not_gzip.decode(), Err(MarshalError::Payload(_))));
    }
}
