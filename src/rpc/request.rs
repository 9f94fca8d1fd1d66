//! Typed requests
//!
//! Each request renders its own positional parameter list. The session
//! token, when the method takes one, is prepended by [`RpcClient`].
//!
//! [`RpcClient`]: crate::rpc::RpcClient

use crate::hash::MovieHash;
use crate::rpc::Value;
use crate::wire_struct;

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().map(Value::from).collect())
}

/// Credentials for `LogIn`; all empty means anonymous
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Interface language (ISO 639-1), empty for the service default
    pub language: String,
}

impl LoginRequest {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(username: impl Into<String>, password: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            language: language.into(),
        }
    }

    /// Parameters followed by the user agent
    pub fn to_params(&self, user_agent: &str) -> Vec<Value> {
        vec![
            Value::from(&self.username),
            Value::from(&self.password),
            Value::from(&self.language),
            Value::from(user_agent),
        ]
    }
}

/// Subtitle search by content fingerprint or by IMDb id
///
/// When an IMDb id is set it wins and the hash fields are not sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub sub_language_id: String,
    pub movie_hash: String,
    pub movie_byte_size: f64,
    pub imdb_id: Option<String>,
}

impl SearchRequest {
    pub fn by_hash(language: impl Into<String>, hash: impl ToString, byte_size: u64) -> Self {
        Self {
            sub_language_id: language.into(),
            movie_hash: hash.to_string(),
            movie_byte_size: byte_size as f64,
            imdb_id: None,
        }
    }

    pub fn by_imdb(language: impl Into<String>, imdb_id: impl Into<String>) -> Self {
        Self {
            sub_language_id: language.into(),
            movie_hash: String::new(),
            movie_byte_size: 0.0,
            imdb_id: Some(imdb_id.into()),
        }
    }

    fn imdb(&self) -> Option<&str> {
        self.imdb_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn to_params(&self) -> Vec<Value> {
        let query = match self.imdb() {
            Some(imdb_id) => wire_struct! {
                "imdbid" => imdb_id,
                "sublanguageid" => &self.sub_language_id,
            },
            None => wire_struct! {
                "moviehash" => &self.movie_hash,
                "moviebytesize" => self.movie_byte_size,
                "sublanguageid" => &self.sub_language_id,
            },
        };
        vec![Value::Array(vec![query])]
    }
}

/// Ask the service to mail subtitles for the given movies (registered users)
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMailRequest {
    pub languages: Vec<String>,
    /// (fingerprint, byte size) pairs
    pub movies: Vec<(String, f64)>,
}

impl SearchMailRequest {
    pub fn new(languages: Vec<String>, movies: Vec<(MovieHash, u64)>) -> Self {
        Self {
            languages,
            movies: movies
                .into_iter()
                .map(|(hash, size)| (hash.to_string(), size as f64))
                .collect(),
        }
    }

    pub fn to_params(&self) -> Vec<Value> {
        let movies = self
            .movies
            .iter()
            .map(|(hash, size)| {
                wire_struct! {
                    "moviehash" => hash,
                    "moviesize" => *size,
                }
            })
            .collect();
        vec![string_array(&self.languages), Value::Array(movies)]
    }
}

/// Download subtitle files by their `IDSubtitleFile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub subtitle_file_ids: Vec<i64>,
}

impl DownloadRequest {
    pub fn new(subtitle_file_ids: Vec<i64>) -> Self {
        Self { subtitle_file_ids }
    }

    pub fn to_params(&self) -> Vec<Value> {
        let ids = self.subtitle_file_ids.iter().copied().map(Value::Int).collect();
        vec![Value::Array(ids)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWrongMovieHashRequest {
    pub id_sub_movie_file: i64,
}

impl ReportWrongMovieHashRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![Value::Int(self.id_sub_movie_file)]
    }
}

/// Rate a subtitle from 1 to 10
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtitlesVoteRequest {
    pub id_subtitle: i64,
    pub score: i16,
}

impl SubtitlesVoteRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![wire_struct! {
            "idsubtitle" => self.id_subtitle,
            "score" => i64::from(self.score),
        }]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    pub id_subtitle: i64,
    pub comment: String,
    /// Flag the subtitle as bad along with the comment
    pub bad_subtitle: bool,
}

impl AddCommentRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![wire_struct! {
            "idsubtitle" => self.id_subtitle,
            "comment" => &self.comment,
            "badsubtitle" => i64::from(self.bad_subtitle),
        }]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMovieHashRequest {
    pub movie_hashes: Vec<String>,
}

impl CheckMovieHashRequest {
    pub fn new(movie_hashes: Vec<String>) -> Self {
        Self { movie_hashes }
    }

    pub fn single(hash: impl ToString) -> Self {
        Self {
            movie_hashes: vec![hash.to_string()],
        }
    }

    pub fn to_params(&self) -> Vec<Value> {
        vec![string_array(&self.movie_hashes)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSubHashRequest {
    pub sub_hashes: Vec<String>,
}

impl CheckSubHashRequest {
    pub fn new(sub_hashes: Vec<String>) -> Self {
        Self { sub_hashes }
    }

    pub fn single(hash: impl Into<String>) -> Self {
        Self {
            sub_hashes: vec![hash.into()],
        }
    }

    pub fn to_params(&self) -> Vec<Value> {
        vec![string_array(&self.sub_hashes)]
    }
}

/// Language names are returned localized to `language`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSubLanguagesRequest {
    pub language: String,
}

impl Default for GetSubLanguagesRequest {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

impl GetSubLanguagesRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![Value::from(&self.language)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectLanguageRequest {
    pub texts: Vec<String>,
}

impl DetectLanguageRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![string_array(&self.texts)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetAvailableTranslationsRequest {
    pub program: String,
}

impl GetAvailableTranslationsRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![Value::from(&self.program)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTranslationRequest {
    pub iso639: String,
    /// Output format, e.g. "po" or "mo"
    pub format: String,
    pub program: String,
}

impl GetTranslationRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![
            Value::from(&self.iso639),
            Value::from(&self.format),
            Value::from(&self.program),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoUpdateRequest {
    pub program: String,
}

impl AutoUpdateRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![Value::from(&self.program)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMoviesOnImdbRequest {
    pub query: String,
}

impl SearchMoviesOnImdbRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![Value::from(&self.query)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetImdbMovieDetailsRequest {
    pub imdb_id: String,
}

impl GetImdbMovieDetailsRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![Value::from(&self.imdb_id)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertMovieRequest {
    pub movie_name: String,
    pub movie_year: String,
}

impl InsertMovieRequest {
    pub fn to_params(&self) -> Vec<Value> {
        vec![wire_struct! {
            "moviename" => &self.movie_name,
            "movieyear" => &self.movie_year,
        }]
    }
}
