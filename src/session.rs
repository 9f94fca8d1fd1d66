//! Authenticated subtitle session
//!
//! A [`SubtitleSession`] logs in when it is created and logs out exactly
//! once when it is closed or dropped. Calls run strictly in program order
//! on the caller's thread.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{MarshalError, Result};
use crate::hash::MovieHash;
use crate::models::{ImdbEntry, LanguageInfo, MovieInfo, SubtitleCandidate, TranslationInfo};
use crate::rpc::request::{
    CheckMovieHashRequest, DownloadRequest, GetAvailableTranslationsRequest,
    GetImdbMovieDetailsRequest, GetSubLanguagesRequest, GetTranslationRequest, SearchRequest,
    SearchMoviesOnImdbRequest,
};
use crate::rpc::response::{
    GetTranslationResponse, ImdbMovieDetails, LogOutResponse, NoOperationResponse,
};
use crate::rpc::{RpcClient, Transport};

/// One login's worth of remote calls
///
/// The login status is not checked: when the service refuses the login the
/// session carries an empty token and later calls report the service's
/// status (usually 406 No session). Logout is only sent for a non-empty
/// token.
pub struct SubtitleSession<T: Transport> {
    client: RpcClient<T>,
    token: String,
}

impl<T: Transport> SubtitleSession<T> {
    /// Log in anonymously with the default configuration
    pub fn new(transport: T) -> Result<Self> {
        Self::open(transport, &Config::default())
    }

    /// Log in with the user agent and credentials from `config`
    pub fn open(transport: T, config: &Config) -> Result<Self> {
        let client = RpcClient::new(transport, config.user_agent());
        let login = client.log_in(&config.login_request())?;

        if login.token.is_empty() {
            warn!(status = %login.status.message, "login returned no session token");
        } else {
            info!(user_agent = client.user_agent(), "session opened");
        }

        Ok(Self {
            client,
            token: login.token,
        })
    }

    /// Session token, empty when the login was refused
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_agent(&self) -> &str {
        self.client.user_agent()
    }

    /// Typed client for methods without a session shortcut
    pub fn client(&self) -> &RpcClient<T> {
        &self.client
    }

    /// Search subtitles for a fingerprint, in the order the service returns them
    pub fn search_subtitles(
        &self,
        language: &str,
        hash: impl ToString,
        byte_size: u64,
    ) -> Result<Vec<SubtitleCandidate>> {
        let req = SearchRequest::by_hash(language, hash, byte_size);
        let response = self.client.search_subtitles(&self.token, &req)?;

        if !response.status.is_ok() {
            debug!(status = %response.status.message, "search not successful");
        }
        debug!(
            hash = %req.movie_hash,
            language,
            results = response.data.len(),
            "subtitle search finished"
        );

        Ok(response.data)
    }

    /// Search, then download the first candidate into `dest`
    ///
    /// The file is named after the candidate's `SubFileName`. Returns the
    /// written path, or `None` when nothing was found or nothing came back.
    pub fn download_subtitles(
        &self,
        language: &str,
        hash: impl ToString,
        byte_size: u64,
        dest: impl AsRef<Path>,
    ) -> Result<Option<PathBuf>> {
        let candidates = self.search_subtitles(language, hash, byte_size)?;
        let Some(best) = candidates.first() else {
            info!(language, "no subtitles found");
            return Ok(None);
        };

        let id = best.subtitle_file_id()?;
        debug!(id, file = %best.sub_file_name, "downloading best match");

        let response = self
            .client
            .download_subtitles(&self.token, &DownloadRequest::new(vec![id]))?;
        let Some(payload) = response.subtitles.first() else {
            info!(id, status = %response.status.message, "download returned no subtitles");
            return Ok(None);
        };

        let content = payload.decode()?;
        let path = write_subtitle(dest.as_ref(), &best.sub_file_name, &content)?;
        info!(path = %path.display(), bytes = content.len(), "downloaded subtitle");

        Ok(Some(path))
    }

    /// Fingerprint a local video file, then [`download_subtitles`](Self::download_subtitles)
    pub fn download_subtitles_for_file(
        &self,
        language: &str,
        video: impl AsRef<Path>,
        dest: impl AsRef<Path>,
    ) -> Result<Option<PathBuf>> {
        let (hash, size) = MovieHash::from_file(video.as_ref())?;
        debug!(video = %video.as_ref().display(), %hash, size, "fingerprinted video");
        self.download_subtitles(language, hash, size, dest)
    }

    /// Extend the session on the server
    pub fn keep_alive(&self) -> Result<NoOperationResponse> {
        self.client.no_operation(&self.token)
    }

    /// Languages with names localized to `language` (ISO 639-1)
    pub fn sub_languages(&self, language: &str) -> Result<Vec<LanguageInfo>> {
        let req = GetSubLanguagesRequest {
            language: language.to_string(),
        };
        Ok(self.client.get_sub_languages(&req)?.languages)
    }

    pub fn available_translations(&self, program: &str) -> Result<BTreeMap<String, TranslationInfo>> {
        let req = GetAvailableTranslationsRequest {
            program: program.to_string(),
        };
        Ok(self.client.get_available_translations(&self.token, &req)?.translations)
    }

    /// Fails with `RemoteStatus` when the translation is not available
    pub fn translation(&self, iso639: &str, format: &str, program: &str) -> Result<GetTranslationResponse> {
        let req = GetTranslationRequest {
            iso639: iso639.to_string(),
            format: format.to_string(),
            program: program.to_string(),
        };
        self.client.get_translation(&self.token, &req)
    }

    /// Movies known for the given fingerprints
    pub fn check_movie_hashes(&self, hashes: &[MovieHash]) -> Result<BTreeMap<String, MovieInfo>> {
        let req = CheckMovieHashRequest::new(hashes.iter().map(MovieHash::to_string).collect());
        Ok(self.client.check_movie_hash(&self.token, &req)?.movie_infos)
    }

    pub fn search_movies(&self, query: &str) -> Result<Vec<ImdbEntry>> {
        let req = SearchMoviesOnImdbRequest {
            query: query.to_string(),
        };
        Ok(self.client.search_movies_on_imdb(&self.token, &req)?.results)
    }

    pub fn movie_details(&self, imdb_id: &str) -> Result<ImdbMovieDetails> {
        let req = GetImdbMovieDetailsRequest {
            imdb_id: imdb_id.to_string(),
        };
        Ok(self.client.get_imdb_movie_details(&self.token, &req)?.details)
    }

    /// Log out now and report the result
    ///
    /// Returns `None` when no token was held. Dropping the session
    /// afterwards sends nothing.
    pub fn close(mut self) -> Result<Option<LogOutResponse>> {
        let token = std::mem::take(&mut self.token);
        if token.is_empty() {
            return Ok(None);
        }
        let response = self.client.log_out(&token)?;
        info!(status = %response.status.message, "session closed");
        Ok(Some(response))
    }
}

impl<T: Transport> Drop for SubtitleSession<T> {
    fn drop(&mut self) {
        let token = std::mem::take(&mut self.token);
        if token.is_empty() {
            return;
        }
        match self.client.log_out(&token) {
            Ok(response) => debug!(status = %response.status.message, "logged out on drop"),
            Err(e) => warn!(error = %e, "logout failed"),
        }
    }
}

/// Write decoded subtitle content as `dest/<file name>`
///
/// Only the final component of the service-supplied name is used.
fn write_subtitle(dest: &Path, file_name: &str, content: &[u8]) -> Result<PathBuf> {
    let name = Path::new(file_name)
        .file_name()
        .ok_or_else(|| MarshalError::InvalidFileName(file_name.to_string()))?;

    fs::create_dir_all(dest)?;
    let path = dest.join(name);
    fs::write(&path, content)?;
    Ok(path)
}
