//! Typed client over a [`Transport`]
//!
//! One method per remote procedure. Non-OK statuses come back inside the
//! response for every method except [`RpcClient::get_translation`], which
//! fails with [`SubtleError::RemoteStatus`]. Callers rely on both
//! behaviors; use [`ResponseEnvelope::ensure_ok`] to opt into errors
//! elsewhere.

use tracing::debug;

use crate::error::Result;
use crate::rpc::request::{
    AddCommentRequest, AutoUpdateRequest, CheckMovieHashRequest, CheckSubHashRequest,
    DetectLanguageRequest, DownloadRequest, GetAvailableTranslationsRequest,
    GetImdbMovieDetailsRequest, GetSubLanguagesRequest, GetTranslationRequest, InsertMovieRequest,
    LoginRequest, ReportWrongMovieHashRequest, SearchMailRequest, SearchMoviesOnImdbRequest,
    SearchRequest, SubtitlesVoteRequest,
};
use crate::rpc::response::*;
use crate::rpc::{Method, Transport, Value};

/// Typed wrapper that marshals requests and responses for a transport
pub struct RpcClient<T> {
    transport: T,
    user_agent: String,
}

impl<T: Transport> RpcClient<T> {
    /// `user_agent` identifies the application at login
    pub fn new(transport: T, user_agent: impl Into<String>) -> Self {
        Self {
            transport,
            user_agent: user_agent.into(),
        }
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn invoke<R: FromWire + ResponseEnvelope>(&self, method: Method, params: Vec<Value>) -> Result<R> {
        debug!(%method, params = params.len(), "remote call");
        let value = self.transport.call(method, params)?;
        let response = R::from_wire(&value)?;
        debug!(%method, status = %response.status().status, "remote call finished");
        Ok(response)
    }

    fn invoke_with_token<R: FromWire + ResponseEnvelope>(
        &self,
        method: Method,
        token: &str,
        params: Vec<Value>,
    ) -> Result<R> {
        let mut all = Vec::with_capacity(params.len() + 1);
        all.push(Value::from(token));
        all.extend(params);
        self.invoke(method, all)
    }

    // Session handling

    pub fn log_in(&self, req: &LoginRequest) -> Result<LoginResponse> {
        self.invoke(Method::LogIn, req.to_params(&self.user_agent))
    }

    pub fn log_out(&self, token: &str) -> Result<LogOutResponse> {
        self.invoke_with_token(Method::LogOut, token, Vec::new())
    }

    /// Keep the session alive
    pub fn no_operation(&self, token: &str) -> Result<NoOperationResponse> {
        self.invoke_with_token(Method::NoOperation, token, Vec::new())
    }

    // Search and download

    pub fn search_subtitles(&self, token: &str, req: &SearchRequest) -> Result<SearchResponse> {
        self.invoke_with_token(Method::SearchSubtitles, token, req.to_params())
    }

    pub fn search_to_mail(&self, token: &str, req: &SearchMailRequest) -> Result<SearchMailResponse> {
        self.invoke_with_token(Method::SearchToMail, token, req.to_params())
    }

    pub fn download_subtitles(&self, token: &str, req: &DownloadRequest) -> Result<DownloadResponse> {
        self.invoke_with_token(Method::DownloadSubtitles, token, req.to_params())
    }

    // Reporting and rating

    pub fn server_info(&self) -> Result<ServerInfoResponse> {
        self.invoke(Method::ServerInfo, Vec::new())
    }

    pub fn report_wrong_movie_hash(
        &self,
        token: &str,
        req: &ReportWrongMovieHashRequest,
    ) -> Result<ReportWrongMovieHashResponse> {
        self.invoke_with_token(Method::ReportWrongMovieHash, token, req.to_params())
    }

    pub fn subtitles_vote(&self, token: &str, req: &SubtitlesVoteRequest) -> Result<SubtitlesVoteResponse> {
        self.invoke_with_token(Method::SubtitlesVote, token, req.to_params())
    }

    pub fn add_comment(&self, token: &str, req: &AddCommentRequest) -> Result<AddCommentResponse> {
        self.invoke_with_token(Method::AddComment, token, req.to_params())
    }

    // Checking

    pub fn check_movie_hash(&self, token: &str, req: &CheckMovieHashRequest) -> Result<CheckMovieHashResponse> {
        self.invoke_with_token(Method::CheckMovieHash, token, req.to_params())
    }

    pub fn check_sub_hash(&self, token: &str, req: &CheckSubHashRequest) -> Result<CheckSubHashResponse> {
        self.invoke_with_token(Method::CheckSubHash, token, req.to_params())
    }

    // Languages and translations

    /// Takes no session token
    pub fn get_sub_languages(&self, req: &GetSubLanguagesRequest) -> Result<GetSubLanguagesResponse> {
        self.invoke(Method::GetSubLanguages, req.to_params())
    }

    pub fn detect_language(&self, token: &str, req: &DetectLanguageRequest) -> Result<DetectLanguageResponse> {
        self.invoke_with_token(Method::DetectLanguage, token, req.to_params())
    }

    pub fn get_available_translations(
        &self,
        token: &str,
        req: &GetAvailableTranslationsRequest,
    ) -> Result<GetAvailableTranslationsResponse> {
        self.invoke_with_token(Method::GetAvailableTranslations, token, req.to_params())
    }

    /// Fails with `RemoteStatus` when the service does not answer 200
    pub fn get_translation(&self, token: &str, req: &GetTranslationRequest) -> Result<GetTranslationResponse> {
        let response: GetTranslationResponse =
            self.invoke_with_token(Method::GetTranslation, token, req.to_params())?;
        response.ensure_ok()
    }

    /// Takes no session token
    pub fn auto_update(&self, req: &AutoUpdateRequest) -> Result<AutoUpdateResponse> {
        self.invoke(Method::AutoUpdate, req.to_params())
    }

    // Movies

    pub fn search_movies_on_imdb(
        &self,
        token: &str,
        req: &SearchMoviesOnImdbRequest,
    ) -> Result<SearchMoviesOnImdbResponse> {
        self.invoke_with_token(Method::SearchMoviesOnImdb, token, req.to_params())
    }

    pub fn get_imdb_movie_details(
        &self,
        token: &str,
        req: &GetImdbMovieDetailsRequest,
    ) -> Result<GetImdbMovieDetailsResponse> {
        self.invoke_with_token(Method::GetImdbMovieDetails, token, req.to_params())
    }

    pub fn insert_movie(&self, token: &str, req: &InsertMovieRequest) -> Result<InsertMovieResponse> {
        self.invoke_with_token(Method::InsertMovie, token, req.to_params())
    }
}
