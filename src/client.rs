use crate::aggregate::{AggregateQuery, Volume};
use crate::at_home::{build_image_urls, AtHomeServer, ImageQuality};
use crate::config::ClientConfig;
use crate::entity::{
    collection_from_json, list_from_json, Author, Chapter, FromJson, Manga, ScanlationGroup, Tag,
    User,
};
use crate::query::{QueryParams, ToQueryParams};
use crate::session::Session;
use crate::transport::{Method, Transport};
use crate::{MangadexError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, instrument};
use url::Url;

/// Client of the mangadex REST API.
///
/// The read marker, `me`, `followed_*`, follow and logout operations are
/// authenticated: they use the session stored by [`login`](Self::login) or
/// [`set_session`](Self::set_session) and fail with
/// [`MangadexError::AuthRequiredError`] before sending anything when there is
/// none. The client is `Send + Sync` and can be shared across tasks.
#[derive(Debug)]
pub struct MangadexClient {
    transport: Transport,
    base_url: String,
    base: Url,
    session: RwLock<Option<Session>>,
}

impl MangadexClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url().to_string();
        let base =
            Url::parse(&base_url).map_err(|e| MangadexError::UrlParseError(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(MangadexError::UrlParseError(format!(
                "{base_url} cannot be a base url"
            )));
        }
        Ok(Self {
            transport: Transport::new(&config)?,
            base_url,
            base,
            session: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_session(&self, session: Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn clear_session(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Base url followed by `segments`, each percent-encoded as a single path
    /// segment.
    fn url(&self, segments: &[&str]) -> Result<String> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                MangadexError::UrlParseError(format!("{} cannot be a base url", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        match &*self.session.read().unwrap_or_else(PoisonError::into_inner) {
            Some(session) => session.headers(),
            None => Err(MangadexError::AuthRequiredError),
        }
    }

    async fn get(&self, path: &[&str], params: &QueryParams) -> Result<Value> {
        self.transport
            .send(Method::Get, &self.url(path)?, params, HeaderMap::new())
            .await
    }

    async fn get_authenticated(&self, path: &[&str], params: &QueryParams) -> Result<Value> {
        let headers = self.auth_headers()?;
        self.transport
            .send(Method::Get, &self.url(path)?, params, headers)
            .await
    }

    #[instrument(skip_all)]
    pub async fn search_manga(&self, query: &impl ToQueryParams) -> Result<Vec<Manga>> {
        list_from_json(self.get(&["manga"], &query.to_query_params()).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_manga(&self, id: &str) -> Result<Manga> {
        Manga::from_json(self.get(&["manga", id], &QueryParams::new()).await?)
    }

    #[instrument(skip(self))]
    pub async fn random_manga(&self) -> Result<Manga> {
        Manga::from_json(self.get(&["manga", "random"], &QueryParams::new()).await?)
    }

    /// Ids of the chapters of `id` marked as read.
    #[instrument(skip(self))]
    pub async fn manga_read_marker_ids(&self, id: &str) -> Result<Vec<String>> {
        let value = self
            .get_authenticated(&["manga", id, "read"], &QueryParams::new())
            .await?;
        let data = value
            .get("data")
            .cloned()
            .ok_or_else(|| MangadexError::malformed("read markers", "missing `data` field"))?;
        serde_json::from_value(data).map_err(|e| MangadexError::malformed("read markers", e))
    }

    /// The chapters of `id` marked as read, fetched one request per chapter
    /// with at most `concurrency` requests in flight.
    ///
    /// Costs `1 + n` requests for `n` marked chapters; use
    /// [`manga_read_marker_ids`](Self::manga_read_marker_ids) when ids are
    /// enough. Chapters come back in the order of the ids.
    #[instrument(skip(self))]
    pub async fn manga_read_markers(&self, id: &str, concurrency: usize) -> Result<Vec<Chapter>> {
        let ids = self.manga_read_marker_ids(id).await?;
        debug!(count = ids.len(), "fetching marked chapters");
        let client = self;
        stream::iter(ids)
            .map(move |chapter_id| async move { client.get_chapter(&chapter_id).await })
            .buffered(concurrency.max(1))
            .try_collect()
            .await
    }

    #[instrument(skip(self))]
    pub async fn tag_list(&self) -> Result<Vec<Tag>> {
        collection_from_json(self.get(&["manga", "tag"], &QueryParams::new()).await?)
    }

    #[instrument(skip(self, query))]
    pub async fn manga_feed(&self, id: &str, query: &impl ToQueryParams) -> Result<Vec<Chapter>> {
        list_from_json(
            self.get(&["manga", id, "feed"], &query.to_query_params())
                .await?,
        )
    }

    /// Volume and chapter index of a manga.
    #[instrument(skip(self))]
    pub async fn manga_aggregate(&self, query: &AggregateQuery) -> Result<Vec<Volume>> {
        let value = self
            .get(
                &["manga", query.id(), "aggregate"],
                &query.to_query_params(),
            )
            .await?;
        AggregateQuery::volumes_from_json(value)
    }

    /// Chapters across all manga; filter with `manga` to get one title's.
    #[instrument(skip_all)]
    pub async fn chapter_list(&self, query: &impl ToQueryParams) -> Result<Vec<Chapter>> {
        list_from_json(self.get(&["chapter"], &query.to_query_params()).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_chapter(&self, id: &str) -> Result<Chapter> {
        Chapter::from_json(self.get(&["chapter", id], &QueryParams::new()).await?)
    }

    /// Links to the full quality pages of `chapter`, in page order.
    ///
    /// The links point at an at-home server and stop working after about 15
    /// minutes; fetch them again after that.
    pub async fn fetch_chapter_images(&self, chapter: &Chapter) -> Result<Vec<String>> {
        self.fetch_chapter_images_with(chapter, ImageQuality::Data)
            .await
    }

    #[instrument(skip(self, chapter), fields(chapter = %chapter.id()))]
    pub async fn fetch_chapter_images_with(
        &self,
        chapter: &Chapter,
        quality: ImageQuality,
    ) -> Result<Vec<String>> {
        let value = self
            .get(
                &["at-home", "server", chapter.id()],
                &QueryParams::new(),
            )
            .await?;
        let server = AtHomeServer::from_json(value)?;
        let pages = match quality {
            ImageQuality::Data => chapter.data(),
            ImageQuality::DataSaver => chapter.data_saver(),
        };
        Ok(build_image_urls(
            server.base_url(),
            chapter.hash(),
            pages.as_slice(),
            quality,
        ))
    }

    #[instrument(skip_all)]
    pub async fn author_list(&self, query: &impl ToQueryParams) -> Result<Vec<Author>> {
        list_from_json(self.get(&["author"], &query.to_query_params()).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_author(&self, id: &str) -> Result<Author> {
        Author::from_json(self.get(&["author", id], &QueryParams::new()).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_group(&self, id: &str) -> Result<ScanlationGroup> {
        ScanlationGroup::from_json(self.get(&["group", id], &QueryParams::new()).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<User> {
        User::from_json(self.get(&["user", id], &QueryParams::new()).await?)
    }

    /// Logs in and keeps the session for authenticated operations.
    ///
    /// The returned session is the one now stored in the client.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let credentials = QueryParams::new()
            .with("username", username)
            .with("password", password);
        let value = self
            .transport
            .send(
                Method::Post,
                &self.url(&["auth", "login"])?,
                &credentials,
                HeaderMap::new(),
            )
            .await?;
        let session = Session::from_login_response(value)?;
        self.set_session(session.clone());
        debug!("logged in");
        Ok(session)
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let headers = self.auth_headers()?;
        self.transport
            .send(
                Method::Post,
                &self.url(&["auth", "logout"])?,
                &QueryParams::new(),
                headers,
            )
            .await?;
        self.clear_session();
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        User::from_json(
            self.get_authenticated(&["user", "me"], &QueryParams::new())
                .await?,
        )
    }

    #[instrument(skip_all)]
    pub async fn followed_manga(&self, query: &impl ToQueryParams) -> Result<Vec<Manga>> {
        list_from_json(
            self.get_authenticated(&["user", "follows", "manga"], &query.to_query_params())
                .await?,
        )
    }

    #[instrument(skip_all)]
    pub async fn followed_groups(
        &self,
        query: &impl ToQueryParams,
    ) -> Result<Vec<ScanlationGroup>> {
        list_from_json(
            self.get_authenticated(&["user", "follows", "group"], &query.to_query_params())
                .await?,
        )
    }

    #[instrument(skip_all)]
    pub async fn followed_users(&self, query: &impl ToQueryParams) -> Result<Vec<User>> {
        list_from_json(
            self.get_authenticated(&["user", "follows", "user"], &query.to_query_params())
                .await?,
        )
    }

    #[instrument(skip(self))]
    pub async fn follow_manga(&self, id: &str) -> Result<()> {
        let headers = self.auth_headers()?;
        self.transport
            .send(
                Method::Post,
                &self.url(&["manga", id, "follow"])?,
                &QueryParams::new(),
                headers,
            )
            .await?;
        Ok(())
    }

    /// Sends no query string and no body.
    #[instrument(skip(self))]
    pub async fn unfollow_manga(&self, id: &str) -> Result<()> {
        let headers = self.auth_headers()?;
        self.transport
            .send(
                Method::Delete,
                &self.url(&["manga", id, "follow"])?,
                &QueryParams::new(),
                headers,
            )
            .await?;
        Ok(())
    }
}
