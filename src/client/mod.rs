use crate::config::ClientConfig;
use crate::context::Context;
use crate::dispatcher::{Endpoint, RequestDispatcher};
use crate::error::{Result, TftError};
use crate::models::{LeagueEntry, Match, MatchId, Summoner};
use crate::rate_limit::DualRateLimiter;
use crate::routing::RegionRouter;
use crate::secrets::ApiKey;
use std::sync::Arc;
use tracing::debug;

/// Read operations of the TFT API
pub struct TftClient {
    dispatcher: RequestDispatcher,
    router: Arc<RegionRouter>,
}

impl TftClient {
    /// Create a client with its own rate limiter
    pub fn new(config: &ClientConfig, api_key: ApiKey) -> Result<Self> {
        let limiter = Arc::new(DualRateLimiter::new(config.rate_limit)?);
        Self::with_limiter(config, api_key, limiter)
    }

    /// Create a client that shares `limiter` with other clients using the same key
    pub fn with_limiter(
        config: &ClientConfig,
        api_key: ApiKey,
        limiter: Arc<DualRateLimiter>,
    ) -> Result<Self> {
        config.validate()?;

        let router = Arc::new(RegionRouter::new());
        let dispatcher = RequestDispatcher::new(&config.api, api_key, limiter, router.clone())?;

        Ok(Self { dispatcher, router })
    }

    pub fn router(&self) -> &RegionRouter {
        &self.router
    }

    pub fn limiter(&self) -> &Arc<DualRateLimiter> {
        self.dispatcher.limiter()
    }

    /// Look up a summoner by name on `platform`
    pub async fn summoner_by_name(
        &self,
        ctx: &Context,
        platform: &str,
        name: &str,
    ) -> Result<Summoner> {
        let region = self
            .router
            .region_of(platform)
            .ok_or_else(|| TftError::UnknownRoutingDomain(platform.to_string()))?;

        let mut summoner: Summoner = self
            .dispatcher
            .fetch(ctx, platform, Endpoint::SummonerByName { name })
            .await?;

        summoner.platform = platform.to_string();
        summoner.region = region.to_string();
        debug!(name = %summoner.name, platform, region, "Summoner found");
        Ok(summoner)
    }

    /// Ranked standing of `summoner`.
    ///
    /// The API answers with a list that holds a single entry for ranked
    /// players; an empty list is an `EmptyList` error.
    pub async fn league(&self, ctx: &Context, summoner: &Summoner) -> Result<LeagueEntry> {
        let endpoint = Endpoint::LeagueEntries {
            summoner_id: &summoner.id,
        };

        let entries: Vec<LeagueEntry> = self
            .dispatcher
            .fetch(ctx, &summoner.platform, endpoint)
            .await?;

        match entries.into_iter().next() {
            Some(entry) => Ok(entry),
            None => {
                let url = self
                    .dispatcher
                    .url_for(&summoner.platform, &endpoint)
                    .map(|url| url.to_string())
                    .unwrap_or_else(|_| endpoint.to_string());
                Err(TftError::EmptyList { url })
            }
        }
    }

    /// Ids of the last `count` matches of `summoner`, newest first
    pub async fn matches(
        &self,
        ctx: &Context,
        summoner: &Summoner,
        count: u32,
    ) -> Result<Vec<MatchId>> {
        self.dispatcher
            .fetch(
                ctx,
                &summoner.region,
                Endpoint::MatchIds {
                    puuid: &summoner.puuid,
                    count,
                },
            )
            .await
    }

    /// Full record of one match
    pub async fn get_match(&self, ctx: &Context, region: &str, match_id: &str) -> Result<Match> {
        self.dispatcher
            .fetch(ctx, region, Endpoint::Match { match_id })
            .await
    }
}
