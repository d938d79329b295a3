use std::sync::Arc;

use anyhow::{Context, Result};
use mongodb::{options::IndexOptions, Client as MongoClient, Collection, IndexModel};

use crate::cache::ProfileCache;
use crate::config::Config;
use crate::lodestone::LodestoneClient;
use crate::mongo::MongoStore;
use crate::profile::CharacterDocument;

pub mod handlers;
pub mod routes;

pub async fn start(config: Arc<Config>) -> Result<()> {
    let state = State::new(Arc::clone(&config)).await?;

    tracing::info!("listening at {}", config.web.host);
    warp::serve(routes::router(state)).run(config.web.host).await;
    Ok(())
}

pub struct State {
    pub mongo: MongoClient,
    pub cache: ProfileCache<MongoStore, LodestoneClient>,
}

impl State {
    pub async fn new(config: Arc<Config>) -> Result<Arc<Self>> {
        let mongo = MongoClient::with_uri_str(&config.mongo.url)
            .await
            .context("could not create mongodb client")?;

        let cache = ProfileCache::new(
            MongoStore::new(mongo.database("gcdcalc").collection("characters")),
            LodestoneClient::new(config.lodestone.clone()),
        );

        let state = Arc::new(Self { mongo, cache });

        state.ensure_indexes().await?;

        Ok(state)
    }

    pub fn characters_collection(&self) -> Collection<CharacterDocument> {
        self.mongo.database("gcdcalc").collection("characters")
    }

    async fn ensure_indexes(&self) -> Result<()> {
        self.characters_collection()
            .create_index(
                IndexModel::builder()
                    .keys(mongodb::bson::doc! {
                        "character.lodestoneId": 1,
                    })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
                None,
            )
            .await
            .context("could not create unique lodestone id index")?;

        Ok(())
    }
}
