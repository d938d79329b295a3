use chrono::Utc;
use mongodb::bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::Collection;

use crate::cache::ProfileStore;
use crate::error::Error;
use crate::profile::{CharacterDocument, CharacterProfile};

/// characters 컬렉션 기반 프로필 저장소
pub struct MongoStore {
    collection: Collection<CharacterDocument>,
}

impl MongoStore {
    pub fn new(collection: Collection<CharacterDocument>) -> Self {
        Self { collection }
    }
}

impl ProfileStore for MongoStore {
    async fn find(&self, lodestone_id: &str) -> Result<Option<CharacterProfile>, Error> {
        let document = self
            .collection
            .find_one(doc! { "character.lodestoneId": lodestone_id }, None)
            .await?;

        Ok(document.map(|d| d.character))
    }

    async fn insert(&self, profile: &CharacterProfile) -> Result<(), Error> {
        let bson_value =
            mongodb::bson::to_bson(profile).map_err(mongodb::error::Error::from)?;
        let now = Utc::now();

        // `$setOnInsert` upsert: 같은 키가 동시에 들어와도 먼저 쓴 문서가
        // 남고 나중 쓰기는 no-op
        let opts = UpdateOptions::builder().upsert(true).build();
        self.collection
            .update_one(
                doc! { "character.lodestoneId": &profile.lodestone_id },
                doc! {
                    "$setOnInsert": {
                        "created_at": now,
                        "character": bson_value,
                    },
                },
                opts,
            )
            .await?;

        Ok(())
    }
}
