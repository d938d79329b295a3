//! 프로필 캐시 오케스트레이션
//!
//! 저장소에 있으면 그대로 돌려주고, 없으면 한 번만 수집해서 저장한 뒤
//! 돌려줍니다. 수집/저장 오류는 감싸지 않고 그대로 올립니다.

use crate::error::Error;
use crate::profile::CharacterProfile;

/// 프로필 영속화 계약. 조회와 삽입뿐, 갱신/삭제 경로는 없습니다.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    async fn find(&self, lodestone_id: &str) -> Result<Option<CharacterProfile>, Error>;
    /// 같은 키의 문서가 이미 있으면 조용히 넘어가는 멱등 삽입
    async fn insert(&self, profile: &CharacterProfile) -> Result<(), Error>;
}

/// 외부 소스에서 프로필 한 건을 수집하는 계약
#[allow(async_fn_in_trait)]
pub trait ProfileSource {
    async fn ingest(&self, lodestone_id: &str) -> Result<CharacterProfile, Error>;
}

pub struct ProfileCache<S, P> {
    store: S,
    source: P,
}

impl<S: ProfileStore, P: ProfileSource> ProfileCache<S, P> {
    pub fn new(store: S, source: P) -> Self {
        Self { store, source }
    }

    /// 캐시 히트면 네트워크 접근 없이 저장된 프로필을 그대로 반환.
    /// 미스면 정확히 한 번 수집 후 저장.
    ///
    /// 같은 키의 미스가 겹치면 둘 다 수집할 수 있지만, 삽입이 멱등이라
    /// 먼저 저장된 프로필이 남고 두 번째 저장은 no-op입니다.
    pub async fn resolve(&self, lodestone_id: &str) -> Result<CharacterProfile, Error> {
        if let Some(profile) = self.store.find(lodestone_id).await? {
            tracing::info!("character {} found in store", lodestone_id);
            return Ok(profile);
        }

        tracing::info!("character {} not found, scraping...", lodestone_id);
        let profile = self.source.ingest(lodestone_id).await?;
        self.store.insert(&profile).await?;

        Ok(profile)
    }
}
