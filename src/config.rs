use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub web: Web,
    pub mongo: Mongo,
    #[serde(default)]
    pub lodestone: Lodestone,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    pub host: SocketAddr,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mongo {
    pub url: String,
}

/// Lodestone 프로필 페이지 설정
///
/// `url_base`는 NA 로드스톤을 기본값으로 사용합니다. 캐릭터 페이지는
/// `{url_base}/lodestone/character/{id}/` 형태로 조회됩니다.
#[derive(Debug, Clone, Deserialize)]
pub struct Lodestone {
    #[serde(default = "default_url_base")]
    pub url_base: String,
}

impl Default for Lodestone {
    fn default() -> Self {
        Self {
            url_base: default_url_base(),
        }
    }
}

fn default_url_base() -> String {
    "https://na.finalfantasyxiv.com".to_string()
}
