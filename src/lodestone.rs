//! 로드스톤 캐릭터 페이지 스크레이퍼
//!
//! 공개 프로필 HTML을 한 번 요청해서 이름/이미지/스탯/장비를 추출합니다.
//! 아래 셀렉터들은 로드스톤 마크업과의 계약이므로 문자열 그대로
//! 유지해야 합니다.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};

use crate::cache::ProfileSource;
use crate::config::Lodestone as LodestoneConfig;
use crate::error::Error;
use crate::profile::{CharacterProfile, EquipmentItem, StatTable};

lazy_static! {
    static ref NAME: Selector = selector("p.frame__chara__name");
    static ref AVATAR: Selector = selector("div.character__detail__image img");
    static ref PORTRAIT: Selector = selector("div.frame__chara__face img");
    static ref PARAM_BLOCK: Selector = selector(".character__param__list");
    static ref PARAM_LABEL: Selector = selector("span");
    static ref HP: Selector = selector("p.character__param__text__hp--en-us");
    static ref MP: Selector = selector("p.character__param__text__mp--en-us");
    static ref EQUIP_BOX: Selector = selector(".ic_reflection_box");
    static ref EQUIP_SLOT: Selector = selector("p.db-tooltip__item__category");
    static ref EQUIP_NAME: Selector = selector("h2.db-tooltip__item__name");
    static ref EQUIP_ICON: Selector = selector("img.db-tooltip__item__icon__item_image");
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("invalid lodestone selector")
}

/// 로드스톤 클라이언트
pub struct LodestoneClient {
    config: LodestoneConfig,
    http: reqwest::Client,
}

impl LodestoneClient {
    pub fn new(config: LodestoneConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn profile_url(&self, lodestone_id: &str) -> String {
        format!(
            "{}/lodestone/character/{}/",
            self.config.url_base.trim_end_matches('/'),
            lodestone_id,
        )
    }

    /// 캐릭터 페이지 한 건을 가져와 프로필로 정규화
    ///
    /// 전송 실패와 non-success 응답은 `Error::Fetch`, 빈 문서는
    /// `Error::Parse`. 재시도는 하지 않습니다(호출자 책임).
    pub async fn fetch_profile(&self, lodestone_id: &str) -> Result<CharacterProfile, Error> {
        let url = self.profile_url(lodestone_id);
        tracing::info!("fetching lodestone profile: {}", url);

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_profile(&body, lodestone_id)
    }
}

impl ProfileSource for LodestoneClient {
    async fn ingest(&self, lodestone_id: &str) -> Result<CharacterProfile, Error> {
        self.fetch_profile(lodestone_id).await
    }
}

/// HTML 본문을 프로필로 정규화
///
/// 셀렉터가 아무것도 못 잡은 필드는 비운 채로 통과시킵니다(부분 프로필
/// 허용). `lodestone_id`는 스크레이핑 결과가 아니라 인자 값입니다.
fn parse_profile(body: &str, lodestone_id: &str) -> Result<CharacterProfile, Error> {
    if body.trim().is_empty() {
        return Err(Error::Parse("empty response body".to_string()));
    }

    let document = Html::parse_document(body);

    let name = document
        .select(&NAME)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let avatar_url = attr_of(&document, &AVATAR, "src");
    let portrait_url = attr_of(&document, &PORTRAIT, "src");

    let mut stats = StatTable::default();
    for block in document.select(&PARAM_BLOCK) {
        for label in block.select(&PARAM_LABEL) {
            // 값은 라벨 부모의 다음 요소 형제에 들어 있음
            let value_text = match label.parent().and_then(next_element_text) {
                Some(text) => text,
                None => continue,
            };

            // 숫자가 아닌 값("—" 등)은 버림
            if let Ok(value) = value_text.trim().parse::<f64>() {
                if value.is_finite() {
                    let label_text = label.text().collect::<String>();
                    stats.set(&label_text, value);
                }
            }
        }
    }

    // HP/MP는 파라미터 표와 마크업 형태가 달라서 별도 셀렉터로 추출
    stats.hp = next_int_of(&document, &HP);
    stats.mp = next_int_of(&document, &MP);

    let mut equipment = Vec::new();
    for tile in document.select(&EQUIP_BOX) {
        let slot = tile.select(&EQUIP_SLOT).next().map(text_of);
        let name = tile.select(&EQUIP_NAME).next().map(text_of);
        let image = tile
            .select(&EQUIP_ICON)
            .next()
            .and_then(|el| el.value().attr("src"))
            .map(str::to_string);

        // 셋 중 하나라도 없으면 칸을 통째로 버림
        if let (Some(slot), Some(name), Some(image)) = (slot, name, image) {
            if !slot.is_empty() && !name.is_empty() && !image.is_empty() {
                equipment.push(EquipmentItem { slot, name, image });
            }
        }
    }

    Ok(CharacterProfile {
        lodestone_id: lodestone_id.to_string(),
        name,
        avatar_url,
        portrait_url,
        stats,
        equipment,
    })
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn attr_of(document: &Html, selector: &Selector, attr: &str) -> String {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

fn next_int_of(document: &Html, selector: &Selector) -> Option<u32> {
    document
        .select(selector)
        .next()
        .and_then(|el| next_element_text(*el))
        .and_then(|text| text.trim().parse().ok())
}

// 텍스트 노드를 건너뛰고 다음 *요소* 형제의 텍스트를 돌려줌
fn next_element_text(node: ego_tree::NodeRef<'_, scraper::Node>) -> Option<String> {
    let mut sibling = node.next_sibling();
    while let Some(current) = sibling {
        if let Some(el) = ElementRef::wrap(current) {
            return Some(el.text().collect());
        }
        sibling = current.next_sibling();
    }
    None
}
