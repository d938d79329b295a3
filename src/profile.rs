use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 로드스톤에서 수집한 캐릭터 프로필
///
/// 필드 이름은 기존 API/저장 형식(camelCase)을 그대로 따릅니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterProfile {
    /// 로드스톤 캐릭터 ID (유니크 키, 스크레이핑이 아니라 요청값에서 옴)
    pub lodestone_id: String,
    pub name: String,
    pub avatar_url: String,
    pub portrait_url: String,
    pub stats: StatTable,
    /// 페이지에 나온 순서 그대로
    pub equipment: Vec<EquipmentItem>,
}

/// characters 컬렉션 문서. 프로필은 최초 수집 이후 갱신되지 않습니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct CharacterDocument {
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    pub character: CharacterProfile,
}

/// 장비 한 칸. 세 필드가 전부 있어야 유효합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub slot: String,
    pub name: String,
    pub image: String,
}

/// 캐릭터 파라미터 표
///
/// 키는 고정 스키마입니다. HP/MP만 정수이고 나머지는 페이지의 표기를
/// 그대로 float으로 받습니다. 없는 값은 직렬화에서 빠집니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatTable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mind: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criticalhitrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub determination: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directhitrate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defense: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magicdefense: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attackpower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skillspeed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attackmagicpotency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healingmagicpotency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spellspeed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub piety: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp: Option<u32>,
}

impl StatTable {
    /// 라벨을 정규화(공백 전부 제거, 소문자)해서 스키마에 있는 스탯에만
    /// 기록합니다. 모르는 라벨은 버리고 `false`를 돌려줍니다.
    pub fn set(&mut self, label: &str, value: f64) -> bool {
        let key: String = label
            .split_whitespace()
            .collect::<String>()
            .to_lowercase();

        let slot = match key.as_str() {
            "strength" => &mut self.strength,
            "dexterity" => &mut self.dexterity,
            "vitality" => &mut self.vitality,
            "intelligence" => &mut self.intelligence,
            "mind" => &mut self.mind,
            "criticalhitrate" => &mut self.criticalhitrate,
            "determination" => &mut self.determination,
            "directhitrate" => &mut self.directhitrate,
            "defense" => &mut self.defense,
            "magicdefense" => &mut self.magicdefense,
            "attackpower" => &mut self.attackpower,
            "skillspeed" => &mut self.skillspeed,
            "attackmagicpotency" => &mut self.attackmagicpotency,
            "healingmagicpotency" => &mut self.healingmagicpotency,
            "spellspeed" => &mut self.spellspeed,
            "tenacity" => &mut self.tenacity,
            "piety" => &mut self.piety,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_labels_before_insertion() {
        let mut stats = StatTable::default();
        assert!(stats.set("Skill Speed", 420.0));
        assert!(stats.set(" Critical Hit Rate ", 2310.0));
        assert_eq!(stats.skillspeed, Some(420.0));
        assert_eq!(stats.criticalhitrate, Some(2310.0));
    }

    #[test]
    fn drops_unrecognized_labels() {
        let mut stats = StatTable::default();
        assert!(!stats.set("Gear Score", 999.0));
        assert_eq!(stats, StatTable::default());
    }

    #[test]
    fn profile_serializes_camel_case() {
        let profile = CharacterProfile {
            lodestone_id: "12345".to_string(),
            name: "Test Character".to_string(),
            avatar_url: "https://img.example/avatar.jpg".to_string(),
            portrait_url: "https://img.example/portrait.jpg".to_string(),
            stats: StatTable::default(),
            equipment: Vec::new(),
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["lodestoneId"], "12345");
        assert_eq!(json["avatarUrl"], "https://img.example/avatar.jpg");
        assert_eq!(json["portraitUrl"], "https://img.example/portrait.jpg");
    }

    #[test]
    fn absent_stats_stay_out_of_the_document() {
        let mut stats = StatTable::default();
        stats.set("Vitality", 3000.0);
        stats.hp = Some(113000);

        let json = serde_json::to_value(&stats).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(json["vitality"], 3000.0);
        assert_eq!(json["hp"], 113000);
    }
}
