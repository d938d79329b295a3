//! GCD(Global Cooldown) 계산
//!
//! AkhMorning 공식 기반. 목표 리캐스트를 만드는 최소 스킬 스피드 스탯을
//! 역산하고, 해당 스탯이 다른 기준 리캐스트에 미치는 영향을 표로 만듭니다.

use serde::Serialize;
use std::collections::BTreeMap;

// 만렙(100) 기준 상수
const BASE_GCD_MS: f64 = 2500.0;
const BASE_SKS: f64 = 420.0;
const LVL_DIVISOR: f64 = 2780.0;

/// 파생 GCD를 함께 계산하는 기준 리캐스트 목록
const REFERENCE_GCDS: [f64; 9] = [1.5, 2.0, 2.5, 2.8, 3.0, 3.5, 4.0, 30.0, 60.0];

/// `/calculate` 응답 본문
#[derive(Debug, Clone, Serialize)]
pub struct GcdResult {
    pub gcd: f64,
    pub skillspeed: Option<u32>,
    #[serde(rename = "otherGCDs")]
    pub other_gcds: BTreeMap<String, Option<f64>>,
}

impl GcdResult {
    pub fn calculate(gcd: f64) -> Self {
        Self {
            gcd,
            skillspeed: solve_skill_speed(gcd),
            other_gcds: derive_other_gcds(gcd),
        }
    }
}

/// 스피드 보정 계수: `1000 + ceil(130 * (420 - speed) / 2780)`
fn speed_factor(speed: u32) -> f64 {
    1000.0 + (130.0 * (BASE_SKS - speed as f64) / LVL_DIVISOR).ceil()
}

/// 주어진 스탯이 만드는 실효 GCD. 소수 둘째 자리에서 버림(반올림 아님).
fn effective_gcd(speed: u32) -> f64 {
    (BASE_GCD_MS * speed_factor(speed) / 10000.0).floor() / 100.0
}

/// 목표 GCD를 정확히 만드는 최소 스킬 스피드 스탯
///
/// 도달할 수 없는 목표면 `None`. 오류가 아니라 정상 결과입니다.
pub fn solve_skill_speed(target_gcd: f64) -> Option<u32> {
    // 같은 실효 GCD를 만드는 스탯이 여럿일 때 가장 작은 값을 돌려줘야
    // 하므로 오름차순 선형 탐색이어야 함
    (0u32..=4000).find(|&speed| effective_gcd(speed) == target_gcd)
}

/// 입력 GCD의 스탯이 각 기준 리캐스트에 주는 영향
///
/// 스탯을 역산할 수 없으면 9개 키 전부 `None`으로 채워집니다.
pub fn derive_other_gcds(input_gcd: f64) -> BTreeMap<String, Option<f64>> {
    let speed = solve_skill_speed(input_gcd);

    REFERENCE_GCDS
        .iter()
        .map(|&base| {
            let derived = speed
                .map(|speed| ((base * 1000.0) * speed_factor(speed) / 10000.0).floor() / 100.0);
            (base_key(base), derived)
        })
        .collect()
}

// 기존 API 응답과 같은 키 표기 ("2.5", "30")
fn base_key(base: f64) -> String {
    if base.fract() == 0.0 {
        format!("{}", base as u32)
    } else {
        format!("{}", base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_default_gcd() {
        // 2.50초는 스탯 356에서 처음 도달한다
        assert_eq!(solve_skill_speed(2.5), Some(356));
    }

    #[test]
    fn returns_smallest_speed_on_ties() {
        let speed = solve_skill_speed(2.5).unwrap();
        assert_eq!(speed, 356);
        // 같은 실효 GCD를 만드는 더 큰 스탯이 존재함
        assert_eq!(effective_gcd(420), 2.5);
        assert!(speed < 420);
    }

    #[test]
    fn unreachable_targets_are_none() {
        assert_eq!(solve_skill_speed(0.5), None);
        assert_eq!(solve_skill_speed(-1.0), None);
        // 스탯 0에서 2.55초가 상한이므로 2.80은 도달 불가
        assert_eq!(solve_skill_speed(2.8), None);
    }

    #[test]
    fn round_trips_through_own_formula() {
        for speed in (0u32..=4000).step_by(97) {
            let gcd = effective_gcd(speed);
            let solved = solve_skill_speed(gcd).unwrap();
            assert_eq!(effective_gcd(solved), gcd);
            assert!(solved <= speed);
        }
    }

    #[test]
    fn derives_all_nine_reference_gcds() {
        let table = derive_other_gcds(2.5);
        assert_eq!(table.len(), 9);
        assert_eq!(table["1.5"], Some(1.5));
        assert_eq!(table["2"], Some(2.0));
        assert_eq!(table["2.5"], Some(2.5));
        assert_eq!(table["3.5"], Some(3.51));
        assert_eq!(table["30"], Some(30.09));
        assert_eq!(table["60"], Some(60.18));
    }

    #[test]
    fn unsolvable_input_propagates_none() {
        let table = derive_other_gcds(0.5);
        assert_eq!(table.len(), 9);
        assert!(table.values().all(|v| v.is_none()));
    }

    #[test]
    fn serializes_with_original_field_names() {
        let result = GcdResult::calculate(2.5);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["gcd"], 2.5);
        assert_eq!(json["skillspeed"], 356);
        assert_eq!(json["otherGCDs"]["2.5"], 2.5);
    }
}
