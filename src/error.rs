use thiserror::Error;

/// 코어 오류 분류
///
/// - `Fetch`: 외부 페이지 요청 실패 (네트워크 오류 또는 non-success 응답)
/// - `Parse`: 응답 문서를 프로필로 해석할 수 없음
/// - `Store`: MongoDB 조회/저장 실패
///
/// GCD 계산은 실패하지 않습니다. 해를 찾지 못한 입력은 오류가 아니라
/// `None`으로 표현됩니다.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lodestone request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("could not parse profile page: {0}")]
    Parse(String),
    #[error("store operation failed: {0}")]
    Store(#[from] mongodb::error::Error),
}
