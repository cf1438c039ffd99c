//! 저장소 연결 진단
//!
//! 독립 실행형 연결 점검 도구(`check_store`)에서 사용하는 로직입니다.
//!
//! | 결과 | 종료 코드 |
//! |------|-----------|
//! | 연결 성공 | 0 |
//! | 설정 누락 | 1 |
//! | 연결 실패 | 2 |

use std::time::{Duration, Instant};

use crate::db::ConnectionCache;

/// 연결 점검 결과
#[derive(Debug)]
pub enum ConnectivityOutcome<C> {
    Connected(C),
    MissingConfiguration(String),
    ConnectionFailed(String),
}

#[derive(Debug)]
pub struct ConnectivityReport<C> {
    pub outcome: ConnectivityOutcome<C>,
    /// 연결 시도에 걸린 시간
    pub elapsed: Duration,
}

impl<C> ConnectivityReport<C> {
    pub fn exit_code(&self) -> u8 {
        match self.outcome {
            ConnectivityOutcome::Connected(_) => 0,
            ConnectivityOutcome::MissingConfiguration(_) => 1,
            ConnectivityOutcome::ConnectionFailed(_) => 2,
        }
    }
}

/// 연결 캐시를 통해 한 번 연결을 시도하고 결과와 소요 시간을 보고합니다.
pub async fn check_connectivity<C>(cache: &ConnectionCache<C>) -> ConnectivityReport<C>
where
    C: Clone + Send + Sync + 'static,
{
    let start = Instant::now();
    let result = cache.acquire().await;
    let elapsed = start.elapsed();

    // 주소 형식 오류는 설정 누락이 아니라 연결 실패로 분류
    let outcome = match result {
        Ok(connection) => ConnectivityOutcome::Connected(connection),
        Err(err) if !cache.is_configured() => ConnectivityOutcome::MissingConfiguration(err.to_string()),
        Err(err) => ConnectivityOutcome::ConnectionFailed(err.to_string()),
    };

    ConnectivityReport { outcome, elapsed }
}
