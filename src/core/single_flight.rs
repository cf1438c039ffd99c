//! # 단일 비행(Single-Flight) 초기화
//!
//! 프로세스 전역에서 한 번만 만들어야 하는 값(저장소 연결, 프로바이더 핸들)을
//! 위한 일회성 생성 프리미티브입니다.
//!
//! ## 동작 규칙
//!
//! | 상태 | `get_or_try_init` 호출 시 |
//! |------|--------------------------|
//! | `Empty` | 새 시도를 시작하고 슬롯에 진행 중 시도를 기록 |
//! | `Pending` | 진행 중인 시도를 복제하여 같은 결과를 기다림 |
//! | `Ready` | 캐시된 값을 즉시 반환 |
//!
//! 시도가 실패하면 슬롯은 `Empty`로 돌아가므로 다음 호출이 다시 시도할 수 있습니다.
//! 같은 시도를 기다리던 모든 호출자는 동일한 에러를 받습니다.
//!
//! ```rust,ignore
//! let flight: SingleFlight<Database, AppError> = SingleFlight::new();
//!
//! let db = flight
//!     .get_or_try_init(|| async move { connector.connect(&uri).await })
//!     .await?;
//! ```

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures_util::future::{BoxFuture, FutureExt, Shared};

type Attempt<T, E> = Shared<BoxFuture<'static, Result<T, E>>>;

enum Slot<T, E>
where
    T: Clone,
    E: Clone,
{
    Empty,
    Pending { generation: u64, attempt: Attempt<T, E> },
    Ready(T),
}

struct State<T, E>
where
    T: Clone,
    E: Clone,
{
    slot: Slot<T, E>,
    /// 시작된 시도 수. 늦게 끝난 이전 시도가 새 시도의 슬롯을 덮어쓰지 않도록 사용
    generation: u64,
}

/// 동시에 여러 호출자가 요청해도 생성 작업을 한 번만 실행하는 셀
pub struct SingleFlight<T, E>
where
    T: Clone,
    E: Clone,
{
    state: Mutex<State<T, E>>,
}

impl<T, E> SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// 이미 만들어진 값이 있으면 반환합니다. 진행 중인 시도는 기다리지 않습니다.
    pub fn get(&self) -> Option<T> {
        match &self.lock().slot {
            Slot::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// 현재 진행 중인 시도가 있는지 여부
    pub fn is_pending(&self) -> bool {
        matches!(self.lock().slot, Slot::Pending { .. })
    }

    /// 값을 반환하거나, 없으면 `init`으로 한 번만 생성합니다.
    ///
    /// # 인자
    ///
    /// * `init` - 슬롯이 비어 있을 때만 호출되는 생성 함수
    ///
    /// # 반환값
    ///
    /// * `Ok(T)` - 캐시된 값 또는 이번(혹은 진행 중이던) 시도의 결과
    /// * `Err(E)` - 공유된 시도의 실패. 슬롯은 비워져 재시도 가능
    pub async fn get_or_try_init<F, Fut>(&self, init: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let (generation, attempt) = {
            let mut state = self.lock();

            let in_flight = match &state.slot {
                Slot::Ready(value) => return Ok(value.clone()),
                Slot::Pending { generation, attempt } => Some((*generation, attempt.clone())),
                Slot::Empty => None,
            };

            match in_flight {
                Some(pending) => pending,
                None => {
                    state.generation += 1;
                    let generation = state.generation;
                    let attempt = init().boxed().shared();
                    state.slot = Slot::Pending {
                        generation,
                        attempt: attempt.clone(),
                    };
                    (generation, attempt)
                }
            }
        };

        let result = attempt.await;

        let mut state = self.lock();
        let settles_current = matches!(
            &state.slot,
            Slot::Pending { generation: current, .. } if *current == generation
        );

        if settles_current {
            state.slot = match &result {
                Ok(value) => Slot::Ready(value.clone()),
                Err(_) => Slot::Empty,
            };
        }

        result
    }

    fn lock(&self) -> MutexGuard<'_, State<T, E>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, E> Default for SingleFlight<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_concurrent_callers_share_one_attempt() {
        let flight: Arc<SingleFlight<u32, String>> = Arc::new(SingleFlight::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let callers = (0..16).map(|_| {
            let flight = flight.clone();
            let calls = calls.clone();
            async move {
                flight
                    .get_or_try_init(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Ok(42)
                    })
                    .await
            }
        });

        let results = futures_util::future::join_all(callers).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|result| *result == Ok(42)));
        assert_eq!(flight.get(), Some(42));
    }

    #[tokio::test]
    async fn test_shared_failure_reaches_every_waiter_and_clears_slot() {
        let flight: Arc<SingleFlight<u32, String>> = Arc::new(SingleFlight::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let callers = (0..4).map(|_| {
            let flight = flight.clone();
            let calls = calls.clone();
            async move {
                flight
                    .get_or_try_init(|| async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                        Err::<u32, _>("refused".to_string())
                    })
                    .await
            }
        });

        let results = futures_util::future::join_all(callers).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|result| *result == Err("refused".to_string())));
        assert_eq!(flight.get(), None);
        assert!(!flight.is_pending());

        let retried = flight.get_or_try_init(|| async { Ok(7) }).await;

        assert_eq!(retried, Ok(7));
        assert_eq!(flight.get(), Some(7));
    }

    #[tokio::test]
    async fn test_cached_value_skips_init() {
        let flight: SingleFlight<&'static str, String> = SingleFlight::new();

        flight.get_or_try_init(|| async { Ok("first") }).await.unwrap();
        let second = flight
            .get_or_try_init(|| async { Err("init ran twice".to_string()) })
            .await;

        assert_eq!(second, Ok("first"));
    }
}
