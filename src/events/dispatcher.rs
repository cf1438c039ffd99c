//! 이벤트 디스패처
//!
//! 요청 경로에서 이벤트를 대기열에 넣기만 하고, 실제 발행은 별도 워커 태스크가
//! 순서대로 처리합니다. 대기열은 크기가 제한되어 있으며, 가득 차면 이벤트를 버리고
//! 경고를 남깁니다.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::oneshot;

use crate::config::EventConfig;
use crate::errors::AppError;
use crate::events::{EventPublisher, OnboardingEvent};

struct DispatchJob {
    event: OnboardingEvent,
    done: oneshot::Sender<Result<(), AppError>>,
}

/// 발행 완료를 기다리기 위한 핸들
///
/// 요청 처리 경로는 이 핸들을 버립니다. 테스트나 진단 코드만 `wait()`를 호출합니다.
pub struct DispatchHandle {
    receiver: oneshot::Receiver<Result<(), AppError>>,
}

impl DispatchHandle {
    fn resolved(result: Result<(), AppError>) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(result);
        Self { receiver }
    }

    /// 이벤트가 플랫폼에 전달되었거나 실패로 끝날 때까지 기다립니다.
    pub async fn wait(self) -> Result<(), AppError> {
        self.receiver.await.unwrap_or_else(|_| {
            Err(AppError::DispatchError(
                "dispatcher stopped before the event was handled".to_string(),
            ))
        })
    }
}

pub struct EventDispatcher {
    sender: mpsc::Sender<DispatchJob>,
}

impl EventDispatcher {
    /// 워커 태스크를 띄우고 디스패처를 반환합니다.
    ///
    /// Tokio 런타임 안에서 호출해야 합니다.
    pub fn start(publisher: Arc<dyn EventPublisher>, config: &EventConfig) -> Self {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));

        tokio::spawn(run_worker(receiver, publisher, config.publish_timeout));
        info!("✅ 이벤트 디스패처 시작 (queue: {})", config.queue_capacity);

        Self { sender }
    }

    /// 이벤트를 대기열에 넣습니다. 발행 결과를 기다리지 않습니다.
    ///
    /// 검증 실패, 대기열 포화, 워커 종료는 즉시 `DispatchError`로 해결된
    /// 핸들을 반환하며 호출자에게 에러를 전파하지 않습니다.
    pub fn publish(&self, event: OnboardingEvent) -> DispatchHandle {
        if let Err(err) = event.validate() {
            warn!("⚠️ 이벤트 검증 실패, 발행 생략: {}", err);
            return DispatchHandle::resolved(Err(err));
        }

        let (done, receiver) = oneshot::channel();

        match self.sender.try_send(DispatchJob { event, done }) {
            Ok(()) => debug!("이벤트 대기열 추가"),
            Err(TrySendError::Full(job)) => {
                let err = AppError::DispatchError("event queue is full".to_string());
                warn!("⚠️ 이벤트 유실: {} - {} {:?}", job.event.name(), err, job.event.payload());
                let _ = job.done.send(Err(err));
            }
            Err(TrySendError::Closed(job)) => {
                let err = AppError::DispatchError("event worker has stopped".to_string());
                warn!("⚠️ 이벤트 유실: {} - {} {:?}", job.event.name(), err, job.event.payload());
                let _ = job.done.send(Err(err));
            }
        }

        DispatchHandle { receiver }
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<DispatchJob>,
    publisher: Arc<dyn EventPublisher>,
    publish_timeout: Duration,
) {
    while let Some(DispatchJob { event, done }) = receiver.recv().await {
        let result = deliver(publisher.as_ref(), &event, publish_timeout).await;

        match &result {
            Ok(()) => info!("📨 이벤트 발행 완료: {}", event.name()),
            Err(err) => warn!(
                "⚠️ 이벤트 발행 실패 (계정은 유지됨): {} - {} {:?}",
                event.name(),
                err,
                event.payload()
            ),
        }

        let _ = done.send(result);
    }

    info!("이벤트 디스패처 종료");
}

async fn deliver(
    publisher: &dyn EventPublisher,
    event: &OnboardingEvent,
    publish_timeout: Duration,
) -> Result<(), AppError> {
    let data = event.data()?;

    tokio::time::timeout(publish_timeout, publisher.publish(event.name(), &data))
        .await
        .map_err(|_| {
            AppError::DispatchError(format!(
                "publish timed out after {}ms",
                publish_timeout.as_millis()
            ))
        })?
}
