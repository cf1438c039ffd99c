//! # Application Context
//!
//! 환경 설정에서 서비스 구성 요소를 조립합니다. 전역 레지스트리 대신
//! 한 번 만든 컨텍스트를 HTTP 서버에 명시적으로 주입하며, 테스트는
//! 매번 새 구성 요소를 만들어 사용합니다.
//!
//! ```text
//! StoreConfig ──▶ ConnectionCache ─┐
//! ProviderConfig ──▶ MongoProviderFactory ─┼──▶ AuthGateway ──▶ web::Data<dyn AccountGateway>
//! EventConfig ──▶ EventPublisher ──▶ EventDispatcher ─┘
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::config::{EventConfig, ProviderConfig, SessionCookieSettings, StoreConfig};
use crate::db::ConnectionCache;
use crate::errors::AppError;
use crate::events::{publisher_from_config, EventDispatcher};
use crate::services::auth::{AccountGateway, AuthGateway, GatewayPolicy, MongoProviderFactory};

pub struct AppContext {
    pub store_config: StoreConfig,
    pub provider_config: ProviderConfig,
    pub event_config: EventConfig,
    pub connections: Arc<ConnectionCache>,
    pub gateway: Arc<AuthGateway>,
}

impl AppContext {
    /// 환경 변수에서 설정을 읽어 컨텍스트를 만듭니다.
    ///
    /// 저장소 연결은 만들지 않으며, 이벤트 디스패처 워커를 띄우므로
    /// Tokio 런타임 안에서 호출해야 합니다.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_configs(
            StoreConfig::from_env(),
            ProviderConfig::from_env(),
            EventConfig::from_env(),
        )
    }

    pub fn from_configs(
        store_config: StoreConfig,
        provider_config: ProviderConfig,
        event_config: EventConfig,
    ) -> Result<Self, AppError> {
        let connections = Arc::new(ConnectionCache::from_config(&store_config));

        let publisher = publisher_from_config(&event_config)?;
        let dispatcher = Arc::new(EventDispatcher::start(publisher, &event_config));

        let gateway = Arc::new(AuthGateway::new(
            connections.clone(),
            Arc::new(MongoProviderFactory::new(provider_config.clone())),
            dispatcher,
            GatewayPolicy::from_config(&provider_config),
        ));

        Ok(Self {
            store_config,
            provider_config,
            event_config,
            connections,
            gateway,
        })
    }

    pub fn gateway_data(&self) -> web::Data<dyn AccountGateway> {
        web::Data::from(self.gateway.clone() as Arc<dyn AccountGateway>)
    }

    pub fn connections_data(&self) -> web::Data<ConnectionCache> {
        web::Data::from(self.connections.clone())
    }

    pub fn cookie_settings(&self) -> SessionCookieSettings {
        SessionCookieSettings::from_config(&self.provider_config)
    }
}
