//! 온보딩 이벤트 정의
//!
//! 이벤트는 가입이 확정된 뒤에만 만들어지며, 생성 후에는 변경할 수 없습니다.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::domain::dto::SignUpRequest;
use crate::domain::models::Session;
use crate::errors::AppError;
use crate::utils::string_utils::is_valid_string;

/// 계정 생성 이벤트 이름
pub const USER_CREATED_EVENT: &str = "app/user.created";

/// 온보딩 작업에 전달되는 가입 정보
///
/// 가입 요청의 6개 필드를 그대로 담습니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingPayload {
    pub email: String,
    pub name: String,
    pub country: String,
    pub investment_goals: String,
    pub risk_tolerance: String,
    pub preferred_industry: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingEvent {
    name: &'static str,
    payload: OnboardingPayload,
}

impl OnboardingEvent {
    /// 프로바이더가 발급한 세션을 받아야만 이벤트를 만들 수 있습니다.
    ///
    /// 페이로드는 세션이 아닌 가입 요청의 원래 값으로 채웁니다.
    pub fn for_created_account(_session: &Session, request: &SignUpRequest) -> Self {
        Self {
            name: USER_CREATED_EVENT,
            payload: OnboardingPayload {
                email: request.email.clone(),
                name: request.full_name.clone(),
                country: request.country.clone(),
                investment_goals: request.investment_goals.clone(),
                risk_tolerance: request.risk_tolerance.clone(),
                preferred_industry: request.preferred_industry.clone(),
            },
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn payload(&self) -> &OnboardingPayload {
        &self.payload
    }

    /// 발행 전 구조 검증
    ///
    /// 모든 필드가 비어 있지 않아야 하고 이메일 형식이 올바라야 합니다.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("email", &self.payload.email),
            ("name", &self.payload.name),
            ("country", &self.payload.country),
            ("investmentGoals", &self.payload.investment_goals),
            ("riskTolerance", &self.payload.risk_tolerance),
            ("preferredIndustry", &self.payload.preferred_industry),
        ];

        if let Some((field, _)) = fields.iter().find(|(_, value)| !is_valid_string(value)) {
            return Err(AppError::DispatchError(format!(
                "{} payload is missing `{}`",
                self.name, field
            )));
        }

        if !self.payload.email.validate_email() {
            return Err(AppError::DispatchError(format!(
                "{} payload has an invalid email",
                self.name
            )));
        }

        Ok(())
    }

    /// 이벤트 플랫폼에 보낼 `data` 값
    pub fn data(&self) -> Result<serde_json::Value, AppError> {
        serde_json::to_value(&self.payload)
            .map_err(|e| AppError::DispatchError(format!("payload serialization failed: {}", e)))
    }
}
