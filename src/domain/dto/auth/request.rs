//! 계정 생명주기 요청 DTO
//!
//! 가입 폼은 자격 증명 3개 필드(email, password, fullName)와
//! 온보딩 프로필 4개 필드(country, investmentGoals, riskTolerance, preferredIndustry)를 보냅니다.
//! 프로필 필드는 가공 없이 온보딩 이벤트로 전달됩니다.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::string_utils::is_valid_string;

/// 회원가입 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "비밀번호는 6-128자 사이여야 합니다"))]
    pub password: String,

    #[validate(length(min = 1, message = "이름을 입력해주세요"), custom(function = "validate_not_blank"))]
    pub full_name: String,

    /// ISO 국가 코드 (예: "VN")
    #[validate(length(min = 1, message = "국가를 선택해주세요"), custom(function = "validate_not_blank"))]
    pub country: String,

    #[validate(length(min = 1, message = "투자 목표를 선택해주세요"), custom(function = "validate_not_blank"))]
    pub investment_goals: String,

    #[validate(length(min = 1, message = "위험 성향을 선택해주세요"), custom(function = "validate_not_blank"))]
    pub risk_tolerance: String,

    #[validate(length(min = 1, message = "선호 산업을 선택해주세요"), custom(function = "validate_not_blank"))]
    pub preferred_industry: String,
}

impl SignUpRequest {
    /// 공백뿐인 이름/프로필 필드가 있으면 그 필드 이름(camelCase)을 반환합니다.
    ///
    /// 이 필드들은 그대로 온보딩 이벤트가 되므로, 계정 생성 전에 확인해야 합니다.
    pub fn blank_profile_field(&self) -> Option<&'static str> {
        [
            ("fullName", &self.full_name),
            ("country", &self.country),
            ("investmentGoals", &self.investment_goals),
            ("riskTolerance", &self.risk_tolerance),
            ("preferredIndustry", &self.preferred_industry),
        ]
        .into_iter()
        .find(|(_, value)| !is_valid_string(value))
        .map(|(field, _)| field)
    }
}

/// 공백만 있는 값 거부
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if !is_valid_string(value) {
        return Err(ValidationError::new("blank")
            .with_message("공백만 입력할 수 없습니다".into()));
    }
    Ok(())
}

/// 로그인 요청
///
/// 형식 오류도 잘못된 자격 증명과 같은 메시지로 응답하므로 별도 검증하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SignUpRequest {
        SignUpRequest {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
            full_name: "A B".to_string(),
            country: "VN".to_string(),
            investment_goals: "Growth".to_string(),
            risk_tolerance: "Medium".to_string(),
            preferred_industry: "Technology".to_string(),
        }
    }

    #[test]
    fn test_sign_up_request_uses_camel_case_fields() {
        let json = serde_json::json!({
            "email": "a@b.com",
            "password": "secret1",
            "fullName": "A B",
            "country": "VN",
            "investmentGoals": "Growth",
            "riskTolerance": "Medium",
            "preferredIndustry": "Technology"
        });

        let request: SignUpRequest = serde_json::from_value(json).unwrap();

        assert_eq!(request.full_name, "A B");
        assert_eq!(request.preferred_industry, "Technology");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_sign_up_request_rejects_short_password_and_bad_email() {
        let mut request = sample();
        request.password = "12345".to_string();
        request.email = "not-an-email".to_string();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_whitespace_only_profile_field_is_rejected() {
        let mut request = sample();
        request.country = "  ".to_string();

        let errors = request.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("country"));
        assert_eq!(request.blank_profile_field(), Some("country"));
        assert_eq!(sample().blank_profile_field(), None);
    }
}
