//! Estimation request/response DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use crate::llm::Estimate;

/// Request body for `POST /v1/estimate`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub user_id: String,
    /// Free-text meal description to estimate.
    pub description: String,
}

/// Response for `POST /v1/estimate` and `POST /v1/recipes:estimate`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    /// Extracted calorie count. Always positive.
    pub calories: i64,
    /// The model's free-text breakdown, suitable for display.
    pub breakdown: String,
}

impl From<Estimate> for EstimateResponse {
    fn from(estimate: Estimate) -> Self {
        Self {
            calories: estimate.calories,
            breakdown: estimate.breakdown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_response_from_domain() {
        let estimate = Estimate {
            calories: 650,
            breakdown: "Total: 650 kcal".to_string(),
        };
        let resp: EstimateResponse = estimate.into();
        assert_eq!(resp.calories, 650);

        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["calories"], 650);
        assert_eq!(json["breakdown"], "Total: 650 kcal");
    }

    #[test]
    fn estimate_request_deserializes_camel_case() {
        let json = r#"{"userId":"u1","description":"two eggs"}"#;
        let req: EstimateRequest = serde_json::from_str(json).expect("deserialize");
        assert_eq!(req.user_id, "u1");
        assert_eq!(req.description, "two eggs");
    }
}
