//! Climatiq emissions-estimate client.
//!
//! Wraps the hosted estimate endpoint behind a small typed surface: a fixed
//! product-to-selector mapping for the handful of products the app knows how
//! to price, plus a raw-payload escape hatch for callers that supply their
//! own selector. Upstream failures always carry the upstream status and
//! message; there is no silent default.

use serde::Serialize;
use serde_json::Value;

use crate::error::ClimatiqError;

pub const ESTIMATE_URL: &str = "https://api.climatiq.io/estimate";

/// Climatiq requires a data_version alongside activity_id selectors.
pub const DATA_VERSION: &str = "27.27";

#[derive(Debug, Clone, Serialize)]
pub struct EmissionFactorSelector {
    pub activity_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub data_version: String,
}

/// Activity quantity for an estimate. Serializes flat, the way the
/// upstream API expects (`{"mass": 0.2, "mass_unit": "kg"}`).
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Parameters {
    Mass { mass: f64, mass_unit: String },
    Distance { distance: f64, distance_unit: String },
    Energy { energy: f64, energy_unit: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateRequest {
    pub emission_factor: EmissionFactorSelector,
    pub parameters: Parameters,
}

fn selector(activity_id: &str) -> EmissionFactorSelector {
    EmissionFactorSelector {
        activity_id: activity_id.to_string(),
        region: None,
        data_version: DATA_VERSION.to_string(),
    }
}

fn grid_mix_selector() -> EmissionFactorSelector {
    EmissionFactorSelector {
        activity_id: "electricity-energy_source_grid_mix".to_string(),
        region: Some("US".to_string()),
        data_version: DATA_VERSION.to_string(),
    }
}

fn mass(kg: f64) -> Parameters {
    Parameters::Mass {
        mass: kg,
        mass_unit: "kg".to_string(),
    }
}

/// Estimate payload for a known product name, or None when unmapped.
pub fn map_product(name: &str) -> Option<EstimateRequest> {
    let (emission_factor, parameters) = match name.trim().to_lowercase().as_str() {
        "apple" => (selector("food_apple"), mass(0.2)),
        "banana" => (selector("food_banana"), mass(0.2)),
        "beef" => (selector("food_beef"), mass(0.15)),
        "plastic bottle" => (selector("plastic_pet_bottle"), mass(0.03)),
        "electric car" => (
            selector("passenger_vehicle-vehicle_type_car-fuel_source_electric"),
            Parameters::Distance {
                distance: 10.0,
                distance_unit: "km".to_string(),
            },
        ),
        "led bulb" => (
            grid_mix_selector(),
            Parameters::Energy {
                energy: 1.0,
                energy_unit: "kWh".to_string(),
            },
        ),
        // Modeled as avoided grid electricity.
        "solar panel" => (
            grid_mix_selector(),
            Parameters::Energy {
                energy: -1.0,
                energy_unit: "kWh".to_string(),
            },
        ),
        "fast fashion" => (selector("textiles_generic_garment"), mass(0.5)),
        _ => return None,
    };

    Some(EstimateRequest {
        emission_factor,
        parameters,
    })
}

/// Suggested lower-impact substitutes, keyed off the product name.
pub fn suggest_alternatives(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();

    let picks: &[&str] = if lower.contains("beef") || lower.contains("meat") {
        &["plant-based proteins", "chicken", "tofu", "lentils"]
    } else if lower.contains("plastic") {
        &["glass containers", "reusable materials", "biodegradable options"]
    } else if lower.contains("car") || lower.contains("vehicle") {
        &["public transportation", "bicycle", "electric vehicle"]
    } else if lower.contains("fashion") || lower.contains("clothing") {
        &["sustainable brands", "secondhand", "clothing rental"]
    } else {
        &["eco-friendly alternatives", "sustainable options"]
    };

    picks.iter().map(|s| s.to_string()).collect()
}

/// Reshaped upstream estimate.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub co2e: Option<f64>,
    pub co2e_unit: String,
    pub raw: Value,
}

pub struct ClimatiqClient {
    client: reqwest::Client,
    api_key: String,
}

impl ClimatiqClient {
    /// Create a client from the CLIMATIQ_API_KEY environment variable.
    pub fn from_env() -> Result<Self, ClimatiqError> {
        let api_key =
            std::env::var("CLIMATIQ_API_KEY").map_err(|_| ClimatiqError::MissingApiKey)?;
        Ok(Self::new(api_key))
    }

    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    pub async fn estimate(&self, request: &EstimateRequest) -> Result<Estimate, ClimatiqError> {
        self.estimate_raw(serde_json::to_value(request)?).await
    }

    /// POST a caller-supplied estimate payload. A missing `data_version` on
    /// an activity_id selector is filled in before dispatch.
    pub async fn estimate_raw(&self, mut payload: Value) -> Result<Estimate, ClimatiqError> {
        ensure_data_version(&mut payload);

        tracing::debug!(url = ESTIMATE_URL, "requesting Climatiq estimate");

        let response = self
            .client
            .post(ESTIMATE_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text));

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Climatiq error")
                .to_string();
            return Err(ClimatiqError::Upstream {
                status: status.as_u16(),
                message,
                details: body,
            });
        }

        let co2e = body.get("co2e").and_then(Value::as_f64);
        let co2e_unit = body
            .get("co2e_unit")
            .and_then(Value::as_str)
            .unwrap_or("kg")
            .to_string();

        Ok(Estimate {
            co2e,
            co2e_unit,
            raw: body,
        })
    }
}

/// Fill in the default data_version when a payload selects by activity_id
/// without one.
fn ensure_data_version(payload: &mut Value) {
    if let Some(factor) = payload.get_mut("emission_factor") {
        if factor.get("activity_id").is_some() && factor.get("data_version").is_none() {
            if let Some(obj) = factor.as_object_mut() {
                obj.insert(
                    "data_version".to_string(),
                    Value::String(DATA_VERSION.to_string()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_product_known() {
        let request = map_product("beef").expect("beef should be mapped");
        assert_eq!(request.emission_factor.activity_id, "food_beef");
        assert_eq!(request.emission_factor.data_version, DATA_VERSION);

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            json!({
                "emission_factor": {
                    "activity_id": "food_beef",
                    "data_version": "27.27"
                },
                "parameters": { "mass": 0.15, "mass_unit": "kg" }
            })
        );
    }

    #[test]
    fn test_map_product_normalizes_name() {
        assert!(map_product(" Electric Car ").is_some());
        assert!(map_product("LED BULB").is_some());
    }

    #[test]
    fn test_map_product_region_and_energy() {
        let request = map_product("solar panel").unwrap();
        assert_eq!(request.emission_factor.region.as_deref(), Some("US"));

        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(encoded["parameters"]["energy"], json!(-1.0));
        assert_eq!(encoded["parameters"]["energy_unit"], json!("kWh"));
    }

    #[test]
    fn test_map_product_unknown() {
        assert!(map_product("unicorn tears").is_none());
        assert!(map_product("").is_none());
    }

    #[test]
    fn test_ensure_data_version_injected() {
        let mut payload = json!({
            "emission_factor": { "activity_id": "food_apple" },
            "parameters": { "mass": 1, "mass_unit": "kg" }
        });
        ensure_data_version(&mut payload);
        assert_eq!(payload["emission_factor"]["data_version"], json!("27.27"));
    }

    #[test]
    fn test_ensure_data_version_preserved() {
        let mut payload = json!({
            "emission_factor": { "activity_id": "food_apple", "data_version": "1.1" }
        });
        ensure_data_version(&mut payload);
        assert_eq!(payload["emission_factor"]["data_version"], json!("1.1"));
    }

    #[test]
    fn test_suggest_alternatives_keywords() {
        assert!(suggest_alternatives("ground beef").contains(&"tofu".to_string()));
        assert!(suggest_alternatives("plastic cup")
            .contains(&"glass containers".to_string()));
        assert!(suggest_alternatives("sports car")
            .contains(&"public transportation".to_string()));
        assert!(suggest_alternatives("fast fashion haul")
            .contains(&"secondhand".to_string()));
        assert_eq!(
            suggest_alternatives("mystery item"),
            vec!["eco-friendly alternatives", "sustainable options"]
        );
    }
}
