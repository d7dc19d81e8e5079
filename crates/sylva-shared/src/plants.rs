//! Plant bible payloads.

use serde::{Deserialize, Serialize};

/// One species entry of the plant encyclopedia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    pub id: String,
    pub slug: String,
    pub common_name: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub sun_exposure: Option<String>,
    #[serde(default)]
    pub water_needs: Option<String>,
    #[serde(default)]
    pub hardiness_zone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Facets offered by the species listing. Empty when the API is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesFilters {
    #[serde(default)]
    pub families: Vec<String>,
    #[serde(default)]
    pub plant_types: Vec<String>,
    #[serde(default)]
    pub sun_exposures: Vec<String>,
    #[serde(default)]
    pub water_needs: Vec<String>,
}
