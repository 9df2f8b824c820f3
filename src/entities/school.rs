use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub route_id: String,
    #[serde(rename = "route_ds", default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub school_id: String,
    #[serde(rename = "school_ds", default)]
    pub description: String,
    #[serde(default)]
    pub routes: Vec<RouteSummary>,
}
