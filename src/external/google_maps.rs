use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    api::DirectionsAPI,
    config::Config,
    entities::{Coordinates, DirectionsRequest, DirectionsResult, DirectionsRoute, Leg},
    error::Error,
};

use super::check_status;

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for Coordinates {
    fn from(point: LatLng) -> Self {
        Coordinates::new(point.lat, point.lng)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct WireLeg {
    start_location: LatLng,
    end_location: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct WireRoute {
    legs: Vec<WireLeg>,
    #[serde(default)]
    waypoint_order: Vec<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    routes: Vec<WireRoute>,
}

impl From<Response> for DirectionsResult {
    fn from(res: Response) -> Self {
        let routes = res
            .routes
            .into_iter()
            .map(|route| DirectionsRoute {
                legs: route
                    .legs
                    .into_iter()
                    .map(|leg| Leg {
                        start_location: leg.start_location.into(),
                        end_location: leg.end_location.into(),
                    })
                    .collect(),
                waypoint_order: route.waypoint_order,
            })
            .collect();

        DirectionsResult {
            status: res.status,
            routes,
        }
    }
}

/// `waypoints` parameter of the directions web service, `None` without waypoints.
fn waypoints_param(request: &DirectionsRequest) -> Option<String> {
    if request.waypoints.is_empty() {
        return None;
    }

    let mut parts = vec![];

    if request.optimize_waypoints {
        parts.push("optimize:true".to_string());
    }

    for waypoint in &request.waypoints {
        let location: String = waypoint.location.into();

        if waypoint.stopover {
            parts.push(location);
        } else {
            parts.push(format!("via:{}", location));
        }
    }

    Some(parts.join("|"))
}

/// Google Maps Directions web service.
#[derive(Clone, Debug)]
pub struct GoogleDirections {
    client: reqwest::Client,
    api_base: String,
    key: String,
}

impl GoogleDirections {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.google_maps_api_base.clone(),
            key: config.google_maps_api_key.clone(),
        }
    }
}

#[async_trait]
impl DirectionsAPI for GoogleDirections {
    #[tracing::instrument(skip(self, request), fields(waypoints = request.waypoints.len()))]
    async fn route(&self, request: DirectionsRequest) -> Result<DirectionsResult, Error> {
        let url = format!("https://{}/maps/api/directions/json", self.api_base);
        let origin: String = request.origin.into();
        let destination: String = request.destination.into();

        let mut req = self
            .client
            .get(url)
            .query(&[("key", self.key.as_str())])
            .query(&[("origin", origin)])
            .query(&[("destination", destination)])
            .query(&[("mode", request.travel_mode.name())]);

        if let Some(waypoints) = waypoints_param(&request) {
            req = req.query(&[("waypoints", waypoints)]);
        }

        let res = req.send().await?;

        check_status(res.status().as_u16())?;

        let data: Response = res.json().await?;

        Ok(data.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{TravelMode, Waypoint};

    fn request(waypoints: Vec<Waypoint>) -> DirectionsRequest {
        DirectionsRequest {
            origin: Coordinates::new(0.0, 0.0),
            destination: Coordinates::new(2.0, 2.0),
            waypoints,
            travel_mode: TravelMode::Driving,
            optimize_waypoints: true,
        }
    }

    #[test]
    fn waypoints_are_optimized_stopovers() {
        let param = waypoints_param(&request(vec![
            Waypoint {
                location: Coordinates::new(1.0, 1.5),
                stopover: true,
            },
            Waypoint {
                location: Coordinates::new(1.5, 1.0),
                stopover: false,
            },
        ]));

        assert_eq!(param.as_deref(), Some("optimize:true|1,1.5|via:1.5,1"));
    }

    #[test]
    fn no_waypoints_no_param() {
        assert_eq!(waypoints_param(&request(vec![])), None);
    }

    #[test]
    fn decodes_service_response() {
        let res: Response = serde_json::from_str(
            r#"{
                "status": "OK",
                "geocoded_waypoints": [],
                "routes": [{
                    "summary": "I-20",
                    "waypoint_order": [0],
                    "legs": [
                        {"start_location": {"lat": 33.1, "lng": -86.9}, "end_location": {"lat": 33.2, "lng": -86.8}},
                        {"start_location": {"lat": 33.2, "lng": -86.8}, "end_location": {"lat": 33.3, "lng": -86.7}}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let result: DirectionsResult = res.into();

        assert!(result.is_ok());
        assert_eq!(
            result.routes[0].leg_starts(),
            vec![Coordinates::new(33.1, -86.9), Coordinates::new(33.2, -86.8)]
        );
    }

    #[test]
    fn decodes_failure_without_routes() {
        let res: Response = serde_json::from_str(r#"{"status": "ZERO_RESULTS"}"#).unwrap();
        let result: DirectionsResult = res.into();

        assert!(!result.is_ok());
        assert!(result.routes.is_empty());
    }
}
