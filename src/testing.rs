//! Fixtures and a scripted directions provider for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::{
    api::DirectionsAPI,
    entities::{
        ActiveRoute, DirectionsRequest, DirectionsResult, DirectionsRoute, Leg, Stop, StopList,
    },
    error::Error,
};

pub fn stop(name: &str, latitude: f64, longitude: f64) -> Stop {
    Stop {
        id: name.to_lowercase(),
        name: name.into(),
        latitude,
        longitude,
        time: "7:00 AM".into(),
    }
}

pub fn route(pick_up: Vec<Stop>, drop_off: Vec<Stop>) -> ActiveRoute {
    ActiveRoute {
        route_id: "r1".into(),
        description: "Route 1".into(),
        pick_up: StopList::new(pick_up),
        drop_off: StopList::new(drop_off),
    }
}

/// The pick-up list used throughout: origin (0,0), one stop at (1,1), destination (2,2).
pub fn three_stop_route() -> ActiveRoute {
    route(
        vec![stop("Origin", 0.0, 0.0), stop("Elm St", 1.0, 1.0), stop("School", 2.0, 2.0)],
        vec![
            stop("School", 2.0, 2.0),
            stop("Oak Ave", 3.0, 3.0),
            stop("Pine Rd", 4.0, 4.0),
            stop("Depot", 5.0, 5.0),
        ],
    )
}

/// One leg per consecutive pair of points, in request order.
pub fn legs_through(request: &DirectionsRequest) -> DirectionsResult {
    let mut points = vec![request.origin];
    points.extend(request.waypoints.iter().map(|w| w.location));
    points.push(request.destination);

    let legs = points
        .windows(2)
        .map(|pair| Leg {
            start_location: pair[0],
            end_location: pair[1],
        })
        .collect();

    DirectionsResult::ok(vec![DirectionsRoute {
        legs,
        waypoint_order: (0..request.waypoints.len()).collect(),
    }])
}

pub enum Reply {
    Echo,
    Status(&'static str),
    Fail(Error),
    Hang,
}

struct Scripted {
    gate: Option<oneshot::Receiver<()>>,
    reply: Reply,
}

/// Answers requests from a script, falling back to [`Reply::Echo`] once the
/// script runs out.
#[derive(Default)]
pub struct StubDirections {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<DirectionsRequest>>,
}

impl StubDirections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, reply: Reply) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted { gate: None, reply });
        self
    }

    /// Holds the reply back until the returned sender fires.
    pub fn then_gated(&self, reply: Reply) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();

        self.script.lock().unwrap().push_back(Scripted {
            gate: Some(rx),
            reply,
        });

        tx
    }

    pub fn calls(&self) -> Vec<DirectionsRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectionsAPI for StubDirections {
    async fn route(&self, request: DirectionsRequest) -> Result<DirectionsResult, Error> {
        self.calls.lock().unwrap().push(request.clone());

        let next = self.script.lock().unwrap().pop_front();
        let Scripted { gate, reply } = next.unwrap_or(Scripted {
            gate: None,
            reply: Reply::Echo,
        });

        if let Some(gate) = gate {
            let _ = gate.await;
        }

        match reply {
            Reply::Echo => Ok(legs_through(&request)),
            Reply::Status(status) => Ok(DirectionsResult::failed(status)),
            Reply::Fail(err) => Err(err),
            Reply::Hang => futures::future::pending().await,
        }
    }
}
