use serde::{Deserialize, Serialize};

use crate::entities::StopList;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    PickUp,
    DropOff,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PickUp => "pick_up",
            Self::DropOff => "drop_off",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PickUp => "Pick Up",
            Self::DropOff => "Drop Off",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::PickUp => Self::DropOff,
            Self::DropOff => Self::PickUp,
        }
    }

    /// The variant tabs show pick-up first.
    pub fn from_tab_index(index: usize) -> Self {
        match index {
            0 => Self::PickUp,
            _ => Self::DropOff,
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::PickUp
    }
}

/// Both stop lists of the route currently selected by the rider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveRoute {
    #[serde(default)]
    pub route_id: String,
    #[serde(rename = "route_ds", default)]
    pub description: String,
    #[serde(default)]
    pub pick_up: StopList,
    #[serde(default)]
    pub drop_off: StopList,
}

impl ActiveRoute {
    pub fn stops(&self, variant: Variant) -> &StopList {
        match variant {
            Variant::PickUp => &self.pick_up,
            Variant::DropOff => &self.drop_off,
        }
    }
}
