use crate::entities::{StopList, Variant};

/// Popup content for the marker at `index`, looked up in the stop list as
/// received rather than in the order the provider visited the stops.
pub fn popup_text(stops: &StopList, variant: Variant) -> impl Fn(usize) -> String + '_ {
    move |index| match stops.get(index) {
        Some(stop) => format!("{}<br>{}: {}", stop.name, variant.label(), stop.time),
        None => String::new(),
    }
}
