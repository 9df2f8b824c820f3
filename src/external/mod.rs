pub mod google_maps;
pub mod routes_api;

use crate::error::{invalid_input_error, upstream_error, Error};

pub use google_maps::GoogleDirections;
pub use routes_api::RoutesClient;

/// Maps an HTTP status from an upstream service onto the crate's errors.
fn check_status(status_code: u16) -> Result<(), Error> {
    if (400..500).contains(&status_code) {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(())
}

#[test]
fn client_errors_are_invalid_input() {
    assert_eq!(check_status(404).unwrap_err().code, 101);
    assert_eq!(check_status(503).unwrap_err().code, 4);
    assert!(check_status(200).is_ok());
}
