//! Operation to command translation
//!
//! Pure mapping from an [`Operation`] to the shell command that drives Maps and
//! the confirmation text returned to the client. Nothing here performs I/O.

use crate::escape::{percent_encode, shell_quote};
use crate::operation::{
    AddressParams, CoordinatesParams, DirectionsParams, DropPinParams, NearbyParams, Operation,
    SearchParams,
};

/// Deep-link scheme handled by the Maps app
pub const APP_URL_BASE: &str = "maps://";

/// Web equivalent of [`APP_URL_BASE`]
pub const WEB_URL_BASE: &str = "https://maps.apple.com/";

/// AppleScript that brings Maps to the foreground
pub const ACTIVATE_SCRIPT: &str = r#"tell application "Maps" to activate"#;

/// Result of translating one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Shell command to run, `None` when nothing is executed
    pub command: Option<String>,
    /// Confirmation text for the client
    pub message: String,
}

impl Translation {
    fn run(command: String, message: String) -> Self {
        Self {
            command: Some(command),
            message,
        }
    }
}

/// Translate an operation into its command and confirmation text
pub fn translate(op: &Operation) -> Translation {
    match op {
        Operation::OpenApp => Translation::run(
            format!("osascript -e {}", shell_quote(ACTIVATE_SCRIPT)),
            "Opened Apple Maps".into(),
        ),
        Operation::Search(params) => search(params),
        Operation::Directions(params) => directions(params),
        Operation::ShowLocation(params) => show_location(params),
        Operation::ShowCoordinates(params) => show_coordinates(params),
        Operation::DropPin(params) => drop_pin(params),
        Operation::Nearby(params) => nearby(params),
        Operation::CreateUrl(params) => create_url(params),
    }
}

/// Assemble `{base}?k=v&k=v` from already encoded pairs
fn url(base: &str, pairs: &[(&str, String)]) -> String {
    let query = pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

fn open_command(url: &str) -> String {
    format!("open {}", shell_quote(url))
}

fn search(params: &SearchParams) -> Translation {
    let link = url(APP_URL_BASE, &[("q", percent_encode(&params.query))]);
    Translation::run(open_command(&link), format!("Searching for: {}", params.query))
}

fn directions(params: &DirectionsParams) -> Translation {
    let mut pairs = vec![("daddr", percent_encode(&params.to))];

    if let Some(from) = params.from.as_deref() {
        if !params.from_current_location() {
            pairs.push(("saddr", percent_encode(from)));
        }
    }

    pairs.push(("dirflg", params.travel_mode().dirflg().to_string()));

    let message = match params.from.as_deref() {
        Some(from) => format!(
            "Getting {} directions from {} to {}",
            params.mode_label(),
            from,
            params.to
        ),
        None => format!("Getting {} directions to {}", params.mode_label(), params.to),
    };

    Translation::run(open_command(&url(APP_URL_BASE, &pairs)), message)
}

fn show_location(params: &AddressParams) -> Translation {
    let link = url(APP_URL_BASE, &[("address", percent_encode(&params.address))]);
    Translation::run(open_command(&link), format!("Showing: {}", params.address))
}

fn show_coordinates(params: &CoordinatesParams) -> Translation {
    let lat = format_coordinate(params.latitude);
    let lon = format_coordinate(params.longitude);

    let mut pairs = vec![("ll", format!("{},{}", lat, lon))];
    if let Some(label) = params.label.as_deref() {
        pairs.push(("q", percent_encode(label)));
    }

    let message = match params.label.as_deref() {
        Some(label) => format!("Showing coordinates: {}, {} ({})", lat, lon, label),
        None => format!("Showing coordinates: {}, {}", lat, lon),
    };

    Translation::run(open_command(&url(APP_URL_BASE, &pairs)), message)
}

fn drop_pin(params: &DropPinParams) -> Translation {
    let mut pairs = vec![("address", percent_encode(&params.address))];
    if let Some(label) = params.label.as_deref() {
        pairs.push(("q", percent_encode(label)));
    }

    let message = match params.label.as_deref() {
        Some(label) => format!("Dropped pin at: {} ({})", params.address, label),
        None => format!("Dropped pin at: {}", params.address),
    };

    Translation::run(open_command(&url(APP_URL_BASE, &pairs)), message)
}

fn nearby(params: &NearbyParams) -> Translation {
    // Encode the assembled phrase, never the parts
    let (phrase, message) = match params.near.as_deref() {
        Some(near) => (
            format!("{} near {}", params.place_type, near),
            format!("Searching for {} near {}", params.place_type, near),
        ),
        None => (
            params.place_type.clone(),
            format!("Searching for {} nearby", params.place_type),
        ),
    };

    let link = url(APP_URL_BASE, &[("q", percent_encode(&phrase))]);
    Translation::run(open_command(&link), message)
}

fn create_url(params: &AddressParams) -> Translation {
    let pairs = [("address", percent_encode(&params.address))];
    let app_url = url(APP_URL_BASE, &pairs);
    let web_url = url(WEB_URL_BASE, &pairs);

    Translation {
        command: None,
        message: format!("Apple Maps URL: {}\nWeb URL: {}", app_url, web_url),
    }
}

/// Plain decimal rendering (never exponent form), with `-0` shown as `0`
fn format_coordinate(value: f64) -> String {
    if value == 0.0 {
        return "0".into();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translate_call(name: &str, args: serde_json::Value) -> Translation {
        let op = Operation::from_call(name, args).expect("valid operation");
        translate(&op)
    }

    fn command_of(t: &Translation) -> &str {
        t.command.as_deref().expect("command expected")
    }

    #[test]
    fn test_open_app() {
        let t = translate(&Operation::OpenApp);
        assert_eq!(
            command_of(&t),
            r#"osascript -e 'tell application "Maps" to activate'"#
        );
        assert_eq!(t.message, "Opened Apple Maps");
    }

    #[test]
    fn test_search_scenario() {
        let t = translate_call("search", json!({"query": "San Francisco, CA"}));
        assert_eq!(command_of(&t), "open 'maps://?q=San%20Francisco%2C%20CA'");
        assert_eq!(t.message, "Searching for: San Francisco, CA");
    }

    #[test]
    fn test_search_with_apostrophe_stays_quoted() {
        let t = translate_call("search", json!({"query": "Joe's Pizza & Bar?"}));
        assert_eq!(command_of(&t), "open 'maps://?q=Joe%27s%20Pizza%20%26%20Bar%3F'");
        assert_eq!(t.message, "Searching for: Joe's Pizza & Bar?");
    }

    #[test]
    fn test_directions_current_location_scenario() {
        let t = translate_call("directions", json!({"to": "Airport", "from": "current location"}));
        let cmd = command_of(&t);
        assert!(!cmd.contains("saddr"), "{}", cmd);
        assert!(cmd.contains("daddr=Airport"));
        assert!(cmd.contains("dirflg=d"));
        assert_eq!(t.message, "Getting driving directions from current location to Airport");
    }

    #[test]
    fn test_current_location_any_casing() {
        for from in ["Current Location", "CURRENT LOCATION", "cUrReNt LoCaTiOn"] {
            let t = translate_call("directions", json!({"to": "Home", "from": from}));
            assert!(!command_of(&t).contains("saddr"), "from={}", from);
        }
    }

    #[test]
    fn test_padded_current_location_is_a_real_origin() {
        let t = translate_call("directions", json!({"to": "Airport", "from": "  current location "}));
        assert_eq!(
            command_of(&t),
            "open 'maps://?daddr=Airport&saddr=%20%20current%20location%20&dirflg=d'"
        );
    }

    #[test]
    fn test_directions_all_fields() {
        let t = translate_call(
            "directions",
            json!({"to": "Golden Gate Park", "from": "Ferry Building", "mode": "walking"}),
        );
        assert_eq!(
            command_of(&t),
            "open 'maps://?daddr=Golden%20Gate%20Park&saddr=Ferry%20Building&dirflg=w'"
        );
        assert_eq!(
            t.message,
            "Getting walking directions from Ferry Building to Golden Gate Park"
        );
    }

    #[test]
    fn test_directions_mode_codes() {
        for (mode, code) in [("driving", "d"), ("walking", "w"), ("transit", "r"), ("hovercraft", "d")] {
            let t = translate_call("directions", json!({"to": "X", "mode": mode}));
            assert!(
                command_of(&t).ends_with(&format!("dirflg={}'", code)),
                "mode={} cmd={}",
                mode,
                command_of(&t)
            );
        }

        let t = translate_call("directions", json!({"to": "X"}));
        assert!(command_of(&t).contains("dirflg=d"));
        assert_eq!(t.message, "Getting driving directions to X");
    }

    #[test]
    fn test_unknown_mode_keeps_label() {
        let t = translate_call("directions", json!({"to": "X", "mode": "cycling"}));
        assert_eq!(t.message, "Getting cycling directions to X");
        assert!(command_of(&t).contains("dirflg=d"));
    }

    #[test]
    fn test_show_location() {
        let t = translate_call("show-location", json!({"address": "1 Infinite Loop, Cupertino"}));
        assert_eq!(
            command_of(&t),
            "open 'maps://?address=1%20Infinite%20Loop%2C%20Cupertino'"
        );
        assert_eq!(t.message, "Showing: 1 Infinite Loop, Cupertino");
    }

    #[test]
    fn test_show_coordinates_origin_scenario() {
        let t = translate_call("show-coordinates", json!({"latitude": 0, "longitude": 0}));
        let cmd = command_of(&t);
        assert!(cmd.contains("ll=0,0"));
        assert!(!cmd.contains("q="));
        assert_eq!(t.message, "Showing coordinates: 0, 0");
    }

    #[test]
    fn test_show_coordinates_with_label() {
        let t = translate_call(
            "show-coordinates",
            json!({"latitude": 37.7749, "longitude": -122.4194, "label": "City Hall"}),
        );
        assert_eq!(
            command_of(&t),
            "open 'maps://?ll=37.7749,-122.4194&q=City%20Hall'"
        );
        assert_eq!(t.message, "Showing coordinates: 37.7749, -122.4194 (City Hall)");
    }

    #[test]
    fn test_negative_zero_renders_as_zero() {
        assert_eq!(format_coordinate(-0.0), "0");
        assert_eq!(format_coordinate(1.5), "1.5");
        assert_eq!(format_coordinate(1e-7), "0.0000001");
    }

    #[test]
    fn test_drop_pin() {
        let t = translate_call("drop-pin", json!({"address": "Pier 39"}));
        assert_eq!(command_of(&t), "open 'maps://?address=Pier%2039'");
        assert_eq!(t.message, "Dropped pin at: Pier 39");

        let t = translate_call("drop-pin", json!({"address": "Pier 39", "label": "Sea lions"}));
        assert_eq!(command_of(&t), "open 'maps://?address=Pier%2039&q=Sea%20lions'");
        assert_eq!(t.message, "Dropped pin at: Pier 39 (Sea lions)");
    }

    #[test]
    fn test_nearby_scenario() {
        let t = translate_call("nearby", json!({"type": "coffee", "near": "Union Square"}));
        assert_eq!(command_of(&t), "open 'maps://?q=coffee%20near%20Union%20Square'");
        assert_eq!(t.message, "Searching for coffee near Union Square");
    }

    #[test]
    fn test_nearby_without_location() {
        let t = translate_call("nearby", json!({"type": "gas stations"}));
        assert_eq!(command_of(&t), "open 'maps://?q=gas%20stations'");
        assert_eq!(t.message, "Searching for gas stations nearby");
    }

    #[test]
    fn test_create_url_scenario() {
        let t = translate_call("create-url", json!({"address": "Eiffel Tower, Paris"}));
        assert!(t.command.is_none());
        assert!(t
            .message
            .contains("maps://?address=Eiffel%20Tower%2C%20Paris"));
        assert!(t
            .message
            .contains("https://maps.apple.com/?address=Eiffel%20Tower%2C%20Paris"));
    }

    #[test]
    fn test_only_create_url_skips_execution() {
        let ops = [
            Operation::OpenApp,
            Operation::from_call("search", json!({"query": "a"})).unwrap(),
            Operation::from_call("directions", json!({"to": "a"})).unwrap(),
            Operation::from_call("show-location", json!({"address": "a"})).unwrap(),
            Operation::from_call("show-coordinates", json!({"latitude": 1, "longitude": 2})).unwrap(),
            Operation::from_call("drop-pin", json!({"address": "a"})).unwrap(),
            Operation::from_call("nearby", json!({"type": "a"})).unwrap(),
        ];
        for op in ops {
            assert!(translate(&op).command.is_some(), "{} should run a command", op.name());
        }
    }

    #[test]
    fn test_absent_optionals_never_appear() {
        let t = translate_call("directions", json!({"to": "X"}));
        assert!(!command_of(&t).contains("saddr"));

        let t = translate_call("drop-pin", json!({"address": "X", "label": ""}));
        assert!(!command_of(&t).contains("q="));

        let t = translate_call("show-coordinates", json!({"latitude": 1, "longitude": 2, "label": null}));
        assert!(!command_of(&t).contains("&q"));
    }

    #[test]
    fn test_injection_attempt_is_neutralised() {
        let t = translate_call("show-location", json!({"address": "x'; rm -rf ~; echo '"}));
        let cmd = command_of(&t);
        // Only the two quotes wrapping the URL remain
        assert_eq!(cmd.matches('\'').count(), 2, "{}", cmd);
        assert!(!cmd.contains(';'));
    }
}
