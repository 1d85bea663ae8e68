//! Typed Maps operations and argument parsing
//!
//! A `tools/call` request names a tool and carries a free-form JSON argument
//! object. This module turns that pair into a closed [`Operation`] so the rest
//! of the server can match on it exhaustively.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const OPEN_APP: &str = "open-app";
pub const SEARCH: &str = "search";
pub const DIRECTIONS: &str = "directions";
pub const SHOW_LOCATION: &str = "show-location";
pub const SHOW_COORDINATES: &str = "show-coordinates";
pub const DROP_PIN: &str = "drop-pin";
pub const NEARBY: &str = "nearby";
pub const CREATE_URL: &str = "create-url";

/// Every operation identifier, in catalog order
pub const OPERATION_NAMES: [&str; 8] = [
    OPEN_APP,
    SEARCH,
    DIRECTIONS,
    SHOW_LOCATION,
    SHOW_COORDINATES,
    DROP_PIN,
    NEARBY,
    CREATE_URL,
];

/// Errors raised while turning a tool call into an [`Operation`]
#[derive(Error, Debug)]
pub enum OperationError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Transport mode for directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Transit,
}

impl TravelMode {
    /// Parse a mode name; anything unrecognised falls back to driving
    pub fn from_name(name: &str) -> Self {
        match name {
            "walking" => TravelMode::Walking,
            "transit" => TravelMode::Transit,
            _ => TravelMode::Driving,
        }
    }

    /// Value of the `dirflg` deep-link parameter
    pub fn dirflg(self) -> &'static str {
        match self {
            TravelMode::Driving => "d",
            TravelMode::Walking => "w",
            TravelMode::Transit => "r",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelMode::Driving => write!(f, "driving"),
            TravelMode::Walking => write!(f, "walking"),
            TravelMode::Transit => write!(f, "transit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectionsParams {
    pub to: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl DirectionsParams {
    pub fn travel_mode(&self) -> TravelMode {
        self.mode
            .as_deref()
            .map(TravelMode::from_name)
            .unwrap_or_default()
    }

    /// Mode as the caller wrote it, `driving` when absent
    pub fn mode_label(&self) -> &str {
        self.mode.as_deref().unwrap_or("driving")
    }

    /// True when the origin means "wherever the device is"
    pub fn from_current_location(&self) -> bool {
        self.from
            .as_deref()
            .is_some_and(|from| from.eq_ignore_ascii_case("current location"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressParams {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoordinatesParams {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DropPinParams {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyParams {
    #[serde(rename = "type")]
    pub place_type: String,
    #[serde(default)]
    pub near: Option<String>,
}

/// One of the eight Maps operations with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    OpenApp,
    Search(SearchParams),
    Directions(DirectionsParams),
    ShowLocation(AddressParams),
    ShowCoordinates(CoordinatesParams),
    DropPin(DropPinParams),
    Nearby(NearbyParams),
    CreateUrl(AddressParams),
}

impl Operation {
    /// Build an operation from a tool name and its JSON arguments
    pub fn from_call(name: &str, arguments: Value) -> Result<Self, OperationError> {
        let op = match name {
            OPEN_APP => Operation::OpenApp,
            SEARCH => Operation::Search(parse_args(SEARCH, arguments)?),
            DIRECTIONS => {
                let mut params: DirectionsParams = parse_args(DIRECTIONS, arguments)?;
                params.from = non_empty(params.from);
                params.mode = non_empty(params.mode);
                Operation::Directions(params)
            }
            SHOW_LOCATION => Operation::ShowLocation(parse_args(SHOW_LOCATION, arguments)?),
            SHOW_COORDINATES => {
                let mut params: CoordinatesParams = parse_args(SHOW_COORDINATES, arguments)?;
                params.label = non_empty(params.label);
                Operation::ShowCoordinates(params)
            }
            DROP_PIN => {
                let mut params: DropPinParams = parse_args(DROP_PIN, arguments)?;
                params.label = non_empty(params.label);
                Operation::DropPin(params)
            }
            NEARBY => {
                let mut params: NearbyParams = parse_args(NEARBY, arguments)?;
                params.near = non_empty(params.near);
                Operation::Nearby(params)
            }
            CREATE_URL => Operation::CreateUrl(parse_args(CREATE_URL, arguments)?),
            other => return Err(OperationError::UnknownTool(other.to_string())),
        };

        Ok(op)
    }

    /// Tool identifier of this operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::OpenApp => OPEN_APP,
            Operation::Search(_) => SEARCH,
            Operation::Directions(_) => DIRECTIONS,
            Operation::ShowLocation(_) => SHOW_LOCATION,
            Operation::ShowCoordinates(_) => SHOW_COORDINATES,
            Operation::DropPin(_) => DROP_PIN,
            Operation::Nearby(_) => NEARBY,
            Operation::CreateUrl(_) => CREATE_URL,
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &'static str, arguments: Value) -> Result<T, OperationError> {
    // Clients may omit `arguments` entirely
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };

    serde_json::from_value(arguments).map_err(|source| OperationError::InvalidArguments { tool, source })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
