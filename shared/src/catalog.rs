//! Tool definitions advertised by `tools/list`
//!
//! Property names and types here must match the `Deserialize` structs in
//! [`crate::operation`].

use serde_json::json;

use crate::operation::*;
use crate::Tool;

/// Get all available tools
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: OPEN_APP.into(),
            description: "Open the Apple Maps application".into(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: SEARCH.into(),
            description: "Search for a location in Apple Maps".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Place, address or search term"
                    }
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: DIRECTIONS.into(),
            description: "Get directions between two locations in Apple Maps".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "to": {
                        "type": "string",
                        "description": "Destination address or place"
                    },
                    "from": {
                        "type": "string",
                        "description": "Starting point; omit or use \"current location\" for the device location"
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["driving", "walking", "transit"],
                        "default": "driving",
                        "description": "Transportation mode"
                    }
                },
                "required": ["to"]
            }),
        },
        Tool {
            name: SHOW_LOCATION.into(),
            description: "Show a specific address in Apple Maps".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "Address to show"
                    }
                },
                "required": ["address"]
            }),
        },
        Tool {
            name: SHOW_COORDINATES.into(),
            description: "Show a latitude/longitude position in Apple Maps".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "latitude": {
                        "type": "number",
                        "description": "Latitude in decimal degrees"
                    },
                    "longitude": {
                        "type": "number",
                        "description": "Longitude in decimal degrees"
                    },
                    "label": {
                        "type": "string",
                        "description": "Optional label for the position"
                    }
                },
                "required": ["latitude", "longitude"]
            }),
        },
        Tool {
            name: DROP_PIN.into(),
            description: "Drop a pin at an address in Apple Maps".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "Address to pin"
                    },
                    "label": {
                        "type": "string",
                        "description": "Optional label for the pin"
                    }
                },
                "required": ["address"]
            }),
        },
        Tool {
            name: NEARBY.into(),
            description: "Search for places of a given type nearby or near a location".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "type": {
                        "type": "string",
                        "description": "Kind of place, e.g. coffee, gas stations, restaurants"
                    },
                    "near": {
                        "type": "string",
                        "description": "Location to search around; omit to search near the device"
                    }
                },
                "required": ["type"]
            }),
        },
        Tool {
            name: CREATE_URL.into(),
            description: "Create shareable Apple Maps links for an address without opening Maps".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "address": {
                        "type": "string",
                        "description": "Address to link to"
                    }
                },
                "required": ["address"]
            }),
        },
    ]
}
