//! The decoded vehicle record returned by `DecodeVinValuesExtended`.
//!
//! # Design
//! Known fields are plain `Option<String>` members named in snake case. Each
//! one is renamed to the vPIC wire name and keeps its snake-case name as an
//! alias, so both spellings are accepted on input while output always uses
//! the wire name. Blank strings and `null` are read as `None`, which means a
//! record never holds `Some("")`. Keys the struct does not know land in
//! `extra` rather than being rejected, so schema growth on the service side
//! does not break decoding.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Success sentinel for the `ErrorCode` field.
pub const SUCCESS_CODE: &str = "0";

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_text))
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Fields from the payload that have no dedicated member, minus blank values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExtraFields(BTreeMap<String, Value>);

impl<'de> Deserialize<'de> for ExtraFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = BTreeMap::<String, Value>::deserialize(deserializer)?;
        map.retain(|_, v| !is_blank(v));
        Ok(ExtraFields(map))
    }
}

impl Deref for ExtraFields {
    type Target = BTreeMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

macro_rules! decoded_vehicle {
    ($( $field:ident, $alias:tt => $wire:tt; )+) => {
        /// One result row of an extended VIN decode.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct DecodedVehicle {
            $(
                #[serde(
                    rename = $wire,
                    alias = $alias,
                    deserialize_with = "blank_as_none",
                    skip_serializing_if = "Option::is_none"
                )]
                pub $field: Option<String>,
            )+
            /// Unrecognized keys, kept verbatim.
            #[serde(flatten)]
            pub extra: ExtraFields,
        }

        impl DecodedVehicle {
            fn known_fields(&self) -> Vec<(&str, Option<&str>)> {
                vec![$(($wire, self.$field.as_deref())),+]
            }
        }
    };
}

decoded_vehicle! {
    // identity
    vin, "vin" => "VIN";
    make, "make" => "Make";
    model, "model" => "Model";
    model_year, "model_year" => "ModelYear";
    manufacturer, "manufacturer" => "Manufacturer";
    make_id, "make_id" => "MakeID";
    model_id, "model_id" => "ModelID";
    manufacturer_id, "manufacturer_id" => "ManufacturerID";

    // specs
    body_class, "body_class" => "BodyClass";
    vehicle_type, "vehicle_type" => "VehicleType";
    doors, "doors" => "Doors";
    trim, "trim" => "Trim";
    trim_alt, "trim_alt" => "Trim2";
    axles, "axles" => "Axles";
    axle_configuration, "axle_configuration" => "AxleConfiguration";
    body_cab_type, "body_cab_type" => "BodyCabType";
    bed_type, "bed_type" => "BedType";
    bed_length_in, "bed_length_in" => "BedLengthIn";
    bus_type, "bus_type" => "BusType";
    bus_floor_config, "bus_floor_config" => "BusFloorConfigType";
    bus_length, "bus_length" => "BusLength";
    custom_motorcycle_type, "custom_motorcycle_type" => "CustomMotorcycleType";

    // drivetrain
    engine_model, "engine_model" => "EngineModel";
    engine_cylinders, "engine_cylinders" => "EngineCylinders";
    displacement_liters, "displacement_liters" => "DisplacementL";
    displacement_cc, "displacement_cc" => "DisplacementCC";
    displacement_ci, "displacement_ci" => "DisplacementCI";
    fuel_type, "fuel_type" => "FuelTypePrimary";
    transmission_style, "transmission_style" => "TransmissionStyle";
    drive_type, "drive_type" => "DriveType";

    // safety
    abs, "abs" => "ABS";
    esc, "esc" => "ESC";
    airbag_locations_front, "airbag_locations_front" => "AirBagLocFront";
    airbag_locations_curtain, "airbag_locations_curtain" => "AirBagLocCurtain";
    airbag_locations_knee, "airbag_locations_knee" => "AirBagLocKnee";
    airbag_locations_seat, "airbag_locations_seat" => "AirBagLocSeatCushion";
    airbag_locations_side, "airbag_locations_side" => "AirBagLocSide";

    // plant
    plant_city, "plant_city" => "PlantCity";
    plant_state, "plant_state" => "PlantState";
    plant_country, "plant_country" => "PlantCountry";
    plant_company, "plant_company" => "PlantCompanyName";

    // errors reported by the service
    error_code, "error_code" => "ErrorCode";
    error_text, "error_text" => "ErrorText";
    additional_error_text, "additional_error_text" => "AdditionalErrorText";
    suggested_vin, "suggested_vin" => "SuggestedVIN";
    possible_values, "possible_values" => "PossibleValues";
}

impl DecodedVehicle {
    /// Build a record from one JSON object, keyed by wire or field names.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// True unless the service reported an error code other than `"0"`.
    pub fn is_success(&self) -> bool {
        !matches!(self.error_code.as_deref(), Some(code) if code != SUCCESS_CODE)
    }

    /// Every present field as `(wire name, value)`.
    ///
    /// Known fields come first in declaration order, followed by extras
    /// sorted by key.
    pub fn present_fields(&self) -> Vec<(&str, Cow<'_, str>)> {
        let known = self
            .known_fields()
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, Cow::Borrowed(v))));
        let extra = self.extra.iter().map(|(name, value)| {
            let text = match value {
                Value::String(s) => Cow::Borrowed(s.as_str()),
                other => Cow::Owned(other.to_string()),
            };
            (name.as_str(), text)
        });
        known.chain(extra).collect()
    }
}

/// Top-level envelope of a vPIC response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct DecodeResponse {
    #[serde(rename = "Results", default)]
    pub results: Option<Vec<Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names_are_mapped() {
        let v = DecodedVehicle::from_value(json!({
            "VIN": "19UUA56922A021559",
            "Make": "BMW",
            "Model": "X3",
            "ModelYear": "2011",
            "FuelTypePrimary": "Gasoline",
            "PlantCompanyName": "BMW Manufacturing Co."
        }))
        .unwrap();
        assert_eq!(v.make.as_deref(), Some("BMW"));
        assert_eq!(v.model_year.as_deref(), Some("2011"));
        assert_eq!(v.fuel_type.as_deref(), Some("Gasoline"));
        assert_eq!(v.plant_company.as_deref(), Some("BMW Manufacturing Co."));
        assert!(v.extra.is_empty());
    }

    #[test]
    fn field_names_are_accepted_too() {
        let v = DecodedVehicle::from_value(json!({
            "make": "Honda",
            "model_year": "2002",
            "trim_alt": "Type S"
        }))
        .unwrap();
        assert_eq!(v.make.as_deref(), Some("Honda"));
        assert_eq!(v.model_year.as_deref(), Some("2002"));
        assert_eq!(v.trim_alt.as_deref(), Some("Type S"));
    }

    #[test]
    fn blank_strings_become_none() {
        let v = DecodedVehicle::from_value(json!({
            "Make": "BMW",
            "Model": "",
            "Trim": "   ",
            "Doors": null
        }))
        .unwrap();
        assert_eq!(v.make.as_deref(), Some("BMW"));
        assert!(v.model.is_none());
        assert!(v.trim.is_none());
        assert!(v.doors.is_none());
    }

    #[test]
    fn unknown_fields_are_retained_without_blanks() {
        let v = DecodedVehicle::from_value(json!({
            "Make": "BMW",
            "EngineHP": "300",
            "GVWR": "Class 1D",
            "Note": "",
            "BasePrice": null
        }))
        .unwrap();
        assert_eq!(v.extra.get("EngineHP"), Some(&json!("300")));
        assert_eq!(v.extra.get("GVWR"), Some(&json!("Class 1D")));
        assert!(!v.extra.contains_key("Note"));
        assert!(!v.extra.contains_key("BasePrice"));
    }

    #[test]
    fn numeric_values_are_kept_as_text() {
        let v = DecodedVehicle::from_value(json!({"MakeID": 452})).unwrap();
        assert_eq!(v.make_id.as_deref(), Some("452"));
    }

    #[test]
    fn success_sentinel() {
        let mut v = DecodedVehicle::default();
        assert!(v.is_success());
        v.error_code = Some("0".into());
        assert!(v.is_success());
        v.error_code = Some("1".into());
        assert!(!v.is_success());
    }

    #[test]
    fn serializes_with_wire_names_and_skips_absent() {
        let v = DecodedVehicle::from_value(json!({"make": "BMW", "EngineHP": "300"})).unwrap();
        let out = serde_json::to_value(&v).unwrap();
        assert_eq!(out, json!({"Make": "BMW", "EngineHP": "300"}));
    }

    #[test]
    fn present_fields_order() {
        let v = DecodedVehicle::from_value(json!({
            "Model": "X3",
            "Make": "BMW",
            "Zeta": "z",
            "Alpha": 1,
            "ErrorCode": "0"
        }))
        .unwrap();
        let fields: Vec<(String, String)> = v
            .present_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.into_owned()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("Make".to_string(), "BMW".to_string()),
                ("Model".to_string(), "X3".to_string()),
                ("ErrorCode".to_string(), "0".to_string()),
                ("Alpha".to_string(), "1".to_string()),
                ("Zeta".to_string(), "z".to_string()),
            ]
        );
    }

    #[test]
    fn field_table_matches_struct() {
        let v = DecodedVehicle::default();
        assert_eq!(v.known_fields().len(), 46);
        assert!(v.known_fields().contains(&("FuelTypePrimary", None)));
    }
}
