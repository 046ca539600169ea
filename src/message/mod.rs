// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! DTO message model.
//!
//! A message is identified on the wire by a marker key (`Typ<Name>`). The
//! boolean guards only look for that key; [`parse_message`] additionally
//! deserializes the payload and reports why a value was rejected.

pub mod fixtures;
pub mod schema;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::api::validation::validators;
use crate::error::DtoError;
use schema::{MessageField, MessageSchema};

/// Prefix every marker key starts with.
pub const TYPE_ID_PREFIX: &str = "Typ";

/// Builds the marker key for a message name.
pub fn type_id_for(name: &str) -> String {
    format!("{}{}", TYPE_ID_PREFIX, name)
}

/// A message that can travel between the server and generated clients.
///
/// Usually implemented through [`dto_message!`](crate::dto_message).
pub trait DtoMessage: Serialize + DeserializeOwned {
    /// Logical package the message belongs to.
    const PACKAGE: &'static str;
    /// Message name, also the name of the generated client interface.
    const NAME: &'static str;
    /// Marker key, `Typ<NAME>`.
    const TYPE_ID: &'static str;

    /// Wire fields in declaration order, without the marker.
    fn fields() -> Vec<MessageField>;

    fn schema() -> MessageSchema {
        MessageSchema {
            package: Self::PACKAGE,
            name: Self::NAME,
            type_id: Self::TYPE_ID,
            fields: Self::fields(),
        }
    }

    fn allow() -> AllowMessage {
        AllowMessage::new(Self::PACKAGE, Self::NAME)
    }
}

/// Package and name of a message the registry is permitted to handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Validate)]
pub struct AllowMessage {
    #[validate(custom(function = "validators::validate_identifier"))]
    pub package: String,
    #[validate(custom(function = "validators::validate_identifier"))]
    pub name: String,
}

impl AllowMessage {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// `package.Name`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.package, self.name)
    }
}

impl fmt::Display for AllowMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// True iff `value` is a JSON object that has `marker` as a key.
///
/// The marker's value is not inspected, `null` counts as present.
pub fn has_marker(value: &Value, marker: &str) -> bool {
    value
        .as_object()
        .map_or(false, |object| object.contains_key(marker))
}

/// Boolean guard for message `M`. Never fails; other fields are not checked.
pub fn is_message<M: DtoMessage>(value: &Value) -> bool {
    has_marker(value, M::TYPE_ID)
}

/// Validating counterpart of [`is_message`]: requires the marker and a payload
/// that deserializes into `M`.
pub fn parse_message<M: DtoMessage>(value: &Value) -> Result<M, DtoError> {
    if !value.is_object() {
        return Err(DtoError::NotAnObject {
            message: M::allow().full_name(),
            found: json_kind(value),
        });
    }
    if !is_message::<M>(value) {
        return Err(DtoError::MissingMarker {
            message: M::allow().full_name(),
            marker: M::TYPE_ID.to_string(),
        });
    }
    M::deserialize(value).map_err(|source| DtoError::InvalidPayload {
        message: M::allow().full_name(),
        source,
    })
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_marker_on_objects_only() {
        assert!(has_marker(&json!({ "TypX": 1 }), "TypX"));
        assert!(has_marker(&json!({ "TypX": null }), "TypX"));
        assert!(!has_marker(&json!({ "X": 1 }), "TypX"));
        assert!(!has_marker(&json!(null), "TypX"));
        assert!(!has_marker(&json!("TypX"), "TypX"));
        assert!(!has_marker(&json!(["TypX"]), "TypX"));
        assert!(!has_marker(&json!(7), "TypX"));
    }

    #[test]
    fn test_type_id_for() {
        assert_eq!(type_id_for("TestMessage"), "TypTestMessage");
    }

    #[test]
    fn test_allow_message_names() {
        let allow = AllowMessage::new("fixtures", "TestMessage");
        assert_eq!(allow.full_name(), "fixtures.TestMessage");
        assert_eq!(allow.to_string(), "fixtures.TestMessage");
        assert!(allow.validate().is_ok());
        assert!(AllowMessage::new("", "TestMessage").validate().is_err());
        assert!(AllowMessage::new("fixtures", "Test.Message").validate().is_err());
    }
}
