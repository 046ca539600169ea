// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fixture messages used by router tests and the demo REST surface.

use serde::Serialize;
use serde_json::Value;

use super::{json_kind, parse_message, DtoMessage};
use crate::error::DtoError;

pub const FIXTURES_PACKAGE: &str = "fixtures";

dto_message! {
    /// First fixture message.
    pub struct TestMessage in "fixtures" marked "TypTestMessage" {
        "Id" => id: i64,
        "Name" => name: String,
        "Ok" => ok: bool,
    }
    guard is_test_message;
}

dto_message! {
    /// Second fixture message, same layout with disjoint field names.
    pub struct Test1Message in "fixtures" marked "TypTest1Message" {
        "Id1" => id1: i64,
        "Name1" => name1: String,
        "Ok1" => ok1: bool,
    }
    guard is_test1_message;
}

/// Explicitly discriminated fixture message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FixtureMessage {
    Test(TestMessage),
    Test1(Test1Message),
}

impl FixtureMessage {
    /// Picks the variant by marker and parses the payload.
    ///
    /// Unlike the boolean guards, a value carrying both markers is rejected
    /// with [`DtoError::AmbiguousMarkers`] instead of matching both.
    pub fn classify(value: &Value) -> Result<Self, DtoError> {
        if !value.is_object() {
            return Err(DtoError::NotAnObject {
                message: "fixture message".to_string(),
                found: json_kind(value),
            });
        }
        match (is_test_message(value), is_test1_message(value)) {
            (true, false) => parse_message::<TestMessage>(value).map(FixtureMessage::Test),
            (false, true) => parse_message::<Test1Message>(value).map(FixtureMessage::Test1),
            (true, true) => Err(DtoError::AmbiguousMarkers(vec![
                TestMessage::allow().full_name(),
                Test1Message::allow().full_name(),
            ])),
            (false, false) => Err(DtoError::UnknownMessage),
        }
    }

    pub fn full_name(&self) -> String {
        match self {
            FixtureMessage::Test(_) => TestMessage::allow().full_name(),
            FixtureMessage::Test1(_) => Test1Message::allow().full_name(),
        }
    }
}
