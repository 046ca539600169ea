// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Library core for restdto.

// --- Modules ---
#[macro_use]
mod macros;

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod message;

// CONSOLIDATED PRELUDE
pub mod prelude {
    // Config
    pub use crate::config::Settings;

    // Messages
    pub use crate::message::fixtures::{
        is_test1_message, is_test_message, FixtureMessage, Test1Message, TestMessage,
    };
    pub use crate::message::schema::{DtoField, FieldType, MessageField, MessageRef, MessageSchema};
    pub use crate::message::{has_marker, is_message, parse_message, AllowMessage, DtoMessage};

    // Registry
    pub use crate::dto::Dto;
    pub use crate::error::DtoError;

    // Common Libs
    pub use log::{debug, error, info, trace, warn};
    pub use std::sync::Arc;
}
