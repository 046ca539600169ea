// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! DTO registry.
//!
//! The registry knows which messages are allowed and which messages go into
//! which generated client file. Allowed messages are checked every time a
//! message is received or sent; the file map is only needed for generation,
//! and must then list exactly the allowed messages.
//!
//! A nested message must be allowed and registered in the same file as the
//! message that carries it. Importing from other client files is not supported.

pub mod typescript;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::DtoError;
use crate::message::fixtures::{Test1Message, TestMessage};
use crate::message::schema::{FieldType, MessageSchema};
use crate::message::{has_marker, type_id_for, AllowMessage, DtoMessage};
use typescript::{ClientMessage, ts_type};

#[derive(Debug, Default)]
pub struct Dto {
    allowed_messages: Vec<AllowMessage>,
    messages: BTreeMap<PathBuf, Vec<MessageSchema>>,
    is_generated: bool,
}

impl Dto {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for the fixture messages, generated into `dir/file`.
    pub fn fixtures(dir: impl AsRef<Path>, file: &str) -> Result<Self, DtoError> {
        let mut dto = Dto::new();
        dto.set_allowed_messages(vec![TestMessage::allow(), Test1Message::allow()])?;
        let mut messages = BTreeMap::new();
        messages.insert(
            dir.as_ref().join(file),
            vec![TestMessage::schema(), Test1Message::schema()],
        );
        dto.set_messages(messages);
        Ok(dto)
    }

    /// Replaces the allowed messages. Names must be identifiers.
    pub fn set_allowed_messages(&mut self, messages: Vec<AllowMessage>) -> Result<(), DtoError> {
        for message in &messages {
            message.validate()?;
        }
        self.allowed_messages = messages;
        Ok(())
    }

    pub fn allowed_messages(&self) -> &[AllowMessage] {
        &self.allowed_messages
    }

    /// Replaces the output file map used by [`Dto::generate`].
    pub fn set_messages(&mut self, messages: BTreeMap<PathBuf, Vec<MessageSchema>>) {
        self.messages = messages;
    }

    pub fn messages(&self) -> &BTreeMap<PathBuf, Vec<MessageSchema>> {
        &self.messages
    }

    pub fn is_generated(&self) -> bool {
        self.is_generated
    }

    /// Writes every client file. Can only succeed once per registry.
    pub fn generate(&mut self) -> Result<Vec<PathBuf>, DtoError> {
        if self.is_generated {
            return Err(DtoError::MultipleGenerateCall);
        }
        let files = self.render()?;
        let mut written = Vec::with_capacity(files.len());
        for (path, contents) in files {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            info!("Generated client messages: {}", path.display());
            written.push(path);
        }
        self.is_generated = true;
        Ok(written)
    }

    /// Renders every client file without touching the filesystem.
    pub fn render(&self) -> Result<BTreeMap<PathBuf, String>, DtoError> {
        self.validate_message_integrity()?;

        let mut generated_allow = Vec::new();
        let mut accepted = BTreeMap::new();
        for (path, messages) in &self.messages {
            let (client_messages, allow) = self.generate_messages(messages)?;
            generated_allow.extend(allow);
            accepted.insert(path.clone(), client_messages);
        }
        self.validate_implement_message(&generated_allow)?;

        Ok(accepted
            .into_iter()
            .map(|(path, messages)| (path, typescript::render(&messages)))
            .collect())
    }

    /// Every registered message must be allowed and follow the marker convention.
    fn validate_message_integrity(&self) -> Result<(), DtoError> {
        for schema in self.messages.values().flatten() {
            let allow = schema.allow();
            if !self.allowed_messages.contains(&allow) {
                return Err(DtoError::MessageNotAllowed(allow.full_name()));
            }
            let expected = type_id_for(schema.name);
            if schema.type_id != expected {
                return Err(DtoError::InvalidTypeId {
                    message: allow.full_name(),
                    found: schema.type_id.to_string(),
                    expected,
                });
            }
        }
        Ok(())
    }

    fn generate_messages(
        &self,
        messages: &[MessageSchema],
    ) -> Result<(Vec<ClientMessage>, Vec<AllowMessage>), DtoError> {
        let mut client_messages = Vec::with_capacity(messages.len());
        let mut generated_allow = Vec::with_capacity(messages.len());
        for schema in messages {
            let allow = schema.allow();
            if schema.fields.is_empty() {
                return Err(DtoError::NumberOfFields(allow.full_name()));
            }
            let mut fields = vec![(format!("{}?", schema.type_id), "unknown".to_string())];
            for field in &schema.fields {
                self.check_dependencies(&field.ty, messages, &allow)?;
                fields.push((field.name.to_string(), ts_type(&field.ty)));
            }
            debug!("Prepared client message {}", allow);
            client_messages.push(ClientMessage {
                name: schema.name.to_string(),
                type_id: schema.type_id.to_string(),
                fields,
            });
            generated_allow.push(allow);
        }
        Ok((client_messages, generated_allow))
    }

    /// Nested messages must be allowed and generated into the same file.
    fn check_dependencies(
        &self,
        ty: &FieldType,
        messages: &[MessageSchema],
        parent: &AllowMessage,
    ) -> Result<(), DtoError> {
        for nested in ty.nested_messages() {
            let allow = nested.allow();
            if !self.allowed_messages.contains(&allow) {
                return Err(DtoError::MessageNotAllowed(allow.full_name()));
            }
            if !messages.iter().any(|m| m.allow() == allow) {
                return Err(DtoError::NoDependency {
                    dependency: allow.full_name(),
                    message: parent.full_name(),
                });
            }
        }
        Ok(())
    }

    /// Every allowed message must have been generated.
    fn validate_implement_message(&self, generated: &[AllowMessage]) -> Result<(), DtoError> {
        for allowed in &self.allowed_messages {
            if !generated.contains(allowed) {
                return Err(DtoError::MessageNotImplemented(allowed.full_name()));
            }
        }
        Ok(())
    }

    /// Checks the message itself and, recursively, every nested message.
    /// Each message is visited once, so self-referencing messages terminate.
    pub fn deep_check_safe_message(&self, schema: &MessageSchema) -> Result<(), DtoError> {
        let mut visited = BTreeSet::new();
        self.check_safe_fields(schema, &mut visited)
    }

    fn check_safe_fields(
        &self,
        schema: &MessageSchema,
        visited: &mut BTreeSet<AllowMessage>,
    ) -> Result<(), DtoError> {
        is_safe_message(schema, &self.allowed_messages)?;
        visited.insert(schema.allow());
        for field in &schema.fields {
            for nested in field.ty.nested_messages() {
                if !visited.contains(&nested.allow()) {
                    self.check_safe_fields(&nested.schema(), visited)?;
                }
            }
        }
        Ok(())
    }

    /// Converts JSON into `M` after checking that `M` is safe. The marker is
    /// not required since the caller names the target type.
    pub fn json_to_message<M: DtoMessage>(&self, value: &Value) -> Result<M, DtoError> {
        self.deep_check_safe_message(&M::schema())?;
        M::deserialize(value).map_err(|source| DtoError::InvalidPayload {
            message: M::allow().full_name(),
            source,
        })
    }

    /// Serializes a message after checking that it is safe to send.
    pub fn to_safe_json<M: DtoMessage>(&self, message: &M) -> Result<Value, DtoError> {
        self.deep_check_safe_message(&M::schema())?;
        Ok(serde_json::to_value(message)?)
    }

    /// Registered messages whose marker `value` carries, in registration order.
    pub fn matching_messages(&self, value: &Value) -> Vec<&MessageSchema> {
        self.messages
            .values()
            .flatten()
            .filter(|schema| has_marker(value, schema.type_id))
            .collect()
    }
}

/// Fails with [`DtoError::UnsafeMessage`] when `schema` is not allowed.
pub fn is_safe_message(schema: &MessageSchema, allowed: &[AllowMessage]) -> Result<(), DtoError> {
    if allowed.contains(&schema.allow()) {
        Ok(())
    } else {
        Err(DtoError::UnsafeMessage(schema.full_name()))
    }
}
