//! TypeScript client rendering.

use crate::message::schema::FieldType;

/// One generated client interface.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientMessage {
    pub name: String,
    pub type_id: String,
    /// `(name, type)` pairs, marker first.
    pub fields: Vec<(String, String)>,
}

/// TypeScript type of a field. Nested messages must already have been
/// checked by the caller.
pub fn ts_type(ty: &FieldType) -> String {
    match ty {
        FieldType::Number => "number".to_string(),
        FieldType::String => "string".to_string(),
        FieldType::Boolean => "boolean".to_string(),
        FieldType::Array(inner) => {
            let inner = ts_type(inner);
            if inner.contains(" | ") {
                format!("({})[]", inner)
            } else {
                format!("{}[]", inner)
            }
        }
        FieldType::Record(key, value) => format!("Record<{}, {}>", ts_type(key), ts_type(value)),
        FieldType::Message(message) => format!("{} | undefined", message.name),
    }
}

/// Renders a client file: an interface and a marker guard per message.
pub fn render(messages: &[ClientMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(&format!("\nexport interface {} {{", message.name));
        for (name, ty) in &message.fields {
            out.push_str(&format!("\n    {}: {};", name, ty));
        }
        out.push_str(&format!(
            "\n}}\nexport function is{name}(obj: any): obj is {name} {{\n    \
             return typeof obj === 'object' && obj !== null && '{type_id}' in obj;\n}}",
            name = message.name,
            type_id = message.type_id,
        ));
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::schema::{MessageField, MessageRef};

    fn inner_fields() -> Vec<MessageField> {
        vec![MessageField::new("Id", FieldType::Number)]
    }

    #[test]
    fn test_ts_types() {
        let inner = MessageRef::new("fixtures", "Inner", "TypInner", inner_fields);
        assert_eq!(ts_type(&FieldType::Number), "number");
        assert_eq!(
            ts_type(&FieldType::Array(Box::new(FieldType::String))),
            "string[]"
        );
        assert_eq!(
            ts_type(&FieldType::Record(
                Box::new(FieldType::String),
                Box::new(FieldType::Boolean)
            )),
            "Record<string, boolean>"
        );
        let nested = FieldType::Message(inner);
        assert_eq!(ts_type(&nested), "Inner | undefined");
        assert_eq!(
            ts_type(&FieldType::Array(Box::new(nested))),
            "(Inner | undefined)[]"
        );
    }

    #[test]
    fn test_render_single_message() {
        let rendered = render(&[ClientMessage {
            name: "Ping".into(),
            type_id: "TypPing".into(),
            fields: vec![
                ("TypPing?".into(), "unknown".into()),
                ("Seq".into(), "number".into()),
            ],
        }]);
        let expected = "\nexport interface Ping {\n    TypPing?: unknown;\n    Seq: number;\n}\n\
            export function isPing(obj: any): obj is Ping {\n    \
            return typeof obj === 'object' && obj !== null && 'TypPing' in obj;\n}\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), "\n");
    }
}
