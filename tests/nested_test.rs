// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Messages nesting other messages, including themselves.

#[cfg(test)]
mod nested_tests {
    use restdto::prelude::*;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};
    use std::path::PathBuf;

    restdto::dto_message! {
        pub struct Node in "tree" marked "TypNode" {
            "Id" => id: i64,
            "Children" => children: Vec<Node>,
        }
        guard is_node;
    }

    restdto::dto_message! {
        pub struct Forest in "tree" marked "TypForest" {
            "Roots" => roots: HashMap<String, Node>,
        }
        guard is_forest;
    }

    fn tree_registry() -> Dto {
        let mut dto = Dto::new();
        dto.set_allowed_messages(vec![Node::allow(), Forest::allow()])
            .unwrap();
        let mut messages = BTreeMap::new();
        messages.insert(
            PathBuf::from("tree.ts"),
            vec![Node::schema(), Forest::schema()],
        );
        dto.set_messages(messages);
        dto
    }

    #[test]
    fn test_self_referencing_message_renders() {
        let files = tree_registry().render().unwrap();
        let client = &files[&PathBuf::from("tree.ts")];
        assert!(client.contains("    Children: (Node | undefined)[];"));
        assert!(client.contains("    Roots: Record<string, Node | undefined>;"));
        assert!(client.contains("'TypNode' in obj"));
    }

    #[test]
    fn test_self_referencing_message_is_safe() {
        let dto = tree_registry();
        assert!(dto.deep_check_safe_message(&Node::schema()).is_ok());
        assert!(dto.deep_check_safe_message(&Forest::schema()).is_ok());

        let leaf = Node::new(2, vec![]);
        let value = dto.to_safe_json(&Node::new(1, vec![leaf.clone()])).unwrap();
        assert!(is_node(&value));
        assert_eq!(value["Children"][0]["Id"], json!(2));

        let parsed: Node = dto
            .json_to_message(&json!({ "Id": 1, "Children": [{ "Id": 2, "Children": [] }] }))
            .unwrap();
        assert_eq!(parsed.children, vec![leaf]);
        assert!(!is_forest(&value));
    }

    #[test]
    fn test_nested_message_must_be_allowed() {
        let mut dto = Dto::new();
        dto.set_allowed_messages(vec![Forest::allow()]).unwrap();
        assert!(matches!(
            dto.deep_check_safe_message(&Forest::schema()),
            Err(DtoError::UnsafeMessage(name)) if name == "tree.Node"
        ));
    }
}
