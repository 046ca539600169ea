// Copyright (c) 2025 TexasFortress.AI
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#[cfg(test)]
mod tests {
    use restdto::config::{Settings, SettingsError};
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    /// Clear the variables the loader reads directly
    fn clear_test_env() {
        for var in [
            "DTO_OUTPUT_DIR",
            "REST_HOST",
            "REST_PORT",
            "RESTDTO__LOG__LEVEL",
            "RESTDTO__DTO__CLIENT_FILE",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_test_env();
        let settings = Settings::new(None).expect("Failed to load default settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.log.level, "info");
        assert_eq!(settings.dto.output_dir, "generated");
        assert_eq!(settings.dto.client_file, "messages.ts");
        assert_eq!(settings.rest.port, 8080);
    }

    #[test]
    #[serial]
    fn test_load_file_then_env_override() {
        clear_test_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("restdto.toml");
        std::fs::write(
            &path,
            r#"
[log]
level = "debug"
[dto]
output_dir = "web/src/dto"
client_file = "messages.ts"
[rest]
host = "0.0.0.0"
port = 9000
"#,
        )
        .unwrap();

        let settings = Settings::new(path.to_str()).expect("Failed to load file settings");
        assert_eq!(settings.log.level, "debug");
        assert_eq!(settings.dto.output_dir, "web/src/dto");
        assert_eq!(settings.rest.host, "0.0.0.0");
        assert_eq!(settings.rest.port, 9000);

        env::set_var("REST_PORT", "9437");
        env::set_var("DTO_OUTPUT_DIR", "out");
        env::set_var("RESTDTO__DTO__CLIENT_FILE", "client.ts");
        let settings = Settings::new(path.to_str()).expect("Failed to load overridden settings");
        assert_eq!(settings.rest.port, 9437);
        assert_eq!(settings.dto.output_dir, "out");
        assert_eq!(settings.dto.client_file, "client.ts");
        clear_test_env();
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_ignored() {
        clear_test_env();
        env::set_var("REST_PORT", "not-a-port");
        let settings = Settings::new(None).expect("Failed to load settings");
        assert_eq!(settings.rest.port, 8080);
        clear_test_env();
    }

    #[test]
    #[serial]
    fn test_missing_file_is_load_error() {
        clear_test_env();
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Settings::new(path.to_str()).unwrap_err();
        assert!(matches!(err, SettingsError::LoadError(_)));
        assert!(err
            .to_string()
            .starts_with("Failed to load or parse configuration"));
    }

    #[test]
    fn test_to_toml_round_trips() {
        let settings = Settings::default();
        let rendered = settings.to_toml().unwrap();
        assert!(rendered.contains("[dto]"));
        let parsed: Settings = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, settings);
    }
}
