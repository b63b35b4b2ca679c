//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `CAMELLIA_WORK_DIR` and `CAMELLIA_LOG_LEVEL` env overrides.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `KnowledgeConfig`,
//!   `ScraperConfig`).
//! - **raw** — Raw TOML deserialization types (`RawConfig`, `RawBot`, …).
//!   These mirror the file shape and use serde defaults; kept private.
//! - **load** — Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from};
pub use types::*;

#[cfg(test)]
impl Config {
    /// Safe `Config` for unit tests — file store only, no network delays.
    pub fn test_default(work_dir: &std::path::Path) -> Self {
        Self {
            bot_name: "test".into(),
            work_dir: work_dir.to_path_buf(),
            log_level: "info".into(),
            log_file: None,
            knowledge: KnowledgeConfig {
                file: work_dir.join("knowledge.json"),
                database: work_dir.join("knowledge.db"),
                use_database: false,
                save_every: 10,
            },
            scraper: ScraperConfig {
                user_agent: "test-agent".into(),
                timeout_seconds: 1,
                request_delay_ms: 0,
                max_sources: 3,
                lookup_on_miss: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const MINIMAL_TOML: &str = r#"
[bot]
name = "test-bot"
work_dir = "~/.camellia"
log_level = "info"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_basic_config() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.bot_name, "test-bot");
        assert_eq!(cfg.log_level, "info");
        // Section defaults kick in when [knowledge] / [scraper] are absent.
        assert!(cfg.knowledge.use_database);
        assert_eq!(cfg.knowledge.save_every, 10);
        assert_eq!(cfg.scraper.max_sources, 5);
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.camellia");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with(".camellia"));
    }

    #[test]
    fn knowledge_paths_resolve_under_work_dir() {
        let toml = r#"
[bot]
name = "foo"
work_dir = "/tmp/camellia-test"
log_level = "info"

[knowledge]
file = "kb.json"
database = "/var/lib/camellia/kb.db"
use_database = false
save_every = 3
"#;
        let f = write_toml(toml);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(
            cfg.knowledge.file,
            std::path::PathBuf::from("/tmp/camellia-test/kb.json")
        );
        // Absolute paths are kept as-is.
        assert_eq!(
            cfg.knowledge.database,
            std::path::PathBuf::from("/var/lib/camellia/kb.db")
        );
        assert!(!cfg.knowledge.use_database);
        assert_eq!(cfg.knowledge.save_every, 3);
    }

    #[test]
    fn scraper_section_parses() {
        let toml = r#"
[bot]
name = "foo"
work_dir = "/tmp"
log_level = "info"

[scraper]
user_agent = "custom-agent"
timeout_seconds = 5
request_delay_ms = 250
max_sources = 2
lookup_on_miss = true
"#;
        let f = write_toml(toml);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.scraper.user_agent, "custom-agent");
        assert_eq!(cfg.scraper.timeout_seconds, 5);
        assert_eq!(cfg.scraper.request_delay_ms, 250);
        assert_eq!(cfg.scraper.max_sources, 2);
        assert!(cfg.scraper.lookup_on_miss);
    }

    #[test]
    fn absolute_path_unchanged() {
        let p = expand_home("/absolute/path");
        assert_eq!(p, std::path::PathBuf::from("/absolute/path"));
    }

    #[test]
    fn relative_path_unchanged() {
        let p = expand_home("relative/path");
        assert_eq!(p, std::path::PathBuf::from("relative/path"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(std::path::Path::new("/nonexistent/config.toml"), None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn env_work_dir_override() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("/tmp/test-override"), None).unwrap();
        assert_eq!(cfg.work_dir, std::path::PathBuf::from("/tmp/test-override"));
        // Relative store paths follow the overridden work_dir.
        assert_eq!(
            cfg.knowledge.file,
            std::path::PathBuf::from("/tmp/test-override/knowledge.json")
        );
    }

    #[test]
    fn env_log_level_override() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, Some("debug")).unwrap();
        assert_eq!(cfg.log_level, "debug");
    }

    const BASE_TOML: &str = r#"
[bot]
name = "base-bot"
work_dir = "~/.camellia"
log_level = "info"

[knowledge]
save_every = 5

[scraper]
timeout_seconds = 20
max_sources = 4
"#;

    fn write_named(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let p = dir.path().join(name);
        std::fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn overlay_keeps_base_fields() {
        let dir = TempDir::new().unwrap();
        write_named(&dir, "base.toml", BASE_TOML);
        let overlay = r#"
[meta]
base = "base.toml"

[bot]
log_level = "debug"
"#;
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let cfg = load_from(&overlay_path, None, None).unwrap();
        assert_eq!(cfg.bot_name, "base-bot");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.knowledge.save_every, 5);
    }

    #[test]
    fn overlay_wins_scalar() {
        let dir = TempDir::new().unwrap();
        write_named(&dir, "base.toml", BASE_TOML);
        let overlay = r#"
[meta]
base = "base.toml"

[scraper]
max_sources = 1
"#;
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let cfg = load_from(&overlay_path, None, None).unwrap();
        assert_eq!(cfg.scraper.max_sources, 1);
        assert_eq!(cfg.scraper.timeout_seconds, 20);
    }

    #[test]
    fn chained_bases() {
        let dir = TempDir::new().unwrap();
        write_named(&dir, "grandbase.toml", BASE_TOML);
        let middle = r#"
[meta]
base = "grandbase.toml"

[bot]
name = "middle-bot"
"#;
        write_named(&dir, "middle.toml", middle);
        let top = r#"
[meta]
base = "middle.toml"

[bot]
log_level = "warn"
"#;
        let top_path = write_named(&dir, "top.toml", top);
        let cfg = load_from(&top_path, None, None).unwrap();
        assert_eq!(cfg.bot_name, "middle-bot");
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn missing_base_errors() {
        let dir = TempDir::new().unwrap();
        let overlay = r#"
[meta]
base = "nonexistent.toml"

[bot]
name = "x"
work_dir = "~/.camellia"
log_level = "info"
"#;
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let result = load_from(&overlay_path, None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("cannot read") || msg.contains("config error"));
    }

    #[test]
    fn cycle_detection() {
        let dir = TempDir::new().unwrap();
        let self_path = dir.path().join("self.toml");
        let content = format!("[meta]\nbase = \"{}\"\n\n{BASE_TOML}", self_path.display());
        std::fs::write(&self_path, content).unwrap();
        let result = load_from(&self_path, None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("circular"));
    }
}
