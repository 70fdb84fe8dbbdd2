use std::fs;
use std::path::Path;
use anyhow::Context;
use serde::Serialize;
use quest_core::config::SystemConfig;

#[derive(Serialize)]
struct DefaultConfig {
    system: SystemConfig,
    // [sequencer] 不写入默认文件，缺省时沿用各游戏自带的节奏
}

/// 默认配置的 TOML 文本
pub fn default_toml() -> anyhow::Result<String> {
    let config = DefaultConfig { system: SystemConfig::default() };
    toml::to_string_pretty(&config).context("serialize default config")
}

/// 配置文件不存在时写出默认值，已存在则不动
pub fn ensure_config_exists(path: &str) {
    if Path::new(path).exists() {
        return;
    }
    println!("Creating default configuration at '{}'...", path);

    let written = default_toml().and_then(|text| {
        fs::write(path, text).with_context(|| format!("write '{}'", path))
    });
    match written {
        Ok(()) => println!("Config file created successfully."),
        Err(e) => eprintln!("Failed to create config file: {:#}", e),
    }
}
