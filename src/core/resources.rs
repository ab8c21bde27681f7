use bevy::prelude::*;
use serde_derive::Deserialize;
use std::path::Path;
use thiserror::Error;

/// 全局配置，对应 config.toml；所有字段都有默认值
#[derive(Resource, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub player: PlayerConfig,
    pub notification: NotificationConfig,
    pub kitchen: KitchenConfig,
    pub data: DataConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WindowConfig {
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// 移动 / 冲刺 / 交互距离的手感参数
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PlayerConfig {
    pub movement_speed: f32,
    pub dash_force: f32,
    pub mass: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
    pub turn_rate: f32,
    pub turn_speed_threshold: f32,
    pub dead_zone: f32,
    pub reach: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            movement_speed: 5.0,
            dash_force: 400.0,
            mass: 1.0,
            dash_duration: 0.17,
            dash_cooldown: 0.07,
            turn_rate: 15.0,
            turn_speed_threshold: 0.1,
            dead_zone: 0.3,
            reach: 1.3,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NotificationConfig {
    pub duration: f32,
    pub rise: f32,
    pub positive_base: [f32; 3],
    pub positive_outline: [f32; 3],
    pub negative_base: [f32; 3],
    pub negative_outline: [f32; 3],
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration: 2.0,
            rise: 100.0,
            positive_base: [0.35, 0.85, 0.3],
            positive_outline: [0.1, 0.3, 0.08],
            negative_base: [0.95, 0.3, 0.25],
            negative_outline: [0.35, 0.05, 0.05],
        }
    }
}

/// 出餐口结算
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct KitchenConfig {
    pub delivery_tip: i32,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        Self { delivery_tip: 10 }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// 相对 assets/ 的路径
    pub layout: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            layout: "data/kitchen.ron".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// 文件不存在时返回默认配置
    ///
    /// 在 App 建立之前调用，LogPlugin 还没装上，所以直接写 stderr
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            eprintln!("WARN {} 不存在，使用默认配置", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
