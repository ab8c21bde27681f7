use anyhow::Context;
use bevy::prelude::*;

mod core;
mod data;
mod interaction;
mod interface;
mod kitchen;
mod notification;
mod player;

use crate::core::resources::GameConfig;
use crate::core::CorePlugin;
use interface::debug_cli::DebugCliPlugin;
use crate::core::states;

const CONFIG_PATH: &str = "config.toml";

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load_or_default(CONFIG_PATH)
        .with_context(|| format!("failed to load {CONFIG_PATH}"))?;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kitchen Rush".into(),
                visible: config.window.visible, // 不可见时只用 CLI 驱动
                ..default()
            }),
            ..default()
        }))
        .insert_resource(config)
        .add_plugins(CorePlugin)
        .add_plugins(DebugCliPlugin)
        .add_plugins(data::DataPlugin)
        .add_plugins((
            player::PlayerPlugin,
            interaction::InteractionPlugin,
            kitchen::KitchenPlugin,
            notification::NotificationPlugin,
        ))
        .add_systems(Update, forward_log_event) // 简单打印
        .add_systems(Startup, |mut next: ResMut<NextState<states::AppState>>| {
            next.set(states::AppState::Loading);
        })
        .run();

    Ok(())
}

fn forward_log_event(mut reader: EventReader<crate::core::events::LogEvent>) {
    for e in reader.read() {
        println!("> {}", e.0);
    }
}
