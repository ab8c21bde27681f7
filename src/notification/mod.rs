pub mod components;
pub mod events;
pub mod systems;

use crate::core::states::AppState;
use bevy::prelude::*;
use events::*;
use systems::*;

/// 出餐提示（小费 / 缺盘子）
pub struct NotificationPlugin;

impl Plugin for NotificationPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<TipCalculated>()
            .add_event::<PlateMissing>()
            .add_systems(OnEnter(AppState::InGame), spawn_banner)
            .add_systems(
                Update,
                (show_notifications, advance_banners, sync_banner_ui)
                    .chain()
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
