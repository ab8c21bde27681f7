pub mod components;
pub mod systems;

use crate::core::states::AppState;
use crate::interaction::systems::{handle_pick_up, report_outcomes};
use crate::player::systems::spawn_player;
use bevy::prelude::*;
use systems::*;

/// 厨房：工作台、食材、原料箱补货
pub struct KitchenPlugin;

impl Plugin for KitchenPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_systems(OnEnter(AppState::InGame), spawn_kitchen.after(spawn_player))
            .add_systems(
                Update,
                (
                    restock_crates.after(handle_pick_up),
                    report_missing_plate.after(handle_pick_up),
                    // 先让 report_outcomes 记下盘子的名字再收走
                    consume_deliveries.after(report_outcomes),
                    react_to_interaction,
                )
                    .run_if(in_state(AppState::InGame)),
            );
    }
}
