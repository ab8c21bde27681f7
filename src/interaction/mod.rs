pub mod components;
pub mod events;
pub mod resolver;
pub mod systems;

use crate::core::states::{AppState, ControlScheme};
use crate::player::PlayerPhysicsSet;
use bevy::prelude::*;
use events::*;
use systems::*;

/// 拾取 / 放下 / 交互
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<InteractionOutcome>()
            .add_event::<Interacted>()
            .add_systems(
                FixedUpdate,
                update_current_target
                    .after(PlayerPhysicsSet)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (handle_pick_up, handle_interact, report_outcomes)
                    .chain()
                    .run_if(in_state(AppState::InGame))
                    .run_if(in_state(ControlScheme::Gameplay)),
            );
    }
}
