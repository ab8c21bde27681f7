pub mod components;
pub mod dash;
pub mod events;
pub mod input;
pub mod systems;

use crate::core::states::{AppState, ControlScheme};
use bevy::prelude::*;
use events::*;
use input::*;
use systems::*;

/// 玩家移动 / 转向 / 冲刺
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app
            .add_event::<PlayerAction>()
            .add_event::<MoveCommand>()
            .add_event::<PresentationCue>()
            .add_systems(OnEnter(AppState::InGame), spawn_player)
            .add_systems(OnEnter(ControlScheme::Menu), cancel_dashes)
            // 输入采样只在游戏映射下生效
            .add_systems(
                PreUpdate,
                (sample_move_input, sample_action_input)
                    .after(bevy::input::InputSystem)
                    .run_if(in_state(AppState::InGame))
                    .run_if(in_state(ControlScheme::Gameplay)),
            )
            .add_systems(
                Update,
                (
                    apply_move_commands,
                    handle_dash_action,
                    animate_player_movement,
                    play_presentation_cues,
                )
                    .chain()
                    .run_if(in_state(AppState::InGame))
                    .run_if(in_state(ControlScheme::Gameplay)),
            )
            .add_systems(
                FixedUpdate,
                (move_player, advance_dash, integrate_bodies, turn_player)
                    .chain()
                    .in_set(PlayerPhysicsSet)
                    .run_if(in_state(AppState::InGame))
                    .run_if(in_state(ControlScheme::Gameplay)),
            );
    }
}

/// 物理步里的移动系统集合，交互目标检测排在它之后
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerPhysicsSet;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CorePlugin;
    use crate::interaction::InteractionPlugin;
    use crate::interaction::components::{CurrentTarget, HeldSlot};
    use crate::kitchen::components::{Interactable, ItemKind, Pickable};
    use bevy::state::app::StatesPlugin;
    use super::components::{Body, Dash, Player};

    fn in_game_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins((StatesPlugin, CorePlugin, PlayerPlugin, InteractionPlugin))
            .init_resource::<Time<Fixed>>();
        app.world_mut()
            .resource_mut::<NextState<AppState>>()
            .set(AppState::InGame);
        app.update();
        let player = app
            .world_mut()
            .query_filtered::<Entity, With<Player>>()
            .single(app.world())
            .unwrap();
        (app, player)
    }

    fn set_scheme(app: &mut App, scheme: ControlScheme) {
        app.world_mut()
            .resource_mut::<NextState<ControlScheme>>()
            .set(scheme);
        app.update();
    }

    #[test]
    fn menu_scheme_freezes_player() {
        let (mut app, player) = in_game_app();

        // 冲刺中途切到菜单
        app.world_mut().send_event(PlayerAction::Dash);
        app.update();
        app.world_mut().run_schedule(FixedUpdate);
        assert!(app.world().get::<Dash>(player).unwrap().0.is_dashing());

        set_scheme(&mut app, ControlScheme::Menu);
        assert!(app.world().get::<Dash>(player).unwrap().0.is_ready());
        assert_eq!(app.world().get::<Body>(player).unwrap().velocity, Vec3::ZERO);

        // 菜单下的动作和移动都不生效，面前放着番茄也拿不起来
        let tomato = app
            .world_mut()
            .spawn((
                Interactable {
                    name: "Tomato".into(),
                    uid: uuid::Uuid::nil(),
                },
                Pickable {
                    kind: ItemKind::Tomato,
                },
                Transform::from_xyz(0.0, 0.15, -0.6),
            ))
            .id();
        app.world_mut().get_mut::<CurrentTarget>(player).unwrap().0 = Some(tomato);
        let before = app.world().get::<Transform>(player).unwrap().translation;
        app.world_mut().send_event(PlayerAction::PickUp);
        app.world_mut().send_event(PlayerAction::Dash);
        app.world_mut().send_event(MoveCommand(Vec2::X));
        app.update();
        for _ in 0..8 {
            app.world_mut().run_schedule(FixedUpdate);
        }

        assert_eq!(app.world().get::<HeldSlot>(player).unwrap().0, None);
        assert!(app.world().get::<ChildOf>(tomato).is_none());
        assert!(app.world().get::<Dash>(player).unwrap().0.is_ready());
        assert_eq!(app.world().get::<Body>(player).unwrap().velocity, Vec3::ZERO);
        assert_eq!(
            app.world().get::<Transform>(player).unwrap().translation,
            before
        );
    }
}
