use bevy::prelude::*;

use super::components::{MoveIntent, Player};
use super::events::{MoveCommand, PlayerAction};
use crate::core::resources::GameConfig;

/// 单轴死区量化：只输出 -1 / 0 / 1，摇杆幅度被忽略
pub fn quantize_axis(v: f32, dead_zone: f32) -> f32 {
    if v > dead_zone {
        1.0
    } else if v < -dead_zone {
        -1.0
    } else {
        0.0
    }
}

/// 二维输入 → 地面方向 (x, 0, y)
pub fn quantize_direction(raw: Vec2, dead_zone: f32) -> Vec3 {
    Vec3::new(
        quantize_axis(raw.x, dead_zone),
        0.0,
        quantize_axis(raw.y, dead_zone),
    )
}

/// 量化结果 → 世界平面方向
///
/// 相机在 +Z 一侧朝 -Z 看，摇杆 / W 的“上”是远离相机，也就是 -Z
pub fn ground_direction(raw: Vec2, dead_zone: f32) -> Vec3 {
    let q = quantize_direction(raw, dead_zone);
    Vec3::new(q.x, 0.0, -q.z)
}

/// 轮询键盘和第一个手柄；原始向量变化时才发 MoveCommand
pub fn sample_move_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    mut last: Local<Vec2>,
    mut writer: EventWriter<MoveCommand>,
) {
    let mut raw = Vec2::ZERO;
    if let Some(keys) = keys {
        if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
            raw.x -= 1.0;
        }
        if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
            raw.x += 1.0;
        }
        if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
            raw.y -= 1.0;
        }
        if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
            raw.y += 1.0;
        }
    }
    if raw == Vec2::ZERO {
        if let Some(pad) = gamepads.iter().next() {
            raw = pad.left_stick();
        }
    }

    if raw != *last {
        *last = raw;
        writer.write(MoveCommand(raw));
    }
}

/// 离散按键 → PlayerAction
pub fn sample_action_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    mut writer: EventWriter<PlayerAction>,
) {
    let pad = gamepads.iter().next();
    let pressed = |key: KeyCode, button: GamepadButton| {
        keys.as_ref().is_some_and(|k| k.just_pressed(key))
            || pad.is_some_and(|p| p.just_pressed(button))
    };

    if pressed(KeyCode::Space, GamepadButton::East) {
        writer.write(PlayerAction::Dash);
    }
    if pressed(KeyCode::KeyE, GamepadButton::South) {
        writer.write(PlayerAction::PickUp);
    }
    if pressed(KeyCode::KeyF, GamepadButton::West) {
        writer.write(PlayerAction::Interact);
    }
}

/// 量化最近一次输入写入 MoveIntent，后写覆盖先写
pub fn apply_move_commands(
    mut reader: EventReader<MoveCommand>,
    config: Res<GameConfig>,
    mut intents: Query<&mut MoveIntent, With<Player>>,
) {
    let Some(MoveCommand(raw)) = reader.read().last() else {
        return;
    };
    let direction = ground_direction(*raw, config.player.dead_zone);
    for mut intent in &mut intents {
        intent.direction = direction;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_boundaries() {
        let dz = 0.3;
        assert_eq!(quantize_axis(0.3, dz), 0.0);
        assert_eq!(quantize_axis(-0.3, dz), 0.0);
        assert_eq!(quantize_axis(0.3001, dz), 1.0);
        assert_eq!(quantize_axis(-0.3001, dz), -1.0);
        assert_eq!(quantize_axis(0.2999, dz), 0.0);
        assert_eq!(quantize_axis(-0.2999, dz), 0.0);
        assert_eq!(quantize_axis(1.0, dz), 1.0);
        assert_eq!(quantize_axis(-0.95, dz), -1.0);
        assert_eq!(quantize_axis(0.0, dz), 0.0);
    }

    #[test]
    fn every_axis_lands_on_unit_grid() {
        let mut v = -1.0f32;
        while v <= 1.0 {
            let q = quantize_axis(v, 0.3);
            assert!(q == -1.0 || q == 0.0 || q == 1.0);
            v += 0.01;
        }
    }

    #[test]
    fn direction_uses_stick_y_as_ground_z() {
        assert_eq!(
            quantize_direction(Vec2::new(0.5, -0.1), 0.3),
            Vec3::new(1.0, 0.0, 0.0)
        );
        assert_eq!(
            quantize_direction(Vec2::new(-0.4, 0.9), 0.3),
            Vec3::new(-1.0, 0.0, 1.0)
        );
    }

    #[test]
    fn stick_up_is_away_from_camera() {
        assert_eq!(ground_direction(Vec2::Y, 0.3), Vec3::NEG_Z);
        assert_eq!(ground_direction(Vec2::NEG_Y, 0.3), Vec3::Z);
        assert_eq!(
            ground_direction(Vec2::new(0.5, -0.1), 0.3),
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn latest_move_command_wins() {
        let mut app = App::new();
        app.init_resource::<GameConfig>()
            .add_event::<MoveCommand>()
            .add_systems(Update, apply_move_commands);
        let player = app
            .world_mut()
            .spawn((Player, MoveIntent::default()))
            .id();

        app.world_mut().send_event(MoveCommand(Vec2::new(0.0, 1.0)));
        app.world_mut().send_event(MoveCommand(Vec2::new(-0.8, 0.1)));
        app.update();

        let intent = app.world().get::<MoveIntent>(player).unwrap();
        assert_eq!(intent.direction, Vec3::new(-1.0, 0.0, 0.0));
    }
}
