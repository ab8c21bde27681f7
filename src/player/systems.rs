use bevy::prelude::*;

use super::components::*;
use super::dash::{DashMachine, DashStep};
use super::events::*;
use crate::core::events::LogEvent;
use crate::core::resources::GameConfig;
use crate::interaction::components::{CurrentTarget, HandAnchor, HeldSlot};

/// 手的挂点相对玩家的位置（玩家前方、略高）
pub const HAND_OFFSET: Vec3 = Vec3::new(0.0, 0.9, -0.55);

/// 初始化玩家实体和手部挂点
pub fn spawn_player(
    mut commands: Commands,
    config: Res<GameConfig>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let tuning = &config.player;
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            Transform::default(),
            Body::new(tuning.mass),
            MoveIntent::default(),
            Dash(DashMachine::new(tuning.dash_duration, tuning.dash_cooldown)),
            AnimatorParams::default(),
            HeldSlot::default(),
            CurrentTarget::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("HandAnchor"),
                HandAnchor,
                Transform::from_translation(HAND_OFFSET),
            ));
        })
        .id();

    if let (Some(mut meshes), Some(mut materials)) = (meshes, materials) {
        commands.entity(player).insert((
            Mesh3d(meshes.add(Capsule3d::new(0.35, 0.9))),
            MeshMaterial3d(materials.add(Color::srgb(0.2, 0.45, 0.9))),
        ));
    }
    info!("玩家已生成");
}

/// 冲刺键：不在 Idle 时直接忽略
pub fn handle_dash_action(
    mut actions: EventReader<PlayerAction>,
    mut players: Query<(Entity, &mut Dash), With<Player>>,
    mut cues: EventWriter<PresentationCue>,
) {
    for action in actions.read() {
        if *action != PlayerAction::Dash {
            continue;
        }
        for (entity, mut dash) in &mut players {
            if dash.0.try_trigger() {
                cues.write(PresentationCue::DashBurst { player: entity });
            } else {
                debug!("冲刺冷却中，忽略");
            }
        }
    }
}

/// 设置水平速度：平时按方向 × 速度，冲刺中保持速率只改方向
pub fn move_player(
    config: Res<GameConfig>,
    mut players: Query<(&mut Body, &Transform, &MoveIntent, &Dash), With<Player>>,
) {
    for (mut body, transform, intent, dash) in &mut players {
        let direction = intent.direction.normalize_or_zero();
        if dash.0.is_dashing() {
            let speed = body.speed();
            let heading = if direction == Vec3::ZERO {
                *transform.forward()
            } else {
                direction
            };
            body.velocity = heading * speed;
        } else {
            body.velocity = direction * config.player.movement_speed;
        }
    }
}

/// 推进冲刺状态机，冲量阶段按“力 × 一个物理步”施加
pub fn advance_dash(
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut players: Query<(&mut Dash, &mut Body, &Transform), With<Player>>,
) {
    let dt = time.timestep().as_secs_f32();
    for (mut dash, mut body, transform) in &mut players {
        if dash.0.step(dt) == DashStep::ApplyImpulse {
            let impulse = Vec3::NEG_Z * config.player.dash_force * dt;
            body.apply_relative_impulse(transform.rotation, impulse);
        }
    }
}

pub fn integrate_bodies(time: Res<Time<Fixed>>, mut bodies: Query<(&Body, &mut Transform)>) {
    let dt = time.timestep().as_secs_f32();
    for (body, mut transform) in &mut bodies {
        transform.translation += body.velocity * dt;
    }
}

/// 阻尼转向：有速度且有输入时才转，不瞬间对齐
pub fn turn_player(
    config: Res<GameConfig>,
    time: Res<Time<Fixed>>,
    mut players: Query<(&mut Transform, &Body, &MoveIntent), With<Player>>,
) {
    let dt = time.timestep().as_secs_f32();
    let tuning = &config.player;
    for (mut transform, body, intent) in &mut players {
        if body.speed() <= tuning.turn_speed_threshold || intent.direction == Vec3::ZERO {
            continue;
        }
        let target = Transform::IDENTITY
            .looking_to(intent.direction, Vec3::Y)
            .rotation;
        let t = (dt * tuning.turn_rate).min(1.0);
        transform.rotation = transform.rotation.slerp(target, t);
    }
}

pub fn animate_player_movement(mut players: Query<(&MoveIntent, &mut AnimatorParams)>) {
    for (intent, mut params) in &mut players {
        params.movement = intent.direction.length_squared();
    }
}

/// 粒子 / 音效没有接入，只记录并更新动画参数
pub fn play_presentation_cues(
    mut cues: EventReader<PresentationCue>,
    mut params: Query<&mut AnimatorParams>,
) {
    for cue in cues.read() {
        match *cue {
            PresentationCue::DashBurst { player } => {
                debug!("dash burst on {player}");
            }
            PresentationCue::Pick { player } => {
                if let Ok(mut p) = params.get_mut(player) {
                    p.picks += 1;
                }
            }
        }
    }
}

/// 切到菜单映射时打断冲刺
pub fn cancel_dashes(mut players: Query<(&mut Dash, &mut Body)>, mut log: EventWriter<LogEvent>) {
    for (mut dash, mut body) in &mut players {
        if !dash.0.is_ready() {
            dash.0.cancel();
            log.write(LogEvent("Dash cancelled".into()));
        }
        body.velocity = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<GameConfig>()
            .init_resource::<Time<Fixed>>()
            .add_event::<PlayerAction>()
            .add_event::<PresentationCue>()
            .add_systems(Update, (handle_dash_action, play_presentation_cues).chain())
            .add_systems(
                FixedUpdate,
                (move_player, advance_dash, integrate_bodies, turn_player).chain(),
            );
        app.add_systems(Startup, spawn_player);
        app.update();
        let player = app
            .world_mut()
            .query_filtered::<Entity, With<Player>>()
            .single(app.world())
            .unwrap();
        (app, player)
    }

    fn fixed_step(app: &mut App) {
        app.world_mut().run_schedule(FixedUpdate);
    }

    fn set_direction(app: &mut App, player: Entity, direction: Vec3) {
        app.world_mut()
            .get_mut::<MoveIntent>(player)
            .unwrap()
            .direction = direction;
    }

    #[test]
    fn steady_velocity_is_normalized_direction_times_speed() {
        let (mut app, player) = test_app();
        set_direction(&mut app, player, Vec3::new(1.0, 0.0, 1.0));
        fixed_step(&mut app);

        let body = app.world().get::<Body>(player).unwrap();
        assert!((body.speed() - 5.0).abs() < 1e-4);
        assert!((body.velocity.x - body.velocity.z).abs() < 1e-5);

        set_direction(&mut app, player, Vec3::ZERO);
        fixed_step(&mut app);
        assert_eq!(app.world().get::<Body>(player).unwrap().velocity, Vec3::ZERO);
    }

    #[test]
    fn turning_is_damped_not_snapped() {
        let (mut app, player) = test_app();
        set_direction(&mut app, player, Vec3::X);
        fixed_step(&mut app);

        let forward = app.world().get::<Transform>(player).unwrap().forward();
        assert!(forward.dot(Vec3::X) > 0.0);
        assert!(forward.dot(Vec3::X) < 0.99);

        for _ in 0..60 {
            fixed_step(&mut app);
        }
        let forward = app.world().get::<Transform>(player).unwrap().forward();
        assert!(forward.dot(Vec3::X) > 0.999);
    }

    #[test]
    fn no_turn_without_input() {
        let (mut app, player) = test_app();
        let before = app.world().get::<Transform>(player).unwrap().rotation;
        fixed_step(&mut app);
        assert_eq!(app.world().get::<Transform>(player).unwrap().rotation, before);
    }

    #[test]
    fn dash_pushes_forward_then_keeps_speed() {
        let (mut app, player) = test_app();
        app.world_mut().send_event(PlayerAction::Dash);
        app.update();
        fixed_step(&mut app);

        // 默认朝向 -Z，冲量 400 × (1/64) / 1
        let body = app.world().get::<Body>(player).unwrap();
        assert!((body.velocity - Vec3::new(0.0, 0.0, -6.25)).length() < 1e-4);

        // Active 期间改变输入：速率保持，方向跟随输入
        set_direction(&mut app, player, Vec3::X);
        fixed_step(&mut app);
        let body = app.world().get::<Body>(player).unwrap();
        assert!((body.velocity - Vec3::new(6.25, 0.0, 0.0)).length() < 1e-4);
        assert!(app.world().get::<Dash>(player).unwrap().0.is_dashing());
    }

    #[test]
    fn dash_retrigger_is_ignored_until_cooldown_ends() {
        let (mut app, player) = test_app();
        app.world_mut().send_event(PlayerAction::Dash);
        app.update();

        for _ in 0..16 {
            fixed_step(&mut app);
            app.world_mut().send_event(PlayerAction::Dash);
            app.update();
            assert!(!app.world().get::<Dash>(player).unwrap().0.is_ready());
        }
        fixed_step(&mut app);
        assert!(app.world().get::<Dash>(player).unwrap().0.is_ready());
    }

    #[test]
    fn w_walks_away_from_camera() {
        use crate::player::input::apply_move_commands;

        let (mut app, player) = test_app();
        app.add_event::<MoveCommand>()
            .add_systems(Update, apply_move_commands);
        // 和 spawn_kitchen 的相机位置一致
        let camera = Vec3::new(0.0, 9.0, 7.0);
        let before = app.world().get::<Transform>(player).unwrap().translation;

        // W 键对应的原始输入
        app.world_mut().send_event(MoveCommand(Vec2::Y));
        app.update();
        for _ in 0..32 {
            fixed_step(&mut app);
        }

        let after = app.world().get::<Transform>(player).unwrap().translation;
        assert!(after.z < before.z);
        assert!(after.distance(camera) > before.distance(camera));
        let forward = app.world().get::<Transform>(player).unwrap().forward();
        assert!(forward.dot(Vec3::NEG_Z) > 0.99);
    }
}
