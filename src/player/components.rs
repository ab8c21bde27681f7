use bevy::prelude::*;

use super::dash::DashMachine;

/// 玩家标记组件
#[derive(Component)]
pub struct Player;

/// 最简刚体：只有速度和质量，位置由 integrate_bodies 推进
#[derive(Component, Debug, Clone)]
pub struct Body {
    pub velocity: Vec3,
    pub mass: f32,
}

impl Body {
    pub fn new(mass: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            mass,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// 以物体自身朝向为参考施加瞬时冲量
    pub fn apply_relative_impulse(&mut self, rotation: Quat, local_impulse: Vec3) {
        self.velocity += rotation * local_impulse / self.mass;
    }
}

/// 量化后的移动方向 (x, 0, z)
#[derive(Component, Debug, Default)]
pub struct MoveIntent {
    pub direction: Vec3,
}

/// 冲刺状态
#[derive(Component, Debug)]
pub struct Dash(pub DashMachine);

/// 动画参数：只写不读，由动画系统自行消费
#[derive(Component, Debug, Default)]
pub struct AnimatorParams {
    pub movement: f32,
    pub picks: u32,
}
