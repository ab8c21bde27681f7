use bevy::prelude::*;

/// 离散动作（按键 / 手柄 / CLI）
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Dash,
    PickUp,
    Interact,
}

/// 原始二维移动输入，未量化
#[derive(Event, Debug, Clone, Copy)]
pub struct MoveCommand(pub Vec2);

/// 粒子 / 音效 / 动画触发，发出即不管
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationCue {
    DashBurst { player: Entity },
    Pick { player: Entity },
}
