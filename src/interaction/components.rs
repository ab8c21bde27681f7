use bevy::prelude::*;

use crate::kitchen::components::ItemKind;

/// 一件被持有（手上或槽位里）的物品
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldItem {
    pub entity: Entity,
    pub kind: ItemKind,
}

/// 玩家的手：最多拿一件
#[derive(Component, Debug, Default)]
pub struct HeldSlot(pub Option<HeldItem>);

/// 手上物品挂载的子节点
#[derive(Component, Debug)]
pub struct HandAnchor;

/// 当前交互范围内的目标，由 update_current_target 每个物理步刷新
#[derive(Component, Debug, Default)]
pub struct CurrentTarget(pub Option<Entity>);
