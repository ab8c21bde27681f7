use bevy::prelude::*;

use super::components::HeldItem;

/// 一次拾取 / 放下的结算结果
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Picked(HeldItem),
    TakenFromSlot { item: HeldItem, station: Entity },
    Dropped(HeldItem),
    Placed { item: HeldItem, station: Entity },
    Refused { item: HeldItem, target: Entity },
    Nothing,
}

/// 对当前目标按下了“交互”（切菜等，由目标自己处理）
#[derive(Event, Debug, Clone, Copy)]
pub struct Interacted {
    pub player: Entity,
    pub target: Entity,
}
