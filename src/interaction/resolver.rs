//! 拾取 / 放下的纯逻辑结算，不碰 ECS；副作用由 systems 根据结果执行

use bevy::prelude::Entity;

use super::components::HeldItem;

/// 带槽位的可交互物（工作台等）
pub trait SlotHolder {
    /// 尝试从槽位取出物品；没有可给的返回 None
    fn provide_from_slot(&mut self, requesting: Option<HeldItem>) -> Option<HeldItem>;
    /// 尝试把物品放进槽位；是否接受由槽位自己决定
    fn receive_into_slot(&mut self, item: HeldItem) -> bool;
}

/// 当前目标具备的能力；每种都带着目标实体
pub enum TargetCapability<'a> {
    Pickable(HeldItem),
    SlotHolder {
        entity: Entity,
        slot: &'a mut dyn SlotHolder,
    },
    Plain(Entity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 直接捡起目标（需要挂到手上）
    Picked(HeldItem),
    /// 从槽位里取出（需要挂到手上）
    TakenFromSlot { item: HeldItem, station: Entity },
    Dropped(HeldItem),
    Placed { item: HeldItem, station: Entity },
    Refused { item: HeldItem, target: Entity },
    Nothing,
}

impl Resolution {
    /// 需要执行 attach_to_hand 的物品
    pub fn attach_target(&self) -> Option<HeldItem> {
        match *self {
            Resolution::Picked(item) | Resolution::TakenFromSlot { item, .. } => Some(item),
            _ => None,
        }
    }
}

/// 结算一次拾取键
pub fn resolve(held: &mut Option<HeldItem>, target: Option<TargetCapability<'_>>) -> Resolution {
    match (*held, target) {
        (None, Some(TargetCapability::Pickable(item))) => {
            *held = Some(item);
            Resolution::Picked(item)
        }
        (None, Some(TargetCapability::SlotHolder { entity, slot })) => {
            match slot.provide_from_slot(None) {
                Some(item) => {
                    *held = Some(item);
                    Resolution::TakenFromSlot {
                        item,
                        station: entity,
                    }
                }
                None => Resolution::Nothing,
            }
        }
        (None, _) => Resolution::Nothing,
        // 范围内没有东西，或者只有另一件物品：直接丢下
        (Some(item), None | Some(TargetCapability::Pickable(_))) => {
            *held = None;
            Resolution::Dropped(item)
        }
        (Some(item), Some(TargetCapability::SlotHolder { entity, slot })) => {
            if slot.receive_into_slot(item) {
                *held = None;
                Resolution::Placed {
                    item,
                    station: entity,
                }
            } else {
                Resolution::Refused {
                    item,
                    target: entity,
                }
            }
        }
        (Some(item), Some(TargetCapability::Plain(entity))) => Resolution::Refused {
            item,
            target: entity,
        },
    }
}
