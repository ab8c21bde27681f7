use bevy::prelude::*;
use serde_derive::Deserialize;
use uuid::Uuid;

use crate::interaction::components::HeldItem;
use crate::interaction::resolver::SlotHolder;

/// 食材 / 盘子种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ItemKind {
    Tomato,
    Onion,
    Mushroom,
    Plate,
}

impl ItemKind {
    pub fn is_ingredient(self) -> bool {
        !matches!(self, ItemKind::Plate)
    }
}

/// 工作台种类，决定槽位的接收 / 提供规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StationKind {
    Countertop,
    CuttingBoard,
    /// 取之不尽的原料箱
    Crate(ItemKind),
    DeliverCountertop,
}

/// 场景里所有可交互对象共有的信息
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub name: String,
    pub uid: Uuid,
}

/// 可以被玩家拿在手里的物品
#[derive(Component, Debug, Clone, Copy)]
pub struct Pickable {
    pub kind: ItemKind,
}

/// 正在玩家手上
#[derive(Component, Debug)]
pub struct Carried;

/// 放在某个工作台的槽位里
#[derive(Component, Debug)]
pub struct Slotted {
    pub station: Entity,
}

/// 只能放一件物品的工作台
#[derive(Component, Debug, Clone)]
pub struct Station {
    pub kind: StationKind,
    pub item: Option<HeldItem>,
}

impl Station {
    pub fn new(kind: StationKind) -> Self {
        Self { kind, item: None }
    }

    /// 这个台子是否接受该物品（不考虑是否已被占用）
    pub fn accepts(&self, kind: ItemKind) -> bool {
        match self.kind {
            StationKind::Countertop => true,
            StationKind::CuttingBoard => kind.is_ingredient(),
            StationKind::Crate(_) => false,
            StationKind::DeliverCountertop => kind == ItemKind::Plate,
        }
    }
}

impl SlotHolder for Station {
    fn provide_from_slot(&mut self, requesting: Option<HeldItem>) -> Option<HeldItem> {
        // 手上有东西时不从台子上拿
        if requesting.is_some() {
            return None;
        }
        match self.kind {
            StationKind::DeliverCountertop => None,
            _ => self.item.take(),
        }
    }

    fn receive_into_slot(&mut self, item: HeldItem) -> bool {
        if self.item.is_some() || !self.accepts(item.kind) {
            return false;
        }
        self.item = Some(item);
        true
    }
}

/// 槽位里物品相对工作台的摆放位置
pub const SLOT_OFFSET: Vec3 = Vec3::new(0.0, 0.55, 0.0);

/// 掉在地上的物品高度
pub const ITEM_REST_HEIGHT: f32 = 0.15;
