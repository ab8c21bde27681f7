use bevy::prelude::*;

/// 结算出小费
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipCalculated {
    pub amount: i32,
}

/// 出餐口收到了没装盘的菜
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlateMissing;
