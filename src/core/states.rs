use bevy::prelude::*;

/// 游戏运行的大状态
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    #[default]
    Startup,
    Loading,
    InGame,
}

/// 当前生效的按键映射：游戏中 / 暂停菜单
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum ControlScheme {
    #[default]
    Gameplay,
    Menu,
}

impl ControlScheme {
    pub fn toggled(self) -> Self {
        match self {
            ControlScheme::Gameplay => ControlScheme::Menu,
            ControlScheme::Menu => ControlScheme::Gameplay,
        }
    }
}
