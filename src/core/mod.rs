use bevy::prelude::*;

pub mod states;
pub mod events;
pub mod resources;

/// 核心插件：注册全局资源 / 事件 / 状态
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        use states::{AppState, ControlScheme};

        // 配置在 main 里读取后插入；测试环境下没有就用默认值
        if !app.world().contains_resource::<resources::GameConfig>() {
            app.init_resource::<resources::GameConfig>();
        }

        app
            .init_state::<AppState>()
            .init_state::<ControlScheme>()
            .add_event::<events::LogEvent>()
            .add_systems(
                Update,
                events::toggle_control_scheme.run_if(in_state(AppState::InGame)),
            );
    }
}
