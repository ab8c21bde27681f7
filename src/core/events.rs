use bevy::prelude::*;

use super::states::ControlScheme;

/// 面向玩家的一行输出，由 main 里的 forward_log_event 统一打印
#[derive(Event)]
pub struct LogEvent(pub String);

/// Esc 在 Gameplay / Menu 两套映射之间切换
pub fn toggle_control_scheme(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    scheme: Res<State<ControlScheme>>,
    mut next: ResMut<NextState<ControlScheme>>,
    mut log: EventWriter<LogEvent>,
) {
    let Some(keys) = keys else { return };
    if keys.just_pressed(KeyCode::Escape) {
        let target = scheme.get().toggled();
        next.set(target);
        log.write(LogEvent(format!("Control scheme -> {target:?}")));
    }
}
