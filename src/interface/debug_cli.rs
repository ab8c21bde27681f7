//! 文字 CLI：读取 stdin → 解析命令 → 执行并打印

use bevy::app::AppExit;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use serde_derive::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::core::{
    events::LogEvent,
    states::{AppState, ControlScheme},
};
use crate::interaction::components::{CurrentTarget, HeldSlot};
use crate::kitchen::components::{Carried, Interactable, Slotted};
use crate::notification::events::{PlateMissing, TipCalculated};
use crate::player::components::{Body, Dash, MoveIntent, Player};
use crate::player::events::{MoveCommand, PlayerAction};

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

/// goto 时站在目标前方多远
const GOTO_STANDOFF: f32 = 0.9;

/// 插件入口
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if let Ok(mut buf) = buffer.lock() {
                        buf.push_back(line.to_string());
                    }
                }
            });
        }
        app
            // 事件：原始输入行
            .add_event::<CliLine>()
            // 每帧从 buffer 取出所有命令行写入事件
            .add_systems(Update, read_stdin)
            // 仅在 InGame 处理命令
            .add_systems(
                Update,
                execute_cli_commands
                    .after(read_stdin)
                    .run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- 事件与枚举 ---------------------------- */

/// 终端敲的一整行
#[derive(Event)]
pub struct CliLine(pub String);

/// 我们支持的命令
#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Move(Vec2),
    Dash,
    Pick,
    Interact,
    Look,
    Goto(String),
    Tip(i32),
    Plate,
    Scheme(ControlScheme),
    /// 命令认识但参数不对，带用法提示
    Invalid(&'static str),
    Unsupported(String),
}

/// status 输出的快照
#[derive(Serialize)]
struct StatusSnapshot {
    state: String,
    scheme: String,
    position: [f32; 3],
    facing: [f32; 3],
    velocity: [f32; 3],
    direction: [f32; 3],
    dash_ready: bool,
    dashing: bool,
    dash_phase: String,
    held: Option<String>,
    target: Option<String>,
}

/// 命令需要写的所有事件
#[derive(SystemParam)]
struct CliWriters<'w> {
    app_exit: EventWriter<'w, AppExit>,
    log: EventWriter<'w, LogEvent>,
    actions: EventWriter<'w, PlayerAction>,
    moves: EventWriter<'w, MoveCommand>,
    tips: EventWriter<'w, TipCalculated>,
    missing: EventWriter<'w, PlateMissing>,
}

/* ---------------------------- 读取 stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- 命令执行 ---------------------------- */

fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut out: CliWriters,
    state: Res<State<AppState>>,
    scheme: Res<State<ControlScheme>>,
    mut next_scheme: ResMut<NextState<ControlScheme>>,
    mut players: Query<
        (&mut Transform, &Body, &MoveIntent, &Dash, &HeldSlot, &CurrentTarget),
        With<Player>,
    >,
    interactables: Query<
        (&Interactable, &Transform),
        (Without<Player>, Without<Carried>, Without<Slotted>),
    >,
    names: Query<&Interactable>,
) {
    for CliLine(input) in line_reader.read() {
        match parse_command(input) {
            Command::Help => {
                out.log.write(LogEvent(
                    "命令列表:
  help                   查看帮助
  status                 以 JSON 打印玩家状态
  exit / quit            退出程序
  move <x> <y>           设置移动输入（-1..1，会被量化）
  dash                   冲刺
  pick                   拾取 / 放下
  interact               与当前目标交互
  look                   列出所有可交互物
  goto <token>           走到某个可交互物前（uuid / 名称）
  tip <n>                模拟小费结算
  plate                  模拟缺盘子
  menu / gameplay        切换按键映射
  ".into()));
            }

            Command::Status => {
                let Ok((transform, body, intent, dash, held, current)) = players.single() else {
                    out.log.write(LogEvent("未找到玩家".into()));
                    continue;
                };
                let name_of = |e: Entity| names.get(e).map(|i| i.name.clone()).ok();
                let snapshot = StatusSnapshot {
                    state: format!("{:?}", state.get()),
                    scheme: format!("{:?}", scheme.get()),
                    position: transform.translation.to_array(),
                    facing: transform.forward().to_array(),
                    velocity: body.velocity.to_array(),
                    direction: intent.direction.to_array(),
                    dash_ready: dash.0.is_ready(),
                    dashing: dash.0.is_dashing(),
                    dash_phase: format!("{:?}", dash.0.phase()),
                    held: held.0.and_then(|h| name_of(h.entity)),
                    target: current.0.and_then(name_of),
                };
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => out.log.write(LogEvent(json)),
                    Err(e) => out.log.write(LogEvent(format!("status 序列化失败: {e}"))),
                };
            }

            Command::Exit => {
                out.log.write(LogEvent("Bye~".into()));
                out.app_exit.write(AppExit::Success);
            }

            Command::Move(raw) => {
                out.moves.write(MoveCommand(raw));
            }
            Command::Dash => {
                out.actions.write(PlayerAction::Dash);
            }
            Command::Pick => {
                out.actions.write(PlayerAction::PickUp);
            }
            Command::Interact => {
                out.actions.write(PlayerAction::Interact);
            }

            Command::Look => {
                for (info, t) in &interactables {
                    out.log.write(LogEvent(format!(
                        "{} | {} | ({:.1}, {:.1})",
                        info.uid, info.name, t.translation.x, t.translation.z
                    )));
                }
            }

            Command::Goto(token) => {
                let Some(spot) = find_interactable(&interactables, &token) else {
                    out.log.write(LogEvent("未找到匹配对象".into()));
                    continue;
                };
                if let Ok((mut transform, ..)) = players.single_mut() {
                    // 站在目标 +Z 一侧，面朝目标
                    let target = spot.with_y(0.0);
                    transform.translation = target + Vec3::Z * GOTO_STANDOFF;
                    transform.look_at(target, Vec3::Y);
                    out.log.write(LogEvent(format!("Moved next to {token}")));
                }
            }

            Command::Tip(amount) => {
                out.tips.write(TipCalculated { amount });
            }
            Command::Plate => {
                out.missing.write(PlateMissing);
            }

            Command::Scheme(target) => {
                next_scheme.set(target);
                out.log.write(LogEvent(format!("Control scheme -> {target:?}")));
            }

            Command::Invalid(usage) => {
                out.log.write(LogEvent(format!("参数错误，用法: {usage}")));
            }

            Command::Unsupported(cmd) => {
                out.log.write(LogEvent(format!("不支持的命令: {cmd}")));
            }
        }
    }
}

/* ---------------------------- 工具函数 ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();
    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "move" | "m" => {
            // 缺省的轴按 0 处理，写错的数字不行
            let axis = |v: Option<&str>| v.map_or(Ok(0.0), str::parse::<f32>);
            match (axis(parts.next()), axis(parts.next())) {
                (Ok(x), Ok(y)) => Command::Move(Vec2::new(x, y)),
                _ => Command::Invalid("move <x> <y>"),
            }
        }
        "dash" | "d" => Command::Dash,
        "pick" | "p" => Command::Pick,
        "interact" | "use" => Command::Interact,
        "look" | "l" => Command::Look,
        "goto" | "g" => Command::Goto(parts.collect::<Vec<_>>().join(" ")),
        "tip" => match parts.next().map(str::parse) {
            Some(Ok(amount)) => Command::Tip(amount),
            _ => Command::Invalid("tip <n>"),
        },
        "plate" => Command::Plate,
        "menu" => Command::Scheme(ControlScheme::Menu),
        "gameplay" | "play" => Command::Scheme(ControlScheme::Gameplay),
        other => Command::Unsupported(other.into()),
    }
}

/// 按 uuid 或名称（忽略大小写）查找，返回位置
fn find_interactable(
    interactables: &Query<
        (&Interactable, &Transform),
        (Without<Player>, Without<Carried>, Without<Slotted>),
    >,
    token: &str,
) -> Option<Vec3> {
    let token = token.trim();
    interactables
        .iter()
        .find(|(info, _)| {
            info.name.eq_ignore_ascii_case(token)
                || info.uid.to_string().eq_ignore_ascii_case(token)
        })
        .map(|(_, t)| t.translation)
}
