use bevy::prelude::*;

use super::components::*;
use super::events::*;
use super::resolver::{Resolution, TargetCapability, resolve};
use crate::core::events::LogEvent;
use crate::core::resources::GameConfig;
use crate::kitchen::components::{
    Carried, ITEM_REST_HEIGHT, Interactable, Pickable, SLOT_OFFSET, Slotted, Station,
};
use crate::player::components::Player;
use crate::player::events::{PlayerAction, PresentationCue};

/// 感应点在玩家前方的距离
const SENSOR_FORWARD: f32 = 0.5;
/// 丢下物品时离玩家的距离
const DROP_FORWARD: f32 = 0.6;

/// 选出感应点附近最近的可交互物；手上或槽位里的物品不算
pub fn update_current_target(
    config: Res<GameConfig>,
    mut players: Query<(&Transform, &mut CurrentTarget), With<Player>>,
    candidates: Query<
        (Entity, &Transform),
        (With<Interactable>, Without<Carried>, Without<Slotted>, Without<Player>),
    >,
) {
    let reach = config.player.reach;
    for (transform, mut current) in &mut players {
        let sensor = transform.translation + *transform.forward() * SENSOR_FORWARD;
        let nearest = candidates
            .iter()
            .map(|(entity, t)| {
                let offset = (t.translation - sensor).with_y(0.0);
                (entity, offset.length_squared())
            })
            .filter(|(_, d2)| *d2 <= reach * reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(entity, _)| entity);

        if current.0 != nearest {
            current.0 = nearest;
        }
    }
}

/// 拾取键：根据手上物品和当前目标结算，再执行挂载 / 放置 / 丢下
pub fn handle_pick_up(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    mut players: Query<(Entity, &Transform, &mut HeldSlot, &mut CurrentTarget), With<Player>>,
    anchors: Query<(Entity, &ChildOf), With<HandAnchor>>,
    pickables: Query<&Pickable, (Without<Carried>, Without<Slotted>)>,
    interactables: Query<(), With<Interactable>>,
    mut stations: Query<&mut Station>,
    mut outcomes: EventWriter<InteractionOutcome>,
    mut cues: EventWriter<PresentationCue>,
) {
    for action in actions.read() {
        if *action != PlayerAction::PickUp {
            continue;
        }
        for (player, transform, mut held, mut current) in &mut players {
            let target = current.0.filter(|e| interactables.contains(*e));

            let mut station_ref = target.and_then(|e| stations.get_mut(e).ok());
            let capability = match target {
                None => None,
                Some(entity) => match pickables.get(entity) {
                    Ok(p) => Some(TargetCapability::Pickable(HeldItem {
                        entity,
                        kind: p.kind,
                    })),
                    Err(_) => Some(match station_ref.as_deref_mut() {
                        Some(slot) => TargetCapability::SlotHolder { entity, slot },
                        None => TargetCapability::Plain(entity),
                    }),
                },
            };

            let resolution = resolve(&mut held.0, capability);
            debug!("pick-up resolved: {resolution:?}");

            let outcome = match resolution {
                Resolution::Picked(item) => {
                    // 已经拿起的物品不再是候选目标
                    current.0 = None;
                    InteractionOutcome::Picked(item)
                }
                Resolution::TakenFromSlot { item, station } => {
                    InteractionOutcome::TakenFromSlot { item, station }
                }
                Resolution::Dropped(item) => {
                    let pos = transform.translation + *transform.forward() * DROP_FORWARD;
                    drop_item(&mut commands, item, pos.with_y(ITEM_REST_HEIGHT));
                    InteractionOutcome::Dropped(item)
                }
                Resolution::Placed { item, station } => {
                    place_into_station(&mut commands, item, station);
                    InteractionOutcome::Placed { item, station }
                }
                Resolution::Refused { item, target } => InteractionOutcome::Refused { item, target },
                Resolution::Nothing => InteractionOutcome::Nothing,
            };

            if let Some(item) = resolution.attach_target() {
                match hand_anchor_of(player, &anchors) {
                    Some(anchor) => {
                        attach_to_hand(&mut commands, item, anchor);
                        cues.write(PresentationCue::Pick { player });
                    }
                    None => warn!("{player} 没有手部挂点"),
                }
            }

            outcomes.write(outcome);
        }
    }
}

/// 交互键只转发给目标，不改变手上物品
pub fn handle_interact(
    mut actions: EventReader<PlayerAction>,
    players: Query<(Entity, &CurrentTarget), With<Player>>,
    mut interacted: EventWriter<Interacted>,
) {
    for action in actions.read() {
        if *action != PlayerAction::Interact {
            continue;
        }
        for (player, current) in &players {
            if let Some(target) = current.0 {
                interacted.write(Interacted { player, target });
            }
        }
    }
}

/// 把结算结果写成一行日志
pub fn report_outcomes(
    mut outcomes: EventReader<InteractionOutcome>,
    names: Query<&Interactable>,
    mut log: EventWriter<LogEvent>,
) {
    let name = |e: Entity| {
        names
            .get(e)
            .map(|i| i.name.clone())
            .unwrap_or_else(|_| e.to_string())
    };
    for outcome in outcomes.read() {
        let line = match *outcome {
            InteractionOutcome::Picked(item) => format!("Picked up {}", name(item.entity)),
            InteractionOutcome::TakenFromSlot { item, station } => {
                format!("Took {} from {}", name(item.entity), name(station))
            }
            InteractionOutcome::Dropped(item) => format!("Dropped {}", name(item.entity)),
            InteractionOutcome::Placed { item, station } => {
                format!("Put {} on {}", name(item.entity), name(station))
            }
            InteractionOutcome::Refused { item, target } => {
                format!("{} does not fit on {}", name(item.entity), name(target))
            }
            InteractionOutcome::Nothing => continue,
        };
        log.write(LogEvent(line));
    }
}

fn hand_anchor_of(
    player: Entity,
    anchors: &Query<(Entity, &ChildOf), With<HandAnchor>>,
) -> Option<Entity> {
    anchors
        .iter()
        .find(|(_, child_of)| child_of.parent() == player)
        .map(|(anchor, _)| anchor)
}

/// 挂到手上：局部位置归零、旋转归一
pub fn attach_to_hand(commands: &mut Commands, item: HeldItem, anchor: Entity) {
    commands
        .entity(item.entity)
        .remove::<Slotted>()
        .insert((Carried, Transform::IDENTITY));
    commands.entity(anchor).add_child(item.entity);
}

fn place_into_station(commands: &mut Commands, item: HeldItem, station: Entity) {
    commands
        .entity(item.entity)
        .remove::<Carried>()
        .insert((Slotted { station }, Transform::from_translation(SLOT_OFFSET)));
    commands.entity(station).add_child(item.entity);
}

fn drop_item(commands: &mut Commands, item: HeldItem, at: Vec3) {
    commands
        .entity(item.entity)
        .remove::<(Carried, ChildOf)>()
        .insert(Transform::from_translation(at));
}
