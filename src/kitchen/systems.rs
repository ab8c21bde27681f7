use bevy::prelude::*;
use uuid::Uuid;

use super::components::*;
use super::components::Pickable;
use crate::core::events::LogEvent;
use crate::core::resources::GameConfig;
use crate::data::schema::{EntryKind, KitchenLayout};
use crate::data::LayoutAssets;
use crate::interaction::components::HeldItem;
use crate::interaction::events::{Interacted, InteractionOutcome};
use crate::notification::events::{PlateMissing, TipCalculated};
use crate::player::components::Player;

/// 有渲染时才会创建的网格 / 材质
#[derive(Resource, Clone)]
pub struct KitchenPalette {
    station_mesh: Handle<Mesh>,
    item_mesh: Handle<Mesh>,
    station_material: Handle<StandardMaterial>,
    item_materials: [Handle<StandardMaterial>; 4],
}

impl KitchenPalette {
    fn item_material(&self, kind: ItemKind) -> Handle<StandardMaterial> {
        let idx = match kind {
            ItemKind::Tomato => 0,
            ItemKind::Onion => 1,
            ItemKind::Mushroom => 2,
            ItemKind::Plate => 3,
        };
        self.item_materials[idx].clone()
    }
}

/// 布局名 + 序号 → 可重复的 v5 UUID，CLI 用它定位对象
pub fn stable_uid(name: &str, index: usize) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{index}:{name}").as_bytes())
}

fn item_bundle(
    name: &str,
    uid: Uuid,
    kind: ItemKind,
    transform: Transform,
) -> (Name, Interactable, Pickable, Transform) {
    (
        Name::new(name.to_string()),
        Interactable {
            name: name.to_string(),
            uid,
        },
        Pickable { kind },
        transform,
    )
}

fn insert_item_visuals(
    commands: &mut Commands,
    palette: Option<&KitchenPalette>,
    item: Entity,
    kind: ItemKind,
) {
    if let Some(p) = palette {
        commands
            .entity(item)
            .insert((Mesh3d(p.item_mesh.clone()), MeshMaterial3d(p.item_material(kind))));
    }
}

pub fn spawn_item(
    commands: &mut Commands,
    palette: Option<&KitchenPalette>,
    name: &str,
    uid: Uuid,
    kind: ItemKind,
    transform: Transform,
) -> Entity {
    let item = commands.spawn(item_bundle(name, uid, kind, transform)).id();
    insert_item_visuals(commands, palette, item, kind);
    item
}

/// 把整张布局生成出来
pub fn spawn_layout(
    commands: &mut Commands,
    layout: &KitchenLayout,
    palette: Option<&KitchenPalette>,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(layout.entries.len());
    for (index, entry) in layout.entries.iter().enumerate() {
        let uid = stable_uid(&entry.name, index);
        let (x, z) = entry.at;
        let entity = match entry.kind {
            EntryKind::Item(kind) => spawn_item(
                commands,
                palette,
                &entry.name,
                uid,
                kind,
                Transform::from_xyz(x, ITEM_REST_HEIGHT, z),
            ),
            EntryKind::Station(kind) => {
                let mut station = commands.spawn((
                    Name::new(entry.name.clone()),
                    Interactable {
                        name: entry.name.clone(),
                        uid,
                    },
                    Station::new(kind),
                    Transform::from_xyz(x, 0.0, z),
                ));
                if let Some(p) = palette {
                    station.insert((
                        Mesh3d(p.station_mesh.clone()),
                        MeshMaterial3d(p.station_material.clone()),
                    ));
                }
                station.id()
            }
            EntryKind::Prop => commands
                .spawn((
                    Name::new(entry.name.clone()),
                    Interactable {
                        name: entry.name.clone(),
                        uid,
                    },
                    Transform::from_xyz(x, 0.0, z),
                ))
                .id(),
        };
        spawned.push(entity);
    }
    spawned
}

/// 进入游戏时按布局生成厨房，并把玩家放到起点
pub fn spawn_kitchen(
    mut commands: Commands,
    layout_assets: Res<LayoutAssets>,
    layouts: Res<Assets<KitchenLayout>>,
    mut players: Query<&mut Transform, With<Player>>,
    meshes: Option<ResMut<Assets<Mesh>>>,
    materials: Option<ResMut<Assets<StandardMaterial>>>,
) {
    let Some(layout) = layout_assets.handle.as_ref().and_then(|h| layouts.get(h)) else {
        warn!("没有厨房布局，跳过生成");
        return;
    };

    let palette = match (meshes, materials) {
        (Some(mut meshes), Some(mut materials)) => {
            commands.spawn((
                Mesh3d(meshes.add(Plane3d::default().mesh().size(12.0, 8.0))),
                MeshMaterial3d(materials.add(Color::srgb(0.55, 0.5, 0.45))),
            ));
            commands.spawn((
                Camera3d::default(),
                Transform::from_xyz(0.0, 9.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
            ));
            commands.spawn((
                DirectionalLight::default(),
                Transform::from_xyz(3.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
            ));
            let palette = KitchenPalette {
                station_mesh: meshes.add(Cuboid::new(0.9, 0.9, 0.9)),
                item_mesh: meshes.add(Sphere::new(0.18)),
                station_material: materials.add(Color::srgb(0.6, 0.6, 0.65)),
                item_materials: [
                    materials.add(Color::srgb(0.85, 0.1, 0.1)),
                    materials.add(Color::srgb(0.9, 0.8, 0.6)),
                    materials.add(Color::srgb(0.6, 0.45, 0.3)),
                    materials.add(Color::WHITE),
                ],
            };
            commands.insert_resource(palette.clone());
            Some(palette)
        }
        _ => None,
    };

    let spawned = spawn_layout(&mut commands, layout, palette.as_ref());
    let (x, z) = layout.player_start;
    for mut transform in &mut players {
        transform.translation = Vec3::new(x, 0.0, z);
    }
    info!("厨房已生成：{} 个对象", spawned.len());
}

/// 原料箱空了就补一个
pub fn restock_crates(
    mut commands: Commands,
    palette: Option<Res<KitchenPalette>>,
    mut stations: Query<(Entity, &Interactable, &mut Station)>,
) {
    for (entity, info, mut station) in &mut stations {
        let StationKind::Crate(kind) = station.kind else {
            continue;
        };
        if station.item.is_some() {
            continue;
        }
        let name = format!("{kind:?}");
        // 补货物品的 uid 由原料箱 uid 和实体编号派生
        let item = commands.spawn_empty().id();
        let uid = Uuid::new_v5(&info.uid, &item.to_bits().to_le_bytes());
        commands.entity(item).insert((
            item_bundle(&name, uid, kind, Transform::from_translation(SLOT_OFFSET)),
            Slotted { station: entity },
        ));
        insert_item_visuals(&mut commands, palette.as_deref(), item, kind);
        commands.entity(entity).add_child(item);
        station.item = Some(HeldItem { entity: item, kind });
    }
}

/// 交互键打在工作台上的反应
pub fn react_to_interaction(
    mut reader: EventReader<Interacted>,
    stations: Query<(&Interactable, Option<&Station>)>,
    mut log: EventWriter<LogEvent>,
) {
    for ev in reader.read() {
        let Ok((info, station)) = stations.get(ev.target) else {
            continue;
        };
        debug!("{} interacted with {}", ev.player, info.name);
        let line = match station {
            Some(Station {
                kind: StationKind::CuttingBoard,
                item: Some(item),
            }) => format!("Chopping {:?} on {}", item.kind, info.name),
            _ => format!("Nothing to do at {}", info.name),
        };
        log.write(LogEvent(line));
    }
}

/// 出餐口拒收没装盘的食材时发出“缺盘子”
pub fn report_missing_plate(
    mut outcomes: EventReader<InteractionOutcome>,
    stations: Query<&Station>,
    mut missing: EventWriter<PlateMissing>,
) {
    for outcome in outcomes.read() {
        let InteractionOutcome::Refused { item, target } = *outcome else {
            continue;
        };
        let at_delivery = stations
            .get(target)
            .is_ok_and(|s| s.kind == StationKind::DeliverCountertop);
        if at_delivery && item.kind != ItemKind::Plate {
            missing.write(PlateMissing);
        }
    }
}

/// 盘子放上出餐口即结算：盘子收走、槽位清空、发小费
pub fn consume_deliveries(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut outcomes: EventReader<InteractionOutcome>,
    mut stations: Query<(&Interactable, &mut Station)>,
    mut tips: EventWriter<TipCalculated>,
    mut log: EventWriter<LogEvent>,
) {
    for outcome in outcomes.read() {
        let InteractionOutcome::Placed { item, station } = *outcome else {
            continue;
        };
        let Ok((info, mut station)) = stations.get_mut(station) else {
            continue;
        };
        if station.kind != StationKind::DeliverCountertop {
            continue;
        }
        if station.item.take() != Some(item) {
            warn!("{} 的槽位和出餐结果对不上", info.name);
        }
        commands.entity(item.entity).despawn();
        let amount = config.kitchen.delivery_tip;
        tips.write(TipCalculated { amount });
        log.write(LogEvent(format!("Delivered at {}: +{amount}", info.name)));
    }
}
