pub mod schema;
pub mod loader;

use bevy::asset::LoadState;
use bevy::prelude::*;
use schema::KitchenLayout;
use crate::core::resources::GameConfig;
use crate::core::states::AppState;

// --------------------------- 资源 ---------------------------
#[derive(Resource, Default)]
pub struct LayoutAssets {
    pub handle: Option<Handle<KitchenLayout>>,
}

// --------------------------- 插件 ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            // 注册资产类型 & Loader
            .init_asset::<KitchenLayout>()
            .register_asset_loader(loader::RonLayoutLoader)
            .init_resource::<LayoutAssets>()
            // Loading 流程
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- 系统 ---------------------------
fn start_loading(
    mut layout_assets: ResMut<LayoutAssets>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    let handle: Handle<KitchenLayout> = asset_server.load(config.data.layout.clone());
    layout_assets.handle = Some(handle);
}

fn check_loaded(
    mut next: ResMut<NextState<AppState>>,
    layout_assets: Res<LayoutAssets>,
    layouts: Res<Assets<KitchenLayout>>,
    asset_server: Res<AssetServer>,
) {
    let Some(h) = &layout_assets.handle else { return };
    if let Some(layout) = layouts.get(h) {
        info!("✔ Kitchen loaded: {} entries", layout.entries.len());
        next.set(AppState::InGame);
    } else if matches!(asset_server.load_state(h), LoadState::Failed(_)) {
        // 布局坏了也进游戏，只是厨房是空的
        error!("厨房布局加载失败，使用空场景");
        next.set(AppState::InGame);
    }
}
