use bevy::prelude::*;

use super::components::*;
use super::events::*;
use crate::core::resources::GameConfig;

/// 提示条初始距离屏幕顶部的像素
const BANNER_TOP: f32 = 160.0;

fn srgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

pub fn spawn_banner(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Name::new("NotificationBanner"),
        NotificationBanner::new(config.notification.rise),
        Text::new(""),
        TextFont::from_font_size(42.0),
        TextColor(Color::NONE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(BANNER_TOP),
            justify_self: JustifySelf::Center,
            border: UiRect::all(Val::Px(3.0)),
            padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
            ..default()
        },
        BorderColor(Color::NONE),
    ));
}

/// 小费 / 缺盘子事件 → 重新开始显示
pub fn show_notifications(
    mut tips: EventReader<TipCalculated>,
    mut missing: EventReader<PlateMissing>,
    config: Res<GameConfig>,
    mut banners: Query<&mut NotificationBanner>,
) {
    let cfg = &config.notification;
    let mut latest: Option<(String, Color, Color)> = None;
    for tip in tips.read() {
        latest = Some((
            tip_text(tip.amount),
            srgb(cfg.positive_base),
            srgb(cfg.positive_outline),
        ));
    }
    for _ in missing.read() {
        latest = Some((
            PLATE_MISSING_TEXT.to_string(),
            srgb(cfg.negative_base),
            srgb(cfg.negative_outline),
        ));
    }

    let Some((text, base, outline)) = latest else {
        return;
    };
    info!("notification: {text}");
    for mut banner in &mut banners {
        banner.show(text.clone(), base, outline, cfg.duration);
    }
}

pub fn advance_banners(time: Res<Time>, mut banners: Query<&mut NotificationBanner>) {
    let dt = time.delta_secs();
    for mut banner in &mut banners {
        if !banner.is_finished() {
            banner.advance(dt);
        }
    }
}

/// 把提示条状态同步到 UI 节点
pub fn sync_banner_ui(
    mut banners: Query<
        (&NotificationBanner, &mut Text, &mut TextColor, &mut BorderColor, &mut Node),
        Changed<NotificationBanner>,
    >,
) {
    for (banner, mut text, mut color, mut border, mut node) in &mut banners {
        if text.0 != banner.text {
            text.0 = banner.text.clone();
        }
        let alpha = banner.alpha();
        color.0 = banner.base.with_alpha(alpha);
        border.0 = banner.outline.with_alpha(alpha);
        node.top = Val::Px(BANNER_TOP - banner.offset_y());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_app() -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<GameConfig>()
            .init_resource::<Time>()
            .add_event::<TipCalculated>()
            .add_event::<PlateMissing>()
            .add_systems(Update, (show_notifications, advance_banners).chain());
        let banner = app.world_mut().spawn(NotificationBanner::new(100.0)).id();
        (app, banner)
    }

    fn tick(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn banner(app: &App, e: Entity) -> NotificationBanner {
        app.world().get::<NotificationBanner>(e).unwrap().clone()
    }

    #[test]
    fn tip_shows_positive_message_and_fades_over_two_seconds() {
        let (mut app, e) = test_app();
        app.world_mut().send_event(TipCalculated { amount: 5 });
        tick(&mut app, 0.0);

        let b = banner(&app, e);
        let cfg = GameConfig::default().notification;
        assert_eq!(b.text, "+5 TIP!");
        assert_eq!(b.base, srgb(cfg.positive_base));
        assert_eq!(b.outline, srgb(cfg.positive_outline));
        assert_eq!(b.alpha(), 1.0);

        tick(&mut app, 1.0);
        let b = banner(&app, e);
        assert!(b.alpha() > 0.0 && b.alpha() < 1.0);

        tick(&mut app, 1.0);
        let b = banner(&app, e);
        assert!(b.is_finished());
        assert!(b.alpha().abs() < 1e-5);
        assert!((b.offset_y() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn plate_missing_uses_negative_colors() {
        let (mut app, e) = test_app();
        app.world_mut().send_event(PlateMissing);
        tick(&mut app, 0.0);

        let b = banner(&app, e);
        let cfg = GameConfig::default().notification;
        assert_eq!(b.text, "NEEDS PLATE!");
        assert_eq!(b.base, srgb(cfg.negative_base));
    }
}
