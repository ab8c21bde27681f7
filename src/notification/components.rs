use bevy::prelude::*;

/// LeanEase.Smooth 同款 smoothstep
pub fn smooth(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

pub fn tip_text(amount: i32) -> String {
    format!("+{amount} TIP!")
}

pub const PLATE_MISSING_TEXT: &str = "NEEDS PLATE!";

/// 提示条：显示时透明度 1 → 0，同时向上飘 rise 像素
#[derive(Component, Debug, Clone)]
pub struct NotificationBanner {
    pub text: String,
    pub base: Color,
    pub outline: Color,
    pub duration: f32,
    pub rise: f32,
    elapsed: f32,
    shown: bool,
}

impl NotificationBanner {
    pub fn new(rise: f32) -> Self {
        Self {
            text: String::new(),
            base: Color::WHITE,
            outline: Color::BLACK,
            duration: 2.0,
            rise,
            elapsed: 0.0,
            shown: false,
        }
    }

    /// 重新显示会打断上一条的渐隐
    pub fn show(&mut self, text: impl Into<String>, base: Color, outline: Color, duration: f32) {
        self.text = text.into();
        self.base = base;
        self.outline = outline;
        self.duration = duration.max(f32::EPSILON);
        self.elapsed = 0.0;
        self.shown = true;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.shown {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    fn progress(&self) -> f32 {
        smooth(self.elapsed / self.duration)
    }

    pub fn alpha(&self) -> f32 {
        if self.shown { 1.0 - self.progress() } else { 0.0 }
    }

    pub fn offset_y(&self) -> f32 {
        if self.shown { self.rise * self.progress() } else { 0.0 }
    }

    pub fn is_finished(&self) -> bool {
        !self.shown || self.elapsed >= self.duration
    }
}
