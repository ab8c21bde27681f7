//! 冲刺状态机：Idle → Impulse → Active → Cooldown → Idle，每个物理步推进一次

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashPhase {
    Idle,
    /// 已触发，下一个物理步施加冲量
    Impulse,
    Active { remaining: f32 },
    Cooldown { remaining: f32 },
}

/// step 的返回值：这一步是否需要施加冲量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStep {
    None,
    ApplyImpulse,
}

#[derive(Debug, Clone)]
pub struct DashMachine {
    phase: DashPhase,
    duration: f32,
    cooldown: f32,
}

impl DashMachine {
    pub fn new(duration: f32, cooldown: f32) -> Self {
        Self {
            phase: DashPhase::Idle,
            duration,
            cooldown,
        }
    }

    pub fn phase(&self) -> DashPhase {
        self.phase
    }

    /// 只有 Idle 才能再次触发
    pub fn is_ready(&self) -> bool {
        self.phase == DashPhase::Idle
    }

    /// Active 窗口内移动保持速度、只改方向
    pub fn is_dashing(&self) -> bool {
        matches!(self.phase, DashPhase::Active { .. })
    }

    /// 正在冲刺或冷却中调用是空操作
    pub fn try_trigger(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.phase = DashPhase::Impulse;
        true
    }

    pub fn step(&mut self, dt: f32) -> DashStep {
        match self.phase {
            DashPhase::Idle => DashStep::None,
            DashPhase::Impulse => {
                self.phase = DashPhase::Active {
                    remaining: self.duration,
                };
                DashStep::ApplyImpulse
            }
            DashPhase::Active { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    DashPhase::Cooldown {
                        remaining: self.cooldown,
                    }
                } else {
                    DashPhase::Active { remaining }
                };
                DashStep::None
            }
            DashPhase::Cooldown { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    DashPhase::Idle
                } else {
                    DashPhase::Cooldown { remaining }
                };
                DashStep::None
            }
        }
    }

    /// 取消进行中的冲刺，直接回到 Idle
    pub fn cancel(&mut self) {
        self.phase = DashPhase::Idle;
    }
}
