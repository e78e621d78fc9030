//! Idle twitch: периодические маленькие случайные offsets головы когда цели нет
//!
//! FSM из двух состояний:
//! - Idle: pick ещё не пора
//! - DueForPick: now > next_twitch_time, выбираем новый offset и планируем следующий
//!
//! Offset всегда идёт через интерполятор на пониженной скорости (плавный дрейф).

use rand::Rng;

use super::angles::HeadAngles;
use super::config::HeadWatchSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwitchPhase {
    Idle,
    DueForPick,
}

impl TwitchPhase {
    pub fn at(now: f32, next_twitch_time: f32) -> Self {
        if now > next_twitch_time {
            Self::DueForPick
        } else {
            Self::Idle
        }
    }
}

/// Новый twitch offset + время следующего pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwitchPick {
    pub angles: HeadAngles,
    pub next_twitch_time: f32,
}

/// Случайное число в [-scale, scale] (0 для нулевого/некорректного scale)
fn crandom<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> f32 {
    let scale = if scale.is_finite() { scale.abs() } else { 0.0 };
    if scale == 0.0 {
        return 0.0;
    }
    rng.gen_range(-scale..=scale)
}

/// Выбрать новый offset (yaw/pitch в ±amplitude, roll = 0)
pub fn pick_twitch<R: Rng + ?Sized>(
    rng: &mut R,
    now: f32,
    settings: &HeadWatchSettings,
) -> TwitchPick {
    let angles = HeadAngles {
        yaw: crandom(rng, settings.twitch_amplitude),
        pitch: crandom(rng, settings.twitch_amplitude),
        roll: 0.0,
    };
    let next_twitch_time = now + settings.twitch_interval + crandom(rng, settings.twitch_jitter);

    TwitchPick {
        angles,
        next_twitch_time,
    }
}
