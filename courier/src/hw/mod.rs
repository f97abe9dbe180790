// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod buzzer;
pub mod micros;
pub mod pins;
pub mod pwm;
pub mod timebase;
pub mod usart;

pub use buzzer::Buzzer;
pub use micros::Micros;
pub use pwm::GearPwm;
pub use timebase::TickTimer;
pub use usart::{CommandRx, Usart};
