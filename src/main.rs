// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{self, Serial},
};
use stm32f7xx_hal as hal;

use pin_repl::hw::f767::F7Board;
use pin_repl::{Config, Repl};

const CONFIG: Config = Config::NUCLEO_F767ZI;
const _: () = assert!(CONFIG.is_valid());

#[entry]
fn main() -> ! {
    // Peripherals
    let Some(dp) = pac::Peripherals::take() else {
        defmt::panic!("peripherals already taken");
    };

    // Clocks: default tree, HSI 16 MHz with every bus undivided
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();

    // USART1 (host link)
    let gpioa = dp.GPIOA.split();
    let tx = gpioa.pa9.into_alternate::<7>();
    let rx = gpioa.pa10.into_alternate::<7>();
    let usart_cfg = serial::Config {
        baud_rate: CONFIG.baud_rate.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART1, (tx, rx), &clocks, usart_cfg);

    // GPIO C/D/E, ADC1, TIM2 (millis), TIM4 (hardware PWM)
    let board = F7Board::new(dp.ADC1, dp.TIM2, dp.TIM4, CONFIG.cpu_freq_hz);

    defmt::info!("{} at {} baud", CONFIG.info, CONFIG.baud_rate);

    let mut repl = Repl::new(board, serial, CONFIG);
    repl.run()
}
