//! Board wiring for the stm32f072 build.
//!
//! Pin map:
//!
//! ```text
//! PA2  pad latch (out)     PC0..PC3  feedback LEDs
//! PA1  pad clock (out)     PB1       buzzer, TIM14 CH1 toggle output
//! PA3  pad data  (in, pull-up)
//! PA9/PA10  USART1 tx/rx, the link to the peer board
//! ```
//!
//! Everything here is setup and register pokes; the port trait keeps the
//! station logic away from the hardware.

use stm32f0xx_hal::gpio::gpioa::{PA1, PA10, PA2, PA3, PA9};
use stm32f0xx_hal::gpio::gpiob::PB1;
use stm32f0xx_hal::gpio::gpioc::{PC0, PC1, PC2, PC3};
use stm32f0xx_hal::gpio::{Alternate, Input, Output, PullUp, PushPull, AF0, AF1};
use stm32f0xx_hal::pac;
use stm32f0xx_hal::prelude::*;
use stm32f0xx_hal::serial::Serial;

use crate::port::{Board, LedPins, PadPins};
use crate::tone::{PulseTimer, ToneGen};

type LatchPin = PA2<Output<PushPull>>;
type ClockPin = PA1<Output<PushPull>>;
type DataPin = PA3<Input<PullUp>>;
type LinkSerial = Serial<pac::USART1, PA9<Alternate<AF1>>, PA10<Alternate<AF1>>>;

/// TIM14 channel 1 as the buzzer's toggle-on-compare timer.
///
/// The prescaler brings the 48 MHz core clock down to the 125 kHz count
/// rate the tone compare values are computed for (62.5 kHz after the
/// output toggle halves it).
pub struct Tim14Tone {
    tim: pac::TIM14,
}

impl Tim14Tone {
    const PRESCALER: u32 = 383; // 48 MHz / (383 + 1) = 125 kHz

    pub fn new(tim: pac::TIM14) -> Self {
        // The HAL keeps RCC to itself after freeze; enable the timer clock
        // directly.
        unsafe {
            let rcc = &(*pac::RCC::ptr());
            rcc.apb1enr.modify(|r, w| w.bits(r.bits() | (1 << 8)));
        }

        unsafe {
            tim.psc.write(|w| w.bits(Self::PRESCALER));
            // OC1M = 011: toggle the channel output on compare match
            tim.ccmr1_output().write(|w| w.bits(0b011 << 4));
            // CC1E: drive the output pin
            tim.ccer.write(|w| w.bits(1));
        }

        Self { tim }
    }
}

impl PulseTimer for Tim14Tone {
    fn start(&mut self) {
        unsafe {
            self.tim.cr1.modify(|r, w| w.bits(r.bits() | 1));
        }
    }

    fn stop(&mut self) {
        unsafe {
            self.tim.cr1.modify(|r, w| w.bits(r.bits() & !1));
        }
    }

    fn set_compare(&mut self, compare: u16) {
        unsafe {
            self.tim.arr.write(|w| w.bits(compare as u32));
            self.tim.ccr1.write(|w| w.bits(compare as u32));
        }
    }

    fn reset(&mut self) {
        unsafe {
            self.tim.cnt.write(|w| w.bits(0));
        }
    }
}

/// USART1 as the byte link to the peer board.
///
/// The HAL configures pins, baud rate and enables; readiness and data are
/// polled straight off the status register because the link contract is
/// non-blocking query-then-act.
pub struct UsartLink {
    _serial: LinkSerial,
}

impl UsartLink {
    pub fn new(serial: LinkSerial) -> Self {
        Self { _serial: serial }
    }

    fn regs() -> &'static pac::usart1::RegisterBlock {
        unsafe { &*pac::USART1::ptr() }
    }

    pub fn send_ready(&self) -> bool {
        Self::regs().isr.read().txe().bit_is_set()
    }

    pub fn send(&mut self, byte: u8) {
        unsafe {
            Self::regs().tdr.write(|w| w.bits(byte as u32));
        }
    }

    pub fn has_byte(&self) -> bool {
        Self::regs().isr.read().rxne().bit_is_set()
    }

    pub fn receive(&mut self) -> u8 {
        Self::regs().rdr.read().bits() as u8
    }
}

/// The assembled station I/O for the stm32f072 board.
pub struct StationBoard {
    pad: PadPins<LatchPin, ClockPin, DataPin>,
    leds: LedPins<
        PC0<Output<PushPull>>,
        PC1<Output<PushPull>>,
        PC2<Output<PushPull>>,
        PC3<Output<PushPull>>,
    >,
    tone: ToneGen<Tim14Tone>,
    link: UsartLink,
    _tone_pin: PB1<Alternate<AF0>>,
}

impl StationBoard {
    /// Bring up clocks, pins and peripherals and hand back the board.
    pub fn init(dp: pac::Peripherals) -> Self {
        let mut flash = dp.FLASH;
        let mut rcc = dp
            .RCC
            .configure()
            .hsi48()
            .sysclk(48.mhz())
            .freeze(&mut flash);

        let gpioa = dp.GPIOA.split(&mut rcc);
        let gpiob = dp.GPIOB.split(&mut rcc);
        let gpioc = dp.GPIOC.split(&mut rcc);

        let (latch, clock, data, tx, rx, tone_pin, led0, led1, led2, led3) =
            cortex_m::interrupt::free(|cs| {
                (
                    gpioa.pa2.into_push_pull_output(cs),
                    gpioa.pa1.into_push_pull_output(cs),
                    gpioa.pa3.into_pull_up_input(cs),
                    gpioa.pa9.into_alternate_af1(cs),
                    gpioa.pa10.into_alternate_af1(cs),
                    gpiob.pb1.into_alternate_af0(cs),
                    gpioc.pc0.into_push_pull_output(cs),
                    gpioc.pc1.into_push_pull_output(cs),
                    gpioc.pc2.into_push_pull_output(cs),
                    gpioc.pc3.into_push_pull_output(cs),
                )
            });

        let serial = Serial::usart1(dp.USART1, (tx, rx), 9_600.bps(), &mut rcc);

        Self {
            pad: PadPins::new(latch, clock, data),
            leds: LedPins::new(led0, led1, led2, led3),
            tone: ToneGen::new(Tim14Tone::new(dp.TIM14)),
            link: UsartLink::new(serial),
            _tone_pin: tone_pin,
        }
    }
}

impl Board for StationBoard {
    fn set_latch(&mut self, high: bool) {
        self.pad.set_latch(high);
    }

    fn set_clock(&mut self, high: bool) {
        self.pad.set_clock(high);
    }

    fn pad_data(&self) -> bool {
        self.pad.data()
    }

    fn set_leds(&mut self, bits: u8) {
        self.leds.set(bits);
    }

    fn set_tone(&mut self, freq_hz: u32) {
        self.tone.set_tone(freq_hz);
    }

    fn link_send_ready(&self) -> bool {
        self.link.send_ready()
    }

    fn link_send(&mut self, byte: u8) {
        self.link.send(byte);
    }

    fn link_has_byte(&self) -> bool {
        self.link.has_byte()
    }

    fn link_receive(&mut self) -> u8 {
        self.link.receive()
    }
}
