//! Watch hardware glue: LCD, touch controller, vibration motor, flash.
//!
//! Only compiled into the embedded binary. The LCD is a 176×176 RGB565
//! panel on SPI driven from a full framebuffer; touch is a CST816-style
//! I²C controller with an interrupt line; the vibration motor hangs off
//! a single GPIO.

use defmt::{info, warn};
use embassy_nrf::gpio::{Input, Output};
use embassy_nrf::peripherals::{SPI3, TWISPI0};
use embassy_nrf::{spim, twim};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Timer};
use embedded_graphics::framebuffer::{buffer_size, Framebuffer};
use embedded_graphics::pixelcolor::raw::{BigEndian, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use kbslide::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use kbslide::gfx::eg::EgSurface;
use kbslide::gfx::{FontId, Rect, Surface, Theme};
use kbslide::haptics::Haptics;
use kbslide::kb::driver::TOUCH_QUEUE;
use kbslide::kb::{TouchEvent, TouchKind};

pub const LCD_W: usize = SCREEN_WIDTH as usize;
pub const LCD_H: usize = SCREEN_HEIGHT as usize;

/// Full-screen framebuffer the UI draws into; flushed to the panel
/// after each burst of drawing.
pub type Frame =
    Framebuffer<Rgb565, RawU16, BigEndian, LCD_W, LCD_H, { buffer_size::<Rgb565>(LCD_W, LCD_H) }>;

/// SPI LCD with the usual command/data and chip-select lines.
pub struct Lcd<'d> {
    spi: spim::Spim<'d, SPI3>,
    dc: Output<'d>,
    cs: Output<'d>,
}

impl<'d> Lcd<'d> {
    const CMD_CASET: u8 = 0x2A;
    const CMD_RASET: u8 = 0x2B;
    const CMD_RAMWR: u8 = 0x2C;

    pub fn new(spi: spim::Spim<'d, SPI3>, dc: Output<'d>, cs: Output<'d>) -> Self {
        Self { spi, dc, cs }
    }

    /// Panel bringup: sleep-out, pixel format, display-on.
    pub async fn init(&mut self) {
        for (cmd, data) in [
            (0x01, &[][..]),     // software reset
            (0x11, &[][..]),     // sleep out
            (0x3A, &[0x55][..]), // 16-bit pixels
            (0x36, &[0x00][..]), // memory access order
            (0x29, &[][..]),     // display on
        ] {
            self.command(cmd, data);
            Timer::after(Duration::from_millis(if cmd == 0x01 { 120 } else { 10 })).await;
        }
        info!("LCD initialised");
    }

    fn command(&mut self, cmd: u8, data: &[u8]) {
        self.cs.set_low();
        self.dc.set_low();
        let _ = self.spi.blocking_write(&[cmd]);
        if !data.is_empty() {
            self.dc.set_high();
            let _ = self.spi.blocking_write(data);
        }
        self.cs.set_high();
    }

    /// Push the whole framebuffer to the panel. Blocking: ~16 ms at
    /// 32 MHz, short enough to run inside a UI turn.
    pub fn flush(&mut self, frame: &Frame) {
        let w = (LCD_W - 1) as u16;
        let h = (LCD_H - 1) as u16;
        self.command(Self::CMD_CASET, &[0, 0, (w >> 8) as u8, w as u8]);
        self.command(Self::CMD_RASET, &[0, 0, (h >> 8) as u8, h as u8]);

        self.cs.set_low();
        self.dc.set_low();
        let _ = self.spi.blocking_write(&[Self::CMD_RAMWR]);
        self.dc.set_high();
        let _ = self.spi.blocking_write(frame.data());
        self.cs.set_high();
    }
}

/// Draw-target handle to the static framebuffer.
pub struct FrameRef(pub &'static mut Frame);

impl Dimensions for FrameRef {
    fn bounding_box(&self) -> Rectangle {
        self.0.bounding_box()
    }
}

impl DrawTarget for FrameRef {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.draw_iter(pixels)
    }
}

/// The watch's drawing surface: an [`EgSurface`] over the static
/// framebuffer whose `present` pushes the frame out over SPI.
pub struct WatchSurface<'d> {
    gfx: EgSurface<FrameRef>,
    lcd: Lcd<'d>,
}

impl<'d> WatchSurface<'d> {
    pub fn new(frame: &'static mut Frame, lcd: Lcd<'d>, theme: Theme) -> Self {
        Self {
            gfx: EgSurface::new(FrameRef(frame), theme),
            lcd,
        }
    }
}

impl Surface for WatchSurface<'_> {
    fn theme(&self) -> Theme {
        self.gfx.theme()
    }

    fn set_color(&mut self, color: Rgb565) {
        self.gfx.set_color(color);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.gfx.fill_rect(rect);
    }

    fn set_font(&mut self, font: FontId) {
        self.gfx.set_font(font);
    }

    fn draw_string(&mut self, text: &str, x: i32, y: i32) {
        self.gfx.draw_string(text, x, y);
    }

    fn string_width(&mut self, text: &str) -> i32 {
        self.gfx.string_width(text)
    }

    fn present(&mut self) {
        let frame: &Frame = self.gfx.target_mut().0;
        self.lcd.flush(frame);
    }
}

/// Touch frame registers: gesture, finger count, then 12-bit X/Y with
/// the event type in the top bits of the X high byte.
const TOUCH_ADDR: u8 = 0x15;
const EVENT_LIFT: u8 = 1;

/// Poll the touch controller on its interrupt line and turn
/// press/release pairs into [`TouchEvent`]s. Press duration decides
/// tap versus long press; the event fires on release.
#[embassy_executor::task]
pub async fn touch_task(
    mut i2c: twim::Twim<'static, TWISPI0>,
    mut irq: Input<'static>,
    tx: Sender<'static, CriticalSectionRawMutex, TouchEvent, TOUCH_QUEUE>,
) {
    let mut press_start: Option<Instant> = None;

    loop {
        irq.wait_for_low().await;

        let mut frame = [0u8; 7];
        if i2c.write_read(TOUCH_ADDR, &[0x00], &mut frame).await.is_err() {
            warn!("touch read failed");
            irq.wait_for_high().await;
            continue;
        }

        let event = frame[3] >> 6;
        let x = (((frame[3] & 0x0F) as i32) << 8) | frame[4] as i32;
        let y = (((frame[5] & 0x0F) as i32) << 8) | frame[6] as i32;

        if event == EVENT_LIFT {
            let kind = match press_start.take() {
                Some(start) => TouchKind::from_duration_ms(start.elapsed().as_millis()),
                None => TouchKind::Tap,
            };
            // Drop events rather than stall the touch loop when the UI
            // is mid-redraw.
            let _ = tx.try_send(TouchEvent { x, y, kind });
        } else if press_start.is_none() {
            press_start = Some(Instant::now());
        }

        irq.wait_for_high().await;
    }
}

/// Vibration motor behind a channel so haptic pulses never block the
/// UI turn that requested them.
pub struct Motor {
    tx: Sender<'static, CriticalSectionRawMutex, u32, 4>,
}

impl Motor {
    pub fn new(tx: Sender<'static, CriticalSectionRawMutex, u32, 4>) -> Self {
        Self { tx }
    }
}

impl Haptics for Motor {
    fn buzz(&mut self, duration_ms: u32) {
        let _ = self.tx.try_send(duration_ms);
    }
}

#[embassy_executor::task]
pub async fn motor_task(
    mut pin: Output<'static>,
    rx: embassy_sync::channel::Receiver<'static, CriticalSectionRawMutex, u32, 4>,
) {
    loop {
        let duration_ms = rx.receive().await;
        pin.set_high();
        Timer::after(Duration::from_millis(duration_ms as u64)).await;
        pin.set_low();
    }
}

/// Async adapter over the blocking NVMC flash so the store can use the
/// async `NorFlash` trait `sequential-storage` expects.
pub struct NvmcFlash<'d> {
    inner: embassy_nrf::nvmc::Nvmc<'d>,
}

impl<'d> NvmcFlash<'d> {
    pub fn new(inner: embassy_nrf::nvmc::Nvmc<'d>) -> Self {
        Self { inner }
    }
}

impl embedded_storage_async::nor_flash::ErrorType for NvmcFlash<'_> {
    type Error = <embassy_nrf::nvmc::Nvmc<'static> as embedded_storage::nor_flash::ErrorType>::Error;
}

impl embedded_storage_async::nor_flash::ReadNorFlash for NvmcFlash<'_> {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        embedded_storage::nor_flash::ReadNorFlash::read(&mut self.inner, offset, bytes)
    }

    fn capacity(&self) -> usize {
        embedded_storage::nor_flash::ReadNorFlash::capacity(&self.inner)
    }
}

impl embedded_storage_async::nor_flash::NorFlash for NvmcFlash<'_> {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = 4096;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        embedded_storage::nor_flash::NorFlash::erase(&mut self.inner, from, to)
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        embedded_storage::nor_flash::NorFlash::write(&mut self.inner, offset, bytes)
    }
}
