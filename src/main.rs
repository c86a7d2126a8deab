//! Embedded entry point: wires the keyboard and reminder apps to the
//! watch hardware.
//!
//! One executor, one logical thread. The touch task feeds a channel;
//! the main loop owns the drawing surface, the reminder app state, and
//! its two timers (nudge and response window).

#![no_std]
#![no_main]

mod board;

use board::{Frame, Lcd, Motor, NvmcFlash, WatchSurface};
use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::select::{select3, Either3};
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::{bind_interrupts, nvmc, peripherals, spim, twim};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use panic_probe as _;
use static_cell::StaticCell;

use kbslide::gfx::{Surface, Theme};
use kbslide::haptics::Haptics;
use kbslide::kb::driver::{run_session, TOUCH_QUEUE};
use kbslide::kb::session::Outcome;
use kbslide::kb::{InputOptions, TouchEvent};
use kbslide::remindr::draw::{
    draw_main_menu, draw_nudge_screen, draw_prioritize_screen, draw_task_screen, main_menu_hit,
    nudge_hit, prioritize_hit, MainMenuAction, PrioritizeAction,
};
use kbslide::remindr::store::Store;
use kbslide::remindr::{App, Effect, Screen};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

static TOUCH_CH: Channel<CriticalSectionRawMutex, TouchEvent, TOUCH_QUEUE> = Channel::new();
static MOTOR_CH: Channel<CriticalSectionRawMutex, u32, 4> = Channel::new();
static FRAME: StaticCell<Frame> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("kbslide starting");

    // LCD on SPI3
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M32;
    let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P0_26, p.P0_27, spi_config);
    let dc = Output::new(p.P0_28, Level::Low, OutputDrive::Standard);
    let cs = Output::new(p.P0_29, Level::High, OutputDrive::Standard);
    let mut backlight = Output::new(p.P0_30, Level::Low, OutputDrive::Standard);
    let mut lcd = Lcd::new(spi, dc, cs);
    lcd.init().await;
    backlight.set_high();

    // Touch controller on TWISPI0
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_11, p.P0_12, twim::Config::default());
    let touch_irq = Input::new(p.P0_24, Pull::Up);
    spawner.must_spawn(board::touch_task(i2c, touch_irq, TOUCH_CH.sender()));

    // Vibration motor
    let motor_pin = Output::new(p.P0_06, Level::Low, OutputDrive::Standard);
    spawner.must_spawn(board::motor_task(motor_pin, MOTOR_CH.receiver()));
    let mut haptics = Motor::new(MOTOR_CH.sender());

    // Settings blob
    let mut flash = NvmcFlash::new(nvmc::Nvmc::new(p.NVMC));
    let mut store = Store::new();
    store.load_from_flash(&mut flash).await;

    let frame = FRAME.init(Frame::new());
    let mut surface = WatchSurface::new(frame, lcd, Theme::default());
    let mut app = App::new(store);

    let mut nudge_at: Option<Instant> = None;
    let mut response_at: Option<Instant> = None;

    draw_main_menu(&mut surface);
    surface.present();

    loop {
        let event = select3(
            TOUCH_CH.receiver().receive(),
            at_or_never(nudge_at),
            at_or_never(response_at),
        )
        .await;

        let effect = match event {
            Either3::First(touch) => {
                handle_touch(&mut app, &mut surface, &mut haptics, touch).await
            }
            Either3::Second(()) => {
                nudge_at = None;
                app.nudge_due()
            }
            Either3::Third(()) => {
                response_at = None;
                app.response_timeout()
            }
        };

        if let Some(effect) = effect {
            match effect {
                Effect::ScheduleNudge(ms) => {
                    nudge_at = Some(Instant::now() + Duration::from_millis(ms));
                    response_at = None;
                }
                Effect::AwaitResponse { buzz_ms, window_ms } => {
                    haptics.buzz(buzz_ms);
                    response_at = Some(Instant::now() + Duration::from_millis(window_ms));
                    nudge_at = None;
                }
                Effect::StopTimers => {
                    nudge_at = None;
                    response_at = None;
                }
            }
        }

        redraw(&app, &mut surface);
        surface.present();

        app.store.save_to_flash(&mut flash).await;
    }
}

/// Dispatch a touch against the current screen. Text entry runs a full
/// keyboard session inline; every other press maps to an app
/// transition.
async fn handle_touch(
    app: &mut App,
    surface: &mut WatchSurface<'_>,
    haptics: &mut Motor,
    touch: TouchEvent,
) -> Option<Effect> {
    match app.screen() {
        Screen::MainMenu => match main_menu_hit(touch.x, touch.y)? {
            MainMenuAction::NewTask => new_task(app, surface, haptics).await,
            MainMenuAction::Manage => None,
        },
        Screen::Task => Some(app.change_priority()),
        Screen::Nudge => {
            let response = nudge_hit(touch.x, touch.y)?;
            app.respond(response)
        }
        Screen::Prioritize => match prioritize_hit(touch.x, touch.y)? {
            PrioritizeAction::NewTask => new_task(app, surface, haptics).await,
            PrioritizeAction::ViewTasks => None,
            PrioritizeAction::TakeBreak => Some(app.take_break()),
        },
    }
}

/// Collect a task title with the keyboard. Cancel leaves the app where
/// it was.
async fn new_task(
    app: &mut App,
    surface: &mut WatchSurface<'_>,
    haptics: &mut Motor,
) -> Option<Effect> {
    let options = InputOptions::default();
    let outcome = run_session(options, surface, haptics, TOUCH_CH.receiver()).await;
    match outcome {
        Outcome::Confirmed(text) if !text.is_empty() => {
            let id = Instant::now().as_secs() as u32;
            app.add_task(id, &text).ok()
        }
        _ => None,
    }
}

fn redraw(app: &App, surface: &mut WatchSurface<'_>) {
    match (app.screen(), app.active_task()) {
        (Screen::Task, Some(task)) => draw_task_screen(surface, task),
        (Screen::Nudge, Some(task)) => draw_nudge_screen(surface, task),
        (Screen::Prioritize, Some(task)) => draw_prioritize_screen(surface, task),
        _ => draw_main_menu(surface),
    }
}

async fn at_or_never(deadline: Option<Instant>) {
    match deadline {
        Some(at) => Timer::at(at).await,
        None => core::future::pending().await,
    }
}
