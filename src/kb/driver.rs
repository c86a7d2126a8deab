//! Embedded session driver: pumps touch events and timers into a
//! [`Session`] until it resolves.
//!
//! Everything runs on one executor; the cursor-blink ticker and the
//! confirm/cancel debounce are the only timed constructs. The ticker
//! dies with this function, so it is cancelled exactly once however the
//! session ends.

use super::session::{Outcome, Session};
use super::{InputOptions, TouchEvent};
use crate::config::{CURSOR_BLINK_MS, RESOLVE_DEBOUNCE_MS};
use crate::gfx::Surface;
use crate::haptics::Haptics;
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Ticker, Timer};

/// Channel depth for touch events; the touch task drops events beyond
/// this while a redraw is in flight.
pub const TOUCH_QUEUE: usize = 4;

pub type TouchReceiver<'ch> =
    Receiver<'ch, CriticalSectionRawMutex, TouchEvent, TOUCH_QUEUE>;

/// Run one keyboard session to completion and return its outcome.
pub async fn run_session<S, H>(
    options: InputOptions<'_>,
    surface: &mut S,
    haptics: &mut H,
    touch: TouchReceiver<'_>,
) -> Outcome
where
    S: Surface,
    H: Haptics,
{
    let mut session = Session::new(&options);
    session.start(surface);
    surface.present();

    let mut blink = Ticker::every(Duration::from_millis(CURSOR_BLINK_MS));
    loop {
        match select(touch.receive(), blink.next()).await {
            Either::First(event) => {
                session.handle_touch(surface, haptics, event);
                if session.pending_resolution() {
                    // Let the in-flight touch event settle before the
                    // keyboard is torn down.
                    Timer::after(Duration::from_millis(RESOLVE_DEBOUNCE_MS)).await;
                    session.finish();
                }
            }
            Either::Second(()) => session.blink_tick(surface),
        }
        surface.present();

        if session.is_settled() {
            break;
        }
    }

    surface.clear();
    surface.present();
    session
        .outcome()
        .cloned()
        .unwrap_or(Outcome::Cancelled)
}
