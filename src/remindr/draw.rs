//! Reminder screens: rendering and touch zones.
//!
//! Each screen is a plain draw function over the [`Surface`] contract
//! plus a hit-test helper mapping touch coordinates to an action.

use super::task::{title_font_height, Task};
use super::NudgeResponse;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::gfx::{FontId, Rect, Surface, CANCEL_COLOR, CONFIRM_COLOR};
use embedded_graphics::pixelcolor::Rgb565;

const NEW_TASK_BUTTON: Rect = Rect::new(10, 44, 156, 72);
const MANAGE_BUTTON: Rect = Rect::new(10, 124, 156, 40);

const YES_BUTTON: Rect = Rect::new(10, 108, 73, 58);
const NO_BUTTON: Rect = Rect::new(93, 108, 73, 58);

const PRI_NEW_TASK_BUTTON: Rect = Rect::new(10, 76, 156, 30);
const PRI_VIEW_TASKS_BUTTON: Rect = Rect::new(10, 110, 156, 30);
const PRI_BREAK_BUTTON: Rect = Rect::new(10, 144, 156, 30);

/// Actions on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MainMenuAction {
    NewTask,
    Manage,
}

/// Actions on the prioritize screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PrioritizeAction {
    NewTask,
    ViewTasks,
    TakeBreak,
}

pub fn draw_main_menu<S: Surface>(surface: &mut S) {
    surface.clear();
    draw_centered(surface, "-- WORKING MEMORY --", FontId::Mono6x8, 16);
    draw_button(surface, NEW_TASK_BUTTON, "New Task", None);
    draw_button(surface, MANAGE_BUTTON, "Manage", None);
}

pub fn draw_task_screen<S: Surface>(surface: &mut S, task: &Task) {
    surface.clear();
    draw_centered(surface, "-- Current Task --", FontId::Mono6x8, 36);
    draw_title(surface, &task.text, 70);
    draw_centered(surface, "-- Touch for options --", FontId::Mono6x8, 140);
}

pub fn draw_nudge_screen<S: Surface>(surface: &mut S, task: &Task) {
    surface.clear();
    draw_centered(surface, "-- Current Task --", FontId::Mono6x8, 12);
    draw_title(surface, &task.text, 40);
    draw_centered(surface, "-- Are you on task? --", FontId::Mono6x8, 88);
    draw_button(surface, YES_BUTTON, "Yes!", Some(CONFIRM_COLOR));
    draw_button(surface, NO_BUTTON, "No!", Some(CANCEL_COLOR));
}

pub fn draw_prioritize_screen<S: Surface>(surface: &mut S, task: &Task) {
    surface.clear();
    draw_centered(surface, "Manage Task", FontId::Mono6x8, 12);
    draw_title(surface, &task.text, 36);
    draw_button(surface, PRI_NEW_TASK_BUTTON, "New Task", None);
    draw_button(surface, PRI_VIEW_TASKS_BUTTON, "View Tasks", None);
    draw_button(surface, PRI_BREAK_BUTTON, "Take a Break", None);
}

pub fn main_menu_hit(x: i32, y: i32) -> Option<MainMenuAction> {
    if NEW_TASK_BUTTON.hit(x, y) {
        Some(MainMenuAction::NewTask)
    } else if MANAGE_BUTTON.hit(x, y) {
        Some(MainMenuAction::Manage)
    } else {
        None
    }
}

pub fn nudge_hit(x: i32, y: i32) -> Option<NudgeResponse> {
    if YES_BUTTON.hit(x, y) {
        Some(NudgeResponse::OnTask)
    } else if NO_BUTTON.hit(x, y) {
        Some(NudgeResponse::Distracted)
    } else {
        None
    }
}

pub fn prioritize_hit(x: i32, y: i32) -> Option<PrioritizeAction> {
    if PRI_NEW_TASK_BUTTON.hit(x, y) {
        Some(PrioritizeAction::NewTask)
    } else if PRI_VIEW_TASKS_BUTTON.hit(x, y) {
        Some(PrioritizeAction::ViewTasks)
    } else if PRI_BREAK_BUTTON.hit(x, y) {
        Some(PrioritizeAction::TakeBreak)
    } else {
        None
    }
}

/// Task titles scale to fill the screen width, capped so short titles
/// stay reasonable.
fn draw_title<S: Surface>(surface: &mut S, text: &str, y: i32) {
    surface.set_font(FontId::Vector(176));
    let width = surface.string_width(text);
    let height = title_font_height(width);
    draw_centered(surface, text, FontId::Vector(height as u16), y);
}

fn draw_centered<S: Surface>(surface: &mut S, text: &str, font: FontId, y: i32) {
    let theme = surface.theme();
    surface.set_font(font);
    let width = surface.string_width(text);
    surface.set_color(theme.fg);
    surface.draw_string(text, (SCREEN_WIDTH - width) / 2, y);
}

fn draw_button<S: Surface>(surface: &mut S, rect: Rect, label: &str, accent: Option<Rgb565>) {
    let theme = surface.theme();
    surface.set_color(theme.fg);
    surface.fill_rect(rect);
    surface.set_color(accent.unwrap_or(theme.bg2));
    surface.fill_rect(rect.inset(2));

    surface.set_font(FontId::Mono12x20);
    let width = surface.string_width(label);
    surface.set_color(theme.fg);
    surface.draw_string(
        label,
        rect.x + rect.w / 2 - width / 2,
        rect.y + rect.h / 2 - 10,
    );
}

// Buttons must stay on screen.
const _: () = assert!(PRI_BREAK_BUTTON.y + PRI_BREAK_BUTTON.h <= SCREEN_HEIGHT);
const _: () = assert!(NO_BUTTON.y + NO_BUTTON.h <= SCREEN_HEIGHT);
