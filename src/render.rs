// File: ./src/render.rs
//! Two-channel event styling for grid consumers.
//!
//! The fill carries the user's chosen [`PaletteColor`]; a fixed-width accent
//! edge on the leading side carries the [`Urgency`] tier. Neither channel
//! depends on the other, so both stay readable together.

use crate::color_utils;
use crate::model::{Event, PaletteColor, Urgency};

pub const ACCENT_WIDTH: u16 = 5;
pub const CORNER_RADIUS: u16 = 4;
pub const OPACITY: f32 = 0.8;
/// (vertical, horizontal)
pub const PADDING: (u16, u16) = (4, 8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn from_hex(hex: &str) -> Option<Self> {
        color_utils::hex_to_rgb(hex).map(|(r, g, b)| Rgb { r, g, b })
    }

    pub fn is_dark(self) -> bool {
        color_utils::is_dark(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventStyle {
    pub fill: Rgb,
    pub accent: Rgb,
    pub accent_width: u16,
    pub text: Rgb,
    pub corner_radius: u16,
    pub opacity: f32,
    pub padding: (u16, u16),
}

pub fn fill_color(color: PaletteColor) -> Rgb {
    Rgb::from_hex(color.hex()).unwrap_or(Rgb::WHITE)
}

pub fn accent_color(urgency: Urgency) -> Rgb {
    Rgb::from_hex(urgency.accent_hex()).unwrap_or(Rgb::WHITE)
}

pub fn event_style(event: &Event) -> EventStyle {
    EventStyle {
        fill: fill_color(event.color),
        accent: accent_color(event.urgency),
        accent_width: ACCENT_WIDTH,
        text: Rgb::WHITE,
        corner_radius: CORNER_RADIUS,
        opacity: OPACITY,
        padding: PADDING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventId;
    use chrono::NaiveDate;

    fn event(color: PaletteColor, urgency: Urgency) -> Event {
        let start = NaiveDate::from_ymd_opt(2025, 3, 20)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Event {
            id: EventId::from("e1"),
            title: "Standup".to_string(),
            description: None,
            start,
            end: start + chrono::Duration::hours(1),
            color,
            urgency,
        }
    }

    #[test]
    fn fill_and_accent_are_independent() {
        let a = event_style(&event(PaletteColor::Blue, Urgency::High));
        let b = event_style(&event(PaletteColor::Blue, Urgency::Low));
        let c = event_style(&event(PaletteColor::Green, Urgency::High));

        assert_eq!(a.fill, b.fill);
        assert_ne!(a.accent, b.accent);
        assert_eq!(a.accent, c.accent);
        assert_ne!(a.fill, c.fill);
    }

    #[test]
    fn style_constants() {
        let s = event_style(&event(PaletteColor::Red, Urgency::Medium));
        assert_eq!(s.fill, Rgb { r: 0xF3, g: 0x12, b: 0x60 });
        assert_eq!(s.accent, Rgb { r: 0xf5, g: 0x9e, b: 0x0b });
        assert_eq!(s.accent_width, 5);
        assert_eq!(s.text, Rgb::WHITE);
        assert_eq!(s.padding, (4, 8));
    }

    #[test]
    fn every_palette_and_tier_resolves() {
        for c in PaletteColor::ALL {
            assert!(Rgb::from_hex(c.hex()).is_some(), "{}", c.name());
        }
        for u in Urgency::ALL {
            assert!(Rgb::from_hex(u.accent_hex()).is_some(), "{}", u.label());
        }
    }
}
