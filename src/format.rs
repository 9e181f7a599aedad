//! Display formatting for positions, dates, and warp list entries.
//!
//! Output uses Minecraft `§` formatting codes. Hosts that cannot render them
//! pass the result through [`strip_codes`].

use jiff::{Timestamp, tz::TimeZone};

use crate::lang::{Locale, Text};
use crate::model::{Position, Warp};

/// Minecraft formatting codes.
pub mod code {
    pub const DARK_GREEN: &str = "§2";
    pub const GREEN: &str = "§a";
    pub const AQUA: &str = "§b";
    pub const RED: &str = "§c";
    pub const LIGHT_PURPLE: &str = "§d";
    pub const WHITE: &str = "§f";
    pub const GOLD: &str = "§g";
    pub const BOLD: &str = "§l";
    pub const CLEAR: &str = "§r";
}

use code::{AQUA, BOLD, CLEAR, DARK_GREEN, GOLD, GREEN, LIGHT_PURPLE, RED, WHITE};

/// Coordinates to two decimals followed by the dimension label.
pub fn format_position(pos: &Position, locale: Locale) -> String {
    let sep = match locale {
        Locale::En => ", ",
        Locale::Zh => "， ",
    };
    let dim = locale.dimension(pos.dimension());
    format!(
        "{GREEN}{:.2} {RED}{:.2} {AQUA}{:.2}{WHITE}{sep}{LIGHT_PURPLE}{dim}",
        pos.x, pos.y, pos.z
    )
}

/// Renders `YYYY-M-D H:MM:SS` in the given time zone.
///
/// Only minutes and seconds are zero-padded. External tools parse this
/// shape, so it must not change.
pub fn format_date(timestamp: Timestamp, tz: &TimeZone) -> String {
    let dt = tz.to_datetime(timestamp);
    format!(
        "{}-{}-{} {}:{:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

/// Button label for a warp in a list: name on the first line, position and
/// creator on the second.
pub fn warp_button(warp: &Warp, locale: Locale) -> String {
    format!(
        "{BOLD}{DARK_GREEN}{}{CLEAR}\n{}{CLEAR} - {GOLD}{}",
        warp.name,
        format_position(&warp.pos, locale),
        warp.player.name
    )
}

/// Multi-line description of a warp for its detail form.
pub fn warp_details(warp: &Warp, locale: Locale, tz: &TimeZone) -> String {
    let label = |text| match locale {
        Locale::En => format!("- {DARK_GREEN}{}: ", locale.text(text)),
        Locale::Zh => format!("- {DARK_GREEN}{}： ", locale.text(text)),
    };
    let xuid = match locale {
        Locale::En => format!(" ({})", warp.player.xuid),
        Locale::Zh => format!("（{}）", warp.player.xuid),
    };
    let desc = warp
        .desc
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(locale.text(Text::DetailNoDescription));

    format!(
        "{}{BOLD}{GREEN}{}{CLEAR}\n\
         {}{BOLD}{GREEN}{}{CLEAR}{GREEN}{xuid}{CLEAR}\n\
         {}{BOLD}{}{CLEAR}\n\
         {}{BOLD}{GREEN}{}{CLEAR}\n\
         {}{BOLD}{GREEN}{desc}",
        label(Text::DetailName),
        warp.name,
        label(Text::DetailCreator),
        warp.player.name,
        label(Text::DetailPosition),
        format_position(&warp.pos, locale),
        label(Text::DetailDate),
        format_date(warp.date, tz),
        label(Text::DetailDescription),
    )
}

/// Removes `§x` formatting codes.
pub fn strip_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '§' {
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}
