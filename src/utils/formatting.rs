//! Formatting utilities used for CLI and export outputs.

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Seconds → `01h 05m 09s`, or `01:05:09` when `short`.
pub fn secs2readable(secs: i64, short: bool) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let abs_s = secs.abs();
    let hours = abs_s / 3600;
    let minutes = (abs_s % 3600) / 60;
    let seconds = abs_s % 60;

    if short {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    } else {
        format!("{}{:02}h {:02}m {:02}s", sign, hours, minutes, seconds)
    }
}

pub fn print_separator(ch: &str, width: usize) {
    let c = ch.chars().next().unwrap_or('-');
    println!("{}", c.to_string().repeat(width));
}
