use std::io::{self, BufRead, Write};

pub mod cc {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
    pub const LIGHT_GRAY: &str = "\x1b[38;5;245m";
    pub const LIGHT_GREEN: &str = "\x1b[92m";
    pub const LIGHT_RED: &str = "\x1b[91m";
    pub const LIGHT_YELLOW: &str = "\x1b[93m";
    pub const LIGHT_CYAN: &str = "\x1b[96m";
}

#[macro_export]
macro_rules! log {
    // log!(cc::GREEN, "hello");
    ($color:expr, $fmt:literal $(,)?) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        let mut _stderr = ::std::io::stderr().lock();
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!(
                "{}{} | {}{}",
                $crate::libs::writing::cc::LIGHT_GRAY,
                time,
                $crate::libs::writing::cc::RESET,
                $color,
            ),
        );
        let _ = ::std::io::Write::write_fmt(&mut _stderr, format_args!($fmt));
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!("{}\n", $crate::libs::writing::cc::RESET),
        );
    }};

    // log!(cc::GREEN, "dropped to {} accounts", n);
    ($color:expr, $fmt:literal, $($arg:tt)+) => {{
        let time = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
        let mut _stderr = ::std::io::stderr().lock();
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!(
                "{}{} | {}{}",
                $crate::libs::writing::cc::LIGHT_GRAY,
                time,
                $crate::libs::writing::cc::RESET,
                $color,
            ),
        );
        let _ = ::std::io::Write::write_fmt(&mut _stderr, format_args!($fmt, $($arg)+));
        let _ = ::std::io::Write::write_fmt(
            &mut _stderr,
            format_args!("{}\n", $crate::libs::writing::cc::RESET),
        );
    }};
}

/// Line-oriented console surface: the paste prompt, the y/N gate and the
/// two colored status regions.
pub struct Console;

impl Console {
    pub fn new() -> Self {
        Self
    }

    pub fn status(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}{}{}", cc::LIGHT_GREEN, text, cc::RESET);
    }

    pub fn err(&mut self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}{}{}", cc::LIGHT_RED, text, cc::RESET);
    }

    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        {
            let mut out = io::stdout().lock();
            write!(out, "{}{} [y/N]: {}", cc::YELLOW, question, cc::RESET)?;
            out.flush()?;
        }
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let answer = input.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    /// Read pasted roster rows until an empty line or EOF.
    /// Returns None when nothing was pasted (the quit gesture).
    pub fn read_roster(&mut self) -> io::Result<Option<String>> {
        {
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{}Paste roster rows (label<TAB>address<TAB>amount), one per line.{}",
                cc::CYAN,
                cc::RESET
            )?;
            writeln!(
                out,
                "{}Finish with an empty line; an empty roster quits.{}",
                cc::LIGHT_GRAY,
                cc::RESET
            )?;
        }
        let stdin = io::stdin();
        let mut text = String::new();
        for line in stdin.lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                break;
            }
            text.push_str(&line);
            text.push('\n');
        }
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn smoke_log_variants_compile() {
        crate::log!(crate::libs::writing::cc::GREEN, "colored no args");
        crate::log!(crate::libs::writing::cc::GREEN, "colored with arg: {}", 123);
    }

    #[test]
    fn smoke_console_output() {
        let mut c = super::Console::new();
        c.status("ok");
        c.err("err");
    }
}
