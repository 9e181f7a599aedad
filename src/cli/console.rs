//! Console host: shows forms as text and reads answers line by line.
//!
//! Conventions for answering:
//! - menus: the button number; a blank line closes the menu
//! - inputs: a blank line keeps the pre-filled value, `-` clears it
//! - any prompt: `:q` or end of input closes the form

use std::io::{self, BufRead, Write};

use crate::flow::{Field, FieldValue, Form, Response, Session, Step};
use crate::format::{format_position, strip_codes};
use crate::plugin::EveryoneWarp;

use super::format::indent_continuation;

const CLOSE: &str = ":q";

pub(super) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(super) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Shows forms and feeds answers back until the session ends.
    pub(super) fn drive(
        &mut self,
        plugin: &mut EveryoneWarp,
        mut session: Session,
        mut step: Step,
    ) -> io::Result<()> {
        loop {
            for message in &step.messages {
                writeln!(self.output, "{}", strip_codes(message))?;
            }
            if session.is_finished() {
                return Ok(());
            }
            let Some(form) = step.form.take() else {
                return Ok(());
            };
            let response = self.ask(&form)?;
            step = plugin.respond(&mut session, response);
        }
    }

    /// Tells the player where they are being guided, if anywhere.
    pub(super) fn report_navigation(
        &mut self,
        plugin: &EveryoneWarp,
        xuid: &str,
    ) -> io::Result<()> {
        if let Some(warp) = plugin.navigator().target(xuid) {
            let pos = strip_codes(&format_position(&warp.pos, plugin.locale()));
            writeln!(self.output, "Navigating to {} at {pos}", warp.name)?;
        }
        Ok(())
    }

    fn ask(&mut self, form: &Form) -> io::Result<Response> {
        writeln!(self.output, "== {} ==", strip_codes(form.title()))?;
        match form {
            Form::Simple {
                content, buttons, ..
            } => self.ask_simple(content, buttons),
            Form::Custom { fields, .. } => self.ask_custom(fields),
            Form::Modal {
                content,
                confirm,
                cancel,
                ..
            } => self.ask_modal(content, confirm, cancel),
        }
    }

    fn ask_simple(&mut self, content: &str, buttons: &[String]) -> io::Result<Response> {
        if !content.is_empty() {
            writeln!(self.output, "{}", strip_codes(content))?;
        }
        for (i, label) in buttons.iter().enumerate() {
            let label = indent_continuation(&strip_codes(label), 6);
            writeln!(self.output, "  [{}] {label}", i + 1)?;
        }
        loop {
            let Some(line) = self.prompt("choose (blank to close)")? else {
                return Ok(Response::Closed);
            };
            let line = line.trim();
            if line.is_empty() {
                return Ok(Response::Closed);
            }
            match parse_choice(line, buttons.len()) {
                Some(index) => return Ok(Response::Button(index)),
                None => writeln!(
                    self.output,
                    "enter a number between 1 and {}",
                    buttons.len()
                )?,
            }
        }
    }

    fn ask_custom(&mut self, fields: &[Field]) -> io::Result<Response> {
        let mut values = Vec::with_capacity(fields.len());
        for field in fields {
            let value = match field {
                Field::Input { label, default, .. } => {
                    let label = strip_codes(label);
                    let question = if default.is_empty() {
                        label
                    } else {
                        format!("{label} [{default}]")
                    };
                    let Some(line) = self.prompt(&question)? else {
                        return Ok(Response::Closed);
                    };
                    let text = match line.trim() {
                        "" => default.clone(),
                        "-" => String::new(),
                        _ => line.clone(),
                    };
                    FieldValue::Text(text)
                }
                Field::Dropdown {
                    label,
                    options,
                    default,
                } => {
                    for (i, option) in options.iter().enumerate() {
                        writeln!(self.output, "  [{}] {}", i + 1, strip_codes(option))?;
                    }
                    let question = format!("{} [{}]", strip_codes(label), default + 1);
                    loop {
                        let Some(line) = self.prompt(&question)? else {
                            return Ok(Response::Closed);
                        };
                        let line = line.trim();
                        if line.is_empty() {
                            break FieldValue::Choice(*default);
                        }
                        if let Some(index) = parse_choice(line, options.len()) {
                            break FieldValue::Choice(index);
                        }
                        writeln!(
                            self.output,
                            "enter a number between 1 and {}",
                            options.len()
                        )?;
                    }
                }
            };
            values.push(value);
        }
        Ok(Response::Values(values))
    }

    fn ask_modal(&mut self, content: &str, confirm: &str, cancel: &str) -> io::Result<Response> {
        writeln!(self.output, "{}", strip_codes(content))?;
        writeln!(
            self.output,
            "  [y] {}  [n] {}",
            strip_codes(confirm),
            strip_codes(cancel)
        )?;
        loop {
            let Some(line) = self.prompt("y/n")? else {
                return Ok(Response::Closed);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(Response::Confirm(true)),
                "n" | "no" => return Ok(Response::Confirm(false)),
                _ => writeln!(self.output, "answer y or n")?,
            }
        }
    }

    /// Prints `question` and reads one line. `None` means the form was closed.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim() == CLOSE {
            return Ok(None);
        }
        Ok(Some(line.to_string()))
    }
}

/// Parses a 1-based choice into a 0-based index below `len`.
fn parse_choice(input: &str, len: usize) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use tempfile::TempDir;

    use crate::commands::CommandOrigin;
    use crate::config::{Config, PlayerConfig};
    use crate::model::Position;

    fn plugin_in(dir: &TempDir) -> EveryoneWarp {
        let config = Config {
            server_root: dir.path().to_path_buf(),
            ..Config::default()
        };
        let mut plugin = EveryoneWarp::load(&config).unwrap();
        plugin.on_server_started();
        plugin
    }

    fn run(plugin: &mut EveryoneWarp, command: &str, script: &str) -> String {
        let player = PlayerConfig {
            name: "Steve".into(),
            xuid: "1".into(),
            ..PlayerConfig::default()
        }
        .to_player(Position::new(4.0, 65.0, -8.0, 0));
        let origin = CommandOrigin {
            player: Some(player),
        };
        let (session, step) = plugin.dispatch(command, origin).unwrap();

        let mut output = Vec::new();
        Console::new(Cursor::new(script.as_bytes()), &mut output)
            .drive(plugin, session, step)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn parse_choice_is_one_based() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("x", 3), None);
    }

    #[test]
    fn add_through_console_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin_in(&dir);

        // Add; name; keep x, y; override z; keep dimension; description.
        let out = run(&mut plugin, "warpm", "1\nHome\n\n\n12\n\nby the lake\n");

        assert!(out.contains("Created warp Home"));
        let warps = plugin.store().load().unwrap();
        assert_eq!(warps.len(), 1);
        assert_eq!(warps[0].pos, Position::new(4.0, 65.0, 12.0, 0));
        assert_eq!(warps[0].desc.as_deref(), Some("by the lake"));
    }

    #[test]
    fn end_of_input_cancels_add() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin_in(&dir);

        let out = run(&mut plugin, "warpmanage", "1\nHome\n");

        assert!(out.contains("Cancelled"));
        assert!(plugin.store().load().unwrap().is_empty());
    }

    #[test]
    fn list_navigate_through_console() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin_in(&dir);
        run(&mut plugin, "warpm", "1\nMine\n\n\n\n\n\n");

        // Bad choice first, then the warp, then Navigate.
        let out = run(&mut plugin, "warp", "9\n1\n1\n");

        assert!(out.contains("There are 1 warps"));
        assert!(out.contains("enter a number between 1 and 1"));
        assert_eq!(plugin.navigator().target("1").unwrap().name, "Mine");

        let mut output = Vec::new();
        Console::new(Cursor::new(&b""[..]), &mut output)
            .report_navigation(&plugin, "1")
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Navigating to Mine at 4.00 65.00 -8.00, Overworld\n"
        );
    }

    #[test]
    fn no_navigation_reports_nothing() {
        let dir = TempDir::new().unwrap();
        let plugin = plugin_in(&dir);

        let mut output = Vec::new();
        Console::new(Cursor::new(&b""[..]), &mut output)
            .report_navigation(&plugin, "1")
            .unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn delete_through_console_asks_first() {
        let dir = TempDir::new().unwrap();
        let mut plugin = plugin_in(&dir);
        run(&mut plugin, "warpm", "1\nDoomed\n\n\n\n\n\n");

        let out = run(&mut plugin, "warpm", "2\n1\nmaybe\ny\n");

        assert!(out.contains("answer y or n"));
        assert!(out.contains("Deleted warp Doomed"));
        assert!(plugin.store().load().unwrap().is_empty());
    }
}
