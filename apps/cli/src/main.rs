//! transition-fixer: サインイン時に壁紙のフェード切り替えを再有効化する。
//! イベントログソースとログオンタスクのインストール／アンインストールも行う。

use std::panic;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tf_composition::{CliRuntime, Mode, exit_codes};

const MODE_HELP: &str = "The mode the program will run as. Valid modes are:
- run (default)
- install-event-log
- uninstall-event-log
- install-task
- uninstall-task";

#[derive(Parser, Debug)]
#[command(
    name = "transition-fixer",
    version,
    about = "Re-enables the wallpaper fade transition after sign-in"
)]
struct Cli {
    #[arg(value_name = "MODE", value_parser = parse_mode, help = MODE_HELP)]
    mode: Option<Mode>,

    /// MODE の別表記
    #[arg(long = "mode", value_name = "MODE", value_parser = parse_mode, conflicts_with = "mode")]
    mode_flag: Option<Mode>,

    /// 起動直後にデバッガで停止
    #[cfg(debug_assertions)]
    #[arg(long = "break", default_value_t = false)]
    break_on_start: bool,
}

impl Cli {
    fn selected_mode(&self) -> Mode {
        self.mode.or(self.mode_flag).unwrap_or_default()
    }
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    Mode::parse(value).ok_or_else(|| format!("Unrecognized mode '{}'", value))
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
                _ => exit_codes::CMDLINE_ERROR,
            };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    #[cfg(debug_assertions)]
    {
        if cli.break_on_start {
            tf_composition::system::break_into_debugger();
        }
    }

    let mode = cli.selected_mode();
    match panic::catch_unwind(|| CliRuntime::new().execute(mode)) {
        Ok(code) => ExitCode::from(code),
        Err(payload) => {
            eprintln!("Unexpected error: {}", panic_message(payload.as_ref()));
            ExitCode::from(exit_codes::UNEXPECTED_ERROR)
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("transition-fixer").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_run() {
        assert_eq!(parse(&[]).unwrap().selected_mode(), Mode::Run);
    }

    #[test]
    fn positional_and_flag_forms_agree() {
        assert_eq!(
            parse(&["install-task"]).unwrap().selected_mode(),
            Mode::InstallTask
        );
        assert_eq!(
            parse(&["--mode", "install-task"]).unwrap().selected_mode(),
            Mode::InstallTask
        );
        assert_eq!(
            parse(&["uninstall"]).unwrap().selected_mode(),
            Mode::UninstallEventLog
        );
    }

    #[test]
    fn unknown_mode_is_a_command_line_error() {
        let err = parse(&["reinstall"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("reinstall"));
    }

    #[test]
    fn both_forms_together_conflict() {
        let err = parse(&["run", "--mode", "install-task"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn help_is_not_an_error_exit() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    /// 埋め込むメッセージテーブル（MESSAGE_RESOURCE_DATA）から (ID, テキスト) を取り出す
    fn message_table_entries(data: &[u8]) -> Vec<(u32, String)> {
        let u32_at = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
        let u16_at = |at: usize| u16::from_le_bytes([data[at], data[at + 1]]) as usize;
        let mut entries = Vec::new();
        for block in 0..u32_at(0) as usize {
            let base = 4 + block * 12;
            let (low, high, mut offset) = (u32_at(base), u32_at(base + 4), u32_at(base + 8) as usize);
            for id in low..=high {
                let length = u16_at(offset);
                assert_eq!(u16_at(offset + 2), 1, "entry must be UTF-16");
                let text: Vec<u16> = data[offset + 4..offset + length]
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .take_while(|&unit| unit != 0)
                    .collect();
                entries.push((id, String::from_utf16_lossy(&text)));
                offset += length;
            }
        }
        entries
    }

    #[test]
    fn message_table_covers_every_event_id() {
        use tf_composition::domain::model::{LogSeverity, MSG_SUCCESS};

        let entries = message_table_entries(include_bytes!("../MSG00409.bin"));
        let ids: Vec<u32> = entries.iter().map(|entry| entry.0).collect();
        for severity in [LogSeverity::Info, LogSeverity::Warning, LogSeverity::Error] {
            assert!(ids.contains(&severity.event_id()), "{:?}", severity);
        }
        assert!(ids.contains(&MSG_SUCCESS));
        assert_eq!(ids.len(), 4);
        assert!(entries.iter().all(|entry| entry.1 == "%1\r\n"));
    }

    #[test]
    fn panic_payloads_are_readable() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(boxed.as_ref()), "bang");
    }
}
