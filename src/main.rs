use std::process::ExitCode;

use anyhow::Result;
use clap::Parser as ClapParser;
use clap::error::ErrorKind;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

use cli::command::{Cli, LogFormat};
use cli::unpack::cmd_unpack;
use errors::ExitStatus;

mod byteorder;
mod cli;
mod errors;
pub(crate) mod timestamp;
mod wav;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitStatus::Success,
                _ => ExitStatus::Usage,
            }
            .into();
        }
    };

    let multi = MultiProgress::new();
    let pb = match init_logging(&cli, &multi) {
        Ok(pb) => pb,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitStatus::Usage.into();
        }
    };

    match cmd_unpack(&cli, pb) {
        Ok(_) => ExitStatus::Success.into(),
        Err(e) => {
            log::error!("{e:#}");
            ExitStatus::from_error(&e).into()
        }
    }
}

fn init_logging<'a>(cli: &Cli, multi: &'a MultiProgress) -> Result<Option<&'a MultiProgress>> {
    let mut env_builder = env_logger::Builder::from_default_env();
    env_builder.filter_level(cli.loglevel.to_level_filter());
    match cli.log_format {
        LogFormat::Plain => {
            env_builder.format_timestamp_secs();
        }
        LogFormat::Json => {
            env_builder.format(|buf, record| {
                use std::io::Write;
                writeln!(
                    buf,
                    "{{\"ts\":\"{}\",\"lvl\":\"{}\",\"msg\":{:?}}}",
                    buf.timestamp(),
                    record.level(),
                    record.args().to_string()
                )
            });
        }
    }

    if cli.progress {
        let logger = env_builder.build();
        LogWrapper::new(multi.clone(), logger).try_init()?;
        Ok(Some(multi))
    } else {
        env_builder.try_init()?;
        Ok(None)
    }
}
