// SPDX-License-Identifier: MPL-2.0
use iced_folio::app::{self, paths, Flags};
use std::path::PathBuf;

const HELP: &str = "\
iced_folio - portfolio showcase

USAGE:
    iced_folio [OPTIONS]

OPTIONS:
    --lang <ID>          Interface language (e.g. en-US, fr)
    --config-dir <DIR>   Directory holding settings.toml
    --catalog <FILE>     Catalog TOML file replacing the built-in works
    -h, --help           Print this help

ENVIRONMENT:
    RUST_LOG                 Log filter (default: info)
    ICED_FOLIO_CONFIG_DIR    Config directory when --config-dir is absent
";

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(error) => {
            eprintln!("error: {error}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        log::warn!("ignoring unexpected arguments: {remaining:?}");
    }

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    Ok(Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        catalog: args.opt_value_from_os_str("--catalog", |value| {
            Ok::<PathBuf, std::convert::Infallible>(PathBuf::from(value))
        })?,
    })
}
