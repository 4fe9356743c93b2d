use clap::Parser;

mod commands;
mod output;
mod tty;

use commands::fix;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "fix-opacity")]
#[command(version = VERSION)]
#[command(about = "Rewrite .withOpacity(x) calls to .withValues(alpha: x) across a Dart source tree")]
struct Cli {
    #[command(flatten)]
    fix: fix::FixArgs,
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let json = cli.fix.json;
    let result = fix::run(cli.fix);

    let exit_code = if json {
        let (json_result, exit_code) = output::map_cmd_result_to_json(result);
        if let Err(err) = output::print_json_result(json_result, exit_code) {
            output::print_error(&err);
        }
        exit_code
    } else {
        match result {
            Ok((fixed, exit_code)) => {
                if exit_code != 0 {
                    let err = fix_opacity::Error::rewrite_files_failed(fixed.report.failed_paths());
                    output::print_error(&err);
                }
                exit_code
            }
            Err(err) => {
                output::print_error(&err);
                output::exit_code_for_error(err.code)
            }
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
