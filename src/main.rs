use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rebrand::{driver, CustomizationRequest};

mod output;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rebrand")]
#[command(version = VERSION)]
#[command(about = "Rebrand a remote desktop build tree: name, endpoints, keys, assets, launch args")]
struct Cli {
    /// New application display name
    #[arg(long)]
    app_name: String,

    /// Rendezvous/signaling server address to bake in
    #[arg(long)]
    server_url: String,

    /// Server public key to bake in
    #[arg(long)]
    server_key: String,

    /// Default API endpoint
    #[arg(long)]
    api_server: Option<String>,

    /// Fixed password baked into non-overridable settings
    #[arg(long)]
    permanent_password: Option<String>,

    /// Remote source for the application icon (.ico)
    #[arg(long)]
    icon_url: Option<String>,

    /// Remote source for the logo (.svg)
    #[arg(long)]
    logo_url: Option<String>,

    /// Remote source for the tray icon (.ico)
    #[arg(long)]
    tray_icon_url: Option<String>,

    /// Remote source for the icon (.png)
    #[arg(long)]
    icon_png_url: Option<String>,

    /// Remote source for the logo (.png)
    #[arg(long)]
    logo_png_url: Option<String>,

    /// Shell-quoted extra tokens appended to the argument list at launch
    #[arg(long)]
    extra_args: Option<String>,

    /// Project root of the checked-out application tree
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Exit 3 when the run completed with warnings
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let request = CustomizationRequest {
        app_name: cli.app_name,
        server_url: cli.server_url,
        server_key: cli.server_key,
        api_server: cli.api_server,
        permanent_password: cli.permanent_password,
        icon_url: cli.icon_url,
        logo_url: cli.logo_url,
        tray_icon_url: cli.tray_icon_url,
        icon_png_url: cli.icon_png_url,
        logo_png_url: cli.logo_png_url,
        extra_args: cli.extra_args,
    };

    match driver::run(&cli.root, &request) {
        Ok(report) => {
            let code = report.exit_code(cli.strict);
            output::print_report(&report);
            ExitCode::from(exit_code_to_u8(code))
        }
        Err(err) => {
            output::print_error(&err);
            ExitCode::from(exit_code_to_u8(err.exit_code()))
        }
    }
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
