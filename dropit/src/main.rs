use colored::Colorize;
use commands::command_argument_builder;
use dropit::handlers::{
    Session, handle_app, handle_components, handle_images, handle_node_images, handle_style,
    handle_styles, init_tracing, print_banner,
};

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    init_tracing(chosen_command.get_flag("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let session = Session {
        token: chosen_command.get_one::<String>("token").cloned(),
        quiet,
    };

    let result = match chosen_command.subcommand() {
        Some(("app", args)) => handle_app(args, &session).await,
        Some(("images", args)) => handle_images(args, &session).await,
        Some(("node-images", args)) => handle_node_images(args, &session).await,
        Some(("components", args)) => handle_components(args, &session).await,
        Some(("styles", args)) => handle_styles(args, &session).await,
        Some(("style", args)) => handle_style(args, &session).await,
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
