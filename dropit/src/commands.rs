use crate::CLAP_STYLING;
use clap::{Arg, arg, command};

fn file_id_arg() -> Arg {
    arg!(<FILE_ID>)
        .required(true)
        .help("The Figma file key, as found in the file URL")
}

fn output_args() -> [Arg; 2] {
    [
        arg!(-o --"output" <PATH>)
            .required(false)
            .help("Write the JSON to a file instead of stdout")
            .value_parser(clap::value_parser!(std::path::PathBuf)),
        arg!(--"compact")
            .required(false)
            .help("Print JSON on a single line")
            .action(clap::ArgAction::SetTrue),
    ]
}

fn image_option_args() -> [Arg; 2] {
    [
        arg!(-f --"format" <FORMAT>)
            .required(false)
            .help("Image format: png, jpg, svg, pdf (default: API default)")
            .value_parser(["png", "jpg", "svg", "pdf"]),
        arg!(-s --"scale" <SCALE>)
            .required(false)
            .help("Image scale between 0.01 and 4")
            .value_parser(clap::value_parser!(f64)),
    ]
}

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("dropit")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("dropit")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(arg!(-v --"verbose" "Log every API request").required(false))
        .arg(
            arg!(--"token" <TOKEN>)
                .required(false)
                .global(true)
                .env("FIGMA_TOKEN")
                .hide_env_values(true)
                .help("Figma personal access token"),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("app")
                .about("Build the app model of a file: screens, styles and images")
                .arg(file_id_arg())
                .args(output_args()),
        )
        .subcommand(
            command!("images")
                .about("Resolve every image fill in a file to a public URL")
                .arg(file_id_arg())
                .args(image_option_args())
                .args(output_args()),
        )
        .subcommand(
            command!("node-images")
                .about("Render specific nodes and print their image URLs")
                .arg(file_id_arg())
                .arg(
                    arg!(-i --"ids" <IDS>)
                        .required(true)
                        .help("Comma separated node ids, e.g. 1:2,3:4"),
                )
                .args(image_option_args())
                .args(output_args()),
        )
        .subcommand(
            command!("components")
                .about("List the components of a file")
                .arg(file_id_arg())
                .args(output_args()),
        )
        .subcommand(
            command!("styles")
                .about("List the local styles of a file with their details")
                .arg(file_id_arg())
                .args(output_args()),
        )
        .subcommand(
            command!("style")
                .about("Fetch a published style by key")
                .arg(arg!(<KEY>).required(true).help("The style key"))
                .args(output_args()),
        )
}
