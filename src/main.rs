use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};

fn cli() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("gen")
                .about("Generates provided components")
                .after_help("Example: scaffed gen -n Component1 Component2")
                .arg(
                    Arg::new("component_names")
                        .short('n')
                        .long("component-names")
                        .visible_alias("componentNames")
                        .value_name("NAME")
                        .help("A list of component names to generate")
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .required(true),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .value_name("NAME")
                        .help("Use .scaffed/<NAME>.toml instead of .scaffed/config.toml"),
                ),
        )
}

fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();
}

// The CLI layer should only parse inputs and forward them to library code.
fn main() {
    let matches = cli().get_matches();

    init_logger(matches.get_flag("verbose"));

    let result = match matches.subcommand() {
        Some(("gen", args)) => handle_gen(args),
        _ => unreachable!(),
    };

    if let Err(error) = result {
        eprintln!("{:?}", miette::Report::new(error));
        std::process::exit(1);
    }
}

fn handle_gen(args: &ArgMatches) -> Result<(), scaffed::api::ScaffedError> {
    let component_names: Vec<String> = args
        .get_many::<String>("component_names")
        .unwrap_or_default()
        .cloned()
        .collect();
    let config_variant = args.get_one::<String>("config").map(String::as_str);

    let summary = scaffed::api::generate_components(&component_names, config_variant)?;

    log::debug!(
        "generated: {:?}, skipped: {:?}",
        summary.generated,
        summary.skipped
    );

    Ok(())
}
