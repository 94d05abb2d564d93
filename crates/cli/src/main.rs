// CLI modules
mod cli;

use clap::{Parser, Subcommand};
use cli::{args::Args, op::Op, ops};

use vault_copy::process;

command_enum! {
    (Copy, ops::copy::Copy),
    (Delete, ops::delete::Delete),
    (Read, ops::read::Read),
    (Version, ops::version::Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let ctx = match cli::op::OpContext::new(args.config_path, args.yes) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // Flag > config file > info
    let log_level = match args.log_level {
        Some(level) => level,
        None => match ctx.config.logging.level() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    };
    let guards = process::init_logging(log_level, ctx.config.logging.dir.as_deref());

    let result = args.command.execute(&ctx).await;

    // flush logs before exiting
    drop(guards);

    match result {
        Ok(output) => {
            println!("{}", output);
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
