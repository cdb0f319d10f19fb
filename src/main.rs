mod cli;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use cli::build::{cmd_build, BuildArgs};

#[derive(Parser)]
#[command(name = "jackc", version, about = "Single-pass Jack-to-VM compiler")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Input .jack file or directory (shorthand for `jackc build <input>`)
    input: Option<PathBuf>,
    /// Output .vm file (single-file input) or directory (directory input)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a .jack file (or a directory of them) to VM instructions
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Command::Build(args)) => cmd_build(args),
        None => match cli.input {
            Some(input) => cmd_build(BuildArgs {
                input,
                output: cli.output,
            }),
            None => {
                eprintln!("error: no input file or directory given");
                process::exit(1);
            }
        },
    }
}
