use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, about, long_about = None, arg_required_else_help(true))]
pub struct Cli {
    /// Source file to compile
    #[clap(required = true)]
    pub file: PathBuf,

    #[clap(long, help = "Dump tokens after lexing")]
    pub tokens: bool,

    #[clap(long, help = "Dump the AST after parsing")]
    pub ast: bool,

    #[clap(long = "sym-table", help = "Print the global symbol table")]
    pub sym_table: bool,

    #[clap(long, help = "Print timing for each phase (ms)")]
    pub time: bool,
}
