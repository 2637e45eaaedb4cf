use clap::{Arg, Command};

use crate::common::catalog_args;
pub use crate::consts::LOAD_CMD;

pub fn create_load_cli() -> Command {
    Command::new(LOAD_CMD)
        .about("Fetch cohort MAF files and merge them into one table")
        .args(catalog_args())
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .required(true)
                .help("Merged table, tab separated (gzipped if it ends in .gz)"),
        )
}
