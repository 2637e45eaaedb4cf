use clap::{Arg, Command};

use crate::common::{catalog_args, verification_args};
pub use crate::consts::PEPTIDES_CMD;

pub fn create_peptides_cli() -> Command {
    Command::new(PEPTIDES_CMD)
        .about("Verify protein changes, then cut mutant peptides around every verified substitution")
        .args(catalog_args())
        .args(verification_args())
        .arg(
            Arg::new("lengths")
                .long("lengths")
                .short('l')
                .value_name("K,...")
                .value_delimiter(',')
                .value_parser(clap::value_parser!(usize))
                .default_values(["8", "9", "10", "11"])
                .help("Peptide lengths to generate"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .required(true)
                .help("Mutant peptide table, tab separated (gzipped if it ends in .gz)"),
        )
}
