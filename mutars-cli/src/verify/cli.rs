use clap::{Arg, ArgAction, Command};

use crate::common::{catalog_args, verification_args};
pub use crate::consts::VERIFY_CMD;

pub fn create_verify_cli() -> Command {
    Command::new(VERIFY_CMD)
        .about("Check that each protein change matches the RefSeq protein it names")
        .args(catalog_args())
        .args(verification_args())
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FILE")
                .help("Write the outcome of every record to this tab separated file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the summary as JSON"),
        )
}
