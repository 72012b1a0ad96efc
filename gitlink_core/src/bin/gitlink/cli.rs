use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

/// Copy a link to a line of a file on the repository's hosting service.
#[derive(Parser, Debug)]
#[command(name = "gitlink", author, version, about)]
pub struct Options {
    /// Link to the git blame view
    #[arg(long)]
    pub blame: bool,

    /// Open link in the default browser
    #[arg(long)]
    pub open: bool,

    /// Path to the file
    #[arg(value_name = "FILEPATH")]
    pub path: PathBuf,

    /// Line number to link to
    #[arg(
        value_name = "LINE_NUM",
        value_parser = NonEmptyStringValueParser::new(),
        allow_negative_numbers = true
    )]
    pub line: String,
}
