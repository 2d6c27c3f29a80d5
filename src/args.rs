use clap::Parser;

/// A role and the candidates that withdrew from it, written `ROLE=CAND1,CAND2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusion {
    pub role: String,
    pub candidates: Vec<String>,
}

pub fn parse_exclusion(s: &str) -> Result<Exclusion, String> {
    let (role, cands) = s
        .split_once('=')
        .ok_or(format!("expected ROLE=CANDIDATE[,CANDIDATE...], got {:?}", s))?;
    let role = role.trim();
    if role.is_empty() {
        return Err(format!("missing role name in exclusion {:?}", s));
    }
    let candidates: Vec<String> = cands
        .split(',')
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .collect();
    if candidates.is_empty() {
        return Err(format!("no candidate to exclude in {:?}", s));
    }
    Ok(Exclusion {
        role: role.to_string(),
        candidates,
    })
}

/// Counts Single Transferable Vote elections collected with Google Forms grids.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The responses exported from the form, in CSV or xlsx format. Setting this
    /// overrides the filePath of the --config option.
    #[clap(value_parser)]
    pub input: Option<String>,

    /// (file path, optional) A JSON file describing the election. The other options take precedence over
    /// the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (repeatable) The role to count. All the roles found in the file are counted if not specified.
    #[clap(short, long = "role", value_parser)]
    pub roles: Vec<String>,

    /// (repeatable) Candidates to exclude from a role, written 'ROLE=CANDIDATE[,CANDIDATE...]'.
    #[clap(short, long = "exclude", value_parser = parse_exclusion)]
    pub exclusions: Vec<Exclusion>,

    /// (default 1) The number of seats of each counted role.
    #[clap(short, long, value_parser)]
    pub seats: Option<u32>,

    /// The seed of the random draw that settles complete ties. Derived from the clock if not specified.
    #[clap(long, value_parser)]
    pub seed: Option<u32>,

    /// If passed as an argument, a tie that needs a random draw stops the count with an error.
    #[clap(long, takes_value = false)]
    pub stop_on_tie: bool,

    /// (csv or xlsx) The type of the input. Guessed from the extension of the file if not specified.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file with several worksheets, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path or 'stdout') If specified, the summary of the election will be written in JSON format to
    /// the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format. If provided,
    /// gformstv will check that the summary of this count matches the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
