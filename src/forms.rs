use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use stv_tally::builder::Builder;
use stv_tally::*;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::forms::config_reader::*;

pub mod config_reader;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FormsError {
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} does not exist"))]
    MissingWorksheet { name: String },
    #[snafu(display("The workbook has several worksheets {names:?}, pick one with --excel-worksheet-name"))]
    AmbiguousWorksheet { names: Vec<String> },
    #[snafu(display("The input has no header"))]
    EmptyInput {},
    #[snafu(display("Unknown input type {input_type}, expected csv or xlsx"))]
    UnknownInputType { input_type: String },
    #[snafu(display("No input file, pass one on the command line or in the filePath of the configuration"))]
    MissingInput {},
    #[snafu(display("No column of the form 'Role [Candidate]' in {path}"))]
    NoVoteColumns { path: String },
    #[snafu(display("Role {role} is not in the file, the roles are {known:?}"))]
    UnknownRole { role: String, known: Vec<String> },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid ballot for role {role} at line {lineno}"))]
    InvalidBallot {
        source: VotingErrors,
        role: String,
        lineno: usize,
    },
    #[snafu(display("Cannot count role {role}"))]
    Voting { source: VotingErrors, role: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type FormsResult<T> = Result<T, FormsError>;

/// The content of an export: the header row and the responses, as text.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FormTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

impl InputType {
    pub fn from_name(name: &str) -> FormsResult<InputType> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(InputType::Csv),
            "xlsx" => Ok(InputType::Xlsx),
            _ => UnknownInputTypeSnafu { input_type: name }.fail(),
        }
    }

    pub fn from_path(path: &str) -> FormsResult<InputType> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        InputType::from_name(ext)
    }
}

/// The grid question of one role: the candidates and the columns that hold
/// their preferences.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoleColumns {
    pub name: String,
    /// (column index, candidate name), in column order.
    pub candidates: Vec<(usize, String)>,
}

impl RoleColumns {
    pub fn candidate_names(&self) -> Vec<String> {
        self.candidates.iter().map(|(_, n)| n.clone()).collect()
    }
}

/// A role to count and how.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoleSetup {
    pub name: String,
    pub seats: Option<u32>,
}

/// Everything needed to run a count, after merging the configuration file
/// and the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionSetup {
    pub input_path: String,
    pub input_type: InputType,
    pub excel_worksheet_name: Option<String>,
    /// None: all the roles of the file.
    pub roles: Option<Vec<RoleSetup>>,
    pub exclusions: HashMap<String, Vec<String>>,
    pub default_seats: u32,
    pub tiebreak_mode: TieBreakMode,
    pub contest_name: String,
    pub output_path: Option<String>,
    pub reference_path: Option<String>,
}

/// Splits a column name `Role [Candidate]`. Other columns are not votes.
pub fn split_column_name(column: &str) -> Option<(String, String)> {
    let column = column.trim();
    let inner = column.strip_suffix(']')?;
    let idx = inner.rfind(" [")?;
    let role = inner[..idx].trim();
    let candidate = inner[idx + 2..].trim();
    if role.is_empty() || candidate.is_empty() {
        None
    } else {
        Some((role.to_string(), candidate.to_string()))
    }
}

/// The roles found in the header, in the order of their first column.
pub fn roles_and_candidates(header: &[String]) -> Vec<RoleColumns> {
    let mut roles: Vec<RoleColumns> = Vec::new();
    for (idx, column) in header.iter().enumerate() {
        match split_column_name(column) {
            Some((role, candidate)) => match roles.iter_mut().find(|r| r.name == role) {
                Some(r) => r.candidates.push((idx, candidate)),
                None => roles.push(RoleColumns {
                    name: role,
                    candidates: vec![(idx, candidate)],
                }),
            },
            None => {
                debug!("roles_and_candidates: dropping column {:?}", column);
            }
        }
    }
    roles
}

/// Loads the votes of one role. A row shorter than the header leaves the
/// missing cells blank.
pub fn role_votes(
    table: &FormTable,
    role: &RoleColumns,
    rules: &ElectionRules,
    excluded: &[String],
) -> FormsResult<Builder> {
    let mut builder = Builder::new(rules)
        .and_then(|b| b.candidates(&role.candidate_names()))
        .and_then(|b| b.exclude(excluded))
        .context(VotingSnafu { role: &role.name })?;
    for (idx, row) in table.rows.iter().enumerate() {
        let labels: Vec<&str> = role
            .candidates
            .iter()
            .map(|(col, _)| row.get(*col).map(|s| s.as_str()).unwrap_or(""))
            .collect();
        builder.add_vote_labels(&labels).context(InvalidBallotSnafu {
            role: &role.name,
            lineno: idx + 2,
        })?;
    }
    Ok(builder)
}

/// Writes a value with at most 4 decimals: 3, 2.5, 0.3333.
pub fn format_value(x: f64) -> String {
    let s = format!("{:.4}", x);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn has_value(x: f64) -> bool {
    x.abs() >= 5e-5
}

fn transfers_to_json(ts: &TransferStats) -> JSMap<String, JSValue> {
    let mut transfers: JSMap<String, JSValue> = JSMap::new();
    for (name, count) in ts.transfers.iter() {
        transfers.insert(name.clone(), json!(format_value(*count)));
    }
    if has_value(ts.exhausted) {
        transfers.insert("exhausted".to_string(), json!(format_value(ts.exhausted)));
    }
    transfers
}

fn result_stats_to_json(rs: &ElectionResult) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for round_stat in rs.round_stats.iter() {
        let mut tally: JSMap<String, JSValue> = JSMap::new();
        for (name, count) in round_stat.tally.iter() {
            tally.insert(name.clone(), json!(format_value(*count)));
        }

        let mut tally_results: Vec<JSValue> = Vec::new();
        for elected in round_stat.tally_results_elected.iter() {
            tally_results.push(json!({
                "elected": elected.name,
                "transfers": transfers_to_json(elected)
            }));
        }
        for elim_stats in round_stat.tally_result_eliminated.iter() {
            tally_results.push(json!({
                "eliminated": elim_stats.name,
                "transfers": transfers_to_json(elim_stats)
            }));
        }

        let js = json!({"round": round_stat.round, "tally": tally, "tallyResults": tally_results});
        l.push(js);
    }
    l
}

fn build_summary_js(contest_name: &str, role: &str, rv: &ElectionResult) -> JSValue {
    let c = OutputConfig {
        contest: contest_name.to_string(),
        role: role.to_string(),
        threshold: rv.quota.to_string(),
        seats: rv.seats,
        formal_votes: rv.formal_votes,
        informal_votes: rv.informal_votes,
    };
    json!({
        "config": c,
        "winners": rv.winners,
        "results": result_stats_to_json(rv) })
}

fn transfer_line(ts: &TransferStats) -> String {
    let mut parts: Vec<String> = ts
        .transfers
        .iter()
        .filter(|(_, v)| has_value(*v))
        .map(|(name, v)| format!("{} {}", format_value(*v), name))
        .collect();
    if has_value(ts.exhausted) {
        parts.push(format!("{} exhausted", format_value(ts.exhausted)));
    }
    if parts.is_empty() {
        "no transfer".to_string()
    } else {
        parts.join(", ")
    }
}

fn describe_tiebreak(method: &TiebreakMethod) -> String {
    match method {
        TiebreakMethod::PreviousRound(r) => format!("totals of round {}", r),
        TiebreakMethod::RawPreference(n) => format!("raw preferences at level {}", n),
        TiebreakMethod::Random => "random draw".to_string(),
    }
}

fn report_result(role: &str, res: &ElectionResult) {
    info!("Role: {} ({} seats)", role, res.seats);
    info!(
        "Formal votes: {} informal votes: {} quota: {}",
        res.formal_votes, res.informal_votes, res.quota
    );
    for rs in res.round_stats.iter() {
        info!("Round {}", rs.round);
        for (name, total) in rs.tally.iter() {
            let elected = rs.tally_results_elected.iter().find(|t| t.name == *name);
            let eliminated = rs.tally_result_eliminated.iter().find(|t| t.name == *name);
            match (elected, eliminated) {
                (Some(ts), _) => info!(
                    "{:>8} {} -> elected: {}",
                    format_value(*total),
                    name,
                    transfer_line(ts)
                ),
                (None, Some(ts)) => info!(
                    "{:>8} {} -> eliminated: {}",
                    format_value(*total),
                    name,
                    transfer_line(ts)
                ),
                (None, None) => info!("{:>8} {}", format_value(*total), name),
            }
        }
        if has_value(rs.exhausted) {
            info!("{:>8} exhausted", format_value(rs.exhausted));
        }
        if let Some(method) = &rs.tiebreak {
            info!("Tie broken by {}", describe_tiebreak(method));
        }
    }
    info!("Winners for {}: {}", role, res.winners.join(", "));
    if res.unfilled_seats() > 0 {
        warn!(
            "Role {}: {} seat(s) could not be filled, not enough candidates",
            role,
            res.unfilled_seats()
        );
    }
}

fn read_table(setup: &ElectionSetup) -> FormsResult<FormTable> {
    info!("Attempting to read file {:?}", setup.input_path);
    match setup.input_type {
        InputType::Csv => io_csv::read_csv_table(&setup.input_path),
        InputType::Xlsx => {
            io_xlsx::read_xlsx_table(&setup.input_path, setup.excel_worksheet_name.as_deref())
        }
    }
}

/// Counts every requested role of a table and returns the summary.
pub fn count_roles(table: &FormTable, setup: &ElectionSetup) -> FormsResult<JSValue> {
    let all_roles = roles_and_candidates(&table.header);
    ensure!(
        !all_roles.is_empty(),
        NoVoteColumnsSnafu {
            path: &setup.input_path
        }
    );
    let known: Vec<String> = all_roles.iter().map(|r| r.name.clone()).collect();
    let find_role = |name: &str| -> FormsResult<&RoleColumns> {
        all_roles
            .iter()
            .find(|r| r.name == name)
            .context(UnknownRoleSnafu {
                role: name,
                known: known.clone(),
            })
    };
    for role in setup.exclusions.keys() {
        find_role(role)?;
    }

    let selected: Vec<(&RoleColumns, u32)> = match &setup.roles {
        Some(roles) => roles
            .iter()
            .map(|r| Ok((find_role(&r.name)?, r.seats.unwrap_or(setup.default_seats))))
            .collect::<FormsResult<Vec<_>>>()?,
        None => all_roles
            .iter()
            .map(|r| (r, setup.default_seats))
            .collect(),
    };

    let mut summaries: Vec<JSValue> = Vec::new();
    for (role, seats) in selected {
        let rules = ElectionRules {
            number_of_seats: seats,
            tiebreak_mode: setup.tiebreak_mode,
        };
        let excluded = setup.exclusions.get(&role.name).cloned().unwrap_or_default();
        info!(
            "Role {}: candidates {:?} excluded {:?}",
            role.name,
            role.candidate_names(),
            excluded
        );
        let builder = role_votes(table, role, &rules, &excluded)?;
        let result = builder.run().context(VotingSnafu { role: &role.name })?;
        debug!("count_roles: result: {:?}", result);
        report_result(&role.name, &result);
        summaries.push(build_summary_js(&setup.contest_name, &role.name, &result));
    }
    Ok(json!({ "roles": summaries }))
}

fn read_summary(path: &str) -> FormsResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_summary: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Compares a summary with the one stored in a reference file.
pub fn check_reference(summary: &JSValue, reference_path: &str) -> FormsResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        whatever!("Difference detected between calculated summary and reference summary")
    }
    info!("The summary matches the reference {}", reference_path);
    Ok(())
}

pub fn run_election(setup: &ElectionSetup) -> FormsResult<()> {
    let table = read_table(setup)?;
    let summary = count_roles(&table, setup)?;
    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;

    match setup.output_path.as_deref() {
        Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(WritingOutputSnafu { path })?;
            info!("Summary written to {}", path);
        }
        None => {}
    }

    if let Some(reference_path) = &setup.reference_path {
        check_reference(&summary, reference_path)?;
    }
    Ok(())
}

fn clock_seed() -> u32 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32) ^ now.subsec_nanos()
}

/// Resolves a path of the configuration file, relative to its directory.
fn config_relative(config_path: &str, path: &str) -> String {
    if path == "stdout" {
        return path.to_string();
    }
    let root: PathBuf = Path::new(config_path)
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    root.join(path).display().to_string()
}

fn contest_from_path(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

impl ElectionSetup {
    /// Merges the command line with the configuration file, if any. The command
    /// line wins.
    pub fn from_args(args: &Args) -> FormsResult<ElectionSetup> {
        let config = match &args.config {
            Some(p) => read_config(p)?,
            None => FormsConfig::default(),
        };
        debug!("config: {:?}", config);
        ElectionSetup::merge(args, &config, args.config.as_deref().unwrap_or(""))
    }

    pub fn merge(args: &Args, config: &FormsConfig, config_path: &str) -> FormsResult<ElectionSetup> {
        let input_path = match (&args.input, &config.file_path) {
            (Some(p), _) => p.clone(),
            (None, Some(p)) => config_relative(config_path, p),
            (None, None) => return MissingInputSnafu {}.fail(),
        };
        let input_type = match args.input_type.as_ref().or(config.input_type.as_ref()) {
            Some(t) => InputType::from_name(t)?,
            None => InputType::from_path(&input_path)?,
        };

        let seed = match args.seed.or(config.random_seed) {
            Some(s) => s,
            None => {
                let s = clock_seed();
                info!("No random seed given, using seed {}", s);
                s
            }
        };
        let tiebreak_mode = if args.stop_on_tie {
            TieBreakMode::StopCounting
        } else {
            config
                .tiebreak_mode(seed)?
                .unwrap_or(TieBreakMode::Random(seed))
        };

        let config_roles: Vec<RoleConfig> = config.roles.clone().unwrap_or_default();
        let mut exclusions: HashMap<String, Vec<String>> = HashMap::new();
        for rc in config_roles.iter() {
            if let Some(excluded) = &rc.excluded {
                exclusions
                    .entry(rc.name.clone())
                    .or_default()
                    .extend(excluded.iter().cloned());
            }
        }
        for ex in args.exclusions.iter() {
            let entry = exclusions.entry(ex.role.clone()).or_default();
            for c in ex.candidates.iter() {
                if !entry.contains(c) {
                    entry.push(c.clone());
                }
            }
        }

        let roles: Option<Vec<RoleSetup>> = if !args.roles.is_empty() {
            Some(
                args.roles
                    .iter()
                    .map(|name| RoleSetup {
                        name: name.clone(),
                        seats: args.seats.or_else(|| {
                            config_roles
                                .iter()
                                .find(|rc| rc.name == *name)
                                .and_then(|rc| rc.seats)
                        }),
                    })
                    .collect(),
            )
        } else {
            config.roles.as_ref().map(|rcs| {
                rcs.iter()
                    .map(|rc| RoleSetup {
                        name: rc.name.clone(),
                        seats: args.seats.or(rc.seats),
                    })
                    .collect()
            })
        };

        let output_settings = config.output_settings.clone().unwrap_or_default();
        let output_path = match (&args.out, &output_settings.output_path) {
            (Some(p), _) => Some(p.clone()),
            (None, Some(p)) => Some(config_relative(config_path, p)),
            (None, None) => None,
        };
        let contest_name = output_settings
            .contest_name
            .unwrap_or_else(|| contest_from_path(&input_path));

        Ok(ElectionSetup {
            input_path,
            input_type,
            excel_worksheet_name: args
                .excel_worksheet_name
                .clone()
                .or_else(|| config.excel_worksheet_name.clone()),
            roles,
            exclusions,
            default_seats: args.seats.or(config.seats).unwrap_or(1),
            tiebreak_mode,
            contest_name,
            output_path,
            reference_path: args.reference.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const RESPONSES: &str = "\
Timestamp,Email,Secretary [Alice],Secretary [Bob],Secretary [Charlie],Committee [Dana],Committee [Erin],Committee [Frank]
2022/10/21 9:55:59,a@x.org,P1,P2,P3,P1,P2,
2022/10/21 9:56:10,b@x.org,P2,P1,,P2,P1,P3
2022/10/21 9:57:00,c@x.org,P1,,,P3,,P1
2022/10/21 9:58:00,d@x.org,,,,P1,P2,P3
2022/10/21 9:59:00,e@x.org,P1,P3,P2
";

    fn table() -> FormTable {
        io_csv::read_csv_bytes(RESPONSES.as_bytes()).unwrap()
    }

    fn setup(roles: Option<Vec<RoleSetup>>) -> ElectionSetup {
        ElectionSetup {
            input_path: "responses.csv".to_string(),
            input_type: InputType::Csv,
            excel_worksheet_name: None,
            roles,
            exclusions: HashMap::new(),
            default_seats: 1,
            tiebreak_mode: TieBreakMode::Random(7),
            contest_name: "Club".to_string(),
            output_path: None,
            reference_path: None,
        }
    }

    #[test]
    fn column_names() {
        assert_eq!(
            split_column_name("Secretary [Alice]"),
            Some(("Secretary".to_string(), "Alice".to_string()))
        );
        assert_eq!(
            split_column_name("Board [2023] [Zoe]"),
            Some(("Board [2023]".to_string(), "Zoe".to_string()))
        );
        assert_eq!(split_column_name("Timestamp"), None);
        assert_eq!(split_column_name("[Alice]"), None);
        assert_eq!(split_column_name("Secretary []"), None);
    }

    #[test]
    fn roles_in_column_order() {
        let roles = roles_and_candidates(&table().header);
        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].name, "Secretary");
        assert_eq!(roles[0].candidates[0], (2, "Alice".to_string()));
        assert_eq!(
            roles[1].candidate_names(),
            vec!["Dana", "Erin", "Frank"]
        );
    }

    #[test]
    fn votes_of_a_role() {
        init();
        let t = table();
        let roles = roles_and_candidates(&t.header);
        let builder = role_votes(&t, &roles[1], &ElectionRules::DEFAULT_RULES, &[]).unwrap();
        // The short last row is a blank ballot for the committee.
        assert_eq!(builder.num_votes(), 5);
        let res = builder.run().unwrap();
        assert_eq!(res.formal_votes, 4);
        assert_eq!(res.informal_votes, 1);
    }

    #[test]
    fn unknown_exclusion_fails() {
        let t = table();
        let roles = roles_and_candidates(&t.header);
        let res = role_votes(
            &t,
            &roles[0],
            &ElectionRules::DEFAULT_RULES,
            &["Zed".to_string()],
        );
        assert!(matches!(
            res,
            Err(FormsError::Voting {
                source: VotingErrors::MalformedBallotSchema { .. },
                ..
            })
        ));
    }

    #[test]
    fn bad_label_reports_the_line() {
        let t = io_csv::read_csv_bytes("R [A],R [B]\nP1,P2\nP1,first\n".as_bytes()).unwrap();
        let roles = roles_and_candidates(&t.header);
        let res = role_votes(&t, &roles[0], &ElectionRules::DEFAULT_RULES, &[]);
        assert!(matches!(
            res,
            Err(FormsError::InvalidBallot { lineno: 3, .. })
        ));
    }

    #[test]
    fn values() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.0 / 3.0), "0.3333");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.00001), "0");
    }

    #[test]
    fn summary_of_all_roles() {
        init();
        let summary = count_roles(&table(), &setup(None)).unwrap();
        let roles = summary["roles"].as_array().unwrap();
        assert_eq!(roles.len(), 2);
        // Secretary: Alice 3, Bob 1 out of 4 formal votes, quota 3.
        let secretary = &roles[0];
        assert_eq!(secretary["config"]["role"], json!("Secretary"));
        assert_eq!(secretary["config"]["threshold"], json!("3"));
        assert_eq!(secretary["config"]["formalVotes"], json!(4));
        assert_eq!(secretary["winners"], json!(["Alice"]));
        let first = &secretary["results"][0];
        assert_eq!(first["round"], json!(1));
        assert_eq!(first["tally"]["Alice"], json!("3"));
        assert_eq!(first["tallyResults"][0]["elected"], json!("Alice"));
    }

    #[test]
    fn selected_roles_and_seats() {
        init();
        let s = setup(Some(vec![RoleSetup {
            name: "Committee".to_string(),
            seats: Some(2),
        }]));
        let summary = count_roles(&table(), &s).unwrap();
        let roles = summary["roles"].as_array().unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0]["config"]["seats"], json!(2));
        assert_eq!(roles[0]["winners"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unknown_role() {
        let s = setup(Some(vec![RoleSetup {
            name: "Treasurer".to_string(),
            seats: None,
        }]));
        assert!(matches!(
            count_roles(&table(), &s),
            Err(FormsError::UnknownRole { .. })
        ));
        let mut s = setup(None);
        s.exclusions
            .insert("Treasurer".to_string(), vec!["Alice".to_string()]);
        assert!(matches!(
            count_roles(&table(), &s),
            Err(FormsError::UnknownRole { .. })
        ));
    }

    #[test]
    fn no_vote_columns() {
        let t = io_csv::read_csv_bytes("Timestamp,Name\n1,2\n".as_bytes()).unwrap();
        assert!(matches!(
            count_roles(&t, &setup(None)),
            Err(FormsError::NoVoteColumns { .. })
        ));
    }

    #[test]
    fn command_line_wins_over_config() {
        let config = parse_config(
            r#"{
              "filePath": "responses.xlsx",
              "seats": 3,
              "randomSeed": 11,
              "roles": [{ "name": "Committee", "seats": 2, "excluded": ["Dana"] }],
              "outputSettings": { "outputPath": "out/summary.json" }
            }"#,
        )
        .unwrap();
        let args = Args::try_parse_from(["gformstv", "-e", "Committee=Erin"]).unwrap();
        let s = ElectionSetup::merge(&args, &config, "elections/club.json").unwrap();
        assert_eq!(s.input_path, "elections/responses.xlsx");
        assert_eq!(s.input_type, InputType::Xlsx);
        assert_eq!(s.default_seats, 3);
        assert_eq!(s.tiebreak_mode, TieBreakMode::Random(11));
        assert_eq!(
            s.roles,
            Some(vec![RoleSetup {
                name: "Committee".to_string(),
                seats: Some(2)
            }])
        );
        assert_eq!(s.exclusions["Committee"], vec!["Dana", "Erin"]);
        assert_eq!(s.output_path.as_deref(), Some("elections/out/summary.json"));
        assert_eq!(s.contest_name, "responses");

        let args = Args::try_parse_from([
            "gformstv",
            "other.csv",
            "--seats",
            "1",
            "--seed",
            "5",
            "--stop-on-tie",
            "-o",
            "stdout",
        ])
        .unwrap();
        let s = ElectionSetup::merge(&args, &config, "elections/club.json").unwrap();
        assert_eq!(s.input_path, "other.csv");
        assert_eq!(s.input_type, InputType::Csv);
        assert_eq!(s.roles.unwrap()[0].seats, Some(1));
        assert_eq!(s.tiebreak_mode, TieBreakMode::StopCounting);
        assert_eq!(s.output_path.as_deref(), Some("stdout"));
    }

    #[test]
    fn input_is_required() {
        let args = Args::try_parse_from(["gformstv"]).unwrap();
        assert!(matches!(
            ElectionSetup::merge(&args, &FormsConfig::default(), ""),
            Err(FormsError::MissingInput {})
        ));
        let args = Args::try_parse_from(["gformstv", "responses.ods"]).unwrap();
        assert!(matches!(
            ElectionSetup::merge(&args, &FormsConfig::default(), ""),
            Err(FormsError::UnknownInputType { .. })
        ));
    }
}
