/*!

This is the long-form manual for `stv_tally` and `gformstv`.

## Counting rules

The count follows the Single Transferable Vote, one role at a time.

### Formal votes

Each cell of the grid holds a preference label (`P1`, `P2`, ... or a bare number) or is blank.

* The columns of excluded candidates are removed first. A preference that was only given to an excluded candidate
  is skipped and the later preferences move up.
* A ballot without a first preference is informal and is not counted at all.
* Preferences must follow each other: `P1, P2, P3` is complete, `P1, P3, P4` only keeps `P1`. The same preference
  given to two candidates ends the ballot before that preference.

### Quota

The quota is the Droop quota, `floor(formal votes / (seats + 1)) + 1`. It is computed once, before the first round.

### Rounds

Each round counts, for every candidate still running, the value of the ballots whose current preference is this
candidate. Every ballot starts with a value of 1.

* Candidates at or above the quota are elected, highest total first. If more candidates reach the quota than there
  are seats left, equal totals at the boundary are settled with the tiebreak below.
* If seats are still empty, each new winner passes on its surplus: the ballots counting for the winner are multiplied
  by `(total - quota) / total` and move to their next running preference.
* If nobody reached the quota, the candidate with the lowest total is eliminated and its ballots move to their next
  running preference at full value.
* When no more candidates are running than seats are left, all of them are elected.

A ballot without a running preference left is exhausted. If fewer candidates run than there are seats, the count
ends with some seats unfilled, which is reported as a warning.

### Tiebreak

When several candidates share the lowest total:

1. The previous rounds are checked, from the most recent one backward. The first round in which exactly one of the
   tied candidates had the lowest total decides.
2. Otherwise, for each preference level starting with the first, the value of all the ballots giving that level to
   each tied candidate is added up. The first level with a single lowest candidate decides.
3. Otherwise, a draw decides. The draw is seeded (`--seed`): the same seed always produces the same result. With
   `--stop-on-tie`, the program fails instead of drawing.

## Input formats

* `csv` Comma Separated Values, as exported by Google Forms.
* `xlsx` Excel spreadsheets, as exported by Google Forms or Microsoft Forms. When the workbook has several
  worksheets, the name of the worksheet must be given with `--excel-worksheet-name`.

The first row is the header. Vote columns are named `<Role> [<Candidate>]`, other columns are ignored.

## Configuration

Instead of the command line flags, an election can be described in a JSON file passed with `--config`. The flags
given on the command line take precedence over the file.

```json
{
  "filePath": "responses.csv",
  "inputType": "csv",
  "seats": 1,
  "randomSeed": 2022,
  "tiebreakMode": "random",
  "roles": [
    { "name": "Secretary" },
    { "name": "Committee", "seats": 2, "excluded": ["Dana"] }
  ],
  "outputSettings": {
    "contestName": "Club elections 2022",
    "outputPath": "summary.json"
  }
}
```

* `filePath` (string): the exported responses, relative to the configuration file.
* `inputType` (`csv` or `xlsx`, optional): guessed from the extension of the file if missing.
* `excelWorksheetName` (string, optional): the worksheet to read in an Excel file.
* `seats` (number, optional, default 1): the number of seats of the roles that do not specify it.
* `randomSeed` (number, optional): the seed of the tiebreak draw.
* `tiebreakMode` (`random` or `stopCounting`, optional, default `random`).
* `roles` (array, optional): the roles to count. All the roles of the file are counted if missing.
* `outputSettings` (optional): `contestName` is written in the summary, `outputPath` is where the summary goes.

 */
