/*!

# Quick start with Google Forms

This example runs an election end to end, using a free online form to collect the votes. Google Forms is used here,
other providers (Microsoft Forms, Qualtrics) export similar grids.

We would like to elect a `Secretary` among 3 candidates, Alice, Bob and Charlie, and 2 `Committee members` among
4 candidates. All the roles can be asked in the same form.

**Creating a poll** Add one **Multiple Choice Grid** question per role. The title of the question is the name of the
role (`Secretary`). The rows are the candidates (`Alice`, `Bob`, `Charlie`) and the columns are the preferences
(`P1`, `P2`, `P3`). Enable "Limit to one response per column" so that a voter cannot give the same preference twice.

**Voting process** Share the form with the voters. Other questions can be added to the form, they will be ignored by
the count as long as they are not grids.

**Getting the results** In the `Responses` tab, export the responses to a spreadsheet and download it, either as
CSV or in the Excel format (xlsx). The header of the file looks like:

```text
Timestamp,Secretary [Alice],Secretary [Bob],Secretary [Charlie],Committee [Dana],...
2022/10/21 9:55:59,P1,P3,P2,P2,...
```

Every column named `<Role> [<Candidate>]` is a vote column. The other columns (here `Timestamp`) are dropped.

Run `gformstv` on the file:

```bash
gformstv 'Election (Responses).csv'
```

All the roles found in the file are counted, with one seat each. To count a single role with two seats:

```bash
gformstv 'Election (Responses).csv' --role Committee --seats 2
```

A candidate who withdrew after the poll opened can be excluded. The preferences given to this candidate are removed
from every ballot before the count starts, and the later preferences move up:

```bash
gformstv 'Election (Responses).csv' --role Committee --seats 2 --exclude 'Committee=Dana'
```

After running this command, you should see the outcome of the election:

```text
[2022-10-21T09:55:59Z INFO  gformstv::forms] Role: Committee (2 seats)
[2022-10-21T09:55:59Z INFO  gformstv::forms] Formal votes: 9 informal votes: 1 quota: 4
[2022-10-21T09:55:59Z INFO  gformstv::forms] Round 1
[2022-10-21T09:55:59Z INFO  gformstv::forms]        5 Erin -> elected: 0.4 Frank, 0.6 Gus
[2022-10-21T09:55:59Z INFO  gformstv::forms]        2 Frank
[2022-10-21T09:55:59Z INFO  gformstv::forms]        2 Gus
[2022-10-21T09:55:59Z INFO  gformstv::forms] Round 2
[2022-10-21T09:55:59Z INFO  gformstv::forms]      2.4 Frank -> eliminated: 2.4 Gus
[2022-10-21T09:55:59Z INFO  gformstv::forms]      2.6 Gus
...
[2022-10-21T09:55:59Z INFO  gformstv::forms] Winners for Committee: Erin, Gus
```

**Saving the output** The `--out` flag writes a JSON summary of every round, for each role, to a file (or to the
standard output with `--out stdout`). A summary saved from an earlier run can be checked against a new run with
`--reference`: any difference is printed and the program fails.

It is the end of this quick start. The [manual](../manual/index.html) describes the counting rules and the
configuration file in detail.

*/
