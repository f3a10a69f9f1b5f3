/*!

# Quick start

This example walks through a complete quiz, from the dataset to the ranked
match percentages.

A quiz is a sequence of motions. Every motion records how each party voted
on it: `For`, `Against` or `Neutral`. The quiz taker answers every motion
with the same three choices.

**Building the dataset** The simplest way to assemble a dataset in code is
the [crate::builder::Builder]:

```
use party_matching::builder::Builder;
use party_matching::VoteChoice;
# use party_matching::MatchingErrors;

let mut builder = Builder::new()
    .parties(&["Rood".to_string(), "Blauw".to_string(), "Groen".to_string()])?;

builder.add_motion(
    "minimumloon",
    "Motie over verhoging minimumloon",
    &[VoteChoice::For, VoteChoice::Against, VoteChoice::Neutral],
)?;
builder.add_motion(
    "klimaatdoelen",
    "Motie klimaatdoelen 2030",
    &[VoteChoice::Against, VoteChoice::Against, VoteChoice::For],
)?;
# Ok::<(), MatchingErrors>(())
```

**Running a session** The [crate::session::QuizSession] presents the motions
one at a time and accumulates the answers:

```
# use party_matching::builder::Builder;
# use party_matching::VoteChoice;
# use party_matching::MatchingErrors;
use party_matching::session::QuizSession;

# let mut builder = Builder::new()
#     .parties(&["Rood".to_string(), "Blauw".to_string(), "Groen".to_string()])?;
# builder.add_motion(
#     "minimumloon",
#     "Motie over verhoging minimumloon",
#     &[VoteChoice::For, VoteChoice::Against, VoteChoice::Neutral],
# )?;
# builder.add_motion(
#     "klimaatdoelen",
#     "Motie klimaatdoelen 2030",
#     &[VoteChoice::Against, VoteChoice::Against, VoteChoice::For],
# )?;
let mut session = builder.session()?;

while let Some(title) = session.current_motion().map(|m| m.title.clone()) {
    println!("{} ({:.0}%)", title, session.progress_percent());
    // The answers would normally come from the quiz taker.
    session.record_answer(VoteChoice::For)?;
}

let res = session.results()?;
for (rank, r) in res.rankings.iter().enumerate() {
    println!("#{} {} {:.0}%", rank + 1, r.party, r.percentage);
}
assert_eq!(res.rankings.first().map(|r| r.party.as_str()), Some("Groen"));
# Ok::<(), MatchingErrors>(())
```

Answering `For` on both motions scores `Groen` at 75% (half credit for its
neutral stance on the first motion, full agreement on the second), `Rood`
at 50% (full agreement on the first, opposition on the second) and `Blauw`
at 0%.

**Neutral answers** A neutral answer from the quiz taker is an abstention:
it is excluded from the comparison entirely, for every party. A quiz
answered exclusively with neutral stances therefore produces an empty
ranking, not a row of 0% scores.

For one-shot computations without a session, call
[crate::run_matching_stats] directly with the motions and the answers.

*/
