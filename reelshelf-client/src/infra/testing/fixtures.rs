use reelshelf_model::{MediaKind, Record};

const DIRECTORS: [&str; 6] = [
    "Denis Villeneuve",
    "Kathryn Bigelow",
    "Christopher Nolan",
    "Greta Gerwig",
    "Bong Joon-ho",
    "Lana Wachowski",
];

/// Deterministic sample records with ids `1..=count`.
///
/// Directors cycle through a fixed list and years through 1990..2020, so
/// any window of a few dozen records has repeated facet values.
pub fn records(count: usize) -> Vec<Record> {
    (1..=count as i64).map(record).collect()
}

pub fn record(id: i64) -> Record {
    let kind = if id % 4 == 0 {
        MediaKind::TvShow
    } else {
        MediaKind::Movie
    };
    Record::new(
        id,
        format!("Title {id:03}"),
        DIRECTORS[(id as usize) % DIRECTORS.len()],
        1990 + (id % 30) as i32,
        kind,
    )
}
