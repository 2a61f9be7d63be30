use crate::cards::hand::Hand;
use crate::cards::hands::HandIterator;
use crate::fsm::automaton::Automaton;
use crate::fsm::builder::Builder;
use crate::layout::Layout;
use crate::table::flatten::flatten;
use crate::table::table::Table;
use crate::Score;
use std::path::Path;
use std::time::Instant;

/// Build the automaton for one hand size and emit one validated table file
/// per (path, layout) job.
///
/// The automaton is built once and shared across layouts. A mismatch while
/// validating the automaton means the build itself is wrong, so the whole
/// size is abandoned. A mismatch while validating a written table only
/// discards that file; the remaining layouts still get their chance.
/// I/O errors are fatal and propagate.
pub fn run<F>(n: usize, eval: F, jobs: &[(&str, Layout)]) -> std::io::Result<()>
where
    F: Fn(&Hand) -> Score,
{
    log::info!("building automaton for hands of size {}", n);
    let clock = Instant::now();
    let ref automaton = Builder::new(n, &eval).build();
    log::info!("built {} states in {:.0?}", automaton.len(), clock.elapsed());
    log::info!(
        "each table will take {} bytes",
        automaton.len() * 52 * std::mem::size_of::<u32>()
    );
    log::info!("validating automaton");
    if !validate_automaton(automaton, n, &eval) {
        log::error!("automaton for size {} failed validation", n);
        return Ok(());
    }
    for (path, layout) in jobs.iter() {
        let ref path = Path::new(path).to_path_buf();
        log::info!("{} ordering states for {}", layout, path.display());
        let order = layout.order(automaton, n);
        let table = flatten(automaton, &order, n);
        table.save(path)?;
        log::info!("{} validating {}", layout, path.display());
        if validate_table(&Table::load(path)?, n, &eval) {
            log::info!("{} done {}", layout, path.display());
        } else {
            log::error!("{} failed validation, removing {}", layout, path.display());
            std::fs::remove_file(path).ok();
        }
    }
    Ok(())
}

/// replay every legal hand through the automaton and compare against the
/// reference evaluation. any mismatch is logged with the offending hand.
pub fn validate_automaton<F>(automaton: &Automaton, n: usize, eval: &F) -> bool
where
    F: Fn(&Hand) -> Score,
{
    let mut valid = true;
    let hands = HandIterator::from(n);
    let progress = crate::progress(hands.combinations());
    for ref hand in hands {
        let expected = eval(hand);
        let actual = automaton.walk(hand);
        if expected != actual {
            log::error!("mismatch for {}: expected {} actual {}", hand, expected, actual);
            valid = false;
        }
        progress.inc(1);
    }
    progress.finish();
    valid
}

/// replay every legal hand through the flat table, exactly as the runtime
/// consumer would, and compare against the reference evaluation.
pub fn validate_table<F>(table: &Table, n: usize, eval: &F) -> bool
where
    F: Fn(&Hand) -> Score,
{
    let mut valid = true;
    let hands = HandIterator::from(n);
    let progress = crate::progress(hands.combinations());
    for ref hand in hands {
        let expected = eval(hand);
        let actual = table.eval(hand);
        if expected != actual {
            log::error!("mismatch for {}: expected {} actual {}", hand, expected, actual);
            valid = false;
        }
        progress.inc(1);
    }
    progress.finish();
    valid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;

    fn sum(hand: &Hand) -> Score {
        Vec::<Card>::from(*hand)
            .iter()
            .map(|c| u8::from(*c) as u32)
            .sum::<u32>()
            + 1
    }

    #[test]
    fn artifacts_land_on_disk() {
        let dir = std::env::temp_dir().join("phegen_pipeline");
        let bfs = dir.join("bfs2.phe").display().to_string();
        let dfs = dir.join("dfs2.phe").display().to_string();
        let veb = dir.join("veb2.phe").display().to_string();
        let jobs = [
            (bfs.as_str(), Layout::Bfs),
            (dfs.as_str(), Layout::Dfs),
            (veb.as_str(), Layout::Veb),
        ];
        run(2, sum, &jobs).unwrap();
        for (path, _) in jobs.iter() {
            let bytes = std::fs::metadata(path).unwrap().len();
            assert_eq!(bytes, 53 * 52 * 4);
        }
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn back_to_back_builds_are_byte_identical() {
        let dir = std::env::temp_dir().join("phegen_deterministic");
        let path = dir.join("bfs2.phe").display().to_string();
        let jobs = [(path.as_str(), Layout::Bfs)];
        run(2, sum, &jobs).unwrap();
        let former = std::fs::read(&path).unwrap();
        run(2, sum, &jobs).unwrap();
        let latter = std::fs::read(&path).unwrap();
        std::fs::remove_dir_all(dir).ok();
        assert_eq!(former, latter);
    }
}
