use phegen::cards::hand::Hand;
use phegen::cards::strength::Strength;
use phegen::layout::Layout;
use phegen::pipeline;
use phegen::Score;

/// the reference evaluation: cards are rank-major indices into a sorted
/// deck (0 -> 2c, 1 -> 2d, .. 50 -> Ah, 51 -> As), and the score is the
/// packed Strength of the hand. swap this out to build tables for any
/// other scoring of [0, 52) cards.
fn eval(hand: &Hand) -> Score {
    u32::from(Strength::from(*hand))
}

fn main() {
    phegen::log();
    let jobs5 = [
        ("tables/bfs5.phe", Layout::Bfs),
        ("tables/dfs5.phe", Layout::Dfs),
        ("tables/veb5.phe", Layout::Veb),
    ];
    let jobs7 = [
        ("tables/bfs7.phe", Layout::Bfs),
        ("tables/dfs7.phe", Layout::Dfs),
        ("tables/veb7.phe", Layout::Veb),
    ];
    if let Err(e) = pipeline::run(5, eval, &jobs5).and_then(|_| pipeline::run(7, eval, &jobs7)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
