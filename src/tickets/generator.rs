//! Ticket generator
//!
//! Entries are re-ranked by score (descending, stable) and the wager
//! format's rule builds lane tuples from that ranking. Ranked rules order
//! candidate tuples by summed member score, keeping generation order on
//! ties, then cut the list to the point budget.

use std::cmp::Ordering;
use tracing::debug;

use super::format::{BetType, PairMethod, TripleMethod, WagerFormat};
use super::sampling::{weighted_distinct, Sampling};
use crate::models::{Entry, TicketResult};

/// Trifecta / 3連単 通常 draws from this many top entries
const TRIFECTA_POOL: usize = 6;
/// Trio / 3連複 通常 draws from this many top entries
const TRIO_POOL: usize = 5;
/// Weighted 1軸流し draws rivals from the entries ranked 2nd..6th
const WEIGHTED_POOL: usize = 6;
/// Size of the trifecta shortlist attached to every prediction
pub const REFERENCE_PICKS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Runner {
    lane: u8,
    score: f64,
}

/// Entries by descending score; unscored entries count as 0
fn rank(entries: &[Entry]) -> Vec<Runner> {
    let mut runners: Vec<Runner> = entries
        .iter()
        .map(|e| Runner {
            lane: e.lane,
            score: e.score_or_zero(),
        })
        .collect();

    runners.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    runners
}

fn total(tuple: &[Runner]) -> f64 {
    tuple.iter().map(|r| r.score).sum()
}

/// Stable sort by summed score, descending
fn rank_tuples<const N: usize>(tuples: &mut [[Runner; N]]) {
    tuples.sort_by(|a, b| total(b).partial_cmp(&total(a)).unwrap_or(Ordering::Equal));
}

fn permutations2(pool: &[Runner]) -> Vec<[Runner; 2]> {
    let mut out = Vec::with_capacity(pool.len() * pool.len().saturating_sub(1));
    for (i, &a) in pool.iter().enumerate() {
        for (j, &b) in pool.iter().enumerate() {
            if i != j {
                out.push([a, b]);
            }
        }
    }
    out
}

fn permutations3(pool: &[Runner]) -> Vec<[Runner; 3]> {
    let mut out = Vec::new();
    for (i, &a) in pool.iter().enumerate() {
        for (j, &b) in pool.iter().enumerate() {
            if i == j {
                continue;
            }
            for (k, &c) in pool.iter().enumerate() {
                if k != i && k != j {
                    out.push([a, b, c]);
                }
            }
        }
    }
    out
}

fn combinations2(pool: &[Runner]) -> Vec<[Runner; 2]> {
    let mut out = Vec::new();
    for i in 0..pool.len() {
        for j in i + 1..pool.len() {
            out.push([pool[i], pool[j]]);
        }
    }
    out
}

fn combinations3(pool: &[Runner]) -> Vec<[Runner; 3]> {
    let mut out = Vec::new();
    for i in 0..pool.len() {
        for j in i + 1..pool.len() {
            for k in j + 1..pool.len() {
                out.push([pool[i], pool[j], pool[k]]);
            }
        }
    }
    out
}

/// "a-b-c" in finishing order
fn ordered(tuple: &[Runner]) -> String {
    tuple
        .iter()
        .map(|r| r.lane.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// "a-b-c" with lanes ascending
fn canonical(tuple: &[Runner]) -> String {
    let mut lanes: Vec<u8> = tuple.iter().map(|r| r.lane).collect();
    lanes.sort_unstable();
    lanes
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("-")
}

/// Drop repeated tickets, keeping the first occurrence
fn dedupe(tickets: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tickets.len());
    for t in tickets {
        if !seen.contains(&t) {
            seen.push(t);
        }
    }
    seen
}

fn lanes_spaced(runners: &[Runner]) -> String {
    runners
        .iter()
        .map(|r| r.lane.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn lanes_joined(runners: &[Runner]) -> String {
    runners.iter().map(|r| r.lane.to_string()).collect()
}

fn axis_formation(axis: Runner, rivals: &[Runner]) -> String {
    format!("{}-({})", axis.lane, lanes_spaced(rivals))
}

fn two_axis_formation(a: Runner, b: Runner, rivals: &[Runner]) -> String {
    format!("({}{})→({})", a.lane, b.lane, lanes_joined(rivals))
}

fn box_formation(lanes: &[Runner]) -> String {
    format!("BOX({})", lanes_joined(lanes))
}

/// Builds tickets for any supported wager format
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketGenerator {
    sampling: Sampling,
}

impl TicketGenerator {
    pub fn new(sampling: Sampling) -> Self {
        Self { sampling }
    }

    pub fn ranked() -> Self {
        Self::new(Sampling::Ranked)
    }

    /// Generate tickets for `format` within a budget of `points`.
    ///
    /// Too few entries for the format gives an empty result with a note,
    /// never an error.
    pub fn generate(&self, entries: &[Entry], points: usize, format: WagerFormat) -> TicketResult {
        let runners = rank(entries);
        debug!(
            "Generating {} tickets from {} entries (points={}, sampling={:?})",
            format,
            runners.len(),
            points,
            self.sampling
        );

        let result = match format {
            WagerFormat::Win | WagerFormat::Place => single(&runners, points, format.bet_type()),
            WagerFormat::Exacta(method) | WagerFormat::Quinella(method) => {
                self.pair(&runners, points, method, format.bet_type())
            }
            WagerFormat::Trifecta(method) => self.trifecta(&runners, points, method),
            WagerFormat::Trio(method) => trio(&runners, points, method),
        };

        if result.is_empty() {
            debug!("No tickets for {}: {}", format, result.note);
        }
        result
    }

    fn trifecta(&self, runners: &[Runner], points: usize, method: TripleMethod) -> TicketResult {
        let needed = match method {
            TripleMethod::Box(size) => size.boats(),
            _ => 3,
        };
        if runners.len() < needed {
            return TicketResult::insufficient();
        }

        match method {
            TripleMethod::Normal => {
                let pool = &runners[..runners.len().min(TRIFECTA_POOL)];
                let mut combos = permutations3(pool);
                rank_tuples(&mut combos);

                let tickets = dedupe(combos.iter().take(points).map(|t| ordered(t)).collect());
                let note = format!("指数順 3連単 通常 {}点", tickets.len());
                TicketResult::new(tickets, "通常", note)
            }
            TripleMethod::OneAxis => match self.sampling {
                Sampling::Ranked => {
                    let axis = runners[0];
                    let rivals = &runners[1..];
                    let mut combos: Vec<[Runner; 3]> = permutations2(rivals)
                        .into_iter()
                        .map(|[b, c]| [axis, b, c])
                        .collect();
                    rank_tuples(&mut combos);

                    let tickets = dedupe(combos.iter().take(points).map(|t| ordered(t)).collect());
                    let note = format!("指数順 3連単1軸流し / {}点出力", tickets.len());
                    TicketResult::new(tickets, axis_formation(axis, rivals), note)
                }
                Sampling::Weighted { seed } => {
                    let axis = runners[0];
                    // One rival has no ordered pair; draw at least two
                    let mut rivals = draw_rivals(runners, points.max(2), seed);
                    for &r in &runners[1..] {
                        if rivals.len() >= 2 {
                            break;
                        }
                        if !rivals.contains(&r) {
                            rivals.push(r);
                        }
                    }

                    let tickets: Vec<String> = permutations2(&rivals)
                        .into_iter()
                        .take(points)
                        .map(|[b, c]| ordered(&[axis, b, c]))
                        .collect();
                    let tickets = dedupe(tickets);
                    let formation = format!("{} スコア重み抽出", axis_formation(axis, &rivals));
                    let note = format!("スコア連動1軸流し / {}点", tickets.len());
                    TicketResult::new(tickets, formation, note)
                }
            },
            TripleMethod::TwoAxis => {
                let (a, b) = (runners[0], runners[1]);
                let rivals: Vec<Runner> = runners[2..].iter().take(points).copied().collect();

                let mut combos = Vec::with_capacity(rivals.len() * 2);
                for &r in &rivals {
                    combos.push([a, b, r]);
                    combos.push([b, a, r]);
                }
                rank_tuples(&mut combos);

                let tickets = dedupe(combos.iter().map(|t| ordered(t)).collect());
                let note = format!(
                    "指数順 3連単2軸流し / 相手{}艇（計{}点）",
                    rivals.len(),
                    tickets.len()
                );
                TicketResult::new(tickets, two_axis_formation(a, b, &rivals), note)
            }
            TripleMethod::Box(size) => {
                let top = &runners[..size.boats()];
                let tickets = dedupe(permutations3(top).iter().map(|t| ordered(t)).collect());
                let note = format!("指数順 3連単{}艇ボックス（{}点）", size.boats(), tickets.len());
                TicketResult::new(tickets, box_formation(top), note)
            }
        }
    }

    fn pair(&self, runners: &[Runner], points: usize, method: PairMethod, bet_type: BetType) -> TicketResult {
        if runners.len() < bet_type.width() {
            return TicketResult::insufficient();
        }

        let is_ordered = bet_type.is_ordered();
        let label = bet_type.label();
        let render = |t: &[Runner]| if is_ordered { ordered(t) } else { canonical(t) };

        match method {
            PairMethod::Normal => {
                let mut combos = if is_ordered {
                    permutations2(runners)
                } else {
                    combinations2(runners)
                };
                rank_tuples(&mut combos);

                let tickets = dedupe(combos.iter().take(points).map(|t| render(&t[..])).collect());
                let formation = tickets.join(" / ");
                let note = format!("指数順 {} / 上位{}点", label, tickets.len());
                TicketResult::new(tickets, formation, note)
            }
            PairMethod::OneAxis => {
                let axis = runners[0];
                let weighted = match self.sampling {
                    Sampling::Weighted { seed } if is_ordered => Some(seed),
                    _ => None,
                };
                let rivals = match weighted {
                    Some(seed) => draw_rivals(runners, points, seed),
                    None => runners[1..].iter().take(points).copied().collect(),
                };

                let tickets = dedupe(rivals.iter().map(|&r| render(&[axis, r][..])).collect());
                let (formation, note) = match weighted {
                    Some(_) => (
                        format!("{} スコア重み抽出", axis_formation(axis, &rivals)),
                        format!("スコア連動{}1軸流し / {}点", label, tickets.len()),
                    ),
                    None => (
                        axis_formation(axis, &rivals),
                        format!("指数順 {}1軸流し / 相手{}艇", label, rivals.len()),
                    ),
                };
                TicketResult::new(tickets, formation, note)
            }
            PairMethod::Box => {
                let m = if points == 0 {
                    runners.len()
                } else {
                    points.clamp(2, runners.len())
                };
                let top = &runners[..m];
                let combos = if is_ordered {
                    permutations2(top)
                } else {
                    combinations2(top)
                };

                let tickets = dedupe(combos.iter().map(|t| render(&t[..])).collect());
                let note = format!("指数順 {}BOX（{}点）", label, tickets.len());
                TicketResult::new(tickets, box_formation(top), note)
            }
        }
    }
}

/// Weighted draw of up to `points` rivals from the entries after the axis
fn draw_rivals(runners: &[Runner], points: usize, seed: u64) -> Vec<Runner> {
    let pool: Vec<(Runner, f64)> = runners[1..runners.len().min(WEIGHTED_POOL)]
        .iter()
        .map(|&r| (r, r.score))
        .collect();
    weighted_distinct(&pool, points, seed)
}

fn trio(runners: &[Runner], points: usize, method: TripleMethod) -> TicketResult {
    let needed = match method {
        TripleMethod::Box(size) => size.boats(),
        _ => 3,
    };
    if runners.len() < needed {
        return TicketResult::insufficient();
    }

    match method {
        TripleMethod::Normal => {
            let pool = &runners[..runners.len().min(TRIO_POOL)];
            let mut combos = combinations3(pool);
            rank_tuples(&mut combos);

            let tickets = dedupe(combos.iter().take(points).map(|t| canonical(t)).collect());
            let note = format!("指数順 3連複 通常 / {}点", tickets.len());
            TicketResult::new(tickets, "通常", note)
        }
        TripleMethod::OneAxis => {
            let axis = runners[0];
            let rivals = &runners[1..];
            let mut combos: Vec<[Runner; 3]> = combinations2(rivals)
                .into_iter()
                .map(|[b, c]| [axis, b, c])
                .collect();
            rank_tuples(&mut combos);

            let tickets = dedupe(combos.iter().take(points).map(|t| canonical(t)).collect());
            let note = format!("指数順 3連複1軸流し / {}点", tickets.len());
            TicketResult::new(tickets, axis_formation(axis, rivals), note)
        }
        TripleMethod::TwoAxis => {
            let (a, b) = (runners[0], runners[1]);
            let rivals: Vec<Runner> = runners[2..].iter().take(points).copied().collect();

            let tickets = dedupe(rivals.iter().map(|&r| canonical(&[a, b, r])).collect());
            let note = format!("指数順 3連複2軸流し / 相手{}艇", rivals.len());
            TicketResult::new(tickets, two_axis_formation(a, b, &rivals), note)
        }
        TripleMethod::Box(size) => {
            let top = &runners[..size.boats()];
            let tickets = dedupe(combinations3(top).iter().map(|t| canonical(t)).collect());
            let note = format!("指数順 3連複{}艇ボックス（{}点）", size.boats(), tickets.len());
            TicketResult::new(tickets, box_formation(top), note)
        }
    }
}

/// 単勝 / 複勝: the top N lanes
fn single(runners: &[Runner], points: usize, bet_type: BetType) -> TicketResult {
    if runners.len() < bet_type.width() {
        return TicketResult::insufficient();
    }

    let n = points.clamp(1, runners.len());
    let tickets: Vec<String> = dedupe(runners[..n].iter().map(|r| r.lane.to_string()).collect());
    let formation = tickets.join(" / ");
    let note = format!("指数順 {} / 上位{}艇", bet_type.label(), tickets.len());
    TicketResult::new(tickets, formation, note)
}

/// Top trifecta tickets of the 通常 rule, independent of the requested format
pub fn reference_picks(entries: &[Entry]) -> Vec<String> {
    TicketGenerator::ranked()
        .generate(
            entries,
            REFERENCE_PICKS,
            WagerFormat::Trifecta(TripleMethod::Normal),
        )
        .tickets
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn scored(lane: u8, score: f64) -> Entry {
        Entry {
            score: Some(score),
            ..Entry::new(lane)
        }
    }

    fn six_boats() -> Vec<Entry> {
        vec![
            scored(1, 78.4),
            scored(2, 52.1),
            scored(3, 61.0),
            scored(4, 44.7),
            scored(5, 35.2),
            scored(6, 20.9),
        ]
    }

    fn gen(entries: &[Entry], points: usize, bet: &str, method: &str) -> TicketResult {
        let format = WagerFormat::parse(bet, method).unwrap();
        TicketGenerator::ranked().generate(entries, points, format)
    }

    #[test]
    fn test_three_entry_box() {
        let entries = vec![scored(1, 90.0), scored(2, 70.0), scored(3, 50.0)];
        let result = gen(&entries, 5, "3連単", "3艇ボックス");

        assert_eq!(result.count, 6);
        assert!(result.tickets.contains(&"1-2-3".to_string()));
        assert!(result.tickets.contains(&"3-2-1".to_string()));
        assert_eq!(result.formation, "BOX(123)");
    }

    #[test]
    fn test_insufficient_entries() {
        let entries = vec![scored(1, 90.0), scored(2, 70.0)];

        for method in ["通常", "1軸流し", "2軸流し", "3艇ボックス"] {
            let result = gen(&entries, 5, "3連単", method);
            assert!(result.tickets.is_empty());
            assert_eq!(result.count, 0);
            assert!(!result.note.is_empty());
        }

        let result = gen(&entries[..1], 5, "2連複", "通常");
        assert_eq!(result.count, 0);
        assert_eq!(result.note, "error: entries不足");

        let boats = six_boats();
        let four = &boats[..4];
        assert_eq!(gen(four, 5, "3連単", "5艇ボックス").count, 0);
        assert_eq!(gen(four, 5, "3連単", "4艇ボックス").count, 24);
        assert_eq!(gen(&[], 5, "単勝", "通常").count, 0);
    }

    #[test]
    fn test_trifecta_box_counts() {
        let entries = six_boats();
        assert_eq!(gen(&entries, 1, "3連単", "3艇ボックス").count, 6);
        assert_eq!(gen(&entries, 1, "3連単", "4艇ボックス").count, 24);
        assert_eq!(gen(&entries, 1, "3連単", "5艇ボックス").count, 60);
    }

    #[test]
    fn test_trio_box_counts() {
        let entries = six_boats();
        assert_eq!(gen(&entries, 1, "3連複", "3艇ボックス").count, 1);
        assert_eq!(gen(&entries, 1, "3連複", "4艇ボックス").count, 4);
        assert_eq!(gen(&entries, 1, "3連複", "5艇ボックス").count, 10);
    }

    #[test]
    fn test_pair_box_counts() {
        let entries = six_boats();

        assert_eq!(gen(&entries, 4, "2連単", "ボックス").count, 12);
        assert_eq!(gen(&entries, 4, "2連複", "ボックス").count, 6);

        // points 0 boxes every entry, points 1 is raised to a 2-boat box
        assert_eq!(gen(&entries, 0, "2連単", "ボックス").count, 30);
        assert_eq!(gen(&entries, 0, "2連複", "ボックス").count, 15);
        assert_eq!(gen(&entries, 1, "2連単", "ボックス").count, 2);
        assert_eq!(gen(&entries, 1, "2連複", "ボックス").count, 1);
        assert_eq!(gen(&entries, 20, "2連複", "ボックス").count, 15);
    }

    #[test]
    fn test_ranked_formats_are_prefixes() {
        let entries = six_boats();

        for (bet, method) in [
            ("3連単", "通常"),
            ("3連単", "1軸流し"),
            ("3連複", "通常"),
            ("3連複", "1軸流し"),
            ("2連単", "通常"),
            ("2連複", "通常"),
        ] {
            let full = gen(&entries, 1000, bet, method);
            for points in [1, 3, 5, 8] {
                let cut = gen(&entries, points, bet, method);
                assert_eq!(cut.count, points.min(full.count), "{} {}", bet, method);
                assert_eq!(cut.tickets[..], full.tickets[..cut.count], "{} {}", bet, method);
            }
        }
    }

    #[test]
    fn test_full_candidate_counts() {
        let entries = six_boats();
        assert_eq!(gen(&entries, 1000, "3連単", "通常").count, 120);
        assert_eq!(gen(&entries, 1000, "3連単", "1軸流し").count, 20);
        assert_eq!(gen(&entries, 1000, "3連複", "通常").count, 10);
        assert_eq!(gen(&entries, 1000, "3連複", "1軸流し").count, 10);
        assert_eq!(gen(&entries, 1000, "2連単", "通常").count, 30);
        assert_eq!(gen(&entries, 1000, "2連複", "通常").count, 15);
    }

    #[test]
    fn test_no_duplicate_tickets() {
        let entries = six_boats();

        for format in WagerFormat::all() {
            for points in [1, 3, 5, 10] {
                let result = TicketGenerator::ranked().generate(&entries, points, format);
                let unique: HashSet<&String> = result.tickets.iter().collect();
                assert_eq!(unique.len(), result.tickets.len(), "{}", format);
                assert_eq!(result.count, result.tickets.len());
            }
        }
    }

    #[test]
    fn test_trifecta_normal_order() {
        let result = gen(&six_boats(), 3, "3連単", "通常");

        // 1 (78.4) > 3 (61.0) > 2 (52.1)
        assert_eq!(result.tickets, vec!["1-3-2", "1-2-3", "3-1-2"]);
        assert_eq!(result.formation, "通常");
        assert_eq!(result.note, "指数順 3連単 通常 3点");
    }

    #[test]
    fn test_trifecta_one_axis() {
        let result = gen(&six_boats(), 4, "3連単", "1軸流し");

        assert_eq!(result.count, 4);
        assert!(result.tickets.iter().all(|t| t.starts_with("1-")));
        assert_eq!(result.tickets[0], "1-3-2");
        assert_eq!(result.formation, "1-(3 2 4 5 6)");
    }

    #[test]
    fn test_trifecta_two_axis() {
        let entries = six_boats();

        let result = gen(&entries, 3, "3連単", "2軸流し");
        assert_eq!(result.count, 6);
        assert_eq!(result.formation, "(13)→(245)");
        assert_eq!(result.tickets[0], "1-3-2");
        assert_eq!(result.tickets[1], "3-1-2");

        // only four rivals exist
        assert_eq!(gen(&entries, 10, "3連単", "2軸流し").count, 8);
    }

    #[test]
    fn test_trio_canonical_tickets() {
        let entries = vec![scored(4, 80.0), scored(2, 70.0), scored(6, 60.0), scored(1, 10.0)];

        let normal = gen(&entries, 1, "3連複", "通常");
        assert_eq!(normal.tickets, vec!["2-4-6"]);

        let two_axis = gen(&entries, 2, "3連複", "2軸流し");
        assert_eq!(two_axis.tickets, vec!["2-4-6", "1-2-4"]);
        assert_eq!(two_axis.formation, "(42)→(61)");

        for t in gen(&entries, 10, "3連複", "1軸流し").tickets {
            let lanes: Vec<u8> = t.split('-').map(|x| x.parse().unwrap()).collect();
            assert!(lanes.windows(2).all(|w| w[0] < w[1]), "{}", t);
            assert!(lanes.contains(&4));
        }
    }

    #[test]
    fn test_exacta_and_quinella_one_axis() {
        let entries = vec![scored(1, 30.0), scored(2, 20.0), scored(5, 90.0), scored(3, 60.0)];

        let exacta = gen(&entries, 2, "2連単", "1軸流し");
        assert_eq!(exacta.tickets, vec!["5-3", "5-1"]);
        assert_eq!(exacta.formation, "5-(3 1)");

        let quinella = gen(&entries, 2, "2連複", "1軸流し");
        assert_eq!(quinella.tickets, vec!["3-5", "1-5"]);
    }

    #[test]
    fn test_pair_normal_formation() {
        let result = gen(&six_boats(), 2, "2連単", "通常");
        assert_eq!(result.tickets, vec!["1-3", "3-1"]);
        assert_eq!(result.formation, "1-3 / 3-1");
    }

    #[test]
    fn test_win_and_place_clamp() {
        let entries = six_boats();

        assert_eq!(gen(&entries, 0, "単勝", "通常").tickets, vec!["1"]);
        assert_eq!(gen(&entries, 2, "複勝", "通常").tickets, vec!["1", "3"]);
        assert_eq!(gen(&entries, 10, "単勝", "通常").count, 6);
        assert_eq!(gen(&entries, 2, "単勝", "通常").formation, "1 / 3");
    }

    #[test]
    fn test_unscored_entries_keep_input_order() {
        let entries: Vec<Entry> = (1..=4).map(Entry::new).collect();
        let result = gen(&entries, 3, "3連単", "通常");
        assert_eq!(result.tickets[0], "1-2-3");
        assert_eq!(gen(&entries, 1, "単勝", "通常").tickets, vec!["1"]);
    }

    #[test]
    fn test_weighted_one_axis_is_reproducible() {
        let entries = six_boats();
        let format = WagerFormat::Trifecta(TripleMethod::OneAxis);
        let generator = TicketGenerator::new(Sampling::Weighted { seed: 20251120 });

        let a = generator.generate(&entries, 5, format);
        let b = generator.generate(&entries, 5, format);

        assert_eq!(a, b);
        assert!(a.count <= 5);
        assert!(a.tickets.iter().all(|t| t.starts_with("1-")));
        assert!(a.formation.contains("スコア重み抽出"));
    }

    #[test]
    fn test_weighted_exacta_one_axis() {
        let entries = six_boats();
        let format = WagerFormat::Exacta(PairMethod::OneAxis);
        let generator = TicketGenerator::new(Sampling::Weighted { seed: 3 });

        let result = generator.generate(&entries, 3, format);
        assert!(!result.tickets.is_empty());
        assert!(result.count <= 3);
        assert!(result.tickets.iter().all(|t| t.starts_with("1-")));
        assert_eq!(result, generator.generate(&entries, 3, format));
    }

    #[test]
    fn test_weighted_one_axis_single_point() {
        let entries = six_boats();
        let format = WagerFormat::Trifecta(TripleMethod::OneAxis);

        for seed in 0..5 {
            let result = TicketGenerator::new(Sampling::Weighted { seed }).generate(&entries, 1, format);
            assert_eq!(result.count, 1, "seed {}", seed);
            assert!(result.tickets[0].starts_with("1-"));
            assert_eq!(result.note, "スコア連動1軸流し / 1点");
        }
    }

    #[test]
    fn test_weighted_sampling_leaves_other_formats_ranked() {
        let entries = six_boats();
        let weighted = TicketGenerator::new(Sampling::Weighted { seed: 11 });

        for format in [
            WagerFormat::Trifecta(TripleMethod::Normal),
            WagerFormat::Trio(TripleMethod::OneAxis),
            WagerFormat::Quinella(PairMethod::OneAxis),
        ] {
            assert_eq!(
                weighted.generate(&entries, 4, format),
                TicketGenerator::ranked().generate(&entries, 4, format)
            );
        }
    }

    #[test]
    fn test_reference_picks() {
        let entries = six_boats();
        let picks = reference_picks(&entries);

        assert_eq!(picks.len(), REFERENCE_PICKS);
        assert_eq!(picks, gen(&entries, 10, "3連単", "通常").tickets);
        assert_eq!(reference_picks(&entries[..2]), Vec::<String>::new());
    }
}
