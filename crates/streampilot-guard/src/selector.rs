//! Agent selection by reputation

use streampilot_types::Counterparty;

/// Pick the counterparty with the highest reputation score.
///
/// Ties keep the earliest element: a later candidate replaces the current
/// best only when its score is strictly greater. Returns `None` for an empty
/// slice, which callers treat as "no counterparties available".
pub fn select_best(counterparties: &[Counterparty]) -> Option<&Counterparty> {
    pick(counterparties.iter())
}

/// Same policy as [`select_best`], restricted to active counterparties.
pub fn select_best_active(counterparties: &[Counterparty]) -> Option<&Counterparty> {
    pick(counterparties.iter().filter(|c| c.is_active))
}

fn pick<'a>(candidates: impl Iterator<Item = &'a Counterparty>) -> Option<&'a Counterparty> {
    candidates.fold(None, |best, candidate| match best {
        Some(current) if candidate.reputation_score <= current.reputation_score => Some(current),
        _ => Some(candidate),
    })
}

/// Ranked view of counterparties, highest reputation first, ties in input order.
pub fn rank(counterparties: &[Counterparty]) -> Vec<&Counterparty> {
    let mut ranked: Vec<&Counterparty> = counterparties.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.reputation_score.cmp(&a.reputation_score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use streampilot_types::Address;

    fn agent(n: u8, score: u64) -> Counterparty {
        let addr = Address::parse(&format!("0x{}", format!("{:02x}", n).repeat(20))).unwrap();
        Counterparty::new(addr, score)
    }

    #[test]
    fn test_empty_returns_none() {
        assert!(select_best(&[]).is_none());
        assert!(select_best_active(&[]).is_none());
    }

    #[test]
    fn test_picks_highest() {
        let agents = vec![agent(1, 10), agent(2, 90), agent(3, 40)];
        let best = select_best(&agents).unwrap();
        assert_eq!(best.address, agents[1].address);
        assert!(agents.iter().all(|a| best.reputation_score >= a.reputation_score));
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let agents = vec![agent(1, 5), agent(2, 80), agent(3, 80), agent(4, 80)];
        for _ in 0..10 {
            assert_eq!(select_best(&agents).unwrap().address, agents[1].address);
        }
    }

    #[test]
    fn test_single_zero_score() {
        let agents = vec![agent(7, 0)];
        assert_eq!(select_best(&agents).unwrap().address, agents[0].address);
    }

    #[test]
    fn test_input_untouched() {
        let agents = vec![agent(1, 3), agent(2, 9), agent(3, 1)];
        let before = agents.clone();
        let _ = select_best(&agents);
        let _ = rank(&agents);
        assert_eq!(agents, before);
    }

    #[test]
    fn test_active_filter() {
        let agents = vec![agent(1, 99).inactive(), agent(2, 50), agent(3, 50)];
        assert_eq!(select_best(&agents).unwrap().address, agents[0].address);
        assert_eq!(select_best_active(&agents).unwrap().address, agents[1].address);
        assert!(select_best_active(&[agent(1, 99).inactive()]).is_none());
    }

    #[test]
    fn test_rank_is_stable() {
        let agents = vec![agent(1, 20), agent(2, 70), agent(3, 20), agent(4, 70)];
        let order: Vec<_> = rank(&agents).into_iter().map(|c| c.address.clone()).collect();
        assert_eq!(
            order,
            vec![
                agents[1].address.clone(),
                agents[3].address.clone(),
                agents[0].address.clone(),
                agents[2].address.clone(),
            ]
        );
    }
}
