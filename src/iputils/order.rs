// Ordering of addresses
//   - every shared position is compared, the last one included
//   - an address that is a prefix of another sorts below it
//   - Lexicographic (default): components are byte strings, "9" > "222"
//   - Numeric: all-digit components compare as unbounded integers, "222" > "9"
//     rank: empty < all-digit < anything else, so the order stays total

use std::cmp::Ordering;

use super::Address;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Collation {
    #[default]
    Lexicographic,
    Numeric,
}

fn rank(c: &str) -> u8 {
    if c.is_empty() {
        0
    } else if c.bytes().all(|b| b.is_ascii_digit()) {
        1
    } else {
        2
    }
}

fn compare_numeric(l: &str, r: &str) -> Ordering {
    rank(l).cmp(&rank(r)).then_with(|| {
        if rank(l) != 1 {
            return l.as_bytes().cmp(r.as_bytes());
        }
        let (l, r) = (l.trim_start_matches('0'), r.trim_start_matches('0'));
        l.len().cmp(&r.len()).then_with(|| l.cmp(r))
    })
}

pub fn compare_with(a: &Address, b: &Address, collation: Collation) -> Ordering {
    a.components()
        .iter()
        .zip(b.components())
        .map(|(l, r)| match collation {
            Collation::Lexicographic => l.as_bytes().cmp(r.as_bytes()),
            Collation::Numeric => compare_numeric(l, r),
        })
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

pub fn compare(a: &Address, b: &Address) -> Ordering {
    compare_with(a, b, Collation::Lexicographic)
}

// stable, highest first
pub fn sort_descending(pool: &mut [Address], collation: Collation) {
    match collation {
        Collation::Lexicographic => pool.sort_by(|a, b| compare(b, a)),
        Collation::Numeric => pool.sort_by(|a, b| compare_with(b, a, collation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iputils::Pool;

    fn pool(ips: &[&str]) -> Pool {
        ips.iter().map(|&ip| Address::from(ip)).collect()
    }

    fn render(pool: &[Address]) -> Vec<String> {
        pool.iter().map(|a| a.to_string()).collect()
    }

    fn sorted(ips: &[&str], collation: Collation) -> Vec<String> {
        let mut p = pool(ips);
        sort_descending(&mut p, collation);
        render(&p)
    }

    #[test]
    fn sorts_descending_componentwise() {
        let ips = ["1.1.234.8", "222.173.235.246", "1.231.69.33"];
        let expected = vec!["222.173.235.246", "1.231.69.33", "1.1.234.8"];
        assert_eq!(sorted(&ips, Collation::Lexicographic), expected);
        assert_eq!(sorted(&ips, Collation::Numeric), expected);
    }

    #[test]
    fn components_compare_as_strings() {
        assert_eq!(compare(&"9.0".into(), &"222.0".into()), Ordering::Greater);
        assert_eq!(compare(&"10.0".into(), &"9.0".into()), Ordering::Less);
        assert_eq!(
            sorted(&["5.189.203.46", "46.55.46.98", "68.46.218.208"], Collation::Lexicographic),
            vec!["68.46.218.208", "5.189.203.46", "46.55.46.98"]
        );
    }

    #[test]
    fn numeric_collation_orders_by_value() {
        assert_eq!(
            sorted(
                &["5.189.203.46", "46.55.46.98", "186.204.34.46", "68.46.218.208", "39.46.86.85"],
                Collation::Numeric
            ),
            vec!["186.204.34.46", "68.46.218.208", "46.55.46.98", "39.46.86.85", "5.189.203.46"]
        );
        let n = |a: &str, b: &str| compare_with(&a.into(), &b.into(), Collation::Numeric);
        assert_eq!(n("007", "7"), Ordering::Equal);
        assert_eq!(n("1.", "1.0"), Ordering::Less);
        assert_eq!(n("99999999999999999999999", "1"), Ordering::Greater);
        assert_eq!(n("1a", "9"), Ordering::Greater);
    }

    #[test]
    fn last_component_participates_in_ordering() {
        // the loop this tool replaces stopped one component short
        assert_eq!(
            compare(&"1.2.3.4".into(), &"1.2.3.10".into()),
            Ordering::Greater
        );
        assert_eq!(
            sorted(&["1.2.3.1", "1.2.3.2"], Collation::Lexicographic),
            vec!["1.2.3.2", "1.2.3.1"]
        );
    }

    #[test]
    fn prefix_sorts_below() {
        assert_eq!(compare(&"1.2".into(), &"1.2.3".into()), Ordering::Less);
        assert_eq!(compare(&"1.2.".into(), &"1.2".into()), Ordering::Greater);
        assert_eq!(compare(&"".into(), &"1.2.3".into()), Ordering::Less);
        assert_eq!(compare(&"1.2".into(), &"1.2".into()), Ordering::Equal);
    }

    #[test]
    fn equal_addresses_keep_input_order() {
        let mut p = pool(&["5.5", "1.2", "05.5", "5.5"]);
        // heap buffers move with their address, so they identify the duplicates
        let first = p[0].components()[0].as_ptr();
        let padded = p[2].components()[0].as_ptr();
        let last = p[3].components()[0].as_ptr();
        sort_descending(&mut p, Collation::Numeric);
        assert_eq!(render(&p), vec!["5.5", "05.5", "5.5", "1.2"]);
        assert_eq!(p[0].components()[0].as_ptr(), first);
        assert_eq!(p[1].components()[0].as_ptr(), padded);
        assert_eq!(p[2].components()[0].as_ptr(), last);
    }

    #[test]
    fn sorting_twice_is_a_no_op() {
        for collation in [Collation::Lexicographic, Collation::Numeric] {
            let mut p = pool(&["46.70.29.76", "1.29.168.152", "46.70.225.39", "186.46.222.194"]);
            sort_descending(&mut p, collation);
            let once = p.clone();
            sort_descending(&mut p, collation);
            assert_eq!(p, once);
        }
    }

    #[test]
    fn mixed_arity_pool_sorts() {
        assert_eq!(
            sorted(&["", "1..2", "1.1.234.8", "3"], Collation::Lexicographic),
            vec!["3", "1.1.234.8", "1..2", ""]
        );
    }
}
