use mapdef_extract::models::{Field, MapRecord};

/// Collapses runs of sequentially numbered map variants into one entry.
///
/// `rus_100k_2`, `rus_100k_3`, `rus_100k_4` become a single `rus_100k`. A
/// record is merged into its predecessor when both names agree once their last
/// `_segment` is dropped and the record's own last segment is all digits; the
/// predecessor takes the shortened name. Passes repeat until one removes
/// nothing, so collapsing an already collapsed list changes nothing.
///
/// Returns the number of records removed. The survivors keep their order.
pub fn collapse(records: &mut Vec<MapRecord>) -> usize {
    let mut removed = 0;
    loop {
        let count = collapse_pass(records);
        if count == 0 {
            break removed;
        }
        removed += count;
    }
}

/// A single pass. Names are compared as they were when the pass started.
fn collapse_pass(records: &mut Vec<MapRecord>) -> usize {
    let names: Vec<Option<String>> = records.iter().map(|r| r.name.value().cloned()).collect();
    let mut remove = vec![false; records.len()];
    for i in 1..names.len() {
        let (Some(current), Some(previous)) = (&names[i], &names[i - 1]) else {
            continue;
        };
        let (Some((current_stem, suffix)), Some((previous_stem, _))) = (split_suffix(current), split_suffix(previous))
        else {
            continue;
        };
        if current_stem == previous_stem && is_numeric(suffix) {
            remove[i] = true;
            records[i - 1].name = Field::Value(previous_stem.to_string());
        }
    }
    let count = remove.iter().filter(|r| **r).count();
    if count > 0 {
        let mut flags = remove.into_iter();
        records.retain(|_| !flags.next().unwrap_or(false));
        tracing::debug!(removed = count, "Collapsed sequential map variants");
    }
    count
}

/// Splits at the last underscore. Names without one have no stem either, so
/// bare numbers such as `12`, `13` never collapse into each other.
fn split_suffix(name: &str) -> Option<(&str, &str)> {
    name.rsplit_once('_')
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapdef_extract::models::Category;
    use rstest::rstest;

    fn records(names: &[&str]) -> Vec<MapRecord> {
        names
            .iter()
            .map(|name| {
                let mut record = MapRecord::empty(Category::Vector, *name);
                if *name != "--" {
                    record.name = Field::Value(name.to_string());
                }
                record
            })
            .collect()
    }

    fn names(records: &[MapRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[rstest]
    #[case(&["route_1", "route_2", "route_3", "other"], &["route", "other"])]
    #[case(&["rus_100k_nat_2", "rus_100k_nat_3", "rus_200k"], &["rus_100k_nat", "rus_200k"])]
    // The first of a run needn't be numbered itself.
    #[case(&["de_vfr_base", "de_vfr_2"], &["de_vfr"])]
    // Non-numeric suffixes stay apart.
    #[case(&["de_vfr_north", "de_vfr_south"], &["de_vfr_north", "de_vfr_south"])]
    #[case(&["de_vfr_1", "at_vfr_2"], &["de_vfr_1", "at_vfr_2"])]
    #[case(&["map1", "map2"], &["map1", "map2"])]
    #[case(&["12", "13"], &["12", "13"])]
    #[case(&["--", "--"], &["--", "--"])]
    #[case(&["route_1", "--", "route_2"], &["route_1", "--", "route_2"])]
    #[case(&[], &[])]
    fn test_collapse(#[case] input: &[&str], #[case] expected: &[&str]) {
        let mut records = records(input);
        let removed = collapse(&mut records);
        assert_eq!(names(&records), expected);
        assert_eq!(removed, input.len() - expected.len());
    }

    #[test]
    fn repeats_until_stable() {
        // The first pass yields `a_1`, `a_2`; only a second pass joins those.
        let mut records = records(&["a_1_1", "a_1_2", "a_2_1", "a_2_2"]);
        assert_eq!(collapse(&mut records), 3);
        assert_eq!(names(&records), ["a"]);
    }

    #[rstest]
    #[case(&["route_1", "route_2", "route_3", "other"])]
    #[case(&["a_1_1", "a_1_2", "a_2", "a_3", "b_x", "b_1"])]
    #[case(&["x_1", "y_1", "y_2", "fac_1", "fac_2"])]
    fn test_idempotent(#[case] input: &[&str]) {
        let mut once = records(input);
        collapse(&mut once);
        let mut twice = once.clone();
        assert_eq!(collapse(&mut twice), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn keeps_survivor_fields() {
        let mut input = records(&["route_1", "route_2"]);
        input[0].priority = Field::Value(7);
        input[1].priority = Field::Value(9);
        collapse(&mut input);
        assert_eq!(input.len(), 1);
        assert_eq!(input[0].priority, Field::Value(7));
        assert_eq!(input[0].folder, "route_1");
    }
}
